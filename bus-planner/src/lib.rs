//! Bus route planner core.
//!
//! Decodes multi-modal transit directions into ordered route segments,
//! resolves the stops actually ridden on each bus leg by querying
//! per-line stop catalogues concurrently, and assembles the final point
//! sequence handed to a renderer.

pub mod cache;
pub mod directions;
pub mod domain;
pub mod stops;
pub mod sync;
