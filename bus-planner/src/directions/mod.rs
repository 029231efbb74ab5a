//! Transit directions client and decode boundary.
//!
//! This module provides an HTTP client for the transit directions API
//! and the conversion that turns raw responses into domain routes.
//!
//! Key characteristics of the payload:
//! - It is a nested tree: routes → legs → steps, where a step may carry
//!   finer sub-steps refining the same instruction
//! - Instruction text arrives with embedded markup, stripped at decode
//! - Transit steps carry a detail block naming the line, its agencies,
//!   the endpoint stops, and the expected stop count

mod client;
mod convert;
mod error;
mod types;

pub use client::{DirectionsClient, DirectionsConfig};
pub use convert::{DecodeError, decode_routes};
pub use error::DirectionsError;
pub use types::{
    Agency, DirectionsResponse, Leg, Line, Location, RouteCandidate, Step, TransitDetails,
    TransitStop,
};
