//! Stop-catalogue client and per-line stop resolution.
//!
//! Given a decoded route, this module resolves which stops are actually
//! ridden: the agency registry turns agency display names into operator
//! codes, one catalogue fetch is issued per resolved line, and each
//! catalogue is narrowed to its ridden range before the results are
//! merged.

pub mod agency;

mod aggregate;
mod client;
mod error;
mod fetch;
mod mock;

pub use aggregate::ridden_range;
pub use client::{
    StopClient, StopClientConfig, StopLocationDto, StopPointDto, StopsContents, StopsData,
    StopsResponse, convert_stops,
};
pub use error::StopError;
pub use fetch::{LineQuery, StopSource, fetch_route_stops, line_queries};
pub use mock::MockStopClient;
