//! Domain types for the bus route planner.
//!
//! This module contains the core domain model types that represent
//! a decoded route. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod operator;
mod route;
mod stop;

pub use error::DomainError;
pub use operator::{InvalidOperatorCode, OperatorCode};
pub use route::{Coordinate, Route, RouteSegment, SegmentMode, TransitDetail};
pub use stop::{PointKind, PolylinePoint, Stop};
