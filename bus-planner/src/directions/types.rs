//! Directions API response DTOs.
//!
//! These types map directly to the transit directions JSON response.
//! They use `Option` liberally because the service omits whole subtrees
//! rather than sending null values in many cases.

use serde::Deserialize;

/// Top-level directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// Candidate routes; absent when nothing was found.
    pub routes: Option<Vec<RouteCandidate>>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteCandidate {
    /// The legs of this candidate.
    pub legs: Option<Vec<Leg>>,
}

/// One leg of a candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct Leg {
    /// Top-level steps; absent on degenerate legs.
    pub steps: Option<Vec<Step>>,
}

/// A single instruction step.
///
/// Steps nest: a coarse transit instruction may be decomposed into finer
/// sub-steps that refine it.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub start_location: Location,

    pub end_location: Location,

    /// Instruction text; may contain markup tags.
    pub html_instructions: String,

    /// Nested sub-steps refining this instruction.
    pub steps: Option<Vec<Step>>,

    /// Travel mode string; "TRANSIT" marks a bus step.
    pub travel_mode: String,

    /// Transit block, present on transit steps.
    pub transit_details: Option<TransitDetails>,
}

/// A coordinate as sent by the directions service.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Transit metadata for one bus step.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitDetails {
    pub line: Line,

    pub departure_stop: TransitStop,

    pub arrival_stop: TransitStop,

    /// Number of stops the ride is expected to cover.
    pub num_stops: u32,
}

/// A departure or arrival stop reference.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitStop {
    pub name: String,
    pub location: Location,
}

/// A transit line and the agencies operating it.
#[derive(Debug, Clone, Deserialize)]
pub struct Line {
    pub agencies: Vec<Agency>,

    /// Short line identifier (e.g. "22"); not every line carries one.
    pub short_name: Option<String>,
}

/// A transit agency reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Agency {
    pub name: String,
}
