//! Conversion from directions DTOs to domain routes.
//!
//! This module handles the transformation of raw directions responses
//! into validated domain routes: the nested step tree is flattened into
//! ordered segments and transit content is checked at the boundary.

use tracing::warn;

use crate::domain::{Coordinate, Route, RouteSegment, SegmentMode, TransitDetail};

use super::types::{DirectionsResponse, Leg, Location, Step, TransitDetails};

/// Travel-mode marker for bus steps. Every other value maps to walking.
const TRANSIT_MODE: &str = "TRANSIT";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    /// Candidate leg has no steps
    #[error("candidate has no steps")]
    EmptySteps,

    /// A transit step is missing its transit detail block
    #[error("transit step is missing transit details")]
    MissingTransitDetails,

    /// Every candidate in the response was excluded
    #[error("no usable route in response ({excluded} candidate(s) excluded)")]
    NoUsableRoutes { excluded: usize },
}

/// Decode a directions response into candidate routes.
///
/// Produces one route per candidate leg. A response with no candidates
/// decodes to an empty list ("no routes found" is a valid empty answer).
/// A candidate that fails to decode is excluded with a warning; the
/// decode as a whole fails only when candidates were present and none
/// survived.
pub fn decode_routes(response: &DirectionsResponse) -> Result<Vec<Route>, DecodeError> {
    let candidates = response.routes.as_deref().unwrap_or(&[]);

    let mut routes = Vec::new();
    let mut excluded = 0usize;

    for candidate in candidates {
        for leg in candidate.legs.as_deref().unwrap_or(&[]) {
            match convert_leg(leg) {
                Ok(route) => routes.push(route),
                Err(e) => {
                    excluded += 1;
                    warn!(error = %e, "skipping route candidate");
                }
            }
        }
    }

    if routes.is_empty() && excluded > 0 {
        return Err(DecodeError::NoUsableRoutes { excluded });
    }

    Ok(routes)
}

/// Convert one candidate leg into a route.
fn convert_leg(leg: &Leg) -> Result<Route, DecodeError> {
    let steps = leg
        .steps
        .as_deref()
        .filter(|steps| !steps.is_empty())
        .ok_or(DecodeError::EmptySteps)?;

    let mut segments = Vec::new();
    flatten_steps(steps, &mut segments)?;

    // Non-empty is guaranteed by the steps check above.
    Route::new(segments).map_err(|_| DecodeError::EmptySteps)
}

/// Depth-first pre-order walk of the step tree.
///
/// Emits the segment for each step, then the segments of its sub-steps
/// immediately after: the coarse instruction is kept and its refinement
/// follows it in sequence.
fn flatten_steps(steps: &[Step], out: &mut Vec<RouteSegment>) -> Result<(), DecodeError> {
    for step in steps {
        out.push(convert_step(step)?);
        if let Some(sub_steps) = step.steps.as_deref() {
            flatten_steps(sub_steps, out)?;
        }
    }
    Ok(())
}

fn convert_step(step: &Step) -> Result<RouteSegment, DecodeError> {
    let mode = if step.travel_mode == TRANSIT_MODE {
        let details = step
            .transit_details
            .as_ref()
            .ok_or(DecodeError::MissingTransitDetails)?;
        SegmentMode::Bus(convert_transit(details))
    } else {
        SegmentMode::Walk
    };

    Ok(RouteSegment {
        start: coordinate(&step.start_location),
        end: coordinate(&step.end_location),
        instruction: strip_tags(&step.html_instructions),
        mode,
    })
}

fn convert_transit(details: &TransitDetails) -> TransitDetail {
    TransitDetail {
        line: details.line.short_name.clone(),
        agencies: details.line.agencies.iter().map(|a| a.name.clone()).collect(),
        departure_stop: details.departure_stop.name.clone(),
        arrival_stop: details.arrival_stop.name.clone(),
        expected_stops: details.num_stops,
    }
}

fn coordinate(location: &Location) -> Coordinate {
    Coordinate {
        lat: location.lat,
        lng: location.lng,
    }
}

/// Remove markup spans of the form `<...>` from instruction text.
///
/// A span must contain at least one character; an empty `<>` and a `<`
/// with no closing `>` are left intact.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => rest = &after[close + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
