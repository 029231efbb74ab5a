//! Stops and the rendered point sequence.

use super::route::Coordinate;

/// A single named stop from a line's catalogue, in timetable order.
///
/// The name is the sole matching key used by the aggregator and is not
/// guaranteed unique within a catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub name: String,
    pub position: Coordinate,
}

/// Kind of a rendered path point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// Start anchor of a walking segment.
    WalkAnchor,

    /// A bus stop actually ridden through.
    BusStop,
}

/// One point of the final rendered path.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePoint {
    pub position: Coordinate,

    /// Display name; empty for walk anchors.
    pub name: String,

    pub kind: PointKind,
}
