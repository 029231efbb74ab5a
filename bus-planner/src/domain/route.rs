//! Decoded routes and their segments.

use super::error::DomainError;
use super::stop::{PointKind, PolylinePoint, Stop};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Transit metadata carried by a bus segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitDetail {
    /// Short line identifier (e.g. "22"); not every line has one.
    pub line: Option<String>,

    /// Display names of the agencies operating this line.
    pub agencies: Vec<String>,

    /// Name of the stop the ride boards at.
    pub departure_stop: String,

    /// Name of the stop the ride alights at.
    pub arrival_stop: String,

    /// Number of stops the ride is expected to cover.
    pub expected_stops: u32,
}

/// How a segment is travelled.
///
/// A bus segment always carries its transit detail; there is no way to
/// construct a bus segment without one.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentMode {
    Walk,
    Bus(TransitDetail),
}

/// One instruction of a route, immutable once decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub start: Coordinate,
    pub end: Coordinate,

    /// Markup-free instruction text.
    pub instruction: String,

    pub mode: SegmentMode,
}

impl RouteSegment {
    /// Whether this segment is ridden on a bus.
    pub fn is_bus(&self) -> bool {
        matches!(self.mode, SegmentMode::Bus(_))
    }

    /// The transit detail, for bus segments.
    pub fn transit(&self) -> Option<&TransitDetail> {
        match &self.mode {
            SegmentMode::Bus(detail) => Some(detail),
            SegmentMode::Walk => None,
        }
    }
}

/// An ordered sequence of route segments for one candidate route.
///
/// Segment order is traversal order and is never changed after decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    segments: Vec<RouteSegment>,
}

impl Route {
    /// Create a route from its segments.
    ///
    /// Fails if the segment list is empty.
    pub fn new(segments: Vec<RouteSegment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyRoute);
        }
        Ok(Self { segments })
    }

    /// The segments in traversal order.
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// Transit details of the route's bus segments, in traversal order.
    pub fn transit_details(&self) -> impl Iterator<Item = &TransitDetail> {
        self.segments.iter().filter_map(|s| s.transit())
    }

    /// Human-readable numbered instructions, one line per segment.
    pub fn instructions(&self) -> String {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, s)| format!("Step {}: {}", i + 1, s.instruction))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the final rendered point sequence.
    ///
    /// Emits one walk anchor per non-bus segment, at its start coordinate
    /// and in segment order, then appends the aggregated bus stops in the
    /// order the merge produced them. No re-sorting by position.
    pub fn polyline(&self, stops: &[Stop]) -> Vec<PolylinePoint> {
        let mut points = Vec::with_capacity(self.segments.len() + stops.len());

        for segment in &self.segments {
            if !segment.is_bus() {
                points.push(PolylinePoint {
                    position: segment.start,
                    name: String::new(),
                    kind: PointKind::WalkAnchor,
                });
            }
        }

        for stop in stops {
            points.push(PolylinePoint {
                position: stop.position,
                name: stop.name.clone(),
                kind: PointKind::BusStop,
            });
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    fn walk(lat: f64, instruction: &str) -> RouteSegment {
        RouteSegment {
            start: coord(lat, 0.0),
            end: coord(lat + 1.0, 0.0),
            instruction: instruction.to_string(),
            mode: SegmentMode::Walk,
        }
    }

    fn bus(lat: f64, instruction: &str) -> RouteSegment {
        RouteSegment {
            start: coord(lat, 0.0),
            end: coord(lat + 1.0, 0.0),
            instruction: instruction.to_string(),
            mode: SegmentMode::Bus(TransitDetail {
                line: Some("22".to_string()),
                agencies: vec!["SamTrans".to_string()],
                departure_stop: "A".to_string(),
                arrival_stop: "B".to_string(),
                expected_stops: 3,
            }),
        }
    }

    #[test]
    fn empty_route_rejected() {
        assert!(matches!(Route::new(vec![]), Err(DomainError::EmptyRoute)));
    }

    #[test]
    fn segment_accessors() {
        let w = walk(0.0, "walk");
        assert!(!w.is_bus());
        assert!(w.transit().is_none());

        let b = bus(0.0, "ride");
        assert!(b.is_bus());
        assert_eq!(b.transit().unwrap().departure_stop, "A");
    }

    #[test]
    fn transit_details_only_from_bus_segments() {
        let route = Route::new(vec![walk(0.0, "w1"), bus(1.0, "b1"), walk(2.0, "w2")]).unwrap();
        let details: Vec<_> = route.transit_details().collect();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].arrival_stop, "B");
    }

    #[test]
    fn instructions_are_numbered_lines() {
        let route = Route::new(vec![walk(0.0, "Head north"), bus(1.0, "Bus towards X")]).unwrap();
        assert_eq!(
            route.instructions(),
            "Step 1: Head north\nStep 2: Bus towards X"
        );
    }

    #[test]
    fn polyline_walk_anchors_then_bus_stops() {
        let route = Route::new(vec![walk(0.0, "w1"), bus(1.0, "b"), walk(2.0, "w2")]).unwrap();
        let stops = vec![
            Stop {
                name: "First St".to_string(),
                position: coord(10.0, 10.0),
            },
            Stop {
                name: "Second St".to_string(),
                position: coord(11.0, 11.0),
            },
        ];

        let points = route.polyline(&stops);

        assert_eq!(points.len(), 4);

        // Walk anchors first, in segment order, at start coordinates
        assert_eq!(points[0].kind, PointKind::WalkAnchor);
        assert_eq!(points[0].position, coord(0.0, 0.0));
        assert_eq!(points[0].name, "");
        assert_eq!(points[1].kind, PointKind::WalkAnchor);
        assert_eq!(points[1].position, coord(2.0, 0.0));

        // Then the bus stops, in merge order
        assert_eq!(points[2].kind, PointKind::BusStop);
        assert_eq!(points[2].name, "First St");
        assert_eq!(points[3].kind, PointKind::BusStop);
        assert_eq!(points[3].name, "Second St");
    }

    #[test]
    fn polyline_with_no_stops_is_anchors_only() {
        let route = Route::new(vec![walk(0.0, "w1"), walk(1.0, "w2")]).unwrap();
        let points = route.polyline(&[]);
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.kind == PointKind::WalkAnchor));
    }
}
