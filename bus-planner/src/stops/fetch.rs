//! Concurrent stop resolution for a decoded route.
//!
//! Builds one catalogue query per resolved bus line, fetches them all
//! concurrently, narrows each catalogue to its ridden range, and merges
//! the results into a single shared collection.

use std::future::Future;

use futures::future::join_all;
use tracing::debug;

use crate::domain::{OperatorCode, Route, Stop};
use crate::sync::Shared;

use super::agency;
use super::aggregate::ridden_range;
use super::error::StopError;

/// Trait for fetching a line's stop catalogue.
///
/// This abstraction lets the orchestrator run against the plain client,
/// the cached client, or mock data in tests.
pub trait StopSource {
    /// Fetch the full ordered stop catalogue for one operator line.
    fn stops_for_line(
        &self,
        operator: &OperatorCode,
        line: Option<&str>,
    ) -> impl Future<Output = Result<Vec<Stop>, StopError>> + Send;
}

/// One stop-catalogue query, derived from a transit segment and one of
/// its resolved agencies.
#[derive(Debug, Clone, PartialEq)]
pub struct LineQuery {
    pub operator: OperatorCode,
    pub line: Option<String>,
    pub departure_stop: String,
    pub arrival_stop: String,
    pub expected_stops: u32,
}

/// Build the line queries for a route's transit segments.
///
/// Each transit segment contributes one query per agency name the
/// registry resolves; unresolved names are dropped without error.
pub fn line_queries(route: &Route) -> Vec<LineQuery> {
    let mut queries = Vec::new();

    for detail in route.transit_details() {
        for agency_name in &detail.agencies {
            if let Some(operator) = agency::resolve(agency_name) {
                queries.push(LineQuery {
                    operator,
                    line: detail.line.clone(),
                    departure_stop: detail.departure_stop.clone(),
                    arrival_stop: detail.arrival_stop.clone(),
                    expected_stops: detail.expected_stops,
                });
            }
        }
    }

    queries
}

/// Resolve the stops actually ridden across all of a route's bus lines.
///
/// Issues one concurrent fetch per line query and waits for every fetch
/// to finish before returning, exactly once, the merged result. Each
/// successful catalogue is narrowed to its ridden range and appended to
/// the shared collection; a failed fetch contributes nothing and is not
/// retried. The merged list is the unordered union across lines.
///
/// A route with no resolvable transit content resolves immediately to an
/// empty list, with no fetch issued.
pub async fn fetch_route_stops<S: StopSource>(source: &S, route: &Route) -> Vec<Stop> {
    let queries = line_queries(route);
    if queries.is_empty() {
        return Vec::new();
    }

    let merged = Shared::new(Vec::new());

    let fetches = queries.iter().map(|query| {
        let merged = merged.clone();
        async move {
            match source
                .stops_for_line(&query.operator, query.line.as_deref())
                .await
            {
                Ok(catalogue) => {
                    let ridden = ridden_range(
                        &catalogue,
                        &query.departure_stop,
                        &query.arrival_stop,
                        query.expected_stops,
                    );
                    merged
                        .mutate(|mut stops| {
                            stops.extend(ridden);
                            stops
                        })
                        .await;
                }
                Err(e) => {
                    debug!(
                        operator = %query.operator,
                        error = %e,
                        "stop fetch failed, contributing nothing"
                    );
                }
            }
        }
    });

    join_all(fetches).await;

    merged.read().await
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::domain::{Coordinate, RouteSegment, SegmentMode, TransitDetail};

    /// In-memory stop source with per-operator delays and failures.
    struct MockSource {
        catalogues: HashMap<&'static str, Vec<Stop>>,
        delays_ms: HashMap<&'static str, u64>,
        failing: Vec<&'static str>,
        call_count: Arc<Mutex<usize>>,
    }

    impl MockSource {
        fn new() -> Self {
            Self {
                catalogues: HashMap::new(),
                delays_ms: HashMap::new(),
                failing: Vec::new(),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        fn with_catalogue(mut self, operator: &'static str, names: &[&str]) -> Self {
            self.catalogues.insert(operator, stops(names));
            self
        }

        fn with_delay(mut self, operator: &'static str, ms: u64) -> Self {
            self.delays_ms.insert(operator, ms);
            self
        }

        fn with_failure(mut self, operator: &'static str) -> Self {
            self.failing.push(operator);
            self
        }

        fn calls(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    impl StopSource for MockSource {
        async fn stops_for_line(
            &self,
            operator: &OperatorCode,
            _line: Option<&str>,
        ) -> Result<Vec<Stop>, StopError> {
            *self.call_count.lock().unwrap() += 1;

            if let Some(ms) = self.delays_ms.get(operator.as_str()) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }

            if self.failing.contains(&operator.as_str()) {
                return Err(StopError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }

            Ok(self
                .catalogues
                .get(operator.as_str())
                .cloned()
                .unwrap_or_default())
        }
    }

    fn stops(names: &[&str]) -> Vec<Stop> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Stop {
                name: name.to_string(),
                position: Coordinate {
                    lat: i as f64,
                    lng: 0.0,
                },
            })
            .collect()
    }

    fn coord() -> Coordinate {
        Coordinate { lat: 0.0, lng: 0.0 }
    }

    fn walk_segment() -> RouteSegment {
        RouteSegment {
            start: coord(),
            end: coord(),
            instruction: "walk".to_string(),
            mode: SegmentMode::Walk,
        }
    }

    fn bus_segment(agency: &str, departure: &str, arrival: &str, expected: u32) -> RouteSegment {
        RouteSegment {
            start: coord(),
            end: coord(),
            instruction: "ride".to_string(),
            mode: SegmentMode::Bus(TransitDetail {
                line: None,
                agencies: vec![agency.to_string()],
                departure_stop: departure.to_string(),
                arrival_stop: arrival.to_string(),
                expected_stops: expected,
            }),
        }
    }

    #[test]
    fn line_queries_resolve_agencies() {
        let route = Route::new(vec![
            walk_segment(),
            bus_segment("AC Transit", "A", "B", 2),
            bus_segment("VTA", "C", "D", 3),
        ])
        .unwrap();

        let queries = line_queries(&route);
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].operator.as_str(), "AC");
        assert_eq!(queries[0].departure_stop, "A");
        assert_eq!(queries[1].operator.as_str(), "SC");
        assert_eq!(queries[1].expected_stops, 3);
    }

    #[test]
    fn line_queries_drop_unresolved_agencies() {
        let route = Route::new(vec![bus_segment("Unknown Shuttle Co", "A", "B", 2)]).unwrap();
        assert!(line_queries(&route).is_empty());
    }

    #[test]
    fn line_queries_one_per_agency_of_a_segment() {
        let mut segment = bus_segment("AC Transit", "A", "B", 2);
        if let SegmentMode::Bus(detail) = &mut segment.mode {
            detail.agencies.push("Nobody Knows This One".to_string());
            detail.agencies.push("SamTrans".to_string());
        }
        let route = Route::new(vec![segment]).unwrap();

        let queries = line_queries(&route);
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].operator.as_str(), "AC");
        assert_eq!(queries[1].operator.as_str(), "SM");
        // Both queries carry the same segment's endpoints
        assert_eq!(queries[1].departure_stop, "A");
    }

    #[tokio::test]
    async fn walk_only_route_issues_no_fetches() {
        let source = MockSource::new();
        let route = Route::new(vec![walk_segment(), walk_segment()]).unwrap();

        let merged = fetch_route_stops(&source, &route).await;

        assert!(merged.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn unresolved_agency_issues_no_fetches() {
        let source = MockSource::new();
        let route = Route::new(vec![bus_segment("Unknown Shuttle Co", "A", "B", 2)]).unwrap();

        let merged = fetch_route_stops(&source, &route).await;

        assert!(merged.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn waits_for_all_fetches_and_absorbs_failures() {
        // Three lines finishing at different times; the slowest succeeds,
        // one fails outright. The merged result must include the slow
        // line's stops (the join waited) and nothing from the failure.
        let source = MockSource::new()
            .with_catalogue("AC", &["A", "B", "C"])
            .with_delay("AC", 50)
            .with_catalogue("SC", &["C", "D"])
            .with_delay("SC", 5)
            .with_catalogue("SM", &["X", "Y"])
            .with_failure("SM")
            .with_delay("SM", 20);

        let route = Route::new(vec![
            bus_segment("AC Transit", "A", "C", 3),
            bus_segment("VTA", "C", "D", 2),
            bus_segment("SamTrans", "X", "Y", 2),
        ])
        .unwrap();

        let merged = fetch_route_stops(&source, &route).await;

        assert_eq!(source.calls(), 3);

        let mut names: Vec<_> = merged.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B", "C", "C", "D"]);
    }

    #[tokio::test]
    async fn catalogues_are_narrowed_to_the_ridden_range() {
        let source =
            MockSource::new().with_catalogue("AC", &["Far", "A", "Mid", "B", "Beyond"]);

        let route = Route::new(vec![bus_segment("AC Transit", "A", "B", 2)]).unwrap();

        let merged = fetch_route_stops(&source, &route).await;

        let names: Vec<_> = merged.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "Mid", "B"]);
    }

    #[tokio::test]
    async fn failed_fetch_contributes_nothing() {
        let source = MockSource::new().with_failure("AC");
        let route = Route::new(vec![bus_segment("AC Transit", "A", "B", 2)]).unwrap();

        let merged = fetch_route_stops(&source, &route).await;

        assert!(merged.is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn no_match_in_catalogue_contributes_nothing() {
        let source = MockSource::new().with_catalogue("AC", &["P", "Q"]);
        let route = Route::new(vec![bus_segment("AC Transit", "A", "B", 2)]).unwrap();

        let merged = fetch_route_stops(&source, &route).await;

        assert!(merged.is_empty());
        assert_eq!(source.calls(), 1);
    }
}
