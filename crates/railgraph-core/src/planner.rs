//! # Route Planner
//!
//! Minimum-cost routing over a read-only view of the network, with a
//! configurable penalty for changing lines.
//!
//! Because the penalty depends on the line of the *previous* edge, the
//! search state is `(station, line of last edge used)` rather than the
//! station alone. Plain single-state Dijkstra is wrong here: the cheapest
//! way to reach an intermediate station may arrive on the wrong line, and
//! a pricier arrival on the right line can win once the penalty is paid.
//! The search therefore runs over the expanded state space
//! `stations × (lines ∪ {none})`.
//!
//! All bookkeeping uses `BTreeMap`/`BTreeSet`. The frontier is an ordered
//! set of `(cost, station, line)` triples, so among equal-cost states the
//! smallest `(station, line)` is expanded first: the tie-break is
//! deterministic and documented, but callers should rely only on the total
//! cost and transfer count, which are unique.

use crate::{Distance, LineCode, Network, RailgraphError, RouteQuery, StationId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Search state: a station together with the line used to arrive there.
/// `None` only at the origin, where no line has been boarded yet.
type SearchState = (StationId, Option<LineCode>);

// =============================================================================
// ROUTE GRAPH
// =============================================================================

/// One traversable direction of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEdge {
    /// Station this edge leads to.
    pub to: StationId,
    /// Travel distance.
    pub distance: Distance,
    /// Line the edge belongs to.
    pub line: LineCode,
}

/// A read-only, query-ready view of a network.
///
/// Pure function of the network snapshot it was built from; holds no hidden
/// state and never mutates. Each undirected link appears once per
/// direction, sorted for deterministic expansion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGraph {
    station_count: u32,
    edges: BTreeMap<StationId, Vec<RouteEdge>>,
}

impl RouteGraph {
    /// Build the view from a network snapshot.
    #[must_use]
    pub fn build(network: &Network) -> Self {
        let mut edges: BTreeMap<StationId, Vec<RouteEdge>> = network
            .station_ids()
            .map(|id| (id, Vec::new()))
            .collect();

        for (pair, link) in network.links() {
            let forward = RouteEdge {
                to: pair.upper(),
                distance: link.distance,
                line: link.line,
            };
            let backward = RouteEdge {
                to: pair.lower(),
                distance: link.distance,
                line: link.line,
            };
            edges.entry(pair.lower()).or_default().push(forward);
            edges.entry(pair.upper()).or_default().push(backward);
        }

        for list in edges.values_mut() {
            list.sort_unstable_by_key(|edge| (edge.to, edge.line, edge.distance));
        }

        Self {
            station_count: network.station_count(),
            edges,
        }
    }

    /// Number of stations in the view.
    #[must_use]
    pub const fn station_count(&self) -> u32 {
        self.station_count
    }

    /// Whether `id` is a valid station in the view.
    #[must_use]
    pub const fn contains_station(&self, id: StationId) -> bool {
        id.0 >= 1 && id.0 <= self.station_count
    }

    /// Outgoing edges of a station, sorted.
    #[must_use]
    pub fn edges(&self, id: StationId) -> &[RouteEdge] {
        self.edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    // =========================================================================
    // SHORTEST PATH
    // =========================================================================

    /// Compute the minimum-cost route for a query.
    ///
    /// Cost of a route is the sum of its edge distances plus
    /// `transfer_penalty` for every station where the incoming and
    /// outgoing lines differ.
    ///
    /// Errors: `InvalidInput` when origin equals destination,
    /// `StationNotFound` for an endpoint outside the view, `Unreachable`
    /// when the search exhausts the frontier without touching the
    /// destination.
    pub fn shortest_path(&self, query: &RouteQuery) -> Result<Itinerary, RailgraphError> {
        let origin = query.origin;
        let destination = query.destination;

        if origin == destination {
            return Err(RailgraphError::InvalidInput(
                "origin and destination must be distinct".to_string(),
            ));
        }
        for endpoint in [origin, destination] {
            if !self.contains_station(endpoint) {
                return Err(RailgraphError::StationNotFound(endpoint));
            }
        }

        let mut best: BTreeMap<SearchState, Distance> = BTreeMap::new();
        let mut prev: BTreeMap<SearchState, SearchState> = BTreeMap::new();
        let mut frontier: BTreeSet<(Distance, StationId, Option<LineCode>)> = BTreeSet::new();

        best.insert((origin, None), Distance::ZERO);
        frontier.insert((Distance::ZERO, origin, None));

        while let Some((cost, station, last_line)) = frontier.pop_first() {
            if station == destination {
                // First destination pop is minimal over all arrival lines.
                return Ok(reconstruct(&prev, (station, last_line), cost));
            }

            for edge in self.edges(station) {
                let mut next_cost = cost.saturating_add(edge.distance);
                if let Some(boarded) = last_line {
                    if boarded != edge.line {
                        next_cost = next_cost.saturating_add(query.transfer_penalty);
                    }
                }

                let next_state = (edge.to, Some(edge.line));
                let improved = match best.get(&next_state) {
                    None => true,
                    Some(&known) => next_cost < known,
                };
                if improved {
                    // Decrease-key: drop the superseded frontier entry so
                    // every state appears at most once.
                    if let Some(&known) = best.get(&next_state) {
                        frontier.remove(&(known, edge.to, Some(edge.line)));
                    }
                    best.insert(next_state, next_cost);
                    prev.insert(next_state, (station, last_line));
                    frontier.insert((next_cost, edge.to, Some(edge.line)));
                }
            }
        }

        Err(RailgraphError::Unreachable {
            origin,
            destination,
        })
    }
}

/// Walk the predecessor map back to the origin and derive the transfer
/// count from the line sequence of the visited states.
fn reconstruct(
    prev: &BTreeMap<SearchState, SearchState>,
    end: SearchState,
    total_cost: Distance,
) -> Itinerary {
    let mut states = vec![end];
    let mut current = end;
    while let Some(&predecessor) = prev.get(&current) {
        states.push(predecessor);
        current = predecessor;
    }
    states.reverse();

    let mut transfers = 0u32;
    for window in states.windows(2) {
        if let (Some(incoming), Some(outgoing)) = (window[0].1, window[1].1) {
            if incoming != outgoing {
                transfers += 1;
            }
        }
    }

    Itinerary {
        path: states.into_iter().map(|(station, _)| station).collect(),
        total_cost,
        transfers,
    }
}

// =============================================================================
// ITINERARY
// =============================================================================

/// Result of a route query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Stations visited, origin and destination inclusive.
    pub path: Vec<StationId>,
    /// Distance sum plus penalty sum, in the same fixed-point unit as
    /// `Distance`.
    pub total_cost: Distance,
    /// Number of line changes actually incurred along `path`.
    pub transfers: u32,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(code: u8) -> LineCode {
        LineCode::new(code).expect("canonical code")
    }

    fn d(tenths: u64) -> Distance {
        Distance::from_tenths(tenths)
    }

    fn id(raw: u32) -> StationId {
        StationId(raw)
    }

    /// Stations 1-4. The direct route 1-2-3 is shorter but forces a line
    /// change at station 2; the detour 1-2-4-3 stays on one line.
    ///
    ///   1 --(Red, 5.0)-- 2 --(Blue, 5.0)-- 3
    ///                    2 --(Red, 3.0)--- 4 --(Red, 3.0)-- 3
    fn penalty_flip_network() -> Network {
        let mut network = Network::new(4).expect("create");
        network.upsert_link(id(1), id(2), d(50), line(2)).expect("link");
        network.upsert_link(id(2), id(3), d(50), line(1)).expect("link");
        network.upsert_link(id(2), id(4), d(30), line(2)).expect("link");
        network.upsert_link(id(4), id(3), d(30), line(2)).expect("link");
        network
    }

    #[test]
    fn zero_penalty_takes_the_shorter_route() {
        let graph = RouteGraph::build(&penalty_flip_network());

        let itinerary = graph
            .shortest_path(&RouteQuery::without_penalty(id(1), id(3)))
            .expect("route");

        assert_eq!(itinerary.path, vec![id(1), id(2), id(3)]);
        assert_eq!(itinerary.total_cost, d(100));
        assert_eq!(itinerary.transfers, 1);
    }

    #[test]
    fn penalty_flips_to_the_single_line_route() {
        let graph = RouteGraph::build(&penalty_flip_network());

        // Direct: 10.0 + one transfer (2.0) = 12.0.
        // Detour: 11.0, no transfer. The penalty makes the detour optimal.
        let itinerary = graph
            .shortest_path(&RouteQuery::new(id(1), id(3), d(20)))
            .expect("route");

        assert_eq!(itinerary.path, vec![id(1), id(2), id(4), id(3)]);
        assert_eq!(itinerary.total_cost, d(110));
        assert_eq!(itinerary.transfers, 0);
    }

    /// Single-state Dijkstra fails here: the cheapest arrival at station 2
    /// boards the Blue line, but the optimal route to 3 must arrive at 2
    /// on Red to avoid the transfer.
    ///
    ///   1 --(Blue, 2.0)-- 2 --(Red, 2.0)-- 3
    ///   1 --(Red, 1.0)--- 4 --(Red, 2.0)-- 2
    #[test]
    fn optimal_route_arrives_on_the_pricier_line() {
        let mut network = Network::new(4).expect("create");
        network.upsert_link(id(1), id(2), d(20), line(1)).expect("link");
        network.upsert_link(id(1), id(4), d(10), line(2)).expect("link");
        network.upsert_link(id(4), id(2), d(20), line(2)).expect("link");
        network.upsert_link(id(2), id(3), d(20), line(2)).expect("link");
        let graph = RouteGraph::build(&network);

        let itinerary = graph
            .shortest_path(&RouteQuery::new(id(1), id(3), d(100)))
            .expect("route");

        // Via Blue: 2.0 + 2.0 + 10.0 penalty = 14.0.
        // Via Red detour: 1.0 + 2.0 + 2.0 = 5.0, no transfer.
        assert_eq!(itinerary.path, vec![id(1), id(4), id(2), id(3)]);
        assert_eq!(itinerary.total_cost, d(50));
        assert_eq!(itinerary.transfers, 0);
    }

    #[test]
    fn single_line_chain_has_no_transfers() {
        let mut network = Network::new(3).expect("create");
        network.upsert_link(id(1), id(2), d(40), line(3)).expect("link");
        network.upsert_link(id(2), id(3), d(60), line(3)).expect("link");
        let graph = RouteGraph::build(&network);

        let itinerary = graph
            .shortest_path(&RouteQuery::new(id(1), id(3), d(999)))
            .expect("route");

        assert_eq!(itinerary.path, vec![id(1), id(2), id(3)]);
        assert_eq!(itinerary.total_cost, d(100));
        assert_eq!(itinerary.transfers, 0);
    }

    #[test]
    fn equal_endpoints_rejected() {
        let graph = RouteGraph::build(&penalty_flip_network());
        let result = graph.shortest_path(&RouteQuery::without_penalty(id(2), id(2)));
        assert!(matches!(result, Err(RailgraphError::InvalidInput(_))));
    }

    #[test]
    fn unknown_endpoint_rejected() {
        let graph = RouteGraph::build(&penalty_flip_network());
        let result = graph.shortest_path(&RouteQuery::without_penalty(id(1), id(9)));
        assert!(matches!(
            result,
            Err(RailgraphError::StationNotFound(StationId(9)))
        ));
    }

    #[test]
    fn isolated_station_is_unreachable() {
        let mut network = Network::new(3).expect("create");
        network.upsert_link(id(1), id(2), d(10), line(1)).expect("link");
        let graph = RouteGraph::build(&network);

        let result = graph.shortest_path(&RouteQuery::without_penalty(id(1), id(3)));
        assert!(matches!(
            result,
            Err(RailgraphError::Unreachable {
                origin: StationId(1),
                destination: StationId(3),
            })
        ));

        // Symmetric: the isolated station as origin is just as unreachable.
        let result = graph.shortest_path(&RouteQuery::without_penalty(id(3), id(2)));
        assert!(matches!(result, Err(RailgraphError::Unreachable { .. })));
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let graph = RouteGraph::build(&penalty_flip_network());
        let query = RouteQuery::new(id(1), id(3), d(20));

        let first = graph.shortest_path(&query).expect("route");
        let second = graph.shortest_path(&query).expect("route");
        assert_eq!(first, second);
    }

    #[test]
    fn equal_cost_routes_agree_on_cost_and_transfers() {
        // Two disjoint single-line routes of identical cost; the chosen
        // path is a tie-break detail, the cost and transfer count are not.
        let mut network = Network::new(4).expect("create");
        network.upsert_link(id(1), id(2), d(30), line(1)).expect("link");
        network.upsert_link(id(2), id(4), d(30), line(1)).expect("link");
        network.upsert_link(id(1), id(3), d(30), line(2)).expect("link");
        network.upsert_link(id(3), id(4), d(30), line(2)).expect("link");
        let graph = RouteGraph::build(&network);

        let itinerary = graph
            .shortest_path(&RouteQuery::new(id(1), id(4), d(50)))
            .expect("route");

        assert_eq!(itinerary.total_cost, d(60));
        assert_eq!(itinerary.transfers, 0);
        assert_eq!(itinerary.path.len(), 3);
    }

    #[test]
    fn view_is_pure_and_sorted() {
        let network = penalty_flip_network();
        let graph = RouteGraph::build(&network);

        assert_eq!(graph.station_count(), 4);
        let edges = graph.edges(id(2));
        let targets: Vec<StationId> = edges.iter().map(|e| e.to).collect();
        assert_eq!(targets, vec![id(1), id(3), id(4)]);

        // Building twice from the same snapshot yields the same view.
        assert_eq!(graph, RouteGraph::build(&network));
    }
}
