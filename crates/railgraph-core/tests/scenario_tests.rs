//! # Scenario Tests (T0-T3)
//!
//! End-to-end scenarios across the model, the codec, and the planner.
//!
//! ## Tiers
//! - T0: Model editing sessions
//! - T1: Codec strictness
//! - T2: Transfer-aware routing
//! - T3: Edit → persist → reload → route

#![allow(clippy::panic)]

use railgraph_core::{
    ArtifactBundle, ArtifactKind, Distance, LineCode, Network, RailgraphError, RouteGraph,
    RouteQuery, StationId, network_from_bundle, network_to_bundle,
};

fn line(code: u8) -> LineCode {
    LineCode::new(code).expect("canonical code")
}

fn d(tenths: u64) -> Distance {
    Distance::from_tenths(tenths)
}

fn id(raw: u32) -> StationId {
    StationId(raw)
}

// =============================================================================
// TIER T0: MODEL EDITING SESSIONS
// =============================================================================

mod t0_model_editing {
    use super::*;

    /// T0.1: A realistic editing session ends in a consistent model.
    #[test]
    fn editing_session_stays_consistent() {
        let mut network = Network::new(4).expect("create");
        network.set_station_name(id(1), "Harbor").expect("name");
        network.set_station_name(id(4), "Airport").expect("name");

        network.upsert_link(id(1), id(2), d(45), line(1)).expect("link");
        network.upsert_link(id(2), id(3), d(30), line(1)).expect("link");
        network.upsert_link(id(3), id(4), d(60), line(2)).expect("link");

        // Correction pass: retime one link, reroute another.
        network.upsert_link(id(2), id(3), d(35), line(1)).expect("retime");
        network.remove_link(id(3), id(4)).expect("unlink");
        network.upsert_link(id(2), id(4), d(50), line(2)).expect("link");

        assert_eq!(network.link_count(), 3);
        assert_eq!(
            network.link(id(2), id(3)).expect("link").distance,
            d(35)
        );
        assert!(network.link(id(3), id(4)).is_none());
        assert_eq!(
            network.neighbors(id(2)).expect("neighbors"),
            vec![id(1), id(3), id(4)]
        );
    }

    /// T0.2: Growing then shrinking the network keeps ids contiguous.
    #[test]
    fn grow_then_shrink_renumbers() {
        let mut network = Network::new(2).expect("create");
        let third = network.add_station().expect("add");
        assert_eq!(third, id(3));
        network.set_station_name(third, "Depot").expect("name");
        network.upsert_link(id(1), third, d(10), line(5)).expect("link");

        network.remove_station(id(1)).expect("remove");

        // Old station 3 is now station 2 and kept its name and link target.
        assert_eq!(network.station_count(), 2);
        assert_eq!(
            network.station_name(id(2)).expect("name").as_str(),
            "Depot"
        );
        // The link was incident to the removed station and is gone.
        assert_eq!(network.link_count(), 0);
    }

    /// T0.3: Renaming never disturbs connectivity.
    #[test]
    fn renaming_is_a_pure_side_effect() {
        let mut network = Network::new(3).expect("create");
        network.upsert_link(id(1), id(2), d(10), line(1)).expect("link");

        let links_before: Vec<_> = network.links().map(|(pair, link)| (pair, *link)).collect();
        network.set_station_name(id(2), "Midtown").expect("name");
        let links_after: Vec<_> = network.links().map(|(pair, link)| (pair, *link)).collect();

        assert_eq!(links_before, links_after);
    }
}

// =============================================================================
// TIER T1: CODEC STRICTNESS
// =============================================================================

mod t1_codec {
    use super::*;

    fn metro() -> Network {
        let mut network = Network::new(5).expect("create");
        network.set_station_name(id(1), "Harbor").expect("name");
        network.set_station_name(id(5), "Airport").expect("name");
        network.upsert_link(id(1), id(2), d(45), line(1)).expect("link");
        network.upsert_link(id(2), id(3), d(30), line(1)).expect("link");
        network.upsert_link(id(3), id(4), d(25), line(2)).expect("link");
        network.upsert_link(id(4), id(5), d(55), line(2)).expect("link");
        network.upsert_link(id(2), id(5), d(80), line(3)).expect("link");
        network
    }

    /// T1.1: A persisted network decodes back to the identical model.
    #[test]
    fn roundtrip_preserves_everything() {
        let network = metro();
        let decoded = network_from_bundle(&network_to_bundle(&network)).expect("decode");
        assert_eq!(decoded, network);
    }

    /// T1.2: Decode refuses to run without the full bundle and names every
    /// absent artifact.
    #[test]
    fn partial_bundle_is_rejected_with_names() {
        let full = network_to_bundle(&metro());
        let mut partial = ArtifactBundle::empty();
        for kind in [ArtifactKind::Adjacency, ArtifactKind::Lines] {
            let content = full.get(kind).expect("slot").to_string();
            partial.set(kind, content);
        }

        match network_from_bundle(&partial) {
            Err(RailgraphError::MissingArtifact(kinds)) => {
                assert_eq!(kinds, vec![ArtifactKind::Distances, ArtifactKind::Names]);
            }
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
    }

    /// T1.3: An adjacency listing claiming an edge the distance matrix
    /// zeroes out is corrupt, not a best-effort zero-weight edge.
    #[test]
    fn adjacency_vs_matrix_disagreement_is_corrupt() {
        let mut bundle = network_to_bundle(&metro());

        let distances = bundle.get(ArtifactKind::Distances).expect("slot");
        // Zero out the (1,2) entry both ways, leaving adjacency untouched.
        let patched = distances.replacen("4.5", "0.0", 2);
        bundle.set(ArtifactKind::Distances, patched);

        match network_from_bundle(&bundle) {
            Err(RailgraphError::CorruptState(message)) => {
                assert!(message.contains("(1, 2)"), "message was: {}", message);
            }
            other => panic!("expected CorruptState, got {:?}", other),
        }
    }

    /// T1.4: Hand-written artifacts in the documented syntax decode.
    #[test]
    fn handwritten_bundle_decodes() {
        let mut bundle = ArtifactBundle::empty();
        bundle.set(ArtifactKind::Adjacency, "1-2\n2-1\n3-\n".to_string());
        bundle.set(
            ArtifactKind::Distances,
            "0.0 7.5 0.0\n7.5 0.0 0.0\n0.0 0.0 0.0\n".to_string(),
        );
        bundle.set(ArtifactKind::Lines, "0 4 0\n4 0 0\n0 0 0\n".to_string());
        bundle.set(
            ArtifactKind::Names,
            "1-North\n2-South\n3-E3\n".to_string(),
        );

        let network = network_from_bundle(&bundle).expect("decode");
        assert_eq!(network.station_count(), 3);
        assert_eq!(network.link_count(), 1);
        let link = network.link(id(1), id(2)).expect("link");
        assert_eq!(link.distance, d(75));
        assert_eq!(link.line, line(4));
        assert!(network.neighbors(id(3)).expect("neighbors").is_empty());
    }
}

// =============================================================================
// TIER T2: TRANSFER-AWARE ROUTING
// =============================================================================

mod t2_routing {
    use super::*;

    /// Stations 1-4: a short two-line route and a longer single-line
    /// detour between stations 1 and 3.
    fn two_route_network() -> Network {
        let mut network = Network::new(4).expect("create");
        network.upsert_link(id(1), id(2), d(50), line(2)).expect("link");
        network.upsert_link(id(2), id(3), d(50), line(1)).expect("link");
        network.upsert_link(id(2), id(4), d(30), line(2)).expect("link");
        network.upsert_link(id(4), id(3), d(30), line(2)).expect("link");
        network
    }

    /// T2.1: With no penalty the shorter route wins despite its transfer.
    #[test]
    fn no_penalty_prefers_raw_distance() {
        let graph = RouteGraph::build(&two_route_network());
        let itinerary = graph
            .shortest_path(&RouteQuery::without_penalty(id(1), id(3)))
            .expect("route");

        assert_eq!(itinerary.path, vec![id(1), id(2), id(3)]);
        assert_eq!(itinerary.total_cost, d(100));
        assert_eq!(itinerary.transfers, 1);
    }

    /// T2.2: A 2.0 penalty makes the single-line detour optimal: the
    /// planner accepts a higher base distance to avoid the transfer.
    #[test]
    fn penalty_buys_the_transfer_free_detour() {
        let graph = RouteGraph::build(&two_route_network());
        let itinerary = graph
            .shortest_path(&RouteQuery::new(id(1), id(3), d(20)))
            .expect("route");

        assert_eq!(itinerary.path, vec![id(1), id(2), id(4), id(3)]);
        assert_eq!(itinerary.total_cost, d(110));
        assert_eq!(itinerary.transfers, 0);
    }

    /// T2.3: An isolated station is unreachable from anywhere, and
    /// anywhere is unreachable from it.
    #[test]
    fn isolated_station_unreachable_both_ways() {
        let mut network = Network::new(4).expect("create");
        network.upsert_link(id(1), id(2), d(10), line(1)).expect("link");
        network.upsert_link(id(2), id(3), d(10), line(1)).expect("link");
        let graph = RouteGraph::build(&network);

        for query in [
            RouteQuery::without_penalty(id(1), id(4)),
            RouteQuery::without_penalty(id(4), id(1)),
        ] {
            assert!(matches!(
                graph.shortest_path(&query),
                Err(RailgraphError::Unreachable { .. })
            ));
        }
    }

    /// T2.4: The minimum cost is stable across penalties that do not flip
    /// the optimum, and monotone in the penalty.
    #[test]
    fn cost_is_monotone_in_penalty() {
        let graph = RouteGraph::build(&two_route_network());

        let mut previous = Distance::ZERO;
        for penalty in [0u64, 5, 10, 20, 40] {
            let itinerary = graph
                .shortest_path(&RouteQuery::new(id(1), id(3), d(penalty)))
                .expect("route");
            assert!(itinerary.total_cost >= previous);
            previous = itinerary.total_cost;
        }
        // Once the single-line detour wins, the penalty stops mattering.
        assert_eq!(previous, d(110));
    }
}

// =============================================================================
// TIER T3: EDIT → PERSIST → RELOAD → ROUTE
// =============================================================================

mod t3_end_to_end {
    use super::*;

    /// T3.1: Routing over a reloaded network gives the same answer as
    /// routing over the live one.
    #[test]
    fn reload_preserves_routing() {
        let mut network = Network::new(6).expect("create");
        network.set_station_name(id(1), "Harbor").expect("name");
        network.upsert_link(id(1), id(2), d(40), line(1)).expect("link");
        network.upsert_link(id(2), id(3), d(40), line(1)).expect("link");
        network.upsert_link(id(3), id(6), d(40), line(1)).expect("link");
        network.upsert_link(id(1), id(4), d(35), line(7)).expect("link");
        network.upsert_link(id(4), id(5), d(35), line(7)).expect("link");
        network.upsert_link(id(5), id(6), d(35), line(7)).expect("link");

        let query = RouteQuery::new(id(1), id(6), d(15));
        let live = RouteGraph::build(&network)
            .shortest_path(&query)
            .expect("route");

        let reloaded = network_from_bundle(&network_to_bundle(&network)).expect("decode");
        let persisted = RouteGraph::build(&reloaded)
            .shortest_path(&query)
            .expect("route");

        assert_eq!(live, persisted);
    }

    /// T3.2: Removing a station invalidates routes through it after the
    /// model renumbers — the planner sees the world as it is now.
    #[test]
    fn removal_changes_the_routing_world() {
        let mut network = Network::new(4).expect("create");
        network.upsert_link(id(1), id(2), d(10), line(1)).expect("link");
        network.upsert_link(id(2), id(3), d(10), line(1)).expect("link");
        network.upsert_link(id(3), id(4), d(10), line(1)).expect("link");

        network.remove_station(id(2)).expect("remove");
        let graph = RouteGraph::build(&network);

        // Old stations 3 and 4 are now 2 and 3, still linked.
        let itinerary = graph
            .shortest_path(&RouteQuery::without_penalty(id(2), id(3)))
            .expect("route");
        assert_eq!(itinerary.total_cost, d(10));

        // Station 1 lost its only link and is cut off.
        assert!(matches!(
            graph.shortest_path(&RouteQuery::without_penalty(id(1), id(3))),
            Err(RailgraphError::Unreachable { .. })
        ));
    }
}
