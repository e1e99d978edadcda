//! Unit tests for evac-route.
//!
//! All tests use hand-crafted annotated networks.  Geometry is laid out on
//! the equator/prime meridian so metre offsets convert to degrees with a
//! single constant.

#[cfg(test)]
mod helpers {
    use evac_core::{GeoPoint, Hazard, NodeId};
    use evac_network::tags::{EdgeTags, NodeTags};
    use evac_network::{AnnotatedNetwork, RoadNetworkBuilder};

    /// Metres per degree of latitude (and of longitude at the equator).
    pub const M_PER_DEG: f64 = 111_194.926;

    /// A point `m` metres north of (0, 0).
    pub fn north(m: f64) -> GeoPoint {
        GeoPoint::new(m / M_PER_DEG, 0.0)
    }

    /// A point `n` metres north and `e` metres east of (0, 0).
    pub fn offset(n: f64, e: f64) -> GeoPoint {
        GeoPoint::new(n / M_PER_DEG, e / M_PER_DEG)
    }

    pub fn water_node() -> NodeTags {
        NodeTags { natural: Some("water".into()), ..NodeTags::default() }
    }

    pub fn water_edge() -> EdgeTags {
        EdgeTags { waterway: Some("river".into()), ..EdgeTags::default() }
    }

    /// Hazard centered at the origin with a 1 km radius.
    pub fn hazard_1km() -> Hazard {
        Hazard::new(GeoPoint::new(0.0, 0.0), 1_000.0)
    }

    /// Straight 5-node chain north from the hazard center at 0 m, 400 m,
    /// 900 m, 1090 m, and 1600 m.  With a 1 km radius and the default 100 m
    /// buffer, the 1090 m node is the only outside-but-near node; 1600 m is
    /// beyond the band.
    ///
    /// `wet_boundary_edge` tags the 900 m ↔ 1090 m segment as a waterway
    /// (and not a bridge), making it an obstacle edge.
    pub fn chain(wet_boundary_edge: bool) -> (AnnotatedNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(north(0.0));
        let n1 = b.add_node(north(400.0));
        let n2 = b.add_node(north(900.0));
        let n3 = b.add_node(north(1_090.0));
        let n4 = b.add_node(north(1_600.0));

        b.add_road(n0, n1, 400.0, EdgeTags::default());
        b.add_road(n1, n2, 500.0, EdgeTags::default());
        let boundary_tags = if wet_boundary_edge { water_edge() } else { EdgeTags::default() };
        b.add_road(n2, n3, 190.0, boundary_tags);
        b.add_road(n3, n4, 510.0, EdgeTags::default());

        (b.build().into_annotated(), [n0, n1, n2, n3, n4])
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::RoutingConfig;

    #[test]
    fn documented_defaults() {
        let cfg = RoutingConfig::default();
        assert_eq!(cfg.boundary_buffer_m, 100.0);
        assert_eq!(cfg.water_penalty, 10_000.0);
        assert_eq!(cfg.max_exit_nodes, 10);
        assert_eq!(cfg.border_bias, 1.5);
        assert!(cfg.search_budget.is_none());
    }
}

// ── Exit-node discovery ───────────────────────────────────────────────────────

#[cfg(test)]
mod exits {
    use evac_core::{GeoPoint, Hazard};
    use evac_network::tags::EdgeTags;
    use evac_network::RoadNetworkBuilder;

    use super::helpers::{chain, hazard_1km, offset, water_node};
    use crate::{RoutingConfig, find_exit_nodes};

    #[test]
    fn finds_the_boundary_node() {
        let (net, [_, _, _, n3, _]) = chain(false);
        let exits = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].node, n3);
        // ~90 m past the boundary with a 100 m buffer, no major road.
        assert!(exits[0].score > 0.0 && exits[0].score < 0.2, "score {}", exits[0].score);
    }

    #[test]
    fn nodes_beyond_buffer_are_ignored() {
        let (net, [_, _, _, _, n4]) = chain(false);
        let exits = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        assert!(exits.iter().all(|e| e.node != n4));
    }

    #[test]
    fn obstacle_edge_blocks_candidate() {
        let (net, _) = chain(true);
        let exits = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        assert!(exits.is_empty());
    }

    #[test]
    fn water_node_is_never_an_exit() {
        // Inside node at 900 m connected to a water node just outside.
        let mut b = RoadNetworkBuilder::new();
        let inside = b.add_node(super::helpers::north(900.0));
        let wet = b.add_tagged_node(super::helpers::north(1_050.0), water_node());
        b.add_road(inside, wet, 150.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let exits = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        assert!(exits.is_empty());
    }

    #[test]
    fn closer_to_boundary_scores_higher() {
        let mut b = RoadNetworkBuilder::new();
        let hub = b.add_node(super::helpers::north(950.0));
        let near = b.add_node(offset(1_010.0, 50.0));
        let far = b.add_node(offset(1_080.0, -50.0));
        b.add_road(hub, near, 80.0, EdgeTags::default());
        b.add_road(hub, far, 140.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let exits = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        assert_eq!(exits.len(), 2);
        assert_eq!(exits[0].node, near);
        assert!(exits[0].score > exits[1].score);
    }

    #[test]
    fn major_road_bonus_outranks_proximity_alone() {
        // `far` sits deeper in the buffer (proximity ~0.5 vs ~0.9) but on a
        // primary road; the 0.5 bonus flips the ranking.
        let mut b = RoadNetworkBuilder::new();
        let hub = b.add_node(super::helpers::north(950.0));
        let near = b.add_node(offset(1_010.0, 50.0));
        let far = b.add_node(offset(1_050.0, -50.0));
        b.add_road(hub, near, 80.0, EdgeTags::default());
        let primary = EdgeTags { highway: Some("primary".into()), ..EdgeTags::default() };
        b.add_road(hub, far, 110.0, primary);
        let net = b.build().into_annotated();

        let exits = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        assert_eq!(exits[0].node, far, "major-road exit should rank first");
    }

    #[test]
    fn never_more_than_max_exit_nodes() {
        // A hub just inside the boundary with 15 spokes into the buffer band.
        let mut b = RoadNetworkBuilder::new();
        let hub = b.add_node(super::helpers::north(990.0));
        for i in 0..15 {
            let east = (i as f64 - 7.0) * 30.0;
            let spoke = b.add_node(offset(1_050.0, east));
            b.add_road(hub, spoke, 80.0, EdgeTags::default());
        }
        let net = b.build().into_annotated();

        let exits = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        assert_eq!(exits.len(), 10);

        let cfg = RoutingConfig { max_exit_nodes: 3, ..RoutingConfig::default() };
        assert_eq!(find_exit_nodes(&net, &hazard_1km(), &cfg).len(), 3);
    }

    #[test]
    fn outer_band_edge_is_inclusive() {
        // Buffer pinned to the exact measured distance beyond the radius: a
        // node sitting precisely on the outer band edge still qualifies, and
        // its proximity term is exactly zero.
        let mut b = RoadNetworkBuilder::new();
        let inside = b.add_node(super::helpers::north(950.0));
        let rim = b.add_node(super::helpers::north(1_090.0));
        b.add_road(inside, rim, 140.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let hazard = hazard_1km();
        let d = net.node_pos(rim).distance_m(hazard.center);
        let cfg = RoutingConfig {
            boundary_buffer_m: d - hazard.radius_m,
            ..RoutingConfig::default()
        };

        let exits = find_exit_nodes(&net, &hazard, &cfg);
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].node, rim);
        assert_eq!(exits[0].score, 0.0);
    }

    #[test]
    fn hazard_covering_whole_network_finds_nothing() {
        let (net, _) = chain(false);
        let hazard = Hazard::new(GeoPoint::new(0.0, 0.0), 50_000.0);
        let exits = find_exit_nodes(&net, &hazard, &RoutingConfig::default());
        assert!(exits.is_empty());
    }

    #[test]
    fn recomputed_per_hazard() {
        // Exit sets are derived data: a different hazard yields a different set.
        let (net, [_, _, n2, n3, _]) = chain(false);
        let exits_1km = find_exit_nodes(&net, &hazard_1km(), &RoutingConfig::default());
        let smaller = Hazard::new(GeoPoint::new(0.0, 0.0), 850.0);
        let exits_850 = find_exit_nodes(&net, &smaller, &RoutingConfig::default());
        assert_eq!(exits_1km[0].node, n3);
        assert_eq!(exits_850[0].node, n2); // 900 m is just outside an 850 m radius
    }
}

// ── Constrained A* ────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use evac_core::{Hazard, NodeId};
    use evac_network::tags::EdgeTags;
    use evac_network::RoadNetworkBuilder;

    use super::helpers::{chain, hazard_1km, north, offset, water_edge, water_node};
    use crate::{AStarRouter, Route, RoutingConfig};

    #[test]
    fn already_safe_outside_radius() {
        let (net, [_, _, _, _, n4]) = chain(false);
        let route = AStarRouter::default().route(&net, n4, &hazard_1km());
        assert_eq!(route, Route::AlreadySafe);
    }

    #[test]
    fn chain_routes_to_first_node_past_boundary() {
        let (net, [_, n1, n2, n3, _]) = chain(false);
        let route = AStarRouter::default().route(&net, n1, &hazard_1km());
        assert_eq!(route, Route::Path(vec![n1, n2, n3]));
    }

    #[test]
    fn start_exactly_on_boundary_triggers_search() {
        // Radius set to the exact measured distance of the start node: the
        // inclusive membership test puts it inside, so a search runs.
        let mut b = RoadNetworkBuilder::new();
        let start = b.add_node(north(1_000.0));
        let out = b.add_node(north(1_090.0));
        b.add_road(start, out, 90.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let d = net.node_pos(start).distance_m(evac_core::GeoPoint::new(0.0, 0.0));
        let hazard = Hazard::new(evac_core::GeoPoint::new(0.0, 0.0), d);

        let route = AStarRouter::default().route(&net, start, &hazard);
        assert_eq!(route, Route::Path(vec![start, out]));
    }

    #[test]
    fn obstacle_edge_with_no_alternative_is_unreachable() {
        let (net, [_, n1, _, _, _]) = chain(true);
        let route = AStarRouter::default().route(&net, n1, &hazard_1km());
        assert_eq!(route, Route::Unreachable);
    }

    #[test]
    fn invalid_start_is_unreachable() {
        let (net, _) = chain(false);
        let route = AStarRouter::default().route(&net, NodeId::INVALID, &hazard_1km());
        assert_eq!(route, Route::Unreachable);
    }

    #[test]
    fn geometryless_start_is_unreachable() {
        let mut b = RoadNetworkBuilder::new();
        let ghost = b.add_node(evac_core::GeoPoint::MISSING);
        let other = b.add_node(north(400.0));
        b.add_road(ghost, other, 100.0, EdgeTags::default());
        let net = b.build().into_annotated();
        let route = AStarRouter::default().route(&net, ghost, &hazard_1km());
        assert_eq!(route, Route::Unreachable);
    }

    #[test]
    fn no_exit_nodes_is_unreachable() {
        let (net, [_, n1, _, _, _]) = chain(false);
        let hazard = Hazard::new(evac_core::GeoPoint::new(0.0, 0.0), 50_000.0);
        let route = AStarRouter::default().route(&net, n1, &hazard);
        assert_eq!(route, Route::Unreachable);
    }

    #[test]
    fn path_never_enters_a_water_node() {
        // Two branches from the start: a short one through a water node and
        // a longer dry one.  The dry branch must win, and the route must not
        // contain any obstacle node.
        let mut b = RoadNetworkBuilder::new();
        let start = b.add_node(north(400.0));
        let wet = b.add_tagged_node(offset(700.0, -30.0), water_node());
        let wet_exit = b.add_node(offset(1_050.0, -30.0));
        let dry_mid = b.add_node(offset(700.0, 60.0));
        let dry_exit = b.add_node(offset(1_050.0, 60.0));

        b.add_road(start, wet, 300.0, EdgeTags::default());
        b.add_road(wet, wet_exit, 350.0, EdgeTags::default());
        b.add_road(start, dry_mid, 310.0, EdgeTags::default());
        b.add_road(dry_mid, dry_exit, 350.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let route = AStarRouter::default().route(&net, start, &hazard_1km());
        let path = route.path().expect("dry branch should be reachable");
        assert_eq!(path, &[start, dry_mid, dry_exit]);
        assert!(path.iter().all(|&n| !net.node_is_obstacle(n)));
    }

    #[test]
    fn water_edge_avoided_when_alternative_exists() {
        // A direct waterway-tagged edge to the boundary versus a longer dry
        // detour: the 10,000× penalty must push the search onto the detour.
        let mut b = RoadNetworkBuilder::new();
        let start = b.add_node(north(400.0));
        let mid = b.add_node(offset(900.0, 40.0));
        let exit = b.add_node(north(1_050.0));

        b.add_road(start, exit, 650.0, water_edge());
        b.add_road(start, mid, 510.0, EdgeTags::default());
        b.add_road(mid, exit, 160.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let route = AStarRouter::default().route(&net, start, &hazard_1km());
        assert_eq!(route, Route::Path(vec![start, mid, exit]));
    }

    #[test]
    fn water_edge_crossed_as_last_resort() {
        // The only way out crosses a waterway edge between two dry nodes.
        // Node-level exclusion does not apply, and the soft penalty still
        // leaves the path technically traversable.
        let mut b = RoadNetworkBuilder::new();
        let start = b.add_node(north(400.0));
        let mid = b.add_node(north(900.0));
        let exit = b.add_node(north(1_050.0));

        b.add_road(start, mid, 500.0, water_edge());
        b.add_road(mid, exit, 150.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let route = AStarRouter::default().route(&net, start, &hazard_1km());
        assert_eq!(route, Route::Path(vec![start, mid, exit]));
    }

    #[test]
    fn zero_radius_hazard_keeps_cost_ordering() {
        // A zero-radius hazard still contains its exact center, and nodes at
        // the center must keep a finite heuristic so the frontier stays
        // ordered by cost.  Two nodes share the center coordinate: the cheap
        // way out hops through the second one, the direct edge costs 50×.
        let mut b = RoadNetworkBuilder::new();
        let start = b.add_node(north(0.0));
        let relay = b.add_node(north(0.0));
        let exit = b.add_node(north(50.0));
        b.add_road(start, relay, 10.0, EdgeTags::default());
        b.add_road(relay, exit, 10.0, EdgeTags::default());
        b.add_road(start, exit, 1_000.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let hazard = Hazard::new(evac_core::GeoPoint::new(0.0, 0.0), 0.0);
        let route = AStarRouter::default().route(&net, start, &hazard);
        assert_eq!(route, Route::Path(vec![start, relay, exit]));
    }

    #[test]
    fn route_from_position_resolves_nearest_node() {
        let (net, [_, n1, n2, n3, _]) = chain(false);
        // A coordinate near the 400 m node resolves there and routes out.
        let route =
            AStarRouter::default().route_from_position(&net, offset(410.0, 5.0), &hazard_1km());
        assert_eq!(route, Route::Path(vec![n1, n2, n3]));
    }

    #[test]
    fn route_from_position_on_empty_network() {
        let net = RoadNetworkBuilder::new().build().into_annotated();
        let route = AStarRouter::default().route_from_position(
            &net,
            evac_core::GeoPoint::new(0.0, 0.0),
            &hazard_1km(),
        );
        assert_eq!(route, Route::Unreachable);
    }

    #[test]
    fn search_budget_aborts_long_searches() {
        // 301-node chain, 10 m spacing.  Finding the exit takes well over
        // 256 pops, so a zero budget trips the periodic check.
        let mut b = RoadNetworkBuilder::new();
        let nodes: Vec<_> = (0..=300).map(|i| b.add_node(north(i as f64 * 10.0))).collect();
        for pair in nodes.windows(2) {
            b.add_road(pair[0], pair[1], 10.0, EdgeTags::default());
        }
        let net = b.build().into_annotated();
        let hazard = Hazard::new(evac_core::GeoPoint::new(0.0, 0.0), 2_900.0);

        let unlimited = AStarRouter::default().route(&net, nodes[0], &hazard);
        assert!(unlimited.path().is_some());

        let strict = AStarRouter::new(RoutingConfig {
            search_budget: Some(std::time::Duration::ZERO),
            ..RoutingConfig::default()
        });
        assert_eq!(strict.route(&net, nodes[0], &hazard), Route::Unreachable);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn route_many_matches_sequential() {
        let (net, [n0, n1, n2, _, n4]) = chain(false);
        let router = AStarRouter::default();
        let starts = [n0, n1, n2, n4];
        let bulk = router.route_many(&net, &starts, &hazard_1km());
        let sequential: Vec<_> = starts
            .iter()
            .map(|&s| router.route(&net, s, &hazard_1km()))
            .collect();
        assert_eq!(bulk, sequential);
    }
}

// ── Materialization ───────────────────────────────────────────────────────────

#[cfg(test)]
mod materialize {
    use evac_network::tags::EdgeTags;
    use evac_network::RoadNetworkBuilder;

    use super::helpers::{chain, hazard_1km, north};
    use crate::{AStarRouter, materialize, path_length_m};

    #[test]
    fn coordinates_in_path_order() {
        let (net, [_, n1, n2, n3, _]) = chain(false);
        let coords = materialize(&net, &[n1, n2, n3]);
        assert_eq!(coords.len(), 3);
        assert!(coords[0].lat < coords[1].lat && coords[1].lat < coords[2].lat);
    }

    #[test]
    fn nodes_without_geometry_are_omitted() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(north(0.0));
        let ghost = b.add_node(evac_core::GeoPoint::MISSING);
        let c = b.add_node(north(200.0));
        b.add_road(a, ghost, 100.0, EdgeTags::default());
        b.add_road(ghost, c, 100.0, EdgeTags::default());
        let net = b.build().into_annotated();

        let coords = materialize(&net, &[a, ghost, c]);
        assert_eq!(coords.len(), 2);
        assert_eq!(coords[0], net.node_pos(a));
        assert_eq!(coords[1], net.node_pos(c));
    }

    #[test]
    fn empty_path_materializes_empty() {
        let (net, _) = chain(false);
        assert!(materialize(&net, &[]).is_empty());
    }

    #[test]
    fn path_length_matches_geometry() {
        let (net, [_, n1, n2, n3, _]) = chain(false);
        // 400 m → 900 m → 1090 m: 500 + 190 = 690 m of great-circle hops.
        let len = path_length_m(&net, &[n1, n2, n3]);
        assert!((len - 690.0).abs() < 1.0, "got {len}");
    }

    #[test]
    fn round_trip_through_position_resolution() {
        // Materializing a route and resolving each coordinate back must
        // reproduce the original node sequence on well-separated nodes.
        let (net, [_, n1, _, _, _]) = chain(false);
        let route = AStarRouter::default().route(&net, n1, &hazard_1km());
        let path = route.path().unwrap();

        let resolved: Vec<_> = materialize(&net, path)
            .into_iter()
            .map(|p| net.nearest_node(p).unwrap())
            .collect();
        assert_eq!(resolved, path);
    }
}
