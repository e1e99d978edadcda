//! riverside — end-to-end demo of the evacuation routing engine.
//!
//! Builds a synthetic riverside town, places a point-source hazard over its
//! center, and routes a handful of people: one at the hazard center, one
//! near the bridge, one already outside the radius, and one on an island
//! block with no road connection.
//!
//! Run with `RUST_LOG=debug` to see annotation and search diagnostics.

mod network;

use evac_core::{GeoPoint, Hazard};
use evac_network::AnnotatedNetwork;
use evac_route::{AStarRouter, find_exit_nodes, materialize, path_length_m};

use network::build_town;

const HAZARD_RADIUS_M: f64 = 600.0;

fn main() {
    env_logger::init();

    let town = build_town();
    println!(
        "riverside town: {} nodes, {} edges",
        town.network.node_count(),
        town.network.edge_count()
    );

    let annotated = AnnotatedNetwork::annotate(std::sync::Arc::new(town.network));
    let hazard = Hazard::new(GeoPoint::new(0.0, 0.0), HAZARD_RADIUS_M);
    let router = AStarRouter::default();

    let exits = find_exit_nodes(&annotated, &hazard, &router.config);
    println!("exit nodes ({}):", exits.len());
    for exit in &exits {
        println!("  {} at {}  score {:.2}", exit.node, annotated.node_pos(exit.node), exit.score);
    }
    println!();

    let people = [
        ("at the crossroads", annotated.node_pos(town.center)),
        ("near the bridge", GeoPoint::new(0.0, 0.002)),
        ("already outside", GeoPoint::new(0.007, 0.0)),
        ("on the island", annotated.node_pos(town.island)),
    ];

    for (label, pos) in people {
        let route = router.route_from_position(&annotated, pos, &hazard);
        match route.path() {
            Some(path) => {
                let km = path_length_m(&annotated, path) / 1_000.0;
                let coords = materialize(&annotated, path);
                println!("{label}: evacuate via {} nodes ({km:.2} km)", path.len());
                for p in coords {
                    println!("    {p}");
                }
            }
            None if route.is_already_safe() => {
                println!("{label}: already safe, no route needed");
            }
            None => {
                println!("{label}: no evacuation route exists");
            }
        }
    }
}
