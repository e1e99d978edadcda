//! Disaster-boundary exit-node discovery.
//!
//! A good evacuation target satisfies three properties at once: it is
//! reachable from inside the hazard without crossing water, it sits just
//! outside the hazard boundary, and it preferably lies on a higher-capacity
//! road.  Discovery classifies nodes by distance from the hazard center,
//! collects boundary crossings over non-obstacle edges, and scores the
//! distinct candidates.
//!
//! Exit nodes are derived data: recompute them whenever the hazard changes;
//! never persist them across hazard configurations.

use log::debug;
use rustc_hash::FxHashSet;

use evac_core::{Hazard, NodeId};
use evac_network::AnnotatedNetwork;

use crate::config::RoutingConfig;

/// Bonus for candidates with at least one incident major-class edge.
const ROAD_SCORE_BONUS: f64 = 0.5;

/// A candidate evacuation target: a boundary node with a suitability score.
///
/// Higher scores are better (closer to the boundary, on bigger roads).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitNode {
    pub node: NodeId,
    pub score: f64,
}

/// Node classification relative to the hazard.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Zone {
    /// Within the radius of effect.
    Inside,
    /// Outside the radius but within the boundary buffer.
    Near,
    /// Beyond the buffer, an obstacle, or without usable coordinates.
    Ignored,
}

/// Find up to `config.max_exit_nodes` exit nodes for `hazard`, best first.
///
/// Returns an empty vector when the hazard has no discoverable safe boundary
/// (for example, it covers the entire loaded network) — a legitimate outcome,
/// not an error.
pub fn find_exit_nodes(
    network: &AnnotatedNetwork,
    hazard: &Hazard,
    config: &RoutingConfig,
) -> Vec<ExitNode> {
    let n = network.node_count();
    let radius = hazard.radius_m;
    let buffer = config.boundary_buffer_m;

    // Pass 1: classify every usable non-obstacle node by distance.
    let mut zone = vec![Zone::Ignored; n];
    let mut dist = vec![f64::NAN; n];
    for i in 0..n {
        let node = NodeId(i as u32);
        if network.node_is_obstacle(node) {
            continue;
        }
        let pos = network.node_pos(node);
        if !pos.is_valid() {
            continue;
        }
        let d = hazard.distance_from_center(pos);
        dist[i] = d;
        if d <= radius {
            zone[i] = Zone::Inside;
        } else if d <= radius + buffer {
            zone[i] = Zone::Near;
        }
    }

    // Pass 2: boundary crossings — a near node adjacent to an inside node
    // over a non-obstacle edge is an exit candidate.  Duplicates collapse.
    let mut candidates: FxHashSet<NodeId> = FxHashSet::default();
    for i in 0..n {
        if zone[i] != Zone::Inside {
            continue;
        }
        for e in network.out_edges(NodeId(i as u32)) {
            if network.edge_is_obstacle(e) {
                continue;
            }
            let neighbor = network.network().edge_to[e.index()];
            if zone[neighbor.index()] == Zone::Near {
                candidates.insert(neighbor);
            }
        }
    }

    // Sort candidates by id before scoring so the output is deterministic
    // regardless of hash iteration order.
    let mut candidates: Vec<NodeId> = candidates.into_iter().collect();
    candidates.sort_unstable();

    // Pass 3: score.  Proximity rewards closeness to the boundary; the road
    // bonus rewards any incident major-class edge.
    let mut scored: Vec<ExitNode> = candidates
        .iter()
        .map(|&node| {
            let border_distance = dist[node.index()] - radius;
            let proximity = 1.0 - border_distance / buffer;

            let on_major_road = network
                .out_edges(node)
                .any(|e| network.network().edge_class[e.index()].is_major());
            let road = if on_major_road { ROAD_SCORE_BONUS } else { 0.0 };

            ExitNode { node, score: proximity + road }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.node.cmp(&b.node))
    });
    scored.truncate(config.max_exit_nodes);

    // Keep at least one target if raw candidates existed but scoring
    // produced nothing (guards future candidate filters).
    if scored.is_empty() {
        if let Some(&node) = candidates.first() {
            scored.push(ExitNode { node, score: 0.0 });
        }
    }

    debug!(
        "exit discovery: {} candidates -> {} exits (radius {:.0} m, buffer {:.0} m)",
        candidates.len(),
        scored.len(),
        radius,
        buffer,
    );

    scored
}
