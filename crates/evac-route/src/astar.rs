//! Constrained best-first evacuation search.
//!
//! A modified A* over the annotated road graph: the goal is *any* exit node,
//! water edges cost their length × a large penalty, and water nodes are
//! never entered at all.  The two mechanisms are deliberately separate —
//! node-level hard exclusion, edge-level soft exclusion — because collapsing
//! them changes observable routing behavior on networks where a water edge
//! connects two dry nodes.
//!
//! # Frontier
//!
//! A single min-heap keyed by `f = g + h`, with a dense best-known-`g` array
//! checked before every push and a stale-entry skip on pop.  Ties in `f`
//! break by insertion order (a monotonic sequence counter).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use log::debug;

use evac_core::{GeoPoint, Hazard, NodeId};
use evac_network::AnnotatedNetwork;

use crate::config::RoutingConfig;
use crate::exits::{ExitNode, find_exit_nodes};

/// How often (in frontier pops) the optional search budget is checked.
const BUDGET_CHECK_INTERVAL: u32 = 256;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The outcome of one evacuation routing request.
///
/// A route has no lifecycle of its own — recompute it whenever the start
/// position, hazard, or network changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Route {
    /// The start position is already outside the hazard; no path is needed.
    AlreadySafe,
    /// An ordered node path, start first and the chosen exit node last.
    Path(Vec<NodeId>),
    /// No exit nodes exist, or the search exhausted the frontier.
    Unreachable,
}

impl Route {
    pub fn is_already_safe(&self) -> bool {
        matches!(self, Route::AlreadySafe)
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Route::Unreachable)
    }

    /// The node path, if one was found.
    pub fn path(&self) -> Option<&[NodeId]> {
        match self {
            Route::Path(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// The node sequence of this route (empty unless a path was found).
    pub fn nodes(&self) -> &[NodeId] {
        self.path().unwrap_or(&[])
    }
}

// ── Frontier entry ────────────────────────────────────────────────────────────

/// Min-heap entry: ordered by `f` ascending, then insertion order.
struct FrontierEntry {
    f: f64,
    g: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest f on top.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// The constrained pathfinder.
///
/// Stateless apart from its configuration; `Send + Sync`, so one router can
/// serve many threads searching over the same immutable network.
#[derive(Clone, Debug, Default)]
pub struct AStarRouter {
    pub config: RoutingConfig,
}

impl AStarRouter {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Route from `start` to the nearest safe point outside `hazard`.
    ///
    /// Early exits, in order: an absent or geometry-less start node is
    /// [`Route::Unreachable`]; a start already outside the hazard (inclusive
    /// boundary) is [`Route::AlreadySafe`]; a hazard with no discoverable
    /// exit nodes is [`Route::Unreachable`].
    pub fn route(&self, network: &AnnotatedNetwork, start: NodeId, hazard: &Hazard) -> Route {
        if start.index() >= network.node_count() {
            return Route::Unreachable;
        }
        let start_pos = network.node_pos(start);
        if !start_pos.is_valid() {
            // Membership cannot be evaluated without geometry; degrade to an
            // absence result rather than guessing.
            return Route::Unreachable;
        }
        if !hazard.contains(start_pos) {
            return Route::AlreadySafe;
        }

        let exits = find_exit_nodes(network, hazard, &self.config);
        if exits.is_empty() {
            debug!("no exit nodes for hazard at {}; unreachable", hazard.center);
            return Route::Unreachable;
        }

        self.search(network, start, hazard, &exits)
    }

    /// Resolve `pos` to its nearest usable node, then route from there.
    pub fn route_from_position(
        &self,
        network: &AnnotatedNetwork,
        pos: GeoPoint,
        hazard: &Hazard,
    ) -> Route {
        match network.nearest_node(pos) {
            Some(start) => self.route(network, start, hazard),
            None => Route::Unreachable,
        }
    }

    /// Route many independent people over the same network in parallel.
    ///
    /// Each search is a pure function of shared read-only inputs, so this is
    /// a straight data-parallel map.
    #[cfg(feature = "parallel")]
    pub fn route_many(
        &self,
        network: &AnnotatedNetwork,
        starts: &[NodeId],
        hazard: &Hazard,
    ) -> Vec<Route> {
        use rayon::prelude::*;
        starts
            .par_iter()
            .map(|&start| self.route(network, start, hazard))
            .collect()
    }

    // ── Search internals ──────────────────────────────────────────────────

    fn search(
        &self,
        network: &AnnotatedNetwork,
        start: NodeId,
        hazard: &Hazard,
        exits: &[ExitNode],
    ) -> Route {
        let n = network.node_count();
        let net = network.network();

        // Exit membership and goal positions for the heuristic.
        let mut is_exit = vec![false; n];
        for exit in exits {
            is_exit[exit.node.index()] = true;
        }
        let exit_pos: Vec<GeoPoint> = exits.iter().map(|e| network.node_pos(e.node)).collect();

        let mut g_score = vec![f64::INFINITY; n];
        let mut came_from = vec![NodeId::INVALID; n];
        // Heuristic memo; NaN = not yet computed (computed values may be ∞).
        let mut h_memo = vec![f64::NAN; n];

        g_score[start.index()] = 0.0;

        let border_bias = self.config.border_bias;
        let mut heap: BinaryHeap<FrontierEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;
        let h0 = heuristic(network, hazard, &exit_pos, border_bias, start, &mut h_memo);
        heap.push(FrontierEntry { f: h0, g: 0.0, seq, node: start });

        let started_at = Instant::now();
        let mut pops: u32 = 0;

        while let Some(entry) = heap.pop() {
            pops += 1;
            if pops % BUDGET_CHECK_INTERVAL == 0 {
                if let Some(budget) = self.config.search_budget {
                    if started_at.elapsed() > budget {
                        debug!("search budget exhausted after {pops} pops; unreachable");
                        return Route::Unreachable;
                    }
                }
            }

            // Skip stale heap entries.
            if entry.g > g_score[entry.node.index()] {
                continue;
            }

            if is_exit[entry.node.index()] {
                let path = reconstruct(&came_from, entry.node);
                debug!(
                    "evacuation path found: {} nodes, {pops} expansions, cost {:.1}",
                    path.len(),
                    entry.g,
                );
                return Route::Path(path);
            }

            let current = entry.node;
            for e in net.out_edges(current) {
                let neighbor = net.edge_to[e.index()];

                // Water nodes are never entered, even at extreme cost.
                if network.node_is_obstacle(neighbor) {
                    continue;
                }

                // Obstacle edges between two dry nodes are technically
                // passable, at a cost that excludes them whenever any
                // alternative exists.
                let penalty = if network.edge_is_obstacle(e) {
                    self.config.water_penalty
                } else {
                    1.0
                };
                let tentative = g_score[current.index()] + net.edge_length_m[e.index()] * penalty;

                if tentative < g_score[neighbor.index()] {
                    g_score[neighbor.index()] = tentative;
                    came_from[neighbor.index()] = current;
                    let h = heuristic(network, hazard, &exit_pos, border_bias, neighbor, &mut h_memo);
                    seq += 1;
                    heap.push(FrontierEntry {
                        f: tentative + h,
                        g: tentative,
                        seq,
                        node: neighbor,
                    });
                }
            }
        }

        debug!("frontier exhausted after {pops} pops; unreachable");
        Route::Unreachable
    }
}

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Estimated remaining cost from `node` to the nearest exit.
///
/// Infinite for obstacle nodes and nodes without geometry (never expand
/// through them).  While the node is still inside the hazard, the estimate
/// is inflated by the border-encouragement factor so the search prefers
/// moving toward the boundary over circling inside the danger zone.
fn heuristic(
    network: &AnnotatedNetwork,
    hazard: &Hazard,
    exit_pos: &[GeoPoint],
    border_bias: f64,
    node: NodeId,
    memo: &mut [f64],
) -> f64 {
    let cached = memo[node.index()];
    if !cached.is_nan() {
        return cached;
    }

    let h = heuristic_uncached(network, hazard, exit_pos, border_bias, node);
    memo[node.index()] = h;
    h
}

fn heuristic_uncached(
    network: &AnnotatedNetwork,
    hazard: &Hazard,
    exit_pos: &[GeoPoint],
    border_bias: f64,
    node: NodeId,
) -> f64 {
    if network.node_is_obstacle(node) {
        return f64::INFINITY;
    }
    let pos = network.node_pos(node);
    if !pos.is_valid() {
        return f64::INFINITY;
    }

    let min_exit_distance = exit_pos
        .iter()
        .map(|&e| pos.distance_m(e))
        .fold(f64::INFINITY, f64::min);

    let d = hazard.distance_from_center(pos);
    // Skip the inflation for degenerate zero-radius hazards, where the
    // border factor would divide zero by zero.
    if hazard.radius_m > 0.0 && d <= hazard.radius_m {
        let border_factor = (hazard.radius_m - d) / hazard.radius_m;
        min_exit_distance * (1.0 + border_bias * border_factor)
    } else {
        min_exit_distance
    }
}

// ── Path reconstruction ───────────────────────────────────────────────────────

/// Follow back-pointers from `goal` to the start, then reverse.
fn reconstruct(came_from: &[NodeId], goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut cur = goal;
    while cur != NodeId::INVALID {
        path.push(cur);
        cur = came_from[cur.index()];
    }
    path.reverse();
    path
}
