//! Copy-on-annotate water-obstacle flags.
//!
//! Annotation is a pure transform: the source [`RoadNetwork`] is shared
//! immutably behind an `Arc` and is never touched.  Obstacle flags live in
//! parallel vectors indexed by the existing `NodeId`/`EdgeId` arena, so an
//! [`AnnotatedNetwork`] is cheap to build and safe to share across threads
//! for concurrent routing over the same topology.
//!
//! # Edge rule precedence
//!
//! 1. An active bridge is **never** an obstacle — bridges are the sanctioned
//!    way to cross water, even between two water-flagged endpoints.
//! 2. Otherwise, either endpoint being a water node makes the edge an
//!    obstacle.
//! 3. Otherwise, the edge's own water tags make it an obstacle.
//!
//! The order is load-bearing: the bridge check must short-circuit before the
//! endpoint check, or a bridge over a river becomes impassable.

use std::sync::Arc;

use log::debug;

use evac_core::{EdgeId, GeoPoint, NodeId};

use crate::network::RoadNetwork;

/// A road network plus derived water-obstacle flags.
///
/// Produced by [`AnnotatedNetwork::annotate`]; treat as read-only once built.
pub struct AnnotatedNetwork {
    network: Arc<RoadNetwork>,
    /// `true` for nodes classified as water features.  Indexed by `NodeId`.
    node_obstacle: Vec<bool>,
    /// `true` for edges that cross water without a bridge.  Indexed by `EdgeId`.
    edge_obstacle: Vec<bool>,
}

impl AnnotatedNetwork {
    /// Derive obstacle flags for every node and edge of `network`.
    ///
    /// The source network is left untouched; callers holding another `Arc`
    /// clone can keep using it (or annotate it again) freely.
    pub fn annotate(network: Arc<RoadNetwork>) -> Self {
        let node_obstacle: Vec<bool> = network
            .node_tags
            .iter()
            .map(|tags| tags.is_water())
            .collect();

        let edge_obstacle: Vec<bool> = (0..network.edge_count())
            .map(|e| {
                let tags = &network.edge_tags[e];
                if tags.bridge_active() {
                    return false;
                }
                let from = network.edge_from[e];
                let to = network.edge_to[e];
                if node_obstacle[from.index()] || node_obstacle[to.index()] {
                    return true;
                }
                tags.has_water_tag()
            })
            .collect();

        debug!(
            "annotated network: {} water nodes, {} water edges (of {} / {})",
            node_obstacle.iter().filter(|&&o| o).count(),
            edge_obstacle.iter().filter(|&&o| o).count(),
            network.node_count(),
            network.edge_count(),
        );

        Self {
            network,
            node_obstacle,
            edge_obstacle,
        }
    }

    // ── Obstacle flags ────────────────────────────────────────────────────

    #[inline]
    pub fn node_is_obstacle(&self, node: NodeId) -> bool {
        self.node_obstacle[node.index()]
    }

    #[inline]
    pub fn edge_is_obstacle(&self, edge: EdgeId) -> bool {
        self.edge_obstacle[edge.index()]
    }

    // ── Read access to the underlying network ─────────────────────────────

    /// The annotated topology.  Immutable for the lifetime of this value.
    #[inline]
    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.network.node_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.network.edge_count()
    }

    #[inline]
    pub fn node_pos(&self, node: NodeId) -> GeoPoint {
        self.network.node_pos[node.index()]
    }

    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.network.out_edges(node)
    }

    /// Nearest usable node to `pos` — see [`RoadNetwork::nearest_node`].
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.network.nearest_node(pos)
    }
}

impl RoadNetwork {
    /// Consume this network and produce its annotated form.
    ///
    /// Convenience for the common single-owner case; use
    /// [`AnnotatedNetwork::annotate`] directly to keep a shared handle on
    /// the raw network.
    pub fn into_annotated(self) -> AnnotatedNetwork {
        AnnotatedNetwork::annotate(Arc::new(self))
    }
}
