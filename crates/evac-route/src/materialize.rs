//! Convert a node path into coordinates for downstream consumers
//! (rendering a polyline, estimating walked distance).

use evac_core::{GeoPoint, NodeId};
use evac_network::AnnotatedNetwork;

/// Ordered `(lat, lon)` points for `path`, one per node with valid
/// coordinates.
///
/// Nodes lacking geometry are silently omitted — a partially tagged network
/// must not abort the whole conversion.
pub fn materialize(network: &AnnotatedNetwork, path: &[NodeId]) -> Vec<GeoPoint> {
    path.iter()
        .map(|&node| network.node_pos(node))
        .filter(|pos| pos.is_valid())
        .collect()
}

/// Total great-circle length of `path` in metres, summed over consecutive
/// materialized points.
///
/// An under-estimate when the path contains nodes without geometry (their
/// segments collapse into one straight hop); zero for paths with fewer than
/// two usable points.
pub fn path_length_m(network: &AnnotatedNetwork, path: &[NodeId]) -> f64 {
    let points = materialize(network, path);
    points
        .windows(2)
        .map(|pair| pair[0].distance_m(pair[1]))
        .sum()
}
