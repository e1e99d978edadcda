//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! The routing core never fetches map data itself; this module is the
//! optional adapter between an OSM extract and the consumed-network
//! interface.  Only drivable `highway=*` ways are included (the original
//! deployment routed a drive network).  Footways, buildings, POIs, and
//! relations are ignored.  One-way roads add a single directed edge;
//! two-way roads add both directions.
//!
//! Water, bridge, and road-class tags are carried through to the builder so
//! that [`AnnotatedNetwork::annotate`](crate::AnnotatedNetwork::annotate)
//! can classify obstacles afterwards.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a `HashMap<i64, (GeoPoint, NodeTags)>`
//! for the first pass (ways reference node IDs by OSM integer ID).  The map
//! is freed before the R-tree is built.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};

use evac_core::{GeoPoint, NodeId};

use crate::NetworkError;
use crate::network::{RoadNetwork, RoadNetworkBuilder};
use crate::tags::{EdgeTags, NodeTags};

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a tagged road network from an OSM PBF file.
///
/// Use [`RoadNetworkBuilder`] directly for non-OSM sources.
///
/// # Errors
///
/// Returns [`NetworkError::Osm`] on parse errors, [`NetworkError::Io`] on
/// file errors.
pub fn load_from_pbf(path: &Path) -> Result<RoadNetwork, NetworkError> {
    // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
    let reader = ElementReader::from_path(path)?;

    let mut all_nodes: HashMap<i64, (GeoPoint, NodeTags)> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let tags: Vec<(&str, &str)> = n.tags().collect();
                all_nodes.insert(
                    n.id(),
                    (GeoPoint::new(n.lat(), n.lon()), node_tags(&tags)),
                );
            }
            Element::DenseNode(n) => {
                let tags: Vec<(&str, &str)> = n.tags().collect();
                all_nodes.insert(
                    n.id(),
                    (GeoPoint::new(n.lat(), n.lon()), node_tags(&tags)),
                );
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let highway = tag_value(&tags, "highway");

                if highway.is_some_and(is_drivable) {
                    let refs: Vec<i64> = w.refs().collect();
                    road_ways.push(OsmWay {
                        refs,
                        tags: edge_tags(&tags),
                        oneway: is_oneway(highway.unwrap_or(""), &tags),
                    });
                }
            }
            _ => {}
        })
        .map_err(|e| NetworkError::Osm(e.to_string()))?;

    // ── Phase 2: identify road-referenced node IDs ────────────────────────
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    // ── Phase 3: build network ────────────────────────────────────────────
    // Pre-allocate: ~2× road nodes for edges (rough estimate).
    let mut builder =
        RoadNetworkBuilder::with_capacity(road_node_ids.len(), road_node_ids.len() * 2);

    // Map OSM node IDs → our NodeIds, adding only road-relevant nodes.
    let mut osm_to_evac: HashMap<i64, NodeId> = HashMap::with_capacity(road_node_ids.len());

    for osm_id in &road_node_ids {
        if let Some((pos, tags)) = all_nodes.get(osm_id) {
            let id = builder.add_tagged_node(*pos, tags.clone());
            osm_to_evac.insert(*osm_id, id);
        }
    }

    // Free the full node map — no longer needed.
    drop(all_nodes);
    drop(road_node_ids);

    // Add directed edges from way node sequences.
    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (osm_a, osm_b) = (window[0], window[1]);
            if let (Some(&from), Some(&to)) = (osm_to_evac.get(&osm_a), osm_to_evac.get(&osm_b)) {
                let len_m = builder.node_pos(from).distance_m(builder.node_pos(to));

                builder.add_directed_edge(from, to, len_m, way.tags.clone());
                if !way.oneway {
                    builder.add_directed_edge(to, from, len_m, way.tags.clone());
                }
            }
        }
    }

    Ok(builder.build())
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs: Vec<i64>,
    tags: EdgeTags,
    oneway: bool,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

fn tag_value<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn node_tags(tags: &[(&str, &str)]) -> NodeTags {
    NodeTags {
        natural: tag_value(tags, "natural").map(str::to_owned),
        waterway: tag_value(tags, "waterway").map(str::to_owned),
        landuse: tag_value(tags, "landuse").map(str::to_owned),
        water_related: ["water", "harbour", "dock"]
            .iter()
            .any(|k| tag_value(tags, k).is_some()),
    }
}

fn edge_tags(tags: &[(&str, &str)]) -> EdgeTags {
    EdgeTags {
        highway: tag_value(tags, "highway").map(str::to_owned),
        bridge: tag_value(tags, "bridge").map(str::to_owned),
        waterway: tag_value(tags, "waterway").map(str::to_owned),
        natural: tag_value(tags, "natural").map(str::to_owned),
        water_related: tag_value(tags, "water").is_some(),
    }
}

/// `true` for `highway` values that belong in a drive network.
fn is_drivable(highway: &str) -> bool {
    !matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "corridor" | "bridleway" | "proposed" | "construction"
    )
}

/// Determine whether a way should be treated as one-way for car traffic.
///
/// Motorways and motorway links are implicitly one-way in OSM convention.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = tags
        .iter()
        .any(|(k, v)| *k == "oneway" && matches!(*v, "yes" | "1" | "true"));
    let implicit = matches!(highway, "motorway" | "motorway_link");
    explicit || implicit
}
