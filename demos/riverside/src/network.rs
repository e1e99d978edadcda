//! Synthetic riverside town used by the demo.
//!
//! Layout (metres from the hazard center, north/east):
//!
//! ```text
//!        NN (650,0)                      exit band
//!         |
//!         N (550,0)    river @ e=300
//!         |            ~ RN (150,300)
//!         C (0,0) ---- E (0,250) ====bridge==== E2 (0,680)
//!         |            ~ RS (-150,300)
//!         S (-550,0)
//!         |
//!        SS (-680,0)   primary road           exit band
//!
//!   I (100,-450): island block, no road connection at all
//! ```
//!
//! Hazard: center (0,0), radius 600 m.  With the default 100 m buffer the
//! exit band is 600–700 m, so NN, SS, and E2 are the candidate exits.

use evac_core::{GeoPoint, NodeId};
use evac_network::tags::{EdgeTags, NodeTags};
use evac_network::{RoadNetwork, RoadNetworkBuilder};

/// Metres per degree of latitude (and longitude, this close to the equator).
const M_PER_DEG: f64 = 111_194.926;

fn at(north_m: f64, east_m: f64) -> GeoPoint {
    GeoPoint::new(north_m / M_PER_DEG, east_m / M_PER_DEG)
}

fn water() -> NodeTags {
    NodeTags { natural: Some("water".into()), ..NodeTags::default() }
}

fn street() -> EdgeTags {
    EdgeTags { highway: Some("residential".into()), ..EdgeTags::default() }
}

pub struct Town {
    pub network: RoadNetwork,
    /// Hazard-center crossroads.
    pub center: NodeId,
    /// Island node with no road connection.
    pub island: NodeId,
}

pub fn build_town() -> Town {
    let mut b = RoadNetworkBuilder::new();

    let center = b.add_node(at(0.0, 0.0));
    let n = b.add_node(at(550.0, 0.0));
    let nn = b.add_node(at(650.0, 0.0));
    let s = b.add_node(at(-550.0, 0.0));
    let ss = b.add_node(at(-680.0, 0.0));
    let e = b.add_node(at(0.0, 250.0));
    let e2 = b.add_node(at(0.0, 680.0));

    // The river itself: water nodes flanking the bridge crossing.
    let _rn = b.add_tagged_node(at(150.0, 300.0), water());
    let _rs = b.add_tagged_node(at(-150.0, 300.0), water());

    // Island block cut off from the road network entirely.
    let island = b.add_node(at(100.0, -450.0));

    b.add_road(center, n, 550.0, street());
    b.add_road(n, nn, 100.0, street());
    b.add_road(center, s, 550.0, street());
    b.add_road(
        s,
        ss,
        130.0,
        EdgeTags { highway: Some("primary".into()), ..EdgeTags::default() },
    );
    b.add_road(center, e, 250.0, street());
    b.add_road(
        e,
        e2,
        430.0,
        EdgeTags {
            highway: Some("secondary".into()),
            bridge: Some("yes".into()),
            ..EdgeTags::default()
        },
    );

    Town { network: b.build(), center, island }
}
