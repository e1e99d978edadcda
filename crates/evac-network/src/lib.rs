//! `evac-network` — road network, water-obstacle annotation, and spatial
//! indexing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`tags`]     | `NodeTags`, `EdgeTags`, `RoadClass`, water tag rules     |
//! | [`network`]  | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`       |
//! | [`annotate`] | `AnnotatedNetwork` — copy-on-annotate obstacle flags     |
//! | [`osm`]      | `load_from_pbf` (feature = `"osm"` only)                 |
//! | [`error`]    | `NetworkError`, `NetworkResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.    |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod annotate;
pub mod error;
pub mod network;
pub mod tags;

#[cfg(feature = "osm")]
pub mod osm;


pub use annotate::AnnotatedNetwork;
pub use error::{NetworkError, NetworkResult};
pub use network::{DEFAULT_EDGE_LENGTH_M, RoadNetwork, RoadNetworkBuilder};
pub use tags::{EdgeTags, NodeTags, RoadClass};
