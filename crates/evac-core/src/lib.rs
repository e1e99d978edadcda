//! `evac-core` — foundational types for the evacuation routing engine.
//!
//! This crate is a dependency of every other `evac-*` crate.  It has no
//! `evac-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                   |
//! |------------|--------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`                         |
//! | [`geo`]    | `GeoPoint`, haversine distance             |
//! | [`hazard`] | `Hazard` (center + radius, membership test)|
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod hazard;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use hazard::Hazard;
pub use ids::{EdgeId, NodeId};
