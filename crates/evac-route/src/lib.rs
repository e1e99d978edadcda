//! `evac-route` — the routing core: exit-node discovery, constrained A*,
//! and path materialization.
//!
//! The engine is stateless: every operation is a pure function of an
//! immutable [`AnnotatedNetwork`](evac_network::AnnotatedNetwork), a
//! [`Hazard`](evac_core::Hazard), and a [`RoutingConfig`].  Concurrent
//! callers may route many people over the same annotated network in
//! parallel (see the `parallel` feature).
//!
//! # Crate layout
//!
//! | Module          | Contents                                         |
//! |-----------------|--------------------------------------------------|
//! | [`config`]      | `RoutingConfig` — tunables with defaults         |
//! | [`exits`]       | `ExitNode`, `find_exit_nodes`                    |
//! | [`astar`]       | `Route`, `AStarRouter` (constrained best-first)  |
//! | [`materialize`] | route → coordinate sequence, path length         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `parallel` | `AStarRouter::route_many` via Rayon.                  |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.    |

pub mod astar;
pub mod config;
pub mod exits;
pub mod materialize;

#[cfg(test)]
mod tests;

pub use astar::{AStarRouter, Route};
pub use config::RoutingConfig;
pub use exits::{ExitNode, find_exit_nodes};
pub use materialize::{materialize, path_length_m};
