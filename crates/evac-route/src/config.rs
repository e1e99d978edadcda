//! Routing tunables.
//!
//! The buffer distance and the water penalty encode domain judgment calls —
//! how far outside the hazard still counts as "just outside", and how
//! strongly to discourage (versus forbid) crossing water.  They are
//! configuration with documented defaults rather than buried literals.

use std::time::Duration;

/// Default width of the exit-candidate band outside the hazard radius.
pub const DEFAULT_BOUNDARY_BUFFER_M: f64 = 100.0;

/// Default cost multiplier for water-crossing edges.
pub const DEFAULT_WATER_PENALTY: f64 = 10_000.0;

/// Default cap on the number of exit nodes returned.
pub const DEFAULT_MAX_EXIT_NODES: usize = 10;

/// Default heuristic inflation factor for nodes still inside the hazard.
pub const DEFAULT_BORDER_BIAS: f64 = 1.5;

/// Tunable parameters of the routing engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingConfig {
    /// Exit candidates must lie within `radius + boundary_buffer_m` of the
    /// hazard center.  Nodes beyond the band are not viable targets.
    pub boundary_buffer_m: f64,

    /// Edge-cost multiplier for obstacle edges.  Large enough that water is
    /// crossed only when literally no other path exists; a hard forbidden
    /// rule would make sparse networks brittle instead.
    pub water_penalty: f64,

    /// Upper bound on the exit-node list.
    pub max_exit_nodes: usize,

    /// Heuristic inflation inside the hazard:
    /// `h = min_exit_distance × (1 + border_bias × (r − d)/r)`.
    /// Biases the search toward the boundary instead of wandering parallel
    /// to it while still in the danger zone.
    pub border_bias: f64,

    /// Optional wall-clock budget for a single search.  Checked between
    /// frontier pops; exceeding it aborts with an unreachable result.
    #[cfg_attr(feature = "serde", serde(default))]
    pub search_budget: Option<Duration>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            boundary_buffer_m: DEFAULT_BOUNDARY_BUFFER_M,
            water_penalty: DEFAULT_WATER_PENALTY,
            max_exit_nodes: DEFAULT_MAX_EXIT_NODES,
            border_bias: DEFAULT_BORDER_BIAS,
            search_budget: None,
        }
    }
}
