//! Network-subsystem error type.
//!
//! The routing core itself never errors on malformed-but-partial data — it
//! skips, defaults, or excludes.  Errors here come from loading a network
//! from an external source.

use thiserror::Error;

/// Errors produced by `evac-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
