//! OSM-style feature tags and the water classification rules built on them.
//!
//! The network provider hands us raw key/value tags.  Everything the engine
//! needs from them is captured here: which values mean "water", which
//! `bridge` values actually mean a bridge, and which `highway` classes count
//! as major roads for exit scoring.
//!
//! Absence of tag data never classifies as water — the rules fail open, so a
//! sparsely tagged network stays routable.

/// `natural=*` values that indicate a water feature.
const WATER_NATURAL: &[&str] = &["water", "coastline", "wetland", "bay", "beach", "marsh"];

/// `waterway=*` values that indicate a water feature.
const WATER_WATERWAY: &[&str] = &["river", "canal", "stream", "ditch", "dock", "riverbank"];

/// `landuse=*` values that indicate water-related land use.
const WATER_LANDUSE: &[&str] = &["reservoir", "basin", "water"];

/// `bridge=*` values that mean "not actually a bridge".
const BRIDGE_FALSE: &[&str] = &["no", "false", "0"];

// ── Node tags ─────────────────────────────────────────────────────────────────

/// Feature tags attached to a road-network node.
///
/// Only the keys the water rules inspect are kept; everything else from the
/// provider is dropped at load time.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeTags {
    pub natural: Option<String>,
    pub waterway: Option<String>,
    pub landuse: Option<String>,
    /// A `water`, `harbour`, or `dock` key was present (any value).
    pub water_related: bool,
}

impl NodeTags {
    /// `true` if any tag marks this node as a water feature.
    pub fn is_water(&self) -> bool {
        matches_any(self.natural.as_deref(), WATER_NATURAL)
            || matches_any(self.waterway.as_deref(), WATER_WATERWAY)
            || matches_any(self.landuse.as_deref(), WATER_LANDUSE)
            || self.water_related
    }
}

// ── Edge tags ─────────────────────────────────────────────────────────────────

/// Feature tags attached to a road segment.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeTags {
    /// Raw `highway=*` value; parsed into [`RoadClass`] at build time.
    pub highway: Option<String>,
    /// Raw `bridge=*` value.
    pub bridge: Option<String>,
    pub waterway: Option<String>,
    pub natural: Option<String>,
    /// A `water` key was present (any value).
    pub water_related: bool,
}

impl EdgeTags {
    /// `true` if the segment itself carries any water-related tag.
    ///
    /// Presence of the key is enough here (unlike node classification):
    /// a road segment tagged `waterway=*` or `natural=*` at all is suspect.
    pub fn has_water_tag(&self) -> bool {
        self.waterway.is_some() || self.natural.is_some() || self.water_related
    }

    /// `true` if the segment is a real bridge — `bridge` is present and its
    /// value is not one of the false sentinels (`no`, `false`, `0`).
    pub fn bridge_active(&self) -> bool {
        match self.bridge.as_deref() {
            Some(v) => !BRIDGE_FALSE.contains(&v),
            None => false,
        }
    }
}

fn matches_any(value: Option<&str>, set: &[&str]) -> bool {
    value.is_some_and(|v| set.contains(&v))
}

// ── Road class ────────────────────────────────────────────────────────────────

/// Coarse road classification parsed from `highway=*`.
///
/// Used only for exit-node scoring: exits on higher-capacity roads get a
/// bonus because they can absorb evacuation traffic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    /// Residential, service, unclassified, or no `highway` tag at all.
    #[default]
    Minor,
}

impl RoadClass {
    /// Parse a `highway=*` value.  Link roads inherit their parent class.
    pub fn parse(highway: Option<&str>) -> Self {
        match highway {
            Some("motorway" | "motorway_link") => Self::Motorway,
            Some("trunk" | "trunk_link") => Self::Trunk,
            Some("primary" | "primary_link") => Self::Primary,
            Some("secondary" | "secondary_link") => Self::Secondary,
            Some("tertiary" | "tertiary_link") => Self::Tertiary,
            _ => Self::Minor,
        }
    }

    /// `true` for the classes that earn the exit-scoring road bonus.
    #[inline]
    pub fn is_major(self) -> bool {
        !matches!(self, Self::Minor)
    }
}
