//! Point-source hazard model.
//!
//! A hazard is a circle on the globe: a center coordinate plus a radius of
//! effect in metres.  It is an immutable value — callers replace it wholesale
//! between routing requests rather than mutating it.

use crate::GeoPoint;

/// A point-source hazard with a circular radius of effect.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hazard {
    /// Center of the hazard.
    pub center: GeoPoint,
    /// Radius of effect in metres.
    pub radius_m: f64,
}

impl Hazard {
    #[inline]
    pub fn new(center: GeoPoint, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Great-circle distance from `point` to the hazard center, in metres.
    #[inline]
    pub fn distance_from_center(&self, point: GeoPoint) -> f64 {
        point.distance_m(self.center)
    }

    /// Membership test: `true` iff `point` lies within the radius of effect.
    ///
    /// The boundary is inclusive — a point at exactly `radius_m` from the
    /// center is inside.  Points without valid coordinates are never inside.
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.is_valid() && self.distance_from_center(point) <= self.radius_m
    }
}
