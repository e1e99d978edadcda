//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` (double-precision) latitude/longitude.  Hazard
//! membership is an inclusive boundary test, so distances must be metre-exact
//! at the radius; single precision leaves ~0.1 m of rounding slack at city
//! scale, which is enough to flip a point sitting on the boundary.
//!
//! Networks may carry nodes without usable geometry.  Those are represented
//! as [`GeoPoint::MISSING`] and excluded from every distance computation via
//! [`GeoPoint::is_valid`] — they never panic routing code.

/// A WGS-84 geographic coordinate stored as double-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Placeholder for a node with no coordinate data.  Fails `is_valid()`.
    pub const MISSING: GeoPoint = GeoPoint { lat: f64::NAN, lon: f64::NAN };

    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both coordinates are finite numbers.
    ///
    /// Invalid points must be skipped by all distance-based logic rather
    /// than propagated into comparisons (NaN poisons every ordering).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Coincident points return exactly `0.0`.  The `atan2` form stays
    /// numerically stable for antipodal points, where the `asin` form can
    /// take the square root of a value slightly above 1.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
