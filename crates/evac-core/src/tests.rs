//! Unit tests for evac-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn coincident_distance_is_exactly_zero() {
        let p = GeoPoint::new(28.6139, 77.2090);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.195 km
        let a = GeoPoint::new(28.0, 77.0);
        let b = GeoPoint::new(29.0, 77.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = a.distance_m(b);
        let half = std::f64::consts::PI * 6_371_000.0;
        assert!(d.is_finite(), "antipodal distance must not be NaN");
        assert!((d - half).abs() < 1.0, "got {d}, expected {half}");
    }

    #[test]
    fn symmetry() {
        let a = GeoPoint::new(19.0760, 72.8777);
        let b = GeoPoint::new(28.6139, 77.2090);
        assert!((a.distance_m(b) - b.distance_m(a)).abs() < 1e-9);
    }

    #[test]
    fn missing_is_invalid() {
        assert!(!GeoPoint::MISSING.is_valid());
        assert!(GeoPoint::new(0.0, 0.0).is_valid());
        assert!(!GeoPoint::new(f64::INFINITY, 0.0).is_valid());
    }
}

#[cfg(test)]
mod hazard {
    use crate::{GeoPoint, Hazard};

    #[test]
    fn center_is_always_inside() {
        let c = GeoPoint::new(35.6762, 139.6503);
        assert!(Hazard::new(c, 1_000.0).contains(c));
        // Even a zero radius contains its own center (distance 0 <= 0).
        assert!(Hazard::new(c, 0.0).contains(c));
    }

    #[test]
    fn boundary_is_inclusive() {
        let center = GeoPoint::new(0.0, 0.0);
        let point = GeoPoint::new(0.009, 0.0); // ~1 km north
        // Set the radius to the exact measured distance: the point sits on
        // the boundary and must count as inside.
        let d = center.distance_m(point);
        let hazard = Hazard::new(center, d);
        assert!(hazard.contains(point));
    }

    #[test]
    fn outside_beyond_radius() {
        let center = GeoPoint::new(0.0, 0.0);
        let hazard = Hazard::new(center, 1_000.0);
        let far = GeoPoint::new(0.05, 0.0); // ~5.5 km
        assert!(!hazard.contains(far));
    }

    #[test]
    fn closer_point_on_same_bearing_is_inside() {
        let center = GeoPoint::new(0.0, 0.0);
        let hazard = Hazard::new(center, 1_000.0);
        let near = GeoPoint::new(0.004, 0.0); // ~445 m
        let nearer = GeoPoint::new(0.002, 0.0); // ~222 m
        assert!(hazard.contains(near));
        assert!(hazard.contains(nearer));
    }

    #[test]
    fn invalid_point_is_never_inside() {
        let hazard = Hazard::new(GeoPoint::new(0.0, 0.0), 1_000.0);
        assert!(!hazard.contains(GeoPoint::MISSING));
    }
}
