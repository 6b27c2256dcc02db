//! Core units, constants, and shared primitives for the AEIC trajectory workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Metres per international foot.
    pub const FEET_TO_METERS: f64 = 0.3048;
    /// Metres per international nautical mile.
    pub const NAUTICAL_MILE_M: f64 = 1_852.0;
    /// Mean Earth radius used for great-circle geometry (m).
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
    /// Lower heating value of Jet-A (J/kg).
    pub const JET_A_LHV_J_KG: f64 = 43.8e6;
    /// Seconds per minute.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{FEET_TO_METERS, NAUTICAL_MILE_M};

    /// Convert feet to metres.
    #[inline]
    pub fn feet_to_meters(v: f64) -> f64 {
        v * FEET_TO_METERS
    }

    /// Convert metres to feet.
    #[inline]
    pub fn meters_to_feet(v: f64) -> f64 {
        v / FEET_TO_METERS
    }

    /// Convert nautical miles to metres.
    #[inline]
    pub fn nautmiles_to_meters(v: f64) -> f64 {
        v * NAUTICAL_MILE_M
    }

    /// Convert metres to nautical miles.
    #[inline]
    pub fn meters_to_nautmiles(v: f64) -> f64 {
        v / NAUTICAL_MILE_M
    }

    /// Flight level (hundreds of feet) for a geometric altitude in metres.
    #[inline]
    pub fn flight_level(altitude_m: f64) -> f64 {
        meters_to_feet(altitude_m) / 100.0
    }
}

/// Great-circle helpers on a spherical Earth. Angles are degrees, distances metres.
pub mod geo {
    use super::constants::EARTH_RADIUS_M;

    /// Ground speed and heading returned by the ground-speed function.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GroundVector {
        /// Ground speed (m/s).
        pub ground_speed: f64,
        /// Track heading, degrees clockwise from true north in [0, 360).
        pub heading_deg: f64,
        /// Eastward wind component (m/s).
        pub wind_u: f64,
        /// Northward wind component (m/s).
        pub wind_v: f64,
    }

    /// Haversine distance between two lon/lat points.
    pub fn great_circle_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
        let d_lat = (lat2 - lat1).to_radians();
        let d_lon = (lon2 - lon1).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial great-circle bearing from the first point towards the second.
    pub fn initial_bearing(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
        let phi1 = lat1.to_radians();
        let phi2 = lat2.to_radians();
        let d_lon = (lon2 - lon1).to_radians();
        let y = d_lon.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lon.cos();
        y.atan2(x).to_degrees().rem_euclid(360.0)
    }

    /// Point at `fraction` of the way along the great circle between two points.
    ///
    /// `fraction` is clamped to `[0, 1]`. Coincident endpoints return the start point.
    pub fn intermediate_point(
        lon1: f64,
        lat1: f64,
        lon2: f64,
        lat2: f64,
        fraction: f64,
    ) -> (f64, f64) {
        let f = fraction.clamp(0.0, 1.0);
        let delta = great_circle_distance(lon1, lat1, lon2, lat2) / EARTH_RADIUS_M;
        if delta < 1e-12 {
            return (lon1, lat1);
        }

        let (phi1, lambda1) = (lat1.to_radians(), lon1.to_radians());
        let (phi2, lambda2) = (lat2.to_radians(), lon2.to_radians());
        let a = ((1.0 - f) * delta).sin() / delta.sin();
        let b = (f * delta).sin() / delta.sin();

        let x = a * phi1.cos() * lambda1.cos() + b * phi2.cos() * lambda2.cos();
        let y = a * phi1.cos() * lambda1.sin() + b * phi2.cos() * lambda2.sin();
        let z = a * phi1.sin() + b * phi2.sin();

        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);
        (lon.to_degrees(), lat.to_degrees())
    }

    /// Ground speed and track heading between two points in still air.
    ///
    /// With no wind the ground speed equals the supplied airspeed and the heading is the
    /// great-circle track; the altitude argument is accepted for parity with wind-aware models.
    pub fn ground_speed_and_heading(
        lon: f64,
        lat: f64,
        lon_next: f64,
        lat_next: f64,
        _altitude_ft: f64,
        tas: f64,
    ) -> GroundVector {
        GroundVector {
            ground_speed: tas,
            heading_deg: initial_bearing(lon, lat, lon_next, lat_next),
            wind_u: 0.0,
            wind_v: 0.0,
        }
    }
}

/// Sequence helpers shared by table filtering code.
pub mod sequence {
    /// Distinct values of `values` in first-seen order.
    pub fn filter_order_duplicates(values: &[f64]) -> Vec<f64> {
        let mut out: Vec<f64> = Vec::with_capacity(values.len());
        for &v in values {
            if !out.contains(&v) {
                out.push(v);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::geo::*;
    use super::sequence::filter_order_duplicates;
    use super::units::*;

    #[test]
    fn unit_round_trips_are_consistent() {
        assert!((feet_to_meters(1000.0) - 304.8).abs() < 1e-12);
        assert!((meters_to_feet(304.8) - 1000.0).abs() < 1e-9);
        assert!((nautmiles_to_meters(100.0) - 185_200.0).abs() < 1e-9);
        assert!((flight_level(feet_to_meters(35_000.0)) - 350.0).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_sixty_nautical_miles_ish() {
        let d = great_circle_distance(0.0, 0.0, 0.0, 1.0);
        assert!((meters_to_nautmiles(d) - 60.04).abs() < 0.1, "got {d}");
    }

    #[test]
    fn bearing_due_east_on_equator() {
        let b = initial_bearing(0.0, 0.0, 10.0, 0.0);
        assert!((b - 90.0).abs() < 1e-9);
        let b = initial_bearing(0.0, 10.0, 0.0, 0.0);
        assert!((b - 180.0).abs() < 1e-9);
    }

    #[test]
    fn intermediate_point_hits_endpoints_and_midpoint() {
        let (lon, lat) = intermediate_point(-73.78, 40.64, -0.45, 51.47, 0.0);
        assert!((lon + 73.78).abs() < 1e-9 && (lat - 40.64).abs() < 1e-9);
        let (lon, lat) = intermediate_point(-73.78, 40.64, -0.45, 51.47, 1.0);
        assert!((lon + 0.45).abs() < 1e-9 && (lat - 51.47).abs() < 1e-9);

        let (lon, lat) = intermediate_point(0.0, 0.0, 20.0, 0.0, 0.5);
        assert!((lon - 10.0).abs() < 1e-9 && lat.abs() < 1e-9);
    }

    #[test]
    fn still_air_ground_speed_equals_airspeed() {
        let g = ground_speed_and_heading(0.0, 0.0, 1.0, 0.0, 35_000.0, 230.0);
        assert_eq!(g.ground_speed, 230.0);
        assert!((g.heading_deg - 90.0).abs() < 1e-9);
        assert_eq!((g.wind_u, g.wind_v), (0.0, 0.0));
    }

    #[test]
    fn duplicates_are_removed_in_first_seen_order() {
        assert_eq!(
            filter_order_duplicates(&[3.0, 1.0, 3.0, 2.0, 1.0]),
            vec![3.0, 1.0, 2.0]
        );
        assert!(filter_order_duplicates(&[]).is_empty());
    }
}
