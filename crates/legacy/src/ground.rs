//! Ground speed and heading for a segment.
//!
//! The engine only sees [`GroundSpeedModel`]; wind fields plug in behind it. Any
//! `Fn(lon, lat, lon_next, lat_next, altitude_ft, tas) -> GroundVector` also works.

use aeic_core::geo::{self, GroundVector, initial_bearing};

/// Ground speed and track heading between two route points at a given airspeed.
pub trait GroundSpeedModel {
    fn ground_speed_and_heading(
        &self,
        lon: f64,
        lat: f64,
        lon_next: f64,
        lat_next: f64,
        altitude_ft: f64,
        tas: f64,
    ) -> GroundVector;
}

/// No wind: ground speed equals airspeed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StillAir;

impl GroundSpeedModel for StillAir {
    fn ground_speed_and_heading(
        &self,
        lon: f64,
        lat: f64,
        lon_next: f64,
        lat_next: f64,
        altitude_ft: f64,
        tas: f64,
    ) -> GroundVector {
        geo::ground_speed_and_heading(lon, lat, lon_next, lat_next, altitude_ft, tas)
    }
}

/// Constant wind at every altitude. `u` blows towards the east, `v` towards the north (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UniformWind {
    pub u: f64,
    pub v: f64,
}

impl GroundSpeedModel for UniformWind {
    fn ground_speed_and_heading(
        &self,
        lon: f64,
        lat: f64,
        lon_next: f64,
        lat_next: f64,
        _altitude_ft: f64,
        tas: f64,
    ) -> GroundVector {
        let track = initial_bearing(lon, lat, lon_next, lat_next);
        let theta = track.to_radians();
        let along = self.u * theta.sin() + self.v * theta.cos();
        let cross = self.u * theta.cos() - self.v * theta.sin();
        // crab into the crosswind, then add the tail/head component
        let ground_speed = ((tas * tas - cross * cross).max(0.0)).sqrt() + along;
        GroundVector {
            ground_speed: ground_speed.max(0.0),
            heading_deg: track,
            wind_u: self.u,
            wind_v: self.v,
        }
    }
}

impl<F> GroundSpeedModel for F
where
    F: Fn(f64, f64, f64, f64, f64, f64) -> GroundVector,
{
    fn ground_speed_and_heading(
        &self,
        lon: f64,
        lat: f64,
        lon_next: f64,
        lat_next: f64,
        altitude_ft: f64,
        tas: f64,
    ) -> GroundVector {
        self(lon, lat, lon_next, lat_next, altitude_ft, tas)
    }
}
