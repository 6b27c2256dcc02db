//! Integration of one segment between adjacent trajectory points.

use aeic_core::units::meters_to_feet;
use tracing::{trace, warn};

use crate::TrajectoryError;
use crate::buffer::TrajectoryBuffer;
use crate::ground::GroundSpeedModel;
use crate::mission::Mission;

/// Fraction of the fuel energy that ends up as aircraft kinetic energy.
pub const ACCELERATION_EFFICIENCY: f64 = 0.15;

/// Extra fuel for a change of true airspeed from `tas_start` to `tas_end` at `mass`.
///
/// Negative when the aircraft decelerates.
pub fn acceleration_fuel(mass: f64, tas_start: f64, tas_end: f64, fuel_lhv: f64) -> f64 {
    let kinetic = 0.5 * mass * (tas_end * tas_end - tas_start * tas_start);
    kinetic / fuel_lhv / ACCELERATION_EFFICIENCY
}

/// What happened over one integrated segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub time_s: f64,
    pub fuel_kg: f64,
    pub distance_m: f64,
    /// Descent segment fuel came out negative and was replaced with zero.
    pub fuel_clamped: bool,
}

/// Advances time, fuel, mass, distance and position from point `i` to `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntegrator {
    fuel_lhv: f64,
}

impl SegmentIntegrator {
    pub fn new(fuel_lhv: f64) -> Self {
        Self { fuel_lhv }
    }

    pub fn fuel_lhv(&self) -> f64 {
        self.fuel_lhv
    }

    /// Climb or descent segment: the altitude change fixes the segment time.
    ///
    /// The ground speed comes from the forward component of the airspeed,
    /// `sqrt(tas^2 - roc^2)`. When `clamp_negative_fuel` is set a negative segment fuel
    /// (deceleration outweighing the burn) is replaced with zero.
    pub fn vertical<G: GroundSpeedModel>(
        &self,
        buffer: &mut TrajectoryBuffer,
        index: usize,
        rate_of_climb: f64,
        clamp_negative_fuel: bool,
        mission: &Mission,
        ground: &G,
    ) -> Result<Segment, TrajectoryError> {
        let point = buffer[index];
        let next = buffer[index + 1];
        if rate_of_climb == 0.0 {
            return Err(TrajectoryError::ZeroRateOfClimb { index });
        }

        let time_s = (next.altitude - point.altitude) / rate_of_climb;
        let forward_tas = (point.true_airspeed.powi(2) - rate_of_climb.powi(2))
            .max(0.0)
            .sqrt();

        let (lon_ahead, lat_ahead) = lookahead(
            mission,
            point.ground_distance + forward_tas * time_s,
            point.longitude,
            point.latitude,
        );
        let vector = ground.ground_speed_and_heading(
            point.longitude,
            point.latitude,
            lon_ahead,
            lat_ahead,
            meters_to_feet(point.altitude),
            forward_tas,
        );
        let distance_m = vector.ground_speed * time_s;

        let mut fuel_kg = point.fuel_flow * time_s
            + acceleration_fuel(
                point.aircraft_mass,
                point.true_airspeed,
                next.true_airspeed,
                self.fuel_lhv,
            );
        let fuel_clamped = clamp_negative_fuel && fuel_kg < 0.0;
        if fuel_clamped {
            warn!(index, fuel_kg, "negative descent segment fuel, using zero");
            fuel_kg = 0.0;
        }

        let ground_distance = point.ground_distance + distance_m;
        let (lon, lat) = mission.position_at(ground_distance);
        {
            let current = buffer.point_mut(index);
            current.rate_of_climb = rate_of_climb;
            current.ground_speed = vector.ground_speed;
            current.heading = vector.heading_deg;
        }
        let advanced = buffer.point_mut(index + 1);
        advanced.fuel_mass = point.fuel_mass - fuel_kg;
        advanced.aircraft_mass = point.aircraft_mass - fuel_kg;
        advanced.ground_distance = ground_distance;
        advanced.flight_time = point.flight_time + time_s;
        advanced.longitude = lon;
        advanced.latitude = lat;

        trace!(index, time_s, fuel_kg, distance_m, "vertical segment");
        Ok(Segment {
            time_s,
            fuel_kg,
            distance_m,
            fuel_clamped,
        })
    }

    /// Level segment of fixed ground length `step_m`; point positions are already set.
    pub fn level<G: GroundSpeedModel>(
        &self,
        buffer: &mut TrajectoryBuffer,
        index: usize,
        step_m: f64,
        fuel_flow: f64,
        ground: &G,
    ) -> Result<Segment, TrajectoryError> {
        let point = buffer[index];
        let next = buffer[index + 1];
        let vector = ground.ground_speed_and_heading(
            point.longitude,
            point.latitude,
            next.longitude,
            next.latitude,
            meters_to_feet(point.altitude),
            point.true_airspeed,
        );
        if vector.ground_speed <= 0.0 {
            return Err(TrajectoryError::NonPositiveGroundSpeed {
                index,
                ground_speed: vector.ground_speed,
            });
        }

        let time_s = step_m / vector.ground_speed;
        let fuel_kg = fuel_flow * time_s;
        {
            let current = buffer.point_mut(index);
            current.fuel_flow = fuel_flow;
            current.ground_speed = vector.ground_speed;
            current.heading = vector.heading_deg;
        }
        let advanced = buffer.point_mut(index + 1);
        advanced.fuel_mass = point.fuel_mass - fuel_kg;
        advanced.aircraft_mass = point.aircraft_mass - fuel_kg;
        advanced.flight_time = point.flight_time + time_s;

        trace!(index, time_s, fuel_kg, "level segment");
        Ok(Segment {
            time_s,
            fuel_kg,
            distance_m: step_m,
            fuel_clamped: false,
        })
    }
}

/// A route point ahead of the current one, falling back to the destination when the
/// look-ahead collapses onto the current position.
fn lookahead(mission: &Mission, ground_distance: f64, lon: f64, lat: f64) -> (f64, f64) {
    let (lon_ahead, lat_ahead) = mission.position_at(ground_distance);
    if (lon_ahead - lon).abs() < 1e-12 && (lat_ahead - lat).abs() < 1e-12 {
        (mission.destination.lon, mission.destination.lat)
    } else {
        (lon_ahead, lat_ahead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PhaseLayout;
    use crate::ground::{StillAir, UniformWind};
    use crate::mission::Position;

    const LHV: f64 = 43.8e6;

    fn mission() -> Mission {
        Mission::new(Position::new(0.0, 0.0, 0.0), Position::new(10.0, 0.0, 0.0), 1.0)
    }

    fn two_point_buffer() -> TrajectoryBuffer {
        TrajectoryBuffer::new(PhaseLayout {
            climb: 2,
            cruise: 0,
            descent: 0,
        })
    }

    #[test]
    fn acceleration_fuel_matches_kinetic_energy_budget() {
        let fuel = acceleration_fuel(60_000.0, 150.0, 160.0, LHV);
        let expected = 0.5 * 60_000.0 * (160.0f64.powi(2) - 150.0f64.powi(2)) / LHV / 0.15;
        assert!((fuel - expected).abs() < 1e-12);
        assert!(acceleration_fuel(60_000.0, 160.0, 150.0, LHV) < 0.0);
        assert_eq!(acceleration_fuel(60_000.0, 150.0, 150.0, LHV), 0.0);
    }

    #[test]
    fn climb_segment_advances_time_fuel_mass_and_distance() {
        let mut buffer = two_point_buffer();
        {
            let p = buffer.point_mut(0);
            p.altitude = 1000.0;
            p.aircraft_mass = 60_000.0;
            p.fuel_mass = 10_000.0;
            p.true_airspeed = 150.0;
            p.fuel_flow = 1.2;
        }
        {
            let p = buffer.point_mut(1);
            p.altitude = 1100.0;
            p.true_airspeed = 152.0;
        }

        let integrator = SegmentIntegrator::new(LHV);
        let seg = integrator
            .vertical(&mut buffer, 0, 10.0, false, &mission(), &StillAir)
            .unwrap();

        assert!((seg.time_s - 10.0).abs() < 1e-12);
        let forward = (150.0f64 * 150.0 - 100.0).sqrt();
        assert!((seg.distance_m - forward * 10.0).abs() < 1e-9);
        let expected_fuel = 1.2 * 10.0 + acceleration_fuel(60_000.0, 150.0, 152.0, LHV);
        assert!((seg.fuel_kg - expected_fuel).abs() < 1e-12);

        assert!((buffer[1].fuel_mass - (10_000.0 - expected_fuel)).abs() < 1e-9);
        assert!((buffer[1].aircraft_mass - (60_000.0 - expected_fuel)).abs() < 1e-9);
        assert!((buffer[1].flight_time - 10.0).abs() < 1e-12);
        assert!(buffer[1].longitude > 0.0);
        assert!((buffer[0].heading - 90.0).abs() < 1e-6);
        assert_eq!(buffer[0].rate_of_climb, 10.0);
    }

    #[test]
    fn decelerating_descent_segment_fuel_is_clamped_to_zero() {
        let mut buffer = two_point_buffer();
        {
            let p = buffer.point_mut(0);
            p.altitude = 3000.0;
            p.aircraft_mass = 55_000.0;
            p.fuel_mass = 5_000.0;
            p.true_airspeed = 220.0;
            p.fuel_flow = 0.1;
        }
        {
            let p = buffer.point_mut(1);
            p.altitude = 2900.0;
            p.true_airspeed = 180.0;
        }

        let integrator = SegmentIntegrator::new(LHV);
        let seg = integrator
            .vertical(&mut buffer, 0, -10.0, true, &mission(), &StillAir)
            .unwrap();
        assert!(seg.fuel_clamped);
        assert_eq!(seg.fuel_kg, 0.0);
        assert_eq!(buffer[1].fuel_mass, 5_000.0);
        assert_eq!(buffer[1].aircraft_mass, 55_000.0);
        assert!((seg.time_s - 10.0).abs() < 1e-12);

        // without the clamp the same segment would refuel the aircraft
        let mut unclamped = buffer.clone();
        let seg = integrator
            .vertical(&mut unclamped, 0, -10.0, false, &mission(), &StillAir)
            .unwrap();
        assert!(seg.fuel_kg < 0.0);
    }

    #[test]
    fn zero_rate_of_climb_is_rejected() {
        let mut buffer = two_point_buffer();
        let err = SegmentIntegrator::new(LHV)
            .vertical(&mut buffer, 0, 0.0, false, &mission(), &StillAir)
            .unwrap_err();
        assert_eq!(err, TrajectoryError::ZeroRateOfClimb { index: 0 });
    }

    #[test]
    fn level_segment_time_uses_ground_speed() {
        let mut buffer = two_point_buffer();
        {
            let p = buffer.point_mut(0);
            p.altitude = 10_000.0;
            p.aircraft_mass = 60_000.0;
            p.fuel_mass = 8_000.0;
            p.true_airspeed = 230.0;
        }
        buffer.point_mut(1).longitude = 1.0;

        let integrator = SegmentIntegrator::new(LHV);
        let wind = UniformWind { u: 20.0, v: 0.0 };
        let seg = integrator.level(&mut buffer, 0, 25_000.0, 0.8, &wind).unwrap();
        assert!((seg.time_s - 100.0).abs() < 1e-9);
        assert!((seg.fuel_kg - 80.0).abs() < 1e-9);
        assert_eq!(buffer[0].fuel_flow, 0.8);
        assert!((buffer[1].aircraft_mass - 59_920.0).abs() < 1e-9);

        let stop = UniformWind { u: -300.0, v: 0.0 };
        let err = integrator.level(&mut buffer, 0, 25_000.0, 0.8, &stop).unwrap_err();
        assert!(matches!(err, TrajectoryError::NonPositiveGroundSpeed { index: 0, .. }));
    }
}
