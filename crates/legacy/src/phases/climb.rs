use aeic_performance::Phase;
use tracing::debug;

use super::{LegacyTrajectory, PhaseState};
use crate::TrajectoryError;
use crate::buffer::linspace;
use crate::ground::GroundSpeedModel;

impl<G: GroundSpeedModel> LegacyTrajectory<'_, G> {
    /// Climb from the climb-start altitude to cruise altitude in equal altitude steps.
    ///
    /// TAS and fuel flow are interpolated in flight level; the rate of climb also depends
    /// on the current mass and is interpolated on the flight-level x mass grid.
    pub fn fly_climb(&mut self) -> Result<(), TrajectoryError> {
        self.expect_state(PhaseState::Climb)?;
        let start = self.profile.climb_start_m;
        let end = self.profile.cruise_m;
        if start >= end {
            return Err(TrajectoryError::ClimbGeometry {
                climb_start_m: start,
                cruise_m: end,
            });
        }

        let range = self.buffer.layout().climb_range();
        let climb = self.interpolator.subtable(Phase::Climb);
        for (index, altitude) in range.clone().zip(linspace(start, end, range.len())) {
            let state = self.interpolator.interpolate_by_flight_level(altitude, &climb)?;
            let point = self.buffer.point_mut(index);
            point.altitude = altitude;
            point.flight_level = state.flight_level;
            point.flight_level_interpolation_weight = state.weight;
            point.true_airspeed = state.tas;
            point.fuel_flow = state.fuel_flow;
        }

        for index in range.start..range.end - 1 {
            let point = self.buffer[index];
            let roc = self.interpolator.interpolate_rate_of_climb(
                point.flight_level,
                point.aircraft_mass,
                &climb,
            )?;
            self.integrator.vertical(
                &mut self.buffer,
                index,
                roc,
                false,
                self.mission,
                &self.ground,
            )?;
        }

        let top = self.buffer[range.end - 1];
        debug!(
            flight_time_s = top.flight_time,
            ground_distance_m = top.ground_distance,
            aircraft_mass_kg = top.aircraft_mass,
            "climb complete"
        );
        self.state = PhaseState::Cruise;
        Ok(())
    }
}
