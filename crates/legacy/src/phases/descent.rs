use aeic_performance::Phase;
use tracing::debug;

use super::{LegacyTrajectory, PhaseState};
use crate::TrajectoryError;
use crate::buffer::linspace;
use crate::ground::GroundSpeedModel;

impl<G: GroundSpeedModel> LegacyTrajectory<'_, G> {
    /// Descent from cruise altitude to 3000 ft above the arrival field.
    ///
    /// TAS, fuel flow and rate of descent are all interpolated in flight level. Segments
    /// whose deceleration would give back more fuel than they burn are flown at zero fuel.
    pub fn fly_descent(&mut self) -> Result<(), TrajectoryError> {
        self.expect_state(PhaseState::Descent)?;
        let range = self.buffer.layout().descent_range();
        self.buffer.copy_point(range.start - 1, range.start);

        let start = self.profile.cruise_m;
        let end = self.profile.descent_end_m;
        if end >= start {
            return Err(TrajectoryError::DescentGeometry {
                descent_start_m: start,
                descent_end_m: end,
            });
        }

        let descent = self.interpolator.subtable(Phase::Descent);
        for (index, altitude) in range.clone().zip(linspace(start, end, range.len())) {
            let state = self
                .interpolator
                .interpolate_by_flight_level(altitude, &descent)?;
            let point = self.buffer.point_mut(index);
            point.altitude = altitude;
            point.flight_level = state.flight_level;
            point.flight_level_interpolation_weight = state.weight;
            point.true_airspeed = state.tas;
            point.fuel_flow = state.fuel_flow;
            point.rate_of_climb = state.rate_of_climb.unwrap_or_default();
        }

        let mut clamped = 0usize;
        for index in range.start..range.end - 1 {
            let roc = self.buffer[index].rate_of_climb;
            let segment = self.integrator.vertical(
                &mut self.buffer,
                index,
                roc,
                true,
                self.mission,
                &self.ground,
            )?;
            clamped += usize::from(segment.fuel_clamped);
        }

        let landing = self.buffer[range.end - 1];
        debug!(
            flight_time_s = landing.flight_time,
            ground_distance_m = landing.ground_distance,
            clamped_segments = clamped,
            "descent complete"
        );
        self.state = PhaseState::Done;
        Ok(())
    }
}
