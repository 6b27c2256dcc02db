use tracing::debug;

use super::{LegacyTrajectory, PhaseState};
use crate::TrajectoryError;
use crate::buffer::linspace;
use crate::ground::GroundSpeedModel;

impl<G: GroundSpeedModel> LegacyTrajectory<'_, G> {
    /// Level flight at cruise altitude in equal ground-distance steps.
    ///
    /// The cruise distance is whatever remains of the great-circle distance after climb
    /// and the estimated descent distance. Fuel flow follows the current mass on the
    /// cruise flight-level x mass grid.
    pub fn fly_cruise(&mut self) -> Result<(), TrajectoryError> {
        self.expect_state(PhaseState::Cruise)?;
        let range = self.buffer.layout().cruise_range();
        self.buffer.copy_point(range.start - 1, range.start);

        let descent_distance = self.profile.descent_distance_estimate();
        if descent_distance < 0.0 {
            return Err(TrajectoryError::NegativeDescentDistance {
                distance_m: descent_distance,
            });
        }
        let start_distance = self.buffer[range.start].ground_distance;
        let cruise_distance =
            self.mission.great_circle_distance_m() - start_distance - descent_distance;
        if cruise_distance < 0.0 {
            return Err(TrajectoryError::ShortMission {
                cruise_distance_m: cruise_distance,
            });
        }
        let step = cruise_distance / (range.len() - 1) as f64;

        let envelope = self.cruise_envelope;
        let tas = self
            .interpolator
            .cruise_true_airspeed(&envelope, &self.cruise_table)?;
        let altitude = self.profile.cruise_m;
        let distances = linspace(start_distance, start_distance + cruise_distance, range.len());
        for (index, distance) in range.clone().zip(distances) {
            let (lon, lat) = self.mission.position_at(distance);
            let point = self.buffer.point_mut(index);
            point.altitude = altitude;
            point.ground_distance = distance;
            point.longitude = lon;
            point.latitude = lat;
            point.true_airspeed = tas;
            point.rate_of_climb = 0.0;
            point.flight_level = envelope.flight_level;
            point.flight_level_interpolation_weight = envelope.weight;
        }

        for index in range.start..range.end - 1 {
            let mass = self.buffer[index].aircraft_mass;
            let fuel_flow = self.interpolator.interpolate_cruise_fuel_flow(
                mass,
                &envelope,
                &self.cruise_table,
            )?;
            self.integrator
                .level(&mut self.buffer, index, step, fuel_flow, &self.ground)?;
        }

        let last = range.end - 1;
        let fuel_flow = self.interpolator.interpolate_cruise_fuel_flow(
            self.buffer[last].aircraft_mass,
            &envelope,
            &self.cruise_table,
        )?;
        self.buffer.point_mut(last).fuel_flow = fuel_flow;

        let end = self.buffer[last];
        debug!(
            cruise_distance_m = cruise_distance,
            flight_time_s = end.flight_time,
            aircraft_mass_kg = end.aircraft_mass,
            "cruise complete"
        );
        self.state = PhaseState::Descent;
        Ok(())
    }
}
