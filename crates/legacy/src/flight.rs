//! Whole-flight driver: starting mass, the three phases and an optional mass iteration.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info};

use aeic_performance::PerformanceModel;

use crate::TrajectoryError;
use crate::buffer::{PhaseLayout, TrajectoryBuffer};
use crate::ground::{GroundSpeedModel, StillAir};
use crate::mission::Mission;
use crate::phases::{AltitudeProfile, LegacyOptions, LegacyTrajectory, PhaseState};
use crate::starting_mass::StartingMass;

/// Per-flight totals alongside the starting-mass breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSummary {
    pub mission: Option<String>,
    pub aircraft: String,
    pub departure: Option<NaiveDateTime>,
    pub great_circle_distance_m: f64,
    pub ground_distance_m: f64,
    pub flight_time_s: f64,
    pub fuel_burned_kg: f64,
    pub landing_mass_kg: f64,
    pub starting_mass: StartingMass,
    pub profile: AltitudeProfile,
    pub points: PhaseLayout,
    /// Re-flights performed by the mass iteration (0 when disabled).
    pub mass_iterations: usize,
}

/// A flown trajectory and its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightProfile {
    pub summary: FlightSummary,
    pub buffer: TrajectoryBuffer,
}

/// Fly `trajectory` end to end, restarting it first if it has already been flown.
///
/// With `iterate_mass` set (and no fixed starting mass) the flight is re-flown with the
/// fuel actually burned as the new trip fuel until the burn changes by less than the
/// relative tolerance or the iteration limit is hit.
pub fn fly_flight<G: GroundSpeedModel>(
    trajectory: &mut LegacyTrajectory<'_, G>,
) -> Result<FlightSummary, TrajectoryError> {
    if trajectory.state() != PhaseState::AwaitingMass {
        trajectory.reset();
    }
    trajectory.compute_starting_mass()?;
    trajectory.fly_phases()?;

    let options = trajectory.options().clone();
    let iterate = options.iterate_mass && options.starting_mass.is_none();
    let max_mass = trajectory.model().table.max_mass();
    let mut iterations = 0;
    while let Some(breakdown) = trajectory.starting_mass().copied() {
        if !iterate || iterations >= options.max_mass_iterations {
            break;
        }
        let burned = trajectory.buffer().fuel_burned();
        let residual =
            (burned - breakdown.trip_fuel_kg) / breakdown.trip_fuel_kg.max(f64::MIN_POSITIVE);
        debug!(iteration = iterations, burned_kg = burned, residual, "mass iteration");
        if residual.abs() < options.mass_iteration_tolerance {
            break;
        }

        trajectory.reset();
        trajectory.begin_with(breakdown.with_trip_fuel(burned, max_mass))?;
        trajectory.fly_phases()?;
        iterations += 1;
    }

    let summary = summarize(trajectory, iterations)?;
    info!(
        mission = summary.mission.as_deref().unwrap_or("-"),
        fuel_burned_kg = summary.fuel_burned_kg,
        flight_time_s = summary.flight_time_s,
        starting_mass_kg = summary.starting_mass.total_kg,
        "flight complete"
    );
    Ok(summary)
}

/// Fly one mission in still air and hand back the filled buffer.
pub fn fly_mission(
    model: &PerformanceModel,
    mission: &Mission,
    options: LegacyOptions,
) -> Result<FlightProfile, TrajectoryError> {
    fly_mission_with(model, mission, options, StillAir)
}

/// Fly one mission with the given ground-speed model.
pub fn fly_mission_with<G: GroundSpeedModel>(
    model: &PerformanceModel,
    mission: &Mission,
    options: LegacyOptions,
    ground: G,
) -> Result<FlightProfile, TrajectoryError> {
    let mut trajectory = LegacyTrajectory::with_ground_model(model, mission, options, ground)?;
    let summary = fly_flight(&mut trajectory)?;
    Ok(FlightProfile {
        summary,
        buffer: trajectory.into_buffer(),
    })
}

fn summarize<G: GroundSpeedModel>(
    trajectory: &LegacyTrajectory<'_, G>,
    mass_iterations: usize,
) -> Result<FlightSummary, TrajectoryError> {
    let out_of_order = || TrajectoryError::OutOfOrder {
        requested: PhaseState::Done,
        state: trajectory.state(),
    };
    if trajectory.state() != PhaseState::Done {
        return Err(out_of_order());
    }
    let starting_mass = trajectory.starting_mass().copied().ok_or_else(out_of_order)?;
    let buffer = trajectory.buffer();
    let last = buffer.last().copied().unwrap_or_default();
    let mission = trajectory.mission();

    Ok(FlightSummary {
        mission: mission.name.clone(),
        aircraft: trajectory.model().name.clone(),
        departure: mission.departure,
        great_circle_distance_m: mission.great_circle_distance_m(),
        ground_distance_m: last.ground_distance,
        flight_time_s: last.flight_time,
        fuel_burned_kg: buffer.fuel_burned(),
        landing_mass_kg: last.aircraft_mass,
        starting_mass,
        profile: *trajectory.profile(),
        points: buffer.layout(),
        mass_iterations,
    })
}
