//! Climb -> cruise -> descent state machine over one [`TrajectoryBuffer`].
//!
//! [`LegacyTrajectory`] is built once per flight. It fixes the altitude profile, brackets
//! the cruise flight level and sizes the buffer up front; the phases are then flown with
//! [`LegacyTrajectory::compute_starting_mass`], [`LegacyTrajectory::fly_climb`],
//! [`LegacyTrajectory::fly_cruise`] and [`LegacyTrajectory::fly_descent`], strictly in
//! that order. Calling a step out of order returns [`TrajectoryError::OutOfOrder`].

mod climb;
mod cruise;
mod descent;

use std::fmt;

use aeic_core::constants::JET_A_LHV_J_KG;
use aeic_core::units::{feet_to_meters, flight_level};
use aeic_performance::{
    CruiseEnvelope, Phase, PerformanceModel, PhaseSubtable, TableInterpolator,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::TrajectoryError;
use crate::buffer::{PhaseLayout, TrajectoryBuffer};
use crate::ground::{GroundSpeedModel, StillAir};
use crate::mission::Mission;
use crate::segment::SegmentIntegrator;
use crate::starting_mass::{StartingMass, estimate_starting_mass};

/// Climb starts this far above the departure field.
pub const CLIMB_START_OFFSET_FT: f64 = 3_000.0;
/// Descent ends this far above the arrival field.
pub const DESCENT_END_OFFSET_FT: f64 = 3_000.0;
/// Cruise is flown this far below the operating ceiling.
pub const CRUISE_CEILING_MARGIN_FT: f64 = 7_000.0;
/// Empirical descent ground distance per metre of altitude lost.
pub const DESCENT_DISTANCE_PER_ALTITUDE: f64 = 18.23;

/// Where the trajectory is in its fixed phase sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseState {
    AwaitingMass,
    Climb,
    Cruise,
    Descent,
    Done,
}

impl fmt::Display for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhaseState::AwaitingMass => "starting mass",
            PhaseState::Climb => "climb",
            PhaseState::Cruise => "cruise",
            PhaseState::Descent => "descent",
            PhaseState::Done => "done",
        };
        f.write_str(label)
    }
}

/// Runtime options for one trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyOptions {
    /// Climb step as a fraction of the phase (`0.01` -> 101 points).
    pub pct_step_climb: f64,
    pub pct_step_cruise: f64,
    pub pct_step_descent: f64,
    /// Fuel lower heating value (J/kg).
    pub fuel_lhv: f64,
    /// Skip the estimate and start at this mass (kg).
    pub starting_mass: Option<f64>,
    /// Re-fly with the burned fuel as trip fuel until the starting mass settles.
    pub iterate_mass: bool,
    /// Relative change in burned fuel below which the iteration stops.
    pub mass_iteration_tolerance: f64,
    pub max_mass_iterations: usize,
}

impl Default for LegacyOptions {
    fn default() -> Self {
        Self {
            pct_step_climb: 0.01,
            pct_step_cruise: 0.01,
            pct_step_descent: 0.01,
            fuel_lhv: JET_A_LHV_J_KG,
            starting_mass: None,
            iterate_mass: false,
            mass_iteration_tolerance: 1e-3,
            max_mass_iterations: 10,
        }
    }
}

/// Phase boundary altitudes (m), fixed before any phase is flown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AltitudeProfile {
    pub ceiling_m: f64,
    pub climb_start_m: f64,
    /// Cruise altitude; also the end of climb and the start of descent.
    pub cruise_m: f64,
    pub descent_end_m: f64,
}

impl AltitudeProfile {
    /// Boundaries for `mission` flown by `model`.
    ///
    /// Climb starts 3000 ft above the departure field unless that reaches the ceiling.
    /// Cruise sits 7000 ft below the ceiling, raised to the climb start if it falls below
    /// it. Descent ends 3000 ft above the arrival field, capped at the ceiling.
    pub fn new(model: &PerformanceModel, mission: &Mission) -> Self {
        let ceiling_m = model.max_altitude_m();

        let mut climb_start_m = mission.origin.alt_m + feet_to_meters(CLIMB_START_OFFSET_FT);
        if climb_start_m >= ceiling_m {
            climb_start_m = mission.origin.alt_m;
        }

        let mut cruise_m = ceiling_m - feet_to_meters(CRUISE_CEILING_MARGIN_FT);
        if cruise_m < climb_start_m {
            cruise_m = climb_start_m;
        }
        if cruise_m > ceiling_m {
            cruise_m = ceiling_m;
        }

        let mut descent_end_m = mission.destination.alt_m + feet_to_meters(DESCENT_END_OFFSET_FT);
        if descent_end_m >= ceiling_m {
            descent_end_m = ceiling_m;
        }

        Self {
            ceiling_m,
            climb_start_m,
            cruise_m,
            descent_end_m,
        }
    }

    pub fn cruise_flight_level(&self) -> f64 {
        flight_level(self.cruise_m)
    }

    /// Ground distance reserved for descent before cruise is laid out.
    pub fn descent_distance_estimate(&self) -> f64 {
        DESCENT_DISTANCE_PER_ALTITUDE * (self.cruise_m - self.descent_end_m)
    }
}

/// One flight's trajectory under the legacy climb/cruise/descent model.
///
/// Borrows the (shared, read-only) performance model and mission; owns its buffer.
#[derive(Debug)]
pub struct LegacyTrajectory<'a, G = StillAir> {
    model: &'a PerformanceModel,
    mission: &'a Mission,
    options: LegacyOptions,
    ground: G,
    interpolator: TableInterpolator<'a>,
    profile: AltitudeProfile,
    cruise_envelope: CruiseEnvelope,
    cruise_table: PhaseSubtable<'a>,
    integrator: SegmentIntegrator,
    buffer: TrajectoryBuffer,
    state: PhaseState,
    starting_mass: Option<StartingMass>,
}

impl<'a> LegacyTrajectory<'a, StillAir> {
    /// Trajectory in still air.
    pub fn new(
        model: &'a PerformanceModel,
        mission: &'a Mission,
        options: LegacyOptions,
    ) -> Result<Self, TrajectoryError> {
        Self::with_ground_model(model, mission, options, StillAir)
    }
}

impl<'a, G: GroundSpeedModel> LegacyTrajectory<'a, G> {
    /// Trajectory whose ground speed and heading come from `ground`.
    pub fn with_ground_model(
        model: &'a PerformanceModel,
        mission: &'a Mission,
        options: LegacyOptions,
        ground: G,
    ) -> Result<Self, TrajectoryError> {
        if !(options.fuel_lhv > 0.0) {
            return Err(TrajectoryError::InvalidModel(format!(
                "fuel LHV must be positive, got {}",
                options.fuel_lhv
            )));
        }
        let layout = PhaseLayout::from_steps(
            options.pct_step_climb,
            options.pct_step_cruise,
            options.pct_step_descent,
        )?;

        let profile = AltitudeProfile::new(model, mission);
        let interpolator = TableInterpolator::new(&model.table);
        let cruise_envelope = interpolator.cruise_envelope(profile.cruise_flight_level())?;
        let cruise_table = interpolator.subtable(Phase::Cruise);
        debug!(
            climb_start_m = profile.climb_start_m,
            cruise_m = profile.cruise_m,
            descent_end_m = profile.descent_end_m,
            points = layout.total(),
            "trajectory laid out"
        );

        Ok(Self {
            model,
            mission,
            integrator: SegmentIntegrator::new(options.fuel_lhv),
            options,
            ground,
            interpolator,
            profile,
            cruise_envelope,
            cruise_table,
            buffer: TrajectoryBuffer::new(layout),
            state: PhaseState::AwaitingMass,
            starting_mass: None,
        })
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    pub fn buffer(&self) -> &TrajectoryBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> TrajectoryBuffer {
        self.buffer
    }

    pub fn layout(&self) -> PhaseLayout {
        self.buffer.layout()
    }

    pub fn profile(&self) -> &AltitudeProfile {
        &self.profile
    }

    pub fn cruise_envelope(&self) -> &CruiseEnvelope {
        &self.cruise_envelope
    }

    pub fn options(&self) -> &LegacyOptions {
        &self.options
    }

    pub fn mission(&self) -> &'a Mission {
        self.mission
    }

    pub fn model(&self) -> &'a PerformanceModel {
        self.model
    }

    /// The mass breakdown the current flight started from.
    pub fn starting_mass(&self) -> Option<&StartingMass> {
        self.starting_mass.as_ref()
    }

    /// Estimate the starting mass (or take the configured override) and seed point 0.
    ///
    /// Returns the total starting mass in kg.
    pub fn compute_starting_mass(&mut self) -> Result<f64, TrajectoryError> {
        self.expect_state(PhaseState::AwaitingMass)?;
        let breakdown = match self.options.starting_mass {
            Some(mass) => self.fixed(mass),
            None => self.estimate()?,
        };
        self.begin(breakdown);
        Ok(breakdown.total_kg)
    }

    /// Seed point 0 with an externally chosen starting mass (kg).
    pub fn set_starting_mass(&mut self, mass: f64) -> Result<(), TrajectoryError> {
        self.expect_state(PhaseState::AwaitingMass)?;
        let breakdown = self.fixed(mass);
        self.begin(breakdown);
        Ok(())
    }

    /// Seed point 0 from a full mass breakdown.
    pub fn begin_with(&mut self, breakdown: StartingMass) -> Result<(), TrajectoryError> {
        self.expect_state(PhaseState::AwaitingMass)?;
        self.begin(breakdown);
        Ok(())
    }

    /// Clear the buffer and go back to [`PhaseState::AwaitingMass`].
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.starting_mass = None;
        self.state = PhaseState::AwaitingMass;
    }

    /// Fly all three phases from an already seeded starting mass.
    pub fn fly_phases(&mut self) -> Result<(), TrajectoryError> {
        self.fly_climb()?;
        self.fly_cruise()?;
        self.fly_descent()
    }

    fn estimate(&self) -> Result<StartingMass, TrajectoryError> {
        Ok(estimate_starting_mass(
            self.model,
            &self.interpolator,
            &self.cruise_envelope,
            &self.cruise_table,
            self.mission.great_circle_distance_m(),
            self.mission.load_factor,
        )?)
    }

    fn fixed(&self, mass: f64) -> StartingMass {
        StartingMass::fixed(self.model, self.mission.load_factor, mass)
    }

    fn begin(&mut self, breakdown: StartingMass) {
        let first = self.buffer.point_mut(0);
        first.altitude = self.profile.climb_start_m;
        first.longitude = self.mission.origin.lon;
        first.latitude = self.mission.origin.lat;
        first.ground_distance = 0.0;
        first.flight_time = 0.0;
        first.aircraft_mass = breakdown.total_kg;
        first.fuel_mass = breakdown.fuel_onboard_kg();
        info!(
            starting_mass_kg = breakdown.total_kg,
            fuel_kg = breakdown.fuel_onboard_kg(),
            clamped = breakdown.clamped,
            "starting mass"
        );
        self.starting_mass = Some(breakdown);
        self.state = PhaseState::Climb;
    }

    fn expect_state(&self, requested: PhaseState) -> Result<(), TrajectoryError> {
        if self.state == requested {
            Ok(())
        } else {
            Err(TrajectoryError::OutOfOrder {
                requested,
                state: self.state,
            })
        }
    }
}
