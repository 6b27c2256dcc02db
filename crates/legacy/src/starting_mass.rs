//! Take-off mass from the cruise point of the performance envelope.

use aeic_core::constants::SECONDS_PER_MINUTE;
use aeic_core::units::nautmiles_to_meters;
use aeic_performance::{
    CruiseEnvelope, PerformanceError, PerformanceModel, PhaseSubtable, TableInterpolator,
};
use serde::Serialize;
use tracing::warn;

/// Empty mass is estimated as the lightest tabulated mass divided by this factor.
pub const EMPTY_MASS_DIVISOR: f64 = 1.2;
/// Reserve fuel as a fraction of trip fuel.
pub const RESERVE_FRACTION: f64 = 0.05;
/// Flights longer than this carry the long-haul diversion and hold allowance.
pub const LONG_FLIGHT_MINUTES: f64 = 180.0;

const LONG_DIVERT_NMI: f64 = 200.0;
const LONG_HOLD_MINUTES: f64 = 30.0;
const SHORT_DIVERT_NMI: f64 = 100.0;
const SHORT_HOLD_MINUTES: f64 = 45.0;

/// Mass build-up behind a starting mass (kg unless noted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StartingMass {
    pub total_kg: f64,
    pub empty_kg: f64,
    pub payload_kg: f64,
    pub trip_fuel_kg: f64,
    pub reserve_fuel_kg: f64,
    pub divert_fuel_kg: f64,
    pub hold_fuel_kg: f64,
    /// Cruise TAS at the heaviest mass (m/s).
    pub cruise_tas: f64,
    /// Cruise fuel flow at the heaviest mass (kg/s).
    pub cruise_fuel_flow: f64,
    /// Great-circle distance over cruise TAS (s).
    pub approx_time_s: f64,
    /// The sum exceeded the heaviest tabulated mass and was cut back to it.
    pub clamped: bool,
}

impl StartingMass {
    /// Breakdown around a caller-chosen total; no fuel allowance is estimated.
    pub fn fixed(model: &PerformanceModel, load_factor: f64, total_kg: f64) -> Self {
        Self {
            total_kg,
            empty_kg: model.table.min_mass() / EMPTY_MASS_DIVISOR,
            payload_kg: model.max_payload_kg * load_factor,
            trip_fuel_kg: 0.0,
            reserve_fuel_kg: 0.0,
            divert_fuel_kg: 0.0,
            hold_fuel_kg: 0.0,
            cruise_tas: 0.0,
            cruise_fuel_flow: 0.0,
            approx_time_s: 0.0,
            clamped: false,
        }
    }

    /// Fuel loaded at the start of the flight.
    pub fn fuel_onboard_kg(&self) -> f64 {
        (self.total_kg - self.empty_kg - self.payload_kg).max(0.0)
    }

    /// Same breakdown rebuilt around a different trip fuel; reserve follows the trip fuel.
    pub fn with_trip_fuel(&self, trip_fuel_kg: f64, max_mass_kg: f64) -> Self {
        let reserve_fuel_kg = RESERVE_FRACTION * trip_fuel_kg;
        let sum = self.empty_kg
            + self.payload_kg
            + trip_fuel_kg
            + reserve_fuel_kg
            + self.divert_fuel_kg
            + self.hold_fuel_kg;
        Self {
            total_kg: sum.min(max_mass_kg),
            trip_fuel_kg,
            reserve_fuel_kg,
            clamped: sum > max_mass_kg,
            ..*self
        }
    }
}

/// Estimate the starting mass for a flight of `distance_m` at `load_factor`.
pub fn estimate_starting_mass(
    model: &PerformanceModel,
    interpolator: &TableInterpolator<'_>,
    envelope: &CruiseEnvelope,
    cruise: &PhaseSubtable<'_>,
    distance_m: f64,
    load_factor: f64,
) -> Result<StartingMass, PerformanceError> {
    let point = interpolator.cruise_point(envelope, cruise)?;
    let table = interpolator.table();

    let empty_kg = table.min_mass() / EMPTY_MASS_DIVISOR;
    let payload_kg = model.max_payload_kg * load_factor;

    let approx_time_s = distance_m / point.tas;
    let trip_fuel_kg = approx_time_s * point.fuel_flow;
    let reserve_fuel_kg = RESERVE_FRACTION * trip_fuel_kg;

    let (divert_nmi, hold_minutes) = if approx_time_s > LONG_FLIGHT_MINUTES * SECONDS_PER_MINUTE {
        (LONG_DIVERT_NMI, LONG_HOLD_MINUTES)
    } else {
        (SHORT_DIVERT_NMI, SHORT_HOLD_MINUTES)
    };
    let divert_fuel_kg = nautmiles_to_meters(divert_nmi) / point.tas * point.fuel_flow;
    let hold_fuel_kg = hold_minutes * SECONDS_PER_MINUTE * point.fuel_flow;

    let sum =
        empty_kg + payload_kg + trip_fuel_kg + reserve_fuel_kg + divert_fuel_kg + hold_fuel_kg;
    let max_mass = table.max_mass();
    let clamped = sum > max_mass;
    if clamped {
        warn!(
            estimate_kg = sum,
            max_mass_kg = max_mass,
            "starting mass clamped to the heaviest tabulated mass"
        );
    }

    Ok(StartingMass {
        total_kg: sum.min(max_mass),
        empty_kg,
        payload_kg,
        trip_fuel_kg,
        reserve_fuel_kg,
        divert_fuel_kg,
        hold_fuel_kg,
        cruise_tas: point.tas,
        cruise_fuel_flow: point.fuel_flow,
        approx_time_s,
        clamped,
    })
}
