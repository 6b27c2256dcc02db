//! Legacy (AEIC v2) trajectory engine.
//!
//! A flight is flown as a fixed climb -> cruise -> descent sequence over a pre-sized
//! [`TrajectoryBuffer`]. Per-point airspeed, fuel flow and rate of climb come from the
//! tabulated performance model; each segment between adjacent points is integrated for
//! time, fuel, mass and ground distance.

pub mod buffer;
pub mod convert;
pub mod flight;
pub mod ground;
pub mod mission;
pub mod phases;
pub mod segment;
pub mod starting_mass;

pub use buffer::{PhaseLayout, TrajectoryBuffer, TrajectoryPoint};
pub use flight::{FlightProfile, FlightSummary, fly_flight, fly_mission, fly_mission_with};
pub use ground::{GroundSpeedModel, StillAir, UniformWind};
pub use mission::{Mission, Position};
pub use phases::{AltitudeProfile, LegacyOptions, LegacyTrajectory, PhaseState};
pub use starting_mass::StartingMass;

use aeic_performance::PerformanceError;
use thiserror::Error;

/// Errors that end a single trajectory computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error(transparent)]
    Performance(#[from] PerformanceError),
    #[error(
        "departure airport + 3000 ft ({climb_start_m:.1} m) must be below the start of cruise ({cruise_m:.1} m)"
    )]
    ClimbGeometry { climb_start_m: f64, cruise_m: f64 },
    #[error(
        "arrival airport + 3000 ft ({descent_end_m:.1} m) must be below the end of cruise ({descent_start_m:.1} m)"
    )]
    DescentGeometry {
        descent_start_m: f64,
        descent_end_m: f64,
    },
    #[error("arrival airport should not be above cruise altitude (descent distance {distance_m:.1} m)")]
    NegativeDescentDistance { distance_m: f64 },
    #[error(
        "mission is too short for climb and descent: cruise distance would be {cruise_distance_m:.1} m"
    )]
    ShortMission { cruise_distance_m: f64 },
    #[error("segment starting at point {index} has zero rate of climb")]
    ZeroRateOfClimb { index: usize },
    #[error("segment starting at point {index} has non-positive ground speed {ground_speed:.3} m/s")]
    NonPositiveGroundSpeed { index: usize, ground_speed: f64 },
    #[error("`{requested}` requested while the trajectory is in state `{state}`")]
    OutOfOrder {
        requested: PhaseState,
        state: PhaseState,
    },
    #[error("discretisation step {0} must lie in (0, 1]")]
    InvalidStep(f64),
    #[error("invalid model input: {0}")]
    InvalidModel(String),
}
