//! Tabulated aircraft performance (flight level x TAS x ROC x mass -> fuel flow) and the
//! phase-aware interpolation routines used by the legacy trajectory engine.

pub mod interp;
pub mod table;

use std::fmt;

use thiserror::Error;

pub use interp::{
    Bracket, CruiseEnvelope, CruisePoint, FlightLevelState, Phase, PhaseSubtable,
    TableInterpolator, ZERO_ROC_TOLERANCE, search_axis,
};
pub use table::{Axis, PerformanceModel, PerformanceTable};

/// Which end of a tabulated axis a target fell off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeSide {
    Below,
    Above,
}

impl fmt::Display for EnvelopeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeSide::Below => f.write_str("below"),
            EnvelopeSide::Above => f.write_str("above"),
        }
    }
}

/// Errors raised while building or querying a performance table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PerformanceError {
    #[error(
        "aircraft is trying to fly {side} the tabulated {axis} envelope ({axis} {target:.2}, table covers [{min:.2}, {max:.2}))"
    )]
    Envelope {
        axis: Axis,
        side: EnvelopeSide,
        target: f64,
        min: f64,
        max: f64,
    },
    #[error(
        "performance table shape mismatch for {context}: expected {expected} non-zero candidates, found {found}"
    )]
    TableShape {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid {axis} axis: {reason}")]
    InvalidAxis { axis: Axis, reason: String },
    #[error("fuel-flow table holds {found} values but the axes describe {expected}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error(
        "duplicate performance entry at FL {flight_level}, TAS {tas}, ROC {roc}, mass {mass}"
    )]
    DuplicateEntry {
        flight_level: f64,
        tas: f64,
        roc: f64,
        mass: f64,
    },
    #[error("fuel flow must be finite and non-negative, got {value} at FL {flight_level}, TAS {tas}, ROC {roc}, mass {mass}")]
    InvalidFuelFlow {
        value: f64,
        flight_level: f64,
        tas: f64,
        roc: f64,
        mass: f64,
    },
    #[error("performance table has no rows")]
    EmptyTable,
}
