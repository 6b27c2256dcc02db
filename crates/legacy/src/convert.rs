//! Runtime types from their configuration-file counterparts.

use aeic_config::{MissionConfig, PerformanceModelConfig, TrajectoryOptionsConfig};
use aeic_performance::{PerformanceModel, PerformanceTable};

use crate::TrajectoryError;
use crate::mission::{Mission, Position};
use crate::phases::LegacyOptions;

/// Build a performance model, validating the sparse table rows.
pub fn performance_model(
    config: &PerformanceModelConfig,
) -> Result<PerformanceModel, TrajectoryError> {
    let info = &config.general_information;
    if !(info.max_alt_ft > 0.0) {
        return Err(TrajectoryError::InvalidModel(format!(
            "max_alt_ft must be positive, got {}",
            info.max_alt_ft
        )));
    }
    if info.max_payload_kg < 0.0 {
        return Err(TrajectoryError::InvalidModel(format!(
            "max_payload_kg must not be negative, got {}",
            info.max_payload_kg
        )));
    }
    let table = PerformanceTable::from_rows(&config.performance.rows)?;
    Ok(PerformanceModel {
        name: info.name.clone().unwrap_or_else(|| "unnamed".to_string()),
        max_alt_ft: info.max_alt_ft,
        max_payload_kg: info.max_payload_kg,
        table,
    })
}

pub fn mission(config: &MissionConfig) -> Result<Mission, TrajectoryError> {
    if !(0.0..=1.0).contains(&config.load_factor) {
        return Err(TrajectoryError::InvalidModel(format!(
            "load factor must lie in [0, 1], got {}",
            config.load_factor
        )));
    }
    let origin = &config.origin;
    let destination = &config.destination;
    Ok(Mission {
        name: config.name.clone(),
        origin: Position::new(origin.lon, origin.lat, origin.alt_m),
        destination: Position::new(destination.lon, destination.lat, destination.alt_m),
        load_factor: config.load_factor,
        departure: config.departure,
    })
}

pub fn options(config: &TrajectoryOptionsConfig) -> LegacyOptions {
    LegacyOptions {
        pct_step_climb: config.pct_step_climb,
        pct_step_cruise: config.pct_step_cruise,
        pct_step_descent: config.pct_step_descent,
        fuel_lhv: config.fuel_lhv_j_kg,
        starting_mass: config.starting_mass_kg,
        iterate_mass: config.iterate_mass,
        mass_iteration_tolerance: config.mass_iteration_tolerance,
        max_mass_iterations: config.max_mass_iterations,
    }
}
