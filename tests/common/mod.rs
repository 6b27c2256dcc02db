#![allow(dead_code)]

use aeic_trajectory::legacy::{LegacyOptions, Mission, Position};
use aeic_trajectory::performance::{PerformanceModel, PerformanceTable};

pub const LEVELS: [f64; 5] = [0.0, 100.0, 200.0, 300.0, 400.0];
pub const MASSES: [f64; 3] = [50_000.0, 60_000.0, 70_000.0];

/// BADA-style synthetic table: one TAS and fuel flow per flight level and phase, climb
/// ROC falling with altitude and mass, cruise fuel flow proportional to mass, a constant
/// -10.97 m/s descent.
pub fn narrowbody() -> PerformanceModel {
    model_from(&LEVELS, &MASSES)
}

pub fn model_from(levels: &[f64], masses: &[f64]) -> PerformanceModel {
    let mut rows = Vec::new();
    for &fl in levels {
        for &m in masses {
            let climb_roc = (20.0 - 0.03 * fl) * 60_000.0 / m;
            let cruise_ff = (0.9 - 0.0005 * fl) * m / 60_000.0;
            rows.push([fl, 130.0 + 0.25 * fl, climb_roc, m, 1.6 - 0.002 * fl]);
            rows.push([fl, 150.0 + 0.25 * fl, 0.0, m, cruise_ff]);
            rows.push([fl, 200.0, -10.97, m, 0.3 - 0.0002 * fl]);
        }
    }
    model_with_rows(&rows)
}

pub fn model_with_rows(rows: &[[f64; 5]]) -> PerformanceModel {
    PerformanceModel {
        name: "synthetic-narrowbody".to_string(),
        max_alt_ft: 41_000.0,
        max_payload_kg: 15_000.0,
        table: PerformanceTable::from_rows(rows).expect("fixture table"),
    }
}

/// Equatorial flight from 0 deg east to `lon_deg` east.
pub fn mission_to(lon_deg: f64) -> Mission {
    Mission::new(
        Position::new(0.0, 0.0, 0.0),
        Position::new(lon_deg, 0.0, 0.0),
        0.7,
    )
}

pub fn options(step: f64) -> LegacyOptions {
    LegacyOptions {
        pct_step_climb: step,
        pct_step_cruise: step,
        pct_step_descent: step,
        ..LegacyOptions::default()
    }
}
