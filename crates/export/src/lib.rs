//! Export helpers for trajectory CSV tables and JSON flight summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while writing exports.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trajectory {
    use std::io::Write;

    use aeic_legacy::{TrajectoryBuffer, TrajectoryPoint};
    use serde::Serialize;

    use crate::ExportError;

    /// One CSV row: the point plus its index and phase.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record<'a> {
        pub index: usize,
        pub phase: &'a str,
        pub altitude_m: f64,
        pub latitude_deg: f64,
        pub longitude_deg: f64,
        pub ground_distance_m: f64,
        pub flight_time_s: f64,
        pub aircraft_mass_kg: f64,
        pub fuel_mass_kg: f64,
        pub fuel_flow_kg_s: f64,
        pub true_airspeed_m_s: f64,
        pub rate_of_climb_m_s: f64,
        pub flight_level: f64,
        pub flight_level_weight: f64,
        pub ground_speed_m_s: f64,
        pub heading_deg: f64,
    }

    impl<'a> Record<'a> {
        pub fn new(index: usize, phase: &'a str, point: &TrajectoryPoint) -> Self {
            Self {
                index,
                phase,
                altitude_m: point.altitude,
                latitude_deg: point.latitude,
                longitude_deg: point.longitude,
                ground_distance_m: point.ground_distance,
                flight_time_s: point.flight_time,
                aircraft_mass_kg: point.aircraft_mass,
                fuel_mass_kg: point.fuel_mass,
                fuel_flow_kg_s: point.fuel_flow,
                true_airspeed_m_s: point.true_airspeed,
                rate_of_climb_m_s: point.rate_of_climb,
                flight_level: point.flight_level,
                flight_level_weight: point.flight_level_interpolation_weight,
                ground_speed_m_s: point.ground_speed,
                heading_deg: point.heading,
            }
        }
    }

    /// Write every point of `buffer` as CSV, header first.
    pub fn write_csv<W: Write>(writer: W, buffer: &TrajectoryBuffer) -> Result<(), ExportError> {
        let layout = buffer.layout();
        let mut csv = csv::Writer::from_writer(writer);
        for (index, point) in buffer.points().iter().enumerate() {
            let phase = if layout.climb_range().contains(&index) {
                "climb"
            } else if layout.cruise_range().contains(&index) {
                "cruise"
            } else {
                "descent"
            };
            csv.serialize(Record::new(index, phase, point))?;
        }
        csv.flush()?;
        Ok(())
    }
}

pub mod summary {
    use std::io::Write;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::ExportError;

    /// Write a serialisable flight summary as pretty JSON.
    pub fn write_json<W: Write, T: Serialize + ?Sized>(
        mut writer: W,
        summary: &T,
    ) -> Result<(), ExportError> {
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
