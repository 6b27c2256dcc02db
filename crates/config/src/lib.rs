//! Configuration models and loaders for the AEIC trajectory workspace.
//!
//! Files are read as TOML when the extension is `.toml` and as YAML otherwise.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

/// Performance model file: aircraft metadata plus sparse fuel-flow rows.
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceModelConfig {
    pub general_information: GeneralInformation,
    pub performance: PerformanceRows,
}

/// Scalar aircraft metadata.
#[derive(Debug, Deserialize, Clone)]
pub struct GeneralInformation {
    #[serde(default)]
    pub name: Option<String>,
    pub max_alt_ft: f64,
    pub max_payload_kg: f64,
}

/// Rows of `[flight_level, tas_m_s, roc_m_s, mass_kg, fuel_flow_kg_s]`.
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceRows {
    pub rows: Vec<[f64; 5]>,
}

/// Airport location; altitude is the field elevation in metres.
#[derive(Debug, Deserialize, Clone)]
pub struct AirportConfig {
    #[serde(default)]
    pub code: Option<String>,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub alt_m: f64,
}

/// A single origin-destination flight.
#[derive(Debug, Deserialize, Clone)]
pub struct MissionConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub origin: AirportConfig,
    pub destination: AirportConfig,
    #[serde(default = "default_load_factor")]
    pub load_factor: f64,
    /// ISO-8601 local date-time, quoted in TOML (e.g. `"2024-06-01T10:00:00"`).
    #[serde(default)]
    pub departure: Option<NaiveDateTime>,
}

/// Discretisation and fuel options for the legacy trajectory engine.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TrajectoryOptionsConfig {
    pub pct_step_climb: f64,
    pub pct_step_cruise: f64,
    pub pct_step_descent: f64,
    pub fuel_lhv_j_kg: f64,
    pub starting_mass_kg: Option<f64>,
    pub iterate_mass: bool,
    pub mass_iteration_tolerance: f64,
    pub max_mass_iterations: usize,
}

impl Default for TrajectoryOptionsConfig {
    fn default() -> Self {
        Self {
            pct_step_climb: 0.01,
            pct_step_cruise: 0.01,
            pct_step_descent: 0.01,
            fuel_lhv_j_kg: 43.8e6,
            starting_mass_kg: None,
            iterate_mass: false,
            mass_iteration_tolerance: 1e-3,
            max_mass_iterations: 10,
        }
    }
}

fn default_load_factor() -> f64 {
    1.0
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("expected a configuration file, found directory {0}")]
    NotAFile(PathBuf),
}

/// Load an aircraft performance model.
pub fn load_performance_model<P: AsRef<Path>>(
    path: P,
) -> Result<PerformanceModelConfig, ConfigError> {
    load_record(path)
}

/// Load one mission.
pub fn load_mission<P: AsRef<Path>>(path: P) -> Result<MissionConfig, ConfigError> {
    load_record(path)
}

/// Load trajectory options; missing keys fall back to the defaults.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<TrajectoryOptionsConfig, ConfigError> {
    load_record(path)
}

fn load_record<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        return Err(ConfigError::NotAFile(path.to_path_buf()));
    }
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).expect("create");
        file.write_all(contents.as_bytes()).expect("write");
        path
    }

    #[test]
    fn performance_model_reads_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "model.toml",
            r#"
[general_information]
name = "test"
max_alt_ft = 41000.0
max_payload_kg = 20000.0

[performance]
rows = [
    [0.0, 130.0, 20.0, 50000.0, 1.6],
    [400.0, 230.0, 8.0, 50000.0, 0.8],
]
"#,
        );
        let model = load_performance_model(&path).expect("model");
        assert_eq!(model.general_information.name.as_deref(), Some("test"));
        assert_eq!(model.general_information.max_alt_ft, 41_000.0);
        assert_eq!(model.performance.rows.len(), 2);
        assert_eq!(model.performance.rows[1][0], 400.0);
    }

    #[test]
    fn mission_defaults_and_departure_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "mission.toml",
            r#"
departure = "2024-06-01T10:30:00"

[origin]
code = "BOS"
lon = -71.0
lat = 42.36

[destination]
lon = -87.9
lat = 41.97
alt_m = 204.0
"#,
        );
        let mission = load_mission(&path).expect("mission");
        assert_eq!(mission.load_factor, 1.0);
        assert_eq!(mission.origin.alt_m, 0.0);
        assert_eq!(mission.origin.code.as_deref(), Some("BOS"));
        assert_eq!(mission.destination.alt_m, 204.0);
        let departure = mission.departure.expect("departure");
        assert_eq!(departure.to_string(), "2024-06-01 10:30:00");
    }

    #[test]
    fn yaml_mission_loads_and_directories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write(
            dir.path(),
            "mission.yaml",
            "origin: { lon: 0.0, lat: 0.0 }\ndestination: { lon: 10.0, lat: 0.0 }\nload_factor: 0.7\n",
        );
        let mission = load_mission(&yaml).expect("yaml mission");
        assert_eq!(mission.load_factor, 0.7);
        assert_eq!(mission.destination.lon, 10.0);
        assert!(mission.departure.is_none());

        assert!(matches!(
            load_mission(dir.path()),
            Err(ConfigError::NotAFile(_))
        ));
    }

    #[test]
    fn options_fill_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "options.yaml", "pct_step_cruise: 0.05\niterate_mass: true\n");
        let options = load_options(&path).expect("options");
        assert_eq!(options.pct_step_cruise, 0.05);
        assert_eq!(options.pct_step_climb, 0.01);
        assert!(options.iterate_mass);
        assert_eq!(options.fuel_lhv_j_kg, 43.8e6);
        assert_eq!(options.max_mass_iterations, 10);
    }
}
