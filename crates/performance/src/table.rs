//! Four-dimensional fuel-flow table and the aircraft metadata that travels with it.

use std::fmt;

use aeic_core::units::feet_to_meters;

use crate::PerformanceError;

/// Table axes, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    FlightLevel,
    TrueAirspeed,
    RateOfClimb,
    Mass,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::FlightLevel,
        Axis::TrueAirspeed,
        Axis::RateOfClimb,
        Axis::Mass,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::FlightLevel => 0,
            Axis::TrueAirspeed => 1,
            Axis::RateOfClimb => 2,
            Axis::Mass => 3,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::FlightLevel => "flight level",
            Axis::TrueAirspeed => "true airspeed",
            Axis::RateOfClimb => "rate of climb",
            Axis::Mass => "mass",
        };
        f.write_str(name)
    }
}

/// Fuel flow (kg/s) over flight level x TAS (m/s) x ROC (m/s) x mass (kg).
///
/// A zero entry means "no data for this combination", never "zero fuel flow".
/// Values are stored row-major with the mass axis varying fastest.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTable {
    axes: [Vec<f64>; 4],
    fuel_flow: Vec<f64>,
}

impl PerformanceTable {
    /// Build a table from explicit axes and a dense, row-major fuel-flow array.
    pub fn new(axes: [Vec<f64>; 4], fuel_flow: Vec<f64>) -> Result<Self, PerformanceError> {
        for axis in Axis::ALL {
            validate_axis(axis, &axes[axis.index()])?;
        }
        let expected: usize = axes.iter().map(Vec::len).product();
        if fuel_flow.len() != expected {
            return Err(PerformanceError::ShapeMismatch {
                expected,
                found: fuel_flow.len(),
            });
        }
        let table = Self { axes, fuel_flow };
        if let Some(offset) = table.fuel_flow.iter().position(|&ff| !valid_fuel_flow(ff)) {
            let [_, n_tas, n_roc, n_mass] = table.shape();
            let mass = offset % n_mass;
            let roc = offset / n_mass % n_roc;
            let tas = offset / (n_mass * n_roc) % n_tas;
            let fl = offset / (n_mass * n_roc * n_tas);
            return Err(PerformanceError::InvalidFuelFlow {
                value: table.fuel_flow[offset],
                flight_level: table.axes[0][fl],
                tas: table.axes[1][tas],
                roc: table.axes[2][roc],
                mass: table.axes[3][mass],
            });
        }
        Ok(table)
    }

    /// Build a table from sparse `[flight_level, tas, roc, mass, fuel_flow]` rows.
    ///
    /// Each axis becomes the sorted set of coordinates that appear in the rows; every
    /// combination not listed is left as zero.
    pub fn from_rows(rows: &[[f64; 5]]) -> Result<Self, PerformanceError> {
        if rows.is_empty() {
            return Err(PerformanceError::EmptyTable);
        }
        if let Some(row) = rows.iter().find(|row| !valid_fuel_flow(row[4])) {
            return Err(PerformanceError::InvalidFuelFlow {
                value: row[4],
                flight_level: row[0],
                tas: row[1],
                roc: row[2],
                mass: row[3],
            });
        }

        let mut axes: [Vec<f64>; 4] = Default::default();
        for axis in Axis::ALL {
            let column = axis.index();
            let mut values: Vec<f64> = rows.iter().map(|row| row[column] + 0.0).collect();
            if values.iter().any(|v| !v.is_finite()) {
                return Err(PerformanceError::InvalidAxis {
                    axis,
                    reason: "coordinates must be finite".to_string(),
                });
            }
            values.sort_by(f64::total_cmp);
            values.dedup();
            axes[column] = values;
        }

        let len: usize = axes.iter().map(Vec::len).product();
        let mut fuel_flow = vec![0.0; len];
        let mut table = Self {
            axes,
            fuel_flow: Vec::new(),
        };

        for row in rows {
            // Coordinates were taken from the rows themselves, so the lookups cannot miss.
            // Adding 0.0 folds -0.0 into 0.0 before ordering.
            let idx = [0, 1, 2, 3].map(|c| {
                table.axes[c]
                    .binary_search_by(|probe| probe.total_cmp(&(row[c] + 0.0)))
                    .unwrap_or_default()
            });
            let offset = table.offset(idx[0], idx[1], idx[2], idx[3]);
            if fuel_flow[offset] != 0.0 && fuel_flow[offset] != row[4] {
                return Err(PerformanceError::DuplicateEntry {
                    flight_level: row[0],
                    tas: row[1],
                    roc: row[2],
                    mass: row[3],
                });
            }
            fuel_flow[offset] = row[4];
        }

        table.fuel_flow = fuel_flow;
        Ok(table)
    }

    /// Ascending coordinates along one axis.
    #[inline]
    pub fn axis(&self, axis: Axis) -> &[f64] {
        &self.axes[axis.index()]
    }

    pub fn shape(&self) -> [usize; 4] {
        [
            self.axes[0].len(),
            self.axes[1].len(),
            self.axes[2].len(),
            self.axes[3].len(),
        ]
    }

    /// Fuel flow at the given axis indices. Panics if an index is out of bounds.
    #[inline]
    pub fn fuel_flow(&self, fl: usize, tas: usize, roc: usize, mass: usize) -> f64 {
        self.fuel_flow[self.offset(fl, tas, roc, mass)]
    }

    pub fn min_mass(&self) -> f64 {
        self.axes[3][0]
    }

    pub fn max_mass(&self) -> f64 {
        self.axes[3][self.axes[3].len() - 1]
    }

    #[inline]
    fn offset(&self, fl: usize, tas: usize, roc: usize, mass: usize) -> usize {
        let [_, n_tas, n_roc, n_mass] = self.shape();
        ((fl * n_tas + tas) * n_roc + roc) * n_mass + mass
    }
}

#[inline]
fn valid_fuel_flow(ff: f64) -> bool {
    ff.is_finite() && ff >= 0.0
}

fn validate_axis(axis: Axis, values: &[f64]) -> Result<(), PerformanceError> {
    if values.is_empty() {
        return Err(PerformanceError::InvalidAxis {
            axis,
            reason: "axis has no coordinates".to_string(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PerformanceError::InvalidAxis {
            axis,
            reason: "coordinates must be finite".to_string(),
        });
    }
    if let Some(pair) = values.windows(2).find(|w| w[1] <= w[0]) {
        return Err(PerformanceError::InvalidAxis {
            axis,
            reason: format!("coordinates must be strictly ascending ({} then {})", pair[0], pair[1]),
        });
    }
    Ok(())
}

/// Performance table plus the scalar metadata the legacy engine needs.
///
/// Loaded once per aircraft type and only ever read afterwards, so one model can be
/// shared by reference across trajectories computed on different threads.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceModel {
    pub name: String,
    /// Maximum operating altitude (ft).
    pub max_alt_ft: f64,
    /// Maximum payload mass (kg).
    pub max_payload_kg: f64,
    pub table: PerformanceTable,
}

impl PerformanceModel {
    /// Operating ceiling in metres.
    pub fn max_altitude_m(&self) -> f64 {
        feet_to_meters(self.max_alt_ft)
    }
}
