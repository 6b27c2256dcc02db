//! Bounding-box search and linear/bilinear interpolation over a [`PerformanceTable`].
//!
//! Every query first narrows the table to the rate-of-climb slice that belongs to the
//! current flight phase, then brackets the target along the flight-level (and, where
//! needed, mass) axis and collects the non-zero entries inside that box. Nothing is ever
//! extrapolated: a target outside an axis fails with [`PerformanceError::Envelope`].

use aeic_core::sequence::filter_order_duplicates;
use aeic_core::units::flight_level;

use crate::table::{Axis, PerformanceTable};
use crate::{EnvelopeSide, PerformanceError};

/// |ROC| below this value counts as level flight.
pub const ZERO_ROC_TOLERANCE: f64 = 1e-6;

/// Flight phase, as far as table filtering is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Climb,
    Cruise,
    Descent,
}

impl Phase {
    /// Whether a tabulated rate of climb belongs to this phase's slice of the table.
    #[inline]
    pub fn admits(self, roc: f64) -> bool {
        match self {
            Phase::Climb => roc > 0.0,
            Phase::Cruise => roc.abs() < ZERO_ROC_TOLERANCE,
            Phase::Descent => roc < 0.0,
        }
    }

    /// Descent ROC is a function of flight level alone; climb ROC also varies with mass.
    #[inline]
    fn roc_from_flight_level(self) -> bool {
        matches!(self, Phase::Descent)
    }
}

/// Adjacent axis indices bracketing a target: `axis[low] <= target < axis[high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub low: usize,
    pub high: usize,
}

impl Bracket {
    /// Fractional position of `target` between the bracketing coordinates.
    #[inline]
    pub fn weight(&self, values: &[f64], target: f64) -> f64 {
        (target - values[self.low]) / (values[self.high] - values[self.low])
    }

    #[inline]
    fn slot(&self, index: usize) -> Option<usize> {
        if index == self.low {
            Some(0)
        } else if index == self.high {
            Some(1)
        } else {
            None
        }
    }
}

/// Find the two entries of an ascending `values` slice that bracket `target`.
///
/// Fails when `target` lies below the first entry or at/above the last one.
pub fn search_axis(axis: Axis, values: &[f64], target: f64) -> Result<Bracket, PerformanceError> {
    let high = values.partition_point(|&v| v <= target);
    let envelope = |side| PerformanceError::Envelope {
        axis,
        side,
        target,
        min: values.first().copied().unwrap_or(f64::NAN),
        max: values.last().copied().unwrap_or(f64::NAN),
    };

    if high == 0 {
        return Err(envelope(EnvelopeSide::Below));
    }
    if high == values.len() {
        return Err(envelope(EnvelopeSide::Above));
    }
    Ok(Bracket {
        low: high - 1,
        high,
    })
}

/// Rate-of-climb indices of a table admitted by one flight phase.
#[derive(Debug, Clone)]
pub struct PhaseSubtable<'a> {
    table: &'a PerformanceTable,
    phase: Phase,
    roc_indices: Vec<usize>,
}

impl<'a> PhaseSubtable<'a> {
    pub fn new(table: &'a PerformanceTable, phase: Phase) -> Self {
        let roc_indices = table
            .axis(Axis::RateOfClimb)
            .iter()
            .enumerate()
            .filter(|(_, roc)| phase.admits(**roc))
            .map(|(i, _)| i)
            .collect();
        Self {
            table,
            phase,
            roc_indices,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn roc_indices(&self) -> &[usize] {
        &self.roc_indices
    }

    /// Rates of climb covered by this slice, ascending.
    pub fn roc_values(&self) -> Vec<f64> {
        let rocs = self.table.axis(Axis::RateOfClimb);
        self.roc_indices.iter().map(|&i| rocs[i]).collect()
    }

    /// Non-zero entries at the given flight levels (and masses, or every mass), in
    /// flight-level, TAS, ROC, mass order.
    fn non_zero(&self, fls: &[usize], masses: Option<&[usize]>) -> Vec<Entry> {
        let [_, n_tas, _, n_mass] = self.table.shape();
        let all_masses: Vec<usize> = (0..n_mass).collect();
        let masses = masses.unwrap_or(&all_masses);

        let mut out = Vec::new();
        for &fl in fls {
            for tas in 0..n_tas {
                for &roc in &self.roc_indices {
                    for &mass in masses {
                        let fuel_flow = self.table.fuel_flow(fl, tas, roc, mass);
                        if fuel_flow != 0.0 {
                            out.push(Entry {
                                fl,
                                tas,
                                roc,
                                mass,
                                fuel_flow,
                            });
                        }
                    }
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    fl: usize,
    tas: usize,
    roc: usize,
    mass: usize,
    fuel_flow: f64,
}

/// Quantities that depend only on flight level within a phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightLevelState {
    pub flight_level: f64,
    /// Fractional position between the bracketing flight levels.
    pub weight: f64,
    pub tas: f64,
    pub fuel_flow: f64,
    /// Only populated in descent; climb ROC comes from the flight-level x mass grid.
    pub rate_of_climb: Option<f64>,
}

/// The pair of tabulated flight levels around the (constant) cruise flight level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseEnvelope {
    pub flight_level: f64,
    pub bracket: Bracket,
    pub bounding_levels: [f64; 2],
    pub weight: f64,
}

/// Cruise TAS and fuel flow at the heaviest tabulated mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruisePoint {
    pub tas: f64,
    pub fuel_flow: f64,
}

/// Read-only interpolation front end over one performance table.
#[derive(Debug, Clone, Copy)]
pub struct TableInterpolator<'a> {
    table: &'a PerformanceTable,
}

impl<'a> TableInterpolator<'a> {
    pub fn new(table: &'a PerformanceTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a PerformanceTable {
        self.table
    }

    pub fn subtable(&self, phase: Phase) -> PhaseSubtable<'a> {
        PhaseSubtable::new(self.table, phase)
    }

    /// Bracket `target` on one of the table's axes.
    pub fn search(&self, axis: Axis, target: f64) -> Result<Bracket, PerformanceError> {
        search_axis(axis, self.table.axis(axis), target)
    }

    /// TAS, fuel flow and (in descent) ROC at an altitude, interpolated in flight level.
    ///
    /// Within the phase slice each bracketing flight level must carry a single distinct
    /// non-zero TAS and fuel flow (and ROC in descent); duplicates across masses collapse.
    pub fn interpolate_by_flight_level(
        &self,
        altitude_m: f64,
        subtable: &PhaseSubtable<'_>,
    ) -> Result<FlightLevelState, PerformanceError> {
        self.interpolate_at_flight_level(flight_level(altitude_m), subtable)
    }

    /// Same as [`Self::interpolate_by_flight_level`] for a flight level given directly.
    pub fn interpolate_at_flight_level(
        &self,
        fl: f64,
        subtable: &PhaseSubtable<'_>,
    ) -> Result<FlightLevelState, PerformanceError> {
        let levels = self.table.axis(Axis::FlightLevel);
        let bracket = self.search(Axis::FlightLevel, fl)?;
        let weight = bracket.weight(levels, fl);

        let entries = subtable.non_zero(&[bracket.low, bracket.high], None);
        let tas_axis = self.table.axis(Axis::TrueAirspeed);
        let roc_axis = self.table.axis(Axis::RateOfClimb);

        let tas_values: Vec<f64> = entries.iter().map(|e| tas_axis[e.tas]).collect();
        let ff_values: Vec<f64> = entries.iter().map(|e| e.fuel_flow).collect();

        let tas = lerp_candidates(&tas_values, weight, "flight-level TAS interpolation")?;
        let fuel_flow = lerp_candidates(&ff_values, weight, "flight-level fuel-flow interpolation")?;
        let rate_of_climb = if subtable.phase().roc_from_flight_level() {
            let roc_values: Vec<f64> = entries.iter().map(|e| roc_axis[e.roc]).collect();
            Some(lerp_candidates(
                &roc_values,
                weight,
                "flight-level ROC interpolation",
            )?)
        } else {
            None
        };

        Ok(FlightLevelState {
            flight_level: fl,
            weight,
            tas,
            fuel_flow,
            rate_of_climb,
        })
    }

    /// Climb ROC at a flight level and mass by bilinear interpolation on the FL x mass grid.
    pub fn interpolate_rate_of_climb(
        &self,
        flight_level: f64,
        mass: f64,
        subtable: &PhaseSubtable<'_>,
    ) -> Result<f64, PerformanceError> {
        let fl_bracket = self.search(Axis::FlightLevel, flight_level)?;
        let mass_bracket = self.search(Axis::Mass, mass)?;
        let fl_weight = fl_bracket.weight(self.table.axis(Axis::FlightLevel), flight_level);
        let mass_weight = mass_bracket.weight(self.table.axis(Axis::Mass), mass);

        let entries = subtable.non_zero(
            &[fl_bracket.low, fl_bracket.high],
            Some(&[mass_bracket.low, mass_bracket.high][..]),
        );
        let rocs = self.table.axis(Axis::RateOfClimb);
        let grid = fill_grid(
            &entries,
            fl_bracket,
            mass_bracket,
            |e| rocs[e.roc],
            "climb ROC interpolation",
        )?;
        Ok(bilinear(grid, fl_weight, mass_weight))
    }

    /// Bracket the cruise flight level once; cruise altitude never changes afterwards.
    pub fn cruise_envelope(&self, flight_level: f64) -> Result<CruiseEnvelope, PerformanceError> {
        let levels = self.table.axis(Axis::FlightLevel);
        let bracket = self.search(Axis::FlightLevel, flight_level)?;
        Ok(CruiseEnvelope {
            flight_level,
            bracket,
            bounding_levels: [levels[bracket.low], levels[bracket.high]],
            weight: bracket.weight(levels, flight_level),
        })
    }

    /// Cruise TAS, which depends on flight level only.
    pub fn cruise_true_airspeed(
        &self,
        envelope: &CruiseEnvelope,
        cruise: &PhaseSubtable<'_>,
    ) -> Result<f64, PerformanceError> {
        let entries = cruise.non_zero(&[envelope.bracket.low, envelope.bracket.high], None);
        let tas_axis = self.table.axis(Axis::TrueAirspeed);
        let tas_values: Vec<f64> = entries.iter().map(|e| tas_axis[e.tas]).collect();
        lerp_candidates(&tas_values, envelope.weight, "cruise TAS interpolation")
    }

    /// Cruise fuel flow at the given mass by bilinear interpolation on the cruise
    /// flight-level brackets x mass grid.
    pub fn interpolate_cruise_fuel_flow(
        &self,
        mass: f64,
        envelope: &CruiseEnvelope,
        cruise: &PhaseSubtable<'_>,
    ) -> Result<f64, PerformanceError> {
        let mass_bracket = self.search(Axis::Mass, mass)?;
        let mass_weight = mass_bracket.weight(self.table.axis(Axis::Mass), mass);
        let entries = cruise.non_zero(
            &[envelope.bracket.low, envelope.bracket.high],
            Some(&[mass_bracket.low, mass_bracket.high][..]),
        );
        let grid = fill_grid(
            &entries,
            envelope.bracket,
            mass_bracket,
            |e| e.fuel_flow,
            "cruise fuel-flow interpolation",
        )?;
        Ok(bilinear(grid, envelope.weight, mass_weight))
    }

    /// Cruise TAS and fuel flow at the heaviest tabulated mass, interpolated in flight level.
    ///
    /// The zero-ROC slice at the two cruise flight levels and that mass must contain exactly
    /// two non-zero entries, one per flight level.
    pub fn cruise_point(
        &self,
        envelope: &CruiseEnvelope,
        cruise: &PhaseSubtable<'_>,
    ) -> Result<CruisePoint, PerformanceError> {
        let heaviest = self.table.axis(Axis::Mass).len() - 1;
        let entries = cruise.non_zero(
            &[envelope.bracket.low, envelope.bracket.high],
            Some(&[heaviest][..]),
        );

        let (low, high) = match entries.as_slice() {
            [a, b] if a.fl == envelope.bracket.low && b.fl == envelope.bracket.high => (a, b),
            _ => {
                return Err(PerformanceError::TableShape {
                    context: "starting-mass cruise point",
                    expected: 2,
                    found: entries.len(),
                });
            }
        };

        let tas_axis = self.table.axis(Axis::TrueAirspeed);
        let w = envelope.weight;
        Ok(CruisePoint {
            tas: tas_axis[low.tas] + w * (tas_axis[high.tas] - tas_axis[low.tas]),
            fuel_flow: low.fuel_flow + w * (high.fuel_flow - low.fuel_flow),
        })
    }
}

/// Collapse duplicate candidates and interpolate between the (at most two) survivors.
fn lerp_candidates(
    values: &[f64],
    weight: f64,
    context: &'static str,
) -> Result<f64, PerformanceError> {
    match filter_order_duplicates(values).as_slice() {
        [only] => Ok(*only),
        [low, high] => Ok(low + weight * (high - low)),
        other => Err(PerformanceError::TableShape {
            context,
            expected: 2,
            found: other.len(),
        }),
    }
}

/// Place entries on a 2 x 2 (flight level x mass) grid; every cell needs exactly one value.
fn fill_grid(
    entries: &[Entry],
    fl_bracket: Bracket,
    mass_bracket: Bracket,
    value: impl Fn(&Entry) -> f64,
    context: &'static str,
) -> Result<[[f64; 2]; 2], PerformanceError> {
    let mut grid = [[None::<f64>; 2]; 2];
    let shape_error = || PerformanceError::TableShape {
        context,
        expected: 4,
        found: entries.len(),
    };

    for entry in entries {
        let (Some(i), Some(j)) = (fl_bracket.slot(entry.fl), mass_bracket.slot(entry.mass)) else {
            continue;
        };
        let v = value(entry);
        if grid[i][j].is_some_and(|existing| existing != v) {
            return Err(shape_error());
        }
        grid[i][j] = Some(v);
    }

    let mut out = [[0.0; 2]; 2];
    for (i, row) in grid.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            out[i][j] = cell.ok_or_else(shape_error)?;
        }
    }
    Ok(out)
}

/// Interpolate along flight level first, then along mass.
#[inline]
fn bilinear(grid: [[f64; 2]; 2], fl_weight: f64, mass_weight: f64) -> f64 {
    let light = grid[0][0] + (grid[1][0] - grid[0][0]) * fl_weight;
    let heavy = grid[0][1] + (grid[1][1] - grid[0][1]) * fl_weight;
    light + (heavy - light) * mass_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeic_core::units::feet_to_meters;

    /// Two flight levels, two masses, one climb/cruise/descent regime each.
    fn small_table() -> PerformanceTable {
        PerformanceTable::from_rows(&[
            // climb: TAS and fuel flow by FL, ROC by FL and mass
            [100.0, 150.0, 12.0, 50_000.0, 1.4],
            [100.0, 150.0, 10.0, 60_000.0, 1.4],
            [300.0, 190.0, 8.0, 50_000.0, 1.0],
            [300.0, 190.0, 6.0, 60_000.0, 1.0],
            // cruise
            [100.0, 180.0, 0.0, 50_000.0, 0.9],
            [100.0, 180.0, 0.0, 60_000.0, 1.1],
            [300.0, 220.0, 0.0, 50_000.0, 0.6],
            [300.0, 220.0, 0.0, 60_000.0, 0.8],
            // descent
            [100.0, 170.0, -9.0, 50_000.0, 0.4],
            [100.0, 170.0, -9.0, 60_000.0, 0.4],
            [300.0, 210.0, -11.0, 50_000.0, 0.2],
            [300.0, 210.0, -11.0, 60_000.0, 0.2],
        ])
        .expect("table")
    }

    fn altitude_at(fl: f64) -> f64 {
        feet_to_meters(fl * 100.0)
    }

    #[test]
    fn search_brackets_interior_targets() {
        let axis = [0.0, 100.0, 200.0, 300.0];
        assert_eq!(
            search_axis(Axis::FlightLevel, &axis, 150.0).unwrap(),
            Bracket { low: 1, high: 2 }
        );
        assert_eq!(
            search_axis(Axis::FlightLevel, &axis, 0.0).unwrap(),
            Bracket { low: 0, high: 1 }
        );
        assert_eq!(
            search_axis(Axis::FlightLevel, &axis, 200.0).unwrap(),
            Bracket { low: 2, high: 3 }
        );
    }

    #[test]
    fn search_rejects_targets_outside_each_axis() {
        for axis in [Axis::FlightLevel, Axis::TrueAirspeed, Axis::Mass] {
            let values = [10.0, 20.0, 30.0];
            match search_axis(axis, &values, 9.99).unwrap_err() {
                PerformanceError::Envelope { axis: a, side, .. } => {
                    assert_eq!(a, axis);
                    assert_eq!(side, EnvelopeSide::Below);
                }
                other => panic!("unexpected error {other:?}"),
            }
            for target in [30.0, 31.0] {
                match search_axis(axis, &values, target).unwrap_err() {
                    PerformanceError::Envelope { axis: a, side, .. } => {
                        assert_eq!(a, axis);
                        assert_eq!(side, EnvelopeSide::Above);
                    }
                    other => panic!("unexpected error {other:?}"),
                }
            }
        }
    }

    #[test]
    fn phase_slices_filter_rate_of_climb_sign() {
        let table = small_table();
        let climb = PhaseSubtable::new(&table, Phase::Climb);
        let cruise = PhaseSubtable::new(&table, Phase::Cruise);
        let descent = PhaseSubtable::new(&table, Phase::Descent);
        assert_eq!(climb.roc_values(), vec![6.0, 8.0, 10.0, 12.0]);
        assert_eq!(cruise.roc_values(), vec![0.0]);
        assert_eq!(descent.roc_values(), vec![-11.0, -9.0]);
    }

    #[test]
    fn flight_level_interpolation_is_linear_between_levels() {
        let table = small_table();
        let interp = TableInterpolator::new(&table);
        let climb = interp.subtable(Phase::Climb);

        let state = interp
            .interpolate_by_flight_level(altitude_at(200.0), &climb)
            .unwrap();
        assert!((state.flight_level - 200.0).abs() < 1e-9);
        assert!((state.weight - 0.5).abs() < 1e-9);
        assert!((state.tas - 170.0).abs() < 1e-9);
        assert!((state.fuel_flow - 1.2).abs() < 1e-9);
        assert_eq!(state.rate_of_climb, None);

        let descent = interp.subtable(Phase::Descent);
        let state = interp
            .interpolate_by_flight_level(altitude_at(150.0), &descent)
            .unwrap();
        assert!((state.tas - 180.0).abs() < 1e-9);
        assert!((state.rate_of_climb.unwrap() + 9.5).abs() < 1e-9);
    }

    #[test]
    fn interpolation_at_a_node_returns_the_tabulated_value() {
        let table = small_table();
        let interp = TableInterpolator::new(&table);
        let descent = interp.subtable(Phase::Descent);
        let state = interp.interpolate_at_flight_level(100.0, &descent).unwrap();
        assert_eq!(state.weight, 0.0);
        assert_eq!(state.tas, 170.0);
        assert_eq!(state.fuel_flow, 0.4);
        assert_eq!(state.rate_of_climb, Some(-9.0));

        let climb = interp.subtable(Phase::Climb);
        let state = interp.interpolate_at_flight_level(100.0, &climb).unwrap();
        assert_eq!((state.tas, state.fuel_flow), (150.0, 1.4));

        // the top of the flight-level axis is outside the envelope
        assert!(matches!(
            interp.interpolate_at_flight_level(300.0, &climb),
            Err(PerformanceError::Envelope {
                axis: Axis::FlightLevel,
                side: EnvelopeSide::Above,
                ..
            })
        ));
    }

    #[test]
    fn climb_roc_is_bilinear_in_flight_level_and_mass() {
        let table = small_table();
        let interp = TableInterpolator::new(&table);
        let climb = interp.subtable(Phase::Climb);
        let roc = interp
            .interpolate_rate_of_climb(200.0, 55_000.0, &climb)
            .unwrap();
        // light: (12 + 8) / 2 = 10, heavy: (10 + 6) / 2 = 8
        assert!((roc - 9.0).abs() < 1e-9);

        let err = interp
            .interpolate_rate_of_climb(200.0, 60_000.0, &climb)
            .unwrap_err();
        assert!(matches!(
            err,
            PerformanceError::Envelope {
                axis: Axis::Mass,
                side: EnvelopeSide::Above,
                ..
            }
        ));
    }

    #[test]
    fn cruise_queries_use_the_precomputed_envelope() {
        let table = small_table();
        let interp = TableInterpolator::new(&table);
        let cruise = interp.subtable(Phase::Cruise);
        let envelope = interp.cruise_envelope(250.0).unwrap();
        assert_eq!(envelope.bounding_levels, [100.0, 300.0]);
        assert!((envelope.weight - 0.75).abs() < 1e-12);

        let tas = interp.cruise_true_airspeed(&envelope, &cruise).unwrap();
        assert!((tas - 210.0).abs() < 1e-9);

        let ff = interp
            .interpolate_cruise_fuel_flow(55_000.0, &envelope, &cruise)
            .unwrap();
        // light: 0.9 + 0.75 * (0.6 - 0.9) = 0.675, heavy: 1.1 + 0.75 * (0.8 - 1.1) = 0.875
        assert!((ff - 0.775).abs() < 1e-9);

        let point = interp.cruise_point(&envelope, &cruise).unwrap();
        assert!((point.tas - 210.0).abs() < 1e-9);
        assert!((point.fuel_flow - 0.875).abs() < 1e-9);
    }

    #[test]
    fn three_candidates_make_the_table_overdefined() {
        let mut rows = vec![
            [100.0, 150.0, 12.0, 50_000.0, 1.4],
            [300.0, 190.0, 8.0, 50_000.0, 1.0],
        ];
        // a second climb TAS at the lower level
        rows.push([100.0, 160.0, 12.0, 60_000.0, 1.4]);
        let table = PerformanceTable::from_rows(&rows).unwrap();
        let interp = TableInterpolator::new(&table);
        let climb = interp.subtable(Phase::Climb);
        let err = interp
            .interpolate_by_flight_level(altitude_at(200.0), &climb)
            .unwrap_err();
        assert_eq!(
            err,
            PerformanceError::TableShape {
                context: "flight-level TAS interpolation",
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn missing_grid_cell_is_a_shape_error() {
        let table = PerformanceTable::from_rows(&[
            [100.0, 150.0, 12.0, 50_000.0, 1.4],
            [100.0, 150.0, 10.0, 60_000.0, 1.4],
            [300.0, 190.0, 8.0, 50_000.0, 1.0],
            [300.0, 190.0, 0.0, 60_000.0, 0.5],
        ])
        .unwrap();
        let interp = TableInterpolator::new(&table);
        let climb = interp.subtable(Phase::Climb);
        let err = interp
            .interpolate_rate_of_climb(200.0, 55_000.0, &climb)
            .unwrap_err();
        assert!(matches!(err, PerformanceError::TableShape { expected: 4, .. }));
    }

    #[test]
    fn cruise_point_requires_one_entry_per_level() {
        let table = PerformanceTable::from_rows(&[
            [100.0, 180.0, 0.0, 60_000.0, 1.1],
            [100.0, 190.0, 0.0, 60_000.0, 1.2],
            [300.0, 220.0, 0.0, 60_000.0, 0.8],
        ])
        .unwrap();
        let interp = TableInterpolator::new(&table);
        let cruise = interp.subtable(Phase::Cruise);
        let envelope = interp.cruise_envelope(250.0).unwrap();
        let err = interp.cruise_point(&envelope, &cruise).unwrap_err();
        assert_eq!(
            err,
            PerformanceError::TableShape {
                context: "starting-mass cruise point",
                expected: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn missing_cruise_row_is_reported_as_a_shape_mismatch() {
        let table = PerformanceTable::from_rows(&[
            [100.0, 180.0, 0.0, 50_000.0, 0.9],
            [100.0, 180.0, 0.0, 60_000.0, 1.1],
            [300.0, 220.0, 0.0, 50_000.0, 0.6],
        ])
        .unwrap();
        let interp = TableInterpolator::new(&table);
        let cruise = interp.subtable(Phase::Cruise);
        let envelope = interp.cruise_envelope(250.0).unwrap();
        let err = interp.cruise_point(&envelope, &cruise).unwrap_err();
        assert!(matches!(err, PerformanceError::TableShape { found: 1, .. }));
        assert_eq!(
            err.to_string(),
            "performance table shape mismatch for starting-mass cruise point: \
             expected 2 non-zero candidates, found 1"
        );
    }
}
