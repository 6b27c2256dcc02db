//! Pre-sized, phase-partitioned storage for the trajectory points.

use std::ops::{Index, Range};

use serde::Serialize;

use crate::TrajectoryError;

/// State of the aircraft at one trajectory point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    /// Geometric altitude (m).
    pub altitude: f64,
    /// Degrees.
    pub latitude: f64,
    /// Degrees.
    pub longitude: f64,
    /// Distance flown along the route (m).
    pub ground_distance: f64,
    /// Elapsed time since the start of climb (s).
    pub flight_time: f64,
    /// Total aircraft mass (kg).
    pub aircraft_mass: f64,
    /// Fuel on board (kg).
    pub fuel_mass: f64,
    /// Fuel flow (kg/s).
    pub fuel_flow: f64,
    /// True airspeed (m/s).
    pub true_airspeed: f64,
    /// Rate of climb (m/s), negative in descent.
    pub rate_of_climb: f64,
    pub flight_level: f64,
    /// Fractional position between the bracketing tabulated flight levels.
    pub flight_level_interpolation_weight: f64,
    /// Ground speed over the segment starting here (m/s).
    pub ground_speed: f64,
    /// Track heading over the segment starting here (deg).
    pub heading: f64,
}

/// Number of points in each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseLayout {
    pub climb: usize,
    pub cruise: usize,
    pub descent: usize,
}

impl PhaseLayout {
    /// Point counts from per-phase steps expressed as a fraction of the phase
    /// (`0.01` -> 101 points).
    pub fn from_steps(climb: f64, cruise: f64, descent: f64) -> Result<Self, TrajectoryError> {
        Ok(Self {
            climb: points_for_step(climb)?,
            cruise: points_for_step(cruise)?,
            descent: points_for_step(descent)?,
        })
    }

    pub fn total(&self) -> usize {
        self.climb + self.cruise + self.descent
    }

    pub fn climb_range(&self) -> Range<usize> {
        0..self.climb
    }

    pub fn cruise_range(&self) -> Range<usize> {
        self.climb..self.climb + self.cruise
    }

    pub fn descent_range(&self) -> Range<usize> {
        self.climb + self.cruise..self.total()
    }
}

fn points_for_step(step: f64) -> Result<usize, TrajectoryError> {
    if !(step > 0.0 && step <= 1.0) {
        return Err(TrajectoryError::InvalidStep(step));
    }
    Ok((1.0 / step + 1.0) as usize)
}

/// `n` evenly spaced values from `start` to `end`, both included.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    (0..n).map(move |k| {
        if k + 1 == n && n > 1 {
            end
        } else if n > 1 {
            start + (end - start) * k as f64 / (n - 1) as f64
        } else {
            start
        }
    })
}

/// Trajectory points for one flight, filled left to right by the phase engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryBuffer {
    layout: PhaseLayout,
    points: Vec<TrajectoryPoint>,
}

impl TrajectoryBuffer {
    pub fn new(layout: PhaseLayout) -> Self {
        Self {
            layout,
            points: vec![TrajectoryPoint::default(); layout.total()],
        }
    }

    pub fn layout(&self) -> PhaseLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    pub fn climb(&self) -> &[TrajectoryPoint] {
        &self.points[self.layout.climb_range()]
    }

    pub fn cruise(&self) -> &[TrajectoryPoint] {
        &self.points[self.layout.cruise_range()]
    }

    pub fn descent(&self) -> &[TrajectoryPoint] {
        &self.points[self.layout.descent_range()]
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    /// Fuel burned between the first and last points (kg).
    pub fn fuel_burned(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.fuel_mass - last.fuel_mass,
            _ => 0.0,
        }
    }

    pub(crate) fn point_mut(&mut self, index: usize) -> &mut TrajectoryPoint {
        &mut self.points[index]
    }

    /// Start a phase from the full state of the previous phase's last point.
    pub(crate) fn copy_point(&mut self, from: usize, to: usize) {
        self.points[to] = self.points[from];
    }

    pub(crate) fn clear(&mut self) {
        self.points.fill(TrajectoryPoint::default());
    }
}

impl Index<usize> for TrajectoryBuffer {
    type Output = TrajectoryPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}
