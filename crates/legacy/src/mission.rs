//! Origin/destination description of one flight.

use aeic_core::geo::{great_circle_distance, intermediate_point};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Longitude/latitude in degrees and altitude (field elevation) in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
    pub alt_m: f64,
}

impl Position {
    pub fn new(lon: f64, lat: f64, alt_m: f64) -> Self {
        Self { lon, lat, alt_m }
    }
}

/// A single flight between two airports.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub name: Option<String>,
    pub origin: Position,
    pub destination: Position,
    /// Fraction of the maximum payload carried.
    pub load_factor: f64,
    pub departure: Option<NaiveDateTime>,
}

impl Mission {
    pub fn new(origin: Position, destination: Position, load_factor: f64) -> Self {
        Self {
            name: None,
            origin,
            destination,
            load_factor,
            departure: None,
        }
    }

    /// Great-circle distance between the airports (m).
    pub fn great_circle_distance_m(&self) -> f64 {
        great_circle_distance(
            self.origin.lon,
            self.origin.lat,
            self.destination.lon,
            self.destination.lat,
        )
    }

    /// Lon/lat on the great-circle route after `ground_distance_m` has been flown.
    pub fn position_at(&self, ground_distance_m: f64) -> (f64, f64) {
        let total = self.great_circle_distance_m();
        if total <= 0.0 {
            return (self.origin.lon, self.origin.lat);
        }
        intermediate_point(
            self.origin.lon,
            self.origin.lat,
            self.destination.lon,
            self.destination.lat,
            ground_distance_m / total,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_positions_follow_the_great_circle() {
        let mission = Mission::new(
            Position::new(0.0, 0.0, 0.0),
            Position::new(10.0, 0.0, 0.0),
            0.8,
        );
        let total = mission.great_circle_distance_m();
        assert!((total - 1_111_949.0).abs() < 10.0, "got {total}");

        let (lon, lat) = mission.position_at(total / 2.0);
        assert!((lon - 5.0).abs() < 1e-9 && lat.abs() < 1e-9);

        // beyond the destination clamps to it
        let (lon, _) = mission.position_at(total * 1.5);
        assert!((lon - 10.0).abs() < 1e-9);
    }
}
