//! Coordinate model for validated geographic positions

use serde::{Deserialize, Serialize};

use crate::error::TripScoutError;

/// A validated (latitude, longitude) pair in decimal degrees
///
/// Construction through [`Coordinate::new`] enforces the valid ranges; out of
/// range values are a caller error, never silently clamped.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, in [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, in [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate, validating both ranges
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, TripScoutError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(TripScoutError::validation(format!(
                "latitude {latitude} is out of range [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(TripScoutError::validation(format!(
                "longitude {longitude} is out of range [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as a human-readable coordinate string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::new(19.0760, 72.8777).unwrap();
        assert_eq!(c.latitude, 19.0760);
        assert_eq!(c.longitude, 72.8777);
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_format() {
        let c = Coordinate::new(46.8182, 8.2275).unwrap();
        assert_eq!(c.format_coordinates(), "46.8182, 8.2275");
    }
}
