//! Great-circle distance between geographic coordinates

use haversine::{Location as HaversineLocation, Units, distance};

use crate::models::Coordinate;

/// Distance in kilometers between two points given in decimal degrees.
///
/// Haversine on a spherical Earth (radius 6371 km). Inputs are not
/// range-validated here; the API boundary owns that. Out-of-range degrees
/// produce a mathematically defined but meaningless result.
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lon1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}

/// Distance in kilometers between two validated coordinates
#[must_use]
pub fn between(from: &Coordinate, to: &Coordinate) -> f64 {
    distance_km(from.latitude, from.longitude, to.latitude, to.longitude)
}
