//! Built-in city gazetteer: coordinates and cost-of-living indices
//!
//! A deterministic local fallback for resolving city names when no external
//! geocoding collaborator is wired in. Lookups are case-insensitive and fall
//! back to substring matching in both directions, so "navi mumbai" still
//! resolves against the "mumbai" entry.

use crate::models::Coordinate;

/// Known city coordinates, keyed by lowercase name
const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    // India
    ("mumbai", 19.0760, 72.8777),
    ("delhi", 28.7041, 77.1025),
    ("bangalore", 12.9716, 77.5946),
    ("bengaluru", 12.9716, 77.5946),
    ("chennai", 13.0827, 80.2707),
    ("kolkata", 22.5726, 88.3639),
    ("hyderabad", 17.3850, 78.4867),
    ("pune", 18.5204, 73.8567),
    ("ahmedabad", 23.0225, 72.5714),
    ("jaipur", 26.9124, 75.7873),
    ("goa", 15.2993, 74.1240),
    ("kerala", 10.8505, 76.2711),
    // Asia
    ("bangkok", 13.7563, 100.5018),
    ("tokyo", 35.6762, 139.6503),
    ("singapore", 1.3521, 103.8198),
    ("hong kong", 22.3193, 114.1694),
    ("seoul", 37.5665, 126.9780),
    ("beijing", 39.9042, 116.4074),
    ("shanghai", 31.2304, 121.4737),
    ("kuala lumpur", 3.1390, 101.6869),
    ("bali", -8.3405, 115.0920),
    ("dubai", 25.2048, 55.2708),
    // Europe
    ("london", 51.5074, -0.1278),
    ("paris", 48.8566, 2.3522),
    ("rome", 41.9028, 12.4964),
    ("barcelona", 41.3851, 2.1734),
    ("amsterdam", 52.3676, 4.9041),
    ("berlin", 52.5200, 13.4050),
    // Americas
    ("new york", 40.7128, -74.0060),
    ("los angeles", 34.0522, -118.2437),
    ("san francisco", 37.7749, -122.4194),
    ("miami", 25.7617, -80.1918),
    ("toronto", 43.6532, -79.3832),
];

/// Cost-of-living indices, normalized so that Mumbai = 100
const COST_OF_LIVING_INDEX: &[(&str, f64)] = &[
    // India
    ("mumbai", 100.0),
    ("delhi", 95.0),
    ("bangalore", 98.0),
    ("bengaluru", 98.0),
    ("chennai", 85.0),
    ("kolkata", 80.0),
    ("hyderabad", 90.0),
    ("pune", 92.0),
    ("ahmedabad", 80.0),
    ("jaipur", 75.0),
    ("goa", 110.0),
    ("kerala", 85.0),
    // Asia
    ("bangkok", 85.0),
    ("tokyo", 180.0),
    ("singapore", 165.0),
    ("hong kong", 170.0),
    ("seoul", 150.0),
    ("beijing", 120.0),
    ("shanghai", 130.0),
    ("kuala lumpur", 75.0),
    ("bali", 70.0),
    ("phuket", 80.0),
    ("hanoi", 65.0),
    ("ho chi minh", 70.0),
    ("dubai", 140.0),
    ("istanbul", 90.0),
    ("manila", 70.0),
    // Europe
    ("london", 190.0),
    ("paris", 180.0),
    ("rome", 160.0),
    ("barcelona", 155.0),
    ("amsterdam", 175.0),
    ("berlin", 165.0),
    ("vienna", 160.0),
    ("prague", 120.0),
    ("budapest", 100.0),
    ("madrid", 150.0),
    ("lisbon", 130.0),
    ("athens", 120.0),
    // Americas
    ("new york", 200.0),
    ("los angeles", 185.0),
    ("san francisco", 195.0),
    ("chicago", 170.0),
    ("miami", 165.0),
    ("toronto", 170.0),
    ("vancouver", 175.0),
    ("mexico city", 85.0),
    ("cancun", 95.0),
    ("rio de janeiro", 90.0),
    ("buenos aires", 80.0),
    ("lima", 75.0),
    // Oceania
    ("sydney", 180.0),
    ("melbourne", 175.0),
    ("auckland", 170.0),
    // Africa
    ("cape town", 95.0),
    ("cairo", 70.0),
    ("marrakech", 75.0),
    ("nairobi", 80.0),
];

/// Resolve a city name to coordinates from the built-in table.
///
/// Exact match first, then substring match in either direction.
#[must_use]
pub fn geocode_city(name: &str) -> Option<Coordinate> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let entry = CITY_COORDINATES
        .iter()
        .find(|(city, _, _)| *city == needle)
        .or_else(|| {
            CITY_COORDINATES
                .iter()
                .find(|(city, _, _)| needle.contains(city) || city.contains(&needle))
        })?;

    Coordinate::new(entry.1, entry.2).ok()
}

/// Cost-of-living index for a destination, scaled so Mumbai is 1.0.
///
/// Unknown destinations get the neutral index 1.0.
#[must_use]
pub fn cost_index(destination: &str) -> f64 {
    let needle = destination.trim().to_lowercase();
    if needle.is_empty() {
        return 1.0;
    }

    let found = COST_OF_LIVING_INDEX
        .iter()
        .find(|(city, _)| *city == needle)
        .or_else(|| {
            COST_OF_LIVING_INDEX
                .iter()
                .find(|(city, _)| needle.contains(city) || city.contains(&needle))
        });

    match found {
        Some((_, index)) => index / 100.0,
        None => {
            tracing::debug!(destination, "no cost index entry, using neutral 1.0");
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_geocode() {
        let mumbai = geocode_city("Mumbai").unwrap();
        assert_eq!(mumbai.latitude, 19.0760);
        assert_eq!(mumbai.longitude, 72.8777);
    }

    #[test]
    fn test_substring_geocode() {
        let navi = geocode_city("Navi Mumbai").unwrap();
        assert_eq!(navi.latitude, 19.0760);
    }

    #[test]
    fn test_unknown_city() {
        assert!(geocode_city("Atlantis").is_none());
        assert!(geocode_city("").is_none());
    }

    #[test]
    fn test_cost_index_anchor_and_scaling() {
        assert_eq!(cost_index("mumbai"), 1.0);
        assert_eq!(cost_index("Tokyo"), 1.8);
        assert_eq!(cost_index("bali"), 0.7);
    }

    #[test]
    fn test_cost_index_default() {
        assert_eq!(cost_index("nowhere in particular"), 1.0);
        assert_eq!(cost_index(""), 1.0);
    }
}
