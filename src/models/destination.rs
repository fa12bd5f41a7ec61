//! Destination catalog entry and budget tier models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TripScoutError;

/// Spending tier used as a cost multiplier selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "budget")]
    Budget,
    #[default]
    #[serde(rename = "mid-range")]
    MidRange,
    #[serde(rename = "luxury")]
    Luxury,
}

impl BudgetTier {
    /// Canonical string form, as stored in the catalog
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "budget",
            BudgetTier::MidRange => "mid-range",
            BudgetTier::Luxury => "luxury",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetTier {
    type Err = TripScoutError;

    /// Parse a tier label. Unknown labels are rejected rather than silently
    /// mapped to mid-range; a *missing* tier defaults to mid-range at the
    /// call site instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(BudgetTier::Budget),
            "mid-range" | "midrange" => Ok(BudgetTier::MidRange),
            "luxury" => Ok(BudgetTier::Luxury),
            other => Err(TripScoutError::validation(format!(
                "unknown budget tier '{other}', expected one of: budget, mid-range, luxury"
            ))),
        }
    }
}

/// A curated travel destination from the catalog
///
/// Read-only as far as the scoring engine is concerned; the only field ever
/// rewritten is `popularity_score`, and only by the maintenance job in
/// [`crate::storage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub budget_tier: Option<BudgetTier>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Average daily spend at the destination, in the reference currency
    #[serde(default)]
    pub average_cost_per_day: Option<f64>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    /// Average visitor rating in [1, 5]
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub popularity_score: f64,
    /// Comma-separated tag string, e.g. `"beach,adventure,culture"`
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub estimated_duration_hours: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Destination {
    /// Both coordinates, if the destination is geolocated
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// The budget tier, defaulting to mid-range when the catalog has none
    #[must_use]
    pub fn tier_or_default(&self) -> BudgetTier {
        self.budget_tier.unwrap_or_default()
    }

    /// Split the stored tag string into individual tags
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(|t| {
                t.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Substring tag matching against the raw stored string.
    ///
    /// Known imprecision carried over from the catalog format: a requested
    /// tag matches anywhere in the comma-separated string, so `art` also
    /// matches a stored `party` tag.
    #[must_use]
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .is_some_and(|stored| stored.contains(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destination_with_tags(tags: &str) -> Destination {
        Destination {
            id: 1,
            title: "Test".to_string(),
            description: None,
            category: None,
            budget_tier: None,
            latitude: None,
            longitude: None,
            website: None,
            country: None,
            city: None,
            average_cost_per_day: None,
            best_time_to_visit: None,
            rating: None,
            review_count: 0,
            popularity_score: 0.0,
            tags: Some(tags.to_string()),
            estimated_duration_hours: None,
            created_at: None,
        }
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("budget".parse::<BudgetTier>().unwrap(), BudgetTier::Budget);
        assert_eq!(
            "Mid-Range".parse::<BudgetTier>().unwrap(),
            BudgetTier::MidRange
        );
        assert_eq!("luxury".parse::<BudgetTier>().unwrap(), BudgetTier::Luxury);
        assert!("premium".parse::<BudgetTier>().is_err());
    }

    #[test]
    fn test_tier_default_is_mid_range() {
        assert_eq!(BudgetTier::default(), BudgetTier::MidRange);
    }

    #[test]
    fn test_tag_list_splits_and_trims() {
        let dest = destination_with_tags("beach, adventure ,culture,");
        assert_eq!(dest.tag_list(), vec!["beach", "adventure", "culture"]);
    }

    #[test]
    fn test_tag_matching_is_substring_based() {
        let dest = destination_with_tags("party,nightlife");
        // Deliberate substring semantics: "art" matches inside "party".
        assert!(dest.matches_tag("art"));
        assert!(dest.matches_tag("nightlife"));
        assert!(!dest.matches_tag("beach"));
    }

    #[test]
    fn test_coordinates_require_both_fields() {
        let mut dest = destination_with_tags("");
        assert_eq!(dest.coordinates(), None);
        dest.latitude = Some(19.0);
        assert_eq!(dest.coordinates(), None);
        dest.longitude = Some(72.8);
        assert_eq!(dest.coordinates(), Some((19.0, 72.8)));
    }
}
