//! Multi-factor destination recommendation ranking
//!
//! A pure pass over a materialized destination snapshot: filter, score, sort,
//! truncate. No storage access and no shared state; concurrent ranking
//! requests need no coordination.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::budget::{self, BudgetBreakdown};
use crate::engine::geo;
use crate::engine::transport::TransportEstimate;
use crate::error::TripScoutError;
use crate::models::{BudgetTier, Coordinate, Destination};

/// Requested sort order for ranked recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Composite recommendation score, descending (the default)
    #[default]
    Popularity,
    /// Rating descending, unrated destinations last
    Rating,
    /// Average daily cost ascending, unpriced destinations last
    Cost,
    /// Distance ascending; only meaningful with a user location
    Distance,
}

impl FromStr for SortBy {
    type Err = TripScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popularity" => Ok(SortBy::Popularity),
            "rating" => Ok(SortBy::Rating),
            "cost" => Ok(SortBy::Cost),
            "distance" => Ok(SortBy::Distance),
            other => Err(TripScoutError::validation(format!(
                "unknown sort order '{other}', expected one of: popularity, rating, cost, distance"
            ))),
        }
    }
}

/// Filter and sort criteria for a ranking request
///
/// All filters are optional and AND-combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingCriteria {
    /// User position; enables distance computation and filtering
    pub user_location: Option<Coordinate>,
    /// Minimum `average_cost_per_day`, inclusive
    pub budget_min: Option<f64>,
    /// Maximum `average_cost_per_day`, inclusive
    pub budget_max: Option<f64>,
    /// Category membership filter
    pub categories: Option<Vec<String>>,
    /// Match-any tag filter with substring semantics
    pub tags: Option<Vec<String>>,
    /// Minimum rating, inclusive
    pub min_rating: Option<f64>,
    /// Maximum distance from the user; excludes candidates whose distance
    /// cannot be computed
    pub max_distance_km: Option<f64>,
    pub sort_by: SortBy,
    /// Result cap, applied strictly after sorting
    pub limit: usize,
    /// Trip length used for budget synthesis
    pub trip_duration_days: i32,
    /// Pass-through currency label attached to every recommendation
    pub currency: String,
}

impl Default for RankingCriteria {
    fn default() -> Self {
        Self {
            user_location: None,
            budget_min: None,
            budget_max: None,
            categories: None,
            tags: None,
            min_rating: None,
            max_distance_km: None,
            sort_by: SortBy::default(),
            limit: 10,
            trip_duration_days: 3,
            currency: "USD".to_string(),
        }
    }
}

/// A scored destination, request-scoped and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub budget_tier: Option<BudgetTier>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub website: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub average_cost_per_day: Option<f64>,
    pub best_time_to_visit: Option<String>,
    pub rating: Option<f64>,
    pub review_count: u32,
    pub popularity_score: f64,
    pub tags: Vec<String>,
    pub estimated_duration_hours: Option<f64>,
    /// Distance from the user, rounded to 1 decimal; `None` when either
    /// side lacks coordinates
    pub distance_km: Option<f64>,
    pub trip_duration_days: i32,
    pub currency: String,
    /// Composite score, rounded to 2 decimals
    pub recommendation_score: f64,
    pub created_at: Option<DateTime<Utc>>,
    /// Full breakdown; `None` when distance or daily cost is missing
    pub budget_breakdown: Option<BudgetBreakdown>,
    pub transportation_options: Option<TransportEstimate>,
    pub total_trip_cost: Option<f64>,
    pub estimated_cost_per_day: Option<f64>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn passes_filters(dest: &Destination, criteria: &RankingCriteria) -> bool {
    if let Some(min) = criteria.budget_min {
        match dest.average_cost_per_day {
            Some(cost) if cost >= min => {}
            _ => return false,
        }
    }
    if let Some(max) = criteria.budget_max {
        match dest.average_cost_per_day {
            Some(cost) if cost <= max => {}
            _ => return false,
        }
    }
    if let Some(categories) = &criteria.categories {
        match &dest.category {
            Some(category) if categories.iter().any(|c| c == category) => {}
            _ => return false,
        }
    }
    if let Some(min) = criteria.min_rating {
        match dest.rating {
            Some(rating) if rating >= min => {}
            _ => return false,
        }
    }
    if let Some(tags) = &criteria.tags {
        if !tags.iter().any(|t| dest.matches_tag(t)) {
            return false;
        }
    }
    true
}

/// Score one candidate; `None` when the distance filter excludes it
fn score_candidate(dest: &Destination, criteria: &RankingCriteria) -> Option<Recommendation> {
    let distance = match (criteria.user_location, dest.coordinates()) {
        (Some(user), Some((lat, lon))) => {
            Some(geo::distance_km(user.latitude, user.longitude, lat, lon))
        }
        _ => None,
    };

    // Distance filtering requires a known distance; candidates missing
    // either side's coordinates are excluded, never scored at distance zero.
    if let Some(max) = criteria.max_distance_km {
        match distance {
            Some(d) if d <= max => {}
            _ => return None,
        }
    }

    let budget_breakdown = match (distance, dest.average_cost_per_day) {
        (Some(d), Some(cost)) if cost > 0.0 => Some(budget::synthesize(
            d,
            criteria.trip_duration_days,
            cost,
            dest.tier_or_default(),
        )),
        _ => None,
    };
    let total_trip_cost = budget_breakdown.as_ref().map(|b| b.total);

    // 40% popularity, 30% rating, plus a small review-volume bonus.
    let mut score = dest.popularity_score * 0.4
        + dest.rating.unwrap_or(3.0) * 0.3
        + f64::from(dest.review_count) * 0.01;

    // 20% affordability: normalized against a 5000-unit "expensive trip"
    // when a full budget exists, daily-cost fallback otherwise.
    score += match total_trip_cost {
        Some(total) => ((5000.0 - total) / 5000.0).max(0.0) * 5.0 * 0.2,
        None => (5.0 - dest.average_cost_per_day.unwrap_or(100.0) / 50.0) * 0.2,
    };

    // 10% proximity bonus, only when a distance cap is in play.
    if let (Some(d), Some(max)) = (distance, criteria.max_distance_km) {
        if max > 0.0 {
            score += ((max - d) / max).max(0.0) * 0.1;
        }
    }

    Some(Recommendation {
        id: dest.id,
        title: dest.title.clone(),
        description: dest.description.clone(),
        category: dest.category.clone(),
        budget_tier: dest.budget_tier,
        latitude: dest.latitude,
        longitude: dest.longitude,
        website: dest.website.clone(),
        country: dest.country.clone(),
        city: dest.city.clone(),
        average_cost_per_day: dest.average_cost_per_day,
        best_time_to_visit: dest.best_time_to_visit.clone(),
        rating: dest.rating,
        review_count: dest.review_count,
        popularity_score: dest.popularity_score,
        tags: dest.tag_list(),
        estimated_duration_hours: dest.estimated_duration_hours,
        distance_km: distance.map(round1),
        trip_duration_days: criteria.trip_duration_days,
        currency: criteria.currency.clone(),
        recommendation_score: round2(score),
        created_at: dest.created_at,
        estimated_cost_per_day: budget_breakdown.as_ref().map(|b| b.per_day_average),
        transportation_options: budget_breakdown
            .as_ref()
            .map(|b| b.transportation_options.clone()),
        budget_breakdown,
        total_trip_cost,
    })
}

/// Rank a candidate snapshot: filter, score, sort, truncate to the limit.
///
/// Sorting is stable, so ties preserve the candidates' input order. The
/// limit is applied only after the full filtered set has been scored and
/// sorted.
#[must_use]
pub fn rank(candidates: &[Destination], criteria: &RankingCriteria) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = candidates
        .iter()
        .filter(|d| passes_filters(d, criteria))
        .filter_map(|d| score_candidate(d, criteria))
        .collect();

    match criteria.sort_by {
        SortBy::Distance if criteria.user_location.is_some() => {
            recommendations.sort_by(|a, b| {
                a.distance_km
                    .unwrap_or(f64::INFINITY)
                    .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
            });
        }
        SortBy::Rating => {
            recommendations.sort_by(|a, b| {
                b.rating
                    .unwrap_or(0.0)
                    .total_cmp(&a.rating.unwrap_or(0.0))
            });
        }
        SortBy::Cost => {
            recommendations.sort_by(|a, b| {
                a.average_cost_per_day
                    .unwrap_or(f64::INFINITY)
                    .total_cmp(&b.average_cost_per_day.unwrap_or(f64::INFINITY))
            });
        }
        // Popularity, and distance without a user location to measure from.
        _ => {
            recommendations
                .sort_by(|a, b| b.recommendation_score.total_cmp(&a.recommendation_score));
        }
    }

    recommendations.truncate(criteria.limit);
    recommendations
}

/// Destinations similar to the given one: same category and overlapping
/// tags, where each condition applies only if the source destination has
/// that field. Capped, input order preserved.
#[must_use]
pub fn similar_destinations(
    candidates: &[Destination],
    destination_id: u64,
    limit: usize,
) -> Vec<Destination> {
    let Some(source) = candidates.iter().find(|d| d.id == destination_id) else {
        return Vec::new();
    };
    let source_tags = source.tag_list();

    candidates
        .iter()
        .filter(|d| d.id != destination_id)
        .filter(|d| match &source.category {
            Some(category) => d.category.as_deref() == Some(category.as_str()),
            None => true,
        })
        .filter(|d| {
            source_tags.is_empty() || source_tags.iter().any(|t| d.matches_tag(t))
        })
        .take(limit)
        .cloned()
        .collect()
}

/// Trending destinations: positive popularity, most popular first
#[must_use]
pub fn trending_destinations(candidates: &[Destination], limit: usize) -> Vec<Destination> {
    let mut trending: Vec<Destination> = candidates
        .iter()
        .filter(|d| d.popularity_score > 0.0)
        .cloned()
        .collect();
    trending.sort_by(|a, b| b.popularity_score.total_cmp(&a.popularity_score));
    trending.truncate(limit);
    trending
}

/// Destinations whose daily cost falls inside an inclusive range, best
/// rated first; unrated destinations sort last
#[must_use]
pub fn destinations_by_budget_range(
    candidates: &[Destination],
    min_budget: f64,
    max_budget: f64,
    limit: usize,
) -> Vec<Destination> {
    let mut matches: Vec<Destination> = candidates
        .iter()
        .filter(|d| {
            d.average_cost_per_day
                .is_some_and(|c| c >= min_budget && c <= max_budget)
        })
        .cloned()
        .collect();
    matches.sort_by(|a, b| {
        b.rating
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.rating.unwrap_or(f64::NEG_INFINITY))
    });
    matches.truncate(limit);
    matches
}
