//! HTTP API surface
//!
//! Thin glue over the engine: parse and validate request parameters, fetch a
//! catalog snapshot, call the pure scoring functions, shape JSON. Request
//! validation happens here, at the boundary, not inside the engine.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::config::TripScoutConfig;
use crate::engine::{
    self, DomesticTransportEstimate, RankingCriteria, Recommendation, SortBy, TransportEstimate,
};
use crate::error::TripScoutError;
use crate::models::{BudgetTier, Coordinate, Destination};
use crate::storage::DestinationStore;
use crate::{cache, gazetteer, trip_cost};

/// Shared state for all API handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DestinationStore>,
    pub config: Arc<TripScoutConfig>,
}

/// JSON error payload with an HTTP status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request<S: Into<String>>(message: S) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<TripScoutError> for ApiError {
    fn from(err: TripScoutError) -> Self {
        let status = match &err {
            TripScoutError::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.user_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/recommendations", get(get_recommendations))
        .route("/recommendations/trending", get(get_trending))
        .route("/recommendations/similar/{id}", get(get_similar))
        .route("/recommendations/budget/{min}/{max}", get(get_budget_range))
        .route("/transport-estimate", get(get_transport_estimate))
        .route("/trip-cost", post(post_trip_cost))
        .route(
            "/maintenance/recalculate-popularity",
            post(post_recalculate_popularity),
        )
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationsQuery {
    pub user_lat: Option<f64>,
    pub user_lon: Option<f64>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    /// Comma-separated category list
    pub categories: Option<String>,
    /// Comma-separated tag list
    pub tags: Option<String>,
    pub min_rating: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub limit: Option<usize>,
    pub sort_by: Option<String>,
    pub trip_duration_days: Option<i32>,
}

#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
    pub count: usize,
    pub currency: String,
    pub trip_duration_days: i32,
}

fn split_csv(raw: &Option<String>) -> Option<Vec<String>> {
    let values: Vec<String> = raw
        .as_deref()?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() { None } else { Some(values) }
}

/// Turn validated query parameters into engine criteria
fn build_criteria(
    query: &RecommendationsQuery,
    config: &TripScoutConfig,
) -> Result<RankingCriteria, TripScoutError> {
    let user_location = match (query.user_lat, query.user_lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
        (None, None) => None,
        _ => {
            return Err(TripScoutError::validation(
                "user_lat and user_lon must be provided together",
            ));
        }
    };

    let trip_duration_days = match query.trip_duration_days {
        Some(days) if days > 0 => days,
        Some(days) => {
            return Err(TripScoutError::validation(format!(
                "trip_duration_days must be positive, got {days}"
            )));
        }
        None => config.defaults.trip_duration_days as i32,
    };

    if let Some(max) = query.max_distance_km {
        if !max.is_finite() || max <= 0.0 {
            return Err(TripScoutError::validation(format!(
                "max_distance_km must be positive, got {max}"
            )));
        }
    }

    let sort_by = match &query.sort_by {
        Some(raw) => raw.parse::<SortBy>()?,
        None => SortBy::default(),
    };

    Ok(RankingCriteria {
        user_location,
        budget_min: query.budget_min,
        budget_max: query.budget_max,
        categories: split_csv(&query.categories),
        tags: split_csv(&query.tags),
        min_rating: query.min_rating,
        max_distance_km: query.max_distance_km,
        sort_by,
        limit: query
            .limit
            .unwrap_or(config.defaults.recommendation_limit as usize),
        trip_duration_days,
        currency: config.defaults.currency.clone(),
    })
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let criteria = build_criteria(&query, &state.config)?;

    let use_cache = state.config.cache.enabled && cache::is_initialized();
    let fingerprint = cache::ranking_fingerprint(state.store.version(), &criteria);

    if use_cache {
        match cache::get::<Vec<Recommendation>>(&fingerprint).await {
            Ok(Some(cached)) => {
                return Ok(Json(RecommendationsResponse {
                    count: cached.len(),
                    currency: criteria.currency,
                    trip_duration_days: criteria.trip_duration_days,
                    recommendations: cached,
                }));
            }
            Ok(None) => {}
            Err(e) => warn!("recommendation cache lookup failed: {e:#}"),
        }
    }

    let candidates = state.store.fetch_destinations().await?;
    let recommendations = engine::rank(&candidates, &criteria);

    if use_cache {
        let ttl = Duration::from_secs(u64::from(state.config.cache.ttl_hours) * 3600);
        if let Err(e) =
            cache::put(&fingerprint, recommendations.clone(), cache::jittered(ttl)).await
        {
            warn!("recommendation cache write failed: {e:#}");
        }
    }

    Ok(Json(RecommendationsResponse {
        count: recommendations.len(),
        currency: criteria.currency,
        trip_duration_days: criteria.trip_duration_days,
        recommendations,
    }))
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

async fn get_trending(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Destination>>, ApiError> {
    let candidates = state.store.fetch_destinations().await?;
    let limit = query
        .limit
        .unwrap_or(state.config.defaults.recommendation_limit as usize);
    Ok(Json(engine::trending_destinations(&candidates, limit)))
}

async fn get_similar(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Destination>>, ApiError> {
    let candidates = state.store.fetch_destinations().await?;
    let limit = query.limit.unwrap_or(5);
    // An unknown id yields an empty list, not an error.
    Ok(Json(engine::similar_destinations(&candidates, id, limit)))
}

async fn get_budget_range(
    State(state): State<AppState>,
    Path((min_budget, max_budget)): Path<(f64, f64)>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Destination>>, ApiError> {
    if min_budget < 0.0 || max_budget < min_budget {
        return Err(ApiError::bad_request(
            "budget range must satisfy 0 <= min <= max",
        ));
    }
    let candidates = state.store.fetch_destinations().await?;
    let limit = query
        .limit
        .unwrap_or(state.config.defaults.recommendation_limit as usize);
    Ok(Json(engine::destinations_by_budget_range(
        &candidates,
        min_budget,
        max_budget,
        limit,
    )))
}

#[derive(Debug, Deserialize)]
pub struct TransportEstimateQuery {
    pub distance_km: f64,
    /// Use the detailed domestic tier table instead of the reference table
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum TransportEstimateResponse {
    Reference(TransportEstimate),
    Domestic(DomesticTransportEstimate),
}

async fn get_transport_estimate(
    Query(query): Query<TransportEstimateQuery>,
) -> Result<Json<TransportEstimateResponse>, ApiError> {
    if !query.distance_km.is_finite() || query.distance_km < 0.0 {
        return Err(ApiError::bad_request(format!(
            "distance_km must be non-negative, got {}",
            query.distance_km
        )));
    }
    let response = if query.detailed {
        TransportEstimateResponse::Domestic(engine::estimate_domestic_transport(query.distance_km))
    } else {
        TransportEstimateResponse::Reference(engine::estimate_transport(query.distance_km))
    };
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct TripCostBody {
    pub destination: String,
    pub duration_days: Option<i32>,
    pub budget: Option<String>,
    pub travelers: Option<u32>,
    /// Traveler's home city, geocoded against the built-in gazetteer
    pub origin_city: Option<String>,
    pub origin_lat: Option<f64>,
    pub origin_lon: Option<f64>,
}

async fn post_trip_cost(
    State(state): State<AppState>,
    Json(body): Json<TripCostBody>,
) -> Result<Json<trip_cost::TripCostEstimate>, ApiError> {
    let destination = body.destination.trim().to_string();
    if destination.is_empty() {
        return Err(ApiError::bad_request("destination is required"));
    }

    let duration_days = body
        .duration_days
        .unwrap_or(state.config.defaults.trip_duration_days as i32);
    if duration_days <= 0 {
        return Err(ApiError::bad_request(format!(
            "duration_days must be positive, got {duration_days}"
        )));
    }

    let travelers = body.travelers.unwrap_or(1);
    if travelers == 0 {
        return Err(ApiError::bad_request("travelers must be at least 1"));
    }

    let budget_tier = match &body.budget {
        Some(raw) => raw.parse::<BudgetTier>().map_err(ApiError::from)?,
        None => BudgetTier::default(),
    };

    let origin = match (body.origin_lat, body.origin_lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon).map_err(ApiError::from)?),
        (None, None) => body
            .origin_city
            .as_deref()
            .and_then(gazetteer::geocode_city),
        _ => {
            return Err(ApiError::bad_request(
                "origin_lat and origin_lon must be provided together",
            ));
        }
    };

    // Prefer catalog coordinates for known destinations, then fall back to
    // the gazetteer.
    let catalog = state.store.fetch_destinations().await.map_err(ApiError::from)?;
    let destination_coordinates = find_destination_coordinates(&catalog, &destination)
        .or_else(|| gazetteer::geocode_city(&destination));

    let request = trip_cost::TripCostRequest {
        destination,
        duration_days,
        budget_tier,
        travelers,
        origin,
        destination_coordinates,
    };
    Ok(Json(trip_cost::estimate_trip_cost(&request)))
}

#[derive(Serialize)]
pub struct MaintenanceResponse {
    pub updated: usize,
}

/// Administrative trigger for the idempotent popularity recalculation
async fn post_recalculate_popularity(
    State(state): State<AppState>,
) -> Result<Json<MaintenanceResponse>, ApiError> {
    let updated = crate::storage::update_popularity_scores(state.store.as_ref()).await?;
    Ok(Json(MaintenanceResponse { updated }))
}

/// Case-insensitive substring match of a destination name against catalog
/// titles, returning the first geolocated hit
fn find_destination_coordinates(catalog: &[Destination], name: &str) -> Option<Coordinate> {
    let needle = name.to_lowercase();
    catalog
        .iter()
        .filter(|d| d.title.to_lowercase().contains(&needle))
        .find_map(|d| {
            let (lat, lon) = d.coordinates()?;
            Coordinate::new(lat, lon).ok()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> RecommendationsQuery {
        RecommendationsQuery::default()
    }

    #[test]
    fn test_build_criteria_defaults() {
        let config = TripScoutConfig::default();
        let criteria = build_criteria(&query(), &config).unwrap();
        assert_eq!(criteria.limit, 10);
        assert_eq!(criteria.trip_duration_days, 3);
        assert_eq!(criteria.sort_by, SortBy::Popularity);
        assert_eq!(criteria.currency, "USD");
        assert!(criteria.user_location.is_none());
    }

    #[test]
    fn test_build_criteria_rejects_partial_coordinates() {
        let config = TripScoutConfig::default();
        let mut q = query();
        q.user_lat = Some(19.0);
        let err = build_criteria(&q, &config).unwrap_err();
        assert!(matches!(err, TripScoutError::Validation { .. }));
    }

    #[test]
    fn test_build_criteria_rejects_out_of_range_coordinates() {
        let config = TripScoutConfig::default();
        let mut q = query();
        q.user_lat = Some(120.0);
        q.user_lon = Some(30.0);
        assert!(build_criteria(&q, &config).is_err());
    }

    #[test]
    fn test_build_criteria_rejects_bad_duration_and_distance() {
        let config = TripScoutConfig::default();

        let mut q = query();
        q.trip_duration_days = Some(-2);
        assert!(build_criteria(&q, &config).is_err());

        let mut q = query();
        q.max_distance_km = Some(0.0);
        assert!(build_criteria(&q, &config).is_err());
    }

    #[test]
    fn test_build_criteria_rejects_unknown_sort() {
        let config = TripScoutConfig::default();
        let mut q = query();
        q.sort_by = Some("alphabetical".to_string());
        assert!(build_criteria(&q, &config).is_err());

        q.sort_by = Some("rating".to_string());
        let criteria = build_criteria(&q, &config).unwrap();
        assert_eq!(criteria.sort_by, SortBy::Rating);
    }

    #[test]
    fn test_split_csv() {
        assert_eq!(
            split_csv(&Some("beach, culture ,food".to_string())),
            Some(vec![
                "beach".to_string(),
                "culture".to_string(),
                "food".to_string()
            ])
        );
        assert_eq!(split_csv(&Some(" , ".to_string())), None);
        assert_eq!(split_csv(&None), None);
    }

    #[test]
    fn test_find_destination_coordinates() {
        let mut goa = Destination {
            id: 1,
            title: "Goa Beaches".to_string(),
            description: None,
            category: None,
            budget_tier: None,
            latitude: Some(15.2993),
            longitude: Some(74.1240),
            website: None,
            country: None,
            city: None,
            average_cost_per_day: None,
            best_time_to_visit: None,
            rating: None,
            review_count: 0,
            popularity_score: 0.0,
            tags: None,
            estimated_duration_hours: None,
            created_at: None,
        };

        let found = find_destination_coordinates(std::slice::from_ref(&goa), "goa").unwrap();
        assert_eq!(found.latitude, 15.2993);

        goa.latitude = None;
        assert!(find_destination_coordinates(&[goa], "goa").is_none());
    }
}
