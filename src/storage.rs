//! Destination storage collaborator
//!
//! The engine consumes storage only as "a queryable collection of destination
//! records": one call returning a fully materialized, read-only snapshot.
//! The trait is the seam; the in-memory implementation backs the web layer
//! and tests. A relational implementation would slot in behind the same
//! trait without touching the engine.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::Result;
use crate::error::TripScoutError;
use crate::models::Destination;

/// Read/write access to the destination catalog
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Fetch a fully materialized snapshot of the catalog
    async fn fetch_destinations(&self) -> Result<Vec<Destination>>;

    /// Fetch a single destination by id
    async fn fetch_destination(&self, id: u64) -> Result<Option<Destination>>;

    /// Insert or replace a destination, keyed by id
    async fn upsert_destination(&self, destination: Destination) -> Result<()>;

    /// Rewrite a destination's popularity score
    async fn set_popularity_score(&self, id: u64, score: f64) -> Result<()>;

    /// Monotonic catalog version, bumped on every write. Cache fingerprints
    /// include it so stale entries age out on catalog changes.
    fn version(&self) -> u64;
}

/// In-memory catalog, suitable for seeded deployments and tests
#[derive(Default)]
pub struct InMemoryDestinationStore {
    destinations: RwLock<Vec<Destination>>,
    version: AtomicU64,
}

impl InMemoryDestinationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_destinations(destinations: Vec<Destination>) -> Self {
        Self {
            destinations: RwLock::new(destinations),
            version: AtomicU64::new(1),
        }
    }

    /// Load a catalog from a JSON array of destinations
    pub async fn load_from_json(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let destinations: Vec<Destination> = serde_json::from_str(&raw).map_err(|e| {
            TripScoutError::storage(format!(
                "failed to parse seed file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        info!(
            count = destinations.len(),
            path = %path.as_ref().display(),
            "loaded destination catalog"
        );
        Ok(Self::with_destinations(destinations))
    }
}

#[async_trait]
impl DestinationStore for InMemoryDestinationStore {
    async fn fetch_destinations(&self) -> Result<Vec<Destination>> {
        Ok(self.destinations.read().await.clone())
    }

    async fn fetch_destination(&self, id: u64) -> Result<Option<Destination>> {
        Ok(self
            .destinations
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn upsert_destination(&self, destination: Destination) -> Result<()> {
        let mut destinations = self.destinations.write().await;
        match destinations.iter_mut().find(|d| d.id == destination.id) {
            Some(existing) => *existing = destination,
            None => destinations.push(destination),
        }
        self.version.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn set_popularity_score(&self, id: u64, score: f64) -> Result<()> {
        let mut destinations = self.destinations.write().await;
        let destination = destinations.iter_mut().find(|d| d.id == id).ok_or_else(|| {
            TripScoutError::storage(format!("destination {id} not found"))
        })?;
        destination.popularity_score = score;
        self.version.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }
}

/// Popularity formula used by the maintenance job: rating carries half the
/// weight, review volume (capped at 100 reviews) under a third, and a flat
/// recency component the rest.
#[must_use]
pub fn recalculated_popularity(rating: Option<f64>, review_count: u32) -> f64 {
    let base = rating.unwrap_or(3.0) * 0.5;
    let reviews = (f64::from(review_count) / 100.0).min(1.0) * 0.3;
    let recency = 0.2;
    base + reviews + recency
}

/// Recompute and persist popularity scores for every destination.
///
/// An idempotent full recalculation intended for a scheduled or
/// administrative trigger, not for request-time ranking. Returns the number
/// of destinations updated.
pub async fn update_popularity_scores(store: &dyn DestinationStore) -> Result<usize> {
    let destinations = store.fetch_destinations().await?;
    for destination in &destinations {
        let score = recalculated_popularity(destination.rating, destination.review_count);
        store.set_popularity_score(destination.id, score).await?;
    }
    info!(count = destinations.len(), "recalculated popularity scores");
    Ok(destinations.len())
}
