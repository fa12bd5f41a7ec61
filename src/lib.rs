//! `TripScout` - Budget-aware travel destination recommendations
//!
//! This library provides the core functionality for trip cost estimation,
//! tiered transportation pricing and multi-factor destination ranking.

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod gazetteer;
pub mod models;
pub mod storage;
pub mod trip_cost;
pub mod web;

// Re-export core types for public API
pub use config::TripScoutConfig;
pub use engine::{
    BudgetBreakdown, RankingCriteria, Recommendation, SortBy, TransportEstimate,
    estimate_domestic_transport, estimate_transport, rank, synthesize,
};
pub use error::TripScoutError;
pub use models::{BudgetTier, Coordinate, Destination};
pub use storage::{DestinationStore, InMemoryDestinationStore};
pub use trip_cost::{TripCostEstimate, TripCostRequest, estimate_trip_cost};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
