//! The trip-cost and recommendation scoring engine
//!
//! Pure, synchronous, request-scoped computation: great-circle distances,
//! tiered transportation cost estimates, comprehensive budget synthesis and
//! multi-factor recommendation ranking. Nothing in here touches storage,
//! caches or the network.

pub mod budget;
pub mod geo;
pub mod ranker;
pub mod transport;

pub use budget::{BudgetBreakdown, synthesize};
pub use ranker::{
    Recommendation, RankingCriteria, SortBy, destinations_by_budget_range, rank,
    similar_destinations, trending_destinations,
};
pub use transport::{
    DomesticTransportEstimate, TransportEstimate, TransportMode, TransportOption,
    estimate_domestic_transport, estimate_transport,
};
