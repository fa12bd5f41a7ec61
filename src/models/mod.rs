//! Data models for destinations, coordinates and budget tiers
//!
//! These are explicit optional-field value types: every attribute that may be
//! absent in the catalog is an `Option`, so the "or default" fallbacks in the
//! scoring engine stay visible at the call site.

mod coordinate;
mod destination;

pub use coordinate::Coordinate;
pub use destination::{BudgetTier, Destination};
