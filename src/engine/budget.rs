//! Comprehensive trip budget synthesis
//!
//! Turns a distance, a trip duration and a destination's daily cost into a
//! full cost breakdown. The multipliers here are part of the contract: the
//! recommendation ranker's affordability component is calibrated against the
//! totals this module produces.

use serde::{Deserialize, Serialize};

use crate::engine::transport::{self, TransportEstimate};
use crate::models::BudgetTier;

/// Immutable computed cost breakdown, re-derived per request
///
/// All monetary fields are rounded to 2 decimals at the point of output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    /// Round-trip transportation via the recommended mode
    pub transportation: f64,
    /// The one-way option set the transportation figure was derived from
    pub transportation_options: TransportEstimate,
    pub accommodation: f64,
    pub accommodation_per_night: f64,
    pub food: f64,
    pub food_per_day: f64,
    pub local_transport: f64,
    pub activities: f64,
    pub miscellaneous: f64,
    pub insurance: f64,
    pub contingency: f64,
    pub subtotal: f64,
    pub total: f64,
    /// Grand total averaged over the trip; 0 when `duration_days <= 0`
    pub per_day_average: f64,
}

fn accommodation_multiplier(tier: BudgetTier) -> f64 {
    match tier {
        BudgetTier::Budget => 0.6,
        BudgetTier::MidRange => 1.0,
        BudgetTier::Luxury => 2.5,
    }
}

fn food_multiplier(tier: BudgetTier) -> f64 {
    match tier {
        BudgetTier::Budget => 0.7,
        BudgetTier::MidRange => 1.0,
        BudgetTier::Luxury => 2.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Synthesize a comprehensive budget for a trip.
///
/// Pure function: identical inputs yield bit-identical output. A
/// non-positive `duration_days` zeroes the per-day average instead of
/// dividing by zero; callers are expected to validate duration upstream.
#[must_use]
pub fn synthesize(
    distance_km: f64,
    duration_days: i32,
    destination_daily_cost: f64,
    budget_tier: BudgetTier,
) -> BudgetBreakdown {
    let days = f64::from(duration_days);

    // Round trip on the recommended mode.
    let transport_options = transport::estimate_transport(distance_km);
    let transportation = transport_options.recommended_cost() * 2.0;

    let stay_multiplier = accommodation_multiplier(budget_tier);
    let accommodation_per_night = destination_daily_cost * 0.4 * stay_multiplier;
    let accommodation = accommodation_per_night * days;

    let food_per_day = destination_daily_cost * 0.35 * food_multiplier(budget_tier);
    let food = food_per_day * days;

    // Local transport scales with the accommodation tier, not the food tier.
    let local_transport_per_day = destination_daily_cost * 0.15 * stay_multiplier;
    let local_transport = local_transport_per_day * days;

    let activities_per_day = destination_daily_cost * 0.10;
    let activities = activities_per_day * days;

    let miscellaneous = (food + activities) * 0.15;

    let subtotal =
        transportation + accommodation + food + local_transport + activities + miscellaneous;
    let insurance = subtotal * 0.05;
    let contingency = (subtotal + insurance) * 0.10;
    let total = subtotal + insurance + contingency;

    let per_day_average = if duration_days > 0 { total / days } else { 0.0 };

    BudgetBreakdown {
        transportation: round2(transportation),
        transportation_options: transport_options,
        accommodation: round2(accommodation),
        accommodation_per_night: round2(accommodation_per_night),
        food: round2(food),
        food_per_day: round2(food_per_day),
        local_transport: round2(local_transport),
        activities: round2(activities),
        miscellaneous: round2(miscellaneous),
        insurance: round2(insurance),
        contingency: round2(contingency),
        subtotal: round2(subtotal),
        total: round2(total),
        per_day_average: round2(per_day_average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_mid_range_total() {
        let breakdown = synthesize(0.0, 3, 100.0, BudgetTier::MidRange);
        // No transport at zero distance; everything else accrues.
        assert_eq!(breakdown.transportation, 0.0);
        assert!(breakdown.total > 0.0);
        assert_eq!(breakdown.accommodation, 120.0);
        assert_eq!(breakdown.food, 105.0);
        assert_eq!(breakdown.local_transport, 45.0);
        assert_eq!(breakdown.activities, 30.0);
        assert_eq!(breakdown.miscellaneous, 20.25);
    }

    #[test]
    fn test_total_chain_is_exact() {
        let breakdown = synthesize(0.0, 3, 100.0, BudgetTier::MidRange);
        // subtotal 320.25, +5% insurance, +10% contingency on the sum.
        assert_eq!(breakdown.subtotal, 320.25);
        assert_eq!(breakdown.insurance, 16.01);
        assert_eq!(breakdown.contingency, 33.63);
        assert_eq!(breakdown.total, 369.89);
        assert_eq!(breakdown.per_day_average, 123.3);
    }

    #[test]
    fn test_total_scales_with_daily_cost() {
        let cheap = synthesize(120.0, 5, 80.0, BudgetTier::MidRange);
        let pricey = synthesize(120.0, 5, 140.0, BudgetTier::MidRange);
        assert!(pricey.total > cheap.total);
    }

    #[test]
    fn test_tier_multipliers_diverge() {
        let budget = synthesize(500.0, 4, 100.0, BudgetTier::Budget);
        let mid = synthesize(500.0, 4, 100.0, BudgetTier::MidRange);
        let luxury = synthesize(500.0, 4, 100.0, BudgetTier::Luxury);
        assert!(budget.accommodation < mid.accommodation);
        assert!(mid.accommodation < luxury.accommodation);
        // Food uses its own multiplier table (2.0 for luxury, not 2.5).
        assert_eq!(luxury.food_per_day, 70.0);
        assert_eq!(budget.food_per_day, 24.5);
    }

    #[test]
    fn test_transport_is_round_trip() {
        let breakdown = synthesize(100.0, 3, 100.0, BudgetTier::MidRange);
        // Recommended at 100 km is the bus at 57.50 one-way.
        assert_eq!(breakdown.transportation, 115.0);
    }

    #[test]
    fn test_zero_duration_guards_per_day_average() {
        let breakdown = synthesize(100.0, 0, 100.0, BudgetTier::MidRange);
        assert_eq!(breakdown.per_day_average, 0.0);
        // Transportation still counts; the trip still has to get there.
        assert_eq!(breakdown.transportation, 115.0);
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let a = synthesize(842.7, 6, 133.33, BudgetTier::Luxury);
        let b = synthesize(842.7, 6, 133.33, BudgetTier::Luxury);
        assert_eq!(a, b);
    }
}
