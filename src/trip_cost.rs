//! Trip cost estimation for itinerary display
//!
//! A simpler costing path than [`crate::engine::budget`]: fixed category base
//! rates scaled by a destination cost-of-living index and a budget
//! multiplier, with accommodation billed per night and a flat 10%
//! miscellaneous surcharge. It serves the trip-plan feature, which attaches
//! realistic costs to authored itineraries, and deliberately stays separate
//! from the nine-component breakdown the ranking engine uses.

use serde::{Deserialize, Serialize};

use crate::engine::geo;
use crate::engine::transport::{self, TransportMode};
use crate::gazetteer;
use crate::models::{BudgetTier, Coordinate};

/// Base daily rates for a mid-range stay at a cost index of 1.0, in INR
const BASE_ACCOMMODATION_PER_NIGHT: f64 = 2000.0;
const BASE_FOOD_PER_DAY: f64 = 800.0;
const BASE_LOCAL_TRANSPORT_PER_DAY: f64 = 400.0;
const BASE_ACTIVITIES_PER_DAY: f64 = 500.0;

fn budget_multiplier(tier: BudgetTier) -> f64 {
    match tier {
        BudgetTier::Budget => 0.6,
        BudgetTier::MidRange => 1.0,
        BudgetTier::Luxury => 2.5,
    }
}

/// Per-day category rates for one traveler, rounded to whole units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRates {
    pub accommodation: f64,
    pub food: f64,
    pub local_transport: f64,
    pub activities: f64,
    pub total: f64,
}

/// Daily category rates for a destination and tier
#[must_use]
pub fn daily_rates(destination: &str, tier: BudgetTier) -> DailyRates {
    let index = gazetteer::cost_index(destination);
    let multiplier = budget_multiplier(tier);
    let rate = |base: f64| (base * index * multiplier).round();

    let accommodation = rate(BASE_ACCOMMODATION_PER_NIGHT);
    let food = rate(BASE_FOOD_PER_DAY);
    let local_transport = rate(BASE_LOCAL_TRANSPORT_PER_DAY);
    let activities = rate(BASE_ACTIVITIES_PER_DAY);

    DailyRates {
        accommodation,
        food,
        local_transport,
        activities,
        total: accommodation + food + local_transport + activities,
    }
}

/// Inputs for a trip cost estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCostRequest {
    pub destination: String,
    pub duration_days: i32,
    pub budget_tier: BudgetTier,
    pub travelers: u32,
    /// Where the traveler starts; enables transport costing
    pub origin: Option<Coordinate>,
    /// Destination position; enables transport costing
    pub destination_coordinates: Option<Coordinate>,
}

/// Summed trip costs per category, whole units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCostBreakdown {
    pub accommodation: f64,
    pub food: f64,
    pub local_transport: f64,
    pub transport_to_destination: f64,
    pub activities: f64,
    pub miscellaneous: f64,
    pub total: f64,
}

/// One transport mode shaped for itinerary display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripTransportOption {
    pub mode: TransportMode,
    pub name: String,
    pub icon: String,
    pub one_way_cost: f64,
    pub round_trip_cost: f64,
    pub duration: String,
    pub duration_minutes: u32,
    pub available: bool,
}

/// Transport summary between origin and destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportDetails {
    pub distance_km: f64,
    pub recommended_mode: TransportMode,
    pub recommended_cost_one_way: f64,
    pub recommended_cost_round_trip: f64,
    pub options: Vec<TripTransportOption>,
}

/// A complete trip cost estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCostEstimate {
    pub destination: String,
    pub duration_days: i32,
    pub budget_tier: BudgetTier,
    pub travelers: u32,
    /// Currency label for every monetary field; the math is label-agnostic
    pub currency: String,
    pub cost_breakdown: TripCostBreakdown,
    pub per_person_cost: f64,
    pub daily_rates: DailyRates,
    pub cost_index: f64,
    pub transportation: Option<TransportDetails>,
    pub distance_km: Option<f64>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Estimate the full cost of a trip.
///
/// Accommodation is billed per night, `max(1, duration_days - 1)`; the other
/// categories accrue per day. Transport to the destination is included only
/// when both coordinate pairs are known, using the detailed domestic tier
/// table's recommended mode, round trip.
#[must_use]
pub fn estimate_trip_cost(request: &TripCostRequest) -> TripCostEstimate {
    let rates = daily_rates(&request.destination, request.budget_tier);
    let days = f64::from(request.duration_days);
    let nights = f64::from(request.duration_days.saturating_sub(1).max(1));
    let travelers = f64::from(request.travelers);

    let accommodation = rates.accommodation * nights * travelers;
    let food = rates.food * days * travelers;
    let local_transport = rates.local_transport * days * travelers;
    let activities = rates.activities * days * travelers;

    let mut transport_to_destination = 0.0;
    let mut transportation = None;
    let mut distance_km = None;

    if let (Some(origin), Some(dest)) = (request.origin, request.destination_coordinates) {
        let distance = geo::between(&origin, &dest);
        let estimate = transport::estimate_domestic_transport(distance);
        let one_way = estimate.recommended_cost();
        transport_to_destination = (one_way * 2.0 * travelers).round();

        let options = estimate
            .options
            .iter()
            .map(|o| TripTransportOption {
                mode: o.mode,
                name: o.name.clone(),
                icon: o.icon.clone(),
                one_way_cost: o.cost,
                round_trip_cost: o.cost * 2.0 * travelers,
                duration: o.duration_formatted(),
                duration_minutes: o.duration_minutes,
                available: o.available,
            })
            .collect();

        transportation = Some(TransportDetails {
            distance_km: round1(distance),
            recommended_mode: estimate.recommended,
            recommended_cost_one_way: one_way.round(),
            recommended_cost_round_trip: transport_to_destination,
            options,
        });
        distance_km = Some(round1(distance));
    }

    let miscellaneous = ((accommodation + food + local_transport + activities) * 0.1).round();
    let total =
        accommodation + food + local_transport + activities + transport_to_destination + miscellaneous;
    let per_person_cost = if request.travelers > 0 {
        (total / travelers).round()
    } else {
        0.0
    };

    TripCostEstimate {
        destination: request.destination.clone(),
        duration_days: request.duration_days,
        budget_tier: request.budget_tier,
        travelers: request.travelers,
        currency: "INR".to_string(),
        cost_breakdown: TripCostBreakdown {
            accommodation: accommodation.round(),
            food: food.round(),
            local_transport: local_transport.round(),
            transport_to_destination,
            activities: activities.round(),
            miscellaneous,
            total: total.round(),
        },
        per_person_cost,
        daily_rates: rates,
        cost_index: gazetteer::cost_index(&request.destination),
        transportation,
        distance_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(destination: &str, days: i32, travelers: u32) -> TripCostRequest {
        TripCostRequest {
            destination: destination.to_string(),
            duration_days: days,
            budget_tier: BudgetTier::MidRange,
            travelers,
            origin: None,
            destination_coordinates: None,
        }
    }

    #[test]
    fn test_daily_rates_at_reference_index() {
        // Mumbai is the index anchor (1.0).
        let rates = daily_rates("mumbai", BudgetTier::MidRange);
        assert_eq!(rates.accommodation, 2000.0);
        assert_eq!(rates.food, 800.0);
        assert_eq!(rates.local_transport, 400.0);
        assert_eq!(rates.activities, 500.0);
        assert_eq!(rates.total, 3700.0);
    }

    #[test]
    fn test_daily_rates_scale_with_index_and_tier() {
        let tokyo_mid = daily_rates("tokyo", BudgetTier::MidRange);
        assert_eq!(tokyo_mid.accommodation, 3600.0);

        let tokyo_budget = daily_rates("tokyo", BudgetTier::Budget);
        assert_eq!(tokyo_budget.accommodation, 2160.0);

        let tokyo_luxury = daily_rates("tokyo", BudgetTier::Luxury);
        assert_eq!(tokyo_luxury.accommodation, 9000.0);
    }

    #[test]
    fn test_unknown_destination_uses_default_index() {
        let rates = daily_rates("atlantis", BudgetTier::MidRange);
        assert_eq!(rates.accommodation, 2000.0);
    }

    #[test]
    fn test_accommodation_billed_per_night() {
        // 3 days means 2 nights.
        let estimate = estimate_trip_cost(&request("mumbai", 3, 1));
        assert_eq!(estimate.cost_breakdown.accommodation, 4000.0);
        assert_eq!(estimate.cost_breakdown.food, 2400.0);

        // A day trip still pays for one night.
        let day_trip = estimate_trip_cost(&request("mumbai", 1, 1));
        assert_eq!(day_trip.cost_breakdown.accommodation, 2000.0);
    }

    #[test]
    fn test_miscellaneous_is_ten_percent_of_categories() {
        let estimate = estimate_trip_cost(&request("mumbai", 3, 1));
        // 4000 + 2400 + 1200 + 1500 = 9100; 10% on top.
        assert_eq!(estimate.cost_breakdown.miscellaneous, 910.0);
        assert_eq!(estimate.cost_breakdown.total, 10010.0);
        assert_eq!(estimate.per_person_cost, 10010.0);
    }

    #[test]
    fn test_travelers_scale_costs() {
        let solo = estimate_trip_cost(&request("mumbai", 3, 1));
        let pair = estimate_trip_cost(&request("mumbai", 3, 2));
        assert_eq!(pair.cost_breakdown.total, solo.cost_breakdown.total * 2.0);
        assert_eq!(pair.per_person_cost, solo.per_person_cost);
    }

    #[test]
    fn test_transport_requires_both_coordinate_pairs() {
        let without = estimate_trip_cost(&request("goa", 4, 1));
        assert!(without.transportation.is_none());
        assert_eq!(without.cost_breakdown.transport_to_destination, 0.0);

        let mut with = request("goa", 4, 1);
        with.origin = Some(Coordinate::new(19.0760, 72.8777).unwrap());
        with.destination_coordinates = Some(Coordinate::new(15.2993, 74.1240).unwrap());
        let estimate = estimate_trip_cost(&with);

        let details = estimate.transportation.unwrap();
        // Mumbai to Goa sits in the interstate band; train is recommended.
        assert_eq!(details.recommended_mode, TransportMode::Train);
        assert_eq!(
            details.recommended_cost_round_trip,
            estimate.cost_breakdown.transport_to_destination
        );
        assert!(details.options.iter().any(|o| o.mode == TransportMode::Flight));
        assert_eq!(estimate.distance_km, Some(details.distance_km));
    }

    #[test]
    fn test_zero_travelers_guard() {
        let estimate = estimate_trip_cost(&request("mumbai", 3, 0));
        assert_eq!(estimate.per_person_cost, 0.0);
        assert_eq!(estimate.cost_breakdown.total, 0.0);
    }

    #[test]
    fn test_currency_label() {
        let estimate = estimate_trip_cost(&request("mumbai", 2, 1));
        assert_eq!(estimate.currency, "INR");
    }
}
