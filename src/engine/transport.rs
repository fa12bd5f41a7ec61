//! Tiered transportation cost estimates
//!
//! Two independently calibrated tier tables share one band abstraction: the
//! generic reference-currency table feeding the recommendation ranker, and a
//! locale-flavored table with per-mode durations and availability used for
//! trip-cost display. Their boundaries and rates differ and are kept apart.

use serde::{Deserialize, Serialize};

/// A transport mode offered by one of the tier tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Bus,
    Taxi,
    Train,
    BudgetFlight,
    StandardFlight,
    PremiumFlight,
    BusinessFlight,
    Auto,
    Cab,
    Flight,
}

impl TransportMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Taxi => "taxi",
            TransportMode::Train => "train",
            TransportMode::BudgetFlight => "budget_flight",
            TransportMode::StandardFlight => "standard_flight",
            TransportMode::PremiumFlight => "premium_flight",
            TransportMode::BusinessFlight => "business_flight",
            TransportMode::Auto => "auto",
            TransportMode::Cab => "cab",
            TransportMode::Flight => "flight",
        }
    }
}

/// One priced mode from the reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportOption {
    pub mode: TransportMode,
    /// One-way cost in reference currency units, rounded to 2 decimals
    pub cost: f64,
}

/// Reference-table estimate: the modes available at a distance plus the
/// recommended one. One-way; round-trip doubling is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportEstimate {
    pub distance_km: f64,
    pub options: Vec<TransportOption>,
    pub recommended: TransportMode,
}

impl TransportEstimate {
    /// Cost of the recommended mode. Every band designates a recommended
    /// mode from its own option set, so the lookup always succeeds.
    #[must_use]
    pub fn recommended_cost(&self) -> f64 {
        self.cost_of(self.recommended).unwrap_or(0.0)
    }

    /// Cost of a specific mode, if the band offers it
    #[must_use]
    pub fn cost_of(&self, mode: TransportMode) -> Option<f64> {
        self.options
            .iter()
            .find(|o| o.mode == mode)
            .map(|o| o.cost)
    }
}

/// One mode from the locale-flavored table, with display detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticTransportOption {
    pub mode: TransportMode,
    pub name: String,
    pub icon: String,
    /// One-way cost in local currency units, rounded to whole units
    pub cost: f64,
    pub duration_minutes: u32,
    pub available: bool,
}

impl DomesticTransportOption {
    /// Duration as `"3h 20m"` / `"45m"`
    #[must_use]
    pub fn duration_formatted(&self) -> String {
        let hours = self.duration_minutes / 60;
        let minutes = self.duration_minutes % 60;
        if hours > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{minutes}m")
        }
    }
}

/// Locale-flavored estimate used for trip-cost display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticTransportEstimate {
    pub distance_km: f64,
    pub options: Vec<DomesticTransportOption>,
    pub recommended: TransportMode,
}

impl DomesticTransportEstimate {
    #[must_use]
    pub fn recommended_option(&self) -> Option<&DomesticTransportOption> {
        self.options.iter().find(|o| o.mode == self.recommended)
    }

    #[must_use]
    pub fn recommended_cost(&self) -> f64 {
        self.recommended_option().map_or(0.0, |o| o.cost)
    }
}

/// An ordered list of half-open `[lower, upper)` distance bands, each with a
/// formula closure, plus a terminal band for everything past the last bound.
struct TierTable<T: 'static> {
    bands: &'static [Band<T>],
    terminal: fn(f64) -> T,
}

struct Band<T> {
    /// Exclusive upper bound in km
    upper_km: f64,
    build: fn(f64) -> T,
}

impl<T> TierTable<T> {
    fn resolve(&self, distance_km: f64) -> T {
        for band in self.bands {
            if distance_km < band.upper_km {
                return (band.build)(distance_km);
            }
        }
        (self.terminal)(distance_km)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

type ReferenceBand = (Vec<TransportOption>, TransportMode);

static REFERENCE_TIERS: TierTable<ReferenceBand> = TierTable {
    bands: &[
        Band {
            upper_km: 50.0,
            build: reference_local,
        },
        Band {
            upper_km: 300.0,
            build: reference_regional,
        },
        Band {
            upper_km: 1000.0,
            build: reference_medium_haul,
        },
        Band {
            upper_km: 3000.0,
            build: reference_long_haul,
        },
    ],
    terminal: reference_intercontinental,
};

fn option(mode: TransportMode, cost: f64) -> TransportOption {
    TransportOption {
        mode,
        cost: round2(cost),
    }
}

fn reference_local(d: f64) -> ReferenceBand {
    (
        vec![
            option(TransportMode::Bus, d * 0.50),
            option(TransportMode::Taxi, d * 1.50),
        ],
        TransportMode::Bus,
    )
}

fn reference_regional(d: f64) -> ReferenceBand {
    (
        vec![
            option(TransportMode::Bus, 50.0 + (d - 50.0) * 0.15),
            option(TransportMode::Train, 40.0 + (d - 50.0) * 0.20),
            option(TransportMode::Taxi, d * 1.20),
        ],
        TransportMode::Bus,
    )
}

fn reference_medium_haul(d: f64) -> ReferenceBand {
    (
        vec![
            option(TransportMode::Train, 80.0 + (d - 300.0) * 0.12),
            option(TransportMode::BudgetFlight, 100.0 + (d - 300.0) * 0.25),
            option(TransportMode::StandardFlight, 150.0 + (d - 300.0) * 0.35),
        ],
        TransportMode::BudgetFlight,
    )
}

fn reference_long_haul(d: f64) -> ReferenceBand {
    (
        vec![
            option(TransportMode::BudgetFlight, 250.0 + (d - 1000.0) * 0.15),
            option(TransportMode::StandardFlight, 400.0 + (d - 1000.0) * 0.20),
            option(TransportMode::PremiumFlight, 800.0 + (d - 1000.0) * 0.30),
        ],
        TransportMode::BudgetFlight,
    )
}

fn reference_intercontinental(d: f64) -> ReferenceBand {
    (
        vec![
            option(TransportMode::BudgetFlight, 550.0 + (d - 3000.0) * 0.08),
            option(TransportMode::StandardFlight, 900.0 + (d - 3000.0) * 0.12),
            option(TransportMode::BusinessFlight, 2000.0 + (d - 3000.0) * 0.25),
        ],
        TransportMode::BudgetFlight,
    )
}

/// Estimate one-way transport costs from the generic reference table
#[must_use]
pub fn estimate_transport(distance_km: f64) -> TransportEstimate {
    let (options, recommended) = REFERENCE_TIERS.resolve(distance_km);
    TransportEstimate {
        distance_km,
        options,
        recommended,
    }
}

type DomesticBand = (Vec<DomesticTransportOption>, TransportMode);

static DOMESTIC_TIERS: TierTable<DomesticBand> = TierTable {
    bands: &[
        Band {
            upper_km: 20.0,
            build: domestic_intracity,
        },
        Band {
            upper_km: 100.0,
            build: domestic_intercity,
        },
        Band {
            upper_km: 500.0,
            build: domestic_interstate,
        },
        Band {
            upper_km: 1500.0,
            build: domestic_cross_country,
        },
    ],
    terminal: domestic_international,
};

fn domestic_option(
    mode: TransportMode,
    name: &str,
    icon: &str,
    cost: f64,
    duration_minutes: u32,
    available: bool,
) -> DomesticTransportOption {
    DomesticTransportOption {
        mode,
        name: name.to_string(),
        icon: icon.to_string(),
        cost: cost.round(),
        duration_minutes,
        available,
    }
}

fn domestic_intracity(d: f64) -> DomesticBand {
    (
        vec![
            domestic_option(
                TransportMode::Auto,
                "Auto/Rickshaw",
                "\u{1f6fa}",
                (d * 15.0).max(50.0),
                (d * 3.0) as u32,
                true,
            ),
            domestic_option(
                TransportMode::Cab,
                "Cab/Taxi",
                "\u{1f695}",
                (d * 18.0).max(80.0),
                (d * 2.5) as u32,
                true,
            ),
            domestic_option(
                TransportMode::Bus,
                "Local Bus",
                "\u{1f68c}",
                (d * 2.0).max(20.0),
                (d * 4.0) as u32,
                true,
            ),
        ],
        TransportMode::Auto,
    )
}

fn domestic_intercity(d: f64) -> DomesticBand {
    (
        vec![
            domestic_option(
                TransportMode::Bus,
                "AC Bus",
                "\u{1f68c}",
                (d * 1.5).max(100.0),
                (d * 1.5) as u32,
                true,
            ),
            domestic_option(
                TransportMode::Train,
                "Train (2nd AC)",
                "\u{1f686}",
                (d * 2.0).max(150.0),
                (d * 1.2) as u32,
                true,
            ),
            domestic_option(
                TransportMode::Cab,
                "Cab/Taxi",
                "\u{1f695}",
                (d * 12.0).max(500.0),
                (d * 1.2) as u32,
                true,
            ),
        ],
        TransportMode::Train,
    )
}

fn domestic_interstate(d: f64) -> DomesticBand {
    (
        vec![
            domestic_option(
                TransportMode::Bus,
                "AC Sleeper Bus",
                "\u{1f68c}",
                (d * 1.2).max(400.0),
                (d * 1.5) as u32,
                true,
            ),
            domestic_option(
                TransportMode::Train,
                "Train (2AC/3AC)",
                "\u{1f686}",
                (d * 1.8).max(600.0),
                d as u32,
                true,
            ),
            domestic_option(
                TransportMode::Flight,
                "Flight (Economy)",
                "\u{2708}\u{fe0f}",
                (d * 5.0).min(8000.0).max(2500.0),
                (d * 0.5) as u32 + 120,
                // No commercial routes on short hops.
                d > 300.0,
            ),
            domestic_option(
                TransportMode::Cab,
                "Cab/Taxi",
                "\u{1f695}",
                (d * 10.0).max(3000.0),
                (d * 1.2) as u32,
                true,
            ),
        ],
        TransportMode::Train,
    )
}

fn domestic_cross_country(d: f64) -> DomesticBand {
    (
        vec![
            domestic_option(
                TransportMode::Train,
                "Train (AC/Sleeper)",
                "\u{1f686}",
                (d * 1.5).max(1200.0),
                (d * 0.8) as u32,
                true,
            ),
            domestic_option(
                TransportMode::Flight,
                "Flight (Economy)",
                "\u{2708}\u{fe0f}",
                (d * 4.0).min(12000.0).max(3500.0),
                (d * 0.4) as u32 + 150,
                true,
            ),
            domestic_option(
                TransportMode::Bus,
                "AC Sleeper Bus",
                "\u{1f68c}",
                d.max(1000.0),
                (d * 1.5) as u32,
                true,
            ),
        ],
        TransportMode::Flight,
    )
}

fn domestic_international(d: f64) -> DomesticBand {
    (
        vec![
            domestic_option(
                TransportMode::Flight,
                "Flight (Economy)",
                "\u{2708}\u{fe0f}",
                (d * 3.5).max(5000.0).min(50000.0),
                (d * 0.35) as u32 + 180,
                true,
            ),
            domestic_option(
                TransportMode::Train,
                "Train (AC)",
                "\u{1f686}",
                (d * 1.2).max(2000.0),
                (d * 0.8) as u32,
                d < 3000.0,
            ),
        ],
        TransportMode::Flight,
    )
}

/// Estimate one-way transport costs from the locale-flavored detailed table
#[must_use]
pub fn estimate_domestic_transport(distance_km: f64) -> DomesticTransportEstimate {
    let (options, recommended) = DOMESTIC_TIERS.resolve(distance_km);
    DomesticTransportEstimate {
        distance_km,
        options,
        recommended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn modes(estimate: &TransportEstimate) -> Vec<TransportMode> {
        estimate.options.iter().map(|o| o.mode).collect()
    }

    #[rstest]
    #[case(0.0)]
    #[case(10.0)]
    #[case(49.99)]
    fn test_local_band_offers_bus_and_taxi(#[case] d: f64) {
        let estimate = estimate_transport(d);
        assert_eq!(modes(&estimate), vec![TransportMode::Bus, TransportMode::Taxi]);
        assert_eq!(estimate.recommended, TransportMode::Bus);
    }

    #[test]
    fn test_zero_distance_bus_is_free() {
        let estimate = estimate_transport(0.0);
        assert_eq!(estimate.cost_of(TransportMode::Bus), Some(0.0));
    }

    #[test]
    fn test_regional_band_train_formula() {
        // 50 + 0.20 * 50 for the train at 100 km.
        let estimate = estimate_transport(100.0);
        assert_eq!(estimate.cost_of(TransportMode::Train), Some(50.0));
        assert_eq!(estimate.cost_of(TransportMode::Bus), Some(57.5));
        assert_eq!(estimate.recommended, TransportMode::Bus);
    }

    #[rstest]
    #[case(50.0, TransportMode::Bus, 50.0)]
    #[case(300.0, TransportMode::Train, 80.0)]
    #[case(1000.0, TransportMode::BudgetFlight, 250.0)]
    #[case(3000.0, TransportMode::BudgetFlight, 550.0)]
    fn test_boundaries_are_half_open(
        #[case] d: f64,
        #[case] mode: TransportMode,
        #[case] expected: f64,
    ) {
        // At each boundary the upper band's base rate applies exactly.
        let estimate = estimate_transport(d);
        assert_eq!(estimate.cost_of(mode), Some(expected));
    }

    #[test]
    fn test_long_haul_recommends_budget_flight() {
        let estimate = estimate_transport(2000.0);
        assert_eq!(estimate.recommended, TransportMode::BudgetFlight);
        assert_eq!(estimate.recommended_cost(), 400.0);
    }

    #[test]
    fn test_costs_rounded_to_two_decimals() {
        let estimate = estimate_transport(33.333);
        let bus = estimate.cost_of(TransportMode::Bus).unwrap();
        assert_eq!(bus, 16.67);
    }

    #[test]
    fn test_domestic_intracity_band() {
        let estimate = estimate_domestic_transport(10.0);
        assert_eq!(estimate.recommended, TransportMode::Auto);
        let auto = estimate.recommended_option().unwrap();
        assert_eq!(auto.cost, 150.0);
        assert_eq!(auto.duration_minutes, 30);
        assert!(auto.available);
    }

    #[test]
    fn test_domestic_intracity_minimum_fares() {
        let estimate = estimate_domestic_transport(1.0);
        assert_eq!(estimate.recommended_cost(), 50.0);
        let bus = estimate
            .options
            .iter()
            .find(|o| o.mode == TransportMode::Bus)
            .unwrap();
        assert_eq!(bus.cost, 20.0);
    }

    #[rstest]
    #[case(150.0, false)]
    #[case(300.0, false)]
    #[case(350.0, true)]
    fn test_interstate_flight_availability(#[case] d: f64, #[case] available: bool) {
        let estimate = estimate_domestic_transport(d);
        let flight = estimate
            .options
            .iter()
            .find(|o| o.mode == TransportMode::Flight)
            .unwrap();
        assert_eq!(flight.available, available);
    }

    #[test]
    fn test_international_train_unavailable_past_3000() {
        let estimate = estimate_domestic_transport(3500.0);
        assert_eq!(estimate.recommended, TransportMode::Flight);
        let train = estimate
            .options
            .iter()
            .find(|o| o.mode == TransportMode::Train)
            .unwrap();
        assert!(!train.available);
    }

    #[test]
    fn test_domestic_flight_fare_is_capped() {
        let estimate = estimate_domestic_transport(20000.0);
        assert_eq!(estimate.recommended_cost(), 50000.0);
    }

    #[test]
    fn test_duration_formatting() {
        let estimate = estimate_domestic_transport(400.0);
        let flight = estimate
            .options
            .iter()
            .find(|o| o.mode == TransportMode::Flight)
            .unwrap();
        // 400 * 0.5 + 120 = 320 minutes.
        assert_eq!(flight.duration_minutes, 320);
        assert_eq!(flight.duration_formatted(), "5h 20m");

        let short = estimate_domestic_transport(10.0);
        assert_eq!(short.recommended_option().unwrap().duration_formatted(), "30m");
    }

    #[test]
    fn test_tables_stay_distinct_at_same_distance() {
        // 60 km: reference is still in its 50-300 band, domestic is intercity.
        let reference = estimate_transport(60.0);
        let domestic = estimate_domestic_transport(60.0);
        assert_eq!(reference.recommended, TransportMode::Bus);
        assert_eq!(domestic.recommended, TransportMode::Train);
    }
}
