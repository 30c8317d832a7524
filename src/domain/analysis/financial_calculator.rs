//! Financial Calculator - Revenue and ROI benchmarks.
//!
//! Coarse industry heuristics. The financial unit attaches these as a
//! deterministic baseline next to the generated narrative.

use serde::{Deserialize, Serialize};

use crate::domain::project::{roi_percentage, round_half_even, round_to, Platform};

/// Annual value of one streaming subscriber.
pub const VALUE_PER_SUBSCRIBER: u64 = 120;

/// New subscribers attracted per million of production budget.
const SUBSCRIBERS_PER_MILLION: f64 = 50.0;

const CONSERVATIVE_FACTOR: f64 = 0.7;
const OPTIMISTIC_FACTOR: f64 = 1.5;

/// Baseline financial projections for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FinancialMetrics {
    /// Box office scenarios for a cinema release.
    Theatrical {
        conservative_revenue: u64,
        moderate_revenue: u64,
        optimistic_revenue: u64,
        conservative_roi: f64,
        moderate_roi: f64,
        optimistic_roi: f64,
    },
    /// Subscriber economics for streaming, hybrid and other releases.
    Subscription {
        estimated_new_subscribers: u64,
        subscriber_lifetime_value: u64,
        cost_per_acquisition: u64,
        estimated_roi: f64,
    },
}

/// Calculator for baseline financial metrics.
pub struct FinancialCalculator;

impl FinancialCalculator {
    /// Computes the metrics appropriate for the release platform.
    pub fn basic_metrics(budget: u64, genre: &str, platform: &Platform) -> FinancialMetrics {
        if platform.is_theatrical() {
            Self::theatrical(budget, genre)
        } else {
            Self::subscription(budget)
        }
    }

    /// Box office multiple of budget by genre.
    pub fn theatrical_multiplier(genre: &str) -> f64 {
        match genre {
            "Action" => 2.5,
            "Comedy" => 2.8,
            "Drama" => 2.2,
            "Horror" => 3.5,
            "Science Fiction" => 2.4,
            _ => 2.0,
        }
    }

    fn theatrical(budget: u64, genre: &str) -> FinancialMetrics {
        let multiplier = Self::theatrical_multiplier(genre);
        let cost = budget as f64;

        let conservative = cost * (multiplier * CONSERVATIVE_FACTOR);
        let moderate = cost * multiplier;
        let optimistic = cost * (multiplier * OPTIMISTIC_FACTOR);

        FinancialMetrics::Theatrical {
            conservative_revenue: round_half_even(conservative) as u64,
            moderate_revenue: round_half_even(moderate) as u64,
            optimistic_revenue: round_half_even(optimistic) as u64,
            conservative_roi: roi_percentage(conservative, cost),
            moderate_roi: roi_percentage(moderate, cost),
            optimistic_roi: roi_percentage(optimistic, cost),
        }
    }

    fn subscription(budget: u64) -> FinancialMetrics {
        let cost = budget as f64;
        let subscribers = cost / 1_000_000.0 * SUBSCRIBERS_PER_MILLION;
        let lifetime_value = subscribers * VALUE_PER_SUBSCRIBER as f64;
        let cost_per_acquisition = if subscribers > 0.0 {
            round_half_even(cost / subscribers) as u64
        } else {
            0
        };

        FinancialMetrics::Subscription {
            estimated_new_subscribers: round_half_even(subscribers) as u64,
            subscriber_lifetime_value: round_half_even(lifetime_value) as u64,
            cost_per_acquisition,
            estimated_roi: roi_percentage(lifetime_value, cost),
        }
    }
}

pub(crate) fn round_one_decimal(value: f64) -> f64 {
    round_to(value, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theatrical_horror_scenarios() {
        let metrics = FinancialCalculator::basic_metrics(10_000_000, "Horror", &Platform::Theatrical);

        match metrics {
            FinancialMetrics::Theatrical {
                conservative_revenue,
                moderate_revenue,
                optimistic_revenue,
                conservative_roi,
                moderate_roi,
                optimistic_roi,
            } => {
                assert_eq!(conservative_revenue, 24_500_000);
                assert_eq!(moderate_revenue, 35_000_000);
                assert_eq!(optimistic_revenue, 52_500_000);
                assert_eq!(conservative_roi, 145.0);
                assert_eq!(moderate_roi, 250.0);
                assert_eq!(optimistic_roi, 425.0);
            }
            other => panic!("Expected theatrical metrics, got {:?}", other),
        }
    }

    #[test]
    fn revenue_halves_round_to_even() {
        // 1_000_001 * 2.5 = 2_500_002.5
        let metrics = FinancialCalculator::basic_metrics(1_000_001, "Action", &Platform::Theatrical);

        match metrics {
            FinancialMetrics::Theatrical { moderate_revenue, .. } => {
                assert_eq!(moderate_revenue, 2_500_002);
            }
            other => panic!("Expected theatrical metrics, got {:?}", other),
        }
    }

    #[test]
    fn unknown_genre_uses_base_multiplier() {
        assert_eq!(FinancialCalculator::theatrical_multiplier("Unknown"), 2.0);
        assert_eq!(FinancialCalculator::theatrical_multiplier("Western"), 2.0);
        assert_eq!(FinancialCalculator::theatrical_multiplier("Comedy"), 2.8);
    }

    #[test]
    fn zero_budget_theatrical_does_not_divide_by_zero() {
        let metrics = FinancialCalculator::basic_metrics(0, "Drama", &Platform::Theatrical);

        match metrics {
            FinancialMetrics::Theatrical {
                moderate_revenue,
                moderate_roi,
                ..
            } => {
                assert_eq!(moderate_revenue, 0);
                assert_eq!(moderate_roi, 0.0);
            }
            other => panic!("Expected theatrical metrics, got {:?}", other),
        }
    }

    #[test]
    fn streaming_subscriber_economics() {
        let metrics = FinancialCalculator::basic_metrics(20_000_000, "Drama", &Platform::Streaming);

        assert_eq!(
            metrics,
            FinancialMetrics::Subscription {
                estimated_new_subscribers: 1_000,
                subscriber_lifetime_value: 120_000,
                cost_per_acquisition: 20_000,
                estimated_roi: -99.4,
            }
        );
    }

    #[test]
    fn hybrid_uses_subscription_model() {
        let metrics = FinancialCalculator::basic_metrics(5_000_000, "Action", &Platform::Hybrid);
        assert!(matches!(metrics, FinancialMetrics::Subscription { .. }));
    }

    #[test]
    fn zero_budget_streaming_has_no_acquisition_cost() {
        let metrics = FinancialCalculator::basic_metrics(0, "Drama", &Platform::Streaming);

        assert_eq!(
            metrics,
            FinancialMetrics::Subscription {
                estimated_new_subscribers: 0,
                subscriber_lifetime_value: 0,
                cost_per_acquisition: 0,
                estimated_roi: 0.0,
            }
        );
    }

    #[test]
    fn round_one_decimal_rounds_to_nearest_tenth() {
        assert_eq!(round_one_decimal(7.333), 7.3);
        assert_eq!(round_one_decimal(3.666), 3.7);
    }
}
