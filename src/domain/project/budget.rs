//! Budget tiers and currency helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Industry-standard production budget tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(rename = "Micro Budget")]
    Micro,
    #[serde(rename = "Low Budget")]
    Low,
    #[serde(rename = "Medium Budget")]
    Medium,
    #[serde(rename = "High Budget")]
    High,
    #[serde(rename = "Blockbuster")]
    Blockbuster,
    #[serde(rename = "Tentpole")]
    Tentpole,
}

impl BudgetTier {
    /// Classifies a production budget.
    pub fn for_budget(budget: u64) -> Self {
        match budget {
            b if b < 1_000_000 => BudgetTier::Micro,
            b if b < 5_000_000 => BudgetTier::Low,
            b if b < 25_000_000 => BudgetTier::Medium,
            b if b < 75_000_000 => BudgetTier::High,
            b if b < 200_000_000 => BudgetTier::Blockbuster,
            _ => BudgetTier::Tentpole,
        }
    }

    /// Returns the display label for this tier.
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Micro => "Micro Budget",
            BudgetTier::Low => "Low Budget",
            BudgetTier::Medium => "Medium Budget",
            BudgetTier::High => "High Budget",
            BudgetTier::Blockbuster => "Blockbuster",
            BudgetTier::Tentpole => "Tentpole",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Formats an amount compactly: `$1.50B`, `$45.0M`, `$250K`, `$900`.
pub fn format_currency(amount: u64) -> String {
    let value = amount as f64;
    if amount >= 1_000_000_000 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if amount >= 1_000_000 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if amount >= 1_000 {
        format!("${:.0}K", value / 1_000.0)
    } else {
        format!("${}", amount)
    }
}

/// Formats an integer with comma thousands separators: `150000000` -> `150,000,000`.
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Return on investment as a percentage, rounded to two decimals.
///
/// A zero cost yields 0.0 rather than an infinite return.
pub fn roi_percentage(revenue: f64, cost: f64) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    round_to(((revenue - cost) / cost) * 100.0, 2)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_even(value * factor) / factor
}

/// Rounds to the nearest integer, sending exact halves to the even neighbour.
pub(crate) fn round_half_even(value: f64) -> f64 {
    if (value - value.trunc()).abs() == 0.5 {
        2.0 * (value / 2.0).round()
    } else {
        value.round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_half_even_breaks_ties_to_even() {
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(3.5), 4.0);
        assert_eq!(round_half_even(-2.5), -2.0);
        assert_eq!(round_half_even(2.6), 3.0);
        assert_eq!(round_half_even(2_500_002.5), 2_500_002.0);
        assert_eq!(round_to(7.25, 1), 7.2);
    }

    #[test]
    fn budget_tiers_follow_thresholds() {
        assert_eq!(BudgetTier::for_budget(0), BudgetTier::Micro);
        assert_eq!(BudgetTier::for_budget(999_999), BudgetTier::Micro);
        assert_eq!(BudgetTier::for_budget(1_000_000), BudgetTier::Low);
        assert_eq!(BudgetTier::for_budget(5_000_000), BudgetTier::Medium);
        assert_eq!(BudgetTier::for_budget(25_000_000), BudgetTier::High);
        assert_eq!(BudgetTier::for_budget(75_000_000), BudgetTier::Blockbuster);
        assert_eq!(BudgetTier::for_budget(199_999_999), BudgetTier::Blockbuster);
        assert_eq!(BudgetTier::for_budget(200_000_000), BudgetTier::Tentpole);
    }

    #[test]
    fn budget_tier_serializes_as_label() {
        let json = serde_json::to_string(&BudgetTier::Micro).unwrap();
        assert_eq!(json, "\"Micro Budget\"");
    }

    #[test]
    fn format_currency_compacts_amounts() {
        assert_eq!(format_currency(1_500_000_000), "$1.50B");
        assert_eq!(format_currency(45_000_000), "$45.0M");
        assert_eq!(format_currency(250_000), "$250K");
        assert_eq!(format_currency(900), "$900");
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(150_000_000), "150,000,000");
    }

    #[test]
    fn roi_percentage_handles_zero_cost() {
        assert_eq!(roi_percentage(1_000.0, 0.0), 0.0);
        assert_eq!(roi_percentage(250.0, 100.0), 150.0);
        assert_eq!(roi_percentage(70.0, 100.0), -30.0);
    }
}
