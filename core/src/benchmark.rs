//! Benchmark reference tables.
//!
//! Static data loaded once at construction and shared read-only by every
//! scoring call — concurrent reads need no synchronization. Income
//! thresholds are currency-agnostic: callers configure the cutoffs in
//! whatever unit the ledger uses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessTier {
    Small,
    Mid,
    Large,
}

impl BusinessTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Mid => "mid",
            Self::Large => "large",
        }
    }
}

/// Margin and growth reference values for one business size tier.
/// All figures are percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierBenchmark {
    pub margin_min: f64,
    pub margin_max: f64,
    pub margin_avg: f64,
    pub growth_good: f64,
    pub growth_excellent: f64,
}

/// Personal-finance norms. Category labels are configuration, so the
/// scoring and recommendation logic never hard-codes ledger strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalNorms {
    pub savings_min_pct: f64,
    pub savings_good_pct: f64,
    pub savings_excellent_pct: f64,
    /// Discretionary spending ceiling, as % of income.
    pub discretionary_max_pct: f64,
    pub emergency_fund_months: f64,
    pub discretionary_categories: Vec<String>,
    pub savings_category: String,
    pub education_category: String,
}

/// Macro figures the simulator defaults from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAssumptions {
    pub annual_inflation_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkTable {
    /// Annual income below this is a small business.
    pub small_income_max: f64,
    /// Annual income below this (and above small) is a mid business.
    pub mid_income_max: f64,
    pub small: TierBenchmark,
    pub mid: TierBenchmark,
    pub large: TierBenchmark,
    pub personal: PersonalNorms,
    pub market: MarketAssumptions,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self {
            small_income_max: 50_000_000.0,
            mid_income_max: 500_000_000.0,
            small: TierBenchmark {
                margin_min: 5.0,
                margin_max: 20.0,
                margin_avg: 12.0,
                growth_good: 10.0,
                growth_excellent: 20.0,
            },
            mid: TierBenchmark {
                margin_min: 8.0,
                margin_max: 25.0,
                margin_avg: 15.0,
                growth_good: 8.0,
                growth_excellent: 15.0,
            },
            large: TierBenchmark {
                margin_min: 10.0,
                margin_max: 30.0,
                margin_avg: 18.0,
                growth_good: 5.0,
                growth_excellent: 12.0,
            },
            personal: PersonalNorms {
                savings_min_pct: 5.0,
                savings_good_pct: 15.0,
                savings_excellent_pct: 25.0,
                discretionary_max_pct: 20.0,
                emergency_fund_months: 6.0,
                discretionary_categories: vec![
                    "Entertainment".to_string(),
                    "Restaurants".to_string(),
                ],
                savings_category: "Savings".to_string(),
                education_category: "Education".to_string(),
            },
            market: MarketAssumptions {
                annual_inflation_pct: 4.5,
            },
        }
    }
}

impl BenchmarkTable {
    /// Classify a business by trailing annual income.
    pub fn tier_for(&self, annual_income: f64) -> BusinessTier {
        if annual_income < self.small_income_max {
            BusinessTier::Small
        } else if annual_income < self.mid_income_max {
            BusinessTier::Mid
        } else {
            BusinessTier::Large
        }
    }

    pub fn tier_benchmark(&self, tier: BusinessTier) -> &TierBenchmark {
        match tier {
            BusinessTier::Small => &self.small,
            BusinessTier::Mid => &self.mid,
            BusinessTier::Large => &self.large,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        let table = BenchmarkTable::default();
        assert_eq!(table.tier_for(0.0), BusinessTier::Small);
        assert_eq!(table.tier_for(49_999_999.0), BusinessTier::Small);
        assert_eq!(table.tier_for(50_000_000.0), BusinessTier::Mid);
        assert_eq!(table.tier_for(499_999_999.0), BusinessTier::Mid);
        assert_eq!(table.tier_for(500_000_000.0), BusinessTier::Large);
    }

    #[test]
    fn tier_benchmarks_are_ordered() {
        let table = BenchmarkTable::default();
        for tier in [BusinessTier::Small, BusinessTier::Mid, BusinessTier::Large] {
            let b = table.tier_benchmark(tier);
            assert!(b.margin_min < b.margin_avg && b.margin_avg < b.margin_max);
            assert!(b.growth_good < b.growth_excellent);
        }
    }
}
