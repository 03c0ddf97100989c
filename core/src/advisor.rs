//! The advisor — an explicit service object over an immutable ledger
//! snapshot and shared read-only reference data.
//!
//! RULES:
//!   - No ambient global state. Everything the advisor needs is
//!     injected at construction.
//!   - Every analysis call allocates its own metrics and results, so
//!     concurrent callers need no locking.

use crate::{
    benchmark::{BenchmarkTable, BusinessTier},
    compare::{compare, ComparisonResult},
    error::{AdvisorError, AdvisorResult},
    ledger::{EntitySummary, Ledger},
    metrics::{metrics_for, EntityMetrics},
    recommend::{business_recommendations, personal_recommendations, Recommendation},
    rng::StreamRng,
    scoring::{score_business, score_personal, ScoreResult},
    simulate::{simulate, strategy_catalog, PortfolioStrategy, SimulationParams, SimulationResult},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BusinessReport {
    pub tier: BusinessTier,
    pub metrics: EntityMetrics,
    pub score: ScoreResult,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalReport {
    pub metrics: EntityMetrics,
    pub score: ScoreResult,
    pub recommendations: Vec<Recommendation>,
}

pub struct FinancialAdvisor {
    ledger: Ledger,
    benchmarks: BenchmarkTable,
    catalog: Vec<PortfolioStrategy>,
}

impl FinancialAdvisor {
    /// Build an advisor with the default benchmark tables and strategy
    /// catalog.
    pub fn new(ledger: Ledger) -> Self {
        Self::with_reference_data(ledger, BenchmarkTable::default(), strategy_catalog())
    }

    /// Build an advisor with custom reference data. The tables are
    /// read-only for the advisor's lifetime.
    pub fn with_reference_data(
        ledger: Ledger,
        benchmarks: BenchmarkTable,
        catalog: Vec<PortfolioStrategy>,
    ) -> Self {
        Self {
            ledger,
            benchmarks,
            catalog,
        }
    }

    /// Score a business entity and derive its recommendation list.
    pub fn analyze_business(&self, entity_id: &str) -> AdvisorResult<BusinessReport> {
        let metrics = metrics_for(&self.ledger, entity_id)?;
        let tier = self.benchmarks.tier_for(metrics.total_income);
        let bench = self.benchmarks.tier_benchmark(tier);
        let score = score_business(&metrics, tier, bench);
        let recommendations = business_recommendations(&score, &metrics);

        Ok(BusinessReport {
            tier,
            metrics,
            score,
            recommendations,
        })
    }

    /// Score an individual's finances and derive recommendations.
    pub fn analyze_personal(&self, entity_id: &str) -> AdvisorResult<PersonalReport> {
        let metrics = metrics_for(&self.ledger, entity_id)?;
        let score = score_personal(&metrics, &self.benchmarks.personal);
        let recommendations = personal_recommendations(&score, &metrics, &self.benchmarks.personal);

        Ok(PersonalReport {
            metrics,
            score,
            recommendations,
        })
    }

    /// Run one simulation against a named catalog strategy.
    pub fn simulate_strategy(
        &self,
        params: &SimulationParams,
        strategy_name: &str,
        master_seed: u64,
    ) -> AdvisorResult<SimulationResult> {
        let (slot, strategy) = self
            .catalog
            .iter()
            .enumerate()
            .find(|(_, s)| s.name == strategy_name)
            .ok_or_else(|| {
                AdvisorError::InvalidParameter(format!(
                    "unknown strategy '{strategy_name}'"
                ))
            })?;
        let mut rng = StreamRng::new(master_seed, slot as u64);
        simulate(params, strategy, &mut rng)
    }

    /// Rank every catalog strategy for the given parameters.
    pub fn compare_strategies(
        &self,
        params: &SimulationParams,
        master_seed: u64,
    ) -> AdvisorResult<ComparisonResult> {
        compare(params, &self.catalog, master_seed)
    }

    pub fn entities(&self) -> Vec<EntitySummary> {
        self.ledger.summaries()
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    pub fn catalog(&self) -> &[PortfolioStrategy] {
        &self.catalog
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
