//! Strategy comparator — ranks the catalog under a horizon-aware risk
//! policy.
//!
//! Each strategy simulates on its own derived stream (RngBank slot =
//! catalog index), so editing the catalog never perturbs other
//! strategies' draws and a fixed master seed reproduces the whole
//! comparison. Streams are independent by default; correlated market
//! draws across strategies would be an explicit design change.

use crate::{
    error::{AdvisorError, AdvisorResult},
    rng::RngBank,
    simulate::{assess, simulate, PortfolioStrategy, RiskTier, SimulationParams, Viability},
};
use serde::Serialize;
use std::cmp::Ordering;

/// One ranked row of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub strategy_name: String,
    pub final_real: f64,
    pub gain_real: f64,
    pub real_roi_pct: f64,
    pub annualized_return_pct: f64,
    pub risk_tier: RiskTier,
    pub viability: Viability,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Total order by real ROI descending, ties by name.
    pub rankings: Vec<StrategyOutcome>,
    pub recommended: String,
    pub alternative: Option<String>,
    pub rationale: String,
}

/// Simulate every catalog entry (inflation-adjusted) and rank by real
/// ROI. The recommended choice follows the horizon policy:
/// under 12 months capital preservation, 12–35 months best return at
/// low/medium risk, 36+ months best return outright.
pub fn compare(
    params: &SimulationParams,
    catalog: &[PortfolioStrategy],
    master_seed: u64,
) -> AdvisorResult<ComparisonResult> {
    if catalog.is_empty() {
        return Err(AdvisorError::InvalidParameter(
            "strategy catalog is empty".to_string(),
        ));
    }

    let bank = RngBank::new(master_seed);
    let sim_params = SimulationParams {
        adjust_for_inflation: true,
        ..params.clone()
    };

    let mut rankings = Vec::with_capacity(catalog.len());
    for (slot, strategy) in catalog.iter().enumerate() {
        let mut rng = bank.stream(slot as u64);
        let result = simulate(&sim_params, strategy, &mut rng)?;
        let assessment = assess(&result, strategy, params.horizon_months);

        rankings.push(StrategyOutcome {
            strategy_name: strategy.name.clone(),
            final_real: result.final_real,
            gain_real: result.final_real - result.total_contributed,
            real_roi_pct: result.real_roi_pct,
            annualized_return_pct: result.annualized_return_pct,
            risk_tier: assessment.risk_tier,
            viability: assessment.viability,
        });
    }

    rankings.sort_by(|a, b| {
        b.real_roi_pct
            .partial_cmp(&a.real_roi_pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.strategy_name.cmp(&b.strategy_name))
    });

    let (recommended, alternative, rationale) =
        recommend_choice(&rankings, catalog, params.horizon_months);

    log::info!(
        "compare: horizon={}m recommended='{recommended}' (seed={master_seed})",
        params.horizon_months
    );

    Ok(ComparisonResult {
        rankings,
        recommended,
        alternative,
        rationale,
    })
}

fn recommend_choice(
    rankings: &[StrategyOutcome],
    catalog: &[PortfolioStrategy],
    horizon_months: u32,
) -> (String, Option<String>, String) {
    let top = &rankings[0];

    if horizon_months < 12 {
        // Capital preservation: the lowest-volatility strategy wins,
        // ties broken by real ROI via ranking order.
        let min_vol = catalog
            .iter()
            .map(|s| s.annual_volatility)
            .fold(f64::INFINITY, f64::min);
        let safest = rankings
            .iter()
            .find(|o| {
                catalog
                    .iter()
                    .any(|s| s.name == o.strategy_name && s.annual_volatility <= min_vol)
            })
            .unwrap_or(top);
        let alternative = if top.strategy_name != safest.strategy_name {
            Some(top.strategy_name.clone())
        } else {
            rankings.get(1).map(|o| o.strategy_name.clone())
        };
        return (
            safest.strategy_name.clone(),
            alternative,
            "A short horizon calls for protecting capital; this is the lowest-volatility option."
                .to_string(),
        );
    }

    if horizon_months < 36 {
        let eligible: Vec<&StrategyOutcome> = rankings
            .iter()
            .filter(|o| matches!(o.risk_tier, RiskTier::Low | RiskTier::Medium))
            .collect();
        if let Some(best) = eligible.first() {
            return (
                best.strategy_name.clone(),
                eligible.get(1).map(|o| o.strategy_name.clone()),
                "A medium horizon balances return against security.".to_string(),
            );
        }
        // Catalog of only high-risk strategies: fall through to the top pick.
    }

    (
        top.strategy_name.clone(),
        rankings.get(1).map(|o| o.strategy_name.clone()),
        "A long horizon can ride out volatility in exchange for growth.".to_string(),
    )
}
