//! Investment simulator — stochastic multi-period projection.
//!
//! The simulator never touches ledger data; callers parameterize it
//! directly. All randomness flows through the injected StreamRng, so a
//! fixed seed reproduces a run byte for byte.

use crate::{
    error::{AdvisorError, AdvisorResult},
    rng::StreamRng,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Asset classes a strategy may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    ShortTermBills,
    LongTermBills,
    RealEstateTrusts,
    DomesticEquity,
    GlobalEquity,
}

/// Tolerance for the weights-sum-to-one invariant.
pub const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioStrategy {
    pub name: String,
    /// Must sum to 1.0 within WEIGHT_EPSILON.
    pub asset_weights: BTreeMap<Asset, f64>,
    pub expected_annual_return_pct: f64,
    /// Standard deviation of the modeled monthly return.
    pub annual_volatility: f64,
}

impl PortfolioStrategy {
    fn new(
        name: &str,
        weights: &[(Asset, f64)],
        expected_annual_return_pct: f64,
        annual_volatility: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            asset_weights: weights.iter().copied().collect(),
            expected_annual_return_pct,
            annual_volatility,
        }
    }

    pub fn weights_sum(&self) -> f64 {
        self.asset_weights.values().sum()
    }
}

/// The fixed strategy catalog: three blended profiles plus the
/// single-asset reference strategies.
pub fn strategy_catalog() -> Vec<PortfolioStrategy> {
    vec![
        PortfolioStrategy::new(
            "conservative",
            &[
                (Asset::ShortTermBills, 0.60),
                (Asset::LongTermBills, 0.30),
                (Asset::RealEstateTrusts, 0.10),
            ],
            9.5,
            0.02,
        ),
        PortfolioStrategy::new(
            "moderate",
            &[
                (Asset::ShortTermBills, 0.30),
                (Asset::RealEstateTrusts, 0.40),
                (Asset::DomesticEquity, 0.20),
                (Asset::GlobalEquity, 0.10),
            ],
            10.8,
            0.08,
        ),
        PortfolioStrategy::new(
            "aggressive",
            &[
                (Asset::GlobalEquity, 0.50),
                (Asset::DomesticEquity, 0.30),
                (Asset::RealEstateTrusts, 0.15),
                (Asset::LongTermBills, 0.05),
            ],
            11.5,
            0.15,
        ),
        PortfolioStrategy::new("bills", &[(Asset::ShortTermBills, 1.0)], 10.5, 0.01),
        PortfolioStrategy::new("reits", &[(Asset::RealEstateTrusts, 1.0)], 8.5, 0.05),
        PortfolioStrategy::new("global_equity", &[(Asset::GlobalEquity, 1.0)], 10.5, 0.18),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParams {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub horizon_months: u32,
    pub adjust_for_inflation: bool,
    pub annual_inflation_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrace {
    pub month_index: u32,
    pub nominal_balance: f64,
    pub real_balance: f64,
    pub contribution_to_date: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub strategy_name: String,
    /// One entry per month; length equals the requested horizon.
    pub monthly_trace: Vec<MonthlyTrace>,
    pub total_contributed: f64,
    pub final_nominal: f64,
    pub final_real: f64,
    pub nominal_roi_pct: f64,
    pub real_roi_pct: f64,
    pub annualized_return_pct: f64,
}

/// Annual percentage to the equivalent monthly compounding rate.
pub fn monthly_rate(annual_pct: f64) -> f64 {
    (1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

fn validate(params: &SimulationParams, strategy: &PortfolioStrategy) -> AdvisorResult<()> {
    if params.horizon_months < 1 {
        return Err(AdvisorError::InvalidParameter(
            "horizon_months must be at least 1".to_string(),
        ));
    }
    if !params.initial_amount.is_finite() || params.initial_amount < 0.0 {
        return Err(AdvisorError::InvalidParameter(format!(
            "initial_amount {} must be non-negative",
            params.initial_amount
        )));
    }
    if !params.monthly_contribution.is_finite() || params.monthly_contribution < 0.0 {
        return Err(AdvisorError::InvalidParameter(format!(
            "monthly_contribution {} must be non-negative",
            params.monthly_contribution
        )));
    }
    let sum = strategy.weights_sum();
    if (sum - 1.0).abs() > WEIGHT_EPSILON {
        return Err(AdvisorError::InvalidParameter(format!(
            "strategy '{}' weights sum to {sum}, expected 1.0",
            strategy.name
        )));
    }
    Ok(())
}

/// Project a portfolio month by month under stochastic returns.
///
/// Each month applies `balance × (monthly_rate + N(0, volatility))`,
/// then adds the contribution (every month except the last). The real
/// balance deflates the nominal one by compound monthly inflation.
pub fn simulate(
    params: &SimulationParams,
    strategy: &PortfolioStrategy,
    rng: &mut StreamRng,
) -> AdvisorResult<SimulationResult> {
    validate(params, strategy)?;

    let rate = monthly_rate(strategy.expected_annual_return_pct);
    let inflation = monthly_rate(params.annual_inflation_pct);

    let mut balance = params.initial_amount;
    let mut contributed = params.initial_amount;
    let mut trace = Vec::with_capacity(params.horizon_months as usize);

    for month in 1..=params.horizon_months {
        let perturbation = rng.normal(0.0, strategy.annual_volatility);
        balance += balance * (rate + perturbation);

        if month < params.horizon_months {
            balance += params.monthly_contribution;
            contributed += params.monthly_contribution;
        }

        let real_balance = if params.adjust_for_inflation {
            balance / (1.0 + inflation).powi(month as i32)
        } else {
            balance
        };

        trace.push(MonthlyTrace {
            month_index: month,
            nominal_balance: balance,
            real_balance,
            contribution_to_date: contributed,
        });
    }

    // Horizon is >= 1, so the trace is never empty.
    let last = trace.last().expect("non-empty trace");
    let final_nominal = last.nominal_balance;
    let final_real = last.real_balance;

    let nominal_roi_pct = roi_pct(final_nominal, contributed);
    let real_roi_pct = roi_pct(final_real, contributed);

    let annualized_return_pct = if params.initial_amount > 0.0 {
        ((final_nominal / params.initial_amount).powf(12.0 / params.horizon_months as f64) - 1.0)
            * 100.0
    } else {
        log::warn!(
            "simulate('{}'): zero initial amount, annualized return reported as 0",
            strategy.name
        );
        0.0
    };

    log::debug!(
        "simulate('{}'): {} months, final_nominal={final_nominal:.2} real_roi={real_roi_pct:.2}%",
        strategy.name,
        params.horizon_months
    );

    Ok(SimulationResult {
        strategy_name: strategy.name.clone(),
        monthly_trace: trace,
        total_contributed: contributed,
        final_nominal,
        final_real,
        nominal_roi_pct,
        real_roi_pct,
        annualized_return_pct,
    })
}

fn roi_pct(final_balance: f64, contributed: f64) -> f64 {
    if contributed > 0.0 {
        (final_balance - contributed) / contributed * 100.0
    } else {
        0.0
    }
}

// ── Per-run assessment ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Viability {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationAssessment {
    pub risk_tier: RiskTier,
    pub viability: Viability,
    pub notes: Vec<String>,
}

pub fn risk_tier(strategy: &PortfolioStrategy) -> RiskTier {
    if strategy.annual_volatility < 0.05 {
        RiskTier::Low
    } else if strategy.annual_volatility < 0.12 {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// Classify a finished run by risk and projected viability, with
/// horizon-appropriate notes.
pub fn assess(
    result: &SimulationResult,
    strategy: &PortfolioStrategy,
    horizon_months: u32,
) -> SimulationAssessment {
    let mut notes = Vec::new();

    let roi = result.real_roi_pct;
    let viability = if roi < 5.0 {
        notes.push(
            "Projected return trails inflation. Consider higher-yield options.".to_string(),
        );
        Viability::Low
    } else if roi < 10.0 {
        notes.push("Moderate return. Diversifying could improve the outcome.".to_string());
        Viability::Medium
    } else {
        notes.push("Solid projected return. Keep the contribution discipline.".to_string());
        Viability::High
    };

    let tier = risk_tier(strategy);
    if tier == RiskTier::High {
        notes.push("High volatility. Only advisable with a long horizon (5+ years).".to_string());
    }

    if horizon_months < 12 {
        notes.push("Short horizon: favor low-risk instruments.".to_string());
    } else if horizon_months < 36 {
        notes.push("Medium horizon: a balanced mix of fixed income and equity fits.".to_string());
    } else {
        notes.push(
            "Long horizon: more risk can be taken for higher potential returns.".to_string(),
        );
    }

    SimulationAssessment {
        risk_tier: tier,
        viability,
        notes,
    }
}
