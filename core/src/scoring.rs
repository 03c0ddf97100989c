//! Scoring classifier — metrics plus benchmarks in, a 0–100 score and a
//! discrete health state out.
//!
//! RULES:
//!   - The classifier is a pure function; no state survives a call.
//!   - Business-rule differences live in the benchmark tables, not in
//!     code forks. There is exactly one scoring algorithm per variant.
//!   - Implausible metric combinations are flagged, never corrected.

use crate::{
    benchmark::{BusinessTier, PersonalNorms, TierBenchmark},
    metrics::EntityMetrics,
    types::EntityId,
};
use serde::Serialize;

/// Discrete health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthState {
    Excellent,
    Good,
    Regular,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub entity_id: EntityId,
    /// Clamped to [0, 100].
    pub score: u32,
    pub state: HealthState,
    pub description: String,
    pub alerts: Vec<String>,
    /// Advisory only — statistically implausible metric combinations.
    pub coherence_flags: Vec<String>,
    pub low_confidence: bool,
}

// ── Business variant ───────────────────────────────────────────────

/// Score a business entity against its size-tier benchmark.
///
/// Components: margin 0–40, growth 0–30, absolute profitability 0–20,
/// coherence ±10. State thresholds 70/50/30 with a margin gate: point
/// totals alone cannot promote past a weak margin.
pub fn score_business(
    metrics: &EntityMetrics,
    tier: BusinessTier,
    bench: &TierBenchmark,
) -> ScoreResult {
    let mut score: i32 = 0;
    let mut alerts = Vec::new();
    let mut coherence_flags = Vec::new();

    let margin = metrics.margin_pct;
    let growth = metrics.growth_pct;
    let net = metrics.net_result;
    let income = metrics.total_income;

    // 1. Margin vs tier benchmark (0–40)
    if margin >= bench.margin_max {
        score += 40;
    } else if margin >= bench.margin_avg {
        score += 30;
    } else if margin >= bench.margin_min {
        score += 20;
    } else if margin >= 0.0 {
        score += 10;
        alerts.push(format!(
            "Margin of {margin:.1}% is below the industry average ({:.0}%)",
            bench.margin_avg
        ));
    } else {
        alerts.push(format!(
            "CRITICAL: business running at a loss with a {margin:.1}% margin"
        ));
    }

    // 2. Growth vs tier benchmark (0–30)
    if growth >= bench.growth_excellent {
        score += 30;
    } else if growth >= bench.growth_good {
        score += 20;
    } else if growth >= 0.0 {
        score += 10;
    } else if growth >= -10.0 {
        score += 5;
        alerts.push(format!("Revenue decline of {growth:.1}% needs attention"));
    } else {
        alerts.push(format!("CRITICAL: severe revenue decline of {growth:.1}%"));
    }

    // 3. Absolute profitability (0–20)
    if net > income * 0.15 {
        score += 20;
    } else if net > income * 0.10 {
        score += 15;
    } else if net > income * 0.05 {
        score += 10;
    } else if net > 0.0 {
        score += 5;
    } else {
        alerts.push("Business operating at a loss".to_string());
    }

    // 4. Coherence (±10). Penalize and flag, never correct.
    if margin > 30.0 && growth < -15.0 {
        score -= 10;
        coherence_flags
            .push("Inconsistency detected: high margin but sharp revenue decline".to_string());
    } else if margin < 0.0 && growth > 20.0 {
        score -= 10;
        coherence_flags.push(
            "Inconsistency detected: losses alongside rapid growth (possible investment phase)"
                .to_string(),
        );
    } else {
        score += 10;
    }

    screen_plausibility(margin, net, income, &mut coherence_flags);

    if metrics.low_confidence {
        alerts.push(format!(
            "Only {} transactions in the trailing window; results are low-confidence",
            metrics.transaction_count
        ));
    }

    let score = score.clamp(0, 100) as u32;

    // State assignment with the margin gate: EXCELLENT additionally
    // requires non-negative growth and an above-average margin, GOOD an
    // above-minimum margin.
    let (state, description) = if score >= 70 && growth >= 0.0 && margin >= bench.margin_avg {
        (
            HealthState::Excellent,
            format!(
                "{} business with outstanding performance. Margin of {margin:.1}% beats the \
                 sector average ({:.0}%).",
                tier.label(),
                bench.margin_avg
            ),
        )
    } else if score >= 50 && margin >= bench.margin_min {
        (
            HealthState::Good,
            format!(
                "{} business with solid performance. Margin of {margin:.1}% is within the \
                 healthy range.",
                tier.label()
            ),
        )
    } else if score >= 30 {
        (
            HealthState::Regular,
            format!(
                "{} business needs optimization. Margin of {margin:.1}% against a sector \
                 average of {:.0}%.",
                tier.label(),
                bench.margin_avg
            ),
        )
    } else {
        (
            HealthState::Critical,
            format!(
                "{} business in critical condition. Immediate action required.",
                tier.label()
            ),
        )
    };

    for flag in &coherence_flags {
        log::warn!("{}: {flag}", metrics.entity_id);
    }
    log::info!(
        "{}: score={score} state={state:?} margin={margin:.1}% growth={growth:.1}%",
        metrics.entity_id
    );

    ScoreResult {
        entity_id: metrics.entity_id.clone(),
        score,
        state,
        description,
        alerts,
        coherence_flags,
        low_confidence: metrics.low_confidence,
    }
}

/// Advisory screen for metric values that are mathematically possible
/// but empirically implausible. Thin ledgers legitimately produce
/// extreme margins, so these stay warnings.
fn screen_plausibility(margin: f64, net: f64, income: f64, flags: &mut Vec<String>) {
    if margin > 50.0 {
        flags.push(format!(
            "Margin of {margin:.1}% is implausibly high (expected max ~30%)"
        ));
    } else if margin < -50.0 {
        flags.push(format!(
            "Losses of {:.1}% of income are unsustainable",
            margin.abs()
        ));
    }
    if net.abs() > income && income > 0.0 {
        flags.push("Net result exceeds total income".to_string());
    }
}

// ── Personal variant ───────────────────────────────────────────────

/// Derived personal-finance figures; computed per call, never stored.
#[derive(Debug, Clone, Copy)]
struct PersonalFigures {
    savings_rate: f64,
    discretionary_pct: f64,
    emergency_coverage_pct: f64,
}

fn personal_figures(metrics: &EntityMetrics, norms: &PersonalNorms) -> PersonalFigures {
    let savings_rate = metrics.margin_pct;

    let discretionary_total: f64 = norms
        .discretionary_categories
        .iter()
        .filter_map(|cat| metrics.expense_by_category.get(cat))
        .sum();
    let discretionary_pct = if metrics.total_income > 0.0 {
        discretionary_total / metrics.total_income * 100.0
    } else {
        0.0
    };

    // Accumulated savings proxy: the window's positive net result.
    let fund_actual = metrics.net_result.max(0.0);
    let fund_target = metrics.monthly_expense() * norms.emergency_fund_months;
    let emergency_coverage_pct = if fund_target > 0.0 {
        fund_actual / fund_target * 100.0
    } else {
        0.0
    };

    PersonalFigures {
        savings_rate,
        discretionary_pct,
        emergency_coverage_pct,
    }
}

/// Score an individual's finances against the personal norms.
///
/// Components: savings rate 0–40, emergency-fund coverage 0–30,
/// discretionary control 0–20, category diversification 0–10.
pub fn score_personal(metrics: &EntityMetrics, norms: &PersonalNorms) -> ScoreResult {
    let mut score: i32 = 0;
    let mut alerts = Vec::new();
    let mut coherence_flags = Vec::new();

    let figures = personal_figures(metrics, norms);
    let rate = figures.savings_rate;

    // 1. Savings rate (0–40)
    if rate >= norms.savings_excellent_pct {
        score += 40;
    } else if rate >= norms.savings_good_pct {
        score += 30;
    } else if rate >= norms.savings_min_pct {
        score += 20;
    } else if rate >= 0.0 {
        score += 10;
        alerts.push(format!(
            "Savings rate of {rate:.1}% is below the recommended minimum ({:.0}%)",
            norms.savings_min_pct
        ));
    } else {
        alerts.push(format!(
            "CRITICAL: spending exceeds income (savings rate {rate:.1}%)"
        ));
    }

    // 2. Emergency fund coverage (0–30)
    let coverage = figures.emergency_coverage_pct;
    if coverage >= 100.0 {
        score += 30;
    } else if coverage >= 50.0 {
        score += 20;
    } else if coverage >= 25.0 {
        score += 10;
    } else {
        alerts.push(format!(
            "Emergency fund underfunded: {coverage:.0}% of the {:.0}-month target",
            norms.emergency_fund_months
        ));
    }

    // 3. Discretionary spending control (0–20)
    let disc = figures.discretionary_pct;
    if disc <= 10.0 {
        score += 20;
    } else if disc <= norms.discretionary_max_pct {
        score += 15;
    } else if disc <= 30.0 {
        score += 10;
        alerts.push(format!(
            "High discretionary spending: {disc:.1}% of income (recommended: under {:.0}%)",
            norms.discretionary_max_pct
        ));
    } else {
        alerts.push(format!(
            "ALERT: excessive discretionary spending ({disc:.1}% of income)"
        ));
    }

    // 4. Category diversification (0–10)
    let has_savings = metrics
        .expense_by_category
        .contains_key(&norms.savings_category);
    let has_education = metrics
        .expense_by_category
        .contains_key(&norms.education_category);
    score += match (has_savings, has_education) {
        (true, true) => 10,
        (true, false) | (false, true) => 5,
        (false, false) => 0,
    };

    if rate > 50.0 {
        coherence_flags.push(format!(
            "Savings rate of {rate:.1}% is implausibly high for a full-year window"
        ));
    }

    if metrics.low_confidence {
        alerts.push(format!(
            "Only {} transactions in the trailing window; results are low-confidence",
            metrics.transaction_count
        ));
    }

    let score = score.clamp(0, 100) as u32;

    // Personal states use plain thresholds — the margin gate is a
    // business-tier rule.
    let (state, description) = if score >= 70 {
        (
            HealthState::Excellent,
            format!("Personal finances in excellent shape with a {rate:.1}% savings rate."),
        )
    } else if score >= 50 {
        (
            HealthState::Good,
            format!("Good financial health with a {rate:.1}% savings rate."),
        )
    } else if score >= 30 {
        (
            HealthState::Regular,
            format!("Finances need attention. Savings rate: {rate:.1}%."),
        )
    } else {
        (
            HealthState::Critical,
            "Critical financial situation. Urgent action required.".to_string(),
        )
    };

    log::info!(
        "{}: score={score} state={state:?} savings_rate={rate:.1}% discretionary={disc:.1}%",
        metrics.entity_id
    );

    ScoreResult {
        entity_id: metrics.entity_id.clone(),
        score,
        state,
        description,
        alerts,
        coherence_flags,
        low_confidence: metrics.low_confidence,
    }
}
