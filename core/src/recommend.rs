//! Recommendation generator — maps (state, metrics) to a prioritized,
//! quantified action list.
//!
//! RULES:
//!   - Dispatch is a match on HealthState. No free-form text matching.
//!   - No randomness: identical inputs always produce identical output.
//!   - Monetary targets are computed from the entity's own metrics.

use crate::{
    benchmark::PersonalNorms,
    metrics::EntityMetrics,
    scoring::{HealthState, ScoreResult},
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecCategory {
    Investment,
    Optimization,
    Financing,
    Urgent,
    Savings,
    Education,
    Income,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: RecCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub actions: Vec<String>,
    pub expected_benefit: String,
    pub risk_level: RiskLevel,
}

// ── Business ───────────────────────────────────────────────────────

/// Growth-oriented, cost-oriented, or restructuring recommendations,
/// selected by the classifier's state.
pub fn business_recommendations(
    score: &ScoreResult,
    metrics: &EntityMetrics,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let margin = metrics.margin_pct;
    let income = metrics.total_income;
    let expenses = metrics.total_expense;
    let net = metrics.net_result;

    match score.state {
        HealthState::Excellent | HealthState::Good => {
            recs.push(Recommendation {
                category: RecCategory::Investment,
                priority: Priority::High,
                title: "Business expansion".to_string(),
                description: format!(
                    "With a {margin:.1}% margin and positive momentum, conditions favor \
                     expansion."
                ),
                actions: vec![
                    format!(
                        "Invest in marketing: {:.0} (15% of net result)",
                        net * 0.15
                    ),
                    "Hire strategically for growth areas".to_string(),
                    "Open a new sales channel or location".to_string(),
                ],
                expected_benefit: "Projected revenue increase of 20-30% over 12 months"
                    .to_string(),
                risk_level: RiskLevel::Low,
            });

            recs.push(Recommendation {
                category: RecCategory::Investment,
                priority: Priority::Medium,
                title: "Corporate emergency fund".to_string(),
                description: "Build a financial cushion for the unexpected.".to_string(),
                actions: vec![
                    format!(
                        "Set aside {:.0} (about 3 months of operating costs)",
                        expenses * 0.25
                    ),
                    "Park the reserve in short-term bills for liquidity".to_string(),
                    "Keep an unused credit line available".to_string(),
                ],
                expected_benefit: "Financial security and a stronger credit profile".to_string(),
                risk_level: RiskLevel::None,
            });

            if margin > 15.0 {
                recs.push(Recommendation {
                    category: RecCategory::Investment,
                    priority: Priority::Medium,
                    title: "Revenue diversification".to_string(),
                    description: "Healthy margins leave room to diversify income sources."
                        .to_string(),
                    actions: vec![
                        "Develop a complementary product or service".to_string(),
                        "Explore adjacent markets".to_string(),
                        format!("R&D budget: {:.0} (5% of income)", income * 0.05),
                    ],
                    expected_benefit: "Lower concentration risk and new revenue sources"
                        .to_string(),
                    risk_level: RiskLevel::Medium,
                });
            }
        }
        HealthState::Regular => {
            recs.push(Recommendation {
                category: RecCategory::Optimization,
                priority: Priority::High,
                title: "Operating cost reduction".to_string(),
                description: format!(
                    "A {margin:.1}% margin signals pressure on the cost structure."
                ),
                actions: vec![
                    "Renegotiate terms with key suppliers".to_string(),
                    format!(
                        "Reduction target: {:.0} (10% of annual expenses)",
                        expenses * 0.10
                    ),
                    "Automate repetitive processes".to_string(),
                ],
                expected_benefit: format!("Margin lift toward {:.1}%", margin + 10.0),
                risk_level: RiskLevel::Low,
            });

            if let Some((label, amount)) = metrics.largest_expense_category() {
                recs.push(Recommendation {
                    category: RecCategory::Optimization,
                    priority: Priority::High,
                    title: format!("Optimize {label}"),
                    description: format!(
                        "{label} is the largest expense category: {amount:.0} per year."
                    ),
                    actions: vec![
                        format!("Source cheaper alternatives for {label}"),
                        "Put spend controls in place".to_string(),
                        format!("Reduction target: {:.0} (15%)", amount * 0.15),
                    ],
                    expected_benefit: "Capital freed for strategic areas".to_string(),
                    risk_level: RiskLevel::Low,
                });
            }

            recs.push(Recommendation {
                category: RecCategory::Financing,
                priority: Priority::Medium,
                title: "Working capital line".to_string(),
                description: "Smooth cash flow with strategic financing.".to_string(),
                actions: vec![
                    format!("Credit line of {:.0} (15% of annual income)", income * 0.15),
                    "Draw only to cover cash-flow gaps".to_string(),
                    "Keep utilization under 30%".to_string(),
                ],
                expected_benefit: "Steadier cash flow and access to early-payment discounts"
                    .to_string(),
                risk_level: RiskLevel::Medium,
            });
        }
        HealthState::Critical => {
            recs.push(Recommendation {
                category: RecCategory::Urgent,
                priority: Priority::Critical,
                title: "Financial rescue plan".to_string(),
                description: "Critical state requires immediate action.".to_string(),
                actions: vec![
                    "Renegotiate outstanding debt".to_string(),
                    format!(
                        "Cut fixed costs by {:.0} (30% of annual expenses)",
                        expenses * 0.30
                    ),
                    "Accelerate collections with early-payment discounts".to_string(),
                ],
                expected_benefit: "Stabilization within 3-6 months".to_string(),
                risk_level: RiskLevel::High,
            });

            recs.push(Recommendation {
                category: RecCategory::Financing,
                priority: Priority::High,
                title: "Debt restructuring".to_string(),
                description: "Consolidate obligations to relieve monthly cash flow.".to_string(),
                actions: vec![
                    "Negotiate longer terms with creditors".to_string(),
                    "Seek a consolidation loan at a better rate".to_string(),
                    "Put a structured repayment plan in place".to_string(),
                ],
                expected_benefit: "Less pressure on monthly cash flow".to_string(),
                risk_level: RiskLevel::Medium,
            });
        }
    }

    recs
}

// ── Personal ───────────────────────────────────────────────────────

/// Personal-finance recommendations, selected by state and quantified
/// from monthly figures.
pub fn personal_recommendations(
    score: &ScoreResult,
    metrics: &EntityMetrics,
    norms: &PersonalNorms,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let rate = metrics.margin_pct;
    let monthly_income = metrics.monthly_income();
    let monthly_expense = metrics.monthly_expense();
    let monthly_savings = metrics.monthly_net();

    match score.state {
        HealthState::Excellent | HealthState::Good => {
            recs.push(Recommendation {
                category: RecCategory::Investment,
                priority: Priority::High,
                title: "Diversified investment portfolio".to_string(),
                description: format!(
                    "With a {rate:.1}% savings rate you can start building wealth."
                ),
                actions: vec![
                    format!(
                        "Short-term bills: {:.0}/month (30% — liquidity)",
                        monthly_savings * 0.30
                    ),
                    format!(
                        "Index funds: {:.0}/month (40% — growth)",
                        monthly_savings * 0.40
                    ),
                    format!(
                        "Real-estate trusts: {:.0}/month (30% — passive income)",
                        monthly_savings * 0.30
                    ),
                ],
                expected_benefit: "Projected annual return of 8-12%".to_string(),
                risk_level: RiskLevel::Medium,
            });

            recs.push(Recommendation {
                category: RecCategory::Investment,
                priority: Priority::High,
                title: "Complete emergency fund".to_string(),
                description: "Secure your financial stability.".to_string(),
                actions: vec![
                    format!(
                        "Target: {:.0} ({:.0} months of expenses)",
                        monthly_expense * norms.emergency_fund_months,
                        norms.emergency_fund_months
                    ),
                    format!("Projected savings: {:.0} per year", monthly_savings * 12.0),
                    "Hold it in short-term bills or a high-yield account".to_string(),
                ],
                expected_benefit: "Peace of mind against the unexpected".to_string(),
                risk_level: RiskLevel::None,
            });

            if rate > 20.0 {
                recs.push(Recommendation {
                    category: RecCategory::Investment,
                    priority: Priority::Medium,
                    title: "Real estate purchase".to_string(),
                    description: "Consider property to diversify further.".to_string(),
                    actions: vec![
                        format!("Savings over 3 years: {:.0}", monthly_savings * 36.0),
                        "Enough for a property down payment".to_string(),
                        "Take advantage of mortgage credit at a good rate".to_string(),
                    ],
                    expected_benefit: "Equity, appreciation, and rental income".to_string(),
                    risk_level: RiskLevel::Medium,
                });
            }
        }
        HealthState::Regular => {
            recs.push(Recommendation {
                category: RecCategory::Optimization,
                priority: Priority::High,
                title: "Systematic savings plan".to_string(),
                description: format!("A {rate:.1}% savings rate needs to rise."),
                actions: vec![
                    "Target: save 15% of income".to_string(),
                    format!("That means {:.0} per month", monthly_income * 0.15),
                    "Automate the transfer on payday".to_string(),
                ],
                expected_benefit: format!(
                    "{:.0} accumulated in one year",
                    monthly_income * 0.15 * 12.0
                ),
                risk_level: RiskLevel::None,
            });

            let discretionary_total: f64 = norms
                .discretionary_categories
                .iter()
                .filter_map(|cat| metrics.expense_by_category.get(cat))
                .sum();
            if metrics.total_income > 0.0
                && discretionary_total / metrics.total_income * 100.0 > norms.discretionary_max_pct
            {
                recs.push(Recommendation {
                    category: RecCategory::Optimization,
                    priority: Priority::High,
                    title: "Cut discretionary spending".to_string(),
                    description: format!(
                        "Discretionary spend is {discretionary_total:.0} per year."
                    ),
                    actions: vec![
                        format!(
                            "Cut 30%: saves {:.0} per year",
                            discretionary_total * 0.30
                        ),
                        "Set a monthly budget for optional spend".to_string(),
                        "Favor free or low-cost alternatives".to_string(),
                    ],
                    expected_benefit: "Capital freed for saving and investing".to_string(),
                    risk_level: RiskLevel::None,
                });
            }

            recs.push(Recommendation {
                category: RecCategory::Education,
                priority: Priority::Medium,
                title: "Grow your income".to_string(),
                description: "The best investment: yourself.".to_string(),
                actions: vec![
                    "Professional certification or technical course".to_string(),
                    format!("Suggested budget: {:.0}", monthly_income * 1.5),
                    "Expected payoff: 20-30% income growth within 12 months".to_string(),
                ],
                expected_benefit: format!(
                    "Income up by {:.0} per month",
                    monthly_income * 0.25
                ),
                risk_level: RiskLevel::Low,
            });
        }
        HealthState::Critical => {
            recs.push(Recommendation {
                category: RecCategory::Urgent,
                priority: Priority::Critical,
                title: "Personal rescue plan".to_string(),
                description: "Immediate action is needed.".to_string(),
                actions: vec![
                    "Build a strict survival budget".to_string(),
                    "Eliminate all non-essential spending".to_string(),
                    format!(
                        "Minimum savings target: {:.0} per month (5%)",
                        monthly_income * 0.05
                    ),
                ],
                expected_benefit: "Stabilization within 6 months".to_string(),
                risk_level: RiskLevel::High,
            });

            recs.push(Recommendation {
                category: RecCategory::Financing,
                priority: Priority::High,
                title: "Debt consolidation".to_string(),
                description: "If you carry debt, consolidate for a lower rate.".to_string(),
                actions: vec![
                    "Negotiate lower rates with lenders".to_string(),
                    "Consider a consolidation loan".to_string(),
                    "Pay the highest-interest debt first".to_string(),
                ],
                expected_benefit: "Lower interest burden and monthly pressure".to_string(),
                risk_level: RiskLevel::Medium,
            });

            recs.push(Recommendation {
                category: RecCategory::Income,
                priority: Priority::High,
                title: "Additional income source".to_string(),
                description: "Consider temporary supplemental work.".to_string(),
                actions: vec![
                    "Freelance within your field".to_string(),
                    "Sell non-essential items".to_string(),
                    "Part-time weekend work".to_string(),
                ],
                expected_benefit: format!(
                    "Extra income of {:.0} per month",
                    monthly_income * 0.30
                ),
                risk_level: RiskLevel::Low,
            });
        }
    }

    // Universal retirement recommendation when the ledger shows little
    // or no dedicated savings outflow.
    let savings_spend = metrics
        .expense_by_category
        .get(&norms.savings_category)
        .copied()
        .unwrap_or(0.0);
    if savings_spend < metrics.total_income * 0.10 {
        recs.push(Recommendation {
            category: RecCategory::Savings,
            priority: if score.state == HealthState::Critical {
                Priority::Medium
            } else {
                Priority::High
            },
            title: "Retirement contributions".to_string(),
            description: "It is never too early or too late to fund retirement.".to_string(),
            actions: vec![
                format!(
                    "Voluntary monthly contribution: {:.0} (5% of income)",
                    monthly_income * 0.05
                ),
                "Compound growth does the heavy lifting over decades".to_string(),
            ],
            expected_benefit: "Long-term security".to_string(),
            risk_level: RiskLevel::None,
        });
    }

    recs
}
