//! advisor-runner: headless driver for the financial health engine.
//!
//! Usage:
//!   advisor-runner --ledger data.csv                         (list entities)
//!   advisor-runner --ledger data.csv --entity acme --kind business
//!   advisor-runner --ledger data.csv --entity maria --kind personal \
//!       --seed 42 --initial 20000 --monthly 500 --months 24 [--json]
//!
//! The ledger CSV carries the ingestion boundary format:
//!   entity_id,date,flow_type,category,amount

use anyhow::{bail, Context, Result};
use finhealth_core::{
    advisor::{BusinessReport, FinancialAdvisor, PersonalReport},
    compare::ComparisonResult,
    ledger::{Ledger, Transaction},
    recommend::Recommendation,
    scoring::ScoreResult,
    simulate::SimulationParams,
};
use std::env;
use std::fs::File;

#[derive(serde::Serialize)]
struct RunnerOutput {
    business: Option<BusinessReport>,
    personal: Option<PersonalReport>,
    comparison: ComparisonResult,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ledger_path = match arg_value(&args, "--ledger") {
        Some(p) => p.to_string(),
        None => bail!("--ledger <csv> is required"),
    };
    let entity = arg_value(&args, "--entity").map(str::to_string);
    let kind = arg_value(&args, "--kind").unwrap_or("business").to_string();
    let seed = parse_arg(&args, "--seed", 42u64);
    let initial = parse_arg(&args, "--initial", 10_000.0f64);
    let monthly = parse_arg(&args, "--monthly", 0.0f64);
    let months = parse_arg(&args, "--months", 24u32);
    let json_mode = args.iter().any(|a| a == "--json");

    let records = load_ledger(&ledger_path)
        .with_context(|| format!("loading ledger from {ledger_path}"))?;
    log::info!("loaded {} transactions from {ledger_path}", records.len());

    let advisor = FinancialAdvisor::new(Ledger::from_records(records)?);

    let entity = match entity {
        Some(e) => e,
        None => {
            print_entity_listing(&advisor);
            return Ok(());
        }
    };

    let params = SimulationParams {
        initial_amount: initial,
        monthly_contribution: monthly,
        horizon_months: months,
        adjust_for_inflation: true,
        annual_inflation_pct: advisor.benchmarks().market.annual_inflation_pct,
    };

    let (business, personal) = match kind.as_str() {
        "business" => (Some(advisor.analyze_business(&entity)?), None),
        "personal" => (None, Some(advisor.analyze_personal(&entity)?)),
        other => bail!("--kind must be 'business' or 'personal', got '{other}'"),
    };

    let comparison = advisor.compare_strategies(&params, seed)?;

    if json_mode {
        let output = RunnerOutput {
            business,
            personal,
            comparison,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(report) = &business {
        println!("=== BUSINESS ANALYSIS: {entity} ({}) ===", report.tier.label());
        print_score(&report.score);
        println!(
            "  income 12m:  {:.0}\n  expense 12m: {:.0}\n  net:         {:.0}\n  margin:      {:.1}%\n  growth:      {:.1}%",
            report.metrics.total_income,
            report.metrics.total_expense,
            report.metrics.net_result,
            report.metrics.margin_pct,
            report.metrics.growth_pct
        );
        print_recommendations(&report.recommendations);
    }
    if let Some(report) = &personal {
        println!("=== PERSONAL ANALYSIS: {entity} ===");
        print_score(&report.score);
        println!(
            "  income 12m:  {:.0}\n  expense 12m: {:.0}\n  savings:     {:.0} ({:.1}%)",
            report.metrics.total_income,
            report.metrics.total_expense,
            report.metrics.net_result,
            report.metrics.margin_pct
        );
        print_recommendations(&report.recommendations);
    }

    print_comparison(&comparison, &params, seed);
    Ok(())
}

fn load_ledger(path: &str) -> Result<Vec<Transaction>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let txn: Transaction = row?;
        records.push(txn);
    }
    Ok(records)
}

fn print_entity_listing(advisor: &FinancialAdvisor) {
    println!("=== LEDGER ENTITIES ===");
    for summary in advisor.entities() {
        println!(
            "  {:<16} {:>6} records  income {:.0}",
            summary.entity_id, summary.records, summary.total_income
        );
    }
}

fn print_score(score: &ScoreResult) {
    println!("  score: {}/100 [{:?}]", score.score, score.state);
    println!("  {}", score.description);
    for alert in &score.alerts {
        println!("  ! {alert}");
    }
    for flag in &score.coherence_flags {
        println!("  ? {flag}");
    }
}

fn print_recommendations(recs: &[Recommendation]) {
    println!("  --- recommendations ---");
    for rec in recs {
        println!("  [{:?}] {}", rec.priority, rec.title);
        for action in &rec.actions {
            println!("      - {action}");
        }
    }
    println!();
}

fn print_comparison(result: &ComparisonResult, params: &SimulationParams, seed: u64) {
    println!(
        "=== STRATEGY COMPARISON ({} months, seed {seed}) ===",
        params.horizon_months
    );
    for outcome in &result.rankings {
        println!(
            "  {:<14} real {:.0} | gain {:>10.0} | ROI {:>6.2}% | {:?}",
            outcome.strategy_name,
            outcome.final_real,
            outcome.gain_real,
            outcome.real_roi_pct,
            outcome.risk_tier
        );
    }
    println!("  recommended: {}", result.recommended);
    if let Some(alt) = &result.alternative {
        println!("  alternative: {alt}");
    }
    println!("  {}", result.rationale);
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
