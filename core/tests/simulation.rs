//! Simulator properties: seeded determinism, the compounding identity
//! at zero volatility, contribution scheduling, inflation deflation,
//! parameter validation, and return monotonicity.

use finhealth_core::{
    error::AdvisorError,
    rng::StreamRng,
    simulate::{simulate, Asset, PortfolioStrategy, SimulationParams},
};
use std::collections::BTreeMap;

fn single_asset(name: &str, annual_return_pct: f64, volatility: f64) -> PortfolioStrategy {
    let mut asset_weights = BTreeMap::new();
    asset_weights.insert(Asset::GlobalEquity, 1.0);
    PortfolioStrategy {
        name: name.to_string(),
        asset_weights,
        expected_annual_return_pct: annual_return_pct,
        annual_volatility: volatility,
    }
}

fn params(initial: f64, monthly: f64, months: u32) -> SimulationParams {
    SimulationParams {
        initial_amount: initial,
        monthly_contribution: monthly,
        horizon_months: months,
        adjust_for_inflation: false,
        annual_inflation_pct: 4.5,
    }
}

#[test]
fn same_seed_produces_identical_traces() {
    let strategy = single_asset("volatile", 11.0, 0.15);
    let p = params(25_000.0, 1_000.0, 60);

    let a = simulate(&p, &strategy, &mut StreamRng::new(0xDEAD_BEEF, 2)).unwrap();
    let b = simulate(&p, &strategy, &mut StreamRng::new(0xDEAD_BEEF, 2)).unwrap();

    assert_eq!(a, b, "identical seeds must reproduce the run exactly");
}

#[test]
fn different_seeds_diverge() {
    let strategy = single_asset("volatile", 11.0, 0.15);
    let p = params(25_000.0, 1_000.0, 60);

    let a = simulate(&p, &strategy, &mut StreamRng::new(1, 0)).unwrap();
    let b = simulate(&p, &strategy, &mut StreamRng::new(2, 0)).unwrap();

    assert_ne!(
        a.final_nominal, b.final_nominal,
        "different seeds should be observable in the outcome"
    );
}

/// At zero volatility a 10% strategy over 12 months is the compounding
/// identity: 10 000 × 1.10 = 11 000.
#[test]
fn zero_volatility_matches_compound_interest() {
    let strategy = single_asset("fixed", 10.0, 0.0);
    let p = params(10_000.0, 0.0, 12);

    let r = simulate(&p, &strategy, &mut StreamRng::new(42, 0)).unwrap();

    assert!(
        (r.final_nominal - 11_000.0).abs() < 1e-6,
        "final was {}",
        r.final_nominal
    );
    assert!((r.annualized_return_pct - 10.0).abs() < 1e-6);
    assert!((r.nominal_roi_pct - 10.0).abs() < 1e-6);
}

#[test]
fn trace_length_equals_horizon() {
    let strategy = single_asset("fixed", 8.0, 0.0);
    for months in [1, 7, 24, 120] {
        let r = simulate(&params(1_000.0, 50.0, months), &strategy, &mut StreamRng::new(3, 0))
            .unwrap();
        assert_eq!(r.monthly_trace.len(), months as usize);
    }
}

#[test]
fn contributions_skip_the_final_month() {
    let strategy = single_asset("fixed", 0.0, 0.0);
    let p = params(10_000.0, 1_000.0, 12);

    let r = simulate(&p, &strategy, &mut StreamRng::new(9, 0)).unwrap();

    // 10 000 initial + 11 contributions; none in month 12.
    assert_eq!(r.total_contributed, 21_000.0);
    assert_eq!(r.monthly_trace[11].contribution_to_date, 21_000.0);
    assert_eq!(r.monthly_trace[10].contribution_to_date, 21_000.0);
    assert_eq!(r.monthly_trace[9].contribution_to_date, 20_000.0);
}

#[test]
fn inflation_deflates_the_real_balance() {
    let strategy = single_asset("fixed", 10.0, 0.0);
    let p = SimulationParams {
        adjust_for_inflation: true,
        ..params(10_000.0, 0.0, 12)
    };

    let r = simulate(&p, &strategy, &mut StreamRng::new(4, 0)).unwrap();

    // Twelve months of compound monthly inflation is the annual rate.
    let expected_real = 11_000.0 / 1.045;
    assert!(
        (r.final_real - expected_real).abs() < 1e-6,
        "real was {}, expected {expected_real}",
        r.final_real
    );
    assert!(r.real_roi_pct < r.nominal_roi_pct);
}

#[test]
fn zero_initial_amount_reports_zero_annualized_return() {
    let strategy = single_asset("fixed", 10.0, 0.0);
    let p = params(0.0, 100.0, 12);

    let r = simulate(&p, &strategy, &mut StreamRng::new(5, 0)).unwrap();

    assert_eq!(r.annualized_return_pct, 0.0);
    assert_eq!(r.total_contributed, 1_100.0);
    assert!(r.final_nominal > 0.0);
}

#[test]
fn malformed_parameters_are_rejected_before_computation() {
    let strategy = single_asset("fixed", 10.0, 0.0);
    let mut rng = StreamRng::new(6, 0);

    let cases = [
        params(10_000.0, 0.0, 0),
        params(-1.0, 0.0, 12),
        params(10_000.0, -50.0, 12),
    ];
    for p in cases {
        let err = simulate(&p, &strategy, &mut rng).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidParameter(_)), "got {err}");
    }
}

#[test]
fn unbalanced_weights_are_rejected() {
    let mut strategy = single_asset("lopsided", 10.0, 0.0);
    strategy.asset_weights.insert(Asset::ShortTermBills, 0.25);

    let err = simulate(&params(1_000.0, 0.0, 12), &strategy, &mut StreamRng::new(7, 0))
        .unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidParameter(_)), "got {err}");
}

/// Holding volatility and horizon fixed, a higher expected return must
/// yield a higher mean final balance across seeded runs.
#[test]
fn higher_expected_return_wins_on_average() {
    let faster = single_asset("faster", 12.0, 0.05);
    let slower = single_asset("slower", 8.0, 0.05);
    let p = params(10_000.0, 200.0, 36);

    let mean_final = |strategy: &PortfolioStrategy| -> f64 {
        let total: f64 = (0..50)
            .map(|seed| {
                simulate(&p, strategy, &mut StreamRng::new(seed, 0))
                    .unwrap()
                    .final_nominal
            })
            .sum();
        total / 50.0
    };

    assert!(
        mean_final(&faster) > mean_final(&slower),
        "12% strategy should beat 8% on identical draws"
    );
}
