//! Metric aggregator — trailing-window KPIs per entity.
//!
//! Windows anchor to the entity's last observed transaction date, never
//! the wall clock: stale historical data must not collapse into spurious
//! zero windows, and fixed fixtures must aggregate identically forever.
//!
//! Derived metrics live for one scoring call. Nothing here is persisted.

use crate::{
    error::AdvisorResult,
    ledger::{FlowType, Ledger},
    types::EntityId,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Trailing window length for annual aggregation.
pub const TRAILING_WINDOW_DAYS: i64 = 365;

/// Bucket length for quarter-over-quarter growth.
pub const QUARTER_DAYS: i64 = 90;

/// Below this many records in the window, results carry a
/// low-confidence flag (scoring degrades gracefully instead of failing).
pub const MIN_WINDOW_TRANSACTIONS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityMetrics {
    pub entity_id: EntityId,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub total_income: f64,
    pub total_expense: f64,
    pub net_result: f64,
    /// net_result / total_income × 100; exactly 0 when income is 0.
    pub margin_pct: f64,
    /// Quarter-over-quarter income growth, %.
    pub growth_pct: f64,
    /// Expense flows only, within the trailing window.
    /// BTreeMap so iteration order (and everything derived from it)
    /// is deterministic.
    pub expense_by_category: BTreeMap<String, f64>,
    pub transaction_count: usize,
    pub low_confidence: bool,
}

impl EntityMetrics {
    pub fn monthly_income(&self) -> f64 {
        self.total_income / 12.0
    }

    pub fn monthly_expense(&self) -> f64 {
        self.total_expense / 12.0
    }

    pub fn monthly_net(&self) -> f64 {
        self.net_result / 12.0
    }

    /// Largest expense category. Ties resolve to the last label in key
    /// order, which is stable across calls.
    pub fn largest_expense_category(&self) -> Option<(&str, f64)> {
        self.expense_by_category
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(label, amount)| (label.as_str(), *amount))
    }
}

/// Aggregate the entity's trailing-12-month window, anchored to its
/// latest transaction date.
pub fn metrics_for(ledger: &Ledger, entity_id: &str) -> AdvisorResult<EntityMetrics> {
    let as_of = ledger.latest_date_for(entity_id)?;
    let window_start = as_of - Duration::days(TRAILING_WINDOW_DAYS);
    let in_window = ledger.transactions_for(entity_id, window_start, as_of)?;

    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut expense_by_category: BTreeMap<String, f64> = BTreeMap::new();

    for txn in &in_window {
        match txn.flow_type {
            FlowType::Income => total_income += txn.amount,
            FlowType::Expense => {
                total_expense += txn.amount;
                *expense_by_category.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
            }
        }
    }

    let net_result = total_income - total_expense;
    let margin_pct = if total_income > 0.0 {
        net_result / total_income * 100.0
    } else {
        0.0
    };

    let growth_pct = quarter_growth(ledger, entity_id, as_of)?;

    let transaction_count = in_window.len();
    let low_confidence = transaction_count < MIN_WINDOW_TRANSACTIONS;
    if low_confidence {
        log::debug!(
            "{entity_id}: only {transaction_count} transactions in window, flagging low confidence"
        );
    }

    Ok(EntityMetrics {
        entity_id: entity_id.to_string(),
        window_start,
        window_end: as_of,
        total_income,
        total_expense,
        net_result,
        margin_pct,
        growth_pct,
        expense_by_category,
        transaction_count,
        low_confidence,
    })
}

/// Income in the most recent 90-day bucket vs the preceding one.
/// Buckets are non-overlapping: recent = (as_of−90, as_of], prior =
/// (as_of−180, as_of−90].
///
/// Prior-quarter zero maps to 0 when both buckets are empty and to 100
/// when revenue appears from nothing — growth off a zero base has no
/// percentage, so the value is a convention, not a measurement.
fn quarter_growth(ledger: &Ledger, entity_id: &str, as_of: NaiveDate) -> AdvisorResult<f64> {
    let recent_start = as_of - Duration::days(QUARTER_DAYS);
    let prior_start = as_of - Duration::days(2 * QUARTER_DAYS);

    let span = ledger.transactions_for(entity_id, prior_start, as_of)?;
    let mut recent = 0.0;
    let mut prior = 0.0;
    for txn in span {
        if txn.flow_type != FlowType::Income {
            continue;
        }
        if txn.date > recent_start {
            recent += txn.amount;
        } else if txn.date > prior_start {
            prior += txn.amount;
        }
    }

    let growth = if prior > 0.0 {
        (recent - prior) / prior * 100.0
    } else if recent == 0.0 {
        0.0
    } else {
        100.0
    };
    Ok(growth)
}
