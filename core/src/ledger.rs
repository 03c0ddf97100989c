//! Ledger repository — immutable per-entity transaction records.
//!
//! RULE: Only the ledger owns transaction data. Everything downstream
//! reads through `transactions_for`; no record is ever mutated after
//! ingestion. Amounts are non-negative; direction is carried by the
//! flow type, never by sign.

use crate::{
    error::{AdvisorError, AdvisorResult},
    types::EntityId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowType {
    Income,
    Expense,
}

/// One dated, typed, categorized ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub entity_id: EntityId,
    pub date: NaiveDate,
    pub flow_type: FlowType,
    pub category: String,
    pub amount: f64,
}

/// Per-entity listing row, used by tooling to enumerate the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySummary {
    pub entity_id: EntityId,
    pub records: usize,
    pub total_income: f64,
}

/// An immutable snapshot of every entity's transaction history.
/// Records are grouped per entity and kept sorted by date.
#[derive(Debug)]
pub struct Ledger {
    by_entity: BTreeMap<EntityId, Vec<Transaction>>,
}

impl Ledger {
    /// Ingest a record stream. Rejects an empty stream and any record
    /// with a negative or non-finite amount — input is never silently
    /// corrected.
    pub fn from_records(records: Vec<Transaction>) -> AdvisorResult<Self> {
        if records.is_empty() {
            return Err(AdvisorError::InsufficientData {
                context: "ledger ingestion".to_string(),
                found: 0,
                required: 1,
            });
        }

        let mut by_entity: BTreeMap<EntityId, Vec<Transaction>> = BTreeMap::new();
        for txn in records {
            if !txn.amount.is_finite() || txn.amount < 0.0 {
                return Err(AdvisorError::InvalidParameter(format!(
                    "transaction amount {} for entity '{}' on {} must be a non-negative number",
                    txn.amount, txn.entity_id, txn.date
                )));
            }
            by_entity.entry(txn.entity_id.clone()).or_default().push(txn);
        }
        for txns in by_entity.values_mut() {
            txns.sort_by_key(|t| t.date);
        }

        log::debug!("ledger ingested: {} entities", by_entity.len());
        Ok(Self { by_entity })
    }

    /// All records for `entity_id` with `start <= date <= end`.
    ///
    /// Fails with `EntityNotFound` only when the entity has zero
    /// transactions in the full history; an empty window is valid and
    /// yields an empty vec.
    pub fn transactions_for(
        &self,
        entity_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AdvisorResult<Vec<&Transaction>> {
        let txns = self.history_for(entity_id)?;
        Ok(txns
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// The entity's last observed transaction date — the anchor for
    /// trailing-window aggregation.
    pub fn latest_date_for(&self, entity_id: &str) -> AdvisorResult<NaiveDate> {
        let txns = self.history_for(entity_id)?;
        // Non-empty by construction; records are date-sorted.
        Ok(txns[txns.len() - 1].date)
    }

    pub fn transaction_count(&self, entity_id: &str) -> usize {
        self.by_entity.get(entity_id).map_or(0, Vec::len)
    }

    /// Entity ids in deterministic (sorted) order.
    pub fn entity_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.by_entity.keys()
    }

    /// Listing rows sorted by total income descending, ties by id.
    pub fn summaries(&self) -> Vec<EntitySummary> {
        let mut rows: Vec<EntitySummary> = self
            .by_entity
            .iter()
            .map(|(id, txns)| EntitySummary {
                entity_id: id.clone(),
                records: txns.len(),
                total_income: txns
                    .iter()
                    .filter(|t| t.flow_type == FlowType::Income)
                    .map(|t| t.amount)
                    .sum(),
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total_income
                .partial_cmp(&a.total_income)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.entity_id.cmp(&b.entity_id))
        });
        rows
    }

    fn history_for(&self, entity_id: &str) -> AdvisorResult<&Vec<Transaction>> {
        self.by_entity
            .get(entity_id)
            .ok_or_else(|| AdvisorError::EntityNotFound {
                entity_id: entity_id.to_string(),
            })
    }
}
