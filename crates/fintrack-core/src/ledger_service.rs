//! Stateless summary and mutation helpers over a ledger.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use fintrack_domain::{Category, Ledger, Transaction, TransactionKind};

use crate::recurrence::RecurrenceEngine;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Aggregated income/expense totals for a set of transactions.
pub struct LedgerTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

pub struct LedgerService;

impl LedgerService {
    pub fn totals(transactions: &[Transaction]) -> LedgerTotals {
        let mut totals = LedgerTotals::default();
        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
        }
        totals.balance = totals.income - totals.expense;
        totals
    }

    pub fn filtered(
        transactions: &[Transaction],
        kind: Option<TransactionKind>,
    ) -> Vec<&Transaction> {
        transactions
            .iter()
            .filter(|txn| kind.map_or(true, |k| txn.kind == k))
            .collect()
    }

    /// The most recent transactions, newest first.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(limit);
        sorted
    }

    /// Expense totals per category, zero-filled so every category is present.
    pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<Category, f64> {
        let mut result: BTreeMap<Category, f64> =
            Category::ALL.iter().map(|&c| (c, 0.0)).collect();
        for txn in transactions {
            if txn.kind != TransactionKind::Expense {
                continue;
            }
            if let Some(category) = txn.category {
                *result.entry(category).or_insert(0.0) += txn.amount;
            }
        }
        result
    }

    /// Runs the recurrence engine against the ledger's rules, appends the
    /// materialized occurrences, and folds the updated rules back in.
    /// Returns the number of occurrences created.
    pub fn apply_recurring(ledger: &mut Ledger, now: NaiveDateTime) -> usize {
        let outcome = RecurrenceEngine::process(&ledger.recurring_rules, now);
        if outcome.occurrences.is_empty() {
            return 0;
        }
        for updated in outcome.updated_rules {
            if let Some(rule) = ledger.rule_mut(updated.id) {
                *rule = updated;
            }
        }
        let created = outcome.occurrences.len();
        ledger.transactions.extend(outcome.occurrences);
        ledger.touch();
        created
    }
}
