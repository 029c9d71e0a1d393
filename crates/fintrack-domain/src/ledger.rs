//! Ledger aggregate owning transactions and recurring rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{find_by_id, find_by_id_mut};
use crate::recurring::RecurringRule;
use crate::transaction::Transaction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    pub name: String,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub recurring_rules: Vec<RecurringRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            transactions: Vec::new(),
            recurring_rules: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn rule(&self, id: Uuid) -> Option<&RecurringRule> {
        find_by_id(&self.recurring_rules, id)
    }

    pub fn rule_mut(&mut self, id: Uuid) -> Option<&mut RecurringRule> {
        find_by_id_mut(&mut self.recurring_rules, id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
        self.touch();
    }

    /// Removes a transaction by id, returning whether it was present.
    pub fn remove_transaction(&mut self, id: Uuid) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Inserts a rule, or replaces the stored rule with the same id.
    pub fn upsert_rule(&mut self, rule: RecurringRule) {
        match self.rule_mut(rule.id) {
            Some(existing) => *existing = rule,
            None => self.recurring_rules.push(rule),
        }
        self.touch();
    }

    pub fn remove_rule(&mut self, id: Uuid) -> bool {
        let before = self.recurring_rules.len();
        self.recurring_rules.retain(|rule| rule.id != id);
        let removed = self.recurring_rules.len() != before;
        if removed {
            self.touch();
        }
        removed
    }
}
