//! Recurring-rule templates that periodically materialize transactions.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;
use crate::error::DomainError;
use crate::transaction::{validate_amount, validate_category, Category, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Recurrence cadences supported by rules.
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A user-defined template for a periodically recurring transaction.
///
/// `last_processed` is the only field mutated after creation; it advances each
/// time the recurrence engine materializes an occurrence from this rule.
pub struct RecurringRule {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub note: String,
    pub frequency: Frequency,
    pub start_date: NaiveDateTime,
    #[serde(default)]
    pub last_processed: Option<NaiveDateTime>,
}

impl RecurringRule {
    /// Builds a validated rule. The same construction rules as for
    /// [`Transaction`] apply: positive amount, category only on expenses.
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: Option<Category>,
        note: impl Into<String>,
        frequency: Frequency,
        start_date: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        validate_amount(amount)?;
        validate_category(kind, category)?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category,
            note: note.into(),
            frequency,
            start_date,
            last_processed: None,
        })
    }

    pub fn with_last_processed(mut self, last_processed: NaiveDateTime) -> Self {
        self.last_processed = Some(last_processed);
        self
    }

    /// Creates a concrete transaction from this rule, dated at `date`.
    /// The occurrence carries the rule's financial fields and a fresh id.
    pub fn materialize(&self, date: NaiveDateTime) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            note: self.note.clone(),
            date,
        }
    }
}

impl Identifiable for RecurringRule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for RecurringRule {
    fn display_label(&self) -> String {
        format!("rule:{} [{}]", self.id, self.frequency)
    }
}
