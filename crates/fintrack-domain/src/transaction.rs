//! Domain models for concrete ledger transactions.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Distinguishes money coming in from money going out.
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
/// Expense categories available for tagging.
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Health,
    Home,
    Education,
    Clothing,
    Travel,
    Pets,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Health,
        Category::Home,
        Category::Education,
        Category::Clothing,
        Category::Travel,
        Category::Pets,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Home => "Home",
            Category::Education => "Education",
            Category::Clothing => "Clothing",
            Category::Travel => "Travel",
            Category::Pets => "Pets",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A single recorded income or expense. Immutable once created.
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDateTime,
}

impl Transaction {
    /// Builds a validated transaction. Rejects non-positive amounts and a
    /// category attached to an income entry.
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: Option<Category>,
        note: impl Into<String>,
        date: NaiveDateTime,
    ) -> Result<Self, DomainError> {
        validate_amount(amount)?;
        validate_category(kind, category)?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category,
            note: note.into(),
            date,
        })
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{}]", self.id, self.kind)
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<(), DomainError> {
    if amount <= 0.0 {
        return Err(DomainError::NonPositiveAmount(amount));
    }
    Ok(())
}

pub(crate) fn validate_category(
    kind: TransactionKind,
    category: Option<Category>,
) -> Result<(), DomainError> {
    if kind == TransactionKind::Income && category.is_some() {
        return Err(DomainError::CategoryOnIncome);
    }
    Ok(())
}
