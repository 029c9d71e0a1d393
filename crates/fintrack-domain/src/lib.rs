//! fintrack-domain
//!
//! Pure domain models (Ledger, Transaction, RecurringRule, ReminderSetting,
//! BudgetGoals). No I/O, no storage. Only data types and core enums, validated
//! at construction.

pub mod common;
pub mod error;
pub mod goals;
pub mod ledger;
pub mod recurring;
pub mod reminder;
pub mod transaction;

pub use common::*;
pub use error::*;
pub use goals::*;
pub use ledger::*;
pub use recurring::*;
pub use reminder::*;
pub use transaction::*;
