//! Persistence boundary consumed by storage backends.

use fintrack_domain::Ledger;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing ledgers.
pub trait LedgerStorage: Send + Sync {
    fn save_ledger(&self, name: &str, ledger: &Ledger) -> Result<(), CoreError>;
    fn load_ledger(&self, name: &str) -> Result<Ledger, CoreError>;
    fn list_ledgers(&self) -> Result<Vec<String>, CoreError>;
    fn delete_ledger(&self, name: &str) -> Result<(), CoreError>;
}
