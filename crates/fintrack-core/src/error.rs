use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Ledger not found: {0}")]
    LedgerNotFound(String),
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Serialization failure: {0}")]
    Serde(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
