//! fintrack-core
//!
//! Scheduling and summary services for fintrack: the recurrence engine, the
//! reminder scheduler, ledger summaries, and the store-event channel.
//! Depends on fintrack-domain. No CLI, no terminal I/O, no direct storage
//! interactions.

pub mod error;
pub mod events;
pub mod ledger_service;
pub mod recurrence;
pub mod reminder;
pub mod storage;

pub use error::CoreError;
pub use events::{EventBus, StoreEvent};
pub use ledger_service::{LedgerService, LedgerTotals};
pub use recurrence::{ProcessOutcome, RecurrenceEngine};
pub use reminder::{
    canonical_weekday, platform_weekday, trigger_identifier, CancelSelector, ReminderScheduler,
    TriggerSpec, REMINDER_IDENTIFIER_PREFIX,
};
pub use storage::LedgerStorage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("fintrack_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("fintrack core tracing initialized.");
    });
}
