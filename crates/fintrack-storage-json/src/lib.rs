//! Filesystem-backed JSON persistence for ledgers, plus owning stores that
//! publish change events after successful writes.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::mpsc::Receiver,
};

use chrono::NaiveDateTime;

use fintrack_config::{ConfigError, Settings, SettingsManager};
use fintrack_core::{CoreError, EventBus, LedgerService, LedgerStorage, StoreEvent};
use fintrack_domain::{Ledger, RecurringRule, Transaction};
use uuid::Uuid;

const LEDGER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stateless JSON persistence keyed by sanitized ledger name.
#[derive(Debug, Clone)]
pub struct JsonLedgerStorage {
    ledgers_dir: PathBuf,
}

impl JsonLedgerStorage {
    pub fn new(ledgers_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&ledgers_dir)?;
        Ok(Self { ledgers_dir })
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }
}

impl LedgerStorage for JsonLedgerStorage {
    fn save_ledger(&self, name: &str, ledger: &Ledger) -> Result<(), CoreError> {
        let path = self.ledger_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &serialize_ledger(ledger)?)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(ledger = %name, path = %path.display(), "ledger saved");
        Ok(())
    }

    fn load_ledger(&self, name: &str) -> Result<Ledger, CoreError> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(CoreError::LedgerNotFound(name.to_string()));
        }
        let data = fs::read_to_string(&path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }

    fn list_ledgers(&self) -> Result<Vec<String>, CoreError> {
        if !self.ledgers_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.ledgers_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_ledger(&self, name: &str) -> Result<(), CoreError> {
        let path = self.ledger_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Owning store around one ledger: every mutation persists first, then
/// publishes the matching [`StoreEvent`]. Mutations require `&mut self`,
/// which enforces the single-writer discipline the recurrence pass assumes.
pub struct LedgerStore {
    storage: JsonLedgerStorage,
    name: String,
    ledger: Ledger,
    events: EventBus,
}

impl LedgerStore {
    /// Loads the named ledger, or starts a fresh one when none is saved yet.
    pub fn open(storage: JsonLedgerStorage, name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        let ledger = match storage.load_ledger(&name) {
            Ok(ledger) => ledger,
            Err(CoreError::LedgerNotFound(_)) => Ledger::new(name.clone()),
            Err(err) => return Err(err),
        };
        Ok(Self {
            storage,
            name,
            ledger,
            events: EventBus::new(),
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), CoreError> {
        self.ledger.add_transaction(transaction);
        self.persist()?;
        self.events.publish(StoreEvent::TransactionsChanged);
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let removed = self.ledger.remove_transaction(id);
        if removed {
            self.persist()?;
            self.events.publish(StoreEvent::TransactionsChanged);
        }
        Ok(removed)
    }

    pub fn upsert_rule(&mut self, rule: RecurringRule) -> Result<(), CoreError> {
        self.ledger.upsert_rule(rule);
        self.persist()?;
        self.events.publish(StoreEvent::RecurringRulesChanged);
        Ok(())
    }

    pub fn remove_rule(&mut self, id: Uuid) -> Result<bool, CoreError> {
        let removed = self.ledger.remove_rule(id);
        if removed {
            self.persist()?;
            self.events.publish(StoreEvent::RecurringRulesChanged);
        }
        Ok(removed)
    }

    /// Runs one recurrence pass as of `now`. Persists and publishes only when
    /// something was materialized. Returns the number of occurrences created.
    pub fn process_recurring(&mut self, now: NaiveDateTime) -> Result<usize, CoreError> {
        let created = LedgerService::apply_recurring(&mut self.ledger, now);
        if created > 0 {
            self.persist()?;
            self.events.publish(StoreEvent::TransactionsChanged);
            self.events.publish(StoreEvent::RecurringRulesChanged);
        }
        Ok(created)
    }

    fn persist(&self) -> Result<(), CoreError> {
        self.storage.save_ledger(&self.name, &self.ledger)
    }
}

/// Event-publishing wrapper around [`SettingsManager`]: mutations save first,
/// then publish [`StoreEvent::SettingsChanged`].
pub struct SettingsStore {
    manager: SettingsManager,
    settings: Settings,
    events: EventBus,
}

impl SettingsStore {
    pub fn open(manager: SettingsManager) -> Result<Self, CoreError> {
        let settings = manager.load().map_err(config_error)?;
        Ok(Self {
            manager,
            settings,
            events: EventBus::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn update(
        &mut self,
        mutate: impl FnOnce(&mut Settings),
    ) -> Result<(), CoreError> {
        mutate(&mut self.settings);
        self.manager.save(&self.settings).map_err(config_error)?;
        self.events.publish(StoreEvent::SettingsChanged);
        Ok(())
    }
}

fn config_error(err: ConfigError) -> CoreError {
    CoreError::Storage(err.to_string())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_ledger(ledger: &Ledger) -> Result<String, CoreError> {
    serde_json::to_string_pretty(ledger).map_err(|err| CoreError::Serde(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintrack_domain::{Category, Frequency, TransactionKind};
    use tempfile::tempdir;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn storage(dir: &Path) -> JsonLedgerStorage {
        JsonLedgerStorage::new(dir.join("ledgers")).unwrap()
    }

    #[test]
    fn save_and_load_round_trips() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());

        let mut ledger = Ledger::new("Household Budget");
        ledger.add_transaction(
            Transaction::new(
                TransactionKind::Expense,
                120.0,
                Some(Category::Utilities),
                "electricity",
                at(2024, 3, 1),
            )
            .unwrap(),
        );
        storage.save_ledger("Household Budget", &ledger).unwrap();

        let loaded = storage.load_ledger("Household Budget").unwrap();
        assert_eq!(loaded, ledger);
        assert_eq!(storage.list_ledgers().unwrap(), vec!["household_budget"]);
    }

    #[test]
    fn load_missing_ledger_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());
        let err = storage.load_ledger("nope").unwrap_err();
        assert!(matches!(err, CoreError::LedgerNotFound(_)));
        assert_eq!(err.to_string(), "Ledger not found: nope");
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path());
        storage.save_ledger("Main", &Ledger::new("Main")).unwrap();
        assert_eq!(storage.list_ledgers().unwrap().len(), 1);
        storage.delete_ledger("Main").unwrap();
        assert!(storage.list_ledgers().unwrap().is_empty());
    }

    #[test]
    fn store_publishes_events_after_writes() {
        let dir = tempdir().unwrap();
        let mut store = LedgerStore::open(storage(dir.path()), "Main").unwrap();
        let rx = store.subscribe();

        store
            .add_transaction(
                Transaction::new(TransactionKind::Income, 3000.0, None, "salary", at(2024, 1, 5))
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::TransactionsChanged);

        store
            .upsert_rule(
                RecurringRule::new(
                    TransactionKind::Expense,
                    9.99,
                    Some(Category::Entertainment),
                    "streaming",
                    Frequency::Monthly,
                    at(2024, 1, 1),
                )
                .unwrap(),
            )
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::RecurringRulesChanged);
    }

    #[test]
    fn process_recurring_persists_materialized_occurrences() {
        let dir = tempdir().unwrap();
        let backend = storage(dir.path());
        let mut store = LedgerStore::open(backend.clone(), "Main").unwrap();
        let rx = store.subscribe();

        store
            .upsert_rule(
                RecurringRule::new(
                    TransactionKind::Expense,
                    500.0,
                    Some(Category::Food),
                    "groceries",
                    Frequency::Monthly,
                    at(2024, 1, 1),
                )
                .unwrap()
                .with_last_processed(at(2024, 1, 1)),
            )
            .unwrap();
        let _ = rx.try_recv();

        let created = store.process_recurring(at(2024, 2, 15)).unwrap();
        assert_eq!(created, 1);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::TransactionsChanged);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::RecurringRulesChanged);

        // Reopening from disk sees the persisted occurrence and advanced rule.
        let reopened = LedgerStore::open(backend, "Main").unwrap();
        assert_eq!(reopened.ledger().transactions.len(), 1);
        assert_eq!(
            reopened.ledger().recurring_rules[0].last_processed,
            Some(at(2024, 2, 15))
        );

        // Nothing further is due, so no write and no events.
        let mut store = reopened;
        assert_eq!(store.process_recurring(at(2024, 2, 20)).unwrap(), 0);
    }

    #[test]
    fn settings_store_persists_then_publishes() {
        use fintrack_domain::{ReminderSetting, TimeOfDay, Weekday};

        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut store = SettingsStore::open(manager.clone()).unwrap();
        let rx = store.subscribe();

        store
            .update(|settings| {
                settings.set_reminder(ReminderSetting::new(
                    [Weekday::Monday],
                    TimeOfDay::new(9, 0).unwrap(),
                ))
            })
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::SettingsChanged);

        // The mutation reached disk before the event fired.
        assert!(manager.load().unwrap().has_configured_reminder());
    }
}
