//! Persisted application settings.

use serde::{Deserialize, Serialize};

use fintrack_domain::{BudgetGoals, ReminderSetting};

/// User-configurable settings persisted between launches.
///
/// `reminder` stays `None` until the user configures reminders for the first
/// time; a configured-but-empty day set is a distinct, representable state
/// ("reminders disabled").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "Settings::default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<ReminderSetting>,
    #[serde(default)]
    pub goals: BudgetGoals,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            reminder: None,
            goals: BudgetGoals::default(),
        }
    }
}

impl Settings {
    pub fn default_currency() -> String {
        "RUB".into()
    }

    pub fn has_configured_reminder(&self) -> bool {
        self.reminder.is_some()
    }

    pub fn set_reminder(&mut self, setting: ReminderSetting) {
        self.reminder = Some(setting);
    }
}
