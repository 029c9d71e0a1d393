//! Maps reminder settings onto repeating notification trigger specs.
//!
//! The canonical weekday domain (Monday=1 .. Sunday=7) is translated to the
//! platform scheduler's numbering (Sunday=1 .. Saturday=7) here and only here.

use fintrack_domain::{DomainError, ReminderSetting, Weekday};

/// Prefix shared by every identifier this scheduler emits. Cancellation
/// selects on this prefix so unrelated notifications are never touched.
pub const REMINDER_IDENTIFIER_PREFIX: &str = "finance-reminder-day-";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single repeating alarm to register with the platform scheduler.
pub struct TriggerSpec {
    /// Stable per-weekday identifier; re-registering under the same
    /// identifier replaces the prior schedule instead of duplicating it.
    pub identifier: String,
    /// Target weekday in the platform's numbering (Sunday=1 .. Saturday=7).
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub repeats: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Selects the identifiers belonging to this reminder category.
pub struct CancelSelector {
    prefix: &'static str,
}

impl CancelSelector {
    pub fn matches(&self, identifier: &str) -> bool {
        identifier.starts_with(self.prefix)
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }
}

/// Pure trigger computations; never talks to the platform scheduler itself.
pub struct ReminderScheduler;

impl ReminderScheduler {
    /// One trigger per selected weekday; empty selection yields no triggers.
    ///
    /// The caller's contract is to clear everything matched by
    /// [`ReminderScheduler::cancel_selector`] before applying the returned
    /// list, so a shrinking day set leaves no stale triggers behind.
    pub fn compute(setting: &ReminderSetting) -> Vec<TriggerSpec> {
        setting
            .days
            .iter()
            .map(|&day| TriggerSpec {
                identifier: trigger_identifier(day),
                weekday: platform_weekday(day),
                hour: setting.time.hour(),
                minute: setting.time.minute(),
                repeats: true,
            })
            .collect()
    }

    pub fn cancel_selector() -> CancelSelector {
        CancelSelector {
            prefix: REMINDER_IDENTIFIER_PREFIX,
        }
    }
}

/// Deterministic identifier for a weekday's trigger. Keyed by the canonical
/// weekday number so identical settings always produce identical ids.
pub fn trigger_identifier(day: Weekday) -> String {
    format!("{}{}", REMINDER_IDENTIFIER_PREFIX, day.number())
}

/// Canonical (Monday=1 .. Sunday=7) to platform (Sunday=1 .. Saturday=7).
pub fn platform_weekday(day: Weekday) -> u8 {
    let number = day.number();
    if number == 7 {
        1
    } else {
        number + 1
    }
}

/// Inverse of [`platform_weekday`]; total over the platform's 1..=7 domain.
pub fn canonical_weekday(platform: u8) -> Result<Weekday, DomainError> {
    if !(1..=7).contains(&platform) {
        return Err(DomainError::WeekdayOutOfRange(platform));
    }
    let number = if platform == 1 { 7 } else { platform - 1 };
    Weekday::from_number(number)
}
