//! Decides when recurring rules are due and materializes occurrences.
//!
//! Due checks use calendar-exact arithmetic: the daily cadence compares
//! calendar days rather than counting 24-hour windows, and the weekly and
//! monthly cadences add one calendar week or month to the last-processed
//! anchor, clamping to the last valid day when the target month is shorter.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use fintrack_domain::{Frequency, RecurringRule, Transaction};

/// Result of a single processing pass.
///
/// `updated_rules` contains only the rules that were due this pass, with
/// `last_processed` advanced; untouched rules are omitted so callers persist
/// just the changed subset.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutcome {
    pub occurrences: Vec<Transaction>,
    pub updated_rules: Vec<RecurringRule>,
}

/// Pure recurrence computations. Holds no state; `now` is always injected.
pub struct RecurrenceEngine;

impl RecurrenceEngine {
    /// Whether `rule` should materialize a new occurrence as of `now`.
    ///
    /// A never-processed rule is due as soon as its start date has passed.
    pub fn is_due(rule: &RecurringRule, now: NaiveDateTime) -> bool {
        let Some(last) = rule.last_processed else {
            return rule.start_date <= now;
        };

        match rule.frequency {
            Frequency::Daily => last.date() != now.date(),
            Frequency::Weekly => now >= last + Duration::weeks(1),
            Frequency::Monthly => now >= add_months(last, 1),
        }
    }

    /// Evaluates every rule independently against `now`, emitting at most one
    /// occurrence per rule regardless of how many periods have elapsed.
    pub fn process(rules: &[RecurringRule], now: NaiveDateTime) -> ProcessOutcome {
        let mut outcome = ProcessOutcome::default();
        for rule in rules {
            if !Self::is_due(rule, now) {
                continue;
            }
            outcome.occurrences.push(rule.materialize(now));
            let mut updated = rule.clone();
            updated.last_processed = Some(now);
            outcome.updated_rules.push(updated);
        }
        outcome
    }
}

/// Adds whole calendar months, clamping the day to the target month's length.
pub fn add_months(from: NaiveDateTime, months: i32) -> NaiveDateTime {
    NaiveDateTime::new(shift_month(from.date(), months), from.time())
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_domain::{Category, TransactionKind};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn rule(frequency: Frequency, start: NaiveDateTime) -> RecurringRule {
        RecurringRule::new(
            TransactionKind::Expense,
            500.0,
            Some(Category::Food),
            "groceries",
            frequency,
            start,
        )
        .unwrap()
    }

    #[test]
    fn never_processed_rule_is_due_once_started() {
        let r = rule(Frequency::Monthly, at(2024, 1, 10, 0, 0));
        assert!(!RecurrenceEngine::is_due(&r, at(2024, 1, 9, 23, 59)));
        assert!(RecurrenceEngine::is_due(&r, at(2024, 1, 10, 0, 0)));
        assert!(RecurrenceEngine::is_due(&r, at(2024, 3, 1, 12, 0)));
    }

    #[test]
    fn daily_rule_fires_once_per_calendar_day() {
        let r = rule(Frequency::Daily, at(2024, 1, 1, 8, 0))
            .with_last_processed(at(2024, 1, 5, 8, 0));

        // Later the same calendar day, even past 24h-window boundaries.
        assert!(!RecurrenceEngine::is_due(&r, at(2024, 1, 5, 23, 59)));
        // Any time the next calendar day.
        assert!(RecurrenceEngine::is_due(&r, at(2024, 1, 6, 0, 1)));
    }

    #[test]
    fn weekly_rule_waits_for_the_calendar_week() {
        // Last processed on a Monday.
        let monday = at(2024, 1, 8, 9, 0);
        let r = rule(Frequency::Weekly, at(2024, 1, 1, 9, 0)).with_last_processed(monday);

        assert!(!RecurrenceEngine::is_due(&r, at(2024, 1, 14, 23, 0))); // Sunday
        assert!(!RecurrenceEngine::is_due(&r, at(2024, 1, 15, 8, 59))); // Monday, before anchor time
        assert!(RecurrenceEngine::is_due(&r, at(2024, 1, 15, 9, 0))); // the following Monday
        assert!(RecurrenceEngine::is_due(&r, at(2024, 2, 1, 0, 0)));
    }

    #[test]
    fn monthly_rule_clamps_to_end_of_month() {
        let r = rule(Frequency::Monthly, at(2024, 1, 1, 10, 0))
            .with_last_processed(at(2024, 1, 31, 10, 0));

        // 2024 is a leap year: Jan 31 + 1 month lands on Feb 29, not an
        // invalid Feb 31.
        assert!(!RecurrenceEngine::is_due(&r, at(2024, 2, 28, 23, 0)));
        assert!(RecurrenceEngine::is_due(&r, at(2024, 2, 29, 10, 0)));
    }

    #[test]
    fn monthly_rule_clamps_in_non_leap_years() {
        let r = rule(Frequency::Monthly, at(2023, 1, 1, 10, 0))
            .with_last_processed(at(2023, 1, 31, 10, 0));
        assert!(RecurrenceEngine::is_due(&r, at(2023, 2, 28, 10, 0)));
    }

    #[test]
    fn process_emits_at_most_one_occurrence_per_rule() {
        // Three months behind; a single pass catches up once, not thrice.
        let r = rule(Frequency::Monthly, at(2024, 1, 1, 9, 0))
            .with_last_processed(at(2024, 1, 1, 9, 0));
        let now = at(2024, 4, 15, 9, 0);

        let outcome = RecurrenceEngine::process(std::slice::from_ref(&r), now);
        assert_eq!(outcome.occurrences.len(), 1);
        assert_eq!(outcome.updated_rules.len(), 1);
        assert_eq!(outcome.updated_rules[0].last_processed, Some(now));
        assert_eq!(outcome.occurrences[0].date, now);
    }

    #[test]
    fn process_skips_rules_that_are_not_due() {
        let due = rule(Frequency::Daily, at(2024, 1, 1, 9, 0))
            .with_last_processed(at(2024, 1, 4, 9, 0));
        let not_due = rule(Frequency::Daily, at(2024, 1, 1, 9, 0))
            .with_last_processed(at(2024, 1, 5, 7, 0));
        let now = at(2024, 1, 5, 12, 0);

        let outcome = RecurrenceEngine::process(&[due.clone(), not_due.clone()], now);
        assert_eq!(outcome.occurrences.len(), 1);
        assert_eq!(outcome.updated_rules.len(), 1);
        assert_eq!(outcome.updated_rules[0].id, due.id);
    }

    #[test]
    fn process_is_deterministic_for_fixed_inputs() {
        let r = rule(Frequency::Weekly, at(2024, 1, 1, 9, 0))
            .with_last_processed(at(2024, 1, 1, 9, 0));
        let now = at(2024, 2, 1, 9, 0);

        let first = RecurrenceEngine::process(std::slice::from_ref(&r), now);
        let second = RecurrenceEngine::process(std::slice::from_ref(&r), now);
        assert_eq!(first.occurrences.len(), second.occurrences.len());
        assert_eq!(
            first.updated_rules[0].last_processed,
            second.updated_rules[0].last_processed
        );
    }

    #[test]
    fn add_months_handles_year_boundaries() {
        assert_eq!(
            add_months(at(2024, 12, 15, 6, 30), 1),
            at(2025, 1, 15, 6, 30)
        );
        assert_eq!(
            add_months(at(2024, 3, 31, 6, 30), -1),
            at(2024, 2, 29, 6, 30)
        );
    }
}
