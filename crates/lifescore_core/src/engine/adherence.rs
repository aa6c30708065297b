//! Routine adherence and completion toggling.
//!
//! # Responsibility
//! - Score a routine by completions relative to expected occurrences.
//! - Produce the next completion log when a day is marked done/undone.
//!
//! # Invariants
//! - Expected occurrences use fixed 7-day weeks and 30-day months, while
//!   toggles use calendar weeks (Mon-Sun) and calendar months.
//! - Toggles never leave more than one entry per period.
//! - Days before account creation are rejected; the input log is untouched.

use crate::engine::{EngineError, EngineResult, MAX_SCORE};
use crate::model::history::{CompletionHistory, PeriodWindow};
use crate::model::item::{Frequency, RecurringItem};
use crate::model::snapshot::{AccountCreationDate, ScoringWindow};
use chrono::NaiveDate;
use log::{trace, warn};

pub const DAYS_PER_WEEK: i64 = 7;
pub const DAYS_PER_MONTH: i64 = 30;

/// Number of periods a routine should have been completed since creation.
pub fn expected_occurrences(frequency: Frequency, days_since_creation: i64) -> i64 {
    let days = days_since_creation.max(0);
    let periods = match frequency {
        Frequency::Daily => days,
        Frequency::Weekly => div_ceil(days, DAYS_PER_WEEK),
        Frequency::Monthly => div_ceil(days, DAYS_PER_MONTH),
    };
    periods.max(1)
}

fn div_ceil(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

/// Adherence percentage of one routine.
///
/// Counts raw history entries; an absent routine scores 0.
pub fn adherence(
    routine: Option<&RecurringItem>,
    window: &ScoringWindow,
    frequency: Frequency,
) -> u8 {
    let Some(routine) = routine else {
        return 0;
    };

    let expected = expected_occurrences(frequency, window.days_since_creation());
    let actual = routine.completion_history.len() as f64;
    let ratio = (100.0 * actual / expected as f64).round();
    let score = ratio.min(f64::from(MAX_SCORE)) as u8;

    trace!(
        "event=adherence_scored module=engine routine={} frequency={} actual={} expected={} score={}",
        routine.id,
        frequency.as_str(),
        routine.completion_history.len(),
        expected,
        score
    );
    score
}

/// Marks the period containing `day` as done or not done.
///
/// # Contract
/// - `done = true`: entries inside the period are replaced by a single `day`.
/// - `done = false`: every entry inside the period is removed.
/// - Returns the proposed log; the caller persists it.
///
/// # Errors
/// - `EngineError::InvalidDate` when `day` precedes the account creation day.
pub fn set_completion(
    history: &CompletionHistory,
    frequency: Frequency,
    day: NaiveDate,
    done: bool,
    account_created: &AccountCreationDate,
) -> EngineResult<CompletionHistory> {
    if day < account_created.day() {
        warn!(
            "event=completion_rejected module=engine status=error reason=before_account_creation frequency={}",
            frequency.as_str()
        );
        return Err(EngineError::InvalidDate {
            date: day,
            account_created: account_created.day(),
        });
    }

    let window = PeriodWindow::containing(day, frequency);
    let mut next = history.clone();
    let removed = next.remove_window(window);
    if done {
        next.insert_day(day);
    }

    trace!(
        "event=completion_set module=engine frequency={} done={} removed={} entries={}",
        frequency.as_str(),
        done,
        removed,
        next.len()
    );
    Ok(next)
}

/// Flips the done state of the period containing `day`.
///
/// The period counts as done when it already holds any entry.
pub fn toggle_completion(
    history: &CompletionHistory,
    frequency: Frequency,
    day: NaiveDate,
    account_created: &AccountCreationDate,
) -> EngineResult<CompletionHistory> {
    let done = !history.has_entry_in_period(day, frequency);
    set_completion(history, frequency, day, done, account_created)
}
