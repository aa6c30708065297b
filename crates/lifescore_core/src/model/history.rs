//! Routine completion log and period windows.
//!
//! # Responsibility
//! - Hold the list of days a routine was marked done.
//! - Map a calendar day to its daily/weekly/monthly window.
//!
//! # Invariants
//! - Entries are calendar days; time-of-day is discarded on decode.
//! - Weeks run Monday through Sunday; months follow the calendar.
//! - Decoded entries keep their stored order. Entries added by toggles are
//!   inserted in date order, not appended.

use crate::model::item::Frequency;
use chrono::{DateTime, Datelike, Duration, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ISO_DAY_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO day (`YYYY-MM-DD`) or an RFC 3339 timestamp into a day.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, ISO_DAY_FORMAT) {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

/// Inclusive day range covering one routine period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Returns the window of `frequency` that contains `day`.
    pub fn containing(day: NaiveDate, frequency: Frequency) -> Self {
        match frequency {
            Frequency::Daily => Self {
                start: day,
                end: day,
            },
            Frequency::Weekly => {
                let start =
                    day - Duration::days(i64::from(day.weekday().num_days_from_monday()));
                Self {
                    start,
                    end: start + Duration::days(6),
                }
            }
            Frequency::Monthly => {
                let start = day.with_day(1).unwrap_or(day);
                let next_month = if start.month() == 12 {
                    NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
                };
                let end = next_month
                    .and_then(|first| first.pred_opt())
                    .unwrap_or(day);
                Self { start, end }
            }
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Raw completion log of one routine.
///
/// Counting is not deduplicated here; callers keep the log clean through the
/// toggle operations in `engine::adherence`.
///
/// Ordering: a toggled day is placed after the last entry not later than it,
/// so a sorted log stays sorted. An unsorted stored log is never reordered;
/// the new day lands after its latest earlier-or-equal entry, or first when
/// none exists. Scoring only counts entries, so order never changes a score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionHistory {
    days: Vec<NaiveDate>,
}

impl CompletionHistory {
    /// Builds a history from days in the given order.
    pub fn from_days(days: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Returns whether any entry falls inside the period containing `day`.
    pub fn has_entry_in_period(&self, day: NaiveDate, frequency: Frequency) -> bool {
        let window = PeriodWindow::containing(day, frequency);
        self.days.iter().any(|entry| window.contains(*entry))
    }

    /// Inserts `day` after every entry that is not later than it.
    pub(crate) fn insert_day(&mut self, day: NaiveDate) {
        let index = self
            .days
            .iter()
            .rposition(|entry| *entry <= day)
            .map_or(0, |position| position + 1);
        self.days.insert(index, day);
    }

    /// Removes every entry inside `window`. Returns removed count.
    pub(crate) fn remove_window(&mut self, window: PeriodWindow) -> usize {
        let before = self.days.len();
        self.days.retain(|entry| !window.contains(*entry));
        before - self.days.len()
    }
}

impl Serialize for CompletionHistory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            self.days
                .iter()
                .map(|day| day.format(ISO_DAY_FORMAT).to_string()),
        )
    }
}

impl<'de> Deserialize<'de> for CompletionHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        let days = raw
            .iter()
            .map(|value| {
                parse_day(value)
                    .ok_or_else(|| D::Error::custom(format!("invalid completion date `{value}`")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { days })
    }
}
