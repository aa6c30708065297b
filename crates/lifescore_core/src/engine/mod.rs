//! Progress aggregation engine.
//!
//! # Responsibility
//! - Turn one immutable `Snapshot` into normalized progress numbers.
//! - Keep every computation a pure function of its inputs.
//!
//! # Invariants
//! - No function here mutates its input or reads the wall clock; callers
//!   pass "now" through `ScoringWindow`.
//! - Percentages are clamped to `0..=100`; role XP is unbounded.
//! - Every average divides by `max(1, denominator)`.
//!
//! # See also
//! - `service::progress_service` for the one-pass report facade.

use crate::model::item::ItemId;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adherence;
pub mod dimension;
pub mod item_score;
pub mod overall;
pub mod role_xp;
pub mod skill;

/// Upper bound for every percentage score.
pub const MAX_SCORE: u8 = 100;

/// Result type for engine and edit operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced to callers of engine and edit operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Completion date precedes the account creation day.
    InvalidDate {
        date: NaiveDate,
        account_created: NaiveDate,
    },
    /// Required collection is absent from the snapshot.
    MissingData(&'static str),
    /// No data bucket exists under the dimension name.
    UnknownDimension(String),
    /// No routine with this ID exists in the addressed bucket.
    UnknownRoutine(ItemId),
    /// Rename target already names another dimension.
    DimensionExists(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate {
                date,
                account_created,
            } => write!(
                f,
                "completion date {date} is earlier than account creation {account_created}"
            ),
            Self::MissingData(field) => write!(f, "required collection missing: {field}"),
            Self::UnknownDimension(name) => write!(f, "dimension not found: {name}"),
            Self::UnknownRoutine(id) => write!(f, "routine not found: {id}"),
            Self::DimensionExists(name) => write!(f, "dimension already exists: {name}"),
        }
    }
}

impl Error for EngineError {}

/// Rounds `sum / max(1, count)` half-up and clamps to `MAX_SCORE`.
pub(crate) fn average_score(sum: u64, count: u64) -> u8 {
    let divisor = count.max(1) as f64;
    let rounded = (sum as f64 / divisor).round();
    rounded.min(f64::from(MAX_SCORE)) as u8
}
