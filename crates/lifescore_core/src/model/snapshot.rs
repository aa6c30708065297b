//! Immutable record snapshot consumed by the engine.
//!
//! # Responsibility
//! - Define the wire shape handed over by the record store.
//! - Resolve weak key references (role, skill, dimension) to records.
//!
//! # Invariants
//! - Engine calls never mutate a snapshot; edits go through
//!   `service::record_service` on an owned value.
//! - A dangling reference resolves to `None` ("unassigned").
//! - `dimensions: None` means the collection is missing, which differs from
//!   an empty map only for logging; resolvers return their safe defaults.

use crate::model::dimension::{DimensionConfig, DimensionData};
use crate::model::history::parse_day;
use crate::model::identity::{Role, Skill};
use crate::model::item::SkillId;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Dimension name used as the key of its data bucket.
pub type DimensionName = String;

/// Baseline timestamp for adherence denominators. Immutable once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AccountCreationDate(DateTime<Utc>);

impl AccountCreationDate {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }

    /// Midnight UTC of the given day.
    pub fn from_day(day: NaiveDate) -> Self {
        Self(day.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn day(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Parses RFC 3339 or a bare `YYYY-MM-DD` day.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(Self(timestamp.with_timezone(&Utc)));
        }
        parse_day(trimmed).map(Self::from_day)
    }
}

impl Serialize for AccountCreationDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for AccountCreationDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid accountCreationDate `{raw}`")))
    }
}

/// Account baseline plus the evaluation instant.
///
/// The engine never reads the wall clock; callers pin "now" here so one
/// snapshot always yields one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWindow {
    pub account_created: AccountCreationDate,
    pub now: DateTime<Utc>,
}

impl ScoringWindow {
    pub fn new(account_created: AccountCreationDate, now: DateTime<Utc>) -> Self {
        Self {
            account_created,
            now,
        }
    }

    /// Window for an account created `days` whole days before `now`.
    pub fn days_before(now: DateTime<Utc>, days: i64) -> Self {
        Self::new(AccountCreationDate::new(now - Duration::days(days)), now)
    }

    /// Whole days elapsed since account creation, never negative.
    pub fn days_since_creation(&self) -> i64 {
        (self.now - self.account_created.timestamp())
            .num_days()
            .max(0)
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Settings block of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub dimension_config: Vec<DimensionConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_creation_date: Option<AccountCreationDate>,
}

/// One consistent view of the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<BTreeMap<DimensionName, DimensionData>>,
    #[serde(default)]
    pub app_settings: AppSettings,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Snapshot {
    /// Parses a snapshot from its JSON wire shape.
    pub fn from_json_str(json: &str) -> SnapshotResult<Self> {
        serde_json::from_str(json).map_err(SnapshotError::Json)
    }

    /// Reads and parses a snapshot JSON file.
    pub fn load_from_path(path: impl AsRef<Path>) -> SnapshotResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(SnapshotError::Io)?;
        let snapshot = Self::from_json_str(&raw)?;
        log::debug!(
            "event=snapshot_loaded module=model status=ok dimensions={} skills={} roles={}",
            snapshot.dimensions.as_ref().map_or(0, BTreeMap::len),
            snapshot.skills.len(),
            snapshot.roles.len()
        );
        Ok(snapshot)
    }

    /// Scoring window anchored at `now`.
    ///
    /// A snapshot without a creation date is treated as an account created at
    /// `now`, so every routine expects exactly one occurrence.
    pub fn scoring_window(&self, now: DateTime<Utc>) -> ScoringWindow {
        let account_created = self
            .app_settings
            .account_creation_date
            .unwrap_or_else(|| AccountCreationDate::new(now));
        ScoringWindow::new(account_created, now)
    }

    /// Iterates dimension buckets. Empty when `dimensions` is missing.
    pub fn dimension_entries(&self) -> impl Iterator<Item = (&DimensionName, &DimensionData)> {
        self.dimensions.iter().flat_map(|dimensions| dimensions.iter())
    }

    pub fn resolve_dimension(&self, key: &str) -> Option<&DimensionData> {
        self.dimensions.as_ref()?.get(key)
    }

    pub fn resolve_role(&self, key: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.key == key)
    }

    pub fn resolve_skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| &skill.id == id)
    }

    /// Resolves an optional item role key, treating dangling keys as unassigned.
    pub fn assigned_role(&self, role_key: Option<&str>) -> Option<&Role> {
        role_key.and_then(|key| self.resolve_role(key))
    }
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors from snapshot decoding and file loading.
#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file could not be read.
    Io(std::io::Error),
    /// Snapshot payload does not match the wire shape.
    Json(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read snapshot: {err}"),
            Self::Json(err) => write!(f, "invalid snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountCreationDate, ScoringWindow};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    #[test]
    fn account_creation_date_accepts_bare_day() {
        let parsed = AccountCreationDate::parse("2026-01-10").unwrap();
        assert_eq!(parsed.day(), NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
    }

    #[test]
    fn days_since_creation_counts_whole_days_and_floors_at_zero() {
        let now = Utc.with_ymd_and_hms(2026, 5, 11, 9, 0, 0).unwrap();
        let created = AccountCreationDate::new(now - Duration::hours(47));
        assert_eq!(ScoringWindow::new(created, now).days_since_creation(), 1);

        let future = AccountCreationDate::new(now + Duration::days(3));
        assert_eq!(ScoringWindow::new(future, now).days_since_creation(), 0);
    }
}
