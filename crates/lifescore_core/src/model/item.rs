//! Trackable and recurring item records.
//!
//! # Responsibility
//! - Define goal/challenge/project records and routine records.
//! - Keep the `status` clamp invariant at construction and decode time.
//!
//! # Invariants
//! - `status` is always within `0..=100`.
//! - `roleKey`, `dimensionKey` and `linkedSkillIds` are weak references by key;
//!   a dangling key means "unassigned", never an error.
//! - On a `RecurringItem`, `status` is a display cache. `completion_history`
//!   is the source of truth.

use crate::model::history::CompletionHistory;
use crate::model::key::RecordKey;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stable identifier for goals, challenges, projects and routines.
pub type ItemId = RecordKey;

/// Stable identifier for skills.
pub type SkillId = RecordKey;

/// Upper bound of every percentage value in the engine.
pub const MAX_STATUS: u8 = 100;

/// Clamps any integer into the `0..=100` status range.
pub fn clamp_status(value: i64) -> u8 {
    value.clamp(0, i64::from(MAX_STATUS)) as u8
}

pub(crate) fn deserialize_status<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    // Slider inputs store floats or numeric strings; anything else is no progress.
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|value| value.is_finite())
        .map_or(0, |value| clamp_status(value.round() as i64)))
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_importance<'de, D>(deserializer: D) -> Result<Importance, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => return Ok(Importance::default()),
    };
    Ok(match raw.trim().to_ascii_lowercase().as_str() {
        "low" => Importance::Low,
        "high" => Importance::High,
        _ => Importance::Medium,
    })
}

fn deserialize_frequency<'de, D>(deserializer: D) -> Result<Frequency, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => return Ok(Frequency::default()),
    };
    Ok(match raw.trim().to_ascii_lowercase().as_str() {
        "weekly" => Frequency::Weekly,
        "monthly" => Frequency::Monthly,
        _ => Frequency::Daily,
    })
}

/// Kind of a one-off trackable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackableKind {
    Goal,
    Challenge,
    /// Additive bonus: never dilutes averages.
    Project,
}

impl TrackableKind {
    /// Stable name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Challenge => "challenge",
            Self::Project => "project",
        }
    }
}

/// Informational priority. Never affects scoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

/// Recurrence period of a routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// All frequencies in bucket order.
    pub const ALL: [Frequency; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Goal, challenge or project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackableItem {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Completion percentage, clamped to `0..=100`.
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: u8,
    #[serde(default, deserialize_with = "deserialize_importance")]
    pub importance: Importance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_key: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub linked_skill_ids: Vec<SkillId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TrackableItem {
    /// Creates an item with a generated stable ID and zero progress.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(RecordKey::generate(), name)
    }

    /// Creates an item with a caller-provided stable ID.
    pub fn with_id(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: 0,
            importance: Importance::default(),
            dimension_key: None,
            role_key: None,
            linked_skill_ids: Vec::new(),
            due_date: None,
        }
    }

    /// Sets progress, clamping out-of-range input.
    pub fn set_status(&mut self, value: i64) {
        self.status = clamp_status(value);
    }

    /// Builder variant of [`TrackableItem::set_status`].
    pub fn with_status(mut self, value: i64) -> Self {
        self.set_status(value);
        self
    }

    pub fn with_role(mut self, role_key: impl Into<String>) -> Self {
        self.role_key = Some(role_key.into());
        self
    }

    pub fn with_skill(mut self, skill_id: impl Into<SkillId>) -> Self {
        let skill_id = skill_id.into();
        if !self.linked_skill_ids.contains(&skill_id) {
            self.linked_skill_ids.push(skill_id);
        }
        self
    }

    /// Returns whether this item contributes to the given skill.
    pub fn links_skill(&self, skill_id: &SkillId) -> bool {
        self.linked_skill_ids.contains(skill_id)
    }

    /// Returns whether this item belongs to the given role key.
    pub fn has_role(&self, role_key: &str) -> bool {
        self.role_key.as_deref() == Some(role_key)
    }
}

/// Routine record scored by adherence instead of raw status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringItem {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Display cache: 100 when done for the current period, else 0.
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: u8,
    #[serde(default, deserialize_with = "deserialize_importance")]
    pub importance: Importance,
    /// Declared frequency. Scoring uses the bucket the routine is stored in.
    #[serde(default, deserialize_with = "deserialize_frequency")]
    pub frequency: Frequency,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_history: CompletionHistory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_key: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub linked_skill_ids: Vec<SkillId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl RecurringItem {
    /// Creates a routine with a generated stable ID and empty history.
    pub fn new(name: impl Into<String>, frequency: Frequency) -> Self {
        Self::with_id(RecordKey::generate(), name, frequency)
    }

    pub fn with_id(id: ItemId, name: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            id,
            name: name.into(),
            status: 0,
            importance: Importance::default(),
            frequency,
            completion_history: CompletionHistory::default(),
            dimension_key: None,
            role_key: None,
            linked_skill_ids: Vec::new(),
            due_date: None,
        }
    }

    pub fn with_history(mut self, history: CompletionHistory) -> Self {
        self.completion_history = history;
        self
    }

    pub fn with_role(mut self, role_key: impl Into<String>) -> Self {
        self.role_key = Some(role_key.into());
        self
    }

    pub fn with_skill(mut self, skill_id: impl Into<SkillId>) -> Self {
        let skill_id = skill_id.into();
        if !self.linked_skill_ids.contains(&skill_id) {
            self.linked_skill_ids.push(skill_id);
        }
        self
    }

    pub fn links_skill(&self, skill_id: &SkillId) -> bool {
        self.linked_skill_ids.contains(skill_id)
    }

    pub fn has_role(&self, role_key: &str) -> bool {
        self.role_key.as_deref() == Some(role_key)
    }

    /// Returns whether the period containing `today` has a completion entry.
    pub fn is_done_for_period(&self, today: NaiveDate, frequency: Frequency) -> bool {
        self.completion_history.has_entry_in_period(today, frequency)
    }

    /// Recomputes the `status` display cache for the period containing `today`.
    pub fn refresh_status(&mut self, today: NaiveDate, frequency: Frequency) {
        self.status = if self.is_done_for_period(today, frequency) {
            MAX_STATUS
        } else {
            0
        };
    }
}
