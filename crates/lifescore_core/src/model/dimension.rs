//! Life dimension buckets and their scoring configuration.
//!
//! # Invariants
//! - A dimension's data bucket is keyed by the dimension name.
//! - Missing item lists decode as empty lists.

use crate::model::item::{Frequency, ItemId, RecurringItem, TrackableItem, TrackableKind};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Routines of one dimension split by frequency bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineBuckets {
    #[serde(default)]
    pub daily: Vec<RecurringItem>,
    #[serde(default)]
    pub weekly: Vec<RecurringItem>,
    #[serde(default)]
    pub monthly: Vec<RecurringItem>,
}

impl RoutineBuckets {
    pub fn bucket(&self, frequency: Frequency) -> &[RecurringItem] {
        match frequency {
            Frequency::Daily => &self.daily,
            Frequency::Weekly => &self.weekly,
            Frequency::Monthly => &self.monthly,
        }
    }

    pub fn bucket_mut(&mut self, frequency: Frequency) -> &mut Vec<RecurringItem> {
        match frequency {
            Frequency::Daily => &mut self.daily,
            Frequency::Weekly => &mut self.weekly,
            Frequency::Monthly => &mut self.monthly,
        }
    }

    /// Iterates `(bucket frequency, routine)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (Frequency, &RecurringItem)> {
        Frequency::ALL.into_iter().flat_map(move |frequency| {
            self.bucket(frequency)
                .iter()
                .map(move |routine| (frequency, routine))
        })
    }
}

/// All records attached to one life dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionData {
    #[serde(default)]
    pub challenges: Vec<TrackableItem>,
    #[serde(default)]
    pub goals: Vec<TrackableItem>,
    #[serde(default)]
    pub projects: Vec<TrackableItem>,
    #[serde(default)]
    pub routines: RoutineBuckets,
}

impl DimensionData {
    pub fn items(&self, kind: TrackableKind) -> &[TrackableItem] {
        match kind {
            TrackableKind::Goal => &self.goals,
            TrackableKind::Challenge => &self.challenges,
            TrackableKind::Project => &self.projects,
        }
    }

    pub fn items_mut(&mut self, kind: TrackableKind) -> &mut Vec<TrackableItem> {
        match kind {
            TrackableKind::Goal => &mut self.goals,
            TrackableKind::Challenge => &mut self.challenges,
            TrackableKind::Project => &mut self.projects,
        }
    }

    /// Iterates `(kind, item)` pairs over goals, projects and challenges.
    pub fn trackables(&self) -> impl Iterator<Item = (TrackableKind, &TrackableItem)> {
        [
            TrackableKind::Goal,
            TrackableKind::Project,
            TrackableKind::Challenge,
        ]
        .into_iter()
        .flat_map(move |kind| self.items(kind).iter().map(move |item| (kind, item)))
    }

    /// Finds a routine by ID in a given frequency bucket.
    pub fn routine_mut(
        &mut self,
        frequency: Frequency,
        id: &ItemId,
    ) -> Option<&mut RecurringItem> {
        self.routines
            .bucket_mut(frequency)
            .iter_mut()
            .find(|routine| &routine.id == id)
    }

    pub fn item_count(&self) -> usize {
        self.goals.len()
            + self.projects.len()
            + self.challenges.len()
            + self.routines.daily.len()
            + self.routines.weekly.len()
            + self.routines.monthly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Scoring configuration for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionConfig {
    pub name: String,
    /// Contribution to the overall score in percentage points.
    #[serde(default, deserialize_with = "deserialize_weight")]
    pub weight: f64,
    #[serde(default = "default_max")]
    pub max: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

fn default_max() -> u32 {
    100
}

fn deserialize_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw.filter(|value| value.is_finite()).unwrap_or(0.0))
}

impl DimensionConfig {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            max: default_max(),
            color: None,
        }
    }
}
