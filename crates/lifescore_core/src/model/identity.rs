//! Role and skill records.

use crate::model::item::{clamp_status, deserialize_status, null_as_default, SkillId};
use crate::model::key::RecordKey;
use serde::{Deserialize, Serialize};

/// User-defined identity tag that items reference by `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

impl Role {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            icon: None,
            is_custom: false,
        }
    }
}

/// Mastery metric, either derived from linked items or pinned by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: SkillId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_key: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub manual_mode: bool,
    /// Meaningful only when `manual_mode` is set.
    #[serde(default, deserialize_with = "deserialize_status")]
    pub level: u8,
}

impl Skill {
    /// Creates a derived (non-manual) skill with a generated ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(RecordKey::generate(), name)
    }

    pub fn with_id(id: SkillId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role_key: None,
            manual_mode: false,
            level: 0,
        }
    }

    /// Switches to manual mode pinned at `level` (clamped).
    pub fn pinned(mut self, level: i64) -> Self {
        self.manual_mode = true;
        self.level = clamp_status(level);
        self
    }
}
