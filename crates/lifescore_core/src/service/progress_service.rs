//! Read-only progress facade over one snapshot.
//!
//! # Responsibility
//! - Bundle engine calls into use-case level queries for the UI shell.
//! - Produce a full `ProgressReport` in one pass.
//!
//! # Invariants
//! - The borrowed snapshot is never mutated.
//! - Every query takes an explicit `now`; identical inputs give identical output.

use crate::engine::dimension::dimension_scores;
use crate::engine::overall::{overall_score, OverallScore};
use crate::engine::role_xp::{role_level, role_xp};
use crate::engine::skill::skill_level;
use crate::model::item::SkillId;
use crate::model::snapshot::{DimensionName, Snapshot};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;

/// XP and level of one known role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProgress {
    pub key: String,
    pub xp: u64,
    pub level: u64,
}

/// Resolved level of one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProgress {
    pub id: SkillId,
    pub level: u8,
    pub manual_mode: bool,
}

/// All engine outputs for one snapshot at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub evaluated_at: DateTime<Utc>,
    pub dimensions: BTreeMap<DimensionName, u8>,
    pub overall: OverallScore,
    pub roles: Vec<RoleProgress>,
    pub skills: Vec<SkillProgress>,
}

/// Use-case facade for progress queries.
pub struct ProgressService<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> ProgressService<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// Scores of every dimension bucket.
    pub fn dimension_scores(&self, now: DateTime<Utc>) -> BTreeMap<DimensionName, u8> {
        dimension_scores(self.snapshot, &self.snapshot.scoring_window(now))
    }

    /// Weighted overall score with the raw and effective weight totals.
    pub fn overall(&self, now: DateTime<Utc>) -> OverallScore {
        let scores = self.dimension_scores(now);
        overall_score(&self.snapshot.app_settings.dimension_config, &scores)
    }

    /// XP of the role key. Unknown or deleted keys still sum matching items.
    pub fn role_xp(&self, role_key: &str) -> u64 {
        role_xp(role_key, self.snapshot.dimensions.as_ref())
    }

    /// Level of the skill with `id`, or `None` when no such skill exists.
    pub fn skill_level(&self, id: &SkillId, now: DateTime<Utc>) -> Option<u8> {
        let window = self.snapshot.scoring_window(now);
        self.snapshot
            .resolve_skill(id)
            .map(|skill| skill_level(skill, self.snapshot, &window))
    }

    /// Computes every score for the snapshot as of `now`.
    pub fn report(&self, now: DateTime<Utc>) -> ProgressReport {
        let window = self.snapshot.scoring_window(now);
        let dimensions = dimension_scores(self.snapshot, &window);
        let overall = overall_score(&self.snapshot.app_settings.dimension_config, &dimensions);

        let roles = self
            .snapshot
            .roles
            .iter()
            .map(|role| {
                let xp = self.role_xp(&role.key);
                RoleProgress {
                    key: role.key.clone(),
                    xp,
                    level: role_level(xp),
                }
            })
            .collect::<Vec<_>>();

        let skills = self
            .snapshot
            .skills
            .iter()
            .map(|skill| SkillProgress {
                id: skill.id.clone(),
                level: skill_level(skill, self.snapshot, &window),
                manual_mode: skill.manual_mode,
            })
            .collect::<Vec<_>>();

        info!(
            "event=progress_report module=service status=ok dimensions={} roles={} skills={} overall={} total_weight={} effective_weight={}",
            dimensions.len(),
            roles.len(),
            skills.len(),
            overall.score,
            overall.total_weight,
            overall.effective_weight
        );

        ProgressReport {
            evaluated_at: now,
            dimensions,
            overall,
            roles,
            skills,
        }
    }
}
