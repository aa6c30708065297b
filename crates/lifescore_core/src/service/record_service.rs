//! Single-writer edits on an owned snapshot.
//!
//! # Responsibility
//! - Apply user edits that the engine's semantics depend on: completion
//!   toggles, dimension renames, role and skill deletion.
//! - Hand the edited snapshot back to the caller for persistence.
//!
//! # Invariants
//! - Failed edits leave the snapshot unchanged.
//! - Renaming a dimension moves its bucket; nothing is copied.
//! - Deleting a role or skill never touches items that reference it.

use crate::engine::adherence::toggle_completion;
use crate::engine::{EngineError, EngineResult};
use crate::model::history::CompletionHistory;
use crate::model::item::{Frequency, ItemId, SkillId};
use crate::model::snapshot::Snapshot;
use chrono::NaiveDate;
use log::info;

/// Request to flip one routine's completion for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionToggleRequest {
    /// Dimension bucket holding the routine.
    pub dimension: String,
    /// Frequency bucket holding the routine.
    pub frequency: Frequency,
    pub routine_id: ItemId,
    /// Day being marked done or undone.
    pub day: NaiveDate,
    /// Current day, used to refresh the routine's `status` cache.
    pub today: NaiveDate,
}

/// Owns the working snapshot for one writer.
pub struct RecordService {
    snapshot: Snapshot,
}

impl RecordService {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.snapshot
    }

    /// Toggles a routine's completion and stores the resulting history.
    ///
    /// Returns the new history, which the caller must persist.
    ///
    /// # Errors
    /// - `MissingData` when the snapshot has no dimensions or creation date.
    /// - `UnknownDimension` / `UnknownRoutine` when the target is absent.
    /// - `InvalidDate` when `day` precedes account creation.
    pub fn toggle_routine_completion(
        &mut self,
        request: &CompletionToggleRequest,
    ) -> EngineResult<CompletionHistory> {
        let account_created = self
            .snapshot
            .app_settings
            .account_creation_date
            .ok_or(EngineError::MissingData("appSettings.accountCreationDate"))?;
        let dimensions = self
            .snapshot
            .dimensions
            .as_mut()
            .ok_or(EngineError::MissingData("dimensions"))?;
        let data = dimensions
            .get_mut(&request.dimension)
            .ok_or_else(|| EngineError::UnknownDimension(request.dimension.clone()))?;
        let routine = data
            .routine_mut(request.frequency, &request.routine_id)
            .ok_or_else(|| EngineError::UnknownRoutine(request.routine_id.clone()))?;

        let next = toggle_completion(
            &routine.completion_history,
            request.frequency,
            request.day,
            &account_created,
        )?;
        routine.completion_history = next.clone();
        routine.refresh_status(request.today, request.frequency);

        info!(
            "event=routine_toggled module=service status=ok routine={} frequency={} entries={}",
            request.routine_id,
            request.frequency.as_str(),
            next.len()
        );
        Ok(next)
    }

    /// Renames a dimension, moving its bucket and config entry.
    ///
    /// Items whose `dimension_key` names the old dimension are rewritten.
    ///
    /// # Errors
    /// - `MissingData` when the snapshot has no dimensions.
    /// - `UnknownDimension` when neither a bucket nor a config uses `old_name`.
    /// - `DimensionExists` when `new_name` is already taken.
    pub fn rename_dimension(&mut self, old_name: &str, new_name: &str) -> EngineResult<()> {
        if old_name == new_name {
            return Ok(());
        }

        let has_config = self
            .snapshot
            .app_settings
            .dimension_config
            .iter()
            .any(|config| config.name == old_name);
        let name_taken = self
            .snapshot
            .app_settings
            .dimension_config
            .iter()
            .any(|config| config.name == new_name);

        let dimensions = self
            .snapshot
            .dimensions
            .as_mut()
            .ok_or(EngineError::MissingData("dimensions"))?;
        if name_taken || dimensions.contains_key(new_name) {
            return Err(EngineError::DimensionExists(new_name.to_string()));
        }
        if !has_config && !dimensions.contains_key(old_name) {
            return Err(EngineError::UnknownDimension(old_name.to_string()));
        }

        if let Some(bucket) = dimensions.remove(old_name) {
            dimensions.insert(new_name.to_string(), bucket);
        }

        let mut rewritten = 0usize;
        for data in dimensions.values_mut() {
            let trackables = data
                .goals
                .iter_mut()
                .chain(data.projects.iter_mut())
                .chain(data.challenges.iter_mut())
                .map(|item| &mut item.dimension_key);
            let routines = data
                .routines
                .daily
                .iter_mut()
                .chain(data.routines.weekly.iter_mut())
                .chain(data.routines.monthly.iter_mut())
                .map(|routine| &mut routine.dimension_key);
            for key in trackables.chain(routines) {
                if key.as_deref() == Some(old_name) {
                    *key = Some(new_name.to_string());
                    rewritten += 1;
                }
            }
        }

        for config in self
            .snapshot
            .app_settings
            .dimension_config
            .iter_mut()
            .filter(|config| config.name == old_name)
        {
            config.name = new_name.to_string();
        }

        info!(
            "event=dimension_renamed module=service status=ok rewritten_items={}",
            rewritten
        );
        Ok(())
    }

    /// Removes a role definition. Returns whether it existed.
    ///
    /// Items keep their `role_key`, which then resolves as unassigned.
    pub fn delete_role(&mut self, role_key: &str) -> bool {
        let before = self.snapshot.roles.len();
        self.snapshot.roles.retain(|role| role.key != role_key);
        let removed = self.snapshot.roles.len() != before;
        info!(
            "event=role_deleted module=service status=ok removed={}",
            removed
        );
        removed
    }

    /// Removes a skill definition. Returns whether it existed.
    ///
    /// Items keep the dangling ID in `linked_skill_ids`.
    pub fn delete_skill(&mut self, skill_id: &SkillId) -> bool {
        let before = self.snapshot.skills.len();
        self.snapshot.skills.retain(|skill| &skill.id != skill_id);
        let removed = self.snapshot.skills.len() != before;
        info!(
            "event=skill_deleted module=service status=ok skill={} removed={}",
            skill_id, removed
        );
        removed
    }
}
