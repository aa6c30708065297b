//! Skill mastery resolution.
//!
//! # Invariants
//! - Manual-mode skills return their pinned `level` unchanged.
//! - Linked projects are additive bonus only, as in dimension scoring.
//! - Linked routines contribute adherence in the bucket they are stored in.

use crate::engine::item_score::{routine_contribution, trackable_contribution, ScoreTally};
use crate::model::identity::Skill;
use crate::model::snapshot::{ScoringWindow, Snapshot};
use log::trace;

/// Mastery of `skill` in `0..=100`.
///
/// Returns 0 for a derived skill when `dimensions` is missing.
pub fn skill_level(skill: &Skill, snapshot: &Snapshot, window: &ScoringWindow) -> u8 {
    if skill.manual_mode {
        return skill.level;
    }
    if snapshot.dimensions.is_none() {
        return 0;
    }

    let mut tally = ScoreTally::default();
    for (_, data) in snapshot.dimension_entries() {
        for (kind, item) in data.trackables() {
            if item.links_skill(&skill.id) {
                tally.add(trackable_contribution(kind, item));
            }
        }
        for (frequency, routine) in data.routines.iter() {
            if routine.links_skill(&skill.id) {
                tally.add(routine_contribution(routine, frequency, window));
            }
        }
    }

    let level = tally.score();
    trace!(
        "event=skill_scored module=engine skill={} counted={} sum={} level={}",
        skill.id,
        tally.items_counted,
        tally.score_sum,
        level
    );
    level
}
