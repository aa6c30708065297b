//! Progress aggregation engine for LifeScore.
//! This crate turns a snapshot of goals, routines, roles and skills into
//! normalized progress scores.

pub mod engine;
pub mod logging;
pub mod model;
pub mod service;

pub use engine::adherence::{adherence, expected_occurrences, set_completion, toggle_completion};
pub use engine::dimension::{dimension_score, dimension_scores, dimension_tally};
pub use engine::item_score::{resolve, Contribution, ItemSource, ScoreTally};
pub use engine::overall::{overall_score, OverallScore};
pub use engine::role_xp::{role_level, role_xp};
pub use engine::skill::skill_level;
pub use engine::{EngineError, EngineResult, MAX_SCORE};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::dimension::{DimensionConfig, DimensionData, RoutineBuckets};
pub use model::history::{CompletionHistory, PeriodWindow};
pub use model::identity::{Role, Skill};
pub use model::key::RecordKey;
pub use model::item::{
    Frequency, Importance, ItemId, RecurringItem, SkillId, TrackableItem, TrackableKind,
};
pub use model::snapshot::{
    AccountCreationDate, AppSettings, ScoringWindow, Snapshot, SnapshotError, SnapshotResult,
};
pub use service::progress_service::{ProgressReport, ProgressService, RoleProgress, SkillProgress};
pub use service::record_service::{CompletionToggleRequest, RecordService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
