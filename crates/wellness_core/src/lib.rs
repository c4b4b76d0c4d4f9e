//! Core domain logic for wellness tracking.
//! This crate is the single source of truth for business invariants: entry
//! storage, per-day upserts, goal progress and the assistant bridge.

pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AssistantConfig, ConfigError, WellnessConfig};
pub use context::AppContext;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::entry::{
    DietEntry, EntryKind, ExerciseEntry, MealType, MoodEntry, WaterEntry, WeightEntry,
};
pub use model::profile::{EffectiveGoals, GoalProfile, Theme};
pub use model::reminder::{Reminder, ReminderType};
pub use model::{EntryId, EntryValidationError, OwnerId};
pub use repo::entry_repo::{
    EntryQuery, EntryRepository, RepoError, RepoResult, SqliteEntryRepository, UpsertOutcome,
    WriteStatus,
};
pub use repo::profile_repo::{ProfileRepository, SqliteProfileRepository};
pub use service::assistant::{
    AssistantClient, AssistantError, AssistantService, ChatReply, OpenAiAssistantClient,
};
pub use service::entry_service::{
    DayEntries, DietInput, EntryService, ExerciseInput, MoodInput, ProfileUpdate, ReminderInput,
    WaterInput, WeightInput, WriteOutcome,
};
pub use service::export_service::{ExportDocument, ExportService};
pub use service::progress_service::{
    JourneyStage, JourneySummary, MetricKind, MetricSeries, ProgressService, ProgressSummary,
    ReportBundle, TodaySnapshot,
};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
