//! FFI use-case API for client-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB and to the CLI.
//! - Parse raw client input (owner ids, labels, dates) and return flat
//!   envelopes with a human-readable message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens its own connection; nothing is cached except the
//!   resolved configuration.
//! - "Today" is the local calendar date at call time.

use chrono::{Local, NaiveDate};
use log::warn;
use serde::Serialize;
use std::sync::OnceLock;
use wellness_core::metrics::dates::resolve_entry_date;
use wellness_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppContext, ConfigError, DietInput, ExerciseInput, MetricKind, MoodInput, OwnerId,
    ProfileUpdate, ReminderInput, WaterInput, WeightInput, WellnessConfig, WriteOutcome,
};

static CONFIG: OnceLock<Result<WellnessConfig, ConfigError>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope of every write call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Id of the written entry or reminder.
    pub entry_id: Option<String>,
    /// `created` or `updated` for entry writes.
    pub status: Option<String>,
    /// Human-readable response message for UI.
    pub message: String,
}

impl EntryActionResponse {
    fn from_outcome(outcome: WriteOutcome) -> Self {
        let status = match outcome.status {
            wellness_core::WriteStatus::Created => "created",
            wellness_core::WriteStatus::Updated => "updated",
        };
        Self {
            ok: true,
            entry_id: Some(outcome.id.to_string()),
            status: Some(status.to_string()),
            message: outcome.message,
        }
    }

    fn done(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            entry_id: None,
            status: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            status: None,
            message: message.into(),
        }
    }
}

/// Dashboard numbers for today.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TodaySnapshotResponse {
    pub ok: bool,
    pub message: String,
    pub date: String,
    pub calories_consumed: i64,
    pub calorie_goal: i64,
    pub calories_goal_percent: u8,
    pub water_intake: i64,
    pub water_goal: i64,
    pub water_goal_percent: u8,
    pub calories_burned: i64,
    pub exercise_minutes: i64,
    pub exercise_goal_percent: u8,
    pub current_weight: Option<f64>,
}

/// One day of a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `Mon`..`Sun`.
    pub day: String,
    /// `None` for point metrics on days without a record.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesResponse {
    pub ok: bool,
    pub message: String,
    pub metric: String,
    pub start_date: String,
    pub end_date: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JourneyResponse {
    pub ok: bool,
    pub message: String,
    /// `beginner` or `intermediate`.
    pub stage: String,
    pub total_entries: u64,
    pub diet_count: u64,
    pub water_count: u64,
    pub weight_count: u64,
    pub exercise_count: u64,
    pub mood_count: u64,
    pub water_progress: u8,
    pub calorie_progress: u8,
    pub exercise_minutes: i64,
    pub current_mood: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressSummaryResponse {
    pub ok: bool,
    pub message: String,
    pub water_progress: u8,
    pub calorie_progress: u8,
    pub exercise_minutes: i64,
    pub calories_burned: i64,
    pub current_mood: String,
    pub weight_progress: u8,
}

/// Envelope for views returned as a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    pub ok: bool,
    pub message: String,
    /// Pretty-printed JSON; empty on failure.
    pub json: String,
}

impl JsonResponse {
    fn from_value<T: Serialize>(value: &T, message: impl Into<String>) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(json) => Self {
                ok: true,
                message: message.into(),
                json,
            },
            Err(err) => Self::failure(format!("serialization failed: {err}")),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            json: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// `false` for a rejected request (blank message, storage failure).
    pub ok: bool,
    /// Assistant reply, or the generic fallback when upstream failed.
    pub reply: String,
    pub message: String,
}

/// Creates the owner's goal profile with registration defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_register(owner_id: String) -> EntryActionResponse {
    action("profile_register", || {
        let owner_id = parse_owner(&owner_id)?;
        with_context(|ctx| {
            ctx.entry_service()
                .map_err(|err| err.to_string())?
                .register_owner(owner_id)
                .map_err(|err| err.to_string())?;
            Ok(EntryActionResponse::done("Profile ready"))
        })
    })
}

/// Updates goals and personal details; `None` keeps the stored value.
#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn profile_update(
    owner_id: String,
    calorie_goal: Option<i64>,
    water_goal_ml: Option<i64>,
    weight_goal_kg: Option<f64>,
    name: Option<String>,
    age: Option<u32>,
    gender: Option<String>,
    height_cm: Option<f64>,
    fitness_goal: Option<String>,
) -> EntryActionResponse {
    let update = ProfileUpdate {
        calorie_goal,
        water_goal_ml,
        weight_goal_kg,
        name,
        age,
        gender,
        height_cm,
        fitness_goal,
    };
    action("profile_update", || {
        let owner_id = parse_owner(&owner_id)?;
        with_context(|ctx| {
            ctx.entry_service()
                .map_err(|err| err.to_string())?
                .update_profile(owner_id, &update)
                .map_err(|err| err.to_string())?;
            Ok(EntryActionResponse::done("Profile updated successfully"))
        })
    })
}

/// Switches the display theme (`green|blue|orange|purple`).
#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_theme(owner_id: String, theme: String) -> EntryActionResponse {
    action("profile_set_theme", || {
        let owner_id = parse_owner(&owner_id)?;
        with_context(|ctx| {
            let theme = ctx
                .entry_service()
                .map_err(|err| err.to_string())?
                .set_theme(owner_id, &theme)
                .map_err(|err| err.to_string())?;
            Ok(EntryActionResponse::done(format!(
                "Theme changed to {}",
                theme.as_str()
            )))
        })
    })
}

/// Adds one meal item. A blank `date` means today.
#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_diet(
    owner_id: String,
    date: Option<String>,
    meal_type: String,
    food_name: String,
    calories: Option<i64>,
    carbs_g: Option<f64>,
    protein_g: Option<f64>,
    fat_g: Option<f64>,
) -> EntryActionResponse {
    let input = DietInput {
        date,
        meal_type,
        food_name,
        calories,
        carbs_g,
        protein_g,
        fat_g,
    };
    write_entry("entry_add_diet", &owner_id, |ctx, owner_id, today| {
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .add_diet(owner_id, &input, today)
            .map_err(|err| err.to_string())
    })
}

#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn entry_update_diet(
    owner_id: String,
    entry_id: String,
    date: Option<String>,
    meal_type: String,
    food_name: String,
    calories: Option<i64>,
    carbs_g: Option<f64>,
    protein_g: Option<f64>,
    fat_g: Option<f64>,
) -> EntryActionResponse {
    let input = DietInput {
        date,
        meal_type,
        food_name,
        calories,
        carbs_g,
        protein_g,
        fat_g,
    };
    write_entry("entry_update_diet", &owner_id, |ctx, owner_id, today| {
        let id = parse_entry_id(&entry_id)?;
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .update_diet(owner_id, id, &input, today)
            .map_err(|err| err.to_string())
    })
}

/// Records the day's weight; a second write for the same day overwrites it.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_record_weight(
    owner_id: String,
    date: Option<String>,
    weight_kg: f64,
    notes: Option<String>,
) -> EntryActionResponse {
    let input = WeightInput {
        date,
        weight_kg,
        notes,
    };
    write_entry("entry_record_weight", &owner_id, |ctx, owner_id, today| {
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .record_weight(owner_id, &input, today)
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_water(owner_id: String, date: Option<String>, amount_ml: i64) -> EntryActionResponse {
    let input = WaterInput { date, amount_ml };
    write_entry("entry_add_water", &owner_id, |ctx, owner_id, today| {
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .add_water(owner_id, &input, today)
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_update_water(
    owner_id: String,
    entry_id: String,
    date: Option<String>,
    amount_ml: i64,
) -> EntryActionResponse {
    let input = WaterInput { date, amount_ml };
    write_entry("entry_update_water", &owner_id, |ctx, owner_id, today| {
        let id = parse_entry_id(&entry_id)?;
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .update_water(owner_id, id, &input, today)
            .map_err(|err| err.to_string())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_exercise(
    owner_id: String,
    date: Option<String>,
    activity: String,
    duration_min: i64,
    calories_burned: Option<i64>,
    notes: Option<String>,
) -> EntryActionResponse {
    let input = ExerciseInput {
        date,
        activity,
        duration_min,
        calories_burned,
        notes,
    };
    write_entry("entry_add_exercise", &owner_id, |ctx, owner_id, today| {
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .add_exercise(owner_id, &input, today)
            .map_err(|err| err.to_string())
    })
}

#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn entry_update_exercise(
    owner_id: String,
    entry_id: String,
    date: Option<String>,
    activity: String,
    duration_min: i64,
    calories_burned: Option<i64>,
    notes: Option<String>,
) -> EntryActionResponse {
    let input = ExerciseInput {
        date,
        activity,
        duration_min,
        calories_burned,
        notes,
    };
    write_entry("entry_update_exercise", &owner_id, |ctx, owner_id, today| {
        let id = parse_entry_id(&entry_id)?;
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .update_exercise(owner_id, id, &input, today)
            .map_err(|err| err.to_string())
    })
}

/// Records the day's mood (1..=5); a second write for the same day overwrites it.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_record_mood(
    owner_id: String,
    date: Option<String>,
    level: u8,
    description: Option<String>,
    notes: Option<String>,
) -> EntryActionResponse {
    let input = MoodInput {
        date,
        level,
        description,
        notes,
    };
    write_entry("entry_record_mood", &owner_id, |ctx, owner_id, today| {
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .record_mood(owner_id, &input, today)
            .map_err(|err| err.to_string())
    })
}

/// Adds a reminder. `time` is `HH:MM`; weekdays are 0 (Mon)..6 (Sun).
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_reminder(
    owner_id: String,
    reminder_type: String,
    time: String,
    weekdays: Vec<u8>,
    message: Option<String>,
) -> EntryActionResponse {
    let input = ReminderInput {
        reminder_type,
        time,
        weekdays,
        message,
        active: true,
    };
    write_entry("entry_add_reminder", &owner_id, |ctx, owner_id, _| {
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .add_reminder(owner_id, &input)
            .map_err(|err| err.to_string())
    })
}

#[allow(clippy::too_many_arguments)]
#[flutter_rust_bridge::frb(sync)]
pub fn entry_update_reminder(
    owner_id: String,
    reminder_id: String,
    reminder_type: String,
    time: String,
    weekdays: Vec<u8>,
    message: Option<String>,
    active: bool,
) -> EntryActionResponse {
    let input = ReminderInput {
        reminder_type,
        time,
        weekdays,
        message,
        active,
    };
    write_entry("entry_update_reminder", &owner_id, |ctx, owner_id, _| {
        let id = parse_entry_id(&reminder_id)?;
        ctx.entry_service()
            .map_err(|err| err.to_string())?
            .update_reminder(owner_id, id, &input)
            .map_err(|err| err.to_string())
    })
}

/// Flips a reminder between active and paused.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_toggle_reminder(owner_id: String, reminder_id: String) -> EntryActionResponse {
    action("entry_toggle_reminder", || {
        let owner_id = parse_owner(&owner_id)?;
        let id = parse_entry_id(&reminder_id)?;
        with_context(|ctx| {
            let active = ctx
                .entry_service()
                .map_err(|err| err.to_string())?
                .toggle_reminder(owner_id, id)
                .map_err(|err| err.to_string())?;
            let mut response = EntryActionResponse::done(if active {
                "Reminder activated"
            } else {
                "Reminder paused"
            });
            response.entry_id = Some(id.to_string());
            Ok(response)
        })
    })
}

/// Deletes one entry by kind (`diet|weight|water|exercise|mood|reminder`) and id.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(owner_id: String, kind: String, entry_id: String) -> EntryActionResponse {
    action("entry_delete", || {
        let owner_id = parse_owner(&owner_id)?;
        let id = parse_entry_id(&entry_id)?;
        with_context(|ctx| {
            ctx.entry_service()
                .map_err(|err| err.to_string())?
                .delete_entry(owner_id, &kind, id)
                .map_err(|err| err.to_string())?;
            Ok(EntryActionResponse::done("Entry deleted successfully"))
        })
    })
}

/// Entries recorded on `date` (blank means today) as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_for_day_json(owner_id: String, date: Option<String>) -> JsonResponse {
    json_view("entries_for_day_json", || {
        let owner_id = parse_owner(&owner_id)?;
        let date = resolve_date(date.as_deref())?;
        with_context(|ctx| {
            let day = ctx
                .entry_service()
                .map_err(|err| err.to_string())?
                .day_entries(owner_id, date)
                .map_err(|err| err.to_string())?;
            Ok(JsonResponse::from_value(&day, "Entries loaded"))
        })
    })
}

/// Active reminders ordered by time of day, as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn reminders_json(owner_id: String, active_only: bool) -> JsonResponse {
    json_view("reminders_json", || {
        let owner_id = parse_owner(&owner_id)?;
        with_context(|ctx| {
            let reminders = ctx
                .entry_service()
                .map_err(|err| err.to_string())?
                .reminders(owner_id, active_only)
                .map_err(|err| err.to_string())?;
            Ok(JsonResponse::from_value(
                &reminders,
                format!("{} reminder(s)", reminders.len()),
            ))
        })
    })
}

/// Weight history (newest first) and the last 30 moods, as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn history_json(owner_id: String) -> JsonResponse {
    #[derive(Serialize)]
    struct History {
        weight: Vec<wellness_core::WeightEntry>,
        mood: Vec<wellness_core::MoodEntry>,
    }

    json_view("history_json", || {
        let owner_id = parse_owner(&owner_id)?;
        with_context(|ctx| {
            let service = ctx.entry_service().map_err(|err| err.to_string())?;
            let history = History {
                weight: service
                    .weight_history(owner_id)
                    .map_err(|err| err.to_string())?,
                mood: service.recent_moods(owner_id).map_err(|err| err.to_string())?,
            };
            Ok(JsonResponse::from_value(&history, "History loaded"))
        })
    })
}

/// Today's dashboard numbers.
#[flutter_rust_bridge::frb(sync)]
pub fn progress_today(owner_id: String) -> TodaySnapshotResponse {
    let result = parse_owner(&owner_id).and_then(|owner_id| {
        with_context(|ctx| {
            ctx.progress_service()
                .map_err(|err| err.to_string())?
                .today_snapshot(owner_id, today())
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(snapshot) => TodaySnapshotResponse {
            ok: true,
            message: "Snapshot loaded".to_string(),
            date: snapshot.date.format("%Y-%m-%d").to_string(),
            calories_consumed: snapshot.calories_consumed,
            calorie_goal: snapshot.calorie_goal,
            calories_goal_percent: snapshot.calories_goal_percent,
            water_intake: snapshot.water_intake,
            water_goal: snapshot.water_goal,
            water_goal_percent: snapshot.water_goal_percent,
            calories_burned: snapshot.calories_burned,
            exercise_minutes: snapshot.exercise_minutes,
            exercise_goal_percent: snapshot.exercise_goal_percent,
            current_weight: snapshot.current_weight,
        },
        Err(err) => TodaySnapshotResponse {
            message: log_failure("progress_today", err),
            ..TodaySnapshotResponse::default()
        },
    }
}

/// Per-day series of `metric` ending today.
///
/// `window_days` of `None` or 0 selects the metric default (30 days for
/// calories/weight/mood, 7 for water/exercise); values above 365 are capped.
#[flutter_rust_bridge::frb(sync)]
pub fn progress_series(owner_id: String, metric: String, window_days: Option<u32>) -> SeriesResponse {
    let result = parse_owner(&owner_id).and_then(|owner_id| {
        let metric = metric
            .parse::<MetricKind>()
            .map_err(|err| err.to_string())?;
        with_context(|ctx| {
            ctx.progress_service()
                .map_err(|err| err.to_string())?
                .metric_series(owner_id, metric, window_days.unwrap_or(0), today())
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(series) => SeriesResponse {
            ok: true,
            message: format!("{} day(s)", series.points.len()),
            metric: series.metric.as_str().to_string(),
            start_date: series.window.start.format("%Y-%m-%d").to_string(),
            end_date: series.window.end.format("%Y-%m-%d").to_string(),
            points: series
                .points
                .into_iter()
                .map(|bucket| SeriesPoint {
                    date: bucket.date.format("%Y-%m-%d").to_string(),
                    day: bucket.day,
                    value: bucket.value,
                })
                .collect(),
        },
        Err(err) => SeriesResponse {
            message: log_failure("progress_series", err),
            ..SeriesResponse::default()
        },
    }
}

/// Onboarding journey summary.
#[flutter_rust_bridge::frb(sync)]
pub fn progress_journey(owner_id: String) -> JourneyResponse {
    let result = parse_owner(&owner_id).and_then(|owner_id| {
        with_context(|ctx| {
            ctx.progress_service()
                .map_err(|err| err.to_string())?
                .journey_summary(owner_id, today())
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(journey) => JourneyResponse {
            ok: true,
            message: "Journey loaded".to_string(),
            stage: match journey.stage {
                wellness_core::JourneyStage::Beginner => "beginner".to_string(),
                wellness_core::JourneyStage::Intermediate => "intermediate".to_string(),
            },
            total_entries: journey.total_entries,
            diet_count: journey.tracking_counts.diet,
            water_count: journey.tracking_counts.water,
            weight_count: journey.tracking_counts.weight,
            exercise_count: journey.tracking_counts.exercise,
            mood_count: journey.tracking_counts.mood,
            water_progress: journey.water_progress,
            calorie_progress: journey.calorie_progress,
            exercise_minutes: journey.exercise_minutes,
            current_mood: journey.current_mood,
        },
        Err(err) => JourneyResponse {
            message: log_failure("progress_journey", err),
            ..JourneyResponse::default()
        },
    }
}

/// Progress summary including directional weight progress.
#[flutter_rust_bridge::frb(sync)]
pub fn progress_summary(owner_id: String) -> ProgressSummaryResponse {
    let result = parse_owner(&owner_id).and_then(|owner_id| {
        with_context(|ctx| {
            ctx.progress_service()
                .map_err(|err| err.to_string())?
                .progress_summary(owner_id, today())
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(summary) => ProgressSummaryResponse {
            ok: true,
            message: "Summary loaded".to_string(),
            water_progress: summary.water_progress,
            calorie_progress: summary.calorie_progress,
            exercise_minutes: summary.exercise_minutes,
            calories_burned: summary.calories_burned,
            current_mood: summary.current_mood,
            weight_progress: summary.weight_progress,
        },
        Err(err) => ProgressSummaryResponse {
            message: log_failure("progress_summary", err),
            ..ProgressSummaryResponse::default()
        },
    }
}

/// Nutrition, water and exercise details of `date` (blank means today), as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn progress_day_json(owner_id: String, date: Option<String>) -> JsonResponse {
    #[derive(Serialize)]
    struct DayDetails {
        nutrition: wellness_core::service::progress_service::NutritionDay,
        water: wellness_core::service::progress_service::WaterDay,
        exercise: wellness_core::service::progress_service::ExerciseDay,
    }

    json_view("progress_day_json", || {
        let owner_id = parse_owner(&owner_id)?;
        let date = resolve_date(date.as_deref())?;
        with_context(|ctx| {
            let service = ctx.progress_service().map_err(|err| err.to_string())?;
            let details = DayDetails {
                nutrition: service
                    .nutrition_day(owner_id, date)
                    .map_err(|err| err.to_string())?,
                water: service
                    .water_day(owner_id, date)
                    .map_err(|err| err.to_string())?,
                exercise: service
                    .exercise_day(owner_id, date)
                    .map_err(|err| err.to_string())?,
            };
            Ok(JsonResponse::from_value(&details, "Day details loaded"))
        })
    })
}

/// The 30-day reports bundle as JSON.
#[flutter_rust_bridge::frb(sync)]
pub fn progress_report_json(owner_id: String) -> JsonResponse {
    json_view("progress_report_json", || {
        let owner_id = parse_owner(&owner_id)?;
        with_context(|ctx| {
            let report = ctx
                .progress_service()
                .map_err(|err| err.to_string())?
                .report(owner_id, today())
                .map_err(|err| err.to_string())?;
            Ok(JsonResponse::from_value(&report, "Report loaded"))
        })
    })
}

/// Every record of the owner as one flat JSON document.
#[flutter_rust_bridge::frb(sync)]
pub fn export_data_json(owner_id: String) -> JsonResponse {
    json_view("export_data_json", || {
        let owner_id = parse_owner(&owner_id)?;
        with_context(|ctx| {
            let document = ctx
                .export_service()
                .map_err(|err| err.to_string())?
                .export(owner_id)
                .map_err(|err| err.to_string())?;
            Ok(JsonResponse::from_value(
                &document,
                format!("Exported {} record(s)", document.record_count()),
            ))
        })
    })
}

/// Sends one chat message to the assistant with the owner's metrics as context.
///
/// # FFI contract
/// - Blocks for at most the configured request timeout.
/// - Upstream failures return `ok = true` with the generic fallback reply.
#[flutter_rust_bridge::frb(sync)]
pub fn assistant_chat(owner_id: String, message: String) -> ChatResponse {
    let result = parse_owner(&owner_id).and_then(|owner_id| {
        with_context(|ctx| {
            let client = ctx.openai_client().map_err(|err| err.to_string())?;
            ctx.assistant_service(client)
                .map_err(|err| err.to_string())?
                .chat(owner_id, &message, today())
                .map_err(|err| err.to_string())
        })
    });

    match result {
        Ok(reply) => ChatResponse {
            ok: true,
            message: if reply.delivered {
                "Reply received".to_string()
            } else {
                "Assistant unavailable".to_string()
            },
            reply: reply.reply,
        },
        Err(err) => ChatResponse {
            ok: false,
            reply: String::new(),
            message: log_failure("assistant_chat", err),
        },
    }
}

fn action(
    op: &'static str,
    f: impl FnOnce() -> Result<EntryActionResponse, String>,
) -> EntryActionResponse {
    f().unwrap_or_else(|err| EntryActionResponse::failure(log_failure(op, err)))
}

fn json_view(op: &'static str, f: impl FnOnce() -> Result<JsonResponse, String>) -> JsonResponse {
    f().unwrap_or_else(|err| JsonResponse::failure(log_failure(op, err)))
}

fn write_entry(
    op: &'static str,
    owner_id: &str,
    f: impl FnOnce(&AppContext, OwnerId, NaiveDate) -> Result<WriteOutcome, String>,
) -> EntryActionResponse {
    action(op, || {
        let owner_id = parse_owner(owner_id)?;
        with_context(|ctx| f(ctx, owner_id, today())).map(EntryActionResponse::from_outcome)
    })
}

fn log_failure(op: &'static str, err: String) -> String {
    warn!("event=ffi_call module=ffi status=error op={}", op);
    format!("{op} failed: {err}")
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, String> {
    resolve_entry_date(raw, today()).map_err(|err| err.to_string())
}

fn parse_owner(raw: &str) -> Result<OwnerId, String> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid owner_id `{}`", raw.trim()))
}

fn parse_entry_id(raw: &str) -> Result<wellness_core::EntryId, String> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid entry id `{}`", raw.trim()))
}

fn resolve_config() -> Result<&'static WellnessConfig, String> {
    CONFIG
        .get_or_init(WellnessConfig::from_env)
        .as_ref()
        .map_err(|err| format!("configuration error: {err}"))
}

fn with_context<T>(f: impl FnOnce(&AppContext) -> Result<T, String>) -> Result<T, String> {
    let config = resolve_config()?;
    let ctx = AppContext::open(config.clone()).map_err(|err| format!("DB open failed: {err}"))?;
    f(&ctx)
}
