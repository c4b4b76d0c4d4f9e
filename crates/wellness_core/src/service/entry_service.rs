//! Entry write and listing use-cases.
//!
//! # Responsibility
//! - Turn raw request fields (labels, `YYYY-MM-DD` dates, `HH:MM` times)
//!   into validated entries and persist them.
//! - Report per-day upserts as `Created`/`Updated` outcomes.
//!
//! # Invariants
//! - Every update and delete is scoped to the calling owner.
//! - Malformed dates are rejected; an absent or blank date means `today`.

use super::{ServiceError, ServiceResult};
use crate::metrics::dates::{parse_time_of_day, resolve_entry_date};
use crate::model::entry::{
    DietEntry, EntryKind, ExerciseEntry, MealType, MoodEntry, WaterEntry, WeightEntry,
};
use crate::model::profile::{GoalProfile, Theme};
use crate::model::reminder::{Reminder, ReminderType};
use crate::model::{EntryId, OwnerId};
use crate::repo::entry_repo::{EntryQuery, EntryRepository, UpsertOutcome, WriteStatus};
use crate::repo::profile_repo::ProfileRepository;
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of mood entries shown in the mood history.
pub const RECENT_MOOD_LIMIT: u32 = 30;

/// Raw diet request fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DietInput {
    pub date: Option<String>,
    pub meal_type: String,
    pub food_name: String,
    pub calories: Option<i64>,
    pub carbs_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeightInput {
    pub date: Option<String>,
    pub weight_kg: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WaterInput {
    pub date: Option<String>,
    pub amount_ml: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExerciseInput {
    pub date: Option<String>,
    pub activity: String,
    pub duration_min: i64,
    pub calories_burned: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MoodInput {
    pub date: Option<String>,
    pub level: u8,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Raw reminder request fields. `time` is `HH:MM`, days are 0 (Mon)..6 (Sun).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReminderInput {
    pub reminder_type: String,
    pub time: String,
    pub weekdays: Vec<u8>,
    pub message: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial profile update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileUpdate {
    pub calorie_goal: Option<i64>,
    pub water_goal_ml: Option<i64>,
    pub weight_goal_kg: Option<f64>,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub fitness_goal: Option<String>,
}

/// Result of one write, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub kind: EntryKind,
    pub id: EntryId,
    pub status: WriteStatus,
    pub message: String,
}

impl WriteOutcome {
    fn new(kind: EntryKind, id: EntryId, status: WriteStatus) -> Self {
        let verb = match status {
            WriteStatus::Created => "added",
            WriteStatus::Updated => "updated",
        };
        Self {
            kind,
            id,
            status,
            message: format!("{} {verb} successfully", display_name(kind)),
        }
    }

    fn from_upsert(kind: EntryKind, outcome: UpsertOutcome) -> Self {
        Self::new(kind, outcome.id, outcome.status)
    }
}

fn display_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Diet => "Meal",
        EntryKind::Weight => "Weight entry",
        EntryKind::Water => "Water intake",
        EntryKind::Exercise => "Exercise",
        EntryKind::Mood => "Mood entry",
        EntryKind::Reminder => "Reminder",
    }
}

/// Everything an owner recorded on one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayEntries {
    pub diet: Vec<DietEntry>,
    pub water: Vec<WaterEntry>,
    pub exercise: Vec<ExerciseEntry>,
    pub weight: Option<WeightEntry>,
    pub mood: Option<MoodEntry>,
}

/// Use-case service for entry writes, deletes and plain listings.
pub struct EntryService<R: EntryRepository, P: ProfileRepository> {
    entries: R,
    profiles: P,
}

impl<R: EntryRepository, P: ProfileRepository> EntryService<R, P> {
    pub fn new(entries: R, profiles: P) -> Self {
        Self { entries, profiles }
    }

    /// Creates the owner's profile with registration defaults if missing.
    pub fn register_owner(&self, owner_id: OwnerId) -> ServiceResult<GoalProfile> {
        Ok(self.profiles.ensure_profile(owner_id)?)
    }

    pub fn add_diet(
        &self,
        owner_id: OwnerId,
        input: &DietInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let entry = build_diet(owner_id, Uuid::new_v4(), input, today)?;
        let id = self.entries.insert_diet(&entry)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Diet,
            id,
            WriteStatus::Created,
        )))
    }

    pub fn update_diet(
        &self,
        owner_id: OwnerId,
        id: EntryId,
        input: &DietInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let entry = build_diet(owner_id, id, input, today)?;
        self.entries.update_diet(&entry)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Diet,
            id,
            WriteStatus::Updated,
        )))
    }

    /// Records the day's weight, overwriting an earlier value for that day.
    pub fn record_weight(
        &self,
        owner_id: OwnerId,
        input: &WeightInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let date = resolve_entry_date(input.date.as_deref(), today)?;
        let mut entry = WeightEntry::new(owner_id, date, input.weight_kg);
        entry.notes = non_blank(input.notes.as_deref());
        let outcome = self.entries.upsert_weight(&entry)?;
        Ok(log_write(WriteOutcome::from_upsert(
            EntryKind::Weight,
            outcome,
        )))
    }

    pub fn add_water(
        &self,
        owner_id: OwnerId,
        input: &WaterInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let date = resolve_entry_date(input.date.as_deref(), today)?;
        let entry = WaterEntry::new(owner_id, date, input.amount_ml);
        let id = self.entries.insert_water(&entry)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Water,
            id,
            WriteStatus::Created,
        )))
    }

    pub fn update_water(
        &self,
        owner_id: OwnerId,
        id: EntryId,
        input: &WaterInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let date = resolve_entry_date(input.date.as_deref(), today)?;
        let mut entry = WaterEntry::new(owner_id, date, input.amount_ml);
        entry.id = id;
        self.entries.update_water(&entry)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Water,
            id,
            WriteStatus::Updated,
        )))
    }

    pub fn add_exercise(
        &self,
        owner_id: OwnerId,
        input: &ExerciseInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let entry = build_exercise(owner_id, Uuid::new_v4(), input, today)?;
        let id = self.entries.insert_exercise(&entry)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Exercise,
            id,
            WriteStatus::Created,
        )))
    }

    pub fn update_exercise(
        &self,
        owner_id: OwnerId,
        id: EntryId,
        input: &ExerciseInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let entry = build_exercise(owner_id, id, input, today)?;
        self.entries.update_exercise(&entry)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Exercise,
            id,
            WriteStatus::Updated,
        )))
    }

    /// Records the day's mood, overwriting an earlier value for that day.
    pub fn record_mood(
        &self,
        owner_id: OwnerId,
        input: &MoodInput,
        today: NaiveDate,
    ) -> ServiceResult<WriteOutcome> {
        let date = resolve_entry_date(input.date.as_deref(), today)?;
        let mut entry = MoodEntry::new(owner_id, date, input.level);
        entry.description = non_blank(input.description.as_deref());
        entry.notes = non_blank(input.notes.as_deref());
        let outcome = self.entries.upsert_mood(&entry)?;
        Ok(log_write(WriteOutcome::from_upsert(EntryKind::Mood, outcome)))
    }

    pub fn add_reminder(
        &self,
        owner_id: OwnerId,
        input: &ReminderInput,
    ) -> ServiceResult<WriteOutcome> {
        let reminder = build_reminder(owner_id, Uuid::new_v4(), input)?;
        let id = self.entries.insert_reminder(&reminder)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Reminder,
            id,
            WriteStatus::Created,
        )))
    }

    pub fn update_reminder(
        &self,
        owner_id: OwnerId,
        id: EntryId,
        input: &ReminderInput,
    ) -> ServiceResult<WriteOutcome> {
        let reminder = build_reminder(owner_id, id, input)?;
        self.entries.update_reminder(&reminder)?;
        Ok(log_write(WriteOutcome::new(
            EntryKind::Reminder,
            id,
            WriteStatus::Updated,
        )))
    }

    /// Flips a reminder between active and inactive; returns the new state.
    pub fn toggle_reminder(&self, owner_id: OwnerId, id: EntryId) -> ServiceResult<bool> {
        let active = self.entries.toggle_reminder(owner_id, id)?;
        info!(
            "event=reminder_toggle module=service status=ok reminder_id={} active={}",
            id, active
        );
        Ok(active)
    }

    /// Applies the `Some` fields of `update` on top of the stored profile.
    pub fn update_profile(
        &self,
        owner_id: OwnerId,
        update: &ProfileUpdate,
    ) -> ServiceResult<GoalProfile> {
        let mut profile = self.profiles.ensure_profile(owner_id)?;
        if let Some(calorie_goal) = update.calorie_goal {
            profile.calorie_goal = calorie_goal;
        }
        if let Some(water_goal_ml) = update.water_goal_ml {
            profile.water_goal_ml = water_goal_ml;
        }
        if update.weight_goal_kg.is_some() {
            profile.weight_goal_kg = update.weight_goal_kg;
        }
        if update.age.is_some() {
            profile.age = update.age;
        }
        if update.height_cm.is_some() {
            profile.height_cm = update.height_cm;
        }
        if let Some(name) = update.name.as_deref() {
            profile.name = non_blank(Some(name));
        }
        if let Some(gender) = update.gender.as_deref() {
            profile.gender = non_blank(Some(gender));
        }
        if let Some(fitness_goal) = update.fitness_goal.as_deref() {
            profile.fitness_goal = non_blank(Some(fitness_goal));
        }

        self.profiles.save_profile(&profile)?;
        info!(
            "event=profile_update module=service status=ok owner_id={}",
            owner_id
        );
        Ok(profile)
    }

    /// Switches the display theme (`green|blue|orange|purple`).
    pub fn set_theme(&self, owner_id: OwnerId, theme: &str) -> ServiceResult<Theme> {
        let theme = theme.parse::<Theme>()?;
        self.profiles.ensure_profile(owner_id)?;
        self.profiles.set_theme(owner_id, theme)?;
        Ok(theme)
    }

    /// Deletes one entry addressed by its kind label and id.
    ///
    /// # Errors
    /// - `ServiceError::Validation` for an unknown kind label.
    /// - `ServiceError::NotFound` for a missing id or one owned by someone else.
    pub fn delete_entry(&self, owner_id: OwnerId, kind: &str, id: EntryId) -> ServiceResult<()> {
        let kind = kind.parse::<EntryKind>()?;
        match self.entries.delete_entry(owner_id, kind, id) {
            Ok(()) => {
                info!(
                    "event=entry_delete module=service status=ok kind={} entry_id={}",
                    kind, id
                );
                Ok(())
            }
            Err(err) => {
                let err = ServiceError::from(err);
                warn!(
                    "event=entry_delete module=service status=error kind={} entry_id={} error_code={}",
                    kind,
                    id,
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// All entries of `date`, each kind oldest first.
    pub fn day_entries(&self, owner_id: OwnerId, date: NaiveDate) -> ServiceResult<DayEntries> {
        let query = EntryQuery::on(owner_id, date);
        Ok(DayEntries {
            diet: self.entries.list_diet(&query)?,
            water: self.entries.list_water(&query)?,
            exercise: self.entries.list_exercise(&query)?,
            weight: self.entries.list_weight(&query)?.into_iter().next(),
            mood: self.entries.list_mood(&query)?.into_iter().next(),
        })
    }

    /// Full weight history, newest first.
    pub fn weight_history(&self, owner_id: OwnerId) -> ServiceResult<Vec<WeightEntry>> {
        Ok(self
            .entries
            .list_weight(&EntryQuery::all(owner_id).newest_first())?)
    }

    /// The most recent moods, newest first.
    pub fn recent_moods(&self, owner_id: OwnerId) -> ServiceResult<Vec<MoodEntry>> {
        Ok(self.entries.list_mood(
            &EntryQuery::all(owner_id)
                .newest_first()
                .with_limit(RECENT_MOOD_LIMIT),
        )?)
    }

    /// Reminders ordered by time of day.
    pub fn reminders(&self, owner_id: OwnerId, active_only: bool) -> ServiceResult<Vec<Reminder>> {
        Ok(self.entries.list_reminders(owner_id, active_only)?)
    }
}

fn build_diet(
    owner_id: OwnerId,
    id: EntryId,
    input: &DietInput,
    today: NaiveDate,
) -> ServiceResult<DietEntry> {
    let date = resolve_entry_date(input.date.as_deref(), today)?;
    let meal_type = input.meal_type.parse::<MealType>()?;
    let mut entry = DietEntry::new(owner_id, date, meal_type, input.food_name.trim());
    entry.id = id;
    entry.calories = input.calories;
    entry.carbs_g = input.carbs_g;
    entry.protein_g = input.protein_g;
    entry.fat_g = input.fat_g;
    Ok(entry)
}

fn build_exercise(
    owner_id: OwnerId,
    id: EntryId,
    input: &ExerciseInput,
    today: NaiveDate,
) -> ServiceResult<ExerciseEntry> {
    let date = resolve_entry_date(input.date.as_deref(), today)?;
    let mut entry = ExerciseEntry::new(owner_id, date, input.activity.trim(), input.duration_min);
    entry.id = id;
    entry.calories_burned = input.calories_burned;
    entry.notes = non_blank(input.notes.as_deref());
    Ok(entry)
}

fn build_reminder(owner_id: OwnerId, id: EntryId, input: &ReminderInput) -> ServiceResult<Reminder> {
    let reminder_type = input.reminder_type.parse::<ReminderType>()?;
    let time = parse_time_of_day(&input.time)?;
    let mut reminder = Reminder::new(owner_id, reminder_type, time, input.weekdays.iter().copied());
    reminder.id = id;
    reminder.message = non_blank(input.message.as_deref());
    reminder.active = input.active;
    Ok(reminder)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn log_write(outcome: WriteOutcome) -> WriteOutcome {
    info!(
        "event=entry_write module=service status=ok kind={} entry_id={} outcome={:?}",
        outcome.kind, outcome.id, outcome.status
    );
    outcome
}
