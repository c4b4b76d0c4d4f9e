//! Full-data export of one owner.
//!
//! # Invariants
//! - Every stored entity of the owner appears exactly once.
//! - Dates are `YYYY-MM-DD`, reminder times `HH:MM`, weekdays a `0,1,3` list.
//! - A missing profile exports as an empty object.

use super::ServiceResult;
use crate::metrics::dates::{format_date, format_time_of_day};
use crate::model::reminder::weekdays_to_db;
use crate::model::{EntryId, OwnerId};
use crate::repo::entry_repo::{EntryQuery, EntryRepository};
use crate::repo::profile_repo::ProfileRepository;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DietExport {
    pub id: EntryId,
    pub date: String,
    pub meal_type: String,
    pub food_name: String,
    pub calories: Option<i64>,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightExport {
    pub id: EntryId,
    pub date: String,
    pub weight: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaterExport {
    pub id: EntryId,
    pub date: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseExport {
    pub id: EntryId,
    pub date: String,
    pub activity: String,
    pub duration: i64,
    pub calories_burned: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodExport {
    pub id: EntryId,
    pub date: String,
    pub mood_level: u8,
    pub mood_description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderExport {
    pub id: EntryId,
    pub reminder_type: String,
    pub time: String,
    pub days: String,
    pub message: Option<String>,
    pub active: bool,
}

/// Flat export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportDocument {
    pub profile: ProfileExport,
    pub diet: Vec<DietExport>,
    pub weight: Vec<WeightExport>,
    pub water: Vec<WaterExport>,
    pub exercise: Vec<ExerciseExport>,
    pub mood: Vec<MoodExport>,
    pub reminders: Vec<ReminderExport>,
}

impl ExportDocument {
    /// Number of exported entries and reminders.
    pub fn record_count(&self) -> usize {
        self.diet.len()
            + self.weight.len()
            + self.water.len()
            + self.exercise.len()
            + self.mood.len()
            + self.reminders.len()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub struct ExportService<R: EntryRepository, P: ProfileRepository> {
    entries: R,
    profiles: P,
}

impl<R: EntryRepository, P: ProfileRepository> ExportService<R, P> {
    pub fn new(entries: R, profiles: P) -> Self {
        Self { entries, profiles }
    }

    /// Collects every record of `owner_id`, each list oldest first.
    pub fn export(&self, owner_id: OwnerId) -> ServiceResult<ExportDocument> {
        let all = EntryQuery::all(owner_id);

        let profile = self
            .profiles
            .get_profile(owner_id)?
            .map(|profile| ProfileExport {
                name: profile.name,
                age: profile.age,
                gender: profile.gender,
                height: profile.height_cm,
                weight_goal: profile.weight_goal_kg,
                calorie_goal: Some(profile.calorie_goal),
                water_goal: Some(profile.water_goal_ml),
                theme: Some(profile.theme.as_str().to_string()),
                fitness_goal: profile.fitness_goal,
            })
            .unwrap_or_default();

        let document = ExportDocument {
            profile,
            diet: self
                .entries
                .list_diet(&all)?
                .into_iter()
                .map(|entry| DietExport {
                    id: entry.id,
                    date: format_date(entry.date),
                    meal_type: entry.meal_type.as_str().to_string(),
                    food_name: entry.food_name,
                    calories: entry.calories,
                    carbs: entry.carbs_g,
                    protein: entry.protein_g,
                    fat: entry.fat_g,
                })
                .collect(),
            weight: self
                .entries
                .list_weight(&all)?
                .into_iter()
                .map(|entry| WeightExport {
                    id: entry.id,
                    date: format_date(entry.date),
                    weight: entry.weight_kg,
                    notes: entry.notes,
                })
                .collect(),
            water: self
                .entries
                .list_water(&all)?
                .into_iter()
                .map(|entry| WaterExport {
                    id: entry.id,
                    date: format_date(entry.date),
                    amount: entry.amount_ml,
                })
                .collect(),
            exercise: self
                .entries
                .list_exercise(&all)?
                .into_iter()
                .map(|entry| ExerciseExport {
                    id: entry.id,
                    date: format_date(entry.date),
                    activity: entry.activity,
                    duration: entry.duration_min,
                    calories_burned: entry.calories_burned,
                    notes: entry.notes,
                })
                .collect(),
            mood: self
                .entries
                .list_mood(&all)?
                .into_iter()
                .map(|entry| MoodExport {
                    id: entry.id,
                    date: format_date(entry.date),
                    mood_level: entry.level,
                    mood_description: entry.description,
                    notes: entry.notes,
                })
                .collect(),
            reminders: self
                .entries
                .list_reminders(owner_id, false)?
                .into_iter()
                .map(|reminder| ReminderExport {
                    id: reminder.id,
                    reminder_type: reminder.reminder_type.as_str().to_string(),
                    time: format_time_of_day(reminder.time),
                    days: weekdays_to_db(&reminder.weekdays),
                    message: reminder.message,
                    active: reminder.active,
                })
                .collect(),
        };

        info!(
            "event=data_export module=service status=ok owner_id={} records={}",
            owner_id,
            document.record_count()
        );
        Ok(document)
    }
}
