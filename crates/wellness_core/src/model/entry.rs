//! Daily tracked entries: diet, weight, water, exercise and mood.
//!
//! # Responsibility
//! - Define the dated records the aggregator works on.
//! - Validate fields before the repository persists them.
//!
//! # Invariants
//! - `WeightEntry` and `MoodEntry` are unique per `(owner_id, date)`; the
//!   repository enforces this with an upsert, never with a second row.
//! - Diet, water and exercise allow any number of rows per day.

use super::validation::{bounded_i64, limit_text, non_negative_f64, require_text};
use super::{now_epoch_ms, EntryId, EntryValidationError, OwnerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const LABEL_MAX_CHARS: usize = 100;
const NOTES_MAX_CHARS: usize = 200;
const MOOD_DESCRIPTION_MAX_CHARS: usize = 50;
const MAX_WEIGHT_KG: f64 = 700.0;
// Upper bounds keep any day's totals far below `i64::MAX`.
pub const MAX_CALORIES: i64 = 100_000;
pub const MAX_WATER_ML: i64 = 20_000;
pub const MAX_DURATION_MIN: i64 = 1_440;

/// Storage kinds addressable by delete-by-kind-and-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Diet,
    Weight,
    Water,
    Exercise,
    Mood,
    Reminder,
}

impl EntryKind {
    /// The five categories counted towards journey progress.
    pub const TRACKED: [EntryKind; 5] = [
        EntryKind::Diet,
        EntryKind::Water,
        EntryKind::Weight,
        EntryKind::Exercise,
        EntryKind::Mood,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Weight => "weight",
            Self::Water => "water",
            Self::Exercise => "exercise",
            Self::Mood => "mood",
            Self::Reminder => "reminder",
        }
    }

    /// Backing table name. Never built from caller input.
    pub(crate) fn table(self) -> &'static str {
        match self {
            Self::Diet => "diet_entries",
            Self::Weight => "weight_entries",
            Self::Water => "water_entries",
            Self::Exercise => "exercise_entries",
            Self::Mood => "mood_entries",
            Self::Reminder => "reminders",
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = EntryValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "diet" => Ok(Self::Diet),
            "weight" => Ok(Self::Weight),
            "water" => Ok(Self::Water),
            "exercise" => Ok(Self::Exercise),
            "mood" => Ok(Self::Mood),
            "reminder" | "reminders" => Ok(Self::Reminder),
            _ => Err(EntryValidationError::UnknownKind(value.to_string())),
        }
    }
}

/// Common view over dated records used by the aggregator.
pub trait DatedEntry {
    fn entry_date(&self) -> NaiveDate;
    fn created_at(&self) -> i64;
}

/// Meal category of a diet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl FromStr for MealType {
    type Err = EntryValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            _ => Err(EntryValidationError::UnknownLabel {
                field: "meal_type",
                value: value.to_string(),
            }),
        }
    }
}

/// One food item eaten on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietEntry {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: Option<i64>,
    pub carbs_g: Option<f64>,
    pub protein_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub created_at: i64,
}

impl DietEntry {
    /// Creates an entry with a fresh id and no nutrition values.
    pub fn new(
        owner_id: OwnerId,
        date: NaiveDate,
        meal_type: MealType,
        food_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            date,
            meal_type,
            food_name: food_name.into(),
            calories: None,
            carbs_g: None,
            protein_g: None,
            fat_g: None,
            created_at: now_epoch_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        require_text("food_name", &self.food_name, LABEL_MAX_CHARS)?;
        bounded_i64("calories", self.calories, 0, MAX_CALORIES, "0..=100000 kcal")?;
        non_negative_f64("carbs", self.carbs_g)?;
        non_negative_f64("protein", self.protein_g)?;
        non_negative_f64("fat", self.fat_g)
    }
}

/// Body weight on `date`, in kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl WeightEntry {
    pub fn new(owner_id: OwnerId, date: NaiveDate, weight_kg: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            date,
            weight_kg,
            notes: None,
            created_at: now_epoch_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 || self.weight_kg > MAX_WEIGHT_KG
        {
            return Err(EntryValidationError::OutOfRange {
                field: "weight",
                value: self.weight_kg.to_string(),
                expected: "a weight in kg between 0 and 700",
            });
        }
        limit_text("notes", self.notes.as_deref(), NOTES_MAX_CHARS)
    }
}

/// One drink on `date`, in milliliters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub date: NaiveDate,
    pub amount_ml: i64,
    pub created_at: i64,
}

impl WaterEntry {
    pub fn new(owner_id: OwnerId, date: NaiveDate, amount_ml: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            date,
            amount_ml,
            created_at: now_epoch_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        bounded_i64("amount", Some(self.amount_ml), 1, MAX_WATER_ML, "1..=20000 ml")
    }
}

/// One workout on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub date: NaiveDate,
    pub activity: String,
    pub duration_min: i64,
    pub calories_burned: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl ExerciseEntry {
    pub fn new(
        owner_id: OwnerId,
        date: NaiveDate,
        activity: impl Into<String>,
        duration_min: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            date,
            activity: activity.into(),
            duration_min,
            calories_burned: None,
            notes: None,
            created_at: now_epoch_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        require_text("activity", &self.activity, LABEL_MAX_CHARS)?;
        bounded_i64(
            "duration",
            Some(self.duration_min),
            1,
            MAX_DURATION_MIN,
            "1..=1440 minutes",
        )?;
        bounded_i64(
            "calories_burned",
            self.calories_burned,
            0,
            MAX_CALORIES,
            "0..=100000 kcal",
        )?;
        limit_text("notes", self.notes.as_deref(), NOTES_MAX_CHARS)
    }
}

/// Self-reported mood on `date`, level 1 (low) to 5 (high).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub date: NaiveDate,
    pub level: u8,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl MoodEntry {
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 5;

    pub fn new(owner_id: OwnerId, date: NaiveDate, level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            date,
            level,
            description: None,
            notes: None,
            created_at: now_epoch_ms(),
        }
    }

    /// Display label: the description, or `Level N` when none was given.
    pub fn label(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => format!("Level {}", self.level),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !(Self::MIN_LEVEL..=Self::MAX_LEVEL).contains(&self.level) {
            return Err(EntryValidationError::OutOfRange {
                field: "mood_level",
                value: self.level.to_string(),
                expected: "1..=5",
            });
        }
        limit_text(
            "mood_description",
            self.description.as_deref(),
            MOOD_DESCRIPTION_MAX_CHARS,
        )?;
        limit_text("notes", self.notes.as_deref(), NOTES_MAX_CHARS)
    }
}

macro_rules! impl_dated_entry {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl DatedEntry for $ty {
                fn entry_date(&self) -> NaiveDate {
                    self.date
                }

                fn created_at(&self) -> i64 {
                    self.created_at
                }
            }
        )+
    };
}

impl_dated_entry!(DietEntry, WeightEntry, WaterEntry, ExerciseEntry, MoodEntry);

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date")
    }

    #[test]
    fn entry_kind_parses_case_insensitively_and_rejects_unknown() {
        assert_eq!("Weight".parse::<EntryKind>(), Ok(EntryKind::Weight));
        assert_eq!("reminders".parse::<EntryKind>(), Ok(EntryKind::Reminder));
        assert_eq!(
            "sleep".parse::<EntryKind>(),
            Err(EntryValidationError::UnknownKind("sleep".to_string()))
        );
    }

    #[test]
    fn numeric_fields_are_capped() {
        let owner = Uuid::new_v4();
        assert!(WaterEntry::new(owner, day(), MAX_WATER_ML).validate().is_ok());
        assert!(WaterEntry::new(owner, day(), i64::MAX).validate().is_err());

        let mut diet = DietEntry::new(owner, day(), MealType::Snack, "Nuts");
        diet.calories = Some(i64::MAX);
        assert!(diet.validate().is_err());

        let mut exercise = ExerciseEntry::new(owner, day(), "Walk", 1_441);
        assert!(exercise.validate().is_err());
        exercise.duration_min = 60;
        exercise.calories_burned = Some(MAX_CALORIES + 1);
        assert!(exercise.validate().is_err());
    }

    #[test]
    fn mood_level_outside_scale_is_rejected() {
        let owner = Uuid::new_v4();
        assert!(MoodEntry::new(owner, day(), 0).validate().is_err());
        assert!(MoodEntry::new(owner, day(), 6).validate().is_err());
        assert!(MoodEntry::new(owner, day(), 3).validate().is_ok());
    }

    #[test]
    fn mood_label_falls_back_to_level() {
        let mut mood = MoodEntry::new(Uuid::new_v4(), day(), 4);
        assert_eq!(mood.label(), "Level 4");
        mood.description = Some("happy".to_string());
        assert_eq!(mood.label(), "happy");
    }

    #[test]
    fn diet_rejects_blank_food_and_negative_calories() {
        let owner = Uuid::new_v4();
        let blank = DietEntry::new(owner, day(), MealType::Lunch, " ");
        assert_eq!(
            blank.validate(),
            Err(EntryValidationError::BlankField("food_name"))
        );

        let mut negative = DietEntry::new(owner, day(), MealType::Lunch, "soup");
        negative.calories = Some(-5);
        assert!(matches!(
            negative.validate(),
            Err(EntryValidationError::OutOfRange { field: "calories", .. })
        ));
    }

    #[test]
    fn weight_must_be_positive_and_finite() {
        let owner = Uuid::new_v4();
        assert!(WeightEntry::new(owner, day(), 0.0).validate().is_err());
        assert!(WeightEntry::new(owner, day(), f64::INFINITY)
            .validate()
            .is_err());
        assert!(WeightEntry::new(owner, day(), 72.5).validate().is_ok());
    }
}
