//! Read-only progress views: today snapshot, trend series, journey and
//! progress summaries, day details and the report bundle.
//!
//! # Responsibility
//! - Load the owner's entries through the repositories on every call.
//! - Delegate all arithmetic to `metrics`.
//!
//! # Invariants
//! - An absent profile means default goals (2000 kcal, 2000 ml, no weight
//!   goal); missing data aggregates to zero and never fails a view.
//! - Series windows are clamped to `[1, MAX_WINDOW_DAYS]`.

use super::ServiceResult;
use crate::metrics::dates::DateWindow;
use crate::metrics::{
    daily_total, exercise_totals, nutrition_totals, percent_of_goal, series_for_range,
    weight_goal_progress, DailyBucket, ExerciseTotals, NutritionTotals,
};
use crate::model::entry::{DatedEntry, EntryKind, MoodEntry, WeightEntry};
use crate::model::profile::{EffectiveGoals, GoalProfile};
use crate::model::{EntryValidationError, OwnerId};
use crate::repo::entry_repo::{EntryQuery, EntryRepository};
use crate::repo::profile_repo::ProfileRepository;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Daily burn the exercise percentage is measured against.
pub const DEFAULT_EXERCISE_REFERENCE_KCAL: i64 = 500;
/// Window used by the reports page.
pub const REPORT_WINDOW_DAYS: u32 = 30;
/// Window used by the water and exercise dashboard panels.
pub const PANEL_WINDOW_DAYS: u32 = 7;
pub const MAX_WINDOW_DAYS: u32 = 365;
/// Total tracked entries from which an owner counts as `intermediate`.
pub const JOURNEY_INTERMEDIATE_THRESHOLD: u64 = 50;
/// Mood label used when no mood was ever recorded.
pub const UNKNOWN_MOOD: &str = "Unknown";

/// Dashboard numbers for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaySnapshot {
    pub date: NaiveDate,
    pub calories_consumed: i64,
    pub calorie_goal: i64,
    pub calories_goal_percent: u8,
    pub water_intake: i64,
    pub water_goal: i64,
    pub water_goal_percent: u8,
    pub calories_burned: i64,
    pub exercise_minutes: i64,
    pub exercise_goal_percent: u8,
    /// Most recent recorded weight, whatever its date.
    pub current_weight: Option<f64>,
}

/// Metrics that can be charted as a per-day series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Calories,
    Water,
    CaloriesBurned,
    ExerciseMinutes,
    Weight,
    Mood,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Water => "water",
            Self::CaloriesBurned => "calories_burned",
            Self::ExerciseMinutes => "exercise_minutes",
            Self::Weight => "weight",
            Self::Mood => "mood",
        }
    }

    /// Window used when the caller passes 0.
    pub fn default_window_days(self) -> u32 {
        match self {
            Self::Calories | Self::Weight | Self::Mood => REPORT_WINDOW_DAYS,
            Self::Water | Self::CaloriesBurned | Self::ExerciseMinutes => PANEL_WINDOW_DAYS,
        }
    }

    /// Point metrics hold at most one value per day and leave gaps as `None`.
    pub fn is_point_metric(self) -> bool {
        matches!(self, Self::Weight | Self::Mood)
    }
}

impl Display for MetricKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = EntryValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "calories" => Ok(Self::Calories),
            "water" => Ok(Self::Water),
            "calories_burned" => Ok(Self::CaloriesBurned),
            "exercise_minutes" | "exercise" => Ok(Self::ExerciseMinutes),
            "weight" => Ok(Self::Weight),
            "mood" => Ok(Self::Mood),
            _ => Err(EntryValidationError::UnknownLabel {
                field: "metric",
                value: value.to_string(),
            }),
        }
    }
}

/// Clamps a requested window; 0 selects the metric default.
pub fn normalize_window_days(metric: MetricKind, requested: u32) -> u32 {
    match requested {
        0 => metric.default_window_days(),
        days => days.min(MAX_WINDOW_DAYS),
    }
}

/// Gap-free per-day series for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub metric: MetricKind,
    pub window: DateWindow,
    pub points: Vec<DailyBucket<Option<f64>>>,
}

/// The reports page: four 30-day series plus the goals they are read against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportBundle {
    pub window: DateWindow,
    pub calories: MetricSeries,
    pub water: MetricSeries,
    pub calories_burned: MetricSeries,
    pub weight: MetricSeries,
    pub goals: EffectiveGoals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStage {
    Beginner,
    Intermediate,
}

impl JourneyStage {
    pub fn from_total(total_entries: u64) -> Self {
        if total_entries < JOURNEY_INTERMEDIATE_THRESHOLD {
            Self::Beginner
        } else {
            Self::Intermediate
        }
    }
}

/// Lifetime entry counts of the five tracked categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrackingCounts {
    pub diet: u64,
    pub water: u64,
    pub weight: u64,
    pub exercise: u64,
    pub mood: u64,
}

impl TrackingCounts {
    pub fn total(&self) -> u64 {
        self.diet + self.water + self.weight + self.exercise + self.mood
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneySummary {
    pub stage: JourneyStage,
    pub tracking_counts: TrackingCounts,
    pub total_entries: u64,
    pub water_progress: u8,
    pub calorie_progress: u8,
    pub exercise_minutes: i64,
    pub current_mood: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub water_progress: u8,
    pub calorie_progress: u8,
    pub exercise_minutes: i64,
    pub calories_burned: i64,
    pub current_mood: String,
    pub weight_progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionDay {
    pub date: NaiveDate,
    pub totals: NutritionTotals,
    pub calorie_goal: i64,
    pub calorie_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseDay {
    pub date: NaiveDate,
    pub totals: ExerciseTotals,
    pub reference_kcal: i64,
    pub burn_percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaterDay {
    pub date: NaiveDate,
    pub total_ml: i64,
    pub water_goal: i64,
    pub water_percent: u8,
}

/// Progress views over one owner's entries.
pub struct ProgressService<R: EntryRepository, P: ProfileRepository> {
    entries: R,
    profiles: P,
    exercise_reference_kcal: i64,
}

impl<R: EntryRepository, P: ProfileRepository> ProgressService<R, P> {
    pub fn new(entries: R, profiles: P) -> Self {
        Self {
            entries,
            profiles,
            exercise_reference_kcal: DEFAULT_EXERCISE_REFERENCE_KCAL,
        }
    }

    /// Overrides the daily burn reference used by exercise percentages.
    pub fn with_exercise_reference(mut self, kcal: i64) -> Self {
        self.exercise_reference_kcal = kcal;
        self
    }

    /// Stored profile, if any.
    pub fn profile(&self, owner_id: OwnerId) -> ServiceResult<Option<GoalProfile>> {
        Ok(self.profiles.get_profile(owner_id)?)
    }

    pub fn goals(&self, owner_id: OwnerId) -> ServiceResult<EffectiveGoals> {
        let profile = self.profiles.get_profile(owner_id)?;
        Ok(EffectiveGoals::from_profile(profile.as_ref()))
    }

    /// Today's dashboard numbers.
    pub fn today_snapshot(&self, owner_id: OwnerId, today: NaiveDate) -> ServiceResult<TodaySnapshot> {
        let goals = self.goals(owner_id)?;
        let query = EntryQuery::on(owner_id, today);

        let nutrition = nutrition_totals(&self.entries.list_diet(&query)?, today);
        let water = self.entries.list_water(&query)?;
        let water_intake: i64 = daily_total(&water, today, |entry| Some(entry.amount_ml));
        let exercise = exercise_totals(&self.entries.list_exercise(&query)?, today);

        Ok(TodaySnapshot {
            date: today,
            calories_consumed: nutrition.calories,
            calorie_goal: goals.calorie_goal,
            calories_goal_percent: percent_i64(nutrition.calories, goals.calorie_goal),
            water_intake,
            water_goal: goals.water_goal_ml,
            water_goal_percent: percent_i64(water_intake, goals.water_goal_ml),
            calories_burned: exercise.calories_burned,
            exercise_minutes: exercise.duration_min,
            exercise_goal_percent: percent_i64(
                exercise.calories_burned,
                self.exercise_reference_kcal,
            ),
            current_weight: self.latest_weight(owner_id)?.map(|entry| entry.weight_kg),
        })
    }

    /// Per-day series of `metric` over the `window_days` ending at `today`.
    ///
    /// `window_days == 0` selects the metric default; larger values are
    /// capped at `MAX_WINDOW_DAYS`.
    pub fn metric_series(
        &self,
        owner_id: OwnerId,
        metric: MetricKind,
        window_days: u32,
        today: NaiveDate,
    ) -> ServiceResult<MetricSeries> {
        let window = DateWindow::trailing(today, normalize_window_days(metric, window_days));
        let query = EntryQuery::within(owner_id, window);
        let (start, end) = (window.start, window.end);

        let points = match metric {
            MetricKind::Calories => {
                let diet = self.entries.list_diet(&query)?;
                series_for_range(&diet, start, end, |_, day| {
                    Some(sum_i64(day, |entry| entry.calories) as f64)
                })
            }
            MetricKind::Water => {
                let water = self.entries.list_water(&query)?;
                series_for_range(&water, start, end, |_, day| {
                    Some(sum_i64(day, |entry| Some(entry.amount_ml)) as f64)
                })
            }
            MetricKind::CaloriesBurned => {
                let exercise = self.entries.list_exercise(&query)?;
                series_for_range(&exercise, start, end, |_, day| {
                    Some(sum_i64(day, |entry| entry.calories_burned) as f64)
                })
            }
            MetricKind::ExerciseMinutes => {
                let exercise = self.entries.list_exercise(&query)?;
                series_for_range(&exercise, start, end, |_, day| {
                    Some(sum_i64(day, |entry| Some(entry.duration_min)) as f64)
                })
            }
            MetricKind::Weight => {
                let weight = self.entries.list_weight(&query)?;
                series_for_range(&weight, start, end, |_, day| {
                    newest_of_day(day).map(|entry| entry.weight_kg)
                })
            }
            MetricKind::Mood => {
                let mood = self.entries.list_mood(&query)?;
                series_for_range(&mood, start, end, |_, day| {
                    newest_of_day(day).map(|entry| f64::from(entry.level))
                })
            }
        };

        Ok(MetricSeries {
            metric,
            window,
            points,
        })
    }

    /// The 30-day reports bundle.
    pub fn report(&self, owner_id: OwnerId, today: NaiveDate) -> ServiceResult<ReportBundle> {
        let days = REPORT_WINDOW_DAYS;
        Ok(ReportBundle {
            window: DateWindow::trailing(today, days),
            calories: self.metric_series(owner_id, MetricKind::Calories, days, today)?,
            water: self.metric_series(owner_id, MetricKind::Water, days, today)?,
            calories_burned: self.metric_series(owner_id, MetricKind::CaloriesBurned, days, today)?,
            weight: self.metric_series(owner_id, MetricKind::Weight, days, today)?,
            goals: self.goals(owner_id)?,
        })
    }

    /// Onboarding summary: lifetime counts, stage and today's progress.
    pub fn journey_summary(&self, owner_id: OwnerId, today: NaiveDate) -> ServiceResult<JourneySummary> {
        let tracking_counts = self.tracking_counts(owner_id)?;
        let total_entries = tracking_counts.total();
        let snapshot = self.today_snapshot(owner_id, today)?;

        Ok(JourneySummary {
            stage: JourneyStage::from_total(total_entries),
            tracking_counts,
            total_entries,
            water_progress: snapshot.water_goal_percent,
            calorie_progress: snapshot.calories_goal_percent,
            exercise_minutes: snapshot.exercise_minutes,
            current_mood: self.current_mood(owner_id)?,
        })
    }

    /// Spoken-summary numbers, including directional weight progress.
    pub fn progress_summary(&self, owner_id: OwnerId, today: NaiveDate) -> ServiceResult<ProgressSummary> {
        let snapshot = self.today_snapshot(owner_id, today)?;
        let goals = self.goals(owner_id)?;
        let weights = self.entries.list_weight(&EntryQuery::all(owner_id))?;

        Ok(ProgressSummary {
            water_progress: snapshot.water_goal_percent,
            calorie_progress: snapshot.calories_goal_percent,
            exercise_minutes: snapshot.exercise_minutes,
            calories_burned: snapshot.calories_burned,
            current_mood: self.current_mood(owner_id)?,
            weight_progress: weight_goal_progress(&weights, goals.weight_goal_kg),
        })
    }

    pub fn nutrition_day(&self, owner_id: OwnerId, date: NaiveDate) -> ServiceResult<NutritionDay> {
        let goals = self.goals(owner_id)?;
        let totals = nutrition_totals(&self.entries.list_diet(&EntryQuery::on(owner_id, date))?, date);
        Ok(NutritionDay {
            date,
            totals,
            calorie_goal: goals.calorie_goal,
            calorie_percent: percent_i64(totals.calories, goals.calorie_goal),
        })
    }

    pub fn exercise_day(&self, owner_id: OwnerId, date: NaiveDate) -> ServiceResult<ExerciseDay> {
        let totals = exercise_totals(
            &self.entries.list_exercise(&EntryQuery::on(owner_id, date))?,
            date,
        );
        Ok(ExerciseDay {
            date,
            totals,
            reference_kcal: self.exercise_reference_kcal,
            burn_percent: percent_i64(totals.calories_burned, self.exercise_reference_kcal),
        })
    }

    pub fn water_day(&self, owner_id: OwnerId, date: NaiveDate) -> ServiceResult<WaterDay> {
        let goals = self.goals(owner_id)?;
        let water = self.entries.list_water(&EntryQuery::on(owner_id, date))?;
        let total_ml: i64 = daily_total(&water, date, |entry| Some(entry.amount_ml));
        Ok(WaterDay {
            date,
            total_ml,
            water_goal: goals.water_goal_ml,
            water_percent: percent_i64(total_ml, goals.water_goal_ml),
        })
    }

    /// Most recent weight entry of the owner.
    pub fn latest_weight(&self, owner_id: OwnerId) -> ServiceResult<Option<WeightEntry>> {
        let query = EntryQuery::all(owner_id).newest_first().with_limit(1);
        Ok(self.entries.list_weight(&query)?.into_iter().next())
    }

    fn latest_mood(&self, owner_id: OwnerId) -> ServiceResult<Option<MoodEntry>> {
        let query = EntryQuery::all(owner_id).newest_first().with_limit(1);
        Ok(self.entries.list_mood(&query)?.into_iter().next())
    }

    fn current_mood(&self, owner_id: OwnerId) -> ServiceResult<String> {
        Ok(self
            .latest_mood(owner_id)?
            .map_or_else(|| UNKNOWN_MOOD.to_string(), |mood| mood.label()))
    }

    fn tracking_counts(&self, owner_id: OwnerId) -> ServiceResult<TrackingCounts> {
        let mut counts = TrackingCounts::default();
        for kind in EntryKind::TRACKED {
            let count = self.entries.count_entries(owner_id, kind)?;
            match kind {
                EntryKind::Diet => counts.diet = count,
                EntryKind::Water => counts.water = count,
                EntryKind::Weight => counts.weight = count,
                EntryKind::Exercise => counts.exercise = count,
                EntryKind::Mood => counts.mood = count,
                EntryKind::Reminder => {}
            }
        }
        Ok(counts)
    }
}

fn percent_i64(value: i64, goal: i64) -> u8 {
    percent_of_goal(value as f64, goal as f64)
}

fn sum_i64<E>(day: &[&E], value: impl Fn(&E) -> Option<i64>) -> i64 {
    day.iter().filter_map(|entry| value(*entry)).sum()
}

fn newest_of_day<'a, E: DatedEntry>(day: &[&'a E]) -> Option<&'a E> {
    day.iter().copied().max_by_key(|entry| entry.created_at())
}
