//! Aggregation primitives used by every progress view.
//!
//! # Invariants
//! - Goal-relative values are integers in `[0, 100]`.
//! - A goal `<= 0` (or a non-finite input) yields 0 instead of dividing.
//! - `series_for_range` never leaves a day out, whatever the input density.

use super::dates::{days_in_range, weekday_label};
use crate::model::entry::{DatedEntry, DietEntry, ExerciseEntry, WeightEntry};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::iter::Sum;

/// One calendar-day slot of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBucket<V> {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Short weekday label (`Mon`..`Sun`).
    pub day: String,
    pub value: V,
}

/// Macro-nutrient sums for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: i64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub entries: usize,
}

/// Workout sums for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExerciseTotals {
    pub duration_min: i64,
    pub calories_burned: i64,
    pub sessions: usize,
}

/// Sums `value` over the entries dated exactly `date`.
///
/// `None` values count as zero and an empty match sums to zero.
pub fn daily_total<E, V, F>(entries: &[E], date: NaiveDate, value: F) -> V
where
    E: DatedEntry,
    V: Sum<V>,
    F: Fn(&E) -> Option<V>,
{
    entries
        .iter()
        .filter(|entry| entry.entry_date() == date)
        .filter_map(value)
        .sum()
}

/// `round(value / goal * 100)` clamped to `[0, 100]`; 0 when `goal <= 0`.
pub fn percent_of_goal(value: f64, goal: f64) -> u8 {
    if !value.is_finite() || !goal.is_finite() || goal <= 0.0 {
        return 0;
    }
    clamp_percent(value / goal * 100.0)
}

/// Builds one bucket per day of `[start, end]` in ascending order.
///
/// `bucket` receives the day and the entries dated that day (possibly none).
/// A reversed range produces an empty series.
pub fn series_for_range<E, V, F>(
    entries: &[E],
    start: NaiveDate,
    end: NaiveDate,
    mut bucket: F,
) -> Vec<DailyBucket<V>>
where
    E: DatedEntry,
    F: FnMut(NaiveDate, &[&E]) -> V,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<&E>> = BTreeMap::new();
    for entry in entries {
        let date = entry.entry_date();
        if start <= date && date <= end {
            by_day.entry(date).or_default().push(entry);
        }
    }

    days_in_range(start, end)
        .map(|day| {
            let day_entries = by_day.get(&day).map(Vec::as_slice).unwrap_or(&[]);
            DailyBucket {
                date: day,
                day: weekday_label(day),
                value: bucket(day, day_entries),
            }
        })
        .collect()
}

/// Entry with the greatest date; ties go to the latest `created_at`.
pub fn latest_by_date<E: DatedEntry>(entries: &[E]) -> Option<&E> {
    entries
        .iter()
        .max_by_key(|entry| (entry.entry_date(), entry.created_at()))
}

/// Directional progress from the first recorded weight towards `goal_weight`.
///
/// The earliest entry is the starting point and the latest is the current
/// weight, so input order does not matter. Returns 0 with fewer than two
/// entries, without a positive goal, or when the start already equals the
/// goal. Moving away from the goal clamps to 0; overshooting clamps to 100.
pub fn weight_goal_progress(entries: &[WeightEntry], goal_weight: Option<f64>) -> u8 {
    let Some(goal) = goal_weight.filter(|goal| goal.is_finite() && *goal > 0.0) else {
        return 0;
    };
    if entries.len() < 2 {
        return 0;
    }

    let order_key = |entry: &&WeightEntry| (entry.date, entry.created_at);
    let (Some(first), Some(last)) = (
        entries.iter().min_by_key(order_key),
        entries.iter().max_by_key(order_key),
    ) else {
        return 0;
    };
    let initial = first.weight_kg;
    let current = last.weight_kg;

    let (achieved, required) = if initial > goal {
        (initial - current, initial - goal)
    } else if initial < goal {
        (current - initial, goal - initial)
    } else {
        return 0;
    };

    clamp_percent(achieved / required * 100.0)
}

/// Calories and macros eaten on `date`.
pub fn nutrition_totals(entries: &[DietEntry], date: NaiveDate) -> NutritionTotals {
    NutritionTotals {
        calories: daily_total(entries, date, |entry| entry.calories),
        carbs_g: daily_total(entries, date, |entry| entry.carbs_g),
        protein_g: daily_total(entries, date, |entry| entry.protein_g),
        fat_g: daily_total(entries, date, |entry| entry.fat_g),
        entries: entries.iter().filter(|entry| entry.date == date).count(),
    }
}

/// Minutes trained and calories burned on `date`.
pub fn exercise_totals(entries: &[ExerciseEntry], date: NaiveDate) -> ExerciseTotals {
    ExerciseTotals {
        duration_min: daily_total(entries, date, |entry| Some(entry.duration_min)),
        calories_burned: daily_total(entries, date, |entry| entry.calories_burned),
        sessions: entries.iter().filter(|entry| entry.date == date).count(),
    }
}

fn clamp_percent(percent: f64) -> u8 {
    if !percent.is_finite() {
        return 0;
    }
    // Clamped to [0, 100] first, so the cast is lossless.
    percent.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::{MealType, WaterEntry};
    use uuid::Uuid;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).expect("valid date")
    }

    fn weight(day: u32, kg: f64) -> WeightEntry {
        WeightEntry::new(Uuid::nil(), date(day), kg)
    }

    fn water(day: u32, ml: i64) -> WaterEntry {
        WaterEntry::new(Uuid::nil(), date(day), ml)
    }

    #[test]
    fn percent_of_goal_stays_within_bounds() {
        for goal in [1.0, 7.0, 500.0, 2000.0] {
            for value in [0.0, 1.0, 499.0, 2000.0, 10_000.0] {
                let percent = percent_of_goal(value, goal);
                assert!(percent <= 100, "{value}/{goal} gave {percent}");
            }
            assert_eq!(percent_of_goal(goal, goal), 100);
        }
    }

    #[test]
    fn percent_of_goal_guards_zero_and_negative_goals() {
        assert_eq!(percent_of_goal(1500.0, 0.0), 0);
        assert_eq!(percent_of_goal(1500.0, -10.0), 0);
        assert_eq!(percent_of_goal(f64::NAN, 2000.0), 0);
    }

    #[test]
    fn percent_of_goal_rounds_to_nearest() {
        assert_eq!(percent_of_goal(1015.0, 2000.0), 51);
        assert_eq!(percent_of_goal(1009.0, 2000.0), 50);
    }

    #[test]
    fn daily_total_sums_only_matching_day_and_skips_none() {
        let mut meals = vec![
            DietEntry::new(Uuid::nil(), date(1), MealType::Lunch, "rice"),
            DietEntry::new(Uuid::nil(), date(1), MealType::Snack, "tea"),
            DietEntry::new(Uuid::nil(), date(2), MealType::Dinner, "soup"),
        ];
        meals[0].calories = Some(400);
        meals[2].calories = Some(300);

        let total: i64 = daily_total(&meals, date(1), |meal| meal.calories);
        assert_eq!(total, 400);
        let empty: i64 = daily_total(&meals, date(9), |meal| meal.calories);
        assert_eq!(empty, 0);
    }

    #[test]
    fn series_fills_gaps_and_keeps_order() {
        let entries = vec![water(5, 250), water(2, 500), water(2, 250)];
        let series = series_for_range(&entries, date(1), date(5), |_, day| {
            day.iter().map(|entry| entry.amount_ml).sum::<i64>()
        });

        assert_eq!(series.len(), 5);
        let values: Vec<i64> = series.iter().map(|bucket| bucket.value).collect();
        assert_eq!(values, vec![0, 750, 0, 0, 250]);
        assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert_eq!(series[0].day, "Sat");
    }

    #[test]
    fn series_over_reversed_range_is_empty() {
        let series = series_for_range(&[water(1, 100)], date(3), date(1), |_, _| 0);
        assert!(series.is_empty());
    }

    #[test]
    fn latest_by_date_breaks_ties_by_creation() {
        let mut older = weight(3, 70.0);
        older.created_at = 10;
        let mut newer = weight(3, 71.0);
        newer.created_at = 20;
        let entries = vec![weight(1, 69.0), newer.clone(), older];
        assert_eq!(latest_by_date(&entries), Some(&newer));
        assert_eq!(latest_by_date::<WeightEntry>(&[]), None);
    }

    #[test]
    fn weight_loss_progress_is_directional() {
        let entries = vec![weight(1, 90.0), weight(10, 85.0)];
        assert_eq!(weight_goal_progress(&entries, Some(80.0)), 50);
    }

    #[test]
    fn weight_gain_progress_is_directional() {
        let entries = vec![weight(1, 60.0), weight(10, 65.0)];
        assert_eq!(weight_goal_progress(&entries, Some(70.0)), 50);
    }

    #[test]
    fn weight_progress_ignores_input_order() {
        let entries = vec![weight(10, 85.0), weight(1, 90.0)];
        assert_eq!(weight_goal_progress(&entries, Some(80.0)), 50);
    }

    #[test]
    fn weight_progress_needs_two_points_and_a_goal() {
        assert_eq!(weight_goal_progress(&[weight(1, 90.0)], Some(80.0)), 0);
        let entries = vec![weight(1, 90.0), weight(2, 85.0)];
        assert_eq!(weight_goal_progress(&entries, None), 0);
        assert_eq!(weight_goal_progress(&entries, Some(0.0)), 0);
        assert_eq!(weight_goal_progress(&entries, Some(90.0)), 0);
    }

    #[test]
    fn weight_progress_clamps_both_ends() {
        let wrong_way = vec![weight(1, 90.0), weight(2, 95.0)];
        assert_eq!(weight_goal_progress(&wrong_way, Some(80.0)), 0);
        let overshoot = vec![weight(1, 90.0), weight(2, 75.0)];
        assert_eq!(weight_goal_progress(&overshoot, Some(80.0)), 100);
    }

    #[test]
    fn nutrition_totals_sum_macros_for_the_day() {
        let mut breakfast = DietEntry::new(Uuid::nil(), date(4), MealType::Breakfast, "oats");
        breakfast.calories = Some(350);
        breakfast.carbs_g = Some(60.0);
        breakfast.protein_g = Some(12.5);
        let mut lunch = DietEntry::new(Uuid::nil(), date(4), MealType::Lunch, "salad");
        lunch.fat_g = Some(9.0);

        let totals = nutrition_totals(&[breakfast, lunch], date(4));
        assert_eq!(totals.calories, 350);
        assert_eq!(totals.carbs_g, 60.0);
        assert_eq!(totals.protein_g, 12.5);
        assert_eq!(totals.fat_g, 9.0);
        assert_eq!(totals.entries, 2);
    }

    #[test]
    fn exercise_totals_treat_missing_calories_as_zero() {
        let mut run = ExerciseEntry::new(Uuid::nil(), date(4), "run", 30);
        run.calories_burned = Some(280);
        let walk = ExerciseEntry::new(Uuid::nil(), date(4), "walk", 20);

        let totals = exercise_totals(&[run, walk], date(4));
        assert_eq!(totals.duration_min, 50);
        assert_eq!(totals.calories_burned, 280);
        assert_eq!(totals.sessions, 2);
    }
}
