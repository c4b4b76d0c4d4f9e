//! Metrics aggregation over in-memory entries.
//!
//! # Responsibility
//! - Turn dated entries into daily totals, goal percentages and gap-free
//!   per-day series.
//! - Stay pure: no storage access, no clock, no logging.
//!
//! # Invariants
//! - "No entries" is a normal input and aggregates to zero, never an error.
//! - Series contain exactly one bucket per calendar day, ascending.

pub mod aggregate;
pub mod dates;

pub use aggregate::{
    daily_total, exercise_totals, latest_by_date, nutrition_totals, percent_of_goal,
    series_for_range, weight_goal_progress, DailyBucket, ExerciseTotals, NutritionTotals,
};
pub use dates::DateWindow;
