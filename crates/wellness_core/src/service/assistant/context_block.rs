//! System-context rendering for the assistant.
//!
//! # Invariants
//! - Output never exceeds `MAX_CONTEXT_CHARS` characters.
//! - Absent values render as `Not specified` / `Not recorded`; nothing is
//!   estimated or invented.

use crate::model::profile::{EffectiveGoals, GoalProfile};
use crate::service::progress_service::TodaySnapshot;

pub const MAX_CONTEXT_CHARS: usize = 2000;
const MAX_FIELD_CHARS: usize = 100;
const NOT_SPECIFIED: &str = "Not specified";
const NOT_RECORDED: &str = "Not recorded";

const PREAMBLE: &str = "You are Wellness AI Assistant, the fitness and wellness helper of a \
personal tracking app. Offer advice, motivation and information about fitness, nutrition, \
wellness and health. Keep replies friendly, conversational and under 200 words.";

const CLOSING: &str = "App features you may mention: diet and calorie tracking, water intake, \
weight progress, exercise logging, mood tracking, reminders and reports.\n\n\
Never invent data that is not listed above. When something about the user is unknown, say so \
and suggest how they could track it in the app.";

/// Renders the owner's metrics as the system prompt of one chat turn.
pub fn build_system_context(
    snapshot: &TodaySnapshot,
    profile: Option<&GoalProfile>,
    latest_weight: Option<f64>,
) -> String {
    let goals = EffectiveGoals::from_profile(profile);
    let name = profile.and_then(|profile| profile.name.as_deref());
    let fitness_goal = profile.and_then(|profile| profile.fitness_goal.as_deref());

    let context_lines = [
        format!("- Name: {}", text_or(name, NOT_SPECIFIED)),
        format!("- Fitness goal: {}", text_or(fitness_goal, NOT_SPECIFIED)),
        format!("- Daily calorie goal: {} calories", goals.calorie_goal),
        format!("- Daily water goal: {} ml", goals.water_goal_ml),
        format!("- Current weight: {}", kg_or(latest_weight, NOT_RECORDED)),
        format!("- Weight goal: {}", kg_or(goals.weight_goal_kg, NOT_SPECIFIED)),
        format!(
            "- Today's calories consumed: {} calories",
            snapshot.calories_consumed
        ),
        format!("- Today's water intake: {} ml", snapshot.water_intake),
        format!(
            "- Today's calories burned: {} calories",
            snapshot.calories_burned
        ),
    ];

    let block = format!(
        "{PREAMBLE}\n\nCurrent user context:\n{}\n\n{CLOSING}",
        context_lines.join("\n")
    );

    truncate_chars(block, MAX_CONTEXT_CHARS)
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text
            .replace(['\n', '\r'], " ")
            .chars()
            .take(MAX_FIELD_CHARS)
            .collect(),
        _ => fallback.to_string(),
    }
}

fn kg_or(value: Option<f64>, fallback: &str) -> String {
    match value.filter(|kg| kg.is_finite() && *kg > 0.0) {
        Some(kg) => format!("{kg} kg"),
        None => fallback.to_string(),
    }
}

fn truncate_chars(value: String, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value;
    }
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::{build_system_context, MAX_CONTEXT_CHARS};
    use crate::model::profile::GoalProfile;
    use crate::service::progress_service::TodaySnapshot;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn snapshot() -> TodaySnapshot {
        TodaySnapshot {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            calories_consumed: 1200,
            calorie_goal: 2000,
            calories_goal_percent: 60,
            water_intake: 750,
            water_goal: 2000,
            water_goal_percent: 38,
            calories_burned: 0,
            exercise_minutes: 0,
            exercise_goal_percent: 0,
            current_weight: None,
        }
    }

    #[test]
    fn missing_values_are_marked_not_invented() {
        let block = build_system_context(&snapshot(), None, None);
        assert!(block.contains("- Fitness goal: Not specified"));
        assert!(block.contains("- Current weight: Not recorded"));
        assert!(block.contains("- Weight goal: Not specified"));
        assert!(block.contains("- Daily calorie goal: 2000 calories"));
        assert!(block.contains("- Today's water intake: 750 ml"));
    }

    #[test]
    fn profile_values_are_rendered() {
        let mut profile = GoalProfile::with_defaults(Uuid::new_v4());
        profile.fitness_goal = Some("run a 10k".to_string());
        profile.weight_goal_kg = Some(68.5);
        let block = build_system_context(&snapshot(), Some(&profile), Some(72.0));
        assert!(block.contains("- Fitness goal: run a 10k"));
        assert!(block.contains("- Weight goal: 68.5 kg"));
        assert!(block.contains("- Current weight: 72 kg"));
    }

    #[test]
    fn oversized_fields_keep_block_bounded() {
        let mut profile = GoalProfile::with_defaults(Uuid::new_v4());
        profile.name = Some("n".repeat(5000));
        profile.fitness_goal = Some("g".repeat(5000));
        let block = build_system_context(&snapshot(), Some(&profile), None);
        assert!(block.chars().count() <= MAX_CONTEXT_CHARS);
        assert!(!block.contains(&"n".repeat(101)));
    }

    #[test]
    fn context_lines_sit_between_preamble_and_closing() {
        let block = build_system_context(&snapshot(), None, None);
        let lines: Vec<&str> = block.lines().collect();
        let header = lines
            .iter()
            .position(|line| *line == "Current user context:")
            .expect("context header");
        assert_eq!(lines[header + 1], "- Name: Not specified");
        assert_eq!(lines[header + 9], "- Today's calories burned: 0 calories");
        assert_eq!(lines[header + 10], "");
        assert!(lines[header + 11].starts_with("App features you may mention"));
    }
}
