//! Per-owner goals and display preferences.
//!
//! # Invariants
//! - One profile per owner, created with defaults at registration.
//! - Goals `<= 0` are stored as given; the aggregator treats them as "no goal".

use super::validation::{limit_text, non_negative_f64};
use super::{EntryValidationError, OwnerId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_CALORIE_GOAL: i64 = 2000;
pub const DEFAULT_WATER_GOAL_ML: i64 = 2000;

/// UI color theme. Irrelevant to aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Green,
    Blue,
    #[default]
    Orange,
    Purple,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Purple => "purple",
        }
    }
}

impl FromStr for Theme {
    type Err = EntryValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            "orange" => Ok(Self::Orange),
            "purple" => Ok(Self::Purple),
            _ => Err(EntryValidationError::UnknownLabel {
                field: "theme",
                value: value.to_string(),
            }),
        }
    }
}

/// Goal targets and optional personal details of one owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProfile {
    pub owner_id: OwnerId,
    pub calorie_goal: i64,
    pub water_goal_ml: i64,
    pub weight_goal_kg: Option<f64>,
    pub theme: Theme,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub fitness_goal: Option<String>,
}

impl GoalProfile {
    /// Registration defaults: 2000 kcal, 2000 ml, no target weight.
    pub fn with_defaults(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            calorie_goal: DEFAULT_CALORIE_GOAL,
            water_goal_ml: DEFAULT_WATER_GOAL_ML,
            weight_goal_kg: None,
            theme: Theme::default(),
            name: None,
            age: None,
            gender: None,
            height_cm: None,
            fitness_goal: None,
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.calorie_goal < 0 {
            return Err(EntryValidationError::OutOfRange {
                field: "calorie_goal",
                value: self.calorie_goal.to_string(),
                expected: ">= 0",
            });
        }
        if self.water_goal_ml < 0 {
            return Err(EntryValidationError::OutOfRange {
                field: "water_goal",
                value: self.water_goal_ml.to_string(),
                expected: ">= 0",
            });
        }
        non_negative_f64("weight_goal", self.weight_goal_kg)?;
        non_negative_f64("height", self.height_cm)?;
        limit_text("name", self.name.as_deref(), 100)?;
        limit_text("gender", self.gender.as_deref(), 20)?;
        limit_text("fitness_goal", self.fitness_goal.as_deref(), 100)
    }
}

/// Goal values the views compute against, with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveGoals {
    pub calorie_goal: i64,
    pub water_goal_ml: i64,
    pub weight_goal_kg: Option<f64>,
}

impl EffectiveGoals {
    /// Falls back to 2000/2000 and no weight goal when the profile is absent.
    pub fn from_profile(profile: Option<&GoalProfile>) -> Self {
        match profile {
            Some(profile) => Self {
                calorie_goal: profile.calorie_goal,
                water_goal_ml: profile.water_goal_ml,
                weight_goal_kg: profile.weight_goal_kg,
            },
            None => Self {
                calorie_goal: DEFAULT_CALORIE_GOAL,
                water_goal_ml: DEFAULT_WATER_GOAL_ML,
                weight_goal_kg: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EffectiveGoals, GoalProfile, Theme};
    use uuid::Uuid;

    #[test]
    fn missing_profile_uses_default_goals() {
        let goals = EffectiveGoals::from_profile(None);
        assert_eq!(goals.calorie_goal, 2000);
        assert_eq!(goals.water_goal_ml, 2000);
        assert_eq!(goals.weight_goal_kg, None);
    }

    #[test]
    fn theme_rejects_unknown_color() {
        assert_eq!("PURPLE".parse::<Theme>(), Ok(Theme::Purple));
        assert!("pink".parse::<Theme>().is_err());
    }

    #[test]
    fn negative_goal_is_rejected() {
        let mut profile = GoalProfile::with_defaults(Uuid::new_v4());
        profile.calorie_goal = -1;
        assert!(profile.validate().is_err());
    }
}
