//! Passive reminder records.
//!
//! Reminders are stored and listed only; nothing in this workspace fires them.

use super::validation::limit_text;
use super::{now_epoch_ms, EntryId, EntryValidationError, OwnerId};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    Workout,
    Water,
    Meal,
}

impl ReminderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Water => "water",
            Self::Meal => "meal",
        }
    }
}

impl FromStr for ReminderType {
    type Err = EntryValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "workout" => Ok(Self::Workout),
            "water" => Ok(Self::Water),
            "meal" => Ok(Self::Meal),
            _ => Err(EntryValidationError::UnknownLabel {
                field: "reminder_type",
                value: value.to_string(),
            }),
        }
    }
}

/// Time-of-day reminder on a set of weekdays (0 = Monday .. 6 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: EntryId,
    pub owner_id: OwnerId,
    pub reminder_type: ReminderType,
    pub time: NaiveTime,
    pub weekdays: BTreeSet<u8>,
    pub message: Option<String>,
    pub active: bool,
    pub created_at: i64,
}

impl Reminder {
    pub fn new(
        owner_id: OwnerId,
        reminder_type: ReminderType,
        time: NaiveTime,
        weekdays: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            reminder_type,
            time,
            weekdays: weekdays.into_iter().collect(),
            message: None,
            active: true,
            created_at: now_epoch_ms(),
        }
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.weekdays.is_empty() {
            return Err(EntryValidationError::MissingField("days"));
        }
        if let Some(day) = self.weekdays.iter().find(|day| **day > 6) {
            return Err(EntryValidationError::OutOfRange {
                field: "days",
                value: day.to_string(),
                expected: "weekday index 0..=6",
            });
        }
        limit_text("message", self.message.as_deref(), 200)
    }
}

/// Encodes weekdays as the stored comma list, e.g. `0,1,3`.
pub fn weekdays_to_db(weekdays: &BTreeSet<u8>) -> String {
    weekdays
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes the stored comma list. Blank segments are skipped.
pub fn parse_weekdays(value: &str) -> Result<BTreeSet<u8>, EntryValidationError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<u8>()
                .ok()
                .filter(|day| *day <= 6)
                .ok_or_else(|| EntryValidationError::OutOfRange {
                    field: "days",
                    value: segment.to_string(),
                    expected: "weekday index 0..=6",
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_weekdays, weekdays_to_db, Reminder, ReminderType};
    use chrono::NaiveTime;
    use uuid::Uuid;

    #[test]
    fn weekdays_are_sorted_and_deduplicated() {
        let parsed = parse_weekdays("3, 0,1,3").expect("valid weekdays");
        assert_eq!(weekdays_to_db(&parsed), "0,1,3");
    }

    #[test]
    fn weekday_seven_is_rejected() {
        assert!(parse_weekdays("1,7").is_err());
    }

    #[test]
    fn reminder_needs_at_least_one_day() {
        let time = NaiveTime::from_hms_opt(7, 30, 0).expect("valid time");
        let reminder = Reminder::new(Uuid::new_v4(), ReminderType::Water, time, []);
        assert!(reminder.validate().is_err());
    }
}
