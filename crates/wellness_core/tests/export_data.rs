use chrono::NaiveDate;
use uuid::Uuid;
use wellness_core::{
    AppContext, DietInput, MoodInput, ProfileUpdate, ReminderInput, WaterInput, WeightInput,
    WellnessConfig,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn export_of_unknown_owner_is_empty() {
    let ctx = AppContext::open_in_memory(WellnessConfig::default()).unwrap();

    let document = ctx.export_service().unwrap().export(Uuid::new_v4()).unwrap();

    assert_eq!(document.record_count(), 0);
    let json: serde_json::Value =
        serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["profile"], serde_json::json!({}));
    assert_eq!(json["reminders"], serde_json::json!([]));
}

#[test]
fn export_contains_every_record_of_the_owner_only() {
    let ctx = AppContext::open_in_memory(WellnessConfig::default()).unwrap();
    let entries = ctx.entry_service().unwrap();
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();
    let today = day(2024, 4, 2);

    entries
        .update_profile(
            owner,
            &ProfileUpdate {
                name: Some("Sam".to_string()),
                weight_goal_kg: Some(68.0),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();
    entries
        .add_diet(
            owner,
            &DietInput {
                meal_type: "breakfast".to_string(),
                food_name: "Oats".to_string(),
                calories: Some(350),
                protein_g: Some(12.5),
                ..DietInput::default()
            },
            today,
        )
        .unwrap();
    entries
        .record_weight(
            owner,
            &WeightInput {
                date: Some("2024-04-01".to_string()),
                weight_kg: 71.2,
                notes: Some("after run".to_string()),
            },
            today,
        )
        .unwrap();
    entries
        .record_mood(
            owner,
            &MoodInput {
                level: 3,
                ..MoodInput::default()
            },
            today,
        )
        .unwrap();
    entries
        .add_reminder(
            owner,
            &ReminderInput {
                reminder_type: "water".to_string(),
                time: "09:05".to_string(),
                weekdays: vec![3, 0, 1],
                message: None,
                active: true,
            },
        )
        .unwrap();
    entries
        .add_water(
            other,
            &WaterInput {
                date: None,
                amount_ml: 500,
            },
            today,
        )
        .unwrap();

    let document = ctx.export_service().unwrap().export(owner).unwrap();
    assert_eq!(document.record_count(), 4);
    assert!(document.water.is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&document.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["profile"]["name"], "Sam");
    assert_eq!(json["profile"]["calorie_goal"], 2000);
    assert_eq!(json["profile"]["theme"], "orange");
    assert_eq!(json["diet"][0]["meal_type"], "breakfast");
    assert_eq!(json["diet"][0]["date"], "2024-04-02");
    assert_eq!(json["weight"][0]["weight"], 71.2);
    assert_eq!(json["weight"][0]["date"], "2024-04-01");
    assert_eq!(json["mood"][0]["mood_level"], 3);
    assert_eq!(json["reminders"][0]["time"], "09:05");
    assert_eq!(json["reminders"][0]["days"], "0,1,3");
    assert_eq!(json["reminders"][0]["active"], true);
}
