use chrono::NaiveDate;
use std::thread;
use std::time::Duration;
use uuid::Uuid;
use wellness_core::{
    AppContext, DietInput, EntryKind, ExerciseInput, MoodInput, ReminderInput, ServiceError,
    WaterInput, WeightInput, WellnessConfig, WriteStatus,
};

fn context() -> AppContext {
    AppContext::open_in_memory(WellnessConfig::default()).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn weight(date: &str, weight_kg: f64) -> WeightInput {
    WeightInput {
        date: Some(date.to_string()),
        weight_kg,
        notes: None,
    }
}

#[test]
fn second_weight_on_same_day_updates_existing_row() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let owner = Uuid::new_v4();
    let today = day(2024, 3, 10);

    let first = service
        .record_weight(
            owner,
            &WeightInput {
                date: Some("2024-03-01".to_string()),
                weight_kg: 70.0,
                notes: Some("morning".to_string()),
            },
            today,
        )
        .unwrap();
    let created_at = service.weight_history(owner).unwrap()[0].created_at;
    thread::sleep(Duration::from_millis(5));

    let second = service
        .record_weight(
            owner,
            &WeightInput {
                date: Some("2024-03-01".to_string()),
                weight_kg: 72.0,
                notes: Some("evening".to_string()),
            },
            today,
        )
        .unwrap();

    assert_eq!(first.status, WriteStatus::Created);
    assert_eq!(second.status, WriteStatus::Updated);
    assert_eq!(first.id, second.id);
    assert_eq!(second.message, "Weight entry updated successfully");

    let history = service.weight_history(owner).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, first.id);
    assert_eq!(history[0].weight_kg, 72.0);
    assert_eq!(history[0].notes.as_deref(), Some("evening"));
    assert_eq!(history[0].created_at, created_at);
}

#[test]
fn same_day_mood_is_overwritten() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let owner = Uuid::new_v4();
    let today = day(2024, 3, 10);
    let mood = |level| MoodInput {
        date: None,
        level,
        description: None,
        notes: None,
    };

    let first = service.record_mood(owner, &mood(2), today).unwrap();
    let created_at = service.recent_moods(owner).unwrap()[0].created_at;
    thread::sleep(Duration::from_millis(5));
    let outcome = service.record_mood(owner, &mood(4), today).unwrap();

    assert_eq!(outcome.status, WriteStatus::Updated);
    assert_eq!(outcome.id, first.id);
    let moods = service.recent_moods(owner).unwrap();
    assert_eq!(moods.len(), 1);
    assert_eq!(moods[0].level, 4);
    assert_eq!(moods[0].date, today);
    assert_eq!(moods[0].created_at, created_at);
}

#[test]
fn water_and_diet_append_multiple_rows_per_day() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let owner = Uuid::new_v4();
    let today = day(2024, 3, 10);

    for amount_ml in [250, 500] {
        let outcome = service
            .add_water(
                owner,
                &WaterInput {
                    date: None,
                    amount_ml,
                },
                today,
            )
            .unwrap();
        assert_eq!(outcome.status, WriteStatus::Created);
    }
    service
        .add_diet(
            owner,
            &DietInput {
                date: None,
                meal_type: "Lunch".to_string(),
                food_name: "Rice bowl".to_string(),
                calories: Some(650),
                ..DietInput::default()
            },
            today,
        )
        .unwrap();

    let entries = service.day_entries(owner, today).unwrap();
    assert_eq!(entries.water.len(), 2);
    assert_eq!(entries.diet.len(), 1);
    assert_eq!(entries.diet[0].calories, Some(650));
    assert!(entries.weight.is_none());
}

#[test]
fn invalid_input_is_rejected_before_storage() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let owner = Uuid::new_v4();
    let today = day(2024, 3, 10);

    let negative_water = service.add_water(
        owner,
        &WaterInput {
            date: None,
            amount_ml: -5,
        },
        today,
    );
    assert!(matches!(negative_water, Err(ServiceError::Validation(_))));

    let bad_meal = service.add_diet(
        owner,
        &DietInput {
            meal_type: "brunch".to_string(),
            food_name: "Eggs".to_string(),
            ..DietInput::default()
        },
        today,
    );
    assert!(matches!(bad_meal, Err(ServiceError::Validation(_))));

    let bad_date = service.record_weight(owner, &weight("2024-13-01", 70.0), today);
    assert!(matches!(bad_date, Err(ServiceError::Validation(_))));

    let mood_out_of_range = service.record_mood(
        owner,
        &MoodInput {
            level: 6,
            ..MoodInput::default()
        },
        today,
    );
    assert!(matches!(mood_out_of_range, Err(ServiceError::Validation(_))));

    assert!(service.day_entries(owner, today).unwrap().water.is_empty());
}

#[test]
fn delete_is_scoped_to_owner() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();
    let today = day(2024, 3, 10);

    let outcome = service
        .add_exercise(
            owner_a,
            &ExerciseInput {
                activity: "Running".to_string(),
                duration_min: 30,
                calories_burned: Some(300),
                ..ExerciseInput::default()
            },
            today,
        )
        .unwrap();

    let err = service
        .delete_entry(owner_b, "exercise", outcome.id)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: EntryKind::Exercise,
            ..
        }
    ));
    assert_eq!(err.to_string(), "Entry not found or access denied");
    assert_eq!(service.day_entries(owner_a, today).unwrap().exercise.len(), 1);

    service.delete_entry(owner_a, "exercise", outcome.id).unwrap();
    assert!(service.day_entries(owner_a, today).unwrap().exercise.is_empty());
}

#[test]
fn delete_with_unknown_kind_is_a_validation_error() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();

    let err = service
        .delete_entry(Uuid::new_v4(), "sleep", Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.code(), "validation_failed");
}

#[test]
fn update_of_foreign_entry_is_not_found() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let owner = Uuid::new_v4();
    let today = day(2024, 3, 10);
    let input = WaterInput {
        date: None,
        amount_ml: 300,
    };

    let outcome = service.add_water(owner, &input, today).unwrap();
    let err = service
        .update_water(
            Uuid::new_v4(),
            outcome.id,
            &WaterInput {
                date: None,
                amount_ml: 999,
            },
            today,
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
    assert_eq!(service.day_entries(owner, today).unwrap().water[0].amount_ml, 300);

    let updated = service
        .update_water(
            owner,
            outcome.id,
            &WaterInput {
                date: None,
                amount_ml: 450,
            },
            today,
        )
        .unwrap();
    assert_eq!(updated.status, WriteStatus::Updated);
    assert_eq!(service.day_entries(owner, today).unwrap().water[0].amount_ml, 450);
}

#[test]
fn reminders_toggle_and_filter_active() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let owner = Uuid::new_v4();

    let morning = service
        .add_reminder(
            owner,
            &ReminderInput {
                reminder_type: "water".to_string(),
                time: "08:30".to_string(),
                weekdays: vec![0, 2, 4],
                message: Some("Drink a glass".to_string()),
                active: true,
            },
        )
        .unwrap();
    service
        .add_reminder(
            owner,
            &ReminderInput {
                reminder_type: "workout".to_string(),
                time: "07:00".to_string(),
                weekdays: vec![6],
                message: None,
                active: true,
            },
        )
        .unwrap();

    let all = service.reminders(owner, false).unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].time < all[1].time);

    assert!(!service.toggle_reminder(owner, morning.id).unwrap());
    assert_eq!(service.reminders(owner, true).unwrap().len(), 1);
    assert!(service.toggle_reminder(owner, morning.id).unwrap());
    assert_eq!(service.reminders(owner, true).unwrap().len(), 2);

    let foreign = service.toggle_reminder(Uuid::new_v4(), morning.id);
    assert!(matches!(foreign, Err(ServiceError::NotFound { .. })));
}

#[test]
fn invalid_reminder_time_is_rejected() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();

    let result = service.add_reminder(
        Uuid::new_v4(),
        &ReminderInput {
            reminder_type: "meal".to_string(),
            time: "25:00".to_string(),
            weekdays: vec![1],
            message: None,
            active: true,
        },
    );
    assert!(matches!(result, Err(ServiceError::Validation(_))));
}

#[test]
fn oversized_amounts_are_rejected_and_views_stay_summable() {
    let ctx = context();
    let service = ctx.entry_service().unwrap();
    let progress = ctx.progress_service().unwrap();
    let owner = Uuid::new_v4();
    let today = day(2024, 3, 10);

    for _ in 0..2 {
        let diet = service.add_diet(
            owner,
            &DietInput {
                meal_type: "snack".to_string(),
                food_name: "Cake".to_string(),
                calories: Some(i64::MAX),
                ..DietInput::default()
            },
            today,
        );
        assert!(matches!(diet, Err(ServiceError::Validation(_))));

        let water = service.add_water(
            owner,
            &WaterInput {
                date: None,
                amount_ml: i64::MAX,
            },
            today,
        );
        assert!(matches!(water, Err(ServiceError::Validation(_))));

        let exercise = service.add_exercise(
            owner,
            &ExerciseInput {
                activity: "Marathon".to_string(),
                duration_min: i64::MAX,
                calories_burned: Some(i64::MAX),
                ..ExerciseInput::default()
            },
            today,
        );
        assert!(matches!(exercise, Err(ServiceError::Validation(_))));
    }

    for _ in 0..2 {
        service
            .add_water(
                owner,
                &WaterInput {
                    date: None,
                    amount_ml: 20_000,
                },
                today,
            )
            .unwrap();
    }

    let snapshot = progress.today_snapshot(owner, today).unwrap();
    assert_eq!(snapshot.calories_consumed, 0);
    assert_eq!(snapshot.water_intake, 40_000);
    assert_eq!(snapshot.water_goal_percent, 100);
}
