//! Command-line client over the wellness endpoints.
//!
//! # Responsibility
//! - Map subcommands onto `wellness_ffi::api` calls.
//! - Print envelope messages and JSON views; exit non-zero on failure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wellness_ffi::api;

#[derive(Parser)]
#[command(name = "wellness")]
#[command(author, version, about = "Personal wellness tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Owner id (UUID) all records belong to
    #[arg(short, long, global = true, env = "WELLNESS_OWNER_ID")]
    owner: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, env = "WELLNESS_LOG_DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "WELLNESS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check core linkage
    Ping,
    /// Create the goal profile with defaults
    Register,
    /// Record an entry
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Delete an entry (diet|weight|water|exercise|mood|reminder)
    Delete { kind: String, id: String },
    /// Pause or resume a reminder
    ToggleReminder { id: String },
    /// Update goals and personal details
    Goals {
        #[arg(long)]
        calories: Option<i64>,
        #[arg(long)]
        water_ml: Option<i64>,
        #[arg(long)]
        weight_kg: Option<f64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        height_cm: Option<f64>,
        #[arg(long)]
        fitness_goal: Option<String>,
    },
    /// Switch display theme (green|blue|orange|purple)
    Theme { theme: String },
    /// Entries of one day
    Day {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List reminders
    Reminders {
        /// Include paused reminders
        #[arg(long)]
        all: bool,
    },
    /// Today's dashboard numbers
    Today,
    /// Per-day chart series
    Series {
        /// calories|water|calories_burned|exercise_minutes|weight|mood
        metric: String,
        /// Window length in days, defaults per metric
        #[arg(short, long)]
        days: Option<u32>,
    },
    /// Onboarding journey summary
    Journey,
    /// Progress summary
    Progress,
    /// 30-day reports bundle
    Report,
    /// Export every record as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
    },
    /// Ask the assistant
    Chat { message: String },
}

#[derive(Subcommand)]
enum LogCommands {
    /// Meal item
    Diet {
        /// breakfast|lunch|dinner|snack
        meal_type: String,
        food_name: String,
        #[arg(long)]
        calories: Option<i64>,
        #[arg(long)]
        carbs: Option<f64>,
        #[arg(long)]
        protein: Option<f64>,
        #[arg(long)]
        fat: Option<f64>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Body weight in kg (one per day)
    Weight {
        weight_kg: f64,
        #[arg(long)]
        notes: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Water intake in ml
    Water {
        amount_ml: i64,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Exercise session
    Exercise {
        activity: String,
        duration_min: i64,
        #[arg(long)]
        calories: Option<i64>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Mood level 1..=5 (one per day)
    Mood {
        level: u8,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Reminder at HH:MM on weekdays 0 (Mon)..6 (Sun)
    Reminder {
        /// workout|water|meal
        reminder_type: String,
        time: String,
        #[arg(long, value_delimiter = ',', default_value = "0,1,2,3,4,5,6")]
        days: Vec<u8>,
        #[arg(long)]
        message: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let error = api::init_logging(cli.log_level.clone(), log_dir.to_string());
        if !error.is_empty() {
            eprintln!("Warning: logging disabled: {error}");
        }
    }

    if let Err(message) = run(cli) {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Commands::Ping = cli.command {
        println!("wellness ping={}", api::ping());
        println!("wellness version={}", api::core_version());
        return Ok(());
    }

    let owner = cli
        .owner
        .ok_or_else(|| "owner id required (--owner or WELLNESS_OWNER_ID)".to_string())?;

    match cli.command {
        Commands::Ping => Ok(()),
        Commands::Register => action(api::profile_register(owner)),
        Commands::Log { command } => log_entry(owner, command),
        Commands::Delete { kind, id } => action(api::entry_delete(owner, kind, id)),
        Commands::ToggleReminder { id } => action(api::entry_toggle_reminder(owner, id)),
        Commands::Goals {
            calories,
            water_ml,
            weight_kg,
            name,
            age,
            gender,
            height_cm,
            fitness_goal,
        } => action(api::profile_update(
            owner,
            calories,
            water_ml,
            weight_kg,
            name,
            age,
            gender,
            height_cm,
            fitness_goal,
        )),
        Commands::Theme { theme } => action(api::profile_set_theme(owner, theme)),
        Commands::Day { date } => json(api::entries_for_day_json(owner, date)),
        Commands::Reminders { all } => json(api::reminders_json(owner, !all)),
        Commands::Today => {
            let snapshot = api::progress_today(owner);
            if !snapshot.ok {
                return Err(snapshot.message);
            }
            println!("date            {}", snapshot.date);
            println!(
                "calories        {} / {} ({}%)",
                snapshot.calories_consumed, snapshot.calorie_goal, snapshot.calories_goal_percent
            );
            println!(
                "water           {} / {} ml ({}%)",
                snapshot.water_intake, snapshot.water_goal, snapshot.water_goal_percent
            );
            println!(
                "exercise        {} min, {} kcal ({}%)",
                snapshot.exercise_minutes, snapshot.calories_burned, snapshot.exercise_goal_percent
            );
            match snapshot.current_weight {
                Some(weight) => println!("weight          {weight:.1} kg"),
                None => println!("weight          -"),
            }
            Ok(())
        }
        Commands::Series { metric, days } => {
            let series = api::progress_series(owner, metric, days);
            if !series.ok {
                return Err(series.message);
            }
            println!(
                "{} {}..{}",
                series.metric, series.start_date, series.end_date
            );
            for point in series.points {
                match point.value {
                    Some(value) => println!("{} {} {value}", point.date, point.day),
                    None => println!("{} {} -", point.date, point.day),
                }
            }
            Ok(())
        }
        Commands::Journey => {
            let journey = api::progress_journey(owner);
            if !journey.ok {
                return Err(journey.message);
            }
            println!("stage           {}", journey.stage);
            println!("total entries   {}", journey.total_entries);
            println!(
                "counts          diet={} water={} weight={} exercise={} mood={}",
                journey.diet_count,
                journey.water_count,
                journey.weight_count,
                journey.exercise_count,
                journey.mood_count
            );
            println!("water today     {}%", journey.water_progress);
            println!("calories today  {}%", journey.calorie_progress);
            println!("exercise today  {} min", journey.exercise_minutes);
            println!("mood            {}", journey.current_mood);
            Ok(())
        }
        Commands::Progress => {
            let summary = api::progress_summary(owner);
            if !summary.ok {
                return Err(summary.message);
            }
            println!("water           {}%", summary.water_progress);
            println!("calories        {}%", summary.calorie_progress);
            println!(
                "exercise        {} min, {} kcal",
                summary.exercise_minutes, summary.calories_burned
            );
            println!("mood            {}", summary.current_mood);
            println!("weight goal     {}%", summary.weight_progress);
            Ok(())
        }
        Commands::Report => json(api::progress_report_json(owner)),
        Commands::Export { file } => {
            let export = api::export_data_json(owner);
            if !export.ok {
                return Err(export.message);
            }
            match file {
                Some(path) => {
                    std::fs::write(&path, export.json)
                        .map_err(|err| format!("cannot write `{}`: {err}", path.display()))?;
                    println!("{} to {}", export.message, path.display());
                }
                None => println!("{}", export.json),
            }
            Ok(())
        }
        Commands::Chat { message } => {
            let chat = api::assistant_chat(owner, message);
            if !chat.ok {
                return Err(chat.message);
            }
            println!("{}", chat.reply);
            Ok(())
        }
    }
}

fn log_entry(owner: String, command: LogCommands) -> Result<(), String> {
    let response = match command {
        LogCommands::Diet {
            meal_type,
            food_name,
            calories,
            carbs,
            protein,
            fat,
            date,
        } => api::entry_add_diet(
            owner, date, meal_type, food_name, calories, carbs, protein, fat,
        ),
        LogCommands::Weight {
            weight_kg,
            notes,
            date,
        } => api::entry_record_weight(owner, date, weight_kg, notes),
        LogCommands::Water { amount_ml, date } => api::entry_add_water(owner, date, amount_ml),
        LogCommands::Exercise {
            activity,
            duration_min,
            calories,
            notes,
            date,
        } => api::entry_add_exercise(owner, date, activity, duration_min, calories, notes),
        LogCommands::Mood {
            level,
            description,
            notes,
            date,
        } => api::entry_record_mood(owner, date, level, description, notes),
        LogCommands::Reminder {
            reminder_type,
            time,
            days,
            message,
        } => api::entry_add_reminder(owner, reminder_type, time, days, message),
    };
    action(response)
}

fn action(response: api::EntryActionResponse) -> Result<(), String> {
    if !response.ok {
        return Err(response.message);
    }
    match response.entry_id {
        Some(id) => println!("{} (id={id})", response.message),
        None => println!("{}", response.message),
    }
    Ok(())
}

fn json(response: api::JsonResponse) -> Result<(), String> {
    if !response.ok {
        return Err(response.message);
    }
    println!("{}", response.json);
    Ok(())
}
