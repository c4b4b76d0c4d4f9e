//! Entry Store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Owner-scoped create/update/delete/list for every tracked entry kind.
//! - Enforce at-most-one weight/mood row per `(owner, date)` with a single
//!   upsert statement.
//!
//! # Invariants
//! - Every statement filters by `owner_id`; an id owned by someone else is
//!   indistinguishable from a missing id (`RepoError::NotFound`).
//! - Write paths call `validate()` before any SQL runs.
//! - Read paths reject malformed persisted values instead of masking them.

use super::ensure_connection_ready;
use crate::db::DbError;
use crate::metrics::dates::{format_date, format_time_of_day, DateWindow};
use crate::model::entry::{
    DietEntry, EntryKind, ExerciseEntry, MealType, MoodEntry, WaterEntry, WeightEntry,
};
use crate::model::reminder::{parse_weekdays, weekdays_to_db, Reminder, ReminderType};
use crate::model::{EntryId, EntryValidationError, OwnerId};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const DIET_SELECT_SQL: &str = "SELECT
    id, owner_id, entry_date, meal_type, food_name,
    calories, carbs_g, protein_g, fat_g, created_at
FROM diet_entries";

const WEIGHT_SELECT_SQL: &str = "SELECT
    id, owner_id, entry_date, weight_kg, notes, created_at
FROM weight_entries";

const WATER_SELECT_SQL: &str = "SELECT
    id, owner_id, entry_date, amount_ml, created_at
FROM water_entries";

const EXERCISE_SELECT_SQL: &str = "SELECT
    id, owner_id, entry_date, activity, duration_min,
    calories_burned, notes, created_at
FROM exercise_entries";

const MOOD_SELECT_SQL: &str = "SELECT
    id, owner_id, entry_date, mood_level, mood_description, notes, created_at
FROM mood_entries";

const REMINDER_SELECT_SQL: &str = "SELECT
    id, owner_id, reminder_type, time_of_day, weekdays, message, active, created_at
FROM reminders";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry and profile persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    /// Missing, or owned by another owner.
    NotFound { kind: EntryKind, id: EntryId },
    ProfileNotFound(OwnerId),
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} entry not found: {id}"),
            Self::ProfileNotFound(owner_id) => write!(f, "profile not found for owner {owner_id}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::ProfileNotFound(_)
            | Self::MissingRequiredTable(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whether an upsert inserted a new row or overwrote the day's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStatus {
    Created,
    Updated,
}

/// Result of a per-day upsert. `id` is the surviving row's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: EntryId,
    pub status: WriteStatus,
}

/// Owner-scoped filter for dated entry lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryQuery {
    pub owner_id: OwnerId,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
    pub limit: Option<u32>,
    /// Order by date/creation descending instead of ascending.
    pub newest_first: bool,
}

impl EntryQuery {
    /// Every entry of `owner_id`, oldest first.
    pub fn all(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            from: None,
            to: None,
            limit: None,
            newest_first: false,
        }
    }

    /// Entries dated exactly `date`.
    pub fn on(owner_id: OwnerId, date: NaiveDate) -> Self {
        Self::within(owner_id, DateWindow::day(date))
    }

    /// Entries inside `window`, bounds included.
    pub fn within(owner_id: OwnerId, window: DateWindow) -> Self {
        Self {
            from: Some(window.start),
            to: Some(window.end),
            ..Self::all(owner_id)
        }
    }

    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Persistence contract for tracked entries and reminders.
pub trait EntryRepository {
    fn insert_diet(&self, entry: &DietEntry) -> RepoResult<EntryId>;
    fn update_diet(&self, entry: &DietEntry) -> RepoResult<()>;
    fn list_diet(&self, query: &EntryQuery) -> RepoResult<Vec<DietEntry>>;

    /// Creates or overwrites the owner's weight for `entry.date`.
    fn upsert_weight(&self, entry: &WeightEntry) -> RepoResult<UpsertOutcome>;
    fn list_weight(&self, query: &EntryQuery) -> RepoResult<Vec<WeightEntry>>;

    fn insert_water(&self, entry: &WaterEntry) -> RepoResult<EntryId>;
    fn update_water(&self, entry: &WaterEntry) -> RepoResult<()>;
    fn list_water(&self, query: &EntryQuery) -> RepoResult<Vec<WaterEntry>>;

    fn insert_exercise(&self, entry: &ExerciseEntry) -> RepoResult<EntryId>;
    fn update_exercise(&self, entry: &ExerciseEntry) -> RepoResult<()>;
    fn list_exercise(&self, query: &EntryQuery) -> RepoResult<Vec<ExerciseEntry>>;

    /// Creates or overwrites the owner's mood for `entry.date`.
    fn upsert_mood(&self, entry: &MoodEntry) -> RepoResult<UpsertOutcome>;
    fn list_mood(&self, query: &EntryQuery) -> RepoResult<Vec<MoodEntry>>;

    fn insert_reminder(&self, reminder: &Reminder) -> RepoResult<EntryId>;
    fn update_reminder(&self, reminder: &Reminder) -> RepoResult<()>;
    /// Flips `active` and returns the new value.
    fn toggle_reminder(&self, owner_id: OwnerId, id: EntryId) -> RepoResult<bool>;
    /// Reminders ordered by time of day.
    fn list_reminders(&self, owner_id: OwnerId, active_only: bool) -> RepoResult<Vec<Reminder>>;

    /// Deletes one row of `kind` owned by `owner_id`.
    fn delete_entry(&self, owner_id: OwnerId, kind: EntryKind, id: EntryId) -> RepoResult<()>;
    fn count_entries(&self, owner_id: OwnerId, kind: EntryKind) -> RepoResult<u64>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `RepoError::MissingRequiredTable` when migrations have not run.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_dated<T>(
        &self,
        select_sql: &str,
        query: &EntryQuery,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        let mut sql = format!("{select_sql} WHERE owner_id = ?");
        let mut bind_values = vec![Value::Text(query.owner_id.to_string())];

        if let Some(from) = query.from {
            sql.push_str(" AND entry_date >= ?");
            bind_values.push(Value::Text(format_date(from)));
        }
        if let Some(to) = query.to {
            sql.push_str(" AND entry_date <= ?");
            bind_values.push(Value::Text(format_date(to)));
        }

        if query.newest_first {
            sql.push_str(" ORDER BY entry_date DESC, created_at DESC, id ASC");
        } else {
            sql.push_str(" ORDER BY entry_date ASC, created_at ASC, id ASC");
        }

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }
        Ok(items)
    }

    fn expect_changed(changed: usize, kind: EntryKind, id: EntryId) -> RepoResult<()> {
        if changed == 0 {
            return Err(RepoError::NotFound { kind, id });
        }
        Ok(())
    }

    fn finish_upsert(candidate: EntryId, stored_id: String) -> RepoResult<UpsertOutcome> {
        let id = parse_uuid_text(&stored_id, "id")?;
        let status = if id == candidate {
            WriteStatus::Created
        } else {
            WriteStatus::Updated
        };
        Ok(UpsertOutcome { id, status })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn insert_diet(&self, entry: &DietEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO diet_entries (
                id, owner_id, entry_date, meal_type, food_name,
                calories, carbs_g, protein_g, fat_g, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                entry.id.to_string(),
                entry.owner_id.to_string(),
                format_date(entry.date),
                entry.meal_type.as_str(),
                entry.food_name.trim(),
                entry.calories,
                entry.carbs_g,
                entry.protein_g,
                entry.fat_g,
                entry.created_at,
            ],
        )?;

        Ok(entry.id)
    }

    fn update_diet(&self, entry: &DietEntry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE diet_entries
             SET
                entry_date = ?1,
                meal_type = ?2,
                food_name = ?3,
                calories = ?4,
                carbs_g = ?5,
                protein_g = ?6,
                fat_g = ?7
             WHERE id = ?8 AND owner_id = ?9;",
            params![
                format_date(entry.date),
                entry.meal_type.as_str(),
                entry.food_name.trim(),
                entry.calories,
                entry.carbs_g,
                entry.protein_g,
                entry.fat_g,
                entry.id.to_string(),
                entry.owner_id.to_string(),
            ],
        )?;

        Self::expect_changed(changed, EntryKind::Diet, entry.id)
    }

    fn list_diet(&self, query: &EntryQuery) -> RepoResult<Vec<DietEntry>> {
        self.query_dated(DIET_SELECT_SQL, query, parse_diet_row)
    }

    fn upsert_weight(&self, entry: &WeightEntry) -> RepoResult<UpsertOutcome> {
        entry.validate()?;

        let stored_id: String = self.conn.query_row(
            "INSERT INTO weight_entries (
                id, owner_id, entry_date, weight_kg, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (owner_id, entry_date) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                notes = excluded.notes
            RETURNING id;",
            params![
                entry.id.to_string(),
                entry.owner_id.to_string(),
                format_date(entry.date),
                entry.weight_kg,
                entry.notes.as_deref(),
                entry.created_at,
            ],
            |row| row.get(0),
        )?;

        Self::finish_upsert(entry.id, stored_id)
    }

    fn list_weight(&self, query: &EntryQuery) -> RepoResult<Vec<WeightEntry>> {
        self.query_dated(WEIGHT_SELECT_SQL, query, parse_weight_row)
    }

    fn insert_water(&self, entry: &WaterEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO water_entries (
                id, owner_id, entry_date, amount_ml, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                entry.id.to_string(),
                entry.owner_id.to_string(),
                format_date(entry.date),
                entry.amount_ml,
                entry.created_at,
            ],
        )?;

        Ok(entry.id)
    }

    fn update_water(&self, entry: &WaterEntry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE water_entries
             SET entry_date = ?1, amount_ml = ?2
             WHERE id = ?3 AND owner_id = ?4;",
            params![
                format_date(entry.date),
                entry.amount_ml,
                entry.id.to_string(),
                entry.owner_id.to_string(),
            ],
        )?;

        Self::expect_changed(changed, EntryKind::Water, entry.id)
    }

    fn list_water(&self, query: &EntryQuery) -> RepoResult<Vec<WaterEntry>> {
        self.query_dated(WATER_SELECT_SQL, query, parse_water_row)
    }

    fn insert_exercise(&self, entry: &ExerciseEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO exercise_entries (
                id, owner_id, entry_date, activity, duration_min,
                calories_burned, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                entry.id.to_string(),
                entry.owner_id.to_string(),
                format_date(entry.date),
                entry.activity.trim(),
                entry.duration_min,
                entry.calories_burned,
                entry.notes.as_deref(),
                entry.created_at,
            ],
        )?;

        Ok(entry.id)
    }

    fn update_exercise(&self, entry: &ExerciseEntry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE exercise_entries
             SET
                entry_date = ?1,
                activity = ?2,
                duration_min = ?3,
                calories_burned = ?4,
                notes = ?5
             WHERE id = ?6 AND owner_id = ?7;",
            params![
                format_date(entry.date),
                entry.activity.trim(),
                entry.duration_min,
                entry.calories_burned,
                entry.notes.as_deref(),
                entry.id.to_string(),
                entry.owner_id.to_string(),
            ],
        )?;

        Self::expect_changed(changed, EntryKind::Exercise, entry.id)
    }

    fn list_exercise(&self, query: &EntryQuery) -> RepoResult<Vec<ExerciseEntry>> {
        self.query_dated(EXERCISE_SELECT_SQL, query, parse_exercise_row)
    }

    fn upsert_mood(&self, entry: &MoodEntry) -> RepoResult<UpsertOutcome> {
        entry.validate()?;

        let stored_id: String = self.conn.query_row(
            "INSERT INTO mood_entries (
                id, owner_id, entry_date, mood_level, mood_description, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (owner_id, entry_date) DO UPDATE SET
                mood_level = excluded.mood_level,
                mood_description = excluded.mood_description,
                notes = excluded.notes
            RETURNING id;",
            params![
                entry.id.to_string(),
                entry.owner_id.to_string(),
                format_date(entry.date),
                entry.level,
                entry.description.as_deref(),
                entry.notes.as_deref(),
                entry.created_at,
            ],
            |row| row.get(0),
        )?;

        Self::finish_upsert(entry.id, stored_id)
    }

    fn list_mood(&self, query: &EntryQuery) -> RepoResult<Vec<MoodEntry>> {
        self.query_dated(MOOD_SELECT_SQL, query, parse_mood_row)
    }

    fn insert_reminder(&self, reminder: &Reminder) -> RepoResult<EntryId> {
        reminder.validate()?;

        self.conn.execute(
            "INSERT INTO reminders (
                id, owner_id, reminder_type, time_of_day, weekdays, message, active, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                reminder.id.to_string(),
                reminder.owner_id.to_string(),
                reminder.reminder_type.as_str(),
                format_time_of_day(reminder.time),
                weekdays_to_db(&reminder.weekdays),
                reminder.message.as_deref(),
                reminder.active,
                reminder.created_at,
            ],
        )?;

        Ok(reminder.id)
    }

    fn update_reminder(&self, reminder: &Reminder) -> RepoResult<()> {
        reminder.validate()?;

        let changed = self.conn.execute(
            "UPDATE reminders
             SET
                reminder_type = ?1,
                time_of_day = ?2,
                weekdays = ?3,
                message = ?4,
                active = ?5
             WHERE id = ?6 AND owner_id = ?7;",
            params![
                reminder.reminder_type.as_str(),
                format_time_of_day(reminder.time),
                weekdays_to_db(&reminder.weekdays),
                reminder.message.as_deref(),
                reminder.active,
                reminder.id.to_string(),
                reminder.owner_id.to_string(),
            ],
        )?;

        Self::expect_changed(changed, EntryKind::Reminder, reminder.id)
    }

    fn toggle_reminder(&self, owner_id: OwnerId, id: EntryId) -> RepoResult<bool> {
        let active: Option<bool> = self
            .conn
            .query_row(
                "UPDATE reminders
                 SET active = 1 - active
                 WHERE id = ?1 AND owner_id = ?2
                 RETURNING active;",
                params![id.to_string(), owner_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        active.ok_or(RepoError::NotFound {
            kind: EntryKind::Reminder,
            id,
        })
    }

    fn list_reminders(&self, owner_id: OwnerId, active_only: bool) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(&format!(
            "{REMINDER_SELECT_SQL}
             WHERE owner_id = ?1
               AND (?2 = 0 OR active = 1)
             ORDER BY time_of_day ASC, created_at ASC, id ASC;"
        ))?;

        let mut rows = stmt.query(params![owner_id.to_string(), active_only])?;
        let mut reminders = Vec::new();
        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }
        Ok(reminders)
    }

    fn delete_entry(&self, owner_id: OwnerId, kind: EntryKind, id: EntryId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE id = ?1 AND owner_id = ?2;",
                kind.table()
            ),
            params![id.to_string(), owner_id.to_string()],
        )?;

        Self::expect_changed(changed, kind, id)
    }

    fn count_entries(&self, owner_id: OwnerId, kind: EntryKind) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE owner_id = ?1;", kind.table()),
            [owner_id.to_string()],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }
}

fn parse_diet_row(row: &Row<'_>) -> RepoResult<DietEntry> {
    let entry = DietEntry {
        id: parse_uuid_column(row, "id")?,
        owner_id: parse_uuid_column(row, "owner_id")?,
        date: parse_date_column(row, "entry_date")?,
        meal_type: parse_label_column::<MealType>(row, "meal_type")?,
        food_name: row.get("food_name")?,
        calories: row.get("calories")?,
        carbs_g: row.get("carbs_g")?,
        protein_g: row.get("protein_g")?,
        fat_g: row.get("fat_g")?,
        created_at: row.get("created_at")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_weight_row(row: &Row<'_>) -> RepoResult<WeightEntry> {
    let entry = WeightEntry {
        id: parse_uuid_column(row, "id")?,
        owner_id: parse_uuid_column(row, "owner_id")?,
        date: parse_date_column(row, "entry_date")?,
        weight_kg: row.get("weight_kg")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_water_row(row: &Row<'_>) -> RepoResult<WaterEntry> {
    let entry = WaterEntry {
        id: parse_uuid_column(row, "id")?,
        owner_id: parse_uuid_column(row, "owner_id")?,
        date: parse_date_column(row, "entry_date")?,
        amount_ml: row.get("amount_ml")?,
        created_at: row.get("created_at")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_exercise_row(row: &Row<'_>) -> RepoResult<ExerciseEntry> {
    let entry = ExerciseEntry {
        id: parse_uuid_column(row, "id")?,
        owner_id: parse_uuid_column(row, "owner_id")?,
        date: parse_date_column(row, "entry_date")?,
        activity: row.get("activity")?,
        duration_min: row.get("duration_min")?,
        calories_burned: row.get("calories_burned")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_mood_row(row: &Row<'_>) -> RepoResult<MoodEntry> {
    let level: i64 = row.get("mood_level")?;
    let entry = MoodEntry {
        id: parse_uuid_column(row, "id")?,
        owner_id: parse_uuid_column(row, "owner_id")?,
        date: parse_date_column(row, "entry_date")?,
        level: u8::try_from(level).map_err(|_| {
            RepoError::InvalidData(format!("invalid mood level `{level}` in mood_entries"))
        })?,
        description: row.get("mood_description")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    let time_text: String = row.get("time_of_day")?;
    let time = NaiveTime::parse_from_str(&time_text, "%H:%M").map_err(|_| {
        RepoError::InvalidData(format!("invalid time `{time_text}` in reminders.time_of_day"))
    })?;
    let weekdays_text: String = row.get("weekdays")?;
    let weekdays = parse_weekdays(&weekdays_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid weekdays `{weekdays_text}` in reminders"))
    })?;

    let reminder = Reminder {
        id: parse_uuid_column(row, "id")?,
        owner_id: parse_uuid_column(row, "owner_id")?,
        reminder_type: parse_label_column::<ReminderType>(row, "reminder_type")?,
        time,
        weekdays,
        message: row.get("message")?,
        active: row.get("active")?,
        created_at: row.get("created_at")?,
    };
    reminder.validate()?;
    Ok(reminder)
}

pub(crate) fn parse_uuid_column(row: &Row<'_>, column: &str) -> RepoResult<Uuid> {
    let text: String = row.get(column)?;
    parse_uuid_text(&text, column)
}

fn parse_uuid_text(text: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{text}` in column {column}")))
}

fn parse_date_column(row: &Row<'_>, column: &str) -> RepoResult<NaiveDate> {
    let text: String = row.get(column)?;
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{text}` in column {column}")))
}

pub(crate) fn parse_label_column<T>(row: &Row<'_>, column: &str) -> RepoResult<T>
where
    T: FromStr<Err = EntryValidationError>,
{
    let text: String = row.get(column)?;
    text.parse::<T>()
        .map_err(|_| RepoError::InvalidData(format!("invalid label `{text}` in column {column}")))
}
