//! Goal profile persistence.
//!
//! # Invariants
//! - At most one profile row per owner (`owner_id` is the primary key).
//! - `ensure_profile` never overwrites an existing profile.

use super::entry_repo::{parse_label_column, parse_uuid_column, RepoError, RepoResult};
use super::ensure_connection_ready;
use crate::model::now_epoch_ms;
use crate::model::profile::{GoalProfile, Theme};
use crate::model::OwnerId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROFILE_SELECT_SQL: &str = "SELECT
    owner_id, calorie_goal, water_goal_ml, weight_goal_kg, theme,
    name, age, gender, height_cm, fitness_goal
FROM goal_profiles";

/// Persistence contract for per-owner goals.
pub trait ProfileRepository {
    /// Inserts registration defaults when absent and returns the stored profile.
    fn ensure_profile(&self, owner_id: OwnerId) -> RepoResult<GoalProfile>;
    fn get_profile(&self, owner_id: OwnerId) -> RepoResult<Option<GoalProfile>>;
    /// Creates or fully replaces the owner's profile.
    fn save_profile(&self, profile: &GoalProfile) -> RepoResult<()>;
    fn set_theme(&self, owner_id: OwnerId, theme: Theme) -> RepoResult<()>;
}

/// SQLite-backed profile repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    /// # Errors
    /// - `RepoError::MissingRequiredTable` when migrations have not run.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn ensure_profile(&self, owner_id: OwnerId) -> RepoResult<GoalProfile> {
        let defaults = GoalProfile::with_defaults(owner_id);
        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT OR IGNORE INTO goal_profiles (
                owner_id, calorie_goal, water_goal_ml, theme, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5);",
            params![
                owner_id.to_string(),
                defaults.calorie_goal,
                defaults.water_goal_ml,
                defaults.theme.as_str(),
                now,
            ],
        )?;

        self.get_profile(owner_id)?
            .ok_or(RepoError::ProfileNotFound(owner_id))
    }

    fn get_profile(&self, owner_id: OwnerId) -> RepoResult<Option<GoalProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE owner_id = ?1;"))?;
        let profile = stmt
            .query_row([owner_id.to_string()], |row| Ok(parse_profile_row(row)))
            .optional()?;
        profile.transpose()
    }

    fn save_profile(&self, profile: &GoalProfile) -> RepoResult<()> {
        profile.validate()?;

        let now = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO goal_profiles (
                owner_id, calorie_goal, water_goal_ml, weight_goal_kg, theme,
                name, age, gender, height_cm, fitness_goal, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
            ON CONFLICT (owner_id) DO UPDATE SET
                calorie_goal = excluded.calorie_goal,
                water_goal_ml = excluded.water_goal_ml,
                weight_goal_kg = excluded.weight_goal_kg,
                theme = excluded.theme,
                name = excluded.name,
                age = excluded.age,
                gender = excluded.gender,
                height_cm = excluded.height_cm,
                fitness_goal = excluded.fitness_goal,
                updated_at = excluded.updated_at;",
            params![
                profile.owner_id.to_string(),
                profile.calorie_goal,
                profile.water_goal_ml,
                profile.weight_goal_kg,
                profile.theme.as_str(),
                profile.name.as_deref(),
                profile.age,
                profile.gender.as_deref(),
                profile.height_cm,
                profile.fitness_goal.as_deref(),
                now,
            ],
        )?;

        Ok(())
    }

    fn set_theme(&self, owner_id: OwnerId, theme: Theme) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE goal_profiles
             SET theme = ?1, updated_at = ?2
             WHERE owner_id = ?3;",
            params![theme.as_str(), now_epoch_ms(), owner_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::ProfileNotFound(owner_id));
        }
        Ok(())
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<GoalProfile> {
    Ok(GoalProfile {
        owner_id: parse_uuid_column(row, "owner_id")?,
        calorie_goal: row.get("calorie_goal")?,
        water_goal_ml: row.get("water_goal_ml")?,
        weight_goal_kg: row.get("weight_goal_kg")?,
        theme: parse_label_column::<Theme>(row, "theme")?,
        name: row.get("name")?,
        age: row.get("age")?,
        gender: row.get("gender")?,
        height_cm: row.get("height_cm")?,
        fitness_goal: row.get("fitness_goal")?,
    })
}
