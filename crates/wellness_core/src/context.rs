//! Explicitly constructed application context.
//!
//! # Responsibility
//! - Own one migrated SQLite connection and the resolved configuration.
//! - Hand out services bound to that connection.
//!
//! # Invariants
//! - No process-wide storage or client singletons live in core; callers
//!   build a context and pass it where it is needed.

use crate::config::WellnessConfig;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::entry_repo::{RepoResult, SqliteEntryRepository};
use crate::repo::profile_repo::SqliteProfileRepository;
use crate::service::assistant::{
    AssistantClient, AssistantError, AssistantService, OpenAiAssistantClient,
};
use crate::service::entry_service::EntryService;
use crate::service::export_service::ExportService;
use crate::service::progress_service::ProgressService;
use rusqlite::Connection;

pub type SqliteEntryService<'conn> =
    EntryService<SqliteEntryRepository<'conn>, SqliteProfileRepository<'conn>>;
pub type SqliteProgressService<'conn> =
    ProgressService<SqliteEntryRepository<'conn>, SqliteProfileRepository<'conn>>;
pub type SqliteExportService<'conn> =
    ExportService<SqliteEntryRepository<'conn>, SqliteProfileRepository<'conn>>;
pub type SqliteAssistantService<'conn, C> =
    AssistantService<SqliteEntryRepository<'conn>, SqliteProfileRepository<'conn>, C>;

/// Storage handle plus configuration for one caller.
pub struct AppContext {
    conn: Connection,
    config: WellnessConfig,
}

impl AppContext {
    /// Opens (and migrates) the database at `config.db_path`.
    pub fn open(config: WellnessConfig) -> DbResult<Self> {
        let conn = open_db(&config.db_path)?;
        Ok(Self { conn, config })
    }

    /// Opens a private in-memory database; used by tests and smoke checks.
    pub fn open_in_memory(config: WellnessConfig) -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self { conn, config })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn config(&self) -> &WellnessConfig {
        &self.config
    }

    pub fn entry_service(&self) -> RepoResult<SqliteEntryService<'_>> {
        Ok(EntryService::new(
            SqliteEntryRepository::try_new(&self.conn)?,
            SqliteProfileRepository::try_new(&self.conn)?,
        ))
    }

    pub fn progress_service(&self) -> RepoResult<SqliteProgressService<'_>> {
        Ok(ProgressService::new(
            SqliteEntryRepository::try_new(&self.conn)?,
            SqliteProfileRepository::try_new(&self.conn)?,
        )
        .with_exercise_reference(self.config.exercise_reference_kcal))
    }

    pub fn export_service(&self) -> RepoResult<SqliteExportService<'_>> {
        Ok(ExportService::new(
            SqliteEntryRepository::try_new(&self.conn)?,
            SqliteProfileRepository::try_new(&self.conn)?,
        ))
    }

    /// Chat service over `client`.
    pub fn assistant_service<C: AssistantClient>(
        &self,
        client: C,
    ) -> RepoResult<SqliteAssistantService<'_, C>> {
        Ok(AssistantService::new(self.progress_service()?, client))
    }

    /// Chat Completions client built from `config.assistant`.
    pub fn openai_client(&self) -> Result<OpenAiAssistantClient, AssistantError> {
        OpenAiAssistantClient::from_config(&self.config.assistant)
    }
}
