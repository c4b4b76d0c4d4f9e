//! Assistant bridge: owner metrics in, one relayed reply out.
//!
//! # Responsibility
//! - Build a bounded system context from the owner's stored metrics.
//! - Forward one chat turn to an [`AssistantClient`] and relay its reply.
//!
//! # Invariants
//! - Exactly one upstream attempt per chat turn; nothing is retried.
//! - Upstream failures are logged with their cause and answered with
//!   [`FALLBACK_REPLY`]; the cause is never returned to the caller.
//! - Chat text is never written to logs.

mod context_block;
mod openai_client;

pub use context_block::{build_system_context, MAX_CONTEXT_CHARS};
pub use openai_client::OpenAiAssistantClient;

use super::progress_service::ProgressService;
use super::ServiceError;
use crate::model::OwnerId;
use crate::repo::entry_repo::EntryRepository;
use crate::repo::profile_repo::ProfileRepository;
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing answer when the assistant cannot respond.
pub const FALLBACK_REPLY: &str =
    "Something went wrong with the AI assistant. Please try again later.";

/// Assistant bridge error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    /// The chat message was blank.
    EmptyMessage,
    /// No credentials or endpoint configured.
    NotConfigured(&'static str),
    /// Transport, HTTP or payload failure of the upstream service.
    Upstream(String),
    /// The owner's metrics could not be loaded.
    Context(String),
}

impl AssistantError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "assistant_empty_message",
            Self::NotConfigured(_) => "assistant_not_configured",
            Self::Upstream(_) => "assistant_upstream_failed",
            Self::Context(_) => "assistant_context_failed",
        }
    }
}

impl Display for AssistantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => f.write_str("Message is required"),
            Self::NotConfigured(details) => write!(f, "assistant is not configured: {details}"),
            Self::Upstream(details) => write!(f, "{details}"),
            Self::Context(details) => write!(f, "assistant context unavailable: {details}"),
        }
    }
}

impl Error for AssistantError {}

impl From<ServiceError> for AssistantError {
    fn from(value: ServiceError) -> Self {
        Self::Context(value.to_string())
    }
}

/// One text-generation backend.
pub trait AssistantClient {
    /// Sends one system context plus one user message; returns the reply text.
    fn complete(&self, system_context: &str, user_message: &str) -> Result<String, AssistantError>;
}

/// Result of one chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// `false` when `reply` is the fallback message.
    pub delivered: bool,
    pub reply: String,
}

impl ChatReply {
    fn delivered(reply: String) -> Self {
        Self {
            delivered: true,
            reply,
        }
    }

    fn fallback() -> Self {
        Self {
            delivered: false,
            reply: FALLBACK_REPLY.to_string(),
        }
    }
}

/// Chat use-case over the owner's progress views and one client.
pub struct AssistantService<R: EntryRepository, P: ProfileRepository, C: AssistantClient> {
    progress: ProgressService<R, P>,
    client: C,
}

impl<R, P, C> AssistantService<R, P, C>
where
    R: EntryRepository,
    P: ProfileRepository,
    C: AssistantClient,
{
    pub fn new(progress: ProgressService<R, P>, client: C) -> Self {
        Self { progress, client }
    }

    /// Renders the system context the next chat turn would send.
    pub fn system_context(&self, owner_id: OwnerId, today: NaiveDate) -> Result<String, AssistantError> {
        let snapshot = self.progress.today_snapshot(owner_id, today)?;
        let profile = self.progress.profile(owner_id)?;
        Ok(build_system_context(
            &snapshot,
            profile.as_ref(),
            snapshot.current_weight,
        ))
    }

    /// Answers one chat message with the owner's metrics as context.
    ///
    /// # Errors
    /// - `AssistantError::EmptyMessage` for a blank message.
    /// - `AssistantError::Context` when stored metrics cannot be read.
    ///
    /// Upstream failures are not errors: they yield the fallback reply.
    pub fn chat(
        &self,
        owner_id: OwnerId,
        message: &str,
        today: NaiveDate,
    ) -> Result<ChatReply, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let context = self.system_context(owner_id, today)?;
        match self.client.complete(&context, message) {
            Ok(reply) => {
                info!(
                    "event=assistant_chat module=assistant status=ok owner_id={} reply_chars={}",
                    owner_id,
                    reply.chars().count()
                );
                Ok(ChatReply::delivered(reply))
            }
            Err(err) => {
                warn!(
                    "event=assistant_chat module=assistant status=error owner_id={} error_code={} cause={}",
                    owner_id,
                    err.code(),
                    err
                );
                Ok(ChatReply::fallback())
            }
        }
    }
}
