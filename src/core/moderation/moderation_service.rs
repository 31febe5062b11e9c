// Antenna sweep service - core business logic for mention-spam cleanup.
//
// This service handles:
// - Fetching one page of notes from an antenna
// - Classifying each note by mention count
// - Deleting spam notes and their authors
// - Adding the author's host to the server block list
//
// NO HTTP dependencies here - the server is reached through `ModerationApi`.

use super::moderation_models::{
    classify, FlaggedNote, HostBlockStatus, Note, NoteOutcome, RunReport, StepStatus, Verdict,
    ANTENNA_PAGE_LIMIT,
};
use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {endpoint} failed: {reason}")]
    Transport {
        endpoint: &'static str,
        reason: String,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Malformed response from {endpoint}: {reason}")]
    Malformed {
        endpoint: &'static str,
        reason: String,
    },
}

// ============================================================================
// SERVER API TRAIT (PORT)
// ============================================================================

/// The admin operations the sweep needs from the server.
///
/// Every call is authenticated with the moderator token held by the implementation.
#[async_trait]
pub trait ModerationApi: Send + Sync {
    /// Latest notes matched by an antenna, newest first, as raw JSON entries.
    async fn antenna_notes(
        &self,
        antenna_id: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, ApiError>;

    async fn delete_note(&self, note_id: &str) -> Result<(), ApiError>;

    async fn delete_account(&self, user_id: &str) -> Result<(), ApiError>;

    /// Current server-wide block list.
    async fn blocked_hosts(&self) -> Result<Vec<String>, ApiError>;

    /// Replace the server-wide block list.
    async fn update_blocked_hosts(&self, hosts: &[String]) -> Result<(), ApiError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Runs one moderation pass over an antenna.
pub struct ModerationService<A: ModerationApi> {
    api: A,
    antenna_id: String,
}

impl<A: ModerationApi> ModerationService<A> {
    pub fn new(api: A, antenna_id: impl Into<String>) -> Self {
        Self {
            api,
            antenna_id: antenna_id.into(),
        }
    }

    /// Fetch one page from the antenna and process every entry in order.
    ///
    /// A failed fetch aborts the whole pass. Anything that goes wrong after that
    /// only affects the entry being processed and ends up in the report.
    pub async fn run(&self) -> Result<RunReport, ApiError> {
        let started_at = Utc::now();

        let entries = self
            .api
            .antenna_notes(&self.antenna_id, ANTENNA_PAGE_LIMIT)
            .await?;

        tracing::info!(
            antenna_id = %self.antenna_id,
            count = entries.len(),
            "Fetched antenna notes"
        );

        let mut outcomes = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            outcomes.push(self.process_entry(index, entry).await);
        }

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        })
    }

    /// Decode, classify and (if needed) act on a single feed entry.
    async fn process_entry(&self, index: usize, entry: serde_json::Value) -> NoteOutcome {
        let note = match Note::from_value(entry) {
            Ok(note) => note,
            Err(e) => {
                tracing::warn!(index, "Skipping malformed note: {}", e);
                return NoteOutcome::Malformed {
                    index,
                    reason: e.to_string(),
                };
            }
        };

        match classify(&note) {
            Verdict::Clean => {
                let mentions = note.mention_count();
                tracing::debug!(note_id = %note.id, mentions, "Note below mention threshold");
                NoteOutcome::Ignored {
                    note_id: note.id,
                    mentions,
                }
            }
            Verdict::MentionSpam => NoteOutcome::Flagged(self.handle_spam(note).await),
        }
    }

    /// Delete the note, delete its author, then block the author's host.
    ///
    /// The steps always run in this order. A failed deletion is recorded and
    /// the workflow carries on; nothing is rolled back.
    async fn handle_spam(&self, note: Note) -> FlaggedNote {
        let host = note.user.remote_host().map(str::to_string);

        tracing::info!(
            note_id = %note.id,
            user_id = %note.user.id,
            host = host.as_deref().unwrap_or("<local>"),
            mentions = note.mention_count(),
            "Mention spam detected"
        );

        let note_deleted = step_status("delete note", self.api.delete_note(&note.id).await);
        let account_deleted = step_status(
            "delete account",
            self.api.delete_account(&note.user.id).await,
        );

        let host_block = match host.as_deref() {
            Some(host) => self.block_host(host).await,
            None => {
                tracing::info!(user_id = %note.user.id, "Author is local, no host to block");
                HostBlockStatus::LocalAuthor
            }
        };

        FlaggedNote {
            note_id: note.id,
            user_id: note.user.id,
            host,
            note_deleted,
            account_deleted,
            host_block,
        }
    }

    /// Append `host` to the server block list unless it is already there.
    async fn block_host(&self, host: &str) -> HostBlockStatus {
        let mut blocked = match self.api.blocked_hosts().await {
            Ok(blocked) => blocked,
            Err(e) => {
                tracing::warn!(host, "Failed to read blocked hosts: {}", e);
                return HostBlockStatus::Failed(e.to_string());
            }
        };

        if blocked.iter().any(|existing| existing.eq_ignore_ascii_case(host)) {
            tracing::info!(host, "Host already blocked");
            return HostBlockStatus::AlreadyBlocked;
        }

        blocked.push(host.to_string());

        match self.api.update_blocked_hosts(&blocked).await {
            Ok(()) => {
                tracing::info!(host, total = blocked.len(), "Blocked hosts updated");
                HostBlockStatus::Added
            }
            Err(e) => {
                tracing::warn!(host, "Failed to update blocked hosts: {}", e);
                HostBlockStatus::Failed(e.to_string())
            }
        }
    }
}

/// Log the result of a deletion step and turn it into a `StepStatus`.
fn step_status(step: &str, result: Result<(), ApiError>) -> StepStatus {
    match result {
        Ok(()) => {
            tracing::info!(step, "Step succeeded");
            StepStatus::Done
        }
        Err(e) => {
            tracing::warn!(step, "Step failed: {}", e);
            StepStatus::Failed(e.to_string())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
