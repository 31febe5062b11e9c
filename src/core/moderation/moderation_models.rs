// Moderation domain models - data structures for the antenna sweep.
//
// These are pure domain types with no HTTP dependencies.
// The infra layer fetches raw JSON; everything here decides what it means.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A note needs at least this many mentions to be treated as spam.
pub const MIN_MENTIONS_FOR_SPAM: usize = 2;

/// Page size requested from the antenna feed.
pub const ANTENNA_PAGE_LIMIT: u32 = 100;

/// Author of a note.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NoteAuthor {
    pub id: String,
    /// Originating server. `None` for local accounts.
    #[serde(default)]
    pub host: Option<String>,
}

impl NoteAuthor {
    /// The remote host this author belongs to, if any.
    ///
    /// Blank hosts are treated the same as a missing one.
    pub fn remote_host(&self) -> Option<&str> {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
    }
}

/// A note pulled from the antenna feed.
///
/// Only the fields the sweep acts on are decoded. Mention targets are kept
/// as raw values because only their count matters.
#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub id: String,
    pub user: NoteAuthor,
    /// The server omits this field entirely when a note has no mentions.
    #[serde(default)]
    pub mentions: Vec<serde_json::Value>,
}

impl Note {
    /// Strictly decode one feed entry.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn mention_count(&self) -> usize {
        self.mentions.len()
    }
}

/// Result of classifying a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Below the mention threshold, leave it alone.
    Clean,
    /// Mention spam, delete it and its author.
    MentionSpam,
}

/// Decide whether a note is mention spam.
pub fn classify(note: &Note) -> Verdict {
    if note.mention_count() >= MIN_MENTIONS_FOR_SPAM {
        Verdict::MentionSpam
    } else {
        Verdict::Clean
    }
}

/// Outcome of one step in the flagged-note workflow.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    Failed(String),
}

impl StepStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, StepStatus::Done)
    }
}

/// What happened to the author's host in the block list.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostBlockStatus {
    /// Host was appended and the settings update was accepted.
    Added,
    /// Host was already on the list; nothing written.
    AlreadyBlocked,
    /// Author is local, there is no host to block.
    LocalAuthor,
    /// Reading or writing the settings failed.
    Failed(String),
}

/// Per-step record for a note that was flagged as spam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedNote {
    pub note_id: String,
    pub user_id: String,
    pub host: Option<String>,
    pub note_deleted: StepStatus,
    pub account_deleted: StepStatus,
    pub host_block: HostBlockStatus,
}

impl FlaggedNote {
    /// Every step went through (an already blocked or local host counts).
    pub fn is_complete(&self) -> bool {
        self.note_deleted.is_done()
            && self.account_deleted.is_done()
            && !matches!(self.host_block, HostBlockStatus::Failed(_))
    }
}

/// Final state of one feed entry after the sweep.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOutcome {
    Ignored { note_id: String, mentions: usize },
    Malformed { index: usize, reason: String },
    Flagged(FlaggedNote),
}

/// Summary of one pass over the antenna.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<NoteOutcome>,
}

impl RunReport {
    pub fn scanned(&self) -> usize {
        self.outcomes.len()
    }

    pub fn flagged(&self) -> impl Iterator<Item = &FlaggedNote> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            NoteOutcome::Flagged(flagged) => Some(flagged),
            _ => None,
        })
    }

    pub fn malformed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, NoteOutcome::Malformed { .. }))
            .count()
    }

    pub fn hosts_added(&self) -> Vec<&str> {
        self.flagged()
            .filter(|flagged| flagged.host_block == HostBlockStatus::Added)
            .filter_map(|flagged| flagged.host.as_deref())
            .collect()
    }
}
