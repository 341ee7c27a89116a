use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the conversation, as stored by the log.
///
/// Turns are immutable once appended: the log hands out clones, never
/// references into its own storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub role: TurnRole,
    pub text: String,
    /// Insertion position inside the log, starting at 0
    pub sequence: u64,
    pub appended_at: DateTime<Utc>,
}

/// A turn that has not been appended yet.
///
/// `id` is optional so hydrated history can keep the identity it was stored
/// with; the log assigns a fresh one otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTurn {
    pub id: Option<Uuid>,
    pub role: TurnRole,
    pub text: String,
}

impl NewTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: None,
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: None,
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }
}

/// Fixed texts stored in place of a reply when the request upstream failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedReply {
    /// The service answered but the body had no usable reply string
    InvalidFormat,
    /// The service answered with a non-success status
    FetchFailed,
    /// The request itself errored out
    RequestError(String),
}

impl std::fmt::Display for FailedReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailedReply::InvalidFormat => write!(f, "❌ Invalid reply format."),
            FailedReply::FetchFailed => write!(f, "❌ Failed to fetch response."),
            FailedReply::RequestError(msg) => write!(f, "❌ Error: {}", msg),
        }
    }
}
