use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::{AnchorTable, NewTurn, TurnRole};

/// Question/answer pair as stored by the history endpoint.
///
/// Field names follow the client records (`userQuery`/`botReply`); the
/// server-side session history (`query`/`reply`) is accepted as well. The
/// record `id` is a client timestamp and is not carried over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(rename = "userQuery", alias = "query", default)]
    pub user_query: Option<String>,
    #[serde(rename = "botReply", alias = "reply", default)]
    pub bot_reply: Option<String>,
}

/// Either of the two shapes history entries come in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawTurn {
    /// `"You: ..."` / `"Bot: ..."` string
    Prefixed(String),
    Record(HistoryRecord),
}

/// Maps history entries of either shape onto [`NewTurn`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnNormalizer {
    anchors: AnchorTable,
}

impl TurnNormalizer {
    pub fn new(anchors: AnchorTable) -> Self {
        Self { anchors }
    }

    /// Classify a prefixed string.
    ///
    /// Anything starting with the user marker is a user turn; everything else
    /// is an assistant turn, with the assistant prefix removed when present.
    pub fn normalize(&self, raw: &str) -> NewTurn {
        let user_marker = self.anchors.user_marker();

        if raw.starts_with(user_marker) {
            let text = raw
                .strip_prefix(self.anchors.user_prefix)
                .or_else(|| raw.strip_prefix(user_marker))
                .unwrap_or(raw);
            return NewTurn::user(text);
        }

        let text = raw.strip_prefix(self.anchors.assistant_prefix).unwrap_or(raw);
        NewTurn::assistant(text)
    }

    /// Split a record into its user turn and, if answered, the assistant turn
    pub fn normalize_record(&self, record: &HistoryRecord) -> Vec<NewTurn> {
        let mut turns = Vec::with_capacity(2);

        if let Some(query) = &record.user_query {
            turns.push(NewTurn::user(query.as_str()));
        }
        if let Some(reply) = &record.bot_reply {
            turns.push(NewTurn::assistant(reply.as_str()));
        }

        if turns.is_empty() {
            trace!("History record {:?} carries no text, skipping", record.id);
        }
        turns
    }

    pub fn normalize_raw(&self, raw: &RawTurn) -> Vec<NewTurn> {
        match raw {
            RawTurn::Prefixed(text) => vec![self.normalize(text)],
            RawTurn::Record(record) => self.normalize_record(record),
        }
    }

    /// Render a turn back into the prefixed string shape
    pub fn to_prefixed(&self, turn: &NewTurn) -> String {
        match turn.role {
            TurnRole::User => format!("{}{}", self.anchors.user_prefix, turn.text),
            TurnRole::Assistant => format!("{}{}", self.anchors.assistant_prefix, turn.text),
        }
    }
}
