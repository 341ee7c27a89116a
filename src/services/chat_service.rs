use tracing::{info, warn};

use crate::errors::ChatError;
use crate::models::{DecodedResponse, FailedReply, NewTurn, TranscriptEntry, TurnRole};
use crate::services::turn_normalizer::RawTurn;
use crate::state::ChatState;

/// Record a question and the reply the assistant gave for it.
///
/// The raw reply goes into the log; its decoded form is returned for display.
pub fn record_exchange(state: &ChatState, query: &str, reply: &str) -> DecodedResponse {
    state.log.extend([NewTurn::user(query), NewTurn::assistant(reply)]);
    state.decoder.decode(reply)
}

/// Record a question whose request failed, storing the placeholder reply
pub fn record_failure(state: &ChatState, query: &str, failure: FailedReply) {
    warn!("Assistant request failed: {}", failure);
    state
        .log
        .extend([NewTurn::user(query), NewTurn::assistant(failure.to_string())]);
}

/// Record a question that has not been answered yet
pub fn record_pending(state: &ChatState, query: &str) {
    state.log.append(NewTurn::user(query));
}

/// Attach the assistant's reply to the pending question.
///
/// Fails with `NoPendingQuestion` unless the last turn is an unanswered user
/// turn; the check and the append happen under one lock.
pub fn record_reply(state: &ChatState, reply: &str) -> Result<DecodedResponse, ChatError> {
    state
        .log
        .answer_pending(reply)
        .ok_or(ChatError::NoPendingQuestion)?;
    Ok(state.decoder.decode(reply))
}

/// Attach a placeholder reply to the pending question after a failed request
pub fn record_failed_reply(state: &ChatState, failure: FailedReply) -> Result<(), ChatError> {
    warn!("Assistant request failed: {}", failure);
    state
        .log
        .answer_pending(failure.to_string())
        .ok_or(ChatError::NoPendingQuestion)?;
    Ok(())
}

/// Load stored history at login.
///
/// Accepts a JSON array mixing prefixed strings and question/answer records.
/// A payload that is not an array appends nothing; single entries that match
/// neither shape are skipped with a warning. Returns the number of turns added.
pub fn hydrate_history(state: &ChatState, payload: &str) -> Result<usize, ChatError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(payload).map_err(ChatError::Hydration)?;
    let total = entries.len();

    let mut turns = Vec::with_capacity(total * 2);
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawTurn>(entry) {
            Ok(raw) => turns.extend(state.normalizer.normalize_raw(&raw)),
            Err(e) => warn!("Skipping history entry {}: {}", index, e),
        }
    }

    let added = state.log.extend(turns);
    info!("Hydrated {} turns from {} history entries", added, total);
    Ok(added)
}

/// Every stored turn paired with what the renderer should show for it
pub fn transcript(state: &ChatState) -> Vec<TranscriptEntry> {
    state
        .log
        .all_turns()
        .into_iter()
        .map(|turn| {
            let rendered = match turn.role {
                TurnRole::User => DecodedResponse::Freeform { text: turn.text.clone() },
                TurnRole::Assistant => state.decoder.decode(&turn.text),
            };
            TranscriptEntry { turn, rendered }
        })
        .collect()
}

/// End of session: forget the conversation
pub fn logout(state: &ChatState) {
    state.log.clear();
}
