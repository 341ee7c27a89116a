/// Conversation log and history hydration tests
///
/// Covers the request/response pairing in the log, failure placeholders,
/// login-time hydration from both history shapes, and logout.
use serde_json::json;

use smartchat_core::models::{DecodedResponse, FailedReply, NewTurn, TurnRole};
use smartchat_core::services::chat_service;
use smartchat_core::{ChatState, ConversationLog, TurnNormalizer};

#[test]
fn test_log_returns_turns_in_insertion_order() {
    let log = ConversationLog::new();
    for i in 0..5 {
        log.append(NewTurn::user(format!("q{}", i)));
    }

    let turns = log.all_turns();
    assert_eq!(turns.len(), 5);
    assert_eq!(
        turns.iter().map(|t| t.text.as_str()).collect::<Vec<_>>(),
        vec!["q0", "q1", "q2", "q3", "q4"]
    );
    assert!(turns.windows(2).all(|w| w[0].sequence < w[1].sequence));
}

#[test]
fn test_clear_empties_log() {
    let log = ConversationLog::new();
    log.append(NewTurn::user("q"));
    log.append(NewTurn::assistant("r"));

    log.clear();
    assert!(log.all_turns().is_empty());
}

#[test]
fn test_clones_share_one_log() {
    let log = ConversationLog::new();
    let other = log.clone();

    other.append(NewTurn::user("from clone"));
    assert_eq!(log.len(), 1);
}

#[test]
fn test_normalizer_examples() {
    let normalizer = TurnNormalizer::default();

    assert_eq!(normalizer.normalize("You: Hello"), NewTurn::user("Hello"));
    assert_eq!(normalizer.normalize("Bot: Hi"), NewTurn::assistant("Hi"));
}

#[test]
fn test_hydrate_record_shape() {
    let state = ChatState::default();
    let payload = json!([{ "id": 1718000000000u64, "userQuery": "Q", "botReply": "R" }]);

    let added = chat_service::hydrate_history(&state, &payload.to_string()).unwrap();

    assert_eq!(added, 2);
    let turns = state.log.all_turns();
    assert_eq!((turns[0].role, turns[0].text.as_str()), (TurnRole::User, "Q"));
    assert_eq!((turns[1].role, turns[1].text.as_str()), (TurnRole::Assistant, "R"));
}

#[test]
fn test_hydrate_mixed_shapes() {
    let state = ChatState::default();
    let payload = json!([
        "You: What is AAPL at?",
        "Bot: ❌ Error: timeout",
        { "userQuery": "Recommend me stocks", "botReply": "**Your Portfolio**\nrisk: high\n**Top 5 Recommended Stocks:**\n- **NVDA**" },
        { "query": "pending question" }
    ]);

    let added = chat_service::hydrate_history(&state, &payload.to_string()).unwrap();
    assert_eq!(added, 5);

    let entries = chat_service::transcript(&state);
    assert_eq!(entries[1].turn.text, "❌ Error: timeout");
    assert_eq!(entries[3].rendered.recommendation_lines(), ["NVDA"]);
    assert_eq!(entries[4].turn.role, TurnRole::User);
}

#[test]
fn test_failed_requests_still_pair_with_question() {
    let state = ChatState::default();

    chat_service::record_failure(&state, "a", FailedReply::InvalidFormat);
    chat_service::record_failure(&state, "b", FailedReply::FetchFailed);
    chat_service::record_failure(&state, "c", FailedReply::RequestError("dns".to_string()));

    let replies: Vec<_> = state
        .log
        .all_turns()
        .into_iter()
        .filter(|t| t.role == TurnRole::Assistant)
        .map(|t| t.text)
        .collect();

    assert_eq!(
        replies,
        vec![
            "❌ Invalid reply format.",
            "❌ Failed to fetch response.",
            "❌ Error: dns",
        ]
    );
}

#[test]
fn test_placeholders_render_as_plain_text() {
    let state = ChatState::default();
    chat_service::record_failure(&state, "q", FailedReply::FetchFailed);

    let entries = chat_service::transcript(&state);
    assert_eq!(
        entries[1].rendered,
        DecodedResponse::Freeform { text: "❌ Failed to fetch response.".to_string() }
    );
}

#[test]
fn test_logout_then_new_session() {
    let state = ChatState::default();
    chat_service::record_exchange(&state, "q1", "r1");

    chat_service::logout(&state);
    assert!(state.log.is_empty());

    chat_service::record_exchange(&state, "q2", "r2");
    let turns = state.log.all_turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].text, "q2");
}

#[test]
fn test_pending_question_answered_once() {
    let state = ChatState::default();
    chat_service::record_pending(&state, "Can you recommend me some stocks?");

    let decoded = chat_service::record_reply(
        &state,
        "**Your Portfolio**\nrisk: high\n**Top 5 Recommended Stocks:**\n- **NVDA**",
    )
    .unwrap();
    assert_eq!(decoded.recommendation_lines(), ["NVDA"]);
    assert!(chat_service::record_reply(&state, "late duplicate").is_err());

    let entries = chat_service::transcript(&state);
    assert_eq!(
        entries.iter().map(|e| e.turn.role).collect::<Vec<_>>(),
        vec![TurnRole::User, TurnRole::Assistant]
    );
    assert!(entries[1].rendered.is_structured());
}
