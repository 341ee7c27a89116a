use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{ConversationTurn, NewTurn, TurnRole};

#[derive(Debug, Default)]
struct LogInner {
    turns: Vec<ConversationTurn>,
    ids: HashSet<Uuid>,
    next_sequence: u64,
}

impl LogInner {
    /// Store one turn with the next sequence number.
    ///
    /// A supplied id that is already taken in this session is replaced with a
    /// fresh one.
    fn push(&mut self, turn: NewTurn) -> ConversationTurn {
        let id = match turn.id {
            Some(id) if self.ids.contains(&id) => {
                warn!("Turn id {} already in the log, assigning a new one", id);
                Uuid::new_v4()
            }
            Some(id) => id,
            None => Uuid::new_v4(),
        };

        let stored = ConversationTurn {
            id,
            role: turn.role,
            text: turn.text,
            sequence: self.next_sequence,
            appended_at: Utc::now(),
        };
        self.next_sequence += 1;
        self.ids.insert(id);
        self.turns.push(stored.clone());
        stored
    }

    fn awaiting_reply(&self) -> bool {
        matches!(self.turns.last(), Some(turn) if turn.role == TurnRole::User)
    }
}

/// Append-only, in-memory record of the conversation.
///
/// Cloning is cheap and every clone shares the same turns. Appends take the
/// lock for the whole write, so concurrent callers never see a half-written
/// turn and sequence numbers stay strictly increasing. Turn ids are unique
/// until the log is cleared.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    inner: Arc<Mutex<LogInner>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a turn at the end of the log and return the stored copy
    pub fn append(&self, turn: NewTurn) -> ConversationTurn {
        let stored = self.inner.lock().push(turn);
        debug!("Appended {} turn #{} ({})", stored.role, stored.sequence, stored.id);
        stored
    }

    /// Append several turns under one lock, keeping their order
    pub fn extend<I>(&self, turns: I) -> usize
    where
        I: IntoIterator<Item = NewTurn>,
    {
        let mut inner = self.inner.lock();
        let first = inner.next_sequence;
        let mut added = 0;
        for turn in turns {
            inner.push(turn);
            added += 1;
        }
        drop(inner);

        if added > 0 {
            debug!("Appended {} turns starting at #{}", added, first);
        }
        added
    }

    /// Append an assistant reply only if the last turn is a user question
    /// still waiting for one. Returns `None` when there is nothing to answer.
    pub fn answer_pending(&self, text: impl Into<String>) -> Option<ConversationTurn> {
        let mut inner = self.inner.lock();
        if !inner.awaiting_reply() {
            return None;
        }
        let stored = inner.push(NewTurn::assistant(text));
        drop(inner);

        debug!("Answered pending question with turn #{}", stored.sequence);
        Some(stored)
    }

    /// Snapshot of the full history in display order
    pub fn all_turns(&self) -> Vec<ConversationTurn> {
        self.inner.lock().turns.clone()
    }

    /// The most recent turn, if any
    pub fn last(&self) -> Option<ConversationTurn> {
        self.inner.lock().turns.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().turns.is_empty()
    }

    /// Drop every turn. Sequence numbers keep counting from where they were.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let dropped = inner.turns.len();
        inner.turns.clear();
        inner.ids.clear();
        info!("Cleared conversation log ({} turns)", dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_sequence_and_id() {
        let log = ConversationLog::new();

        let first = log.append(NewTurn::user("hello"));
        let second = log.append(NewTurn::assistant("hi"));

        assert_eq!(first.sequence, 0);
        assert_eq!(second.sequence, 1);
        assert_ne!(first.id, second.id);
        assert_eq!(second.role, TurnRole::Assistant);
    }

    #[test]
    fn test_append_keeps_supplied_id() {
        let log = ConversationLog::new();
        let id = Uuid::new_v4();

        let stored = log.append(NewTurn::user("q").with_id(id));
        assert_eq!(stored.id, id);
    }

    #[test]
    fn test_duplicate_id_is_replaced() {
        let log = ConversationLog::new();
        let id = Uuid::new_v4();

        let first = log.append(NewTurn::user("q").with_id(id));
        let second = log.append(NewTurn::assistant("r").with_id(id));

        assert_eq!(first.id, id);
        assert_ne!(second.id, id);
    }

    #[test]
    fn test_ids_can_be_reused_after_clear() {
        let log = ConversationLog::new();
        let id = Uuid::new_v4();
        log.append(NewTurn::user("old session").with_id(id));

        log.clear();
        assert_eq!(log.append(NewTurn::user("new session").with_id(id)).id, id);
    }

    #[test]
    fn test_answer_pending_only_after_user_turn() {
        let log = ConversationLog::new();
        assert!(log.answer_pending("nothing asked").is_none());

        log.append(NewTurn::user("q"));
        let reply = log.answer_pending("r").unwrap();
        assert_eq!(reply.role, TurnRole::Assistant);
        assert_eq!(reply.sequence, 1);

        assert!(log.answer_pending("second reply").is_none());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let log = ConversationLog::new();
        log.append(NewTurn::user("q"));

        let mut snapshot = log.all_turns();
        snapshot.clear();
        snapshot.push(ConversationTurn {
            id: Uuid::new_v4(),
            role: TurnRole::Assistant,
            text: "forged".to_string(),
            sequence: 99,
            appended_at: Utc::now(),
        });

        let turns = log.all_turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text, "q");
    }

    #[test]
    fn test_clear_keeps_counting() {
        let log = ConversationLog::new();
        log.append(NewTurn::user("a"));
        log.append(NewTurn::user("b"));

        log.clear();
        assert!(log.is_empty());

        let next = log.append(NewTurn::user("c"));
        assert_eq!(next.sequence, 2);
    }

    #[test]
    fn test_extend_preserves_order() {
        let log = ConversationLog::new();
        let added = log.extend(vec![NewTurn::user("q"), NewTurn::assistant("r")]);

        assert_eq!(added, 2);
        let texts: Vec<_> = log.all_turns().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["q", "r"]);
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let log = ConversationLog::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for j in 0..50 {
                        log.append(NewTurn::user(format!("{}-{}", i, j)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let turns = log.all_turns();
        assert_eq!(turns.len(), 400);
        assert!(turns.windows(2).all(|w| w[0].sequence < w[1].sequence));
    }
}
