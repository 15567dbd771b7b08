//! Append-only conversation log.

use ghostshell_types::llm::Message;
use serde_json::Value;

use super::scratch::ScratchStore;

/// Ordered message history of one session plus its scratch store.
///
/// Messages are only ever appended; the sole way to shrink the log is
/// [`ConversationState::clear`], which leaves scratch entries alone.
/// History is handed out as owned snapshots so callers can never edit
/// past entries in place.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    scratch: ScratchStore,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing scratch store (e.g., facts gathered before the session).
    pub fn with_scratch(scratch: ScratchStore) -> Self {
        Self {
            messages: Vec::new(),
            scratch,
        }
    }

    /// Add a message to the tail of the log.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Owned copy of the log in conversation order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Drop every message. Scratch entries are kept.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.scratch.set(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.scratch.get(key)
    }

    pub fn scratch(&self) -> &ScratchStore {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut ScratchStore {
        &mut self.scratch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostshell_types::llm::MessageRole;
    use serde_json::json;

    #[test]
    fn test_append_grows_by_one() {
        let mut state = ConversationState::new();
        for i in 0..5 {
            assert_eq!(state.len(), i);
            state.append(Message::user(format!("m{i}")));
            assert_eq!(state.snapshot().len(), i + 1);
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut state = ConversationState::new();
        state.append(Message::system("rules"));
        state.append(Message::user("hi"));
        state.append(Message::assistant("hello"));

        let roles: Vec<MessageRole> = state.snapshot().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::User, MessageRole::Assistant]
        );
        assert_eq!(state.last().unwrap().content, "hello");
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut state = ConversationState::new();
        state.append(Message::user("original"));

        let mut copy = state.snapshot();
        copy[0].content = "tampered".to_string();
        copy.push(Message::assistant("injected"));
        copy.clear();

        let fresh = state.snapshot();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].content, "original");
    }

    #[test]
    fn test_clear_keeps_scratch() {
        let mut state = ConversationState::new();
        state.append(Message::user("a"));
        state.append(Message::assistant("b"));
        state.set("name", "Ada");

        state.clear();

        assert!(state.is_empty());
        assert!(state.last().is_none());
        assert_eq!(state.get("name"), Some(&json!("Ada")));
    }

    #[test]
    fn test_scratch_lookup_miss_is_none() {
        let mut state = ConversationState::new();
        state.set("k", "v");
        assert_eq!(state.get("k"), Some(&json!("v")));
        assert!(state.get("missing").is_none());
    }

    #[test]
    fn test_with_scratch_seeds_store() {
        let mut scratch = ScratchStore::new();
        scratch.set("timezone", "UTC");
        let state = ConversationState::with_scratch(scratch);
        assert!(state.is_empty());
        assert_eq!(state.scratch().len(), 1);
        assert_eq!(state.get("timezone"), Some(&json!("UTC")));
    }
}
