//! Ordered prompt context.
//!
//! A `PromptContext` is a list of `key: value` facts that the `Ghost` renders
//! into a single system message ahead of the conversation history. Entries
//! keep their insertion order, which is also the order they are rendered in.

use ghostshell_types::llm::Message;

/// Insertion-ordered mapping of context keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    entries: Vec<(String, String)>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    ///
    /// An existing key keeps its position and only has its value replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `key: value` lines joined by `\n`, in insertion order.
    pub fn render(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The rendered context as a system message, or `None` when empty.
    pub fn to_system_message(&self) -> Option<Message> {
        if self.is_empty() {
            None
        } else {
            Some(Message::system(self.render()))
        }
    }
}

impl<K, V> FromIterator<(K, V)> for PromptContext
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = PromptContext::new();
        for (k, v) in iter {
            context.insert(k, v);
        }
        context
    }
}
