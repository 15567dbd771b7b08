//! Key-value scratch space for facts that are not part of the message log.

use std::collections::HashMap;

use serde_json::Value;

/// Session-local key-value store.
///
/// Plain map semantics: `set` overwrites, `get` on a missing key is `None`,
/// nothing is ever evicted implicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScratchStore {
    entries: HashMap<String, Value>,
}

impl ScratchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, returning the previous value if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_then_get() {
        let mut store = ScratchStore::new();
        assert!(store.set("k", "v").is_none());
        assert_eq!(store.get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = ScratchStore::new();
        assert!(store.get("missing").is_none());
        assert!(!store.contains_key("missing"));
    }

    #[test]
    fn test_set_overwrites_and_returns_previous() {
        let mut store = ScratchStore::new();
        store.set("turns", 1);
        let previous = store.set("turns", 2);
        assert_eq!(previous, Some(json!(1)));
        assert_eq!(store.get("turns"), Some(&json!(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_arbitrary_values() {
        let mut store = ScratchStore::new();
        store.set("profile", json!({"name": "Ada", "langs": ["en", "fr"]}));
        store.set("flag", true);
        assert_eq!(store.get("profile").unwrap()["langs"][1], "fr");
        assert_eq!(store.keys(), vec!["flag", "profile"]);
    }

    #[test]
    fn test_remove() {
        let mut store = ScratchStore::new();
        store.set("k", "v");
        assert_eq!(store.remove("k"), Some(json!("v")));
        assert!(store.is_empty());
        assert!(store.remove("k").is_none());
    }
}
