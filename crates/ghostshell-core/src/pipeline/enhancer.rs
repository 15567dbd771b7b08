//! Context enhancers and their name-indexed registry.
//!
//! An enhancer is any `Transformer<Message>` the `Shell` runs on every
//! inbound message regardless of channel. The built-in variants are
//! pass-through placeholders for retrieval, web search and long-term memory;
//! a real implementation replaces one by registering a different transformer
//! under the same name.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ghostshell_types::error::TransformError;
use ghostshell_types::llm::Message;

use super::chain::Transformer;

/// Built-in enhancer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinEnhancer {
    Rag,
    WebSearch,
    PersistentMemory,
}

impl BuiltinEnhancer {
    pub const ALL: [BuiltinEnhancer; 3] = [
        BuiltinEnhancer::Rag,
        BuiltinEnhancer::WebSearch,
        BuiltinEnhancer::PersistentMemory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinEnhancer::Rag => "rag",
            BuiltinEnhancer::WebSearch => "web_search",
            BuiltinEnhancer::PersistentMemory => "persistent_memory",
        }
    }
}

impl fmt::Display for BuiltinEnhancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinEnhancer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rag" => Ok(BuiltinEnhancer::Rag),
            "web_search" => Ok(BuiltinEnhancer::WebSearch),
            "persistent_memory" => Ok(BuiltinEnhancer::PersistentMemory),
            other => Err(format!("unknown enhancer: '{other}'")),
        }
    }
}

impl Transformer<Message> for BuiltinEnhancer {
    fn name(&self) -> &str {
        self.as_str()
    }

    // No backing store yet; every variant returns the message untouched.
    fn transform(&self, message: Message) -> Result<Message, TransformError> {
        tracing::trace!(enhancer = self.as_str(), "enhancer pass-through");
        Ok(message)
    }
}

/// Shared, type-erased enhancer.
pub type SharedEnhancer = Arc<dyn Transformer<Message>>;

/// Registry of available enhancers, indexed by name.
///
/// Used at startup to turn configured enhancer names into transformers.
pub struct EnhancerRegistry {
    enhancers: HashMap<String, SharedEnhancer>,
}

impl EnhancerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            enhancers: HashMap::new(),
        }
    }

    /// A registry pre-populated with every [`BuiltinEnhancer`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in BuiltinEnhancer::ALL {
            registry.register(builtin.as_str(), Arc::new(builtin));
        }
        registry
    }

    /// Register an enhancer under the given name.
    ///
    /// If an enhancer with this name already exists, it is replaced.
    pub fn register(&mut self, name: impl Into<String>, enhancer: SharedEnhancer) {
        self.enhancers.insert(name.into(), enhancer);
    }

    /// Look up an enhancer by name.
    pub fn get(&self, name: &str) -> Option<SharedEnhancer> {
        self.enhancers.get(name).cloned()
    }

    /// List all registered enhancer names, sorted.
    pub fn list_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.enhancers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for EnhancerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::chain::FnTransformer;

    #[test]
    fn test_builtin_roundtrip() {
        for builtin in BuiltinEnhancer::ALL {
            let parsed: BuiltinEnhancer = builtin.to_string().parse().unwrap();
            assert_eq!(parsed, builtin);
        }
        assert!("telepathy".parse::<BuiltinEnhancer>().is_err());
    }

    #[test]
    fn test_builtins_pass_through() {
        let msg = Message::user("what's new?");
        for builtin in BuiltinEnhancer::ALL {
            assert_eq!(builtin.transform(msg.clone()).unwrap(), msg);
        }
    }

    #[test]
    fn test_registry_with_builtins() {
        let registry = EnhancerRegistry::with_builtins();
        assert_eq!(
            registry.list_names(),
            vec!["persistent_memory", "rag", "web_search"]
        );
        let rag = registry.get("rag").unwrap();
        assert_eq!(rag.name(), "rag");
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_registry_replaces_by_name() {
        let mut registry = EnhancerRegistry::with_builtins();
        registry.register(
            "rag",
            Arc::new(FnTransformer::new("rag", |mut m: Message| {
                m.content.push_str("\n[retrieved: nothing]");
                Ok::<_, TransformError>(m)
            })),
        );

        let rag = registry.get("rag").unwrap();
        let out = rag.transform(Message::user("q")).unwrap();
        assert_eq!(out.content, "q\n[retrieved: nothing]");
        assert_eq!(registry.list_names().len(), 3);
    }
}
