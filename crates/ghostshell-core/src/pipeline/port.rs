//! Named channel endpoints.
//!
//! A port is a channel name plus the chain that runs for that channel.
//! `InputPort`s shape user messages before they enter history; `OutputPort`s
//! shape completion results on request.

use ghostshell_types::error::TransformError;
use ghostshell_types::llm::{CompletionResult, Message};

use super::chain::{Transformer, TransformerChain};

/// A named channel and its transformer chain.
#[derive(Debug)]
pub struct Port<T> {
    name: String,
    chain: TransformerChain<T>,
}

/// Port applied to inbound messages.
pub type InputPort = Port<Message>;

/// Port applied to completion results.
pub type OutputPort = Port<CompletionResult>;

impl<T> Port<T> {
    /// A port with an empty chain.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain: TransformerChain::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chain(&self) -> &TransformerChain<T> {
        &self.chain
    }

    pub fn add(&mut self, transformer: impl Transformer<T> + 'static) {
        self.chain.register(transformer);
    }

    /// Builder form of [`Port::add`] for infallible closures.
    pub fn with_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        T: 'static,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.chain.register_fn(name, f);
        self
    }

    /// Builder form of [`Port::add`] for fallible closures.
    pub fn with_try_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        T: 'static,
        F: Fn(T) -> Result<T, TransformError> + Send + Sync + 'static,
    {
        self.chain.register_try_fn(name, f);
        self
    }

    /// Run the port's chain on `value`.
    pub fn process(&self, value: T) -> Result<T, TransformError> {
        self.chain.apply(value)
    }
}
