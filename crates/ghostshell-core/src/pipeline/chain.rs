//! Ordered transformer chains.
//!
//! A [`TransformerChain`] is a left-to-right fold of a value through every
//! registered [`Transformer`]. The same machinery shapes outbound messages
//! (`TransformerChain<Message>`) and inbound results
//! (`TransformerChain<CompletionResult>`).

use std::fmt;
use std::sync::Arc;

use ghostshell_types::error::TransformError;

/// A named function from `T` to `T`.
///
/// Transformers are expected to be deterministic. A failure aborts the
/// whole chain and reaches the caller as-is.
pub trait Transformer<T>: Send + Sync {
    /// Name used in logs and in [`TransformError`]s.
    fn name(&self) -> &str;

    fn transform(&self, value: T) -> Result<T, TransformError>;
}

impl<T, X> Transformer<T> for Arc<X>
where
    X: Transformer<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transform(&self, value: T) -> Result<T, TransformError> {
        (**self).transform(value)
    }
}

/// A closure tagged with a name.
pub struct FnTransformer<F> {
    name: String,
    f: F,
}

impl<F> FnTransformer<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<T, F> Transformer<T> for FnTransformer<F>
where
    F: Fn(T) -> Result<T, TransformError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, value: T) -> Result<T, TransformError> {
        (self.f)(value)
    }
}

/// Ordered sequence of transformers, applied in registration order.
pub struct TransformerChain<T> {
    transformers: Vec<Box<dyn Transformer<T>>>,
}

impl<T> TransformerChain<T> {
    /// An empty chain, which is the identity.
    pub fn new() -> Self {
        Self {
            transformers: Vec::new(),
        }
    }

    /// Append a transformer to the end of the chain. No dedup.
    pub fn register(&mut self, transformer: impl Transformer<T> + 'static) {
        self.transformers.push(Box::new(transformer));
    }

    /// Append an infallible closure under the given name.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        T: 'static,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.register(FnTransformer::new(name, move |value: T| {
            Ok::<T, TransformError>(f(value))
        }));
    }

    /// Append a fallible closure under the given name.
    pub fn register_try_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        T: 'static,
        F: Fn(T) -> Result<T, TransformError> + Send + Sync + 'static,
    {
        self.register(FnTransformer::new(name, f));
    }

    /// Fold `value` through every transformer in order.
    ///
    /// Stops at the first failure; later transformers never see the value.
    pub fn apply(&self, value: T) -> Result<T, TransformError> {
        self.transformers
            .iter()
            .try_fold(value, |acc, transformer| {
                tracing::trace!(transformer = transformer.name(), "applying transformer");
                transformer.transform(acc)
            })
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Transformer names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }
}

impl<T> Default for TransformerChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TransformerChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerChain")
            .field("transformers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostshell_types::llm::{CompletionResult, Message};

    #[test]
    fn test_empty_chain_is_identity() {
        let chain: TransformerChain<Message> = TransformerChain::new();
        let msg = Message::user("unchanged");
        assert!(chain.is_empty());
        assert_eq!(chain.apply(msg.clone()).unwrap(), msg);
    }

    #[test]
    fn test_chain_applies_in_registration_order() {
        let mut chain: TransformerChain<String> = TransformerChain::new();
        chain.register_fn("append_a", |s: String| s + "a");
        chain.register_fn("append_b", |s: String| s + "b");
        chain.register_fn("wrap", |s: String| format!("[{s}]"));

        // wrap(append_b(append_a(x)))
        assert_eq!(chain.apply("x".to_string()).unwrap(), "[xab]");
        assert_eq!(chain.names(), vec!["append_a", "append_b", "wrap"]);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let mut chain: TransformerChain<u32> = TransformerChain::new();
        chain.register_fn("double", |n| n * 2);
        chain.register_fn("double", |n| n * 2);
        assert_eq!(chain.apply(3).unwrap(), 12);
    }

    #[test]
    fn test_failure_stops_the_fold() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let after_failure = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&after_failure);

        let mut chain: TransformerChain<Message> = TransformerChain::new();
        chain.register_try_fn("reject_empty", |m: Message| {
            if m.content.is_empty() {
                Err(TransformError::new("reject_empty", "empty message"))
            } else {
                Ok(m)
            }
        });
        chain.register_fn("count", move |m| {
            counter.fetch_add(1, Ordering::SeqCst);
            m
        });

        let err = chain.apply(Message::user("")).unwrap_err();
        assert_eq!(err.transformer, "reject_empty");
        assert_eq!(after_failure.load(Ordering::SeqCst), 0);

        chain.apply(Message::user("ok")).unwrap();
        assert_eq!(after_failure.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_result_chain() {
        let mut chain: TransformerChain<CompletionResult> = TransformerChain::new();
        chain.register_fn("trim", |mut r: CompletionResult| {
            r.content = r.content.trim().to_string();
            r
        });
        let out = chain.apply(CompletionResult::text("  padded \n")).unwrap();
        assert_eq!(out.content, "padded");
    }

    #[test]
    fn test_shared_transformer_via_arc() {
        let shared: Arc<dyn Transformer<u32>> =
            Arc::new(FnTransformer::new("inc", |n: u32| Ok::<_, TransformError>(n + 1)));

        let mut first: TransformerChain<u32> = TransformerChain::new();
        let mut second: TransformerChain<u32> = TransformerChain::new();
        first.register(Arc::clone(&shared));
        second.register(shared);

        assert_eq!(first.apply(1).unwrap(), 2);
        assert_eq!(second.names(), vec!["inc"]);
    }

    #[test]
    fn test_debug_lists_names() {
        let mut chain: TransformerChain<u32> = TransformerChain::new();
        chain.register_fn("noop", |n| n);
        assert_eq!(format!("{chain:?}"), "TransformerChain { transformers: [\"noop\"] }");
    }
}
