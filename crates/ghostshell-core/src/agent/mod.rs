//! Session agents.
//!
//! - `Ghost`: owns history and scratch state, talks to the provider
//! - `Shell`: routes inbound messages through channel ports into a `Ghost`
//! - `PromptContext`: ordered facts rendered into a leading system message

pub mod context;
pub mod ghost;
pub mod shell;

pub use context::PromptContext;
pub use ghost::Ghost;
pub use shell::{DEFAULT_CHANNEL, Shell};
