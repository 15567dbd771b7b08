//! Infrastructure for Ghostshell.
//!
//! Concrete [`LlmProvider`](ghostshell_core::llm::provider::LlmProvider)
//! implementations, the `config.toml` loader, and API key resolution.

pub mod config;
pub mod llm;
pub mod secret;
