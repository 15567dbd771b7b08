//! Shared domain types for Ghostshell.
//!
//! Plain data shapes used across the workspace: chat messages, completion
//! results, provider configuration, and the error enums every layer returns.
//! This crate has no IO and no async code.

pub mod config;
pub mod error;
pub mod llm;
