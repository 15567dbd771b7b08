//! Conversation core for Ghostshell.
//!
//! This crate holds everything between a caller and a completion provider:
//! ordered transformer chains, the append-only conversation log, the `Ghost`
//! orchestrator that talks to the provider, and the `Shell` that routes
//! messages through named channels. It depends only on `ghostshell-types`;
//! concrete providers live in `ghostshell-infra`.

pub mod agent;
pub mod conversation;
pub mod llm;
pub mod pipeline;
