//! Session-local conversation state.
//!
//! `ConversationState` is the append-only message log of one session plus
//! its `ScratchStore` of auxiliary facts. Nothing here is persisted.

pub mod scratch;
pub mod state;

pub use scratch::ScratchStore;
pub use state::ConversationState;
