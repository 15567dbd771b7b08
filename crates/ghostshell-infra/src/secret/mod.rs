//! API key resolution.

pub mod env;

pub use env::{API_KEY_ENV, resolve_api_key};
