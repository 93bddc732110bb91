//! Repository implementations.
//!
//! - `local`: in-memory store for development and tests
pub mod local;

pub use local::{LocalRepository, DEFAULT_MAX_SESSIONS};
