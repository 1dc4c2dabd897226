//! Shared types for the front-of-house suite
//!
//! Domain entities, their status enums and create payloads, plus the
//! id/time utilities every crate stamps entities with.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
