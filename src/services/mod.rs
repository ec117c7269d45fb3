//! External Services
//!
//! This module contains services that interact with external systems:
//! - fetch: Background server calls reporting over a channel

pub mod fetch;

// Re-export commonly used types for convenience
pub use fetch::{ApiResponse, BatchKind, PreviewPayload};
