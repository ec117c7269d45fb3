//! AList/OpenList terminal client
//!
//! The browser state, gesture recognition and server client live here so
//! integration tests can drive them without a terminal; the binary in
//! `main.rs` only wires the event loop together.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

pub mod api;
pub mod app;
pub mod config;
pub mod gesture;
pub mod handlers;
pub mod logic;
pub mod model;
pub mod services;
pub mod store;
pub mod ui;
pub mod utils;

static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_debug(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

/// Append a line to the debug log in the temp dir
///
/// The TUI owns stdout, so diagnostics go to a file; a no-op unless the
/// --debug flag was given.
pub fn log_debug(msg: &str) {
    if !DEBUG_MODE.load(Ordering::Relaxed) {
        return;
    }
    use std::fs::OpenOptions;
    use std::io::Write;
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(utils::get_debug_log_path())
    {
        let _ = writeln!(file, "{}", msg);
    }
}

/// Sort key for file listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,     // Natural name order (case-insensitive, numeric-aware)
    Size,     // Byte size, missing sizes sort as 0
    Modified, // Server-reported modification time
}

impl SortKey {
    pub fn as_str(&self) -> &str {
        match self {
            SortKey::Name => "Name",
            SortKey::Size => "Size",
            SortKey::Modified => "Modified",
        }
    }

    /// Cycle to the next key: Name -> Size -> Modified -> Name
    pub fn next(&self) -> SortKey {
        match self {
            SortKey::Name => SortKey::Size,
            SortKey::Size => SortKey::Modified,
            SortKey::Modified => SortKey::Name,
        }
    }
}

/// Sort direction for file listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(&self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(&self) -> char {
        match self {
            SortOrder::Ascending => '↑',
            SortOrder::Descending => '↓',
        }
    }
}
