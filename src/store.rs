//! Connection persistence
//!
//! The active session and a small most-recently-used history of past
//! logins live as JSON in the platform config directory, behind a small
//! repository trait so session flows can run against an in-memory store
//! in tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{SortKey, SortOrder};

/// Upper bound on remembered logins
pub const HISTORY_LIMIT: usize = 5;

/// One saved server login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    pub username: String,
    pub token: String,
    /// Display label; falls back to the URL when left blank
    #[serde(default)]
    pub server_name: String,
}

impl ServerConfig {
    /// History identity: one slot per (url, username) pair
    pub fn same_identity(&self, other: &ServerConfig) -> bool {
        self.url == other.url && self.username == other.username
    }

    pub fn display_name(&self) -> &str {
        if self.server_name.is_empty() {
            &self.url
        } else {
            &self.server_name
        }
    }
}

/// Active connection plus login history, as persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connections {
    #[serde(default)]
    pub active: Option<ServerConfig>,
    #[serde(default)]
    pub history: Vec<ServerConfig>,
}

impl Connections {
    /// Record a successful login
    ///
    /// The login becomes the active connection. An existing history slot
    /// with the same (url, username) is replaced where it stands; a new
    /// identity is inserted at the front and the oldest entry beyond the
    /// cap falls off the end.
    pub fn remember(&mut self, config: ServerConfig) {
        if let Some(slot) = self.history.iter_mut().find(|c| c.same_identity(&config)) {
            *slot = config.clone();
        } else {
            self.history.insert(0, config.clone());
            self.history.truncate(HISTORY_LIMIT);
        }
        self.active = Some(config);
    }

    /// Drop the active session; history is retained
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Remove one history entry by position
    pub fn evict(&mut self, index: usize) -> Option<ServerConfig> {
        if index >= self.history.len() {
            return None;
        }
        Some(self.history.remove(index))
    }
}

/// Listing presentation settings, persisted across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub folders_first: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            sort_key: SortKey::Name,
            sort_order: SortOrder::Ascending,
            folders_first: true,
        }
    }
}

/// Persistence seam for session state
///
/// `load` and `save` are the primitive operations; `list` and `evict`
/// ride on top of them so callers and tests see one surface.
pub trait SessionStore {
    fn load(&self) -> Result<Connections>;
    fn save(&self, connections: &Connections) -> Result<()>;
    fn load_preferences(&self) -> Result<Preferences>;
    fn save_preferences(&self, preferences: &Preferences) -> Result<()>;

    fn list(&self) -> Result<Vec<ServerConfig>> {
        Ok(self.load()?.history)
    }

    fn evict(&self, index: usize) -> Result<Option<ServerConfig>> {
        let mut connections = self.load()?;
        let removed = connections.evict(index);
        if removed.is_some() {
            self.save(&connections)?;
        }
        Ok(removed)
    }
}

/// JSON files under the platform config directory
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new() -> Result<Self> {
        let dir = dirs::config_dir()
            .context("could not determine config directory")?
            .join("alistui");
        Ok(Self { dir })
    }

    /// Store rooted at an explicit directory
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn connections_path(&self) -> PathBuf {
        self.dir.join("connections.json")
    }

    fn preferences_path(&self) -> PathBuf {
        self.dir.join("preferences.json")
    }

    /// A missing or corrupt file loads as the default state; losing saved
    /// logins beats refusing to start
    fn read_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(path, raw).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<Connections> {
        Ok(Self::read_or_default(&self.connections_path()))
    }

    fn save(&self, connections: &Connections) -> Result<()> {
        self.write_json(&self.connections_path(), connections)
    }

    fn load_preferences(&self) -> Result<Preferences> {
        Ok(Self::read_or_default(&self.preferences_path()))
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        self.write_json(&self.preferences_path(), preferences)
    }
}

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    connections: Mutex<Connections>,
    preferences: Mutex<Preferences>,
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Connections> {
        let guard = self
            .connections
            .lock()
            .map_err(|_| anyhow::anyhow!("connection store lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, connections: &Connections) -> Result<()> {
        let mut guard = self
            .connections
            .lock()
            .map_err(|_| anyhow::anyhow!("connection store lock poisoned"))?;
        *guard = connections.clone();
        Ok(())
    }

    fn load_preferences(&self) -> Result<Preferences> {
        let guard = self
            .preferences
            .lock()
            .map_err(|_| anyhow::anyhow!("preferences lock poisoned"))?;
        Ok(*guard)
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<()> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|_| anyhow::anyhow!("preferences lock poisoned"))?;
        *guard = *preferences;
        Ok(())
    }
}
