//! Application configuration (config.yaml)
//!
//! Everything here is an optional knob; the app runs fine with no config
//! file at all because the connect screen collects the server details.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pre-fill for the server URL field on the connect screen
    pub server: Option<String>,
    /// Page size for directory listings; 0 fetches everything in one page
    pub per_page: u64,
    pub request_timeout_secs: u64,
    /// Where downloads land; platform download directory when unset
    pub download_dir: Option<String>,
    /// External player for video previews (e.g. "mpv")
    pub player_command: Option<String>,
    /// Opener for PDFs and other handed-off files; platform default when unset
    pub open_command: Option<String>,
    /// Clipboard writer (e.g. "wl-copy", "xclip -selection clipboard")
    pub clipboard_command: Option<String>,
    /// Mouse capture, needed for the touch-style gestures
    pub mouse: bool,
    /// Render image previews in the terminal
    pub image_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: None,
            per_page: 0,
            request_timeout_secs: crate::api::DEFAULT_TIMEOUT_SECS,
            download_dir: None,
            player_command: None,
            open_command: None,
            clipboard_command: None,
            mouse: true,
            image_preview: true,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Directory where downloaded files are written
    pub fn download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.download_dir {
            if let Some(rest) = dir.strip_prefix("~/") {
                if let Some(home) = dirs::home_dir() {
                    return home.join(rest);
                }
            }
            return PathBuf::from(dir);
        }
        dirs::download_dir().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("player_command: mpv\nper_page: 200\n").unwrap();
        assert_eq!(config.player_command.as_deref(), Some("mpv"));
        assert_eq!(config.per_page, 200);
        assert_eq!(config.request_timeout_secs, 20);
        assert!(config.mouse);
        assert!(config.server.is_none());
    }

    #[test]
    fn test_timeout_never_zero() {
        let config: Config = serde_yaml::from_str("request_timeout_secs: 0\n").unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_download_dir_expands_home() {
        let config: Config = serde_yaml::from_str("download_dir: \"~/incoming\"\n").unwrap();
        let dir = config.download_dir();
        assert!(dir.ends_with("incoming"));
        if dirs::home_dir().is_some() {
            assert!(!dir.starts_with("~"));
        }
    }
}
