//! File operation methods
//!
//! User actions on listed entries and external commands:
//! - Delete entries (single or multi-select)
//! - Download file bodies into the local download directory
//! - Collect direct links and hand them to the clipboard command
//! - Upload a local file into the current directory

use std::io::Write;
use std::path::PathBuf;

use crate::app::App;
use crate::log_debug;
use crate::model::{ConfirmAction, InputPrompt};
use crate::services::fetch::{spawn_delete, spawn_downloads, spawn_link_collection, spawn_upload};

impl App {
    /// Names an action applies to: the selection when selection mode is
    /// on, otherwise the entry under the cursor
    pub(crate) fn action_targets(&self) -> Vec<String> {
        if self.model.listing.selection_mode {
            return self.model.listing.selected_names();
        }
        self.visible_entries()
            .get(self.model.listing.cursor)
            .map(|e| vec![e.name.clone()])
            .unwrap_or_default()
    }

    /// Like action_targets, but rejects directories: download and
    /// copy-link work on file bodies only
    fn file_action_targets(&mut self) -> Option<Vec<String>> {
        if self.model.listing.selection_mode {
            if !self.model.listing.selection_supports_file_actions() {
                self.model
                    .show_toast("Error: selection contains a directory");
                return None;
            }
            return Some(self.model.listing.selected_names());
        }
        let visible = self.visible_entries();
        let entry = visible.get(self.model.listing.cursor)?;
        if entry.is_dir {
            self.model.show_toast("Error: not a file");
            return None;
        }
        Some(vec![entry.name.clone()])
    }

    pub(crate) fn request_delete(&mut self) {
        let names = self.action_targets();
        if names.is_empty() {
            return;
        }
        self.model.ui.confirm = Some(ConfirmAction::DeleteEntries {
            dir: self.model.listing.path.clone(),
            names,
        });
    }

    pub(crate) fn delete_entries(&mut self, dir: String, names: Vec<String>) {
        let Some(client) = self.client.clone() else {
            return;
        };
        log_debug(&format!("delete: {} names in {}", names.len(), dir));
        spawn_delete(self.api_tx.clone(), client, dir, names);
    }

    pub(crate) fn start_download(&mut self) {
        let Some(names) = self.file_action_targets() else {
            return;
        };
        let Some(client) = self.client.clone() else {
            return;
        };
        let dest = self.config.download_dir();
        self.model
            .show_toast(format!("Downloading {} file(s)…", names.len()));
        spawn_downloads(
            self.api_tx.clone(),
            client,
            self.model.listing.path.clone(),
            names,
            dest,
        );
    }

    pub(crate) fn start_copy_links(&mut self) {
        let Some(names) = self.file_action_targets() else {
            return;
        };
        let Some(client) = self.client.clone() else {
            return;
        };
        self.collected_links.clear();
        self.model
            .show_toast(format!("Resolving {} link(s)…", names.len()));
        spawn_link_collection(
            self.api_tx.clone(),
            client,
            self.model.listing.path.clone(),
            names,
        );
    }

    pub(crate) fn prompt_upload(&mut self) {
        self.model.ui.prompt = Some(InputPrompt::UploadPath {
            value: String::new(),
        });
    }

    pub(crate) fn start_upload(&mut self, input: String) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let input = input.trim();
        if input.is_empty() {
            return;
        }
        let local = expand_home(input);
        if !local.is_file() {
            self.model
                .show_toast(format!("Error: not a file: {}", local.display()));
            return;
        }
        self.model.show_toast(format!("Uploading {}…", local.display()));
        spawn_upload(
            self.api_tx.clone(),
            client,
            self.model.listing.path.clone(),
            local,
        );
    }

    /// Send text to the configured clipboard command over stdin
    pub(crate) fn copy_to_clipboard(&mut self, text: &str) {
        let Some(clipboard_cmd) = self.config.clipboard_command.clone() else {
            self.model
                .show_toast("Error: clipboard_command not configured");
            return;
        };

        let mut parts = clipboard_cmd.split_whitespace();
        let Some(program) = parts.next() else {
            self.model
                .show_toast("Error: clipboard_command not configured");
            return;
        };
        let args: Vec<&str> = parts.collect();

        // Spawn in background and write to stdin without waiting
        let result = std::process::Command::new(program)
            .args(&args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()
            .and_then(|mut child| {
                if let Some(mut stdin) = child.stdin.take() {
                    stdin.write_all(text.as_bytes())?;
                    // Close stdin to signal EOF
                    drop(stdin);
                }
                Ok(())
            });

        match result {
            Ok(_) => {
                log_debug(&format!("clipboard: wrote {} bytes", text.len()));
                self.model.show_toast("Copied to clipboard");
            }
            Err(e) => {
                log_debug(&format!("clipboard command '{}' failed: {}", clipboard_cmd, e));
                self.model
                    .show_toast(format!("Error: clipboard command failed: {}", e));
            }
        }
    }
}

fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}
