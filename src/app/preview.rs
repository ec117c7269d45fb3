//! Preview orchestration methods
//!
//! Opening a file shows a popup immediately and resolves the content in
//! the background. Text and images render inline; PDFs and videos are
//! handed to external programs because a terminal cannot show them.

use crate::api::{ApiError, FileDetail, FileEntry};
use crate::app::App;
use crate::log_debug;
use crate::logic::file_type::{preview_kind, PreviewKind};
use crate::logic::path;
use crate::model::{PreviewContent, PreviewState};
use crate::services::fetch::spawn_preview;
use crate::services::PreviewPayload;

impl App {
    /// Open the preview popup for a file and start fetching its content
    pub(crate) fn open_preview(&mut self, entry: &FileEntry) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let kind = preview_kind(&entry.name);
        let target = path::join(&self.model.listing.path, &entry.name);
        self.image_protocol = None;
        self.model.ui.preview = Some(PreviewState::loading(
            entry.name.clone(),
            target.clone(),
            kind,
            entry.size,
        ));
        spawn_preview(self.api_tx.clone(), client, target, kind);
    }

    pub(crate) fn close_preview(&mut self) {
        self.model.ui.preview = None;
        self.image_protocol = None;
    }

    /// Install the result of a preview fetch, unless the popup has moved
    /// on to a different file in the meantime
    pub(crate) fn apply_preview(
        &mut self,
        path: String,
        result: Result<(FileDetail, PreviewPayload), ApiError>,
    ) {
        let open_path = match &self.model.ui.preview {
            Some(preview) => preview.path.clone(),
            None => return,
        };
        if open_path != path {
            log_debug(&format!("preview: stale result for {}", path));
            return;
        }

        let (detail, payload) = match result {
            Ok(pair) => pair,
            Err(e) => {
                if e.is_auth() {
                    self.force_logout(format!("Session expired: {}", e));
                    return;
                }
                if let Some(preview) = self.model.ui.preview.as_mut() {
                    preview.content = PreviewContent::Failed(e.to_string());
                }
                return;
            }
        };

        // raw_url arrives already protocol-normalized by the client
        let raw_url = detail.raw_url.clone();

        let content = match payload {
            PreviewPayload::Text(body) => PreviewContent::Text { body, scroll: 0 },
            PreviewPayload::Image(bytes) => self.load_image(&bytes),
            PreviewPayload::LocalFile(local) => {
                let target = local.display().to_string();
                self.hand_to_opener(&target)
            }
            PreviewPayload::DetailOnly => self.detail_only_content(&detail, &raw_url),
        };

        if let Some(preview) = self.model.ui.preview.as_mut() {
            preview.raw_url = raw_url;
            preview.provider = detail.provider;
            preview.content = content;
        }
    }

    /// Decode image bytes into the terminal graphics protocol
    fn load_image(&mut self, bytes: &[u8]) -> PreviewContent {
        let Some(picker) = self.image_picker.as_mut() else {
            return PreviewContent::Failed("image preview disabled".to_string());
        };
        match image::load_from_memory(bytes) {
            Ok(img) => {
                self.image_protocol = Some(picker.new_resize_protocol(img));
                PreviewContent::Image
            }
            Err(e) => PreviewContent::Failed(format!("could not decode image: {}", e)),
        }
    }

    /// Spawn the configured opener (or the platform default) on a target
    fn hand_to_opener(&mut self, target: &str) -> PreviewContent {
        let opener = self
            .config
            .open_command
            .clone()
            .unwrap_or_else(|| default_opener().to_string());
        self.spawn_external(&opener, target)
    }

    /// Nothing to render inline: videos go to the player command, the
    /// rest shows a metadata card with the direct link
    fn detail_only_content(&mut self, detail: &FileDetail, raw_url: &str) -> PreviewContent {
        if preview_kind(&detail.name) == PreviewKind::Video {
            if let Some(player) = self.config.player_command.clone() {
                return self.spawn_external(&player, raw_url);
            }
        }
        let body = format!(
            "{}\n\nSize:     {}\nModified: {}\nProvider: {}\n\nDirect link:\n{}\n\nPress y to copy the link, w to download.",
            detail.name,
            crate::utils::format_bytes(detail.size),
            crate::utils::format_modified(&detail.modified),
            detail.provider,
            raw_url,
        );
        PreviewContent::Text { body, scroll: 0 }
    }

    /// Spawn a command in the background; players and GUI apps must not
    /// block the event loop or inherit the terminal
    fn spawn_external(&mut self, command: &str, target: &str) -> PreviewContent {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return PreviewContent::Failed("empty command".to_string());
        };
        let args: Vec<&str> = parts.collect();

        let result = std::process::Command::new(program)
            .args(&args)
            .arg(target)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn();

        match result {
            Ok(_child) => {
                log_debug(&format!("handoff: spawned {} {}", command, target));
                PreviewContent::Handoff(format!("Opened with {}", program))
            }
            Err(e) => {
                log_debug(&format!("handoff '{}' failed: {}", command, e));
                PreviewContent::Failed(format!("could not run {}: {}", program, e))
            }
        }
    }
}

#[cfg(target_os = "macos")]
fn default_opener() -> &'static str {
    "open"
}

#[cfg(not(target_os = "macos"))]
fn default_opener() -> &'static str {
    "xdg-open"
}
