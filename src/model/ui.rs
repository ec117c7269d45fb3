//! UI Model
//!
//! This sub-model contains all state related to presentation: the active
//! screen, dialogs, prompts, the preview pane, toasts and the
//! pull-to-refresh indicator.

use std::time::Instant;

use crate::logic::file_type::PreviewKind;

/// Toast lifetime in milliseconds
pub const TOAST_TTL_MS: u128 = 2500;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Connect,
    Browser,
}

/// Pending confirmation dialog
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    /// Delete these names from the given directory
    DeleteEntries { dir: String, names: Vec<String> },
    /// Forget a saved login
    ForgetServer { index: usize, label: String },
}

/// Prompt asking for one line of input
#[derive(Debug, Clone, PartialEq)]
pub enum InputPrompt {
    /// Local file to upload into the current directory
    UploadPath { value: String },
    /// Extension for a custom type filter
    ExtensionFilter { value: String },
}

impl InputPrompt {
    pub fn value(&self) -> &str {
        match self {
            InputPrompt::UploadPath { value } => value,
            InputPrompt::ExtensionFilter { value } => value,
        }
    }

    pub fn value_mut(&mut self) -> &mut String {
        match self {
            InputPrompt::UploadPath { value } => value,
            InputPrompt::ExtensionFilter { value } => value,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            InputPrompt::UploadPath { .. } => "Upload local file",
            InputPrompt::ExtensionFilter { .. } => "Filter by extension",
        }
    }
}

/// What the preview pane is showing
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewContent {
    /// Waiting on the detail or body fetch
    Loading,
    /// Decoded text body with a scroll position
    Text { body: String, scroll: u16 },
    /// Image bytes were handed to the terminal graphics protocol; the
    /// protocol state itself lives on App because it is not Clone
    Image,
    /// Content was handed to an external program; message says where
    Handoff(String),
    /// Detail or body fetch failed
    Failed(String),
}

/// Preview pane for one file
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    pub name: String,
    pub path: String,
    pub kind: PreviewKind,
    pub size: u64,
    /// Direct link, once the detail fetch finished
    pub raw_url: String,
    pub provider: String,
    pub content: PreviewContent,
}

impl PreviewState {
    pub fn loading(name: String, path: String, kind: PreviewKind, size: u64) -> Self {
        PreviewState {
            name,
            path,
            kind,
            size,
            raw_url: String::new(),
            provider: String::new(),
            content: PreviewContent::Loading,
        }
    }
}

/// Pull-to-refresh indicator as last rendered
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PullIndicator {
    /// Damped offset from the recognizer, in rows
    pub offset: f32,
    /// Past the trigger: releasing now commits a refresh
    pub armed: bool,
    /// Set for the frame where the threshold was just crossed; drives the
    /// visual tick standing in for a haptic
    pub tick: bool,
}

/// Screens, modals and transient indicators
#[derive(Clone, Debug)]
pub struct UiModel {
    pub screen: Screen,

    // ============================================
    // DIALOGS & PROMPTS
    // ============================================
    /// Pending confirmation, rendered above everything else
    pub confirm: Option<ConfirmAction>,

    /// One-line input prompt
    pub prompt: Option<InputPrompt>,

    /// Preview pane for the opened file
    pub preview: Option<PreviewState>,

    /// Toast message (text, shown-at)
    pub toast: Option<(String, Instant)>,

    // ============================================
    // TRANSIENT INPUT STATE
    // ============================================
    /// Keystrokes currently go to the search line
    pub search_input: bool,

    /// Pull-to-refresh indicator state
    pub pull: PullIndicator,

    pub should_quit: bool,
}

impl UiModel {
    pub fn new() -> Self {
        UiModel {
            screen: Screen::Connect,
            confirm: None,
            prompt: None,
            preview: None,
            toast: None,
            search_input: false,
            pull: PullIndicator::default(),
            should_quit: false,
        }
    }

    /// Check if any modal layer is showing
    pub fn has_modal(&self) -> bool {
        self.confirm.is_some() || self.prompt.is_some() || self.preview.is_some()
    }

    /// Close all modal layers
    pub fn close_all_modals(&mut self) {
        self.confirm = None;
        self.prompt = None;
        self.preview = None;
    }

    /// Show toast message
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some((message.into(), Instant::now()));
    }

    /// Check if the toast has outlived its display time
    pub fn should_dismiss_toast(&self) -> bool {
        match &self.toast {
            Some((_, shown_at)) => shown_at.elapsed().as_millis() >= TOAST_TTL_MS,
            None => false,
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_modal_covers_all_layers() {
        let mut ui = UiModel::new();
        assert!(!ui.has_modal());

        ui.prompt = Some(InputPrompt::UploadPath {
            value: String::new(),
        });
        assert!(ui.has_modal());

        ui.close_all_modals();
        assert!(!ui.has_modal());

        ui.preview = Some(PreviewState::loading(
            "a.txt".to_string(),
            "/a.txt".to_string(),
            PreviewKind::Text,
            10,
        ));
        assert!(ui.has_modal());
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut ui = UiModel::new();
        assert!(!ui.should_dismiss_toast());

        ui.show_toast("Copied link");
        assert!(ui.toast.is_some());
        // Fresh toasts stay up
        assert!(!ui.should_dismiss_toast());

        ui.dismiss_toast();
        assert!(ui.toast.is_none());
    }

    #[test]
    fn test_prompt_value_access() {
        let mut prompt = InputPrompt::ExtensionFilter {
            value: "mk".to_string(),
        };
        prompt.value_mut().push('v');
        assert_eq!(prompt.value(), "mkv");
    }
}
