//! Pure Application Model
//!
//! This module defines the pure, cloneable state for the application,
//! organized into focused sub-models:
//!
//! - **SessionModel**: Who we are talking to, plus the login form
//! - **ListingModel**: The current directory and its fetch lifecycle
//! - **UiModel**: Screens, modals, toasts and the pull indicator
//!
//! Key principles:
//! - Clone + Debug: Can snapshot and compare state in tests
//! - No services: All I/O lives behind the async fetch layer
//! - Pure accessors: Helper methods are side-effect free

pub mod listing;
pub mod session;
pub mod ui;

pub use listing::{ListingModel, ListingPhase};
pub use session::{LoginField, LoginForm, SessionModel};
pub use ui::{
    ConfirmAction, InputPrompt, PreviewContent, PreviewState, PullIndicator, Screen, UiModel,
};

use crate::store::Preferences;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    /// Active connection, history and the login form
    pub session: SessionModel,

    /// Current directory contents and fetch state
    pub listing: ListingModel,

    /// Screens, modals and transient indicators
    pub ui: UiModel,

    /// Persisted presentation settings (sort key, direction, grouping)
    pub preferences: Preferences,
}

impl Model {
    /// Create the initial model with default settings
    pub fn new() -> Self {
        Self {
            session: SessionModel::default(),
            listing: ListingModel::default(),
            ui: UiModel::new(),
            preferences: Preferences::default(),
        }
    }

    /// Check if any modal layer is showing
    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    /// Show toast message
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.ui.show_toast(message);
    }

    /// Rows the list should display under current search/filter/sort
    pub fn visible_entries(&self) -> Vec<crate::api::FileEntry> {
        self.listing.visible_entries(&self.preferences)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = Model::new();
        assert_eq!(model.ui.screen, Screen::Connect);
        assert!(model.session.active.is_none());
        assert!(model.listing.entries.is_empty());
        assert_eq!(model.listing.path, "/");
    }

    #[test]
    fn test_model_is_cloneable() {
        let model = Model::new();
        let _cloned = model.clone();
    }

    #[test]
    fn test_has_modal() {
        let mut model = Model::new();
        assert!(!model.has_modal());

        model.ui.confirm = Some(ConfirmAction::ForgetServer {
            index: 0,
            label: "Home NAS".to_string(),
        });
        assert!(model.has_modal());
    }

    #[test]
    fn test_toast() {
        let mut model = Model::new();
        assert!(model.ui.toast.is_none());

        model.show_toast("Copied");
        assert!(model.ui.toast.is_some());
    }
}
