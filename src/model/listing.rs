//! Listing state machine
//!
//! Tracks the current directory, its raw entries and the fetch lifecycle.
//! Every navigation or refresh bumps a revision counter, responses carry
//! the revision they were issued for, and anything stale is dropped on
//! arrival. A slow response for an old directory can never overwrite a
//! newer one.

use std::collections::BTreeSet;

use crate::api::FileEntry;
use crate::logic::file_type::TypeFilter;
use crate::logic::path;
use crate::logic::view::derive_view;
use crate::store::Preferences;

/// Fetch lifecycle of the current directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingPhase {
    Loading,
    Ready,
    /// Failure message, shown alongside whatever entries we still have
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ListingModel {
    /// Remote directory currently shown
    pub path: String,
    pub phase: ListingPhase,
    /// Raw entries from the last successful fetch; the visible view is
    /// always derived, never edited in place
    pub entries: Vec<FileEntry>,
    /// Fetch generation; responses tagged with an older value are stale
    pub revision: u64,
    pub search: String,
    pub filter: TypeFilter,
    /// Names selected in multi-select mode
    pub selected: BTreeSet<String>,
    pub selection_mode: bool,
    /// Cursor index into the visible view
    pub cursor: usize,
    /// First visible row (scroll position)
    pub scroll_offset: usize,
}

impl Default for ListingModel {
    fn default() -> Self {
        ListingModel {
            path: "/".to_string(),
            phase: ListingPhase::Loading,
            entries: Vec::new(),
            revision: 0,
            search: String::new(),
            filter: TypeFilter::All,
            selected: BTreeSet::new(),
            selection_mode: false,
            cursor: 0,
            scroll_offset: 0,
        }
    }
}

impl ListingModel {
    /// Point the listing at a new directory
    ///
    /// Search, filter, selection and scroll all reset; the bumped revision
    /// invalidates any fetch still in flight for the old directory.
    pub fn navigate(&mut self, path: String) -> u64 {
        self.path = path;
        self.search.clear();
        self.filter = TypeFilter::All;
        self.exit_selection();
        self.cursor = 0;
        self.scroll_offset = 0;
        self.phase = ListingPhase::Loading;
        self.revision += 1;
        self.revision
    }

    /// Re-fetch the current directory; view settings survive
    pub fn begin_refresh(&mut self) -> u64 {
        self.phase = ListingPhase::Loading;
        self.revision += 1;
        self.revision
    }

    /// Install entries for the given revision
    ///
    /// Returns false (and changes nothing) when the response is stale.
    pub fn apply_entries(&mut self, revision: u64, entries: Vec<FileEntry>) -> bool {
        if revision != self.revision {
            return false;
        }
        self.entries = entries;
        self.phase = ListingPhase::Ready;
        if !self.selected.is_empty() {
            // Selected names that disappeared server-side drop out
            let entries = &self.entries;
            self.selected
                .retain(|name| entries.iter().any(|e| &e.name == name));
            if self.selected.is_empty() {
                self.selection_mode = false;
            }
        }
        true
    }

    /// Record a failed fetch; previous entries stay visible behind the
    /// message so an offline blip does not blank the screen
    pub fn apply_error(&mut self, revision: u64, message: String) -> bool {
        if revision != self.revision {
            return false;
        }
        self.phase = ListingPhase::Error(message);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListingPhase::Loading
    }

    pub fn at_root(&self) -> bool {
        self.path == "/"
    }

    pub fn at_top(&self) -> bool {
        self.scroll_offset == 0
    }

    pub fn parent_path(&self) -> Option<String> {
        if self.at_root() {
            None
        } else {
            Some(path::parent(&self.path))
        }
    }

    /// Rows as the UI should show them
    pub fn visible_entries(&self, preferences: &Preferences) -> Vec<FileEntry> {
        derive_view(
            &self.entries,
            &self.search,
            &self.filter,
            preferences.sort_key,
            preferences.sort_order,
            preferences.folders_first,
        )
    }

    pub fn move_cursor(&mut self, delta: isize, visible_len: usize) {
        if visible_len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, visible_len as isize - 1) as usize;
    }

    /// Keep the cursor inside the view after a search or filter change
    pub fn clamp_cursor(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.cursor = 0;
        } else if self.cursor >= visible_len {
            self.cursor = visible_len - 1;
        }
    }

    /// Enter selection mode with one entry pre-selected
    pub fn enter_selection(&mut self, name: String) {
        self.selection_mode = true;
        self.selected.insert(name);
    }

    /// Toggle membership; deselecting the last entry leaves the mode
    pub fn toggle_selected(&mut self, name: &str) {
        if !self.selection_mode {
            return;
        }
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
        if self.selected.is_empty() {
            self.selection_mode = false;
        }
    }

    pub fn exit_selection(&mut self) {
        self.selection_mode = false;
        self.selected.clear();
    }

    pub fn selection_has_dir(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.is_dir && self.selected.contains(&e.name))
    }

    /// Download and copy-link act on file bodies, so a selected directory
    /// disables them; deletion stays available
    pub fn selection_supports_file_actions(&self) -> bool {
        !self.selected.is_empty() && !self.selection_has_dir()
    }

    pub fn selected_names(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}
