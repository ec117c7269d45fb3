//! Navigation orchestration methods
//!
//! Entering directories, going back up, refreshing and the persisted
//! sort preferences.

use crate::api::FileEntry;
use crate::app::App;
use crate::log_debug;
use crate::logic::path;
use crate::services::fetch::spawn_listing;

impl App {
    /// Rows the file list shows under the current search/filter/sort
    pub(crate) fn visible_entries(&self) -> Vec<FileEntry> {
        self.model.visible_entries()
    }

    /// Point the browser at a directory and fetch it
    pub(crate) fn navigate(&mut self, target: String) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let target = path::normalize(&target);
        let revision = self.model.listing.navigate(target.clone());
        log_debug(&format!("navigate: {} (rev {})", target, revision));
        spawn_listing(
            self.api_tx.clone(),
            client,
            target,
            revision,
            self.config.per_page,
            false,
        );
    }

    pub(crate) fn navigate_up(&mut self) {
        if let Some(parent) = self.model.listing.parent_path() {
            self.navigate(parent);
        }
    }

    /// Re-fetch the current directory; `force` bypasses the server-side
    /// listing cache
    pub(crate) fn refresh(&mut self, force: bool) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let revision = self.model.listing.begin_refresh();
        spawn_listing(
            self.api_tx.clone(),
            client,
            self.model.listing.path.clone(),
            revision,
            self.config.per_page,
            force,
        );
    }

    /// Activate an entry: directories navigate, files open a preview
    pub(crate) fn open_entry(&mut self, entry: &FileEntry) {
        if entry.is_dir {
            let target = path::join(&self.model.listing.path, &entry.name);
            self.navigate(target);
        } else {
            self.open_preview(entry);
        }
    }

    pub(crate) fn open_cursor(&mut self) {
        let visible = self.visible_entries();
        if let Some(entry) = visible.get(self.model.listing.cursor) {
            let entry = entry.clone();
            self.open_entry(&entry);
        }
    }

    pub(crate) fn cycle_sort_key(&mut self) {
        self.model.preferences.sort_key = self.model.preferences.sort_key.next();
        self.persist_preferences();
    }

    pub(crate) fn toggle_sort_order(&mut self) {
        self.model.preferences.sort_order = self.model.preferences.sort_order.toggled();
        self.persist_preferences();
    }

    pub(crate) fn toggle_folders_first(&mut self) {
        self.model.preferences.folders_first = !self.model.preferences.folders_first;
        self.persist_preferences();
    }

    fn persist_preferences(&mut self) {
        let visible_len = self.visible_entries().len();
        self.model.listing.clamp_cursor(visible_len);
        if let Err(e) = self.store.save_preferences(&self.model.preferences) {
            log_debug(&format!("preferences: could not persist: {}", e));
        }
    }
}
