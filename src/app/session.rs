//! Session orchestration methods
//!
//! Login, logout and management of the saved-login history.

use crate::api::AListClient;
use crate::app::App;
use crate::log_debug;
use crate::logic::url::parse_base_url;
use crate::model::{ConfirmAction, Screen};
use crate::services::fetch::spawn_login;
use crate::store::{Connections, ServerConfig};

impl App {
    /// Validate the login form and kick off a login task
    pub(crate) fn submit_login(&mut self) {
        if self.model.session.login_in_flight {
            return;
        }
        let form = self.model.session.form.clone();
        if form.url.trim().is_empty() {
            self.model.session.error = Some("Server URL is required".to_string());
            return;
        }
        if form.username.trim().is_empty() {
            self.model.session.error = Some("Username is required".to_string());
            return;
        }
        let base = match parse_base_url(form.url.trim()) {
            Ok(base) => base,
            Err(msg) => {
                self.model.session.error = Some(msg);
                return;
            }
        };

        self.model.session.error = None;
        self.model.session.login_in_flight = true;
        log_debug(&format!("login: {} as {}", base, form.username.trim()));
        spawn_login(
            self.api_tx.clone(),
            form.url.trim().to_string(),
            form.username.trim().to_string(),
            form.password.clone(),
            form.server_name.trim().to_string(),
            self.config.request_timeout(),
        );
    }

    /// A login task came back with a client and token: persist the
    /// session, move to the browser and load the root directory
    pub(crate) fn complete_login(
        &mut self,
        url: String,
        username: String,
        server_name: String,
        client: AListClient,
        token: String,
    ) {
        let config = ServerConfig {
            url,
            username,
            token,
            server_name,
        };

        let mut connections = self
            .store
            .load()
            .unwrap_or_else(|_| Connections::default());
        connections.remember(config.clone());
        if let Err(e) = self.store.save(&connections) {
            self.model.show_toast(format!("Error: could not save session: {}", e));
        }

        self.client = Some(client);
        self.model.session.active = Some(config);
        self.model.session.history = connections.history;
        self.model.session.history_cursor = None;
        self.model.session.login_in_flight = false;
        self.model.session.error = None;
        self.model.session.form.password.clear();
        self.model.ui.screen = Screen::Browser;
        self.navigate("/".to_string());
    }

    /// Drop the active session but keep its history entry, so the next
    /// login only needs the password again
    pub(crate) fn logout(&mut self) {
        let mut connections = self
            .store
            .load()
            .unwrap_or_else(|_| Connections::default());
        connections.clear_active();
        if let Err(e) = self.store.save(&connections) {
            log_debug(&format!("logout: could not persist: {}", e));
        }

        let previous = self.model.session.active.take();
        self.client = None;
        self.image_protocol = None;
        self.collected_links.clear();

        let preferences = self.model.preferences;
        let history = connections.history;
        self.model = crate::model::Model::new();
        self.model.preferences = preferences;
        self.model.session.history = history;
        if let Some(config) = previous.as_ref().or(self.model.session.history.first()) {
            let config = config.clone();
            self.model.session.form.prefill(&config);
        }
    }

    /// The server rejected our token; back to the connect screen with an
    /// explanation instead of a silent bounce
    pub(crate) fn force_logout(&mut self, reason: String) {
        self.logout();
        self.model.session.error = Some(reason);
    }

    /// Ask before dropping a remembered login
    pub(crate) fn request_forget_server(&mut self) {
        let Some(index) = self.model.session.history_cursor else {
            return;
        };
        let Some(config) = self.model.session.history.get(index) else {
            return;
        };
        self.model.ui.confirm = Some(ConfirmAction::ForgetServer {
            index,
            label: config.display_name().to_string(),
        });
    }

    pub(crate) fn forget_server(&mut self, index: usize) {
        match self.store.evict(index) {
            Ok(Some(removed)) => {
                self.model.session.history.remove(index);
                if self.model.session.history.is_empty() {
                    self.model.session.history_cursor = None;
                } else if let Some(cursor) = self.model.session.history_cursor {
                    let last = self.model.session.history.len() - 1;
                    self.model.session.history_cursor = Some(cursor.min(last));
                }
                self.model
                    .show_toast(format!("Forgot {}", removed.display_name()));
            }
            Ok(None) => {}
            Err(e) => self.model.show_toast(format!("Error: {}", e)),
        }
    }
}
