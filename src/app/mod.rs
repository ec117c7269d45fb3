//! App Orchestration Methods
//!
//! App owns the pure model, the client for the active session and the
//! channel the background fetch tasks report into. Implementation methods
//! are grouped by functional domain:
//! - session: login, logout and the saved-login history
//! - browse: directory navigation, refresh and sort preferences
//! - file_ops: delete, upload and the sequential download/link batches
//! - preview: the preview popup and external handoff commands

pub(crate) mod browse;
pub(crate) mod file_ops;
pub(crate) mod preview;
pub(crate) mod session;

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::api::AListClient;
use crate::config::Config;
use crate::gesture::{GestureConfig, GestureRecognizer};
use crate::log_debug;
use crate::model::{Model, Screen};
use crate::services::ApiResponse;
use crate::store::SessionStore;

pub struct App {
    pub model: Model,
    pub config: Config,
    pub store: Box<dyn SessionStore>,

    /// Client for the active session; None while on the connect screen
    pub client: Option<AListClient>,

    /// Background fetch tasks report into this channel
    pub api_tx: mpsc::UnboundedSender<ApiResponse>,
    pub api_rx: mpsc::UnboundedReceiver<ApiResponse>,

    pub recognizer: GestureRecognizer,
    /// Zero point for gesture timestamps
    started: Instant,

    /// Terminal graphics picker, when image previews are enabled
    pub image_picker: Option<ratatui_image::picker::Picker>,
    /// Protocol state for the image currently in the preview popup;
    /// kept off the model because it is not Clone
    pub image_protocol: Option<ratatui_image::protocol::StatefulProtocol>,

    /// Direct links resolved so far by an in-flight copy-links batch
    pub collected_links: Vec<String>,

    /// Where the file rows were last drawn, for pointer hit tests
    pub list_area: Rect,
}

impl App {
    pub fn new(config: Config, store: Box<dyn SessionStore>) -> Result<Self> {
        let (api_tx, api_rx) = mpsc::unbounded_channel();

        let connections = store.load()?;
        let preferences = store.load_preferences()?;

        let image_picker = if config.image_preview {
            match ratatui_image::picker::Picker::from_query_stdio() {
                Ok(picker) => Some(picker),
                Err(e) => {
                    log_debug(&format!("image preview: terminal query failed: {}", e));
                    Some(ratatui_image::picker::Picker::from_fontsize((8, 16)))
                }
            }
        } else {
            None
        };

        let mut model = Model::new();
        model.preferences = preferences;
        model.session.history = connections.history.clone();
        if let Some(server) = &config.server {
            model.session.form.url = server.clone();
        } else if let Some(last) = connections.history.first() {
            model.session.form.prefill(last);
        }

        let mut app = App {
            model,
            config,
            store,
            client: None,
            api_tx,
            api_rx,
            recognizer: GestureRecognizer::new(GestureConfig::for_cells()),
            started: Instant::now(),
            image_picker,
            image_protocol: None,
            collected_links: Vec::new(),
            list_area: Rect::default(),
        };

        // Resume the previous session. A stale token is not detectable
        // here; it surfaces as an auth error on the first listing and
        // drops back to the connect screen.
        if let Some(active) = connections.active {
            match AListClient::with_token(&active.url, &active.token, app.config.request_timeout())
            {
                Ok(client) => {
                    app.client = Some(client);
                    app.model.session.active = Some(active);
                    app.model.ui.screen = Screen::Browser;
                    app.navigate("/".to_string());
                }
                Err(e) => {
                    app.model.session.error = Some(e.to_string());
                }
            }
        }

        Ok(app)
    }

    /// Monotonic timestamp for the gesture recognizer
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }
}
