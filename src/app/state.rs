//! App state - pure data structure with no network I/O

use std::path::PathBuf;

use crate::app::session::Session;
use crate::backdrop;
use crate::config::Config;
use crate::export::artifact_file_name;
use crate::messages::render::{ServiceHealth, SourceSummary};
use crate::messages::RenderState;

/// Main application state
pub struct AppState {
    // Round in progress
    pub session: Session,

    // Configuration
    pub api_url: String,
    pub output_dir: PathBuf,

    // Backend liveness
    pub health: ServiceHealth,
    pub health_request_id: Option<u64>,

    // Request tracking
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Upload screen input
    pub path_input: String,

    // Custom color editor
    pub color_input: String,
    pub editing_color: bool,

    pub notice: Option<String>,
    pub show_help: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let session = Session::new();
        let color_input = session.custom_color.to_string();
        AppState {
            session,
            api_url: config.api_url.clone(),
            output_dir: config.output_dir.clone(),
            health: ServiceHealth::Unknown,
            health_request_id: None,
            next_request_id: 1,
            pending_request_id: None,
            path_input: String::new(),
            color_input,
            editing_color: false,
            notice: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let session = &self.session;
        let result = session.result();
        let error = session.error();

        RenderState {
            api_url: self.api_url.clone(),
            health: self.health.clone(),
            phase: session.phase_kind(),
            path_input: self.path_input.clone(),
            source: session.source.as_ref().map(|f| SourceSummary {
                name: f.name.clone(),
                mime: f.mime.clone(),
                size: f.size,
            }),
            preview: session.preview.clone(),
            composite: result.map(|r| backdrop::render(r, session.backdrop)),
            time_ms: result.map(|r| r.time_ms).unwrap_or(0),
            active_backdrop: session.backdrop,
            custom_color: session.custom_color,
            color_input: self.color_input.clone(),
            editing_color: self.editing_color,
            download_name: result
                .and(session.source.as_ref())
                .map(|f| artifact_file_name(&f.name)),
            error_kind: error.map(|e| e.kind()),
            error_message: error.map(|e| e.user_message()).unwrap_or_default(),
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
