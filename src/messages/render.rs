//! Render state - data structure sent from App layer to UI for rendering

use crate::backdrop::Composite;
use crate::error::ErrorKind;
use crate::models::{ApplicationPhase, BackdropOption, PreviewImage, Rgb, ServiceStatus};

/// Source file facts shown in the "before" panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

/// Liveness of the backend as last probed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceHealth {
    #[default]
    Unknown,
    Online(ServiceStatus),
    Offline,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub api_url: String,
    pub health: ServiceHealth,

    // Which screen is up
    pub phase: ApplicationPhase,

    // Upload screen
    pub path_input: String,

    // Before panel
    pub source: Option<SourceSummary>,
    pub preview: Option<PreviewImage>,

    // Result screen
    pub composite: Option<Composite>,
    pub time_ms: u64,
    pub active_backdrop: BackdropOption,
    pub custom_color: Rgb,
    pub color_input: String,
    pub editing_color: bool,
    pub download_name: Option<String>,

    // Error screen
    pub error_kind: Option<ErrorKind>,
    pub error_message: String,

    /// One-line feedback, e.g. where a download went
    pub notice: Option<String>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::{DEFAULT_API_URL, DEFAULT_CUSTOM_COLOR};
        RenderState {
            api_url: String::from(DEFAULT_API_URL),
            health: ServiceHealth::Unknown,
            phase: ApplicationPhase::Idle,
            path_input: String::new(),
            source: None,
            preview: None,
            composite: None,
            time_ms: 0,
            active_backdrop: BackdropOption::Transparent,
            custom_color: DEFAULT_CUSTOM_COLOR,
            color_input: DEFAULT_CUSTOM_COLOR.to_string(),
            editing_color: false,
            download_name: None,
            error_kind: None,
            error_message: String::new(),
            notice: None,
            show_help: false,
        }
    }
}
