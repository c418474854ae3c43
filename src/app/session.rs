//! Session context - everything that belongs to one round of
//! pick file, wait, look at the result.

use crate::constants::DEFAULT_CUSTOM_COLOR;
use crate::error::SessionError;
use crate::models::{ApplicationPhase, BackdropOption, PreviewImage, RemovalResult, Rgb, SourceFile};

/// Current phase. The result and the error live inside their phase, so a
/// cutout exists exactly when the phase is `ResultReady`.
#[derive(Clone, Debug, Default)]
pub enum Phase {
    #[default]
    Idle,
    Processing,
    ResultReady(RemovalResult),
    Error(SessionError),
}

impl Phase {
    pub fn kind(&self) -> ApplicationPhase {
        match self {
            Phase::Idle => ApplicationPhase::Idle,
            Phase::Processing => ApplicationPhase::Processing,
            Phase::ResultReady(_) => ApplicationPhase::ResultReady,
            Phase::Error(_) => ApplicationPhase::Error,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub source: Option<SourceFile>,
    pub preview: Option<PreviewImage>,
    pub phase: Phase,
    pub backdrop: BackdropOption,
    /// Last custom color chosen, kept even while another backdrop is active
    pub custom_color: Rgb,
    /// Epoch of the submission this round belongs to
    pub submission_id: Option<u64>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            source: None,
            preview: None,
            phase: Phase::Idle,
            backdrop: BackdropOption::Transparent,
            custom_color: DEFAULT_CUSTOM_COLOR,
            submission_id: None,
        }
    }

    pub fn phase_kind(&self) -> ApplicationPhase {
        self.phase.kind()
    }

    pub fn result(&self) -> Option<&RemovalResult> {
        match &self.phase {
            Phase::ResultReady(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SessionError> {
        match &self.phase {
            Phase::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Drop the round's file, preview and result and go back to Idle.
    /// The custom color survives, like a color picker keeps its value.
    pub fn clear(&mut self) {
        self.source = None;
        self.preview = None;
        self.phase = Phase::Idle;
        self.backdrop = BackdropOption::Transparent;
        self.submission_id = None;
    }
}
