//! Command handlers - the session's state transitions
//!
//! Idle -> Processing -> ResultReady | Error, and back to Idle on reset.
//! Anything not valid for the current phase is ignored.

use crate::app::session::Phase;
use crate::app::AppState;
use crate::error::{ServiceError, SessionError};
use crate::export;
use crate::messages::render::ServiceHealth;
use crate::messages::ui_events::parse_dropped_path;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{ApplicationPhase, BackdropOption, Rgb, SourceFile};
use crate::validation;

/// Longest thing worth typing into the color field: `#rrggbb`
const MAX_COLOR_INPUT: usize = 7;

impl AppState {
    // ========================
    // Liveness
    // ========================

    /// Probe the backend once at session start
    pub fn check_health(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.health_request_id = Some(id);
        NetworkCommand::CheckHealth { id }
    }

    // ========================
    // Path input
    // ========================

    pub fn path_char(&mut self, c: char) {
        if self.session.phase_kind() == ApplicationPhase::Idle {
            self.path_input.push(c);
        }
    }

    pub fn path_backspace(&mut self) {
        if self.session.phase_kind() == ApplicationPhase::Idle {
            self.path_input.pop();
        }
    }

    // ========================
    // File intake
    // ========================

    /// Submit the typed path
    pub fn select_path(&mut self) -> Option<NetworkCommand> {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            return None;
        }
        self.intake_path(path)
    }

    /// A path dragged onto the terminal. While the color field is open,
    /// pasted text goes into the field instead.
    pub fn drop_file(&mut self, text: &str) -> Option<NetworkCommand> {
        if self.editing_color {
            self.paste_color(text);
            return None;
        }
        let path = parse_dropped_path(text)?;
        self.intake_path(path)
    }

    fn intake_path(&mut self, path: String) -> Option<NetworkCommand> {
        if self.is_processing() {
            tracing::debug!(%path, "Ignoring file while a submission is in flight");
            return None;
        }
        self.reset();
        self.path_input = path;

        match SourceFile::from_path(&self.path_input) {
            Ok(file) => self.select_file(file),
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    /// Validate and submit a file. From ResultReady or Error this starts a
    /// fresh round; while Processing it is ignored.
    pub fn select_file(&mut self, file: SourceFile) -> Option<NetworkCommand> {
        match self.session.phase_kind() {
            ApplicationPhase::Processing => {
                tracing::debug!(name = %file.name, "Ignoring file while a submission is in flight");
                return None;
            }
            ApplicationPhase::ResultReady | ApplicationPhase::Error => self.reset(),
            ApplicationPhase::Idle => {}
        }

        if let Err(e) = validation::validate(&file) {
            tracing::warn!(name = %file.name, mime = %file.mime, size = file.size, error = %e, "File rejected");
            self.fail(e.into());
            return None;
        }

        let id = self.next_id();
        tracing::info!(id, name = %file.name, size = file.size, "Submitting file");

        self.session.source = Some(file.clone());
        self.session.preview = None;
        self.session.submission_id = Some(id);
        self.session.phase = Phase::Processing;
        self.pending_request_id = Some(id);
        self.notice = None;

        Some(NetworkCommand::SubmitFile { id, file })
    }

    pub fn is_processing(&self) -> bool {
        self.session.phase_kind() == ApplicationPhase::Processing
    }

    fn fail(&mut self, error: SessionError) {
        self.session.preview = None;
        self.session.submission_id = None;
        self.session.phase = Phase::Error(error);
        self.pending_request_id = None;
        self.editing_color = false;
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let is_for_pending = response.id().is_some() && self.pending_request_id == response.id();
        if response.is_terminal() && !is_for_pending {
            tracing::debug!(id = ?response.id(), pending = ?self.pending_request_id, "Discarding stale completion");
            return;
        }

        match response {
            NetworkResponse::HealthChecked { id, result } => {
                if self.health_request_id != Some(id) {
                    return;
                }
                self.health_request_id = None;
                match result {
                    Ok(status) => {
                        tracing::info!(?status, "Service is up");
                        self.health = ServiceHealth::Online(status);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Service liveness probe failed");
                        self.health = ServiceHealth::Offline;
                        // Only an untouched session is sent to the error screen
                        if self.session.phase_kind() == ApplicationPhase::Idle {
                            let error = self.unreachable(e);
                            self.fail(error);
                        }
                    }
                }
            }
            NetworkResponse::ReadFailed { id, error } => {
                tracing::warn!(id, error = %error, "Source file could not be read");
                self.fail(error);
            }
            NetworkResponse::PreviewLoaded { id, preview } => {
                if self.session.submission_id == Some(id) {
                    self.session.preview = Some(preview);
                } else {
                    tracing::debug!(id, "Discarding stale preview");
                }
            }
            NetworkResponse::RemovalFinished { id, result } => match result {
                Ok(result) => {
                    tracing::info!(id, bytes = result.byte_len(), time_ms = result.time_ms, "Background removed");
                    self.session.phase = Phase::ResultReady(result);
                    self.session.backdrop = BackdropOption::Transparent;
                    self.pending_request_id = None;
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "Background removal failed");
                    self.fail(e.into());
                }
            },
            NetworkResponse::ArtifactSaved { path } => {
                self.notice = Some(format!("Saved to {}", path.display()));
            }
            NetworkResponse::ArtifactFailed { file_name, message } => {
                self.notice = Some(format!("Could not save {}: {}", file_name, message));
            }
        }
    }

    /// Any probe failure reads as "backend is down" to the user
    fn unreachable(&self, e: ServiceError) -> SessionError {
        match e {
            ServiceError::Unreachable { .. } => e.into(),
            other => ServiceError::Unreachable {
                url: self.api_url.clone(),
                reason: other.to_string(),
            }
            .into(),
        }
    }

    // ========================
    // Backdrop
    // ========================

    pub fn pick_backdrop(&mut self, option: BackdropOption) {
        if self.session.phase_kind() != ApplicationPhase::ResultReady {
            return;
        }
        if let BackdropOption::Custom(color) = option {
            self.session.custom_color = color;
            self.color_input = color.to_string();
        }
        self.session.backdrop = option;
    }

    pub fn pick_custom_backdrop(&mut self) {
        self.pick_backdrop(BackdropOption::Custom(self.session.custom_color));
    }

    /// Record a new custom color. Visible right away only if Custom is active.
    pub fn set_custom_color(&mut self, color: Rgb) {
        self.session.custom_color = color;
        if self.session.backdrop.is_custom() {
            self.session.backdrop = BackdropOption::Custom(color);
        }
    }

    pub fn start_color_edit(&mut self) {
        if self.session.phase_kind() == ApplicationPhase::ResultReady {
            self.editing_color = true;
            self.color_input = self.session.custom_color.to_string();
        }
    }

    pub fn color_char(&mut self, c: char) {
        if !self.editing_color || self.color_input.chars().count() >= MAX_COLOR_INPUT {
            return;
        }
        if (c == '#' && self.color_input.is_empty()) || c.is_ascii_hexdigit() {
            self.color_input.push(c);
            self.apply_color_input();
        }
    }

    pub fn color_backspace(&mut self) {
        if self.editing_color {
            self.color_input.pop();
            self.apply_color_input();
        }
    }

    /// Pasted text replaces whatever is in the color field
    pub fn paste_color(&mut self, text: &str) {
        if !self.editing_color {
            return;
        }
        self.color_input.clear();
        for c in text.trim().chars() {
            self.color_char(c);
        }
    }

    pub fn stop_color_edit(&mut self) {
        self.editing_color = false;
        self.color_input = self.session.custom_color.to_string();
    }

    /// Live update while typing; incomplete values are left alone
    fn apply_color_input(&mut self) {
        let hex = self.color_input.trim_start_matches('#');
        if hex.len() == 6 {
            if let Ok(color) = self.color_input.parse::<Rgb>() {
                self.set_custom_color(color);
            }
        }
    }

    // ========================
    // Download
    // ========================

    /// Export the cutout. Without a result this does nothing at all.
    pub fn download(&mut self) -> Option<NetworkCommand> {
        let source = self.session.source.as_ref()?;
        let artifact = export::export(self.session.result(), &source.name)?;
        tracing::info!(file_name = %artifact.file_name, dir = %self.output_dir.display(), "Exporting cutout");
        Some(NetworkCommand::SaveArtifact {
            artifact,
            dir: self.output_dir.clone(),
        })
    }

    // ========================
    // Reset
    // ========================

    /// New image / try again. Only meaningful from ResultReady or Error.
    pub fn reset(&mut self) {
        match self.session.phase_kind() {
            ApplicationPhase::ResultReady | ApplicationPhase::Error => {}
            ApplicationPhase::Idle | ApplicationPhase::Processing => return,
        }
        tracing::info!("Resetting session");
        self.session.clear();
        self.pending_request_id = None;
        self.path_input.clear();
        self.editing_color = false;
        self.color_input = self.session.custom_color.to_string();
        self.notice = None;
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::constants::{DEFAULT_CUSTOM_COLOR, GENERIC_FAILURE, MAX_FILE_SIZE};
    use crate::error::ErrorKind;
    use crate::models::{PreviewImage, ServiceStatus};
    use crate::test_support::{cutout, source};

    fn state() -> AppState {
        AppState::new(&Config {
            api_url: "http://localhost:8000".into(),
            output_dir: "/tmp/cutouts".into(),
            log_file: "cutout.log".into(),
        })
    }

    fn submit(state: &mut AppState) -> u64 {
        match state.select_file(source("photo.jpg", "image/jpeg", 1024)) {
            Some(NetworkCommand::SubmitFile { id, .. }) => id,
            other => panic!("expected SubmitFile, got {other:?}"),
        }
    }

    fn succeed(state: &mut AppState, id: u64) {
        state.handle_response(NetworkResponse::RemovalFinished { id, result: Ok(cutout()) });
    }

    fn preview() -> PreviewImage {
        PreviewImage { mime: "image/jpeg".into(), byte_len: 1024, dimensions: Some((4, 3)) }
    }

    fn assert_cleared(state: &AppState) {
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Idle);
        assert!(state.session.source.is_none());
        assert!(state.session.preview.is_none());
        assert!(state.session.result().is_none());
        assert_eq!(state.session.backdrop, BackdropOption::Transparent);
        assert_eq!(state.pending_request_id, None);
    }

    #[test]
    fn test_accepted_file_enters_processing() {
        let mut state = state();
        let id = submit(&mut state);
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Processing);
        assert_eq!(state.pending_request_id, Some(id));
        assert_eq!(state.session.source.as_ref().unwrap().name, "photo.jpg");
    }

    #[test]
    fn test_non_image_rejected_without_network() {
        let mut state = state();
        let cmd = state.select_file(source("notes.txt", "text/plain", 10));
        assert!(cmd.is_none());
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Error);
        let render = state.to_render_state();
        assert_eq!(render.error_kind, Some(ErrorKind::Validation));
        assert_eq!(render.error_message, "Please select a valid image file");
        assert!(state.session.result().is_none());
    }

    #[test]
    fn test_oversized_file_rejected_without_network() {
        let mut state = state();
        let cmd = state.select_file(source("huge.png", "image/png", MAX_FILE_SIZE + 1));
        assert!(cmd.is_none());
        assert_eq!(state.to_render_state().error_message, "File size must be less than 10MB");
    }

    #[test]
    fn test_success_resets_backdrop_and_shows_result() {
        let mut state = state();
        state.session.backdrop = BackdropOption::Black;
        let id = submit(&mut state);
        succeed(&mut state, id);

        assert_eq!(state.session.phase_kind(), ApplicationPhase::ResultReady);
        assert!(state.session.result().is_some());
        assert_eq!(state.session.backdrop, BackdropOption::Transparent);
        assert_eq!(state.pending_request_id, None);
        let render = state.to_render_state();
        assert_eq!(render.download_name.as_deref(), Some("removed_bg_photo.png"));
        assert!(render.composite.is_some());
    }

    #[test]
    fn test_failure_surfaces_detail_or_generic() {
        let mut state = state();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::RemovalFinished {
            id,
            result: Err(ServiceError::RequestRejected { status: 400, detail: Some("File must be an image".into()) }),
        });
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Error);
        assert_eq!(state.to_render_state().error_message, "File must be an image");

        state.reset();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::RemovalFinished {
            id,
            result: Err(ServiceError::RequestRejected { status: 500, detail: None }),
        });
        assert_eq!(state.to_render_state().error_message, GENERIC_FAILURE);
    }

    #[test]
    fn test_unreachable_failure() {
        let mut state = state();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::RemovalFinished {
            id,
            result: Err(ServiceError::Unreachable { url: state.api_url.clone(), reason: "refused".into() }),
        });
        let render = state.to_render_state();
        assert_eq!(render.error_kind, Some(ErrorKind::ServiceUnreachable));
        assert!(render.error_message.contains("backend server"));
    }

    #[test]
    fn test_read_failure_lands_in_error() {
        let mut state = state();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::ReadFailed {
            id,
            error: SessionError::local_read("photo.jpg", "permission denied"),
        });
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Error);
        assert_eq!(state.to_render_state().error_kind, Some(ErrorKind::LocalRead));
    }

    #[test]
    fn test_second_submission_while_processing_is_ignored() {
        let mut state = state();
        let id = submit(&mut state);
        let cmd = state.select_file(source("other.png", "image/png", 10));
        assert!(cmd.is_none());
        assert_eq!(state.pending_request_id, Some(id));
        assert_eq!(state.session.source.as_ref().unwrap().name, "photo.jpg");
        assert!(state.drop_file("/tmp/other.png").is_none());
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Processing);
    }

    #[test]
    fn test_preview_does_not_gate_phase() {
        let mut state = state();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::PreviewLoaded { id, preview: preview() });
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Processing);
        assert_eq!(state.session.preview, Some(preview()));

        // A preview arriving after the result still lands
        let mut state = self::state();
        let id = submit(&mut state);
        succeed(&mut state, id);
        state.handle_response(NetworkResponse::PreviewLoaded { id, preview: preview() });
        assert_eq!(state.session.phase_kind(), ApplicationPhase::ResultReady);
        assert!(state.session.preview.is_some());
    }

    #[test]
    fn test_backdrop_switching_sends_nothing_and_keeps_result() {
        let mut state = state();
        let id = submit(&mut state);
        succeed(&mut state, id);
        let before = state.session.result().cloned();

        for option in BackdropOption::PRESETS {
            state.pick_backdrop(option);
            assert_eq!(state.session.backdrop, option);
        }
        state.pick_custom_backdrop();
        assert_eq!(state.session.backdrop, BackdropOption::Custom(DEFAULT_CUSTOM_COLOR));
        assert_eq!(state.session.result().cloned(), before);
        // Only the one submission was ever issued
        assert_eq!(state.next_request_id, id + 1);
    }

    #[test]
    fn test_backdrop_ignored_outside_result() {
        let mut state = state();
        state.pick_backdrop(BackdropOption::White);
        assert_eq!(state.session.backdrop, BackdropOption::Transparent);
    }

    #[test]
    fn test_custom_color_live_only_when_active() {
        let mut state = state();
        let id = submit(&mut state);
        succeed(&mut state, id);

        let red = Rgb::new(255, 0, 0);
        state.pick_backdrop(BackdropOption::White);
        state.set_custom_color(red);
        assert_eq!(state.session.backdrop, BackdropOption::White);
        assert_eq!(state.session.custom_color, red);

        state.pick_custom_backdrop();
        assert_eq!(state.session.backdrop, BackdropOption::Custom(red));

        let teal = Rgb::new(0, 128, 128);
        state.set_custom_color(teal);
        assert_eq!(state.session.backdrop, BackdropOption::Custom(teal));
    }

    #[test]
    fn test_color_editor_applies_complete_values() {
        let mut state = state();
        let id = submit(&mut state);
        succeed(&mut state, id);
        state.pick_custom_backdrop();

        state.start_color_edit();
        for _ in 0..7 {
            state.color_backspace();
        }
        for c in "#00ff0".chars() {
            state.color_char(c);
        }
        assert_eq!(state.session.custom_color, DEFAULT_CUSTOM_COLOR);
        state.color_char('0');
        assert_eq!(state.session.backdrop, BackdropOption::Custom(Rgb::new(0, 0xff, 0)));
        state.color_char('f');
        assert_eq!(state.color_input, "#00ff00");

        state.stop_color_edit();
        assert!(!state.editing_color);
        assert_eq!(state.color_input, "#00ff00");
    }

    #[test]
    fn test_pasting_into_color_field_keeps_result() {
        let mut state = state();
        let id = submit(&mut state);
        succeed(&mut state, id);
        state.pick_custom_backdrop();
        state.start_color_edit();

        assert!(state.drop_file("#ff0000").is_none());
        assert_eq!(state.session.phase_kind(), ApplicationPhase::ResultReady);
        assert!(state.session.result().is_some());
        assert_eq!(state.color_input, "#ff0000");
        assert_eq!(state.session.backdrop, BackdropOption::Custom(Rgb::new(255, 0, 0)));
        assert!(state.to_render_state().composite.is_some());

        // Junk is filtered to hex digits and never touches the result
        state.drop_file("/tmp/cat.png");
        assert!(state.session.result().is_some());
        assert_eq!(state.session.backdrop, BackdropOption::Custom(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_late_preview_after_failure_is_discarded() {
        let mut state = state();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::RemovalFinished {
            id,
            result: Err(ServiceError::RequestRejected { status: 500, detail: None }),
        });
        state.handle_response(NetworkResponse::PreviewLoaded { id, preview: preview() });
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Error);
        assert!(state.session.preview.is_none());
        assert!(state.to_render_state().preview.is_none());
    }

    #[test]
    fn test_reset_clears_round() {
        let mut state = state();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::PreviewLoaded { id, preview: preview() });
        succeed(&mut state, id);
        state.pick_backdrop(BackdropOption::AccentGreen);

        state.reset();
        assert_cleared(&state);

        let id = submit(&mut state);
        state.handle_response(NetworkResponse::RemovalFinished {
            id,
            result: Err(ServiceError::InvalidResponse { reason: "empty body".into() }),
        });
        state.reset();
        assert_cleared(&state);
    }

    #[test]
    fn test_reset_ignored_while_idle_or_processing() {
        let mut state = state();
        state.path_input.push_str("/tmp/a.png");
        state.reset();
        assert_eq!(state.path_input, "/tmp/a.png");

        let id = submit(&mut state);
        state.reset();
        assert_eq!(state.pending_request_id, Some(id));
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Processing);
    }

    #[test]
    fn test_late_completion_after_reset_is_ignored() {
        let mut state = state();
        let id = submit(&mut state);
        state.handle_response(NetworkResponse::ReadFailed {
            id,
            error: SessionError::local_read("photo.jpg", "gone"),
        });
        state.reset();

        succeed(&mut state, id);
        state.handle_response(NetworkResponse::PreviewLoaded { id, preview: preview() });
        assert_cleared(&state);

        state.handle_response(NetworkResponse::RemovalFinished {
            id,
            result: Err(ServiceError::RequestRejected { status: 500, detail: None }),
        });
        assert_cleared(&state);
    }

    #[test]
    fn test_superseded_completion_does_not_touch_new_round() {
        let mut state = state();
        let first = submit(&mut state);
        state.handle_response(NetworkResponse::RemovalFinished {
            id: first,
            result: Err(ServiceError::RequestRejected { status: 500, detail: None }),
        });
        let second = submit(&mut state);
        assert_ne!(first, second);

        succeed(&mut state, first);
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Processing);
        assert_eq!(state.pending_request_id, Some(second));

        succeed(&mut state, second);
        assert_eq!(state.session.phase_kind(), ApplicationPhase::ResultReady);
    }

    #[test]
    fn test_new_file_from_result_starts_fresh_round() {
        let mut state = state();
        let id = submit(&mut state);
        succeed(&mut state, id);
        state.pick_backdrop(BackdropOption::Black);

        let cmd = state.select_file(source("dog.png", "image/png", 10));
        assert!(matches!(cmd, Some(NetworkCommand::SubmitFile { .. })));
        assert!(state.session.result().is_none());
        assert_eq!(state.session.backdrop, BackdropOption::Transparent);
        assert_eq!(state.session.source.as_ref().unwrap().name, "dog.png");
    }

    #[test]
    fn test_download() {
        let mut state = state();
        assert!(state.download().is_none());
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Idle);

        let id = submit(&mut state);
        assert!(state.download().is_none());
        succeed(&mut state, id);

        match state.download() {
            Some(NetworkCommand::SaveArtifact { artifact, dir }) => {
                assert_eq!(artifact.file_name, "removed_bg_photo.png");
                assert_eq!(dir, std::path::PathBuf::from("/tmp/cutouts"));
            }
            other => panic!("expected SaveArtifact, got {other:?}"),
        }
        assert_eq!(state.session.phase_kind(), ApplicationPhase::ResultReady);

        state.handle_response(NetworkResponse::ArtifactSaved { path: "/tmp/cutouts/removed_bg_photo.png".into() });
        assert_eq!(state.notice.as_deref(), Some("Saved to /tmp/cutouts/removed_bg_photo.png"));
        assert_eq!(state.session.phase_kind(), ApplicationPhase::ResultReady);
    }

    #[test]
    fn test_health_failure_while_idle() {
        let mut state = state();
        let NetworkCommand::CheckHealth { id } = state.check_health() else {
            panic!("expected CheckHealth");
        };
        state.handle_response(NetworkResponse::HealthChecked {
            id,
            result: Err(ServiceError::InvalidResponse { reason: "not json".into() }),
        });
        assert_eq!(state.health, ServiceHealth::Offline);
        let render = state.to_render_state();
        assert_eq!(render.error_kind, Some(ErrorKind::ServiceUnreachable));
        assert!(render.error_message.contains("http://localhost:8000"));
        assert_eq!(state.pending_request_id, None);
    }

    #[test]
    fn test_health_failure_does_not_clobber_submission() {
        let mut state = state();
        let NetworkCommand::CheckHealth { id: probe } = state.check_health() else {
            panic!("expected CheckHealth");
        };
        submit(&mut state);
        state.handle_response(NetworkResponse::HealthChecked {
            id: probe,
            result: Err(ServiceError::Unreachable { url: state.api_url.clone(), reason: "refused".into() }),
        });
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Processing);
        assert_eq!(state.health, ServiceHealth::Offline);
    }

    #[test]
    fn test_health_success() {
        let mut state = state();
        let NetworkCommand::CheckHealth { id } = state.check_health() else {
            panic!("expected CheckHealth");
        };
        let status = ServiceStatus { message: Some("running".into()), model_loaded: Some(true), device: Some("cpu".into()) };
        state.handle_response(NetworkResponse::HealthChecked { id, result: Ok(status.clone()) });
        assert_eq!(state.health, ServiceHealth::Online(status));
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Idle);
    }

    #[test]
    fn test_select_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, [1u8; 16]).unwrap();

        let mut state = state();
        for c in path.display().to_string().chars() {
            state.path_char(c);
        }
        match state.select_path() {
            Some(NetworkCommand::SubmitFile { file, .. }) => {
                assert_eq!(file.name, "cat.png");
                assert_eq!(file.size, 16);
            }
            other => panic!("expected SubmitFile, got {other:?}"),
        }
    }

    #[test]
    fn test_select_missing_path() {
        let mut state = state();
        state.path_input = "/definitely/not/here.png".into();
        assert!(state.select_path().is_none());
        assert_eq!(state.to_render_state().error_kind, Some(ErrorKind::LocalRead));

        // Dropping a file from the error screen starts over
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.jpg");
        std::fs::write(&path, [1u8; 4]).unwrap();
        let cmd = state.drop_file(&format!("'{}'", path.display()));
        assert!(matches!(cmd, Some(NetworkCommand::SubmitFile { .. })));
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Processing);
    }

    #[test]
    fn test_empty_path_is_ignored() {
        let mut state = state();
        state.path_input = "   ".into();
        assert!(state.select_path().is_none());
        assert_eq!(state.session.phase_kind(), ApplicationPhase::Idle);
    }
}
