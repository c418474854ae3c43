//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state, then probe the backend once
        let _ = self.render_tx.send(self.state.to_render_state());
        let _ = self.network_tx.send(self.state.check_health());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Path entry
            UiEvent::PathChar(c) => self.state.path_char(c),
            UiEvent::PathBackspace => self.state.path_backspace(),
            UiEvent::SelectFile => {
                let cmd = self.state.select_path();
                self.send(cmd);
            }
            UiEvent::DropFile(text) => {
                let cmd = self.state.drop_file(&text);
                self.send(cmd);
            }

            // Backdrop
            UiEvent::PickBackdrop(option) => self.state.pick_backdrop(option),
            UiEvent::PickCustomBackdrop => self.state.pick_custom_backdrop(),
            UiEvent::StartColorEdit => self.state.start_color_edit(),
            UiEvent::ColorChar(c) => self.state.color_char(c),
            UiEvent::ColorBackspace => self.state.color_backspace(),
            UiEvent::StopColorEdit => self.state.stop_color_edit(),

            UiEvent::Download => {
                let cmd = self.state.download();
                self.send(cmd);
            }
            UiEvent::Reset => self.state.reset(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
