//! # Cutout
//!
//! A terminal front end for a remote background-removal service.
//!
//! ## Features
//! - Pick an image by typing its path or dropping it on the terminal
//! - Local validation (image type, 10 MB limit) before any upload
//! - Preview facts of the original next to the cutout
//! - Backdrops: transparent, white, black, two accents or a custom color
//! - Download as `removed_bg_<name>.png`
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;
pub mod preview;
pub mod backdrop;
pub mod export;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{Cli, Config};
pub use error::{ErrorKind, ServiceError, SessionError, ValidationError};
pub use models::{ApplicationPhase, BackdropOption, PreviewImage, RemovalResult, Rgb, SourceFile};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{NetworkActor, RemovalClient};
