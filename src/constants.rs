//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use crate::models::Rgb;

/// Default base URL of the background removal service
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Removal endpoint, relative to the base URL
pub const REMOVE_BACKGROUND_PATH: &str = "/remove-background";

/// Liveness endpoint, relative to the base URL
pub const HEALTH_PATH: &str = "/";

/// Multipart field carrying the image bytes
pub const UPLOAD_FIELD: &str = "file";

/// Part type used when the declared MIME type is unusable
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Largest file accepted for upload (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Message surfaced when the service fails without a usable detail
pub const GENERIC_FAILURE: &str = "Failed to process image";

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "cutout.log";

/// Prefix of exported file names
pub const EXPORT_PREFIX: &str = "removed_bg_";

/// Extension of exported file names
pub const EXPORT_EXTENSION: &str = "png";

// Backdrop palette
pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
pub const ACCENT_BLUE: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
pub const ACCENT_GREEN: Rgb = Rgb::new(0x10, 0xb9, 0x81);
pub const CHECKER_LIGHT: Rgb = Rgb::new(0xff, 0xff, 0xff);
pub const CHECKER_DARK: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

/// Initial value of the custom backdrop color
pub const DEFAULT_CUSTOM_COLOR: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);

/// Application name
pub const APP_NAME: &str = "Cutout";
