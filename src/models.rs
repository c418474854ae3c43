use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{ACCENT_BLUE, ACCENT_GREEN, BLACK, WHITE};
use crate::error::SessionError;

/// 24-bit color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Relative luminance in 0..=255, good enough to pick a readable label color
    pub fn luma(&self) -> u8 {
        ((self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000) as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("color must be in #RRGGBB or #RGB format, got {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `#RRGGBB`, `#RGB`, with or without the `#`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let err = || ParseColorError(s.to_string());

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        match hex.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
                Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => Err(err()),
        }
    }
}

/// The image the user picked. Never mutated after intake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    /// Declared MIME type, derived from the extension
    pub mime: String,
    pub size: u64,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = display_name(&path);
        let mime = mime_from_path(&path).to_string();
        SourceFile { path, name, mime, size }
    }

    /// Stat a path and describe it. Contents are not read here.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let name = display_name(path);
        let metadata =
            std::fs::metadata(path).map_err(|e| SessionError::local_read(name.clone(), e))?;
        if !metadata.is_file() {
            return Err(SessionError::local_read(name, "not a regular file"));
        }
        Ok(SourceFile::new(path, metadata.len()))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// MIME type for a file extension, the way a browser fills in `File.type`
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// What the "before" panel shows for the source image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    pub mime: String,
    pub byte_len: usize,
    /// Pixel size, when the header could be probed
    pub dimensions: Option<(u32, u32)>,
}

/// The cutout returned by the service
#[derive(Clone, Debug, PartialEq)]
pub struct RemovalResult {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub dimensions: Option<(u32, u32)>,
    pub time_ms: u64,
    pub received_at: DateTime<Utc>,
}

impl RemovalResult {
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// Backdrop shown behind the cutout in the result preview
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BackdropOption {
    #[default]
    Transparent,
    White,
    Black,
    AccentBlue,
    AccentGreen,
    Custom(Rgb),
}

impl BackdropOption {
    /// Options with a fixed appearance, in picker order
    pub const PRESETS: [BackdropOption; 5] = [
        BackdropOption::Transparent,
        BackdropOption::White,
        BackdropOption::Black,
        BackdropOption::AccentBlue,
        BackdropOption::AccentGreen,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BackdropOption::Transparent => "Transparent",
            BackdropOption::White => "White",
            BackdropOption::Black => "Black",
            BackdropOption::AccentBlue => "Blue",
            BackdropOption::AccentGreen => "Green",
            BackdropOption::Custom(_) => "Custom",
        }
    }

    /// Solid color behind the cutout, `None` for the checkerboard
    pub fn fill_color(&self) -> Option<Rgb> {
        match self {
            BackdropOption::Transparent => None,
            BackdropOption::White => Some(WHITE),
            BackdropOption::Black => Some(BLACK),
            BackdropOption::AccentBlue => Some(ACCENT_BLUE),
            BackdropOption::AccentGreen => Some(ACCENT_GREEN),
            BackdropOption::Custom(color) => Some(*color),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, BackdropOption::Custom(_))
    }
}

/// Which screen is up. Fully determines the valid user actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ApplicationPhase {
    #[default]
    Idle,
    Processing,
    ResultReady,
    Error,
}

/// Body of the service's liveness endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model_loaded: Option<bool>,
    #[serde(default)]
    pub device: Option<String>,
}
