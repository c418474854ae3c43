//! Local preview loader - reads the picked file and describes it for the
//! "before" panel, independently of the remote call.

use std::io::Cursor;

use crate::error::SessionError;
use crate::models::{PreviewImage, SourceFile};

/// Read the whole source file. The bytes feed both the preview and the upload.
pub async fn read_source(file: &SourceFile) -> Result<Vec<u8>, SessionError> {
    tokio::fs::read(&file.path).await.map_err(|e| {
        tracing::warn!(path = %file.path.display(), error = %e, "Failed to read source file");
        SessionError::local_read(file.name.clone(), e)
    })
}

/// Build the preview from bytes already read
pub fn from_bytes(file: &SourceFile, bytes: &[u8]) -> PreviewImage {
    PreviewImage {
        mime: file.mime.clone(),
        byte_len: bytes.len(),
        dimensions: probe_dimensions(bytes),
    }
}

/// Read and describe in one step
#[cfg(test)]
pub async fn load(file: &SourceFile) -> Result<PreviewImage, SessionError> {
    let bytes = read_source(file).await?;
    Ok(from_bytes(file, &bytes))
}

/// Pixel size from the image header, without decoding pixel data
pub fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
