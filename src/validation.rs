//! File validation, run before anything else touches a picked file

use crate::constants::MAX_FILE_SIZE;
use crate::error::ValidationError;
use crate::models::SourceFile;

/// Check a file against the upload policy. First failing rule wins:
/// the declared type must be `image/*`, then the size must fit the ceiling.
pub fn validate(file: &SourceFile) -> Result<(), ValidationError> {
    validate_type(&file.mime)?;
    validate_size(file.size)?;
    Ok(())
}

/// The declared MIME type must belong to the `image/` family
pub fn validate_type(mime: &str) -> Result<(), ValidationError> {
    if !mime.starts_with("image/") {
        return Err(ValidationError::NotAnImage {
            mime: mime.to_string(),
        });
    }
    Ok(())
}

/// The byte size must not exceed [`MAX_FILE_SIZE`]
pub fn validate_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge {
            size,
            limit: MAX_FILE_SIZE,
        });
    }
    Ok(())
}
