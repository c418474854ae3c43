//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use crate::error::{ServiceError, SessionError};
use crate::export::Artifact;
use crate::models::{PreviewImage, RemovalResult, ServiceStatus, SourceFile};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Probe the service's liveness endpoint
    CheckHealth { id: u64 },
    /// Read the file, then preview it and upload it concurrently
    SubmitFile { id: u64, file: SourceFile },
    /// Write a downloaded cutout to disk
    SaveArtifact { artifact: Artifact, dir: PathBuf },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer.
/// `id` is the epoch of the submission or probe the response belongs to.
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    HealthChecked {
        id: u64,
        result: Result<ServiceStatus, ServiceError>,
    },
    /// The source could not be read; no upload was attempted
    ReadFailed { id: u64, error: SessionError },
    PreviewLoaded { id: u64, preview: PreviewImage },
    RemovalFinished {
        id: u64,
        result: Result<RemovalResult, ServiceError>,
    },
    ArtifactSaved { path: PathBuf },
    ArtifactFailed { file_name: String, message: String },
}

impl NetworkResponse {
    /// Epoch of the response, if it belongs to one
    pub fn id(&self) -> Option<u64> {
        match self {
            NetworkResponse::HealthChecked { id, .. }
            | NetworkResponse::ReadFailed { id, .. }
            | NetworkResponse::PreviewLoaded { id, .. }
            | NetworkResponse::RemovalFinished { id, .. } => Some(*id),
            NetworkResponse::ArtifactSaved { .. } | NetworkResponse::ArtifactFailed { .. } => None,
        }
    }

    /// Whether this response ends its submission
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NetworkResponse::ReadFailed { .. } | NetworkResponse::RemovalFinished { .. }
        )
    }
}
