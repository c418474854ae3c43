//! Network actor - runs uploads, probes and file I/O in Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::SourceFile;
use crate::network::client::RemovalClient;
use crate::preview;

/// Network actor that processes service and file commands
pub struct NetworkActor {
    client: RemovalClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: RemovalClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::CheckHealth { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %client.base_url(), "Checking service health");
                                let result = client.health().await;
                                let _ = response_tx.send(NetworkResponse::HealthChecked { id, result });
                            });
                        }

                        Some(NetworkCommand::SubmitFile { id, file }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(submit(client, id, file, response_tx));
                        }

                        Some(NetworkCommand::SaveArtifact { artifact, dir }) => {
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                let response = match artifact.save(&dir).await {
                                    Ok(path) => {
                                        tracing::info!(path = %path.display(), "Cutout saved");
                                        NetworkResponse::ArtifactSaved { path }
                                    }
                                    Err(e) => {
                                        tracing::error!(file_name = %artifact.file_name, error = %e, "Failed to save cutout");
                                        NetworkResponse::ArtifactFailed {
                                            file_name: artifact.file_name.clone(),
                                            message: e.to_string(),
                                        }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            self.active_requests.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            tracing::error!(error = %e, "Network task panicked");
                        }
                    }
                }
            }
        }
    }
}

/// Read the file once, then build the preview and upload concurrently.
/// A failed read ends the submission without any remote call.
async fn submit(
    client: RemovalClient,
    id: u64,
    file: SourceFile,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
) {
    let bytes = match preview::read_source(&file).await {
        Ok(bytes) => bytes,
        Err(error) => {
            let _ = response_tx.send(NetworkResponse::ReadFailed { id, error });
            return;
        }
    };

    let preview_task = {
        let file = file.clone();
        let bytes = bytes.clone();
        let response_tx = response_tx.clone();
        tokio::task::spawn_blocking(move || {
            let preview = preview::from_bytes(&file, &bytes);
            let _ = response_tx.send(NetworkResponse::PreviewLoaded { id, preview });
        })
    };

    tracing::info!(id, name = %file.name, url = %client.base_url(), "Uploading file");
    let result = client.submit(&file, bytes).await;
    match &result {
        Ok(r) => tracing::info!(id, bytes = r.byte_len(), time_ms = r.time_ms, "Removal completed"),
        Err(e) => tracing::warn!(id, error = %e, "Removal failed"),
    }
    let _ = response_tx.send(NetworkResponse::RemovalFinished { id, result });

    let _ = preview_task.await;
}
