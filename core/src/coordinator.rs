use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use tracing::{info, warn};

use crate::{
    error::TransferError,
    invoke::{Response, Router, UPLOAD_COMMAND, UploadRequest},
    status::TransferStatus,
};

/// What happened to a dropped path offered to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The guard passed and an upload invocation was started.
    Started,
    /// A transfer is already running; the drop was rejected.
    InFlight,
    /// A transfer already completed; the drop is a no-op.
    AlreadyDone,
}

/// Decides whether a drop starts a transfer and reflects its outcome.
///
/// The coordinator owns the screen's single piece of state. The guard
/// transition to `InFlight` happens synchronously in [`on_drop`], before
/// any asynchronous work, so overlapping drops cannot both pass it; the
/// spawned invocation settles the status to `Done` or `Failed` and the
/// shell's draw loop picks the change up through [`status`].
///
/// [`on_drop`]: TransferCoordinator::on_drop
/// [`status`]: TransferCoordinator::status
pub struct TransferCoordinator {
    status: Arc<RwLock<TransferStatus>>,
    router: Arc<Router>,
}

impl TransferCoordinator {
    pub fn new(router: Arc<Router>) -> Self {
        Self {
            status: Arc::new(RwLock::new(TransferStatus::Idle)),
            router,
        }
    }

    /// Current status snapshot for the renderer.
    pub fn status(&self) -> TransferStatus {
        self.status.read().unwrap().clone()
    }

    /// Offer one dropped path.
    ///
    /// Proceeds only when no transfer is running and none has completed;
    /// a failed attempt releases the guard, so a retry drop proceeds.
    /// When it proceeds, the invocation runs on the runtime and the
    /// caller returns immediately.
    pub fn on_drop(&self, path: PathBuf) -> DropOutcome {
        {
            let mut status = self.status.write().unwrap();
            match *status {
                TransferStatus::InFlight => return DropOutcome::InFlight,
                TransferStatus::Done(_) => return DropOutcome::AlreadyDone,
                TransferStatus::Idle | TransferStatus::Failed(_) => {
                    *status = TransferStatus::InFlight;
                }
            }
        }

        info!(path = %path.display(), "starting transfer");

        let status = self.status.clone();
        let router = self.router.clone();
        tokio::spawn(async move {
            let settled = match invoke_upload(&router, &path).await {
                Ok(message) => {
                    info!(%message, "transfer finished");
                    TransferStatus::Done(message)
                }
                Err(e) => {
                    warn!(error = %e, "transfer failed");
                    TransferStatus::Failed(e.to_string())
                }
            };
            *status.write().unwrap() = settled;
        });

        DropOutcome::Started
    }
}

/// Issue the `upload` invocation and decode its envelope.
async fn invoke_upload(
    router: &Router,
    path: &Path,
) -> Result<String, TransferError> {
    let request = UploadRequest {
        file: path.display().to_string(),
    };
    let args = serde_json::to_string(&request)
        .unwrap_or_else(|_| "{}".to_string());

    let reply = router.call(UPLOAD_COMMAND, vec![args]).await;

    let response: Response<String> = serde_json::from_str(&reply)
        .map_err(|e| TransferError::MalformedResponse(e.to_string()))?;

    if !response.is_success {
        return Err(TransferError::Rejected(
            response
                .error
                .unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    response.result.ok_or(TransferError::EmptyResponse)
}
