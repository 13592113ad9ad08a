use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chute_core::{Router, UPLOAD_COMMAND, UploadRequest};
use tracing::info;
use uuid::Uuid;

/// Register the local outbox backend as the `upload` command.
///
/// The backend stages each shared file into a unique session
/// subdirectory under `outbox_dir` and resolves with a one-line status
/// message. It validates the dropped path before touching the outbox,
/// so a bad drop rejects with a message instead of leaving a half
/// staged session behind.
pub fn register_outbox(router: &mut Router, outbox_dir: PathBuf) {
    router.add(UPLOAD_COMMAND, move |request: UploadRequest| {
        let outbox_dir = outbox_dir.clone();
        async move { stage_file(&outbox_dir, request).await }
    });
}

async fn stage_file(
    outbox_dir: &Path,
    request: UploadRequest,
) -> Result<String> {
    let path = PathBuf::from(&request.file);

    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!("Path is not a file: {}", path.display()));
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", path.display()))?
        .to_string();

    // Unique subdirectory per transfer, so repeated shares of files
    // with the same name never collide.
    let session_dir = outbox_dir.join(Uuid::new_v4().to_string());
    tokio::fs::create_dir_all(&session_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create outbox directory: {}",
                session_dir.display()
            )
        })?;

    let target = session_dir.join(&name);
    tokio::fs::copy(&path, &target)
        .await
        .with_context(|| {
            format!("Failed to stage file into outbox: {}", target.display())
        })?;

    info!(
        file = %path.display(),
        outbox = %session_dir.display(),
        "staged file for transfer"
    );

    Ok(format!("sent {name}"))
}
