use std::{
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use chute_core::{
    DropChannel, DropEvent, DropListener, DropOutcome, Router,
    TransferCoordinator, TransferStatus, UPLOAD_COMMAND, UploadRequest,
};
use tokio::{
    sync::Notify,
    time::{Duration, sleep, timeout},
};

/// Records every invocation a test backend receives.
#[derive(Default)]
struct InvocationLog {
    calls: AtomicUsize,
    files: Mutex<Vec<String>>,
}

impl InvocationLog {
    fn record(&self, file: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.files.lock().unwrap().push(file.to_string());
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Coordinator wired to a backend that resolves with `message`.
fn coordinator_resolving(
    message: &str,
    log: Arc<InvocationLog>,
) -> TransferCoordinator {
    let message = message.to_string();
    let mut router = Router::new();
    router.add(UPLOAD_COMMAND, move |request: UploadRequest| {
        log.record(&request.file);
        let message = message.clone();
        async move { Ok::<_, anyhow::Error>(message) }
    });
    TransferCoordinator::new(Arc::new(router))
}

async fn wait_until_settled(
    coordinator: &TransferCoordinator,
) -> TransferStatus {
    timeout(Duration::from_secs(5), async {
        loop {
            let status = coordinator.status();
            if status.message().is_some() {
                return status;
            }
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("transfer never settled")
}

/// One drop on a fresh coordinator issues exactly one invocation,
/// carrying the dropped path.
#[tokio::test]
async fn first_drop_issues_single_invocation() {
    let log = Arc::new(InvocationLog::default());
    let coordinator = coordinator_resolving("sent 1 file", log.clone());

    let outcome = coordinator.on_drop(PathBuf::from("/tmp/a.txt"));
    assert_eq!(outcome, DropOutcome::Started);

    wait_until_settled(&coordinator).await;
    assert_eq!(log.calls(), 1);
    assert_eq!(
        log.files.lock().unwrap().as_slice(),
        ["/tmp/a.txt".to_string()]
    );
}

/// The backend's response string is rendered verbatim and never
/// overwritten by later drops.
#[tokio::test]
async fn successful_round_trip_keeps_backend_message() {
    let log = Arc::new(InvocationLog::default());
    let coordinator = coordinator_resolving("sent 1 file", log.clone());

    coordinator.on_drop(PathBuf::from("/tmp/a.txt"));
    let settled = wait_until_settled(&coordinator).await;
    assert_eq!(settled, TransferStatus::Done("sent 1 file".to_string()));

    for _ in 0..3 {
        let outcome = coordinator.on_drop(PathBuf::from("/tmp/b.txt"));
        assert_eq!(outcome, DropOutcome::AlreadyDone);
    }

    assert_eq!(log.calls(), 1);
    assert_eq!(coordinator.status(), settled);
}

/// Drops delivered through the listener: one notification, one
/// forwarded path, one invocation.
#[tokio::test]
async fn listener_forwards_first_path_per_notification() {
    let log = Arc::new(InvocationLog::default());
    let coordinator =
        Arc::new(coordinator_resolving("sent 1 file", log.clone()));

    let channel = DropChannel::new();
    let mut listener = DropListener::attach(&channel, coordinator.clone());

    channel.publish(DropEvent::new(vec![
        PathBuf::from("/tmp/a.txt"),
        PathBuf::from("/tmp/ignored.txt"),
    ]));
    assert_eq!(listener.poll(), 1);

    wait_until_settled(&coordinator).await;
    assert_eq!(log.calls(), 1);
    assert_eq!(
        log.files.lock().unwrap().as_slice(),
        ["/tmp/a.txt".to_string()]
    );
}

/// A notification with no paths issues no invocation and leaves the
/// coordinator idle.
#[tokio::test]
async fn empty_payload_is_a_no_op() {
    let log = Arc::new(InvocationLog::default());
    let coordinator =
        Arc::new(coordinator_resolving("sent 1 file", log.clone()));

    let channel = DropChannel::new();
    let mut listener = DropListener::attach(&channel, coordinator.clone());

    channel.publish(DropEvent::new(Vec::new()));
    assert_eq!(listener.poll(), 0);

    assert_eq!(log.calls(), 0);
    assert_eq!(coordinator.status(), TransferStatus::Idle);
}

/// A second drop delivered while the first invocation is unresolved is
/// rejected: the transfers are serialized, not conflated.
#[tokio::test]
async fn overlapping_drops_are_serialized() {
    let log = Arc::new(InvocationLog::default());
    let gate = Arc::new(Notify::new());

    let mut router = Router::new();
    {
        let log = log.clone();
        let gate = gate.clone();
        router.add(UPLOAD_COMMAND, move |request: UploadRequest| {
            log.record(&request.file);
            let gate = gate.clone();
            async move {
                gate.notified().await;
                Ok::<_, anyhow::Error>("sent 1 file".to_string())
            }
        });
    }
    let coordinator = TransferCoordinator::new(Arc::new(router));

    let first = coordinator.on_drop(PathBuf::from("/tmp/a.txt"));
    let second = coordinator.on_drop(PathBuf::from("/tmp/b.txt"));
    assert_eq!(first, DropOutcome::Started);
    assert_eq!(second, DropOutcome::InFlight);
    assert!(coordinator.status().is_in_flight());

    gate.notify_one();
    let settled = wait_until_settled(&coordinator).await;

    assert_eq!(settled, TransferStatus::Done("sent 1 file".to_string()));
    assert_eq!(log.calls(), 1);
    assert_eq!(
        log.files.lock().unwrap().as_slice(),
        ["/tmp/a.txt".to_string()]
    );
}

/// A rejecting invocation reaches a distinct error state, and the guard
/// is released so a retry drop can start a new transfer.
#[tokio::test]
async fn failure_is_rendered_and_retry_is_possible() {
    let log = Arc::new(InvocationLog::default());

    let mut router = Router::new();
    {
        let log = log.clone();
        router.add(UPLOAD_COMMAND, move |request: UploadRequest| {
            let attempt = log.calls();
            log.record(&request.file);
            async move {
                if attempt == 0 {
                    Err(anyhow::anyhow!("disk full"))
                } else {
                    Ok("sent 1 file".to_string())
                }
            }
        });
    }
    let coordinator = TransferCoordinator::new(Arc::new(router));

    coordinator.on_drop(PathBuf::from("/tmp/a.txt"));
    let failed = wait_until_settled(&coordinator).await;

    match &failed {
        TransferStatus::Failed(message) => {
            assert!(message.contains("disk full"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_ne!(failed, TransferStatus::Idle);

    let retry = coordinator.on_drop(PathBuf::from("/tmp/a.txt"));
    assert_eq!(retry, DropOutcome::Started);

    let settled = wait_until_settled(&coordinator).await;
    assert_eq!(settled, TransferStatus::Done("sent 1 file".to_string()));
    assert_eq!(log.calls(), 2);
}

/// A coordinator wired to a router with no `upload` handler still ends
/// in a user-visible error state rather than hanging or panicking.
#[tokio::test]
async fn missing_backend_surfaces_an_error() {
    let coordinator = TransferCoordinator::new(Arc::new(Router::new()));

    coordinator.on_drop(PathBuf::from("/tmp/a.txt"));
    let settled = wait_until_settled(&coordinator).await;

    match settled {
        TransferStatus::Failed(message) => {
            assert!(message.contains("Unknown command"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
