use std::path::{Path, PathBuf};

use tokio::sync::broadcast;
use tracing::warn;

/// Pending notifications kept per subscriber before the oldest is
/// dropped.
const CHANNEL_CAPACITY: usize = 16;

/// A native "file dropped on the window" notification.
///
/// The payload is an ordered sequence of file paths. Only the first
/// entry is meaningful to the coordinator; the remaining paths of a
/// multi-file drop are discarded by design.
#[derive(Debug, Clone)]
pub struct DropEvent {
    paths: Vec<PathBuf>,
}

impl DropEvent {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// The dropped file, i.e. the payload's first entry.
    pub fn first_path(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    /// True for a notification that carried no paths at all. Such
    /// events are ignored, they are not an error.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Publisher side of the drop notification channel.
///
/// The platform bridge (the terminal event pump) publishes one event
/// per native notification; the screen's listener consumes them through
/// a [`DropSubscription`].
#[derive(Debug, Clone)]
pub struct DropChannel {
    tx: broadcast::Sender<DropEvent>,
}

impl DropChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish one notification. Events published while no screen is
    /// subscribed are dropped silently.
    pub fn publish(&self, event: DropEvent) {
        let _ = self.tx.send(event);
    }

    /// Subscribe for the lifetime of the returned handle.
    ///
    /// The subscription is scoped: it is established exactly once when
    /// the owning screen is constructed, and dropping the handle tears
    /// it down. Re-rendering the screen must not create another one.
    pub fn subscribe(&self) -> DropSubscription {
        DropSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for DropChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped subscription handle; unsubscribes on drop.
pub struct DropSubscription {
    rx: broadcast::Receiver<DropEvent>,
}

impl DropSubscription {
    /// The next pending notification, if any. Never blocks.
    pub fn try_next(&mut self) -> Option<DropEvent> {
        use broadcast::error::TryRecvError;

        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "drop notifications lagged");
                    continue;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => {
                    return None;
                }
            }
        }
    }
}
