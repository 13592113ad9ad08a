use std::sync::Arc;

use tracing::debug;

use crate::{
    coordinator::TransferCoordinator,
    event::{DropChannel, DropSubscription},
};

/// Bridges drop notifications into the transfer coordinator.
///
/// The listener owns its channel subscription, which scopes it to the
/// screen: attach it once when the screen is constructed, pump it from
/// the event loop, and let it go down with the screen. It forwards
/// exactly one extracted path per notification, does not deduplicate or
/// batch, and never mutates status itself.
pub struct DropListener {
    subscription: DropSubscription,
    coordinator: Arc<TransferCoordinator>,
}

impl DropListener {
    pub fn attach(
        channel: &DropChannel,
        coordinator: Arc<TransferCoordinator>,
    ) -> Self {
        Self {
            subscription: channel.subscribe(),
            coordinator,
        }
    }

    /// Drain pending notifications, forwarding the first path of each.
    ///
    /// Notifications with an empty payload are skipped. Returns the
    /// number of paths forwarded.
    pub fn poll(&mut self) -> usize {
        let mut forwarded = 0;
        while let Some(event) = self.subscription.try_next() {
            let Some(path) = event.first_path() else {
                debug!("ignoring drop notification with empty payload");
                continue;
            };
            let outcome = self.coordinator.on_drop(path.to_path_buf());
            debug!(path = %path.display(), ?outcome, "forwarded drop");
            forwarded += 1;
        }
        forwarded
    }
}
