use std::sync::Arc;

use anyhow::Result;
use chute_common::{AppConfig, register_outbox};
use chute_core::{
    DropChannel, DropEvent, DropListener, Router, TransferCoordinator,
    TransferStatus,
};

use crate::paste;

/// State owned by the visible screen.
pub struct App {
    drops: DropChannel,
    listener: DropListener,
    coordinator: Arc<TransferCoordinator>,
    status: TransferStatus,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = AppConfig::load()?;

        let mut router = Router::new();
        register_outbox(&mut router, config.get_outbox_dir());
        let coordinator =
            Arc::new(TransferCoordinator::new(Arc::new(router)));

        let drops = DropChannel::new();
        // Subscribed once here, for the lifetime of the screen.
        let listener = DropListener::attach(&drops, coordinator.clone());
        let status = coordinator.status();

        Ok(Self {
            drops,
            listener,
            coordinator,
            status,
        })
    }

    /// A file dropped onto the window arrives as pasted text carrying
    /// its path(s); publish it as one drop notification. An empty
    /// paste still publishes (and is then ignored downstream).
    pub fn on_paste(&self, text: &str) {
        self.drops.publish(DropEvent::new(paste::extract_paths(text)));
    }

    /// One tick of the event loop: pump pending drop notifications and
    /// refresh the rendered status snapshot.
    pub fn update(&mut self) {
        self.listener.poll();
        self.status = self.coordinator.status();
    }

    pub fn status(&self) -> &TransferStatus {
        &self.status
    }
}
