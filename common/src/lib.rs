//! Shared application services for the chute shell: persistent user
//! configuration and the local outbox backend behind the `upload`
//! command.

mod config;
mod outbox;

pub use config::AppConfig;
pub use outbox::register_outbox;
