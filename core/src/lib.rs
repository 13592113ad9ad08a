//! Drop-to-transfer coordination for the chute shell.
//!
//! This crate owns the only place in the application where sequencing,
//! state and duplicate suppression matter: the path from a "file dropped
//! on the window" notification to a single rendered status message.
//!
//! It provides:
//! - `TransferStatus`: the screen's one piece of state, an explicit
//!   Idle / InFlight / Done / Failed machine.
//! - `DropChannel` / `DropSubscription`: the drop notification channel
//!   and its scoped subscription handle.
//! - `DropListener`: drains notifications and forwards the first dropped
//!   path of each to the coordinator.
//! - `Router`: the invocation mechanism; async commands registered by
//!   name, JSON arguments, a `Response` envelope.
//! - `TransferCoordinator`: guards against overlapping or repeated
//!   transfers and turns the `upload` invocation's outcome into status.
//!
//! The shell wires these together once per screen: subscribe on
//! construction, pump the listener from the event loop, render the
//! status snapshot every tick.

mod coordinator;
mod error;
mod event;
mod invoke;
mod listener;
mod status;

pub use coordinator::{DropOutcome, TransferCoordinator};
pub use error::TransferError;
pub use event::{DropChannel, DropEvent, DropSubscription};
pub use invoke::{
    Handler, HandlerFunction, Response, Router, UPLOAD_COMMAND, UploadRequest,
};
pub use listener::DropListener;
pub use status::TransferStatus;
