//! Chat session state and stream lifecycle.

mod controller;
mod observer;

pub use controller::{ChatController, SendOutcome, StreamPhase, StreamUpdate, UpdateKind};
pub use observer::ChatObserver;
