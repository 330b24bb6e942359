//! Callbacks for rendering layers.

use crate::models::Message;

/// Receives message-list changes as the controller applies them.
///
/// All methods default to no-ops so implementors only pick what they render.
pub trait ChatObserver: Send {
    /// A message was appended to the list
    fn on_message(&mut self, _message: &Message) {}

    /// A streamed message's content was replaced with the longer accumulated text
    fn on_update(&mut self, _message: &Message) {}

    /// The exchange ended with a surfaced error
    fn on_error(&mut self, _error: &str) {}

    /// The controller returned to idle, for whatever reason
    fn on_idle(&mut self) {}
}
