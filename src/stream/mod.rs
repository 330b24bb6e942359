//! Turning decoded agent events into chat messages.
//!
//! [`EventMapper`] maps each event to a [`MessageMutation`], the controller
//! applies it to a [`MessageList`].

mod coalescer;
mod mapper;
mod message_list;

pub use coalescer::{DeltaCoalescer, StreamingKind, StreamingPointer};
pub use mapper::EventMapper;
pub use message_list::MessageList;

use crate::models::{Message, MessageId};

/// A change to the message list produced by one event
#[derive(Debug, Clone, PartialEq)]
pub enum MessageMutation {
    /// Add a message at the end
    Append(Message),
    /// Replace the content of an existing message
    Update { id: MessageId, content: String },
}

impl MessageMutation {
    /// Id of the message this mutation targets
    pub fn message_id(&self) -> MessageId {
        match self {
            MessageMutation::Append(message) => message.id,
            MessageMutation::Update { id, .. } => *id,
        }
    }
}
