//! Delta coalescing for streamed thinking and assistant text.
//!
//! Holds the single streaming pointer. Consecutive deltas of the same kind
//! extend the message it points at; anything else starts a fresh message.

use crate::models::{Message, MessageId, MessageKind};

use super::MessageMutation;

/// Kinds of message that are built from deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamingKind {
    Thinking,
    Assistant,
}

impl StreamingKind {
    fn message_kind(self) -> MessageKind {
        match self {
            StreamingKind::Thinking => MessageKind::Thinking,
            StreamingKind::Assistant => MessageKind::Assistant,
        }
    }
}

/// The message currently receiving deltas
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingPointer {
    pub id: MessageId,
    /// Everything streamed into the message so far
    pub content: String,
    pub kind: StreamingKind,
}

/// Owner of the streaming pointer
#[derive(Debug, Default)]
pub struct DeltaCoalescer {
    pointer: Option<StreamingPointer>,
}

impl DeltaCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one delta into the stream.
    ///
    /// Returns an in-place update when the pointer already targets a message of
    /// `kind`, otherwise appends a new message and moves the pointer to it.
    pub fn push(&mut self, kind: StreamingKind, text: &str) -> MessageMutation {
        if let Some(pointer) = self.pointer.as_mut().filter(|p| p.kind == kind) {
            pointer.content.push_str(text);
            return MessageMutation::Update {
                id: pointer.id,
                content: pointer.content.clone(),
            };
        }

        let id = MessageId::new();
        self.pointer = Some(StreamingPointer {
            id,
            content: text.to_string(),
            kind,
        });
        MessageMutation::Append(Message::with_id(id, kind.message_kind(), text))
    }

    /// Close the open message, if any. The next delta starts a new message.
    pub fn close(&mut self) -> Option<StreamingPointer> {
        self.pointer.take()
    }

    pub fn pointer(&self) -> Option<&StreamingPointer> {
        self.pointer.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pointer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_delta_appends() {
        let mut coalescer = DeltaCoalescer::new();
        let mutation = coalescer.push(StreamingKind::Assistant, "Hel");

        match mutation {
            MessageMutation::Append(msg) => {
                assert_eq!(msg.kind, MessageKind::Assistant);
                assert_eq!(msg.content, "Hel");
                assert_eq!(coalescer.pointer().unwrap().id, msg.id);
            }
            other => panic!("Expected Append, got {:?}", other),
        }
    }

    #[test]
    fn test_same_kind_extends() {
        let mut coalescer = DeltaCoalescer::new();
        let first = coalescer.push(StreamingKind::Assistant, "Hel");
        let second = coalescer.push(StreamingKind::Assistant, "lo");

        let MessageMutation::Append(msg) = first else {
            panic!("Expected Append");
        };
        assert_eq!(
            second,
            MessageMutation::Update {
                id: msg.id,
                content: "Hello".to_string()
            }
        );
        assert_eq!(coalescer.pointer().unwrap().content, "Hello");
    }

    #[test]
    fn test_kind_switch_starts_new_message() {
        let mut coalescer = DeltaCoalescer::new();
        coalescer.push(StreamingKind::Thinking, "Checking schema");
        let mutation = coalescer.push(StreamingKind::Assistant, "The answer");

        match mutation {
            MessageMutation::Append(msg) => assert_eq!(msg.kind, MessageKind::Assistant),
            other => panic!("Expected Append, got {:?}", other),
        }
        assert_eq!(coalescer.pointer().unwrap().kind, StreamingKind::Assistant);
    }

    #[test]
    fn test_close_forces_new_message() {
        let mut coalescer = DeltaCoalescer::new();
        coalescer.push(StreamingKind::Assistant, "a");
        let closed = coalescer.close().unwrap();
        assert_eq!(closed.content, "a");
        assert!(!coalescer.is_open());

        let mutation = coalescer.push(StreamingKind::Assistant, "a");
        match mutation {
            MessageMutation::Append(msg) => assert_ne!(msg.id, closed.id),
            other => panic!("Expected Append, got {:?}", other),
        }
    }

    #[test]
    fn test_close_when_idle() {
        let mut coalescer = DeltaCoalescer::new();
        assert!(coalescer.close().is_none());
    }
}
