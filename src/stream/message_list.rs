use tracing::warn;

use crate::models::{Message, MessageId};

use super::MessageMutation;

/// Ordered chat transcript. Append-only except for in-place content updates of
/// the message currently being streamed.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a mutation and return the message it touched.
    ///
    /// An update for an id that is no longer in the list is dropped.
    pub fn apply(&mut self, mutation: MessageMutation) -> Option<&Message> {
        match mutation {
            MessageMutation::Append(message) => {
                self.messages.push(message);
                self.messages.last()
            }
            MessageMutation::Update { id, content } => {
                // The streamed message is almost always the newest one
                let Some(index) = self.messages.iter().rposition(|m| m.id == id) else {
                    warn!(message_id = %id, "Update for unknown message dropped");
                    return None;
                };
                let message = &mut self.messages[index];
                message.content = content;
                Some(&*message)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
