//! Event-to-message mapping.
//!
//! Every typed [`AgentEvent`] becomes at most one [`MessageMutation`]. The
//! mapper owns the delta coalescer, so the streaming pointer is explicit state
//! rather than something captured by callbacks.

use crate::models::{Message, MessageKind};
use crate::sse::{
    AgentEvent, DataTablePayload, ErrorPayload, ToolCallPayload, ToolResultPayload,
    VisualizationPayload,
};

use super::coalescer::{DeltaCoalescer, StreamingKind, StreamingPointer};
use super::MessageMutation;

/// Maps agent events onto the message list
#[derive(Debug, Default)]
pub struct EventMapper {
    coalescer: DeltaCoalescer,
}

impl EventMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map one event to a message-list mutation.
    ///
    /// `error` and `done` produce nothing here: errors go through
    /// [`handle_error`](Self::handle_error) and `done` only ends the exchange.
    pub fn handle(&mut self, event: AgentEvent) -> Option<MessageMutation> {
        match event {
            AgentEvent::ThinkingDelta(delta) => {
                Some(self.coalescer.push(StreamingKind::Thinking, &delta.content))
            }
            AgentEvent::TextDelta(delta) => {
                Some(self.coalescer.push(StreamingKind::Assistant, &delta.content))
            }
            AgentEvent::ToolCall(call) => Some(self.tool_call(call)),
            AgentEvent::ToolResult(result) => Some(self.tool_result(result)),
            AgentEvent::DataTable(table) => Some(self.data_table(table)),
            AgentEvent::Visualization(vis) => Some(self.visualization(vis)),
            AgentEvent::Error(_) | AgentEvent::Done(_) => None,
        }
    }

    /// Append exactly one error message and return the display string `"{code}: {message}"`.
    pub fn handle_error(&mut self, error: ErrorPayload) -> (MessageMutation, String) {
        let display = format!("{}: {}", error.code, error.message);
        let message = Message::new(
            MessageKind::Error {
                error_code: error.code,
            },
            error.message,
        );
        (MessageMutation::Append(message), display)
    }

    /// Drop the streaming pointer. The message list is not touched.
    pub fn reset(&mut self) {
        self.coalescer.close();
    }

    pub fn streaming_pointer(&self) -> Option<&StreamingPointer> {
        self.coalescer.pointer()
    }

    fn tool_call(&mut self, call: ToolCallPayload) -> MessageMutation {
        let content = format!("Calling {}", call.name);
        self.append_closed(
            MessageKind::ToolCall {
                tool_name: call.name,
                tool_args: call.args,
                call_id: call.call_id,
            },
            content,
        )
    }

    fn tool_result(&mut self, result: ToolResultPayload) -> MessageMutation {
        self.append_closed(
            MessageKind::ToolResult {
                tool_name: result.name,
                call_id: result.call_id,
                success: result.success,
            },
            result.result,
        )
    }

    fn data_table(&mut self, table: DataTablePayload) -> MessageMutation {
        let content = format!("{} of {} rows", table.displayed_rows, table.total_rows);
        self.append_closed(
            MessageKind::DataTable {
                columns: table.columns,
                rows: table.rows,
                total_rows: table.total_rows,
                displayed_rows: table.displayed_rows,
            },
            content,
        )
    }

    fn visualization(&mut self, vis: VisualizationPayload) -> MessageMutation {
        self.append_closed(
            MessageKind::Visualization {
                visualization_type: vis.visualization_type,
                visualization_url: vis.url,
            },
            vis.filename,
        )
    }

    /// Non-delta messages close the open stream before they are appended
    fn append_closed(&mut self, kind: MessageKind, content: String) -> MessageMutation {
        self.coalescer.close();
        MessageMutation::Append(Message::new(kind, content))
    }
}
