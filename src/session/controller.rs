//! Session and stream lifecycle.
//!
//! [`ChatController`] owns the message list, the event mapper, the session id
//! and the single active exchange. The transport runs in a spawned task that
//! forwards frames over an unbounded channel; every state change happens when
//! the owner applies an update, so nothing here is shared or locked.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::TransportError;
use crate::models::{Message, SessionId, StreamRequest};
use crate::sse::{parse_agent_event, AgentEvent, SseFrame};
use crate::stream::{EventMapper, MessageList, MessageMutation, StreamingPointer};
use crate::traits::FrameSource;

use super::ChatObserver;

/// Result of [`ChatController::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The question was appended and the exchange started
    Started,
    /// An exchange is already running; nothing happened
    AlreadyStreaming,
    /// The question was blank; nothing happened
    EmptyQuestion,
}

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    Idle,
    Streaming,
}

/// What the transport task reports
#[derive(Debug)]
pub enum UpdateKind {
    /// One decoded frame
    Frame(SseFrame),
    /// The transport failed; terminal for the exchange
    Failed(TransportError),
    /// The frame stream closed
    Ended,
}

/// A transport report tagged with the exchange it belongs to
#[derive(Debug)]
pub struct StreamUpdate {
    pub exchange: u64,
    pub kind: UpdateKind,
}

/// Drives chat exchanges and holds the observable chat state.
///
/// `send` spawns onto the current tokio runtime, so it must be called from
/// within one.
pub struct ChatController {
    source: Arc<dyn FrameSource>,
    messages: MessageList,
    mapper: EventMapper,
    phase: StreamPhase,
    error: Option<String>,
    session_id: Option<SessionId>,
    /// Number of the current (or last) exchange; stale updates carry an older one
    exchange: u64,
    task: Option<JoinHandle<()>>,
    update_tx: mpsc::UnboundedSender<StreamUpdate>,
    update_rx: mpsc::UnboundedReceiver<StreamUpdate>,
    observer: Option<Box<dyn ChatObserver>>,
}

impl ChatController {
    pub fn new(source: Arc<dyn FrameSource>) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        Self {
            source,
            messages: MessageList::new(),
            mapper: EventMapper::new(),
            phase: StreamPhase::Idle,
            error: None,
            session_id: None,
            exchange: 0,
            task: None,
            update_tx,
            update_rx,
            observer: None,
        }
    }

    /// Attach the list-update callback.
    pub fn with_observer(mut self, observer: Box<dyn ChatObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Box<dyn ChatObserver>) {
        self.observer = Some(observer);
    }

    pub fn messages(&self) -> &[Message] {
        self.messages.as_slice()
    }

    pub fn is_streaming(&self) -> bool {
        self.phase == StreamPhase::Streaming
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Last surfaced error, cleared by the next send or a session clear
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn streaming_pointer(&self) -> Option<&StreamingPointer> {
        self.mapper.streaming_pointer()
    }

    /// Start an exchange for `question`.
    ///
    /// The user message is in the list by the time this returns; everything
    /// else arrives through [`apply_update`](Self::apply_update).
    pub fn send(&mut self, question: &str) -> SendOutcome {
        if self.is_streaming() {
            debug!("Send ignored, exchange already streaming");
            return SendOutcome::AlreadyStreaming;
        }
        if question.trim().is_empty() {
            return SendOutcome::EmptyQuestion;
        }

        self.error = None;
        self.mapper.reset();
        let session_id = self
            .session_id
            .get_or_insert_with(SessionId::generate)
            .clone();

        self.apply_mutation(MessageMutation::Append(Message::user(question)));

        self.exchange += 1;
        self.phase = StreamPhase::Streaming;
        info!(
            exchange = self.exchange,
            session_id = %session_id,
            transport = self.source.name(),
            "Exchange started"
        );

        let request = StreamRequest::with_session(question, session_id);
        self.task = Some(spawn_exchange(
            Arc::clone(&self.source),
            request,
            self.exchange,
            self.update_tx.clone(),
        ));

        SendOutcome::Started
    }

    /// Abort the running exchange. No-op when idle; never sets an error.
    pub fn stop(&mut self) {
        if !self.is_streaming() {
            return;
        }
        info!(exchange = self.exchange, "Exchange stopped by user");
        self.finish_exchange();
    }

    /// Stop, forget the session and wipe the transcript.
    pub fn clear_session(&mut self) {
        self.stop();
        self.mapper.reset();
        self.messages.clear();
        self.error = None;
        if let Some(session_id) = self.session_id.take() {
            info!(session_id = %session_id, "Session cleared");
        }
    }

    /// Wait for the next transport report.
    ///
    /// Cancel-safe, for use in `tokio::select!`. Pending forever while idle.
    pub async fn next_update(&mut self) -> Option<StreamUpdate> {
        self.update_rx.recv().await
    }

    /// Apply updates until the current exchange finishes.
    pub async fn run_until_idle(&mut self) {
        while self.is_streaming() {
            match self.update_rx.recv().await {
                Some(update) => self.apply_update(update),
                None => break,
            }
        }
    }

    /// Apply one transport report. Reports from a finished exchange are discarded.
    pub fn apply_update(&mut self, update: StreamUpdate) {
        if update.exchange != self.exchange || !self.is_streaming() {
            debug!(
                exchange = update.exchange,
                current = self.exchange,
                "Discarding stale stream update"
            );
            return;
        }

        match update.kind {
            UpdateKind::Frame(frame) => self.apply_frame(frame),
            UpdateKind::Failed(err) => {
                warn!(
                    exchange = self.exchange,
                    code = err.error_code(),
                    error = %err,
                    "Transport failed"
                );
                self.surface_error(err.user_message());
                self.finish_exchange();
            }
            UpdateKind::Ended => {
                info!(exchange = self.exchange, "Stream closed without done event");
                self.finish_exchange();
            }
        }
    }

    fn apply_frame(&mut self, frame: SseFrame) {
        let event = match parse_agent_event(frame) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "Dropping unusable event");
                return;
            }
        };
        debug!(event_type = event.event_type_name(), "Event received");

        match event {
            AgentEvent::Done(done) => {
                info!(
                    exchange = self.exchange,
                    session_id = ?done.session_id,
                    message_count = ?done.message_count,
                    "Exchange complete"
                );
                self.finish_exchange();
            }
            AgentEvent::Error(payload) => {
                let (mutation, error_text) = self.mapper.handle_error(payload);
                self.apply_mutation(mutation);
                warn!(exchange = self.exchange, error = %error_text, "Agent reported error");
                self.surface_error(error_text);
                self.finish_exchange();
            }
            event => {
                if let Some(mutation) = self.mapper.handle(event) {
                    self.apply_mutation(mutation);
                }
            }
        }
    }

    fn apply_mutation(&mut self, mutation: MessageMutation) {
        let appended = matches!(mutation, MessageMutation::Append(_));
        let Some(message) = self.messages.apply(mutation) else {
            return;
        };
        if let Some(observer) = self.observer.as_mut() {
            if appended {
                observer.on_message(message);
            } else {
                observer.on_update(message);
            }
        }
    }

    fn surface_error(&mut self, error: String) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_error(&error);
        }
        self.error = Some(error);
    }

    /// Return to idle: close the transport, drop the pointer, clear the flag.
    fn finish_exchange(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.mapper.reset();
        self.phase = StreamPhase::Idle;
        if let Some(observer) = self.observer.as_mut() {
            observer.on_idle();
        }
    }
}

impl Drop for ChatController {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for ChatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController")
            .field("transport", &self.source.name())
            .field("messages", &self.messages.len())
            .field("phase", &self.phase)
            .field("error", &self.error)
            .field("session_id", &self.session_id)
            .field("exchange", &self.exchange)
            .finish()
    }
}

/// Open the frame stream and forward everything it yields, tagged with `exchange`.
fn spawn_exchange(
    source: Arc<dyn FrameSource>,
    request: StreamRequest,
    exchange: u64,
    tx: mpsc::UnboundedSender<StreamUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let send = |kind| tx.send(StreamUpdate { exchange, kind }).is_ok();

        let mut frames = match source.open(&request).await {
            Ok(frames) => frames,
            Err(err) => {
                send(UpdateKind::Failed(err));
                return;
            }
        };

        while let Some(item) = frames.next().await {
            match item {
                Ok(frame) => {
                    if !send(UpdateKind::Frame(frame)) {
                        // Controller dropped
                        return;
                    }
                }
                Err(err) => {
                    send(UpdateKind::Failed(err));
                    return;
                }
            }
        }

        send(UpdateKind::Ended);
    })
}
