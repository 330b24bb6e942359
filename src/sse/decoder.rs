//! Incremental SSE frame decoder
//!
//! Turns raw byte chunks, exactly as delivered by the transport, into decoded
//! [`SseFrame`]s. A record may span several chunks and a chunk may carry several
//! records; the emitted frame sequence does not depend on where the bytes were
//! split, including splits inside a multi-byte UTF-8 sequence.

use std::collections::VecDeque;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;

use crate::sse::events::{SseFrame, SseLine};
use crate::sse::parser::parse_sse_line;

/// Stateful decoder that accumulates bytes and emits complete frames
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Decoded text not yet terminated by a line feed
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    utf8_tail: Vec<u8>,
    /// Event type waiting for its data line
    pending_event: Option<String>,
}

impl FrameDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes, returning every frame it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.push_bytes(chunk);

        let buffer = std::mem::take(&mut self.buffer);
        let mut frames = Vec::new();
        let mut consumed = 0;
        while let Some(offset) = buffer[consumed..].find('\n') {
            let end = consumed + offset;
            let line = buffer[consumed..end].trim_end_matches('\r');
            if let Some(frame) = self.process_line(line) {
                frames.push(frame);
            }
            consumed = end + 1;
        }

        // Keep only the unterminated remainder
        self.buffer = buffer;
        self.buffer.drain(..consumed);
        frames
    }

    /// Signal the end of input. Any unterminated line is discarded.
    pub fn finish(&mut self) {
        if !self.buffer.is_empty() || !self.utf8_tail.is_empty() {
            tracing::debug!(
                discarded_bytes = self.buffer.len() + self.utf8_tail.len(),
                "SSE stream ended with an unterminated line"
            );
        }
        self.reset();
    }

    /// Clear all buffered state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.utf8_tail.clear();
        self.pending_event = None;
    }

    /// Event type currently waiting for a data line
    pub fn pending_event(&self) -> Option<&str> {
        self.pending_event.as_deref()
    }

    /// Append chunk bytes to the text buffer, holding back an incomplete
    /// trailing UTF-8 sequence and replacing invalid ones with U+FFFD.
    fn push_bytes(&mut self, chunk: &[u8]) {
        let mut bytes = std::mem::take(&mut self.utf8_tail);
        bytes.extend_from_slice(chunk);

        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    self.buffer
                        .push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.utf8_tail = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
    }

    fn process_line(&mut self, line: &str) -> Option<SseFrame> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.pending_event = if event_type.is_empty() {
                    None
                } else {
                    Some(event_type.to_string())
                };
                None
            }
            SseLine::Data(raw) => {
                // Single use: a later unrelated data line never inherits this type
                let event_type = self.pending_event.take()?;
                match serde_json::from_str(raw) {
                    Ok(data) => Some(SseFrame { event_type, data }),
                    Err(e) => {
                        tracing::warn!(
                            event_type = %event_type,
                            error = %e,
                            "Dropping SSE frame with malformed JSON data"
                        );
                        None
                    }
                }
            }
            SseLine::Empty | SseLine::Other(_) => None,
        }
    }
}

/// Decode a stream of byte chunks into a stream of frames.
///
/// Errors from the chunk source are passed through unchanged. The frame stream
/// ends when the chunk source ends.
pub fn decode_frames<S, B, E>(chunks: S) -> impl Stream<Item = Result<SseFrame, E>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    stream::unfold(
        (chunks, FrameDecoder::new(), VecDeque::new()),
        |(mut chunks, mut decoder, mut ready)| async move {
            loop {
                if let Some(frame) = ready.pop_front() {
                    return Some((Ok(frame), (chunks, decoder, ready)));
                }

                match chunks.next().await {
                    Some(Ok(chunk)) => ready.extend(decoder.feed(chunk.as_ref())),
                    Some(Err(e)) => return Some((Err(e), (chunks, decoder, ready))),
                    None => {
                        decoder.finish();
                        return None;
                    }
                }
            }
        },
    )
}
