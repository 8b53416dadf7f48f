//! SSE (Server-Sent Events) frame decoder
//!
//! Decodes the SSE format produced by the OnDemand streaming query API.
//! The wire format consists of:
//! - `data: <payload>` frames terminated by a blank line (`\n\n`)
//! - A literal `[DONE]` payload signaling end of the stream
//! - Payloads that are usually JSON but may be arbitrary text
//!
//! The decoder is fed arbitrary-sized byte chunks and emits complete
//! frames; it carries no knowledge of the transport that produced the
//! bytes.

use serde_json::Value;

/// Frame delimiter between SSE events.
const FRAME_DELIMITER: &str = "\n\n";

/// Prefix marking a meaningful frame.
const DATA_PREFIX: &str = "data:";

/// Sentinel payload marking end of a streamed response.
const DONE_SENTINEL: &str = "[DONE]";

/// A complete frame decoded from the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SseFrame {
    /// A frame whose payload parsed as JSON
    Json(Value),
    /// A frame whose payload was not valid JSON, passed through verbatim
    Raw(String),
    /// The `[DONE]` sentinel
    Done,
}

/// Classification of whatever remained in the buffer at end-of-stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamTail {
    /// Buffer was empty - every byte was resolved into frames
    Clean,
    /// Buffer held an undelimited `data:` frame ending in `[DONE]`,
    /// which counts as normal completion
    Done,
    /// Buffer held other undispatched data, reported as advisory
    Residual(String),
}

/// Stateful decoder that accumulates chunks and emits complete frames.
///
/// Invariant: between calls, the internal buffer always holds the suffix
/// of the raw stream not yet resolved into complete frames. Once the
/// `[DONE]` sentinel has been decoded the decoder is terminal and ignores
/// any further input.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Not-yet-terminated text carried between reads
    buffer: String,
    /// Set once the `[DONE]` sentinel has been decoded
    done: bool,
}

impl FrameDecoder {
    /// Create a new frame decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been decoded.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed a chunk of bytes to the decoder, returning every frame that
    /// became complete.
    ///
    /// Frames without the `data:` prefix and frames with an empty payload
    /// are consumed without being emitted. Decoding stops at the `[DONE]`
    /// sentinel: it is emitted as [`SseFrame::Done`] and any bytes after
    /// it (in this chunk or later ones) are not processed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        if self.done {
            return Vec::new();
        }

        self.buffer.push_str(&String::from_utf8_lossy(chunk));

        let mut frames = Vec::new();
        while let Some(end) = self.buffer.find(FRAME_DELIMITER) {
            let raw: String = self.buffer.drain(..end + FRAME_DELIMITER.len()).collect();
            let raw = &raw[..end];

            let payload = match raw.strip_prefix(DATA_PREFIX) {
                Some(rest) => rest.trim(),
                // Not a data frame - nothing to dispatch
                None => continue,
            };
            if payload.is_empty() {
                continue;
            }

            if payload == DONE_SENTINEL {
                frames.push(SseFrame::Done);
                self.done = true;
                break;
            }

            match serde_json::from_str::<Value>(payload) {
                Ok(value) => frames.push(SseFrame::Json(value)),
                Err(_) => frames.push(SseFrame::Raw(payload.to_string())),
            }
        }

        frames
    }

    /// Classify the residual buffer content at end-of-stream.
    ///
    /// An undelimited `data:` frame ending in `[DONE]` counts as normal
    /// completion; any other leftover text is surfaced so the caller can
    /// report it.
    pub fn finish(&mut self) -> StreamTail {
        let residual = self.buffer.trim();
        let tail = if residual.starts_with(DATA_PREFIX) && residual.ends_with(DONE_SENTINEL) {
            StreamTail::Done
        } else if !residual.is_empty() {
            StreamTail::Residual(residual.to_string())
        } else {
            StreamTail::Clean
        };
        self.buffer.clear();
        tail
    }
}
