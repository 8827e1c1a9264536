//! Classifier — turns a raw frame into a display-ready [`Message`].
//!
//! Decoding is attempted in a fixed order: logs → metrics → traces. The first
//! signal that decodes *and* carries at least one resource wins; the order is
//! the tie-break for payloads that satisfy several empty shells. Anything else
//! is tagged [`Kind::Unknown`] and rendered as generic indented JSON, or as the
//! raw bytes on a single line when it is not JSON at all.

use crate::otlp::{Envelope, LogsData, MetricsData, TracesData};
use crate::types::{Kind, Message};
use serde_json::Value;

/// Classify one frame. Never fails; undecodable payloads become `Unknown`.
pub fn classify(frame: &[u8]) -> Message {
    let value = match serde_json::from_slice::<Value>(frame) {
        Ok(value) => value,
        Err(_) => return Message::new(Kind::Unknown, vec![raw_line(frame)]),
    };

    // Signal envelopes are JSON objects; arrays would otherwise decode
    // positionally into the envelope structs.
    if value.is_object() {
        if let Some(lines) = decode::<LogsData>(&value) {
            return Message::new(Kind::Logs, lines);
        }
        if let Some(lines) = decode::<MetricsData>(&value) {
            return Message::new(Kind::Metrics, lines);
        }
        if let Some(lines) = decode::<TracesData>(&value) {
            return Message::new(Kind::Traces, lines);
        }
    }

    Message::new(Kind::Unknown, pretty_lines(&value).unwrap_or_else(|| vec![raw_line(frame)]))
}

/// Decode `value` as envelope `T`, returning its re-encoded pretty lines when
/// it is non-empty.
fn decode<T: Envelope>(value: &Value) -> Option<Vec<String>> {
    let envelope = T::deserialize(value).ok()?;
    if envelope.is_empty() {
        return None;
    }
    match serde_json::to_value(&envelope) {
        Ok(normalised) => pretty_lines(&normalised),
        // Re-encoding failed; show what arrived instead.
        Err(_) => pretty_lines(value),
    }
}

/// Two-space indented JSON, one entry per line. Object keys come out sorted.
fn pretty_lines(value: &Value) -> Option<Vec<String>> {
    let text = serde_json::to_string_pretty(value).ok()?;
    Some(text.split('\n').map(str::to_string).collect())
}

/// The frame as one display line: lossy UTF-8 with control characters blanked.
fn raw_line(frame: &[u8]) -> String {
    String::from_utf8_lossy(frame)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
