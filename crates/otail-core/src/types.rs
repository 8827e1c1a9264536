//! Core types for otail-core.
//!
//! This module defines the values shared across every layer: the telemetry
//! [`Kind`] discriminant and the immutable, display-ready [`Message`].

use serde::Deserialize;
use std::str::FromStr;

/// Telemetry category of a message.
///
/// The derived ordering is the tab order: logs, metrics, traces, then
/// unknown. `Unknown` payloads live in the logs partition of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Logs,
    Metrics,
    Traces,
    Unknown,
}

impl Kind {
    /// The three kinds that own a store partition and a tab, in display order.
    pub const TABS: [Kind; 3] = [Kind::Logs, Kind::Metrics, Kind::Traces];

    /// The partition this kind is stored and displayed under.
    pub fn partition(self) -> Kind {
        match self {
            Kind::Unknown => Kind::Logs,
            other => other,
        }
    }

    /// Index of the partition in [`Kind::TABS`].
    pub fn slot(self) -> usize {
        match self.partition() {
            Kind::Metrics => 1,
            Kind::Traces => 2,
            _ => 0,
        }
    }

    /// Capitalised tab label.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Logs => "Logs",
            Kind::Metrics => "Metrics",
            Kind::Traces => "Traces",
            Kind::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Logs => write!(f, "logs"),
            Kind::Metrics => write!(f, "metrics"),
            Kind::Traces => write!(f, "traces"),
            Kind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Returned by [`Kind::from_str`] for names that are not a telemetry kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown telemetry kind {0:?} (expected logs, metrics or traces)")]
pub struct ParseKindError(pub String);

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logs" | "log" => Ok(Kind::Logs),
            "metrics" | "metric" => Ok(Kind::Metrics),
            "traces" | "trace" => Ok(Kind::Traces),
            "unknown" => Ok(Kind::Unknown),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// A classified telemetry payload, split into display lines.
///
/// Created by the classifier and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    kind: Kind,
    lines: Vec<String>,
}

impl Message {
    pub fn new(kind: Kind, lines: Vec<String>) -> Self {
        Self { kind, lines }
    }

    /// Build a message by splitting `text` on line breaks.
    pub fn from_text(kind: Kind, text: &str) -> Self {
        Self::new(kind, text.lines().map(str::to_string).collect())
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Full text of the message, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("logs", Kind::Logs)]
    #[case("LOG", Kind::Logs)]
    #[case("metrics", Kind::Metrics)]
    #[case(" trace ", Kind::Traces)]
    #[case("unknown", Kind::Unknown)]
    fn parses_kind_names(#[case] input: &str, #[case] expected: Kind) {
        assert_eq!(input.parse::<Kind>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("spans".parse::<Kind>().is_err());
    }

    #[test]
    fn unknown_is_stored_as_logs() {
        assert_eq!(Kind::Unknown.partition(), Kind::Logs);
        assert_eq!(Kind::Unknown.slot(), Kind::Logs.slot());
        assert_eq!(Kind::Traces.slot(), 2);
    }

    #[test]
    fn tab_order_follows_ord() {
        let mut kinds = vec![Kind::Unknown, Kind::Traces, Kind::Logs, Kind::Metrics];
        kinds.sort();
        assert_eq!(kinds, vec![Kind::Logs, Kind::Metrics, Kind::Traces, Kind::Unknown]);
    }

    #[test]
    fn message_text_round_trips_lines() {
        let msg = Message::from_text(Kind::Logs, "{\n  \"a\": 1\n}");
        assert_eq!(msg.line_count(), 3);
        assert_eq!(msg.text(), "{\n  \"a\": 1\n}");
    }
}
