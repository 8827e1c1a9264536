//! Static OTLP/JSON frames used across harnesses.

/// A logs export with two records from one service.
pub const LOGS_FRAME: &str = r#"{"resourceLogs":[{"resource":{"attributes":[{"key":"service.name","value":{"stringValue":"checkout"}}]},"scopeLogs":[{"scope":{"name":"app"},"logRecords":[{"severityText":"INFO","body":{"stringValue":"order placed"}},{"severityText":"WARN","body":{"stringValue":"slow payment"}}]}]}]}"#;

/// A metrics export with a single gauge.
pub const METRICS_FRAME: &str = r#"{"resourceMetrics":[{"resource":{"attributes":[]},"scopeMetrics":[{"metrics":[{"name":"cpu.utilization","gauge":{"dataPoints":[{"asDouble":0.42}]}}]}]}]}"#;

/// A traces export with one span.
pub const TRACES_FRAME: &str = r#"{"resourceSpans":[{"scopeSpans":[{"spans":[{"name":"GET /cart","traceId":"5b8efff798038103d269b633813fc60c","spanId":"eee19b7ec3c1b174"}]}]}]}"#;

/// The same traces export using protobuf-style snake_case field names.
pub const TRACES_FRAME_SNAKE: &str =
    r#"{"resource_spans":[{"scope_spans":[{"spans":[{"name":"GET /cart"}]}]}]}"#;

/// JSON that is not any telemetry envelope.
pub const GENERIC_JSON_FRAME: &str = r#"{"hello":"world","n":1}"#;

/// Not JSON at all; contains a tab and a newline.
pub const RAW_FRAME: &[u8] = b"plain\ttext\nframe";

/// Every fixture frame, for sweeps.
pub const ALL_FRAMES: &[&[u8]] = &[
    LOGS_FRAME.as_bytes(),
    METRICS_FRAME.as_bytes(),
    TRACES_FRAME.as_bytes(),
    TRACES_FRAME_SNAKE.as_bytes(),
    GENERIC_JSON_FRAME.as_bytes(),
    RAW_FRAME,
];

/// `n` distinct frames tagged with their index, e.g. `{"seq":3}`.
pub fn numbered_frames(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| format!(r#"{{"seq":{i}}}"#).into_bytes()).collect()
}
