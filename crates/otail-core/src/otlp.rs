//! OTLP/JSON envelopes for the three signal types.
//!
//! Only the resource/scope skeleton is typed; records, data points and spans
//! are kept as raw [`Value`]s. Unknown keys are skipped on decode and dropped
//! on re-encode, so a payload of one signal decodes as an *empty* envelope of
//! the others. Both the camelCase keys of the OTLP JSON mapping and their
//! snake_case spellings are accepted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An OTLP signal envelope that can tell whether it carries any resources.
pub trait Envelope: Serialize + for<'de> Deserialize<'de> {
    fn is_empty(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogsData {
    #[serde(default, alias = "resource_logs")]
    pub resource_logs: Vec<ResourceLogs>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLogs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,
    #[serde(default, alias = "scope_logs")]
    pub scope_logs: Vec<ScopeLogs>,
    #[serde(default, alias = "schema_url", skip_serializing_if = "String::is_empty")]
    pub schema_url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeLogs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Value>,
    #[serde(default, alias = "log_records")]
    pub log_records: Vec<Value>,
    #[serde(default, alias = "schema_url", skip_serializing_if = "String::is_empty")]
    pub schema_url: String,
}

impl Envelope for LogsData {
    fn is_empty(&self) -> bool {
        self.resource_logs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsData {
    #[serde(default, alias = "resource_metrics")]
    pub resource_metrics: Vec<ResourceMetrics>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,
    #[serde(default, alias = "scope_metrics")]
    pub scope_metrics: Vec<ScopeMetrics>,
    #[serde(default, alias = "schema_url", skip_serializing_if = "String::is_empty")]
    pub schema_url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Value>,
    #[serde(default)]
    pub metrics: Vec<Value>,
    #[serde(default, alias = "schema_url", skip_serializing_if = "String::is_empty")]
    pub schema_url: String,
}

impl Envelope for MetricsData {
    fn is_empty(&self) -> bool {
        self.resource_metrics.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracesData {
    #[serde(default, alias = "resource_spans")]
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,
    #[serde(default, alias = "scope_spans")]
    pub scope_spans: Vec<ScopeSpans>,
    #[serde(default, alias = "schema_url", skip_serializing_if = "String::is_empty")]
    pub schema_url: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSpans {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Value>,
    #[serde(default)]
    pub spans: Vec<Value>,
    #[serde(default, alias = "schema_url", skip_serializing_if = "String::is_empty")]
    pub schema_url: String,
}

impl Envelope for TracesData {
    fn is_empty(&self) -> bool {
        self.resource_spans.is_empty()
    }
}
