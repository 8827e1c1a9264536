//! Configuration types for otail.
//!
//! [`Config::load`] reads `~/.config/otail/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::session::PausedPolicy;
use crate::types::Kind;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[stream]
endpoint           = "ws://127.0.0.1:12001"
origin             = "http://localhost/"
ping_interval_secs = 30
base_backoff_ms    = 500
max_backoff_ms     = 30000
buffer             = 1024

[ui]
initial_kind          = "logs"
theme                 = "default"
max_messages_per_kind = 0
paused_policy         = "drop"
paused_queue_limit    = 1024
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/otail/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stream: StreamSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// `[stream]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Keep-alive ping period; `0` disables pings.
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Frame channel capacity; frames beyond it are dropped.
    #[serde(default = "default_buffer")]
    pub buffer: usize,
}

fn default_endpoint() -> String { "ws://127.0.0.1:12001".to_string() }
fn default_origin() -> String { "http://localhost/".to_string() }
fn default_ping_interval_secs() -> u64 { 30 }
fn default_base_backoff_ms() -> u64 { 500 }
fn default_max_backoff_ms() -> u64 { 30_000 }
fn default_buffer() -> usize { 1024 }

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            origin: default_origin(),
            ping_interval_secs: default_ping_interval_secs(),
            base_backoff_ms: default_base_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            buffer: default_buffer(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_initial_kind")]
    pub initial_kind: Kind,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Messages kept per kind; `0` keeps everything.
    #[serde(default)]
    pub max_messages_per_kind: usize,
    #[serde(default)]
    pub paused_policy: PausedPolicy,
    #[serde(default = "default_paused_queue_limit")]
    pub paused_queue_limit: usize,
}

fn default_initial_kind() -> Kind { Kind::Logs }
fn default_theme() -> String { "default".to_string() }
fn default_paused_queue_limit() -> usize { 1024 }

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            initial_kind: default_initial_kind(),
            theme: default_theme(),
            max_messages_per_kind: 0,
            paused_policy: PausedPolicy::default(),
            paused_queue_limit: default_paused_queue_limit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/otail/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();
        Self::load_from(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))
    }

    /// Load from an explicit path, creating it with defaults if missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Parse a TOML document layered over the defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("otail")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
