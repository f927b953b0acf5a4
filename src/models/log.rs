//! Test log views and log size formatting.

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::logs::LogMeta;

/// A log attached to a test, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LogInfo {
    /// Log type, e.g. `stdout`, `stderr`, `config.json`.
    #[serde(rename = "type")]
    pub log_type: String,
    /// Human readable size of the full log, e.g. `12.3k`.
    pub full_size: String,
    /// Locator of the full log in blob storage.
    pub storage: String,
    pub stack_trace: bool,
    pub patterns: Option<String>,
    /// Truncated log contents, only included on single-test views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl LogInfo {
    /// Build a log view; `blob` is decoded as UTF-8 with invalid sequences replaced.
    pub fn new(meta: LogMeta, blob: Option<&[u8]>) -> Self {
        LogInfo {
            log_type: meta.log_type,
            full_size: prettify_size(meta.size),
            storage: meta.storage,
            stack_trace: meta.stack_trace,
            patterns: meta.patterns,
            log: blob.map(|bytes| String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Binary output shown as text when it is valid UTF-8 and passed through
/// untouched otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LogPayload {
    Text(String),
    Raw(Vec<u8>),
}

impl LogPayload {
    pub fn decode(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Raw(err.into_bytes()),
        }
    }
}

/// Returns file size in human-readable format, e.g. `10k` instead of `10000`.
///
/// Sizes below 10 units of a suffix keep one decimal (`1.2k`), larger ones
/// are truncated to an integer (`12k`).
pub fn prettify_size(size: i64) -> String {
    if size < 1000 {
        return size.to_string();
    }
    let mut size = size;
    for suffix in ['k', 'M', 'G', 'T', 'P', 'E', 'Z'] {
        if size < 10_000 {
            return format!("{:.1}{}", size as f64 / 1000.0, suffix);
        }
        size /= 1000;
        if size < 1000 {
            return format!("{}{}", size, suffix);
        }
    }
    format!("{}Y", size)
}
