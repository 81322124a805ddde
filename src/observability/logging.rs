//! Structured request logging.
//!
//! # Responsibilities
//! - Build log entries with the fixed mandatory fields
//! - Merge caller-supplied extra fields under a defined collision policy
//! - Write one serialized line per entry, atomically, to a shared sink
//!
//! # Design Decisions
//! - Mandatory fields are a fixed record; extras are a separate map.
//!   On collision the mandatory field wins and the extra key is dropped.
//! - One `write_all` per entry: entries from concurrent requests may
//!   interleave with each other, but never within a single line
//! - A value that fails to serialize degrades to a marker string; the
//!   emitter never panics and never fails the request

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Request id stamped on entries emitted outside any request scope.
pub const UNKNOWN_REQUEST_ID: &str = "unknown";

/// Mandatory entry fields; colliding extra keys are dropped.
const RESERVED_FIELDS: &[&str] = &["timestamp", "level", "message", "service", "request_id"];

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ERROR")]
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured log entry.
///
/// Immutable once built; serialized as a single JSON object with the
/// extras flattened alongside the mandatory fields.
#[derive(Debug, Serialize)]
pub struct LogEntry {
    /// UTC timestamp, RFC 3339 with a trailing `Z`.
    pub timestamp: String,
    pub level: Level,
    pub message: String,
    pub service: String,
    pub request_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogEntry {
    /// Build an entry. Extra keys that collide with a mandatory field are
    /// dropped so the flattened output never carries duplicate keys.
    pub fn new(
        service: &str,
        level: Level,
        message: &str,
        request_id: &str,
        mut extra: Map<String, Value>,
    ) -> Self {
        for field in RESERVED_FIELDS {
            extra.remove(*field);
        }
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            level,
            message: message.to_string(),
            service: service.to_string(),
            request_id: request_id.to_string(),
            extra,
        }
    }
}

/// Convert a value for inclusion in a log entry, substituting an explicit
/// marker when serialization fails.
pub fn field_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| Value::String(format!("<serialization error: {}>", e)))
}

/// Writes structured entries to a shared sink, one line per entry.
///
/// Cheap to clone; all clones share the same sink.
#[derive(Clone)]
pub struct LogEmitter {
    service: Arc<str>,
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LogEmitter {
    /// Emitter writing to standard output.
    pub fn stdout(service: &str) -> Self {
        Self::with_sink(service, Box::new(std::io::stdout()))
    }

    /// Emitter writing to an arbitrary sink. Tests inject an in-memory
    /// buffer here to assert on emitted entries.
    pub fn with_sink(service: &str, sink: Box<dyn Write + Send>) -> Self {
        Self {
            service: Arc::from(service),
            sink: Arc::new(Mutex::new(sink)),
        }
    }

    /// Build and write one entry.
    ///
    /// `extra` is expected to be a JSON object; a non-object value is
    /// carried under a `detail` key rather than rejected.
    pub fn emit(&self, level: Level, message: &str, request_id: &str, extra: Value) {
        let extra = match extra {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("detail".to_string(), other);
                map
            }
        };
        let entry = LogEntry::new(&self.service, level, message, request_id, extra);
        let line = serde_json::to_string(&entry).unwrap_or_else(|e| {
            // Degraded entry: keep the event, flag the failure.
            format!(
                "{{\"timestamp\":{:?},\"level\":{:?},\"message\":{:?},\"service\":{:?},\"request_id\":{:?},\"serialization_error\":{:?}}}",
                entry.timestamp,
                level.as_str(),
                entry.message,
                entry.service,
                entry.request_id,
                e.to_string(),
            )
        });

        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = sink.write_all(format!("{}\n", line).as_bytes());
        let _ = sink.flush();
    }

    pub fn info(&self, message: &str, request_id: &str, extra: Value) {
        self.emit(Level::Info, message, request_id, extra);
    }

    pub fn warn(&self, message: &str, request_id: &str, extra: Value) {
        self.emit(Level::Warn, message, request_id, extra);
    }

    pub fn error(&self, message: &str, request_id: &str, extra: Value) {
        self.emit(Level::Error, message, request_id, extra);
    }
}
