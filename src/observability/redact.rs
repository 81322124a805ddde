//! Sensitive field masking for logged payloads.
//!
//! # Responsibilities
//! - Mask sensitive fields in caller-supplied payload maps
//! - Leave every other field and the input itself untouched
//!
//! # Design Decisions
//! - Redaction is a pure transform: new map out, input unchanged
//! - Masking is irreversible; the token carries no trace of the value
//! - Redact-then-log is a strict ordering: any payload derived from
//!   request input passes through here before it reaches the emitter

use serde_json::{Map, Value};

/// Replacement token for masked values.
pub const REDACTION_TOKEN: &str = "***REDACTED***";

/// Field names that never reach the log unmasked.
pub const SENSITIVE_FIELDS: &[&str] = &["credit_card", "password", "ssn"];

/// Return a copy of `payload` with every field named in `sensitive`
/// replaced by [`REDACTION_TOKEN`].
///
/// The output has exactly the same key set as the input; fields outside
/// the sensitive set pass through unchanged.
pub fn redact(payload: &Map<String, Value>, sensitive: &[&str]) -> Map<String, Value> {
    payload
        .iter()
        .map(|(key, value)| {
            if sensitive.contains(&key.as_str()) {
                (key.clone(), Value::String(REDACTION_TOKEN.to_string()))
            } else {
                (key.clone(), value.clone())
            }
        })
        .collect()
}

/// [`redact`] with the default sensitive field set.
pub fn redact_default(payload: &Map<String, Value>) -> Map<String, Value> {
    redact(payload, SENSITIVE_FIELDS)
}
