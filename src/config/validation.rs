//! Startup configuration validation.
//!
//! # Responsibilities
//! - Check presence and non-emptiness of every required key
//! - Report all gaps at once, in declaration order
//! - Build the immutable Config handed to the rest of the process
//!
//! # Design Decisions
//! - Returns all missing keys, not just the first
//! - Partial startup is forbidden: the caller exits on any gap, before
//!   any request is served
//! - The confirmation entry carries only declared non-secret fields
//! - Readiness re-queries the live source, not the cached Config

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::config::schema::{Config, CRITICAL_KEYS, REQUIRED_KEYS};
use crate::config::source::ConfigSource;
use crate::observability::logging::{LogEmitter, UNKNOWN_REQUEST_ID};

/// Fatal startup configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required keys absent or empty at startup.
    #[error("missing required configuration: [{}]", .0.join(", "))]
    MissingKeys(Vec<&'static str>),
}

/// Validate the full required key set against `source`.
///
/// On success returns the immutable [`Config`] and logs one confirmation
/// entry listing only non-secret fields. On failure logs one ERROR entry
/// naming every missing key in declaration order; the caller terminates
/// the process without serving a single request.
pub fn validate(source: &dyn ConfigSource, emitter: &LogEmitter) -> Result<Config, ConfigError> {
    emitter.info("Validating configuration", UNKNOWN_REQUEST_ID, json!({}));

    let mut values: HashMap<&'static str, String> = HashMap::new();
    let mut missing: Vec<&'static str> = Vec::new();

    for key in REQUIRED_KEYS {
        match source.get(key.name) {
            Some(value) if !value.is_empty() => {
                values.insert(key.name, value);
            }
            _ => missing.push(key.name),
        }
    }

    if !missing.is_empty() {
        emitter.error(
            "Missing required configuration",
            UNKNOWN_REQUEST_ID,
            json!({ "missing_keys": &missing }),
        );
        return Err(ConfigError::MissingKeys(missing));
    }

    let mut take = |name: &str| values.remove(name).unwrap_or_default();
    let config = Config {
        smtp_host: take("SMTP_HOST"),
        smtp_port: take("SMTP_PORT"),
        smtp_user: take("SMTP_USER"),
        smtp_pass: take("SMTP_PASS"),
        push_api_key: take("PUSH_API_KEY"),
        redis_url: take("REDIS_URL"),
        user_service_url: take("USER_SERVICE_URL"),
    };

    let mut fields = Map::new();
    for (name, value) in config.non_secret_fields() {
        fields.insert(name.to_string(), Value::String(value.to_string()));
    }
    emitter.info(
        "Configuration validated",
        UNKNOWN_REQUEST_ID,
        Value::Object(fields),
    );

    Ok(config)
}

/// The readiness probe's view of the live source.
#[derive(Debug)]
pub struct Readiness {
    /// Critical keys currently absent from the live source.
    pub missing: Vec<&'static str>,
}

impl Readiness {
    /// Whether every critical non-secret key is currently observable.
    pub fn config_loaded(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Re-check the critical non-secret keys against the live source so the
/// probe reflects configuration drift after startup.
pub fn readiness(source: &dyn ConfigSource) -> Readiness {
    let missing = CRITICAL_KEYS
        .iter()
        .copied()
        .filter(|key| !source.get(key).is_some_and(|value| !value.is_empty()))
        .collect();
    Readiness { missing }
}
