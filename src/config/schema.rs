//! Configuration schema definitions.
//!
//! The required key set is a fixed, declaration-ordered table. Each key
//! carries an explicit secrecy tag; secrecy is declared here, never
//! inferred from usage, so "this value may be logged" is checkable.

/// A configuration key the service cannot start without.
#[derive(Debug, Clone, Copy)]
pub struct RequiredKey {
    /// Environment-style key name.
    pub name: &'static str,

    /// Secret values never appear in any log entry.
    pub secret: bool,
}

/// Required keys, in the order they are reported when missing.
pub const REQUIRED_KEYS: &[RequiredKey] = &[
    RequiredKey { name: "SMTP_HOST", secret: false },
    RequiredKey { name: "SMTP_PORT", secret: false },
    RequiredKey { name: "SMTP_USER", secret: false },
    RequiredKey { name: "SMTP_PASS", secret: true },
    RequiredKey { name: "PUSH_API_KEY", secret: true },
    RequiredKey { name: "REDIS_URL", secret: false },
    RequiredKey { name: "USER_SERVICE_URL", secret: false },
];

/// Non-secret keys the readiness probe re-checks against the live source.
pub const CRITICAL_KEYS: &[&str] = &["SMTP_HOST", "REDIS_URL"];

/// Validated, immutable configuration.
///
/// Built exactly once at startup by the validator; read-only for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// SMTP relay host.
    pub smtp_host: String,

    /// SMTP relay port, kept as the raw source string.
    pub smtp_port: String,

    /// SMTP username.
    pub smtp_user: String,

    /// SMTP password. Secret: excluded from every log entry.
    pub smtp_pass: String,

    /// Push gateway API key. Secret: excluded from every log entry.
    pub push_api_key: String,

    /// Redis connection URL.
    pub redis_url: String,

    /// Base URL of the user service.
    pub user_service_url: String,
}

impl Config {
    fn value_of(&self, name: &str) -> &str {
        match name {
            "SMTP_HOST" => &self.smtp_host,
            "SMTP_PORT" => &self.smtp_port,
            "SMTP_USER" => &self.smtp_user,
            "SMTP_PASS" => &self.smtp_pass,
            "PUSH_API_KEY" => &self.push_api_key,
            "REDIS_URL" => &self.redis_url,
            "USER_SERVICE_URL" => &self.user_service_url,
            _ => "",
        }
    }

    /// Non-secret keys and their values, in declaration order. This is
    /// the only view of the config that may reach the log.
    pub fn non_secret_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        REQUIRED_KEYS
            .iter()
            .filter(|key| !key.secret)
            .map(move |key| (key.name, self.value_of(key.name)))
    }
}
