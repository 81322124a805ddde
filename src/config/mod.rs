//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! flat key/value source (environment, or in-memory in tests)
//!     → source.rs (ConfigSource lookup)
//!     → validation.rs (presence + non-emptiness, all gaps at once)
//!     → Config (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! Readiness probe:
//!     /ready → validation::readiness → re-query critical keys
//!              against the LIVE source (drift-aware)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once validated; no reload path
//! - No implicit defaults: every required key must be present and
//!   non-empty, or the process refuses to start
//! - Secrecy is a per-key declaration in the schema, not a logging
//!   convention

pub mod schema;
pub mod source;
pub mod validation;

pub use schema::{Config, RequiredKey, CRITICAL_KEYS, REQUIRED_KEYS};
pub use source::{ConfigSource, EnvSource, MapSource};
pub use validation::{readiness, validate, ConfigError, Readiness};
