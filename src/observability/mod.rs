//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured JSON entries, one line per event)
//!     → metrics.rs (counters, histograms)
//!
//! Payloads derived from request input pass through:
//!     → redact.rs (sensitive field masking) BEFORE logging.rs
//!
//! Completion entries are graded by:
//!     → severity.rs (status code → INFO/WARN/ERROR)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every entry (sentinel outside requests)
//! - Redact-then-log is a strict ordering, enforced at call sites
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
pub mod redact;
pub mod severity;

pub use logging::{LogEmitter, LogEntry, Level, UNKNOWN_REQUEST_ID};
pub use redact::{redact, redact_default, REDACTION_TOKEN, SENSITIVE_FIELDS};
pub use severity::severity_for_status;
