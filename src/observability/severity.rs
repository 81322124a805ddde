//! Severity derivation from response status.

use crate::observability::logging::Level;

/// Map a final status code to the severity of the completion entry.
///
/// Total over all inputs: 5xx grades ERROR, 4xx grades WARN, and anything
/// else (successes, redirects, out-of-range codes, or `None` for a
/// request that never produced a response) grades INFO.
pub fn severity_for_status(status: Option<u16>) -> Level {
    match status {
        Some(code) if (500..=599).contains(&code) => Level::Error,
        Some(code) if (400..=499).contains(&code) => Level::Warn,
        _ => Level::Info,
    }
}
