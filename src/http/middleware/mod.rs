//! HTTP middleware.

pub mod correlation;

pub use correlation::{correlation_middleware, ABORTED_STATUS};
