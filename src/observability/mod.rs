//! Observability for the contacts server.
//!
//! Counters for searches, store writes and imports, plus a timer that logs
//! operation durations through `tracing`.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
