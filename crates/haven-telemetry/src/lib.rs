//! Haven Telemetry
//!
//! Consent-gated critical-event recording and metrics for the Haven safety
//! core. The event log is hash-chained for tamper detection and append-only;
//! export and retention belong to the storage collaborator.

pub mod critical;
pub mod metrics;
pub mod service;

pub use critical::{CriticalEvent, CriticalEventLog};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use service::CriticalEventService;
