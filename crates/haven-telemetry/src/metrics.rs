//! Metrics collection and reporting

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for the safety core
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    messages_handled: AtomicU64,
    crisis_detections: AtomicU64,
    mode_transitions: AtomicU64,
    timers_armed: AtomicU64,
    timers_cancelled: AtomicU64,
    alerts_fired: AtomicU64,
    stale_fires: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                messages_handled: AtomicU64::new(0),
                crisis_detections: AtomicU64::new(0),
                mode_transitions: AtomicU64::new(0),
                timers_armed: AtomicU64::new(0),
                timers_cancelled: AtomicU64::new(0),
                alerts_fired: AtomicU64::new(0),
                stale_fires: AtomicU64::new(0),
            }),
        }
    }

    /// Record a handled message
    pub fn record_message(&self) {
        self.inner.messages_handled.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a crisis verdict
    pub fn record_crisis_detection(&self) {
        self.inner.crisis_detections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a mode transition
    pub fn record_mode_transition(&self) {
        self.inner.mode_transitions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an armed escalation timer
    pub fn record_timer_armed(&self) {
        self.inner.timers_armed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cancelled escalation timer
    pub fn record_timer_cancelled(&self) {
        self.inner.timers_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fired alert
    pub fn record_alert_fired(&self) {
        self.inner.alerts_fired.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a stale timer fire that was dropped
    pub fn record_stale_fire(&self) {
        self.inner.stale_fires.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_handled: self.inner.messages_handled.load(Ordering::Relaxed),
            crisis_detections: self.inner.crisis_detections.load(Ordering::Relaxed),
            mode_transitions: self.inner.mode_transitions.load(Ordering::Relaxed),
            timers_armed: self.inner.timers_armed.load(Ordering::Relaxed),
            timers_cancelled: self.inner.timers_cancelled.load(Ordering::Relaxed),
            alerts_fired: self.inner.alerts_fired.load(Ordering::Relaxed),
            stale_fires: self.inner.stale_fires.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub messages_handled: u64,
    pub crisis_detections: u64,
    pub mode_transitions: u64,
    pub timers_armed: u64,
    pub timers_cancelled: u64,
    pub alerts_fired: u64,
    pub stale_fires: u64,
}

impl MetricsSnapshot {
    /// Fraction of handled messages that produced a crisis verdict
    pub fn crisis_rate(&self) -> f64 {
        if self.messages_handled == 0 {
            0.0
        } else {
            self.crisis_detections as f64 / self.messages_handled as f64
        }
    }

    /// Armed timers that neither fired nor were cancelled yet
    pub fn timers_pending(&self) -> u64 {
        self.timers_armed
            .saturating_sub(self.timers_cancelled + self.alerts_fired + self.stale_fires)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let metrics = MetricsCollector::new();

        metrics.record_message();
        metrics.record_message();
        metrics.record_crisis_detection();
        metrics.record_timer_armed();
        metrics.record_timer_cancelled();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.messages_handled, 2);
        assert_eq!(snapshot.crisis_detections, 1);
        assert_eq!(snapshot.crisis_rate(), 0.5);
        assert_eq!(snapshot.timers_pending(), 0);
    }
}
