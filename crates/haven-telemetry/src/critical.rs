//! Hash-chained critical-event log
//!
//! Critical events are append-only records of risk occurrences, written only
//! with the subject's consent. The chain hash makes after-the-fact edits
//! detectable; deletion and export belong to the storage collaborator.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::SystemTime;

/// An immutable record of a risk occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalEvent {
    /// Subject the event concerns
    pub subject_id: String,

    /// Event type/category ("crisis_entered", "alert_fired", ...)
    pub event_type: String,

    /// Free-text detail
    pub detail: String,

    /// Label of the mode active at the time
    pub mode_at_time: String,

    /// Timestamp
    pub timestamp: SystemTime,

    /// Hash of this event
    pub hash: Option<String>,

    /// Hash of the previous event (for chaining)
    pub previous_hash: Option<String>,
}

impl CriticalEvent {
    /// Create a new critical event
    pub fn new(
        subject_id: impl Into<String>,
        event_type: impl Into<String>,
        mode_at_time: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            event_type: event_type.into(),
            detail: String::new(),
            mode_at_time: mode_at_time.into(),
            timestamp: SystemTime::now(),
            hash: None,
            previous_hash: None,
        }
    }

    /// Set the free-text detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

/// Append-only critical-event log with hash chaining for tamper detection
pub struct CriticalEventLog {
    events: Vec<CriticalEvent>,
    chain_hash: Option<String>,
}

impl CriticalEventLog {
    /// Create a new empty log
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            chain_hash: None,
        }
    }

    /// Append an event to the log
    pub fn add_event(&mut self, event: CriticalEvent) {
        let mut event = event;
        event.previous_hash = self.chain_hash.clone();

        let hash = compute_hash(&event);
        event.hash = Some(hash.clone());

        self.chain_hash = Some(hash);
        self.events.push(event);
    }

    /// Verify the integrity of the log
    pub fn verify(&self) -> bool {
        let mut prev_hash: Option<String> = None;

        for event in &self.events {
            if event.previous_hash != prev_hash {
                return false;
            }

            let computed = compute_hash(event);
            if event.hash.as_ref() != Some(&computed) {
                return false;
            }

            prev_hash = event.hash.clone();
        }

        true
    }

    /// Get all events
    pub fn events(&self) -> &[CriticalEvent] {
        &self.events
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for CriticalEventLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the chain hash for an event (excluding the hash field itself)
fn compute_hash(event: &CriticalEvent) -> String {
    let mut hasher = Sha256::new();

    hasher.update(event.subject_id.as_bytes());
    hasher.update(event.event_type.as_bytes());
    hasher.update(event.detail.as_bytes());
    hasher.update(event.mode_at_time.as_bytes());
    hasher.update(format!("{:?}", event.timestamp).as_bytes());
    if let Some(ref prev) = event.previous_hash {
        hasher.update(prev.as_bytes());
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_and_verify() {
        let mut log = CriticalEventLog::new();

        log.add_event(CriticalEvent::new("u1", "crisis_entered", "crisis"));
        log.add_event(
            CriticalEvent::new("u1", "alert_fired", "supervision").with_detail("sin respuesta"),
        );

        assert!(log.verify());
        assert_eq!(log.len(), 2);
        assert!(log.events()[1].previous_hash.is_some());
    }

    #[test]
    fn test_tamper_detection() {
        let mut log = CriticalEventLog::new();

        log.add_event(CriticalEvent::new("u1", "crisis_entered", "crisis"));
        log.add_event(CriticalEvent::new("u1", "crisis_closed", "normal"));

        log.events[0].detail = "editado".to_string();

        assert!(!log.verify());
    }
}
