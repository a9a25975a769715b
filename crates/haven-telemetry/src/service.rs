//! Async critical-event recording service
//!
//! Provides a non-blocking `record()` for the orchestrator's request path; a
//! background task chains events into the log. Consent is enforced by the
//! caller — events that reach this service are already consented.

use crate::critical::{CriticalEvent, CriticalEventLog};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Commands sent to the background recorder
enum RecorderCommand {
    /// Record an event
    Record(Box<CriticalEvent>),

    /// Shutdown the service
    Shutdown,
}

/// Critical-event service handle
///
/// Cheap to clone; all clones feed the same log.
#[derive(Clone)]
pub struct CriticalEventService {
    sender: mpsc::UnboundedSender<RecorderCommand>,
    log: Arc<Mutex<CriticalEventLog>>,
}

impl CriticalEventService {
    /// Create the service and spawn its background recorder
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let log = Arc::new(Mutex::new(CriticalEventLog::new()));

        tokio::spawn(run_recorder(Arc::clone(&log), receiver));

        info!("Critical-event service started");

        Self { sender, log }
    }

    /// Record an event without blocking the caller
    pub fn record(&self, event: CriticalEvent) {
        if let Err(e) = self.sender.send(RecorderCommand::Record(Box::new(event))) {
            warn!("Failed to send critical event: {}", e);
        }
    }

    /// Snapshot of all recorded events, for the storage collaborator
    pub fn events(&self) -> Vec<CriticalEvent> {
        self.log.lock().events().to_vec()
    }

    /// Verify the integrity of the underlying log
    pub fn verify(&self) -> bool {
        self.log.lock().verify()
    }

    /// Signal the background recorder to stop
    pub fn shutdown(&self) {
        let _ = self.sender.send(RecorderCommand::Shutdown);
    }
}

impl Default for CriticalEventService {
    fn default() -> Self {
        Self::new()
    }
}

/// Background recorder task
async fn run_recorder(
    log: Arc<Mutex<CriticalEventLog>>,
    mut receiver: mpsc::UnboundedReceiver<RecorderCommand>,
) {
    while let Some(cmd) = receiver.recv().await {
        match cmd {
            RecorderCommand::Record(event) => {
                debug!(
                    subject = %event.subject_id,
                    event_type = %event.event_type,
                    mode = %event.mode_at_time,
                    "Recording critical event"
                );
                log.lock().add_event(*event);
            }
            RecorderCommand::Shutdown => {
                debug!("Critical-event recorder shutting down");
                break;
            }
        }
    }
}
