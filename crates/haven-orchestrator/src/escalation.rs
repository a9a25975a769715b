//! Escalation timers
//!
//! One lightweight task per armed timer. The task sleeps until the deadline,
//! then re-locks the owning subject and checks that it is still the armed
//! timer for a mode that still wants it; a fire that lost the race to a
//! cancellation or mode change is dropped. The alert payload is an immutable
//! snapshot captured at arm time — only its timestamp is refreshed on fire.

use crate::mode::{ModeKind, SubjectEntry};
use crate::notify::AlertNotifier;
use haven_core::AlertEvent;
use haven_telemetry::{CriticalEvent, CriticalEventService, MetricsCollector};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

/// Handle to an armed escalation timer, owned by one ModeState
pub struct TimerHandle {
    /// Identity checked at fire time
    pub id: Uuid,

    /// Mode that armed the timer
    pub armed_by: ModeKind,

    handle: JoinHandle<()>,
}

impl TimerHandle {
    /// Cancel the timer before it fires
    pub fn cancel(self) {
        self.handle.abort();
    }
}

/// Everything the fire task needs, captured at arm time
pub(crate) struct ArmRequest {
    pub entry: Arc<SubjectEntry>,
    pub notifier: Arc<dyn AlertNotifier>,
    pub events: CriticalEventService,
    pub metrics: MetricsCollector,
    pub deadline: Duration,
    pub payload: AlertEvent,
    pub armed_by: ModeKind,
}

/// Arm a timer; never blocks the caller
pub(crate) fn arm(request: ArmRequest) -> TimerHandle {
    let id = Uuid::new_v4();
    let armed_by = request.armed_by;

    debug!(
        subject = %request.payload.subject_id,
        armed_by = armed_by.label(),
        deadline_secs = request.deadline.as_secs(),
        "Arming escalation timer"
    );

    let handle = tokio::spawn(fire_after(id, request));

    TimerHandle {
        id,
        armed_by,
        handle,
    }
}

async fn fire_after(id: Uuid, request: ArmRequest) {
    let ArmRequest {
        entry,
        notifier,
        events,
        metrics,
        deadline,
        payload,
        armed_by,
    } = request;

    tokio::time::sleep(deadline).await;

    let mut state = entry.state.lock().await;

    let same_timer = state.timer.as_ref().map(|t| t.id) == Some(id);
    // A Supervision-armed timer stays valid after an escalation to Crisis;
    // any other mode change makes the fire stale.
    let mode_ok = state.kind() == armed_by
        || (armed_by == ModeKind::Supervision && state.kind() == ModeKind::Crisis);

    if !same_timer || !mode_ok {
        debug!(
            subject = %payload.subject_id,
            armed_by = armed_by.label(),
            current = state.kind().label(),
            "Dropping stale escalation fire"
        );
        metrics.record_stale_fire();
        return;
    }

    state.timer = None;

    let mut event = payload;
    event.timestamp = SystemTime::now();

    warn!(
        subject = %event.subject_id,
        caregiver = %event.caregiver.name,
        "Escalation deadline expired without a reply; alerting caregiver"
    );
    metrics.record_alert_fired();

    if state.subject.consent_critical_events {
        events.record(
            CriticalEvent::new(
                event.subject_id.clone(),
                "alert_fired",
                state.kind().label(),
            )
            .with_detail(event.last_message.clone()),
        );
    }

    drop(state);

    // Only the notification dispatch suspends; delivery is the notifier's concern.
    notifier.notify(event).await;
}
