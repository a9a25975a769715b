//! Mode orchestration engine
//!
//! One `ModeOrchestrator` serves every subject. State is a keyed registry of
//! per-subject entries; each entry's mutex serializes message handling and
//! timer expiry for that subject, so arbitration and timer bookkeeping are
//! atomic per subject and independent across subjects.

use crate::config::OrchestratorConfig;
use crate::escalation::{self, ArmRequest};
use crate::intent::{Intent, IntentDetector};
use crate::mode::{
    ActivationSource, CrisisData, Mode, ModeKind, ModeState, ParentalData, SubjectEntry,
    SupervisionData,
};
use crate::notify::AlertNotifier;
use haven_classifiers::{CrisisVerdict, RiskClassifier};
use haven_core::{
    AlertEvent, CaregiverContact, Directive, Emotion, HistoryEntry, InboundMessage, ParentalFlavor,
    Result, Subject, SupervisedProfile,
};
use haven_responses as responses;
use haven_telemetry::{CriticalEvent, CriticalEventService, MetricsCollector};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// The safety-mode orchestrator
pub struct ModeOrchestrator {
    subjects: RwLock<HashMap<String, Arc<SubjectEntry>>>,
    classifier: RiskClassifier,
    intents: IntentDetector,
    config: OrchestratorConfig,
    notifier: Arc<dyn AlertNotifier>,
    events: CriticalEventService,
    metrics: MetricsCollector,
}

impl ModeOrchestrator {
    /// Create an orchestrator delivering alerts through the given notifier
    pub fn new(config: OrchestratorConfig, notifier: Arc<dyn AlertNotifier>) -> Result<Self> {
        Ok(Self {
            subjects: RwLock::new(HashMap::new()),
            classifier: RiskClassifier::new()?,
            intents: IntentDetector::new()?,
            config,
            notifier,
            events: CriticalEventService::new(),
            metrics: MetricsCollector::new(),
        })
    }

    /// Metrics collector handle
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Consented critical-event service handle
    pub fn critical_events(&self) -> &CriticalEventService {
        &self.events
    }

    /// Register or update a subject profile, preserving its mode state
    pub async fn register_subject(&self, subject: Subject) {
        let entry = self.entry(&subject.id);
        let mut state = entry.state.lock().await;
        state.subject = subject;
    }

    /// Kind of the subject's active mode, if the subject is known
    pub async fn current_mode(&self, subject_id: &str) -> Option<ModeKind> {
        let entry = self.subjects.read().get(subject_id).cloned()?;
        let state = entry.state.lock().await;
        Some(state.kind())
    }

    /// Handle one inbound message and return the directive for this turn
    ///
    /// `history` holds prior user turns for the same subject, most recent
    /// last; the classifier inspects at most the last four.
    pub async fn handle_message(
        &self,
        message: &InboundMessage,
        history: &[HistoryEntry],
    ) -> Result<Directive> {
        if message.subject_id.is_empty() {
            warn!("Message without a subject id; responding with fallback text");
            return Ok(responses::normal::fallback());
        }

        let entry = self.entry(&message.subject_id);
        let mut state = entry.state.lock().await;

        self.metrics.record_message();

        // Any inbound message means the subject checked back in.
        if state.cancel_timer() {
            self.metrics.record_timer_cancelled();
            debug!(
                subject = %message.subject_id,
                "Pending escalation timer cancelled by new message"
            );
        }

        // A proactive offer is valid for exactly one follow-up turn.
        let pending_offer = state.pending_parental_offer.take();

        let classification = self.classifier.classify(&message.text, history);
        let intent = self.intents.detect(&message.text);

        // 1. A crisis verdict preempts everything else.
        if let Some(verdict) = classification.crisis {
            self.metrics.record_crisis_detection();
            return Ok(self.enter_crisis(&entry, &mut state, verdict, message, intent));
        }

        // 2. Already in crisis: stay, unless the subject recovered.
        if state.kind() == ModeKind::Crisis {
            return Ok(self.crisis_turn(&mut state, message, intent));
        }

        // 3. Explicit stop intents close their mode.
        match intent {
            Some(Intent::StopSupervision) => return Ok(self.stop_supervision(&mut state)),
            Some(Intent::StopParental) => return Ok(self.stop_parental(&mut state)),
            Some(Intent::Recovered) if state.kind() == ModeKind::Therapy => {
                return Ok(self.close_mode(&mut state, responses::therapy::closing()));
            }
            _ => {}
        }

        // 4. Explicit start intents.
        match intent {
            Some(Intent::StartSupervision) => {
                // The keyword alone carries no profile; ask for it.
                return Ok(match &state.mode {
                    Mode::Supervision(data) => {
                        responses::supervision::already_active(&data.profile)
                    }
                    _ => responses::supervision::profile_missing(),
                });
            }
            Some(Intent::RequestParental(flavor)) => {
                return Ok(self.enter_parental(&mut state, flavor, ActivationSource::Requested));
            }
            Some(Intent::ConfirmParental) => {
                if let Some(flavor) = pending_offer {
                    return Ok(self.enter_parental(&mut state, flavor, ActivationSource::Offered));
                }
                // a bare confirmation with nothing pending falls through
            }
            Some(Intent::EnterTherapy) => {
                return Ok(self.enter_therapy(&mut state));
            }
            _ => {}
        }

        if state.kind() == ModeKind::Therapy {
            return Ok(self.therapy_turn(&mut state, classification.emotion));
        }

        // 5. Remain in the current mode.
        match state.kind() {
            ModeKind::Supervision => {
                Ok(self.supervision_turn(&entry, &mut state, message, classification.emotion))
            }
            ModeKind::ParentalRole => Ok(responses::parental::support()),
            _ => Ok(self.normal_turn(&mut state, classification.emotion)),
        }
    }

    /// Open a supervision session for a third party
    ///
    /// The profile and caregiver contact are supplied by the caller at
    /// session start; messages for `subject_id` are then attributed to the
    /// supervised person.
    pub async fn start_supervision(
        &self,
        subject_id: &str,
        profile: SupervisedProfile,
        caregiver: CaregiverContact,
    ) -> Result<Directive> {
        if subject_id.is_empty() {
            return Err(haven_core::Error::subject("empty subject id"));
        }

        let entry = self.entry(subject_id);
        let mut state = entry.state.lock().await;

        if let Mode::Supervision(data) = &state.mode {
            if data.profile == profile {
                // idempotent re-entry: keep the session and any armed timer
                return Ok(responses::supervision::already_active(&data.profile));
            }
        }

        if state.cancel_timer() {
            self.metrics.record_timer_cancelled();
        }

        // minimal auto-created profiles carry the id as their name
        if state.subject.name == state.subject.id {
            state.subject.name = profile.name.clone();
        }
        if state.subject.caregiver.is_none() {
            state.subject.caregiver = Some(caregiver.clone());
        }

        let opening = responses::supervision::opening(&profile);
        state.mode = Mode::Supervision(SupervisionData {
            profile,
            caregiver,
            last_message: String::new(),
        });
        self.metrics.record_mode_transition();
        info!(subject = %subject_id, "Supervision session started");

        Ok(opening)
    }

    fn entry(&self, subject_id: &str) -> Arc<SubjectEntry> {
        if let Some(entry) = self.subjects.read().get(subject_id) {
            return Arc::clone(entry);
        }

        let mut subjects = self.subjects.write();
        Arc::clone(
            subjects
                .entry(subject_id.to_string())
                .or_insert_with(|| Arc::new(SubjectEntry::new(Subject::minimal(subject_id)))),
        )
    }

    fn enter_crisis(
        &self,
        entry: &Arc<SubjectEntry>,
        state: &mut ModeState,
        verdict: CrisisVerdict,
        message: &InboundMessage,
        intent: Option<Intent>,
    ) -> Directive {
        let was = state.kind();
        state.pending_parental_offer = None;

        if let Mode::Crisis(data) = &mut state.mode {
            data.category = verdict.category;
            data.last_message = message.text.clone();
        } else {
            state.mode = Mode::Crisis(CrisisData {
                category: verdict.category,
                started: SystemTime::now(),
                last_message: message.text.clone(),
            });
            self.metrics.record_mode_transition();
            warn!(
                subject = %message.subject_id,
                category = verdict.category.label(),
                from = was.label(),
                "Crisis mode entered"
            );
            self.record_event(state, "crisis_entered", &message.text);
        }

        // Arm the no-reply timer when there is someone to alert.
        if let Some(caregiver) = state.subject.caregiver.clone() {
            let payload = AlertEvent {
                subject_id: state.subject.id.clone(),
                subject_name: state.subject.name.clone(),
                caregiver,
                last_message: message.text.clone(),
                timestamp: SystemTime::now(),
            };
            self.arm_timer(
                entry,
                state,
                payload,
                self.config.crisis_deadline(),
                ModeKind::Crisis,
            );
        } else {
            debug!(
                subject = %message.subject_id,
                "No caregiver configured; crisis timer not armed"
            );
        }

        if matches!(intent, Some(Intent::RequestEmergencyServices)) {
            responses::crisis::emergency_referral()
        } else {
            responses::crisis::guide_to_help()
        }
    }

    fn crisis_turn(
        &self,
        state: &mut ModeState,
        message: &InboundMessage,
        intent: Option<Intent>,
    ) -> Directive {
        if let Mode::Crisis(data) = &mut state.mode {
            data.last_message = message.text.clone();
        }

        match intent {
            Some(Intent::RequestEmergencyServices) => responses::crisis::emergency_referral(),
            Some(Intent::Recovered) => {
                self.record_event(state, "crisis_closed", &message.text);
                self.close_mode(state, responses::crisis::closing())
            }
            _ => responses::crisis::ongoing(),
        }
    }

    fn stop_supervision(&self, state: &mut ModeState) -> Directive {
        let profile = match &state.mode {
            Mode::Supervision(data) => Some(data.profile.clone()),
            _ => None,
        };

        match profile {
            Some(profile) => self.close_mode(state, responses::supervision::closing(&profile)),
            None => responses::supervision::not_active(),
        }
    }

    fn stop_parental(&self, state: &mut ModeState) -> Directive {
        if matches!(state.mode, Mode::ParentalRole(_)) {
            self.close_mode(state, responses::parental::closing())
        } else {
            responses::parental::not_active()
        }
    }

    fn enter_parental(
        &self,
        state: &mut ModeState,
        flavor: ParentalFlavor,
        source: ActivationSource,
    ) -> Directive {
        if let Mode::ParentalRole(data) = &state.mode {
            if data.flavor == flavor {
                // idempotent re-entry
                return responses::parental::support();
            }
        }

        state.mode = Mode::ParentalRole(ParentalData { flavor, source });
        self.metrics.record_mode_transition();
        info!(
            subject = %state.subject.id,
            flavor = flavor.role_word(),
            "Parental role entered"
        );

        responses::parental::opening(flavor)
    }

    fn enter_therapy(&self, state: &mut ModeState) -> Directive {
        if state.kind() == ModeKind::Therapy {
            return responses::therapy::listening();
        }

        state.mode = Mode::Therapy;
        self.metrics.record_mode_transition();
        info!(subject = %state.subject.id, "Therapy mode entered");

        responses::therapy::opening()
    }

    fn therapy_turn(&self, state: &mut ModeState, emotion: Emotion) -> Directive {
        if should_offer_parental(emotion) {
            state.pending_parental_offer = Some(ParentalFlavor::Madre);
            return responses::parental::offer();
        }

        responses::therapy::listening()
    }

    fn normal_turn(&self, state: &mut ModeState, emotion: Emotion) -> Directive {
        if should_offer_parental(emotion) {
            state.pending_parental_offer = Some(ParentalFlavor::Madre);
            return responses::parental::offer();
        }

        responses::normal::conversation()
    }

    fn supervision_turn(
        &self,
        entry: &Arc<SubjectEntry>,
        state: &mut ModeState,
        message: &InboundMessage,
        emotion: Emotion,
    ) -> Directive {
        let Mode::Supervision(data) = &mut state.mode else {
            return responses::normal::conversation();
        };
        data.last_message = message.text.clone();
        let profile = data.profile.clone();
        let caregiver = data.caregiver.clone();

        if self.intents.supervision_risk(&message.text) {
            let payload = AlertEvent {
                subject_id: state.subject.id.clone(),
                subject_name: profile.name.clone(),
                caregiver: caregiver.clone(),
                last_message: message.text.clone(),
                timestamp: SystemTime::now(),
            };
            self.arm_timer(
                entry,
                state,
                payload,
                self.config.supervision_deadline(),
                ModeKind::Supervision,
            );
            self.record_event(state, "supervision_risk", &message.text);
            warn!(
                subject = %state.subject.id,
                person = %profile.name,
                "Supervision risk phrase matched; escalation timer armed"
            );
            return responses::supervision::risk_detected(&profile, &caregiver.name);
        }

        if matches!(emotion, Emotion::Joy | Emotion::Gratitude | Emotion::Calm) {
            responses::supervision::ambient(&profile)
        } else {
            responses::supervision::check_in(&profile)
        }
    }

    fn close_mode(&self, state: &mut ModeState, directive: Directive) -> Directive {
        if state.cancel_timer() {
            self.metrics.record_timer_cancelled();
        }
        state.mode = Mode::Normal;
        state.pending_parental_offer = None;
        self.metrics.record_mode_transition();
        info!(subject = %state.subject.id, "Mode closed; back to normal conversation");

        directive
    }

    fn arm_timer(
        &self,
        entry: &Arc<SubjectEntry>,
        state: &mut ModeState,
        payload: AlertEvent,
        deadline: Duration,
        armed_by: ModeKind,
    ) {
        if state.cancel_timer() {
            self.metrics.record_timer_cancelled();
        }

        let handle = escalation::arm(ArmRequest {
            entry: Arc::clone(entry),
            notifier: Arc::clone(&self.notifier),
            events: self.events.clone(),
            metrics: self.metrics.clone(),
            deadline,
            payload,
            armed_by,
        });
        state.timer = Some(handle);
        self.metrics.record_timer_armed();
    }

    fn record_event(&self, state: &ModeState, event_type: &str, detail: &str) {
        if !state.subject.consent_critical_events {
            return;
        }

        self.events.record(
            CriticalEvent::new(state.subject.id.clone(), event_type, state.kind().label())
                .with_detail(detail.to_string()),
        );
    }
}

/// Crisis-adjacent vulnerability without a verdict warrants a parental offer
fn should_offer_parental(emotion: Emotion) -> bool {
    matches!(emotion, Emotion::Hopelessness | Emotion::Loneliness)
}
