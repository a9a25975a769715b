//! End-to-end scenarios for the mode orchestrator
//!
//! Timer scenarios run under paused tokio time so deadlines are exact and
//! the tests never sleep for real.

use std::sync::Arc;
use std::time::Duration;

use haven_core::{
    AgeGroup, AlertEvent, CaregiverContact, HistoryEntry, InboundMessage, Subject,
    SuggestedAction, SupervisedProfile,
};
use haven_orchestrator::{
    BroadcastNotifier, ModeKind, ModeOrchestrator, OrchestratorConfig,
};
use tokio::sync::broadcast;

fn build() -> (ModeOrchestrator, broadcast::Receiver<AlertEvent>) {
    let bus = BroadcastNotifier::new(16);
    let rx = bus.subscribe();
    let orchestrator =
        ModeOrchestrator::new(OrchestratorConfig::default(), Arc::new(bus)).unwrap();
    (orchestrator, rx)
}

fn marta() -> Subject {
    Subject::new("marta", "Marta")
        .with_caregiver(CaregiverContact::new("Luis", "hijo", "+34600111222"))
        .with_consent()
}

fn ana_profile() -> SupervisedProfile {
    SupervisedProfile::new("Ana", AgeGroup::Child).with_context("queda sola por las tardes")
}

fn ana_caregiver() -> CaregiverContact {
    CaregiverContact::new("Marta", "madre", "+34600111222")
}

// let spawned tasks (recorder, fired timers) catch up
async fn drain_pending() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn crisis_entry_on_suicidal_phrase() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "quiero desaparecer"), &[])
        .await
        .unwrap();

    assert_eq!(
        directive.suggested_action,
        SuggestedAction::GuideToProfessionalHelp
    );
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Crisis)
    );
    assert_eq!(orchestrator.metrics().snapshot().crisis_detections, 1);

    drain_pending().await;
    let events = orchestrator.critical_events().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "crisis_entered");
    assert!(orchestrator.critical_events().verify());
}

#[tokio::test(start_paused = true)]
async fn emergency_phrase_short_circuits_in_crisis() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    orchestrator
        .handle_message(&InboundMessage::user("marta", "quiero desaparecer"), &[])
        .await
        .unwrap();

    let directive = orchestrator
        .handle_message(
            &InboundMessage::user("marta", "por favor llama a emergencias"),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(directive.suggested_action, SuggestedAction::EmergencyReferral);
    // the referral does not leave the mode
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Crisis)
    );
}

#[tokio::test(start_paused = true)]
async fn crisis_deescalates_on_recovery() {
    let (orchestrator, mut rx) = build();
    orchestrator.register_subject(marta()).await;

    orchestrator
        .handle_message(&InboundMessage::user("marta", "me quiero hacer daño"), &[])
        .await
        .unwrap();

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "ya estoy mejor, gracias"), &[])
        .await
        .unwrap();

    assert_eq!(directive.suggested_action, SuggestedAction::ModeClosed);
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Normal)
    );

    // the crisis timer died with the mode
    tokio::time::advance(Duration::from_secs(600)).await;
    drain_pending().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn crisis_timer_alerts_caregiver_after_silence() {
    let (orchestrator, mut rx) = build();
    orchestrator.register_subject(marta()).await;

    orchestrator
        .handle_message(&InboundMessage::user("marta", "quiero desaparecer"), &[])
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(301)).await;

    let alert = rx.recv().await.unwrap();
    assert_eq!(alert.subject_id, "marta");
    assert_eq!(alert.caregiver.name, "Luis");
    assert_eq!(alert.last_message, "quiero desaparecer");

    // exactly one alert, no re-arm
    tokio::time::advance(Duration::from_secs(600)).await;
    drain_pending().await;
    assert!(rx.try_recv().is_err());
    assert_eq!(orchestrator.metrics().snapshot().alerts_fired, 1);
}

#[tokio::test(start_paused = true)]
async fn supervision_risk_then_reply_cancels_timer() {
    let (orchestrator, mut rx) = build();

    orchestrator
        .start_supervision("ana", ana_profile(), ana_caregiver())
        .await
        .unwrap();

    let directive = orchestrator
        .handle_message(&InboundMessage::user("ana", "me caí pero estoy bien"), &[])
        .await
        .unwrap();
    assert_eq!(
        directive.suggested_action,
        SuggestedAction::RiskDetectedInitiateTimer
    );

    // the follow-up within the deadline cancels the escalation
    let directive = orchestrator
        .handle_message(&InboundMessage::user("ana", "ya llegué a casa"), &[])
        .await
        .unwrap();
    assert_eq!(directive.suggested_action, SuggestedAction::SupervisionCheckIn);

    tokio::time::advance(Duration::from_secs(700)).await;
    drain_pending().await;

    assert!(rx.try_recv().is_err());
    assert_eq!(orchestrator.metrics().snapshot().alerts_fired, 0);
    assert_eq!(orchestrator.metrics().snapshot().timers_cancelled, 1);
}

#[tokio::test(start_paused = true)]
async fn supervision_risk_without_reply_fires_one_alert() {
    let (orchestrator, mut rx) = build();

    orchestrator
        .start_supervision("ana", ana_profile(), ana_caregiver())
        .await
        .unwrap();

    orchestrator
        .handle_message(&InboundMessage::user("ana", "me caí pero estoy bien"), &[])
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(601)).await;

    let alert = rx.recv().await.unwrap();
    assert_eq!(alert.subject_id, "ana");
    assert_eq!(alert.subject_name, "Ana");
    assert_eq!(alert.caregiver, ana_caregiver());
    assert_eq!(alert.last_message, "me caí pero estoy bien");

    tokio::time::advance(Duration::from_secs(1200)).await;
    drain_pending().await;
    assert!(rx.try_recv().is_err());
    assert_eq!(orchestrator.metrics().snapshot().alerts_fired, 1);
}

#[tokio::test(start_paused = true)]
async fn repeated_risk_rearms_with_fresh_deadline() {
    let (orchestrator, mut rx) = build();

    orchestrator
        .start_supervision("ana", ana_profile(), ana_caregiver())
        .await
        .unwrap();

    orchestrator
        .handle_message(&InboundMessage::user("ana", "me caí"), &[])
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(400)).await;

    // still risk-bearing: the timer is replaced, not left to its old deadline
    orchestrator
        .handle_message(&InboundMessage::user("ana", "me duele mucho"), &[])
        .await
        .unwrap();

    // the original deadline passes without an alert
    tokio::time::advance(Duration::from_secs(300)).await;
    drain_pending().await;
    assert!(rx.try_recv().is_err());

    // the fresh deadline fires
    tokio::time::advance(Duration::from_secs(301)).await;
    let alert = rx.recv().await.unwrap();
    assert_eq!(alert.last_message, "me duele mucho");

    let snapshot = orchestrator.metrics().snapshot();
    assert_eq!(snapshot.timers_armed, 2);
    assert_eq!(snapshot.alerts_fired, 1);
}

#[tokio::test(start_paused = true)]
async fn therapy_opens_and_closes_on_recovery() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "necesito hablar"), &[])
        .await
        .unwrap();
    assert_eq!(
        directive.suggested_action,
        SuggestedAction::EmpatheticListening
    );
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Therapy)
    );

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "ya estoy mejor, gracias"), &[])
        .await
        .unwrap();
    assert_eq!(directive.suggested_action, SuggestedAction::ModeClosed);
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Normal)
    );
}

#[tokio::test(start_paused = true)]
async fn supervision_reentry_is_idempotent() {
    let (orchestrator, mut rx) = build();

    orchestrator
        .start_supervision("ana", ana_profile(), ana_caregiver())
        .await
        .unwrap();

    orchestrator
        .handle_message(&InboundMessage::user("ana", "me caí"), &[])
        .await
        .unwrap();

    // re-entering with the same profile keeps the session and the timer
    let directive = orchestrator
        .start_supervision("ana", ana_profile(), ana_caregiver())
        .await
        .unwrap();
    assert_eq!(directive.suggested_action, SuggestedAction::SupervisionCheckIn);
    assert_eq!(orchestrator.metrics().snapshot().timers_armed, 1);

    tokio::time::advance(Duration::from_secs(601)).await;
    let alert = rx.recv().await.unwrap();
    assert_eq!(alert.subject_id, "ana");
}

#[tokio::test(start_paused = true)]
async fn stop_supervision_without_session_is_informational() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    let directive = orchestrator
        .handle_message(
            &InboundMessage::user("marta", "termina la supervisión"),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(
        directive.suggested_action,
        SuggestedAction::ContinueConversation
    );
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Normal)
    );
}

#[tokio::test(start_paused = true)]
async fn parental_offer_requires_confirmation() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "me siento muy sola"), &[])
        .await
        .unwrap();
    assert_eq!(
        directive.suggested_action,
        SuggestedAction::OfferParentalSupport
    );
    // an offer alone must not mutate the mode
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Normal)
    );

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "sí, por favor"), &[])
        .await
        .unwrap();
    assert_eq!(directive.suggested_action, SuggestedAction::ParentalSupport);
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::ParentalRole)
    );
}

#[tokio::test(start_paused = true)]
async fn confirmation_without_offer_is_plain_conversation() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "sí, por favor"), &[])
        .await
        .unwrap();

    assert_eq!(
        directive.suggested_action,
        SuggestedAction::ContinueConversation
    );
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Normal)
    );
}

#[tokio::test(start_paused = true)]
async fn explicit_parental_request_enters_directly() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "háblame como papá"), &[])
        .await
        .unwrap();

    assert_eq!(directive.suggested_action, SuggestedAction::ParentalSupport);
    assert!(directive.base_message.contains("papá"));
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::ParentalRole)
    );

    let directive = orchestrator
        .handle_message(&InboundMessage::user("marta", "deja el modo papá"), &[])
        .await
        .unwrap();
    assert_eq!(directive.suggested_action, SuggestedAction::ModeClosed);
}

#[tokio::test(start_paused = true)]
async fn sustained_negativity_with_collapse_phrase_is_crisis() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    let history = vec![
        HistoryEntry::new("todo sigue igual", haven_core::Emotion::Sadness),
        HistoryEntry::new("otra mala noche", haven_core::Emotion::Hopelessness),
        HistoryEntry::new("sin ganas de nada", haven_core::Emotion::Discouragement),
        HistoryEntry::new("un día normal", haven_core::Emotion::Neutral),
    ];

    orchestrator
        .handle_message(&InboundMessage::user("marta", "ya no puedo más"), &history)
        .await
        .unwrap();

    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Crisis)
    );
}

#[tokio::test(start_paused = true)]
async fn subjects_have_independent_mode_states() {
    let (orchestrator, _rx) = build();
    orchestrator.register_subject(marta()).await;

    orchestrator
        .start_supervision("ana", ana_profile(), ana_caregiver())
        .await
        .unwrap();

    orchestrator
        .handle_message(&InboundMessage::user("marta", "quiero desaparecer"), &[])
        .await
        .unwrap();

    // Marta's crisis does not preempt Ana's supervision session
    assert_eq!(
        orchestrator.current_mode("marta").await,
        Some(ModeKind::Crisis)
    );
    assert_eq!(
        orchestrator.current_mode("ana").await,
        Some(ModeKind::Supervision)
    );
}

#[tokio::test(start_paused = true)]
async fn crisis_without_caregiver_still_guides_to_help() {
    let (orchestrator, mut rx) = build();
    // auto-created subject: no caregiver, no consent

    let directive = orchestrator
        .handle_message(&InboundMessage::user("desconocido", "quiero desaparecer"), &[])
        .await
        .unwrap();

    assert_eq!(
        directive.suggested_action,
        SuggestedAction::GuideToProfessionalHelp
    );

    // no contact to alert means no timer and no alert
    tokio::time::advance(Duration::from_secs(900)).await;
    drain_pending().await;
    assert!(rx.try_recv().is_err());
    assert_eq!(orchestrator.metrics().snapshot().timers_armed, 0);

    // and without consent, nothing is written to the critical-event log
    assert!(orchestrator.critical_events().events().is_empty());
}
