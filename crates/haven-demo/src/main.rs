//! Scripted demo of the Haven safety-mode core
//!
//! Drives a short conversation through the orchestrator in-process: a crisis
//! entry and recovery for the primary user, then a supervision session with
//! a risk phrase left unanswered so the escalation alert fires.

use clap::Parser;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use haven_classifiers::EmotionClassifier;
use haven_core::{
    AgeGroup, CaregiverContact, HistoryEntry, InboundMessage, Subject, SupervisedProfile,
};
use haven_orchestrator::{BroadcastNotifier, ModeOrchestrator, OrchestratorConfig};

#[derive(Parser, Debug)]
#[command(name = "haven-demo")]
#[command(author, version, about = "Scripted demo of the Haven safety-mode core")]
struct Cli {
    /// Orchestrator config file (YAML); demo-friendly deadlines when absent
    #[arg(short, long)]
    config: Option<String>,

    /// Seconds of silence before the demo escalation fires
    #[arg(long, default_value = "3")]
    deadline: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => OrchestratorConfig::load(path)?,
        None => OrchestratorConfig {
            crisis_deadline_secs: cli.deadline,
            supervision_deadline_secs: cli.deadline,
            ..Default::default()
        },
    };

    let bus = BroadcastNotifier::new(config.alert_channel_capacity);
    let mut alerts = bus.subscribe();
    let orchestrator = Arc::new(ModeOrchestrator::new(config, Arc::new(bus))?);

    // stand-in for the external notifier collaborator
    tokio::spawn(async move {
        while let Ok(alert) = alerts.recv().await {
            println!();
            println!(
                "  !! ALERTA -> {} ({}, tel. {}): {} no responde. Último mensaje: \"{}\"",
                alert.caregiver.name,
                alert.caregiver.relationship,
                alert.caregiver.phone,
                alert.subject_name,
                alert.last_message
            );
        }
    });

    orchestrator
        .register_subject(
            Subject::new("marta", "Marta")
                .with_caregiver(CaregiverContact::new("Luis", "hijo", "+34600111222"))
                .with_consent(),
        )
        .await;

    println!("== Conversación con Marta ==");
    let script = [
        "hola, ¿qué tal el día?",
        "la verdad es que estoy muy triste",
        "ya no puedo más, quiero desaparecer",
        "sí, sigo aquí",
        "ya estoy mejor, gracias",
    ];

    let emotions = EmotionClassifier::new()?;
    let mut histories: HashMap<String, Vec<HistoryEntry>> = HashMap::new();

    for text in script {
        run_turn(&orchestrator, &emotions, &mut histories, "marta", text).await?;
        tokio::time::sleep(Duration::from_millis(400)).await;
    }

    println!();
    println!("== Supervisión de Ana ==");
    let directive = orchestrator
        .start_supervision(
            "ana",
            SupervisedProfile::new("Ana", AgeGroup::Child).with_context("sola en casa"),
            CaregiverContact::new("Marta", "madre", "+34600111222"),
        )
        .await?;
    println!("  [supervision_check_in] {}", directive.base_message);

    run_turn(&orchestrator, &emotions, &mut histories, "ana", "estoy viendo dibujos").await?;
    run_turn(&orchestrator, &emotions, &mut histories, "ana", "me caí pero estoy bien").await?;

    println!();
    println!("  (sin respuesta de Ana...)");
    tokio::time::sleep(Duration::from_secs(cli.deadline + 2)).await;

    let snapshot = orchestrator.metrics().snapshot();
    println!();
    println!("== Resumen ==");
    println!("  mensajes:            {}", snapshot.messages_handled);
    println!("  detecciones crisis:  {}", snapshot.crisis_detections);
    println!("  transiciones modo:   {}", snapshot.mode_transitions);
    println!("  timers armados:      {}", snapshot.timers_armed);
    println!("  timers cancelados:   {}", snapshot.timers_cancelled);
    println!("  alertas emitidas:    {}", snapshot.alerts_fired);
    println!(
        "  eventos críticos:    {} (cadena íntegra: {})",
        orchestrator.critical_events().events().len(),
        orchestrator.critical_events().verify()
    );

    Ok(())
}

async fn run_turn(
    orchestrator: &ModeOrchestrator,
    emotions: &EmotionClassifier,
    histories: &mut HashMap<String, Vec<HistoryEntry>>,
    subject_id: &str,
    text: &str,
) -> anyhow::Result<()> {
    println!();
    println!("  {subject_id}> {text}");

    let history = histories.entry(subject_id.to_string()).or_default();
    let message = InboundMessage::user(subject_id, text);
    let directive = orchestrator.handle_message(&message, history).await?;

    // the history collaborator stores each turn with its detected emotion
    history.push(HistoryEntry::new(text, emotions.score(text)));

    println!("  [{:?}] {}", directive.suggested_action, directive.base_message);
    if let Some(context) = &directive.further_context {
        tracing::debug!(context = %context, "phrasing instructions");
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "haven_orchestrator=debug,haven_demo=debug"
    } else {
        "haven_orchestrator=info,haven_demo=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
