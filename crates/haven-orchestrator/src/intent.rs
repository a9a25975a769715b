//! Explicit user-intent detection
//!
//! Fixed Spanish keyword sets matched by containment over lowercased input.
//! Detection order puts stop intents before start intents so that phrases
//! like "deja el modo mamá" never read as a request to enter the mode.

use aho_corasick::AhoCorasick;
use haven_core::{ParentalFlavor, Result};
use regex::Regex;

/// An explicit user intent detected in a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// The subject asked for emergency services
    RequestEmergencyServices,

    /// End the active supervision session
    StopSupervision,

    /// End the parental role
    StopParental,

    /// Start supervising a third party
    StartSupervision,

    /// Enter the parental role with a flavor
    RequestParental(ParentalFlavor),

    /// Enter therapeutic listening
    EnterTherapy,

    /// The subject says they are feeling better
    Recovered,

    /// Generic confirmation, meaningful only after a pending offer
    ConfirmParental,
}

const EMERGENCY_PATTERN: &str =
    r"\b(llama|llamen|llamar|necesito|pide|pidan)\b.*\b(emergencias|ambulancia|112)\b";

const STOP_SUPERVISION: &[&str] = &[
    "deja de cuidar",
    "deja de supervisar",
    "termina la supervisión",
    "detén la supervisión",
    "ya no cuides",
];

const STOP_PARENTAL: &[&str] = &[
    "deja el modo mamá",
    "deja el modo papá",
    "ya no necesito modo mamá",
    "ya no necesito modo papá",
    "deja de ser mi mamá",
    "deja de ser mi papá",
    "vuelve a ser tú",
];

const START_SUPERVISION: &[&str] = &[
    "cuida a",
    "cuides a",
    "supervisa a",
    "vigila a",
    "modo supervisión",
    "estate pendiente de",
];

const PARENTAL_MADRE: &[&str] = &[
    "como mamá",
    "modo mamá",
    "consejo de madre",
    "háblame como mi madre",
    "como una madre",
];

const PARENTAL_PADRE: &[&str] = &[
    "como papá",
    "modo papá",
    "consejo de padre",
    "háblame como mi padre",
    "como un padre",
];

const ENTER_THERAPY: &[&str] = &[
    "necesito hablar",
    "quiero desahogarme",
    "necesito que me escuches",
    "me quieres escuchar",
    "modo terapia",
    "necesito contarte algo",
];

const RECOVERED: &[&str] = &[
    "ya estoy mejor",
    "me siento mejor",
    "ya me siento mejor",
    "estoy más tranquilo",
    "estoy más tranquila",
    "ya pasó",
    "ya se me pasó",
];

const CONFIRM: &[&str] = &[
    "sí, por favor",
    "sí quiero",
    "sí, quiero",
    "acepto",
    "está bien, hazlo",
    "claro que sí",
    "venga, sí",
];

// Risk phrases scanned for every message while supervision is active.
const SUPERVISION_RISK: &[&str] = &[
    "me caí",
    "me he caído",
    "me duele",
    "me siento mal",
    "no me siento bien",
    "estoy mareado",
    "estoy mareada",
    "me perdí",
    "me he perdido",
    "tengo miedo",
    "no puedo respirar",
    "me golpeé",
    "necesito ayuda",
    "ayúdame",
    "socorro",
];

/// Detector over the fixed intent keyword sets
pub struct IntentDetector {
    emergency: Regex,
    stop_supervision: AhoCorasick,
    stop_parental: AhoCorasick,
    start_supervision: AhoCorasick,
    parental_madre: AhoCorasick,
    parental_padre: AhoCorasick,
    enter_therapy: AhoCorasick,
    recovered: AhoCorasick,
    confirm: AhoCorasick,
    risk_phrases: AhoCorasick,
}

impl IntentDetector {
    /// Create a detector from the built-in keyword sets
    pub fn new() -> Result<Self> {
        Ok(Self {
            emergency: Regex::new(EMERGENCY_PATTERN).map_err(|e| {
                haven_core::Error::classifier(format!("Failed to compile emergency regex: {e}"))
            })?,
            stop_supervision: build_matcher("stop-supervision", STOP_SUPERVISION)?,
            stop_parental: build_matcher("stop-parental", STOP_PARENTAL)?,
            start_supervision: build_matcher("start-supervision", START_SUPERVISION)?,
            parental_madre: build_matcher("parental-madre", PARENTAL_MADRE)?,
            parental_padre: build_matcher("parental-padre", PARENTAL_PADRE)?,
            enter_therapy: build_matcher("enter-therapy", ENTER_THERAPY)?,
            recovered: build_matcher("recovered", RECOVERED)?,
            confirm: build_matcher("confirm", CONFIRM)?,
            risk_phrases: build_matcher("supervision-risk", SUPERVISION_RISK)?,
        })
    }

    /// Detect the first explicit intent in a message, if any
    pub fn detect(&self, text: &str) -> Option<Intent> {
        let lowered = text.to_lowercase();

        if self.emergency.is_match(&lowered) {
            return Some(Intent::RequestEmergencyServices);
        }
        if self.stop_supervision.is_match(&lowered) {
            return Some(Intent::StopSupervision);
        }
        if self.stop_parental.is_match(&lowered) {
            return Some(Intent::StopParental);
        }
        if self.start_supervision.is_match(&lowered) {
            return Some(Intent::StartSupervision);
        }
        if self.parental_madre.is_match(&lowered) {
            return Some(Intent::RequestParental(ParentalFlavor::Madre));
        }
        if self.parental_padre.is_match(&lowered) {
            return Some(Intent::RequestParental(ParentalFlavor::Padre));
        }
        if self.enter_therapy.is_match(&lowered) {
            return Some(Intent::EnterTherapy);
        }
        if self.recovered.is_match(&lowered) {
            return Some(Intent::Recovered);
        }
        if self.confirm.is_match(&lowered) {
            return Some(Intent::ConfirmParental);
        }

        None
    }

    /// Whether a supervised person's message matches the risk-phrase list
    pub fn supervision_risk(&self, text: &str) -> bool {
        self.risk_phrases.is_match(text.to_lowercase().as_str())
    }
}

fn build_matcher(name: &str, phrases: &[&str]) -> Result<AhoCorasick> {
    AhoCorasick::builder().build(phrases).map_err(|e| {
        haven_core::Error::classifier(format!("Failed to build {name} intent matcher: {e}"))
    })
}
