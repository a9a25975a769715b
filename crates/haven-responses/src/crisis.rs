//! Crisis-mode directives

use crate::catalog::{pick, CRISIS_TONE};
use haven_core::{Directive, SuggestedAction};

const GUIDE_TO_HELP: &[&str] = &[
    "Siento mucho que estés pasando por esto. No estás solo; hay personas preparadas \
     para ayudarte ahora mismo. ¿Te parece si buscamos juntos un profesional o una \
     línea de ayuda?",
    "Lo que sientes es muy duro y no tienes que cargarlo en silencio. Hablar con un \
     profesional puede ayudarte hoy mismo. Estoy contigo mientras tanto.",
    "Gracias por decírmelo. Es importante que recibas apoyo de verdad: una línea de \
     ayuda o un profesional. Yo me quedo aquí contigo, no te voy a dejar.",
];

const ONGOING: &[&str] = &[
    "Sigo aquí contigo. ¿Cómo te encuentras en este momento?",
    "No me voy a ningún lado. ¿Quieres contarme cómo estás ahora?",
    "Estoy contigo. ¿Hay alguien cerca que pueda acompañarte?",
];

const CLOSING: &[&str] = &[
    "Me alivia mucho leer eso. Recuerda que pedir ayuda siempre está bien. \
     Aquí me tienes.",
    "Qué bueno que te sientas mejor. Cuídate mucho, y si vuelve a pesar, háblame.",
];

// Direct emergency requests bypass the pool: always the same referral template.
const EMERGENCY_REFERRAL: &str =
    "Llama ahora mismo al 112 o a tu número local de emergencias. Si puedes, avisa \
     también a alguien cercano para que te acompañe. Quédate conmigo mientras llega \
     la ayuda.";

/// Entering or re-confirming crisis support
pub fn guide_to_help() -> Directive {
    Directive::new(pick(GUIDE_TO_HELP), SuggestedAction::GuideToProfessionalHelp)
        .with_phrasing()
        .with_context(CRISIS_TONE)
}

/// A crisis turn with no new verdict: stay close, check on the person
pub fn ongoing() -> Directive {
    Directive::new(pick(ONGOING), SuggestedAction::UrgentCheckIn)
        .with_phrasing()
        .with_context(CRISIS_TONE)
}

/// The subject explicitly asked for emergency services
pub fn emergency_referral() -> Directive {
    Directive::new(EMERGENCY_REFERRAL, SuggestedAction::EmergencyReferral)
}

/// De-escalation out of crisis
pub fn closing() -> Directive {
    Directive::new(pick(CLOSING), SuggestedAction::ModeClosed)
}
