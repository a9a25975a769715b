//! Therapy-mode directives

use crate::catalog::{pick, THERAPY_TONE};
use haven_core::{Directive, SuggestedAction};

const OPENING: &[&str] = &[
    "Claro que sí. Estoy aquí para escucharte, sin prisa.",
    "Gracias por confiar en mí. Cuéntame qué está pasando.",
    "Te escucho. Tómate el tiempo que necesites.",
];

const LISTENING: &[&str] = &[
    "Entiendo, eso pesa mucho. Sigo aquí contigo.",
    "Tiene sentido que te sientas así. ¿Quieres contarme más?",
    "Gracias por contármelo. ¿Cómo lo estás llevando hoy?",
    "Lo que sientes importa. Estoy escuchando.",
];

const CLOSING: &[&str] = &[
    "Me alegra mucho que te sientas mejor. Aquí estaré cuando me necesites.",
    "Qué bueno escuchar eso. Volvemos a lo nuestro cuando quieras.",
];

/// Entering therapeutic listening
pub fn opening() -> Directive {
    Directive::new(pick(OPENING), SuggestedAction::EmpatheticListening)
        .with_phrasing()
        .with_context(THERAPY_TONE)
}

/// A listening turn inside the mode
pub fn listening() -> Directive {
    Directive::new(pick(LISTENING), SuggestedAction::EmpatheticListening)
        .with_phrasing()
        .with_context(THERAPY_TONE)
}

/// Leaving therapy back to normal conversation
pub fn closing() -> Directive {
    Directive::new(pick(CLOSING), SuggestedAction::ModeClosed)
}
