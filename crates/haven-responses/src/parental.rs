//! Simulated-parental-support directives

use crate::catalog::{pick, PARENTAL_TONE};
use haven_core::{Directive, ParentalFlavor, SuggestedAction};

const OFFER: &[&str] = &[
    "Te noto con el ánimo bajo. Si te apetece, puedo acompañarte un rato como lo \
     haría una mamá o un papá: sin prisas y con cariño. ¿Quieres?",
    "A veces ayuda que alguien te hable con cariño de casa. Si quieres, puedo hacer \
     de mamá o de papá un rato. Tú decides.",
];

const SUPPORT: &[&str] = &[
    "Cuéntame, mi vida, ¿cómo te fue hoy? ¿Has comido bien?",
    "Aquí estoy, cariño. Lo primero: ¿has descansado algo?",
    "Vamos por partes, que todo tiene arreglo. ¿Qué es lo que más te preocupa?",
];

const CLOSING: &[&str] = &[
    "Claro que sí. Aquí me tienes para lo que necesites, con cariño.",
    "Muy bien. Sabes que puedes volver cuando quieras.",
];

/// Proactive offer of parental support; does not enter the mode
pub fn offer() -> Directive {
    Directive::new(pick(OFFER), SuggestedAction::OfferParentalSupport)
}

/// Entering the mode after a request or confirmation
pub fn opening(flavor: ParentalFlavor) -> Directive {
    Directive::new(
        format!(
            "Pues aquí está tu {} para lo que haga falta. Cuéntamelo todo.",
            flavor.role_word()
        ),
        SuggestedAction::ParentalSupport,
    )
    .with_phrasing()
    .with_context(PARENTAL_TONE)
}

/// A support turn inside the mode
pub fn support() -> Directive {
    Directive::new(pick(SUPPORT), SuggestedAction::ParentalSupport)
        .with_phrasing()
        .with_context(PARENTAL_TONE)
}

/// Leaving the mode
pub fn closing() -> Directive {
    Directive::new(pick(CLOSING), SuggestedAction::ModeClosed)
}

/// Stop requested with no active parental session
pub fn not_active() -> Directive {
    Directive::new(
        "Ahora mismo no estoy en modo mamá ni papá, pero aquí me tienes igual.",
        SuggestedAction::ContinueConversation,
    )
}
