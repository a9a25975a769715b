//! Supervision-mode directives

use crate::catalog::{pick, SUPERVISION_TONE};
use haven_core::{Directive, SuggestedAction, SupervisedProfile};

const CHECK_IN: &[&str] = &[
    "Hola, {name}, ¿cómo te encuentras? ¿Necesitas algo?",
    "{name}, ¿qué tal va todo por ahí?",
    "Aquí estoy, {name}. ¿Cómo te sientes ahora?",
];

const AMBIENT: &[&str] = &[
    "Me alegro, {name}. Aquí sigo acompañándote.",
    "Qué bien, {name}. Cualquier cosa, me dices.",
];

const RISK_DETECTED: &[&str] = &[
    "{name}, eso que me cuentas es importante. ¿Estás bien? Respóndeme en cuanto \
     puedas; si no, avisaré a {caregiver} para que te eche una mano.",
    "{name}, quiero asegurarme de que estás bien. Dime algo, por favor; si no me \
     contestas pronto, le aviso a {caregiver}.",
];

fn fill(template: &str, profile: &SupervisedProfile, caregiver: Option<&str>) -> String {
    let mut text = template.replace("{name}", &profile.name);
    if let Some(caregiver) = caregiver {
        text = text.replace("{caregiver}", caregiver);
    }
    text
}

/// Supervision session opened for a third party
pub fn opening(profile: &SupervisedProfile) -> Directive {
    Directive::new(
        format!(
            "Entendido, voy a estar pendiente de {}. Hola, {}, aquí estoy contigo.",
            profile.name, profile.name
        ),
        SuggestedAction::SupervisionCheckIn,
    )
    .with_context(SUPERVISION_TONE)
}

/// Routine check-in on the supervised person
pub fn check_in(profile: &SupervisedProfile) -> Directive {
    Directive::new(
        fill(pick(CHECK_IN), profile, None),
        SuggestedAction::SupervisionCheckIn,
    )
    .with_phrasing()
    .with_context(SUPERVISION_TONE)
}

/// Quiet companionship when the person sounds fine
pub fn ambient(profile: &SupervisedProfile) -> Directive {
    Directive::new(
        fill(pick(AMBIENT), profile, None),
        SuggestedAction::AmbientPresence,
    )
    .with_phrasing()
    .with_context(SUPERVISION_TONE)
}

/// A risk phrase was matched and an escalation timer was armed
pub fn risk_detected(profile: &SupervisedProfile, caregiver_name: &str) -> Directive {
    Directive::new(
        fill(pick(RISK_DETECTED), profile, Some(caregiver_name)),
        SuggestedAction::RiskDetectedInitiateTimer,
    )
    .with_context(SUPERVISION_TONE)
}

/// Supervision session closed
pub fn closing(profile: &SupervisedProfile) -> Directive {
    Directive::new(
        format!(
            "De acuerdo, dejo de supervisar a {}. Ha sido un gusto acompañaros.",
            profile.name
        ),
        SuggestedAction::ModeClosed,
    )
}

/// Start requested for a person already under supervision
pub fn already_active(profile: &SupervisedProfile) -> Directive {
    Directive::new(
        format!("Ya estoy pendiente de {}, no te preocupes.", profile.name),
        SuggestedAction::SupervisionCheckIn,
    )
}

/// Stop requested with no active supervision session
pub fn not_active() -> Directive {
    Directive::new(
        "Ahora mismo no estoy supervisando a nadie.",
        SuggestedAction::ContinueConversation,
    )
}

/// Start requested without the supervised person's details
pub fn profile_missing() -> Directive {
    Directive::new(
        "Claro que puedo cuidar de alguien. Dime su nombre y cómo avisar a su \
         persona de contacto, y empiezo.",
        SuggestedAction::ContinueConversation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::AgeGroup;

    fn ana() -> SupervisedProfile {
        SupervisedProfile::new("Ana", AgeGroup::Child)
    }

    #[test]
    fn test_risk_detected_names_person_and_caregiver() {
        let directive = risk_detected(&ana(), "Marta");
        assert!(directive.base_message.contains("Ana"));
        assert!(directive.base_message.contains("Marta"));
        assert_eq!(
            directive.suggested_action,
            SuggestedAction::RiskDetectedInitiateTimer
        );
    }

    #[test]
    fn test_check_in_fills_name() {
        let directive = check_in(&ana());
        assert!(directive.base_message.contains("Ana"));
        assert!(!directive.base_message.contains("{name}"));
    }
}
