//! Normal-mode directives

use crate::catalog::pick;
use haven_core::{Directive, SuggestedAction};

const CONVERSATION: &[&str] = &[
    "Aquí sigo, cuéntame.",
    "Te escucho, ¿qué me cuentas?",
    "Claro, hablemos de eso.",
    "Qué bueno leerte, sigamos.",
];

/// Ordinary conversational turn
pub fn conversation() -> Directive {
    Directive::new(pick(CONVERSATION), SuggestedAction::ContinueConversation).with_phrasing()
}

/// Generic fallback when a subject profile is malformed or missing
pub fn fallback() -> Directive {
    Directive::new(
        "Estoy aquí contigo. ¿Me cuentas un poco más?",
        SuggestedAction::ContinueConversation,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_needs_phrasing() {
        let directive = conversation();
        assert!(directive.needs_external_phrasing);
        assert_eq!(
            directive.suggested_action,
            SuggestedAction::ContinueConversation
        );
    }
}
