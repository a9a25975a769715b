//! Core types for Haven

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// A person protected by a mode state: the end user or a supervised third party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Stable identifier for this subject
    pub id: String,

    /// Display name used in directives and alerts
    pub name: String,

    /// Caregiver or emergency contact, if one has been configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caregiver: Option<CaregiverContact>,

    /// Whether the subject consented to critical-event recording
    #[serde(default)]
    pub consent_critical_events: bool,
}

impl Subject {
    /// Create a subject with a display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            caregiver: None,
            consent_critical_events: false,
        }
    }

    /// Minimal profile created on first contact, before registration
    pub fn minimal(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = id.clone();
        Self {
            id,
            name,
            caregiver: None,
            consent_critical_events: false,
        }
    }

    /// Attach a caregiver contact
    pub fn with_caregiver(mut self, caregiver: CaregiverContact) -> Self {
        self.caregiver = Some(caregiver);
        self
    }

    /// Record consent for critical-event writes
    pub fn with_consent(mut self) -> Self {
        self.consent_critical_events = true;
        self
    }
}

/// Caregiver or emergency-contact identity attached to a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaregiverContact {
    /// Contact name
    pub name: String,

    /// Relationship to the subject ("madre", "hijo", "vecina", ...)
    pub relationship: String,

    /// Phone number used by the external notifier
    pub phone: String,
}

impl CaregiverContact {
    /// Create a new caregiver contact
    pub fn new(
        name: impl Into<String>,
        relationship: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relationship: relationship.into(),
            phone: phone.into(),
        }
    }
}

/// Profile of a vulnerable third party under supervision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisedProfile {
    /// Name of the supervised person
    pub name: String,

    /// Rough age group, used to pick the tone of check-ins
    pub age_group: AgeGroup,

    /// Free-text context supplied at supervision start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl SupervisedProfile {
    /// Create a new supervised profile
    pub fn new(name: impl Into<String>, age_group: AgeGroup) -> Self {
        Self {
            name: name.into(),
            age_group,
            context: None,
        }
    }

    /// Attach supervision context
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Age group of a supervised person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Child,
    Adult,
    Elder,
}

/// Flavor of the simulated-parental support mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentalFlavor {
    Madre,
    Padre,
}

impl ParentalFlavor {
    /// Spanish role noun used in templates
    pub fn role_word(&self) -> &'static str {
        match self {
            Self::Madre => "mamá",
            Self::Padre => "papá",
        }
    }
}

/// A single inbound message for a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Subject this message belongs to
    pub subject_id: String,

    /// Role of the message sender (user, assistant, system)
    pub role: String,

    /// Raw message text
    pub text: String,

    /// Timestamp when this message was received
    pub timestamp: SystemTime,
}

impl InboundMessage {
    /// Create a new inbound message
    pub fn new(
        subject_id: impl Into<String>,
        role: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            role: role.into(),
            text: text.into(),
            timestamp: SystemTime::now(),
        }
    }

    /// Create a user message
    pub fn user(subject_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(subject_id, "user", text)
    }

    /// Create an assistant message
    pub fn assistant(subject_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(subject_id, "assistant", text)
    }
}

/// One prior user turn, as supplied by the recent-history collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Text of the prior turn
    pub text: String,

    /// Emotion detected for that turn
    pub emotion: Emotion,
}

impl HistoryEntry {
    /// Create a new history entry
    pub fn new(text: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            text: text.into(),
            emotion,
        }
    }
}

/// Basic emotions detected by the lexicon classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Gratitude,
    Calm,
    Sadness,
    Hopelessness,
    Discouragement,
    Loneliness,
    Anxiety,
    Fear,
    Anger,
    Frustration,
    Shame,
    Grief,
    Exhaustion,
    Neutral,
    Other,
}

impl Emotion {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Gratitude => "gratitude",
            Self::Calm => "calm",
            Self::Sadness => "sadness",
            Self::Hopelessness => "hopelessness",
            Self::Discouragement => "discouragement",
            Self::Loneliness => "loneliness",
            Self::Anxiety => "anxiety",
            Self::Fear => "fear",
            Self::Anger => "anger",
            Self::Frustration => "frustration",
            Self::Shame => "shame",
            Self::Grief => "grief",
            Self::Exhaustion => "exhaustion",
            Self::Neutral => "neutral",
            Self::Other => "other",
        }
    }
}

/// Structured output of a mode, destined for external phrasing and action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directive {
    /// Base message selected from the content tables
    pub base_message: String,

    /// Whether the external phrasing collaborator should rewrite the base message
    pub needs_external_phrasing: bool,

    /// Tone and constraint instructions for the phrasing collaborator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub further_context: Option<String>,

    /// Opaque tag consumed by the calling application
    pub suggested_action: SuggestedAction,
}

impl Directive {
    /// Create a new directive
    pub fn new(base_message: impl Into<String>, suggested_action: SuggestedAction) -> Self {
        Self {
            base_message: base_message.into(),
            needs_external_phrasing: false,
            further_context: None,
            suggested_action,
        }
    }

    /// Mark this directive for external phrasing
    pub fn with_phrasing(mut self) -> Self {
        self.needs_external_phrasing = true;
        self
    }

    /// Attach phrasing instructions
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.further_context = Some(context.into());
        self
    }
}

/// Side-effect tag signalled to the calling application alongside a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestedAction {
    /// No side effect; keep the conversation going
    ContinueConversation,

    /// Therapeutic listening turn
    EmpatheticListening,

    /// Crisis turn: steer toward professional help
    GuideToProfessionalHelp,

    /// The subject asked for emergency services
    EmergencyReferral,

    /// Check on the subject right now
    UrgentCheckIn,

    /// A risk phrase was matched and an escalation timer was armed
    RiskDetectedInitiateTimer,

    /// Routine supervision check-in
    SupervisionCheckIn,

    /// Quiet companionship during supervision
    AmbientPresence,

    /// Offer simulated-parental support, pending confirmation
    OfferParentalSupport,

    /// Parental-role turn
    ParentalSupport,

    /// A mode was closed and the subject returned to normal conversation
    ModeClosed,
}

/// Alert emitted when an escalation timer expires unanswered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Subject the alert concerns
    pub subject_id: String,

    /// Display name of the subject
    pub subject_name: String,

    /// Contact the external notifier should reach
    pub caregiver: CaregiverContact,

    /// Last message exchanged before the subject went silent
    pub last_message: String,

    /// When the alert fired
    pub timestamp: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = InboundMessage::user("subj-1", "hola");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.subject_id, "subj-1");

        let msg = InboundMessage::assistant("subj-1", "hola");
        assert_eq!(msg.role, "assistant");
    }

    #[test]
    fn test_suggested_action_wire_tags() {
        let json = serde_json::to_string(&SuggestedAction::RiskDetectedInitiateTimer).unwrap();
        assert_eq!(json, "\"RISK_DETECTED_INITIATE_TIMER\"");

        let json = serde_json::to_string(&SuggestedAction::GuideToProfessionalHelp).unwrap();
        assert_eq!(json, "\"GUIDE_TO_PROFESSIONAL_HELP\"");
    }

    #[test]
    fn test_subject_builder() {
        let subject = Subject::new("u1", "Marta")
            .with_caregiver(CaregiverContact::new("Luis", "hijo", "+34600111222"))
            .with_consent();

        assert!(subject.consent_critical_events);
        assert_eq!(subject.caregiver.unwrap().relationship, "hijo");
    }
}
