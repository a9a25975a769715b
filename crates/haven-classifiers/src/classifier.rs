//! Classification result types

use haven_core::Emotion;
use serde::{Deserialize, Serialize};

/// Per-message output of the risk classifier
///
/// Produced fresh for every inbound message, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Dominant emotion detected in the message
    pub emotion: Emotion,

    /// Crisis verdict, if any rule fired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis: Option<CrisisVerdict>,
}

impl ClassificationResult {
    /// Create a result with no crisis verdict
    pub fn calm(emotion: Emotion) -> Self {
        Self {
            emotion,
            crisis: None,
        }
    }

    /// Whether a crisis rule fired for this message
    pub fn is_crisis(&self) -> bool {
        self.crisis.is_some()
    }
}

/// The classifier's judgment that a message indicates acute risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisVerdict {
    /// Risk category
    pub category: CrisisCategory,

    /// Urgency of the verdict; always high for a fired rule
    pub urgency: Urgency,
}

impl CrisisVerdict {
    /// Create a high-urgency verdict for a category
    pub fn high(category: CrisisCategory) -> Self {
        Self {
            category,
            urgency: Urgency::High,
        }
    }
}

/// Categories of crisis detected by the phrase rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisCategory {
    /// Explicit suicidal ideation
    SuicidalIdeation,

    /// Self-harm intent or activity
    SelfHarmRisk,

    /// Severe emotional collapse
    SevereEmotionalCollapse,
}

impl CrisisCategory {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::SuicidalIdeation => "suicidal_ideation",
            Self::SelfHarmRisk => "self_harm_risk",
            Self::SevereEmotionalCollapse => "severe_emotional_collapse",
        }
    }
}

/// Urgency attached to a crisis verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
}
