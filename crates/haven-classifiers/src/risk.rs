//! Combined risk classifier

use crate::classifier::ClassificationResult;
use crate::crisis::CrisisClassifier;
use crate::emotion::EmotionClassifier;
use haven_core::{HistoryEntry, Result};

/// Per-message risk classifier: emotion scoring plus crisis verdict rules
pub struct RiskClassifier {
    emotion: EmotionClassifier,
    crisis: CrisisClassifier,
}

impl RiskClassifier {
    /// Create a new risk classifier from the built-in lexicons
    pub fn new() -> Result<Self> {
        Ok(Self {
            emotion: EmotionClassifier::new()?,
            crisis: CrisisClassifier::new()?,
        })
    }

    /// Classify one message against the emotion lexicons and crisis rules
    pub fn classify(&self, text: &str, history: &[HistoryEntry]) -> ClassificationResult {
        let emotion = self.emotion.score(text);
        let crisis = self.crisis.classify(text, emotion, history);

        ClassificationResult { emotion, crisis }
    }
}
