//! Crisis verdict rules
//!
//! Ordered phrase rules over lowercased input; the first matching rule wins
//! and rules never stack severity.

use crate::classifier::{CrisisCategory, CrisisVerdict};
use crate::lexicon::{
    COLLAPSE_PROMOTING, HISTORY_NEGATIVE_THRESHOLD, HISTORY_WINDOW, SELF_HARM, SEVERE_COLLAPSE,
    SUICIDAL_IDEATION, SUSTAINED_NEGATIVE, UNCONDITIONALLY_URGENT,
};
use aho_corasick::AhoCorasick;
use haven_core::{Emotion, HistoryEntry, Result};
use tracing::debug;

/// Phrase-rule crisis classifier
pub struct CrisisClassifier {
    suicidal: AhoCorasick,
    self_harm: AhoCorasick,
    collapse: AhoCorasick,
    urgent: AhoCorasick,
}

impl CrisisClassifier {
    /// Create a new crisis classifier from the built-in phrase lists
    pub fn new() -> Result<Self> {
        Ok(Self {
            suicidal: build_matcher("suicidal-ideation", SUICIDAL_IDEATION)?,
            self_harm: build_matcher("self-harm", SELF_HARM)?,
            collapse: build_matcher("severe-collapse", SEVERE_COLLAPSE)?,
            urgent: build_matcher("unconditionally-urgent", UNCONDITIONALLY_URGENT)?,
        })
    }

    /// Evaluate the crisis rules for one message
    ///
    /// `emotion` is the current message's detected emotion; `history` holds
    /// prior user turns, most recent last. Returns `None` when no rule fires.
    pub fn classify(
        &self,
        text: &str,
        emotion: Emotion,
        history: &[HistoryEntry],
    ) -> Option<CrisisVerdict> {
        let lowered = text.to_lowercase();

        if self.suicidal.is_match(&lowered) {
            debug!(rule = "suicidal_ideation", "Crisis phrase rule fired");
            return Some(CrisisVerdict::high(CrisisCategory::SuicidalIdeation));
        }

        if self.self_harm.is_match(&lowered) {
            debug!(rule = "self_harm", "Crisis phrase rule fired");
            return Some(CrisisVerdict::high(CrisisCategory::SelfHarmRisk));
        }

        if self.collapse.is_match(&lowered) {
            let promoted = self.urgent.is_match(&lowered)
                || COLLAPSE_PROMOTING.contains(&emotion)
                || sustained_negativity(history);

            if promoted {
                debug!(rule = "severe_collapse", "Crisis phrase rule fired");
                return Some(CrisisVerdict::high(CrisisCategory::SevereEmotionalCollapse));
            }
        }

        None
    }
}

/// Whether at least 3 of the last 4 prior turns carried a negative emotion
fn sustained_negativity(history: &[HistoryEntry]) -> bool {
    let window_start = history.len().saturating_sub(HISTORY_WINDOW);
    let negative = history[window_start..]
        .iter()
        .filter(|entry| SUSTAINED_NEGATIVE.contains(&entry.emotion))
        .count();

    negative >= HISTORY_NEGATIVE_THRESHOLD
}

fn build_matcher(name: &str, phrases: &[&str]) -> Result<AhoCorasick> {
    AhoCorasick::builder().build(phrases).map_err(|e| {
        haven_core::Error::classifier(format!("Failed to build {name} phrase matcher: {e}"))
    })
}
