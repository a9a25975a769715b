//! Lexicon-based emotion classifier
//!
//! Counts whole-word keyword matches per emotion over lowercased input and
//! returns the emotion with the strictly highest count. Negated keywords
//! still count; negation handling is a known gap.

use crate::lexicon::{keywords, EMOTION_ORDER};
use aho_corasick::AhoCorasick;
use haven_core::{Emotion, Result};

/// Emotion classifier over per-emotion keyword matchers
pub struct EmotionClassifier {
    matchers: Vec<(Emotion, AhoCorasick)>,
}

impl EmotionClassifier {
    /// Create a new emotion classifier from the built-in lexicon
    pub fn new() -> Result<Self> {
        let mut matchers = Vec::with_capacity(EMOTION_ORDER.len());

        for emotion in EMOTION_ORDER {
            let matcher = AhoCorasick::builder()
                .build(keywords(emotion))
                .map_err(|e| {
                    haven_core::Error::classifier(format!(
                        "Failed to build keyword matcher for {}: {e}",
                        emotion.label()
                    ))
                })?;
            matchers.push((emotion, matcher));
        }

        Ok(Self { matchers })
    }

    /// Score the text and return the dominant emotion
    ///
    /// Zero keyword matches across all lexicons maps to `Neutral`. Ties keep
    /// the first emotion in the fixed evaluation order.
    pub fn score(&self, text: &str) -> Emotion {
        let lowered = text.to_lowercase();

        let mut best = Emotion::Neutral;
        let mut best_count = 0usize;

        for (emotion, matcher) in &self.matchers {
            let count = matcher
                .find_iter(&lowered)
                .filter(|m| is_word_bounded(&lowered, m.start(), m.end()))
                .count();

            if count > best_count {
                best = *emotion;
                best_count = count;
            }
        }

        best
    }
}

/// Whether the span `[start, end)` is delimited by non-alphanumeric characters
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}
