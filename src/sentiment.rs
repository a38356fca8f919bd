//! Lexical sentiment classification.
//!
//! Whole-word counting against fixed word lists, no stemming and no
//! negation handling. The label comes from the count-margin rule: one side
//! must lead the other by more than one hit to leave neutral. Scores are
//! the fixed per-label constants from [`Sentiment::score`], independent of
//! the raw counts.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::article::Sentiment;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "positive",
    "success",
    "successful",
    "win",
    "winning",
    "happy",
    "joy",
    "joyful",
    "benefit",
    "beneficial",
    "impressive",
    "inspire",
    "innovative",
    "breakthrough",
    "progress",
    "improve",
    "improvement",
    "grow",
    "growth",
    "opportunity",
    "hope",
    "hopeful",
    "celebrate",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "poor",
    "negative",
    "failure",
    "fail",
    "lose",
    "losing",
    "unhappy",
    "sad",
    "sorrow",
    "sorrowful",
    "loss",
    "damage",
    "hurt",
    "harmful",
    "decline",
    "decrease",
    "worsen",
    "worse",
    "worst",
    "concern",
    "concerns",
    "concerning",
    "problem",
    "trouble",
    "crisis",
    "danger",
    "dangerous",
    "conflict",
    "war",
    "death",
    "die",
    "disaster",
    "emergency",
    "fear",
    "afraid",
];

static POSITIVE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| POSITIVE_WORDS.iter().copied().collect());

static NEGATIVE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATIVE_WORDS.iter().copied().collect());

/// Classifies `text` into a sentiment label plus its fixed score.
///
/// Total over all inputs: empty or blank text is neutral, and no input can
/// fail. Tokenization splits on non-alphanumeric boundaries, matching the
/// whole-word semantics of a `\b`-anchored match.
pub fn classify(text: &str) -> (Sentiment, f64) {
    if text.trim().is_empty() {
        return (Sentiment::Neutral, Sentiment::Neutral.score());
    }

    let lowered = text.to_lowercase();
    let mut positive = 0usize;
    let mut negative = 0usize;

    for word in lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if POSITIVE_SET.contains(word) {
            positive += 1;
        } else if NEGATIVE_SET.contains(word) {
            negative += 1;
        }
    }

    let label = if positive > negative + 1 {
        Sentiment::Positive
    } else if negative > positive + 1 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    };

    (label, label.score())
}
