//! Keyword-based sentiment and emotion scoring for the stub backend.
//!
//! Word lists only, no model. Good enough to exercise the client end to end
//! without the real analysis service.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::model::LabeledScore;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "good", "great", "excellent", "amazing", "wonderful", "fantastic", "love", "loved",
        "best", "better", "happy", "joy", "joyful", "glad", "beautiful", "perfect", "awesome",
        "delightful", "pleasant", "satisfied", "excited", "thrilled", "calm", "grateful",
        "nice", "fun", "brilliant", "success",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "bad", "terrible", "awful", "horrible", "poor", "worst", "worse", "hate", "hated",
        "sad", "unhappy", "angry", "annoyed", "furious", "frustrated", "afraid", "scared",
        "disgusting", "gross", "failure", "failed", "broken", "wrong", "lonely", "miserable",
        "upset", "worried",
    ]
    .into_iter()
    .collect()
});

static EMOTION_WORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let table: [(&str, &[&str]); 6] = [
        ("happy", &["happy", "joy", "joyful", "glad", "love", "great", "wonderful", "excited", "delighted", "fun"]),
        ("sad", &["sad", "unhappy", "cry", "crying", "lonely", "miserable", "depressed", "grief", "lost"]),
        ("angry", &["angry", "furious", "mad", "annoyed", "hate", "rage", "frustrated", "outraged"]),
        ("fear", &["afraid", "scared", "fear", "terrified", "worried", "anxious", "nervous", "panic"]),
        ("surprise", &["surprised", "wow", "unexpected", "shocked", "amazing", "suddenly", "astonished"]),
        ("disgust", &["disgusting", "gross", "nasty", "revolting", "sick", "awful"]),
    ];
    table
        .iter()
        .flat_map(|(emotion, words)| words.iter().map(move |w| (*w, *emotion)))
        .collect()
});

/// Emotions reported for every input, in output order.
pub const EMOTION_ORDER: [&str; 7] = [
    "happy", "sad", "angry", "fear", "surprise", "disgust", "neutral",
];

// Weight of the neutral class: full when nothing matched, half otherwise.
const NEUTRAL_BASELINE: f64 = 1.0;
const NEUTRAL_WITH_HITS: f64 = 0.5;

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// POSITIVE / NEGATIVE / NEUTRAL with a confidence in `[0.5, 1]`.
pub fn sentiment(text: &str) -> LabeledScore {
    let words = words(text);
    let positive = words.iter().filter(|w| POSITIVE_WORDS.contains(w.as_str())).count();
    let negative = words.iter().filter(|w| NEGATIVE_WORDS.contains(w.as_str())).count();
    let total = positive + negative;

    let (label, score) = if total == 0 {
        ("NEUTRAL", 0.5)
    } else {
        let ratio = positive as f64 / total as f64;
        if ratio > 0.6 {
            ("POSITIVE", ratio)
        } else if ratio < 0.4 {
            ("NEGATIVE", 1.0 - ratio)
        } else {
            ("NEUTRAL", 0.5 + (ratio - 0.5).abs())
        }
    };

    LabeledScore {
        label: label.to_string(),
        score: Value::from(score),
    }
}

/// Emotion distribution over [`EMOTION_ORDER`], summing to 1.
pub fn emotions(text: &str) -> Map<String, Value> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for word in words(text) {
        if let Some(emotion) = EMOTION_WORDS.get(word.as_str()) {
            *counts.entry(*emotion).or_insert(0.0) += 1.0;
        }
    }

    let neutral = if counts.is_empty() {
        NEUTRAL_BASELINE
    } else {
        NEUTRAL_WITH_HITS
    };
    counts.insert("neutral", neutral);
    let total: f64 = counts.values().sum();

    EMOTION_ORDER
        .iter()
        .map(|emotion| {
            let share = counts.get(emotion).copied().unwrap_or(0.0) / total;
            (emotion.to_string(), Value::from(share))
        })
        .collect()
}

/// Highest-scoring entry; ties go to the earliest label.
pub fn dominant(emotions: &Map<String, Value>) -> LabeledScore {
    let mut best: Option<(&String, f64)> = None;
    for (label, score) in emotions {
        let score = score.as_f64().unwrap_or(0.0);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((label, score));
        }
    }

    best.map(|(label, score)| LabeledScore {
        label: label.clone(),
        score: Value::from(score),
    })
    .unwrap_or_default()
}
