//! Wire types exchanged with the analysis backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A label with its raw, not yet normalized score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LabeledScore {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub score: Value,
}

/// Result of one text or image analysis.
///
/// `emotions` is kept as raw JSON: the backend is trusted for its shape only
/// as far as the renderer checks it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AnalysisResult {
    #[serde(default)]
    pub dominant_emotion: Option<LabeledScore>,
    #[serde(default)]
    pub emotions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<LabeledScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrainingReport {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EvaluationReport {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metrics: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageRequest {
    /// `data:<mime>;base64,<payload>`
    pub image: String,
}

/// Which input a result was produced from. Each modality owns its own
/// result widgets and its own chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Text,
    Image,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Text => write!(f, "text"),
            Modality::Image => write!(f, "image"),
        }
    }
}

/// User-triggered actions, one control each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    AnalyzeText,
    AnalyzeImage,
    Train,
    Evaluate,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::AnalyzeText,
        Action::AnalyzeImage,
        Action::Train,
        Action::Evaluate,
    ];

    /// Status text shown while the action's request is outstanding.
    pub fn busy_text(&self) -> &'static str {
        match self {
            Action::AnalyzeText | Action::AnalyzeImage => "Analyzing...",
            Action::Train => "Training model...",
            Action::Evaluate => "Evaluating model...",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::AnalyzeText => "analyze-text",
            Action::AnalyzeImage => "analyze-image",
            Action::Train => "train",
            Action::Evaluate => "evaluate",
        };
        f.write_str(name)
    }
}
