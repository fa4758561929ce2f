//! Renders analysis results and model reports onto a [`RenderTarget`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::chart::{project, ChartId, ChartSlot};
use crate::display::display_for;
use crate::error::RenderError;
use crate::model::{AnalysisResult, EvaluationReport, LabeledScore, Modality, TrainingReport};
use crate::render::{Field, Panel, RenderTarget};
use crate::score::{format_percent, to_percent};

/// What a successful [`ResultPresenter::present`] put on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Presented {
    pub label: String,
    pub percent: f64,
    /// `None` when the emotion breakdown was missing or malformed.
    pub chart: Option<ChartId>,
}

/// `"happy (92.00%)"`
pub fn score_line(label: &str, percent: f64) -> String {
    format!("{} ({})", label, format_percent(percent))
}

/// Owns the per-modality chart slots.
#[derive(Debug, Default)]
pub struct ResultPresenter {
    text_chart: ChartSlot,
    image_chart: ChartSlot,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(&self, modality: Modality) -> Option<ChartId> {
        match modality {
            Modality::Text => self.text_chart.current(),
            Modality::Image => self.image_chart.current(),
        }
    }

    fn slot_mut(&mut self, modality: Modality) -> &mut ChartSlot {
        match modality {
            Modality::Text => &mut self.text_chart,
            Modality::Image => &mut self.image_chart,
        }
    }

    /// Update the score bar, label, icon and breakdown chart for one result.
    ///
    /// A result without a dominant emotion is rejected before anything is
    /// touched. A bad emotion breakdown only skips the chart; the previous
    /// chart for the modality is then left as it was.
    pub fn present<T: RenderTarget + ?Sized>(
        &mut self,
        target: &mut T,
        modality: Modality,
        result: &AnalysisResult,
    ) -> Result<Presented, RenderError> {
        let dominant = result
            .dominant_emotion
            .as_ref()
            .filter(|d| !d.label.is_empty())
            .ok_or(RenderError::MissingDominantEmotion)?;
        let panel = Panel::from(modality);

        if modality == Modality::Text {
            if let Some(sentiment) = &result.sentiment {
                show_score(target, panel, Field::SentimentBar, Field::SentimentLabel, sentiment);
            }
        }

        let percent = show_score(target, panel, Field::EmotionBar, Field::EmotionLabel, dominant);
        target.set_icon(panel, Field::EmotionIcon, display_for(&dominant.label));

        let chart = match project(result.emotions.as_ref()) {
            Ok(series) => {
                let id = self.slot_mut(modality).replace(target, modality, &series);
                debug!(%modality, chart = %id, bars = series.len(), "chart drawn");
                Some(id)
            }
            Err(e) => {
                warn!(%modality, error = %e, "skipping emotion chart");
                None
            }
        };

        Ok(Presented {
            label: dominant.label.clone(),
            percent,
            chart,
        })
    }

    /// Release every chart this presenter owns.
    pub fn clear<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        self.text_chart.release(target);
        self.image_chart.release(target);
    }
}

fn show_score<T: RenderTarget + ?Sized>(
    target: &mut T,
    panel: Panel,
    bar: Field,
    label: Field,
    score: &LabeledScore,
) -> f64 {
    let percent = to_percent(&score.score);
    target.set_width(panel, bar, percent);
    target.set_text(panel, label, &score_line(&score.label, percent));
    percent
}

/// Show a training report on the model panel.
pub fn present_training<T: RenderTarget + ?Sized>(target: &mut T, report: &TrainingReport) {
    let status = report.message.as_deref().unwrap_or("Model training finished");
    target.set_text(Panel::Model, Field::Status, status);
    target.set_text(Panel::Model, Field::Report, &format_report("Training history", &report.history));
}

pub fn present_evaluation<T: RenderTarget + ?Sized>(target: &mut T, report: &EvaluationReport) {
    let status = report.message.as_deref().unwrap_or("Model evaluation finished");
    target.set_text(Panel::Model, Field::Status, status);
    target.set_text(Panel::Model, Field::Report, &format_report("Evaluation metrics", &report.metrics));
}

/// Render an opaque history/metrics payload as `key: value` lines.
pub fn format_report(title: &str, payload: &Value) -> String {
    let mut out = format!("{}\n", title);

    match payload {
        Value::Null => out.push_str("  (no data)\n"),
        Value::Object(map) if map.is_empty() => out.push_str("  (no data)\n"),
        Value::Object(map) => {
            for (key, value) in map {
                out.push_str(&format!("  {}: {}\n", key, format_metric(value)));
            }
        }
        other => out.push_str(&format!("  {}\n", other)),
    }

    out
}

fn format_metric(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => format!("{:.4}", f),
            None => n.to_string(),
        },
        Value::Array(items) => {
            let series: Option<Vec<f64>> = items.iter().map(Value::as_f64).collect();
            match series.as_deref() {
                Some([]) => "[]".to_string(),
                Some([only]) => format!("{:.4} (1 epoch)", only),
                Some([first, .., last]) => {
                    format!("{:.4} -> {:.4} ({} epochs)", first, last, items.len())
                }
                None => value.to_string(),
            }
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
