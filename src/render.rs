//! The display surface results are rendered onto.
//!
//! [`RenderTarget`] is the only thing the presenter and session know about
//! the screen. [`RecordingTarget`] keeps every call in memory, which is what
//! headless callers and tests use.

use crate::chart::{ChartId, ChartSeries};
use crate::display::Display;
use crate::model::{Action, Modality};

/// A group of widgets on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Text,
    Image,
    /// Training and evaluation output.
    Model,
}

impl From<Modality> for Panel {
    fn from(modality: Modality) -> Self {
        match modality {
            Modality::Text => Panel::Text,
            Modality::Image => Panel::Image,
        }
    }
}

impl From<Action> for Panel {
    fn from(action: Action) -> Self {
        match action {
            Action::AnalyzeText => Panel::Text,
            Action::AnalyzeImage => Panel::Image,
            Action::Train | Action::Evaluate => Panel::Model,
        }
    }
}

/// A widget within a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SentimentLabel,
    SentimentBar,
    EmotionLabel,
    EmotionBar,
    EmotionIcon,
    /// Currently selected input (image source).
    Selection,
    /// Inline status / error line.
    Status,
    /// Free-form report body (training history, evaluation metrics).
    Report,
}

pub trait RenderTarget {
    fn set_text(&mut self, panel: Panel, field: Field, text: &str);

    /// Bar width as a percentage in `[0, 100]`.
    fn set_width(&mut self, panel: Panel, field: Field, percent: f64);

    fn set_icon(&mut self, panel: Panel, field: Field, display: Display);

    /// Create a chart instance and return its handle.
    fn draw_chart(&mut self, modality: Modality, series: &ChartSeries) -> ChartId;

    fn release_chart(&mut self, id: ChartId);

    /// Blocking, user-facing notification.
    fn alert(&mut self, message: &str);

    fn set_enabled(&mut self, action: Action, enabled: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    SetText(Panel, Field, String),
    SetWidth(Panel, Field, f64),
    SetIcon(Panel, Field, Display),
    DrawChart(ChartId, Modality, ChartSeries),
    ReleaseChart(ChartId),
    Alert(String),
    SetEnabled(Action, bool),
}

/// In-memory target that records calls in order.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub calls: Vec<RecordedCall>,
}

impl RecordingTarget {
    /// Last text set on a field.
    pub fn text(&self, panel: Panel, field: Field) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            RecordedCall::SetText(p, f, text) if *p == panel && *f == field => Some(text.as_str()),
            _ => None,
        })
    }

    /// Last width set on a field.
    pub fn width(&self, panel: Panel, field: Field) -> Option<f64> {
        self.calls.iter().rev().find_map(|call| match call {
            RecordedCall::SetWidth(p, f, w) if *p == panel && *f == field => Some(*w),
            _ => None,
        })
    }

    pub fn icon(&self, panel: Panel, field: Field) -> Option<Display> {
        self.calls.iter().rev().find_map(|call| match call {
            RecordedCall::SetIcon(p, f, d) if *p == panel && *f == field => Some(*d),
            _ => None,
        })
    }

    /// Charts drawn and not yet released, oldest first.
    pub fn live_charts(&self) -> Vec<ChartId> {
        let mut live = Vec::new();
        for call in &self.calls {
            match call {
                RecordedCall::DrawChart(id, _, _) => live.push(*id),
                RecordedCall::ReleaseChart(id) => live.retain(|l| l != id),
                _ => {}
            }
        }
        live
    }

    pub fn chart(&self, id: ChartId) -> Option<&ChartSeries> {
        self.calls.iter().find_map(|call| match call {
            RecordedCall::DrawChart(drawn, _, series) if *drawn == id => Some(series),
            _ => None,
        })
    }

    pub fn chart_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, RecordedCall::DrawChart(..)))
            .count()
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Alert(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Controls start enabled.
    pub fn is_enabled(&self, action: Action) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|call| match call {
                RecordedCall::SetEnabled(a, enabled) if *a == action => Some(*enabled),
                _ => None,
            })
            .unwrap_or(true)
    }
}

impl RenderTarget for RecordingTarget {
    fn set_text(&mut self, panel: Panel, field: Field, text: &str) {
        self.calls
            .push(RecordedCall::SetText(panel, field, text.to_string()));
    }

    fn set_width(&mut self, panel: Panel, field: Field, percent: f64) {
        self.calls.push(RecordedCall::SetWidth(panel, field, percent));
    }

    fn set_icon(&mut self, panel: Panel, field: Field, display: Display) {
        self.calls.push(RecordedCall::SetIcon(panel, field, display));
    }

    fn draw_chart(&mut self, modality: Modality, series: &ChartSeries) -> ChartId {
        let id = ChartId::new();
        self.calls
            .push(RecordedCall::DrawChart(id, modality, series.clone()));
        id
    }

    fn release_chart(&mut self, id: ChartId) {
        self.calls.push(RecordedCall::ReleaseChart(id));
    }

    fn alert(&mut self, message: &str) {
        self.calls.push(RecordedCall::Alert(message.to_string()));
    }

    fn set_enabled(&mut self, action: Action, enabled: bool) {
        self.calls.push(RecordedCall::SetEnabled(action, enabled));
    }
}
