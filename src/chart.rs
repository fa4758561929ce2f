//! Emotion breakdown projection and the one-chart-per-modality slot.

use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::display::{color_for, Color};
use crate::error::RenderError;
use crate::model::Modality;
use crate::render::RenderTarget;
use crate::score::to_percent;

/// Chart-ready series: parallel labels, percentages and bar colors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub percentages: Vec<f64>,
    pub colors: Vec<Color>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64, Color)> + '_ {
        self.labels
            .iter()
            .zip(&self.percentages)
            .zip(&self.colors)
            .map(|((label, pct), color)| (label.as_str(), *pct, *color))
    }
}

/// Project a raw label-to-score mapping into a [`ChartSeries`].
///
/// Labels keep the backend's order. Every score is normalized, so a bad value
/// shows as a 0% bar instead of breaking the chart. Missing, null, empty or
/// non-object input is reported to the caller and nothing is produced.
pub fn project(emotions: Option<&Value>) -> Result<ChartSeries, RenderError> {
    let map = match emotions {
        None | Some(Value::Null) => return Err(RenderError::MissingEmotions),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(RenderError::MalformedEmotions(json_kind(other))),
    };

    if map.is_empty() {
        return Err(RenderError::EmptyEmotions);
    }

    let mut series = ChartSeries {
        labels: Vec::with_capacity(map.len()),
        percentages: Vec::with_capacity(map.len()),
        colors: Vec::with_capacity(map.len()),
    };
    for (label, raw) in map {
        series.labels.push(label.clone());
        series.percentages.push(to_percent(raw));
        series.colors.push(color_for(label));
    }
    Ok(series)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Handle to a chart instance owned by a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId(Uuid);

impl ChartId {
    pub fn new() -> Self {
        ChartId(Uuid::new_v4())
    }
}

impl Default for ChartId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart-{}", self.0)
    }
}

/// Holds at most one live chart. Replacing it always releases the old
/// instance on the target before the new one is drawn.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartId>,
}

impl ChartSlot {
    pub fn current(&self) -> Option<ChartId> {
        self.current
    }

    pub fn release<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        if let Some(old) = self.current.take() {
            tracing::debug!(chart = %old, "releasing chart");
            target.release_chart(old);
        }
    }

    pub fn replace<T: RenderTarget + ?Sized>(
        &mut self,
        target: &mut T,
        modality: Modality,
        series: &ChartSeries,
    ) -> ChartId {
        self.release(target);
        let id = target.draw_chart(modality, series);
        self.current = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DEFAULT_COLOR;
    use crate::render::{RecordedCall, RecordingTarget};
    use serde_json::json;

    #[test]
    fn test_project_keeps_order_and_normalizes() {
        let emotions = json!({"happy": 0.5, "sad": "bad"});
        let series = project(Some(&emotions)).unwrap();
        assert_eq!(series.labels, vec!["happy", "sad"]);
        assert_eq!(series.percentages, vec![50.0, 0.0]);
    }

    #[test]
    fn test_project_does_not_mutate_input() {
        let emotions = json!({"angry": 2.0, "fear": "0.3", "joy": null});
        let before = emotions.clone();
        let series = project(Some(&emotions)).unwrap();
        assert_eq!(emotions, before);
        assert_eq!(series.percentages, vec![100.0, 30.0, 0.0]);
        assert_eq!(series.colors[2], DEFAULT_COLOR);
    }

    #[test]
    fn test_project_rejects_missing_input() {
        assert_eq!(project(None), Err(RenderError::MissingEmotions));
        assert_eq!(project(Some(&Value::Null)), Err(RenderError::MissingEmotions));
        assert_eq!(project(Some(&json!({}))), Err(RenderError::EmptyEmotions));
        assert_eq!(
            project(Some(&json!([0.1, 0.9]))),
            Err(RenderError::MalformedEmotions("an array"))
        );
    }

    #[test]
    fn test_slot_releases_previous_chart() {
        let mut target = RecordingTarget::default();
        let mut slot = ChartSlot::default();
        let series = project(Some(&json!({"happy": 1.0}))).unwrap();

        let first = slot.replace(&mut target, Modality::Text, &series);
        let second = slot.replace(&mut target, Modality::Text, &series);

        assert_ne!(first, second);
        assert_eq!(slot.current(), Some(second));
        assert_eq!(target.live_charts(), vec![second]);

        let release_pos = target
            .calls
            .iter()
            .position(|c| *c == RecordedCall::ReleaseChart(first))
            .unwrap();
        let draw_pos = target
            .calls
            .iter()
            .rposition(|c| matches!(c, RecordedCall::DrawChart(id, _, _) if *id == second))
            .unwrap();
        assert!(release_pos < draw_pos);
    }

    #[test]
    fn test_slot_release_is_idempotent() {
        let mut target = RecordingTarget::default();
        let mut slot = ChartSlot::default();
        slot.release(&mut target);
        assert!(target.calls.is_empty());
    }
}
