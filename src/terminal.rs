//! Text rendering of panels, score bars and emotion charts.

use colored::Colorize;
use std::collections::{HashMap, HashSet};

use crate::chart::{ChartId, ChartSeries};
use crate::display::{Color, Display};
use crate::model::{Action, Modality};
use crate::render::{Field, Panel, RenderTarget};
use crate::score::format_percent;

/// Cells in a full-width score bar.
pub const BAR_WIDTH: usize = 40;
/// Cells in a 100% chart bar.
pub const CHART_WIDTH: usize = 30;

const FILLED: char = '█';
const EMPTY: char = '░';

#[derive(Debug, Default)]
struct PanelState {
    texts: HashMap<Field, String>,
    widths: HashMap<Field, f64>,
    icons: HashMap<Field, Display>,
    chart: Option<ChartId>,
}

/// Keeps the latest state of every widget and renders a panel on demand.
#[derive(Debug, Default)]
pub struct TerminalTarget {
    color: bool,
    panels: HashMap<Panel, PanelState>,
    charts: HashMap<ChartId, ChartSeries>,
    disabled: HashSet<Action>,
}

impl TerminalTarget {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn live_chart_count(&self) -> usize {
        self.charts.len()
    }

    pub fn is_enabled(&self, action: Action) -> bool {
        !self.disabled.contains(&action)
    }

    /// Render one panel as text. Empty widgets are left out.
    pub fn render(&self, panel: Panel) -> String {
        let Some(state) = self.panels.get(&panel) else {
            return String::new();
        };
        let mut out = String::new();

        if let Some(source) = state.texts.get(&Field::Selection) {
            out.push_str(&format!("Selected image: {}\n", source));
        }

        if let Some(label) = state.texts.get(&Field::SentimentLabel) {
            out.push_str(&format!("Sentiment: {}\n", label));
            if let Some(width) = state.widths.get(&Field::SentimentBar) {
                out.push_str(&format!("  {}\n", self.bar(*width, BAR_WIDTH, None)));
            }
        }

        if let Some(label) = state.texts.get(&Field::EmotionLabel) {
            let icon = state.icons.get(&Field::EmotionIcon);
            let glyph = icon.map(|d| d.icon.glyph).unwrap_or(" ");
            out.push_str(&format!("Emotion: {} {}\n", glyph, label));
            if let Some(width) = state.widths.get(&Field::EmotionBar) {
                out.push_str(&format!(
                    "  {}\n",
                    self.bar(*width, BAR_WIDTH, icon.map(|d| d.color))
                ));
            }
        }

        if let Some(series) = state.chart.and_then(|id| self.charts.get(&id)) {
            out.push_str("Emotion breakdown:\n");
            out.push_str(&self.chart(series));
        }

        if let Some(report) = state.texts.get(&Field::Report) {
            out.push_str(report);
        }

        if let Some(status) = state.texts.get(&Field::Status).filter(|s| !s.is_empty()) {
            out.push_str(&format!("Status: {}\n", status));
        }

        out
    }

    fn chart(&self, series: &ChartSeries) -> String {
        let label_width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut out = String::new();
        for (label, pct, color) in series.iter() {
            out.push_str(&format!(
                "  {:<width$} {} {:>7}\n",
                label,
                self.bar(pct, CHART_WIDTH, Some(color)),
                format_percent(pct),
                width = label_width
            ));
        }
        out
    }

    fn bar(&self, percent: f64, cells: usize, color: Option<Color>) -> String {
        let filled = bar_cells(percent, cells);
        let solid: String = std::iter::repeat(FILLED).take(filled).collect();
        let rest: String = std::iter::repeat(EMPTY).take(cells - filled).collect();

        match color {
            Some(color) if self.color => {
                let (r, g, b) = color.rgb();
                format!("{}{}", solid.truecolor(r, g, b), rest)
            }
            _ => format!("{}{}", solid, rest),
        }
    }
}

/// Filled cells for a percentage, rounded, within `0..=cells`.
pub fn bar_cells(percent: f64, cells: usize) -> usize {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    let filled = (percent.min(100.0) / 100.0 * cells as f64).round() as usize;
    filled.min(cells)
}

impl RenderTarget for TerminalTarget {
    fn set_text(&mut self, panel: Panel, field: Field, text: &str) {
        self.panels
            .entry(panel)
            .or_default()
            .texts
            .insert(field, text.to_string());
    }

    fn set_width(&mut self, panel: Panel, field: Field, percent: f64) {
        self.panels
            .entry(panel)
            .or_default()
            .widths
            .insert(field, percent);
    }

    fn set_icon(&mut self, panel: Panel, field: Field, display: Display) {
        self.panels
            .entry(panel)
            .or_default()
            .icons
            .insert(field, display);
    }

    fn draw_chart(&mut self, modality: Modality, series: &ChartSeries) -> ChartId {
        let id = ChartId::new();
        self.charts.insert(id, series.clone());
        self.panels.entry(Panel::from(modality)).or_default().chart = Some(id);
        id
    }

    fn release_chart(&mut self, id: ChartId) {
        self.charts.remove(&id);
        for state in self.panels.values_mut() {
            if state.chart == Some(id) {
                state.chart = None;
            }
        }
    }

    fn alert(&mut self, message: &str) {
        if self.color {
            eprintln!("{}", message.red().bold());
        } else {
            eprintln!("{}", message);
        }
    }

    fn set_enabled(&mut self, action: Action, enabled: bool) {
        if enabled {
            self.disabled.remove(&action);
        } else {
            self.disabled.insert(action);
        }
    }
}
