//! Label-to-display mapping for emotion labels.
//!
//! Two independent tables over the same label set: one for colors, one for
//! icons. Both share the same fallback for labels they do not know, and
//! lookups ignore case.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Emotion labels with a dedicated color and icon.
pub const KNOWN_EMOTIONS: [&str; 7] = [
    "happy", "sad", "angry", "fear", "surprise", "neutral", "disgust",
];

/// A hex color token such as `#FFD700`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(&'static str);

impl Color {
    pub const fn new(hex: &'static str) -> Self {
        Color(hex)
    }

    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// RGB triple for terminals that take true color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.0.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(0)
        };
        (channel(0), channel(2), channel(4))
    }
}

/// An icon token (CSS icon class) plus the glyph a terminal prints for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Icon {
    pub token: &'static str,
    pub glyph: &'static str,
}

/// Color and icon resolved for one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display {
    pub color: Color,
    pub icon: Icon,
}

pub const DEFAULT_COLOR: Color = Color::new("#6C757D");

pub const DEFAULT_ICON: Icon = Icon {
    token: "fa-question-circle",
    glyph: "❔",
};

static EMOTION_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    vec![
        ("happy", Color::new("#FFD700")),
        ("sad", Color::new("#1E90FF")),
        ("angry", Color::new("#FF4500")),
        ("fear", Color::new("#8A2BE2")),
        ("surprise", Color::new("#FF69B4")),
        ("neutral", Color::new("#A9A9A9")),
        ("disgust", Color::new("#228B22")),
    ]
    .into_iter()
    .collect()
});

static EMOTION_ICONS: Lazy<HashMap<&'static str, Icon>> = Lazy::new(|| {
    vec![
        ("happy", Icon { token: "fa-smile-beam", glyph: "😊" }),
        ("sad", Icon { token: "fa-sad-tear", glyph: "😢" }),
        ("angry", Icon { token: "fa-angry", glyph: "😠" }),
        ("fear", Icon { token: "fa-grimace", glyph: "😨" }),
        ("surprise", Icon { token: "fa-surprise", glyph: "😲" }),
        ("neutral", Icon { token: "fa-meh", glyph: "😐" }),
        ("disgust", Icon { token: "fa-dizzy", glyph: "🤢" }),
    ]
    .into_iter()
    .collect()
});

pub fn color_for(label: &str) -> Color {
    EMOTION_COLORS
        .get(label.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_COLOR)
}

pub fn icon_for(label: &str) -> Icon {
    EMOTION_ICONS
        .get(label.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_ICON)
}

pub fn display_for(label: &str) -> Display {
    Display {
        color: color_for(label),
        icon: icon_for(label),
    }
}
