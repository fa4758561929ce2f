//! Client for a sentiment and emotion analysis service.
//!
//! Results flow from [`client::AnalysisClient`] through
//! [`presenter::ResultPresenter`] onto a [`render::RenderTarget`]; a
//! [`session::Session`] ties them together with per-action controls.

pub mod chart;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod image;
pub mod lexicon;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod render;
pub mod score;
pub mod session;
pub mod stub;
pub mod terminal;

pub use chart::{project, ChartId, ChartSeries, ChartSlot};
pub use client::AnalysisClient;
pub use config::{ClientConfig, StubConfig};
pub use display::{color_for, display_for, icon_for, Color, Display, Icon};
pub use error::{ClientError, ImageError, RenderError};
pub use image::{ImageSelection, SelectedImage};
pub use model::{Action, AnalysisResult, EvaluationReport, LabeledScore, Modality, TrainingReport};
pub use presenter::{Presented, ResultPresenter};
pub use render::{Field, Panel, RecordingTarget, RenderTarget};
pub use score::normalize_score;
pub use session::{Outcome, Session};
pub use terminal::TerminalTarget;
