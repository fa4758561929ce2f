//! User actions: analyze text, analyze image, train, evaluate.
//!
//! A [`Session`] owns the render target, the presenter, the image selection
//! and one control per action. Everything runs on one thread; interior
//! mutability is via `RefCell` and borrows are never held across an
//! `.await`.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use tracing::{error, info, warn};

use crate::client::AnalysisClient;
use crate::error::{ClientError, ImageError, RenderError};
use crate::image::{ImageSelection, SelectedImage};
use crate::model::{Action, AnalysisResult, EvaluationReport, Modality, TrainingReport};
use crate::presenter::{present_evaluation, present_training, Presented, ResultPresenter};
use crate::render::{Field, Panel, RenderTarget};

/// How an action ended. Every variant is already surfaced on the target.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rendered(Presented),
    Trained(TrainingReport),
    Evaluated(EvaluationReport),
    /// The action's control was disabled; nothing was sent.
    Busy,
    /// Nothing to send (empty text, no image selected).
    Skipped(&'static str),
    /// The backend replied with an `error` field.
    BackendError(String),
    /// The request never produced a usable response.
    TransportError(String),
    /// The response arrived but could not be rendered.
    RenderFailed(RenderError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Rendered(_) | Outcome::Trained(_) | Outcome::Evaluated(_)
        )
    }
}

/// Which controls are currently disabled.
#[derive(Debug, Default)]
pub struct Controls {
    busy: RefCell<HashSet<Action>>,
}

impl Controls {
    pub fn is_enabled(&self, action: Action) -> bool {
        !self.busy.borrow().contains(&action)
    }

    fn try_disable(&self, action: Action) -> bool {
        self.busy.borrow_mut().insert(action)
    }

    fn enable(&self, action: Action) {
        self.busy.borrow_mut().remove(&action);
    }
}

/// Re-enables its control when dropped, whatever path the action took.
struct ControlGuard<'a, T: RenderTarget> {
    session: &'a Session<T>,
    action: Action,
}

impl<T: RenderTarget> Drop for ControlGuard<'_, T> {
    fn drop(&mut self) {
        self.session.controls.enable(self.action);
        if let Ok(mut target) = self.session.target.try_borrow_mut() {
            target.set_enabled(self.action, true);
        }
    }
}

pub struct Session<T: RenderTarget> {
    client: AnalysisClient,
    target: RefCell<T>,
    presenter: RefCell<ResultPresenter>,
    selection: RefCell<ImageSelection>,
    controls: Controls,
}

impl<T: RenderTarget> Session<T> {
    pub fn new(client: AnalysisClient, target: T) -> Self {
        Self {
            client,
            target: RefCell::new(target),
            presenter: RefCell::new(ResultPresenter::new()),
            selection: RefCell::new(ImageSelection::default()),
            controls: Controls::default(),
        }
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Run `f` against the render target.
    pub fn with_target<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut *self.target.borrow_mut())
    }

    /// Release every chart and hand back the target.
    pub fn into_target(self) -> T {
        let mut target = self.target.into_inner();
        self.presenter.into_inner().clear(&mut target);
        target
    }

    pub fn selected_image(&self) -> Option<SelectedImage> {
        self.selection.borrow().current().cloned()
    }

    pub fn select_image(&self, image: SelectedImage) {
        self.target
            .borrow_mut()
            .set_text(Panel::Image, Field::Selection, &image.source);
        self.selection.borrow_mut().select(image);
    }

    pub fn select_image_path(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let image = SelectedImage::from_path(path)?;
        self.select_image(image);
        Ok(())
    }

    pub async fn select_sample(&self, url: &str) -> Result<(), ImageError> {
        let image = SelectedImage::from_sample_url(&self.client, url).await?;
        self.select_image(image);
        Ok(())
    }

    pub async fn analyze_text(&self, text: &str) -> Outcome {
        let text = text.trim();
        if text.is_empty() {
            return Outcome::Skipped("no text to analyze");
        }
        let Some(_guard) = self.begin(Action::AnalyzeText) else {
            return Outcome::Busy;
        };

        info!(chars = text.chars().count(), "analyzing text");
        let response = self.client.analyze_text(text).await;
        self.finish_analysis(Action::AnalyzeText, Modality::Text, response)
    }

    pub async fn analyze_image(&self) -> Outcome {
        let Some(image) = self.selected_image() else {
            return Outcome::Skipped("no image selected");
        };
        let Some(_guard) = self.begin(Action::AnalyzeImage) else {
            return Outcome::Busy;
        };

        info!(source = %image.source, "analyzing image");
        let response = self.client.analyze_image(&image.data_url).await;
        self.finish_analysis(Action::AnalyzeImage, Modality::Image, response)
    }

    pub async fn train(&self) -> Outcome {
        let Some(_guard) = self.begin(Action::Train) else {
            return Outcome::Busy;
        };

        info!("requesting model training");
        match self.client.train_model().await {
            Ok(report) => {
                present_training(&mut *self.target.borrow_mut(), &report);
                Outcome::Trained(report)
            }
            Err(e) => self.fail(Action::Train, e),
        }
    }

    pub async fn evaluate(&self) -> Outcome {
        let Some(_guard) = self.begin(Action::Evaluate) else {
            return Outcome::Busy;
        };

        info!("requesting model evaluation");
        match self.client.evaluate_model().await {
            Ok(report) => {
                present_evaluation(&mut *self.target.borrow_mut(), &report);
                Outcome::Evaluated(report)
            }
            Err(e) => self.fail(Action::Evaluate, e),
        }
    }

    /// Disable the action's control, or `None` if it is already disabled.
    fn begin(&self, action: Action) -> Option<ControlGuard<'_, T>> {
        if !self.controls.try_disable(action) {
            warn!(%action, "request already in flight");
            return None;
        }

        let mut target = self.target.borrow_mut();
        target.set_enabled(action, false);
        target.set_text(Panel::from(action), Field::Status, action.busy_text());

        Some(ControlGuard {
            session: self,
            action,
        })
    }

    fn finish_analysis(
        &self,
        action: Action,
        modality: Modality,
        response: Result<AnalysisResult, ClientError>,
    ) -> Outcome {
        let result = match response {
            Ok(result) => result,
            Err(e) => return self.fail(action, e),
        };

        let mut target = self.target.borrow_mut();
        target.set_text(Panel::from(modality), Field::Status, "");
        match self
            .presenter
            .borrow_mut()
            .present(&mut *target, modality, &result)
        {
            Ok(presented) => {
                info!(%modality, label = %presented.label, percent = presented.percent, "result rendered");
                Outcome::Rendered(presented)
            }
            Err(e) => {
                warn!(%modality, error = %e, "result not rendered");
                target.set_text(Panel::from(modality), Field::Status, &e.to_string());
                Outcome::RenderFailed(e)
            }
        }
    }

    fn fail(&self, action: Action, err: ClientError) -> Outcome {
        let panel = Panel::from(action);
        let mut target = self.target.borrow_mut();

        match err {
            ClientError::Backend(message) => {
                let text = format!("Error: {}", message);
                target.alert(&text);
                target.set_text(panel, Field::Status, &text);
                Outcome::BackendError(message)
            }
            other => {
                error!(%action, error = %other, "request failed");
                let text = transport_message(action);
                target.alert(text);
                target.set_text(panel, Field::Status, text);
                Outcome::TransportError(other.to_string())
            }
        }
    }
}

fn transport_message(action: Action) -> &'static str {
    match action {
        Action::AnalyzeText => "An error occurred while analyzing the text.",
        Action::AnalyzeImage => "An error occurred while analyzing the image.",
        Action::Train => "An error occurred while training the model.",
        Action::Evaluate => "An error occurred while evaluating the model.",
    }
}
