//! Local stand-in for the analysis backend.
//!
//! Serves the same four routes as the real service so the client can be run
//! and tested offline. Text is scored with [`crate::lexicon`]; images get a
//! fixed, neutral-leaning distribution; training is not available.

use axum::{routing::post, Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::client::{ANALYZE_IMAGE_PATH, ANALYZE_TEXT_PATH, EVALUATE_MODEL_PATH, TRAIN_MODEL_PATH};
use crate::image::split_data_url;
use crate::lexicon;

const TRAINING_UNAVAILABLE: &str = "Model training is not available on the stub backend";

pub fn router() -> Router {
    Router::new()
        .route(ANALYZE_TEXT_PATH, post(analyze_text))
        .route(ANALYZE_IMAGE_PATH, post(analyze_image))
        .route(TRAIN_MODEL_PATH, post(train_model))
        .route(EVALUATE_MODEL_PATH, post(evaluate_model))
}

async fn analyze_text(Json(body): Json<Value>) -> Json<Value> {
    let text = body.get("text").and_then(Value::as_str).unwrap_or("");
    Json(score_text(text))
}

async fn analyze_image(Json(body): Json<Value>) -> Json<Value> {
    let image = body.get("image").and_then(Value::as_str).unwrap_or("");
    Json(score_image(image))
}

async fn train_model() -> Json<Value> {
    Json(json!({ "error": TRAINING_UNAVAILABLE }))
}

async fn evaluate_model() -> Json<Value> {
    Json(json!({ "error": TRAINING_UNAVAILABLE }))
}

pub fn score_text(text: &str) -> Value {
    if text.trim().is_empty() {
        return json!({ "error": "Empty text provided" });
    }

    let emotions = lexicon::emotions(text);
    let dominant = lexicon::dominant(&emotions);
    let sentiment = lexicon::sentiment(text);
    info!(dominant = %dominant.label, sentiment = %sentiment.label, "scored text");

    json!({
        "sentiment": sentiment,
        "emotions": emotions,
        "dominant_emotion": dominant,
    })
}

pub fn score_image(image: &str) -> Value {
    if image.is_empty() {
        return json!({ "error": "No image data provided" });
    }

    // Bare base64 is accepted as well as a full data-URL.
    let payload = split_data_url(image).map(|(_, p)| p).unwrap_or(image);
    match STANDARD.decode(payload) {
        Ok(bytes) if !bytes.is_empty() => {}
        Ok(_) => return json!({ "error": "Error analyzing image: empty image" }),
        Err(e) => return json!({ "error": format!("Error analyzing image: {}", e) }),
    }

    let emotions: Map<String, Value> = [
        ("angry", 0.02),
        ("disgust", 0.01),
        ("fear", 0.04),
        ("happy", 0.18),
        ("sad", 0.06),
        ("surprise", 0.03),
        ("neutral", 0.66),
    ]
    .into_iter()
    .map(|(label, score)| (label.to_string(), Value::from(score)))
    .collect();
    let dominant = lexicon::dominant(&emotions);

    json!({
        "emotions": emotions,
        "dominant_emotion": dominant,
    })
}
