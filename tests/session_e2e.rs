//! End-to-end tests: a `Session` talking to a mock backend over real HTTP.
//!
//! Each test serves an axum router on an ephemeral port and renders onto a
//! `RecordingTarget`.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use emotion_lens::{
    stub, Action, AnalysisClient, ClientConfig, Field, Outcome, Panel, RecordingTarget, Session,
};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn session_for(base_url: &str) -> Session<RecordingTarget> {
    let config = ClientConfig::default().with_base_url(base_url);
    Session::new(AnalysisClient::new(&config).unwrap(), RecordingTarget::default())
}

fn happy_result() -> Value {
    json!({
        "dominant_emotion": {"label": "happy", "score": 0.92},
        "emotions": {"happy": 0.92, "sad": 0.08}
    })
}

#[tokio::test]
async fn test_text_analysis_end_to_end() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/analyze/text",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(body);
                Json(happy_result())
            }
        }),
    );
    let session = session_for(&spawn(router).await);

    let outcome = session.analyze_text("  I am happy ").await;

    let presented = match outcome {
        Outcome::Rendered(presented) => presented,
        other => panic!("expected a rendered result, got {:?}", other),
    };
    assert_eq!(seen.lock().unwrap().as_slice(), &[json!({"text": "I am happy"})]);

    session.with_target(|t| {
        let label = t.text(Panel::Text, Field::EmotionLabel).unwrap();
        assert!(label.contains("happy (92.00%)"));
        assert_eq!(t.width(Panel::Text, Field::EmotionBar), Some(92.0));

        let live = t.live_charts();
        assert_eq!(live, vec![presented.chart.unwrap()]);
        let chart = t.chart(live[0]).unwrap();
        assert_eq!(chart.labels, vec!["happy", "sad"]);
        assert_eq!(chart.percentages, vec![92.0, 8.0]);

        assert!(t.is_enabled(Action::AnalyzeText));
        assert_eq!(t.text(Panel::Text, Field::Status), Some(""));
    });
}

#[tokio::test]
async fn test_backend_error_is_surfaced_without_chart() {
    let router = Router::new().route(
        "/analyze/text",
        post(|| async { Json(json!({"error": "Empty text provided"})) }),
    );
    let session = session_for(&spawn(router).await);

    let outcome = session.analyze_text("hello").await;

    assert_eq!(outcome, Outcome::BackendError("Empty text provided".into()));
    session.with_target(|t| {
        assert_eq!(t.alerts(), vec!["Error: Empty text provided"]);
        assert_eq!(
            t.text(Panel::Text, Field::Status),
            Some("Error: Empty text provided")
        );
        assert_eq!(t.chart_count(), 0);
        assert!(t.is_enabled(Action::AnalyzeText));
    });
}

#[tokio::test]
async fn test_malformed_emotions_skip_only_the_chart() {
    let router = Router::new().route(
        "/analyze/text",
        post(|| async {
            Json(json!({
                "dominant_emotion": {"label": "sad", "score": "0.4"},
                "emotions": "unavailable"
            }))
        }),
    );
    let session = session_for(&spawn(router).await);

    let outcome = session.analyze_text("meh").await;

    let presented = match outcome {
        Outcome::Rendered(presented) => presented,
        other => panic!("expected a rendered result, got {:?}", other),
    };
    assert!(presented.chart.is_none());
    session.with_target(|t| {
        assert_eq!(t.text(Panel::Text, Field::EmotionLabel), Some("sad (40.00%)"));
        assert_eq!(t.chart_count(), 0);
        assert!(t.alerts().is_empty());
    });
}

#[tokio::test]
async fn test_missing_dominant_emotion_is_reported() {
    let router = Router::new().route(
        "/analyze/text",
        post(|| async { Json(json!({"emotions": {"happy": 0.3}})) }),
    );
    let session = session_for(&spawn(router).await);

    let outcome = session.analyze_text("hm").await;

    assert!(matches!(outcome, Outcome::RenderFailed(_)));
    session.with_target(|t| {
        assert_eq!(t.chart_count(), 0);
        assert!(t.is_enabled(Action::AnalyzeText));
    });
}

#[tokio::test]
async fn test_server_failure_is_a_transport_error() {
    let router = Router::new().route(
        "/analyze/text",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
    );
    let session = session_for(&spawn(router).await);

    let outcome = session.analyze_text("hello").await;

    assert!(matches!(outcome, Outcome::TransportError(_)));
    session.with_target(|t| {
        assert_eq!(t.alerts(), vec!["An error occurred while analyzing the text."]);
        assert!(t.is_enabled(Action::AnalyzeText));
    });
}

#[tokio::test]
async fn test_duplicate_submission_is_refused() {
    let router = Router::new().route(
        "/analyze/text",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Json(happy_result())
        }),
    );
    let session = session_for(&spawn(router).await);

    let (first, second) = tokio::join!(
        session.analyze_text("first"),
        session.analyze_text("second")
    );

    assert!(matches!(first, Outcome::Rendered(_)));
    assert_eq!(second, Outcome::Busy);
    assert!(session.controls().is_enabled(Action::AnalyzeText));
    session.with_target(|t| assert_eq!(t.chart_count(), 1));
}

#[tokio::test]
async fn test_repeat_analysis_replaces_chart() {
    let router = Router::new().route("/analyze/text", post(|| async { Json(happy_result()) }));
    let session = session_for(&spawn(router).await);

    session.analyze_text("one").await;
    session.analyze_text("two").await;

    session.with_target(|t| {
        assert_eq!(t.chart_count(), 2);
        assert_eq!(t.live_charts().len(), 1);
    });

    let target = session.into_target();
    assert!(target.live_charts().is_empty());
}

#[tokio::test]
async fn test_image_analysis_sends_data_url() {
    let seen: Arc<Mutex<Option<String>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/analyze/image",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = body["image"].as_str().map(str::to_string);
                Json(json!({
                    "dominant_emotion": {"label": "Surprise", "score": 0.7},
                    "emotions": {"surprise": 0.7, "neutral": 0.3}
                }))
            }
        }),
    );
    let session = session_for(&spawn(router).await);

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"\x89PNG").unwrap();
    session.select_image_path(file.path()).unwrap();

    let outcome = session.analyze_image().await;

    assert!(matches!(outcome, Outcome::Rendered(_)));
    assert_eq!(
        seen.lock().unwrap().as_deref(),
        Some("data:image/png;base64,iVBORw==")
    );
    session.with_target(|t| {
        assert_eq!(
            t.text(Panel::Image, Field::EmotionLabel),
            Some("Surprise (70.00%)")
        );
        assert_eq!(
            t.icon(Panel::Image, Field::EmotionIcon).unwrap().icon.token,
            "fa-surprise"
        );
        assert_eq!(t.text(Panel::Text, Field::EmotionLabel), None);
    });
}

#[tokio::test]
async fn test_sample_image_uses_content_type() {
    let router = Router::new().route(
        "/samples/smile",
        get(|| async { ([(header::CONTENT_TYPE, "image/jpeg")], vec![0xFFu8, 0xD8, 0xFF]).into_response() }),
    );
    let base = spawn(router).await;
    let session = session_for(&base);

    session
        .select_sample(&format!("{}/samples/smile", base))
        .await
        .unwrap();

    let selected = session.selected_image().unwrap();
    assert_eq!(selected.data_url, "data:image/jpeg;base64,/9j/");
}

#[tokio::test]
async fn test_train_and_evaluate_reports() {
    let router = Router::new()
        .route(
            "/train-model",
            post(|| async {
                Json(json!({
                    "message": "Model trained successfully",
                    "history": {"accuracy": [0.5, 0.7], "loss": [1.1, 0.6]}
                }))
            }),
        )
        .route(
            "/evaluate-model",
            post(|| async {
                Json(json!({
                    "message": "Model evaluated successfully",
                    "metrics": {"loss": 0.6, "accuracy": 0.7}
                }))
            }),
        );
    let session = session_for(&spawn(router).await);

    let trained = session.train().await;
    assert!(matches!(trained, Outcome::Trained(_)));
    session.with_target(|t| {
        assert_eq!(
            t.text(Panel::Model, Field::Status),
            Some("Model trained successfully")
        );
        assert!(t
            .text(Panel::Model, Field::Report)
            .unwrap()
            .contains("accuracy: 0.5000 -> 0.7000 (2 epochs)"));
    });

    let Outcome::Evaluated(report) = session.evaluate().await else {
        panic!("expected evaluation report");
    };
    assert_eq!(report.metrics["accuracy"], json!(0.7));
    session.with_target(|t| {
        assert!(t
            .text(Panel::Model, Field::Report)
            .unwrap()
            .contains("loss: 0.6000"));
    });
}

#[tokio::test]
async fn test_against_stub_backend() {
    let session = session_for(&spawn(stub::router()).await);

    let Outcome::Rendered(presented) = session.analyze_text("I am happy").await else {
        panic!("expected a rendered result");
    };
    assert_eq!(presented.label, "happy");
    session.with_target(|t| {
        assert_eq!(
            t.text(Panel::Text, Field::SentimentLabel),
            Some("POSITIVE (100.00%)")
        );
        let chart = t.chart(presented.chart.unwrap()).unwrap();
        assert_eq!(chart.len(), 7);
    });

    let outcome = session.train().await;
    assert!(matches!(outcome, Outcome::BackendError(ref m) if m.contains("not available")));
}
