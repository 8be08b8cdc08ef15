//! End-to-end optimize flow: controller, background runtime and the Gemini
//! client talking to a mock server.

use pretty_assertions::assert_eq;
use prompt_architect::app::dashui::OptimizerController;
use prompt_architect::app::optimizer::{ApiKey, GeminiClient, PromptOptimizer, SYSTEM_INSTRUCTION};
use prompt_architect::app::status::{OptimizationStatus, FALLBACK_ERROR_MESSAGE};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-2.5-flash";
const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn controller(server: &MockServer, api_key: Option<&str>) -> OptimizerController {
    let client = GeminiClient::new(server.uri(), MODEL);
    OptimizerController::new(PromptOptimizer::new(
        Arc::new(client),
        api_key.map(ApiKey::new),
    ))
}

async fn settle(controller: &mut OptimizerController) {
    for _ in 0..500 {
        controller.poll();
        if controller.status() != OptimizationStatus::Loading {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("request never finished");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_idea_is_optimized_into_markdown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "## Role\nSenior Python engineer" }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller(&server, Some("test-key"));
    controller.set_idea_text("build a web scraper");
    assert!(controller.submit());
    assert_eq!(controller.status(), OptimizationStatus::Loading);

    settle(&mut controller).await;

    assert_eq!(controller.status(), OptimizationStatus::Success);
    assert_eq!(
        controller.session().optimized_text(),
        "## Role\nSenior Python engineer"
    );
    assert_eq!(controller.session().error_message(), None);

    let requests = server.received_requests().await.unwrap_or_default();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        json!(SYSTEM_INSTRUCTION)
    );
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        json!("build a web scraper")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_missing_key_never_reaches_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller(&server, None);
    controller.set_idea_text("summarize this article");
    assert!(controller.submit());

    assert_eq!(controller.status(), OptimizationStatus::Error);
    assert_eq!(
        controller.session().error_message(),
        Some("API Key is missing. Please check your environment configuration.")
    );
    assert!(!controller.has_request_in_flight());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_provider_error_message_is_surfaced_and_retry_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "# Retry worked" }] } }]
        })))
        .mount(&server)
        .await;

    let mut controller = controller(&server, Some("test-key"));
    controller.set_idea_text("write a haiku");
    controller.submit();
    settle(&mut controller).await;

    assert_eq!(controller.status(), OptimizationStatus::Error);
    let message = controller.session().error_message().unwrap_or_default();
    assert!(message.contains("Quota exceeded"), "got {message}");

    controller.submit();
    settle(&mut controller).await;

    assert_eq!(controller.status(), OptimizationStatus::Success);
    assert_eq!(controller.session().optimized_text(), "# Retry worked");
    assert_eq!(controller.session().error_message(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_empty_candidates_fail_with_no_response_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let mut controller = controller(&server, Some("test-key"));
    controller.set_idea_text("idea");
    controller.submit();
    settle(&mut controller).await;

    assert_eq!(controller.status(), OptimizationStatus::Error);
    assert_eq!(
        controller.session().error_message(),
        Some("No response generated from the model.")
    );
    assert_ne!(
        controller.session().error_message(),
        Some(FALLBACK_ERROR_MESSAGE)
    );
}
