#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

// Integration tests for the Ollama client against a mocked HTTP server.
// Run with: cargo test --test integration_ollama

use machine_report::ReportError;
use machine_report::config::OllamaConfig;
use machine_report::generation::OllamaClient;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OllamaClient {
    let config = OllamaConfig {
        url: server.uri(),
        model: "gemma3".to_string(),
        timeout_seconds: 5,
    };

    OllamaClient::new(&config).expect("Failed to create client")
}

#[tokio::test]
async fn generate_returns_reply_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "gemma3",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "gemma3",
            "created_at": "2025-06-01T12:00:00Z",
            "response": "Ticket T-0100 consumed 3 units of part 77.",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = tokio::task::spawn_blocking(move || client.generate("Describe the given data"))
        .await
        .expect("Generation task panicked")
        .expect("Failed to generate reply");

    assert_eq!(reply, "Ticket T-0100 consumed 3 units of part 77.");
}

#[tokio::test]
async fn generate_sends_the_prompt_verbatim() {
    let server = MockServer::start().await;
    let prompt = "Context:\n{\"machine_id\": 1}\n\nQuestion: Describe the given data";

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({ "prompt": prompt })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": "ok",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let owned_prompt = prompt.to_string();
    let reply = tokio::task::spawn_blocking(move || client.generate(&owned_prompt))
        .await
        .expect("Generation task panicked")
        .expect("Failed to generate reply");

    assert_eq!(reply, "ok");
}

#[tokio::test]
async fn server_error_fails_after_a_single_attempt() {
    let server = MockServer::start().await;

    // expect(1) doubles as proof that nothing retries a failed generation.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tokio::task::spawn_blocking(move || client.generate("Describe the given data"))
        .await
        .expect("Generation task panicked");

    assert!(matches!(result, Err(ReportError::Generation(_))));
}

#[tokio::test]
async fn ping_reaches_the_tags_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tokio::task::spawn_blocking(move || client.ping())
        .await
        .expect("Ping task panicked");

    assert!(result.is_ok());
}

#[tokio::test]
async fn health_check_passes_when_model_is_listed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [
                { "name": "gemma3", "size": 3338801804u64 },
                { "name": "nomic-embed-text:latest" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tokio::task::spawn_blocking(move || client.health_check())
        .await
        .expect("Health check task panicked");

    assert!(result.is_ok(), "health check failed: {:?}", result.err());
}

#[tokio::test]
async fn health_check_fails_for_unlisted_model() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [{ "name": "other-model" }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tokio::task::spawn_blocking(move || client.health_check())
        .await
        .expect("Health check task panicked");

    match result {
        Err(ReportError::Generation(message)) => {
            assert!(message.contains("gemma3"), "unexpected message: {}", message);
        }
        other => panic!("expected generation error, got {:?}", other),
    }
}
