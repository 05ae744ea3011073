use ai_hub::services::inference::{Credential, InferenceClient, RelayOutcome};
use serde_json::json;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, timeout: Option<Duration>) -> InferenceClient {
    let endpoint = Url::parse(&server.uri()).unwrap();
    InferenceClient::new(endpoint, Credential::new("hf_test"), timeout).unwrap()
}

#[tokio::test]
async fn test_relay_sends_bearer_and_inputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer hf_test"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "inputs": "How are you?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generated_text": "Fine." })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server, None).relay("How are you?").await;
    assert_eq!(outcome, RelayOutcome::Success("Fine.".to_string()));
}

#[tokio::test]
async fn test_relay_array_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "generated_text": "From a list." }])),
        )
        .mount(&server)
        .await;

    // Only a top-level object carrying generated_text counts as an answer.
    let outcome = client(&server, None).relay("hi").await;
    assert_eq!(outcome, RelayOutcome::MalformedResponse);
}

#[tokio::test]
async fn test_relay_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let outcome = client(&server, None).relay("hi").await;
    assert_eq!(outcome, RelayOutcome::MalformedResponse);
}

#[tokio::test]
async fn test_relay_forbidden_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "error": "restricted" })))
        .expect(1)
        .mount(&server)
        .await;

    // One attempt only, no retries.
    let outcome = client(&server, None).relay("hi").await;
    assert_eq!(outcome, RelayOutcome::UpstreamUnavailable);
}

#[tokio::test]
async fn test_relay_timeout_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "generated_text": "too late" }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let outcome = client(&server, Some(Duration::from_millis(50)))
        .relay("hi")
        .await;
    assert_eq!(outcome, RelayOutcome::UpstreamUnavailable);
}

#[tokio::test]
async fn test_relay_unreachable_is_unavailable() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let endpoint = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();

    let client = InferenceClient::new(endpoint, Credential::new("hf_test"), None).unwrap();
    assert_eq!(client.relay("hi").await, RelayOutcome::UpstreamUnavailable);
}
