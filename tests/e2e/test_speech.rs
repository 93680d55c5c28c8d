use crate::e2e::helpers;

use helpers::{assertions, fixtures, mocks, TestContext, TestOptions};
use hyper::StatusCode;
use serde_json::json;
use std::sync::Arc;
use storytime_backend::domain::shared::{ProviderError, RetryPolicy, StoryError};
use storytime_backend::domain::speech::{split_into_chunks, SpeechService, SpeechServiceApi, MAX_CHUNK_CHARS};
use storytime_backend::infrastructure::repositories::{PollyTtsRepository, TtsRepository};
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_text_to_speech(ctx: &TestContext) {
    let text = "Hello, little one. It is time to sleep.";

    let response = ctx
        .client
        .post("/api/speech/synthesize", &json!({ "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assertions::assert_audio_headers(&response.headers);
    response.assert_header("x-chunk-count", "1");

    // EchoTts returns the chunk text as its audio
    assert_eq!(response.body_bytes, text.as_bytes());
    assert_eq!(ctx.tts.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_split_long_text_and_keep_order(ctx: &TestContext) {
    let text = fixtures::narration_text(9000);
    let expected_chunks = split_into_chunks(&text, MAX_CHUNK_CHARS);

    let response = ctx
        .client
        .post("/api/speech/synthesize", &json!({ "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let chunk_count: usize = response.header("x-chunk-count").unwrap().parse().unwrap();
    assert!(chunk_count >= 2);
    assert_eq!(chunk_count, expected_chunks.len());
    assert_eq!(ctx.tts.calls(), chunk_count);
    assert_eq!(response.body_bytes, expected_chunks.concat().into_bytes());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_cached_audio_by_id(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/speech/synthesize",
            &json!({ "text": "The moon hums a lullaby." }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let audio_id = response.header("x-audio-id").unwrap().clone();
    let location = response.header("location").unwrap().clone();
    assert_eq!(location, format!("/api/audio/{}", audio_id));

    let cached = ctx.client.get(&location).await.unwrap();

    cached.assert_status(StatusCode::OK);
    assertions::assert_audio_headers(&cached.headers);
    cached.assert_header("x-audio-id", &audio_id);
    assert_eq!(cached.body_bytes, response.body_bytes);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .get(&format!("/api/audio/{}", uuid::Uuid::new_v4()))
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/speech/synthesize", &json!({ "text": "   " }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Text cannot be empty");
    assert_eq!(ctx.tts.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_text_over_limit(ctx: &TestContext) {
    let text = "a".repeat(20_001);

    let response = ctx
        .client
        .post("/api/speech/synthesize", &json!({ "text": text }))
        .await
        .unwrap();

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(ctx.tts.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_speech_limit_after_exhausting_retries(ctx: &TestContext) {
    ctx.tts
        .fail_with(ProviderError::RateLimited("429 Too Many Requests".into()));

    let response = ctx
        .client
        .post(
            "/api/speech/synthesize",
            &json!({ "text": "One more story, please." }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .assert_error_message("Speech generation limit reached");
    assert_eq!(ctx.tts.calls(), 3);
}

#[tokio::test]
async fn it_should_report_unconfigured_speech_provider() {
    let ctx = TestContext::new(TestOptions {
        speech_unconfigured: true,
        ..TestOptions::default()
    })
    .await
    .unwrap();

    let response = ctx
        .client
        .post("/api/speech/synthesize", &json!({ "text": "Goodnight." }))
        .await
        .unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    // Story generation is unaffected
    let ready = ctx.client.get("/health/ready").await.unwrap();
    ready.assert_status(StatusCode::OK);
    assert_eq!(
        ready.body.as_ref().unwrap().get("speech").and_then(|v| v.as_str()),
        Some("not_configured")
    );
}

#[tokio::test]
async fn it_should_classify_unreachable_polly_as_network_error() {
    let repo = PollyTtsRepository::new(
        Arc::new(mocks::create_mock_polly_client()),
        "Joanna".to_string(),
    );

    let result = repo.synthesize_chunk("Hello there.").await;

    assert!(
        matches!(result, Err(ProviderError::Network(_))),
        "Expected network error, got {:?}",
        result
    );
}

#[tokio::test]
async fn it_should_cap_polly_chunks_at_its_request_limit() {
    let repo = PollyTtsRepository::new(
        Arc::new(mocks::create_mock_polly_client()),
        "Joanna".to_string(),
    );

    assert_eq!(repo.max_chunk_chars(), 3000);
}

#[tokio::test]
async fn it_should_not_retry_network_errors_from_polly() {
    let service = SpeechService::new(
        Arc::new(PollyTtsRepository::new(
            Arc::new(mocks::create_mock_polly_client()),
            "Joanna".to_string(),
        )),
        RetryPolicy::new(3, std::time::Duration::from_millis(10)),
    );

    let result = service.synthesize("Hello there.").await;

    assert!(matches!(result, Err(StoryError::Network(_))));
}

#[tokio::test]
async fn it_should_return_bad_gateway_when_polly_is_unreachable() {
    let ctx = TestContext::new(TestOptions {
        use_polly: true,
        ..TestOptions::default()
    })
    .await
    .unwrap();

    let response = ctx
        .client
        .post("/api/speech/synthesize", &json!({ "text": "Hello there." }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Network error occurred");
}
