use crate::e2e::helpers;

use helpers::{TestContext, TestOptions};
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_status(ctx: &TestContext) {
    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("story").and_then(|v| v.as_str()), Some("configured"));
    assert_eq!(body.get("speech").and_then(|v| v.as_str()), Some("configured"));
}

#[tokio::test]
async fn it_should_not_be_ready_without_story_provider() {
    let ctx = TestContext::new(TestOptions {
        story_unconfigured: true,
        ..TestOptions::default()
    })
    .await
    .unwrap();

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
    assert_eq!(
        body.get("story").and_then(|v| v.as_str()),
        Some("not_configured")
    );
}

#[tokio::test]
async fn it_should_not_require_auth_for_health_checks() {
    let ctx = TestContext::new(TestOptions::with_api_token()).await.unwrap();

    let response = ctx.client.get("/health").await.unwrap();
    response.assert_status(StatusCode::OK);

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_caller_request_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_header("/health", "x-request-id", "bedtime-42")
        .await
        .unwrap();

    response.assert_header("x-request-id", "bedtime-42");
}
