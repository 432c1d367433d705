// ABOUTME: HTTP integration tests for OAuth authorize and callback routes
// ABOUTME: Drives the router in-process and checks redirects, pages, and exchange calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use alchemylab_connect::{
    callback::{CallbackFailure, FailureKind},
    models::Platform,
    routes,
};
use common::{create_test_resources, RecordingExchange, TEST_ORIGIN};
use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_authorize_redirects_to_provider() {
    let (resources, _) = create_test_resources(RecordingExchange::succeeding()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/authorize/google")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 302);
    let location = response.header("location").unwrap();
    assert!(location.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
    assert!(location.contains("state=google"));
}

#[tokio::test]
async fn test_authorize_unsupported_platform_is_bad_request() {
    let (resources, _) = create_test_resources(RecordingExchange::succeeding()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/authorize/mixpanel")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "UNSUPPORTED_PLATFORM");
    assert_eq!(body["error"]["resource_id"], "mixpanel");
}

#[tokio::test]
async fn test_authorize_unknown_platform_is_bad_request() {
    let (resources, _) = create_test_resources(RecordingExchange::succeeding()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/authorize/myspace")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_callback_exchanges_code() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/callback?code=abc&state=linkedin")
        .header("authorization", "Bearer session-token")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 200);
    let html = response.text();
    assert!(html.contains("Your LinkedIn account has been connected successfully."));
    assert!(html.contains(">Continue</a>"));

    let requests = exchange.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].platform, Platform::LinkedIn);
    assert_eq!(requests[0].code, "abc");
    assert_eq!(requests[0].redirect_uri, format!("{TEST_ORIGIN}/oauth/callback"));
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer session-token")
    );
}

#[tokio::test]
async fn test_callback_forwards_session_cookie_as_bearer() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/callback?code=abc&state=google")
        .header("cookie", "theme=dark; auth_token=session-jwt")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 200);
    let html = response.text();
    assert!(html.contains("Your Google account has been connected successfully."));
    assert!(!html.contains("User is not logged in"));
    assert_eq!(
        exchange.requests()[0].authorization.as_deref(),
        Some("Bearer session-jwt")
    );
}

#[tokio::test]
async fn test_authorization_header_takes_precedence_over_cookie() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    AxumTestRequest::get("/oauth/callback?code=abc&state=google")
        .header("authorization", "Bearer header-token")
        .header("cookie", "auth_token=cookie-token")
        .send(routes::router(resources))
        .await;

    assert_eq!(
        exchange.requests()[0].authorization.as_deref(),
        Some("Bearer header-token")
    );
}

#[tokio::test]
async fn test_callback_without_session_forwards_no_authorization() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    AxumTestRequest::get("/oauth/callback?code=abc&state=google")
        .send(routes::router(resources))
        .await;

    assert!(exchange.requests()[0].authorization.is_none());
}

#[tokio::test]
async fn test_callback_for_platform_without_oauth_is_invalid() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();
    let app = routes::router(resources);

    for state in ["mixpanel", "amplitude", "openai"] {
        let response = AxumTestRequest::get(&format!("/oauth/callback?code=abc&state={state}"))
            .send(app.clone())
            .await;

        assert_eq!(response.status(), 400);
        assert!(response.text().contains("Invalid OAuth state parameter"));
    }
    assert!(exchange.requests().is_empty());
}

#[tokio::test]
async fn test_facebook_server_callback_uses_dedicated_redirect_uri() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    let response = AxumTestRequest::get("/api/auth/callback/facebook?code=fb-code&state=facebook")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        exchange.requests()[0].redirect_uri,
        format!("{TEST_ORIGIN}/api/auth/callback/facebook")
    );
}

#[tokio::test]
async fn test_server_callback_rejects_mismatched_state() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    let response = AxumTestRequest::get("/api/auth/callback/facebook?code=x&state=google")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 400);
    assert!(exchange.requests().is_empty());
}

#[tokio::test]
async fn test_provider_error_is_access_denied() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    let response = AxumTestRequest::get(
        "/oauth/callback?error=access_denied&error_description=The+user+denied+access&state=tiktok",
    )
    .send(routes::router(resources))
    .await;

    assert_eq!(response.status(), 403);
    let html = response.text();
    assert!(html.contains("The user denied access"));
    assert!(html.contains(">Try Again</a>"));
    assert!(exchange.requests().is_empty());
}

#[tokio::test]
async fn test_empty_provider_error_still_exchanges_code() {
    let exchange = RecordingExchange::succeeding();
    let (resources, _) = create_test_resources(exchange.clone()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/callback?code=abc&state=linkedin&error=")
        .header("authorization", "Bearer session-token")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(exchange.requests().len(), 1);
}

#[tokio::test]
async fn test_missing_code_is_invalid_callback() {
    let (resources, _) = create_test_resources(RecordingExchange::succeeding()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/callback?state=google")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 400);
    assert!(response.text().contains("Missing authorization code"));
}

#[tokio::test]
async fn test_empty_callback_is_invalid() {
    let (resources, _) = create_test_resources(RecordingExchange::succeeding()).await.unwrap();

    let response = AxumTestRequest::get("/oauth/callback")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 400);
    assert!(response.text().contains("Invalid OAuth state parameter"));
}

#[tokio::test]
async fn test_exchange_auth_failure_offers_log_in() {
    let exchange = RecordingExchange::failing(CallbackFailure::not_authenticated());
    let (resources, _) = create_test_resources(exchange).await.unwrap();

    let response = AxumTestRequest::get("/oauth/callback?code=abc&state=pinterest")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 401);
    let html = response.text();
    assert!(html.contains("User is not logged in"));
    assert!(html.contains(">Log In</a>"));
}

#[tokio::test]
async fn test_exchange_failure_offers_try_again() {
    let exchange = RecordingExchange::failing(CallbackFailure::new(
        FailureKind::ExchangeFailed,
        "Failed to complete Google connection",
    ));
    let (resources, _) = create_test_resources(exchange).await.unwrap();

    let response = AxumTestRequest::get("/oauth/callback?code=abc&state=google")
        .send(routes::router(resources))
        .await;

    assert_eq!(response.status(), 502);
    assert!(response.text().contains(">Try Again</a>"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let (resources, _) = create_test_resources(RecordingExchange::succeeding()).await.unwrap();
    let app = routes::router(resources);

    let health = AxumTestRequest::get("/health").send(app.clone()).await;
    assert_eq!(health.status(), 200);
    let body: serde_json::Value = health.json();
    assert_eq!(body["status"], "healthy");

    let ready = AxumTestRequest::get("/ready").send(app).await;
    assert_eq!(ready.status(), 200);
}
