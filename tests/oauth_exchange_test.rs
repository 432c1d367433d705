// ABOUTME: Integration tests for the HTTP code exchange client
// ABOUTME: Runs a local axum function on an ephemeral port and checks failure mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 AlchemyLab

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};

use alchemylab_connect::{
    callback::FailureKind,
    models::Platform,
    oauth::{CodeExchange, ExchangeRequest, FunctionCodeExchange},
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tokio::net::TcpListener;
use url::Url;

type SeenRequests = Arc<Mutex<Vec<(Option<String>, serde_json::Value)>>>;

/// Backend function that records calls and answers with a fixed response
#[derive(Clone)]
struct ExchangeFunction {
    status: StatusCode,
    body: &'static str,
    seen: SeenRequests,
}

impl ExchangeFunction {
    fn responding(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn seen(&self) -> Vec<(Option<String>, serde_json::Value)> {
        self.seen.lock().unwrap().clone()
    }

    async fn handle(
        State(function): State<Self>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, &'static str) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        function.seen.lock().unwrap().push((authorization, body));
        (function.status, function.body)
    }

    async fn serve(&self) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/exchange", post(Self::handle))
            .with_state(self.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Url::parse(&format!("http://{address}/exchange")).unwrap()
    }
}

fn google_request(authorization: Option<&str>) -> ExchangeRequest {
    ExchangeRequest {
        platform: Platform::Google,
        code: "auth-code".to_owned(),
        state: "google".to_owned(),
        redirect_uri: "https://app.alchemylab.test/oauth/callback".to_owned(),
        authorization: authorization.map(ToOwned::to_owned),
    }
}

#[tokio::test]
async fn test_successful_exchange_forwards_code_and_session() {
    common::init_test_logging();
    let function = ExchangeFunction::responding(StatusCode::OK, "{}");
    let exchange = FunctionCodeExchange::new(function.serve().await).unwrap();

    exchange
        .exchange(&google_request(Some("Bearer session-jwt")))
        .await
        .unwrap();

    let seen = function.seen();
    assert_eq!(seen.len(), 1);
    let (authorization, body) = &seen[0];
    assert_eq!(authorization.as_deref(), Some("Bearer session-jwt"));
    assert_eq!(body["platform"], "google");
    assert_eq!(body["code"], "auth-code");
    assert_eq!(body["state"], "google");
    assert_eq!(body["redirect_uri"], "https://app.alchemylab.test/oauth/callback");
    assert!(body.get("authorization").is_none());
}

#[tokio::test]
async fn test_missing_session_is_not_authenticated_without_calling_function() {
    let function = ExchangeFunction::responding(StatusCode::OK, "{}");
    let exchange = FunctionCodeExchange::new(function.serve().await).unwrap();

    let failure = exchange.exchange(&google_request(None)).await.unwrap_err();

    assert_eq!(failure.kind, FailureKind::NotAuthenticated);
    assert_eq!(failure.message, "User is not logged in");
    assert!(function.seen().is_empty());
}

#[tokio::test]
async fn test_unauthorized_response_is_not_authenticated() {
    let function = ExchangeFunction::responding(StatusCode::UNAUTHORIZED, r#"{"error":"expired"}"#);
    let exchange = FunctionCodeExchange::new(function.serve().await).unwrap();

    let failure = exchange
        .exchange(&google_request(Some("Bearer stale")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::NotAuthenticated);
}

#[tokio::test]
async fn test_tagged_error_body_keeps_kind() {
    let function = ExchangeFunction::responding(
        StatusCode::BAD_REQUEST,
        r#"{"error":"Provider rejected the code","kind":"access_denied"}"#,
    );
    let exchange = FunctionCodeExchange::new(function.serve().await).unwrap();

    let failure = exchange
        .exchange(&google_request(Some("Bearer session-jwt")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::AccessDenied);
    assert_eq!(failure.message, "Provider rejected the code");
}

#[tokio::test]
async fn test_unstructured_server_error_is_exchange_failure() {
    let function = ExchangeFunction::responding(StatusCode::INTERNAL_SERVER_ERROR, "boom");
    let exchange = FunctionCodeExchange::new(function.serve().await).unwrap();

    let failure = exchange
        .exchange(&google_request(Some("Bearer session-jwt")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::ExchangeFailed);
}

#[tokio::test]
async fn test_unreachable_function_is_exchange_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{address}/exchange")).unwrap();
    let exchange = FunctionCodeExchange::new(endpoint).unwrap();

    let failure = exchange
        .exchange(&google_request(Some("Bearer session-jwt")))
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::ExchangeFailed);
    assert_eq!(failure.message, "Failed to complete Google connection");
}
