//! # HTTP Routes
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Frete API Routes                                 │
//! │                                                                         │
//! │  POST    /shipping/quote  ──► validate ──► calculate ──► 200 options   │
//! │                                  │                                      │
//! │                                  └── violations ──► 400 details         │
//! │                                                                         │
//! │  GET     /health          ──► 200 "OK"                                 │
//! │                                                                         │
//! │  OPTIONS (any route)      ──► 204 + CORS headers (pre-flight)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries permissive CORS headers so browser checkouts on
//! other origins can call the endpoint directly.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use frete_core::types::{RawShippingRequest, ShippingOption};
use serde::Serialize;
use tracing::{debug, info_span, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// Path of the quote endpoint.
pub const QUOTE_PATH: &str = "/shipping/quote";

/// Body of a successful quote.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub options: Vec<ShippingOption>,
}

/// Builds the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(QUOTE_PATH, post(quote_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    "OK"
}

/// Quote endpoint.
///
/// Malformed JSON is a `BadRequest`; a well-formed body with bad values is a
/// `Validation` error listing every violation; otherwise three options.
async fn quote_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawShippingRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    info_span!("quote", %request_id).in_scope(|| quote(&state, payload))
}

fn quote(
    state: &AppState,
    payload: Result<Json<RawShippingRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let Json(raw) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Unreadable quote request");
        ApiError::from(rejection)
    })?;

    let request = state.calculator.validate(&raw).map_err(|errors| {
        warn!(violations = errors.len(), details = %errors, "Rejected quote request");
        ApiError::Validation(errors)
    })?;

    let quote = state.calculator.calculate(&request)?;

    if let (Some(express), Some(standard)) = (quote.express(), quote.standard()) {
        debug!(
            destination = %request.destination(),
            express = %express.price,
            express_days = express.estimated_days,
            standard = %standard.price,
            standard_days = standard.estimated_days,
            "Quote calculated"
        );
    }

    Ok(Json(QuoteResponse {
        success: true,
        options: quote.into_options(),
    }))
}

// =============================================================================
// CORS
// =============================================================================

/// Answers pre-flight requests and adds CORS headers to everything else.
async fn cors_middleware(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = Response::new(Body::empty());
        *resp.status_mut() = StatusCode::NO_CONTENT;
        insert_cors_headers(&mut resp);
        return resp;
    }

    let mut resp = next.run(req).await;
    insert_cors_headers(&mut resp);
    resp
}

fn insert_cors_headers(resp: &mut Response) {
    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use frete_core::types::EngineConfig;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(Arc::new(AppState::new(EngineConfig::default())))
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(QUOTE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("request")
    }

    async fn read_json(res: Response) -> Value {
        let bytes = axum::body::to_bytes(res.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn test_quote_success() {
        let body = json!({
            "cepDestino": "78556100",
            "peso": 500,
            "comprimento": 30,
            "altura": 20,
            "largura": 20,
            "formato": 1
        });

        let res = app().oneshot(post_json(body.to_string())).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            HeaderValue::from_static("*")
        );

        let json = read_json(res).await;
        assert_eq!(json["success"], true);

        let options = json["options"].as_array().unwrap();
        assert_eq!(options.len(), 3);

        assert_eq!(options[0]["serviceCode"], "04014");
        assert_eq!(options[0]["serviceName"], "Express");
        assert_eq!(options[0]["price"], 37.0);
        assert_eq!(options[0]["estimatedDays"], 2);

        assert_eq!(options[1]["serviceCode"], "04510");
        assert_eq!(options[1]["serviceName"], "Standard");
        assert_eq!(options[1]["price"], 22.2);
        assert_eq!(options[1]["estimatedDays"], 5);

        assert_eq!(options[2]["serviceCode"], "PICKUP");
        assert_eq!(options[2]["serviceName"], "Store Pickup");
        assert_eq!(options[2]["price"], 0.0);
        assert_eq!(options[2]["estimatedDays"], 0);

        for option in options {
            assert_eq!(option["insuredValueFee"], 0.0);
            assert_eq!(option["signatureConfirmationFee"], 0.0);
            assert_eq!(option["declaredValueFee"], 0.0);
        }
    }

    #[tokio::test]
    async fn test_quote_validation_failure() {
        let body = json!({
            "cepDestino": "78556100",
            "peso": -5,
            "comprimento": 30,
            "altura": 20,
            "largura": 20,
            "formato": 9
        });

        let res = app().oneshot(post_json(body.to_string())).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let json = read_json(res).await;
        assert_eq!(json["error"], "Invalid input");
        assert!(json.get("options").is_none());

        let details: Vec<&str> = json["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d.as_str().unwrap())
            .collect();
        assert_eq!(
            details,
            vec!["peso must be between 1 and 30000", "formato must be one of: 1, 2, 3"]
        );
    }

    #[tokio::test]
    async fn test_quote_missing_postal_code() {
        let res = app().oneshot(post_json("{}")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let json = read_json(res).await;
        assert_eq!(json["details"], json!(["cepDestino is required"]));
    }

    #[tokio::test]
    async fn test_quote_malformed_json() {
        let res = app().oneshot(post_json("{not json")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let json = read_json(res).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn test_quote_wrong_json_type() {
        let body = json!({ "cepDestino": "78556100", "peso": "heavy" });

        let res = app().oneshot(post_json(body.to_string())).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(res).await["success"], false);
    }

    #[tokio::test]
    async fn test_preflight() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri(QUOTE_PATH)
            .body(Body::empty())
            .unwrap();

        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let headers = res.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");

        let bytes = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }
}
