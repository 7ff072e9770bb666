//! HTTP server
//!
//! Routes, middleware and the listener loop for the relay.

pub mod http;

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{Error, Result};
use crate::relay::ChatRelay;

/// Shared application state
pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        Self { relay }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(http::health))
        .route("/chat", post(http::chat))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::BindFailed {
            addr: addr.to_string(),
            source: e,
        })?;
    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "Faith Hub listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonaRegistry;
    use crate::relay::{RelayConfig, FALLBACK_REPLY};
    use crate::upstream::MockClient;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(mock: Arc<MockClient>) -> Router {
        let registry = PersonaRegistry::with_builtins().unwrap();
        let relay = ChatRelay::new(RelayConfig::default(), registry, mock);
        create_router(Arc::new(AppState::new(relay)))
    }

    fn chat_request(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = app_with(Arc::new(MockClient::with_content("unused")));
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (status, json) = send(app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"status": "ok", "service": "Halifax Elim Faith Hub"}));
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mock = Arc::new(MockClient::with_content("Welcome!"));
        let app = app_with(mock.clone());
        let body = json!({
            "assistantId": "faith_builder",
            "message": "Hello",
            "accessCode": "Halifax-elim"
        });

        let (status, json) = send(app, chat_request(body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"assistantName": "Faith Builder", "reply": "Welcome!"}));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_access_denied() {
        let mock = Arc::new(MockClient::with_content("unused"));
        let body = json!({"assistantId": "faith_builder", "message": "Hello"});

        let (status, json) = send(app_with(mock.clone()), chat_request(body.to_string())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            json,
            json!({"error": "Access denied. Please ask Halifax Elim for the current access code."})
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_malformed_body_is_denied() {
        let mock = Arc::new(MockClient::with_content("unused"));

        for body in ["", "{not json", "[]", "\"Halifax-elim\""] {
            let (status, _) = send(app_with(mock.clone()), chat_request(body)).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "body: {:?}", body);
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_bad_requests() {
        let mock = Arc::new(MockClient::with_content("unused"));

        let body = json!({"assistantId": "faith_nobody", "message": "Hello", "accessCode": "Halifax-elim"});
        let (status, json) = send(app_with(mock.clone()), chat_request(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Invalid assistantId"}));

        let body = json!({"assistantId": "faith_companion", "message": "  ", "accessCode": "Halifax-elim"});
        let (status, json) = send(app_with(mock.clone()), chat_request(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Empty message"}));

        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_non_string_message_is_empty() {
        let mock = Arc::new(MockClient::with_content("unused"));
        let body = json!({"assistantId": "faith_builder", "message": 42, "accessCode": "Halifax-elim"});

        let (status, json) = send(app_with(mock.clone()), chat_request(body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "Empty message"}));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_repeated_key_uses_last() {
        let mock = Arc::new(MockClient::with_content("Welcome!"));
        let body = r#"{"assistantId":"faith_builder","message":"  ","message":"Hello","accessCode":"Halifax-elim"}"#;

        let (status, _) = send(app_with(mock.clone()), chat_request(body)).await;
        assert_eq!(status, StatusCode::OK);
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.messages[1].content, "Hello");
    }

    #[tokio::test]
    async fn test_chat_upstream_error() {
        let raw = r#"{"error":{"message":"Rate limit reached"}}"#;
        let app = app_with(Arc::new(MockClient::failing(429, raw)));
        let body = json!({"assistantId": "faith_companion", "message": "Hi", "accessCode": "Halifax-elim"});

        let (status, json) = send(app, chat_request(body.to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, json!({"error": "OpenAI API error", "details": raw}));
    }

    #[tokio::test]
    async fn test_chat_fallback_reply() {
        let app = app_with(Arc::new(MockClient::with_body(r#"{"choices":[]}"#)));
        let body = json!({"assistantId": "faith_mindfulness", "message": "Hi", "accessCode": "Halifax-elim"});

        let (status, json) = send(app, chat_request(body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["assistantName"], "Faith & Mindfulness");
        assert_eq!(json["reply"], FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = app_with(Arc::new(MockClient::with_content("unused")));
        let req = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "https://example.org")
            .body(Body::empty())
            .unwrap();

        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_serve_on_shuts_down() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let registry = PersonaRegistry::with_builtins().unwrap();
        let relay = ChatRelay::new(
            RelayConfig::default(),
            registry,
            Arc::new(MockClient::with_content("unused")),
        );

        let result = serve_on(listener, Arc::new(AppState::new(relay)), async {}).await;
        assert!(result.is_ok());
    }
}
