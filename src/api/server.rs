use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers::{cron_check, AppState};

/// Path the scheduler hits
pub const CRON_ROUTE: &str = "/api/cron";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// CODEPULSE_HOST=0.0.0.0
    /// CODEPULSE_PORT=3000
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("CODEPULSE_HOST").unwrap_or(defaults.host);
        let port = std::env::var("CODEPULSE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(CRON_ROUTE, get(cron_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(
    config: ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting CodePulse server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("CodePulse server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for CTRL+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GITHUB_API_URL, GITHUB_USERNAME, TELEGRAM_API_URL, WEBHOOK_URL};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use std::collections::HashMap;
    use tower::util::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_app(pairs: &[(&str, String)]) -> Router {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        build_router(Arc::new(AppState::from_map(values)))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_cron() -> Request<Body> {
        Request::builder()
            .uri(CRON_ROUTE)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_username_returns_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = create_test_app(&[
            (GITHUB_API_URL, server.uri()),
            (WEBHOOK_URL, format!("{}/hook", server.uri())),
        ]);
        let response = app.oneshot(get_cron()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({"error": "GITHUB_USERNAME is not set"}));
    }

    #[tokio::test]
    async fn test_healthy_pulse() {
        let server = MockServer::start().await;
        let recent = (Utc::now() - Duration::hours(2))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        Mock::given(method("GET"))
            .and(path("/users/octocat/events/public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"type": "PushEvent", "created_at": recent}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let app = create_test_app(&[
            (GITHUB_USERNAME, "octocat".to_string()),
            (GITHUB_API_URL, server.uri()),
            (WEBHOOK_URL, format!("{}/hook", server.uri())),
        ]);
        let response = app.oneshot(get_cron()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "success");
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Last push was 2.0 hours ago"), "{}", message);
        assert!(message.ends_with("Pulse is strong. Keep coding! 🚀"));
    }

    #[tokio::test]
    async fn test_upstream_failure_still_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/events/public"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let app = create_test_app(&[
            (GITHUB_USERNAME, "octocat".to_string()),
            (GITHUB_API_URL, server.uri()),
            (TELEGRAM_API_URL, server.uri()),
            (WEBHOOK_URL, format!("{}/hook", server.uri())),
        ]);
        let response = app.oneshot(get_cron()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "status": "success",
                "message": "No recent push events found. Alert sent."
            })
        );
    }

    #[tokio::test]
    async fn test_post_not_allowed() {
        let app = create_test_app(&[]);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(CRON_ROUTE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_test_app(&[]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
    }
}
