use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Posts Search API",
        "version": version,
        "description": "Search your own posts by title, tags, content or template",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "search": "/api/posts/my-search (protected)",
        }
    }))
}

/// GET /health - liveness plus database connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                    "database_error": e.to_string()
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::testing::{send, MemoryPostStore};

    #[tokio::test]
    async fn root_is_public() {
        let (status, body) = send(MemoryPostStore::new(), "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn health_reports_database_state() {
        let (status, body) = send(MemoryPostStore::new(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "ok");

        let (status, body) = send(MemoryPostStore::new().failing("db down"), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "degraded");
        assert!(body["database_error"].as_str().unwrap().contains("db down"));
    }
}
