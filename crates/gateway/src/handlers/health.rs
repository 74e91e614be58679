//! Health check and metrics handlers

use axum::{extract::State, Json};
use serde::Serialize;
use crate::AppState;
use tarjuman_common::errors::{AppError, Result};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub store: CheckResult,
    pub translator: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - store reachable and provider configured
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let store_check = match state.store.get_documents().await {
        Ok(documents) => CheckResult {
            status: "up".to_string(),
            detail: Some(format!("{} documents", documents.len())),
            error: None,
        },
        Err(e) => CheckResult {
            status: "down".to_string(),
            detail: None,
            error: Some(e.to_string()),
        },
    };

    // The provider is not called here; a probe per request would spend quota
    let translator_check = CheckResult {
        status: "configured".to_string(),
        detail: Some(state.translator.model_name().to_string()),
        error: None,
    };

    let all_healthy = store_check.status == "up";

    Json(ReadyResponse {
        status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            store: store_check,
            translator: translator_check,
        },
    })
}

/// Prometheus scrape endpoint
pub async fn metrics(State(state): State<AppState>) -> Result<String> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| AppError::NotFound {
            resource_type: "Metrics".to_string(),
            id: "prometheus".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_health_and_ready() {
        let app = TestApp::seeded();

        let (status, body) = send(app.router(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy" }));

        let (status, body) = send(app.router(), Method::GET, "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["checks"]["store"]["detail"], "5 documents");
        assert_eq!(body["checks"]["translator"]["detail"], "mock-translator");
    }

    #[tokio::test]
    async fn test_metrics_disabled_is_404() {
        let app = TestApp::new();
        let (status, _) = send(app.router(), Method::GET, "/metrics", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
