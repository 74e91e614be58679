//! Translation record handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::handlers::documents::parse_id;
use crate::AppState;
use tarjuman_common::{
    db::{Metadata, NewTranslation, Translation, TranslationUpdate},
    errors::{AppError, Result},
    metrics,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTranslationRequest {
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default = "default_status")]
    pub status: String,

    #[validate(length(min = 1, message = "language is required"))]
    pub language: String,

    #[serde(default)]
    pub metadata: Metadata,
}

fn default_status() -> String {
    "pending".to_string()
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation {
            message: rejection.body_text(),
            field: None,
        })
}

/// List translations of a document
pub async fn list_translations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Translation>>> {
    let translations = match parse_id(&id) {
        Some(document_id) => state.store.get_translations(document_id).await?,
        None => Vec::new(),
    };
    Ok(Json(translations))
}

/// Create a translation record for a document. The document itself is not looked up.
pub async fn create_translation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CreateTranslationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Translation>)> {
    let document_id = parse_id(&id).ok_or_else(|| AppError::Validation {
        message: format!("Invalid document id: {}", id),
        field: Some("document_id".to_string()),
    })?;

    let request = json_body(payload)?;
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("language".to_string()),
    })?;

    let translation = state
        .store
        .create_translation(NewTranslation {
            document_id,
            content: request.content,
            status: request.status,
            metadata: request.metadata,
            language: request.language,
        })
        .await?;
    metrics::record_translation_record_created();

    tracing::info!(
        translation_id = %translation.id,
        document_id = %document_id,
        language = %translation.language,
        "Translation record created"
    );

    Ok((StatusCode::CREATED, Json(translation)))
}

/// Merge a partial update over a translation
pub async fn update_translation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<TranslationUpdate>, JsonRejection>,
) -> Result<Json<Translation>> {
    let update = json_body(payload)?;

    let Some(translation_id) = parse_id(&id) else {
        return Err(AppError::translation_not_found(id));
    };

    state
        .store
        .update_translation(translation_id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::translation_not_found(translation_id))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};
    use tarjuman_common::db::DocumentStore;
    use uuid::Uuid;

    fn timestamp(value: &Value) -> DateTime<Utc> {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_by_document() {
        let app = TestApp::new();
        let doc_a = Uuid::new_v4();
        let doc_b = Uuid::new_v4();

        let (status, created) = send(
            app.router(),
            Method::POST,
            &format!("/api/documents/{}/translations", doc_a),
            Some(json!({ "content": "Hello", "language": "english" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "pending");
        assert_eq!(created["document_id"], doc_a.to_string());

        let (_, for_a) = send(
            app.router(),
            Method::GET,
            &format!("/api/documents/{}/translations", doc_a),
            None,
        )
        .await;
        assert_eq!(for_a, json!([created]));

        let (_, for_b) = send(
            app.router(),
            Method::GET,
            &format!("/api/documents/{}/translations", doc_b),
            None,
        )
        .await;
        assert_eq!(for_b, json!([]));

        let (status, none) =
            send(app.router(), Method::GET, "/api/documents/xyz/translations", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(none, json!([]));
    }

    #[tokio::test]
    async fn test_create_requires_language() {
        let app = TestApp::new();

        let (status, _) = send(
            app.router(),
            Method::POST,
            &format!("/api/documents/{}/translations", Uuid::new_v4()),
            Some(json!({ "content": "Hello", "language": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.store.counts().await, (0, 0));
    }

    #[tokio::test]
    async fn test_update_status_refreshes_timestamp() {
        let app = TestApp::new();
        let (_, created) = send(
            app.router(),
            Method::POST,
            &format!("/api/documents/{}/translations", Uuid::new_v4()),
            Some(json!({ "content": "Salom", "language": "uzbek" })),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, updated) = send(
            app.router(),
            Method::PATCH,
            &format!("/api/translations/{}", id),
            Some(json!({ "status": "completed" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "completed");
        assert_eq!(updated["content"], "Salom");
        assert_eq!(updated["created_at"], created["created_at"]);
        assert!(timestamp(&updated["updated_at"]) > timestamp(&created["updated_at"]));
    }

    #[tokio::test]
    async fn test_update_unknown_translation_is_404() {
        let app = TestApp::seeded();
        let before = app
            .store
            .get_translations("0b7c9f0e-5a1d-4c2e-9f3a-1d2e3f4a5b01".parse().unwrap())
            .await
            .unwrap();

        for id in [Uuid::new_v4().to_string(), "nope".to_string()] {
            let (status, body) = send(
                app.router(),
                Method::PATCH,
                &format!("/api/translations/{}", id),
                Some(json!({ "status": "completed" })),
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, json!({ "error": "Translation not found" }));
        }

        let after = app
            .store
            .get_translations("0b7c9f0e-5a1d-4c2e-9f3a-1d2e3f4a5b01".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_can_clear_content() {
        let app = TestApp::new();
        let (_, created) = send(
            app.router(),
            Method::POST,
            &format!("/api/documents/{}/translations", Uuid::new_v4()),
            Some(json!({ "content": "Draft", "language": "pashto" })),
        )
        .await;
        let uri = format!("/api/translations/{}", created["id"].as_str().unwrap());

        let (status, updated) =
            send(app.router(), Method::PATCH, &uri, Some(json!({ "status": "failed" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["content"], "Draft");

        let (status, cleared) =
            send(app.router(), Method::PATCH, &uri, Some(json!({ "content": null }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(cleared["content"].is_null());
        assert_eq!(cleared["status"], "failed");
    }
}
