//! Document handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::handlers::translate::run_translation;
use crate::AppState;
use tarjuman_common::{
    db::{
        Document, DocumentFilter, DocumentWithTranslations, Metadata, NewDocument,
        NewTranslation, Translation,
    },
    errors::{AppError, Result},
    language::Language,
    metrics,
};

/// Request to register an uploaded document
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 1000, message = "title is required"))]
    pub title: String,

    #[serde(default)]
    pub file_path: String,

    #[serde(default)]
    pub file_type: String,

    #[validate(custom(function = "validate_language"))]
    pub source_language: String,

    #[validate(custom(function = "validate_language"))]
    pub target_language: String,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default)]
    pub metadata: Metadata,
}

fn default_status() -> String {
    "pending".to_string()
}

fn validate_language(code: &str) -> std::result::Result<(), ValidationError> {
    Language::from_str(code).map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("language");
        err.message = Some("Please select source and target languages".into());
        err
    })
}

impl From<CreateDocumentRequest> for NewDocument {
    fn from(request: CreateDocumentRequest) -> Self {
        NewDocument {
            title: request.title,
            file_path: request.file_path,
            file_type: request.file_type,
            source_language: request.source_language,
            target_language: request.target_language,
            status: request.status,
            metadata: request.metadata,
        }
    }
}

/// Path ids are opaque strings; one that is not a UUID simply matches nothing
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// List documents, optionally filtered by `type` and `language`.
///
/// Entries are bare document records without their `translations`; those
/// are resolved by `GET /api/documents/{id}` or the per-document listing.
pub async fn list_documents(
    State(state): State<AppState>,
    filter: std::result::Result<Query<DocumentFilter>, QueryRejection>,
) -> Result<Json<Vec<Document>>> {
    let Query(filter) = filter.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected document filter");
        AppError::Validation {
            message: "Invalid query parameters".to_string(),
            field: None,
        }
    })?;

    let documents = state.store.find_documents(&filter).await?;
    Ok(Json(documents))
}

/// Register a new document
pub async fn create_document(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Document>)> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation {
        message: rejection.body_text(),
        field: None,
    })?;

    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let document = state.store.create_document(request.into()).await?;
    metrics::record_document_created();

    tracing::info!(
        document_id = %document.id,
        title = %document.title,
        file_type = %document.file_type,
        source_language = %document.source_language,
        target_language = %document.target_language,
        "Document created"
    );

    Ok((StatusCode::CREATED, Json(document)))
}

/// Get a document with its translations
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentWithTranslations>> {
    let Some(document_id) = parse_id(&id) else {
        return Err(AppError::document_not_found(id));
    };

    state
        .store
        .get_document_with_translations(document_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::document_not_found(document_id))
}

/// Translate a stored document's content into its target language and keep the result
pub async fn translate_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Translation>)> {
    let document = match parse_id(&id) {
        Some(document_id) => state.store.get_document(document_id).await?,
        None => None,
    }
    .ok_or_else(|| AppError::document_not_found(&id))?;

    let text = document
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or(AppError::MissingFields)?;

    if document.source_language.is_empty() || document.target_language.is_empty() {
        return Err(AppError::MissingFields);
    }

    let content = run_translation(
        state.translator.as_ref(),
        text,
        &document.source_language,
        &document.target_language,
    )
    .await?;

    let mut metadata = Metadata::new();
    metadata.insert("model".to_string(), state.translator.model_name().into());

    let translation = state
        .store
        .create_translation(NewTranslation {
            document_id: document.id,
            content: Some(content),
            status: "completed".to_string(),
            metadata,
            language: document.target_language.clone(),
        })
        .await?;
    metrics::record_translation_record_created();

    tracing::info!(
        document_id = %document.id,
        translation_id = %translation.id,
        language = %translation.language,
        "Document translated"
    );

    Ok((StatusCode::CREATED, Json(translation)))
}
