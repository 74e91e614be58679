//! Translation proxy handler

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::AppState;
use tarjuman_common::{
    errors::{AppError, Result},
    metrics::{self, TranslationOutcome},
    translator::Translator,
};

/// Fields pulled from a translate request body.
///
/// The body is read as plain JSON whatever its content type. Other keys
/// (`documentId` from the document viewer) are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslateRequest {
    /// `None` when any field is absent or falsy (null, false, 0, "")
    pub fn from_json(body: &Value) -> Option<Self> {
        Some(Self {
            text: truthy_field(body, "text")?,
            source_language: truthy_field(body, "sourceLanguage")?,
            target_language: truthy_field(body, "targetLanguage")?,
        })
    }
}

/// Strings pass through; other truthy scalars and containers use their JSON text
fn truthy_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub translation: String,
}

/// Validate and forward one translation request to the provider
pub async fn translate(State(state): State<AppState>, body: Bytes) -> Result<Json<TranslateResponse>> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        metrics::record_translation(TranslationOutcome::Failed, None);
        AppError::TranslationFailed {
            message: format!("Unreadable request body: {}", e),
        }
    })?;

    // A bare `null` body cannot be destructured
    if body.is_null() {
        metrics::record_translation(TranslationOutcome::Failed, None);
        return Err(AppError::TranslationFailed {
            message: "Request body is null".to_string(),
        });
    }

    let Some(request) = TranslateRequest::from_json(&body) else {
        metrics::record_translation(TranslationOutcome::Rejected, None);
        return Err(AppError::MissingFields);
    };

    let translation = run_translation(
        state.translator.as_ref(),
        &request.text,
        &request.source_language,
        &request.target_language,
    )
    .await?;

    Ok(Json(TranslateResponse {
        success: true,
        translation,
    }))
}

/// One provider call with metrics and logging around it
pub(crate) async fn run_translation(
    translator: &dyn Translator,
    text: &str,
    source_language: &str,
    target_language: &str,
) -> Result<String> {
    let start = Instant::now();
    let result = translator
        .translate(text, source_language, target_language)
        .await;
    let latency = start.elapsed();

    match result {
        Ok(translation) => {
            metrics::record_translation(TranslationOutcome::Success, Some(latency));
            tracing::info!(
                source_language,
                target_language,
                model = translator.model_name(),
                chars = text.chars().count(),
                latency_ms = latency.as_millis() as u64,
                "Translation completed"
            );
            Ok(translation)
        }
        Err(e) => {
            metrics::record_translation(TranslationOutcome::Failed, Some(latency));
            Err(e.into())
        }
    }
}
