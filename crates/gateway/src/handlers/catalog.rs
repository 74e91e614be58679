//! Language and document-type catalogues for upload forms and filters

use axum::Json;
use serde::Serialize;
use tarjuman_common::language::{DocumentKind, Language};

#[derive(Debug, Serialize)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocumentTypeEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub mime_types: &'static [&'static str],
}

pub async fn languages() -> Json<Vec<LanguageEntry>> {
    Json(
        Language::ALL
            .iter()
            .map(|lang| LanguageEntry {
                code: lang.code(),
                name: lang.display_name(),
            })
            .collect(),
    )
}

pub async fn document_types() -> Json<Vec<DocumentTypeEntry>> {
    Json(
        DocumentKind::ALL
            .iter()
            .map(|kind| DocumentTypeEntry {
                id: kind.id(),
                name: kind.display_name(),
                mime_types: kind.mime_types(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_catalogues() {
        let app = TestApp::new();

        let (status, languages) = send(app.router(), Method::GET, "/api/languages", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(languages.as_array().unwrap().len(), 5);
        assert_eq!(languages[0], json!({ "code": "dari", "name": "Dari" }));

        let (_, types) = send(app.router(), Method::GET, "/api/document-types", None).await;
        assert_eq!(types[3]["id"], "video");
        assert_eq!(types[0]["mime_types"][1], "application/pdf");
    }
}
