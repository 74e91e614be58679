//! Document list filtering by category and language

use serde::{Deserialize, Deserializer};

use crate::db::models::Document;
use crate::language::DocumentKind;

/// Filter applied to the document listing. Empty filter keeps everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentFilter {
    /// Category of `file_type`. Empty or unknown values apply no category filter.
    #[serde(default, rename = "type", deserialize_with = "lenient_kind")]
    pub kind: Option<DocumentKind>,

    /// Matches either the source or the target language
    #[serde(default)]
    pub language: Option<String>,
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<DocumentKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

impl DocumentFilter {
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(kind) = self.kind {
            if !kind.matches(&document.file_type) {
                return false;
            }
        }

        match self.language.as_deref() {
            Some(lang) if !lang.is_empty() => {
                document.source_language == lang || document.target_language == lang
            }
            _ => true,
        }
    }

    /// Keep matching documents, preserving order
    pub fn apply(&self, documents: Vec<Document>) -> Vec<Document> {
        documents.into_iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::NewDocument;
    use chrono::Utc;

    fn doc(title: &str, file_type: &str, source: &str, target: &str) -> Document {
        NewDocument {
            title: title.into(),
            file_path: format!("/uploads/{}", title),
            file_type: file_type.into(),
            source_language: source.into(),
            target_language: target.into(),
            status: "pending".into(),
            ..Default::default()
        }
        .into_document(Utc::now())
    }

    fn titles(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.title.as_str()).collect()
    }

    #[test]
    fn test_filter_by_kind_and_language() {
        let docs = vec![
            doc("a", "text/plain", "dari", "english"),
            doc("b", "image/png", "pashto", "english"),
            doc("c", "text/html", "uzbek", "dari"),
            doc("d", "video/mp4", "tajik", "english"),
        ];

        let text = DocumentFilter { kind: Some(DocumentKind::Text), language: None };
        assert_eq!(titles(&text.apply(docs.clone())), vec!["a", "c"]);

        let dari = DocumentFilter { kind: None, language: Some("dari".into()) };
        assert_eq!(titles(&dari.apply(docs.clone())), vec!["a", "c"]);

        let both = DocumentFilter {
            kind: Some(DocumentKind::Text),
            language: Some("uzbek".into()),
        };
        assert_eq!(titles(&both.apply(docs.clone())), vec!["c"]);

        let empty_lang = DocumentFilter { kind: None, language: Some(String::new()) };
        assert_eq!(empty_lang.apply(docs).len(), 4);
    }

    #[test]
    fn test_empty_or_unknown_type_is_ignored() {
        let filter: DocumentFilter =
            serde_json::from_value(serde_json::json!({ "type": "", "language": "dari" })).unwrap();
        assert_eq!(filter.kind, None);
        assert_eq!(filter.language.as_deref(), Some("dari"));

        let filter: DocumentFilter =
            serde_json::from_value(serde_json::json!({ "type": "spreadsheet" })).unwrap();
        assert_eq!(filter.kind, None);

        let filter: DocumentFilter =
            serde_json::from_value(serde_json::json!({ "type": "audio" })).unwrap();
        assert_eq!(filter.kind, Some(DocumentKind::Audio));

        let filter: DocumentFilter = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(filter.kind, None);
    }
}
