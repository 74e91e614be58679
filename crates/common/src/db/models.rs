//! Document and translation records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Open key/value metadata attached to records (file size, modification time, ...)
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A user-supplied piece of content slated for translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub file_path: String,
    pub file_type: String,
    pub source_language: String,
    pub target_language: String,
    pub status: String,

    /// Null until populated
    pub content: Option<String>,

    #[serde(default)]
    pub metadata: Metadata,

    pub created_at: DateTime<Utc>,

    /// Stamped at creation only
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub file_path: String,
    pub file_type: String,
    pub source_language: String,
    pub target_language: String,
    pub status: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl NewDocument {
    /// Build the stored record: fresh id, null content, both timestamps at `now`
    pub fn into_document(self, now: DateTime<Utc>) -> Document {
        Document {
            id: Uuid::new_v4(),
            title: self.title,
            file_path: self.file_path,
            file_type: self.file_type,
            source_language: self.source_language,
            target_language: self.target_language,
            status: self.status,
            content: None,
            metadata: self.metadata,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A language-specific rendering of a document's content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub id: Uuid,

    /// Not checked against the document collection
    pub document_id: Uuid,

    pub content: Option<String>,
    pub status: String,

    #[serde(default)]
    pub metadata: Metadata,

    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new translation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTranslation {
    pub document_id: Uuid,
    pub content: Option<String>,
    pub status: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub language: String,
}

impl NewTranslation {
    pub fn into_translation(self, now: DateTime<Utc>) -> Translation {
        Translation {
            id: Uuid::new_v4(),
            document_id: self.document_id,
            content: self.content,
            status: self.status,
            metadata: self.metadata,
            language: self.language,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update merged over an existing translation.
///
/// `content` distinguishes an absent key (`None`, left alone) from an explicit
/// `null` (`Some(None)`, cleared).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationUpdate {
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TranslationUpdate {
    /// Status-only update
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Overwrite the fields present in this update, then refresh `updated_at`.
    ///
    /// `updated_at` always moves strictly forward, even when the clock has not
    /// advanced since the previous stamp.
    pub fn apply(self, translation: &mut Translation, now: DateTime<Utc>) {
        if let Some(content) = self.content {
            translation.content = content;
        }
        if let Some(status) = self.status {
            translation.status = status;
        }
        if let Some(language) = self.language {
            translation.language = language;
        }
        if let Some(metadata) = self.metadata {
            translation.metadata = metadata;
        }

        let floor = translation.updated_at + chrono::Duration::nanoseconds(1);
        translation.updated_at = now.max(floor);
    }
}

/// A document together with the translations that reference it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentWithTranslations {
    #[serde(flatten)]
    pub document: Document,
    pub translations: Vec<Translation>,
}
