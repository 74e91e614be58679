//! In-memory document store
//!
//! Two append-only vectors behind one `RwLock`. Every operation holds the lock
//! for its full read-modify-write, so concurrent requests never observe a
//! half-applied update. State lives for the process lifetime only.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::models::{Document, NewDocument, NewTranslation, Translation, TranslationUpdate};
use super::seed::SampleData;
use super::DocumentStore;
use crate::errors::Result;

#[derive(Debug, Default)]
struct Collections {
    documents: Vec<Document>,
    translations: Vec<Translation>,
}

/// Process-lifetime store seeded from sample data
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `data`
    pub fn with_data(data: SampleData) -> Self {
        Self {
            inner: RwLock::new(Collections {
                documents: data.documents,
                translations: data.translations,
            }),
        }
    }

    /// Create a store holding the embedded sample dataset
    pub fn seeded() -> Result<Self> {
        Ok(Self::with_data(SampleData::embedded()?))
    }

    /// (documents, translations) currently held
    pub async fn counts(&self) -> (usize, usize) {
        let inner = self.inner.read().await;
        (inner.documents.len(), inner.translations.len())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get_documents(&self) -> Result<Vec<Document>> {
        Ok(self.inner.read().await.documents.clone())
    }

    async fn get_document(&self, id: Uuid) -> Result<Option<Document>> {
        let inner = self.inner.read().await;
        Ok(inner.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document> {
        let document = document.into_document(Utc::now());

        self.inner.write().await.documents.push(document.clone());

        debug!(document_id = %document.id, title = %document.title, "Document stored");
        Ok(document)
    }

    async fn get_translations(&self, document_id: Uuid) -> Result<Vec<Translation>> {
        let inner = self.inner.read().await;
        Ok(inner
            .translations
            .iter()
            .filter(|t| t.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn create_translation(&self, translation: NewTranslation) -> Result<Translation> {
        let translation = translation.into_translation(Utc::now());

        self.inner.write().await.translations.push(translation.clone());

        debug!(
            translation_id = %translation.id,
            document_id = %translation.document_id,
            language = %translation.language,
            "Translation stored"
        );
        Ok(translation)
    }

    async fn update_translation(
        &self,
        id: Uuid,
        update: TranslationUpdate,
    ) -> Result<Option<Translation>> {
        let mut inner = self.inner.write().await;

        let Some(existing) = inner.translations.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        update.apply(existing, Utc::now());

        debug!(translation_id = %id, status = %existing.status, "Translation updated");
        Ok(Some(existing.clone()))
    }
}
