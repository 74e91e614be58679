//! Document storage for Tarjuman
//!
//! Provides:
//! - Document and translation records
//! - The `DocumentStore` repository interface
//! - A process-lifetime in-memory implementation seeded from sample data
//! - List filtering helpers

mod filter;
mod memory;
pub mod models;
mod seed;

pub use filter::DocumentFilter;
pub use memory::InMemoryStore;
pub use models::{
    Document, DocumentWithTranslations, Metadata, NewDocument, NewTranslation, Translation,
    TranslationUpdate,
};
pub use seed::SampleData;

use crate::errors::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for documents and their translations.
///
/// Absence is `Ok(None)`, never an error. Implementations backed by real
/// storage may fail with `Err`; the in-memory store never does.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in insertion order
    async fn get_documents(&self) -> Result<Vec<Document>>;

    async fn get_document(&self, id: Uuid) -> Result<Option<Document>>;

    /// Store a new document with a fresh id, null content and current timestamps
    async fn create_document(&self, document: NewDocument) -> Result<Document>;

    /// Translations referencing `document_id`, in insertion order
    async fn get_translations(&self, document_id: Uuid) -> Result<Vec<Translation>>;

    async fn create_translation(&self, translation: NewTranslation) -> Result<Translation>;

    /// Merge `update` over the translation and refresh `updated_at`.
    /// Returns `None` and changes nothing when `id` is unknown.
    async fn update_translation(
        &self,
        id: Uuid,
        update: TranslationUpdate,
    ) -> Result<Option<Translation>>;

    /// Documents passing `filter`, in insertion order
    async fn find_documents(&self, filter: &DocumentFilter) -> Result<Vec<Document>> {
        Ok(filter.apply(self.get_documents().await?))
    }

    /// A document with its translations resolved
    async fn get_document_with_translations(
        &self,
        id: Uuid,
    ) -> Result<Option<DocumentWithTranslations>> {
        let Some(document) = self.get_document(id).await? else {
            return Ok(None);
        };
        let translations = self.get_translations(document.id).await?;

        Ok(Some(DocumentWithTranslations {
            document,
            translations,
        }))
    }
}
