//! Tarjuman Common Library
//!
//! Shared code for the Tarjuman translation service including:
//! - Document and translation records with an in-memory store
//! - Translation provider abstraction
//! - Error types and handling
//! - Configuration management
//! - Metrics

pub mod config;
pub mod db;
pub mod errors;
pub mod language;
pub mod metrics;
pub mod translator;

// Re-export commonly used types
pub use errors::{AppError, Result};
pub use config::AppConfig;
pub use db::{DocumentStore, InMemoryStore};
pub use translator::Translator;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default completion model used for translation
pub const DEFAULT_TRANSLATION_MODEL: &str = "gpt-4";
