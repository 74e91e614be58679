//! Supported languages and document categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages offered for upload and translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Dari,
    Pashto,
    Uzbek,
    Tajik,
    English,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Dari,
        Language::Pashto,
        Language::Uzbek,
        Language::Tajik,
        Language::English,
    ];

    /// Code stored on documents and translations
    pub fn code(&self) -> &'static str {
        match self {
            Language::Dari => "dari",
            Language::Pashto => "pashto",
            Language::Uzbek => "uzbek",
            Language::Tajik => "tajik",
            Language::English => "english",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Dari => "Dari",
            Language::Pashto => "Pashto",
            Language::Uzbek => "Uzbek",
            Language::Tajik => "Tajik",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

/// Document categories used for list filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Image,
    Audio,
    Video,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Text,
        DocumentKind::Image,
        DocumentKind::Audio,
        DocumentKind::Video,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DocumentKind::Text => "text",
            DocumentKind::Image => "image",
            DocumentKind::Audio => "audio",
            DocumentKind::Video => "video",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentKind::Text => "Text Documents",
            DocumentKind::Image => "Images",
            DocumentKind::Audio => "Audio",
            DocumentKind::Video => "Video",
        }
    }

    /// MIME types grouped under this category
    pub fn mime_types(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::Text => &["text/plain", "application/pdf", "application/msword"],
            DocumentKind::Image => &["image/jpeg", "image/png", "image/gif"],
            DocumentKind::Audio => &["audio/mpeg", "audio/wav"],
            DocumentKind::Video => &["video/mp4", "video/mpeg"],
        }
    }

    /// Loose match on the primary MIME category only.
    ///
    /// `text/html` matches [`DocumentKind::Text`] because `text/plain` is listed,
    /// and `application/zip` matches it too through `application/pdf`.
    pub fn matches(&self, file_type: &str) -> bool {
        self.mime_types().iter().any(|mime| {
            let category = mime.split('/').next().unwrap_or(mime);
            file_type.starts_with(category)
        })
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| format!("Unknown document type: {}", s))
    }
}
