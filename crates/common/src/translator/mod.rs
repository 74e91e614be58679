//! Translation provider abstraction
//!
//! Provides a narrow interface over the external completion API:
//! - OpenAI-compatible chat completions (one request per call, no retry)
//! - A recording mock for tests and local development

use crate::config::TranslationConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

/// Failure talking to the translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion returned no content")]
    EmptyResponse,

    #[error("Provider misconfigured: {0}")]
    Configuration(String),
}

/// Trait for text translation
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_language` to `target_language`
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> std::result::Result<String, ProviderError>;

    /// Get the model name
    fn model_name(&self) -> &str;
}

/// One chat message of the completion prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// System instruction for a translation between two languages
pub fn system_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        "You are a professional translator. Translate the following text from {} to {}. \
         Maintain the original meaning, context, and formatting. If the text contains any \
         cultural references, provide appropriate equivalents in the target language.",
        source_language, target_language
    )
}

/// The two-message prompt: system instruction, then the raw text
pub fn build_messages(text: &str, source_language: &str, target_language: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: system_prompt(source_language, target_language),
        },
        ChatMessage {
            role: "user".to_string(),
            content: text.to_string(),
        },
    ]
}

/// OpenAI chat-completion client
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiTranslator {
    /// Create a new client. Without `timeout` the reqwest default applies.
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> std::result::Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> std::result::Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: build_messages(text, source_language, target_language),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let result: ChatCompletionResponse = response.json().await?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// A call seen by [`MockTranslator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCall {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Echo,
    Fixed(String),
    Fail,
}

/// Mock translator for testing and offline development
pub struct MockTranslator {
    reply: MockReply,
    calls: Mutex<Vec<TranslationCall>>,
}

impl MockTranslator {
    /// Replies with `[target] text`
    pub fn echo() -> Self {
        Self::with_reply(MockReply::Echo)
    }

    /// Replies with `translation` regardless of input
    pub fn replying(translation: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Fixed(translation.into()))
    }

    /// Fails every call like an unreachable provider
    pub fn failing() -> Self {
        Self::with_reply(MockReply::Fail)
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<TranslationCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> std::result::Result<String, ProviderError> {
        self.calls.lock().await.push(TranslationCall {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            messages: build_messages(text, source_language, target_language),
        });

        match &self.reply {
            MockReply::Echo => Ok(format!("[{}] {}", target_language, text)),
            MockReply::Fixed(translation) => Ok(translation.clone()),
            MockReply::Fail => Err(ProviderError::Api {
                status: 503,
                body: "mock provider unavailable".to_string(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "mock-translator"
    }
}

/// Create a translator based on configuration
pub fn create_translator(config: &TranslationConfig) -> Result<Arc<dyn Translator>> {
    match config.provider.as_str() {
        "openai" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| AppError::Configuration {
                    message: "OpenAI API key required (translation.api_key or OPENAI_API_KEY)"
                        .to_string(),
                })?;

            let translator = OpenAiTranslator::new(
                api_key,
                config.model.clone(),
                config.api_base.clone(),
                config.timeout_secs.map(Duration::from_secs),
            )?;
            Ok(Arc::new(translator))
        }
        "mock" => {
            tracing::warn!("Using mock translation provider");
            Ok(Arc::new(MockTranslator::echo()))
        }
        other => Err(AppError::Configuration {
            message: format!("Unknown translation provider: {}", other),
        }),
    }
}
