use crate::api::{GeminiClient, TextProvider};
use crate::config::AppConfig;
use crate::prompt::build_prompt;
use crate::types::ProductDetails;
use anyhow::Result;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

pub const MISSING_CREDENTIAL_MESSAGE: &str = "GEMINI_API_KEY is not set.";
pub const VALIDATION_MESSAGE: &str = "产品名称、目标用户和核心卖点是必填项。";
pub const PROVIDER_FAILURE_MESSAGE: &str = "AI 生成失败，请检查您的网络连接或 API 密钥。";

/// Why a generation attempt failed. Each variant carries the message shown
/// to the user; provider-side detail is logged, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Provider(String),
}

impl GenerateError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Configuration(message) | Self::Validation(message) | Self::Provider(message) => {
                message
            }
        }
    }
}

/// Wraps one call to the text provider: checks preconditions, builds the
/// prompt, and normalises provider failures.
pub struct ScriptGenerator {
    api_key: Option<String>,
    provider: Arc<dyn TextProvider>,
}

impl ScriptGenerator {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let provider = GeminiClient::new(
            config.base_url(),
            config.model_id(),
            config.api_key().unwrap_or_default(),
        )?;
        Ok(Self::with_provider(
            config.api_key().map(str::to_string),
            Arc::new(provider),
        ))
    }

    /// The credential arrives as an explicit parameter rather than being read
    /// from ambient process state; an empty key counts as absent.
    pub fn with_provider(api_key: Option<String>, provider: Arc<dyn TextProvider>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self { api_key, provider }
    }

    /// Runs one generation attempt. Preconditions are checked in order before
    /// any network call: credential first, then required fields. On success
    /// the provider's text is returned with surrounding whitespace removed.
    pub async fn generate(&self, details: &ProductDetails) -> Result<String, GenerateError> {
        if self.api_key.is_none() {
            return Err(GenerateError::Configuration(
                MISSING_CREDENTIAL_MESSAGE.to_string(),
            ));
        }
        if !details.has_required_fields() {
            return Err(GenerateError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        let prompt = build_prompt(details);
        match self.provider.complete(&prompt).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(err) => {
                error!("provider call failed: {err:#}");
                Err(GenerateError::Provider(PROVIDER_FAILURE_MESSAGE.to_string()))
            }
        }
    }
}
