use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash";

/// Text completion seam: given a prompt, returns the completion text or fails.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Gemini `generateContent` transport. One round trip per call, no retries,
/// transport-default timeouts only.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: Url,
    model_id: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: Option<&str>, model_id: &str, api_key: &str) -> Result<Self> {
        let url = base_url
            .map(Url::parse)
            .unwrap_or_else(|| Url::parse(DEFAULT_BASE_URL))
            .context("invalid provider base URL")?;
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: url,
            model_id: model_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn generate_content_url(&self) -> Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model_id))
            .context("failed to build generateContent URL")?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[async_trait]
impl TextProvider for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.generate_content_url()?;
        let body = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
        };
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .context("generateContent request failed")?;
        if !response.status().is_success() {
            anyhow::bail!("provider responded with status {}", response.status());
        }
        let payload: GenerateContentResponse = response
            .json()
            .await
            .context("failed to decode generateContent response")?;
        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| anyhow!("provider returned no candidates"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_content_url_targets_the_fixed_model() {
        let client = GeminiClient::new(None, DEFAULT_MODEL_ID, "test-key").unwrap();
        let url = client.generate_content_url().unwrap();
        assert!(url
            .path()
            .ends_with("v1beta/models/gemini-2.5-flash:generateContent"));
        assert_eq!(url.query(), Some("key=test-key"));
    }

    #[test]
    fn response_decoding_reads_first_candidate() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"口播文案"}]}}]}"#,
        )
        .unwrap();
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text);
        assert_eq!(text.as_deref(), Some("口播文案"));
    }

    #[test]
    fn response_decoding_tolerates_missing_candidates() {
        let payload: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.candidates.is_empty());
    }
}
