//! Gemini-backed content provider.

use async_trait::async_trait;
use seoforge_core::config::ProviderConfig;
use seoforge_core::{Article, SiteDocument};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    ContentProvider,
    error::{ProviderError, Result},
    prompt, schema, validate,
};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Content provider speaking the Gemini `generateContent` API in JSON mode.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    model: String,
    api_base: String,
    api_key: String,
}

impl GeminiProvider {
    /// Create a provider with explicit settings.
    #[must_use]
    pub fn new(
        model: impl Into<String>,
        api_base: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create a provider from configuration, falling back to the
    /// [`API_KEY_ENV`] environment variable for the key.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;
        Ok(Self::new(&config.model, &config.api_base, api_key))
    }

    /// One generation round trip: prompt plus response schema in, parsed
    /// JSON content out.
    async fn generate<T: DeserializeOwned>(
        &self,
        prompt: String,
        response_schema: Value,
    ) -> Result<T> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        debug!(model = %self.model, "sending generation request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = extract_text(body)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn create_site(&self, site_name: &str, site_keywords: &str) -> Result<SiteDocument> {
        info!(site_name, "requesting site generation");
        let raw = self
            .generate(prompt::site(site_name, site_keywords), schema::site())
            .await?;
        validate::site_document(raw)
    }

    async fn create_articles(
        &self,
        article_keywords: &str,
        exclude_titles: &[String],
    ) -> Result<Vec<Article>> {
        info!(
            excluded = exclude_titles.len(),
            "requesting new blog articles"
        );
        let raw = self
            .generate(
                prompt::articles(article_keywords, exclude_titles),
                schema::articles(),
            )
            .await?;
        validate::articles(raw)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Pull the generated text out of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or(ProviderError::EmptyResponse)?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(text.to_string())
}
