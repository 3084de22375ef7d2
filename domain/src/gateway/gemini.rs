//! Google Gemini REST client.
//!
//! Only the two calls the tracker needs are wrapped: `generateContent` for
//! extraction and `countTokens` for the health probe.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::llm::CompletionProvider;
use async_trait::async_trait;
use log::*;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct ContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> ContentRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it produced any.
    fn text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountTokensResponse {
    #[serde(default)]
    total_tokens: u32,
}

/// Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Builds a client from `config`. Fails when no `GOOGLE_API_KEY` is configured.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.google_api_key().ok_or_else(|| {
            warn!("GOOGLE_API_KEY is not set");
            Error::config("GOOGLE_API_KEY environment variable is required")
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        let mut header_value = reqwest::header::HeaderValue::from_str(&api_key).map_err(|e| {
            warn!("Failed to create API key header: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Invalid API key format".to_string(),
                )),
            }
        })?;
        header_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, header_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.gemini_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.gemini_base_url().trim_end_matches('/').to_string(),
            model: config.gemini_model().to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, method)
    }

    async fn post(&self, method: &str, text: &str) -> Result<reqwest::Response, Error> {
        let response = self
            .client
            .post(self.url(method))
            .json(&ContentRequest::new(text))
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call Gemini {method}: {:?}", e);
                Error::from(e)
            })?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Gemini {method} was rate limited");
                Err(Error::external(ExternalErrorKind::RateLimited))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                error!("Gemini API {method} returned {status}: {error_text}");
                Err(Error::external(ExternalErrorKind::Other(format!(
                    "Gemini API returned {status}"
                ))))
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, Error> {
        debug!("Sending {} character prompt to {}", prompt.len(), self.model);

        let response: GenerateContentResponse = self
            .post("generateContent", prompt)
            .await?
            .json()
            .await?;

        response.text().ok_or_else(|| {
            warn!("Gemini response carried no candidate text");
            Error::external(ExternalErrorKind::InvalidResponse(
                "Gemini response carried no candidate text".to_string(),
            ))
        })
    }

    async fn count_tokens(&self, text: &str) -> Result<u32, Error> {
        let response: CountTokensResponse = self.post("countTokens", text).await?.json().await?;
        Ok(response.total_tokens)
    }
}
