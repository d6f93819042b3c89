//! Client for the "ask a local guide" feature.
//!
//! The client is built once from [`GuideConfig`] and passed to whoever needs
//! it. It never fails outward: a missing key, a transport error or an empty
//! answer each map to a fixed reply.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app::{ForestayError, Result};
use crate::config::GuideConfig;

pub const NO_KEY_REPLY: &str =
    "I can't reach the forest server right now. Please check the guide API key.";
pub const QUIET_REPLY: &str = "The forest is very quiet today. Please try again later.";
pub const ERROR_REPLY: &str = "Sorry, I lost the trail. Please try again.";

pub struct GuideClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    temperature: f32,
    system_instruction: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GuideClient {
    pub fn new(config: &GuideConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            api_key: config.resolved_api_key(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            system_instruction: config.system_instruction.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the guide. Always returns something displayable.
    pub async fn ask(&self, query: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return NO_KEY_REPLY.to_string();
        };

        match self.generate(api_key, query).await {
            Ok(text) if text.trim().is_empty() => QUIET_REPLY.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Guide request failed: {}", e);
                ERROR_REPLY.to_string()
            }
        }
    }

    async fn generate(&self, api_key: &str, query: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);
        let body = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: &self.system_instruction,
                }],
            },
            contents: vec![Content {
                parts: vec![Part { text: query }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ForestayError::Guide(format!("{}: {}", status, detail)));
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}
