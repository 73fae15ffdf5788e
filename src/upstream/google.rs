use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::interface::{SpeechSynthesisRequest, UpstreamClient, UpstreamError};
use crate::config::Config;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
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
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Client for the Generative Language and Text-to-Speech REST APIs
#[derive(Debug, Clone)]
pub struct GoogleUpstream {
    client: Client,
    gemini_base_url: String,
    gemini_model: String,
    tts_base_url: String,
}

impl GoogleUpstream {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            gemini_base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            gemini_model: config.gemini_model.clone(),
            tts_base_url: config.tts_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.gemini_base_url, self.gemini_model
        )
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/text:synthesize", self.tts_base_url)
    }
}

/// Turn a non-success response into `UpstreamError::Status`.
///
/// Prefers `error.message` from a JSON body, then the status reason phrase.
async fn status_error(response: Response) -> UpstreamError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.as_u16().to_string());

    warn!(status = %status, "upstream returned error: {}", message);
    UpstreamError::Status {
        status: status.as_u16(),
        message,
    }
}

const API_KEY_HEADER: &str = "x-goog-api-key";

/// The request URL is stripped so nothing about the call target reaches clients.
fn transport(e: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport(e.without_url().to_string())
}

#[async_trait]
impl UpstreamClient for GoogleUpstream {
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, UpstreamError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.gemini_model, "sending generateContent request");
        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let result: GenerateContentResponse = response.json().await.map_err(transport)?;
        result.into_first_text().ok_or(UpstreamError::MissingCandidate)
    }

    async fn synthesize_speech(
        &self,
        api_key: &str,
        request: &SpeechSynthesisRequest,
    ) -> Result<Value, UpstreamError> {
        let body = json!({
            "input": { "text": request.text },
            "voice": {
                "languageCode": request.language_code,
                "ssmlGender": "NEUTRAL",
            },
            "audioConfig": { "audioEncoding": "MP3" },
        });

        debug!(language = %request.language_code, "sending text:synthesize request");
        let response = self
            .client
            .post(self.synthesize_url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response.json().await.map_err(transport)
    }
}
