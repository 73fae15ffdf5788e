use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::error::RelayError;
use crate::prompts::{parse_suggestions, suggestion_prompt, translation_prompt};
use crate::state::AppState;
use crate::upstream::SpeechSynthesisRequest;

const MISSING_FIELDS: &str = "Missing required fields";
const MISSING_SPEECH_FIELDS: &str = "Missing text or language code";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: Option<String>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub text: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRequest {
    pub text: Option<String>,
    pub lang_code: Option<String>,
}

/// An unreadable body (no JSON content type, empty, malformed or mistyped)
/// carries none of the required fields, so it gets the endpoint's 400.
fn body_or_reject<T>(
    endpoint: &str,
    payload: Result<Json<T>, JsonRejection>,
    missing: &'static str,
) -> Result<T, RelayError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!("{}: unreadable request body: {}", endpoint, rejection.body_text());
        RelayError::InvalidRequest(missing)
    })
}

/// A field counts as present only when it is a non-empty string.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<Value>, RelayError> {
    let payload = body_or_reject("translate", payload, MISSING_FIELDS)?;
    let (Some(text), Some(source_lang), Some(target_lang)) = (
        present(&payload.text),
        present(&payload.source_lang),
        present(&payload.target_lang),
    ) else {
        warn!("translate: rejected request with missing fields");
        return Err(RelayError::InvalidRequest(MISSING_FIELDS));
    };

    let Some(api_key) = state.config.gemini_api_key.as_ref() else {
        error!("translate: GEMINI_API_KEY is not configured");
        return Err(RelayError::ServiceUnavailable(
            "Translation service not configured",
        ));
    };

    info!("translate: {} -> {}", source_lang, target_lang);
    let prompt = translation_prompt(text, source_lang, target_lang);
    let raw = state
        .upstream
        .generate_text(api_key.expose_secret(), &prompt)
        .await
        .map_err(|e| {
            error!("translate: upstream call failed: {}", e);
            RelayError::Upstream {
                error: "Translation failed",
                details: Some(e.details()),
            }
        })?;

    Ok(Json(json!({ "translation": raw.trim() })))
}

pub async fn suggest_reply(
    State(state): State<AppState>,
    payload: Result<Json<SuggestionRequest>, JsonRejection>,
) -> Result<Json<Value>, RelayError> {
    let payload = body_or_reject("suggest-reply", payload, MISSING_FIELDS)?;
    let (Some(text), Some(language)) = (present(&payload.text), present(&payload.language))
    else {
        warn!("suggest-reply: rejected request with missing fields");
        return Err(RelayError::InvalidRequest(MISSING_FIELDS));
    };

    let Some(api_key) = state.config.gemini_api_key.as_ref() else {
        error!("suggest-reply: GEMINI_API_KEY is not configured");
        return Err(RelayError::ServiceUnavailable(
            "Suggestion service not configured",
        ));
    };

    info!("suggest-reply: language={}", language);
    let prompt = suggestion_prompt(text, language);
    // Upstream detail is logged but never forwarded from this endpoint.
    let raw = state
        .upstream
        .generate_text(api_key.expose_secret(), &prompt)
        .await
        .map_err(|e| {
            error!("suggest-reply: upstream call failed: {}", e);
            RelayError::Upstream {
                error: "Failed to generate suggestions",
                details: None,
            }
        })?;

    Ok(Json(json!({ "suggestions": parse_suggestions(&raw) })))
}

pub async fn synthesize_speech(
    State(state): State<AppState>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Json<Value>, RelayError> {
    let payload = body_or_reject("synthesize-speech", payload, MISSING_SPEECH_FIELDS)?;
    let (Some(text), Some(lang_code)) = (present(&payload.text), present(&payload.lang_code))
    else {
        warn!("synthesize-speech: rejected request with missing fields");
        return Err(RelayError::InvalidRequest(MISSING_SPEECH_FIELDS));
    };

    let Some(api_key) = state.config.tts_api_key.as_ref() else {
        error!("synthesize-speech: TTS_API_KEY is not configured");
        return Err(RelayError::ServiceUnavailable(
            "Speech service not configured",
        ));
    };

    info!("synthesize-speech: lang_code={}", lang_code);
    let request = SpeechSynthesisRequest {
        text: text.to_string(),
        language_code: lang_code.to_string(),
    };
    let body = state
        .upstream
        .synthesize_speech(api_key.expose_secret(), &request)
        .await
        .map_err(|e| {
            error!("synthesize-speech: upstream call failed: {}", e);
            RelayError::Upstream {
                error: "Speech synthesis failed",
                details: Some(e.details()),
            }
        })?;

    Ok(Json(body))
}

/// Reports which upstream credentials are present, never their values.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "translation": state.config.gemini_api_key.is_some(),
        "speech": state.config.tts_api_key.is_some(),
    }))
}
