use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single outbound call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The generation response carried no candidate text
    #[error("no candidate")]
    MissingCandidate,

    /// The call could not complete
    #[error("transport error: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Message suitable for the `details` field of a client response.
    pub fn details(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            Self::MissingCandidate => "no candidate".to_string(),
            Self::Transport(message) => message.clone(),
        }
    }
}

/// Speech synthesis input for a single utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSynthesisRequest {
    pub text: String,
    pub language_code: String,
}

/// Narrow view of the two upstream APIs the relay talks to.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Send a single text prompt to the language model.
    ///
    /// # Returns
    /// Text of the first candidate, exactly as produced
    async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String, UpstreamError>;

    /// Synthesize speech and return the upstream JSON body untouched.
    async fn synthesize_speech(
        &self,
        api_key: &str,
        request: &SpeechSynthesisRequest,
    ) -> Result<serde_json::Value, UpstreamError>;
}
