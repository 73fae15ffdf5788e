use anyhow::Result;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TTS_BASE_URL: &str = "https://texttospeech.googleapis.com";

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub gemini_api_key: Option<SecretString>,
    #[serde(default)]
    pub tts_api_key: Option<SecretString>,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_tts_base_url")]
    pub tts_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_gemini_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_tts_base_url() -> String {
    DEFAULT_TTS_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_static_dir() -> String {
    "public".to_string()
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// `GEMINI_API_KEY` maps to `gemini_api_key`, `PORT` to `port`, and so on.
    /// Values stay strings; serde converts the numeric fields.
    pub fn from_env() -> Result<Self> {
        Self::from_source(config::Environment::default())
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize::<Config>()?;
        Ok(config.without_blank_keys())
    }

    /// `GEMINI_API_KEY=` counts as unset.
    fn without_blank_keys(mut self) -> Self {
        use secrecy::ExposeSecret;
        if self
            .gemini_api_key
            .as_ref()
            .is_some_and(|k| k.expose_secret().trim().is_empty())
        {
            self.gemini_api_key = None;
        }
        if self
            .tts_api_key
            .as_ref()
            .is_some_and(|k| k.expose_secret().trim().is_empty())
        {
            self.tts_api_key = None;
        }
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            gemini_api_key: None,
            tts_api_key: None,
            gemini_base_url: default_gemini_base_url(),
            gemini_model: default_gemini_model(),
            tts_base_url: default_tts_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            static_dir: default_static_dir(),
        }
    }
}
