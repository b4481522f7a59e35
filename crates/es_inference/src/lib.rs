use std::fmt;
use std::time::Duration;

pub mod models;
pub mod requester;

pub const DEFAULT_BACKEND: &str = "gemini";
pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Process-wide settings, read once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    /// Which [`TextGenerator`](es_core::TextGenerator) backend to build: `gemini` or `dummy`
    pub backend: String,
    pub model_name: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// The credential, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("backend", &self.backend)
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            backend: DEFAULT_BACKEND.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub use models::create_model;
pub use requester::SummaryRequester;
