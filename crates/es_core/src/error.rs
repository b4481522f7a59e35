use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// The message without the variant prefix, as shown to API callers.
    pub fn message(&self) -> String {
        match self {
            Error::Configuration(msg) | Error::Provider(msg) | Error::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
