use std::sync::Arc;
use es_core::{Error, Result};
use crate::Config;

pub use es_core::{GenerationOptions, TextGenerator};

pub mod dummy;
pub mod gemini;

/// Build the generator named by `config.backend`.
pub fn create_model(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    match config.backend.as_str() {
        "gemini" => Ok(Arc::new(gemini::GeminiModel::new(config)?)),
        "dummy" => Ok(Arc::new(dummy::DummyModel::new())),
        other => Err(Error::Configuration(format!(
            "Unknown model backend '{}'. Available backends: gemini, dummy",
            other
        ))),
    }
}
