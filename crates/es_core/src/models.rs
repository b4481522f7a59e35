use std::fmt;
use async_trait::async_trait;
use crate::Result;

/// Per-call switches passed through to the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Let the model ground its answer with a web search.
    pub web_search: bool,
}

impl GenerationOptions {
    pub fn with_web_search() -> Self {
        Self { web_search: true }
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Whether the backend needs an API key before it can be called.
    fn requires_credential(&self) -> bool {
        true
    }

    /// Run a single completion and return the reply text verbatim
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String>;
}
