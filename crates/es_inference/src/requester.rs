use std::sync::Arc;
use es_core::{parse, Error, GenerationOptions, Result, SummaryRecord, TextGenerator};
use crate::Config;

/// Exact line the model is told to answer with when it finds nothing.
pub const NOT_FOUND_REPLY: &str = "Error: Could not find a relevant financial document.";

pub const MISSING_KEY_MESSAGE: &str = "Gemini API Key not configured.";

/// Fill the fixed prompt template for one company and quarter.
pub fn build_prompt(company: &str, quarter: &str) -> String {
    format!(
        "You are a financial analyst. Find the most recent official earnings report or press release for {company}'s {quarter}.
Based *only* on the information you find, provide a concise summary.

Structure your response using the following headings on separate lines, followed by the data:
- revenue_summary:
- net_income_summary:
- ceo_quote:
- strategic_focus: (as a comma-separated list)
- source_url:

If you cannot find a relevant document, respond with only one line: \"{NOT_FOUND_REPLY}\""
    )
}

/// Asks the model for an earnings summary and hands back its raw reply.
#[derive(Debug, Clone)]
pub struct SummaryRequester {
    config: Config,
    model: Arc<dyn TextGenerator>,
}

impl SummaryRequester {
    pub fn new(config: Config, model: Arc<dyn TextGenerator>) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// False when the backend needs an API key and none is set.
    pub fn is_configured(&self) -> bool {
        !self.model.requires_credential() || self.config.api_key().is_some()
    }

    /// Return the model's raw reply for `company` and `quarter`.
    ///
    /// Fails with [`Error::Configuration`] before calling the model when the
    /// backend needs an API key and none is set. Any failure from the model
    /// becomes a single [`Error::Provider`] carrying its message.
    pub async fn request_summary(&self, company: &str, quarter: &str) -> Result<String> {
        if !self.is_configured() {
            return Err(Error::Configuration(MISSING_KEY_MESSAGE.to_string()));
        }

        tracing::info!("Requesting summary for {} {} from {}", company, quarter, self.model.name());
        let prompt = build_prompt(company, quarter);

        match self.model.generate(&prompt, GenerationOptions::with_web_search()).await {
            Ok(raw) => {
                tracing::debug!("Raw AI response:\n{}", raw);
                Ok(raw)
            }
            Err(e) => {
                tracing::error!("AI request failed for {} {}: {}", company, quarter, e);
                Err(Error::Provider(e.message()))
            }
        }
    }

    /// Request and parse in one step. Failures are folded into a record whose
    /// only field is `error`.
    pub async fn summarize(&self, company: &str, quarter: &str) -> SummaryRecord {
        match self.request_summary(company, quarter).await {
            Ok(raw) => parse(&raw),
            Err(Error::Configuration(msg)) => SummaryRecord::failed(msg),
            Err(e) => SummaryRecord::failed(format!("Failed to generate summary: {}", e.message())),
        }
    }
}
