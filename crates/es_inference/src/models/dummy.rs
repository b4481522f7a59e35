use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use es_core::{GenerationOptions, Result, TextGenerator};

const UNKNOWN_COMPANY: &str = "The company";

/// Well-formed summary in the labeled layout the prompt asks for, naming
/// `company`.
pub fn default_reply(company: &str) -> String {
    format!(
        "- revenue_summary: {company} reported revenue of $10.0B, up 12% year over year.
- net_income_summary: Net income of $2.1B, or $1.05 per diluted share.
- ceo_quote: \"This was a great quarter for {company}'s customers and our business.\"
- strategic_focus: AI, Cloud, Operating efficiency
- source_url: https://example.com/investor-relations/earnings"
    )
}

/// Pull the company out of "... press release for <company>'s <quarter>."
fn company_from_prompt(prompt: &str) -> Option<&str> {
    let (_, rest) = prompt.split_once("release for ")?;
    let (company, _) = rest.split_once("'s ")?;
    let company = company.trim();
    (!company.is_empty()).then_some(company)
}

/// Offline generator. Answers with [`default_reply`] for the company named in
/// the prompt, or with fixed canned text.
pub struct DummyModel {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel")
            .field("calls", &self.calls())
            .finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completed `generate` calls.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextGenerator for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn requires_credential(&self) -> bool {
        false
    }

    async fn generate(&self, prompt: &str, _options: GenerationOptions) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = match &self.reply {
            Some(reply) => reply.clone(),
            None => default_reply(company_from_prompt(prompt).unwrap_or(UNKNOWN_COMPANY)),
        };
        Ok(reply)
    }
}
