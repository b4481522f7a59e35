use serde::{Deserialize, Serialize};

/// Normalized earnings summary extracted from a model reply.
///
/// Every field is optional; absent fields are left out of the JSON form, so a
/// reply with nothing recognizable serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_income_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceo_quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategic_focus: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Set when the reply says the report could not be found. Never clears the
    /// other fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryRecord {
    /// A record carrying only an error message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The error message, if one is set and non-empty.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    pub fn has_error(&self) -> bool {
        self.error_message().is_some()
    }
}
