use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use es_core::{Error, GenerationOptions, Result, TextGenerator};
use crate::Config;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiTextPart>,
}

#[derive(Serialize)]
struct GeminiTextPart {
    text: String,
}

/// Built-in search grounding, serialized as `{"google_search": {}}`.
#[derive(Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContentResponse>,
}

#[derive(Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<GeminiPartResponse>,
}

#[derive(Deserialize)]
struct GeminiPartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: Url,
}

impl GeminiModel {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("Invalid Gemini base URL '{}': {}", config.base_url, e))
        })?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key().unwrap_or_default().to_string(),
            model_name: config.model_name.clone(),
            base_url,
        })
    }

    fn endpoint(&self) -> Result<Url> {
        let path = format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model_name
        );
        Url::parse(&path)
            .map_err(|e| Error::Configuration(format!("Invalid Gemini endpoint '{}': {}", path, e)))
    }

    /// The key goes in a header, never the URL: reqwest errors print the URL.
    fn http_request(&self, request: &GeminiRequest) -> Result<reqwest::Request> {
        let http_request = self
            .client
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(request)
            .build()
            .map_err(reqwest::Error::without_url)?;
        Ok(http_request)
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

fn build_request(prompt: &str, options: GenerationOptions) -> GeminiRequest {
    let tools = if options.web_search {
        vec![GeminiTool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiTextPart {
                text: prompt.to_string(),
            }],
        }],
        tools,
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String> {
    if let Some(error) = response.error {
        return Err(Error::Provider(format!("Gemini error: {}", error.message)));
    }

    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::Provider("Gemini returned no text".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String> {
        let request = build_request(prompt, options);
        tracing::debug!(
            "Calling Gemini model {} (web search: {})",
            self.model_name,
            options.web_search
        );

        let http_request = self.http_request(&request)?;
        let response = self
            .client
            .execute(http_request)
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!("Gemini API error: {} - {}", status, body)));
        }

        let body = response
            .json::<GeminiResponse>()
            .await
            .map_err(reqwest::Error::without_url)?;
        extract_text(body)
    }
}
