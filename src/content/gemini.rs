// File: src/content/gemini.rs
use crate::config::{AppConfig, TEMPERATURE};
use crate::content::{build_prompt, ContentProvider};
use crate::core::types::ContentPayload;
use crate::error::FetchError;
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Calls the Gemini `generateContent` endpoint with a JSON response schema.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiProvider {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl ContentProvider for GeminiProvider {
    async fn fetch(&self, topic_name: &str) -> Result<ContentPayload, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let body = request_body(topic_name);

        debug!("requesting content for {topic_name:?} from {}", self.model);
        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: text });
        }
        parse_response(&text)
    }
}

impl GeminiProvider {
    /// Maps a reqwest failure, dropping the request URL from the error text.
    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(error.without_url())
        }
    }
}

/// The seven-field schema the provider must fill.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A clear, concise explanation of the electrical concept for a student."
            },
            "formula_latex": {
                "type": "STRING",
                "description": "The primary formula in clean LaTeX format without surrounding text (e.g. V = I \\cdot R)."
            },
            "real_world_analogy": {
                "type": "STRING",
                "description": "A creative real-world analogy to help understand the abstract concept."
            },
            "practical_application": {
                "type": "STRING",
                "description": "A common real-world application of this concept."
            },
            "fun_fact": {
                "type": "STRING",
                "description": "An interesting historical or scientific fact about this concept."
            },
            "related_concepts": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 3-4 related electrical engineering topic names that a student should learn next."
            },
            "youtube_queries": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "Specific YouTube search query or video title." },
                        "language": { "type": "STRING", "enum": ["English", "Hindi"], "description": "The language of the video." }
                    },
                    "required": ["title", "language"]
                },
                "description": "4 recommended YouTube search queries: 2 in English and 2 in Hindi, focused on tutorials for this topic."
            }
        },
        "required": [
            "summary", "formula_latex", "real_world_analogy", "practical_application",
            "fun_fact", "related_concepts", "youtube_queries"
        ]
    })
}

pub fn request_body(topic_name: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": build_prompt(topic_name) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
            "temperature": TEMPERATURE,
        }
    })
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extracts the generated text from a `generateContent` response and
/// decodes it as a [`ContentPayload`].
pub fn parse_response(body: &str) -> Result<ContentPayload, FetchError> {
    let envelope: GenerateResponse = serde_json::from_str(body)?;
    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(FetchError::EmptyResponse);
    }
    Ok(serde_json::from_str(&text)?)
}
