//! The boundary to the hosted generative content provider.
//!
//! The session controller only sees [`ContentProvider`] and the structured
//! [`ContentPayload`](crate::core::types::ContentPayload) it yields; how the
//! payload is generated stays behind the trait.

pub mod gemini;

use crate::core::types::ContentPayload;
use crate::error::FetchError;
use async_trait::async_trait;

pub use gemini::GeminiProvider;

/// Produces explanation content for a topic name. All-or-nothing per call,
/// and implementations never retry.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch(&self, topic_name: &str) -> Result<ContentPayload, FetchError>;
}

/// Stands in when no real provider could be built. Every fetch fails, so
/// each topic shows the placeholder content.
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl ContentProvider for UnavailableProvider {
    async fn fetch(&self, _topic_name: &str) -> Result<ContentPayload, FetchError> {
        Err(FetchError::Unavailable(self.reason.clone()))
    }
}

/// Natural-language request sent for `topic_name`.
pub fn build_prompt(topic_name: &str) -> String {
    format!(
        "Explain the electrical engineering concept \"{topic_name}\".\n\
         Provide a clear summary, the main formula, a good analogy, a practical application, and a fun fact.\n\
         Ensure the formula is standard LaTeX for display.\n\
         Also provide 3 related concept names, and 4 specific YouTube search queries \
         (2 in English, 2 in Hindi) to find good tutorials."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_topic_name() {
        let prompt = build_prompt("Three-Phase Power");
        assert!(prompt.contains("\"Three-Phase Power\""));
        assert!(prompt.contains("LaTeX"));
        assert!(prompt.contains("2 in Hindi"));
    }

    #[tokio::test]
    async fn unavailable_provider_always_fails() {
        let provider = UnavailableProvider::new("tls backend missing");
        for topic in ["Ohm's Law", "Inductance"] {
            match provider.fetch(topic).await {
                Err(FetchError::Unavailable(reason)) => assert_eq!(reason, "tls backend missing"),
                other => panic!("expected Unavailable, got {other:?}"),
            }
        }
    }
}
