// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique, slug-form identifier for a topic (e.g. `ohm-law`).
pub type TopicId = String;

/// Which chart (if any) accompanies a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationKind {
    OhmLaw,
    AcWave,
    RcCircuit,
    Generic,
}

/// The fixed set of icons a topic card can carry.
/// `Zap` doubles as the generic marker for ad-hoc topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKey {
    Zap,
    Activity,
    BatteryCharging,
    Lightbulb,
    Cpu,
    Radio,
    Waves,
    Triangle,
    Network,
    Magnet,
}

impl IconKey {
    /// Terminal glyph drawn for this icon.
    pub fn glyph(self) -> char {
        match self {
            IconKey::Zap => '⚡',
            IconKey::Activity => '∿',
            IconKey::BatteryCharging => '▮',
            IconKey::Lightbulb => '☼',
            IconKey::Cpu => '▣',
            IconKey::Radio => '◎',
            IconKey::Waves => '≈',
            IconKey::Triangle => '△',
            IconKey::Network => '⋈',
            IconKey::Magnet => 'Ⴖ',
        }
    }
}

/// A named electrical-engineering concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub short_description: String,
    pub icon: IconKey,
    pub visualization: VisualizationKind,
}

impl Topic {
    /// Synthesizes an ad-hoc topic for a concept name that is not in the catalog.
    pub fn ad_hoc(name: &str) -> Self {
        Self {
            id: slugify(name),
            name: name.to_string(),
            short_description: "Explore this related concept".to_string(),
            icon: IconKey::Zap,
            visualization: VisualizationKind::Generic,
        }
    }
}

/// Lowercases and replaces every whitespace run with a single hyphen.
/// Leading and trailing runs become hyphens too.
pub fn slugify(name: &str) -> TopicId {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(c);
            in_space = false;
        }
    }
    slug
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("English"),
            Language::Hindi => f.write_str("Hindi"),
        }
    }
}

/// A suggested tutorial search, tagged by language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecommendation {
    pub title: String,
    pub language: Language,
}

impl VideoRecommendation {
    pub fn new(title: &str, language: Language) -> Self {
        Self { title: title.to_string(), language }
    }

    /// YouTube search URL for this recommendation's title.
    pub fn search_url(&self) -> String {
        match reqwest::Url::parse_with_params(
            "https://www.youtube.com/results",
            &[("search_query", self.title.as_str())],
        ) {
            Ok(url) => url.to_string(),
            Err(_) => "https://www.youtube.com/results".to_string(),
        }
    }
}

/// Structured explanation data for a topic. Always replaced as a whole.
///
/// The serde names are the provider's wire names; the Rust names are ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPayload {
    pub summary: String,
    #[serde(rename = "formula_latex")]
    pub formula: String,
    #[serde(rename = "real_world_analogy")]
    pub analogy: String,
    #[serde(rename = "practical_application")]
    pub application: String,
    pub fun_fact: String,
    pub related_concepts: Vec<String>,
    #[serde(rename = "youtube_queries")]
    pub video_recommendations: Vec<VideoRecommendation>,
}

impl ContentPayload {
    /// The fixed offline content substituted when a live fetch fails.
    pub fn placeholder() -> Self {
        Self {
            summary: "This is a placeholder summary generated because live AI data might be pending."
                .to_string(),
            formula: "V = I \\times R".to_string(),
            analogy: "Think of voltage as water pressure, current as water flow, and resistance as the pipe size."
                .to_string(),
            application: "Used in almost every electronic device to manage current.".to_string(),
            fun_fact: "George Ohm was initially ridiculed for his theory!".to_string(),
            related_concepts: vec![
                "Kirchhoff's Laws".to_string(),
                "Electrical Power".to_string(),
                "Resistivity".to_string(),
            ],
            video_recommendations: vec![
                VideoRecommendation::new("Ohm's Law explained simply", Language::English),
                VideoRecommendation::new("Ohm's Law tutorial physics", Language::English),
                VideoRecommendation::new("Ohm's Law explanation in Hindi", Language::Hindi),
                VideoRecommendation::new("Voltage Current Resistance Hindi", Language::Hindi),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_whitespace_runs() {
        assert_eq!(slugify("Quantum Tunneling"), "quantum-tunneling");
        assert_eq!(slugify("  Skin   Effect "), "-skin-effect-");
        assert_eq!(slugify("Eddy\tCurrent\nLoss"), "eddy-current-loss");
        assert_eq!(slugify("Kirchhoff's Laws"), "kirchhoff's-laws");
    }

    #[test]
    fn ad_hoc_topic_is_generic() {
        let topic = Topic::ad_hoc("Quantum Tunneling");
        assert_eq!(topic.id, "quantum-tunneling");
        assert_eq!(topic.name, "Quantum Tunneling");
        assert_eq!(topic.visualization, VisualizationKind::Generic);
        assert_eq!(topic.icon, IconKey::Zap);
    }

    #[test]
    fn search_url_percent_encodes_title() {
        let video = VideoRecommendation::new("Ohm's Law & you", Language::English);
        let url = video.search_url();
        assert!(url.starts_with("https://www.youtube.com/results?search_query="));
        assert!(!url.contains(' '));
        assert!(url.contains("%26"));
    }

    #[test]
    fn payload_reads_provider_field_names() {
        let json = r#"{
            "summary": "s",
            "formula_latex": "P = VI",
            "real_world_analogy": "a",
            "practical_application": "p",
            "fun_fact": "f",
            "related_concepts": ["Ohm's Law", "Energy", "Joule Heating"],
            "youtube_queries": [
                {"title": "power basics", "language": "English"},
                {"title": "power hindi", "language": "Hindi"}
            ]
        }"#;
        let payload: ContentPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.formula, "P = VI");
        assert_eq!(payload.video_recommendations[1].language, Language::Hindi);
    }

    #[test]
    fn placeholder_has_balanced_video_languages() {
        let payload = ContentPayload::placeholder();
        let hindi = payload
            .video_recommendations
            .iter()
            .filter(|v| v.language == Language::Hindi)
            .count();
        assert_eq!(hindi, 2);
        assert_eq!(payload.video_recommendations.len(), 4);
    }
}
