// File: src/core/catalog.rs
use crate::core::types::{IconKey, Topic, VisualizationKind};

/// The compiled-in registry of known topics. Read-only for the life of the process.
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Builds the catalog shipped with the application.
    pub fn builtin() -> Self {
        use IconKey::*;
        use VisualizationKind::*;

        let entries = [
            ("ohm-law", "Ohm's Law", "The fundamental relationship between Voltage, Current, and Resistance.", Zap, OhmLaw),
            ("ac-dc", "AC vs DC", "Understanding Alternating Current versus Direct Current systems.", Activity, AcWave),
            ("capacitance", "Capacitor Charging", "Energy storage in an electric field and RC time constants.", BatteryCharging, RcCircuit),
            ("power", "Electric Power", "Rate of electrical energy transfer in a circuit.", Lightbulb, OhmLaw),
            ("inductor", "Inductance", "Resistance to change in current flow and magnetic field storage.", Magnet, AcWave),
            ("maxwell", "Maxwell's Equations", "The four fundamental equations describing classical electromagnetism.", Radio, Generic),
            ("three-phase", "Three-Phase Power", "Polyphase systems used for efficient industrial power distribution.", Network, AcWave),
            ("op-amp", "Operational Amplifiers", "High-gain voltage amplifiers essential for analog signal processing.", Triangle, Generic),
            ("fourier", "Fourier Analysis", "Decomposing complex signals into sums of simple sine waves.", Waves, AcWave),
            ("semiconductors", "PN Junctions", "The physics behind diodes and transistors in semiconductors.", Cpu, Generic),
        ];

        Self::from_topics(
            entries
                .into_iter()
                .map(|(id, name, description, icon, visualization)| Topic {
                    id: id.to_string(),
                    name: name.to_string(),
                    short_description: description.to_string(),
                    icon,
                    visualization,
                })
                .collect(),
        )
    }

    pub fn from_topics(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn all(&self) -> &[Topic] {
        &self.topics
    }

    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id == id)
    }

    /// Case-insensitive exact match on the display name.
    pub fn find_by_name(&self, name: &str) -> Option<&Topic> {
        let needle = name.to_lowercase();
        self.topics
            .iter()
            .find(|topic| topic.name.to_lowercase() == needle)
    }

    /// Topics whose name or short description contains `query`, ignoring case.
    /// Catalog order is preserved; an empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Topic> {
        let needle = query.to_lowercase();
        self.topics
            .iter()
            .filter(|topic| {
                topic.name.to_lowercase().contains(&needle)
                    || topic.short_description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
