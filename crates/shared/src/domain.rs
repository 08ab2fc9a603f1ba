use serde::{Deserialize, Serialize};

/// A pointer into the legal corpus: a section label and the passage it quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub text: String,
}

impl Citation {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Badge label shown next to the passage.
    pub fn section_label(&self) -> String {
        format!("Section {}", self.source)
    }
}

/// One completed question/answer interaction.
///
/// Only built from a successful, validated response; failed attempts never
/// produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub response: String,
    pub citations: Vec<Citation>,
}

impl QueryRecord {
    pub fn has_citations(&self) -> bool {
        !self.citations.is_empty()
    }
}
