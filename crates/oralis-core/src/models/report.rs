use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::intake::Language;
use super::scenario::Confidence;
use super::section::SectionId;
use super::selection::{ContentType, Tone};

/// Scenario-authored section text as returned by the content repository,
/// keyed by section number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScenarioSections {
    pub scenario_id: String,
    #[serde(default)]
    pub sections: BTreeMap<u8, String>,
}

impl ScenarioSections {
    /// Text for `section`, treating whitespace-only text as absent.
    pub fn text(&self, section: SectionId) -> Option<&str> {
        self.sections
            .get(&section.number())
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }
}

/// One contributor to a section's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionSource {
    pub block_id: String,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportSection {
    pub number: SectionId,
    pub name: String,
    pub content: String,
    /// Contributors in emission order.
    pub sources: Vec<SectionSource>,
    pub word_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComposedReport {
    pub session_id: String,
    pub scenario_id: String,
    pub tone: Tone,
    pub language: Language,
    pub confidence: Confidence,
    /// Rendered sections in ascending section order.
    pub sections: Vec<ReportSection>,
    pub total_word_count: u32,
    pub suppressed_sections: Vec<SectionId>,
    pub placeholders_resolved: u32,
    /// Placeholder names left verbatim in the content, sorted.
    pub placeholders_unresolved: Vec<String>,
    /// Selected, non-suppressed blocks for which no text was available.
    pub content_gaps: Vec<String>,
}

impl ComposedReport {
    pub fn section(&self, number: SectionId) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.number == number)
    }

    pub fn is_suppressed(&self, number: SectionId) -> bool {
        self.suppressed_sections.contains(&number)
    }
}
