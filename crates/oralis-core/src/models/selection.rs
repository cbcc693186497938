use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::section::SectionId;
use crate::error::CoreError;

/// Tone variant requested from the content repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Tone {
    Empathic,
    Neutral,
    Direct,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Empathic => "empathic",
            Tone::Neutral => "neutral",
            Tone::Direct => "direct",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empathic" => Ok(Tone::Empathic),
            "neutral" => Ok(Tone::Neutral),
            "direct" => Ok(Tone::Direct),
            other => Err(CoreError::UnknownTone(other.to_string())),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ContentType {
    /// Safety / warning block.
    Warning,
    /// Generic contextual block; the fallback when no scenario text exists.
    Contextual,
    /// Treatment-option block.
    Option,
    /// Scenario-authored content.
    Scenario,
    /// Reusable text module placed around scenario content.
    Module,
    /// Fixed boilerplate (next steps, disclaimer).
    Static,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Warning => "warning",
            ContentType::Contextual => "contextual",
            ContentType::Option => "option",
            ContentType::Scenario => "scenario",
            ContentType::Module => "module",
            ContentType::Static => "static",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Block-id pattern used by suppression rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum BlockPattern {
    Exact(String),
    Prefix(String),
}

impl BlockPattern {
    pub fn matches(&self, block_id: &str) -> bool {
        match self {
            BlockPattern::Exact(id) => block_id == id,
            BlockPattern::Prefix(prefix) => block_id.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContentSelection {
    pub block_id: String,
    pub content_type: ContentType,
    pub section: SectionId,
    pub tone: Tone,
    /// Lower sorts earlier within the section.
    pub priority: u32,
    pub suppressed: bool,
    pub suppression_reason: Option<String>,
}

impl ContentSelection {
    pub fn new(
        block_id: impl Into<String>,
        content_type: ContentType,
        section: SectionId,
        tone: Tone,
        priority: u32,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            content_type,
            section,
            tone,
            priority,
            suppressed: false,
            suppression_reason: None,
        }
    }

    pub fn suppress(mut self, reason: impl Into<String>) -> Self {
        self.suppressed = true;
        self.suppression_reason = Some(reason.into());
        self
    }
}

/// A suppression rule that fired for this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActiveSuppression {
    pub rule_id: String,
    pub sections: Vec<SectionId>,
    pub blocks: Vec<BlockPattern>,
    pub reason: String,
}

/// Output of content selection. Suppressed selections stay in the list so
/// the audit trail is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContentSelections {
    pub selections: Vec<ContentSelection>,
    pub suppressed_sections: BTreeSet<SectionId>,
    pub active_suppressions: Vec<ActiveSuppression>,
}

impl ContentSelections {
    /// Selections targeting `section`, in list order.
    pub fn for_section(&self, section: SectionId) -> impl Iterator<Item = &ContentSelection> {
        self.selections.iter().filter(move |s| s.section == section)
    }

    pub fn rendered(&self) -> impl Iterator<Item = &ContentSelection> {
        self.selections.iter().filter(|s| !s.suppressed)
    }

    pub fn contains_block(&self, block_id: &str) -> bool {
        self.selections.iter().any(|s| s.block_id == block_id)
    }
}
