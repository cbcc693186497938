use std::collections::BTreeMap;

use oralis_core::models::section::SectionId;
use serde::{Deserialize, Serialize};

/// Acceptable word count for one rendered section, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBand {
    pub min: u32,
    pub max: u32,
}

impl WordBand {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Word bands keyed by section number. Sections without a band are
    /// not checked.
    pub word_bands: BTreeMap<u8, WordBand>,
    pub max_critical: usize,
    pub max_errors: usize,
    pub max_leakage_warnings: usize,
    pub max_validation_warnings: usize,
    /// Unresolved placeholders are errors instead of warnings.
    pub strict_placeholders: bool,
    /// Content gaps are errors instead of warnings.
    pub content_gaps_block: bool,
}

impl QaConfig {
    pub fn band(&self, section: SectionId) -> Option<WordBand> {
        self.word_bands.get(&section.number()).copied()
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        let word_bands = [
            (0, WordBand::new(10, 250)),
            (1, WordBand::new(5, 300)),
            (2, WordBand::new(15, 400)),
            (3, WordBand::new(10, 500)),
            (4, WordBand::new(10, 400)),
            (5, WordBand::new(15, 600)),
            (6, WordBand::new(10, 400)),
            (7, WordBand::new(10, 400)),
            (8, WordBand::new(10, 400)),
            (9, WordBand::new(10, 400)),
            (10, WordBand::new(10, 200)),
            (11, WordBand::new(10, 200)),
        ]
        .into_iter()
        .collect();

        Self {
            word_bands,
            max_critical: 0,
            max_errors: 0,
            max_leakage_warnings: 0,
            max_validation_warnings: 0,
            strict_placeholders: false,
            content_gaps_block: false,
        }
    }
}
