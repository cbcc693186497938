//! Content repository seam.
//!
//! The pipeline only ever asks for one block body or one scenario bundle
//! at a time. `Ok(None)` is the normal "no content" answer; `Err` means
//! the repository itself failed.

use std::collections::BTreeMap;
use std::path::Path;

use oralis_core::BoxFuture;
use oralis_core::models::intake::Language;
use oralis_core::models::report::ScenarioSections;
use oralis_core::models::selection::Tone;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RepositoryError;

pub trait ContentRepository: Send + Sync {
    fn get_content<'a>(
        &'a self,
        block_id: &'a str,
        tone: Tone,
        language: Language,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>>;

    fn get_scenario_sections<'a>(
        &'a self,
        scenario_id: &'a str,
        tone: Tone,
        language: Language,
    ) -> BoxFuture<'a, Result<Option<ScenarioSections>, RepositoryError>>;
}

/// Text for one block: tone-specific variants first, then the
/// tone-agnostic default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntry {
    #[serde(default)]
    pub default: BTreeMap<Language, String>,
    #[serde(default)]
    pub tones: BTreeMap<Tone, BTreeMap<Language, String>>,
}

impl BlockEntry {
    fn lookup(&self, tone: Tone, language: Language) -> Option<&String> {
        self.tones
            .get(&tone)
            .and_then(|by_language| by_language.get(&language))
            .or_else(|| self.default.get(&language))
    }
}

/// Section text authored for one scenario, keyed by section number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    #[serde(default)]
    pub default: BTreeMap<Language, BTreeMap<u8, String>>,
    #[serde(default)]
    pub tones: BTreeMap<Tone, BTreeMap<Language, BTreeMap<u8, String>>>,
}

impl ScenarioEntry {
    fn lookup(&self, tone: Tone, language: Language) -> Option<&BTreeMap<u8, String>> {
        self.tones
            .get(&tone)
            .and_then(|by_language| by_language.get(&language))
            .or_else(|| self.default.get(&language))
    }
}

/// The on-disk content library format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLibrary {
    #[serde(default)]
    pub blocks: BTreeMap<String, BlockEntry>,
    #[serde(default)]
    pub scenarios: BTreeMap<String, ScenarioEntry>,
}

/// Content repository backed by a library held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    library: ContentLibrary,
}

impl InMemoryRepository {
    pub fn new(library: ContentLibrary) -> Self {
        debug!(
            blocks = library.blocks.len(),
            scenarios = library.scenarios.len(),
            "content library loaded"
        );
        Self { library }
    }

    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, RepositoryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }
}

impl ContentRepository for InMemoryRepository {
    fn get_content<'a>(
        &'a self,
        block_id: &'a str,
        tone: Tone,
        language: Language,
    ) -> BoxFuture<'a, Result<Option<String>, RepositoryError>> {
        Box::pin(async move {
            Ok(self
                .library
                .blocks
                .get(block_id)
                .and_then(|entry| entry.lookup(tone, language))
                .cloned())
        })
    }

    fn get_scenario_sections<'a>(
        &'a self,
        scenario_id: &'a str,
        tone: Tone,
        language: Language,
    ) -> BoxFuture<'a, Result<Option<ScenarioSections>, RepositoryError>> {
        Box::pin(async move {
            let Some(entry) = self.library.scenarios.get(scenario_id) else {
                return Ok(None);
            };
            Ok(entry.lookup(tone, language).map(|sections| ScenarioSections {
                scenario_id: scenario_id.to_string(),
                sections: sections.clone(),
            }))
        })
    }
}
