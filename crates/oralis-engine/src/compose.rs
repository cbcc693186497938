//! Report composition.
//!
//! Composition is synchronous and pure: every piece of external text (the
//! scenario section bundle and block bodies) is fetched beforehand and
//! passed in, so composing the same input twice yields identical output.

use std::collections::BTreeMap;

use oralis_core::models::driver::DriverState;
use oralis_core::models::intake::Language;
use oralis_core::models::report::{ComposedReport, ReportSection, ScenarioSections, SectionSource};
use oralis_core::models::scenario::ScenarioMatchResult;
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::{ContentSelection, ContentSelections, ContentType, Tone};
use oralis_rules::Catalog;
use oralis_rules::content::SCENARIO_PRIORITY;
use oralis_rules::layout::SectionLayout;
use oralis_rules::text::{static_boilerplate, uncertainty_sentence};
use tracing::{debug, info};

use crate::placeholder::{PlaceholderContext, PlaceholderTally, resolve_placeholders};

/// Block bodies fetched from the content repository, keyed by block id.
/// A missing key means the repository had no text for that block.
pub type BlockTexts = BTreeMap<String, String>;

pub struct ComposeInput<'a> {
    pub session_id: &'a str,
    pub drivers: &'a DriverState,
    pub scenario: &'a ScenarioMatchResult,
    pub selections: &'a ContentSelections,
    pub tone: Tone,
    pub language: Language,
    pub scenario_text: Option<&'a ScenarioSections>,
    pub block_texts: &'a BlockTexts,
    pub placeholders: &'a PlaceholderContext,
}

struct Fragment {
    text: String,
    source: Option<SectionSource>,
}

/// Per-section assembly state.
struct SectionBuilder<'a, 'b> {
    input: &'b ComposeInput<'a>,
    fragments: Vec<Fragment>,
    gaps: &'b mut Vec<String>,
}

impl SectionBuilder<'_, '_> {
    fn push(&mut self, text: &str, block_id: &str, content_type: ContentType) {
        self.fragments.push(Fragment {
            text: text.trim().to_string(),
            source: Some(SectionSource {
                block_id: block_id.to_string(),
                content_type,
            }),
        });
    }

    fn fetched(&self, block_id: &str) -> Option<String> {
        self.input
            .block_texts
            .get(block_id)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    /// Emit a fetched block; record a gap when the repository had nothing.
    fn emit_block(&mut self, selection: &ContentSelection) -> bool {
        match self.fetched(&selection.block_id) {
            Some(text) => {
                self.push(&text, &selection.block_id, selection.content_type);
                true
            }
            None => {
                debug!(block_id = %selection.block_id, "no content available, block omitted");
                if !self.gaps.contains(&selection.block_id) {
                    self.gaps.push(selection.block_id.clone());
                }
                false
            }
        }
    }

    /// Emit selections in order until `cap` of them produced text.
    fn emit_capped(&mut self, selections: &[&ContentSelection], cap: Option<usize>) {
        let mut emitted = 0;
        for selection in selections {
            if cap.is_some_and(|max| emitted >= max) {
                debug!(block_id = %selection.block_id, "section cap reached, block skipped");
                break;
            }
            if self.emit_block(selection) {
                emitted += 1;
            }
        }
    }

    fn emit_static(&mut self, selection: &ContentSelection) {
        let text = self
            .fetched(&selection.block_id)
            .or_else(|| {
                static_boilerplate(&selection.block_id, self.input.language).map(str::to_string)
            });
        match text {
            Some(text) => self.push(&text, &selection.block_id, ContentType::Static),
            None => {
                if !self.gaps.contains(&selection.block_id) {
                    self.gaps.push(selection.block_id.clone());
                }
            }
        }
    }

    /// Scenario bundle text for this section, then scenario-specific blocks.
    /// Returns whether any scenario text was emitted.
    fn emit_scenario(&mut self, section: SectionId, selections: &[&ContentSelection]) -> bool {
        let input = self.input;
        let scenario_id = input.scenario.matched_scenario.as_str();
        let mut emitted = false;

        if let Some(text) = input.scenario_text.and_then(|b| b.text(section)) {
            self.push(text, scenario_id, ContentType::Scenario);
            emitted = true;
        }

        for selection in selections.iter().filter(|s| s.block_id != scenario_id) {
            emitted |= self.emit_block(selection);
        }

        emitted
    }
}

fn of_type<'s>(
    selections: &[&'s ContentSelection],
    content_type: ContentType,
) -> Vec<&'s ContentSelection> {
    selections
        .iter()
        .copied()
        .filter(|s| s.content_type == content_type)
        .collect()
}

/// Assemble the fixed 0–11 section sequence.
pub fn compose_report(catalog: &Catalog, input: &ComposeInput<'_>) -> ComposedReport {
    let mut sections = Vec::new();
    let mut suppressed_sections = Vec::new();
    let mut gaps = Vec::new();
    let mut tally = PlaceholderTally::default();

    for layout in catalog.layouts() {
        let section = layout.section;

        if input.selections.suppressed_sections.contains(&section) {
            debug!(section = %section, "section suppressed by safety rule");
            suppressed_sections.push(section);
            continue;
        }

        let mut in_section: Vec<&ContentSelection> = input.selections.for_section(section).collect();
        if !in_section.is_empty() && in_section.iter().all(|s| s.suppressed) {
            debug!(section = %section, "every selection suppressed, section suppressed");
            suppressed_sections.push(section);
            continue;
        }
        in_section.retain(|s| !s.suppressed);
        in_section.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.block_id.cmp(&b.block_id))
        });

        let fragments = assemble_section(input, layout, &in_section, &mut gaps);
        if fragments.is_empty() {
            debug!(section = %section, "no content for section, omitted");
            continue;
        }

        let mut texts = Vec::with_capacity(fragments.len());
        let mut sources = Vec::new();
        for fragment in fragments {
            texts.push(resolve_placeholders(&fragment.text, input.placeholders, &mut tally));
            sources.extend(fragment.source);
        }
        let content = texts.join("\n\n");

        sections.push(ReportSection {
            number: section,
            name: section.name().to_string(),
            word_count: word_count(&content),
            content,
            sources,
        });
    }

    let total_word_count = sections.iter().map(|s| s.word_count).sum();

    info!(
        session_id = %input.session_id,
        sections = sections.len(),
        suppressed = suppressed_sections.len(),
        words = total_word_count,
        unresolved_placeholders = tally.unresolved.len(),
        content_gaps = gaps.len(),
        "report composed"
    );

    ComposedReport {
        session_id: input.session_id.to_string(),
        scenario_id: input.scenario.matched_scenario.clone(),
        tone: input.tone,
        language: input.language,
        confidence: input.scenario.confidence,
        sections,
        total_word_count,
        suppressed_sections,
        placeholders_resolved: tally.resolved,
        placeholders_unresolved: tally.unresolved.into_iter().collect(),
        content_gaps: gaps,
    }
}

fn assemble_section(
    input: &ComposeInput<'_>,
    layout: &SectionLayout,
    selections: &[&ContentSelection],
    gaps: &mut Vec<String>,
) -> Vec<Fragment> {
    let section = layout.section;
    let modules = of_type(selections, ContentType::Module);
    let (prepend, append): (Vec<&ContentSelection>, Vec<&ContentSelection>) = modules
        .into_iter()
        .partition(|m| m.priority < SCENARIO_PRIORITY);

    let mut builder = SectionBuilder {
        input,
        fragments: Vec::new(),
        gaps,
    };

    for module in &prepend {
        builder.emit_block(module);
    }

    let mut scenario_present = false;
    for source in &layout.sources {
        match source {
            ContentType::Static => {
                let statics = of_type(selections, ContentType::Static);
                let cap = layout.cap(ContentType::Static).unwrap_or(statics.len());
                for selection in statics.into_iter().take(cap) {
                    builder.emit_static(selection);
                }
            }
            ContentType::Scenario => {
                let scenario = of_type(selections, ContentType::Scenario);
                scenario_present = builder.emit_scenario(section, &scenario);
            }
            ContentType::Contextual if scenario_present => {
                debug!(section = %section, "scenario text present, generic blocks skipped");
            }
            ContentType::Contextual | ContentType::Option | ContentType::Warning => {
                let blocks = of_type(selections, *source);
                builder.emit_capped(&blocks, layout.cap(*source));
            }
            ContentType::Module => {}
        }
    }

    for module in &append {
        builder.emit_block(module);
    }

    let mut fragments = builder.fragments;
    if !fragments.is_empty() && layout.interpretive && !input.scenario.confidence.is_high() {
        fragments.insert(
            0,
            Fragment {
                text: uncertainty_sentence(input.language).to_string(),
                source: None,
            },
        );
    }
    fragments
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{2010}'..='\u{2027}' | '\u{00A1}' | '\u{00BF}' | '\u{00AB}' | '\u{00BB}' | '\u{2039}' | '\u{203A}'
        )
}

/// Count whitespace-separated tokens after stripping punctuation. Tokens
/// made only of punctuation do not count.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace()
        .filter(|token| token.chars().any(|c| !is_punctuation(c)))
        .count() as u32
}
