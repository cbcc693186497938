use std::collections::BTreeSet;

use oralis_core::models::driver::DriverState;
use oralis_core::models::scenario::ScenarioMatchResult;
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::{
    ActiveSuppression, ContentSelection, ContentSelections, ContentType, Tone,
};
use oralis_rules::Catalog;
use oralis_rules::content::{BlockTarget, SCENARIO_PRIORITY};
use oralis_rules::trigger::matching;
use tracing::{debug, info};

/// Evaluate the safety suppression rules against the driver state.
///
/// Shared with the QA validator, which recomputes the set independently to
/// catch selections that slipped through.
pub fn active_suppressions(
    catalog: &Catalog,
    drivers: &DriverState,
    tags: &BTreeSet<String>,
) -> Vec<ActiveSuppression> {
    catalog
        .content()
        .suppressions
        .iter()
        .filter(|rule| rule.trigger.fires(drivers, tags))
        .map(|rule| ActiveSuppression {
            rule_id: rule.id.clone(),
            sections: rule.sections.clone(),
            blocks: rule.blocks.clone(),
            reason: rule.reason.clone(),
        })
        .collect()
}

struct Suppressor<'a> {
    active: &'a [ActiveSuppression],
}

impl Suppressor<'_> {
    fn by_section(&self, section: SectionId) -> Option<String> {
        self.active
            .iter()
            .find(|s| s.sections.contains(&section))
            .map(|s| format!("section {section} suppressed by {}: {}", s.rule_id, s.reason))
    }

    fn by_block(&self, block_id: &str) -> Option<String> {
        self.active
            .iter()
            .find(|s| s.blocks.iter().any(|p| p.matches(block_id)))
            .map(|s| format!("block {block_id} suppressed by {}: {}", s.rule_id, s.reason))
    }

    /// Block-pattern suppression only.
    fn block_only(&self, selection: ContentSelection) -> ContentSelection {
        match self.by_block(&selection.block_id) {
            Some(reason) => selection.suppress(reason),
            None => selection,
        }
    }

    /// Section suppression first, then block patterns.
    fn apply(&self, selection: ContentSelection) -> ContentSelection {
        match self
            .by_section(selection.section)
            .or_else(|| self.by_block(&selection.block_id))
        {
            Some(reason) => selection.suppress(reason),
            None => selection,
        }
    }
}

fn from_target(target: &BlockTarget, tone: Tone) -> ContentSelection {
    ContentSelection::new(
        target.block_id.clone(),
        target.content_type,
        target.section,
        tone,
        target.priority,
    )
}

/// Decide which content blocks go into which section.
///
/// Suppressed selections are kept, flagged with a reason, so the audit
/// trail shows everything that was considered.
pub fn select_content(
    catalog: &Catalog,
    drivers: &DriverState,
    scenario: &ScenarioMatchResult,
    tone: Tone,
    tags: &BTreeSet<String>,
) -> ContentSelections {
    let rules = catalog.content();

    // 1. Suppression set, computed once.
    let active = active_suppressions(catalog, drivers, tags);
    let suppressor = Suppressor { active: &active };
    let suppressed_sections: BTreeSet<SectionId> =
        active.iter().flat_map(|s| s.sections.iter().copied()).collect();

    let mut selections = Vec::new();

    // 2. Safety / warning blocks.
    let mut warnings: Vec<&BlockTarget> = matching(&rules.warnings, drivers, tags).collect();
    warnings.sort_by_key(|t| t.priority);
    selections.extend(
        warnings
            .into_iter()
            .map(|t| suppressor.block_only(from_target(t, tone))),
    );

    // 3. The scenario's own summary content.
    selections.push(suppressor.apply(ContentSelection::new(
        scenario.matched_scenario.clone(),
        ContentType::Scenario,
        SectionId::PERSONAL_SUMMARY,
        tone,
        SCENARIO_PRIORITY,
    )));

    // 4. Contextual, option, comparison, process, cost and risk blocks.
    selections.extend(
        matching(&rules.blocks, drivers, tags).map(|t| suppressor.apply(from_target(t, tone))),
    );

    // 5. Scenario-specific nuance and cost blocks.
    if let Some(matched) = catalog.scenario(&scenario.matched_scenario) {
        let nuance = matched
            .nuance_blocks
            .iter()
            .map(|id| (id, SectionId::SITUATION));
        let cost = matched.cost_blocks.iter().map(|id| (id, SectionId::COSTS));
        for (offset, (block_id, section)) in nuance.chain(cost).enumerate() {
            selections.push(suppressor.apply(ContentSelection::new(
                block_id.clone(),
                ContentType::Scenario,
                section,
                tone,
                SCENARIO_PRIORITY + 1 + offset as u32,
            )));
        }
    }

    // 6. Reusable modules, one selection per target section.
    for module in matching(&rules.modules, drivers, tags) {
        for (index, target) in module.targets.iter().enumerate() {
            selections.push(suppressor.apply(ContentSelection::new(
                module.block_id.clone(),
                ContentType::Module,
                target.section,
                tone,
                target.placement.priority(index as u32),
            )));
        }
    }

    // 7. Static sections, always present.
    for block in &rules.statics {
        selections.push(ContentSelection::new(
            block.block_id.clone(),
            ContentType::Static,
            block.section,
            block.fixed_tone.unwrap_or(tone),
            block.priority,
        ));
    }

    for s in selections.iter().filter(|s| s.suppressed) {
        debug!(
            block_id = %s.block_id,
            section = %s.section,
            reason = s.suppression_reason.as_deref().unwrap_or_default(),
            "selection suppressed"
        );
    }

    info!(
        selections = selections.len(),
        suppressed = selections.iter().filter(|s| s.suppressed).count(),
        suppressed_sections = suppressed_sections.len(),
        "content selected"
    );

    ContentSelections {
        selections,
        suppressed_sections,
        active_suppressions: active,
    }
}
