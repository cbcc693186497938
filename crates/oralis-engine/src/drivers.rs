use std::collections::BTreeMap;

use oralis_core::models::driver::{
    DriverConflict, DriverFallback, DriverSource, DriverState, DriverValue,
};
use oralis_core::models::tag::Tag;
use oralis_rules::Catalog;
use tracing::debug;

/// Resolve every driver in the catalog from the extracted tags.
///
/// For each driver the tags imply a set of candidate values. A single
/// candidate is taken as is; several distinct candidates are a conflict,
/// resolved by the driver's precedence order; none falls back to the
/// driver's declared fallback. Logs come out in driver order.
pub fn derive_drivers(catalog: &Catalog, tags: &[Tag]) -> DriverState {
    let mut state = DriverState::default();

    for spec in catalog.drivers() {
        // candidate value -> contributing tag labels, first-seen order
        let mut candidates: BTreeMap<usize, (String, Vec<String>)> = BTreeMap::new();

        for tag in tags {
            for rule in spec.rules.iter().filter(|r| r.tag == tag.label) {
                let Some(rank) = spec.precedence(&rule.value) else {
                    continue;
                };
                let entry = candidates
                    .entry(rank)
                    .or_insert_with(|| (rule.value.clone(), Vec::new()));
                if !entry.1.contains(&tag.label) {
                    entry.1.push(tag.label.clone());
                }
            }
        }

        let value = match candidates.first_key_value() {
            None => {
                state.fallbacks.push(DriverFallback {
                    driver: spec.id,
                    value: spec.fallback.clone(),
                    reason: "no tag resolved this driver".to_string(),
                });
                DriverValue {
                    driver: spec.id,
                    value: spec.fallback.clone(),
                    source: DriverSource::Fallback,
                }
            }
            Some((_, (chosen, chosen_tags))) => {
                if candidates.len() > 1 {
                    debug!(
                        driver = %spec.id,
                        chosen = %chosen,
                        candidates = candidates.len(),
                        "driver conflict resolved by precedence"
                    );
                    state.conflicts.push(DriverConflict {
                        driver: spec.id,
                        candidates: candidates.values().map(|(v, _)| v.clone()).collect(),
                        chosen: chosen.clone(),
                        tags: candidates
                            .values()
                            .flat_map(|(_, t)| t.iter().cloned())
                            .collect(),
                    });
                }
                DriverValue {
                    driver: spec.id,
                    value: chosen.clone(),
                    source: DriverSource::Derived {
                        tags: chosen_tags.clone(),
                    },
                }
            }
        };

        state.values.insert(spec.id, value);
    }

    state
}
