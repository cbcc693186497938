use std::cmp::Ordering;
use std::collections::BTreeSet;

use oralis_core::models::driver::DriverState;
use oralis_core::models::scenario::{
    Confidence, Scenario, ScenarioMatchResult, ScenarioScore, ScoreStatus,
};
use oralis_rules::Catalog;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Weights and confidence thresholds for scenario scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub strong_weight: f64,
    pub supporting_weight: f64,
    pub preferred_tag_weight: f64,
    /// Best scores below this select the fallback scenario.
    pub min_score: f64,
    pub high_score: f64,
    pub high_margin: f64,
    pub medium_score: f64,
    pub medium_margin: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strong_weight: 10.0,
            supporting_weight: 4.0,
            preferred_tag_weight: 2.0,
            min_score: 10.0,
            high_score: 24.0,
            high_margin: 8.0,
            medium_score: 14.0,
            medium_margin: 4.0,
        }
    }
}

impl ScoringConfig {
    fn confidence(&self, score: f64, margin: f64) -> Confidence {
        if score >= self.high_score && margin >= self.high_margin {
            Confidence::High
        } else if score >= self.medium_score && margin >= self.medium_margin {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Score one scenario against the driver state.
pub fn score_scenario(
    scenario: &Scenario,
    drivers: &DriverState,
    tags: &BTreeSet<String>,
    config: &ScoringConfig,
) -> ScenarioScore {
    let status = if let Some(failed) = scenario.required.iter().find(|c| !c.matches(drivers)) {
        ScoreStatus::Excluded {
            reason: format!(
                "required {} not in [{}] (was {})",
                failed.driver,
                failed.values.join(", "),
                drivers.value(failed.driver).unwrap_or("unset"),
            ),
        }
    } else if let Some(hit) = scenario.excluding.iter().find(|c| c.matches(drivers)) {
        ScoreStatus::Excluded {
            reason: format!(
                "excluding {} = {}",
                hit.driver,
                drivers.value(hit.driver).unwrap_or("unset"),
            ),
        }
    } else {
        let strong_hits = scenario.strong.iter().filter(|c| c.matches(drivers)).count() as u32;
        let supporting_hits = scenario
            .supporting
            .iter()
            .filter(|c| c.matches(drivers))
            .count() as u32;
        let tag_hits = scenario
            .preferred_tags
            .iter()
            .filter(|t| tags.contains(*t))
            .count() as u32;
        let score = f64::from(strong_hits) * config.strong_weight
            + f64::from(supporting_hits) * config.supporting_weight
            + f64::from(tag_hits) * config.preferred_tag_weight;
        ScoreStatus::Scored {
            score,
            strong_hits,
            supporting_hits,
            tag_hits,
        }
    };

    ScenarioScore {
        scenario_id: scenario.id.clone(),
        priority: scenario.priority,
        status,
    }
}

/// Order scored entries best-first: score descending, then priority
/// ascending, then id. Excluded entries keep catalog order at the end.
fn rank(a: &ScenarioScore, b: &ScenarioScore) -> Ordering {
    match (a.score(), b.score()) {
        (Some(sa), Some(sb)) => sb
            .total_cmp(&sa)
            .then(a.priority.cmp(&b.priority))
            .then(a.scenario_id.cmp(&b.scenario_id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Select the best-matching scenario.
///
/// The fallback scenario never competes; it is chosen only when no other
/// scenario survives exclusion or the best score stays below
/// `config.min_score`, and then confidence is always FALLBACK.
pub fn match_scenario(
    catalog: &Catalog,
    drivers: &DriverState,
    tags: &BTreeSet<String>,
    config: &ScoringConfig,
) -> ScenarioMatchResult {
    let mut ranking: Vec<ScenarioScore> = catalog
        .scenarios()
        .iter()
        .filter(|s| !s.is_fallback)
        .map(|s| score_scenario(s, drivers, tags, config))
        .collect();
    // Stable sort keeps catalog order among excluded entries.
    ranking.sort_by(rank);

    for entry in &ranking {
        debug!(scenario = %entry.scenario_id, status = ?entry.status, "scenario scored");
    }

    let scored: Vec<(&str, f64)> = ranking
        .iter()
        .filter_map(|e| e.score().map(|s| (e.scenario_id.as_str(), s)))
        .collect();

    let fallback_reason = match scored.first() {
        None => Some("no scenario satisfied its required drivers".to_string()),
        Some((id, best)) if *best < config.min_score => Some(format!(
            "best candidate {id} scored {best} (minimum {})",
            config.min_score
        )),
        Some(_) => None,
    };

    let result = if let Some(reason) = fallback_reason {
        ScenarioMatchResult {
            matched_scenario: catalog.fallback_scenario().id.clone(),
            score: 0.0,
            confidence: Confidence::Fallback,
            ranking,
            fallback_used: true,
            fallback_reason: Some(reason),
        }
    } else {
        let (winner, best) = scored[0];
        let winner = winner.to_string();
        let margin = scored.get(1).map_or(best, |(_, runner_up)| best - runner_up);
        ScenarioMatchResult {
            matched_scenario: winner,
            score: best,
            confidence: config.confidence(best, margin),
            ranking,
            fallback_used: false,
            fallback_reason: None,
        }
    };

    info!(
        scenario = %result.matched_scenario,
        score = result.score,
        confidence = %result.confidence,
        fallback = result.fallback_used,
        "scenario matched"
    );

    result
}
