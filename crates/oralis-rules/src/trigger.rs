//! Generic trigger predicates.
//!
//! Every rule table in the catalog pairs a target with a [`Trigger`]; one
//! matcher evaluates them all, so adding a trigger is a data change.

use std::collections::BTreeSet;

use oralis_core::models::driver::{DriverId, DriverState};
use oralis_core::models::scenario::DriverCriterion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    Always,
    Driver(DriverCriterion),
    Tag { label: String },
    AnyOf { triggers: Vec<Trigger> },
}

impl Trigger {
    pub fn driver(driver: DriverId, values: &[&str]) -> Self {
        Trigger::Driver(DriverCriterion::new(driver, values.iter().copied()))
    }

    pub fn tag(label: &str) -> Self {
        Trigger::Tag {
            label: label.to_string(),
        }
    }

    pub fn any_of(triggers: Vec<Trigger>) -> Self {
        Trigger::AnyOf { triggers }
    }

    pub fn fires(&self, drivers: &DriverState, tags: &BTreeSet<String>) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Driver(criterion) => criterion.matches(drivers),
            Trigger::Tag { label } => tags.contains(label),
            Trigger::AnyOf { triggers } => triggers.iter().any(|t| t.fires(drivers, tags)),
        }
    }

    /// Driver criteria referenced anywhere in this trigger, for catalog
    /// validation.
    pub fn criteria(&self) -> Vec<&DriverCriterion> {
        match self {
            Trigger::Always | Trigger::Tag { .. } => vec![],
            Trigger::Driver(criterion) => vec![criterion],
            Trigger::AnyOf { triggers } => triggers.iter().flat_map(|t| t.criteria()).collect(),
        }
    }
}

/// A target paired with the condition under which it applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule<T> {
    pub target: T,
    pub trigger: Trigger,
}

impl<T> Rule<T> {
    pub fn new(target: T, trigger: Trigger) -> Self {
        Self { target, trigger }
    }
}

/// Targets of every rule whose trigger fires, in table order.
pub fn matching<'a, T>(
    rules: &'a [Rule<T>],
    drivers: &'a DriverState,
    tags: &'a BTreeSet<String>,
) -> impl Iterator<Item = &'a T> + 'a {
    rules
        .iter()
        .filter(move |r| r.trigger.fires(drivers, tags))
        .map(|r| &r.target)
}
