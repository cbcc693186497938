//! Section layouts: which content types a section assembles, in what order,
//! and how many of each it may hold.

use oralis_core::models::section::SectionId;
use oralis_core::models::selection::ContentType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCap {
    pub content_type: ContentType,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub section: SectionId,
    /// Assembly order of body content. Modules are placed around it.
    pub sources: Vec<ContentType>,
    pub caps: Vec<TypeCap>,
    /// Must be present or explicitly suppressed in every report.
    pub required: bool,
    /// Presents interpretive content; gets the uncertainty sentence when
    /// confidence is below HIGH.
    pub interpretive: bool,
}

impl SectionLayout {
    pub fn cap(&self, content_type: ContentType) -> Option<usize> {
        self.caps
            .iter()
            .find(|c| c.content_type == content_type)
            .map(|c| c.max)
    }

    /// Whether a selection of `content_type` may target this section.
    pub fn accepts(&self, content_type: ContentType) -> bool {
        match content_type {
            ContentType::Module => !self.sources.contains(&ContentType::Static),
            other => self.sources.contains(&other),
        }
    }
}

fn layout(
    number: SectionId,
    sources: &[ContentType],
    caps: &[(ContentType, usize)],
    required: bool,
    interpretive: bool,
) -> SectionLayout {
    SectionLayout {
        section: number,
        sources: sources.to_vec(),
        caps: caps
            .iter()
            .map(|(content_type, max)| TypeCap {
                content_type: *content_type,
                max: *max,
            })
            .collect(),
        required,
        interpretive,
    }
}

pub fn standard_layouts() -> Vec<SectionLayout> {
    use ContentType::*;

    vec![
        layout(SectionId::INTRODUCTION, &[Scenario, Contextual], &[(Contextual, 1)], true, false),
        layout(SectionId::ATTENTION, &[Warning], &[], false, false),
        layout(SectionId::PERSONAL_SUMMARY, &[Scenario, Contextual], &[(Contextual, 1)], true, true),
        layout(SectionId::SITUATION, &[Scenario, Contextual], &[(Contextual, 3)], false, true),
        layout(SectionId::INTERPRETATION, &[Scenario, Contextual], &[(Contextual, 2)], false, true),
        layout(SectionId::OPTIONS, &[Option], &[(Option, 2)], false, false),
        layout(SectionId::COMPARISON, &[Contextual], &[(Contextual, 2)], false, false),
        layout(SectionId::COSTS, &[Scenario, Contextual], &[(Contextual, 2)], false, false),
        layout(SectionId::PROCESS, &[Contextual], &[(Contextual, 2)], false, false),
        layout(SectionId::RISKS, &[Contextual], &[(Contextual, 2)], false, false),
        layout(SectionId::NEXT_STEPS, &[Static], &[(Static, 1)], true, false),
        layout(SectionId::DISCLAIMER, &[Static], &[(Static, 1)], true, false),
    ]
}
