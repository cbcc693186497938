//! Content-selection rule tables: warnings, contextual and option blocks,
//! reusable modules, static blocks and the safety suppression rules.

use oralis_core::models::driver::DriverId;
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::{BlockPattern, ContentType, Tone};
use serde::{Deserialize, Serialize};

use crate::trigger::{Rule, Trigger};

use DriverId::*;

/// Priority of scenario-authored content within its section. Module
/// placement is expressed relative to it.
pub const SCENARIO_PRIORITY: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTarget {
    pub block_id: String,
    pub content_type: ContentType,
    pub section: SectionId,
    pub priority: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Prepend,
    Append,
}

impl Placement {
    /// Priority for the `index`-th target of this placement. Prepended
    /// modules sort before scenario content, appended ones after it.
    pub fn priority(&self, index: u32) -> u32 {
        match self {
            Placement::Prepend => 10 + index,
            Placement::Append => 90 + index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleTarget {
    pub section: SectionId,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextModule {
    pub block_id: String,
    pub targets: Vec<ModuleTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticBlock {
    pub block_id: String,
    pub section: SectionId,
    pub priority: u32,
    /// Tone variant used regardless of the report tone.
    pub fixed_tone: Option<Tone>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionRule {
    pub id: String,
    pub trigger: Trigger,
    pub sections: Vec<SectionId>,
    pub blocks: Vec<BlockPattern>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRules {
    pub suppressions: Vec<SuppressionRule>,
    pub warnings: Vec<Rule<BlockTarget>>,
    pub blocks: Vec<Rule<BlockTarget>>,
    pub modules: Vec<Rule<TextModule>>,
    pub statics: Vec<StaticBlock>,
}

fn block(
    block_id: &str,
    content_type: ContentType,
    section: SectionId,
    priority: u32,
    trigger: Trigger,
) -> Rule<BlockTarget> {
    Rule::new(
        BlockTarget {
            block_id: block_id.to_string(),
            content_type,
            section,
            priority,
        },
        trigger,
    )
}

fn warning(block_id: &str, priority: u32, trigger: Trigger) -> Rule<BlockTarget> {
    block(block_id, ContentType::Warning, SectionId::ATTENTION, priority, trigger)
}

fn contextual(block_id: &str, section: SectionId, priority: u32, trigger: Trigger) -> Rule<BlockTarget> {
    block(block_id, ContentType::Contextual, section, priority, trigger)
}

fn option(block_id: &str, priority: u32, trigger: Trigger) -> Rule<BlockTarget> {
    block(block_id, ContentType::Option, SectionId::OPTIONS, priority, trigger)
}

fn module(block_id: &str, targets: &[(SectionId, Placement)], trigger: Trigger) -> Rule<TextModule> {
    Rule::new(
        TextModule {
            block_id: block_id.to_string(),
            targets: targets
                .iter()
                .map(|(section, placement)| ModuleTarget {
                    section: *section,
                    placement: *placement,
                })
                .collect(),
        },
        trigger,
    )
}

fn mouth(values: &[&str]) -> Trigger {
    Trigger::driver(MouthSituation, values)
}

pub fn standard_content_rules() -> ContentRules {
    ContentRules {
        suppressions: standard_suppressions(),
        warnings: standard_warnings(),
        blocks: standard_blocks(),
        modules: standard_modules(),
        statics: vec![
            StaticBlock {
                block_id: "STATIC_NEXT_STEPS".to_string(),
                section: SectionId::NEXT_STEPS,
                priority: 0,
                fixed_tone: Some(Tone::Neutral),
            },
            StaticBlock {
                block_id: "STATIC_DISCLAIMER".to_string(),
                section: SectionId::DISCLAIMER,
                priority: 0,
                fixed_tone: None,
            },
        ],
    }
}

fn standard_suppressions() -> Vec<SuppressionRule> {
    vec![
        SuppressionRule {
            id: "SUP_URGENT".to_string(),
            trigger: Trigger::driver(ClinicalPriority, &["urgent"]),
            sections: vec![
                SectionId::OPTIONS,
                SectionId::COMPARISON,
                SectionId::COSTS,
                SectionId::PROCESS,
                SectionId::RISKS,
            ],
            blocks: vec![
                BlockPattern::Prefix("OPT_".to_string()),
                BlockPattern::Prefix("A_PLANNING_".to_string()),
            ],
            reason: "acute complaints must be assessed before treatment options are discussed"
                .to_string(),
        },
        SuppressionRule {
            id: "SUP_CONTRAINDICATED".to_string(),
            trigger: Trigger::driver(MedicalConstraint, &["contraindicated"]),
            sections: vec![SectionId::OPTIONS, SectionId::COMPARISON, SectionId::PROCESS],
            blocks: vec![
                BlockPattern::Prefix("OPT_IMPLANT".to_string()),
                BlockPattern::Prefix("MOD_IMPLANT_".to_string()),
            ],
            reason: "a medical contraindication requires consultation before any treatment plan"
                .to_string(),
        },
    ]
}

/// Warning priorities encode urgency: lower is more urgent.
fn standard_warnings() -> Vec<Rule<BlockTarget>> {
    vec![
        warning(
            "A_URGENT_TREATMENT_BLOCKED",
            1,
            Trigger::driver(ClinicalPriority, &["urgent"]),
        ),
        warning("A_SWELLING", 2, Trigger::tag("swelling")),
        warning(
            "A_MEDICAL_CONTRAINDICATION",
            3,
            Trigger::driver(MedicalConstraint, &["contraindicated"]),
        ),
        warning(
            "A_MEDICAL_CAUTION",
            4,
            Trigger::driver(MedicalConstraint, &["caution"]),
        ),
        warning("A_SMOKING", 5, Trigger::tag("smoker_heavy")),
        warning("A_ANXIETY", 6, Trigger::driver(AnxietyLevel, &["high"])),
        warning(
            "A_PLANNING_BUDGET",
            7,
            Trigger::driver(BudgetType, &["unknown"]),
        ),
        warning("A_PLANNING_PREGNANCY", 8, Trigger::tag("health_pregnancy")),
    ]
}

fn standard_blocks() -> Vec<Rule<BlockTarget>> {
    vec![
        contextual("B_INTRO_GENERAL", SectionId::INTRODUCTION, 10, Trigger::Always),
        contextual("B_SUMMARY_GENERAL", SectionId::PERSONAL_SUMMARY, 60, Trigger::Always),
        // Situation
        contextual("B_CONTEXT_SINGLE_GAP", SectionId::SITUATION, 10, mouth(&["single_gap"])),
        contextual("B_CONTEXT_MULTIPLE_GAPS", SectionId::SITUATION, 10, mouth(&["multiple_gaps"])),
        contextual("B_CONTEXT_EXTENSIVE_LOSS", SectionId::SITUATION, 10, mouth(&["extensive_loss"])),
        contextual("B_CONTEXT_EDENTULOUS", SectionId::SITUATION, 10, mouth(&["edentulous"])),
        contextual("B_CONTEXT_NO_LOSS", SectionId::SITUATION, 10, mouth(&["no_loss"])),
        contextual(
            "B_CONTEXT_FRONT_TEETH",
            SectionId::SITUATION,
            20,
            Trigger::driver(ToothLocation, &["anterior"]),
        ),
        contextual(
            "B_CONTEXT_EXISTING_PROSTHESIS",
            SectionId::SITUATION,
            30,
            Trigger::driver(ProsthesisStatus, &["removable", "fixed"]),
        ),
        // Interpretation
        contextual(
            "B_INTERPRETATION_URGENT",
            SectionId::INTERPRETATION,
            10,
            Trigger::driver(ClinicalPriority, &["urgent"]),
        ),
        contextual(
            "B_INTERPRETATION_MEDICAL",
            SectionId::INTERPRETATION,
            15,
            Trigger::driver(MedicalConstraint, &["contraindicated", "caution"]),
        ),
        contextual("B_INTERPRETATION_GENERAL", SectionId::INTERPRETATION, 20, Trigger::Always),
        // Options
        option("OPT_IMPLANT_SINGLE", 10, mouth(&["single_gap"])),
        option("OPT_FULL_DENTURE", 10, mouth(&["edentulous"])),
        option("OPT_MONITORING", 10, mouth(&["no_loss"])),
        option("OPT_BRIDGE", 20, mouth(&["single_gap", "multiple_gaps"])),
        option("OPT_IMPLANT_OVERDENTURE", 20, mouth(&["edentulous"])),
        option("OPT_IMPLANT_BRIDGE", 25, mouth(&["multiple_gaps", "extensive_loss"])),
        option("OPT_PARTIAL_DENTURE", 30, mouth(&["multiple_gaps", "extensive_loss"])),
        // Comparison
        contextual("CMP_IMPLANT_VS_BRIDGE", SectionId::COMPARISON, 10, mouth(&["single_gap"])),
        contextual(
            "CMP_FIXED_VS_REMOVABLE",
            SectionId::COMPARISON,
            10,
            mouth(&["multiple_gaps", "extensive_loss", "edentulous"]),
        ),
        // Costs
        contextual("COST_ECONOMY", SectionId::COSTS, 10, Trigger::driver(BudgetType, &["economy"])),
        contextual("COST_BALANCED", SectionId::COSTS, 10, Trigger::driver(BudgetType, &["balanced"])),
        contextual("COST_PREMIUM", SectionId::COSTS, 10, Trigger::driver(BudgetType, &["premium"])),
        contextual("COST_GENERAL", SectionId::COSTS, 10, Trigger::driver(BudgetType, &["unknown"])),
        contextual("COST_INSURANCE", SectionId::COSTS, 20, Trigger::Always),
        // Process
        contextual(
            "PROC_IMPLANT_TIMELINE",
            SectionId::PROCESS,
            10,
            mouth(&["single_gap", "extensive_loss", "edentulous"]),
        ),
        contextual(
            "PROC_REMOVABLE_TIMELINE",
            SectionId::PROCESS,
            15,
            mouth(&["multiple_gaps", "extensive_loss", "edentulous"]),
        ),
        contextual("PROC_GENERAL", SectionId::PROCESS, 30, Trigger::Always),
        // Risks
        contextual("RISK_SMOKING", SectionId::RISKS, 10, Trigger::driver(RiskProfile, &["elevated"])),
        contextual(
            "RISK_MEDICAL",
            SectionId::RISKS,
            15,
            Trigger::driver(MedicalConstraint, &["caution"]),
        ),
        contextual("RISK_GENERAL", SectionId::RISKS, 30, Trigger::Always),
    ]
}

fn standard_modules() -> Vec<Rule<TextModule>> {
    use Placement::*;

    vec![
        module(
            "MOD_ANXIETY_COMFORT",
            &[(SectionId::PERSONAL_SUMMARY, Prepend), (SectionId::PROCESS, Append)],
            Trigger::driver(AnxietyLevel, &["high"]),
        ),
        module(
            "MOD_SMOKING_CESSATION",
            &[(SectionId::SITUATION, Append), (SectionId::RISKS, Append)],
            Trigger::any_of(vec![Trigger::tag("smoker_heavy"), Trigger::tag("smoker_light")]),
        ),
        module(
            "MOD_BUDGET_PHASING",
            &[(SectionId::COSTS, Append)],
            Trigger::driver(BudgetType, &["economy"]),
        ),
        module(
            "MOD_AESTHETIC_EXPECTATIONS",
            &[(SectionId::SITUATION, Append), (SectionId::OPTIONS, Append)],
            Trigger::driver(AestheticPriority, &["high"]),
        ),
        module(
            "MOD_IMPLANT_CARE",
            &[(SectionId::RISKS, Append)],
            mouth(&["single_gap", "extensive_loss", "edentulous"]),
        ),
        module(
            "MOD_SECOND_OPINION",
            &[(SectionId::INTERPRETATION, Append)],
            Trigger::driver(MedicalConstraint, &["contraindicated", "caution"]),
        ),
    ]
}
