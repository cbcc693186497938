//! The scenario catalog.

use oralis_core::models::driver::DriverId;
use oralis_core::models::scenario::{DriverCriterion, Scenario};

use DriverId::*;

struct ScenarioBuilder(Scenario);

impl ScenarioBuilder {
    fn new(id: &str, name: &str, priority: u32) -> Self {
        Self(Scenario {
            id: id.to_string(),
            name: name.to_string(),
            priority,
            is_fallback: false,
            required: vec![],
            strong: vec![],
            supporting: vec![],
            excluding: vec![],
            preferred_tags: vec![],
            nuance_blocks: vec![],
            cost_blocks: vec![],
        })
    }

    fn fallback(mut self) -> Self {
        self.0.is_fallback = true;
        self
    }

    fn required(mut self, driver: DriverId, values: &[&str]) -> Self {
        self.0.required.push(DriverCriterion::new(driver, values.iter().copied()));
        self
    }

    fn strong(mut self, driver: DriverId, values: &[&str]) -> Self {
        self.0.strong.push(DriverCriterion::new(driver, values.iter().copied()));
        self
    }

    fn supporting(mut self, driver: DriverId, values: &[&str]) -> Self {
        self.0.supporting.push(DriverCriterion::new(driver, values.iter().copied()));
        self
    }

    fn excluding(mut self, driver: DriverId, values: &[&str]) -> Self {
        self.0.excluding.push(DriverCriterion::new(driver, values.iter().copied()));
        self
    }

    fn tags(mut self, tags: &[&str]) -> Self {
        self.0.preferred_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    fn nuance(mut self, blocks: &[&str]) -> Self {
        self.0.nuance_blocks = blocks.iter().map(|b| b.to_string()).collect();
        self
    }

    fn cost(mut self, blocks: &[&str]) -> Self {
        self.0.cost_blocks = blocks.iter().map(|b| b.to_string()).collect();
        self
    }

    fn build(self) -> Scenario {
        self.0
    }
}

pub fn standard_scenarios() -> Vec<Scenario> {
    vec![
        ScenarioBuilder::new("S00", "General orientation", 99)
            .fallback()
            .build(),
        ScenarioBuilder::new("S01", "Single gap, fixed replacement", 10)
            .required(MouthSituation, &["single_gap"])
            .strong(BudgetType, &["balanced", "premium"])
            .strong(MedicalConstraint, &["none"])
            .supporting(TimeHorizon, &["planned", "flexible"])
            .supporting(RiskProfile, &["standard"])
            .supporting(AestheticPriority, &["normal"])
            .excluding(ClinicalPriority, &["urgent"])
            .excluding(MedicalConstraint, &["contraindicated"])
            .tags(&["priority_durability", "concern_missing"])
            .nuance(&["N_S01_BONE_PRESERVATION"])
            .cost(&["C_S01_SINGLE_TOOTH"])
            .build(),
        ScenarioBuilder::new("S02", "Single visible gap, aesthetic focus", 20)
            .required(MouthSituation, &["single_gap"])
            .required(AestheticPriority, &["high"])
            .strong(ToothLocation, &["anterior"])
            .strong(BudgetType, &["balanced", "premium"])
            .supporting(AnxietyLevel, &["low", "moderate"])
            .supporting(TimeHorizon, &["planned", "immediate"])
            .excluding(ClinicalPriority, &["urgent"])
            .excluding(MedicalConstraint, &["contraindicated"])
            .tags(&["concern_aesthetics", "priority_aesthetics"])
            .nuance(&["N_S02_SMILE_LINE"])
            .cost(&["C_S02_AESTHETIC"])
            .build(),
        ScenarioBuilder::new("S03", "Several gaps, budget-conscious", 30)
            .required(MouthSituation, &["multiple_gaps"])
            .strong(BudgetType, &["economy"])
            .strong(ProsthesisStatus, &["removable", "none"])
            .supporting(TimeHorizon, &["planned", "flexible"])
            .supporting(MedicalConstraint, &["none", "caution"])
            .excluding(ClinicalPriority, &["urgent"])
            .excluding(MedicalConstraint, &["contraindicated"])
            .tags(&["priority_cost", "budget_minimal"])
            .nuance(&["N_S03_PHASED_APPROACH"])
            .cost(&["C_S03_PHASED"])
            .build(),
        ScenarioBuilder::new("S04", "Several gaps, fixed solution", 40)
            .required(MouthSituation, &["multiple_gaps"])
            .strong(BudgetType, &["balanced", "premium"])
            .strong(RiskProfile, &["standard"])
            .supporting(MedicalConstraint, &["none"])
            .supporting(ProsthesisStatus, &["fixed", "none"])
            .excluding(ClinicalPriority, &["urgent"])
            .excluding(MedicalConstraint, &["contraindicated"])
            .tags(&["priority_durability"])
            .nuance(&["N_S04_ABUTMENT_TEETH"])
            .cost(&["C_S04_FIXED_MULTIPLE"])
            .build(),
        ScenarioBuilder::new("S05", "Extensive tooth loss", 50)
            .required(MouthSituation, &["extensive_loss"])
            .strong(ProsthesisStatus, &["removable"])
            .strong(TimeHorizon, &["planned", "flexible"])
            .supporting(BudgetType, &["balanced", "premium"])
            .supporting(RiskProfile, &["standard"])
            .excluding(ClinicalPriority, &["urgent"])
            .excluding(MedicalConstraint, &["contraindicated"])
            .tags(&["concern_chewing", "concern_loose"])
            .nuance(&["N_S05_REMAINING_TEETH"])
            .cost(&["C_S05_EXTENSIVE"])
            .build(),
        ScenarioBuilder::new("S06", "No remaining teeth", 60)
            .required(MouthSituation, &["edentulous"])
            .strong(ProsthesisStatus, &["removable"])
            .strong(BudgetType, &["balanced", "premium"])
            .supporting(MedicalConstraint, &["none"])
            .supporting(AnxietyLevel, &["low", "moderate"])
            .excluding(ClinicalPriority, &["urgent"])
            .excluding(MedicalConstraint, &["contraindicated"])
            .tags(&["concern_chewing", "prosthesis_removable"])
            .nuance(&["N_S06_DENTURE_STABILITY"])
            .cost(&["C_S06_FULL_ARCH"])
            .build(),
        ScenarioBuilder::new("S07", "Acute complaints first", 5)
            .required(ClinicalPriority, &["urgent"])
            .strong(ClinicalPriority, &["urgent"])
            .strong(TimeHorizon, &["immediate"])
            .supporting(AnxietyLevel, &["high", "moderate"])
            .tags(&["swelling", "pain_severe", "concern_pain"])
            .nuance(&["N_S07_PAIN_FIRST"])
            .build(),
        ScenarioBuilder::new("S08", "Medical considerations first", 8)
            .required(MedicalConstraint, &["contraindicated", "caution"])
            .strong(MedicalConstraint, &["contraindicated"])
            .strong(RiskProfile, &["elevated"])
            .supporting(AnxietyLevel, &["high", "moderate"])
            .supporting(TimeHorizon, &["planned", "flexible"])
            .excluding(ClinicalPriority, &["urgent"])
            .tags(&[
                "health_bisphosphonates",
                "health_radiotherapy",
                "health_diabetes_uncontrolled",
            ])
            .nuance(&["N_S08_CONSULT_PHYSICIAN"])
            .cost(&["C_S08_MEDICAL"])
            .build(),
    ]
}
