use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A report section number in the fixed 0–11 range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[serde(try_from = "u8")]
#[ts(export)]
pub struct SectionId(u8);

impl SectionId {
    pub const INTRODUCTION: SectionId = SectionId(0);
    pub const ATTENTION: SectionId = SectionId(1);
    pub const PERSONAL_SUMMARY: SectionId = SectionId(2);
    pub const SITUATION: SectionId = SectionId(3);
    pub const INTERPRETATION: SectionId = SectionId(4);
    pub const OPTIONS: SectionId = SectionId(5);
    pub const COMPARISON: SectionId = SectionId(6);
    pub const COSTS: SectionId = SectionId(7);
    pub const PROCESS: SectionId = SectionId(8);
    pub const RISKS: SectionId = SectionId(9);
    pub const NEXT_STEPS: SectionId = SectionId(10);
    pub const DISCLAIMER: SectionId = SectionId(11);

    pub const COUNT: u8 = 12;

    pub fn new(number: u8) -> Result<Self, CoreError> {
        if number < Self::COUNT {
            Ok(SectionId(number))
        } else {
            Err(CoreError::InvalidSection(number))
        }
    }

    /// Every section in ascending order.
    pub fn all() -> impl Iterator<Item = SectionId> {
        (0..Self::COUNT).map(SectionId)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "Introduction",
            1 => "Points of attention",
            2 => "Personal summary",
            3 => "Your situation",
            4 => "What this means",
            5 => "Treatment options",
            6 => "Comparison",
            7 => "Costs",
            8 => "Treatment process",
            9 => "Risks",
            10 => "Next steps",
            11 => "Disclaimer",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for SectionId {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SectionId::new(value)
    }
}
