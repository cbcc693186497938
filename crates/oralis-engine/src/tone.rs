use std::collections::BTreeMap;

use oralis_core::models::driver::{DriverId, DriverState};
use oralis_core::models::selection::Tone;
use tracing::warn;

/// Metadata key that overrides the derived tone.
pub const TONE_OVERRIDE_KEY: &str = "tone";

/// Derive the report tone from the driver state. Urgency wins over
/// anxiety; everything else reads neutral. A valid `tone` metadata entry
/// overrides the derivation.
pub fn resolve_tone(drivers: &DriverState, metadata: &BTreeMap<String, String>) -> Tone {
    if let Some(raw) = metadata.get(TONE_OVERRIDE_KEY) {
        match raw.parse::<Tone>() {
            Ok(tone) => return tone,
            Err(e) => warn!(error = %e, "ignoring tone override"),
        }
    }

    if drivers.is(DriverId::ClinicalPriority, "urgent") {
        Tone::Direct
    } else if drivers.is(DriverId::AnxietyLevel, "high") {
        Tone::Empathic
    } else {
        Tone::Neutral
    }
}
