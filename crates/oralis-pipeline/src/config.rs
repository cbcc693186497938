use std::path::Path;

use oralis_engine::scenario::ScoringConfig;
use oralis_qa::QaConfig;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    pub scoring: ScoringConfig,
    pub qa: QaConfig,
    /// Upper bound for the optional advisory evaluation.
    pub advisory_timeout_ms: u64,
    /// Treat repository failures as fatal instead of as missing content.
    pub fail_on_repository_error: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            scoring: ScoringConfig::default(),
            qa: QaConfig::default(),
            advisory_timeout_ms: 5_000,
            fail_on_repository_error: false,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(contents: &str) -> Result<Self, PipelineError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

        let migrated = migrate(json, on_disk_version)?;
        let mut config: PipelineConfig = serde_json::from_value(migrated)?;
        config.config_version = CURRENT_VERSION;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("failed to read config at {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(
    mut json: serde_json::Value,
    from_version: u32,
) -> Result<serde_json::Value, PipelineError> {
    if from_version > CURRENT_VERSION {
        return Err(PipelineError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: advisory timeout moved from seconds to milliseconds
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| PipelineError::Config("config is not a JSON object".to_string()))?;
        if let Some(secs) = obj.remove("advisory_timeout_secs").and_then(|v| v.as_u64()) {
            obj.entry("advisory_timeout_ms")
                .or_insert(serde_json::Value::Number(secs.saturating_mul(1_000).into()));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (advisory timeout in milliseconds)");
    }

    Ok(json)
}
