use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use noisefall::params::TARGET_DISTANCE_STEP_M;
use noisefall::{ClassificationPolicy, DeviceCatalog, DeviceId, ScenarioParameters, Thresholds};
use serde::{Deserialize, Serialize};

use crate::output::OUTPUT_SCHEMA_VERSION;

/// Threshold section of a scenario file [dB].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    pub audible_db: f64,
    pub regulatory_ceiling_db: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        let t = Thresholds::default();
        Self {
            audible_db: t.audible_db(),
            regulatory_ceiling_db: t.regulatory_ceiling_db(),
        }
    }
}

/// Scenario file loaded by the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub schema_version: String,
    /// Source level [dB]
    pub source_level_db: f64,
    /// Listener distance [m], in 0.5 m steps
    pub target_distance_m: f64,
    pub devices: Vec<DeviceId>,
    pub policy: ClassificationPolicy,
    pub thresholds: ThresholdConfig,
    /// Attenuation overrides keyed by device id [dB]
    pub catalog: BTreeMap<String, f64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        let params = ScenarioParameters::default();
        Self {
            schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
            source_level_db: params.source_level_db(),
            target_distance_m: params.target_distance_m(),
            devices: Vec::new(),
            policy: ClassificationPolicy::default(),
            thresholds: ThresholdConfig::default(),
            catalog: BTreeMap::new(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file: {}", path.display()))?;
        let cfg: ScenarioConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse TOML scenario: {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_version != OUTPUT_SCHEMA_VERSION {
            bail!(
                "scenario schema_version {} does not match output schema {}",
                self.schema_version,
                OUTPUT_SCHEMA_VERSION
            );
        }

        let steps = self.target_distance_m / TARGET_DISTANCE_STEP_M;
        if steps.is_finite() && steps.fract() != 0.0 {
            bail!(
                "target_distance_m must be a multiple of {TARGET_DISTANCE_STEP_M} m, got {}",
                self.target_distance_m
            );
        }

        self.parameters()?;
        self.device_catalog()?;
        self.classification_thresholds()?;
        Ok(())
    }

    pub fn parameters(&self) -> Result<ScenarioParameters> {
        ScenarioParameters::new(
            self.source_level_db,
            self.target_distance_m,
            self.devices.iter().copied(),
        )
        .context("invalid scenario parameters")
    }

    /// Standard catalog with the configured overrides applied.
    pub fn device_catalog(&self) -> Result<DeviceCatalog> {
        let mut catalog = DeviceCatalog::standard();
        for (key, &attenuation_db) in &self.catalog {
            let device = key
                .parse::<DeviceId>()
                .with_context(|| format!("invalid [catalog] entry '{key}'"))?;
            catalog = catalog
                .with_attenuation(device, attenuation_db)
                .with_context(|| format!("invalid [catalog] entry '{key}'"))?;
        }
        Ok(catalog)
    }

    pub fn classification_thresholds(&self) -> Result<Thresholds> {
        Thresholds::new(
            self.thresholds.audible_db,
            self.thresholds.regulatory_ceiling_db,
        )
        .context("invalid [thresholds] section")
    }
}
