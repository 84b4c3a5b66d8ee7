//! Command-line surface of the runner: flags, scenario resolution and
//! flag overrides.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use noisefall::{ClassificationPolicy, DeviceId};
use tracing::info;

use crate::config::ScenarioConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    ThreeBand,
    TwoBand,
}

impl From<PolicyArg> for ClassificationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::ThreeBand => ClassificationPolicy::ThreeBand,
            PolicyArg::TwoBand => ClassificationPolicy::TwoBand,
        }
    }
}

fn parse_device(raw: &str) -> Result<DeviceId, String> {
    raw.parse().map_err(|e: noisefall::ModelError| e.to_string())
}

#[derive(Debug, Parser)]
#[command(name = "noisefall-scenario")]
#[command(about = "Noise decay with distance and mitigation devices, classified against audibility and regulatory thresholds")]
pub struct Cli {
    /// Scenario TOML file (defaults to configs/default.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Source level [dB], 35 to 100
    #[arg(long)]
    pub source_level_db: Option<f64>,

    /// Listener distance [m], 1 to 20 in 0.5 m steps
    #[arg(long)]
    pub distance_m: Option<f64>,

    /// Mitigation device; repeat for several (replaces the scenario's list)
    #[arg(long = "device", value_parser = parse_device)]
    pub devices: Vec<DeviceId>,

    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Output base directory; each run gets a timestamped subdirectory
    #[arg(long, default_value = "output-noisefall")]
    pub outdir: PathBuf,

    /// Skip the SVG chart
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

pub fn resolve_default_config_path() -> PathBuf {
    let local = PathBuf::from("configs").join("default.toml");
    if local.exists() {
        return local;
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join("default.toml")
}

/// Loads `explicit` when given; otherwise `default_path`, falling back to the
/// built-in scenario when that file does not exist.
///
/// A missing explicit file is an error.
pub fn load_config_from(explicit: Option<&Path>, default_path: &Path) -> Result<ScenarioConfig> {
    let path = match explicit {
        Some(path) => path,
        None if !default_path.exists() => {
            info!("no scenario file found, using built-in defaults");
            return Ok(ScenarioConfig::default());
        }
        None => default_path,
    };

    info!(path = %path.display(), "loading scenario");
    ScenarioConfig::from_toml_file(path)
}

impl Cli {
    pub fn load_config(&self) -> Result<ScenarioConfig> {
        load_config_from(self.config.as_deref(), &resolve_default_config_path())
    }

    /// Flags win over the scenario file. A non-empty `--device` list replaces
    /// the file's devices; without `--device` they are kept.
    pub fn apply_overrides(&self, cfg: &mut ScenarioConfig) {
        if let Some(v) = self.source_level_db {
            cfg.source_level_db = v;
        }
        if let Some(v) = self.distance_m {
            cfg.target_distance_m = v;
        }
        if !self.devices.is_empty() {
            cfg.devices = self.devices.clone();
        }
        if let Some(v) = self.policy {
            cfg.policy = v.into();
        }
    }
}
