//! Scenario runner for the `noisefall` decay model.
//!
//! Loads a scenario, evaluates it, classifies the level heard at the
//! listener, and writes the curve, summary and chart of the run.

pub mod cli;
pub mod config;
pub mod output;
pub mod presenter;

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use noisefall::compute_curve;
use tracing::{debug, info};

use crate::config::ScenarioConfig;
use crate::output::{
    create_timestamped_run_dir, plot_decay_curve, write_curve_csv, write_manifest_json,
    write_summary_json, CurveRow, Manifest, OutputFiles, Summary, OUTPUT_SCHEMA_VERSION,
};
use crate::presenter::Report;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: Report,
    pub outputs: OutputFiles,
}

/// Evaluate `cfg` and write its artifacts into a fresh run directory under
/// `base_outdir`.
pub fn run_scenario(cfg: &ScenarioConfig, base_outdir: &Path, with_plot: bool) -> Result<RunSummary> {
    cfg.validate()?;
    let params = cfg.parameters()?;
    let catalog = cfg.device_catalog()?;
    let thresholds = cfg.classification_thresholds()?;

    let result = compute_curve(&params, &catalog);
    let report = Report::new(&params, &result, thresholds, cfg.policy);
    debug!(
        distance_attenuation_db = result.distance_attenuation_db,
        device_attenuation_db = result.device_attenuation_db,
        samples = result.curve.len(),
        "evaluated scenario"
    );
    info!(
        level_db = report.level_at_target_db,
        distance_m = report.target_distance_m,
        band = %report.band,
        "classified level at listener"
    );

    let run_dir = create_timestamped_run_dir(base_outdir)?;
    let outputs = OutputFiles::in_dir(&run_dir, with_plot);

    write_curve_csv(&outputs.curve_path, &CurveRow::rows(&result))?;
    if let Some(plot_path) = &outputs.plot_path {
        plot_decay_curve(plot_path, &result, &thresholds, cfg.policy)?;
    }
    write_summary_json(
        &outputs.summary_path,
        &Summary {
            schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
            config: cfg.clone(),
            report: report.clone(),
            outputs: outputs.clone(),
        },
    )?;

    let mut files = vec![output::CURVE_FILE.to_string(), output::SUMMARY_FILE.to_string()];
    if outputs.plot_path.is_some() {
        files.push(output::PLOT_FILE.to_string());
    }
    write_manifest_json(
        &outputs.manifest_path,
        &Manifest {
            schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            files,
            note: "Free-field decay with additive device attenuation".to_string(),
        },
    )?;
    info!(run_dir = %run_dir.display(), "wrote run artifacts");

    Ok(RunSummary { report, outputs })
}
