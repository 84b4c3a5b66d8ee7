use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use noisefall::model::distance_attenuation_db;
use noisefall::{ClassificationPolicy, ScenarioResult, Thresholds};
use plotters::prelude::*;
use serde::Serialize;

use crate::config::ScenarioConfig;
use crate::presenter::Report;

pub const OUTPUT_SCHEMA_VERSION: &str = "1.0.0";

pub const CURVE_FILE: &str = "curve.csv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const PLOT_FILE: &str = "decay_curve.svg";

#[derive(Debug, Clone, Serialize)]
pub struct CurveRow {
    pub distance_m: f64,
    pub level_db: f64,
    pub distance_attenuation_db: f64,
    pub total_attenuation_db: f64,
}

impl CurveRow {
    pub fn rows(result: &ScenarioResult) -> Vec<CurveRow> {
        result
            .curve
            .samples()
            .iter()
            .map(|s| {
                let spreading = distance_attenuation_db(s.distance_m);
                CurveRow {
                    distance_m: s.distance_m,
                    level_db: s.level_db,
                    distance_attenuation_db: spreading,
                    total_attenuation_db: spreading + result.device_attenuation_db,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputFiles {
    pub output_dir: PathBuf,
    pub curve_path: PathBuf,
    pub summary_path: PathBuf,
    pub manifest_path: PathBuf,
    pub plot_path: Option<PathBuf>,
}

impl OutputFiles {
    pub fn in_dir(output_dir: &Path, with_plot: bool) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            curve_path: output_dir.join(CURVE_FILE),
            summary_path: output_dir.join(SUMMARY_FILE),
            manifest_path: output_dir.join(MANIFEST_FILE),
            plot_path: with_plot.then(|| output_dir.join(PLOT_FILE)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub schema_version: String,
    pub config: ScenarioConfig,
    pub report: Report,
    pub outputs: OutputFiles,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub schema_version: String,
    pub generated_at: String,
    pub files: Vec<String>,
    pub note: String,
}

pub fn ensure_outdir(outdir: &Path) -> Result<()> {
    fs::create_dir_all(outdir)
        .with_context(|| format!("failed to create output directory: {}", outdir.display()))
}

/// Creates `<base>/<UTC timestamp>`, suffixing a counter if it already exists.
pub fn create_timestamped_run_dir(base_outdir: &Path) -> Result<PathBuf> {
    ensure_outdir(base_outdir)?;

    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let mut run_dir = base_outdir.join(&timestamp);
    let mut counter = 1_u32;

    while run_dir.exists() {
        run_dir = base_outdir.join(format!("{timestamp}-{counter:02}"));
        counter += 1;
    }

    ensure_outdir(&run_dir)?;
    Ok(run_dir)
}

pub fn write_curve_csv(path: &Path, rows: &[CurveRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open curve CSV for writing: {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    let payload = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    fs::write(path, payload)
        .with_context(|| format!("failed to write summary: {}", path.display()))?;
    Ok(())
}

pub fn write_manifest_json(path: &Path, manifest: &Manifest) -> Result<()> {
    let payload = serde_json::to_string_pretty(manifest).context("failed to serialize manifest")?;
    fs::write(path, payload)
        .with_context(|| format!("failed to write manifest: {}", path.display()))?;
    Ok(())
}

const CEILING_COLOR: RGBColor = RGBColor(200, 30, 30);
const AUDIBLE_COLOR: RGBColor = RGBColor(30, 140, 60);

/// Horizontal dashed reference line across `[0, x_max]`.
fn threshold_line(
    y: f64,
    x_max: f64,
    color: RGBColor,
) -> DashedLineSeries<std::vec::IntoIter<(f64, f64)>, u32> {
    DashedLineSeries::new(vec![(0.0, y), (x_max, y)], 10, 6, color.stroke_width(2))
}

/// Decay curve with the regulatory ceiling and, under the three-band policy,
/// the audibility threshold.
pub fn plot_decay_curve(
    path: &Path,
    result: &ScenarioResult,
    thresholds: &Thresholds,
    policy: ClassificationPolicy,
) -> Result<()> {
    let root = SVGBackend::new(path, (1280, 720)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = result
        .curve
        .samples()
        .last()
        .map(|s| s.distance_m)
        .unwrap_or(20.0);
    let y_max = (result.source_level_db + 5.0).max(result.curve.peak_level_db());

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Sound level attenuation with distance",
            ("sans-serif", 30).into_font(),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Distance [m]")
        .y_desc("Sound level [dB]")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            result
                .curve
                .samples()
                .iter()
                .map(|s| (s.distance_m, s.level_db)),
            BLUE.stroke_width(2),
        ))?
        .label("Sound level (dB)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 25, y)], BLUE.stroke_width(3)));

    let ceiling = thresholds.regulatory_ceiling_db();
    chart
        .draw_series(threshold_line(ceiling, x_max, CEILING_COLOR))?
        .label(format!("Regulatory ceiling ({ceiling} dB)"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 25, y)], CEILING_COLOR.stroke_width(3)));

    if policy == ClassificationPolicy::ThreeBand {
        let audible = thresholds.audible_db();
        chart
            .draw_series(threshold_line(audible, x_max, AUDIBLE_COLOR))?
            .label(format!("Audible level ({audible} dB)"))
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 25, y)], AUDIBLE_COLOR.stroke_width(3))
            });
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
