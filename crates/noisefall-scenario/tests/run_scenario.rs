use std::fs;

use noisefall::{Band, ClassificationPolicy, DeviceId};
use noisefall_scenario::config::ScenarioConfig;
use noisefall_scenario::output::OUTPUT_SCHEMA_VERSION;
use noisefall_scenario::run_scenario;

#[test]
fn bundled_default_scenario_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("configs")
        .join("default.toml");
    let cfg = ScenarioConfig::from_toml_file(&path).unwrap();
    assert_eq!(cfg, ScenarioConfig::default());
}

#[test]
fn scenario_file_round_trip_through_runner() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("walled.toml");
    fs::write(
        &scenario,
        format!(
            r#"
schema_version = "{OUTPUT_SCHEMA_VERSION}"
source_level_db = 60.0
target_distance_m = 10.0
devices = ["concrete-wall"]
"#
        ),
    )
    .unwrap();

    let cfg = ScenarioConfig::from_toml_file(&scenario).unwrap();
    let summary = run_scenario(&cfg, &dir.path().join("out"), false).unwrap();

    assert_eq!(summary.report.band, Band::BelowAudible);
    assert_eq!(summary.report.level_at_target_db, 15.0);
    assert_eq!(summary.report.devices, vec![DeviceId::ConcreteWall]);
    assert!(summary.outputs.plot_path.is_none());
    assert!(summary.outputs.output_dir.starts_with(dir.path().join("out")));
}

#[test]
fn runner_writes_curve_summary_manifest_and_chart() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScenarioConfig::default();
    let summary = run_scenario(&cfg, dir.path(), true).unwrap();
    let outputs = &summary.outputs;

    let curve = fs::read_to_string(&outputs.curve_path).unwrap();
    let mut lines = curve.lines();
    assert_eq!(
        lines.next(),
        Some("distance_m,level_db,distance_attenuation_db,total_attenuation_db")
    );
    assert_eq!(lines.count(), 200);

    let summary_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outputs.summary_path).unwrap()).unwrap();
    assert_eq!(summary_json["schema_version"], OUTPUT_SCHEMA_VERSION);
    assert_eq!(summary_json["report"]["band"], "exceeds");
    assert_eq!(summary_json["report"]["level_at_target_db"], 40.0);
    assert_eq!(summary_json["config"]["policy"], "three-band");

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outputs.manifest_path).unwrap()).unwrap();
    let files: Vec<&str> = manifest["files"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(files, vec!["curve.csv", "summary.json", "decay_curve.svg"]);

    let plot_path = outputs.plot_path.as_ref().unwrap();
    let svg = fs::read_to_string(plot_path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Regulatory ceiling (30 dB)"));
    assert!(svg.contains("Audible level (20 dB)"));
}

#[test]
fn repeated_runs_get_distinct_directories() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScenarioConfig::default();
    let first = run_scenario(&cfg, dir.path(), false).unwrap();
    let second = run_scenario(&cfg, dir.path(), false).unwrap();
    assert_ne!(first.outputs.output_dir, second.outputs.output_dir);
    assert_eq!(first.report, second.report);
}

#[test]
fn two_band_policy_reports_compliance_instead_of_inaudibility() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScenarioConfig {
        devices: vec![DeviceId::ConcreteWall],
        policy: ClassificationPolicy::TwoBand,
        ..Default::default()
    };
    let summary = run_scenario(&cfg, dir.path(), true).unwrap();
    assert_eq!(summary.report.band, Band::Compliant);

    let svg = fs::read_to_string(summary.outputs.plot_path.as_ref().unwrap()).unwrap();
    assert!(svg.contains("Regulatory ceiling (30 dB)"));
    assert!(!svg.contains("Audible level"));
}

#[test]
fn summary_keeps_full_precision_levels() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScenarioConfig {
        source_level_db: 70.0,
        target_distance_m: 7.5,
        ..Default::default()
    };
    let summary = run_scenario(&cfg, dir.path(), false).unwrap();
    let expected = 70.0 - 20.0 * 7.5_f64.log10();

    let summary_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary.outputs.summary_path).unwrap())
            .unwrap();
    let level = summary_json["report"]["level_at_target_db"].as_f64().unwrap();
    assert!((level - expected).abs() < 1e-9);
    assert!(summary.report.to_string().contains("Level at 7.5 m:       52.5 dB"));
}

#[test]
fn invalid_scenario_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ScenarioConfig {
        source_level_db: 120.0,
        ..Default::default()
    };
    assert!(run_scenario(&cfg, &dir.path().join("out"), true).is_err());
    assert!(!dir.path().join("out").exists());
}

#[test]
fn schema_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("old.toml");
    fs::write(&scenario, "schema_version = \"0.9.0\"\n").unwrap();
    let err = ScenarioConfig::from_toml_file(&scenario).unwrap_err();
    assert!(err.to_string().contains("schema_version"));
}
