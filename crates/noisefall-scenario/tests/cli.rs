use std::fs;
use std::path::Path;

use clap::Parser;
use noisefall::{Band, ClassificationPolicy, DeviceId};
use noisefall_scenario::cli::{load_config_from, Cli};
use noisefall_scenario::config::ScenarioConfig;
use noisefall_scenario::output::OUTPUT_SCHEMA_VERSION;
use noisefall_scenario::run_scenario;

fn write_scenario(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("hedged.toml");
    fs::write(
        &path,
        format!(
            r#"
schema_version = "{OUTPUT_SCHEMA_VERSION}"
source_level_db = 80.0
target_distance_m = 4.0
devices = ["dense-hedge", "acoustic-enclosure"]
policy = "two-band"
"#
        ),
    )
    .unwrap();
    path
}

fn configured(args: &[&str]) -> ScenarioConfig {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut cfg = cli.load_config().unwrap();
    cli.apply_overrides(&mut cfg);
    cfg
}

#[test]
fn flags_override_scenario_file() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write_scenario(dir.path());
    let scenario = scenario.to_str().unwrap();

    let cfg = configured(&[
        "noisefall-scenario",
        "--config",
        scenario,
        "--source-level-db",
        "60",
        "--distance-m",
        "10",
        "--policy",
        "three-band",
    ]);
    assert_eq!(cfg.source_level_db, 60.0);
    assert_eq!(cfg.target_distance_m, 10.0);
    assert_eq!(cfg.policy, ClassificationPolicy::ThreeBand);
    // no --device: the file's list stays
    assert_eq!(
        cfg.devices,
        vec![DeviceId::DenseHedge, DeviceId::AcousticEnclosure]
    );
}

#[test]
fn device_flags_replace_file_devices() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write_scenario(dir.path());

    let cfg = configured(&[
        "noisefall-scenario",
        "--config",
        scenario.to_str().unwrap(),
        "--device",
        "concrete-wall",
        "--device",
        "acoustic_screen",
    ]);
    assert_eq!(
        cfg.devices,
        vec![DeviceId::ConcreteWall, DeviceId::AcousticScreen]
    );
    assert_eq!(cfg.source_level_db, 80.0);
    assert_eq!(cfg.policy, ClassificationPolicy::TwoBand);
}

#[test]
fn file_values_survive_without_flags() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = write_scenario(dir.path());

    let cfg = configured(&["noisefall-scenario", "--config", scenario.to_str().unwrap()]);
    assert_eq!(cfg, ScenarioConfig::from_toml_file(&scenario).unwrap());
}

#[test]
fn missing_default_file_falls_back_to_built_in_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(None, &dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg, ScenarioConfig::default());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("absent.toml");
    assert!(load_config_from(Some(&absent), &absent).is_err());
}

#[test]
fn unknown_device_flag_is_rejected() {
    let parsed = Cli::try_parse_from(["noisefall-scenario", "--device", "moat"]);
    assert!(parsed.is_err());
}

#[test]
fn walled_scenario_from_flags() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = ScenarioConfig::default();
    let cli = Cli::try_parse_from([
        "noisefall-scenario",
        "--source-level-db",
        "60",
        "--distance-m",
        "10",
        "--device",
        "concrete-wall",
    ])
    .unwrap();
    cli.apply_overrides(&mut cfg);

    let summary = run_scenario(&cfg, dir.path(), false).unwrap();
    assert_eq!(summary.report.level_at_target_db, 15.0);
    assert_eq!(summary.report.band, Band::BelowAudible);
    assert!(summary
        .report
        .to_string()
        .contains("Within the 30 dB ceiling from 1.8 m onwards."));
}

#[test]
fn off_step_distance_flag_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = ScenarioConfig::default();
    let cli = Cli::try_parse_from(["noisefall-scenario", "--distance-m", "7.3"]).unwrap();
    cli.apply_overrides(&mut cfg);

    let err = run_scenario(&cfg, &dir.path().join("out"), false).unwrap_err();
    assert!(err.to_string().contains("multiple of 0.5 m"));
    assert!(!dir.path().join("out").exists());
}
