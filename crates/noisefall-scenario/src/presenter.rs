//! Console presentation of a scenario result.

use std::fmt;

use noisefall::{
    Band, ClassificationPolicy, DeviceId, ScenarioParameters, ScenarioResult, Thresholds,
};
use serde::Serialize;

/// Rounds to one decimal, the precision shown to users.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One evaluated scenario. Levels keep full precision; `Display` rounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub source_level_db: f64,
    pub target_distance_m: f64,
    pub distance_attenuation_db: f64,
    pub device_attenuation_db: f64,
    pub total_attenuation_db: f64,
    pub level_at_target_db: f64,
    pub devices: Vec<DeviceId>,
    pub policy: ClassificationPolicy,
    pub thresholds: Thresholds,
    pub band: Band,
    pub verdict: String,
    /// Distance from which the level stays within the regulatory ceiling [m]
    pub compliant_from_m: Option<f64>,
}

impl Report {
    pub fn new(
        params: &ScenarioParameters,
        result: &ScenarioResult,
        thresholds: Thresholds,
        policy: ClassificationPolicy,
    ) -> Self {
        let band = thresholds.classify(result.level_at_target_db, policy);
        Self {
            source_level_db: result.source_level_db,
            target_distance_m: result.target_sample_m,
            distance_attenuation_db: result.distance_attenuation_db,
            device_attenuation_db: result.device_attenuation_db,
            total_attenuation_db: result.total_attenuation_db,
            level_at_target_db: result.level_at_target_db,
            devices: params.selected_devices().iter().copied().collect(),
            policy,
            thresholds,
            band,
            verdict: verdict_message(result.level_at_target_db, band, &thresholds, policy),
            compliant_from_m: result
                .curve
                .first_distance_at_or_below(thresholds.regulatory_ceiling_db()),
        }
    }

    /// Selected devices as a comma-separated label list, "None" when empty.
    pub fn device_labels(&self) -> String {
        if self.devices.is_empty() {
            return DeviceId::None.label().to_string();
        }
        self.devices
            .iter()
            .map(|d| d.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn verdict_message(
    level_db: f64,
    band: Band,
    thresholds: &Thresholds,
    policy: ClassificationPolicy,
) -> String {
    let level = round1(level_db);
    let audible = thresholds.audible_db();
    let ceiling = thresholds.regulatory_ceiling_db();
    match (band, policy) {
        (Band::BelowAudible, _) => {
            format!("Final level ({level:.1} dB) is below the audible level of {audible} dB.")
        }
        (Band::Compliant, ClassificationPolicy::ThreeBand) => format!(
            "Final level ({level:.1} dB) is at or above the audible level of {audible} dB, \
             but within the regulatory ceiling of {ceiling} dB."
        ),
        (Band::Compliant, ClassificationPolicy::TwoBand) => {
            format!("Final level ({level:.1} dB) complies with the regulatory ceiling of {ceiling} dB.")
        }
        (Band::Exceeds, _) => {
            format!("Final level ({level:.1} dB) exceeds the regulatory ceiling of {ceiling} dB.")
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.band.is_compliant() { "OK" } else { "FAIL" };

        writeln!(f, "SIMULATION RESULTS")?;
        writeln!(f, "==================")?;
        let target_label = format!("Level at {:.1} m:", self.target_distance_m);
        writeln!(f, "  {:<22}{:.1} dB", "Initial level:", self.source_level_db)?;
        writeln!(f, "  {:<22}{:.1} dB", "Total attenuation:", self.total_attenuation_db)?;
        writeln!(f, "  {:<22}{:.1} dB", target_label, self.level_at_target_db)?;
        writeln!(f)?;
        writeln!(f, "[{mark}] {}", self.verdict)?;
        match self.compliant_from_m {
            Some(d) => writeln!(
                f,
                "  Within the {} dB ceiling from {d:.1} m onwards.",
                self.thresholds.regulatory_ceiling_db()
            )?,
            None => writeln!(
                f,
                "  Above the {} dB ceiling across the whole 20 m range.",
                self.thresholds.regulatory_ceiling_db()
            )?,
        }
        writeln!(f)?;
        writeln!(f, "Technical details:")?;
        writeln!(f, "  Distance attenuation: {:.1} dB", self.distance_attenuation_db)?;
        writeln!(f, "  Device attenuation:   {:.1} dB", self.device_attenuation_db)?;
        write!(f, "  Selected devices:     {}", self.device_labels())
    }
}
