//! Attenuation model
//!
//! Level at distance `d` from a point source in free field, with additive
//! device attenuation:
//!
//! ```text
//! A_dist(d) = 20 * log10(d)          (0 dB at the 1 m reference)
//! A_dev     = sum of selected device attenuations
//! L(d)      = max(L_source - A_dist(d) - A_dev, 0)
//! ```
//!
//! Below 1 m `A_dist` is negative, so `L(d)` can exceed the source level.
//! That near-field behaviour is part of the model and is not corrected.

use serde::Serialize;

use crate::catalog::DeviceCatalog;
use crate::params::ScenarioParameters;

/// Number of samples in a decay curve
pub const SAMPLE_COUNT: usize = 200;
/// Samples per metre; the curve step is `1 / SAMPLES_PER_METRE` m
pub const SAMPLES_PER_METRE: u32 = 10;

/// Distance of the `step`-th sample [m].
///
/// Built from the integer step count so that no rounding accumulates along
/// the curve.
pub fn sample_distance_m(step: u32) -> f64 {
    f64::from(step) / f64::from(SAMPLES_PER_METRE)
}

/// Sampled distance domain: 0.1 m to 20.0 m inclusive.
pub fn distance_grid() -> impl Iterator<Item = f64> {
    (1..=SAMPLE_COUNT as u32).map(sample_distance_m)
}

/// Geometric spreading loss relative to 1 m [dB].
pub fn distance_attenuation_db(distance_m: f64) -> f64 {
    20.0 * distance_m.log10()
}

/// One point of a decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveSample {
    pub distance_m: f64,
    pub level_db: f64,
}

/// Level as a function of distance, strictly increasing in distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecayCurve {
    samples: Vec<CurveSample>,
}

impl DecayCurve {
    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample closest to `distance_m`.
    ///
    /// Linear nearest-neighbour search; on an exact tie the nearer-to-source
    /// sample wins. Returns `None` only for an empty curve.
    pub fn sample_nearest(&self, distance_m: f64) -> Option<CurveSample> {
        self.samples
            .iter()
            .copied()
            .min_by(|a, b| {
                (a.distance_m - distance_m)
                    .abs()
                    .total_cmp(&(b.distance_m - distance_m).abs())
            })
    }

    /// First distance, at or beyond 1 m, from which every later sample is at
    /// or below `level_db`.
    ///
    /// Samples inside 1 m are skipped because the near-field rise makes them
    /// unrepresentative of a listener position.
    pub fn first_distance_at_or_below(&self, level_db: f64) -> Option<f64> {
        let far_field = self
            .samples
            .iter()
            .position(|s| s.distance_m >= 1.0)?;
        let tail = &self.samples[far_field..];

        let last_above = tail.iter().rposition(|s| s.level_db > level_db);
        match last_above {
            None => tail.first().map(|s| s.distance_m),
            Some(idx) => tail.get(idx + 1).map(|s| s.distance_m),
        }
    }

    /// Highest sampled level [dB].
    pub fn peak_level_db(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.level_db)
            .fold(0.0_f64, f64::max)
    }
}

/// Outcome of one scenario evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    /// Source level used for the evaluation [dB]
    pub source_level_db: f64,
    /// Curve distance selected for the point estimate [m]
    pub target_sample_m: f64,
    /// Spreading loss at the selected distance [dB]
    pub distance_attenuation_db: f64,
    /// Combined attenuation of the selected devices [dB]
    pub device_attenuation_db: f64,
    /// Spreading loss plus device attenuation at the selected distance [dB]
    pub total_attenuation_db: f64,
    /// Level heard at the selected distance [dB]
    pub level_at_target_db: f64,
    pub curve: DecayCurve,
}

fn level_db(source_level_db: f64, total_attenuation_db: f64) -> f64 {
    (source_level_db - total_attenuation_db).max(0.0)
}

/// Evaluate a scenario over the full distance grid.
///
/// Pure and deterministic: identical inputs always produce bit-identical
/// results.
pub fn compute_curve(params: &ScenarioParameters, catalog: &DeviceCatalog) -> ScenarioResult {
    let source = params.source_level_db();
    let device_attenuation_db = catalog.device_attenuation_db(params.selected_devices());

    let samples = distance_grid()
        .map(|distance_m| CurveSample {
            distance_m,
            level_db: level_db(
                source,
                distance_attenuation_db(distance_m) + device_attenuation_db,
            ),
        })
        .collect();
    let curve = DecayCurve { samples };

    // The target lies inside [1, 20], so its nearest sample is the grid
    // point at the rounded step.
    let target = (params.target_distance_m() * f64::from(SAMPLES_PER_METRE)).round()
        / f64::from(SAMPLES_PER_METRE);
    let selected = curve
        .sample_nearest(target)
        .expect("decay curve always holds SAMPLE_COUNT samples");

    let distance_attenuation = distance_attenuation_db(selected.distance_m);

    ScenarioResult {
        source_level_db: source,
        target_sample_m: selected.distance_m,
        distance_attenuation_db: distance_attenuation,
        device_attenuation_db,
        total_attenuation_db: distance_attenuation + device_attenuation_db,
        level_at_target_db: selected.level_db,
        curve,
    }
}
