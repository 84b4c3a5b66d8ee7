//! noisefall - free-field noise decay model
//!
//! Computes how the level of a fixed noise source falls off with distance
//! under the inverse-square law and additive mitigation devices, and
//! classifies the result against audibility and regulatory thresholds.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod model;
pub mod params;

// Re-export main types
pub use catalog::{DeviceCatalog, DeviceId};
pub use classify::{classify, Band, ClassificationPolicy, Thresholds};
pub use error::ModelError;
pub use model::{compute_curve, CurveSample, DecayCurve, ScenarioResult};
pub use params::ScenarioParameters;
