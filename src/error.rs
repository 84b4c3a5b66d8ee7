use thiserror::Error;

/// Contract violations detected while building model inputs.
///
/// The model operations themselves are infallible; these errors are raised
/// by the validating constructors so that out-of-domain values never reach
/// [`compute_curve`](crate::model::compute_curve).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("source level {value} dB is outside [{min}, {max}] dB")]
    SourceLevelOutOfRange { value: f64, min: f64, max: f64 },
    #[error("target distance {value} m is outside [{min}, {max}] m")]
    TargetDistanceOutOfRange { value: f64, min: f64, max: f64 },
    #[error("attenuation for {device} must be finite and >= 0, got {value} dB")]
    InvalidAttenuation { device: String, value: f64 },
    #[error("invalid thresholds: audible {audible_db} dB must be finite and <= ceiling {ceiling_db} dB")]
    InvalidThresholds { audible_db: f64, ceiling_db: f64 },
    #[error("unknown device: {0}")]
    UnknownDevice(String),
}
