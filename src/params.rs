//! Scenario parameters
//!
//! Inputs of one model evaluation: source level, listener distance and the
//! selected mitigation devices.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::DeviceId;
use crate::error::ModelError;

/// Lowest accepted source level [dB]
pub const SOURCE_LEVEL_MIN_DB: f64 = 35.0;
/// Highest accepted source level [dB]
pub const SOURCE_LEVEL_MAX_DB: f64 = 100.0;
/// Closest accepted listener distance [m]
pub const TARGET_DISTANCE_MIN_M: f64 = 1.0;
/// Farthest accepted listener distance [m]
pub const TARGET_DISTANCE_MAX_M: f64 = 20.0;
/// Input step for the listener distance [m]
pub const TARGET_DISTANCE_STEP_M: f64 = 0.5;

/// Validated parameters for one scenario evaluation.
///
/// Fields are private so that every value reaching the model has passed
/// [`ScenarioParameters::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioParameters {
    source_level_db: f64,
    target_distance_m: f64,
    selected_devices: BTreeSet<DeviceId>,
}

impl ScenarioParameters {
    /// Create scenario parameters, rejecting values outside the model domain.
    ///
    /// # Errors
    /// [`ModelError::SourceLevelOutOfRange`] or
    /// [`ModelError::TargetDistanceOutOfRange`] when a value is non-finite or
    /// outside its documented range.
    pub fn new(
        source_level_db: f64,
        target_distance_m: f64,
        selected_devices: impl IntoIterator<Item = DeviceId>,
    ) -> Result<Self, ModelError> {
        if !(SOURCE_LEVEL_MIN_DB..=SOURCE_LEVEL_MAX_DB).contains(&source_level_db) {
            return Err(ModelError::SourceLevelOutOfRange {
                value: source_level_db,
                min: SOURCE_LEVEL_MIN_DB,
                max: SOURCE_LEVEL_MAX_DB,
            });
        }
        if !(TARGET_DISTANCE_MIN_M..=TARGET_DISTANCE_MAX_M).contains(&target_distance_m) {
            return Err(ModelError::TargetDistanceOutOfRange {
                value: target_distance_m,
                min: TARGET_DISTANCE_MIN_M,
                max: TARGET_DISTANCE_MAX_M,
            });
        }

        Ok(Self {
            source_level_db,
            target_distance_m,
            selected_devices: selected_devices.into_iter().collect(),
        })
    }

    pub fn source_level_db(&self) -> f64 {
        self.source_level_db
    }

    pub fn target_distance_m(&self) -> f64 {
        self.target_distance_m
    }

    pub fn selected_devices(&self) -> &BTreeSet<DeviceId> {
        &self.selected_devices
    }

    /// Same scenario with one more device selected.
    pub fn with_device(&self, device: DeviceId) -> Self {
        let mut next = self.clone();
        next.selected_devices.insert(device);
        next
    }
}

impl Default for ScenarioParameters {
    /// 60 dB source heard at 10 m with no mitigation.
    fn default() -> Self {
        Self {
            source_level_db: 60.0,
            target_distance_m: 10.0,
            selected_devices: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_domain_bounds() {
        assert!(ScenarioParameters::new(35.0, 1.0, []).is_ok());
        assert!(ScenarioParameters::new(100.0, 20.0, []).is_ok());
    }

    #[test]
    fn rejects_out_of_domain() {
        assert!(matches!(
            ScenarioParameters::new(34.9, 10.0, []),
            Err(ModelError::SourceLevelOutOfRange { .. })
        ));
        assert!(matches!(
            ScenarioParameters::new(60.0, 0.5, []),
            Err(ModelError::TargetDistanceOutOfRange { .. })
        ));
        assert!(matches!(
            ScenarioParameters::new(60.0, 20.5, []),
            Err(ModelError::TargetDistanceOutOfRange { .. })
        ));
        assert!(ScenarioParameters::new(f64::NAN, 10.0, []).is_err());
        assert!(ScenarioParameters::new(60.0, f64::INFINITY, []).is_err());
    }

    #[test]
    fn duplicate_devices_collapse() {
        let params = ScenarioParameters::new(
            60.0,
            10.0,
            [DeviceId::ConcreteWall, DeviceId::ConcreteWall],
        )
        .unwrap();
        assert_eq!(params.selected_devices().len(), 1);
    }

    #[test]
    fn with_device_leaves_original_untouched() {
        let base = ScenarioParameters::default();
        let walled = base.with_device(DeviceId::ConcreteWall);
        assert!(base.selected_devices().is_empty());
        assert!(walled.selected_devices().contains(&DeviceId::ConcreteWall));
    }
}
