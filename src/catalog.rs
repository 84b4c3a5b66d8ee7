//! Noise-mitigation devices and their attenuation values
//!
//! Each device contributes a fixed, additive dB reduction. The standard
//! catalog holds typical estimates; alternate catalogs can be built for
//! tests or site-specific overrides.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const DEVICE_COUNT: usize = 5;

/// Identifier of a discrete noise-mitigation measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceId {
    /// Placeholder entry meaning "no measure", always 0 dB in the standard catalog
    None,
    /// Sound-proofed housing around the source
    AcousticEnclosure,
    /// Free-standing acoustic screen
    AcousticScreen,
    /// Solid concrete wall
    ConcreteWall,
    /// Dense vegetation such as a hedge
    DenseHedge,
}

impl DeviceId {
    /// Every device, in catalog order.
    pub const ALL: [DeviceId; DEVICE_COUNT] = [
        DeviceId::None,
        DeviceId::AcousticEnclosure,
        DeviceId::AcousticScreen,
        DeviceId::ConcreteWall,
        DeviceId::DenseHedge,
    ];

    fn index(self) -> usize {
        match self {
            DeviceId::None => 0,
            DeviceId::AcousticEnclosure => 1,
            DeviceId::AcousticScreen => 2,
            DeviceId::ConcreteWall => 3,
            DeviceId::DenseHedge => 4,
        }
    }

    /// Stable identifier used in configs and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            DeviceId::None => "none",
            DeviceId::AcousticEnclosure => "acoustic-enclosure",
            DeviceId::AcousticScreen => "acoustic-screen",
            DeviceId::ConcreteWall => "concrete-wall",
            DeviceId::DenseHedge => "dense-hedge",
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            DeviceId::None => "None",
            DeviceId::AcousticEnclosure => "Acoustic enclosure",
            DeviceId::AcousticScreen => "Acoustic screen",
            DeviceId::ConcreteWall => "Concrete wall",
            DeviceId::DenseHedge => "Dense vegetation (hedge)",
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DeviceId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        DeviceId::ALL
            .into_iter()
            .find(|id| id.key() == wanted)
            .ok_or_else(|| ModelError::UnknownDevice(s.to_string()))
    }
}

/// Attenuation in dB for every [`DeviceId`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceCatalog {
    attenuation_db: [f64; DEVICE_COUNT],
}

impl DeviceCatalog {
    /// Typical attenuation estimates for each device.
    pub fn standard() -> Self {
        Self {
            attenuation_db: [0.0, 10.0, 20.0, 25.0, 10.0],
        }
    }

    /// Returns a copy of this catalog with one device's attenuation replaced.
    pub fn with_attenuation(mut self, device: DeviceId, attenuation_db: f64) -> Result<Self, ModelError> {
        if !attenuation_db.is_finite() || attenuation_db < 0.0 {
            return Err(ModelError::InvalidAttenuation {
                device: device.key().to_string(),
                value: attenuation_db,
            });
        }
        self.attenuation_db[device.index()] = attenuation_db;
        Ok(self)
    }

    pub fn attenuation_db(&self, device: DeviceId) -> f64 {
        self.attenuation_db[device.index()]
    }

    /// Combined attenuation of a device selection.
    ///
    /// Devices add independently; stacking order has no effect.
    pub fn device_attenuation_db(&self, devices: &BTreeSet<DeviceId>) -> f64 {
        devices.iter().map(|&id| self.attenuation_db(id)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeviceId, f64)> + '_ {
        DeviceId::ALL
            .into_iter()
            .map(move |id| (id, self.attenuation_db(id)))
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
