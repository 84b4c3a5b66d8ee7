//! Threshold classification of a computed level

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Below this level sound is treated as inaudible [dB]
pub const AUDIBLE_DB: f64 = 20.0;
/// Above this level the scenario is non-compliant [dB]
pub const REGULATORY_CEILING_DB: f64 = 30.0;

/// Classification band of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Band {
    BelowAudible,
    Compliant,
    Exceeds,
}

impl Band {
    pub fn is_compliant(self) -> bool {
        !matches!(self, Band::Exceeds)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Band::BelowAudible => "below-audible",
            Band::Compliant => "compliant",
            Band::Exceeds => "exceeds",
        };
        f.write_str(name)
    }
}

/// How many bands a presenter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationPolicy {
    /// Inaudible / compliant / exceeds
    #[default]
    ThreeBand,
    /// Compliant / exceeds only; no audibility band
    TwoBand,
}

/// Audibility and regulatory thresholds [dB].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    audible_db: f64,
    regulatory_ceiling_db: f64,
}

impl Thresholds {
    pub fn new(audible_db: f64, regulatory_ceiling_db: f64) -> Result<Self, ModelError> {
        if !audible_db.is_finite()
            || !regulatory_ceiling_db.is_finite()
            || audible_db > regulatory_ceiling_db
        {
            return Err(ModelError::InvalidThresholds {
                audible_db,
                ceiling_db: regulatory_ceiling_db,
            });
        }
        Ok(Self {
            audible_db,
            regulatory_ceiling_db,
        })
    }

    pub fn audible_db(&self) -> f64 {
        self.audible_db
    }

    pub fn regulatory_ceiling_db(&self) -> f64 {
        self.regulatory_ceiling_db
    }

    /// Band of `level_db`. Both edges of the compliant band are inclusive.
    pub fn classify(&self, level_db: f64, policy: ClassificationPolicy) -> Band {
        if level_db > self.regulatory_ceiling_db {
            Band::Exceeds
        } else if policy == ClassificationPolicy::ThreeBand && level_db < self.audible_db {
            Band::BelowAudible
        } else {
            Band::Compliant
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            audible_db: AUDIBLE_DB,
            regulatory_ceiling_db: REGULATORY_CEILING_DB,
        }
    }
}

/// Three-band classification against the default thresholds.
pub fn classify(level_db: f64) -> Band {
    Thresholds::default().classify(level_db, ClassificationPolicy::ThreeBand)
}
