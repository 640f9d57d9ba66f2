//! cfb/config.rs
//! Engine configuration.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::constants::variant_ids;
use crate::crypto::KeySchedule;
use crate::cube::SensorConfig;
use crate::types::CipherError;

/// Cipher arithmetic variant.
///
/// Both appear in deployed peers; they do not interoperate.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CipherVariant {
    /// `C = (P + K) mod 53`
    Classic = variant_ids::CLASSIC,
    /// `C = (P + K + RC[i]) mod 53`
    RoundConstants = variant_ids::ROUND_CONSTANTS,
}

impl Default for CipherVariant {
    fn default() -> Self {
        CipherVariant::RoundConstants
    }
}

impl CipherVariant {
    /// Additive term for step `index`.
    #[inline]
    pub fn round_constant(self, schedule: &KeySchedule, index: usize) -> u8 {
        match self {
            CipherVariant::Classic => 0,
            CipherVariant::RoundConstants => schedule.round_constant(index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub variant: CipherVariant,
    pub sensor: SensorConfig,
    /// Whether to time stages and attach a telemetry snapshot to each outcome.
    pub collect_telemetry: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variant: CipherVariant::default(),
            sensor: SensorConfig::default(),
            collect_telemetry: false,
        }
    }
}

impl EngineConfig {
    pub fn with_variant(mut self, variant: CipherVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_telemetry(mut self, enabled: bool) -> Self {
        self.collect_telemetry = enabled;
        self
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CipherError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CipherError> {
        let SensorConfig { position, direction } = self.sensor;
        if position.iter().any(|c| !(-1..=1).contains(c)) {
            return Err(CipherError::Config(format!(
                "sensor position {:?} is outside the lattice",
                position
            )));
        }
        if direction == [0, 0, 0] {
            return Err(CipherError::Config("sensor direction must be non-zero".into()));
        }
        Ok(())
    }
}
