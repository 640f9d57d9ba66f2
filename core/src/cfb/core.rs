// ## `cfb/core.rs`: stable public API

use crate::crypto::KeySchedule;
use crate::cube::CubeState;
use crate::types::CipherError;

use super::config::EngineConfig;
use super::engine::{self, SessionOutcome};

/// A keyed cube plus its schedule: one peer's end of a conversation.
///
/// The cube keeps evolving across calls, so two peers stay in step only if
/// they process the same messages in the same order. Use one instance per
/// direction, or `rekey` before every independent message.
#[derive(Debug, Clone)]
pub struct CubeCipher {
    schedule: KeySchedule,
    cube: CubeState,
    config: EngineConfig,
}

impl CubeCipher {
    pub fn new(seed: &str) -> Self {
        let schedule = KeySchedule::derive(seed);
        let config = EngineConfig::default();
        let cube = CubeState::initialize(schedule.labels()).with_sensor(config.sensor);
        Self { schedule, cube, config }
    }

    pub fn with_config(seed: &str, config: EngineConfig) -> Result<Self, CipherError> {
        config.validate()?;
        let schedule = KeySchedule::derive(seed);
        let cube = CubeState::initialize(schedule.labels()).with_sensor(config.sensor);
        Ok(Self { schedule, cube, config })
    }

    /// InitializeCube: derive a new schedule and rebuild the cube from it.
    pub fn rekey(&mut self, seed: &str) {
        self.schedule = KeySchedule::derive(seed);
        self.reset();
        tracing::debug!(key_id = %hex::encode(self.schedule.key_id()), "cube re-keyed");
    }

    /// Return the cube to its freshly keyed state.
    pub fn reset(&mut self) {
        self.cube.reinitialize(self.schedule.labels());
    }

    pub fn schedule(&self) -> &KeySchedule {
        &self.schedule
    }

    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    pub(crate) fn cube_mut(&mut self) -> &mut CubeState {
        &mut self.cube
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn encrypt_sequence(&mut self, text: &str, iv: char) -> Result<SessionOutcome, CipherError> {
        self.encrypt_with_register(text, Some(iv))
    }

    pub fn decrypt_sequence(&mut self, text: &str, iv: char) -> Result<SessionOutcome, CipherError> {
        self.decrypt_with_register(text, Some(iv))
    }

    /// Encrypt starting from an explicit feedback register (`None` turns `U` first).
    pub fn encrypt_with_register(
        &mut self,
        text: &str,
        driving: Option<char>,
    ) -> Result<SessionOutcome, CipherError> {
        engine::encrypt_sequence(&mut self.cube, &self.schedule, &self.config, text, driving)
    }

    pub fn decrypt_with_register(
        &mut self,
        text: &str,
        driving: Option<char>,
    ) -> Result<SessionOutcome, CipherError> {
        engine::decrypt_sequence(&mut self.cube, &self.schedule, &self.config, text, driving)
    }
}

/// Encrypt `text` on a freshly keyed cube.
pub fn encrypt_text(seed: &str, text: &str, iv: char) -> Result<String, CipherError> {
    Ok(CubeCipher::new(seed).encrypt_sequence(text, iv)?.text)
}

/// Decrypt `text` on a freshly keyed cube.
pub fn decrypt_text(seed: &str, text: &str, iv: char) -> Result<String, CipherError> {
    Ok(CubeCipher::new(seed).decrypt_sequence(text, iv)?.text)
}
