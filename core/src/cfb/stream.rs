//! cfb/stream.rs
//! Chunked streams: one cube and one feedback register across many messages.
//!
//! Each chunk is its own session (round constants restart at index 0), but
//! the cube is never re-keyed between chunks and the register carries the
//! last ciphertext symbol forward. Two peers that feed the same chunks in the
//! same order stay synchronized.

use crate::recovery::{Checkpointable, SessionCheckpoint};
use crate::types::CipherError;

use super::config::EngineConfig;
use super::core::CubeCipher;
use super::engine::SessionOutcome;
use super::session::Direction;

#[derive(Debug, Clone)]
pub struct StreamCipher {
    cipher: CubeCipher,
    direction: Direction,
    driving: Option<char>,
    chunks: u64,
    steps: u64,
}

impl StreamCipher {
    pub fn encryptor(seed: &str, iv: char) -> Self {
        Self::from_parts(CubeCipher::new(seed), Direction::Encrypt, Some(iv))
    }

    pub fn decryptor(seed: &str, iv: char) -> Self {
        Self::from_parts(CubeCipher::new(seed), Direction::Decrypt, Some(iv))
    }

    pub fn with_config(
        seed: &str,
        direction: Direction,
        iv: Option<char>,
        config: EngineConfig,
    ) -> Result<Self, CipherError> {
        Ok(Self::from_parts(CubeCipher::with_config(seed, config)?, direction, iv))
    }

    fn from_parts(cipher: CubeCipher, direction: Direction, driving: Option<char>) -> Self {
        Self {
            cipher,
            direction,
            driving,
            chunks: 0,
            steps: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Feedback register the next chunk starts from.
    pub fn driving(&self) -> Option<char> {
        self.driving
    }

    pub fn chunks(&self) -> u64 {
        self.chunks
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn cipher(&self) -> &CubeCipher {
        &self.cipher
    }

    /// Process one chunk and keep the register for the next.
    pub fn process_chunk(&mut self, chunk: &str) -> Result<String, CipherError> {
        Ok(self.process_chunk_detailed(chunk)?.text)
    }

    pub fn process_chunk_detailed(&mut self, chunk: &str) -> Result<SessionOutcome, CipherError> {
        let outcome = match self.direction {
            Direction::Encrypt => self.cipher.encrypt_with_register(chunk, self.driving)?,
            Direction::Decrypt => self.cipher.decrypt_with_register(chunk, self.driving)?,
        };
        self.driving = outcome.final_driving;
        self.chunks += 1;
        self.steps += outcome.steps as u64;
        Ok(outcome)
    }

    pub fn checkpoint(&self) -> SessionCheckpoint {
        SessionCheckpoint {
            key_id: *self.cipher.schedule().key_id(),
            variant: self.cipher.config().variant as u8,
            direction: self.direction,
            driving: self.driving,
            chunks: self.chunks,
            steps: self.steps,
            moves_applied: self.cipher.cube().moves_applied(),
            placements: self.cipher.cube().placements(),
        }
    }

    /// Rebuild a stream from `checkpoint`. The seed must be the one the
    /// checkpoint was taken under.
    pub fn resume(
        seed: &str,
        config: EngineConfig,
        checkpoint: &SessionCheckpoint,
    ) -> Result<Self, CipherError> {
        let mut cipher = CubeCipher::with_config(seed, config)?;
        checkpoint.verify_key(cipher.schedule())?;
        checkpoint.verify_variant(cipher.config().variant)?;
        cipher
            .cube_mut()
            .restore_placements(&checkpoint.placements)
            .map_err(crate::recovery::CheckpointError::from)?;
        cipher.cube_mut().set_moves_applied(checkpoint.moves_applied);

        tracing::debug!(checkpoint = %checkpoint.summary(), "stream resumed");

        Ok(Self {
            cipher,
            direction: checkpoint.direction,
            driving: checkpoint.driving,
            chunks: checkpoint.chunks,
            steps: checkpoint.steps,
        })
    }
}
