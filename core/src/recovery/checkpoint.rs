//! recovery/checkpoint.rs
//! Checkpoints for chunked (chat-style) cipher streams.
//!
//! Wire layout:
//! [ magic "CCK1" (4) ][ version u16 LE (2) ][ bincode body ]
//!
//! The body carries the key id, never the seed: resuming still requires the
//! seed, and a checkpoint taken under another key is rejected.

use bincode::{Decode, Encode};
use thiserror::Error;

use crate::cfb::{CipherVariant, Direction};
use crate::constants::{CHECKPOINT_V1, MAGIC_CCK1};
use crate::crypto::{KeyId, KeySchedule};
use crate::cube::{CubeError, Placement};
use crate::utils::enum_name_or_hex;

const PREFIX_LEN: usize = MAGIC_CCK1.len() + 2;

/// Upper bound on a decoded body; a full checkpoint is well under 1 KiB.
const BODY_LIMIT: usize = 4096;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("checkpoint truncated: {len} bytes")]
    Truncated { len: usize },

    #[error("bad checkpoint magic")]
    BadMagic,

    #[error("unsupported checkpoint version: {found}")]
    UnsupportedVersion { found: u16 },

    #[error("checkpoint encode failed: {0}")]
    Encode(String),

    #[error("checkpoint decode failed: {0}")]
    Decode(String),

    /// Checkpoint was taken under a different seed.
    #[error("checkpoint key mismatch: expected {expected}, found {found}")]
    KeyMismatch { expected: String, found: String },

    /// Checkpoint was taken with different cipher arithmetic.
    #[error("checkpoint variant mismatch: expected {expected}, found {found}")]
    VariantMismatch { expected: String, found: String },

    #[error("checkpoint cube state rejected: {0}")]
    InvalidCube(String),
}

impl From<CubeError> for CheckpointError {
    fn from(e: CubeError) -> Self {
        CheckpointError::InvalidCube(e.to_string())
    }
}

pub trait Checkpointable {
    fn export(&self) -> Result<Vec<u8>, CheckpointError>;
    fn summary(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct SessionCheckpoint {
    pub key_id: KeyId,
    /// Raw `CipherVariant` id.
    pub variant: u8,
    pub direction: Direction,
    /// Feedback register to start the next chunk from.
    pub driving: Option<char>,
    pub chunks: u64,
    pub steps: u64,
    /// Moves committed on the cube since it was keyed.
    pub moves_applied: u64,
    pub placements: Vec<Placement>,
}

impl SessionCheckpoint {
    pub fn encode(&self) -> Result<Vec<u8>, CheckpointError> {
        let body = bincode::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| CheckpointError::Encode(e.to_string()))?;
        let mut out = Vec::with_capacity(PREFIX_LEN + body.len());
        out.extend_from_slice(&MAGIC_CCK1);
        out.extend_from_slice(&CHECKPOINT_V1.to_le_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CheckpointError> {
        if bytes.len() < PREFIX_LEN {
            return Err(CheckpointError::Truncated { len: bytes.len() });
        }
        if bytes[..MAGIC_CCK1.len()] != MAGIC_CCK1 {
            return Err(CheckpointError::BadMagic);
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != CHECKPOINT_V1 {
            return Err(CheckpointError::UnsupportedVersion { found: version });
        }
        let (checkpoint, _) = bincode::decode_from_slice(
            &bytes[PREFIX_LEN..],
            bincode::config::standard().with_limit::<BODY_LIMIT>(),
        )
            .map_err(|e| CheckpointError::Decode(e.to_string()))?;
        Ok(checkpoint)
    }

    pub fn verify_key(&self, schedule: &KeySchedule) -> Result<(), CheckpointError> {
        if &self.key_id != schedule.key_id() {
            return Err(CheckpointError::KeyMismatch {
                expected: hex::encode(schedule.key_id()),
                found: hex::encode(self.key_id),
            });
        }
        Ok(())
    }

    pub fn verify_variant(&self, variant: CipherVariant) -> Result<(), CheckpointError> {
        if self.variant != variant as u8 {
            return Err(CheckpointError::VariantMismatch {
                expected: format!("{:?}", variant),
                found: enum_name_or_hex::<CipherVariant>(self.variant),
            });
        }
        Ok(())
    }
}

impl Checkpointable for SessionCheckpoint {
    fn export(&self) -> Result<Vec<u8>, CheckpointError> {
        self.encode()
    }

    fn summary(&self) -> String {
        format!(
            "SessionCheckpoint: key={}, variant={}, direction={:?}, chunks={}, steps={}",
            hex::encode(self.key_id),
            enum_name_or_hex::<CipherVariant>(self.variant),
            self.direction,
            self.chunks,
            self.steps
        )
    }
}
