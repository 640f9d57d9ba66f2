//! crypto/kdf.rs
//! Key schedule: facelet labels and round constants from a seed string.
//!
//! Design:
//! - Labels: Fisher-Yates over the 54-symbol label set, generator seeded with
//!   the plain sum of the seed's code units.
//! - Round constants: 512 samples in `0..53`, generator seeded with the
//!   position-weighted code sum and pushed forward by `slot + 1` before each
//!   sample.
//!
//! Both derivations are pure: two peers agreeing on the seed string derive
//! byte-identical cubes and tables.

use crate::constants::{ALPHABET_LEN, FACELET_COUNT, FILLER_SYMBOL, KEY_ID_LEN, ROUND_CONSTANT_LEN};
use crate::crypto::alphabet::symbols;
use crate::crypto::prng::{code_sum, weighted_code_sum, SeededRandom};
use crate::crypto::types::{KeyId, LabelPermutation, RoundConstants};

/// The unshuffled label set: alphabet order followed by the filler symbol.
pub fn base_labels() -> LabelPermutation {
    let mut labels = [FILLER_SYMBOL; FACELET_COUNT];
    for (slot, symbol) in labels.iter_mut().zip(symbols()) {
        *slot = symbol;
    }
    labels
}

/// Summary: Shuffle the label set for `seed`.
/// The result is consumed in facelet-assignment order by `CubeState::initialize`.
pub fn derive_label_permutation(seed: &str) -> LabelPermutation {
    let mut labels = base_labels();
    let mut rng = SeededRandom::new(code_sum(seed));
    for i in (1..FACELET_COUNT).rev() {
        let j = rng.below(i + 1);
        labels.swap(i, j);
    }
    labels
}

/// Summary: Derive the round-constant table for `seed`.
pub fn derive_round_constants(seed: &str) -> RoundConstants {
    let mut table = [0u8; ROUND_CONSTANT_LEN];
    let mut rng = SeededRandom::new(weighted_code_sum(seed));
    for (slot, rc) in table.iter_mut().enumerate() {
        rng.advance(slot as u64 + 1);
        *rc = rng.below(ALPHABET_LEN) as u8;
    }
    table
}

/// Summary: Short BLAKE3-based identifier of `seed`.
/// Used to bind checkpoints to a key without persisting the seed.
pub fn derive_key_id(seed: &str) -> KeyId {
    let digest = blake3::hash(seed.as_bytes());
    let mut id = [0u8; KEY_ID_LEN];
    id.copy_from_slice(&digest.as_bytes()[..KEY_ID_LEN]);
    id
}

/// Everything a cube cipher derives from its seed.
#[derive(Clone, PartialEq, Eq)]
pub struct KeySchedule {
    key_id: KeyId,
    labels: LabelPermutation,
    round_constants: RoundConstants,
}

impl KeySchedule {
    pub fn derive(seed: &str) -> Self {
        Self {
            key_id: derive_key_id(seed),
            labels: derive_label_permutation(seed),
            round_constants: derive_round_constants(seed),
        }
    }

    pub fn key_id(&self) -> &KeyId {
        &self.key_id
    }

    pub fn labels(&self) -> &LabelPermutation {
        &self.labels
    }

    pub fn round_constants(&self) -> &RoundConstants {
        &self.round_constants
    }

    /// Round constant for step `index`, wrapping around the table.
    #[inline]
    pub fn round_constant(&self, index: usize) -> u8 {
        self.round_constants[index % ROUND_CONSTANT_LEN]
    }
}

// Tables stay out of logs; the key id is enough to tell schedules apart.
impl std::fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySchedule")
            .field("key_id", &hex::encode(self.key_id))
            .finish_non_exhaustive()
    }
}
