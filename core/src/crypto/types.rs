//! crypto/types.rs
//! Error and value types for the alphabet codec and key schedule.

use thiserror::Error;

use crate::constants::{ALPHABET_LEN, FACELET_COUNT, KEY_ID_LEN, ROUND_CONSTANT_LEN};

/// Short identifier of a seed, safe to persist alongside checkpoints.
pub type KeyId = [u8; KEY_ID_LEN];

/// A 54-symbol facelet label sequence in assignment order.
pub type LabelPermutation = [char; FACELET_COUNT];

/// Round constants, each in `0..ALPHABET_LEN`.
pub type RoundConstants = [u8; ROUND_CONSTANT_LEN];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetError {
    /// Character is not one of `A-Z`, `a-z` or space.
    #[error("character {0:?} is outside the cipher alphabet")]
    UnknownSymbol(char),

    /// Index does not address a symbol.
    #[error("symbol index {index} out of range (alphabet has {len} symbols)", len = ALPHABET_LEN)]
    IndexOutOfRange { index: usize },
}
