//! constants.rs
//! Fixed parameters shared by the codec, key schedule, cube and engine.
//!
//! Changing any of these breaks interoperability with peers that derive
//! their cube and round constants from the same seed.

/// Number of symbols in the cipher alphabet (`A-Z`, `a-z`, space).
pub const ALPHABET_LEN: usize = 53;

/// Alphabet in index order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz ";

/// Extra symbol appended to the alphabet so the label set covers all 54 facelets.
pub const FILLER_SYMBOL: char = 'A';

/// Number of visible facelets (9 per face, 6 faces).
pub const FACELET_COUNT: usize = 54;

/// Number of cells on the 3x3x3 lattice.
pub const CELL_COUNT: usize = 27;

/// Length of the round-constant table.
pub const ROUND_CONSTANT_LEN: usize = 512;

/// Default sensor cell: front-top-right corner.
pub const SENSOR_POSITION: [i8; 3] = [1, 1, 1];

/// Default sensor direction: world up.
pub const SENSOR_DIRECTION: [i8; 3] = [0, 1, 0];

/// Minimum dot-product alignment for a confident sensor read (about 25 degrees).
pub const SENSOR_MIN_ALIGNMENT: f64 = 0.9;

/// Length of the key identifier carried by checkpoints.
pub const KEY_ID_LEN: usize = 8;

/// Checkpoint format version.
pub const CHECKPOINT_V1: u16 = 1;

/// Magic prefix for encoded checkpoints.
/// "CCK1" = Cube Cipher checKpoint v1
pub const MAGIC_CCK1: [u8; 4] = *b"CCK1";

/// Multiplier and increment of the key-schedule generator (Knuth MMIX constants).
pub mod lcg {
    pub const MULTIPLIER: u64 = 6364136223846793005;
    pub const INCREMENT: u64 = 1442695040888963407;
}

/// Cipher variant identifiers.
pub mod variant_ids {
    pub const CLASSIC: u8 = 0x01;
    pub const ROUND_CONSTANTS: u8 = 0x02;
}
