//! crypto/mod.rs
//! Alphabet codec and key schedule.

pub mod types;
pub mod alphabet;
pub mod prng;
pub mod kdf;

pub use types::*;
pub use alphabet::{decode, encode, filter_alphabet, is_symbol};
pub use prng::SeededRandom;
pub use kdf::*;
