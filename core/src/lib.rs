//! cube-cipher-core
//!
//! Character stream cipher keyed by a seeded 3x3x3 permutation cube.
//! The feedback register drives cube moves; a fixed sensor reads the
//! keystream symbol after every move.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Keying and the cube model
pub mod crypto;
pub mod cube;

// Cipher layers
pub mod cfb;
pub mod telemetry;
pub mod recovery;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::cfb::{
        decrypt_text, encrypt_text, CipherVariant, CubeCipher, Direction, EngineConfig,
        SessionOutcome, StreamCipher,
    };
    pub use crate::crypto::KeySchedule;
    pub use crate::cube::{CubeDriver, CubeHandle, CubeState, Move};
    pub use crate::recovery::SessionCheckpoint;
    pub use crate::types::CipherError;
}
