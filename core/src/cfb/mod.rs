//! cfb: character-oriented cipher feedback over a cube keystream.
//!
//! This module exposes the stable public API for encrypting and decrypting
//! the 53-symbol alphabet. Internals are layered:
//! selector -> session (state machine) -> engine (drives a cube) -> core / stream.

pub mod selector;
pub mod session;
pub mod config;
pub mod engine;
pub mod core;
pub mod stream;

pub use selector::{select_move, MOVE_SET};
pub use session::{CipherSession, Direction, SessionState};
pub use config::{CipherVariant, EngineConfig};
pub use engine::{decrypt_sequence, encrypt_sequence, run_session, SessionOutcome};
pub use self::core::{decrypt_text, encrypt_text, CubeCipher};
pub use stream::StreamCipher;
