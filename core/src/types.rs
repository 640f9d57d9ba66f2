use crate::{
    crypto::AlphabetError,
    cube::CubeError,
    cfb::SessionState,
    recovery::CheckpointError,
};

/// Unified cipher error covering codec, cube, session protocol, checkpoints and config.
/// - `From<T>` impls enable `?` across layers.
/// - Messages are stable so they can be matched in logs.
#[derive(Debug)]
pub enum CipherError {
    /// Codec error (a symbol outside the alphabet reached the arithmetic).
    Alphabet(AlphabetError),

    /// Cube error outside a cipher step (actor gone, timeout, bad notation).
    Cube(CubeError),

    /// Sensor could not produce a confident read at `step`; the session was aborted.
    SensorFault { step: usize, fault: CubeError },

    /// Session state machine asked for a transition it does not allow.
    InvalidTransition { from: SessionState, to: SessionState },

    /// Checkpoint encode/decode or key binding failure.
    Checkpoint(CheckpointError),

    /// Configuration could not be parsed or is inconsistent.
    Config(String),
}

impl std::fmt::Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherError::Alphabet(e) => write!(f, "alphabet error: {}", e),
            CipherError::Cube(e) => write!(f, "cube error: {}", e),
            CipherError::SensorFault { step, fault } =>
                write!(f, "session aborted at step {}: {}", step, fault),
            CipherError::InvalidTransition { from, to } =>
                write!(f, "invalid session transition: {:?} -> {:?}", from, to),
            CipherError::Checkpoint(e) => write!(f, "checkpoint error: {}", e),
            CipherError::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for CipherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CipherError::Alphabet(e) => Some(e),
            CipherError::Cube(e) => Some(e),
            CipherError::SensorFault { fault, .. } => Some(fault),
            CipherError::Checkpoint(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AlphabetError> for CipherError {
    fn from(e: AlphabetError) -> Self {
        CipherError::Alphabet(e)
    }
}

impl From<CubeError> for CipherError {
    fn from(e: CubeError) -> Self {
        CipherError::Cube(e)
    }
}

impl From<CheckpointError> for CipherError {
    fn from(e: CheckpointError) -> Self {
        CipherError::Checkpoint(e)
    }
}

impl From<serde_json::Error> for CipherError {
    fn from(e: serde_json::Error) -> Self {
        CipherError::Config(e.to_string())
    }
}
