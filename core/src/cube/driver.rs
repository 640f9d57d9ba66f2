//! cube/driver.rs
//! The two operations the cipher engine needs from a cube.

use super::state::{CubeState, SensorReading};
use super::types::{CubeError, Move};

/// Signal that a move has been committed to the cube.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveCompletion {
    pub mv: Move,
    /// Total moves committed on this cube, including this one.
    pub sequence: u64,
}

/// Apply a move and wait for its completion; read the sensor.
///
/// `apply_move` returns only once the transform is committed, so a sensor
/// read that follows it always observes the new state.
pub trait CubeDriver {
    fn apply_move(&mut self, mv: Move) -> Result<MoveCompletion, CubeError>;
    fn read_sensor(&mut self) -> Result<SensorReading, CubeError>;
}

// In-process cube: completion is immediate.
impl CubeDriver for CubeState {
    fn apply_move(&mut self, mv: Move) -> Result<MoveCompletion, CubeError> {
        self.apply(mv);
        Ok(MoveCompletion {
            mv,
            sequence: self.moves_applied(),
        })
    }

    fn read_sensor(&mut self) -> Result<SensorReading, CubeError> {
        self.sensor()
    }
}
