//! cube: permutation state machine behind the keystream.
//!
//! Layering:
//! - `types`: lattice vectors, rotations, faces, generators, errors
//! - `cell` / `state`: the 27-cell model, moves and sensor
//! - `driver`: what the cipher engine needs from a cube
//! - `actor`: thread-owned cube with exclusive leases

pub mod types;
pub mod cell;
pub mod state;
pub mod driver;
pub mod actor;

pub use types::{parse_sequence, Axis, CubeError, Face, Move, Rotation, Vec3};
pub use cell::{Cell, WorldFacelet};
pub use state::{lattice_points, CubeState, Placement, SensorConfig, SensorReading};
pub use driver::{CubeDriver, MoveCompletion};
pub use actor::{CubeActor, CubeHandle, CubeLease, CubeObserver, MoveTicket};
