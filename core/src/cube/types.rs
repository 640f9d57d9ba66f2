//! cube/types.rs
//! Lattice vectors, integer rotations, faces and the twelve generators.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer lattice point or unit direction.
pub type Vec3 = [i8; 3];

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> i32 {
    a.iter().zip(b.iter()).map(|(&x, &y)| i32::from(x) * i32::from(y)).sum()
}

/// Euclidean length of an integer vector.
#[inline]
pub fn norm(v: Vec3) -> f64 {
    f64::from(dot(v, v)).sqrt()
}

/// World axis of a face turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Exact 3x3 rotation with entries in {-1, 0, 1}, row-major.
///
/// Every orientation reachable by quarter turns is one of the 24 proper
/// rotations of the cube, so integer matrices represent them without drift.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rotation(pub [[i8; 3]; 3]);

impl Rotation {
    pub const IDENTITY: Rotation = Rotation([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    /// Quarter turn about `axis`, counter-clockwise when looking from the
    /// positive end of the axis toward the origin (right-hand rule).
    pub fn quarter(axis: Axis) -> Rotation {
        match axis {
            Axis::X => Rotation([[1, 0, 0], [0, 0, -1], [0, 1, 0]]),
            Axis::Y => Rotation([[0, 0, 1], [0, 1, 0], [-1, 0, 0]]),
            Axis::Z => Rotation([[0, -1, 0], [1, 0, 0], [0, 0, 1]]),
        }
    }

    pub fn transpose(&self) -> Rotation {
        let m = &self.0;
        let mut t = [[0i8; 3]; 3];
        for (r, row) in t.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = m[c][r];
            }
        }
        Rotation(t)
    }

    /// `self * rhs`: apply `rhs` first, then `self`.
    pub fn compose(&self, rhs: &Rotation) -> Rotation {
        let mut out = [[0i8; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[r][k] * rhs.0[k][c]).sum();
            }
        }
        Rotation(out)
    }

    /// Orthonormal with determinant +1.
    pub fn is_proper(&self) -> bool {
        let m = &self.0;
        if m.iter().flatten().any(|e| !(-1..=1).contains(e)) {
            return false;
        }
        let det = i32::from(m[0][0]) * (i32::from(m[1][1]) * i32::from(m[2][2]) - i32::from(m[1][2]) * i32::from(m[2][1]))
            - i32::from(m[0][1]) * (i32::from(m[1][0]) * i32::from(m[2][2]) - i32::from(m[1][2]) * i32::from(m[2][0]))
            + i32::from(m[0][2]) * (i32::from(m[1][0]) * i32::from(m[2][1]) - i32::from(m[1][1]) * i32::from(m[2][0]));
        det == 1 && self.compose(&self.transpose()) == Rotation::IDENTITY
    }

    pub fn apply(&self, v: Vec3) -> Vec3 {
        let mut out = [0i8; 3];
        for (r, slot) in out.iter_mut().enumerate() {
            *slot = (0..3).map(|k| self.0[r][k] * v[k]).sum();
        }
        out
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::IDENTITY
    }
}

/// Local facelet slot of a cell, in assignment order.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum Face {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    Front = 4,
    Back = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::Right, Face::Left, Face::Up, Face::Down, Face::Front, Face::Back];

    /// Outward unit normal in the cell's local frame.
    pub fn direction(self) -> Vec3 {
        match self {
            Face::Right => [1, 0, 0],
            Face::Left => [-1, 0, 0],
            Face::Up => [0, 1, 0],
            Face::Down => [0, -1, 0],
            Face::Front => [0, 0, 1],
            Face::Back => [0, 0, -1],
        }
    }

    /// Whether a cell at `position` shows this face on the cube's surface.
    pub fn is_exposed_at(self, position: Vec3) -> bool {
        let d = self.direction();
        (0..3).any(|i| d[i] != 0 && d[i] == position[i])
    }
}

/// One of the twelve quarter-turn generators.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum Move {
    U = 0,
    UPrime = 1,
    D = 2,
    DPrime = 3,
    L = 4,
    LPrime = 5,
    R = 6,
    RPrime = 7,
    F = 8,
    FPrime = 9,
    B = 10,
    BPrime = 11,
}

impl Move {
    pub const ALL: [Move; 12] = [
        Move::U, Move::UPrime, Move::D, Move::DPrime,
        Move::L, Move::LPrime, Move::R, Move::RPrime,
        Move::F, Move::FPrime, Move::B, Move::BPrime,
    ];

    /// Face being turned.
    pub fn face(self) -> Face {
        match self {
            Move::U | Move::UPrime => Face::Up,
            Move::D | Move::DPrime => Face::Down,
            Move::L | Move::LPrime => Face::Left,
            Move::R | Move::RPrime => Face::Right,
            Move::F | Move::FPrime => Face::Front,
            Move::B | Move::BPrime => Face::Back,
        }
    }

    pub fn is_prime(self) -> bool {
        (self as u8) % 2 == 1
    }

    pub fn axis(self) -> Axis {
        match self.face() {
            Face::Left | Face::Right => Axis::X,
            Face::Up | Face::Down => Axis::Y,
            Face::Front | Face::Back => Axis::Z,
        }
    }

    /// Coordinate on `axis()` selecting the turned layer.
    pub fn layer(self) -> i8 {
        self.face().direction()[self.axis().index()]
    }

    pub fn inverse(self) -> Move {
        let raw = self as u8;
        let flipped = if self.is_prime() { raw - 1 } else { raw + 1 };
        Move::try_from(flipped).unwrap_or(self)
    }

    /// World rotation applied to the turned layer.
    ///
    /// Clockwise seen from outside a face at `+1` is a negative turn about
    /// the positive axis; a face at `-1` is viewed from the other side.
    pub fn rotation(self) -> Rotation {
        let q = Rotation::quarter(self.axis());
        let positive_turn = (self.layer() < 0) != self.is_prime();
        if positive_turn {
            q
        } else {
            q.transpose()
        }
    }

    pub fn notation(self) -> &'static str {
        match self {
            Move::U => "U",
            Move::UPrime => "U'",
            Move::D => "D",
            Move::DPrime => "D'",
            Move::L => "L",
            Move::LPrime => "L'",
            Move::R => "R",
            Move::RPrime => "R'",
            Move::F => "F",
            Move::FPrime => "F'",
            Move::B => "B",
            Move::BPrime => "B'",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Move::ALL
            .iter()
            .copied()
            .find(|m| m.notation() == trimmed)
            .ok_or_else(|| CubeError::UnknownMove(trimmed.to_string()))
    }
}

/// Parse a whitespace-separated move sequence such as `"R U R' U'"`.
pub fn parse_sequence(text: &str) -> Result<Vec<Move>, CubeError> {
    text.split_whitespace().map(Move::from_str).collect()
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CubeError {
    /// Best facelet alignment at the sensor did not clear the confidence threshold.
    #[error("sensor fault at {position:?}: best alignment {best_alignment:.3}")]
    SensorFault { position: Vec3, best_alignment: f64 },

    /// No cell occupies the queried lattice point.
    #[error("no cell at position {0:?}")]
    EmptyPosition(Vec3),

    /// Restored placements do not describe a reachable cube.
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("unknown move notation: {0:?}")]
    UnknownMove(String),

    /// The cube actor thread is gone.
    #[error("cube actor disconnected")]
    Disconnected,

    /// Completion of `mv` was not observed within the caller's timeout.
    #[error("move {mv} did not complete within {elapsed:?}")]
    Timeout { mv: Move, elapsed: Duration },
}
