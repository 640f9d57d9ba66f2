//! cube/cell.rs
//! One of the 27 lattice cells: fixed home and labels, mutable placement.

use super::types::{Face, Rotation, Vec3};

/// A facelet as seen in world space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorldFacelet {
    pub face: Face,
    pub label: char,
    pub direction: Vec3,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    home: Vec3,
    labels: [Option<char>; 6],
    position: Vec3,
    orientation: Rotation,
}

impl Cell {
    pub(crate) fn new(home: Vec3, labels: [Option<char>; 6]) -> Self {
        Self {
            home,
            labels,
            position: home,
            orientation: Rotation::IDENTITY,
        }
    }

    /// Lattice point the cell occupied at initialization.
    pub fn home(&self) -> Vec3 {
        self.home
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Maps local facelet directions to world directions.
    pub fn orientation(&self) -> Rotation {
        self.orientation
    }

    pub fn label(&self, face: Face) -> Option<char> {
        self.labels[face as usize]
    }

    /// Labeled facelets in local slot order.
    pub fn labels(&self) -> impl Iterator<Item = (Face, char)> + '_ {
        Face::ALL
            .iter()
            .filter_map(move |&face| self.label(face).map(|label| (face, label)))
    }

    /// Labeled facelets with their current world-space normals.
    pub fn world_facelets(&self) -> impl Iterator<Item = WorldFacelet> + '_ {
        self.labels().map(move |(face, label)| WorldFacelet {
            face,
            label,
            direction: self.orientation.apply(face.direction()),
        })
    }

    /// Rotate position and orientation together.
    pub(crate) fn rotate(&mut self, rotation: &Rotation) {
        self.position = snap(rotation.apply(self.position));
        self.orientation = rotation.compose(&self.orientation);
    }

    pub(crate) fn place(&mut self, position: Vec3, orientation: Rotation) {
        self.position = position;
        self.orientation = orientation;
    }

    pub fn is_home(&self) -> bool {
        self.position == self.home && self.orientation == Rotation::IDENTITY
    }
}

/// Clamp onto the lattice.
#[inline]
fn snap(v: Vec3) -> Vec3 {
    [v[0].clamp(-1, 1), v[1].clamp(-1, 1), v[2].clamp(-1, 1)]
}
