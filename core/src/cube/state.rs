//! cube/state.rs
//! The cube as a permutation-with-orientation of 27 cells.
//!
//! Invariants:
//! - cell positions always form a bijection onto the 27 lattice points;
//! - the multiset of the 54 facelet labels never changes after initialization.

use std::collections::BTreeMap;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::constants::{CELL_COUNT, SENSOR_DIRECTION, SENSOR_MIN_ALIGNMENT, SENSOR_POSITION};
use crate::crypto::{derive_label_permutation, LabelPermutation};

use super::cell::Cell;
use super::types::{dot, norm, CubeError, Face, Move, Rotation, Vec3};

/// Fixed lattice point and world direction read by the sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    pub position: Vec3,
    pub direction: Vec3,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            position: SENSOR_POSITION,
            direction: SENSOR_DIRECTION,
        }
    }
}

/// Result of a confident sensor read.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorReading {
    pub label: char,
    /// Home position of the cell currently at the sensor; identifies it physically.
    pub cell_home: Vec3,
    /// Local slot of the facelet that was read.
    pub face: Face,
    pub alignment: f64,
}

/// Where one cell sits and how it is turned, in cell initialization order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Placement {
    pub position: Vec3,
    pub orientation: [[i8; 3]; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct CubeState {
    cells: Vec<Cell>,
    sensor: SensorConfig,
    moves_applied: u64,
}

/// Lattice points in initialization order: lexicographic over (x, y, z).
pub fn lattice_points() -> impl Iterator<Item = Vec3> {
    (-1i8..=1).flat_map(|x| (-1i8..=1).flat_map(move |y| (-1i8..=1).map(move |z| [x, y, z])))
}

fn build_cells(labels: &LabelPermutation) -> Vec<Cell> {
    let mut stream = labels.iter().copied();
    let cells: Vec<Cell> = lattice_points()
        .map(|home| {
            let mut slots = [None; 6];
            for face in Face::ALL {
                if face.is_exposed_at(home) {
                    slots[face as usize] = stream.next();
                }
            }
            Cell::new(home, slots)
        })
        .collect();
    debug_assert_eq!(cells.len(), CELL_COUNT);
    debug_assert!(stream.next().is_none(), "label stream not fully consumed");
    cells
}

impl CubeState {
    /// Build the solved cube, assigning `labels` in facelet-assignment order.
    pub fn initialize(labels: &LabelPermutation) -> Self {
        Self {
            cells: build_cells(labels),
            sensor: SensorConfig::default(),
            moves_applied: 0,
        }
    }

    pub fn from_seed(seed: &str) -> Self {
        Self::initialize(&derive_label_permutation(seed))
    }

    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Rebuild every cell from `labels`; the sensor configuration is kept.
    pub fn reinitialize(&mut self, labels: &LabelPermutation) {
        self.cells = build_cells(labels);
        self.moves_applied = 0;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn sensor_config(&self) -> SensorConfig {
        self.sensor
    }

    pub fn moves_applied(&self) -> u64 {
        self.moves_applied
    }

    /// Resume the move counter after restoring placements.
    pub(crate) fn set_moves_applied(&mut self, moves: u64) {
        self.moves_applied = moves;
    }

    pub fn cell_at(&self, position: Vec3) -> Option<&Cell> {
        self.cells.iter().find(|c| c.position() == position)
    }

    /// Turn one layer a quarter; cells outside the layer are untouched.
    pub fn apply(&mut self, mv: Move) {
        let axis = mv.axis().index();
        let layer = mv.layer();
        let rotation = mv.rotation();
        for cell in self.cells.iter_mut().filter(|c| c.position()[axis] == layer) {
            cell.rotate(&rotation);
        }
        self.moves_applied += 1;
    }

    pub fn apply_sequence(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Read the configured sensor.
    pub fn sensor(&self) -> Result<SensorReading, CubeError> {
        self.read(self.sensor.position, self.sensor.direction)
    }

    /// Label of the facelet at `position` best aligned with `direction`.
    pub fn read(&self, position: Vec3, direction: Vec3) -> Result<SensorReading, CubeError> {
        let cell = self.cell_at(position).ok_or(CubeError::EmptyPosition(position))?;
        let length = norm(direction);

        let mut best: Option<SensorReading> = None;
        if length > 0.0 {
            for facelet in cell.world_facelets() {
                let alignment = f64::from(dot(facelet.direction, direction)) / length;
                if best.map_or(true, |b| alignment > b.alignment) {
                    best = Some(SensorReading {
                        label: facelet.label,
                        cell_home: cell.home(),
                        face: facelet.face,
                        alignment,
                    });
                }
            }
        }

        match best {
            Some(reading) if reading.alignment > SENSOR_MIN_ALIGNMENT => Ok(reading),
            other => Err(CubeError::SensorFault {
                position,
                best_alignment: other.map_or(-1.0, |r| r.alignment),
            }),
        }
    }

    /// Current permutation and orientation of every cell.
    pub fn placements(&self) -> Vec<Placement> {
        self.cells
            .iter()
            .map(|c| Placement {
                position: c.position(),
                orientation: c.orientation().0,
            })
            .collect()
    }

    /// Put every cell back where `placements` says, keeping labels.
    ///
    /// Rejected unless there is one placement per cell, every orientation is
    /// a proper rotation and the positions form a bijection. On error the
    /// cube is left unchanged.
    pub fn restore_placements(&mut self, placements: &[Placement]) -> Result<(), CubeError> {
        if placements.len() != CELL_COUNT {
            return Err(CubeError::InvalidPlacement(format!(
                "expected {} placements, got {}",
                CELL_COUNT,
                placements.len()
            )));
        }
        let mut next = self.clone();
        for (cell, placement) in next.cells.iter_mut().zip(placements) {
            let orientation = Rotation(placement.orientation);
            if !orientation.is_proper() {
                return Err(CubeError::InvalidPlacement(format!(
                    "cell {:?} has an improper orientation",
                    cell.home()
                )));
            }
            cell.place(placement.position, orientation);
        }
        if !next.is_valid_permutation() {
            return Err(CubeError::InvalidPlacement("positions are not a permutation".into()));
        }
        self.cells = next.cells;
        Ok(())
    }

    /// Count of every label across all cells.
    pub fn labels_multiset(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for (_, label) in self.cells.iter().flat_map(|c| c.labels()) {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Every cell at home with its initial orientation.
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(Cell::is_home)
    }

    /// Positions form a bijection onto the lattice.
    pub fn is_valid_permutation(&self) -> bool {
        let mut seen = [false; CELL_COUNT];
        for cell in &self.cells {
            let p = cell.position();
            if p.iter().any(|c| !(-1..=1).contains(c)) {
                return false;
            }
            let slot = ((p[0] + 1) * 9 + (p[1] + 1) * 3 + (p[2] + 1)) as usize;
            if seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        seen.iter().all(|&s| s)
    }
}
