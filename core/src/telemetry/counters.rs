// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters used during cipher sessions.
//!
//! Summary: Collects step, move and character counts during encrypt/decrypt.
//! Converted into an immutable TelemetrySnapshot when the session ends.
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Deterministic counters collected during one or more sessions
#[derive(Default, Clone, Debug, Encode, Decode, Serialize, Deserialize, PartialEq, Eq)]
pub struct TelemetryCounters {
    pub sessions: u64,
    pub steps: u64,
    pub moves_applied: u64,
    pub sensor_reads: u64,
    pub sensor_faults: u64,
    pub chars_in: u64,
    pub chars_filtered: u64,
    pub chars_out: u64,
}

impl TelemetryCounters {
    /// Record the filtering stage of a session.
    ///
    /// - `raw_len`: characters handed to the session
    /// - `dropped`: characters removed as outside the alphabet
    pub fn add_input(&mut self, raw_len: usize, dropped: usize) {
        self.sessions += 1;
        self.chars_in += raw_len as u64;
        self.chars_filtered += dropped as u64;
    }

    /// Record one completed cipher step (one move, one read, one symbol).
    pub fn add_step(&mut self) {
        self.steps += 1;
        self.moves_applied += 1;
        self.sensor_reads += 1;
        self.chars_out += 1;
    }

    pub fn add_sensor_fault(&mut self) {
        self.moves_applied += 1;
        self.sensor_reads += 1;
        self.sensor_faults += 1;
    }

    // Workers keep their own counters and fold them in at the end.
    pub fn merge(&mut self, other: &TelemetryCounters) {
        self.sessions += other.sessions;
        self.steps += other.steps;
        self.moves_applied += other.moves_applied;
        self.sensor_reads += other.sensor_reads;
        self.sensor_faults += other.sensor_faults;
        self.chars_in += other.chars_in;
        self.chars_filtered += other.chars_filtered;
        self.chars_out += other.chars_out;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
