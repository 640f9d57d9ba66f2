//! cfb/engine.rs
//! Drives a `CipherSession` against any `CubeDriver`.
//!
//! Per step:
//! 1. select the move from the feedback register
//! 2. apply it and wait for completion (the only suspension point)
//! 3. read the sensor -> keystream symbol K
//! 4. combine with the input symbol and RC[i]
//! 5. feed ciphertext back into the register

use std::time::Instant;

use crate::crypto::KeySchedule;
use crate::cube::CubeDriver;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::CipherError;

use super::config::EngineConfig;
use super::session::{CipherSession, Direction};

/// Result of one finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub text: String,
    /// Feedback register after the last step; thread it into the next
    /// session to continue a chunked stream.
    pub final_driving: Option<char>,
    pub steps: usize,
    /// Input characters removed by alphabet filtering.
    pub dropped: usize,
    pub telemetry: Option<TelemetrySnapshot>,
}

#[inline]
fn timed<T>(timer: &mut Option<TelemetryTimer>, stage: Stage, f: impl FnOnce() -> T) -> T {
    match timer {
        Some(t) => t.time(stage, f),
        None => f(),
    }
}

/// Run `session` to completion.
///
/// On a sensor fault the session is abandoned and the cube keeps the move
/// that was just committed; re-key before starting again.
pub fn run_session<D: CubeDriver + ?Sized>(
    session: CipherSession,
    driver: &mut D,
    schedule: &KeySchedule,
    config: &EngineConfig,
) -> Result<SessionOutcome, CipherError> {
    let timer = config.collect_telemetry.then(TelemetryTimer::new);
    drive(session, driver, schedule, config, timer)
}

fn filter_and_run<D: CubeDriver + ?Sized>(
    direction: Direction,
    driver: &mut D,
    schedule: &KeySchedule,
    config: &EngineConfig,
    text: &str,
    iv: Option<char>,
) -> Result<SessionOutcome, CipherError> {
    let mut timer = config.collect_telemetry.then(TelemetryTimer::new);
    let session = timed(&mut timer, Stage::Filter, || CipherSession::new(direction, text, iv));
    drive(session, driver, schedule, config, timer)
}

fn drive<D: CubeDriver + ?Sized>(
    mut session: CipherSession,
    driver: &mut D,
    schedule: &KeySchedule,
    config: &EngineConfig,
    mut timer: Option<TelemetryTimer>,
) -> Result<SessionOutcome, CipherError> {
    let mut counters = TelemetryCounters::default();
    let started = Instant::now();
    counters.add_input(session.len() + session.dropped(), session.dropped());

    tracing::debug!(
        direction = ?session.direction(),
        len = session.len(),
        dropped = session.dropped(),
        variant = ?config.variant,
        "cipher session start"
    );

    let mut next = session.start()?;
    while let Some(mv) = next {
        let step = session.index();

        let completion = timed(&mut timer, Stage::Apply, || driver.apply_move(mv))?;
        session.on_move_complete(completion)?;

        let reading = match timed(&mut timer, Stage::Sensor, || driver.read_sensor()) {
            Ok(reading) => reading,
            Err(fault) => {
                counters.add_sensor_fault();
                tracing::warn!(step, %mv, error = %fault, "sensor read failed, aborting session");
                return Err(CipherError::SensorFault { step, fault });
            }
        };

        let rc = config.variant.round_constant(schedule, step);
        next = timed(&mut timer, Stage::Combine, || session.compute(reading.label, rc))?;
        counters.add_step();

        tracing::trace!(step, %mv, key = %reading.label, rc, sequence = completion.sequence, "cipher step");
    }

    let telemetry = timer.map(|mut t| {
        t.finish();
        TelemetrySnapshot::from(&counters, &t)
    });

    tracing::debug!(
        steps = counters.steps,
        elapsed_us = started.elapsed().as_micros() as u64,
        "cipher session done"
    );

    let steps = session.len();
    let dropped = session.dropped();
    let final_driving = session.driving();
    Ok(SessionOutcome {
        text: session.into_output(),
        final_driving,
        steps,
        dropped,
        telemetry,
    })
}

/// EncryptSequence: filter `text`, then encrypt with ciphertext feedback.
pub fn encrypt_sequence<D: CubeDriver + ?Sized>(
    driver: &mut D,
    schedule: &KeySchedule,
    config: &EngineConfig,
    text: &str,
    iv: Option<char>,
) -> Result<SessionOutcome, CipherError> {
    filter_and_run(Direction::Encrypt, driver, schedule, config, text, iv)
}

/// DecryptSequence: filter `text`, then decrypt; the register follows the
/// input ciphertext so the cube replays the encryptor's moves.
pub fn decrypt_sequence<D: CubeDriver + ?Sized>(
    driver: &mut D,
    schedule: &KeySchedule,
    config: &EngineConfig,
    text: &str,
    iv: Option<char>,
) -> Result<SessionOutcome, CipherError> {
    filter_and_run(Direction::Decrypt, driver, schedule, config, text, iv)
}
