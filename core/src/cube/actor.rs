//! cube/actor.rs
//! A cube owned by a worker thread and shared through channels.
//!
//! Responsibilities:
//! - Serialize every mutation of one cube on a single thread
//! - Show each committed state to observers before signalling completion
//! - Hand out one exclusive lease at a time to cipher sessions
//!
//! Non-responsibilities:
//! - Rendering or animation (observers do that)
//! - Cipher arithmetic

use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};

use crate::crypto::{derive_label_permutation, LabelPermutation};

use super::driver::{CubeDriver, MoveCompletion};
use super::state::{CubeState, SensorReading};
use super::types::{CubeError, Move};

/// Read-only view of each committed cube state (renderers, animators).
///
/// Observers run on the actor thread; a slow observer delays completion,
/// which is how an animation layer makes `apply` wait until it has settled.
pub trait CubeObserver: Send {
    fn on_move(&mut self, mv: Move, cube: &CubeState);

    fn on_reinitialize(&mut self, _cube: &CubeState) {}
}

enum CubeCommand {
    Apply {
        mv: Move,
        done: Sender<MoveCompletion>,
    },
    Sensor {
        reply: Sender<Result<SensorReading, CubeError>>,
    },
    Reinitialize {
        labels: Box<LabelPermutation>,
        done: Sender<()>,
    },
    Snapshot {
        reply: Sender<CubeState>,
    },
}

pub struct CubeActor {
    state: CubeState,
    observers: Vec<Box<dyn CubeObserver>>,
}

impl CubeActor {
    pub fn new(state: CubeState) -> Self {
        Self {
            state,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn CubeObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Move the cube onto its own thread. The thread exits once every
    /// handle and lease has been dropped.
    pub fn spawn(self) -> CubeHandle {
        let (cmd_tx, cmd_rx) = unbounded::<CubeCommand>();
        let (lease_tx, lease_rx) = bounded::<()>(1);
        // Single token: whoever holds it owns the cube.
        let _ = lease_tx.send(());

        std::thread::spawn(move || self.run(cmd_rx));

        CubeHandle {
            commands: cmd_tx,
            lease_tx,
            lease_rx,
        }
    }

    fn run(mut self, rx: Receiver<CubeCommand>) {
        tracing::debug!(observers = self.observers.len(), "cube actor started");
        while let Ok(cmd) = rx.recv() {
            match cmd {
                CubeCommand::Apply { mv, done } => {
                    self.state.apply(mv);
                    for observer in self.observers.iter_mut() {
                        observer.on_move(mv, &self.state);
                    }
                    let completion = MoveCompletion {
                        mv,
                        sequence: self.state.moves_applied(),
                    };
                    if done.send(completion).is_err() {
                        tracing::warn!(%mv, "move committed but nobody is waiting for its completion");
                    }
                }
                CubeCommand::Sensor { reply } => {
                    let _ = reply.send(self.state.sensor());
                }
                CubeCommand::Reinitialize { labels, done } => {
                    self.state.reinitialize(&labels);
                    for observer in self.observers.iter_mut() {
                        observer.on_reinitialize(&self.state);
                    }
                    let _ = done.send(());
                }
                CubeCommand::Snapshot { reply } => {
                    let _ = reply.send(self.state.clone());
                }
            }
        }
        tracing::debug!(moves = self.state.moves_applied(), "cube actor stopped");
    }
}

/// Cloneable, thread-safe access to a cube actor.
#[derive(Clone)]
pub struct CubeHandle {
    commands: Sender<CubeCommand>,
    lease_tx: Sender<()>,
    lease_rx: Receiver<()>,
}

impl CubeHandle {
    /// Spawn an actor for a freshly keyed cube.
    pub fn spawn(state: CubeState) -> Self {
        CubeActor::new(state).spawn()
    }

    /// Block until no other lease is alive, then take exclusive control.
    pub fn acquire(&self) -> CubeLease {
        // Token channel cannot close while `self` holds its sender.
        let _ = self.lease_rx.recv();
        CubeLease {
            handle: self.clone(),
            in_flight: None,
        }
    }

    pub fn try_acquire(&self) -> Option<CubeLease> {
        self.lease_rx.try_recv().ok().map(|_| CubeLease {
            handle: self.clone(),
            in_flight: None,
        })
    }

    /// Copy of the current state, for display.
    pub fn snapshot(&self) -> Result<CubeState, CubeError> {
        let (tx, rx) = bounded(1);
        self.send(CubeCommand::Snapshot { reply: tx })?;
        rx.recv().map_err(|_| CubeError::Disconnected)
    }

    fn send(&self, cmd: CubeCommand) -> Result<(), CubeError> {
        self.commands.send(cmd).map_err(|_| CubeError::Disconnected)
    }
}

struct InFlight {
    mv: Move,
    done: Receiver<MoveCompletion>,
}

/// Exclusive right to drive the cube. Released on drop.
pub struct CubeLease {
    handle: CubeHandle,
    in_flight: Option<InFlight>,
}

impl CubeLease {
    /// Issue `mv`. Completion is observed through the returned ticket.
    ///
    /// # Panics
    /// If the completion of a previously submitted move was never observed.
    pub fn submit(&mut self, mv: Move) -> Result<MoveTicket<'_>, CubeError> {
        if let Some(pending) = &self.in_flight {
            panic!("move {} issued while {} is still in flight", mv, pending.mv);
        }
        let (tx, rx) = bounded(1);
        self.handle.send(CubeCommand::Apply { mv, done: tx })?;
        self.in_flight = Some(InFlight { mv, done: rx });
        Ok(MoveTicket { lease: self })
    }

    /// Submit `mv` and block until it is committed.
    pub fn apply(&mut self, mv: Move) -> Result<MoveCompletion, CubeError> {
        self.submit(mv)?.wait()
    }

    /// Wait out a move whose ticket was dropped before completion.
    pub fn settle(&mut self) -> Result<Option<MoveCompletion>, CubeError> {
        match self.in_flight.take() {
            Some(pending) => pending.done.recv().map(Some).map_err(|_| CubeError::Disconnected),
            None => Ok(None),
        }
    }

    /// # Panics
    /// If a move is still in flight.
    pub fn sensor(&self) -> Result<SensorReading, CubeError> {
        if let Some(pending) = &self.in_flight {
            panic!("sensor read while {} is still in flight", pending.mv);
        }
        let (tx, rx) = bounded(1);
        self.handle.send(CubeCommand::Sensor { reply: tx })?;
        rx.recv().map_err(|_| CubeError::Disconnected)?
    }

    /// Re-key the cube. Any move still in flight is forgotten; its transform
    /// lands before the rebuild because the actor is FIFO.
    pub fn reinitialize(&mut self, seed: &str) -> Result<(), CubeError> {
        if let Some(pending) = self.in_flight.take() {
            tracing::debug!(mv = %pending.mv, "discarding in-flight move on reinitialize");
        }
        let (tx, rx) = bounded(1);
        self.handle.send(CubeCommand::Reinitialize {
            labels: Box::new(derive_label_permutation(seed)),
            done: tx,
        })?;
        rx.recv().map_err(|_| CubeError::Disconnected)
    }

    pub fn snapshot(&self) -> Result<CubeState, CubeError> {
        self.handle.snapshot()
    }
}

impl Drop for CubeLease {
    fn drop(&mut self) {
        // Return the token; the bounded(1) slot is free because we held it.
        let _ = self.handle.lease_tx.try_send(());
    }
}

impl CubeDriver for CubeLease {
    fn apply_move(&mut self, mv: Move) -> Result<MoveCompletion, CubeError> {
        self.apply(mv)
    }

    fn read_sensor(&mut self) -> Result<SensorReading, CubeError> {
        self.sensor()
    }
}

/// Pending completion of one submitted move.
#[must_use = "a move's completion must be observed before the next move or sensor read"]
pub struct MoveTicket<'a> {
    lease: &'a mut CubeLease,
}

impl MoveTicket<'_> {
    pub fn mv(&self) -> Option<Move> {
        self.lease.in_flight.as_ref().map(|p| p.mv)
    }

    pub fn wait(self) -> Result<MoveCompletion, CubeError> {
        match self.lease.in_flight.take() {
            Some(pending) => pending.done.recv().map_err(|_| CubeError::Disconnected),
            None => Err(CubeError::Disconnected),
        }
    }

    /// Wait at most `timeout`. On timeout the move stays in flight and the
    /// ticket can be waited on again.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<MoveCompletion, CubeError> {
        let started = Instant::now();
        let (mv, outcome) = match self.lease.in_flight.as_ref() {
            Some(pending) => (pending.mv, pending.done.recv_timeout(timeout)),
            None => return Err(CubeError::Disconnected),
        };
        match outcome {
            Ok(completion) => {
                self.lease.in_flight = None;
                Ok(completion)
            }
            Err(RecvTimeoutError::Timeout) => Err(CubeError::Timeout {
                mv,
                elapsed: started.elapsed(),
            }),
            Err(RecvTimeoutError::Disconnected) => {
                self.lease.in_flight = None;
                Err(CubeError::Disconnected)
            }
        }
    }
}
