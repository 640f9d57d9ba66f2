//! cfb/session.rs
//! One encrypt or decrypt run as an explicit state machine.
//!
//! ```text
//! Idle --start--> AwaitingMove --completion--> ComputingSymbol --more input--> AwaitingMove
//!   |                                                  |
//!   +--empty input--> Done <-------input exhausted-----+
//! ```
//!
//! The session owns the input, the feedback register and the output. It never
//! touches the cube: the engine issues the move the session asks for and
//! hands back the completion and the sensor reading.

use bincode::{Decode, Encode};

use crate::crypto::{decode, encode, filter_alphabet};
use crate::constants::ALPHABET_LEN;
use crate::cube::{Move, MoveCompletion};
use crate::types::CipherError;

use super::selector::select_move;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Encode, Decode)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Session lifecycle. `Idle -> Done` exists only for input that is empty
/// after filtering, which finishes without issuing a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    AwaitingMove,
    ComputingSymbol,
    Done,
}

impl SessionState {
    pub fn can_transition(self, to: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, to),
            (Idle, AwaitingMove)
                | (Idle, Done)
                | (AwaitingMove, ComputingSymbol)
                | (ComputingSymbol, AwaitingMove)
                | (ComputingSymbol, Done)
        )
    }
}

#[derive(Debug, Clone)]
pub struct CipherSession {
    direction: Direction,
    input: Vec<char>,
    dropped: usize,
    index: usize,
    driving: Option<char>,
    pending: Option<Move>,
    output: String,
    state: SessionState,
}

impl CipherSession {
    /// Filter `text` to the alphabet and prime the feedback register with `iv`.
    pub fn new(direction: Direction, text: &str, iv: Option<char>) -> Self {
        let (filtered, dropped) = filter_alphabet(text);
        let input: Vec<char> = filtered.chars().collect();
        Self {
            direction,
            output: String::with_capacity(input.len()),
            input,
            dropped,
            index: 0,
            driving: iv,
            pending: None,
            state: SessionState::Idle,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Index of the symbol being (or next to be) processed.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of symbols the session will process.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Characters removed by filtering.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Current feedback register.
    pub fn driving(&self) -> Option<char> {
        self.driving
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn transition(&mut self, to: SessionState) -> Result<(), CipherError> {
        if !self.state.can_transition(to) {
            return Err(CipherError::InvalidTransition { from: self.state, to });
        }
        self.state = to;
        Ok(())
    }

    /// Leave `Idle`. Returns the first move to issue, or `None` when there is
    /// nothing to process.
    pub fn start(&mut self) -> Result<Option<Move>, CipherError> {
        if self.input.is_empty() {
            self.transition(SessionState::Done)?;
            return Ok(None);
        }
        self.transition(SessionState::AwaitingMove)?;
        Ok(Some(self.request_move()))
    }

    fn request_move(&mut self) -> Move {
        let mv = select_move(self.driving);
        self.pending = Some(mv);
        mv
    }

    /// The move requested last has been committed.
    pub fn on_move_complete(&mut self, completion: MoveCompletion) -> Result<(), CipherError> {
        self.transition(SessionState::ComputingSymbol)?;
        let requested = self.pending.take();
        debug_assert_eq!(requested, Some(completion.mv), "completion for a move never requested");
        Ok(())
    }

    /// Combine the current input symbol with keystream `key` and round
    /// constant `rc`, advance, and return the next move if input remains.
    pub fn compute(&mut self, key: char, rc: u8) -> Result<Option<Move>, CipherError> {
        if self.state != SessionState::ComputingSymbol {
            return Err(CipherError::InvalidTransition {
                from: self.state,
                to: SessionState::ComputingSymbol,
            });
        }

        let n = ALPHABET_LEN as u32;
        let k = u32::from(encode(key)?);
        let rc = u32::from(rc) % n;
        let current = self.input[self.index];
        let x = u32::from(encode(current)?);

        let (symbol, feedback) = match self.direction {
            Direction::Encrypt => {
                let c = decode(((x + k + rc) % n) as u8)?;
                // Feedback is always ciphertext: the symbol just produced.
                (c, c)
            }
            Direction::Decrypt => {
                let p = decode(((x + 2 * n - k - rc) % n) as u8)?;
                (p, current)
            }
        };
        self.output.push(symbol);
        self.driving = Some(feedback);
        self.index += 1;

        if self.index == self.input.len() {
            self.transition(SessionState::Done)?;
            Ok(None)
        } else {
            self.transition(SessionState::AwaitingMove)?;
            Ok(Some(self.request_move()))
        }
    }
}
