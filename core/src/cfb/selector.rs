//! cfb/selector.rs
//! Driving character -> generator.
//!
//! Only U, R and F turns (and their inverses) are ever selected; each of them
//! moves the layer holding the sensor corner, so every step reads a facelet
//! that has just been moved.

use crate::cube::Move;

/// Generators available to the cipher, indexed by `code mod 6`.
pub const MOVE_SET: [Move; 6] = [Move::U, Move::UPrime, Move::R, Move::RPrime, Move::F, Move::FPrime];

/// First UTF-16 code unit of `c`.
#[inline]
pub fn char_code(c: char) -> u16 {
    let mut units = [0u16; 2];
    c.encode_utf16(&mut units)[0]
}

/// Select the next move from the feedback register. An empty register turns `U`.
pub fn select_move(driving: Option<char>) -> Move {
    match driving {
        Some(c) => MOVE_SET[usize::from(char_code(c)) % MOVE_SET.len()],
        None => Move::U,
    }
}
