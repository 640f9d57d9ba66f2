//! crypto/alphabet.rs
//! Bidirectional mapping between the 53-symbol alphabet and `0..53`.
//!
//! Layout:
//! - `'A'..='Z'` -> 0..=25
//! - `'a'..='z'` -> 26..=51
//! - `' '`       -> 52
//!
//! Foreign characters never reach `encode` on the cipher path: input is run
//! through `filter_alphabet` first.

use crate::constants::{ALPHABET, ALPHABET_LEN};
use crate::crypto::types::AlphabetError;

const SPACE_INDEX: u8 = 52;

/// True when `c` belongs to the cipher alphabet.
#[inline]
pub fn is_symbol(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' '
}

/// Map a symbol to its index.
#[inline]
pub fn encode(c: char) -> Result<u8, AlphabetError> {
    match c {
        'A'..='Z' => Ok(c as u8 - b'A'),
        'a'..='z' => Ok(c as u8 - b'a' + 26),
        ' ' => Ok(SPACE_INDEX),
        other => Err(AlphabetError::UnknownSymbol(other)),
    }
}

/// Map an index back to its symbol.
#[inline]
pub fn decode(index: u8) -> Result<char, AlphabetError> {
    match index {
        0..=25 => Ok((b'A' + index) as char),
        26..=51 => Ok((b'a' + index - 26) as char),
        SPACE_INDEX => Ok(' '),
        _ => Err(AlphabetError::IndexOutOfRange { index: index as usize }),
    }
}

/// Drop every character outside the alphabet.
///
/// Returns the filtered text and the number of characters removed.
pub fn filter_alphabet(text: &str) -> (String, usize) {
    let mut dropped = 0usize;
    let kept: String = text
        .chars()
        .filter(|&c| {
            let keep = is_symbol(c);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();
    (kept, dropped)
}

/// Iterate the alphabet in index order.
pub fn symbols() -> impl Iterator<Item = char> {
    debug_assert_eq!(ALPHABET.len(), ALPHABET_LEN);
    ALPHABET.chars()
}
