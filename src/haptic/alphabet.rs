//! Character to symbol alphabet.
//!
//! Letters and digits map to fixed dot/dash sequences; spaces and sentence
//! punctuation are classified as pause units. The table is a `match` over
//! upper-cased characters, so it is a process-wide constant with no
//! initialization.

use thiserror::Error;

use super::types::Symbol::{self, Dash, Dot};

/// Result of looking a character up in the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedUnit {
    /// A letter or digit and its symbol sequence.
    Symbols(&'static [Symbol]),
    /// A space.
    WordBreak,
    /// `.`, `!` or `?`.
    SentencePause,
}

/// The character has no encoding and contributes nothing to the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported character {0:?}")]
pub struct Unsupported(pub char);

/// Look up a character, ignoring case.
pub fn encode(c: char) -> Result<EncodedUnit, Unsupported> {
    if c == ' ' {
        return Ok(EncodedUnit::WordBreak);
    }
    if matches!(c, '.' | '!' | '?') {
        return Ok(EncodedUnit::SentencePause);
    }
    symbols_for(c.to_ascii_uppercase())
        .map(EncodedUnit::Symbols)
        .ok_or(Unsupported(c))
}

fn symbols_for(c: char) -> Option<&'static [Symbol]> {
    let seq: &'static [Symbol] = match c {
        'A' => &[Dot, Dash],
        'B' => &[Dot, Dash, Dot, Dash],
        'C' => &[Dot, Dot, Dash, Dot],
        'D' => &[Dot, Dot, Dot],
        'E' => &[Dot],
        'F' => &[Dot, Dot, Dot, Dash],
        'G' => &[Dash, Dash, Dot],
        'H' => &[Dot, Dot, Dot, Dot],
        'I' => &[Dot, Dot],
        'J' => &[Dot, Dash, Dash, Dash],
        'K' => &[Dash, Dot, Dash],
        'L' => &[Dot, Dash, Dot, Dot],
        'M' => &[Dash, Dash],
        'N' => &[Dash, Dot],
        'O' => &[Dash, Dash, Dash],
        'P' => &[Dot, Dash, Dash, Dot],
        'Q' => &[Dash, Dash, Dot, Dash],
        'R' => &[Dot, Dash, Dot],
        'S' => &[Dot, Dash, Dot],
        'T' => &[Dash],
        'U' => &[Dot, Dot, Dash],
        'V' => &[Dot, Dot, Dot, Dash],
        'W' => &[Dot, Dash, Dash],
        'X' => &[Dash, Dot, Dot, Dash],
        'Y' => &[Dash, Dot, Dash, Dash],
        'Z' => &[Dash, Dash, Dot, Dot],
        '0' => &[Dot, Dash, Dot],
        '1' => &[Dot],
        '2' => &[Dot, Dot],
        '3' => &[Dot, Dot, Dot],
        '4' => &[Dot, Dot, Dot, Dot],
        '5' => &[Dot, Dot, Dot, Dash],
        '6' => &[Dash, Dot],
        '7' => &[Dash, Dot, Dot],
        '8' => &[Dash, Dot, Dot, Dot],
        '9' => &[Dash, Dot, Dot, Dot, Dot],
        _ => return None,
    };
    Some(seq)
}
