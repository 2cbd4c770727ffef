//! Text to haptic pattern compiler.
//!
//! Walks the input left to right, looks each character up in the alphabet and
//! emits vibrate/pause instructions scaled by the caller's preferences.
//!
//! Pause handling:
//! - a letter space is only emitted between two vibrate-producing characters;
//! - consecutive pauses collapse into one, keeping the longer duration;
//! - unsupported characters are skipped and do not break a pending letter space.

use thiserror::Error;
use tracing::{debug, warn};

use super::alphabet::{self, EncodedUnit, Unsupported};
use super::types::{Instruction, PauseKind, Preferences, Symbol, TranslationResult};

/// Errors raised by [`compile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Nothing in the text maps to a vibration.
    #[error("text contains no encodable characters")]
    NoEncodableCharacters,
}

/// Compile `text` into a haptic pattern.
///
/// Leading and trailing whitespace is ignored for encoding; the untrimmed
/// text is echoed back as the result's source text. Preferences are
/// rounded to two decimals first (see [`Preferences::normalized`]).
pub fn compile(text: &str, prefs: &Preferences) -> Result<TranslationResult, CompileError> {
    let leading = text.chars().take_while(|c| c.is_whitespace()).count();
    let trimmed = text.trim();
    let prefs = prefs.normalized();

    let mut builder = PatternBuilder::new(&prefs);
    let mut skipped = 0usize;

    for (offset, c) in trimmed.chars().enumerate() {
        match alphabet::encode(c) {
            Ok(EncodedUnit::Symbols(seq)) => builder.push_character(seq),
            Ok(EncodedUnit::WordBreak) => builder.push_pause(PauseKind::Word),
            Ok(EncodedUnit::SentencePause) => builder.push_pause(PauseKind::Sentence),
            Err(Unsupported(c)) => {
                skipped += 1;
                warn!(
                    character = ?c,
                    position = leading + offset,
                    "Unsupported character, skipping"
                );
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "Skipped unsupported characters");
    }

    let result = builder.finish(text)?;
    debug!(
        elements = result.pattern.len(),
        vibrations = result.vibration_count(),
        characters = result.character_count,
        total_duration_ms = result.total_duration_ms,
        "Compiled haptic pattern"
    );
    Ok(result)
}

struct PatternBuilder<'a> {
    prefs: &'a Preferences,
    pattern: Vec<Instruction>,
    pending_letter_space: bool,
    character_count: usize,
}

impl<'a> PatternBuilder<'a> {
    fn new(prefs: &'a Preferences) -> Self {
        Self {
            prefs,
            pattern: Vec::new(),
            pending_letter_space: false,
            character_count: 0,
        }
    }

    fn push_character(&mut self, symbols: &[Symbol]) {
        if self.pending_letter_space {
            self.append_pause(PauseKind::Letter);
        }
        for symbol in symbols {
            self.pattern.push(Instruction::Vibrate {
                duration_ms: self.prefs.scale(symbol.base_duration_ms()),
                intensity: self.prefs.intensity(),
            });
        }
        self.pending_letter_space = true;
        self.character_count += 1;
    }

    fn push_pause(&mut self, kind: PauseKind) {
        // A word or sentence pause always outranks the letter space it replaces.
        self.pending_letter_space = false;
        self.append_pause(kind);
    }

    fn append_pause(&mut self, kind: PauseKind) {
        let duration = self.prefs.scale(kind.base_duration_ms());
        match self.pattern.last_mut() {
            Some(Instruction::Pause { duration_ms }) => {
                *duration_ms = (*duration_ms).max(duration);
            }
            _ => self.pattern.push(Instruction::Pause {
                duration_ms: duration,
            }),
        }
    }

    fn finish(self, source_text: &str) -> Result<TranslationResult, CompileError> {
        if self.character_count == 0 {
            return Err(CompileError::NoEncodableCharacters);
        }
        Ok(TranslationResult::new(
            self.pattern,
            self.character_count,
            source_text.to_string(),
        ))
    }
}
