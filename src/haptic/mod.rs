//! Core haptic encoding functionality.
//!
//! This module contains the dot/dash alphabet, the pattern compiler and the
//! value types they produce.

pub mod alphabet;
mod compiler;
pub mod types;

pub use alphabet::{encode, EncodedUnit, Unsupported};
pub use compiler::{compile, CompileError};
pub use types::{
    Instruction, PauseKind, PreferenceError, Preferences, PreferencesInput, Symbol,
    TranslationResult,
};
