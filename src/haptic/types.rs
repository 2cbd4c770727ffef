//! Core haptic domain types.
//!
//! This module defines the symbols of the encoding alphabet, the validated
//! user preferences that govern timing and amplitude, and the compiled
//! instruction stream returned to callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{preferences, timing};

/// One of the two base symbols of the haptic alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Short vibration.
    Dot,
    /// Long vibration.
    Dash,
}

impl Symbol {
    /// Unscaled vibration length for this symbol in milliseconds.
    pub const fn base_duration_ms(self) -> u64 {
        match self {
            Symbol::Dot => timing::DOT_MS,
            Symbol::Dash => timing::DASH_MS,
        }
    }
}

/// Pause classes inserted between encoded units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseKind {
    /// Gap between two characters of the same word.
    Letter,
    /// Gap produced by a space.
    Word,
    /// Gap produced by `.`, `!` or `?`.
    Sentence,
}

impl PauseKind {
    /// Unscaled pause length in milliseconds.
    pub const fn base_duration_ms(self) -> u64 {
        match self {
            PauseKind::Letter => timing::LETTER_SPACE_MS,
            PauseKind::Word => timing::WORD_SPACE_MS,
            PauseKind::Sentence => timing::SENTENCE_SPACE_MS,
        }
    }
}

/// A single timed actuator instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    /// Drive the actuator for `duration_ms` at `intensity`.
    Vibrate {
        #[serde(rename = "duration")]
        duration_ms: u64,
        intensity: f64,
    },
    /// Keep the actuator idle for `duration_ms`.
    Pause {
        #[serde(rename = "duration")]
        duration_ms: u64,
    },
}

impl Instruction {
    /// Duration of this instruction in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        match *self {
            Instruction::Vibrate { duration_ms, .. } | Instruction::Pause { duration_ms } => {
                duration_ms
            }
        }
    }

    /// Whether this instruction is a pause.
    pub fn is_pause(&self) -> bool {
        matches!(self, Instruction::Pause { .. })
    }
}

/// Errors raised while validating raw preferences.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreferenceError {
    /// A field lies outside of its accepted range (or is not a number).
    #[error("{field} must be between {min:.1} and {max:.1} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Raw, possibly partial preferences as supplied by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesInput {
    /// Playback speed factor, `None` means default.
    #[serde(default)]
    pub speed: Option<f64>,

    /// Vibration intensity, `None` means default.
    #[serde(default)]
    pub intensity: Option<f64>,
}

impl PreferencesInput {
    /// Fill in defaults and validate every field.
    pub fn validate(self) -> Result<Preferences, PreferenceError> {
        Preferences::new(
            self.speed.unwrap_or(preferences::DEFAULT_SPEED),
            self.intensity.unwrap_or(preferences::DEFAULT_INTENSITY),
        )
    }
}

/// Validated speed/intensity pair.
///
/// Fields are private so a `Preferences` value is always within range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    speed: f64,
    intensity: f64,
}

impl Preferences {
    /// Create validated preferences.
    pub fn new(speed: f64, intensity: f64) -> Result<Self, PreferenceError> {
        check_range(
            "speed",
            speed,
            preferences::MIN_SPEED,
            preferences::MAX_SPEED,
        )?;
        check_range(
            "intensity",
            intensity,
            preferences::MIN_INTENSITY,
            preferences::MAX_INTENSITY,
        )?;
        Ok(Self { speed, intensity })
    }

    /// Playback speed factor. Higher is faster.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Vibration intensity in `[0.0, 1.0]`.
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Round both fields to two decimal places.
    ///
    /// The compiler and the cache key both work on this form, so requests
    /// differing only in float noise share one key and one pattern.
    pub fn normalized(&self) -> Self {
        Self {
            speed: round_decimals(self.speed),
            intensity: round_decimals(self.intensity),
        }
    }

    /// Scale a base duration by the speed factor, rounding half away from zero.
    pub fn scale(&self, base_ms: u64) -> u64 {
        (base_ms as f64 / self.speed).round() as u64
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            speed: preferences::DEFAULT_SPEED,
            intensity: preferences::DEFAULT_INTENSITY,
        }
    }
}

fn round_decimals(value: f64) -> f64 {
    let factor = 10f64.powi(preferences::DECIMALS);
    // Adding 0.0 turns -0.0 into 0.0.
    (value * factor).round() / factor + 0.0
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), PreferenceError> {
    // NaN fails both comparisons and lands here too.
    if !(min..=max).contains(&value) {
        return Err(PreferenceError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// A compiled haptic pattern plus summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Ordered actuator instructions.
    pub pattern: Vec<Instruction>,

    /// Sum of all instruction durations.
    #[serde(rename = "totalDuration")]
    pub total_duration_ms: u64,

    /// Number of input characters that produced vibrations.
    #[serde(rename = "characterCount")]
    pub character_count: usize,

    /// The text the pattern was compiled from.
    #[serde(rename = "text")]
    pub source_text: String,
}

impl TranslationResult {
    /// Build a result, deriving the total duration from the pattern.
    pub fn new(pattern: Vec<Instruction>, character_count: usize, source_text: String) -> Self {
        let total_duration_ms = pattern.iter().map(Instruction::duration_ms).sum();
        Self {
            pattern,
            total_duration_ms,
            character_count,
            source_text,
        }
    }

    /// Number of vibrate instructions in the pattern.
    pub fn vibration_count(&self) -> usize {
        self.pattern.iter().filter(|i| !i.is_pause()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_defaults() {
        let prefs = PreferencesInput::default().validate().unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.speed(), 1.0);
        assert_eq!(prefs.intensity(), 0.8);
    }

    #[test]
    fn test_partial_preferences_fall_back_per_field() {
        let prefs = PreferencesInput {
            speed: Some(2.0),
            intensity: None,
        }
        .validate()
        .unwrap();
        assert_eq!(prefs.speed(), 2.0);
        assert_eq!(prefs.intensity(), 0.8);

        let prefs = PreferencesInput {
            speed: None,
            intensity: Some(0.3),
        }
        .validate()
        .unwrap();
        assert_eq!(prefs.speed(), 1.0);
        assert_eq!(prefs.intensity(), 0.3);
    }

    #[test]
    fn test_preference_bounds_are_inclusive() {
        assert!(Preferences::new(0.1, 0.0).is_ok());
        assert!(Preferences::new(3.0, 1.0).is_ok());
    }

    #[test]
    fn test_out_of_range_speed_names_field() {
        let err = Preferences::new(3.5, 0.8).unwrap_err();
        let PreferenceError::OutOfRange { field, .. } = err.clone();
        assert_eq!(field, "speed");
        assert_eq!(err.to_string(), "speed must be between 0.1 and 3.0 (got 3.5)");
    }

    #[test]
    fn test_out_of_range_intensity_and_nan() {
        assert!(matches!(
            Preferences::new(1.0, 1.2),
            Err(PreferenceError::OutOfRange { field: "intensity", .. })
        ));
        assert!(Preferences::new(f64::NAN, 0.5).is_err());
        assert!(Preferences::new(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_normalized_rounds_to_two_decimals() {
        let prefs = Preferences::new(1.004, 0.801).unwrap().normalized();
        assert_eq!(prefs.speed(), 1.0);
        assert_eq!(prefs.intensity(), 0.8);

        let prefs = Preferences::new(2.996, 0.356).unwrap().normalized();
        assert_eq!(prefs.speed(), 3.0);
        assert_eq!(prefs.intensity(), 0.36);

        // Bounds survive rounding and -0.0 becomes 0.0.
        let prefs = Preferences::new(0.1, -0.0).unwrap().normalized();
        assert_eq!(prefs.speed(), 0.1);
        assert!(prefs.intensity().is_sign_positive());

        let exact = Preferences::new(1.7, 0.25).unwrap();
        assert_eq!(exact.normalized(), exact);
        assert_eq!(exact.normalized().normalized(), exact.normalized());
    }

    #[test]
    fn test_scale_rounds_half_away_from_zero() {
        let prefs = Preferences::new(3.0, 0.8).unwrap();
        // 100 / 3 = 33.33.., 200 / 3 = 66.66..
        assert_eq!(prefs.scale(100), 33);
        assert_eq!(prefs.scale(200), 67);

        let prefs = Preferences::new(0.8, 0.8).unwrap();
        // 300 / 0.8 = 375.0
        assert_eq!(prefs.scale(300), 375);
    }

    #[test]
    fn test_instruction_serialization_shape() {
        let vibrate = Instruction::Vibrate {
            duration_ms: 100,
            intensity: 0.8,
        };
        let pause = Instruction::Pause { duration_ms: 200 };
        assert_eq!(
            serde_json::to_value(vibrate).unwrap(),
            serde_json::json!({"type": "vibrate", "duration": 100, "intensity": 0.8})
        );
        assert_eq!(
            serde_json::to_value(pause).unwrap(),
            serde_json::json!({"type": "pause", "duration": 200})
        );
    }

    #[test]
    fn test_result_total_matches_pattern() {
        let result = TranslationResult::new(
            vec![
                Instruction::Vibrate {
                    duration_ms: 100,
                    intensity: 0.5,
                },
                Instruction::Pause { duration_ms: 200 },
            ],
            1,
            "E".to_string(),
        );
        assert_eq!(result.total_duration_ms, 300);
        assert_eq!(result.vibration_count(), 1);
    }
}
