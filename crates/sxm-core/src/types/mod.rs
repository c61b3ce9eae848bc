//! # Core Type Definitions
//!
//! This module contains the small value types shared by every part of the
//! scoring engine:
//! - Answer values (`AnswerValue`)
//! - Question content (`Question`, `AnswerOption`)
//! - Maturity stages (`Stage`)
//! - Error types (`SxmError`)
//!
//! ## Determinism Guarantees
//!
//! - `Stage` implements `Ord` so it can key `BTreeMap`s
//! - `AnswerValue` can only hold 1..=5; out-of-range values are rejected at
//!   construction, never clamped

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ANSWER VALUE
// =============================================================================

/// Lowest score an option can carry.
pub const MIN_ANSWER_VALUE: u8 = 1;

/// Highest score an option can carry.
pub const MAX_ANSWER_VALUE: u8 = 5;

/// Score contributed by a chosen option. Always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AnswerValue(u8);

impl AnswerValue {
    /// Create an answer value, rejecting anything outside 1..=5.
    pub fn new(value: u8) -> Result<Self, SxmError> {
        if (MIN_ANSWER_VALUE..=MAX_ANSWER_VALUE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SxmError::InvalidAnswerValue(value))
        }
    }

    /// Get the raw score.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for AnswerValue {
    type Error = SxmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnswerValue> for u8 {
    fn from(value: AnswerValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// QUESTION CONTENT
// =============================================================================

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Score contributed if this option is chosen.
    pub value: u8,
    /// Display text.
    pub text: String,
}

impl AnswerOption {
    /// Create a new option.
    #[must_use]
    pub fn new(value: u8, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

/// A multiple-choice question assessing one capability category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Capability category this question scores (e.g. "Data gathering").
    pub category: String,
    /// The question prompt.
    pub text: String,
    /// Options in display order.
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Create a new question.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        text: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
            options,
        }
    }

    /// Find the option carrying the given score.
    #[must_use]
    pub fn option_for(&self, value: AnswerValue) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value.value())
    }
}

// =============================================================================
// STAGE
// =============================================================================

/// Maturity stages, ordered from least (S1) to most (S5) mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Stage 1
    S1,
    /// Stage 2
    S2,
    /// Stage 3
    S3,
    /// Stage 4
    S4,
    /// Stage 5
    S5,
}

impl Stage {
    /// All stages in ascending order.
    pub const ALL: [Stage; 5] = [Stage::S1, Stage::S2, Stage::S3, Stage::S4, Stage::S5];

    /// Get the stage number (1..=5).
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Stage::S1 => 1,
            Stage::S2 => 2,
            Stage::S3 => 3,
            Stage::S4 => 4,
            Stage::S5 => 5,
        }
    }

    /// Look up a stage by its number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Stage> {
        match number {
            1 => Some(Stage::S1),
            2 => Some(Stage::S2),
            3 => Some(Stage::S3),
            4 => Some(Stage::S4),
            5 => Some(Stage::S5),
            _ => None,
        }
    }

    /// Get the next stage, if any.
    #[must_use]
    pub const fn next(&self) -> Option<Stage> {
        match self {
            Stage::S1 => Some(Stage::S2),
            Stage::S2 => Some(Stage::S3),
            Stage::S3 => Some(Stage::S4),
            Stage::S4 => Some(Stage::S5),
            Stage::S5 => None,
        }
    }

    /// Check if this stage is terminal (S5).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Stage::S5)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {}", self.number())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the assessment engine.
///
/// - No silent failures
/// - The core never panics; caller contract violations surface here
#[derive(Debug, Error)]
pub enum SxmError {
    /// An answer value outside 1..=5.
    #[error("Invalid answer value: {0} (expected 1..=5)")]
    InvalidAnswerValue(u8),

    /// An answer recorded for a question that does not exist.
    #[error("Question index {index} out of range (question count: {count})")]
    QuestionOutOfRange { index: usize, count: usize },

    /// The content bundle has no profile for a stage.
    #[error("No profile defined for {0}")]
    MissingStageProfile(Stage),

    /// A content bundle failed validation.
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// The notification address was empty.
    #[error("Email address must not be empty")]
    InvalidEmail,

    /// A caller-supplied value was rejected: blank, oversized or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// TESTS
// =============================================================================
