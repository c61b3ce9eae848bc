//! # Session Module
//!
//! One user's pass through the questionnaire.
//!
//! - The answer map is volatile, session-local state
//! - Never serialized to disk
//! - Cleared on reset
//!
//! The session also carries the question cursor the presentation layer walks:
//! answering the current question moves the cursor forward until the last
//! question, at which point the caller is told the assessment is finished.

use crate::assessment::AssessmentResult;
use crate::content::Content;
use crate::types::{AnswerValue, Question, SxmError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// ANSWER MAP
// =============================================================================

/// Recorded answers keyed by question index.
///
/// Uses BTreeMap for deterministic iteration. At most one value per index;
/// a later insert for the same index replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMap {
    answers: BTreeMap<usize, AnswerValue>,
}

impl AnswerMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `index`, returning the previous one.
    pub fn insert(&mut self, index: usize, value: AnswerValue) -> Option<AnswerValue> {
        self.answers.insert(index, value)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<AnswerValue> {
        self.answers.get(&index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Iterate `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, AnswerValue)> + '_ {
        self.answers.iter().map(|(i, v)| (*i, *v))
    }

    /// Iterate the recorded values in index order.
    pub fn values(&self) -> impl Iterator<Item = AnswerValue> + '_ {
        self.answers.values().copied()
    }
}

// =============================================================================
// ADVANCE
// =============================================================================

/// What happened to the cursor after answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to this question index.
    Next(usize),
    /// The last question was answered; results are ready to show.
    Finished,
}

// =============================================================================
// SESSION
// =============================================================================

/// An assessment in progress over a content bundle.
#[derive(Debug, Clone)]
pub struct AssessmentSession<'c> {
    content: &'c Content,
    answers: AnswerMap,
    current: usize,
}

impl<'c> AssessmentSession<'c> {
    /// Start an empty session.
    #[must_use]
    pub fn new(content: &'c Content) -> Self {
        Self {
            content,
            answers: AnswerMap::new(),
            current: 0,
        }
    }

    /// Build a session from raw `(index, value)` pairs.
    ///
    /// Every pair goes through [`record_answer`](Self::record_answer), so the
    /// first invalid pair aborts the build.
    pub fn from_answers<I>(content: &'c Content, answers: I) -> Result<Self, SxmError>
    where
        I: IntoIterator<Item = (usize, u8)>,
    {
        let mut session = Self::new(content);
        for (index, raw) in answers {
            session.record_answer(index, AnswerValue::new(raw)?)?;
        }
        Ok(session)
    }

    /// The content this session runs over.
    #[must_use]
    pub fn content(&self) -> &'c Content {
        self.content
    }

    /// The recorded answers.
    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    // =========================================================================
    // RECORDING
    // =========================================================================

    /// Record (or overwrite) the answer for a question.
    ///
    /// An index outside `[0, question_count)` leaves the map untouched.
    pub fn record_answer(&mut self, index: usize, value: AnswerValue) -> Result<(), SxmError> {
        let count = self.content.question_count();
        if index >= count {
            return Err(SxmError::QuestionOutOfRange { index, count });
        }
        self.answers.insert(index, value);
        Ok(())
    }

    /// Answer the question under the cursor and move on.
    pub fn answer_current(&mut self, value: AnswerValue) -> Result<Advance, SxmError> {
        self.record_answer(self.current, value)?;

        let last = self.content.question_count().saturating_sub(1);
        if self.current < last {
            self.current = self.current.saturating_add(1);
            Ok(Advance::Next(self.current))
        } else {
            Ok(Advance::Finished)
        }
    }

    /// Get the answer recorded for a question.
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<AnswerValue> {
        self.answers.get(index)
    }

    /// Clear all answers and rewind the cursor (session reset).
    pub fn reset(&mut self) {
        self.answers.clear();
        self.current = 0;
    }

    // =========================================================================
    // PROGRESS
    // =========================================================================

    /// Index of the question under the cursor.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question under the cursor.
    #[must_use]
    pub fn current_question(&self) -> Option<&'c Question> {
        self.content.questions().get(self.current)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// True once every question has an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.content.question_count()
    }

    /// Share of answered questions, rounded half-up to a whole percent.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let total = self.content.question_count();
        if total == 0 {
            return 0;
        }
        let scaled = self
            .answers
            .len()
            .saturating_mul(100)
            .saturating_add(total / 2);
        (scaled / total).min(100) as u8
    }

    /// "Question {current} of {total}", 1-based.
    #[must_use]
    pub fn question_counter(&self) -> String {
        format!(
            "Question {} of {}",
            self.current.saturating_add(1),
            self.content.question_count()
        )
    }

    // =========================================================================
    // RESULTS
    // =========================================================================

    /// Score the current answers.
    pub fn result(&self) -> Result<AssessmentResult, SxmError> {
        AssessmentResult::compute(self.content, &self.answers)
    }
}

// =============================================================================
// TESTS
// =============================================================================
