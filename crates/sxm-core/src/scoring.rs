//! # Scoring
//!
//! Average score, stage classification and per-category breakdown.
//!
//! ## Stage Bands
//!
//! | Average | Stage |
//! |---------|-------|
//! | ≤ 1.5 | S1 |
//! | ≤ 2.5 | S2 |
//! | ≤ 3.5 | S3 |
//! | ≤ 4.5 | S4 |
//! | > 4.5 | S5 |
//!
//! Upper bounds are inclusive. This is a threshold ladder, not rounding to the
//! nearest integer: 1.5 is stage 1 and 1.51 is stage 2.
//!
//! This is the only module that does float arithmetic.
#![allow(clippy::float_arithmetic)]

use crate::session::AnswerMap;
use crate::types::{Question, Stage};
use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE THRESHOLDS
// =============================================================================

/// Highest average still classified as S1.
pub const S1_CEILING: f64 = 1.5;

/// Highest average still classified as S2.
pub const S2_CEILING: f64 = 2.5;

/// Highest average still classified as S3.
pub const S3_CEILING: f64 = 3.5;

/// Highest average still classified as S4.
pub const S4_CEILING: f64 = 4.5;

// =============================================================================
// AGGREGATION
// =============================================================================

/// Arithmetic mean of the recorded values, unrounded. 0 for an empty map.
#[must_use]
pub fn average_score(answers: &AnswerMap) -> f64 {
    if answers.is_empty() {
        return 0.0;
    }
    let sum: u32 = answers.values().map(|v| u32::from(v.value())).sum();
    f64::from(sum) / answers.len() as f64
}

/// Map an average onto its maturity stage.
#[must_use]
pub fn classify_stage(avg: f64) -> Stage {
    if avg <= S1_CEILING {
        Stage::S1
    } else if avg <= S2_CEILING {
        Stage::S2
    } else if avg <= S3_CEILING {
        Stage::S3
    } else if avg <= S4_CEILING {
        Stage::S4
    } else {
        Stage::S5
    }
}

/// Digits needed to print any finite `f64` below 2^53 exactly.
const EXACT_FRACTION_DIGITS: usize = 60;

/// Format a score with one decimal.
///
/// Rounds the exact binary value of `score`, with exact ties going up:
/// `1.25` → `"1.3"`, but `29.0 / 20.0` (stored as 1.4499999…) → `"1.4"`.
#[must_use]
pub fn format_score(score: f64) -> String {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, score.max(0.0));
    let Some((whole, fraction)) = exact.split_once('.') else {
        return "0.0".to_string();
    };

    let mut digits = fraction.bytes().map(|d| u64::from(d.saturating_sub(b'0')));
    let first = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|d| d >= 5);

    let tenths = whole
        .parse::<u64>()
        .unwrap_or(0)
        .saturating_mul(10)
        .saturating_add(first)
        .saturating_add(u64::from(round_up));
    format!("{}.{}", tenths / 10, tenths % 10)
}

// =============================================================================
// BREAKDOWN
// =============================================================================

/// Score of one capability category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    /// Recorded answer, or 0 when unanswered.
    pub score: u8,
}

/// Per-category scores in question declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown {
    entries: Vec<CategoryScore>,
}

impl Breakdown {
    /// Build a breakdown from `(category, score)` pairs.
    ///
    /// A repeated category overwrites the earlier score but keeps the
    /// earlier position.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        let mut breakdown = Self::default();
        for (category, score) in pairs {
            breakdown.set(category.into(), score);
        }
        breakdown
    }

    fn set(&mut self, category: String, score: u8) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.score = score,
            None => self.entries.push(CategoryScore { category, score }),
        }
    }

    /// Score of a category, if present.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.score)
    }

    #[must_use]
    pub fn entries(&self) -> &[CategoryScore] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Category scores for every question, unanswered questions scoring 0.
#[must_use]
pub fn breakdown(answers: &AnswerMap, questions: &[Question]) -> Breakdown {
    Breakdown::from_pairs(questions.iter().enumerate().map(|(index, question)| {
        let score = answers.get(index).map(|v| v.value()).unwrap_or(0);
        (question.category.as_str(), score)
    }))
}

// =============================================================================
// TESTS
// =============================================================================
