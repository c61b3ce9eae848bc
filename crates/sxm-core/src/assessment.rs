//! # Assessment Result
//!
//! The derived view of a session: average, stage, breakdown and
//! recommendations. Recomputed on demand, never stored.

use crate::content::{Content, RecommendationTemplate, StageProfile};
use crate::recommend::select_recommendations;
use crate::report::{Report, serialize_report};
use crate::scoring::{Breakdown, average_score, breakdown, classify_stage, format_score};
use crate::session::AnswerMap;
use crate::types::{Stage, SxmError};
use serde::{Deserialize, Serialize};

/// Scored outcome of an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Unrounded mean of the recorded answers (0 when none).
    pub average_score: f64,
    pub stage: Stage,
    pub profile: StageProfile,
    pub breakdown: Breakdown,
    /// 1..=2 entries.
    pub recommendations: Vec<RecommendationTemplate>,
    /// Number of answers the result was computed from.
    pub answered: usize,
    /// Number of questions in the content.
    pub total_questions: usize,
}

impl AssessmentResult {
    /// Run the full scoring pipeline over an answer map.
    pub fn compute(content: &Content, answers: &AnswerMap) -> Result<Self, SxmError> {
        let average = average_score(answers);
        let stage = classify_stage(average);
        let profile = content.profile(stage)?.clone();
        let breakdown = breakdown(answers, content.questions());
        let recommendations = select_recommendations(&breakdown, stage, content)?;

        Ok(Self {
            average_score: average,
            stage,
            profile,
            breakdown,
            recommendations,
            answered: answers.len(),
            total_questions: content.question_count(),
        })
    }

    /// Average formatted to one decimal.
    #[must_use]
    pub fn display_score(&self) -> String {
        format_score(self.average_score)
    }

    /// True if every question contributed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answered == self.total_questions
    }

    /// Render the downloadable text report.
    #[must_use]
    pub fn report(&self, content: &Content) -> Report {
        Report {
            filename: content.download_filename().to_string(),
            body: serialize_report(
                content.report_title(),
                &self.profile,
                self.stage,
                self.average_score,
                &self.breakdown,
                &self.recommendations,
            ),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
