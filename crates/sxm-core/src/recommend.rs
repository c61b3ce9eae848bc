//! # Recommendation Selector
//!
//! Picks at most two recommendation templates for the weakest categories,
//! falling back to generic stage guidance so the result is never empty.
//!
//! ## Rules
//!
//! 1. Stable-sort the breakdown ascending by score (ties keep question order)
//! 2. Take the two lowest categories
//! 3. Keep a category's template if its score is ≤ [`GAP_CEILING`] and the
//!    content defines one (categories without a template are skipped, they do
//!    not pull in the third-lowest)
//! 4. Nothing kept: one synthetic "advancement" recommendation built from the
//!    stage's first focus area
//! 5. Truncate to [`MAX_RECOMMENDATIONS`]

use crate::content::{Content, RecommendationTemplate};
use crate::scoring::Breakdown;
use crate::types::{Stage, SxmError};

/// Number of lowest-scoring categories considered.
pub const CANDIDATE_COUNT: usize = 2;

/// Upper bound on returned recommendations.
pub const MAX_RECOMMENDATIONS: usize = 2;

/// Highest score still treated as a capability gap.
pub const GAP_CEILING: u8 = 3;

/// Select recommendations for a breakdown at a given stage.
///
/// Returns 1..=2 entries. Fails only if `content` has no profile for `stage`.
pub fn select_recommendations(
    breakdown: &Breakdown,
    stage: Stage,
    content: &Content,
) -> Result<Vec<RecommendationTemplate>, SxmError> {
    let mut ranked: Vec<_> = breakdown.entries().iter().collect();
    // sort_by is stable: equal scores keep declaration order
    ranked.sort_by(|a, b| a.score.cmp(&b.score));

    let mut recommendations: Vec<RecommendationTemplate> = ranked
        .into_iter()
        .take(CANDIDATE_COUNT)
        .filter(|entry| entry.score <= GAP_CEILING)
        .filter_map(|entry| content.template(&entry.category).cloned())
        .collect();

    if recommendations.is_empty() {
        recommendations.push(advancement_recommendation(stage, content)?);
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    Ok(recommendations)
}

/// Heading of the fallback recommendation.
///
/// The terminal stage has no successor, so it points at the profile's
/// `next_stage` label ("Continued Innovation") instead of a stage 6.
pub fn advancement_label(stage: Stage, content: &Content) -> Result<String, SxmError> {
    match stage.next() {
        Some(next) => Ok(format!(
            "Stage {} → Stage {} Advancement",
            stage.number(),
            next.number()
        )),
        None => {
            let profile = content.profile(stage)?;
            Ok(format!("Stage {} → {}", stage.number(), profile.next_stage))
        }
    }
}

fn advancement_recommendation(
    stage: Stage,
    content: &Content,
) -> Result<RecommendationTemplate, SxmError> {
    let profile = content.profile(stage)?;
    let fallback = content.fallback();

    Ok(RecommendationTemplate {
        category: advancement_label(stage, content)?,
        description: profile.focus_areas.first().cloned().unwrap_or_default(),
        priority: fallback.priority.clone(),
        business_case: fallback.business_case.clone(),
        tools: fallback.tools.clone(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
