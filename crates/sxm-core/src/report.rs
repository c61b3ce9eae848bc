//! # Text Report
//!
//! Plain-text serialization of an assessment result. The layout is the file
//! format of the downloadable artifact and is kept byte-for-byte stable:
//!
//! ```text
//! {title}
//!
//! Current Stage: {label} (Stage {n})
//! Overall Score: {avg:.1}/5.0
//!
//! ASSESSMENT SUMMARY:
//! {message}
//!
//! CAPABILITY BREAKDOWN:
//! {category}: {score}/5
//!
//! NEXT STAGE: {next_stage}
//!
//! KEY FOCUS AREAS FOR ADVANCEMENT:
//! {i}. {area}
//!
//! RECOMMENDED VENDOR EVALUATION PRIORITIES:
//!
//! {i}. {category}
//! Description: {description}
//! Priority: {priority}
//! Business case: {business_case}
//! Key capabilities: {tool}, {tool}, ...
//!
//! ```

use crate::content::{RecommendationTemplate, StageProfile};
use crate::scoring::{Breakdown, format_score};
use crate::types::Stage;
use serde::{Deserialize, Serialize};

/// A rendered report and the filename it is offered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub filename: String,
    pub body: String,
}

/// Serialize a result into the report text.
#[must_use]
pub fn serialize_report(
    title: &str,
    profile: &StageProfile,
    stage: Stage,
    average_score: f64,
    breakdown: &Breakdown,
    recommendations: &[RecommendationTemplate],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", title));
    out.push_str(&format!(
        "Current Stage: {} (Stage {})\n",
        profile.label,
        stage.number()
    ));
    out.push_str(&format!(
        "Overall Score: {}/5.0\n\n",
        format_score(average_score)
    ));
    out.push_str(&format!("ASSESSMENT SUMMARY:\n{}\n\n", profile.message));

    out.push_str("CAPABILITY BREAKDOWN:\n");
    for entry in breakdown.entries() {
        out.push_str(&format!("{}: {}/5\n", entry.category, entry.score));
    }
    out.push('\n');

    out.push_str(&format!("NEXT STAGE: {}\n\n", profile.next_stage));
    out.push_str("KEY FOCUS AREAS FOR ADVANCEMENT:\n");
    for (i, area) in profile.focus_areas.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i.saturating_add(1), area));
    }
    out.push('\n');

    out.push_str("RECOMMENDED VENDOR EVALUATION PRIORITIES:\n\n");
    for (i, rec) in recommendations.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i.saturating_add(1), rec.category));
        out.push_str(&format!("Description: {}\n", rec.description));
        out.push_str(&format!("Priority: {}\n", rec.priority));
        out.push_str(&format!("Business case: {}\n", rec.business_case));
        out.push_str(&format!("Key capabilities: {}\n\n", rec.tools.join(", ")));
    }

    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> StageProfile {
        StageProfile {
            label: "Scaling & Systematic".to_string(),
            urgency: "Moderate".to_string(),
            color: "#FFD700".to_string(),
            message: "Summary text.".to_string(),
            next_stage: "Integrated & Governed".to_string(),
            focus_areas: vec!["First".to_string(), "Second".to_string()],
        }
    }

    fn recommendation() -> RecommendationTemplate {
        RecommendationTemplate {
            category: "Data governance & integration".to_string(),
            description: "Unify data".to_string(),
            priority: "High".to_string(),
            business_case: "One source of truth.".to_string(),
            tools: vec!["Governance frameworks".to_string(), "KPI dashboards".to_string()],
        }
    }

    #[test]
    fn golden_output() {
        let breakdown = Breakdown::from_pairs([("Data gathering", 3), ("AI data readiness", 2)]);
        let text = serialize_report(
            "TITLE",
            &profile(),
            Stage::S3,
            2.75,
            &breakdown,
            &[recommendation()],
        );

        let expected = "TITLE\n\
\n\
Current Stage: Scaling & Systematic (Stage 3)\n\
Overall Score: 2.8/5.0\n\
\n\
ASSESSMENT SUMMARY:\n\
Summary text.\n\
\n\
CAPABILITY BREAKDOWN:\n\
Data gathering: 3/5\n\
AI data readiness: 2/5\n\
\n\
NEXT STAGE: Integrated & Governed\n\
\n\
KEY FOCUS AREAS FOR ADVANCEMENT:\n\
1. First\n\
2. Second\n\
\n\
RECOMMENDED VENDOR EVALUATION PRIORITIES:\n\
\n\
1. Data governance & integration\n\
Description: Unify data\n\
Priority: High\n\
Business case: One source of truth.\n\
Key capabilities: Governance frameworks, KPI dashboards\n\
\n";

        assert_eq!(text, expected);
    }

    #[test]
    fn numbers_multiple_recommendations() {
        let text = serialize_report(
            "T",
            &profile(),
            Stage::S3,
            3.0,
            &Breakdown::default(),
            &[recommendation(), recommendation()],
        );
        assert!(text.contains("\n1. Data governance & integration\n"));
        assert!(text.contains("\n2. Data governance & integration\n"));
        assert!(text.ends_with("KPI dashboards\n\n"));
    }
}
