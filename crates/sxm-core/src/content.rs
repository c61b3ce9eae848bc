//! # Content Tables
//!
//! The question set, the maturity-stage profiles and the recommendation
//! templates are data, not code. They are bundled in [`Content`], which the
//! scoring pipeline reads but never mutates.
//!
//! ## Sources
//!
//! - [`Content::builtin`]: the SXM assessment copy, compiled in
//! - [`Content::from_file`]: a deserialized [`ContentFile`] (the app loads these
//!   from TOML), checked by [`Content::validate`] before use
//!
//! Lookups are keyed by stable identifiers (`Stage`, category name) rather
//! than positions, so reordering questions never changes which template a
//! category maps to.

use crate::types::{AnswerOption, MAX_ANSWER_VALUE, MIN_ANSWER_VALUE, Question, Stage, SxmError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Fixed filename offered for the downloadable report.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "sxm-maturity-assessment-results.txt";

/// Title line of the text report.
pub const DEFAULT_REPORT_TITLE: &str = "SXM MATURITY ASSESSMENT RESULTS";

/// Message attached to outbound share links.
pub const DEFAULT_SHARE_MESSAGE: &str = "I just completed the Software Experience Maturity Assessment. Find out where your organization stands:";

// =============================================================================
// PROFILES & TEMPLATES
// =============================================================================

/// Display profile of one maturity stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProfile {
    /// Display label, e.g. "Fragmented & Reactive".
    pub label: String,
    /// Urgency label, e.g. "Critical".
    pub urgency: String,
    /// Hex colour hint for presentation layers.
    pub color: String,
    /// Descriptive summary shown with the result.
    pub message: String,
    /// Label of the stage that follows.
    pub next_stage: String,
    /// Ordered improvement actions toward the next stage.
    pub focus_areas: Vec<String>,
}

/// Improvement guidance for one capability gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTemplate {
    /// Recommendation heading (not the question category).
    pub category: String,
    pub description: String,
    /// "High", "Medium", "Strategic", ...
    pub priority: String,
    pub business_case: String,
    /// Capability names to evaluate.
    pub tools: Vec<String>,
}

/// Generic guidance used when no capability template applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackGuidance {
    pub tools: Vec<String>,
    pub priority: String,
    pub business_case: String,
}

/// One `[[stages]]` entry of a content file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageEntry {
    /// Stage number, 1..=5.
    pub stage: u8,
    #[serde(flatten)]
    pub profile: StageProfile,
}

/// On-disk shape of a content bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default = "default_report_title")]
    pub report_title: String,
    #[serde(default = "default_download_filename")]
    pub download_filename: String,
    #[serde(default = "default_share_message")]
    pub share_message: String,
    pub questions: Vec<Question>,
    pub stages: Vec<StageEntry>,
    /// Templates keyed by question category.
    #[serde(default)]
    pub recommendations: BTreeMap<String, RecommendationTemplate>,
    pub fallback: FallbackGuidance,
}

fn default_report_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

fn default_download_filename() -> String {
    DEFAULT_DOWNLOAD_FILENAME.to_string()
}

fn default_share_message() -> String {
    DEFAULT_SHARE_MESSAGE.to_string()
}

/// A download filename must be a single plain path component that can sit
/// inside a quoted `Content-Disposition` value.
fn validate_download_filename(name: &str) -> Result<(), SxmError> {
    if name.trim().is_empty() || name == "." || name == ".." {
        return Err(SxmError::InvalidContent(format!(
            "download filename '{}' is not a file name",
            name
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|&c| matches!(c, '/' | '\\' | '"') || c.is_control())
    {
        return Err(SxmError::InvalidContent(format!(
            "download filename must not contain {:?}",
            bad
        )));
    }
    Ok(())
}

// =============================================================================
// CONTENT BUNDLE
// =============================================================================

/// Immutable set of tables the assessment runs over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    report_title: String,
    download_filename: String,
    share_message: String,
    questions: Vec<Question>,
    stages: BTreeMap<Stage, StageProfile>,
    recommendations: BTreeMap<String, RecommendationTemplate>,
    fallback: FallbackGuidance,
}

impl Default for Content {
    fn default() -> Self {
        build_builtin()
    }
}

impl Content {
    /// The compiled-in SXM assessment content.
    #[must_use]
    pub fn builtin() -> &'static Content {
        static BUILTIN: OnceLock<Content> = OnceLock::new();
        BUILTIN.get_or_init(build_builtin)
    }

    /// Build a validated bundle from a deserialized content file.
    pub fn from_file(file: ContentFile) -> Result<Self, SxmError> {
        let mut stages = BTreeMap::new();
        for entry in file.stages {
            let stage = Stage::from_number(entry.stage).ok_or_else(|| {
                SxmError::InvalidContent(format!("unknown stage number {}", entry.stage))
            })?;
            if stages.insert(stage, entry.profile).is_some() {
                return Err(SxmError::InvalidContent(format!(
                    "{} is defined more than once",
                    stage
                )));
            }
        }

        let content = Self {
            report_title: file.report_title,
            download_filename: file.download_filename,
            share_message: file.share_message,
            questions: file.questions,
            stages,
            recommendations: file.recommendations,
            fallback: file.fallback,
        };
        content.validate()?;
        Ok(content)
    }

    /// Check the structural rules every bundle must satisfy.
    pub fn validate(&self) -> Result<(), SxmError> {
        if self.questions.is_empty() {
            return Err(SxmError::InvalidContent(
                "at least one question is required".to_string(),
            ));
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.category.trim().is_empty() {
                return Err(SxmError::InvalidContent(format!(
                    "question {} has an empty category",
                    index
                )));
            }
            if question.options.is_empty() {
                return Err(SxmError::InvalidContent(format!(
                    "question {} has no options",
                    index
                )));
            }
            if let Some(bad) = question
                .options
                .iter()
                .find(|o| !(MIN_ANSWER_VALUE..=MAX_ANSWER_VALUE).contains(&o.value))
            {
                return Err(SxmError::InvalidContent(format!(
                    "question {} has option value {} outside {}..={}",
                    index, bad.value, MIN_ANSWER_VALUE, MAX_ANSWER_VALUE
                )));
            }
        }

        for stage in Stage::ALL {
            let profile = self
                .stages
                .get(&stage)
                .ok_or(SxmError::MissingStageProfile(stage))?;
            if profile.focus_areas.is_empty() {
                return Err(SxmError::InvalidContent(format!(
                    "{} has no focus areas",
                    stage
                )));
            }
        }

        if self.fallback.tools.is_empty() {
            return Err(SxmError::InvalidContent(
                "fallback guidance needs at least one capability".to_string(),
            ));
        }

        validate_download_filename(&self.download_filename)?;

        if self.report_title.trim().is_empty() {
            return Err(SxmError::InvalidContent(
                "report title must not be empty".to_string(),
            ));
        }
        if self.report_title.chars().any(char::is_control) {
            return Err(SxmError::InvalidContent(
                "report title must not contain control characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Questions in declaration order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Profile of a stage.
    pub fn profile(&self, stage: Stage) -> Result<&StageProfile, SxmError> {
        self.stages
            .get(&stage)
            .ok_or(SxmError::MissingStageProfile(stage))
    }

    /// Template for a question category, if one exists.
    #[must_use]
    pub fn template(&self, category: &str) -> Option<&RecommendationTemplate> {
        self.recommendations.get(category)
    }

    /// Generic guidance for the fallback recommendation.
    #[must_use]
    pub fn fallback(&self) -> &FallbackGuidance {
        &self.fallback
    }

    #[must_use]
    pub fn report_title(&self) -> &str {
        &self.report_title
    }

    #[must_use]
    pub fn download_filename(&self) -> &str {
        &self.download_filename
    }

    #[must_use]
    pub fn share_message(&self) -> &str {
        &self.share_message
    }
}

// =============================================================================
// BUILT-IN CONTENT
// =============================================================================

fn question(category: &str, text: &str, options: [&str; 5]) -> Question {
    let options = options
        .iter()
        .zip(MIN_ANSWER_VALUE..=MAX_ANSWER_VALUE)
        .map(|(text, value)| AnswerOption::new(value, *text))
        .collect();
    Question::new(category, text, options)
}

fn profile(
    label: &str,
    urgency: &str,
    color: &str,
    message: &str,
    next_stage: &str,
    focus_areas: [&str; 4],
) -> StageProfile {
    StageProfile {
        label: label.to_string(),
        urgency: urgency.to_string(),
        color: color.to_string(),
        message: message.to_string(),
        next_stage: next_stage.to_string(),
        focus_areas: focus_areas.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn template(
    category: &str,
    description: &str,
    priority: &str,
    business_case: &str,
    tools: [&str; 5],
) -> RecommendationTemplate {
    RecommendationTemplate {
        category: category.to_string(),
        description: description.to_string(),
        priority: priority.to_string(),
        business_case: business_case.to_string(),
        tools: tools.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn build_builtin() -> Content {
    let questions = vec![
        question(
            "Overall maturity",
            "What feels most reactive or frustrating about your current approach to software experiences?",
            [
                "Everything feels like firefighting - we're constantly reacting to problems",
                "We have some basic processes but they're inconsistent across teams",
                "We have good processes but struggle to scale them company-wide",
                "We have enterprise-wide processes but they're mostly reactive",
                "We proactively optimize experiences using predictive insights",
            ],
        ),
        question(
            "Data gathering",
            "How easy is it today to get a clear view of user experiences across your products or internal tools?",
            [
                "Very difficult - feedback is fragmented and anecdotal",
                "We have basic consolidation but limited tagging and organization",
                "We have scaled research with behavioral links to feedback",
                "We have enterprise-wide capture systems in place",
                "We use predictive feedback collection with AI analysis",
            ],
        ),
        question(
            "Learning and analysis",
            "Do your teams spend more time debating the data than acting on it?",
            [
                "Yes - we have 'Swiss cheese' data that teams don't trust",
                "Sometimes - we have retroactive tagging and early dashboards",
                "Rarely - we have real-time insights and a culture shift toward data",
                "No - we have portfolio-wide analytics that teams trust",
                "Never - we have predictive, AI-driven insights",
            ],
        ),
        question(
            "Acting on insights",
            "How do you currently help users (customers or employees) succeed in the moment of need?",
            [
                "Manual training and reactive communications only",
                "Targeted segmentation with basic guides",
                "Personalized guidance with measurable impact",
                "Cross-functional orchestration of user experiences",
                "Real-time AI optimization of user journeys",
            ],
        ),
        question(
            "AI data readiness",
            "Do you have a single source of truth for experience data, or is it fragmented across systems?",
            [
                "Multiple conflicting systems with no unified view",
                "Consolidated core systems with basic governance",
                "Democratized access with shared KPIs across teams",
                "Unified enterprise data with a Center of Excellence",
                "Predictive, ecosystem-wide data integration",
            ],
        ),
    ];

    let mut stages = BTreeMap::new();
    stages.insert(
        Stage::S1,
        profile(
            "Fragmented & Reactive",
            "Critical",
            "#FF4876",
            "You're in firefighting mode. Feedback lives in silos, analytics are patchy or mistrusted, and most improvements rely on manual training or one-off fixes. Your organization is dealing with fragmented tools, anecdotal decisions, and reactive approaches to software experience management.",
            "Consolidated & Proving",
            [
                "Establish basic measurement and data consolidation",
                "Deploy initial feedback collection tools",
                "Train internal champions to build trust in data",
                "Set up pilot teams with defined success metrics",
            ],
        ),
    );
    stages.insert(
        Stage::S2,
        profile(
            "Consolidated & Proving",
            "High priority",
            "#FF6B35",
            "You have initial data consolidation, basic guides, and early ROI proof points. Some teams show promise with small wins, but results are inconsistent and limited in scope. You're beginning to move beyond reactive firefighting toward more systematic approaches.",
            "Scaling & Systematic",
            [
                "Document measurable ROI from pilot programs",
                "Expand successful initiatives to more teams",
                "Standardize measurement practices in product development",
                "Roll out self-service analytics capabilities",
            ],
        ),
    );
    stages.insert(
        Stage::S3,
        profile(
            "Scaling & Systematic",
            "Moderate",
            "#FFD700",
            "You have standardized measurement, cross-team alignment, and measurable outcomes. However, maturity is uneven across teams, data definitions don't always match, and campaigns lack coordination. You're scaling proven approaches but need better standardization.",
            "Integrated & Governed",
            [
                "Create enterprise-wide standards linking experience to business goals",
                "Coordinate roadmaps across teams and departments",
                "Integrate platforms across all systems",
                "Deploy unified governance structures and shared OKRs",
            ],
        ),
    );
    stages.insert(
        Stage::S4,
        profile(
            "Integrated & Governed",
            "Opportunity",
            "#90EE90",
            "You have enterprise-wide SXM, unified data, and governance in place. Most improvements are systematic rather than reactive, with good data governance and cross-functional coordination. However, you're still primarily reactive rather than predictive in your approach.",
            "Predictive & Strategic",
            [
                "Leverage AI-powered, predictive experience insights",
                "Drive proactive customer success and real-time personalization",
                "Embed experience data into strategic decision-making",
                "Build an experience-first organizational culture",
            ],
        ),
    );
    stages.insert(
        Stage::S5,
        profile(
            "Predictive & Strategic",
            "Strategic",
            "#00FF00",
            "You have AI-driven insights, predictive optimization, and experience-led strategy. Software experience management is a competitive advantage, with experience data driving strategic decisions and real-time personalization. You're leading the market in SXM maturity.",
            "Continued Innovation",
            [
                "Scale SXM expertise across your broader ecosystem",
                "Establish strategic partnerships and thought leadership",
                "Continuously evolve platform capabilities with next-gen AI",
                "Maintain competitive advantage through innovation",
            ],
        ),
    );

    let mut recommendations = BTreeMap::new();
    recommendations.insert(
        "Data gathering".to_string(),
        template(
            "Data collection & feedback systems",
            "Implement comprehensive user behavior tracking and feedback collection",
            "High",
            "Enable data-driven decisions by consolidating fragmented feedback sources into a unified view of user experiences across all touchpoints.",
            [
                "Behavioral analytics platforms",
                "In-app feedback collection",
                "Session replay tools",
                "User journey mapping",
                "Cross-platform data integration",
            ],
        ),
    );
    recommendations.insert(
        "Learning and analysis".to_string(),
        template(
            "Analytics & insights infrastructure",
            "Build trusted, real-time analytics capabilities that teams actually use",
            "High",
            "Reduce time spent debating data quality and increase time spent acting on insights, leading to faster product iterations and improved user outcomes.",
            [
                "Self-service analytics platforms",
                "Real-time dashboards",
                "Data democratization tools",
                "Advanced segmentation",
                "Predictive analytics",
            ],
        ),
    );
    recommendations.insert(
        "Acting on insights".to_string(),
        template(
            "User guidance & experience optimization",
            "Deploy in-app guidance and automated user success systems",
            "Medium",
            "Reduce support costs and increase user activation by providing proactive, in-context guidance that helps users succeed at the moment of need.",
            [
                "In-app onboarding flows",
                "Contextual help systems",
                "Automated user journeys",
                "A/B testing platforms",
                "Personalization engines",
            ],
        ),
    );
    recommendations.insert(
        "AI data readiness".to_string(),
        template(
            "Data governance & integration",
            "Establish unified data architecture with proper governance",
            "High",
            "Create a single source of truth that enables consistent decision-making across teams and reduces conflicts over data definitions and metrics.",
            [
                "Data integration platforms",
                "Governance frameworks",
                "Unified KPI dashboards",
                "Cross-team collaboration tools",
                "Data quality monitoring",
            ],
        ),
    );

    let fallback = FallbackGuidance {
        tools: [
            "Platform consolidation",
            "Advanced analytics",
            "Cross-functional alignment",
            "Strategic planning",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect(),
        priority: "Strategic".to_string(),
        business_case: "Advance your SXM maturity to the next stage by focusing on the key capabilities that differentiate high-performing organizations.".to_string(),
    };

    Content {
        report_title: DEFAULT_REPORT_TITLE.to_string(),
        download_filename: DEFAULT_DOWNLOAD_FILENAME.to_string(),
        share_message: DEFAULT_SHARE_MESSAGE.to_string(),
        questions,
        stages,
        recommendations,
        fallback,
    }
}

// =============================================================================
// TESTS
// =============================================================================
