//! # sxm-core
//!
//! The Assessment Scoring Engine for the software experience maturity (SXM)
//! survey - THE LOGIC.
//!
//! Answers go in, a maturity stage, a capability breakdown, targeted
//! recommendations and a text report come out.
//!
//! ## Pipeline
//!
//! ```text
//! AnswerMap ──► average_score ──► classify_stage ──► StageProfile
//!     │                                   │
//!     └──────► breakdown ──► select_recommendations ──► serialize_report
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network, no file I/O
//! - Content (questions, stages, templates) is data in [`Content`]
//! - Every operation is a synchronous recomputation from the answer map
//! - The core never panics; contract violations return [`SxmError`]
//!
//! ## Example
//!
//! ```
//! use sxm_core::{AnswerValue, AssessmentSession, Content, Stage};
//!
//! let mut session = AssessmentSession::new(Content::builtin());
//! for raw in [1, 2, 1, 2, 1] {
//!     session.answer_current(AnswerValue::new(raw)?)?;
//! }
//!
//! let result = session.result()?;
//! assert_eq!(result.stage, Stage::S1);
//! assert_eq!(result.display_score(), "1.4");
//! # Ok::<(), sxm_core::SxmError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod assessment;
pub mod content;
pub mod notify;
pub mod recommend;
pub mod report;
pub mod scoring;
pub mod session;
pub mod share;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{AnswerOption, AnswerValue, Question, Stage, SxmError};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use assessment::AssessmentResult;
pub use content::{
    Content, ContentFile, FallbackGuidance, RecommendationTemplate, StageEntry, StageProfile,
};
pub use notify::{AcknowledgingNotifier, Confirmation, ResultNotifier};
pub use recommend::select_recommendations;
pub use report::{Report, serialize_report};
pub use scoring::{Breakdown, CategoryScore, average_score, breakdown, classify_stage, format_score};
pub use session::{Advance, AnswerMap, AssessmentSession};
pub use share::ShareLinks;
