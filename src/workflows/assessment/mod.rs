//! Founder readiness assessment: question catalog, session tracking,
//! scoring, and recommendation generation.
//!
//! The session store owns all mutable state; the scoring and recommendation
//! engines are pure functions over a completed answer set, so the same
//! answers always produce the same report.

pub mod catalog;
pub mod domain;
pub mod recommendation;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use catalog::{AnswerOption, CatalogError, Question, QuestionCatalog, QuestionKind};
pub use domain::{
    AnswerRejection, AnswerSubmission, AnswerValue, Band, Dimension, QuestionId, Session,
    SessionId, SessionNotComplete, SessionStatus,
};
pub use recommendation::{Recommendation, RecommendationEngine};
pub use router::assessment_router;
pub use scoring::{BandThresholds, ScoreReport, ScoringConfig, ScoringEngine, ScoringError};
pub use service::{AssessmentOutcome, AssessmentService, AssessmentServiceError};
pub use store::{
    AnswerReceipt, InMemorySessionStore, SessionStore, SessionStoreError, SweepOutcome,
};
