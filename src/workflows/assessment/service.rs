use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::catalog::QuestionCatalog;
use super::domain::{
    AnswerSubmission, AnswerValue, QuestionId, Session, SessionId, SessionNotComplete,
};
use super::recommendation::{Recommendation, RecommendationEngine};
use super::scoring::{ScoreReport, ScoringConfig, ScoringEngine, ScoringError};
use super::store::{AnswerReceipt, SessionStore, SessionStoreError};

/// Thin orchestration over the catalog, store, and the two engines. Holds no
/// state of its own and propagates component errors unchanged.
pub struct AssessmentService<S> {
    catalog: Arc<QuestionCatalog>,
    store: Arc<S>,
    scoring: ScoringEngine,
    recommendations: RecommendationEngine,
}

impl<S> AssessmentService<S>
where
    S: SessionStore + 'static,
{
    pub fn new(catalog: Arc<QuestionCatalog>, store: Arc<S>, config: ScoringConfig) -> Self {
        let recommendations = RecommendationEngine::new(config.recommendation_trigger);
        let scoring = ScoringEngine::new(catalog.clone(), config);
        Self {
            catalog,
            store,
            scoring,
            recommendations,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Open a fresh session.
    pub fn start(&self) -> Result<Session, AssessmentServiceError> {
        Ok(self.store.create_session()?)
    }

    pub fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        value: AnswerValue,
    ) -> Result<AnswerReceipt, AssessmentServiceError> {
        Ok(self.store.submit_answer(session_id, question_id, value)?)
    }

    pub fn submit_answers(
        &self,
        session_id: &SessionId,
        batch: &[AnswerSubmission],
    ) -> Result<AnswerReceipt, AssessmentServiceError> {
        Ok(self.store.submit_answers(session_id, batch)?)
    }

    /// Current session snapshot, e.g. for progress displays and resuming.
    pub fn session(&self, session_id: &SessionId) -> Result<Session, AssessmentServiceError> {
        Ok(self.store.get_session(session_id)?)
    }

    /// Score a completed session and derive its recommendations. The outcome
    /// is recomputed per request, never cached in the session.
    pub fn result(
        &self,
        session_id: &SessionId,
    ) -> Result<AssessmentOutcome, AssessmentServiceError> {
        let session = self.store.get_session(session_id)?;
        let answers = session.completed_answers(self.catalog.total_questions())?;
        let report = self.scoring.score(answers)?;
        let recommendations = self.recommendations.generate(&report);
        let next_steps = self.recommendations.next_steps(report.composite_band);

        Ok(AssessmentOutcome {
            session_id: session.session_id.clone(),
            report,
            recommendations,
            next_steps,
            completed_at: session.completed_at,
        })
    }
}

/// Composed result payload for a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentOutcome {
    pub session_id: SessionId,
    pub report: ScoreReport,
    pub recommendations: Vec<Recommendation>,
    pub next_steps: Vec<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Error raised by the assessment service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    #[error(transparent)]
    NotComplete(#[from] SessionNotComplete),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
