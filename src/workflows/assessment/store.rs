use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use super::catalog::{CatalogError, QuestionCatalog};
use super::domain::{
    AnswerRejection, AnswerSubmission, AnswerValue, QuestionId, Session, SessionId, SessionStatus,
};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SessionStore: Send + Sync {
    fn create_session(&self) -> Result<Session, SessionStoreError>;
    fn get_session(&self, session_id: &SessionId) -> Result<Session, SessionStoreError>;
    fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        value: AnswerValue,
    ) -> Result<AnswerReceipt, SessionStoreError>;
    /// Apply a batch atomically: every entry is validated before any entry is
    /// written, so a rejected batch leaves the session untouched.
    fn submit_answers(
        &self,
        session_id: &SessionId,
        batch: &[AnswerSubmission],
    ) -> Result<AnswerReceipt, SessionStoreError>;
    fn expire_stale_sessions(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
        retention: Duration,
    ) -> SweepOutcome;
    fn count_active(&self) -> usize;
}

/// Error enumeration for session store failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),
    #[error(transparent)]
    UnknownQuestion(#[from] CatalogError),
    #[error(transparent)]
    Rejected(#[from] AnswerRejection),
}

/// Acknowledgment returned for each accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerReceipt {
    pub session_id: SessionId,
    pub answered: usize,
    pub total: usize,
    pub complete: bool,
}

/// Result of one expiry sweep, surfaced for logging and monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepOutcome {
    pub expired: usize,
    pub evicted: usize,
}

/// Process-wide session storage.
///
/// The outer map takes a read lock for lookups and a write lock only for
/// insert and sweep; each session carries its own mutex, so submissions to
/// the same session serialize while different sessions never contend.
pub struct InMemorySessionStore {
    catalog: Arc<QuestionCatalog>,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl InMemorySessionStore {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self {
            catalog,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn entry(&self, session_id: &SessionId) -> Result<Arc<Mutex<Session>>, SessionStoreError> {
        let sessions = self.sessions.read().expect("session map lock poisoned");
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionStoreError::SessionNotFound(session_id.clone()))
    }

    fn validate(
        &self,
        session: &Session,
        question_id: QuestionId,
        value: &AnswerValue,
    ) -> Result<(), SessionStoreError> {
        let question = self.catalog.question(question_id)?;
        if !question.accepts(value) {
            return Err(AnswerRejection::ValueOutOfScale {
                session_id: session.session_id.clone(),
                question_id,
                value: value.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut Session,
        batch: &[AnswerSubmission],
        now: DateTime<Utc>,
    ) -> AnswerReceipt {
        for submission in batch {
            session
                .answers
                .insert(submission.question_id, submission.value.clone());
        }
        session.last_activity = now;

        let total = self.catalog.total_questions();
        if session.answers.len() == total && session.status == SessionStatus::InProgress {
            session.status = SessionStatus::Completed;
            session.completed_at = Some(now);
            debug!(session_id = %session.session_id, "assessment session completed");
        }

        AnswerReceipt {
            session_id: session.session_id.clone(),
            answered: session.answers.len(),
            total,
            complete: session.status == SessionStatus::Completed,
        }
    }

    fn submit(
        &self,
        session_id: &SessionId,
        batch: &[AnswerSubmission],
    ) -> Result<AnswerReceipt, SessionStoreError> {
        let entry = self.entry(session_id)?;
        let mut session = entry.lock().expect("session lock poisoned");

        if session.status != SessionStatus::InProgress {
            return Err(AnswerRejection::SessionClosed {
                session_id: session.session_id.clone(),
                status: session.status,
            }
            .into());
        }

        for submission in batch {
            self.validate(&session, submission.question_id, &submission.value)?;
        }

        Ok(self.apply(&mut session, batch, Utc::now()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn create_session(&self) -> Result<Session, SessionStoreError> {
        let session = Session::new(SessionId::generate(), Utc::now());
        let mut sessions = self.sessions.write().expect("session map lock poisoned");
        sessions.insert(
            session.session_id.clone(),
            Arc::new(Mutex::new(session.clone())),
        );
        debug!(session_id = %session.session_id, "assessment session created");
        Ok(session)
    }

    fn get_session(&self, session_id: &SessionId) -> Result<Session, SessionStoreError> {
        let entry = self.entry(session_id)?;
        let session = entry.lock().expect("session lock poisoned");
        Ok(session.clone())
    }

    fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: QuestionId,
        value: AnswerValue,
    ) -> Result<AnswerReceipt, SessionStoreError> {
        self.submit(
            session_id,
            &[AnswerSubmission { question_id, value }],
        )
    }

    fn submit_answers(
        &self,
        session_id: &SessionId,
        batch: &[AnswerSubmission],
    ) -> Result<AnswerReceipt, SessionStoreError> {
        self.submit(session_id, batch)
    }

    fn expire_stale_sessions(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
        retention: Duration,
    ) -> SweepOutcome {
        let mut sessions = self.sessions.write().expect("session map lock poisoned");
        let mut outcome = SweepOutcome::default();

        sessions.retain(|_, entry| {
            let mut session = entry.lock().expect("session lock poisoned");
            match session.status {
                SessionStatus::InProgress if session.last_activity + ttl < now => {
                    session.status = SessionStatus::Expired;
                    outcome.expired += 1;
                    true
                }
                SessionStatus::Expired | SessionStatus::Completed
                    if session.last_activity + retention < now =>
                {
                    outcome.evicted += 1;
                    false
                }
                _ => true,
            }
        });

        outcome
    }

    fn count_active(&self) -> usize {
        let sessions = self.sessions.read().expect("session map lock poisoned");
        sessions
            .values()
            .filter(|entry| {
                entry.lock().expect("session lock poisoned").status == SessionStatus::InProgress
            })
            .count()
    }
}
