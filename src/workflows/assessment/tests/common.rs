use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::catalog::QuestionCatalog;
use crate::workflows::assessment::domain::{AnswerSubmission, AnswerValue, QuestionId};
use crate::workflows::assessment::scoring::{ScoringConfig, ScoringEngine};
use crate::workflows::assessment::service::AssessmentService;
use crate::workflows::assessment::store::InMemorySessionStore;

pub(super) fn catalog() -> Arc<QuestionCatalog> {
    Arc::new(QuestionCatalog::standard())
}

pub(super) fn build_store() -> (Arc<InMemorySessionStore>, Arc<QuestionCatalog>) {
    let catalog = catalog();
    let store = Arc::new(InMemorySessionStore::new(catalog.clone()));
    (store, catalog)
}

pub(super) fn build_service() -> (
    Arc<AssessmentService<InMemorySessionStore>>,
    Arc<InMemorySessionStore>,
) {
    let catalog = catalog();
    let store = Arc::new(InMemorySessionStore::new(catalog.clone()));
    let service = Arc::new(AssessmentService::new(
        catalog,
        store.clone(),
        ScoringConfig::default(),
    ));
    (service, store)
}

pub(super) fn scoring_engine() -> ScoringEngine {
    ScoringEngine::new(catalog(), ScoringConfig::default())
}

pub(super) fn scale(id: u8, value: u8) -> AnswerSubmission {
    AnswerSubmission {
        question_id: QuestionId(id),
        value: AnswerValue::Scale(value),
    }
}

pub(super) fn choice(id: u8, value: &str) -> AnswerSubmission {
    AnswerSubmission {
        question_id: QuestionId(id),
        value: AnswerValue::Choice(value.to_string()),
    }
}

/// Maximum-scoring submission for every catalog question.
pub(super) fn max_submissions() -> Vec<AnswerSubmission> {
    vec![
        scale(1, 5),
        scale(2, 5),
        scale(3, 5),
        choice(4, "more_5_years"),
        choice(5, "yes"),
        scale(6, 5),
        choice(7, "yes"),
        choice(8, "yes"),
        scale(9, 5),
        choice(10, "yes"),
        choice(11, "10_30k"),
        scale(12, 5),
        choice(13, "ready"),
        choice(14, "yes"),
        scale(15, 5),
    ]
}

/// Minimum-scoring submission for every catalog question.
pub(super) fn min_submissions() -> Vec<AnswerSubmission> {
    vec![
        scale(1, 1),
        scale(2, 1),
        scale(3, 1),
        choice(4, "no_experience"),
        choice(5, "no"),
        scale(6, 1),
        choice(7, "no"),
        choice(8, "no"),
        scale(9, 1),
        choice(10, "no"),
        choice(11, "unclear"),
        scale(12, 1),
        choice(13, "idea"),
        choice(14, "no"),
        scale(15, 1),
    ]
}

/// Weak financial planning (20.0) and market understanding (46.7), maximum
/// scores everywhere else.
pub(super) fn uneven_submissions() -> Vec<AnswerSubmission> {
    vec![
        scale(1, 5),
        scale(2, 5),
        scale(3, 5),
        choice(4, "more_5_years"),
        choice(5, "yes"),
        scale(6, 5),
        choice(7, "no"),
        choice(8, "partial"),
        scale(9, 3),
        choice(10, "no"),
        choice(11, "unclear"),
        scale(12, 1),
        choice(13, "ready"),
        choice(14, "yes"),
        scale(15, 5),
    ]
}

/// Weak financial planning only, maximum scores everywhere else.
pub(super) fn weak_finance_submissions() -> Vec<AnswerSubmission> {
    let mut submissions = max_submissions();
    submissions[9] = choice(10, "no");
    submissions[10] = choice(11, "unclear");
    submissions[11] = scale(12, 1);
    submissions
}

pub(super) fn answers_map(batch: &[AnswerSubmission]) -> BTreeMap<QuestionId, AnswerValue> {
    batch
        .iter()
        .map(|submission| (submission.question_id, submission.value.clone()))
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
