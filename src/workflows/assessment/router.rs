use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::Question;
use super::domain::{AnswerSubmission, AnswerValue, Dimension, SessionId};
use super::service::{AssessmentOutcome, AssessmentService, AssessmentServiceError};
use super::store::{AnswerReceipt, SessionStore, SessionStoreError};

/// Router builder exposing the assessment session endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/v1/assessment/sessions", post(start_handler::<S>))
        .route(
            "/api/v1/assessment/sessions/:session_id",
            get(progress_handler::<S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/answers",
            post(answer_handler::<S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/answers/batch",
            post(batch_handler::<S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/result",
            get(result_handler::<S>),
        )
        .with_state(service)
}

const ESTIMATED_MINUTES: u32 = 10;

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: SessionId,
    pub total_questions: usize,
    pub estimated_minutes: u32,
    pub questions: Vec<QuestionView>,
}

/// Client-facing question rendering. Deliberately omits per-option points so
/// the scoring key never leaves the server.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: u8,
    pub code: &'static str,
    pub dimension: Dimension,
    pub dimension_label: &'static str,
    pub kind: &'static str,
    pub prompt: &'static str,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub value: AnswerValue,
    pub label: &'static str,
}

impl QuestionView {
    fn from_question(question: &Question) -> Self {
        Self {
            id: question.id.0,
            code: question.code,
            dimension: question.dimension,
            dimension_label: question.dimension.label(),
            kind: question.kind.label(),
            prompt: question.prompt,
            options: question
                .options
                .iter()
                .map(|option| OptionView {
                    value: option.value.clone(),
                    label: option.label,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub session_id: SessionId,
    pub answered: usize,
    pub total: usize,
    pub progress: u8,
    pub complete: bool,
}

impl AnswerResponse {
    fn from_receipt(receipt: AnswerReceipt) -> Self {
        let progress = if receipt.total == 0 {
            100
        } else {
            ((receipt.answered * 100) / receipt.total) as u8
        };
        Self {
            session_id: receipt.session_id,
            answered: receipt.answered,
            total: receipt.total,
            progress,
            complete: receipt.complete,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BatchAnswerRequest {
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Serialize)]
pub struct SessionProgressResponse {
    pub session_id: SessionId,
    pub status: &'static str,
    pub answered: usize,
    pub total: usize,
    pub progress: u8,
    pub started_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub session_id: SessionId,
    pub composite_score: f64,
    pub composite_band: &'static str,
    pub dimensions: Vec<DimensionScoreView>,
    pub recommendations: Vec<RecommendationView>,
    pub next_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct DimensionScoreView {
    pub dimension: Dimension,
    pub dimension_label: &'static str,
    pub score: f64,
    pub band: &'static str,
    pub interpretation: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RecommendationView {
    pub text: String,
    pub triggering_dimensions: Vec<Dimension>,
    pub priority: usize,
}

impl ResultResponse {
    fn from_outcome(outcome: AssessmentOutcome) -> Self {
        let dimensions = Dimension::ordered()
            .into_iter()
            .filter_map(|dimension| {
                let score = outcome.report.dimension_scores.get(&dimension)?;
                let band = outcome.report.bands.get(&dimension)?;
                Some(DimensionScoreView {
                    dimension,
                    dimension_label: dimension.label(),
                    score: *score,
                    band: band.label(),
                    interpretation: dimension.interpretation(*band),
                })
            })
            .collect();

        Self {
            session_id: outcome.session_id,
            composite_score: outcome.report.composite_score,
            composite_band: outcome.report.composite_band.label(),
            dimensions,
            recommendations: outcome
                .recommendations
                .into_iter()
                .map(|recommendation| RecommendationView {
                    text: recommendation.text,
                    triggering_dimensions: recommendation.triggering_dimensions,
                    priority: recommendation.priority,
                })
                .collect(),
            next_steps: outcome.next_steps,
            completed_at: outcome.completed_at,
        }
    }
}

pub(crate) async fn start_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.start() {
        Ok(session) => {
            let response = StartSessionResponse {
                session_id: session.session_id,
                total_questions: service.catalog().total_questions(),
                estimated_minutes: ESTIMATED_MINUTES,
                questions: service
                    .catalog()
                    .all()
                    .iter()
                    .map(QuestionView::from_question)
                    .collect(),
            };
            (StatusCode::CREATED, axum::Json(response)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(submission): axum::Json<AnswerSubmission>,
) -> Response
where
    S: SessionStore + 'static,
{
    let session_id = SessionId(session_id);
    match service.submit_answer(&session_id, submission.question_id, submission.value) {
        Ok(receipt) => {
            (StatusCode::OK, axum::Json(AnswerResponse::from_receipt(receipt))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn batch_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<BatchAnswerRequest>,
) -> Response
where
    S: SessionStore + 'static,
{
    let session_id = SessionId(session_id);
    match service.submit_answers(&session_id, &request.answers) {
        Ok(receipt) => {
            (StatusCode::OK, axum::Json(AnswerResponse::from_receipt(receipt))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let session_id = SessionId(session_id);
    match service.session(&session_id) {
        Ok(session) => {
            let total = service.catalog().total_questions();
            let response = SessionProgressResponse {
                status: session.status.label(),
                answered: session.answered(),
                total,
                progress: session.progress_percent(total),
                started_at: session.created_at,
                last_activity: session.last_activity,
                session_id: session.session_id,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn result_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
{
    let session_id = SessionId(session_id);
    match service.result(&session_id) {
        Ok(outcome) => {
            (StatusCode::OK, axum::Json(ResultResponse::from_outcome(outcome))).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Store(SessionStoreError::SessionNotFound(_))
        | AssessmentServiceError::Store(SessionStoreError::UnknownQuestion(_)) => {
            StatusCode::NOT_FOUND
        }
        AssessmentServiceError::Store(SessionStoreError::Rejected(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AssessmentServiceError::NotComplete(_) => StatusCode::CONFLICT,
        AssessmentServiceError::Scoring(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = axum::Json(json!({ "error": error.to_string() }));
    (status, body).into_response()
}
