use super::common::*;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::assessment::assessment_router;

fn build_router() -> axum::Router {
    let (service, _) = build_service();
    assessment_router(service)
}

async fn start_session(router: &axum::Router) -> (String, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/assessment/sessions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CREATED);

    let payload = read_json_body(response).await;
    let session_id = payload
        .get("session_id")
        .and_then(Value::as_str)
        .expect("session id present")
        .to_string();
    (session_id, payload)
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("request")
}

#[tokio::test]
async fn start_route_returns_the_question_list() {
    let router = build_router();
    let (_, payload) = start_session(&router).await;

    assert_eq!(payload.get("total_questions"), Some(&json!(15)));
    let questions = payload
        .get("questions")
        .and_then(Value::as_array)
        .expect("questions array");
    assert_eq!(questions.len(), 15);

    let first = &questions[0];
    assert_eq!(first.get("id"), Some(&json!(1)));
    assert_eq!(first.get("code"), Some(&json!("ENT-001")));

    // the scoring key never leaves the server
    let options = first
        .get("options")
        .and_then(Value::as_array)
        .expect("options array");
    assert!(!options.is_empty());
    for option in options {
        assert!(option.get("points").is_none());
        assert!(option.get("value").is_some());
        assert!(option.get("label").is_some());
    }
}

#[tokio::test]
async fn answer_route_tracks_progress() {
    let router = build_router();
    let (session_id, _) = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/assessment/sessions/{session_id}/answers"),
            &json!({ "question_id": 1, "value": 4 }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("answered"), Some(&json!(1)));
    assert_eq!(payload.get("complete"), Some(&json!(false)));
    assert_eq!(payload.get("progress"), Some(&json!(6)));
}

#[tokio::test]
async fn answer_route_rejects_values_outside_the_scale() {
    let router = build_router();
    let (session_id, _) = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/assessment/sessions/{session_id}/answers"),
            &json!({ "question_id": 1, "value": 9 }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn answer_route_returns_not_found_for_unknown_question() {
    let router = build_router();
    let (session_id, _) = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/assessment/sessions/{session_id}/answers"),
            &json!({ "question_id": 16, "value": 3 }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn answer_route_returns_not_found_for_unknown_session() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/assessment/sessions/never-created/answers",
            &json!({ "question_id": 1, "value": 3 }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn result_route_conflicts_before_completion() {
    let router = build_router();
    let (session_id, _) = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/assessment/sessions/{session_id}/result"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn progress_route_returns_a_snapshot() {
    let router = build_router();
    let (session_id, _) = start_session(&router).await;

    let response = router
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/assessment/sessions/{session_id}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("status"), Some(&json!("in_progress")));
    assert_eq!(payload.get("answered"), Some(&json!(0)));
    assert_eq!(payload.get("total"), Some(&json!(15)));
}

#[tokio::test]
async fn batch_route_completes_and_result_reports_perfect_scores() {
    let router = build_router();
    let (session_id, _) = start_session(&router).await;

    let answers: Vec<Value> = max_submissions()
        .into_iter()
        .map(|submission| {
            json!({
                "question_id": submission.question_id.0,
                "value": submission.value,
            })
        })
        .collect();

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/assessment/sessions/{session_id}/answers/batch"),
            &json!({ "answers": answers }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("complete"), Some(&json!(true)));
    assert_eq!(payload.get("progress"), Some(&json!(100)));

    let response = router
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/assessment/sessions/{session_id}/result"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload.get("composite_score"), Some(&json!(100.0)));
    assert_eq!(payload.get("composite_band"), Some(&json!("Excellent")));

    let dimensions = payload
        .get("dimensions")
        .and_then(Value::as_array)
        .expect("dimensions array");
    assert_eq!(dimensions.len(), 5);
    for dimension in dimensions {
        assert_eq!(dimension.get("score"), Some(&json!(100.0)));
        assert_eq!(dimension.get("band"), Some(&json!("Excellent")));
    }

    let recommendations = payload
        .get("recommendations")
        .and_then(Value::as_array)
        .expect("recommendations array");
    assert_eq!(recommendations.len(), 1);
}
