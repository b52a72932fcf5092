use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::common::*;
use crate::scoring::router::{
    adjustment_handler, result_handler, score_handler, AdjustmentRequestBody,
};
use crate::scoring::service::{AdjustmentInput, AdjustmentRequest, EvaluationScoringService};

fn path() -> Path<(String, String)> {
    Path(("2026-h1".to_string(), "emp-041".to_string()))
}

#[tokio::test]
async fn score_endpoint_returns_snapshot() {
    let (service, _repository, _notifications) = build_service();
    let service = Arc::new(service);

    let response = score_handler(State(service), path()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["base_score"].as_f64(), Some(78.0));
    assert_eq!(body["adjusted_score"].as_f64(), Some(78.0));
}

#[tokio::test]
async fn result_endpoint_returns_report_payload() {
    let (service, _repository, _notifications) = build_service();
    let service = Arc::new(service);

    let response = result_handler(State(service), path()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["subject"]["name"].as_str(), Some("김하나"));
    assert_eq!(body["final_grade"].as_str(), Some("B"));
    assert_eq!(body["competencies"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn adjustment_endpoint_applies_and_echoes_clamped_values() {
    let (service, repository, _notifications) = build_service();
    let service = Arc::new(service);

    let body = AdjustmentRequestBody {
        request: AdjustmentRequest {
            manager: Some(AdjustmentInput {
                value: 25.0,
                note: None,
            }),
            hq: None,
        },
        adjusted_by: "manager-kim".to_string(),
    };
    let response = adjustment_handler(State(service), path(), axum::Json(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["applied_manager"].as_f64(), Some(10.0));
    assert_eq!(payload["adjusted_score"].as_f64(), Some(88.0));
    assert!(repository
        .stored_adjustment(&campaign_id(), &evaluatee_id())
        .is_some());
}

#[tokio::test]
async fn unknown_campaign_maps_to_not_found() {
    let (service, _repository, _notifications) = build_service();
    let service = Arc::new(service);

    let response = score_handler(
        State(service),
        Path(("missing".to_string(), "emp-041".to_string())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn repository_outage_maps_to_internal_error() {
    let service = Arc::new(EvaluationScoringService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifications::default()),
    ));

    let response = result_handler(State(service), path()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
