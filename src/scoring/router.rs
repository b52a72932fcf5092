use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{CampaignId, EvaluateeId};
use super::repository::{NotificationPublisher, RepositoryError, ScoringRepository};
use super::service::{AdjustmentRequest, EvaluationScoringService, ScoringServiceError};

/// Router builder exposing the per-subject score, result, and adjustment
/// endpoints over a repository-backed service.
pub fn scoring_router<R, N>(service: Arc<EvaluationScoringService<R, N>>) -> Router
where
    R: ScoringRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/campaigns/:campaign_id/evaluatees/:evaluatee_id/score",
            get(score_handler::<R, N>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/evaluatees/:evaluatee_id/result",
            get(result_handler::<R, N>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/evaluatees/:evaluatee_id/adjustments",
            post(adjustment_handler::<R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdjustmentRequestBody {
    #[serde(flatten)]
    pub request: AdjustmentRequest,
    pub adjusted_by: String,
}

pub(crate) async fn score_handler<R, N>(
    State(service): State<Arc<EvaluationScoringService<R, N>>>,
    Path((campaign_id, evaluatee_id)): Path<(String, String)>,
) -> Response
where
    R: ScoringRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let campaign = CampaignId(campaign_id);
    let evaluatee = EvaluateeId(evaluatee_id);
    match service.score(&campaign, &evaluatee) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn result_handler<R, N>(
    State(service): State<Arc<EvaluationScoringService<R, N>>>,
    Path((campaign_id, evaluatee_id)): Path<(String, String)>,
) -> Response
where
    R: ScoringRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let campaign = CampaignId(campaign_id);
    let evaluatee = EvaluateeId(evaluatee_id);
    match service.result(&campaign, &evaluatee) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn adjustment_handler<R, N>(
    State(service): State<Arc<EvaluationScoringService<R, N>>>,
    Path((campaign_id, evaluatee_id)): Path<(String, String)>,
    axum::Json(body): axum::Json<AdjustmentRequestBody>,
) -> Response
where
    R: ScoringRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let campaign = CampaignId(campaign_id);
    let evaluatee = EvaluateeId(evaluatee_id);
    match service.apply_adjustment(
        &campaign,
        &evaluatee,
        body.request,
        &body.adjusted_by,
        Utc::now(),
    ) {
        Ok(applied) => (StatusCode::OK, axum::Json(applied)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScoringServiceError) -> Response {
    match error {
        ScoringServiceError::CampaignNotFound(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ScoringServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "record not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
