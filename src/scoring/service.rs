use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::adjustment::{apply_score_adjustments, AdjustedScore};
use super::aggregation::aggregate_evaluation_responses;
use super::domain::{
    AdjustmentEntry, AdjustmentPayload, AggregationResult, CampaignId, EvaluateeId,
    EvaluationRecord, FinalResponse,
};
use super::repository::{
    AdjustmentRecord, CampaignRecord, NotificationError, NotificationPublisher, RepositoryError,
    ScoreNotification, ScoringRepository,
};
use super::result::{build_result_data, EvaluationResultData};

/// Service composing the aggregator, adjuster, grade resolver, and result
/// builder over the storage and notification seams.
pub struct EvaluationScoringService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
}

/// Requested override values for one adjustment write. Values arrive raw;
/// the service persists the post-clamp values the adjuster actually applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<AdjustmentInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hq: Option<AdjustmentInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentInput {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Base and adjusted totals for one subject, plus the per-item aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSnapshot {
    pub base_score: f64,
    pub adjusted_score: f64,
    pub applied_manager: f64,
    pub applied_hq: f64,
    pub answers: Vec<super::domain::AggregatedAnswer>,
}

impl<R, N> EvaluationScoringService<R, N>
where
    R: ScoringRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    /// Recompute the aggregation snapshot for one subject from the raw
    /// submitted responses.
    pub fn aggregate(
        &self,
        campaign_id: &CampaignId,
        evaluatee_id: &EvaluateeId,
    ) -> Result<AggregationResult, ScoringServiceError> {
        let campaign = self.fetch_campaign(campaign_id)?;
        let responses = self.repository.responses(campaign_id, evaluatee_id)?;
        Ok(aggregate_evaluation_responses(
            &responses,
            &campaign.rater_groups,
            campaign.scoring.scoring_rule,
        ))
    }

    /// Aggregate and apply any stored overrides, returning base and adjusted
    /// totals side by side.
    pub fn score(
        &self,
        campaign_id: &CampaignId,
        evaluatee_id: &EvaluateeId,
    ) -> Result<ScoreSnapshot, ScoringServiceError> {
        let campaign = self.fetch_campaign(campaign_id)?;
        let responses = self.repository.responses(campaign_id, evaluatee_id)?;
        let aggregation = aggregate_evaluation_responses(
            &responses,
            &campaign.rater_groups,
            campaign.scoring.scoring_rule,
        );

        let stored = self.repository.adjustment(campaign_id, evaluatee_id)?;
        let adjusted = apply_score_adjustments(
            aggregation.total_score,
            stored.as_ref().map(|record| &record.payload),
            campaign.scoring.adjustment_mode,
            campaign.scoring.adjustment_range,
            campaign.scoring.rating_scale.as_deref(),
        );

        Ok(ScoreSnapshot {
            base_score: aggregation.total_score,
            adjusted_score: adjusted.adjusted_score,
            applied_manager: adjusted.applied_manager,
            applied_hq: adjusted.applied_hq,
            answers: aggregation.answers,
        })
    }

    /// Build the full presentation-ready result for one subject.
    pub fn result(
        &self,
        campaign_id: &CampaignId,
        evaluatee_id: &EvaluateeId,
    ) -> Result<EvaluationResultData, ScoringServiceError> {
        let campaign = self.fetch_campaign(campaign_id)?;
        let subject = self.repository.subject(campaign_id, evaluatee_id)?;
        let responses = self.repository.responses(campaign_id, evaluatee_id)?;

        let aggregation = aggregate_evaluation_responses(
            &responses,
            &campaign.rater_groups,
            campaign.scoring.scoring_rule,
        );
        let stored = self.repository.adjustment(campaign_id, evaluatee_id)?;
        let adjusted = apply_score_adjustments(
            aggregation.total_score,
            stored.as_ref().map(|record| &record.payload),
            campaign.scoring.adjustment_mode,
            campaign.scoring.adjustment_range,
            campaign.scoring.rating_scale.as_deref(),
        );

        let evaluatee_name = subject
            .as_ref()
            .map(|info| info.name.clone())
            .unwrap_or_else(|| evaluatee_id.to_string());
        let evaluation = EvaluationRecord {
            subject,
            evaluatee_name,
            department: None,
            position: None,
            period: campaign.period.clone(),
            scoring: campaign.scoring.clone(),
        };

        let response = FinalResponse::from_aggregation(&aggregation, adjusted.adjusted_score)
            .with_rater_comments(&responses);
        Ok(build_result_data(
            &evaluation,
            campaign.template.as_ref(),
            &response,
        ))
    }

    /// Apply and persist manager/HQ overrides for one subject.
    ///
    /// Actor identity and timestamp are explicit parameters so the engine
    /// stays a pure function of its inputs. The stored entries carry the
    /// clamped values the adjuster applied, not the requested ones, and a
    /// notification is published once the write lands.
    pub fn apply_adjustment(
        &self,
        campaign_id: &CampaignId,
        evaluatee_id: &EvaluateeId,
        request: AdjustmentRequest,
        adjusted_by: &str,
        adjusted_at: DateTime<Utc>,
    ) -> Result<AdjustedScore, ScoringServiceError> {
        let campaign = self.fetch_campaign(campaign_id)?;
        let responses = self.repository.responses(campaign_id, evaluatee_id)?;
        let aggregation = aggregate_evaluation_responses(
            &responses,
            &campaign.rater_groups,
            campaign.scoring.scoring_rule,
        );

        let requested = AdjustmentPayload {
            manager_adjustment: request.manager.as_ref().map(|input| AdjustmentEntry {
                value: input.value,
                note: input.note.clone(),
                adjusted_by: None,
                adjusted_at: None,
            }),
            hq_adjustment: request.hq.as_ref().map(|input| AdjustmentEntry {
                value: input.value,
                note: input.note.clone(),
                adjusted_by: None,
                adjusted_at: None,
            }),
        };

        let adjusted = apply_score_adjustments(
            aggregation.total_score,
            Some(&requested),
            campaign.scoring.adjustment_mode,
            campaign.scoring.adjustment_range,
            campaign.scoring.rating_scale.as_deref(),
        );

        let payload = AdjustmentPayload {
            manager_adjustment: request.manager.map(|input| AdjustmentEntry {
                value: adjusted.applied_manager,
                note: input.note,
                adjusted_by: Some(adjusted_by.to_string()),
                adjusted_at: Some(adjusted_at),
            }),
            hq_adjustment: request.hq.map(|input| AdjustmentEntry {
                value: adjusted.applied_hq,
                note: input.note,
                adjusted_by: Some(adjusted_by.to_string()),
                adjusted_at: Some(adjusted_at),
            }),
        };

        self.repository.store_adjustment(AdjustmentRecord {
            campaign_id: campaign_id.clone(),
            evaluatee_id: evaluatee_id.clone(),
            payload,
        })?;

        let mut details = BTreeMap::new();
        details.insert(
            "adjusted_score".to_string(),
            format!("{:.2}", adjusted.adjusted_score),
        );
        details.insert("adjusted_by".to_string(), adjusted_by.to_string());
        self.notifications.publish(ScoreNotification {
            template: "score_adjusted".to_string(),
            campaign_id: campaign_id.clone(),
            evaluatee_id: evaluatee_id.clone(),
            details,
        })?;

        Ok(adjusted)
    }

    fn fetch_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignRecord, ScoringServiceError> {
        self.repository
            .campaign(campaign_id)?
            .ok_or_else(|| ScoringServiceError::CampaignNotFound(campaign_id.clone()))
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("campaign '{0}' not found")]
    CampaignNotFound(CampaignId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
