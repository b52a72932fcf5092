use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{
    AdjustmentPayload, CampaignId, EvaluateeId, RaterGroup, RaterResponse, ScoringConfig,
    SubjectInfo, TemplateSnapshot,
};

/// Campaign document as the service consumes it: rater-group weights, the
/// scoring knobs, and the template snapshot taken when the campaign launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_id: CampaignId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub rater_groups: Vec<RaterGroup>,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateSnapshot>,
}

/// Stored manual-override document, kept under the composite
/// `campaignId_evaluateeId` key (see [`super::domain::adjustment_key`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    pub campaign_id: CampaignId,
    pub evaluatee_id: EvaluateeId,
    pub payload: AdjustmentPayload,
}

/// Storage abstraction so the scoring service can be exercised in isolation.
/// Implementations own concurrency around fetches and serialize concurrent
/// adjustment writes; the engine itself never touches storage.
pub trait ScoringRepository: Send + Sync {
    fn campaign(&self, id: &CampaignId) -> Result<Option<CampaignRecord>, RepositoryError>;
    fn subject(
        &self,
        campaign: &CampaignId,
        evaluatee: &EvaluateeId,
    ) -> Result<Option<SubjectInfo>, RepositoryError>;
    fn responses(
        &self,
        campaign: &CampaignId,
        evaluatee: &EvaluateeId,
    ) -> Result<Vec<RaterResponse>, RepositoryError>;
    fn adjustment(
        &self,
        campaign: &CampaignId,
        evaluatee: &EvaluateeId,
    ) -> Result<Option<AdjustmentRecord>, RepositoryError>;
    fn store_adjustment(&self, record: AdjustmentRecord) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (webhook proxy, mail adapter); delivery stays
/// outside the engine.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: ScoreNotification) -> Result<(), NotificationError>;
}

/// Notification payload emitted when an adjustment lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreNotification {
    pub template: String,
    pub campaign_id: CampaignId,
    pub evaluatee_id: EvaluateeId,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
