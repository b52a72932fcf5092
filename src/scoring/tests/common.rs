use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::scoring::domain::{
    AdjustmentMode, CampaignId, EvaluateeId, ItemAnswer, RaterGroup, RaterRelation, RaterResponse,
    ScoringConfig, SubjectInfo, TemplateItem, TemplateSnapshot,
};
use crate::scoring::repository::{
    AdjustmentRecord, CampaignRecord, NotificationError, NotificationPublisher, RepositoryError,
    ScoreNotification, ScoringRepository,
};
use crate::scoring::service::EvaluationScoringService;

pub(super) fn campaign_id() -> CampaignId {
    CampaignId("2026-h1".to_string())
}

pub(super) fn evaluatee_id() -> EvaluateeId {
    EvaluateeId("emp-041".to_string())
}

pub(super) fn response(
    relation: Option<RaterRelation>,
    total_score: f64,
    answers: Vec<ItemAnswer>,
) -> RaterResponse {
    RaterResponse {
        answers,
        total_score,
        relation,
        completed_at: None,
        evaluator_name: None,
        evaluator_email: None,
    }
}

pub(super) fn answer(item_id: u32, score: f64, comment: &str) -> ItemAnswer {
    ItemAnswer {
        item_id,
        score,
        grade: None,
        comment: comment.to_string(),
    }
}

pub(super) fn rater_group(role: RaterRelation, weight: f64) -> RaterGroup {
    RaterGroup {
        role,
        weight,
        required: false,
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        adjustment_mode: AdjustmentMode::Points,
        adjustment_range: Some(10.0),
        rating_scale: Some("100점".to_string()),
        scoring_rule: None,
    }
}

pub(super) fn template() -> TemplateSnapshot {
    TemplateSnapshot {
        items: vec![
            TemplateItem {
                id: 1,
                title: "협업".to_string(),
                description: None,
            },
            TemplateItem {
                id: 2,
                title: "전문성".to_string(),
                description: None,
            },
            TemplateItem {
                id: 3,
                title: "리더십".to_string(),
                description: None,
            },
        ],
    }
}

pub(super) fn campaign() -> CampaignRecord {
    CampaignRecord {
        campaign_id: campaign_id(),
        name: "2026 상반기 역량평가".to_string(),
        period: Some("2026 상반기".to_string()),
        rater_groups: vec![
            rater_group(RaterRelation::SelfReview, 40.0),
            rater_group(RaterRelation::Leader, 60.0),
        ],
        scoring: scoring_config(),
        template: Some(template()),
    }
}

pub(super) fn seeded_responses() -> Vec<RaterResponse> {
    vec![
        response(
            Some(RaterRelation::SelfReview),
            90.0,
            vec![answer(1, 90.0, ""), answer(2, 85.0, "")],
        ),
        response(
            Some(RaterRelation::Leader),
            70.0,
            vec![
                answer(1, 70.0, "꾸준한 협업 자세가 인상적입니다"),
                answer(2, 75.0, ""),
            ],
        ),
    ]
}

pub(super) fn build_service() -> (
    EvaluationScoringService<MemoryScoringRepository, MemoryNotifications>,
    Arc<MemoryScoringRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryScoringRepository::default());
    repository.seed_campaign(campaign());
    repository.seed_responses(campaign_id(), evaluatee_id(), seeded_responses());
    repository.seed_subject(
        campaign_id(),
        evaluatee_id(),
        SubjectInfo {
            name: "김하나".to_string(),
            department: Some("플랫폼팀".to_string()),
            position: Some("매니저".to_string()),
        },
    );
    let notifications = Arc::new(MemoryNotifications::default());
    let service = EvaluationScoringService::new(repository.clone(), notifications.clone());
    (service, repository, notifications)
}

#[derive(Default)]
pub(super) struct MemoryScoringRepository {
    campaigns: Mutex<HashMap<CampaignId, CampaignRecord>>,
    subjects: Mutex<HashMap<String, SubjectInfo>>,
    responses: Mutex<HashMap<String, Vec<RaterResponse>>>,
    adjustments: Mutex<HashMap<String, AdjustmentRecord>>,
}

impl MemoryScoringRepository {
    pub(super) fn seed_campaign(&self, record: CampaignRecord) {
        self.campaigns
            .lock()
            .expect("campaign mutex poisoned")
            .insert(record.campaign_id.clone(), record);
    }

    pub(super) fn seed_subject(
        &self,
        campaign: CampaignId,
        evaluatee: EvaluateeId,
        subject: SubjectInfo,
    ) {
        self.subjects
            .lock()
            .expect("subject mutex poisoned")
            .insert(crate::scoring::adjustment_key(&campaign, &evaluatee), subject);
    }

    pub(super) fn seed_responses(
        &self,
        campaign: CampaignId,
        evaluatee: EvaluateeId,
        responses: Vec<RaterResponse>,
    ) {
        self.responses
            .lock()
            .expect("response mutex poisoned")
            .insert(
                crate::scoring::adjustment_key(&campaign, &evaluatee),
                responses,
            );
    }

    pub(super) fn stored_adjustment(
        &self,
        campaign: &CampaignId,
        evaluatee: &EvaluateeId,
    ) -> Option<AdjustmentRecord> {
        self.adjustments
            .lock()
            .expect("adjustment mutex poisoned")
            .get(&crate::scoring::adjustment_key(campaign, evaluatee))
            .cloned()
    }
}

impl ScoringRepository for MemoryScoringRepository {
    fn campaign(&self, id: &CampaignId) -> Result<Option<CampaignRecord>, RepositoryError> {
        Ok(self
            .campaigns
            .lock()
            .expect("campaign mutex poisoned")
            .get(id)
            .cloned())
    }

    fn subject(
        &self,
        campaign: &CampaignId,
        evaluatee: &EvaluateeId,
    ) -> Result<Option<SubjectInfo>, RepositoryError> {
        Ok(self
            .subjects
            .lock()
            .expect("subject mutex poisoned")
            .get(&crate::scoring::adjustment_key(campaign, evaluatee))
            .cloned())
    }

    fn responses(
        &self,
        campaign: &CampaignId,
        evaluatee: &EvaluateeId,
    ) -> Result<Vec<RaterResponse>, RepositoryError> {
        Ok(self
            .responses
            .lock()
            .expect("response mutex poisoned")
            .get(&crate::scoring::adjustment_key(campaign, evaluatee))
            .cloned()
            .unwrap_or_default())
    }

    fn adjustment(
        &self,
        campaign: &CampaignId,
        evaluatee: &EvaluateeId,
    ) -> Result<Option<AdjustmentRecord>, RepositoryError> {
        Ok(self.stored_adjustment(campaign, evaluatee))
    }

    fn store_adjustment(&self, record: AdjustmentRecord) -> Result<(), RepositoryError> {
        self.adjustments
            .lock()
            .expect("adjustment mutex poisoned")
            .insert(
                crate::scoring::adjustment_key(&record.campaign_id, &record.evaluatee_id),
                record,
            );
        Ok(())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    events: Mutex<Vec<ScoreNotification>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<ScoreNotification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: ScoreNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ScoringRepository for UnavailableRepository {
    fn campaign(&self, _id: &CampaignId) -> Result<Option<CampaignRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn subject(
        &self,
        _campaign: &CampaignId,
        _evaluatee: &EvaluateeId,
    ) -> Result<Option<SubjectInfo>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn responses(
        &self,
        _campaign: &CampaignId,
        _evaluatee: &EvaluateeId,
    ) -> Result<Vec<RaterResponse>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn adjustment(
        &self,
        _campaign: &CampaignId,
        _evaluatee: &EvaluateeId,
    ) -> Result<Option<AdjustmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn store_adjustment(&self, _record: AdjustmentRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
