use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for evaluation campaigns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignId(pub String);

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for evaluated employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluateeId(pub String);

impl fmt::Display for EvaluateeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite key under which adjustment documents are stored.
pub fn adjustment_key(campaign: &CampaignId, evaluatee: &EvaluateeId) -> String {
    format!("{}_{}", campaign.0, evaluatee.0)
}

/// Relationship between a rater and the evaluated subject.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RaterRelation {
    #[serde(rename = "SELF")]
    SelfReview,
    #[serde(rename = "PEER")]
    Peer,
    #[serde(rename = "LEADER")]
    Leader,
    #[serde(rename = "MEMBER")]
    Member,
}

impl RaterRelation {
    pub const fn label(self) -> &'static str {
        match self {
            RaterRelation::SelfReview => "self",
            RaterRelation::Peer => "peer",
            RaterRelation::Leader => "leader",
            RaterRelation::Member => "member",
        }
    }

    pub fn ordered() -> [RaterRelation; 4] {
        [
            RaterRelation::SelfReview,
            RaterRelation::Peer,
            RaterRelation::Leader,
            RaterRelation::Member,
        ]
    }
}

/// One scored answer inside a rater's submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAnswer {
    pub item_id: u32,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default)]
    pub comment: String,
}

/// One rater's submission for one evaluated subject.
///
/// `answers` may be empty when the subject has no items or the template
/// snapshot was unavailable at submission time; aggregation degrades to a
/// zero-score output in that case. A missing `relation` partitions the
/// response under an unknown bucket rather than being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaterResponse {
    #[serde(default)]
    pub answers: Vec<ItemAnswer>,
    pub total_score: f64,
    #[serde(default)]
    pub relation: Option<RaterRelation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_email: Option<String>,
}

/// Campaign-configured rater category with its contribution share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaterGroup {
    pub role: RaterRelation,
    pub weight: f64,
    #[serde(default)]
    pub required: bool,
}

/// Aggregation rule labels as stored on campaign documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringRule {
    #[serde(rename = "가중합")]
    WeightedSum,
    #[serde(rename = "단순평균")]
    SimpleAverage,
    #[serde(rename = "총점합산")]
    TotalSum,
}

/// Whether manual overrides are absolute points or a percentage of the base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentMode {
    #[default]
    Points,
    Percent,
}

/// Native rating scales the platform recognizes.
///
/// Campaign documents carry the scale as a free-form string; anything that
/// does not parse here is treated as an unrecognized scale, which disables
/// score normalization and the final `[0, max]` clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingScale {
    FivePoint,
    SevenPoint,
    TenPoint,
    HundredPoint,
}

impl RatingScale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "5점" => Some(RatingScale::FivePoint),
            "7점" => Some(RatingScale::SevenPoint),
            "10점" => Some(RatingScale::TenPoint),
            "100점" => Some(RatingScale::HundredPoint),
            _ => None,
        }
    }

    pub const fn max_score(self) -> f64 {
        match self {
            RatingScale::FivePoint => 5.0,
            RatingScale::SevenPoint => 7.0,
            RatingScale::TenPoint => 10.0,
            RatingScale::HundredPoint => 100.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RatingScale::FivePoint => "5점",
            RatingScale::SevenPoint => "7점",
            RatingScale::TenPoint => "10점",
            RatingScale::HundredPoint => "100점",
        }
    }
}

/// Scoring knobs read from the campaign/evaluation record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub adjustment_mode: AdjustmentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_range: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_rule: Option<ScoringRule>,
}

/// One named manual override (manager or HQ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_at: Option<DateTime<Utc>>,
}

/// At most two overrides; an absent slot means no override from that source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_adjustment: Option<AdjustmentEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hq_adjustment: Option<AdjustmentEntry>,
}

impl AdjustmentPayload {
    pub fn is_empty(&self) -> bool {
        self.manager_adjustment.is_none() && self.hq_adjustment.is_none()
    }
}

/// Ephemeral aggregation snapshot; recomputed per view, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub total_score: f64,
    pub answers: Vec<AggregatedAnswer>,
}

impl AggregationResult {
    pub fn empty() -> Self {
        Self {
            total_score: 0.0,
            answers: Vec::new(),
        }
    }
}

/// Per-item aggregate produced by the response aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedAnswer {
    pub item_id: u32,
    pub score: f64,
    #[serde(default)]
    pub comment: String,
}

/// Subject display snapshot taken from the campaign's organization data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Evaluation header consumed by the result builder.
///
/// `subject` is the campaign snapshot; when it is unavailable the builder
/// falls back to the raw `evaluatee_name`/`department`/`position` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<SubjectInfo>,
    pub evaluatee_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// One evaluated item from the campaign template snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Template snapshot carried on the campaign document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSnapshot {
    #[serde(default)]
    pub items: Vec<TemplateItem>,
}

/// Final per-subject response fed into the result builder: the aggregated
/// (and, when overrides exist, adjusted) total plus per-item answers. The
/// answers keep whatever comments the source carried; aggregated answers
/// arrive with empty comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalResponse {
    pub total_score: f64,
    #[serde(default)]
    pub answers: Vec<ItemAnswer>,
}

impl FinalResponse {
    /// Lift an aggregation snapshot into builder input, replacing the total
    /// with the adjusted score when one was applied.
    pub fn from_aggregation(aggregation: &AggregationResult, total_score: f64) -> Self {
        Self {
            total_score,
            answers: aggregation
                .answers
                .iter()
                .map(|answer| ItemAnswer {
                    item_id: answer.item_id,
                    score: answer.score,
                    grade: None,
                    comment: answer.comment.clone(),
                })
                .collect(),
        }
    }

    /// Aggregated answers carry empty comments; fold the raters' written
    /// feedback back in, per item, so the feedback and word-cloud sections of
    /// a result have something to show.
    pub fn with_rater_comments(mut self, responses: &[RaterResponse]) -> Self {
        for answer in &mut self.answers {
            let comments: Vec<&str> = responses
                .iter()
                .flat_map(|response| response.answers.iter())
                .filter(|raw| raw.item_id == answer.item_id)
                .map(|raw| raw.comment.trim())
                .filter(|comment| !comment.is_empty())
                .collect();
            answer.comment = comments.join("\n");
        }
        self
    }
}
