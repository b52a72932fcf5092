//! Evaluation scoring and adjustment engine.
//!
//! The computation core is pure and synchronous: the aggregator, adjuster,
//! grade resolver, and result builder each receive every input as an argument
//! and return a fresh value, so concurrent calls are trivially safe. Storage
//! and notification delivery live behind the repository/publisher traits and
//! stay with the caller.

pub mod adjustment;
pub mod aggregation;
pub mod domain;
pub mod grading;
pub mod repository;
pub mod result;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use adjustment::{apply_score_adjustments, AdjustedScore};
pub use aggregation::aggregate_evaluation_responses;
pub use domain::{
    adjustment_key, AdjustmentEntry, AdjustmentMode, AdjustmentPayload, AggregatedAnswer,
    AggregationResult, CampaignId, EvaluateeId, EvaluationRecord, FinalResponse, ItemAnswer,
    RaterGroup, RaterRelation, RaterResponse, RatingScale, ScoringConfig, ScoringRule,
    SubjectInfo, TemplateItem, TemplateSnapshot,
};
pub use grading::{resolve_scoring_type, score_to_grade, Grade, ResolvedScore, ScoringType};
pub use repository::{
    AdjustmentRecord, CampaignRecord, NotificationError, NotificationPublisher, RepositoryError,
    ScoreNotification, ScoringRepository,
};
pub use result::{
    build_result_data, build_word_cloud_data, competency_highlights, AnswerDetailView,
    CompetencyView, EvaluationResultData, FeedbackView, SubjectView, WordCloudEntry,
};
pub use router::scoring_router;
pub use service::{
    AdjustmentInput, AdjustmentRequest, EvaluationScoringService, ScoreSnapshot,
    ScoringServiceError,
};
