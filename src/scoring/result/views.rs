use serde::Serialize;

use crate::scoring::grading::{Grade, ScoringType};

/// Subject header shown at the top of a result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectView {
    pub name: String,
    pub department: String,
    pub position: String,
    pub period: String,
}

/// Per-item competency line in the result breakdown.
///
/// `peer_score` is always 0 for now: the aggregator folds every role into a
/// single per-item score before the builder runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyView {
    pub name: String,
    pub self_score: f64,
    pub peer_score: f64,
    pub final_score: f64,
}

/// One feedback comment paired with the item it was written against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackView {
    pub title: String,
    pub comment: String,
}

/// Full per-item detail row for drill-down views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerDetailView {
    pub item_id: u32,
    pub title: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    pub comment: String,
}

/// Word-cloud token with its display weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloudEntry {
    pub text: String,
    pub value: u32,
}

/// Presentation-ready evaluation result; built once per view request and
/// immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResultData {
    pub subject: SubjectView,
    pub final_score: f64,
    pub final_grade: Grade,
    pub scoring_type: ScoringType,
    pub summary: String,
    pub competencies: Vec<CompetencyView>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub peer_feedback: Vec<FeedbackView>,
    pub answer_details: Vec<AnswerDetailView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_cloud_data: Option<Vec<WordCloudEntry>>,
}
