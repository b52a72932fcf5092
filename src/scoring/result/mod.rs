//! Assembly of the presentation-ready evaluation result from the aggregated
//! (and adjusted) response, the campaign template snapshot, and the
//! evaluation header.

mod summary;
mod views;

pub use summary::{build_word_cloud_data, competency_highlights};
pub use views::{
    AnswerDetailView, CompetencyView, EvaluationResultData, FeedbackView, SubjectView,
    WordCloudEntry,
};

use super::domain::{EvaluationRecord, FinalResponse, ItemAnswer, TemplateSnapshot};
use super::grading::{resolve_scoring_type, score_to_grade};

/// Title shown for feedback whose item has no usable title.
const FEEDBACK_TITLE_FALLBACK: &str = "피드백";

/// Build the viewable result record for one evaluated subject.
///
/// Every lookup has a documented fallback: a missing template degrades to
/// empty competency/feedback/word-cloud sections, a missing subject snapshot
/// falls back to the raw evaluatee fields. The function is total — callers
/// catch persistence errors before invoking it.
pub fn build_result_data(
    evaluation: &EvaluationRecord,
    template: Option<&TemplateSnapshot>,
    response: &FinalResponse,
) -> EvaluationResultData {
    let subject = subject_view(evaluation);

    let items = template.map(|snapshot| snapshot.items.as_slice()).unwrap_or(&[]);

    let competencies: Vec<CompetencyView> = items
        .iter()
        .map(|item| {
            let score = matched_answer(response, item.id)
                .map(|answer| answer.score)
                .unwrap_or(0.0);
            CompetencyView {
                name: item_title(item.title.as_str()),
                self_score: score,
                peer_score: 0.0,
                final_score: score,
            }
        })
        .collect();

    let (strengths, areas_for_improvement) = competency_highlights(&competencies);

    let peer_feedback: Vec<FeedbackView> = items
        .iter()
        .filter_map(|item| {
            let answer = matched_answer(response, item.id)?;
            let comment = answer.comment.trim();
            if comment.is_empty() {
                return None;
            }
            Some(FeedbackView {
                title: item_title(item.title.as_str()),
                comment: comment.to_string(),
            })
        })
        .collect();

    let answer_details: Vec<AnswerDetailView> = items
        .iter()
        .filter_map(|item| {
            let answer = matched_answer(response, item.id)?;
            Some(AnswerDetailView {
                item_id: item.id,
                title: item_title(item.title.as_str()),
                score: answer.score,
                grade: answer.grade.clone(),
                comment: answer.comment.trim().to_string(),
            })
        })
        .collect();

    let comments: Vec<&str> = peer_feedback
        .iter()
        .map(|feedback| feedback.comment.as_str())
        .collect();
    let word_cloud = build_word_cloud_data(&comments);
    let word_cloud_data = if word_cloud.is_empty() {
        None
    } else {
        Some(word_cloud)
    };

    let resolved = resolve_scoring_type(evaluation.scoring.rating_scale.as_deref(), response.total_score);
    let final_grade = score_to_grade(resolved.normalized_score, resolved.scoring_type);

    EvaluationResultData {
        subject,
        final_score: response.total_score,
        final_grade,
        scoring_type: resolved.scoring_type,
        summary: format!(
            "총점 {}점으로 평가가 완료되었습니다.",
            format_score(response.total_score)
        ),
        competencies,
        strengths,
        areas_for_improvement,
        peer_feedback,
        answer_details,
        word_cloud_data,
    }
}

fn subject_view(evaluation: &EvaluationRecord) -> SubjectView {
    let (name, department, position) = match &evaluation.subject {
        Some(snapshot) => (
            snapshot.name.clone(),
            snapshot.department.clone(),
            snapshot.position.clone(),
        ),
        None => (
            evaluation.evaluatee_name.clone(),
            evaluation.department.clone(),
            evaluation.position.clone(),
        ),
    };

    SubjectView {
        name,
        department: department.unwrap_or_default(),
        position: position.unwrap_or_default(),
        period: evaluation.period.clone().unwrap_or_default(),
    }
}

fn matched_answer(response: &FinalResponse, item_id: u32) -> Option<&ItemAnswer> {
    response.answers.iter().find(|answer| answer.item_id == item_id)
}

/// Whole scores render without a decimal tail, fractional ones keep one digit.
fn format_score(score: f64) -> String {
    if score.fract().abs() < 1e-9 {
        format!("{score:.0}")
    } else {
        format!("{score:.1}")
    }
}

fn item_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        FEEDBACK_TITLE_FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}
