use std::collections::HashMap;

use super::views::{CompetencyView, WordCloudEntry};

/// How many competencies qualify as strengths or improvement areas.
const HIGHLIGHT_COUNT: usize = 2;

/// Most frequent tokens kept for the word cloud.
const WORD_CLOUD_LIMIT: usize = 10;

/// Derive strength/improvement sentences from the competency breakdown.
///
/// Competencies are ranked by final score descending; the top two with a
/// positive score become strengths and the bottom two of the same ranking,
/// reversed, become improvement areas. Fewer than two qualifying entries
/// yields fewer sentences, zero yields empty lists.
pub fn competency_highlights(competencies: &[CompetencyView]) -> (Vec<String>, Vec<String>) {
    let mut ranked: Vec<&CompetencyView> = competencies.iter().collect();
    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let strengths = ranked
        .iter()
        .filter(|competency| competency.final_score > 0.0)
        .take(HIGHLIGHT_COUNT)
        .map(|competency| format!("{} 항목에서 강점이 두드러집니다.", competency.name))
        .collect();

    let areas_for_improvement = ranked
        .iter()
        .rev()
        .filter(|competency| competency.final_score > 0.0)
        .take(HIGHLIGHT_COUNT)
        .map(|competency| format!("{} 항목은 개선 여지가 있습니다.", competency.name))
        .collect();

    (strengths, areas_for_improvement)
}

/// Build word-cloud entries from feedback comments.
///
/// Comments are tokenized on whitespace and `, . ; ! ?`, tokens of one
/// character or less are dropped, counts are case-sensitive, and the top ten
/// tokens by count survive (ties broken lexicographically so output is
/// deterministic). Display weight is `min(90, 40 + count * 15)`. Returns an
/// empty list when nothing qualifies; callers decide how to render absence.
pub fn build_word_cloud_data<S: AsRef<str>>(comments: &[S]) -> Vec<WordCloudEntry> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for comment in comments {
        let tokens = comment
            .as_ref()
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ';' | '!' | '?'));
        for token in tokens {
            if token.chars().count() > 1 {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(WORD_CLOUD_LIMIT)
        .map(|(text, count)| WordCloudEntry {
            text: text.to_string(),
            value: (40 + count * 15).min(90),
        })
        .collect()
}
