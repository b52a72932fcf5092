use std::collections::{BTreeMap, HashMap};

use super::domain::{
    AggregatedAnswer, AggregationResult, RaterGroup, RaterRelation, RaterResponse, ScoringRule,
};

/// Partition key for responses; submissions without a relation tag still
/// participate in the unweighted path under the unknown bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum RelationKey {
    Known(RaterRelation),
    Unknown,
}

impl RelationKey {
    fn of(response: &RaterResponse) -> Self {
        match response.relation {
            Some(relation) => RelationKey::Known(relation),
            None => RelationKey::Unknown,
        }
    }
}

/// How group weights contribute to the aggregate.
///
/// The grouped variant carries shares already renormalized over the groups
/// that actually have responses, so a configured group nobody submitted for
/// never zeroes out the total; its weight is redistributed proportionally.
#[derive(Debug, Clone, PartialEq)]
enum WeightStrategy {
    Unweighted,
    Grouped(HashMap<RaterRelation, f64>),
}

#[derive(Debug, Default, Clone, Copy)]
struct ScoreAccumulator {
    sum: f64,
    count: usize,
}

impl ScoreAccumulator {
    fn push(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Combine N rater responses for one subject into a single total and one
/// aggregate per item.
///
/// The simple-average path applies when the campaign rule is `단순평균`, no
/// rater groups are configured, or the available weight sum is zero; the
/// weighted path otherwise averages each group first and blends group means
/// by their renormalized shares.
pub fn aggregate_evaluation_responses(
    responses: &[RaterResponse],
    rater_groups: &[RaterGroup],
    scoring_rule: Option<ScoringRule>,
) -> AggregationResult {
    if responses.is_empty() {
        return AggregationResult::empty();
    }

    let strategy = select_strategy(responses, rater_groups, scoring_rule);

    let mut totals: HashMap<RelationKey, ScoreAccumulator> = HashMap::new();
    let mut items: BTreeMap<u32, HashMap<RelationKey, ScoreAccumulator>> = BTreeMap::new();

    for response in responses {
        let key = RelationKey::of(response);
        totals.entry(key).or_default().push(response.total_score);
        for answer in &response.answers {
            items
                .entry(answer.item_id)
                .or_default()
                .entry(key)
                .or_default()
                .push(answer.score);
        }
    }

    let total_score = match &strategy {
        WeightStrategy::Unweighted => {
            let sum: f64 = responses.iter().map(|response| response.total_score).sum();
            sum / responses.len() as f64
        }
        WeightStrategy::Grouped(shares) => shares
            .iter()
            .filter_map(|(role, share)| {
                totals
                    .get(&RelationKey::Known(*role))
                    .map(|accumulator| accumulator.mean() * share)
            })
            .sum(),
    };

    let answers = items
        .iter()
        .map(|(item_id, by_role)| AggregatedAnswer {
            item_id: *item_id,
            score: item_score(by_role, &strategy),
            comment: String::new(),
        })
        .collect();

    AggregationResult {
        total_score,
        answers,
    }
}

fn item_score(
    by_role: &HashMap<RelationKey, ScoreAccumulator>,
    strategy: &WeightStrategy,
) -> f64 {
    match strategy {
        WeightStrategy::Unweighted => {
            // Mean across every role that submitted this item, unknowns included.
            let mut combined = ScoreAccumulator::default();
            for accumulator in by_role.values() {
                combined.sum += accumulator.sum;
                combined.count += accumulator.count;
            }
            combined.mean()
        }
        WeightStrategy::Grouped(shares) => shares
            .iter()
            .filter_map(|(role, share)| {
                by_role
                    .get(&RelationKey::Known(*role))
                    .map(|accumulator| accumulator.mean() * share)
            })
            .sum(),
    }
}

fn select_strategy(
    responses: &[RaterResponse],
    rater_groups: &[RaterGroup],
    scoring_rule: Option<ScoringRule>,
) -> WeightStrategy {
    if scoring_rule == Some(ScoringRule::SimpleAverage) || rater_groups.is_empty() {
        return WeightStrategy::Unweighted;
    }

    let available: Vec<&RaterGroup> = rater_groups
        .iter()
        .filter(|group| {
            responses
                .iter()
                .any(|response| response.relation == Some(group.role))
        })
        .collect();

    let available_weight_sum: f64 = available.iter().map(|group| group.weight).sum();
    if available_weight_sum <= 0.0 {
        return WeightStrategy::Unweighted;
    }

    let shares = available
        .into_iter()
        .map(|group| (group.role, group.weight / available_weight_sum))
        .collect();
    WeightStrategy::Grouped(shares)
}
