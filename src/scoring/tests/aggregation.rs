use super::common::*;
use crate::scoring::aggregation::aggregate_evaluation_responses;
use crate::scoring::domain::{RaterRelation, ScoringRule};

#[test]
fn empty_responses_aggregate_to_zero() {
    let groups = vec![rater_group(RaterRelation::Peer, 50.0)];
    let result = aggregate_evaluation_responses(&[], &groups, Some(ScoringRule::WeightedSum));

    assert_eq!(result.total_score, 0.0);
    assert!(result.answers.is_empty());
}

#[test]
fn weighted_total_blends_group_means_by_share() {
    let responses = vec![
        response(Some(RaterRelation::SelfReview), 90.0, Vec::new()),
        response(Some(RaterRelation::Leader), 70.0, Vec::new()),
    ];
    let groups = vec![
        rater_group(RaterRelation::SelfReview, 40.0),
        rater_group(RaterRelation::Leader, 60.0),
    ];

    let result = aggregate_evaluation_responses(&responses, &groups, None);

    assert_close(result.total_score, 78.0);
}

#[test]
fn missing_group_weight_is_redistributed() {
    // Peer is configured but nobody from that role submitted; its 50 share
    // must flow to the groups that did respond instead of zeroing the total.
    let responses = vec![
        response(Some(RaterRelation::SelfReview), 80.0, Vec::new()),
        response(Some(RaterRelation::Leader), 60.0, Vec::new()),
    ];
    let groups = vec![
        rater_group(RaterRelation::SelfReview, 25.0),
        rater_group(RaterRelation::Leader, 25.0),
        rater_group(RaterRelation::Peer, 50.0),
    ];

    let result = aggregate_evaluation_responses(&responses, &groups, None);

    assert_close(result.total_score, 70.0);
}

#[test]
fn zero_available_weight_falls_back_to_simple_average() {
    let responses = vec![response(Some(RaterRelation::Peer), 80.0, Vec::new())];
    let groups = vec![rater_group(RaterRelation::Peer, 0.0)];

    let result = aggregate_evaluation_responses(&responses, &groups, None);

    assert_close(result.total_score, 80.0);
}

#[test]
fn simple_average_rule_ignores_group_weights() {
    let responses = vec![
        response(Some(RaterRelation::SelfReview), 90.0, Vec::new()),
        response(Some(RaterRelation::Leader), 70.0, Vec::new()),
    ];
    let groups = vec![
        rater_group(RaterRelation::SelfReview, 40.0),
        rater_group(RaterRelation::Leader, 60.0),
    ];

    let result =
        aggregate_evaluation_responses(&responses, &groups, Some(ScoringRule::SimpleAverage));

    assert_close(result.total_score, 80.0);
}

#[test]
fn missing_groups_average_all_responses() {
    let responses = vec![
        response(Some(RaterRelation::SelfReview), 100.0, Vec::new()),
        response(Some(RaterRelation::Peer), 60.0, Vec::new()),
        response(Some(RaterRelation::Member), 80.0, Vec::new()),
    ];

    let result = aggregate_evaluation_responses(&responses, &[], None);

    assert_close(result.total_score, 80.0);
}

#[test]
fn untagged_responses_join_the_simple_average() {
    let responses = vec![
        response(None, 60.0, vec![answer(1, 60.0, "")]),
        response(Some(RaterRelation::Peer), 80.0, vec![answer(1, 80.0, "")]),
    ];

    let result = aggregate_evaluation_responses(&responses, &[], None);

    assert_close(result.total_score, 70.0);
    assert_eq!(result.answers.len(), 1);
    assert_close(result.answers[0].score, 70.0);
}

#[test]
fn per_item_scores_follow_group_shares() {
    let responses = vec![
        response(
            Some(RaterRelation::SelfReview),
            90.0,
            vec![answer(1, 90.0, ""), answer(2, 100.0, "")],
        ),
        response(
            Some(RaterRelation::Leader),
            70.0,
            vec![answer(1, 70.0, "")],
        ),
    ];
    let groups = vec![
        rater_group(RaterRelation::SelfReview, 40.0),
        rater_group(RaterRelation::Leader, 60.0),
    ];

    let result = aggregate_evaluation_responses(&responses, &groups, None);

    assert_eq!(result.answers.len(), 2);
    // Item 1 was scored by both roles.
    assert_eq!(result.answers[0].item_id, 1);
    assert_close(result.answers[0].score, 90.0 * 0.4 + 70.0 * 0.6);
    // Item 2 only by self; the leader share contributes nothing for it.
    assert_eq!(result.answers[1].item_id, 2);
    assert_close(result.answers[1].score, 100.0 * 0.4);
}

#[test]
fn aggregated_answers_carry_empty_comments() {
    let responses = vec![response(
        Some(RaterRelation::Peer),
        80.0,
        vec![answer(1, 80.0, "직접 쓴 코멘트")],
    )];

    let result = aggregate_evaluation_responses(&responses, &[], None);

    assert_eq!(result.answers[0].comment, "");
}

#[test]
fn multiple_raters_in_one_group_average_first() {
    let responses = vec![
        response(Some(RaterRelation::Peer), 60.0, Vec::new()),
        response(Some(RaterRelation::Peer), 100.0, Vec::new()),
        response(Some(RaterRelation::Leader), 70.0, Vec::new()),
    ];
    let groups = vec![
        rater_group(RaterRelation::Peer, 50.0),
        rater_group(RaterRelation::Leader, 50.0),
    ];

    let result = aggregate_evaluation_responses(&responses, &groups, None);

    // Peer mean 80 and leader mean 70, blended evenly.
    assert_close(result.total_score, 75.0);
}
