use serde::Serialize;

use super::domain::{AdjustmentMode, AdjustmentPayload, RatingScale};

/// Outcome of applying manager/HQ overrides to a base score.
///
/// `applied_manager`/`applied_hq` are the post-clamp values — the numbers a
/// caller must persist and display as the adjustment actually applied, which
/// may differ from what the adjuster was asked for when a range is in force.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustedScore {
    pub adjusted_score: f64,
    pub applied_manager: f64,
    pub applied_hq: f64,
}

impl AdjustedScore {
    fn unchanged(base_score: f64) -> Self {
        Self {
            adjusted_score: base_score,
            applied_manager: 0.0,
            applied_hq: 0.0,
        }
    }
}

/// Apply at most two named overrides to `base_score`.
///
/// Each slot is read independently (absent slot contributes 0), clamped into
/// `[-|range|, +|range|]` when a range is configured, then converted to a
/// delta: percent mode scales by the base, points mode adds directly. The
/// final score is clamped into `[0, scale_max]` only when the rating scale
/// resolves; an unrecognized scale leaves the sum unbounded at both ends.
///
/// Total over its documented input domain — never fails. Non-numeric
/// adjustment values are a caller contract violation upstream of this type.
pub fn apply_score_adjustments(
    base_score: f64,
    adjustment: Option<&AdjustmentPayload>,
    mode: AdjustmentMode,
    range: Option<f64>,
    rating_scale: Option<&str>,
) -> AdjustedScore {
    let payload = match adjustment {
        Some(payload) if !payload.is_empty() => payload,
        _ => return AdjustedScore::unchanged(base_score),
    };

    let applied_manager = clamp_to_range(
        payload
            .manager_adjustment
            .as_ref()
            .map(|entry| entry.value)
            .unwrap_or(0.0),
        range,
    );
    let applied_hq = clamp_to_range(
        payload
            .hq_adjustment
            .as_ref()
            .map(|entry| entry.value)
            .unwrap_or(0.0),
        range,
    );

    let manager_delta = to_delta(base_score, applied_manager, mode);
    let hq_delta = to_delta(base_score, applied_hq, mode);

    let mut adjusted_score = base_score + manager_delta + hq_delta;
    if let Some(scale) = rating_scale.and_then(RatingScale::parse) {
        adjusted_score = adjusted_score.clamp(0.0, scale.max_score());
    }

    AdjustedScore {
        adjusted_score,
        applied_manager,
        applied_hq,
    }
}

fn clamp_to_range(value: f64, range: Option<f64>) -> f64 {
    match range {
        Some(range) => {
            let bound = range.abs();
            value.clamp(-bound, bound)
        }
        None => value,
    }
}

fn to_delta(base_score: f64, applied: f64, mode: AdjustmentMode) -> f64 {
    match mode {
        AdjustmentMode::Percent => base_score * (applied / 100.0),
        AdjustmentMode::Points => applied,
    }
}
