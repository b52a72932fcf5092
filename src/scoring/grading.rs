use serde::{Deserialize, Serialize};

use super::domain::RatingScale;

/// Grade table selected from the campaign's native rating scale.
///
/// Seven-point campaigns intentionally resolve to the hundred-point table:
/// no dedicated seven-point table ever existed, and stored results depend on
/// the mapping staying put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringType {
    FivePoint,
    TenPoint,
    HundredPoint,
}

/// Letter grades from lowest to highest tier; the derived ordering backs the
/// monotonicity guarantee of `score_to_grade`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Grade::D => "D",
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
            Grade::S => "S",
        }
    }
}

/// A raw score lifted onto the common 0-100 scale plus the grade table that
/// applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedScore {
    pub scoring_type: ScoringType,
    pub normalized_score: f64,
}

/// Map an evaluation's native scale to a normalized 0-100 score.
///
/// Unrecognized or absent scales pass the score through unchanged and grade
/// against the hundred-point table.
pub fn resolve_scoring_type(rating_scale: Option<&str>, raw_score: f64) -> ResolvedScore {
    match rating_scale.and_then(RatingScale::parse) {
        Some(RatingScale::FivePoint) => ResolvedScore {
            scoring_type: ScoringType::FivePoint,
            normalized_score: raw_score / 5.0 * 100.0,
        },
        Some(RatingScale::SevenPoint) => ResolvedScore {
            scoring_type: ScoringType::HundredPoint,
            normalized_score: raw_score / 7.0 * 100.0,
        },
        Some(RatingScale::TenPoint) => ResolvedScore {
            scoring_type: ScoringType::TenPoint,
            normalized_score: raw_score / 10.0 * 100.0,
        },
        Some(RatingScale::HundredPoint) | None => ResolvedScore {
            scoring_type: ScoringType::HundredPoint,
            normalized_score: raw_score,
        },
    }
}

/// Lower bounds per grade, checked from the top tier down. Every table spans
/// the full [0, 100] band so the lookup is total.
const FIVE_POINT_BANDS: [(f64, Grade); 5] = [
    (90.0, Grade::S),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (0.0, Grade::D),
];

const TEN_POINT_BANDS: [(f64, Grade); 5] = [
    (90.0, Grade::S),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (0.0, Grade::D),
];

const HUNDRED_POINT_BANDS: [(f64, Grade); 5] = [
    (90.0, Grade::S),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (0.0, Grade::D),
];

impl ScoringType {
    const fn bands(self) -> &'static [(f64, Grade); 5] {
        match self {
            ScoringType::FivePoint => &FIVE_POINT_BANDS,
            ScoringType::TenPoint => &TEN_POINT_BANDS,
            ScoringType::HundredPoint => &HUNDRED_POINT_BANDS,
        }
    }
}

/// Resolve a normalized score to its grade.
///
/// Scores outside [0, 100] clamp to the nearest boundary grade instead of
/// failing, so an over-adjusted score still renders.
pub fn score_to_grade(normalized_score: f64, scoring_type: ScoringType) -> Grade {
    let score = normalized_score.clamp(0.0, 100.0);
    for (lower_bound, grade) in scoring_type.bands() {
        if score >= *lower_bound {
            return *grade;
        }
    }
    Grade::D
}
