//! Levenshtein-based name similarity used for beneficiary validation and
//! reference cross-checks.

use serde::{Deserialize, Serialize};

const MATCHED_THRESHOLD: f64 = 0.8;
const PARTIAL_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    PartialMatch,
    NoMatch,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Matched => "matched",
            MatchStatus::PartialMatch => "partial_match",
            MatchStatus::NoMatch => "no_match",
        }
    }
}

/// Similarity score in [0.0, 1.0] plus its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NameSimilarity {
    pub score: f64,
    pub status: MatchStatus,
}

/// Compare two names after case folding and whitespace normalization.
///
/// The score is `(longer_len - edit_distance) / longer_len`; two empty
/// names compare as a trivial match.
pub fn name_similarity(left: &str, right: &str) -> NameSimilarity {
    let left = normalize(left);
    let right = normalize(right);

    let longer = left.chars().count().max(right.chars().count());
    let score = if longer == 0 {
        1.0
    } else {
        let distance = strsim::levenshtein(&left, &right);
        (longer.saturating_sub(distance)) as f64 / longer as f64
    };

    let status = if score >= MATCHED_THRESHOLD {
        MatchStatus::Matched
    } else if score >= PARTIAL_THRESHOLD {
        MatchStatus::PartialMatch
    } else {
        MatchStatus::NoMatch
    };

    NameSimilarity { score, status }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
