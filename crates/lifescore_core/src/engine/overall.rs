//! Weighted overall life score.
//!
//! Weights need not sum to 100: the weighted sum is normalized by the
//! configured total. The raw total is returned unmodified, negative entries
//! included, so callers can flag misconfigured weights.

use crate::engine::MAX_SCORE;
use crate::model::dimension::DimensionConfig;
use crate::model::snapshot::DimensionName;
use serde::Serialize;
use std::collections::BTreeMap;

/// Overall score plus the configured weight totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub score: u8,
    /// Plain sum of every configured weight.
    pub total_weight: f64,
    /// Sum of weights actually used for scoring (negatives count as 0).
    pub effective_weight: f64,
}

/// Weighted average of dimension scores by configured weight.
///
/// A configured dimension without a score contributes 0 at full weight.
/// Negative weights count as 0 for scoring. A zero effective total yields
/// score 0.
pub fn overall_score(
    configs: &[DimensionConfig],
    scores: &BTreeMap<DimensionName, u8>,
) -> OverallScore {
    let mut total_weight = 0.0;
    let mut effective_weight = 0.0;
    let mut weighted_sum = 0.0;
    for config in configs {
        let weight = config.weight.max(0.0);
        let score = scores.get(&config.name).copied().unwrap_or(0);
        total_weight += config.weight;
        effective_weight += weight;
        weighted_sum += f64::from(score) * weight;
    }

    let score = if effective_weight <= 0.0 {
        0
    } else {
        (weighted_sum / effective_weight)
            .round()
            .clamp(0.0, f64::from(MAX_SCORE)) as u8
    };
    OverallScore {
        score,
        total_weight,
        effective_weight,
    }
}
