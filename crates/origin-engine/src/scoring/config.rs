use serde::{Deserialize, Serialize};

use super::InvalidInputError;

/// Relative weight of each verification dimension in the overall score.
/// Weights must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub documents: f64,
    pub employment: f64,
    pub financial: f64,
    pub banking: f64,
    pub references: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            documents: 0.20,
            employment: 0.30,
            financial: 0.30,
            banking: 0.15,
            references: 0.05,
        }
    }
}

impl DimensionWeights {
    pub fn sum(&self) -> f64 {
        self.documents + self.employment + self.financial + self.banking + self.references
    }
}

/// How the engine treats a dimension whose verification adapter reported
/// `Unavailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Refuse to score the bundle; the orchestrator must retry or fail the
    /// stage.
    FailFast,
    /// Score the missing dimension as zero and flag it as a risk factor.
    Degrade,
}

/// Rubric configuration for the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: DimensionWeights,
    pub fallback: FallbackPolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: DimensionWeights::default(),
            fallback: FallbackPolicy::FailFast,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(InvalidInputError::WeightsMisconfigured { found: sum });
        }
        Ok(())
    }
}
