//! Multi-factor loan decision scoring.
//!
//! The engine is stateless: it takes a fully assembled [`VerificationBundle`]
//! and produces a weighted [`ApplicationScore`] plus a [`DecisionReport`]
//! with factors, conditions, and recommended loan terms.

mod components;
mod config;
mod decision;
mod terms;

pub use config::{DimensionWeights, FallbackPolicy, ScoringConfig};
pub use decision::{Decision, DecisionReport};
pub use terms::{LoanOffer, LoanTerms};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationId, VerificationBundle, VerificationOutcome};

#[cfg(test)]
mod tests;

/// Verification dimensions contributing to the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Documents,
    Employment,
    Financial,
    Banking,
    References,
}

impl Dimension {
    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Documents => "documents",
            Dimension::Employment => "employment",
            Dimension::Financial => "financial",
            Dimension::Banking => "banking",
            Dimension::References => "references",
        }
    }
}

/// Errors raised when a bundle cannot be scored at all. Business-rule
/// outcomes (rejection, failed checks) are values, never errors.
#[derive(Debug, thiserror::Error)]
pub enum InvalidInputError {
    #[error("{dimension:?} verification unavailable: {reason}")]
    DimensionUnavailable { dimension: Dimension, reason: String },
    #[error("scoring weights must sum to 1.0 (found {found})")]
    WeightsMisconfigured { found: f64 },
    #[error("requested amount must be positive (found {0})")]
    NonPositiveAmount(Decimal),
}

/// Discrete contribution of one dimension, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub dimension: Dimension,
    pub score: u8,
    pub weight: f64,
    pub weighted_contribution: f64,
    pub notes: String,
}

/// Derived, immutable score for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationScore {
    pub application_id: ApplicationId,
    pub overall_score: u8,
    pub components: Vec<ComponentScore>,
}

/// Score plus decision, as returned by [`ScoringEngine::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: ApplicationScore,
    pub report: DecisionReport,
}

/// Stateless evaluator applying the weighted rubric to a bundle.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Compute the weighted overall score for a bundle.
    pub fn score(&self, bundle: &VerificationBundle) -> Result<ApplicationScore, InvalidInputError> {
        self.config.validate()?;
        if bundle.requested_amount <= Decimal::ZERO {
            return Err(InvalidInputError::NonPositiveAmount(bundle.requested_amount));
        }

        let weights = self.config.weights;
        let components = vec![
            self.component(
                Dimension::Documents,
                weights.documents,
                &bundle.documents,
                components::document_score,
            )?,
            self.component(
                Dimension::Employment,
                weights.employment,
                &bundle.employment,
                components::employment_score,
            )?,
            self.component(
                Dimension::Financial,
                weights.financial,
                &bundle.financial,
                components::financial_score,
            )?,
            self.component(
                Dimension::Banking,
                weights.banking,
                &bundle.banking,
                components::banking_score,
            )?,
            self.component(
                Dimension::References,
                weights.references,
                &bundle.references,
                components::reference_score,
            )?,
        ];

        let weighted_total: f64 = components
            .iter()
            .map(|component| component.weighted_contribution)
            .sum();
        let overall_score = weighted_total.round().clamp(0.0, 100.0) as u8;

        tracing::debug!(
            application_id = %bundle.application_id.0,
            overall_score,
            "scored verification bundle"
        );

        Ok(ApplicationScore {
            application_id: bundle.application_id.clone(),
            overall_score,
            components,
        })
    }

    /// Derive the categorical decision, factors, and loan terms for a score.
    pub fn decide(&self, score: &ApplicationScore, bundle: &VerificationBundle) -> DecisionReport {
        let report = decision::decide_outcome(score, bundle);
        tracing::info!(
            application_id = %bundle.application_id.0,
            decision = report.decision.label(),
            overall_score = score.overall_score,
            "credit decision derived"
        );
        report
    }

    /// Score and decide in one pass.
    pub fn evaluate(&self, bundle: &VerificationBundle) -> Result<Evaluation, InvalidInputError> {
        let score = self.score(bundle)?;
        let report = self.decide(&score, bundle);
        Ok(Evaluation { score, report })
    }

    fn component<T>(
        &self,
        dimension: Dimension,
        weight: f64,
        outcome: &VerificationOutcome<T>,
        rule: impl Fn(&T) -> (u8, String),
    ) -> Result<ComponentScore, InvalidInputError> {
        let (score, notes) = match outcome {
            VerificationOutcome::Verified(value) => rule(value),
            VerificationOutcome::Unavailable { reason } => match self.config.fallback {
                FallbackPolicy::FailFast => {
                    return Err(InvalidInputError::DimensionUnavailable {
                        dimension,
                        reason: reason.clone(),
                    })
                }
                FallbackPolicy::Degrade => {
                    (0, format!("verification unavailable: {reason}"))
                }
            },
        };

        let score = score.min(100);
        Ok(ComponentScore {
            dimension,
            score,
            weight,
            weighted_contribution: f64::from(score) * weight,
            notes,
        })
    }
}
