use serde::{Deserialize, Serialize};

use crate::domain::VerificationBundle;

use super::terms::{generate_loan_terms, LoanTerms};
use super::{ApplicationScore, Dimension};

const APPROVED_THRESHOLD: u8 = 85;
const CONDITIONAL_THRESHOLD: u8 = 70;
const CONDITIONAL_WITH_CONDITIONS_THRESHOLD: u8 = 55;

const STRONG_COMPONENT: u8 = 85;
const ADEQUATE_COMPONENT: u8 = 70;

/// Categorical credit decision derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    ConditionalApproval,
    Rejected,
}

impl Decision {
    pub const fn label(self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::ConditionalApproval => "conditional_approval",
            Decision::Rejected => "rejected",
        }
    }
}

/// Full decision output: the categorical outcome, its rationale, itemized
/// factors for applicant-facing feedback, and the recommended loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    pub decision: Decision,
    pub reason: String,
    pub positive_factors: Vec<String>,
    pub negative_factors: Vec<String>,
    pub risk_factors: Vec<String>,
    pub conditions: Vec<String>,
    pub loan_terms: LoanTerms,
}

pub(crate) fn decide_outcome(
    score: &ApplicationScore,
    bundle: &VerificationBundle,
) -> DecisionReport {
    let overall = score.overall_score;

    let decision = if overall >= APPROVED_THRESHOLD {
        Decision::Approved
    } else if overall >= CONDITIONAL_WITH_CONDITIONS_THRESHOLD {
        Decision::ConditionalApproval
    } else {
        Decision::Rejected
    };

    let mut positive_factors = Vec::new();
    let mut negative_factors = Vec::new();
    let mut risk_factors = Vec::new();
    let mut conditions = Vec::new();

    if decision == Decision::ConditionalApproval && overall < CONDITIONAL_THRESHOLD {
        conditions.push("additional documentation required".to_string());
        conditions.push("enhanced monitoring during initial repayment period".to_string());
    }

    for component in &score.components {
        let label = component.dimension.label();
        if component.score >= STRONG_COMPONENT {
            positive_factors.push(format!(
                "{label} verification strong ({}/100)",
                component.score
            ));
        } else if component.score >= ADEQUATE_COMPONENT {
            positive_factors.push(format!(
                "{label} verification satisfactory ({}/100)",
                component.score
            ));
        } else {
            let factor = format!("{label} verification weak ({}/100)", component.score);
            if decision == Decision::Rejected {
                negative_factors.push(factor);
            } else {
                risk_factors.push(factor);
            }
            if decision == Decision::ConditionalApproval {
                conditions.push(weak_dimension_condition(component.dimension).to_string());
            }
        }
    }

    for (dimension, outcome) in [
        (Dimension::Documents, bundle.documents.unavailable_reason()),
        (Dimension::Employment, bundle.employment.unavailable_reason()),
        (Dimension::Financial, bundle.financial.unavailable_reason()),
        (Dimension::Banking, bundle.banking.unavailable_reason()),
        (Dimension::References, bundle.references.unavailable_reason()),
    ] {
        if let Some(reason) = outcome {
            risk_factors.push(format!(
                "{} verification unavailable: {reason}",
                dimension.label()
            ));
        }
    }

    let reason = match decision {
        Decision::Approved => format!(
            "overall score {overall} meets the approval threshold {APPROVED_THRESHOLD}"
        ),
        Decision::ConditionalApproval => format!(
            "overall score {overall} qualifies for conditional approval ({CONDITIONAL_WITH_CONDITIONS_THRESHOLD}-{})",
            APPROVED_THRESHOLD - 1
        ),
        Decision::Rejected => format!(
            "overall score {overall} below the minimum threshold {CONDITIONAL_WITH_CONDITIONS_THRESHOLD}"
        ),
    };

    let loan_terms = generate_loan_terms(
        overall,
        bundle.financial.as_verified(),
        bundle.banking.as_verified(),
        decision,
    );

    DecisionReport {
        decision,
        reason,
        positive_factors,
        negative_factors,
        risk_factors,
        conditions,
        loan_terms,
    }
}

const fn weak_dimension_condition(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Documents => "provide additional supporting documents",
        Dimension::Employment => "submit employer confirmation letter",
        Dimension::Financial => "provide six months of income proof",
        Dimension::Banking => "submit latest bank statements",
        Dimension::References => "provide at least two contactable references",
    }
}
