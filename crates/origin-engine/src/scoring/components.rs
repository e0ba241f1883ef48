//! Per-dimension sub-score rules. Every function returns a score already
//! clamped to [0, 100] along with a short note for the audit trail.

use crate::domain::{
    AccountVerification, BankingAnalysis, DocumentVerification, DtiLevel, EmploymentStability,
    EmploymentVerification, FinancialAssessment, IncomeStability, ReferenceRelationship,
    ReferenceVerification, TransactionRegularity,
};

pub(crate) const MAX_COMPONENT_SCORE: u8 = 100;

/// Mean confidence across provided documents. Documents that were provided
/// but failed verification count as zero; an empty set scores zero.
pub(crate) fn document_score(verification: &DocumentVerification) -> (u8, String) {
    let provided: Vec<_> = verification
        .documents
        .iter()
        .filter(|doc| doc.provided)
        .collect();

    if provided.is_empty() {
        return (0, "no documents provided".to_string());
    }

    let total: u32 = provided
        .iter()
        .map(|doc| if doc.verified { u32::from(doc.score.min(MAX_COMPONENT_SCORE)) } else { 0 })
        .sum();
    let verified_count = provided.iter().filter(|doc| doc.verified).count();
    let score = (total / provided.len() as u32) as u8;

    (
        score.min(MAX_COMPONENT_SCORE),
        format!(
            "{verified_count} of {} provided documents verified",
            provided.len()
        ),
    )
}

pub(crate) fn employment_score(verification: &EmploymentVerification) -> (u8, String) {
    let mut score: u16 = 0;
    if verification.company_verified {
        score += 30;
    }
    if verification.gross_income_verified {
        score += 30;
    }
    if verification.experience_verified {
        score += 20;
    }
    score += match verification.stability {
        EmploymentStability::VeryStable => 20,
        EmploymentStability::Stable => 15,
        EmploymentStability::Moderate => 10,
        EmploymentStability::Unstable => 0,
    };

    let note = format!(
        "company {}, income {}, experience {}, designation {}, stability {:?}",
        verified_word(verification.company_verified),
        verified_word(verification.gross_income_verified),
        verified_word(verification.experience_verified),
        verified_word(verification.designation_verified),
        verification.stability,
    );

    (score.min(u16::from(MAX_COMPONENT_SCORE)) as u8, note)
}

pub(crate) fn financial_score(assessment: &FinancialAssessment) -> (u8, String) {
    let mut score: u16 = match assessment.income_stability {
        IncomeStability::Stable => 30,
        IncomeStability::Moderate => 20,
        IncomeStability::Volatile => 10,
        IncomeStability::Unknown => 0,
    };

    let dti = assessment.dti_ratio();
    score += match dti.level {
        DtiLevel::Comfortable => 25,
        DtiLevel::Manageable => 15,
        DtiLevel::Strained | DtiLevel::Unknown => 5,
    };

    score += if assessment.repayment_capacity >= 0.4 {
        25
    } else if assessment.repayment_capacity >= 0.2 {
        15
    } else {
        5
    };

    if assessment.stress_test_passed {
        score += 20;
    }

    let note = format!(
        "income stability {:?}, DTI {:.2} ({:?}), repayment capacity {:.2}, stress test {}",
        assessment.income_stability,
        dti.ratio,
        dti.level,
        assessment.repayment_capacity,
        if assessment.stress_test_passed { "passed" } else { "failed" },
    );

    (score.min(u16::from(MAX_COMPONENT_SCORE)) as u8, note)
}

pub(crate) fn banking_score(analysis: &BankingAnalysis) -> (u8, String) {
    let mut score: u16 = match analysis.account_verification {
        AccountVerification::Verified => 30,
        AccountVerification::Partial => 15,
        AccountVerification::Unverified => 0,
    };

    score += match analysis.transaction_regularity {
        TransactionRegularity::Regular => 25,
        TransactionRegularity::Irregular => 10,
        TransactionRegularity::Sparse => 0,
    };

    score += if analysis.behaviour_score >= 80 {
        25
    } else if analysis.behaviour_score >= 60 {
        15
    } else if analysis.behaviour_score >= 40 {
        10
    } else {
        0
    };

    score += match analysis.bounce_count {
        0 => 20,
        1 | 2 => 10,
        _ => 0,
    };

    let note = format!(
        "account {:?}, regularity {:?}, behaviour {}, {} bounce(s)",
        analysis.account_verification,
        analysis.transaction_regularity,
        analysis.behaviour_score,
        analysis.bounce_count,
    );

    (score.min(u16::from(MAX_COMPONENT_SCORE)) as u8, note)
}

pub(crate) fn reference_score(verification: &ReferenceVerification) -> (u8, String) {
    if verification.references.is_empty() {
        return (0, "no references supplied".to_string());
    }

    let total: u32 = verification
        .references
        .iter()
        .map(|reference| {
            let mut score: u16 = 60;
            score += match reference.relationship {
                ReferenceRelationship::Family => 15,
                ReferenceRelationship::Colleague => 20,
                ReferenceRelationship::BusinessAssociate => 25,
                ReferenceRelationship::Friend => 10,
                ReferenceRelationship::Other => 0,
            };
            score += if reference.years_known >= 5 {
                15
            } else if reference.years_known >= 2 {
                10
            } else if reference.years_known >= 1 {
                5
            } else {
                0
            };
            if reference.contacted {
                score += 10;
            }
            u32::from(score.min(u16::from(MAX_COMPONENT_SCORE)))
        })
        .sum();

    let contacted = verification
        .references
        .iter()
        .filter(|reference| reference.contacted)
        .count();
    let score = (total / verification.references.len() as u32) as u8;

    (
        score.min(MAX_COMPONENT_SCORE),
        format!(
            "{contacted} of {} references contacted",
            verification.references.len()
        ),
    )
}

fn verified_word(verified: bool) -> &'static str {
    if verified {
        "verified"
    } else {
        "unverified"
    }
}
