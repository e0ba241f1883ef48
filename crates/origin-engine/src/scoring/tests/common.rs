use rust_decimal_macros::dec;

use crate::domain::{
    AccountVerification, ApplicationId, BankingAnalysis, BankingRelationship, DocumentCheck,
    DocumentQuality, DocumentVerification, EmploymentStability, EmploymentVerification,
    FinancialAssessment, IncomeStability, LoanType, ReferenceCheck, ReferenceRelationship,
    ReferenceVerification, TransactionRegularity, VerificationBundle, VerificationOutcome,
};
use crate::scoring::{ScoringConfig, ScoringEngine};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default())
}

pub(super) fn document(name: &str, verified: bool, score: u8) -> DocumentCheck {
    DocumentCheck {
        name: name.to_string(),
        provided: true,
        verified,
        score,
        quality: DocumentQuality::Clear,
    }
}

pub(super) fn strong_documents() -> DocumentVerification {
    DocumentVerification {
        documents: vec![
            document("pan_card", true, 90),
            document("salary_slip", true, 90),
        ],
    }
}

pub(super) fn strong_employment() -> EmploymentVerification {
    EmploymentVerification {
        company_verified: true,
        designation_verified: true,
        gross_income_verified: true,
        experience_verified: true,
        stability: EmploymentStability::VeryStable,
    }
}

pub(super) fn strong_financial() -> FinancialAssessment {
    FinancialAssessment {
        monthly_income: dec!(100_000),
        monthly_obligations: dec!(25_000),
        income_stability: IncomeStability::Stable,
        repayment_capacity: 0.45,
        stress_test_passed: true,
    }
}

pub(super) fn strong_banking() -> BankingAnalysis {
    BankingAnalysis {
        account_verification: AccountVerification::Verified,
        transaction_regularity: TransactionRegularity::Regular,
        behaviour_score: 85,
        bounce_count: 0,
        relationship: BankingRelationship::Strong,
    }
}

pub(super) fn strong_references() -> ReferenceVerification {
    ReferenceVerification {
        references: vec![
            ReferenceCheck {
                name: "Anil Sharma".to_string(),
                relationship: ReferenceRelationship::Family,
                years_known: 6,
                contacted: true,
            },
            ReferenceCheck {
                name: "Meera Iyer".to_string(),
                relationship: ReferenceRelationship::Colleague,
                years_known: 3,
                contacted: true,
            },
        ],
    }
}

/// Bundle scoring 98 overall: every dimension at or near its ceiling.
pub(super) fn strong_bundle(suffix: &str) -> VerificationBundle {
    VerificationBundle {
        application_id: ApplicationId(format!("app-{suffix}")),
        applicant_name: "Priya Nair".to_string(),
        requested_amount: dec!(500_000),
        loan_type: LoanType::PersonalLoan,
        documents: VerificationOutcome::Verified(strong_documents()),
        employment: VerificationOutcome::Verified(strong_employment()),
        financial: VerificationOutcome::Verified(strong_financial()),
        banking: VerificationOutcome::Verified(strong_banking()),
        references: VerificationOutcome::Verified(strong_references()),
    }
}

/// Bundle landing in the 55-69 conditional band.
pub(super) fn middling_bundle(suffix: &str) -> VerificationBundle {
    let mut bundle = strong_bundle(suffix);
    bundle.documents = VerificationOutcome::Verified(DocumentVerification {
        documents: vec![document("pan_card", true, 60)],
    });
    bundle.employment = VerificationOutcome::Verified(EmploymentVerification {
        company_verified: true,
        designation_verified: false,
        gross_income_verified: true,
        experience_verified: false,
        stability: EmploymentStability::Unstable,
    });
    bundle.financial = VerificationOutcome::Verified(FinancialAssessment {
        monthly_income: dec!(50_000),
        monthly_obligations: dec!(15_000),
        income_stability: IncomeStability::Unknown,
        repayment_capacity: 0.25,
        stress_test_passed: true,
    });
    bundle.banking = VerificationOutcome::Verified(BankingAnalysis {
        account_verification: AccountVerification::Verified,
        transaction_regularity: TransactionRegularity::Irregular,
        behaviour_score: 65,
        bounce_count: 3,
        relationship: BankingRelationship::Standard,
    });
    bundle.references = VerificationOutcome::Verified(ReferenceVerification {
        references: vec![ReferenceCheck {
            name: "Anil Sharma".to_string(),
            relationship: ReferenceRelationship::Other,
            years_known: 0,
            contacted: false,
        }],
    });
    bundle
}

/// Bundle scoring well below 55: nothing verified anywhere.
pub(super) fn weak_bundle(suffix: &str) -> VerificationBundle {
    let mut bundle = strong_bundle(suffix);
    bundle.documents = VerificationOutcome::Verified(DocumentVerification {
        documents: vec![document("pan_card", false, 0)],
    });
    bundle.employment = VerificationOutcome::Verified(EmploymentVerification {
        company_verified: false,
        designation_verified: false,
        gross_income_verified: false,
        experience_verified: false,
        stability: EmploymentStability::Unstable,
    });
    bundle.financial = VerificationOutcome::Verified(FinancialAssessment {
        monthly_income: dec!(20_000),
        monthly_obligations: dec!(15_000),
        income_stability: IncomeStability::Volatile,
        repayment_capacity: 0.1,
        stress_test_passed: false,
    });
    bundle.banking = VerificationOutcome::Verified(BankingAnalysis {
        account_verification: AccountVerification::Unverified,
        transaction_regularity: TransactionRegularity::Sparse,
        behaviour_score: 20,
        bounce_count: 5,
        relationship: BankingRelationship::Weak,
    });
    bundle.references = VerificationOutcome::Verified(ReferenceVerification {
        references: Vec::new(),
    });
    bundle
}
