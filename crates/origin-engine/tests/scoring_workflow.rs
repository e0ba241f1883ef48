//! End-to-end origination flow: assemble a verification bundle, score and
//! decide, then hand the approved terms to the funding stage.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use origin_engine::checks::LoanCondition;
use origin_engine::disbursement::schedule::DisbursementMethod;
use origin_engine::disbursement::DisbursementOptions;
use origin_engine::domain::{
    AccountVerification, ApplicationId, BankingAnalysis, BankingRelationship, DocumentCheck,
    DocumentQuality, DocumentVerification, EmploymentStability, EmploymentVerification,
    FinancialAssessment, IncomeStability, LoanType, ReferenceCheck, ReferenceRelationship,
    ReferenceVerification, TransactionRegularity, VerificationBundle, VerificationOutcome,
};
use origin_engine::funding::{
    BeneficiaryAccount, DisbursementExecutor, DisbursementInstruction, DisbursementReceipt,
    ExecutionError, FundingNotification, FundingRequest, FundingService, FundingStatus,
    NotificationError, NotificationPublisher,
};
use origin_engine::scoring::Decision;
use origin_engine::ScoringEngine;

struct RecordingExecutor {
    instructions: Mutex<Vec<DisbursementInstruction>>,
}

impl DisbursementExecutor for RecordingExecutor {
    fn execute(
        &self,
        instruction: &DisbursementInstruction,
    ) -> Result<DisbursementReceipt, ExecutionError> {
        self.instructions
            .lock()
            .expect("executor mutex poisoned")
            .push(instruction.clone());
        Ok(DisbursementReceipt {
            utr_number: "UTR-0001".to_string(),
            executed_at: Utc::now(),
        })
    }
}

struct DroppingNotifications;

impl NotificationPublisher for DroppingNotifications {
    fn publish(&self, _notification: FundingNotification) -> Result<(), NotificationError> {
        Ok(())
    }
}

fn approved_bundle() -> VerificationBundle {
    VerificationBundle {
        application_id: ApplicationId("app-e2e-001".to_string()),
        applicant_name: "Priya Nair".to_string(),
        requested_amount: dec!(500_000),
        loan_type: LoanType::PersonalLoan,
        documents: VerificationOutcome::Verified(DocumentVerification {
            documents: vec![
                DocumentCheck {
                    name: "pan_card".to_string(),
                    provided: true,
                    verified: true,
                    score: 95,
                    quality: DocumentQuality::Clear,
                },
                DocumentCheck {
                    name: "bank_statement".to_string(),
                    provided: true,
                    verified: true,
                    score: 88,
                    quality: DocumentQuality::Legible,
                },
            ],
        }),
        employment: VerificationOutcome::Verified(EmploymentVerification {
            company_verified: true,
            designation_verified: true,
            gross_income_verified: true,
            experience_verified: true,
            stability: EmploymentStability::VeryStable,
        }),
        financial: VerificationOutcome::Verified(FinancialAssessment {
            monthly_income: dec!(120_000),
            monthly_obligations: dec!(30_000),
            income_stability: IncomeStability::Stable,
            repayment_capacity: 0.5,
            stress_test_passed: true,
        }),
        banking: VerificationOutcome::Verified(BankingAnalysis {
            account_verification: AccountVerification::Verified,
            transaction_regularity: TransactionRegularity::Regular,
            behaviour_score: 88,
            bounce_count: 0,
            relationship: BankingRelationship::Strong,
        }),
        references: VerificationOutcome::Verified(ReferenceVerification {
            references: vec![ReferenceCheck {
                name: "Anil Sharma".to_string(),
                relationship: ReferenceRelationship::Colleague,
                years_known: 7,
                contacted: true,
            }],
        }),
    }
}

#[test]
fn approved_application_flows_from_scoring_into_funding() {
    let engine = ScoringEngine::default();
    let bundle = approved_bundle();

    let evaluation = engine.evaluate(&bundle).expect("bundle scores");
    assert_eq!(evaluation.report.decision, Decision::Approved);
    let offer = evaluation
        .report
        .loan_terms
        .offer()
        .expect("approved terms")
        .clone();
    assert!(offer.max_loan_amount >= bundle.requested_amount);

    let executor = Arc::new(RecordingExecutor {
        instructions: Mutex::new(Vec::new()),
    });
    let service = FundingService::new(executor.clone(), Arc::new(DroppingNotifications));

    let outcome = service.process(FundingRequest {
        application_id: bundle.application_id.clone(),
        applicant_name: bundle.applicant_name.clone(),
        loan_type: bundle.loan_type,
        approved_amount: bundle.requested_amount,
        interest_rate: offer.interest_rate,
        tenure_months: offer.max_tenure_months,
        decision_made_at: Utc::now() - Duration::days(1),
        conditions: Vec::new(),
        beneficiary: BeneficiaryAccount {
            account_number: "1234567890123456".to_string(),
            ifsc_code: "HDFC0001234".to_string(),
            account_holder_name: "Priya Nair".to_string(),
            bank_name: "HDFC Bank".to_string(),
        },
        method: DisbursementMethod::Imps,
        options: DisbursementOptions::default(),
    });

    assert_eq!(outcome.status, FundingStatus::Completed);
    let breakdown = outcome.breakdown.expect("breakdown");
    assert_eq!(
        breakdown.net_disbursement_amount + breakdown.total_deductions,
        bundle.requested_amount
    );
    let instructions = executor.instructions.lock().expect("instructions");
    assert_eq!(instructions[0].amount, breakdown.net_disbursement_amount);
}

#[test]
fn conditional_decision_feeds_conditions_into_the_check_battery() {
    let engine = ScoringEngine::default();
    let mut bundle = approved_bundle();
    // Degrade employment and references enough to land in the 55-69 band.
    bundle.employment = VerificationOutcome::Verified(EmploymentVerification {
        company_verified: false,
        designation_verified: false,
        gross_income_verified: true,
        experience_verified: false,
        stability: EmploymentStability::Moderate,
    });
    bundle.documents = VerificationOutcome::Verified(DocumentVerification {
        documents: vec![DocumentCheck {
            name: "pan_card".to_string(),
            provided: true,
            verified: true,
            score: 55,
            quality: DocumentQuality::Poor,
        }],
    });
    bundle.banking = VerificationOutcome::Verified(BankingAnalysis {
        account_verification: AccountVerification::Partial,
        transaction_regularity: TransactionRegularity::Irregular,
        behaviour_score: 50,
        bounce_count: 3,
        relationship: BankingRelationship::Standard,
    });

    let evaluation = engine.evaluate(&bundle).expect("bundle scores");
    assert_eq!(evaluation.report.decision, Decision::ConditionalApproval);
    assert!(!evaluation.report.conditions.is_empty());

    // Unsatisfied conditions must block funding through the battery.
    let conditions: Vec<_> = evaluation
        .report
        .conditions
        .iter()
        .map(|description| LoanCondition {
            description: description.clone(),
            satisfied: false,
        })
        .collect();

    let service = FundingService::new(
        Arc::new(RecordingExecutor {
            instructions: Mutex::new(Vec::new()),
        }),
        Arc::new(DroppingNotifications),
    );
    let outcome = service.process(FundingRequest {
        application_id: bundle.application_id.clone(),
        applicant_name: bundle.applicant_name.clone(),
        loan_type: bundle.loan_type,
        approved_amount: dec!(200_000),
        interest_rate: 12.0,
        tenure_months: 48,
        decision_made_at: Utc::now() - Duration::days(2),
        conditions,
        beneficiary: BeneficiaryAccount {
            account_number: "1234567890123456".to_string(),
            ifsc_code: "HDFC0001234".to_string(),
            account_holder_name: "Priya Nair".to_string(),
            bank_name: "HDFC Bank".to_string(),
        },
        method: DisbursementMethod::Neft,
        options: DisbursementOptions::default(),
    });

    assert_eq!(outcome.status, FundingStatus::Failed);
    assert_eq!(
        outcome.failed_at_stage.as_deref(),
        Some("pre_disbursement_checks")
    );
}
