//! Funding stage state machine.
//!
//! A funding request moves `Pending -> InProgress -> {Completed | Failed}`
//! through exactly one pass of: pre-disbursement checks, account creation,
//! disbursement calculation, beneficiary validation, disbursement execution,
//! documentation, servicing setup, and notifications. The first failing step
//! transitions the attempt to `Failed` and records the stage name; no later
//! step runs.
//!
//! The service enforces no per-application funding lock. At-most-one funding
//! attempt per application is the orchestrator's responsibility (unique
//! constraint or lock at the persistence layer).

pub mod beneficiary;

pub use beneficiary::{validate_beneficiary, BeneficiaryAccount, BeneficiaryValidation};

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checks::{
    aggregate, run_checks, standard_battery, CheckContext, CheckResult, CheckSummary,
    LoanCondition, PreDisbursementCheck,
};
use crate::disbursement::account::{disbursement_reference, AccountNumberIssuer, SequenceIssuer};
use crate::disbursement::schedule::{
    emi_schedule, expected_credit_date, DisbursementMethod, EmiSchedule,
};
use crate::disbursement::{calculate_disbursement, DisbursementBreakdown, DisbursementOptions};
use crate::domain::{ApplicationId, LoanType};

pub const STAGE_PRE_DISBURSEMENT_CHECKS: &str = "pre_disbursement_checks";
pub const STAGE_ACCOUNT_CREATION: &str = "account_creation";
pub const STAGE_DISBURSEMENT_CALCULATION: &str = "disbursement_calculation";
pub const STAGE_BENEFICIARY_VALIDATION: &str = "beneficiary_validation";
pub const STAGE_DISBURSEMENT_EXECUTION: &str = "disbursement_execution";
pub const STAGE_DOCUMENTATION: &str = "documentation";
pub const STAGE_SERVICING_SETUP: &str = "servicing_setup";
pub const STAGE_NOTIFICATIONS: &str = "notifications";

/// Funding request assembled by the orchestrator from the credit decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingRequest {
    pub application_id: ApplicationId,
    pub applicant_name: String,
    pub loan_type: LoanType,
    pub approved_amount: Decimal,
    pub interest_rate: f64,
    pub tenure_months: u16,
    pub decision_made_at: DateTime<Utc>,
    pub conditions: Vec<LoanCondition>,
    pub beneficiary: BeneficiaryAccount,
    pub method: DisbursementMethod,
    pub options: DisbursementOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl FundingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FundingStatus::Pending => "pending",
            FundingStatus::InProgress => "in_progress",
            FundingStatus::Completed => "completed",
            FundingStatus::Failed => "failed",
        }
    }
}

/// References produced by the documentation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingDocuments {
    pub loan_agreement_reference: String,
    pub sanction_letter_reference: String,
}

/// Terminal record of one funding attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingOutcome {
    pub application_id: ApplicationId,
    pub status: FundingStatus,
    pub failed_at_stage: Option<String>,
    pub failure_reason: Option<String>,
    pub checks: Vec<CheckResult>,
    pub check_summary: CheckSummary,
    pub loan_account_number: Option<String>,
    pub breakdown: Option<DisbursementBreakdown>,
    pub beneficiary_validation: Option<BeneficiaryValidation>,
    pub disbursement_reference: Option<String>,
    pub utr_number: Option<String>,
    pub expected_credit_date: Option<NaiveDate>,
    pub documents: Option<FundingDocuments>,
    pub emi_schedule: Option<EmiSchedule>,
}

/// Payment instruction handed to the disbursement rail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisbursementInstruction {
    pub reference: String,
    pub beneficiary: BeneficiaryAccount,
    pub amount: Decimal,
    pub method: DisbursementMethod,
}

/// Receipt returned by a successful disbursement execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisbursementReceipt {
    pub utr_number: String,
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("disbursement rail rejected the instruction: {0}")]
    Rejected(String),
    #[error("disbursement rail unavailable: {0}")]
    Unavailable(String),
}

/// Outbound seam to the actual payment rail.
pub trait DisbursementExecutor: Send + Sync {
    fn execute(&self, instruction: &DisbursementInstruction)
        -> Result<DisbursementReceipt, ExecutionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentationError {
    #[error("document generation failed: {0}")]
    Generation(String),
}

/// Seam to the backend producing the loan agreement and sanction letter.
pub trait DocumentationService: Send + Sync {
    fn prepare(
        &self,
        request: &FundingRequest,
        breakdown: &DisbursementBreakdown,
    ) -> Result<FundingDocuments, DocumentationError>;
}

/// Default documentation backend issuing opaque references; orchestrators
/// with a document store swap in their own.
#[derive(Debug, Default)]
pub struct ReferenceDocumentation;

impl DocumentationService for ReferenceDocumentation {
    fn prepare(
        &self,
        _request: &FundingRequest,
        _breakdown: &DisbursementBreakdown,
    ) -> Result<FundingDocuments, DocumentationError> {
        Ok(FundingDocuments {
            loan_agreement_reference: format!("AGR-{}", Uuid::new_v4()),
            sanction_letter_reference: format!("SAN-{}", Uuid::new_v4()),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServicingError {
    #[error("servicing system rejected the repayment schedule: {0}")]
    Rejected(String),
}

/// Seam to the servicing system that owns the repayment schedule.
pub trait ServicingSetup: Send + Sync {
    fn establish(
        &self,
        request: &FundingRequest,
        disbursed_on: NaiveDate,
    ) -> Result<EmiSchedule, ServicingError>;
}

/// Default servicing backend computing the annuity schedule locally.
#[derive(Debug, Default)]
pub struct AnnuityServicing;

impl ServicingSetup for AnnuityServicing {
    fn establish(
        &self,
        request: &FundingRequest,
        disbursed_on: NaiveDate,
    ) -> Result<EmiSchedule, ServicingError> {
        Ok(emi_schedule(
            request.approved_amount,
            request.interest_rate,
            request.tenure_months,
            disbursed_on,
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Applicant-facing notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingNotification {
    pub template: String,
    pub application_id: ApplicationId,
    pub details: BTreeMap<String, String>,
}

pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: FundingNotification) -> Result<(), NotificationError>;
}

/// Service driving a funding request through the stage state machine.
pub struct FundingService<E, N> {
    battery: Vec<Box<dyn PreDisbursementCheck>>,
    issuer: Arc<dyn AccountNumberIssuer>,
    documentation: Arc<dyn DocumentationService>,
    servicing: Arc<dyn ServicingSetup>,
    executor: Arc<E>,
    notifications: Arc<N>,
}

impl<E, N> FundingService<E, N>
where
    E: DisbursementExecutor + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(executor: Arc<E>, notifications: Arc<N>) -> Self {
        Self {
            battery: standard_battery(),
            issuer: Arc::new(SequenceIssuer::default()),
            documentation: Arc::new(ReferenceDocumentation),
            servicing: Arc::new(AnnuityServicing),
            executor,
            notifications,
        }
    }

    pub fn with_issuer(mut self, issuer: Arc<dyn AccountNumberIssuer>) -> Self {
        self.issuer = issuer;
        self
    }

    pub fn with_documentation(mut self, documentation: Arc<dyn DocumentationService>) -> Self {
        self.documentation = documentation;
        self
    }

    pub fn with_servicing(mut self, servicing: Arc<dyn ServicingSetup>) -> Self {
        self.servicing = servicing;
        self
    }

    pub fn with_battery(mut self, battery: Vec<Box<dyn PreDisbursementCheck>>) -> Self {
        self.battery = battery;
        self
    }

    /// Process a funding request against the current wall clock.
    pub fn process(&self, request: FundingRequest) -> FundingOutcome {
        self.process_at(request, Utc::now())
    }

    /// Process a funding request with an explicit clock, used by tests and
    /// replay tooling.
    pub fn process_at(&self, request: FundingRequest, now: DateTime<Utc>) -> FundingOutcome {
        tracing::info!(
            application_id = %request.application_id.0,
            status = FundingStatus::InProgress.label(),
            "funding attempt started"
        );

        let context = CheckContext {
            application_id: request.application_id.clone(),
            decision_made_at: request.decision_made_at,
            now,
            conditions: request.conditions.clone(),
        };
        let checks = run_checks(&self.battery, &context);
        let check_summary = aggregate(&checks);

        let mut outcome = FundingOutcome {
            application_id: request.application_id.clone(),
            status: FundingStatus::InProgress,
            failed_at_stage: None,
            failure_reason: None,
            checks,
            check_summary,
            loan_account_number: None,
            breakdown: None,
            beneficiary_validation: None,
            disbursement_reference: None,
            utr_number: None,
            expected_credit_date: None,
            documents: None,
            emi_schedule: None,
        };

        if !outcome.check_summary.all_checks_passed {
            let reason = format!(
                "{} of {} checks failed ({} critical)",
                outcome.check_summary.failed,
                outcome.check_summary.total,
                outcome.check_summary.critical_failures
            );
            return self.fail(outcome, STAGE_PRE_DISBURSEMENT_CHECKS, reason);
        }

        let account_number = match self.issuer.issue(request.loan_type) {
            Ok(number) => number,
            Err(error) => {
                return self.fail(outcome, STAGE_ACCOUNT_CREATION, error.to_string());
            }
        };
        outcome.loan_account_number = Some(account_number);

        let breakdown = match calculate_disbursement(
            request.approved_amount,
            request.loan_type,
            &request.options,
        ) {
            Ok(breakdown) => breakdown,
            Err(error) => {
                return self.fail(outcome, STAGE_DISBURSEMENT_CALCULATION, error.to_string());
            }
        };
        outcome.breakdown = Some(breakdown.clone());

        let validation = validate_beneficiary(&request.applicant_name, &request.beneficiary);
        let valid = validation.valid;
        let details = validation.details.clone();
        outcome.beneficiary_validation = Some(validation);
        if !valid {
            return self.fail(outcome, STAGE_BENEFICIARY_VALIDATION, details);
        }

        let reference = disbursement_reference();
        let instruction = DisbursementInstruction {
            reference: reference.clone(),
            beneficiary: request.beneficiary.clone(),
            amount: breakdown.net_disbursement_amount,
            method: request.method,
        };
        outcome.disbursement_reference = Some(reference);

        let receipt = match self.executor.execute(&instruction) {
            Ok(receipt) => receipt,
            Err(error) => {
                return self.fail(outcome, STAGE_DISBURSEMENT_EXECUTION, error.to_string());
            }
        };
        outcome.utr_number = Some(receipt.utr_number.clone());

        let documents = match self.documentation.prepare(&request, &breakdown) {
            Ok(documents) => documents,
            Err(error) => {
                return self.fail(outcome, STAGE_DOCUMENTATION, error.to_string());
            }
        };
        outcome.documents = Some(documents);

        let disbursed_on = receipt.executed_at.date_naive();
        outcome.expected_credit_date = Some(expected_credit_date(request.method, disbursed_on));
        let schedule = match self.servicing.establish(&request, disbursed_on) {
            Ok(schedule) => schedule,
            Err(error) => {
                return self.fail(outcome, STAGE_SERVICING_SETUP, error.to_string());
            }
        };
        outcome.emi_schedule = Some(schedule);

        let mut details = BTreeMap::new();
        details.insert(
            "net_disbursement_amount".to_string(),
            breakdown.net_disbursement_amount.to_string(),
        );
        details.insert("utr_number".to_string(), receipt.utr_number);
        if let Some(account) = &outcome.loan_account_number {
            details.insert("loan_account_number".to_string(), account.clone());
        }
        let notification = FundingNotification {
            template: "loan_disbursed".to_string(),
            application_id: request.application_id.clone(),
            details,
        };
        if let Err(error) = self.notifications.publish(notification) {
            return self.fail(outcome, STAGE_NOTIFICATIONS, error.to_string());
        }

        outcome.status = FundingStatus::Completed;
        tracing::info!(
            application_id = %outcome.application_id.0,
            status = outcome.status.label(),
            "funding attempt completed"
        );
        outcome
    }

    fn fail(
        &self,
        mut outcome: FundingOutcome,
        stage: &'static str,
        reason: String,
    ) -> FundingOutcome {
        tracing::warn!(
            application_id = %outcome.application_id.0,
            stage,
            reason = reason.as_str(),
            "funding attempt failed"
        );
        outcome.status = FundingStatus::Failed;
        outcome.failed_at_stage = Some(stage.to_string());
        outcome.failure_reason = Some(reason);
        outcome
    }
}
