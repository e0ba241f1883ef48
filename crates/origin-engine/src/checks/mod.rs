//! Pre-disbursement check battery.
//!
//! Six named checks run unconditionally (no short-circuit) against the
//! application context. Compliance, fraud, duplicate, and sanctions checks
//! are pluggable behind [`PreDisbursementCheck`]; the bundled implementations
//! keep the upstream pass-through behavior until real rule sources are wired
//! in.

mod aggregate;

pub use aggregate::{aggregate, CheckSummary};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ApplicationId;

pub const CREDIT_DECISION_VALIDITY: &str = "credit_decision_validity";
pub const LOAN_CONDITIONS_MET: &str = "loan_conditions_met";
pub const REGULATORY_COMPLIANCE: &str = "regulatory_compliance";
pub const FRAUD_CHECK: &str = "fraud_check";
pub const DUPLICATE_CHECK: &str = "duplicate_check";
pub const SANCTIONS_SCREENING: &str = "sanctions_screening";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    Warning,
}

impl CheckStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
            CheckStatus::Warning => "warning",
        }
    }
}

/// Result of one named check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    /// A failed critical check blocks funding regardless of other results.
    pub critical: bool,
    pub details: String,
}

/// A declared approval condition and whether it has been satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanCondition {
    pub description: String,
    pub satisfied: bool,
}

/// Everything a check may inspect for one funding attempt.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub application_id: ApplicationId,
    pub decision_made_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
    pub conditions: Vec<LoanCondition>,
}

pub trait PreDisbursementCheck: Send + Sync {
    fn name(&self) -> &'static str;
    fn critical(&self) -> bool;
    fn run(&self, context: &CheckContext) -> CheckResult;

    fn result(&self, status: CheckStatus, details: impl Into<String>) -> CheckResult
    where
        Self: Sized,
    {
        CheckResult {
            name: self.name().to_string(),
            status,
            critical: self.critical(),
            details: details.into(),
        }
    }
}

/// Credit decisions expire after a fixed validity window.
pub struct CreditDecisionValidity {
    validity: Duration,
}

impl CreditDecisionValidity {
    pub fn with_window(validity: Duration) -> Self {
        Self { validity }
    }
}

impl Default for CreditDecisionValidity {
    fn default() -> Self {
        Self::with_window(Duration::days(30))
    }
}

impl PreDisbursementCheck for CreditDecisionValidity {
    fn name(&self) -> &'static str {
        CREDIT_DECISION_VALIDITY
    }

    fn critical(&self) -> bool {
        true
    }

    fn run(&self, context: &CheckContext) -> CheckResult {
        let age = context.now - context.decision_made_at;
        if age <= self.validity {
            self.result(
                CheckStatus::Passed,
                format!("decision is {} day(s) old", age.num_days()),
            )
        } else {
            self.result(
                CheckStatus::Failed,
                format!(
                    "decision is {} day(s) old, exceeding the {}-day validity window",
                    age.num_days(),
                    self.validity.num_days()
                ),
            )
        }
    }
}

/// Passes when every declared approval condition is satisfied; an empty
/// condition list passes trivially.
#[derive(Default)]
pub struct LoanConditionsMet;

impl PreDisbursementCheck for LoanConditionsMet {
    fn name(&self) -> &'static str {
        LOAN_CONDITIONS_MET
    }

    fn critical(&self) -> bool {
        false
    }

    fn run(&self, context: &CheckContext) -> CheckResult {
        let unmet: Vec<_> = context
            .conditions
            .iter()
            .filter(|condition| !condition.satisfied)
            .map(|condition| condition.description.as_str())
            .collect();

        if unmet.is_empty() {
            self.result(
                CheckStatus::Passed,
                format!("{} condition(s) satisfied", context.conditions.len()),
            )
        } else {
            self.result(
                CheckStatus::Failed,
                format!("unmet conditions: {}", unmet.join("; ")),
            )
        }
    }
}

macro_rules! pass_through_check {
    ($type:ident, $name:expr, $details:expr) => {
        #[derive(Default)]
        pub struct $type;

        impl PreDisbursementCheck for $type {
            fn name(&self) -> &'static str {
                $name
            }

            fn critical(&self) -> bool {
                true
            }

            fn run(&self, _context: &CheckContext) -> CheckResult {
                self.result(CheckStatus::Passed, $details)
            }
        }
    };
}

pass_through_check!(
    RegulatoryCompliance,
    REGULATORY_COMPLIANCE,
    "KYC, AML, and regulatory flags clear"
);
pass_through_check!(FraudCheck, FRAUD_CHECK, "fraud score below threshold");
pass_through_check!(
    DuplicateCheck,
    DUPLICATE_CHECK,
    "no duplicate application by PAN, mobile, email, or bank account"
);
pass_through_check!(
    SanctionsScreening,
    SANCTIONS_SCREENING,
    "no sanctions, watchlist, or PEP match"
);

/// The fixed six-check battery in its standard configuration.
pub fn standard_battery() -> Vec<Box<dyn PreDisbursementCheck>> {
    vec![
        Box::new(CreditDecisionValidity::default()),
        Box::new(LoanConditionsMet),
        Box::new(RegulatoryCompliance),
        Box::new(FraudCheck),
        Box::new(DuplicateCheck),
        Box::new(SanctionsScreening),
    ]
}

/// Run every check in the battery; results are collected in battery order
/// with no short-circuiting.
pub fn run_checks(
    battery: &[Box<dyn PreDisbursementCheck>],
    context: &CheckContext,
) -> Vec<CheckResult> {
    battery.iter().map(|check| check.run(context)).collect()
}
