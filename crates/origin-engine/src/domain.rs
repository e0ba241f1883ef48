use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for loan applications flowing through the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Supported loan products. Unknown products fall back to personal-loan fee
/// treatment during disbursement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    PersonalLoan,
    HomeLoan,
    CarLoan,
    EducationLoan,
    BusinessLoan,
    LoanAgainstProperty,
    Other,
}

impl LoanType {
    pub const fn label(self) -> &'static str {
        match self {
            LoanType::PersonalLoan => "personal_loan",
            LoanType::HomeLoan => "home_loan",
            LoanType::CarLoan => "car_loan",
            LoanType::EducationLoan => "education_loan",
            LoanType::BusinessLoan => "business_loan",
            LoanType::LoanAgainstProperty => "loan_against_property",
            LoanType::Other => "other",
        }
    }

    pub const fn account_prefix(self) -> &'static str {
        match self {
            LoanType::PersonalLoan => "PL",
            LoanType::HomeLoan => "HL",
            LoanType::CarLoan => "CL",
            LoanType::EducationLoan => "EL",
            LoanType::BusinessLoan => "BL",
            LoanType::LoanAgainstProperty => "LAP",
            LoanType::Other => "LN",
        }
    }
}

/// Outcome of a single verification adapter call. Adapters that could not
/// produce a result report `Unavailable` so the scoring engine can apply an
/// explicit fallback policy instead of inventing a default score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome<T> {
    Verified(T),
    Unavailable { reason: String },
}

impl<T> VerificationOutcome<T> {
    pub fn as_verified(&self) -> Option<&T> {
        match self {
            VerificationOutcome::Verified(value) => Some(value),
            VerificationOutcome::Unavailable { .. } => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            VerificationOutcome::Verified(_) => None,
            VerificationOutcome::Unavailable { reason } => Some(reason.as_str()),
        }
    }
}

/// Immutable per-application input to the scoring engine, assembled by the
/// stage orchestrator from verification adapter responses. Partial bundles are
/// represented through `VerificationOutcome::Unavailable`, never scored
/// silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationBundle {
    pub application_id: ApplicationId,
    pub applicant_name: String,
    pub requested_amount: Decimal,
    pub loan_type: LoanType,
    pub documents: VerificationOutcome<DocumentVerification>,
    pub employment: VerificationOutcome<EmploymentVerification>,
    pub financial: VerificationOutcome<FinancialAssessment>,
    pub banking: VerificationOutcome<BankingAnalysis>,
    pub references: VerificationOutcome<ReferenceVerification>,
}

/// Per-document verification results from the document adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVerification {
    pub documents: Vec<DocumentCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCheck {
    pub name: String,
    pub provided: bool,
    pub verified: bool,
    /// Adapter-assigned confidence for this document, 0-100.
    pub score: u8,
    pub quality: DocumentQuality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentQuality {
    Clear,
    Legible,
    Poor,
}

/// Employer-side verification flags plus the adapter's stability rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentVerification {
    pub company_verified: bool,
    pub designation_verified: bool,
    pub gross_income_verified: bool,
    pub experience_verified: bool,
    pub stability: EmploymentStability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStability {
    VeryStable,
    Stable,
    Moderate,
    Unstable,
}

/// Income, obligation, and affordability analysis for one applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAssessment {
    pub monthly_income: Decimal,
    pub monthly_obligations: Decimal,
    pub income_stability: IncomeStability,
    /// Fraction of income left for repayment after obligations, 0.0-1.0.
    pub repayment_capacity: f64,
    pub stress_test_passed: bool,
}

impl FinancialAssessment {
    /// Debt-to-income ratio. Zero income yields the defined sentinel
    /// (ratio 0.0, level `Unknown`) rather than a division error.
    pub fn dti_ratio(&self) -> DtiRatio {
        if self.monthly_income <= Decimal::ZERO {
            return DtiRatio {
                ratio: 0.0,
                level: DtiLevel::Unknown,
            };
        }
        let ratio = (self.monthly_obligations / self.monthly_income)
            .to_f64()
            .unwrap_or(0.0);
        let level = if ratio <= 0.30 {
            DtiLevel::Comfortable
        } else if ratio <= 0.50 {
            DtiLevel::Manageable
        } else {
            DtiLevel::Strained
        };
        DtiRatio { ratio, level }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DtiRatio {
    pub ratio: f64,
    pub level: DtiLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtiLevel {
    Comfortable,
    Manageable,
    Strained,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStability {
    Stable,
    Moderate,
    Volatile,
    Unknown,
}

/// Bank statement analysis summary from the banking adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankingAnalysis {
    pub account_verification: AccountVerification,
    pub transaction_regularity: TransactionRegularity,
    /// Adapter-assigned behaviour score, 0-100.
    pub behaviour_score: u8,
    pub bounce_count: u8,
    pub relationship: BankingRelationship,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountVerification {
    Verified,
    Partial,
    Unverified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionRegularity {
    Regular,
    Irregular,
    Sparse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankingRelationship {
    Strong,
    Standard,
    Weak,
}

impl BankingRelationship {
    pub const fn label(self) -> &'static str {
        match self {
            BankingRelationship::Strong => "strong",
            BankingRelationship::Standard => "standard",
            BankingRelationship::Weak => "weak",
        }
    }
}

/// Outcome of contacting the applicant's declared references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceVerification {
    pub references: Vec<ReferenceCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCheck {
    pub name: String,
    pub relationship: ReferenceRelationship,
    pub years_known: u8,
    pub contacted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRelationship {
    Family,
    Friend,
    Colleague,
    BusinessAssociate,
    Other,
}
