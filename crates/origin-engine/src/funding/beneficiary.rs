use serde::{Deserialize, Serialize};

use crate::similarity::{name_similarity, MatchStatus, NameSimilarity};

/// Bank account receiving the loan proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryAccount {
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder_name: String,
    pub bank_name: String,
}

/// Outcome of matching the account holder against the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryValidation {
    pub similarity: NameSimilarity,
    pub valid: bool,
    pub details: String,
}

/// A beneficiary is valid only on a full name match; partial matches are
/// routed back to the orchestrator rather than funded.
pub fn validate_beneficiary(
    applicant_name: &str,
    account: &BeneficiaryAccount,
) -> BeneficiaryValidation {
    let similarity = name_similarity(applicant_name, &account.account_holder_name);
    let valid = similarity.status == MatchStatus::Matched;
    let details = format!(
        "account holder '{}' vs applicant '{}': {} (similarity {:.2})",
        account.account_holder_name,
        applicant_name,
        similarity.status.label(),
        similarity.score,
    );

    BeneficiaryValidation {
        similarity,
        valid,
        details,
    }
}
