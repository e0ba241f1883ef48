//! Loan account number issuing and disbursement references.
//!
//! Account numbers come from a centrally-issued sequence rather than a
//! timestamp-plus-random scheme, which can collide under concurrent issuance.
//! Orchestrators with a persistence layer can supply their own issuer.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::LoanType;

#[derive(Debug, thiserror::Error)]
pub enum AccountNumberError {
    #[error("account number sequence unavailable: {0}")]
    SequenceUnavailable(String),
}

/// Source of unique loan account numbers. Issuers backed by a core banking
/// sequence may fail when that system is unreachable.
pub trait AccountNumberIssuer: Send + Sync {
    fn issue(&self, loan_type: LoanType) -> Result<String, AccountNumberError>;
}

/// Process-local monotonic issuer: `{TypePrefix}{10-digit sequence}`.
#[derive(Debug)]
pub struct SequenceIssuer {
    next: AtomicU64,
}

impl SequenceIssuer {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequenceIssuer {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl AccountNumberIssuer for SequenceIssuer {
    fn issue(&self, loan_type: LoanType) -> Result<String, AccountNumberError> {
        let sequence = self.next.fetch_add(1, Ordering::Relaxed);
        Ok(format!("{}{sequence:010}", loan_type.account_prefix()))
    }
}

/// Globally unique reference attached to each disbursement instruction.
pub fn disbursement_reference() -> String {
    format!("DISB-{}", Uuid::new_v4())
}
