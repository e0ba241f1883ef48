//! Loan origination decision engine.
//!
//! Pure, stateless building blocks consumed by a stage orchestrator:
//! multi-factor scoring over a verification bundle, recommended loan terms,
//! disbursement fee calculation, the pre-disbursement check battery, and the
//! funding stage state machine. The engine owns no persistence, HTTP surface,
//! or retry policy; those belong to the caller.

pub mod checks;
pub mod disbursement;
pub mod domain;
pub mod funding;
pub mod scoring;
pub mod similarity;

pub use checks::{aggregate, standard_battery, CheckResult, CheckStatus, CheckSummary};
pub use disbursement::{
    calculate_disbursement, DisbursementBreakdown, DisbursementError, DisbursementOptions,
};
pub use domain::{ApplicationId, LoanType, VerificationBundle, VerificationOutcome};
pub use funding::{FundingOutcome, FundingRequest, FundingService, FundingStatus};
pub use scoring::{
    ApplicationScore, Decision, DecisionReport, Evaluation, InvalidInputError, ScoringConfig,
    ScoringEngine,
};
pub use similarity::{name_similarity, MatchStatus, NameSimilarity};
