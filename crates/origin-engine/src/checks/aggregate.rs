use serde::{Deserialize, Serialize};

use super::{CheckResult, CheckStatus};

/// Aggregate view over a full check battery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub all_checks_passed: bool,
    pub critical_failures: usize,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
}

pub fn aggregate(results: &[CheckResult]) -> CheckSummary {
    let passed = results
        .iter()
        .filter(|result| result.status == CheckStatus::Passed)
        .count();
    let failed = results
        .iter()
        .filter(|result| result.status == CheckStatus::Failed)
        .count();
    let warnings = results
        .iter()
        .filter(|result| result.status == CheckStatus::Warning)
        .count();
    let critical_failures = results
        .iter()
        .filter(|result| result.status == CheckStatus::Failed && result.critical)
        .count();

    CheckSummary {
        all_checks_passed: passed == results.len(),
        critical_failures,
        total: results.len(),
        passed,
        failed,
        warnings,
    }
}
