use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{BankingAnalysis, BankingRelationship, FinancialAssessment};

use super::decision::Decision;

const BASE_RATE: f64 = 12.0;
const MIN_RATE: f64 = 8.0;
const MAX_RATE: f64 = 18.0;
const STRONG_BANKING_DISCOUNT: f64 = 0.25;
const INCOME_MULTIPLE_CAP: u32 = 60;

struct ScoreBracket {
    floor: u8,
    rate_adjustment: f64,
    max_tenure_months: u16,
    processing_fee_percentage: f64,
    prepayment_charges_percentage: f64,
}

const BRACKETS: [ScoreBracket; 5] = [
    ScoreBracket {
        floor: 90,
        rate_adjustment: -1.5,
        max_tenure_months: 84,
        processing_fee_percentage: 0.25,
        prepayment_charges_percentage: 0.0,
    },
    ScoreBracket {
        floor: 80,
        rate_adjustment: -1.0,
        max_tenure_months: 72,
        processing_fee_percentage: 0.5,
        prepayment_charges_percentage: 1.0,
    },
    ScoreBracket {
        floor: 70,
        rate_adjustment: -0.5,
        max_tenure_months: 60,
        processing_fee_percentage: 0.75,
        prepayment_charges_percentage: 1.5,
    },
    ScoreBracket {
        floor: 60,
        rate_adjustment: 0.0,
        max_tenure_months: 48,
        processing_fee_percentage: 1.0,
        prepayment_charges_percentage: 2.0,
    },
    ScoreBracket {
        floor: 0,
        rate_adjustment: 1.0,
        max_tenure_months: 36,
        processing_fee_percentage: 1.5,
        prepayment_charges_percentage: 3.0,
    },
];

/// Recommended terms for an approvable application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOffer {
    /// Annual interest rate as a percentage, bounded to [8.0, 18.0].
    pub interest_rate: f64,
    pub max_loan_amount: Decimal,
    pub max_tenure_months: u16,
    pub processing_fee_percentage: f64,
    pub prepayment_charges_percentage: f64,
}

/// Loan terms attached to a decision. Rejected applications carry
/// `NotApplicable`; so do degraded bundles whose financial assessment was
/// unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoanTerms {
    NotApplicable,
    Offer(LoanOffer),
}

impl LoanTerms {
    pub fn offer(&self) -> Option<&LoanOffer> {
        match self {
            LoanTerms::Offer(offer) => Some(offer),
            LoanTerms::NotApplicable => None,
        }
    }
}

pub(crate) fn generate_loan_terms(
    overall_score: u8,
    financial: Option<&FinancialAssessment>,
    banking: Option<&BankingAnalysis>,
    decision: Decision,
) -> LoanTerms {
    if decision == Decision::Rejected {
        return LoanTerms::NotApplicable;
    }
    let Some(financial) = financial else {
        return LoanTerms::NotApplicable;
    };

    let bracket = BRACKETS
        .iter()
        .find(|bracket| overall_score >= bracket.floor)
        .unwrap_or(&BRACKETS[BRACKETS.len() - 1]);

    let mut rate = BASE_RATE + bracket.rate_adjustment;
    if banking.map(|analysis| analysis.relationship) == Some(BankingRelationship::Strong) {
        rate -= STRONG_BANKING_DISCOUNT;
    }
    let rate = rate.clamp(MIN_RATE, MAX_RATE);

    let income = financial.monthly_income;
    let income_multiple_limit = income * Decimal::from(INCOME_MULTIPLE_CAP);
    let capacity = Decimal::from_f64_retain(financial.repayment_capacity.max(0.0))
        .unwrap_or(Decimal::ZERO);
    let affordability_limit = (income
        * capacity
        * Decimal::new(8, 1)
        * Decimal::from(bracket.max_tenure_months))
    .round_dp(2);
    let max_loan_amount = income_multiple_limit.min(affordability_limit);

    LoanTerms::Offer(LoanOffer {
        interest_rate: rate,
        max_loan_amount,
        max_tenure_months: bracket.max_tenure_months,
        processing_fee_percentage: bracket.processing_fee_percentage,
        prepayment_charges_percentage: bracket.prepayment_charges_percentage,
    })
}
