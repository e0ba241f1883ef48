//! Disbursement calculation: processing fee, GST, insurance, other charges,
//! and the resulting net disbursement amount. All monetary arithmetic uses
//! `Decimal` so `net + total_deductions == approved` holds exactly.

pub mod account;
pub mod schedule;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::LoanType;

const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2); // 0.18
const INSURANCE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 3); // 0.005
const OTHER_CHARGES: Decimal = Decimal::from_parts(500, 0, 0, false, 0); // flat 500

/// Caller-supplied switches for waivable fee components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisbursementOptions {
    pub insurance_opt_out: bool,
    pub waive_other_charges: bool,
}

/// Itemized deductions and the resulting net disbursement amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisbursementBreakdown {
    pub approved_loan_amount: Decimal,
    pub processing_fee: Decimal,
    pub gst_on_processing_fee: Decimal,
    pub insurance_premium: Decimal,
    pub other_charges: Decimal,
    pub total_deductions: Decimal,
    pub net_disbursement_amount: Decimal,
}

#[derive(Debug, thiserror::Error)]
pub enum DisbursementError {
    #[error("approved amount must be positive (found {0})")]
    NonPositiveAmount(Decimal),
    #[error(
        "net disbursement would be negative: deductions {deductions} exceed approved amount {approved}"
    )]
    NegativeNetDisbursement {
        approved: Decimal,
        deductions: Decimal,
    },
}

struct FeeSchedule {
    rate: Decimal,
    cap: Decimal,
}

fn fee_schedule(loan_type: LoanType) -> FeeSchedule {
    match loan_type {
        // Unknown products take the personal-loan fee row.
        LoanType::PersonalLoan | LoanType::Other => FeeSchedule {
            rate: Decimal::new(2, 2), // 2%
            cap: Decimal::from(50_000),
        },
        LoanType::HomeLoan => FeeSchedule {
            rate: Decimal::new(5, 3), // 0.5%
            cap: Decimal::from(100_000),
        },
        LoanType::CarLoan | LoanType::EducationLoan | LoanType::LoanAgainstProperty => {
            FeeSchedule {
                rate: Decimal::new(1, 2), // 1%
                cap: Decimal::from(100_000),
            }
        }
        LoanType::BusinessLoan => FeeSchedule {
            rate: Decimal::new(15, 3), // 1.5%
            cap: Decimal::from(100_000),
        },
    }
}

/// Compute the full deduction breakdown for an approved amount.
///
/// The calculator does not clamp a negative net amount; it surfaces
/// [`DisbursementError::NegativeNetDisbursement`] so the caller can route the
/// failure explicitly.
pub fn calculate_disbursement(
    approved_amount: Decimal,
    loan_type: LoanType,
    options: &DisbursementOptions,
) -> Result<DisbursementBreakdown, DisbursementError> {
    if approved_amount <= Decimal::ZERO {
        return Err(DisbursementError::NonPositiveAmount(approved_amount));
    }

    let schedule = fee_schedule(loan_type);
    let processing_fee = (approved_amount * schedule.rate)
        .round_dp(2)
        .min(schedule.cap);
    let gst_on_processing_fee = (processing_fee * GST_RATE).round_dp(2);

    let insurance_premium = if loan_type == LoanType::PersonalLoan && !options.insurance_opt_out {
        (approved_amount * INSURANCE_RATE).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let other_charges = if options.waive_other_charges {
        Decimal::ZERO
    } else {
        OTHER_CHARGES
    };

    let total_deductions =
        processing_fee + gst_on_processing_fee + insurance_premium + other_charges;
    let net_disbursement_amount = approved_amount - total_deductions;

    if net_disbursement_amount < Decimal::ZERO {
        return Err(DisbursementError::NegativeNetDisbursement {
            approved: approved_amount,
            deductions: total_deductions,
        });
    }

    Ok(DisbursementBreakdown {
        approved_loan_amount: approved_amount,
        processing_fee,
        gst_on_processing_fee,
        insurance_premium,
        other_charges,
        total_deductions,
        net_disbursement_amount,
    })
}
