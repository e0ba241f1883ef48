//! Expected credit dates per disbursement rail and EMI schedule anchors.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment rails offered for loan disbursement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementMethod {
    Rtgs,
    Neft,
    Imps,
    Upi,
    BankTransfer,
}

impl DisbursementMethod {
    pub const fn label(self) -> &'static str {
        match self {
            DisbursementMethod::Rtgs => "rtgs",
            DisbursementMethod::Neft => "neft",
            DisbursementMethod::Imps => "imps",
            DisbursementMethod::Upi => "upi",
            DisbursementMethod::BankTransfer => "bank_transfer",
        }
    }
}

/// RTGS, IMPS, and UPI settle the same calendar day; NEFT and plain bank
/// transfers credit the next calendar day.
pub fn expected_credit_date(method: DisbursementMethod, initiated_on: NaiveDate) -> NaiveDate {
    match method {
        DisbursementMethod::Rtgs | DisbursementMethod::Imps | DisbursementMethod::Upi => {
            initiated_on
        }
        DisbursementMethod::Neft | DisbursementMethod::BankTransfer => initiated_on
            .checked_add_days(Days::new(1))
            .unwrap_or(initiated_on),
    }
}

/// EMI anchor dates plus the estimated installment amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiSchedule {
    /// Estimated installment from the standard annuity formula, rounded to
    /// two decimals.
    pub emi_amount: Decimal,
    pub first_emi_date: NaiveDate,
    pub final_emi_date: NaiveDate,
    pub tenure_months: u16,
}

/// Build the EMI schedule for a disbursed loan.
///
/// The anchor day is clamped to 28 so the due day exists in every month of
/// the schedule; the first EMI falls one month after disbursement.
pub fn emi_schedule(
    principal: Decimal,
    annual_rate_percentage: f64,
    tenure_months: u16,
    disbursed_on: NaiveDate,
) -> EmiSchedule {
    let tenure_months = tenure_months.max(1);
    let anchor_day = disbursed_on.day().min(28);
    let anchor = disbursed_on.with_day(anchor_day).unwrap_or(disbursed_on);
    let first_emi_date = anchor
        .checked_add_months(Months::new(1))
        .unwrap_or(anchor);
    let final_emi_date = first_emi_date
        .checked_add_months(Months::new(u32::from(tenure_months) - 1))
        .unwrap_or(first_emi_date);

    EmiSchedule {
        emi_amount: emi_amount(principal, annual_rate_percentage, tenure_months),
        first_emi_date,
        final_emi_date,
        tenure_months,
    }
}

fn emi_amount(principal: Decimal, annual_rate_percentage: f64, tenure_months: u16) -> Decimal {
    let principal_f = principal.to_f64().unwrap_or(0.0);
    let monthly_rate = annual_rate_percentage / 1200.0;
    let installments = f64::from(tenure_months);

    let emi = if monthly_rate <= f64::EPSILON {
        principal_f / installments
    } else {
        let factor = (1.0 + monthly_rate).powi(i32::from(tenure_months));
        principal_f * monthly_rate * factor / (factor - 1.0)
    };

    Decimal::from_f64_retain(emi)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn rtgs_imps_upi_credit_same_day() {
        let initiated = date(2026, 3, 14);
        for method in [
            DisbursementMethod::Rtgs,
            DisbursementMethod::Imps,
            DisbursementMethod::Upi,
        ] {
            assert_eq!(expected_credit_date(method, initiated), initiated);
        }
    }

    #[test]
    fn neft_and_bank_transfer_credit_next_day() {
        let initiated = date(2026, 3, 31);
        for method in [DisbursementMethod::Neft, DisbursementMethod::BankTransfer] {
            assert_eq!(expected_credit_date(method, initiated), date(2026, 4, 1));
        }
    }

    #[test]
    fn first_emi_falls_one_month_after_disbursement() {
        let schedule = emi_schedule(dec!(480_000), 10.25, 60, date(2026, 1, 15));
        assert_eq!(schedule.first_emi_date, date(2026, 2, 15));
        assert_eq!(schedule.final_emi_date, date(2030, 1, 15));
        assert_eq!(schedule.tenure_months, 60);
    }

    #[test]
    fn month_end_disbursement_anchors_on_the_28th() {
        let schedule = emi_schedule(dec!(100_000), 12.0, 12, date(2026, 1, 31));
        assert_eq!(schedule.first_emi_date, date(2026, 2, 28));
        assert_eq!(schedule.final_emi_date, date(2027, 1, 28));
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        let schedule = emi_schedule(dec!(120_000), 0.0, 12, date(2026, 6, 1));
        assert_eq!(schedule.emi_amount, dec!(10_000));
    }

    #[test]
    fn emi_amount_matches_annuity_formula() {
        // 500,000 at 12% over 60 months is a well-known 11,122.22 EMI.
        let schedule = emi_schedule(dec!(500_000), 12.0, 60, date(2026, 6, 1));
        assert_eq!(schedule.emi_amount, dec!(11_122.22));
    }
}
