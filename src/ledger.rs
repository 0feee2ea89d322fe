use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LendingError, Result};
use crate::types::LoanTerms;

/// one row of an amortization schedule
///
/// `total_payment` is assumed to equal principal plus interest; the
/// split is produced by the loan service and not re-verified here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub payment_date: NaiveDate,
    pub principal_component: Money,
    pub interest_component: Money,
    pub total_payment: Money,
    pub outstanding_principal: Money,
}

/// ledger fetched from the loan service, read-only for one view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub loan_details: LoanTerms,
    pub emi: Money,
    pub repayment_schedule: Vec<Installment>,
}

/// a final balance within one paise of zero counts as settled
const FINAL_BALANCE_TOLERANCE: Money = Money::PAISE;

impl LedgerSnapshot {
    /// schedule ordered ascending by payment date
    ///
    /// The sort is stable: installments sharing a payment date keep
    /// their input order.
    pub fn sorted_schedule(&self) -> Vec<Installment> {
        let mut sorted = self.repayment_schedule.clone();
        sorted.sort_by_key(|entry| entry.payment_date);
        sorted
    }

    /// verify the schedule against its own invariants
    ///
    /// Once sorted by payment date the outstanding principal must be
    /// non-increasing and the final entry must close out the loan.
    pub fn check_consistency(&self) -> Result<()> {
        let sorted = self.sorted_schedule();

        let last = sorted.last().ok_or_else(|| LendingError::InconsistentSchedule {
            message: "repayment schedule is empty".to_string(),
        })?;

        for window in sorted.windows(2) {
            if window[1].outstanding_principal > window[0].outstanding_principal {
                return Err(LendingError::InconsistentSchedule {
                    message: format!(
                        "outstanding principal rises from {} to {} at {}",
                        window[0].outstanding_principal,
                        window[1].outstanding_principal,
                        window[1].payment_date,
                    ),
                });
            }
        }

        if last.outstanding_principal.abs() > FINAL_BALANCE_TOLERANCE {
            return Err(LendingError::InconsistentSchedule {
                message: format!(
                    "final outstanding principal is {}, expected zero",
                    last.outstanding_principal
                ),
            });
        }

        Ok(())
    }
}

/// as-of-date repayment state derived from a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPosition {
    pub next_due: Option<Installment>,
    pub outstanding_principal: Money,
}

/// derive the next due installment and outstanding principal
///
/// Pure over its inputs: re-evaluate whenever `on` or the snapshot
/// changes, nothing is cached between calls. An installment dated `on`
/// is due, not past. When every installment is in the past the
/// outstanding principal is forced to zero regardless of the trailing
/// schedule value.
pub fn derive_position(snapshot: &LedgerSnapshot, on: NaiveDate) -> LedgerPosition {
    let sorted = snapshot.sorted_schedule();

    let mut last_past: Option<&Installment> = None;
    let mut next_due: Option<&Installment> = None;

    for entry in &sorted {
        if entry.payment_date < on {
            last_past = Some(entry);
        } else {
            next_due = Some(entry);
            break;
        }
    }

    match next_due {
        Some(entry) => LedgerPosition {
            next_due: Some(entry.clone()),
            outstanding_principal: last_past
                .map(|past| past.outstanding_principal)
                .unwrap_or(snapshot.loan_details.loan_amount),
        },
        None => LedgerPosition {
            next_due: None,
            outstanding_principal: Money::ZERO,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn installment(payment_date: NaiveDate, outstanding: i64) -> Installment {
        Installment {
            payment_date,
            principal_component: Money::from_major(40_000),
            interest_component: Money::from_major(1_200),
            total_payment: Money::from_major(41_200),
            outstanding_principal: Money::from_major(outstanding),
        }
    }

    fn snapshot(schedule: Vec<Installment>) -> LedgerSnapshot {
        LedgerSnapshot {
            loan_details: LoanTerms {
                disbursement_date: date(2024, 1, 1),
                loan_amount: Money::from_major(120_000),
                interest_rate: Rate::from_percent(dec!(12)),
                tenure: schedule.len() as u32,
                repayment_dates: schedule.iter().map(|e| e.payment_date).collect(),
            },
            emi: Money::from_major(41_200),
            repayment_schedule: schedule,
        }
    }

    fn three_month_snapshot() -> LedgerSnapshot {
        snapshot(vec![
            installment(date(2024, 2, 1), 80_000),
            installment(date(2024, 3, 1), 40_000),
            installment(date(2024, 4, 1), 0),
        ])
    }

    #[test]
    fn test_before_first_installment() {
        let position = derive_position(&three_month_snapshot(), date(2024, 1, 15));
        assert_eq!(
            position.next_due.unwrap().payment_date,
            date(2024, 2, 1)
        );
        // nothing has fallen due, the full principal stands
        assert_eq!(position.outstanding_principal, Money::from_major(120_000));
    }

    #[test]
    fn test_mid_schedule() {
        let position = derive_position(&three_month_snapshot(), date(2024, 2, 15));
        assert_eq!(
            position.next_due.unwrap().payment_date,
            date(2024, 3, 1)
        );
        assert_eq!(position.outstanding_principal, Money::from_major(80_000));
    }

    #[test]
    fn test_all_installments_past() {
        let position = derive_position(&three_month_snapshot(), date(2024, 5, 1));
        assert!(position.next_due.is_none());
        assert_eq!(position.outstanding_principal, Money::ZERO);
    }

    #[test]
    fn test_installment_dated_today_is_due_not_past() {
        let position = derive_position(&three_month_snapshot(), date(2024, 3, 1));
        assert_eq!(
            position.next_due.unwrap().payment_date,
            date(2024, 3, 1)
        );
        assert_eq!(position.outstanding_principal, Money::from_major(80_000));
    }

    #[test]
    fn test_past_override_ignores_trailing_balance() {
        // service left a residual balance on the last row; once every
        // installment is past the position still reports zero
        let snap = snapshot(vec![
            installment(date(2024, 2, 1), 80_000),
            installment(date(2024, 3, 1), 40_000),
        ]);
        let position = derive_position(&snap, date(2024, 4, 1));
        assert!(position.next_due.is_none());
        assert_eq!(position.outstanding_principal, Money::ZERO);
    }

    #[test]
    fn test_unsorted_schedule_is_sorted_before_scanning() {
        let snap = snapshot(vec![
            installment(date(2024, 4, 1), 0),
            installment(date(2024, 2, 1), 80_000),
            installment(date(2024, 3, 1), 40_000),
        ]);
        let position = derive_position(&snap, date(2024, 2, 15));
        assert_eq!(
            position.next_due.unwrap().payment_date,
            date(2024, 3, 1)
        );
        assert_eq!(position.outstanding_principal, Money::from_major(80_000));
    }

    #[test]
    fn test_equal_payment_dates_keep_input_order() {
        let mut first = installment(date(2024, 3, 1), 40_000);
        first.total_payment = Money::from_major(41_200);
        let mut second = installment(date(2024, 3, 1), 20_000);
        second.total_payment = Money::from_major(21_200);

        let snap = snapshot(vec![
            installment(date(2024, 2, 1), 80_000),
            first.clone(),
            second,
        ]);

        // the first of the tied entries is the next due one
        let position = derive_position(&snap, date(2024, 2, 15));
        assert_eq!(position.next_due.unwrap(), first);
    }

    #[test]
    fn test_consistency_accepts_well_formed_schedule() {
        assert!(three_month_snapshot().check_consistency().is_ok());
    }

    #[test]
    fn test_consistency_accepts_residual_within_tolerance() {
        let snap = snapshot(vec![
            installment(date(2024, 2, 1), 80_000),
            Installment {
                outstanding_principal: Money::from_decimal(dec!(0.01)),
                ..installment(date(2024, 3, 1), 0)
            },
        ]);
        assert!(snap.check_consistency().is_ok());
    }

    #[test]
    fn test_consistency_rejects_rising_balance() {
        let snap = snapshot(vec![
            installment(date(2024, 2, 1), 40_000),
            installment(date(2024, 3, 1), 80_000),
            installment(date(2024, 4, 1), 0),
        ]);
        let err = snap.check_consistency().unwrap_err();
        assert!(matches!(err, LendingError::InconsistentSchedule { .. }));
    }

    #[test]
    fn test_consistency_rejects_open_final_balance() {
        let snap = snapshot(vec![
            installment(date(2024, 2, 1), 80_000),
            installment(date(2024, 3, 1), 40_000),
        ]);
        let err = snap.check_consistency().unwrap_err();
        assert!(err.to_string().contains("final outstanding principal"));
    }

    #[test]
    fn test_consistency_rejects_empty_schedule() {
        let snap = snapshot(vec![]);
        assert!(snap.check_consistency().is_err());
    }
}
