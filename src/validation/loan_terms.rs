use chrono::NaiveDate;

use super::FieldError;
use crate::types::LoanTerms;

/// check loan terms ahead of schedule creation
///
/// Rules are evaluated independently and failures accumulate, with one
/// exception: the dates-after-disbursement scan stops at the first
/// offending index and reports only that entry. An empty report means
/// the terms may be submitted.
pub fn validate_loan_terms(terms: &LoanTerms, today: NaiveDate) -> Vec<FieldError> {
    let mut report = Vec::new();

    if terms.disbursement_date < today {
        report.push(FieldError::new(
            "disbursement_date",
            "disbursement date cannot be in the past",
        ));
    }

    if !terms.loan_amount.is_positive() {
        report.push(FieldError::new("loan_amount", "loan amount must be positive"));
    }

    if !terms.interest_rate.is_positive() {
        report.push(FieldError::new(
            "interest_rate",
            "interest rate must be positive",
        ));
    }

    if terms.tenure == 0 {
        report.push(FieldError::new(
            "tenure",
            "tenure must be a positive number of months",
        ));
    }

    if terms.repayment_dates.is_empty() {
        report.push(FieldError::new(
            "repayment_dates",
            "at least one repayment date is required",
        ));
    }

    // fail-fast: only the first entry at or before the disbursement
    // date is reported; later entries are not checked in this pass
    for (idx, date) in terms.repayment_dates.iter().enumerate() {
        if *date <= terms.disbursement_date {
            report.push(FieldError::new(
                format!("repayment_dates[{idx}]"),
                "repayment date must be after the disbursement date",
            ));
            break;
        }
    }

    if terms.repayment_dates.len() != terms.tenure as usize {
        report.push(FieldError::new(
            "repayment_dates",
            "number of repayment dates must match the tenure",
        ));
    }

    report
}
