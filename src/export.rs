use csv::Writer;

use crate::errors::{LendingError, Result};
use crate::ledger::Installment;
use crate::types::LoanId;

const HEADER: [&str; 5] = [
    "Payment Date",
    "Principal Component",
    "Interest Component",
    "Total Payment",
    "Outstanding Principal",
];

/// render a schedule to CSV bytes
///
/// One row per installment in the schedule's given order, no re-sort
/// and no dropped rows. Dates are ISO 8601, monetary fields exactly
/// two decimal places. Pure rendering over already-validated data.
pub fn schedule_to_csv(schedule: &[Installment]) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());

    writer.write_record(HEADER).map_err(export_failed)?;

    for entry in schedule {
        writer
            .write_record([
                entry.payment_date.to_string(),
                entry.principal_component.to_string(),
                entry.interest_component.to_string(),
                entry.total_payment.to_string(),
                entry.outstanding_principal.to_string(),
            ])
            .map_err(export_failed)?;
    }

    writer.into_inner().map_err(|err| LendingError::ExportFailed {
        message: err.to_string(),
    })
}

/// download artifact name for a loan's ledger
pub fn ledger_csv_filename(loan_id: LoanId) -> String {
    format!("ledger_{}.csv", loan_id)
}

fn export_failed(err: csv::Error) -> LendingError {
    LendingError::ExportFailed {
        message: err.to_string(),
    }
}
