use thiserror::Error;

use crate::client::ApiError;
use crate::validation::FieldError;

#[derive(Error, Debug)]
pub enum LendingError {
    /// field-scoped failures from a local validator; nothing was sent
    #[error("validation failed: {} field error(s)", report.len())]
    Validation { report: Vec<FieldError> },

    /// terminal failure of a remote loan service call
    #[error("{0}")]
    Api(#[from] ApiError),

    /// ledger view opened without a loan identifier
    #[error("no loan id available for ledger view")]
    MissingLoanId,

    /// fetched schedule violates its own invariants
    #[error("inconsistent repayment schedule: {message}")]
    InconsistentSchedule { message: String },

    #[error("csv export failed: {message}")]
    ExportFailed { message: String },
}

impl LendingError {
    /// the validation report, if this is a validation failure
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            LendingError::Validation { report } => Some(report),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LendingError>;
