pub mod identity;
pub mod loan_terms;

pub use identity::validate_applicant;
pub use loan_terms::validate_loan_terms;

use std::fmt;

/// single field-scoped validation failure
///
/// The field name is owned because indexed entries such as
/// `repayment_dates[2]` are reported against their position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
