pub mod client;
pub mod decimal;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod session;
pub mod types;
pub mod validation;

// re-export key types
pub use client::{
    ApiError, CreateApplicantRequest, LoanService, LoanServiceClient, ServiceConfig,
};
pub use decimal::{Money, Rate};
pub use errors::{LendingError, Result};
pub use export::{ledger_csv_filename, schedule_to_csv};
pub use ledger::{derive_position, Installment, LedgerPosition, LedgerSnapshot};
pub use session::{submit_applicant, submit_loan_terms, FetchState, LedgerView, Session};
pub use types::{ApplicantProfile, LoanId, LoanTerms};
pub use validation::{validate_applicant, validate_loan_terms, FieldError};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
