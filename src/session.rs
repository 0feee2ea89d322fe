use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, info};

use crate::client::{ApiError, CreateApplicantRequest, LoanService};
use crate::errors::{LendingError, Result};
use crate::ledger::{derive_position, LedgerPosition, LedgerSnapshot};
use crate::types::{ApplicantProfile, LoanId, LoanTerms};
use crate::validation::{validate_applicant, validate_loan_terms};

/// explicit tri-state result of a remote fetch
///
/// Replaces implicit loading/error/data flags: a view slot starts
/// `Pending` and resolves to exactly one of the other two states. The
/// caller sequences operations; nothing here retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> FetchState<T> {
    /// resolve from a completed call
    pub fn from_call(result: std::result::Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => FetchState::Ready(value),
            Err(err) => FetchState::Failed(err.to_string()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Pending
    }
}

/// context threaded explicitly between onboarding steps
///
/// Carries the loan identifier from loan-term submission to the ledger
/// view instead of passing it through ephemeral navigation state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    loan_id: Option<LoanId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loan_id(&self) -> Option<LoanId> {
        self.loan_id
    }

    pub fn record_loan(&mut self, loan_id: LoanId) {
        self.loan_id = Some(loan_id);
    }

    /// the loan id, or the fatal missing-precondition error
    pub fn require_loan_id(&self) -> Result<LoanId> {
        self.loan_id.ok_or(LendingError::MissingLoanId)
    }
}

/// validate and submit an applicant profile
///
/// All field failures are reported together and block the remote call
/// entirely; the wire is touched only when the report is empty.
pub fn submit_applicant(
    service: &impl LoanService,
    profile: &ApplicantProfile,
    time: &SafeTimeProvider,
) -> Result<()> {
    let today = time.now().date_naive();
    let report = validate_applicant(profile, today);
    if !report.is_empty() {
        debug!(errors = report.len(), "applicant submission blocked by validation");
        return Err(LendingError::Validation { report });
    }

    service.create_applicant(&CreateApplicantRequest::from(profile))?;
    info!("applicant submitted");
    Ok(())
}

/// validate and submit loan terms, recording the issued loan id
pub fn submit_loan_terms(
    service: &impl LoanService,
    session: &mut Session,
    terms: &LoanTerms,
    time: &SafeTimeProvider,
) -> Result<LoanId> {
    let today = time.now().date_naive();
    let report = validate_loan_terms(terms, today);
    if !report.is_empty() {
        debug!(errors = report.len(), "loan terms blocked by validation");
        return Err(LendingError::Validation { report });
    }

    let loan_id = service.create_loan(terms)?;
    session.record_loan(loan_id);
    info!(%loan_id, "loan terms accepted");
    Ok(loan_id)
}

/// one ledger query: fetch, consistency-check, derive as-of state
#[derive(Debug, Clone)]
pub struct LedgerView {
    pub loan_id: LoanId,
    /// reference date captured once at load time
    pub as_of: NaiveDate,
    pub ledger: FetchState<LedgerSnapshot>,
    pub position: Option<LedgerPosition>,
}

impl LedgerView {
    /// open the ledger view for the session's loan
    ///
    /// A missing loan id is fatal for the view. The reference date is
    /// captured once so the whole derivation observes one consistent
    /// "today" even if wall-clock time advances during the fetch. A
    /// remote failure resolves the fetch state to `Failed` with the
    /// user-facing message; an inconsistent schedule is an error.
    pub fn load(
        service: &impl LoanService,
        session: &Session,
        time: &SafeTimeProvider,
    ) -> Result<LedgerView> {
        let loan_id = session.require_loan_id()?;
        let as_of = time.now().date_naive();

        match service.fetch_ledger(loan_id) {
            Ok(snapshot) => {
                snapshot.check_consistency()?;
                let position = derive_position(&snapshot, as_of);
                Ok(LedgerView {
                    loan_id,
                    as_of,
                    ledger: FetchState::Ready(snapshot),
                    position: Some(position),
                })
            }
            Err(err) => Ok(LedgerView {
                loan_id,
                as_of,
                ledger: FetchState::Failed(err.to_string()),
                position: None,
            }),
        }
    }

    /// re-derive the position for a new reference date
    ///
    /// The derivation is never cached; a view refreshed on a later day
    /// recomputes from the same snapshot.
    pub fn position_on(&self, on: NaiveDate) -> Option<LedgerPosition> {
        self.ledger
            .as_ready()
            .map(|snapshot| derive_position(snapshot, on))
    }

    /// fetch the downloadable CSV artifact for this loan
    pub fn export_csv(&self, service: &impl LoanService) -> Result<Vec<u8>> {
        Ok(service.fetch_ledger_csv(self.loan_id)?)
    }
}
