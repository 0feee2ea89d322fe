use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::ledger::LedgerSnapshot;
use crate::types::{ApplicantProfile, LoanId, LoanTerms};

/// connection settings for the remote loan service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// failure of a remote loan service call
///
/// Any non-success outcome is terminal for that attempt; the display
/// form is the single message shown to the user.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("loan service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("loan service rejected the request: {detail}")]
    Service { status: u16, detail: String },

    #[error("invalid response from loan service: {0}")]
    InvalidResponse(String),
}

/// body of `POST /user`, assembled from a validated profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateApplicantRequest {
    pub name: String,
    pub dob: NaiveDate,
    pub pan: String,
    pub aadhar: String,
    pub gstin: String,
    pub udyam: String,
}

impl From<&ApplicantProfile> for CreateApplicantRequest {
    fn from(profile: &ApplicantProfile) -> Self {
        Self {
            name: profile.full_name(),
            dob: profile.date_of_birth,
            pan: profile.pan.clone(),
            aadhar: profile.aadhar.clone(),
            gstin: profile.gstin.clone(),
            udyam: profile.udyam.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateLoanResponse {
    loan_id: LoanId,
}

/// FastAPI-style error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// narrow request/response contract with the remote loan service
///
/// The service owns applicant/loan persistence and schedule
/// generation. Calls are independent: no retry, no caching, no
/// reconciliation across calls; each result is consumed exactly once
/// by the caller.
pub trait LoanService {
    fn create_applicant(&self, request: &CreateApplicantRequest) -> Result<(), ApiError>;
    fn create_loan(&self, terms: &LoanTerms) -> Result<LoanId, ApiError>;
    fn fetch_ledger(&self, loan_id: LoanId) -> Result<LedgerSnapshot, ApiError>;
    fn fetch_ledger_csv(&self, loan_id: LoanId) -> Result<Vec<u8>, ApiError>;
}

/// blocking HTTP client for the loan service
///
/// One in-flight request per call; duplicate-submission guarding is
/// the calling context's responsibility.
pub struct LoanServiceClient {
    client: Client,
    base_url: String,
}

impl LoanServiceClient {
    pub fn new(config: &ServiceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .map(|body| body.detail)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        warn!(status = status.as_u16(), %detail, "loan service returned an error");
        Err(ApiError::Service {
            status: status.as_u16(),
            detail,
        })
    }
}

impl LoanService for LoanServiceClient {
    fn create_applicant(&self, request: &CreateApplicantRequest) -> Result<(), ApiError> {
        debug!(pan = %request.pan, "submitting applicant");
        let response = self.client.post(self.url("/user")).json(request).send()?;
        Self::check_status(response)?;
        Ok(())
    }

    fn create_loan(&self, terms: &LoanTerms) -> Result<LoanId, ApiError> {
        debug!(tenure = terms.tenure, "submitting loan terms");
        let response = self.client.post(self.url("/loan")).json(terms).send()?;
        let response = Self::check_status(response)?;
        let body: CreateLoanResponse = response
            .json()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        Ok(body.loan_id)
    }

    fn fetch_ledger(&self, loan_id: LoanId) -> Result<LedgerSnapshot, ApiError> {
        debug!(%loan_id, "fetching ledger");
        let response = self
            .client
            .get(self.url("/ledger"))
            .query(&[("loan_id", loan_id.to_string())])
            .send()?;
        let response = Self::check_status(response)?;
        response
            .json()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    fn fetch_ledger_csv(&self, loan_id: LoanId) -> Result<Vec<u8>, ApiError> {
        debug!(%loan_id, "fetching ledger csv");
        let response = self
            .client
            .get(self.url("/ledger/csv"))
            .query(&[("loan_id", loan_id.to_string())])
            .send()?;
        let response = Self::check_status(response)?;
        Ok(response.bytes()?.to_vec())
    }
}
