use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};

/// unique identifier for a loan, issued by the loan service
pub type LoanId = Uuid;

/// applicant KYC profile as captured from the onboarding form
///
/// Built client-side, validated, submitted once; not retained after
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub pan: String,
    pub aadhar: String,
    pub gstin: String,
    pub udyam: String,
}

impl ApplicantProfile {
    /// name as the loan service expects it, first and last joined
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// loan terms submitted for schedule creation
///
/// Field names are exactly the wire names of the loan service, so this
/// struct is also the `POST /loan` body. Repayment dates are
/// caller-supplied, one per installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub disbursement_date: NaiveDate,
    pub loan_amount: Money,
    pub interest_rate: Rate,
    pub tenure: u32,
    pub repayment_dates: Vec<NaiveDate>,
}
