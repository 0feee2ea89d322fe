use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use super::FieldError;
use crate::types::ApplicantProfile;

const NAME_MAX_LEN: usize = 20;
const MIN_AGE_YEARS: i32 = 18;

fn pan_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$").expect("hardcoded regex should be valid")
    })
}

fn aadhar_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}\s\d{4}\s\d{4}$").expect("hardcoded regex should be valid")
    })
}

fn gstin_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{2}[A-Z]{5}\d{4}[A-Z]{1}[A-Z\d]{1}Z[A-Z\d]{1}$")
            .expect("hardcoded regex should be valid")
    })
}

fn udyam_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^UDYAM-[A-Z]{2}-00-\d{7}$").expect("hardcoded regex should be valid")
    })
}

/// check applicant KYC fields
///
/// Every rule is evaluated independently; failures accumulate across
/// fields. An empty report means the profile may be submitted.
pub fn validate_applicant(profile: &ApplicantProfile, today: NaiveDate) -> Vec<FieldError> {
    let mut report = Vec::new();

    check_name_part(&mut report, "first_name", &profile.first_name);
    check_name_part(&mut report, "last_name", &profile.last_name);

    if age_on(profile.date_of_birth, today) < MIN_AGE_YEARS {
        report.push(FieldError::new(
            "date_of_birth",
            "applicant must be at least 18 years old",
        ));
    }

    check_pattern(&mut report, "pan", &profile.pan, pan_pattern(), "invalid PAN format");
    check_pattern(
        &mut report,
        "aadhar",
        &profile.aadhar,
        aadhar_pattern(),
        "invalid Aadhar format",
    );
    check_pattern(
        &mut report,
        "gstin",
        &profile.gstin,
        gstin_pattern(),
        "invalid GSTIN format",
    );
    check_pattern(
        &mut report,
        "udyam",
        &profile.udyam,
        udyam_pattern(),
        "invalid UDYAM format",
    );

    report
}

/// completed years of age as of `today`, exact calendar arithmetic
///
/// A birthday not yet reached in the current year reduces the age by
/// one.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

fn check_name_part(report: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        report.push(FieldError::new(field, "must not be empty"));
    } else if value.chars().count() > NAME_MAX_LEN {
        report.push(FieldError::new(
            field,
            format!("must be at most {} characters", NAME_MAX_LEN),
        ));
    }
}

fn check_pattern(
    report: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    pattern: &Regex,
    message: &str,
) {
    if !pattern.is_match(value) {
        report.push(FieldError::new(field, message));
    }
}
