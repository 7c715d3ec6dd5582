//! Pure field-level validation for creation inputs.
//!
//! # Responsibility
//! - Check drafts against the field contracts before any write.
//! - Collect every violation into one report; no short-circuiting.
//!
//! # Invariants
//! - Validation performs no I/O and never panics.
//! - A report with zero errors means the draft is persistable.

use crate::model::company::CompanyDraft;
use crate::model::contact::ContactDraft;
use crate::model::job::JobDraft;
use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date shape regex"));

/// One field violation with a caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Aggregate outcome of validating one draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "valid");
        }
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validates a job creation input.
pub fn validate_job(draft: &JobDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.job_title.trim().is_empty() {
        report.push("job_title", "Job title is required");
    }
    if draft.location.trim().is_empty() {
        report.push("location", "Location is required");
    }

    if !(1..=5).contains(&draft.excitement_level) {
        report.push(
            "excitement_level",
            "Excitement level must be between 1 and 5",
        );
    }
    if matches!(draft.salary_min, Some(min) if min < 0) {
        report.push("salary_min", "Minimum salary cannot be negative");
    }
    if matches!(draft.salary_max, Some(max) if max < 0) {
        report.push("salary_max", "Maximum salary cannot be negative");
    }
    if let (Some(min), Some(max)) = (draft.salary_min, draft.salary_max) {
        if min > max {
            report.push(
                "salary_max",
                "Maximum salary must be greater than minimum salary",
            );
        }
    }

    check_url(&mut report, "job_url", draft.job_url.as_deref());
    check_url(&mut report, "application_url", draft.application_url.as_deref());

    check_date(&mut report, "date_posted", draft.date_posted.as_deref());
    check_date(&mut report, "date_applied", draft.date_applied.as_deref());
    check_date(&mut report, "deadline", draft.deadline.as_deref());
    check_date(&mut report, "follow_up_date", draft.follow_up_date.as_deref());

    report
}

/// Validates a company creation input.
pub fn validate_company(draft: &CompanyDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.name.trim().is_empty() {
        report.push("name", "Company name is required");
    }

    if !(1..=5).contains(&draft.excitement_level) {
        report.push(
            "excitement_level",
            "Excitement level must be between 1 and 5",
        );
    }
    if let Some(year) = draft.year_founded {
        if year < 1800 {
            report.push("year_founded", "Year founded seems too early");
        } else if year > Utc::now().year() {
            report.push("year_founded", "Year founded cannot be in the future");
        }
    }
    if matches!(draft.glassdoor_rating, Some(rating) if !(1.0..=5.0).contains(&rating)) {
        report.push(
            "glassdoor_rating",
            "Glassdoor rating must be between 1 and 5",
        );
    }

    check_url(&mut report, "website", draft.website.as_deref());
    check_url(&mut report, "linkedin_url", draft.linkedin_url.as_deref());

    report
}

/// Validates a contact creation input.
pub fn validate_contact(draft: &ContactDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.full_name.trim().is_empty() {
        report.push("full_name", "Full name is required");
    }

    if let Some(email) = draft.email.as_deref() {
        if !EMAIL_RE.is_match(email) {
            report.push("email", "Invalid email format");
        }
    }

    check_url(&mut report, "linkedin_url", draft.linkedin_url.as_deref());
    check_date(&mut report, "follow_up_date", draft.follow_up_date.as_deref());

    report
}

fn check_url(report: &mut ValidationReport, field: &'static str, value: Option<&str>) {
    if let Some(url) = value {
        if Url::parse(url).is_err() {
            report.push(field, "Invalid URL format");
        }
    }
}

fn check_date(report: &mut ValidationReport, field: &'static str, value: Option<&str>) {
    if let Some(date) = value {
        if !is_valid_date(date) {
            report.push(field, "Invalid date format");
        }
    }
}

/// Accepts only real calendar dates written as `YYYY-MM-DD`.
pub fn is_valid_date(value: &str) -> bool {
    DATE_SHAPE_RE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
