//! Entity use-case services.
//!
//! # Responsibility
//! - Provide the stable entry points callers use to create, mutate, link
//!   and query tracker entities.
//! - Run field validation before writes and translate persistence
//!   failures into one caller-facing error type.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - The service layer remains storage-agnostic; repositories are
//!   injected as trait implementations.

use crate::repo::RepoError;
use crate::validate::ValidationReport;
use chrono::Utc;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod company_service;
pub mod contact_service;
pub mod job_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error surfaced by every tracker service.
#[derive(Debug)]
pub enum ServiceError {
    /// The input draft failed field validation; the full report is
    /// returned so callers can surface every violation at once.
    Validation(ValidationReport),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(report) => write!(f, "validation failed: {report}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Rejects the draft when its validation report carries errors.
pub(crate) fn ensure_valid(report: ValidationReport) -> ServiceResult<()> {
    if report.is_valid() {
        Ok(())
    } else {
        Err(ServiceError::Validation(report))
    }
}

/// RFC 3339 timestamp for creation and transition times.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Today's UTC calendar date as `YYYY-MM-DD`, the follow-up default.
pub(crate) fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
