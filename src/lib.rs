//! Core domain library for a job-search tracker.
//!
//! This crate owns the tracked entities (companies, jobs, contacts and the
//! links between them), their validation rules, SQLite persistence with an
//! append-only job status history, and the service facades the host
//! application calls.
//!
//! Layering, bottom up:
//! - [`db`]: connection bootstrap, migrations, schema verification.
//! - [`model`]: entity structs, drafts, patches, domain enums.
//! - [`validate`]: field-level validation producing per-field reports.
//! - [`query`]: typed filter tree rendered to parameterized SQL.
//! - [`repo`]: repository traits plus their SQLite implementations.
//! - [`service`]: orchestration, the only layer hosts should call.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod validate;

pub use db::{open_db, open_db_in_memory, DbError};
pub use model::company::{Company, CompanyDraft, CompanyId, CompanyPatch};
pub use model::contact::{Contact, ContactDraft, ContactId, ContactPatch, JobContactLink};
pub use model::enums::{
    CompanySize, CompanyType, ContactGoal, ContactRelationship, ContactStatus, JobSource,
    JobStatus, JobType, SeniorityLevel,
};
pub use model::job::{Job, JobDraft, JobId, JobPatch, StatusChange};
pub use query::{Direction, QueryBuilder};
pub use repo::company_repo::{CompanyRepository, SqliteCompanyRepository};
pub use repo::contact_repo::{ContactRepository, SqliteContactRepository};
pub use repo::job_repo::{JobRepository, SqliteJobRepository};
pub use repo::{RepoError, RepoResult, Repository};
pub use service::company_service::{CompanyService, CompanyStats};
pub use service::contact_service::{ContactService, ContactStats};
pub use service::job_service::{JobFilters, JobService, JobStats};
pub use service::{ServiceError, ServiceResult};
pub use validate::{FieldError, ValidationReport};

/// Returns the crate version baked in at compile time.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn core_version_matches_manifest() {
        assert_eq!(core_version(), env!("CARGO_PKG_VERSION"));
    }
}
