//! Job and status-history domain models.
//!
//! # Invariants
//! - `id` is stable and never reused for another job.
//! - `date_saved` is assigned once at creation and never changes.
//! - Every job carries at least one status-history row from the moment it
//!   exists; each status change appends exactly one more.
//! - `salary_min <= salary_max` when both are present.

use crate::model::company::CompanyId;
use crate::model::enums::{JobSource, JobStatus, JobType, SeniorityLevel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a job row.
pub type JobId = Uuid;

/// A tracked job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub job_title: String,
    pub company_id: CompanyId,
    pub job_url: Option<String>,
    pub application_url: Option<String>,
    pub department: Option<String>,
    pub job_type: JobType,
    pub seniority_level: SeniorityLevel,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: String,
    /// Calendar date `YYYY-MM-DD`.
    pub date_posted: Option<String>,
    /// RFC 3339 creation timestamp, immutable after creation.
    pub date_saved: String,
    pub date_applied: Option<String>,
    pub deadline: Option<String>,
    pub status: JobStatus,
    pub rejection_date: Option<String>,
    pub rejection_stage: Option<String>,
    /// Subjective interest score, 1..=5.
    pub excitement_level: i32,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
    pub source: JobSource,
}

/// Creation input for a job; the service allocates id and `date_saved`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub job_title: String,
    pub company_id: CompanyId,
    pub job_url: Option<String>,
    pub application_url: Option<String>,
    pub department: Option<String>,
    pub job_type: JobType,
    pub seniority_level: SeniorityLevel,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: String,
    pub date_posted: Option<String>,
    pub date_applied: Option<String>,
    pub deadline: Option<String>,
    pub status: JobStatus,
    pub rejection_date: Option<String>,
    pub rejection_stage: Option<String>,
    pub excitement_level: i32,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
    pub source: JobSource,
}

impl JobDraft {
    /// Materializes the draft with a fresh id and the creation timestamp.
    pub fn into_job(self, id: JobId, date_saved: String) -> Job {
        Job {
            id,
            job_title: self.job_title,
            company_id: self.company_id,
            job_url: self.job_url,
            application_url: self.application_url,
            department: self.department,
            job_type: self.job_type,
            seniority_level: self.seniority_level,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            location: self.location,
            date_posted: self.date_posted,
            date_saved,
            date_applied: self.date_applied,
            deadline: self.deadline,
            status: self.status,
            rejection_date: self.rejection_date,
            rejection_stage: self.rejection_stage,
            excitement_level: self.excitement_level,
            notes: self.notes,
            follow_up_date: self.follow_up_date,
            source: self.source,
        }
    }
}

impl From<Job> for JobDraft {
    fn from(job: Job) -> Self {
        Self {
            job_title: job.job_title,
            company_id: job.company_id,
            job_url: job.job_url,
            application_url: job.application_url,
            department: job.department,
            job_type: job.job_type,
            seniority_level: job.seniority_level,
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            location: job.location,
            date_posted: job.date_posted,
            date_applied: job.date_applied,
            deadline: job.deadline,
            status: job.status,
            rejection_date: job.rejection_date,
            rejection_stage: job.rejection_stage,
            excitement_level: job.excitement_level,
            notes: job.notes,
            follow_up_date: job.follow_up_date,
            source: job.source,
        }
    }
}

/// Partial update for a job.
///
/// `None` leaves the field unchanged; for nullable columns `Some(None)`
/// clears the stored value. `date_saved` is intentionally absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobPatch {
    pub job_title: Option<String>,
    pub company_id: Option<CompanyId>,
    pub job_url: Option<Option<String>>,
    pub application_url: Option<Option<String>>,
    pub department: Option<Option<String>>,
    pub job_type: Option<JobType>,
    pub seniority_level: Option<SeniorityLevel>,
    pub salary_min: Option<Option<i64>>,
    pub salary_max: Option<Option<i64>>,
    pub location: Option<String>,
    pub date_posted: Option<Option<String>>,
    pub date_applied: Option<Option<String>>,
    pub deadline: Option<Option<String>>,
    pub status: Option<JobStatus>,
    pub rejection_date: Option<Option<String>>,
    pub rejection_stage: Option<Option<String>>,
    pub excitement_level: Option<i32>,
    pub notes: Option<Option<String>>,
    pub follow_up_date: Option<Option<String>>,
    pub source: Option<JobSource>,
}

impl JobPatch {
    /// Merges the supplied fields onto an existing job.
    pub fn apply(self, job: &mut Job) {
        if let Some(job_title) = self.job_title {
            job.job_title = job_title;
        }
        if let Some(company_id) = self.company_id {
            job.company_id = company_id;
        }
        if let Some(job_url) = self.job_url {
            job.job_url = job_url;
        }
        if let Some(application_url) = self.application_url {
            job.application_url = application_url;
        }
        if let Some(department) = self.department {
            job.department = department;
        }
        if let Some(job_type) = self.job_type {
            job.job_type = job_type;
        }
        if let Some(seniority_level) = self.seniority_level {
            job.seniority_level = seniority_level;
        }
        if let Some(salary_min) = self.salary_min {
            job.salary_min = salary_min;
        }
        if let Some(salary_max) = self.salary_max {
            job.salary_max = salary_max;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(date_posted) = self.date_posted {
            job.date_posted = date_posted;
        }
        if let Some(date_applied) = self.date_applied {
            job.date_applied = date_applied;
        }
        if let Some(deadline) = self.deadline {
            job.deadline = deadline;
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(rejection_date) = self.rejection_date {
            job.rejection_date = rejection_date;
        }
        if let Some(rejection_stage) = self.rejection_stage {
            job.rejection_stage = rejection_stage;
        }
        if let Some(level) = self.excitement_level {
            job.excitement_level = level;
        }
        if let Some(notes) = self.notes {
            job.notes = notes;
        }
        if let Some(follow_up_date) = self.follow_up_date {
            job.follow_up_date = follow_up_date;
        }
        if let Some(source) = self.source {
            job.source = source;
        }
    }
}

/// One append-only audit row for a job status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: Uuid,
    pub job_id: JobId,
    /// `None` only for the row written alongside job creation.
    pub old_status: Option<JobStatus>,
    pub new_status: JobStatus,
    /// RFC 3339 timestamp of the transition.
    pub changed_at: String,
    pub notes: Option<String>,
}
