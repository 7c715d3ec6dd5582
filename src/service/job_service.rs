//! Job use-case service.
//!
//! # Responsibility
//! - Own the job lifecycle and guarantee every status transition is
//!   durably recorded in the audit history.
//! - Compose search/filter intent for the repository and compute
//!   follow-up and aggregate views.
//!
//! # Invariants
//! - Creation writes the job and its initial history row as one atomic
//!   unit; a job is never observable without history.
//! - A status-changing update records the transition before the job row
//!   is rewritten, in the same transaction.
//! - `date_saved` is assigned here exactly once and never patched.

use crate::model::company::CompanyId;
use crate::model::enums::{JobSource, JobStatus, JobType, SeniorityLevel};
use crate::model::job::{Job, JobDraft, JobId, JobPatch, StatusChange};
use crate::query::{Direction, QueryBuilder};
use crate::repo::job_repo::JobRepository;
use crate::service::{ensure_valid, now_timestamp, today, ServiceError, ServiceResult};
use crate::validate::validate_job;
use std::collections::BTreeMap;
use uuid::Uuid;

const JOB_SEARCH_COLUMNS: [&str; 4] = ["job_title", "location", "department", "notes"];

/// Conjunctive filter set for `find_by_filters`.
///
/// Empty vectors and `None` fields are omitted from the conjunction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub status: Vec<JobStatus>,
    pub company_id: Option<CompanyId>,
    pub seniority_level: Vec<SeniorityLevel>,
    pub job_type: Vec<JobType>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
}

/// Aggregate dashboard view over all jobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobStats {
    pub total_jobs: u64,
    /// Jobs whose status still counts as in play (saved through offer).
    pub active_jobs: u64,
    pub jobs_by_status: BTreeMap<JobStatus, u64>,
    /// Mean excitement level, rounded to two decimals; 0 with no jobs.
    pub average_excitement: f64,
}

/// Job service facade over repository implementations.
pub struct JobService<R: JobRepository> {
    repo: R,
}

impl<R: JobRepository> JobService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new job plus its initial history row.
    ///
    /// `date_saved` is set to the current time; the history row records
    /// the initial status with no predecessor.
    pub fn create(&mut self, draft: JobDraft) -> ServiceResult<Job> {
        ensure_valid(validate_job(&draft))?;

        let now = now_timestamp();
        let job = draft.into_job(Uuid::new_v4(), now.clone());
        let initial = StatusChange {
            id: Uuid::new_v4(),
            job_id: job.id,
            old_status: None,
            new_status: job.status,
            changed_at: now,
            notes: None,
        };
        self.repo.insert_with_history(&job, &initial)?;
        Ok(job)
    }

    /// Gets one job by id; `None` when unknown.
    pub fn find_by_id(&self, id: JobId) -> ServiceResult<Option<Job>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// All jobs, most recently saved first.
    pub fn find_all(&self) -> ServiceResult<Vec<Job>> {
        Ok(self.repo.find_all()?)
    }

    /// Jobs at one company, most recently saved first.
    pub fn find_by_company_id(&self, company_id: CompanyId) -> ServiceResult<Vec<Job>> {
        let builder = QueryBuilder::new()
            .where_eq("company_id", company_id.to_string())
            .order_by("date_saved", Direction::Desc);
        Ok(self.repo.query(&builder)?)
    }

    /// Jobs in one status, most recently saved first.
    pub fn find_by_status(&self, status: JobStatus) -> ServiceResult<Vec<Job>> {
        let builder = QueryBuilder::new()
            .where_eq("status", status.as_str().to_string())
            .order_by("date_saved", Direction::Desc);
        Ok(self.repo.query(&builder)?)
    }

    /// Substring search across title, location, department and notes.
    ///
    /// Jobs whose title contains the query sort before all other matches;
    /// within each group the most recently saved job comes first.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<Job>> {
        let query = query.trim();
        if query.is_empty() {
            return self.find_all();
        }

        let builder = QueryBuilder::new()
            .search(&JOB_SEARCH_COLUMNS, query)
            .order_by("date_saved", Direction::Desc);
        let mut jobs = self.repo.query(&builder)?;

        // Stable sort keeps the date ordering within each relevance group.
        let needle = query.to_lowercase();
        jobs.sort_by_key(|job| !job.job_title.to_lowercase().contains(&needle));
        Ok(jobs)
    }

    /// Conjunctive filter query, most recently saved first.
    pub fn find_by_filters(&self, filters: &JobFilters) -> ServiceResult<Vec<Job>> {
        let mut builder = QueryBuilder::new().where_in(
            "status",
            filters.status.iter().map(|s| s.as_str().to_string()),
        );
        if let Some(company_id) = filters.company_id {
            builder = builder.where_eq("company_id", company_id.to_string());
        }
        builder = builder
            .where_in(
                "seniority_level",
                filters.seniority_level.iter().map(|s| s.as_str().to_string()),
            )
            .where_in(
                "job_type",
                filters.job_type.iter().map(|t| t.as_str().to_string()),
            );
        if let Some(salary_min) = filters.salary_min {
            builder = builder.where_eq("salary_min", salary_min);
        }
        if let Some(salary_max) = filters.salary_max {
            builder = builder.where_eq("salary_max", salary_max);
        }
        builder = builder.order_by("date_saved", Direction::Desc);
        Ok(self.repo.query(&builder)?)
    }

    /// Merges the patch onto the stored row; `None` when the id is
    /// unknown.
    ///
    /// When the patch changes the status, the transition is recorded in
    /// the history before the job row is rewritten.
    pub fn update(&mut self, id: JobId, patch: JobPatch) -> ServiceResult<Option<Job>> {
        let Some(mut job) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };

        let previous_status = job.status;
        let requested_status = patch.status;
        patch.apply(&mut job);
        ensure_valid(validate_job(&JobDraft::from(job.clone())))?;

        let transition = match requested_status {
            Some(new_status) if new_status != previous_status => Some(StatusChange {
                id: Uuid::new_v4(),
                job_id: id,
                old_status: Some(previous_status),
                new_status,
                changed_at: now_timestamp(),
                notes: None,
            }),
            _ => None,
        };

        self.repo.update_with_transition(&job, transition.as_ref())?;

        match self.repo.find_by_id(id)? {
            Some(refreshed) => Ok(Some(refreshed)),
            None => Err(ServiceError::InconsistentState(
                "updated job not found in read-back",
            )),
        }
    }

    /// Removes the job and, by cascade, its links and history rows.
    pub fn delete(&mut self, id: JobId) -> ServiceResult<bool> {
        Ok(self.repo.delete(id)?)
    }

    /// Audit history for one job, newest transition first.
    pub fn get_status_history(&self, job_id: JobId) -> ServiceResult<Vec<StatusChange>> {
        Ok(self.repo.status_history(job_id)?)
    }

    /// Jobs due for a follow-up on the given date (default: today) whose
    /// status still makes a reminder meaningful.
    pub fn get_jobs_with_follow_ups(&self, date: Option<&str>) -> ServiceResult<Vec<Job>> {
        let target = date.map(str::to_string).unwrap_or_else(today);
        let builder = QueryBuilder::new()
            .where_eq("follow_up_date", target)
            .where_in(
                "status",
                JobStatus::ALL
                    .iter()
                    .filter(|status| status.awaits_follow_up())
                    .map(|status| status.as_str().to_string()),
            )
            .order_by("follow_up_date", Direction::Asc);
        Ok(self.repo.query(&builder)?)
    }

    /// Aggregate counts and mean excitement over all jobs.
    pub fn get_stats(&self) -> ServiceResult<JobStats> {
        let jobs = self.repo.find_all()?;

        let mut jobs_by_status: BTreeMap<JobStatus, u64> = BTreeMap::new();
        let mut active_jobs = 0u64;
        let mut excitement_sum = 0i64;
        for job in &jobs {
            *jobs_by_status.entry(job.status).or_insert(0) += 1;
            if job.status.is_active() {
                active_jobs += 1;
            }
            excitement_sum += i64::from(job.excitement_level);
        }

        let average_excitement = if jobs.is_empty() {
            0.0
        } else {
            let mean = excitement_sum as f64 / jobs.len() as f64;
            (mean * 100.0).round() / 100.0
        };

        Ok(JobStats {
            total_jobs: jobs.len() as u64,
            active_jobs,
            jobs_by_status,
            average_excitement,
        })
    }
}
