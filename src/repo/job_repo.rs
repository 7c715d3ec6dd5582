//! Job repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist job rows together with their append-only status history.
//! - Run filtered/ordered job selects built by the service layer.
//!
//! # Invariants
//! - A job row is never visible without its initial history row; creation
//!   writes both inside one immediate transaction.
//! - A status-changing update writes the audit row before the job row,
//!   inside one immediate transaction.
//! - History rows are never updated; they disappear only when the parent
//!   job is deleted (cascade).

use crate::model::enums::{JobSource, JobStatus, JobType, SeniorityLevel};
use crate::model::job::{Job, JobId, StatusChange};
use crate::query::QueryBuilder;
use crate::repo::{classify_write_error, parse_uuid, RepoError, RepoResult, Repository};
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const JOB_SELECT_SQL: &str = "SELECT
    id,
    job_title,
    company_id,
    job_url,
    application_url,
    department,
    job_type,
    seniority_level,
    salary_min,
    salary_max,
    location,
    date_posted,
    date_saved,
    date_applied,
    deadline,
    status,
    rejection_date,
    rejection_stage,
    excitement_level,
    notes,
    follow_up_date,
    source
FROM jobs";

/// Repository interface for job persistence and status auditing.
pub trait JobRepository: Repository<Entity = Job> {
    /// Inserts the job and its initial history row as one atomic unit.
    fn insert_with_history(&mut self, job: &Job, initial: &StatusChange) -> RepoResult<()>;
    /// Writes the full row back, recording the transition first when one
    /// is supplied. `NotFound` when the id is unknown.
    fn update_with_transition(
        &mut self,
        job: &Job,
        transition: Option<&StatusChange>,
    ) -> RepoResult<()>;
    /// Runs an arbitrary filtered/ordered select built by the caller.
    fn query(&self, builder: &QueryBuilder) -> RepoResult<Vec<Job>>;
    /// History for one job, newest transition first.
    fn status_history(&self, job_id: JobId) -> RepoResult<Vec<StatusChange>>;
}

/// SQLite-backed job repository.
pub struct SqliteJobRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteJobRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteJobRepository<'_> {
    type Entity = Job;

    fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Job>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{JOB_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_job_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> RepoResult<Vec<Job>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{JOB_SELECT_SQL} ORDER BY date_saved DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            jobs.push(parse_job_row(row)?);
        }
        Ok(jobs)
    }

    fn delete(&mut self, id: Uuid) -> RepoResult<bool> {
        // job_contacts and job_status_history rows go with it (cascade).
        let changed = self
            .conn
            .execute("DELETE FROM jobs WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

impl JobRepository for SqliteJobRepository<'_> {
    fn insert_with_history(&mut self, job: &Job, initial: &StatusChange) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        insert_job_row(&tx, job)?;
        insert_history_row(&tx, initial)?;
        tx.commit()?;
        Ok(())
    }

    fn update_with_transition(
        &mut self,
        job: &Job,
        transition: Option<&StatusChange>,
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if let Some(transition) = transition {
            insert_history_row(&tx, transition)?;
        }

        let changed = tx
            .execute(
                "UPDATE jobs
                 SET
                    job_title = ?1,
                    company_id = ?2,
                    job_url = ?3,
                    application_url = ?4,
                    department = ?5,
                    job_type = ?6,
                    seniority_level = ?7,
                    salary_min = ?8,
                    salary_max = ?9,
                    location = ?10,
                    date_posted = ?11,
                    date_applied = ?12,
                    deadline = ?13,
                    status = ?14,
                    rejection_date = ?15,
                    rejection_stage = ?16,
                    excitement_level = ?17,
                    notes = ?18,
                    follow_up_date = ?19,
                    source = ?20
                 WHERE id = ?21;",
                params![
                    job.job_title.as_str(),
                    job.company_id.to_string(),
                    job.job_url.as_deref(),
                    job.application_url.as_deref(),
                    job.department.as_deref(),
                    job.job_type.as_str(),
                    job.seniority_level.as_str(),
                    job.salary_min,
                    job.salary_max,
                    job.location.as_str(),
                    job.date_posted.as_deref(),
                    job.date_applied.as_deref(),
                    job.deadline.as_deref(),
                    job.status.as_str(),
                    job.rejection_date.as_deref(),
                    job.rejection_stage.as_deref(),
                    job.excitement_level,
                    job.notes.as_deref(),
                    job.follow_up_date.as_deref(),
                    job.source.as_str(),
                    job.id.to_string(),
                ],
            )
            .map_err(|err| classify_write_error("job", "job_update", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound(job.id));
        }

        tx.commit()?;
        Ok(())
    }

    fn query(&self, builder: &QueryBuilder) -> RepoResult<Vec<Job>> {
        let (clause, binds) = builder.render();
        let mut stmt = self.conn.prepare(&format!("{JOB_SELECT_SQL}{clause};"))?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            jobs.push(parse_job_row(row)?);
        }
        Ok(jobs)
    }

    fn status_history(&self, job_id: JobId) -> RepoResult<Vec<StatusChange>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, job_id, old_status, new_status, changed_at, notes
             FROM job_status_history
             WHERE job_id = ?1
             ORDER BY changed_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([job_id.to_string()])?;
        let mut history = Vec::new();
        while let Some(row) = rows.next()? {
            history.push(parse_history_row(row)?);
        }
        Ok(history)
    }
}

fn insert_job_row(tx: &Transaction<'_>, job: &Job) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO jobs (
            id,
            job_title,
            company_id,
            job_url,
            application_url,
            department,
            job_type,
            seniority_level,
            salary_min,
            salary_max,
            location,
            date_posted,
            date_saved,
            date_applied,
            deadline,
            status,
            rejection_date,
            rejection_stage,
            excitement_level,
            notes,
            follow_up_date,
            source
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                  ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22);",
        params![
            job.id.to_string(),
            job.job_title.as_str(),
            job.company_id.to_string(),
            job.job_url.as_deref(),
            job.application_url.as_deref(),
            job.department.as_deref(),
            job.job_type.as_str(),
            job.seniority_level.as_str(),
            job.salary_min,
            job.salary_max,
            job.location.as_str(),
            job.date_posted.as_deref(),
            job.date_saved.as_str(),
            job.date_applied.as_deref(),
            job.deadline.as_deref(),
            job.status.as_str(),
            job.rejection_date.as_deref(),
            job.rejection_stage.as_deref(),
            job.excitement_level,
            job.notes.as_deref(),
            job.follow_up_date.as_deref(),
            job.source.as_str(),
        ],
    )
    .map_err(|err| classify_write_error("job", "job_insert", err))?;
    Ok(())
}

fn insert_history_row(tx: &Transaction<'_>, change: &StatusChange) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO job_status_history (
            id,
            job_id,
            old_status,
            new_status,
            changed_at,
            notes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            change.id.to_string(),
            change.job_id.to_string(),
            change.old_status.map(JobStatus::as_str),
            change.new_status.as_str(),
            change.changed_at.as_str(),
            change.notes.as_deref(),
        ],
    )
    .map_err(|err| classify_write_error("status history", "history_insert", err))?;
    Ok(())
}

fn parse_job_row(row: &Row<'_>) -> RepoResult<Job> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "jobs.id")?;
    let company_text: String = row.get("company_id")?;
    let company_id = parse_uuid(&company_text, "jobs.company_id")?;

    let job_type_text: String = row.get("job_type")?;
    let job_type = JobType::from_db(&job_type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid job type `{job_type_text}` in jobs.job_type"))
    })?;
    let seniority_text: String = row.get("seniority_level")?;
    let seniority_level = SeniorityLevel::from_db(&seniority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid seniority level `{seniority_text}` in jobs.seniority_level"
        ))
    })?;
    let status_text: String = row.get("status")?;
    let status = JobStatus::from_db(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid job status `{status_text}` in jobs.status"))
    })?;
    let source_text: String = row.get("source")?;
    let source = JobSource::from_db(&source_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid job source `{source_text}` in jobs.source"))
    })?;

    Ok(Job {
        id,
        job_title: row.get("job_title")?,
        company_id,
        job_url: row.get("job_url")?,
        application_url: row.get("application_url")?,
        department: row.get("department")?,
        job_type,
        seniority_level,
        salary_min: row.get("salary_min")?,
        salary_max: row.get("salary_max")?,
        location: row.get("location")?,
        date_posted: row.get("date_posted")?,
        date_saved: row.get("date_saved")?,
        date_applied: row.get("date_applied")?,
        deadline: row.get("deadline")?,
        status,
        rejection_date: row.get("rejection_date")?,
        rejection_stage: row.get("rejection_stage")?,
        excitement_level: row.get("excitement_level")?,
        notes: row.get("notes")?,
        follow_up_date: row.get("follow_up_date")?,
        source,
    })
}

fn parse_history_row(row: &Row<'_>) -> RepoResult<StatusChange> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "job_status_history.id")?;
    let job_text: String = row.get("job_id")?;
    let job_id = parse_uuid(&job_text, "job_status_history.job_id")?;

    let old_status = match row.get::<_, Option<String>>("old_status")? {
        Some(value) => Some(JobStatus::from_db(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid job status `{value}` in job_status_history.old_status"
            ))
        })?),
        None => None,
    };
    let new_text: String = row.get("new_status")?;
    let new_status = JobStatus::from_db(&new_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid job status `{new_text}` in job_status_history.new_status"
        ))
    })?;

    Ok(StatusChange {
        id,
        job_id,
        old_status,
        new_status,
        changed_at: row.get("changed_at")?,
        notes: row.get("notes")?,
    })
}
