//! Company repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist company rows and resolve lookups by id and by exact name.
//! - Guard deletion against dangling job/contact references.
//!
//! # Invariants
//! - `companies.name` is unique; a colliding insert surfaces as
//!   `RepoError::Uniqueness`.
//! - The dependent-row check and the delete run in one immediate
//!   transaction so a concurrent insert cannot slip between them.

use crate::model::company::{Company, CompanyId};
use crate::model::enums::{CompanySize, CompanyType, JobStatus};
use crate::query::QueryBuilder;
use crate::repo::{classify_write_error, parse_uuid, RepoError, RepoResult, Repository};
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use uuid::Uuid;

const COMPANY_SELECT_SQL: &str = "SELECT
    id,
    name,
    industry,
    size,
    type,
    location,
    website,
    linkedin_url,
    year_founded,
    excitement_level,
    glassdoor_rating,
    notes
FROM companies";

/// Repository interface for company persistence.
pub trait CompanyRepository: Repository<Entity = Company> {
    fn insert(&mut self, company: &Company) -> RepoResult<()>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Company>>;
    /// Writes the full row back; `NotFound` when the id is unknown.
    fn update(&mut self, company: &Company) -> RepoResult<()>;
    /// Runs an arbitrary filtered/ordered select built by the caller.
    fn query(&self, builder: &QueryBuilder) -> RepoResult<Vec<Company>>;
    /// Statuses of every job at the company, one entry per job.
    fn job_statuses(&self, company_id: CompanyId) -> RepoResult<Vec<JobStatus>>;
    fn contact_count(&self, company_id: CompanyId) -> RepoResult<u64>;
}

/// SQLite-backed company repository.
pub struct SqliteCompanyRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCompanyRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteCompanyRepository<'_> {
    type Entity = Company;

    fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_company_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} ORDER BY name ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }
        Ok(companies)
    }

    fn delete(&mut self, id: Uuid) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let id_text = id.to_string();
        let job_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM jobs WHERE company_id = ?1;",
            [id_text.as_str()],
            |row| row.get(0),
        )?;
        if job_count > 0 {
            return Err(RepoError::ReferentialIntegrity {
                entity: "company",
                detail: format!("{job_count} job(s) still reference company {id}"),
            });
        }
        let contact_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM contacts WHERE company_id = ?1;",
            [id_text.as_str()],
            |row| row.get(0),
        )?;
        if contact_count > 0 {
            return Err(RepoError::ReferentialIntegrity {
                entity: "company",
                detail: format!("{contact_count} contact(s) still reference company {id}"),
            });
        }

        let changed = tx.execute("DELETE FROM companies WHERE id = ?1;", [id_text.as_str()])?;
        tx.commit()?;
        Ok(changed > 0)
    }
}

impl CompanyRepository for SqliteCompanyRepository<'_> {
    fn insert(&mut self, company: &Company) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO companies (
                    id,
                    name,
                    industry,
                    size,
                    type,
                    location,
                    website,
                    linkedin_url,
                    year_founded,
                    excitement_level,
                    glassdoor_rating,
                    notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
                params![
                    company.id.to_string(),
                    company.name.as_str(),
                    company.industry.as_deref(),
                    company.size.map(CompanySize::as_str),
                    company.kind.map(CompanyType::as_str),
                    company.location.as_deref(),
                    company.website.as_deref(),
                    company.linkedin_url.as_deref(),
                    company.year_founded,
                    company.excitement_level,
                    company.glassdoor_rating,
                    company.notes.as_deref(),
                ],
            )
            .map_err(|err| classify_write_error("company", "company_insert", err))?;
        Ok(())
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Company>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPANY_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_company_row(row)?)),
            None => Ok(None),
        }
    }

    fn update(&mut self, company: &Company) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE companies
                 SET
                    name = ?1,
                    industry = ?2,
                    size = ?3,
                    type = ?4,
                    location = ?5,
                    website = ?6,
                    linkedin_url = ?7,
                    year_founded = ?8,
                    excitement_level = ?9,
                    glassdoor_rating = ?10,
                    notes = ?11
                 WHERE id = ?12;",
                params![
                    company.name.as_str(),
                    company.industry.as_deref(),
                    company.size.map(CompanySize::as_str),
                    company.kind.map(CompanyType::as_str),
                    company.location.as_deref(),
                    company.website.as_deref(),
                    company.linkedin_url.as_deref(),
                    company.year_founded,
                    company.excitement_level,
                    company.glassdoor_rating,
                    company.notes.as_deref(),
                    company.id.to_string(),
                ],
            )
            .map_err(|err| classify_write_error("company", "company_update", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound(company.id));
        }
        Ok(())
    }

    fn query(&self, builder: &QueryBuilder) -> RepoResult<Vec<Company>> {
        let (clause, binds) = builder.render();
        let mut stmt = self.conn.prepare(&format!("{COMPANY_SELECT_SQL}{clause};"))?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut companies = Vec::new();
        while let Some(row) = rows.next()? {
            companies.push(parse_company_row(row)?);
        }
        Ok(companies)
    }

    fn job_statuses(&self, company_id: CompanyId) -> RepoResult<Vec<JobStatus>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status FROM jobs WHERE company_id = ?1;")?;
        let mut rows = stmt.query([company_id.to_string()])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            let status = JobStatus::from_db(&value).ok_or_else(|| {
                RepoError::InvalidData(format!("invalid job status `{value}` in jobs.status"))
            })?;
            statuses.push(status);
        }
        Ok(statuses)
    }

    fn contact_count(&self, company_id: CompanyId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM contacts WHERE company_id = ?1;",
            [company_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

fn parse_company_row(row: &Row<'_>) -> RepoResult<Company> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "companies.id")?;

    let size = match row.get::<_, Option<String>>("size")? {
        Some(value) => Some(CompanySize::from_db(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid company size `{value}` in companies.size"))
        })?),
        None => None,
    };
    let kind = match row.get::<_, Option<String>>("type")? {
        Some(value) => Some(CompanyType::from_db(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid company type `{value}` in companies.type"))
        })?),
        None => None,
    };

    Ok(Company {
        id,
        name: row.get("name")?,
        industry: row.get("industry")?,
        size,
        kind,
        location: row.get("location")?,
        website: row.get("website")?,
        linkedin_url: row.get("linkedin_url")?,
        year_founded: row.get("year_founded")?,
        excitement_level: row.get("excitement_level")?,
        glassdoor_rating: row.get("glassdoor_rating")?,
        notes: row.get("notes")?,
    })
}
