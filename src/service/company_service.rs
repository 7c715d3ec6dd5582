//! Company use-case service.
//!
//! # Responsibility
//! - Own the company lifecycle: create, lookup, search, update, delete.
//! - Provide the find-or-create idiom used when jobs and contacts
//!   reference companies by name.
//!
//! # Invariants
//! - `find_or_create` never produces two rows for one name.
//! - Deletion is refused while any job or contact references the company.
//! - Stats are computed from live rows at call time, never cached.

use crate::model::company::{Company, CompanyDraft, CompanyId, CompanyPatch};
use crate::model::enums::JobStatus;
use crate::query::{Direction, QueryBuilder};
use crate::repo::company_repo::CompanyRepository;
use crate::service::{ensure_valid, ServiceError, ServiceResult};
use crate::validate::validate_company;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Live aggregate view over one company's jobs and contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyStats {
    pub total_jobs: u64,
    pub total_contacts: u64,
    pub jobs_by_status: BTreeMap<JobStatus, u64>,
}

/// Company service facade over repository implementations.
pub struct CompanyService<R: CompanyRepository> {
    repo: R,
}

impl<R: CompanyRepository> CompanyService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new company.
    ///
    /// Fails with a uniqueness violation when the name is already taken.
    pub fn create(&mut self, draft: CompanyDraft) -> ServiceResult<Company> {
        ensure_valid(validate_company(&draft))?;
        let company = draft.into_company(Uuid::new_v4());
        self.repo.insert(&company)?;
        Ok(company)
    }

    /// Gets one company by id; `None` when unknown.
    pub fn find_by_id(&self, id: CompanyId) -> ServiceResult<Option<Company>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Gets one company by exact name; `None` when unknown.
    pub fn find_by_name(&self, name: &str) -> ServiceResult<Option<Company>> {
        Ok(self.repo.find_by_name(name)?)
    }

    /// All companies ordered by name.
    pub fn find_all(&self) -> ServiceResult<Vec<Company>> {
        Ok(self.repo.find_all()?)
    }

    /// Case-insensitive substring search across name, industry, location
    /// and notes, ordered by name.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<Company>> {
        let builder = QueryBuilder::new()
            .search(&["name", "industry", "location", "notes"], query)
            .order_by("name", Direction::Asc);
        Ok(self.repo.query(&builder)?)
    }

    /// Merges the patch onto the stored row; `None` when the id is
    /// unknown.
    pub fn update(&mut self, id: CompanyId, patch: CompanyPatch) -> ServiceResult<Option<Company>> {
        let Some(mut company) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };
        patch.apply(&mut company);
        ensure_valid(validate_company(&CompanyDraft::from(company.clone())))?;
        self.repo.update(&company)?;

        match self.repo.find_by_id(id)? {
            Some(refreshed) => Ok(Some(refreshed)),
            None => Err(ServiceError::InconsistentState(
                "updated company not found in read-back",
            )),
        }
    }

    /// Removes the company, returning whether a row existed.
    ///
    /// Fails with `ReferentialIntegrity` while jobs or contacts still
    /// reference it.
    pub fn delete(&mut self, id: CompanyId) -> ServiceResult<bool> {
        Ok(self.repo.delete(id)?)
    }

    /// Returns the company with the given name, creating it when absent.
    ///
    /// A new row starts from the fixed default record (excitement level 3,
    /// everything else unset) with caller-supplied overrides merged on
    /// top; the name argument always wins.
    pub fn find_or_create(
        &mut self,
        name: &str,
        defaults: Option<CompanyDraft>,
    ) -> ServiceResult<Company> {
        if let Some(existing) = self.repo.find_by_name(name)? {
            return Ok(existing);
        }

        let mut draft = defaults.unwrap_or_else(|| CompanyDraft::named(name));
        draft.name = name.to_string();
        self.create(draft)
    }

    /// Job and contact aggregates for one company, computed by scanning
    /// its current rows.
    pub fn get_stats(&self, company_id: CompanyId) -> ServiceResult<CompanyStats> {
        let statuses = self.repo.job_statuses(company_id)?;
        let total_contacts = self.repo.contact_count(company_id)?;

        let mut jobs_by_status: BTreeMap<JobStatus, u64> = BTreeMap::new();
        for status in &statuses {
            *jobs_by_status.entry(*status).or_insert(0) += 1;
        }

        Ok(CompanyStats {
            total_jobs: statuses.len() as u64,
            total_contacts,
            jobs_by_status,
        })
    }
}
