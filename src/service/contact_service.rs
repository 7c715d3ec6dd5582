//! Contact use-case service.
//!
//! # Responsibility
//! - Own the contact lifecycle and the job↔contact relationship:
//!   link, unlink, and join queries.
//! - Compute follow-up reminders and cross-entity link statistics.
//!
//! # Invariants
//! - Linking the same (job, contact) pair twice replaces the relationship
//!   label instead of duplicating the row.
//! - Deleting a contact removes its links in the same transaction.

use crate::model::contact::{Contact, ContactDraft, ContactId, ContactPatch, JobContactLink};
use crate::model::company::CompanyId;
use crate::model::enums::ContactStatus;
use crate::model::job::JobId;
use crate::query::{Direction, QueryBuilder};
use crate::repo::contact_repo::ContactRepository;
use crate::service::{ensure_valid, today, ServiceError, ServiceResult};
use crate::validate::validate_contact;
use uuid::Uuid;

const CONTACT_SEARCH_COLUMNS: [&str; 5] =
    ["full_name", "job_title", "location", "email", "notes"];

/// Link aggregates for one contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactStats {
    pub linked_jobs: u64,
    /// Distinct companies among the jobs this contact is linked to; two
    /// jobs at the same company count it once.
    pub companies_worked_with: u64,
}

/// Contact service facade over repository implementations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new contact.
    pub fn create(&mut self, draft: ContactDraft) -> ServiceResult<Contact> {
        ensure_valid(validate_contact(&draft))?;
        let contact = draft.into_contact(Uuid::new_v4());
        self.repo.insert(&contact)?;
        Ok(contact)
    }

    /// Gets one contact by id; `None` when unknown.
    pub fn find_by_id(&self, id: ContactId) -> ServiceResult<Option<Contact>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// All contacts ordered by full name.
    pub fn find_all(&self) -> ServiceResult<Vec<Contact>> {
        Ok(self.repo.find_all()?)
    }

    /// Contacts attached to one company, ordered by full name.
    pub fn find_by_company_id(&self, company_id: CompanyId) -> ServiceResult<Vec<Contact>> {
        let builder = QueryBuilder::new()
            .where_eq("company_id", company_id.to_string())
            .order_by("full_name", Direction::Asc);
        Ok(self.repo.query(&builder)?)
    }

    /// Substring search across name, title, location, email and notes.
    pub fn search(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let builder = QueryBuilder::new()
            .search(&CONTACT_SEARCH_COLUMNS, query)
            .order_by("full_name", Direction::Asc);
        Ok(self.repo.query(&builder)?)
    }

    /// Merges the patch onto the stored row; `None` when the id is
    /// unknown.
    pub fn update(&mut self, id: ContactId, patch: ContactPatch) -> ServiceResult<Option<Contact>> {
        let Some(mut contact) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };
        patch.apply(&mut contact);
        ensure_valid(validate_contact(&ContactDraft::from(contact.clone())))?;
        self.repo.update(&contact)?;

        match self.repo.find_by_id(id)? {
            Some(refreshed) => Ok(Some(refreshed)),
            None => Err(ServiceError::InconsistentState(
                "updated contact not found in read-back",
            )),
        }
    }

    /// Removes the contact and its job links, returning whether the
    /// contact existed.
    pub fn delete(&mut self, id: ContactId) -> ServiceResult<bool> {
        Ok(self.repo.delete(id)?)
    }

    /// Idempotent upsert of the (job, contact) link with the given label.
    pub fn link_to_job(
        &mut self,
        contact_id: ContactId,
        job_id: JobId,
        relationship_type: &str,
    ) -> ServiceResult<()> {
        Ok(self.repo.link_to_job(contact_id, job_id, relationship_type)?)
    }

    /// Removes the link if present, returning whether one was removed.
    pub fn unlink_from_job(&mut self, contact_id: ContactId, job_id: JobId) -> ServiceResult<bool> {
        Ok(self.repo.unlink_from_job(contact_id, job_id)?)
    }

    /// All junction rows for one contact.
    pub fn get_job_relationships(
        &self,
        contact_id: ContactId,
    ) -> ServiceResult<Vec<JobContactLink>> {
        Ok(self.repo.job_relationships(contact_id)?)
    }

    /// Contacts linked to one job, ordered by full name.
    pub fn get_contacts_for_job(&self, job_id: JobId) -> ServiceResult<Vec<Contact>> {
        Ok(self.repo.contacts_for_job(job_id)?)
    }

    /// Contacts due for a follow-up on the given date (default: today)
    /// whose outreach status still makes a reminder meaningful.
    pub fn get_contacts_with_follow_ups(&self, date: Option<&str>) -> ServiceResult<Vec<Contact>> {
        let target = date.map(str::to_string).unwrap_or_else(today);
        let builder = QueryBuilder::new()
            .where_eq("follow_up_date", target)
            .where_in(
                "status",
                ContactStatus::ALL
                    .iter()
                    .filter(|status| status.awaits_follow_up())
                    .map(|status| status.as_str().to_string()),
            )
            .order_by("follow_up_date", Direction::Asc);
        Ok(self.repo.query(&builder)?)
    }

    /// Link aggregates for one contact, computed from live rows.
    pub fn get_stats(&self, contact_id: ContactId) -> ServiceResult<ContactStats> {
        Ok(ContactStats {
            linked_jobs: self.repo.linked_job_count(contact_id)?,
            companies_worked_with: self.repo.distinct_company_count(contact_id)?,
        })
    }
}
