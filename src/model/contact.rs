//! Contact and job-link domain models.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - At most one `JobContactLink` exists per (job, contact) pair; relinking
//!   the same pair replaces `relationship_type` in place.

use crate::model::company::CompanyId;
use crate::model::enums::{ContactGoal, ContactRelationship, ContactStatus};
use crate::model::job::JobId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a contact row.
pub type ContactId = Uuid;

/// A networking contact, optionally attached to a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub full_name: String,
    pub company_id: Option<CompanyId>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub relationship: ContactRelationship,
    pub goal: ContactGoal,
    pub status: ContactStatus,
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
}

/// Creation input for a contact; the service allocates the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub full_name: String,
    pub company_id: Option<CompanyId>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub relationship: ContactRelationship,
    pub goal: ContactGoal,
    pub status: ContactStatus,
    pub follow_up_date: Option<String>,
    pub notes: Option<String>,
}

impl ContactDraft {
    /// Materializes the draft into a contact with a fresh id.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            full_name: self.full_name,
            company_id: self.company_id,
            job_title: self.job_title,
            location: self.location,
            linkedin_url: self.linkedin_url,
            email: self.email,
            phone: self.phone,
            relationship: self.relationship,
            goal: self.goal,
            status: self.status,
            follow_up_date: self.follow_up_date,
            notes: self.notes,
        }
    }
}

impl From<Contact> for ContactDraft {
    fn from(contact: Contact) -> Self {
        Self {
            full_name: contact.full_name,
            company_id: contact.company_id,
            job_title: contact.job_title,
            location: contact.location,
            linkedin_url: contact.linkedin_url,
            email: contact.email,
            phone: contact.phone,
            relationship: contact.relationship,
            goal: contact.goal,
            status: contact.status,
            follow_up_date: contact.follow_up_date,
            notes: contact.notes,
        }
    }
}

/// Partial update for a contact.
///
/// `None` leaves the field unchanged; for nullable columns `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub full_name: Option<String>,
    pub company_id: Option<Option<CompanyId>>,
    pub job_title: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub relationship: Option<ContactRelationship>,
    pub goal: Option<ContactGoal>,
    pub status: Option<ContactStatus>,
    pub follow_up_date: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

impl ContactPatch {
    /// Merges the supplied fields onto an existing contact.
    pub fn apply(self, contact: &mut Contact) {
        if let Some(full_name) = self.full_name {
            contact.full_name = full_name;
        }
        if let Some(company_id) = self.company_id {
            contact.company_id = company_id;
        }
        if let Some(job_title) = self.job_title {
            contact.job_title = job_title;
        }
        if let Some(location) = self.location {
            contact.location = location;
        }
        if let Some(linkedin_url) = self.linkedin_url {
            contact.linkedin_url = linkedin_url;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
        if let Some(phone) = self.phone {
            contact.phone = phone;
        }
        if let Some(relationship) = self.relationship {
            contact.relationship = relationship;
        }
        if let Some(goal) = self.goal {
            contact.goal = goal;
        }
        if let Some(status) = self.status {
            contact.status = status;
        }
        if let Some(follow_up_date) = self.follow_up_date {
            contact.follow_up_date = follow_up_date;
        }
        if let Some(notes) = self.notes {
            contact.notes = notes;
        }
    }
}

/// Junction row between a job and a contact.
///
/// Identity is the (job_id, contact_id) pair; `relationship_type` is free
/// text such as "recruiter" or "interviewer".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobContactLink {
    pub job_id: JobId,
    pub contact_id: ContactId,
    pub relationship_type: String,
}
