//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist contact rows and the job↔contact junction table.
//! - Answer link queries and cross-entity link statistics.
//!
//! # Invariants
//! - At most one junction row exists per (job, contact) pair; relinking
//!   replaces `relationship_type` in place.
//! - The link upsert's check-then-write runs in one immediate transaction
//!   so two racing links cannot insert duplicate rows.
//! - Contact deletion removes the contact's junction rows in the same
//!   transaction as the contact row.

use crate::model::contact::{Contact, ContactId, JobContactLink};
use crate::model::enums::{ContactGoal, ContactRelationship, ContactStatus};
use crate::model::job::JobId;
use crate::query::QueryBuilder;
use crate::repo::{classify_write_error, parse_uuid, RepoError, RepoResult, Repository};
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use uuid::Uuid;

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    company_id,
    job_title,
    location,
    linkedin_url,
    email,
    phone,
    relationship,
    goal,
    status,
    follow_up_date,
    notes
FROM contacts";

/// Repository interface for contact persistence and job links.
pub trait ContactRepository: Repository<Entity = Contact> {
    fn insert(&mut self, contact: &Contact) -> RepoResult<()>;
    /// Writes the full row back; `NotFound` when the id is unknown.
    fn update(&mut self, contact: &Contact) -> RepoResult<()>;
    /// Runs an arbitrary filtered/ordered select built by the caller.
    fn query(&self, builder: &QueryBuilder) -> RepoResult<Vec<Contact>>;
    /// Upserts the (job, contact) link, replacing the relationship label
    /// when the pair is already linked.
    fn link_to_job(
        &mut self,
        contact_id: ContactId,
        job_id: JobId,
        relationship_type: &str,
    ) -> RepoResult<()>;
    /// Removes the link if present, returning whether one was removed.
    fn unlink_from_job(&mut self, contact_id: ContactId, job_id: JobId) -> RepoResult<bool>;
    fn job_relationships(&self, contact_id: ContactId) -> RepoResult<Vec<JobContactLink>>;
    /// Contacts linked to the job, ordered by full name.
    fn contacts_for_job(&self, job_id: JobId) -> RepoResult<Vec<Contact>>;
    fn linked_job_count(&self, contact_id: ContactId) -> RepoResult<u64>;
    /// Distinct companies among the jobs this contact is linked to.
    fn distinct_company_count(&self, contact_id: ContactId) -> RepoResult<u64>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteContactRepository<'_> {
    type Entity = Contact;

    fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_contact_row(row)?)),
            None => Ok(None),
        }
    }

    fn find_all(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY full_name ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn delete(&mut self, id: Uuid) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id_text = id.to_string();
        tx.execute(
            "DELETE FROM job_contacts WHERE contact_id = ?1;",
            [id_text.as_str()],
        )?;
        let changed = tx.execute("DELETE FROM contacts WHERE id = ?1;", [id_text.as_str()])?;
        tx.commit()?;
        Ok(changed > 0)
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn insert(&mut self, contact: &Contact) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO contacts (
                    id,
                    full_name,
                    company_id,
                    job_title,
                    location,
                    linkedin_url,
                    email,
                    phone,
                    relationship,
                    goal,
                    status,
                    follow_up_date,
                    notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13);",
                params![
                    contact.id.to_string(),
                    contact.full_name.as_str(),
                    contact.company_id.map(|id| id.to_string()),
                    contact.job_title.as_deref(),
                    contact.location.as_deref(),
                    contact.linkedin_url.as_deref(),
                    contact.email.as_deref(),
                    contact.phone.as_deref(),
                    contact.relationship.as_str(),
                    contact.goal.as_str(),
                    contact.status.as_str(),
                    contact.follow_up_date.as_deref(),
                    contact.notes.as_deref(),
                ],
            )
            .map_err(|err| classify_write_error("contact", "contact_insert", err))?;
        Ok(())
    }

    fn update(&mut self, contact: &Contact) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE contacts
                 SET
                    full_name = ?1,
                    company_id = ?2,
                    job_title = ?3,
                    location = ?4,
                    linkedin_url = ?5,
                    email = ?6,
                    phone = ?7,
                    relationship = ?8,
                    goal = ?9,
                    status = ?10,
                    follow_up_date = ?11,
                    notes = ?12
                 WHERE id = ?13;",
                params![
                    contact.full_name.as_str(),
                    contact.company_id.map(|id| id.to_string()),
                    contact.job_title.as_deref(),
                    contact.location.as_deref(),
                    contact.linkedin_url.as_deref(),
                    contact.email.as_deref(),
                    contact.phone.as_deref(),
                    contact.relationship.as_str(),
                    contact.goal.as_str(),
                    contact.status.as_str(),
                    contact.follow_up_date.as_deref(),
                    contact.notes.as_deref(),
                    contact.id.to_string(),
                ],
            )
            .map_err(|err| classify_write_error("contact", "contact_update", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound(contact.id));
        }
        Ok(())
    }

    fn query(&self, builder: &QueryBuilder) -> RepoResult<Vec<Contact>> {
        let (clause, binds) = builder.render();
        let mut stmt = self.conn.prepare(&format!("{CONTACT_SELECT_SQL}{clause};"))?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn link_to_job(
        &mut self,
        contact_id: ContactId,
        job_id: JobId,
        relationship_type: &str,
    ) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let contact_text = contact_id.to_string();
        let job_text = job_id.to_string();

        let exists: i64 = tx.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM job_contacts WHERE job_id = ?1 AND contact_id = ?2
            );",
            params![job_text.as_str(), contact_text.as_str()],
            |row| row.get(0),
        )?;

        if exists == 1 {
            tx.execute(
                "UPDATE job_contacts
                 SET relationship_type = ?1
                 WHERE job_id = ?2 AND contact_id = ?3;",
                params![relationship_type, job_text.as_str(), contact_text.as_str()],
            )?;
        } else {
            tx.execute(
                "INSERT INTO job_contacts (job_id, contact_id, relationship_type)
                 VALUES (?1, ?2, ?3);",
                params![job_text.as_str(), contact_text.as_str(), relationship_type],
            )
            .map_err(|err| classify_write_error("job contact link", "link_insert", err))?;
        }

        tx.commit()?;
        Ok(())
    }

    fn unlink_from_job(&mut self, contact_id: ContactId, job_id: JobId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM job_contacts WHERE job_id = ?1 AND contact_id = ?2;",
            params![job_id.to_string(), contact_id.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn job_relationships(&self, contact_id: ContactId) -> RepoResult<Vec<JobContactLink>> {
        let mut stmt = self.conn.prepare(
            "SELECT job_id, contact_id, relationship_type
             FROM job_contacts
             WHERE contact_id = ?1;",
        )?;
        let mut rows = stmt.query([contact_id.to_string()])?;
        let mut links = Vec::new();
        while let Some(row) = rows.next()? {
            let job_text: String = row.get("job_id")?;
            let contact_text: String = row.get("contact_id")?;
            links.push(JobContactLink {
                job_id: parse_uuid(&job_text, "job_contacts.job_id")?,
                contact_id: parse_uuid(&contact_text, "job_contacts.contact_id")?,
                relationship_type: row.get("relationship_type")?,
            });
        }
        Ok(links)
    }

    fn contacts_for_job(&self, job_id: JobId) -> RepoResult<Vec<Contact>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.id,
                c.full_name,
                c.company_id,
                c.job_title,
                c.location,
                c.linkedin_url,
                c.email,
                c.phone,
                c.relationship,
                c.goal,
                c.status,
                c.follow_up_date,
                c.notes
             FROM contacts c
             INNER JOIN job_contacts jc ON jc.contact_id = c.id
             WHERE jc.job_id = ?1
             ORDER BY c.full_name ASC;",
        )?;
        let mut rows = stmt.query([job_id.to_string()])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }
        Ok(contacts)
    }

    fn linked_job_count(&self, contact_id: ContactId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM job_contacts WHERE contact_id = ?1;",
            [contact_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn distinct_company_count(&self, contact_id: ContactId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT j.company_id)
             FROM job_contacts jc
             INNER JOIN jobs j ON j.id = jc.job_id
             WHERE jc.contact_id = ?1;",
            [contact_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "contacts.id")?;
    let company_id = match row.get::<_, Option<String>>("company_id")? {
        Some(value) => Some(parse_uuid(&value, "contacts.company_id")?),
        None => None,
    };

    let relationship_text: String = row.get("relationship")?;
    let relationship = ContactRelationship::from_db(&relationship_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid relationship `{relationship_text}` in contacts.relationship"
        ))
    })?;
    let goal_text: String = row.get("goal")?;
    let goal = ContactGoal::from_db(&goal_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid goal `{goal_text}` in contacts.goal"))
    })?;
    let status_text: String = row.get("status")?;
    let status = ContactStatus::from_db(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in contacts.status"))
    })?;

    Ok(Contact {
        id,
        full_name: row.get("full_name")?,
        company_id,
        job_title: row.get("job_title")?,
        location: row.get("location")?,
        linkedin_url: row.get("linkedin_url")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        relationship,
        goal,
        status,
        follow_up_date: row.get("follow_up_date")?,
        notes: row.get("notes")?,
    })
}
