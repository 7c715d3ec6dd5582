use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    CompanyDraft, CompanyService, ContactDraft, ContactGoal, ContactPatch, ContactRelationship,
    ContactService, ContactStatus, JobDraft, JobService, JobSource, JobStatus, JobType,
    SeniorityLevel, ServiceError, SqliteCompanyRepository, SqliteContactRepository,
    SqliteJobRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_validates_name_email_and_dates() {
    let mut conn = open_db_in_memory().unwrap();
    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));

    let mut draft = contact_draft("  ");
    draft.email = Some("not-an-email".to_string());
    draft.follow_up_date = Some("05/09/2026".to_string());

    let err = contacts.create(draft).unwrap_err();
    match err {
        ServiceError::Validation(report) => {
            let fields: Vec<&str> = report.errors.iter().map(|e| e.field).collect();
            assert!(fields.contains(&"full_name"));
            assert!(fields.contains(&"email"));
            assert!(fields.contains(&"follow_up_date"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let mut valid = contact_draft("Jared Dunn");
    valid.email = Some("jared@example.com".to_string());
    valid.follow_up_date = Some("2026-09-05".to_string());
    let created = contacts.create(valid).unwrap();
    assert_eq!(
        contacts.find_by_id(created.id).unwrap().unwrap().full_name,
        "Jared Dunn"
    );
}

#[test]
fn update_merges_patch_and_missing_id_returns_none() {
    let mut conn = open_db_in_memory().unwrap();
    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));

    let mut draft = contact_draft("Erlich Bachman");
    draft.phone = Some("555-0100".to_string());
    let created = contacts.create(draft).unwrap();

    let patch = ContactPatch {
        status: Some(ContactStatus::ReachedOut),
        phone: Some(None),
        notes: Some(Some("intro sent".to_string())),
        ..Default::default()
    };
    let updated = contacts.update(created.id, patch).unwrap().unwrap();
    assert_eq!(updated.status, ContactStatus::ReachedOut);
    assert!(updated.phone.is_none());
    assert_eq!(updated.notes.as_deref(), Some("intro sent"));

    assert!(contacts
        .update(Uuid::new_v4(), ContactPatch::default())
        .unwrap()
        .is_none());
}

#[test]
fn linking_twice_updates_the_relationship_label_in_place() {
    let mut conn = open_db_in_memory().unwrap();
    let (job_id, contact_id) = seed_job_and_contact(&mut conn, "Acme", "Gilfoyle");
    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));

    contacts.link_to_job(contact_id, job_id, "recruiter").unwrap();
    contacts
        .link_to_job(contact_id, job_id, "hiring-manager")
        .unwrap();

    let links = contacts.get_job_relationships(contact_id).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].job_id, job_id);
    assert_eq!(links[0].contact_id, contact_id);
    assert_eq!(links[0].relationship_type, "hiring-manager");
}

#[test]
fn unlink_reports_whether_a_link_was_removed() {
    let mut conn = open_db_in_memory().unwrap();
    let (job_id, contact_id) = seed_job_and_contact(&mut conn, "Acme", "Dinesh");
    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));

    contacts.link_to_job(contact_id, job_id, "team-member").unwrap();
    assert!(contacts.unlink_from_job(contact_id, job_id).unwrap());
    assert!(!contacts.unlink_from_job(contact_id, job_id).unwrap());
    assert!(contacts.get_job_relationships(contact_id).unwrap().is_empty());
}

#[test]
fn contacts_for_job_are_ordered_by_full_name() {
    let mut conn = open_db_in_memory().unwrap();
    let (job_id, zoe) = seed_job_and_contact(&mut conn, "Acme", "Zoe Park");
    let adam = ContactService::new(SqliteContactRepository::new(&mut conn))
        .create(contact_draft("Adam Reyes"))
        .unwrap()
        .id;

    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));
    contacts.link_to_job(zoe, job_id, "referral").unwrap();
    contacts.link_to_job(adam, job_id, "recruiter").unwrap();

    let linked = contacts.get_contacts_for_job(job_id).unwrap();
    let names: Vec<&str> = linked.iter().map(|c| c.full_name.as_str()).collect();
    assert_eq!(names, vec!["Adam Reyes", "Zoe Park"]);
}

#[test]
fn deleting_a_contact_removes_its_links() {
    let mut conn = open_db_in_memory().unwrap();
    let (job_id, contact_id) = seed_job_and_contact(&mut conn, "Acme", "Carla Walton");
    {
        let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));
        contacts.link_to_job(contact_id, job_id, "networking").unwrap();
        assert!(contacts.delete(contact_id).unwrap());
        assert!(contacts.find_by_id(contact_id).unwrap().is_none());
        assert!(contacts.get_contacts_for_job(job_id).unwrap().is_empty());
    }
    assert_eq!(count_link_rows(&conn, job_id), 0);
}

#[test]
fn deleting_a_job_removes_its_links_but_keeps_the_contact() {
    let mut conn = open_db_in_memory().unwrap();
    let (job_id, contact_id) = seed_job_and_contact(&mut conn, "Acme", "Laurie Bream");
    ContactService::new(SqliteContactRepository::new(&mut conn))
        .link_to_job(contact_id, job_id, "other")
        .unwrap();

    assert!(JobService::new(SqliteJobRepository::new(&mut conn))
        .delete(job_id)
        .unwrap());

    let contacts = ContactService::new(SqliteContactRepository::new(&mut conn));
    assert!(contacts.find_by_id(contact_id).unwrap().is_some());
    assert!(contacts.get_job_relationships(contact_id).unwrap().is_empty());
}

#[test]
fn follow_ups_filter_by_date_and_outreach_status() {
    let mut conn = open_db_in_memory().unwrap();
    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));

    let mut due = contact_draft("Reached Out");
    due.status = ContactStatus::ReachedOut;
    due.follow_up_date = Some("2026-09-05".to_string());
    let due = contacts.create(due).unwrap();

    // Not-contacted rows have nothing to follow up on yet.
    let mut untouched = contact_draft("Not Contacted");
    untouched.follow_up_date = Some("2026-09-05".to_string());
    contacts.create(untouched).unwrap();

    let mut closed = contact_draft("Closed Thread");
    closed.status = ContactStatus::Closed;
    closed.follow_up_date = Some("2026-09-05".to_string());
    contacts.create(closed).unwrap();

    let mut later = contact_draft("Later Ping");
    later.status = ContactStatus::Ongoing;
    later.follow_up_date = Some("2026-09-12".to_string());
    contacts.create(later).unwrap();

    let hits = contacts
        .get_contacts_with_follow_ups(Some("2026-09-05"))
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, due.id);
}

#[test]
fn stats_count_linked_jobs_and_distinct_companies() {
    let mut conn = open_db_in_memory().unwrap();
    let acme = seed_company(&mut conn, "Acme");
    let globex = seed_company(&mut conn, "Globex");

    let (job_a, job_b, job_c) = {
        let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));
        (
            jobs.create(job_draft("Role A", acme)).unwrap().id,
            jobs.create(job_draft("Role B", acme)).unwrap().id,
            jobs.create(job_draft("Role C", globex)).unwrap().id,
        )
    };

    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));
    let contact = contacts.create(contact_draft("Russ Hanneman")).unwrap();
    contacts.link_to_job(contact.id, job_a, "recruiter").unwrap();
    contacts.link_to_job(contact.id, job_b, "recruiter").unwrap();
    contacts.link_to_job(contact.id, job_c, "referral").unwrap();

    let stats = contacts.get_stats(contact.id).unwrap();
    assert_eq!(stats.linked_jobs, 3);
    assert_eq!(stats.companies_worked_with, 2);

    let unlinked = contacts.create(contact_draft("Nobody Yet")).unwrap();
    let empty = contacts.get_stats(unlinked.id).unwrap();
    assert_eq!(empty.linked_jobs, 0);
    assert_eq!(empty.companies_worked_with, 0);
}

#[test]
fn search_scans_contact_text_columns() {
    let mut conn = open_db_in_memory().unwrap();
    let mut contacts = ContactService::new(SqliteContactRepository::new(&mut conn));

    let mut by_name = contact_draft("Rachel Kim");
    by_name.job_title = Some("Staff Engineer".to_string());
    contacts.create(by_name).unwrap();

    let mut by_notes = contact_draft("Tom Ford");
    by_notes.notes = Some("met rachel's teammate at conf".to_string());
    contacts.create(by_notes).unwrap();

    contacts.create(contact_draft("Unrelated Person")).unwrap();

    let hits = contacts.search("rachel").unwrap();
    let names: Vec<&str> = hits.iter().map(|c| c.full_name.as_str()).collect();
    assert_eq!(names, vec!["Rachel Kim", "Tom Ford"]);
}

fn seed_company(conn: &mut Connection, name: &str) -> Uuid {
    CompanyService::new(SqliteCompanyRepository::new(conn))
        .create(CompanyDraft::named(name))
        .unwrap()
        .id
}

fn seed_job_and_contact(conn: &mut Connection, company: &str, contact: &str) -> (Uuid, Uuid) {
    let company_id = seed_company(conn, company);
    let job_id = JobService::new(SqliteJobRepository::new(conn))
        .create(job_draft("Engineer", company_id))
        .unwrap()
        .id;
    let contact_id = ContactService::new(SqliteContactRepository::new(conn))
        .create(contact_draft(contact))
        .unwrap()
        .id;
    (job_id, contact_id)
}

fn count_link_rows(conn: &Connection, job_id: Uuid) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM job_contacts WHERE job_id = ?1;",
        [job_id.to_string()],
        |row| row.get(0),
    )
    .unwrap()
}

fn job_draft(title: &str, company_id: Uuid) -> JobDraft {
    JobDraft {
        job_title: title.to_string(),
        company_id,
        job_url: None,
        application_url: None,
        department: None,
        job_type: JobType::FullTime,
        seniority_level: SeniorityLevel::Mid,
        salary_min: None,
        salary_max: None,
        location: "Remote".to_string(),
        date_posted: None,
        date_applied: None,
        deadline: None,
        status: JobStatus::Saved,
        rejection_date: None,
        rejection_stage: None,
        excitement_level: 3,
        notes: None,
        follow_up_date: None,
        source: JobSource::Other,
    }
}

fn contact_draft(full_name: &str) -> ContactDraft {
    ContactDraft {
        full_name: full_name.to_string(),
        company_id: None,
        job_title: None,
        location: None,
        linkedin_url: None,
        email: None,
        phone: None,
        relationship: ContactRelationship::Recruiter,
        goal: ContactGoal::Networking,
        status: ContactStatus::NotContacted,
        follow_up_date: None,
        notes: None,
    }
}
