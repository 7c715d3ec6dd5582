use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    CompanyDraft, CompanyService, JobDraft, JobFilters, JobPatch, JobService, JobSource, JobStatus,
    JobType, SeniorityLevel, ServiceError, SqliteCompanyRepository, SqliteJobRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_records_initial_history_entry() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let job = jobs.create(job_draft("Rust Engineer", company_id)).unwrap();
    assert!(!job.date_saved.is_empty());

    let history = jobs.get_status_history(job.id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].job_id, job.id);
    assert_eq!(history[0].old_status, None);
    assert_eq!(history[0].new_status, JobStatus::Saved);
    assert_eq!(history[0].changed_at, job.date_saved);
}

#[test]
fn create_with_unknown_company_is_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let err = jobs
        .create(job_draft("Orphan Role", Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert!(jobs.find_all().unwrap().is_empty());
}

#[test]
fn status_transitions_append_history_newest_first() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let job = jobs.create(job_draft("Rust Engineer", company_id)).unwrap();

    jobs.update(job.id, status_patch(JobStatus::Applied))
        .unwrap()
        .unwrap();
    let updated = jobs
        .update(job.id, status_patch(JobStatus::PhoneScreen))
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, JobStatus::PhoneScreen);

    let history = jobs.get_status_history(job.id).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].old_status, Some(JobStatus::Applied));
    assert_eq!(history[0].new_status, JobStatus::PhoneScreen);
    assert_eq!(history[1].old_status, Some(JobStatus::Saved));
    assert_eq!(history[1].new_status, JobStatus::Applied);
    assert_eq!(history[2].old_status, None);
    assert_eq!(history[2].new_status, JobStatus::Saved);
}

#[test]
fn update_without_status_change_adds_no_history() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let job = jobs.create(job_draft("Rust Engineer", company_id)).unwrap();

    let patch = JobPatch {
        notes: Some(Some("spoke with recruiter".to_string())),
        excitement_level: Some(5),
        ..Default::default()
    };
    let updated = jobs.update(job.id, patch).unwrap().unwrap();
    assert_eq!(updated.notes.as_deref(), Some("spoke with recruiter"));
    assert_eq!(updated.excitement_level, 5);

    // Re-stating the current status is not a transition either.
    jobs.update(job.id, status_patch(JobStatus::Saved))
        .unwrap()
        .unwrap();

    assert_eq!(jobs.get_status_history(job.id).unwrap().len(), 1);
}

#[test]
fn update_preserves_date_saved_and_handles_missing_ids() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let job = jobs.create(job_draft("Rust Engineer", company_id)).unwrap();

    let patch = JobPatch {
        job_title: Some("Senior Rust Engineer".to_string()),
        status: Some(JobStatus::Applied),
        ..Default::default()
    };
    let updated = jobs.update(job.id, patch).unwrap().unwrap();
    assert_eq!(updated.job_title, "Senior Rust Engineer");
    assert_eq!(updated.date_saved, job.date_saved);

    assert!(jobs
        .update(Uuid::new_v4(), JobPatch::default())
        .unwrap()
        .is_none());
}

#[test]
fn update_with_invalid_patch_is_rejected_before_any_write() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let job = jobs.create(job_draft("Rust Engineer", company_id)).unwrap();

    let patch = JobPatch {
        salary_min: Some(Some(200_000)),
        salary_max: Some(Some(100_000)),
        status: Some(JobStatus::Applied),
        ..Default::default()
    };
    let err = jobs.update(job.id, patch).unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let reloaded = jobs.find_by_id(job.id).unwrap().unwrap();
    assert_eq!(reloaded.status, JobStatus::Saved);
    assert_eq!(jobs.get_status_history(job.id).unwrap().len(), 1);
}

#[test]
fn delete_cascades_history_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let job_id = {
        let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));
        let job = jobs.create(job_draft("Rust Engineer", company_id)).unwrap();
        jobs.update(job.id, status_patch(JobStatus::Applied))
            .unwrap()
            .unwrap();
        job.id
    };

    assert_eq!(count_history_rows(&conn, job_id), 2);

    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));
    assert!(jobs.delete(job_id).unwrap());
    assert!(jobs.find_by_id(job_id).unwrap().is_none());
    assert!(!jobs.delete(job_id).unwrap());
    drop(jobs);

    assert_eq!(count_history_rows(&conn, job_id), 0);
}

#[test]
fn find_by_filters_combines_conditions_conjunctively() {
    let mut conn = open_db_in_memory().unwrap();
    let acme = seed_company(&mut conn, "Acme");
    let globex = seed_company(&mut conn, "Globex");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let mut senior = job_draft("Senior Backend", acme);
    senior.seniority_level = SeniorityLevel::Senior;
    senior.status = JobStatus::Applied;
    senior.salary_min = Some(150_000);
    let senior = jobs.create(senior).unwrap();

    let mut junior = job_draft("Junior Backend", acme);
    junior.seniority_level = SeniorityLevel::Junior;
    junior.status = JobStatus::Applied;
    jobs.create(junior).unwrap();

    let mut elsewhere = job_draft("Senior Backend", globex);
    elsewhere.seniority_level = SeniorityLevel::Senior;
    jobs.create(elsewhere).unwrap();

    let filters = JobFilters {
        status: vec![JobStatus::Applied],
        company_id: Some(acme),
        seniority_level: vec![SeniorityLevel::Senior],
        salary_min: Some(150_000),
        ..Default::default()
    };
    let hits = jobs.find_by_filters(&filters).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, senior.id);

    // Empty filter sets are no-ops rather than match-nothing conditions.
    assert_eq!(jobs.find_by_filters(&JobFilters::default()).unwrap().len(), 3);
}

#[test]
fn search_puts_title_matches_before_other_matches() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let mut noted = job_draft("Data Analyst", company_id);
    noted.notes = Some("mentions rust in the stack".to_string());
    let noted = jobs.create(noted).unwrap();

    let titled = jobs.create(job_draft("Rust Engineer", company_id)).unwrap();
    jobs.create(job_draft("Product Manager", company_id))
        .unwrap();

    let hits = jobs.search("rust").unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, titled.id);
    assert_eq!(hits[1].id, noted.id);

    assert_eq!(jobs.search("  ").unwrap().len(), 3);
}

#[test]
fn follow_ups_filter_by_date_and_in_flight_status() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let mut due = job_draft("Applied Role", company_id);
    due.status = JobStatus::Applied;
    due.follow_up_date = Some("2026-09-05".to_string());
    let due = jobs.create(due).unwrap();

    // Saved jobs have no outreach to chase yet.
    let mut saved = job_draft("Saved Role", company_id);
    saved.follow_up_date = Some("2026-09-05".to_string());
    jobs.create(saved).unwrap();

    let mut rejected = job_draft("Closed Role", company_id);
    rejected.status = JobStatus::Rejected;
    rejected.follow_up_date = Some("2026-09-05".to_string());
    jobs.create(rejected).unwrap();

    let mut later = job_draft("Later Role", company_id);
    later.status = JobStatus::Applied;
    later.follow_up_date = Some("2026-09-12".to_string());
    jobs.create(later).unwrap();

    let hits = jobs.get_jobs_with_follow_ups(Some("2026-09-05")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, due.id);
}

#[test]
fn stats_round_mean_excitement_to_two_decimals() {
    let mut conn = open_db_in_memory().unwrap();
    let company_id = seed_company(&mut conn, "Acme");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    let empty = jobs.get_stats().unwrap();
    assert_eq!(empty.total_jobs, 0);
    assert_eq!(empty.average_excitement, 0.0);

    for (excitement, status) in [
        (2, JobStatus::Saved),
        (3, JobStatus::Applied),
        (5, JobStatus::Rejected),
    ] {
        let mut draft = job_draft("Role", company_id);
        draft.excitement_level = excitement;
        draft.status = status;
        jobs.create(draft).unwrap();
    }

    let stats = jobs.get_stats().unwrap();
    assert_eq!(stats.total_jobs, 3);
    assert_eq!(stats.active_jobs, 2);
    assert_eq!(stats.jobs_by_status.get(&JobStatus::Saved), Some(&1));
    assert_eq!(stats.jobs_by_status.get(&JobStatus::Rejected), Some(&1));
    // (2 + 3 + 5) / 3 = 3.333..., kept to two decimals.
    assert_eq!(stats.average_excitement, 3.33);
}

#[test]
fn lookups_by_company_and_status_scope_correctly() {
    let mut conn = open_db_in_memory().unwrap();
    let acme = seed_company(&mut conn, "Acme");
    let globex = seed_company(&mut conn, "Globex");
    let mut jobs = JobService::new(SqliteJobRepository::new(&mut conn));

    jobs.create(job_draft("Role A", acme)).unwrap();
    let mut applied = job_draft("Role B", acme);
    applied.status = JobStatus::Applied;
    jobs.create(applied).unwrap();
    jobs.create(job_draft("Role C", globex)).unwrap();

    assert_eq!(jobs.find_by_company_id(acme).unwrap().len(), 2);
    assert_eq!(jobs.find_by_company_id(globex).unwrap().len(), 1);
    let applied_jobs = jobs.find_by_status(JobStatus::Applied).unwrap();
    assert_eq!(applied_jobs.len(), 1);
    assert_eq!(applied_jobs[0].job_title, "Role B");
}

fn seed_company(conn: &mut Connection, name: &str) -> Uuid {
    CompanyService::new(SqliteCompanyRepository::new(conn))
        .create(CompanyDraft::named(name))
        .unwrap()
        .id
}

fn count_history_rows(conn: &Connection, job_id: Uuid) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM job_status_history WHERE job_id = ?1;",
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

fn status_patch(status: JobStatus) -> JobPatch {
    JobPatch {
        status: Some(status),
        ..Default::default()
    }
}
