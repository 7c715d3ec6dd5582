//! Domain enums shared by models, validation and persistence.
//!
//! # Responsibility
//! - Define the closed vocabularies for job, company and contact fields.
//! - Own the wire/database string form for every variant.
//!
//! # Invariants
//! - Database strings are lowercase-hyphenated and stable once persisted.
//! - `from_db` accepts exactly the strings produced by `as_str`.

use serde::{Deserialize, Serialize};

/// Employment arrangement for a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Contract => "contract",
            Self::Freelance => "freelance",
            Self::Internship => "internship",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "full-time" => Some(Self::FullTime),
            "part-time" => Some(Self::PartTime),
            "contract" => Some(Self::Contract),
            "freelance" => Some(Self::Freelance),
            "internship" => Some(Self::Internship),
            _ => None,
        }
    }
}

/// Seniority band for a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeniorityLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Lead,
    Principal,
    Director,
    Vp,
    CLevel,
}

impl SeniorityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Lead => "lead",
            Self::Principal => "principal",
            Self::Director => "director",
            Self::Vp => "vp",
            Self::CLevel => "c-level",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "entry" => Some(Self::Entry),
            "junior" => Some(Self::Junior),
            "mid" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            "lead" => Some(Self::Lead),
            "principal" => Some(Self::Principal),
            "director" => Some(Self::Director),
            "vp" => Some(Self::Vp),
            "c-level" => Some(Self::CLevel),
            _ => None,
        }
    }
}

/// Pipeline stage for a tracked job.
///
/// Every transition between two values of this enum is recorded in
/// `job_status_history`, including the initial assignment at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Saved,
    Applied,
    PhoneScreen,
    TechnicalInterview,
    OnsiteInterview,
    FinalInterview,
    Offer,
    Accepted,
    Rejected,
    Withdrawn,
}

impl JobStatus {
    /// Every status, in pipeline order.
    pub const ALL: [JobStatus; 10] = [
        Self::Saved,
        Self::Applied,
        Self::PhoneScreen,
        Self::TechnicalInterview,
        Self::OnsiteInterview,
        Self::FinalInterview,
        Self::Offer,
        Self::Accepted,
        Self::Rejected,
        Self::Withdrawn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Applied => "applied",
            Self::PhoneScreen => "phone-screen",
            Self::TechnicalInterview => "technical-interview",
            Self::OnsiteInterview => "onsite-interview",
            Self::FinalInterview => "final-interview",
            Self::Offer => "offer",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "saved" => Some(Self::Saved),
            "applied" => Some(Self::Applied),
            "phone-screen" => Some(Self::PhoneScreen),
            "technical-interview" => Some(Self::TechnicalInterview),
            "onsite-interview" => Some(Self::OnsiteInterview),
            "final-interview" => Some(Self::FinalInterview),
            "offer" => Some(Self::Offer),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }

    /// Statuses counted as "still in play" for dashboard aggregates.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::Saved
                | Self::Applied
                | Self::PhoneScreen
                | Self::TechnicalInterview
                | Self::OnsiteInterview
                | Self::FinalInterview
                | Self::Offer
        )
    }

    /// Statuses for which a follow-up reminder is still meaningful.
    pub fn awaits_follow_up(self) -> bool {
        matches!(
            self,
            Self::Applied
                | Self::PhoneScreen
                | Self::TechnicalInterview
                | Self::OnsiteInterview
                | Self::FinalInterview
        )
    }
}

/// Where a job posting was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobSource {
    CompanyWebsite,
    Linkedin,
    Indeed,
    Glassdoor,
    AngelList,
    Referral,
    Recruiter,
    Other,
}

impl JobSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompanyWebsite => "company-website",
            Self::Linkedin => "linkedin",
            Self::Indeed => "indeed",
            Self::Glassdoor => "glassdoor",
            Self::AngelList => "angel-list",
            Self::Referral => "referral",
            Self::Recruiter => "recruiter",
            Self::Other => "other",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "company-website" => Some(Self::CompanyWebsite),
            "linkedin" => Some(Self::Linkedin),
            "indeed" => Some(Self::Indeed),
            "glassdoor" => Some(Self::Glassdoor),
            "angel-list" => Some(Self::AngelList),
            "referral" => Some(Self::Referral),
            "recruiter" => Some(Self::Recruiter),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Headcount band for a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "startup" => Some(Self::Startup),
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }
}

/// Ownership structure for a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyType {
    Startup,
    Public,
    Private,
    NonProfit,
    Government,
}

impl CompanyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Public => "public",
            Self::Private => "private",
            Self::NonProfit => "non-profit",
            Self::Government => "government",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "startup" => Some(Self::Startup),
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "non-profit" => Some(Self::NonProfit),
            "government" => Some(Self::Government),
            _ => None,
        }
    }
}

/// How a contact relates to the job search overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactRelationship {
    Recruiter,
    HiringManager,
    TeamMember,
    Referral,
    Networking,
    Other,
}

impl ContactRelationship {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recruiter => "recruiter",
            Self::HiringManager => "hiring-manager",
            Self::TeamMember => "team-member",
            Self::Referral => "referral",
            Self::Networking => "networking",
            Self::Other => "other",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "recruiter" => Some(Self::Recruiter),
            "hiring-manager" => Some(Self::HiringManager),
            "team-member" => Some(Self::TeamMember),
            "referral" => Some(Self::Referral),
            "networking" => Some(Self::Networking),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// What the outreach to a contact is trying to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactGoal {
    Referral,
    Information,
    Networking,
    FollowUp,
    Other,
}

impl ContactGoal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Referral => "referral",
            Self::Information => "information",
            Self::Networking => "networking",
            Self::FollowUp => "follow-up",
            Self::Other => "other",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "referral" => Some(Self::Referral),
            "information" => Some(Self::Information),
            "networking" => Some(Self::Networking),
            "follow-up" => Some(Self::FollowUp),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Outreach state for a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    NotContacted,
    ReachedOut,
    Responded,
    MeetingScheduled,
    Met,
    Ongoing,
    Closed,
}

impl ContactStatus {
    /// Every status, in outreach order.
    pub const ALL: [ContactStatus; 7] = [
        Self::NotContacted,
        Self::ReachedOut,
        Self::Responded,
        Self::MeetingScheduled,
        Self::Met,
        Self::Ongoing,
        Self::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotContacted => "not-contacted",
            Self::ReachedOut => "reached-out",
            Self::Responded => "responded",
            Self::MeetingScheduled => "meeting-scheduled",
            Self::Met => "met",
            Self::Ongoing => "ongoing",
            Self::Closed => "closed",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "not-contacted" => Some(Self::NotContacted),
            "reached-out" => Some(Self::ReachedOut),
            "responded" => Some(Self::Responded),
            "meeting-scheduled" => Some(Self::MeetingScheduled),
            "met" => Some(Self::Met),
            "ongoing" => Some(Self::Ongoing),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Statuses for which a follow-up reminder is still meaningful.
    pub fn awaits_follow_up(self) -> bool {
        matches!(
            self,
            Self::ReachedOut | Self::Responded | Self::MeetingScheduled | Self::Ongoing
        )
    }
}
