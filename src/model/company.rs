//! Company domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another company.
//! - `name` is globally unique across all companies.
//! - `excitement_level` stays within 1..=5.

use crate::model::enums::{CompanySize, CompanyType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a company row.
pub type CompanyId = Uuid;

/// A company that owns job postings and networking contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    #[serde(rename = "type")]
    pub kind: Option<CompanyType>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub year_founded: Option<i32>,
    /// Subjective interest score, 1..=5.
    pub excitement_level: i32,
    pub glassdoor_rating: Option<f64>,
    pub notes: Option<String>,
}

/// Creation input for a company; the service allocates the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDraft {
    pub name: String,
    pub industry: Option<String>,
    pub size: Option<CompanySize>,
    #[serde(rename = "type")]
    pub kind: Option<CompanyType>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin_url: Option<String>,
    pub year_founded: Option<i32>,
    pub excitement_level: i32,
    pub glassdoor_rating: Option<f64>,
    pub notes: Option<String>,
}

impl CompanyDraft {
    /// Draft with only a name set and the default excitement level.
    ///
    /// Used by the find-or-create flow when a job or contact references a
    /// company that does not exist yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: None,
            size: None,
            kind: None,
            location: None,
            website: None,
            linkedin_url: None,
            year_founded: None,
            excitement_level: 3,
            glassdoor_rating: None,
            notes: None,
        }
    }

    /// Materializes the draft into a company with a freshly allocated id.
    pub fn into_company(self, id: CompanyId) -> Company {
        Company {
            id,
            name: self.name,
            industry: self.industry,
            size: self.size,
            kind: self.kind,
            location: self.location,
            website: self.website,
            linkedin_url: self.linkedin_url,
            year_founded: self.year_founded,
            excitement_level: self.excitement_level,
            glassdoor_rating: self.glassdoor_rating,
            notes: self.notes,
        }
    }
}

impl From<Company> for CompanyDraft {
    fn from(company: Company) -> Self {
        Self {
            name: company.name,
            industry: company.industry,
            size: company.size,
            kind: company.kind,
            location: company.location,
            website: company.website,
            linkedin_url: company.linkedin_url,
            year_founded: company.year_founded,
            excitement_level: company.excitement_level,
            glassdoor_rating: company.glassdoor_rating,
            notes: company.notes,
        }
    }
}

/// Partial update for a company.
///
/// `None` leaves the field unchanged; for nullable columns `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub industry: Option<Option<String>>,
    pub size: Option<Option<CompanySize>>,
    pub kind: Option<Option<CompanyType>>,
    pub location: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
    pub year_founded: Option<Option<i32>>,
    pub excitement_level: Option<i32>,
    pub glassdoor_rating: Option<Option<f64>>,
    pub notes: Option<Option<String>>,
}

impl CompanyPatch {
    /// Merges the supplied fields onto an existing company.
    pub fn apply(self, company: &mut Company) {
        if let Some(name) = self.name {
            company.name = name;
        }
        if let Some(industry) = self.industry {
            company.industry = industry;
        }
        if let Some(size) = self.size {
            company.size = size;
        }
        if let Some(kind) = self.kind {
            company.kind = kind;
        }
        if let Some(location) = self.location {
            company.location = location;
        }
        if let Some(website) = self.website {
            company.website = website;
        }
        if let Some(linkedin_url) = self.linkedin_url {
            company.linkedin_url = linkedin_url;
        }
        if let Some(year_founded) = self.year_founded {
            company.year_founded = year_founded;
        }
        if let Some(level) = self.excitement_level {
            company.excitement_level = level;
        }
        if let Some(rating) = self.glassdoor_rating {
            company.glassdoor_rating = rating;
        }
        if let Some(notes) = self.notes {
            company.notes = notes;
        }
    }
}
