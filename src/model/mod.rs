//! Domain model for job-search tracking.
//!
//! # Responsibility
//! - Define the canonical entity structs, drafts and patches used by
//!   services and repositories.
//! - Own the closed enum vocabularies and their persisted string forms.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID allocated at creation.
//! - Enum values persist as lowercase-hyphenated strings.

pub mod company;
pub mod contact;
pub mod enums;
pub mod job;
