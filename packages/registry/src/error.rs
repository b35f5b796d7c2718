//! Error types for validation, roster updates and config loading.
//!
//! A [`Violation`] is one broken rule; its `Display` is the message shown to the
//! user. [`ValidationError`] carries every violation of a rejected save, in the
//! order the rules were checked.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::StudentId;

/// A single broken validation rule.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Address is required")]
    AddressRequired,

    #[error("Guardian phone number is required")]
    GuardianPhoneRequired,
    #[error("Guardian phone number must be {digits} digits")]
    GuardianPhoneLength { digits: usize },
    #[error("Guardian phone number already exists")]
    GuardianPhoneTaken,

    #[error("Maximum {max} personal phone numbers allowed")]
    TooManyPersonalPhones { max: usize },
    /// `position` is 1-based.
    #[error("Personal phone {position} must be {digits} digits")]
    PersonalPhoneLength { position: usize, digits: usize },
    #[error("Personal phone {position} already exists")]
    PersonalPhoneTaken { position: usize },
    #[error("Duplicate phone numbers are not allowed")]
    RepeatedPhone,

    #[error("At least one email is required")]
    EmailRequired,
    #[error("Maximum {max} emails allowed")]
    TooManyEmails { max: usize },
    #[error("Email {position} is invalid")]
    EmailInvalid { position: usize },
    #[error("Email {position} already exists")]
    EmailTaken { position: usize },
    #[error("Duplicate emails are not allowed")]
    RepeatedEmail,

    #[error("Exactly {count} subjects must be selected")]
    SubjectCount { count: usize },
    #[error("{0} is compulsory")]
    CompulsorySubjectMissing(String),
}

/// A rejected save: every violated rule, in check order.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", join_messages(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Wrap violations; `None` when there are none.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Display-ready messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.violations.contains(violation)
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors from [`crate::Roster::update`].
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Student {0} not found")]
    NotFound(StudentId),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors reading or writing `registry.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid registry config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize registry config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
