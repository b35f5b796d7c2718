//! # Domain models for students and subjects
//!
//! Defines the data structures held by a [`crate::Roster`] and edited through a
//! [`crate::StudentForm`]. These types are `Serialize + Deserialize` so a front end
//! can move them across its own boundaries (local storage, server functions).
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`StudentId`] | Opaque identifier assigned when a student is registered. Freshly generated ids are UUID v4 strings. |
//! | [`StudentRecord`] | A saved student. Free text is trimmed and blank phone/email slots are gone. |
//! | [`StudentDraft`] | A candidate record as typed by the user: untrimmed text and possibly blank slots. |
//! | [`Subject`] | An entry of the subject catalog, with a `required` flag for compulsory subjects. |
//!
//! ## Helper functions
//!
//! - [`phone_digits`] — strips every non-digit character, the comparison key for phones.
//! - [`email_key`] — trims and ASCII-lowercases, the comparison key for emails.

use serde::{Deserialize, Serialize};

/// Subjects every student must take.
pub const COMPULSORY_SUBJECTS: [&str; 2] = ["English", "Maths"];

/// Opaque student identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered student.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    /// 11 digits once stripped of punctuation
    pub guardian_phone: String,
    /// At most two entries, none blank
    pub personal_phones: Vec<String>,
    /// One or two entries; index 0 is the main email
    pub emails: Vec<String>,
    /// Insertion order is kept
    pub subjects: Vec<String>,
}

impl StudentRecord {
    /// "First Last", as shown in listings and matched by name search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The main email, if the record has one.
    pub fn main_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// Every phone on the record, guardian first.
    pub fn phones(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.guardian_phone.as_str())
            .chain(self.personal_phones.iter().map(String::as_str))
    }

    /// Turn the record back into an editable draft.
    pub fn to_draft(&self) -> StudentDraft {
        StudentDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            address: self.address.clone(),
            guardian_phone: self.guardian_phone.clone(),
            personal_phones: self.personal_phones.clone(),
            emails: self.emails.clone(),
            subjects: self.subjects.clone(),
        }
    }
}

/// Candidate student data, exactly as entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub guardian_phone: String,
    pub personal_phones: Vec<String>,
    pub emails: Vec<String>,
    pub subjects: Vec<String>,
}

impl StudentDraft {
    /// Attach an id to an already normalized draft.
    pub fn into_record(self, id: StudentId) -> StudentRecord {
        StudentRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            guardian_phone: self.guardian_phone,
            personal_phones: self.personal_phones,
            emails: self.emails,
            subjects: self.subjects,
        }
    }

    pub fn has_subject(&self, name: &str) -> bool {
        self.subjects.iter().any(|s| s == name)
    }
}

/// An entry of the subject catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    /// Compulsory subjects are pre-selected and cannot be removed.
    #[serde(default)]
    pub required: bool,
}

impl Subject {
    pub fn new(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            required,
        }
    }
}

/// The subjects offered when no catalog is configured.
pub fn default_subjects() -> Vec<Subject> {
    [
        ("English", true),
        ("Maths", true),
        ("Physics", false),
        ("Chemistry", false),
        ("Commerce", false),
        ("Economics", false),
        ("Literature", false),
    ]
    .into_iter()
    .map(|(name, required)| Subject::new(name, required))
    .collect()
}

/// Strip every non-digit character from a phone number.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Comparison key for emails.
pub fn email_key(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
