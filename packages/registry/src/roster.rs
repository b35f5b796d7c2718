//! # Roster — the in-memory collection of registered students
//!
//! [`Roster`] owns every [`StudentRecord`] in registration order together with the
//! [`RegistryConfig`] they are validated under. It is a plain value: the caller
//! holds it and hands `&mut Roster` to the save paths.
//!
//! ## Write path
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`register`](Roster::register) | Validates a draft, normalizes it, assigns a fresh [`StudentId`] and appends it. |
//! | [`update`](Roster::update) | Validates a draft while skipping the record's own values, keeps its id and main email, and replaces it in place. |
//! | [`submit`](Roster::submit) | Saves a [`StudentForm`] through whichever of the two its mode calls for, logs a success notice and resets the form. |
//!
//! A save is all or nothing. When validation fails the roster is untouched and the
//! caller receives every violation at once.
//!
//! ## Read path
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`get`](Roster::get) | Lookup by id. |
//! | [`search`](Roster::search) | Students whose name, guardian phone or any email contains the term. |
//! | [`find_by_name`](Roster::find_by_name) | First student whose full name contains the query. |

use crate::config::RegistryConfig;
use crate::error::{RosterError, ValidationError};
use crate::form::{FormMode, StudentForm};
use crate::models::{phone_digits, StudentDraft, StudentId, StudentRecord};
use crate::normalize::normalize;
use crate::notice::{Notice, NoticeLog};
use crate::validate::check;

/// Registered students, in registration order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    students: Vec<StudentRecord>,
    config: RegistryConfig,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            students: Vec::new(),
            config,
        }
    }

    /// Seed a roster with records that are trusted as-is.
    pub fn with_records(config: RegistryConfig, students: Vec<StudentRecord>) -> Self {
        Self { students, config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// A blank registration form using this roster's policy.
    pub fn new_form(&self) -> StudentForm {
        StudentForm::with_config(self.config.clone())
    }

    /// An edit form for the student `id`.
    pub fn edit_form(&self, id: &StudentId) -> Option<StudentForm> {
        self.get(id)
            .map(|record| StudentForm::edit_with_config(record, self.config.clone()))
    }

    pub fn get(&self, id: &StudentId) -> Option<&StudentRecord> {
        self.students.iter().find(|s| &s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.students.iter()
    }

    pub fn as_slice(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Register a new student.
    pub fn register(&mut self, draft: &StudentDraft) -> Result<StudentRecord, ValidationError> {
        check(&self.config, draft, &self.students, None)?;

        let record = normalize(draft).into_record(StudentId::generate());
        tracing::info!(id = %record.id, "registered student {}", record.full_name());
        self.students.push(record.clone());
        Ok(record)
    }

    /// Replace the student `id` with the contents of `draft`.
    ///
    /// The stored main email wins over whatever the draft holds at index 0.
    pub fn update(
        &mut self,
        id: &StudentId,
        draft: &StudentDraft,
    ) -> Result<StudentRecord, RosterError> {
        let index = self
            .students
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))?;

        let mut draft = draft.clone();
        if let Some(main) = self.students[index].main_email() {
            keep_main_email(&mut draft, main, id);
        }
        check(&self.config, &draft, &self.students, Some(id))?;

        let record = normalize(&draft).into_record(id.clone());
        tracing::info!(id = %record.id, "updated student {}", record.full_name());
        self.students[index] = record.clone();
        Ok(record)
    }

    /// Save a form: register in add mode, update in edit mode.
    ///
    /// On success a notice is logged and the form is reset to a blank
    /// registration. On failure the form is left as it was.
    pub fn submit(
        &mut self,
        form: &mut StudentForm,
        log: &mut NoticeLog,
    ) -> Result<StudentRecord, RosterError> {
        let record = match form.mode() {
            FormMode::Add => {
                let record = self.register(form.draft())?;
                log.push(Notice::success("Student added successfully!"));
                record
            }
            FormMode::Edit { id, .. } => {
                let id = id.clone();
                let record = self.update(&id, form.draft())?;
                log.push(Notice::success("Student updated successfully!"));
                record
            }
        };
        form.reset();
        Ok(record)
    }

    /// Students whose full name, guardian phone or any email contains `term`.
    /// Name and email matching ignore case; an all-digit term also matches the
    /// guardian phone with its punctuation stripped. An empty term matches everyone.
    pub fn search(&self, term: &str) -> Vec<&StudentRecord> {
        let needle = term.to_lowercase();
        let digits_only = !term.is_empty() && term.chars().all(|c| c.is_ascii_digit());
        self.students
            .iter()
            .filter(|s| {
                s.full_name().to_lowercase().contains(&needle)
                    || s.guardian_phone.contains(term)
                    || (digits_only && phone_digits(&s.guardian_phone).contains(term))
                    || s.emails.iter().any(|e| e.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// First student whose "First Last" contains `query`, ignoring case.
    pub fn find_by_name(&self, query: &str) -> Option<&StudentRecord> {
        let needle = query.to_lowercase();
        self.students
            .iter()
            .find(|s| s.full_name().to_lowercase().contains(&needle))
    }
}

fn keep_main_email(draft: &mut StudentDraft, main: &str, id: &StudentId) {
    if main.trim().is_empty() {
        return;
    }
    match draft.emails.first_mut() {
        Some(first) if first.trim() == main.trim() => {}
        Some(first) => {
            tracing::warn!(%id, "ignoring change to main email");
            *first = main.to_string();
        }
        None => {
            tracing::warn!(%id, "ignoring removal of main email");
            draft.emails.push(main.to_string());
        }
    }
}
