//! # Form buffer for adding and editing students
//!
//! [`StudentForm`] holds the [`StudentDraft`] a user is typing into, plus whether it
//! is a new registration or an edit of an existing record. The slot and subject
//! helpers never fail: when a policy forbids an action they leave the draft alone and
//! return [`Outcome::Refused`] with a [`Notice`] to show the user.
//!
//! ## Policies
//!
//! | Action | Refused when |
//! |--------|--------------|
//! | [`add_phone`](StudentForm::add_phone) / [`add_email`](StudentForm::add_email) | the list already holds the maximum number of slots |
//! | [`remove_email`](StudentForm::remove_email) | the index is 0 (the main email) |
//! | [`set_email`](StudentForm::set_email) | editing a record, index 0, and the record already had a main email |
//! | [`toggle_subject`](StudentForm::toggle_subject) | removing a compulsory subject, exceeding the subject count, or selecting a subject that is not offered |
//! | any indexed helper | the index is out of range |

use crate::config::RegistryConfig;
use crate::models::{StudentDraft, StudentId, StudentRecord};
use crate::notice::Notice;

/// Result of a form helper.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Refused(Notice),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Applied => None,
            Outcome::Refused(notice) => Some(notice),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit {
        id: StudentId,
        /// Set when the record already had a main email.
        main_email_locked: bool,
    },
}

/// Editable student data plus the policy it is edited under.
#[derive(Clone, Debug)]
pub struct StudentForm {
    draft: StudentDraft,
    mode: FormMode,
    config: RegistryConfig,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentForm {
    /// Blank registration form under the default policy.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Blank registration form: one empty phone slot, one empty email slot,
    /// compulsory subjects pre-selected, all within the configured caps.
    pub fn with_config(config: RegistryConfig) -> Self {
        let limits = &config.limits;
        let mut personal_phones = Vec::new();
        pad_slots(&mut personal_phones, limits.max_personal_phones);
        let mut emails = Vec::new();
        pad_slots(&mut emails, limits.max_emails);
        let subjects = config
            .compulsory_subjects()
            .take(limits.subject_count)
            .map(str::to_string)
            .collect();
        let draft = StudentDraft {
            personal_phones,
            emails,
            subjects,
            ..StudentDraft::default()
        };
        Self {
            draft,
            mode: FormMode::Add,
            config,
        }
    }

    /// Edit form for an existing record under the default policy.
    pub fn edit(record: &StudentRecord) -> Self {
        Self::edit_with_config(record, RegistryConfig::default())
    }

    /// Edit form for `record`. Phone and email lists get one extra blank slot,
    /// capped at the configured maximum.
    pub fn edit_with_config(record: &StudentRecord, config: RegistryConfig) -> Self {
        let mut draft = record.to_draft();
        pad_slots(&mut draft.personal_phones, config.limits.max_personal_phones);
        pad_slots(&mut draft.emails, config.limits.max_emails);
        let main_email_locked = record
            .main_email()
            .is_some_and(|email| !email.trim().is_empty());
        Self {
            draft,
            mode: FormMode::Edit {
                id: record.id.clone(),
                main_email_locked,
            },
            config,
        }
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn into_draft(self) -> StudentDraft {
        self.draft
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Id of the record being edited, `None` for a new registration.
    pub fn editing_id(&self) -> Option<&StudentId> {
        match &self.mode {
            FormMode::Add => None,
            FormMode::Edit { id, .. } => Some(id),
        }
    }

    /// Clear back to a blank registration form, keeping the policy.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config.clone());
    }

    pub fn set_first_name(&mut self, value: &str) {
        self.draft.first_name = value.to_string();
    }

    pub fn set_last_name(&mut self, value: &str) {
        self.draft.last_name = value.to_string();
    }

    pub fn set_address(&mut self, value: &str) {
        self.draft.address = value.to_string();
    }

    pub fn set_guardian_phone(&mut self, value: &str) {
        self.draft.guardian_phone = value.to_string();
    }

    pub fn can_add_phone(&self) -> bool {
        self.draft.personal_phones.len() < self.config.limits.max_personal_phones
    }

    pub fn add_phone(&mut self) -> Outcome {
        if !self.can_add_phone() {
            return Outcome::Refused(Notice::info(format!(
                "Maximum {} personal phone numbers allowed",
                self.config.limits.max_personal_phones
            )));
        }
        self.draft.personal_phones.push(String::new());
        Outcome::Applied
    }

    pub fn remove_phone(&mut self, index: usize) -> Outcome {
        if index >= self.draft.personal_phones.len() {
            return phone_slot_missing(index);
        }
        self.draft.personal_phones.remove(index);
        Outcome::Applied
    }

    pub fn set_phone(&mut self, index: usize, value: &str) -> Outcome {
        match self.draft.personal_phones.get_mut(index) {
            Some(slot) => {
                *slot = value.to_string();
                Outcome::Applied
            }
            None => phone_slot_missing(index),
        }
    }

    pub fn can_add_email(&self) -> bool {
        self.draft.emails.len() < self.config.limits.max_emails
    }

    pub fn add_email(&mut self) -> Outcome {
        if !self.can_add_email() {
            return Outcome::Refused(Notice::info(format!(
                "Maximum {} emails allowed",
                self.config.limits.max_emails
            )));
        }
        self.draft.emails.push(String::new());
        Outcome::Applied
    }

    pub fn remove_email(&mut self, index: usize) -> Outcome {
        if index == 0 {
            return Outcome::Refused(Notice::info("Main email cannot be removed"));
        }
        if index >= self.draft.emails.len() {
            return email_slot_missing(index);
        }
        self.draft.emails.remove(index);
        Outcome::Applied
    }

    pub fn set_email(&mut self, index: usize, value: &str) -> Outcome {
        if index == 0 && self.main_email_locked() {
            return Outcome::Refused(Notice::info("Main email cannot be changed"));
        }
        match self.draft.emails.get_mut(index) {
            Some(slot) => {
                *slot = value.to_string();
                Outcome::Applied
            }
            None => email_slot_missing(index),
        }
    }

    /// Whether the email at index 0 is read-only.
    pub fn main_email_locked(&self) -> bool {
        matches!(
            self.mode,
            FormMode::Edit {
                main_email_locked: true,
                ..
            }
        )
    }

    /// Select (`checked`) or deselect a subject.
    ///
    /// Only selecting is restricted to the catalog; a subject already on the
    /// record can always be deselected unless it is compulsory.
    pub fn toggle_subject(&mut self, name: &str, checked: bool) -> Outcome {
        let selected = self.draft.has_subject(name);
        if checked {
            if selected {
                return Outcome::Applied;
            }
            if !self.config.offers(name) {
                return Outcome::Refused(Notice::warning(format!("{name} is not offered")));
            }
            if self.draft.subjects.len() >= self.config.limits.subject_count {
                return Outcome::Refused(Notice::info(format!(
                    "Maximum {} subjects allowed",
                    self.config.limits.subject_count
                )));
            }
            self.draft.subjects.push(name.to_string());
        } else {
            if self.config.is_compulsory(name) {
                return Outcome::Refused(Notice::info(format!(
                    "{name} is compulsory and cannot be removed"
                )));
            }
            self.draft.subjects.retain(|s| s != name);
        }
        Outcome::Applied
    }

    /// "Selected: n/4" counter shown under the subject list.
    pub fn subject_progress(&self) -> (usize, usize) {
        (self.draft.subjects.len(), self.config.limits.subject_count)
    }
}

fn pad_slots(slots: &mut Vec<String>, max: usize) {
    slots.push(String::new());
    slots.truncate(max);
}

fn phone_slot_missing(index: usize) -> Outcome {
    Outcome::Refused(Notice::warning(format!(
        "Personal phone {} does not exist",
        index + 1
    )))
}

fn email_slot_missing(index: usize) -> Outcome {
    Outcome::Refused(Notice::warning(format!("Email {} does not exist", index + 1)))
}
