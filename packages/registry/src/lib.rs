//! # Student registry
//!
//! Validation, normalization and in-memory bookkeeping for student registration.
//! Front ends keep a [`Roster`] and a [`StudentForm`] in their own state, feed user
//! input into the form helpers, and call [`Roster::submit`] to save.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `StudentRecord`, `StudentDraft`, `StudentId`, the subject catalog |
//! | [`validate`] | The rules a draft must satisfy before it is saved |
//! | [`normalize`] | Trimming and blank-slot removal applied on save |
//! | [`form`] | Slot and subject helpers that refuse with a notice instead of failing |
//! | [`roster`] | Register, update, search |
//! | [`notice`] | User-visible informational messages |
//! | [`config`] | `registry.toml` limits and subject catalog |
//! | [`error`] | `Violation`, `ValidationError`, `RosterError`, `ConfigError` |

pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod normalize;
pub mod notice;
pub mod roster;
pub mod validate;

pub use config::{Limits, RegistryConfig};
pub use error::{ConfigError, RosterError, ValidationError, Violation};
pub use form::{FormMode, Outcome, StudentForm};
pub use models::{StudentDraft, StudentId, StudentRecord, Subject, COMPULSORY_SUBJECTS};
pub use normalize::normalize;
pub use notice::{Notice, NoticeLevel, NoticeLog};
pub use roster::Roster;
pub use validate::{check, validate, validate_with};
