//! # Student validation
//!
//! [`validate`] checks a [`StudentDraft`] against the records already on the roster
//! and returns every broken rule. Nothing short-circuits: a draft with a missing
//! name and a malformed email reports both.
//!
//! ## Rules, in check order
//!
//! | Field | Rule |
//! |-------|------|
//! | names, address | non-empty after trimming |
//! | guardian phone | present, then the digit count rule, then unique on the roster |
//! | personal phones | blanks ignored; at most two; each must pass the digit count rule and be unique |
//! | emails | blanks ignored; at least one, at most two; each must look like `local@domain.tld` and be unique |
//! | subjects | exactly four; every compulsory subject present |
//!
//! Uniqueness is checked against every guardian and personal phone (or every email)
//! of every other record. The record named by `exclude_id` is skipped so an update
//! may keep its own values. Phones compare by digits and emails compare
//! case-insensitively. A draft repeating its own phone or email is also rejected.
//!
//! Limits and the compulsory subjects come from a [`RegistryConfig`];
//! [`validate`] uses the default one.

use std::collections::HashSet;

use crate::config::RegistryConfig;
use crate::error::{ValidationError, Violation};
use crate::models::{email_key, phone_digits, StudentDraft, StudentId, StudentRecord};

/// Validate with the default policy.
pub fn validate(
    candidate: &StudentDraft,
    roster: &[StudentRecord],
    exclude_id: Option<&StudentId>,
) -> Vec<Violation> {
    validate_with(&RegistryConfig::default(), candidate, roster, exclude_id)
}

/// Like [`validate_with`], but as a `Result`.
pub fn check(
    config: &RegistryConfig,
    candidate: &StudentDraft,
    roster: &[StudentRecord],
    exclude_id: Option<&StudentId>,
) -> Result<(), ValidationError> {
    match ValidationError::from_violations(validate_with(config, candidate, roster, exclude_id)) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Validate a candidate against the roster, skipping the record `exclude_id`.
pub fn validate_with(
    config: &RegistryConfig,
    candidate: &StudentDraft,
    roster: &[StudentRecord],
    exclude_id: Option<&StudentId>,
) -> Vec<Violation> {
    let limits = &config.limits;
    let others: Vec<&StudentRecord> = roster
        .iter()
        .filter(|s| exclude_id != Some(&s.id))
        .collect();
    let mut violations = Vec::new();

    if candidate.first_name.trim().is_empty() {
        violations.push(Violation::FirstNameRequired);
    }
    if candidate.last_name.trim().is_empty() {
        violations.push(Violation::LastNameRequired);
    }
    if candidate.address.trim().is_empty() {
        violations.push(Violation::AddressRequired);
    }

    // Guardian phone
    let guardian = candidate.guardian_phone.trim();
    if guardian.is_empty() {
        violations.push(Violation::GuardianPhoneRequired);
    } else if !is_valid_phone(guardian, limits.phone_digits) {
        violations.push(Violation::GuardianPhoneLength {
            digits: limits.phone_digits,
        });
    } else if phone_taken(guardian, &others) {
        violations.push(Violation::GuardianPhoneTaken);
    }

    // Personal phones
    let personal = non_blank(&candidate.personal_phones);
    if personal.len() > limits.max_personal_phones {
        violations.push(Violation::TooManyPersonalPhones {
            max: limits.max_personal_phones,
        });
    }
    for (i, phone) in personal.iter().enumerate() {
        if !is_valid_phone(phone, limits.phone_digits) {
            violations.push(Violation::PersonalPhoneLength {
                position: i + 1,
                digits: limits.phone_digits,
            });
        } else if phone_taken(phone, &others) {
            violations.push(Violation::PersonalPhoneTaken { position: i + 1 });
        }
    }
    let own_phones = std::iter::once(guardian)
        .chain(personal.iter().copied())
        .map(phone_digits)
        .filter(|digits| !digits.is_empty());
    if has_repeats(own_phones) {
        violations.push(Violation::RepeatedPhone);
    }

    // Emails
    let emails = non_blank(&candidate.emails);
    if emails.is_empty() {
        violations.push(Violation::EmailRequired);
    } else if emails.len() > limits.max_emails {
        violations.push(Violation::TooManyEmails {
            max: limits.max_emails,
        });
    }
    for (i, email) in emails.iter().enumerate() {
        if !is_valid_email(email) {
            violations.push(Violation::EmailInvalid { position: i + 1 });
        } else if email_taken(email, &others) {
            violations.push(Violation::EmailTaken { position: i + 1 });
        }
    }
    if has_repeats(emails.iter().map(|e| email_key(e))) {
        violations.push(Violation::RepeatedEmail);
    }

    // Subjects
    let selected: HashSet<&str> = candidate.subjects.iter().map(String::as_str).collect();
    if selected.len() != limits.subject_count {
        violations.push(Violation::SubjectCount {
            count: limits.subject_count,
        });
    }
    for subject in config.compulsory_subjects() {
        if !selected.contains(subject) {
            violations.push(Violation::CompulsorySubjectMissing(subject.to_string()));
        }
    }

    tracing::debug!(violations = violations.len(), "validated student draft");
    violations
}

/// True when the number has exactly `digits` digits once punctuation is stripped.
pub fn is_valid_phone(phone: &str, digits: usize) -> bool {
    phone_digits(phone).len() == digits
}

/// Basic `local@domain.tld` shape: no whitespace, a single `@`, and a `.` inside
/// the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Trimmed, non-blank entries.
fn non_blank(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect()
}

fn phone_taken(phone: &str, others: &[&StudentRecord]) -> bool {
    let digits = phone_digits(phone);
    others
        .iter()
        .flat_map(|s| s.phones())
        .any(|p| phone_digits(p) == digits)
}

fn email_taken(email: &str, others: &[&StudentRecord]) -> bool {
    let key = email_key(email);
    others
        .iter()
        .flat_map(|s| s.emails.iter())
        .any(|e| email_key(e) == key)
}

fn has_repeats(keys: impl Iterator<Item = String>) -> bool {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;

    fn john() -> StudentRecord {
        StudentRecord {
            id: StudentId::from("1"),
            first_name: "John".into(),
            last_name: "Doe".into(),
            address: "123 Street".into(),
            guardian_phone: "08012345678".into(),
            personal_phones: vec!["08087654321".into()],
            emails: vec!["john@example.com".into(), "john.doe@gmail.com".into()],
            subjects: vec![
                "English".into(),
                "Maths".into(),
                "Physics".into(),
                "Chemistry".into(),
            ],
        }
    }

    fn jane() -> StudentDraft {
        StudentDraft {
            first_name: "Jane".into(),
            last_name: "Roe".into(),
            address: "9 Avenue".into(),
            guardian_phone: "08011112222".into(),
            personal_phones: vec!["".into()],
            emails: vec!["jane@example.com".into()],
            subjects: vec![
                "English".into(),
                "Maths".into(),
                "Commerce".into(),
                "Economics".into(),
            ],
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate(&jane(), &[john()], None).is_empty());
    }

    #[test]
    fn test_required_fields() {
        let draft = StudentDraft {
            first_name: "  ".into(),
            last_name: "".into(),
            address: "\t".into(),
            ..jane()
        };
        let violations = validate(&draft, &[], None);
        assert_eq!(
            violations[..3],
            [
                Violation::FirstNameRequired,
                Violation::LastNameRequired,
                Violation::AddressRequired
            ]
        );
    }

    #[test]
    fn test_checks_accumulate() {
        let violations = validate(&StudentDraft::default(), &[], None);
        assert_eq!(
            violations,
            vec![
                Violation::FirstNameRequired,
                Violation::LastNameRequired,
                Violation::AddressRequired,
                Violation::GuardianPhoneRequired,
                Violation::EmailRequired,
                Violation::SubjectCount { count: 4 },
                Violation::CompulsorySubjectMissing("English".into()),
                Violation::CompulsorySubjectMissing("Maths".into()),
            ]
        );
    }

    #[test]
    fn test_phone_digit_count_ignores_punctuation() {
        assert!(is_valid_phone("080-1234-5678", 11));
        assert!(is_valid_phone("+080 1234 5678", 11));
        assert!(!is_valid_phone("1234567890", 11));
        assert!(!is_valid_phone("080123456789", 11));

        let draft = StudentDraft {
            guardian_phone: "080-1111-2222".into(),
            ..jane()
        };
        assert!(validate(&draft, &[], None).is_empty());

        let draft = StudentDraft {
            guardian_phone: "1234567890".into(),
            personal_phones: vec!["12345".into()],
            ..jane()
        };
        assert_eq!(
            validate(&draft, &[], None),
            vec![
                Violation::GuardianPhoneLength { digits: 11 },
                Violation::PersonalPhoneLength {
                    position: 1,
                    digits: 11
                },
            ]
        );
    }

    #[test]
    fn test_guardian_phone_must_be_unique() {
        let draft = StudentDraft {
            guardian_phone: "08012345678".into(),
            ..jane()
        };
        assert_eq!(
            validate(&draft, &[john()], None),
            vec![Violation::GuardianPhoneTaken]
        );

        // Clashing with another student's personal phone counts too
        let draft = StudentDraft {
            guardian_phone: "0808-765-4321".into(),
            ..jane()
        };
        assert_eq!(
            validate(&draft, &[john()], None),
            vec![Violation::GuardianPhoneTaken]
        );
    }

    #[test]
    fn test_update_may_keep_own_values() {
        let record = john();
        let draft = record.to_draft();
        assert!(validate(&draft, &[record.clone()], Some(&record.id)).is_empty());
        assert!(!validate(&draft, &[record.clone()], None).is_empty());
    }

    #[test]
    fn test_personal_phones() {
        let draft = StudentDraft {
            personal_phones: vec![
                "08033334444".into(),
                " ".into(),
                "08087654321".into(),
                "08055556666".into(),
            ],
            ..jane()
        };
        assert_eq!(
            validate(&draft, &[john()], None),
            vec![
                Violation::TooManyPersonalPhones { max: 2 },
                Violation::PersonalPhoneTaken { position: 2 },
            ]
        );
    }

    #[test]
    fn test_own_phones_must_differ() {
        let draft = StudentDraft {
            personal_phones: vec!["080-1111-2222".into()],
            ..jane()
        };
        assert_eq!(validate(&draft, &[], None), vec![Violation::RepeatedPhone]);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.com"));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@example"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@example."));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_emails() {
        let draft = StudentDraft {
            emails: vec!["".into(), " ".into()],
            ..jane()
        };
        assert_eq!(validate(&draft, &[], None), vec![Violation::EmailRequired]);

        let draft = StudentDraft {
            emails: vec!["not-an-email".into(), "JOHN@example.com".into()],
            ..jane()
        };
        assert_eq!(
            validate(&draft, &[john()], None),
            vec![
                Violation::EmailInvalid { position: 1 },
                Violation::EmailTaken { position: 2 },
            ]
        );

        let draft = StudentDraft {
            emails: vec!["a@x.com".into(), "b@x.com".into(), "c@x.com".into()],
            ..jane()
        };
        assert_eq!(
            validate(&draft, &[], None),
            vec![Violation::TooManyEmails { max: 2 }]
        );
    }

    #[test]
    fn test_own_emails_must_differ() {
        let draft = StudentDraft {
            emails: vec!["jane@example.com".into(), "Jane@Example.com".into()],
            ..jane()
        };
        assert_eq!(validate(&draft, &[], None), vec![Violation::RepeatedEmail]);
    }

    #[test]
    fn test_subjects() {
        let three = StudentDraft {
            subjects: vec!["English".into(), "Maths".into(), "Physics".into()],
            ..jane()
        };
        assert_eq!(
            validate(&three, &[], None),
            vec![Violation::SubjectCount { count: 4 }]
        );

        let no_maths = StudentDraft {
            subjects: vec![
                "English".into(),
                "Physics".into(),
                "Chemistry".into(),
                "Commerce".into(),
            ],
            ..jane()
        };
        let violations = validate(&no_maths, &[], None);
        assert_eq!(
            violations,
            vec![Violation::CompulsorySubjectMissing("Maths".into())]
        );
        assert_eq!(violations[0].to_string(), "Maths is compulsory");

        let repeated = StudentDraft {
            subjects: vec![
                "English".into(),
                "Maths".into(),
                "Physics".into(),
                "Physics".into(),
            ],
            ..jane()
        };
        assert_eq!(
            validate(&repeated, &[], None),
            vec![Violation::SubjectCount { count: 4 }]
        );
    }

    #[test]
    fn test_configured_limits() {
        let config = RegistryConfig::default().with_limits(Limits {
            phone_digits: 10,
            subject_count: 2,
            ..Limits::default()
        });
        let draft = StudentDraft {
            guardian_phone: "0801234567".into(),
            subjects: vec!["English".into(), "Maths".into()],
            ..jane()
        };
        assert!(check(&config, &draft, &[], None).is_ok());

        let err = check(&RegistryConfig::default(), &draft, &[], None).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "Guardian phone number must be 11 digits",
                "Exactly 4 subjects must be selected"
            ]
        );
    }
}
