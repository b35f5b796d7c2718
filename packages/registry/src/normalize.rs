//! Normalization applied to a draft once it has passed validation.

use crate::models::StudentDraft;

/// Trim free text and drop blank phone/email slots. Subjects are kept as given.
pub fn normalize(draft: &StudentDraft) -> StudentDraft {
    StudentDraft {
        first_name: draft.first_name.trim().to_string(),
        last_name: draft.last_name.trim().to_string(),
        address: draft.address.trim().to_string(),
        guardian_phone: draft.guardian_phone.trim().to_string(),
        personal_phones: trimmed_non_blank(&draft.personal_phones),
        emails: trimmed_non_blank(&draft.emails),
        subjects: draft.subjects.clone(),
    }
}

fn trimmed_non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_blanks() {
        let draft = StudentDraft {
            first_name: "  Jane ".into(),
            last_name: "Roe\n".into(),
            address: " 9 Avenue ".into(),
            guardian_phone: " 080-1111-2222 ".into(),
            personal_phones: vec!["".into(), " 08033334444".into()],
            emails: vec![" jane@example.com ".into(), "   ".into()],
            subjects: vec![
                "English".into(),
                "Maths".into(),
                "Commerce".into(),
                "Economics".into(),
            ],
        };
        let normalized = normalize(&draft);
        assert_eq!(normalized.first_name, "Jane");
        assert_eq!(normalized.last_name, "Roe");
        assert_eq!(normalized.address, "9 Avenue");
        // Punctuation is kept, only whitespace goes
        assert_eq!(normalized.guardian_phone, "080-1111-2222");
        assert_eq!(normalized.personal_phones, vec!["08033334444"]);
        assert_eq!(normalized.emails, vec!["jane@example.com"]);
        assert_eq!(normalized.subjects, draft.subjects);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let draft = StudentDraft {
            first_name: " a ".into(),
            personal_phones: vec!["".into(), "".into()],
            emails: vec![" x@y.z".into()],
            ..StudentDraft::default()
        };
        let once = normalize(&draft);
        assert_eq!(normalize(&once), once);
        assert!(once.personal_phones.is_empty());
    }
}
