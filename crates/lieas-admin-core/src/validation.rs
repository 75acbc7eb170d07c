use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

pub const FIELD_ERROR_CLASS: &str = "field-error";
pub const INPUT_ERROR_CLASS: &str = "error";
pub const FOCUSED_CLASS: &str = "focused";

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());
static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Other,
}

impl FieldKind {
    /// Maps an `<input type=...>` value onto the kinds that carry rules.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.trim().to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" => Self::Tel,
            "text" | "" => Self::Text,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
}

impl FieldInput {
    pub fn new(kind: FieldKind, required: bool, value: impl Into<String>) -> Self {
        Self {
            kind,
            required,
            value: value.into(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Whitespace anywhere in the number is ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|ch| !ch.is_whitespace()).collect();
    PHONE_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(&compact))
}

pub fn validate_field(field: &FieldInput) -> Result<(), ValidationError> {
    let value = field.value.trim();
    if value.is_empty() {
        return if field.required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }
    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Err(ValidationError::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Err(ValidationError::InvalidPhone),
        _ => Ok(()),
    }
}

/// What the DOM has to do for one field after a validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorChange {
    /// Remove any error node; the field is valid.
    Cleared,
    /// Remove any error node, then attach exactly one with this message.
    Shown(ValidationError),
}

/// Tracks the one visible error per field.
///
/// Re-validating a field always replaces its previous error, so the page
/// never accumulates duplicate error nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<String, ValidationError>,
}

impl FormErrors {
    pub fn validate(&mut self, field_id: &str, field: &FieldInput) -> FieldErrorChange {
        self.apply(field_id, validate_field(field))
    }

    pub fn apply(
        &mut self,
        field_id: &str,
        result: Result<(), ValidationError>,
    ) -> FieldErrorChange {
        self.errors.remove(field_id);
        match result {
            Ok(()) => FieldErrorChange::Cleared,
            Err(error) => {
                self.errors.insert(field_id.to_string(), error);
                FieldErrorChange::Shown(error)
            }
        }
    }

    pub fn error_for(&self, field_id: &str) -> Option<ValidationError> {
        self.errors.get(field_id).copied()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    pub changes: Vec<(String, FieldErrorChange)>,
    pub may_submit: bool,
}

/// Submit-time validation. Only required fields take part; a single
/// failure blocks submission but every field is still checked.
pub fn validate_form<'a, I>(errors: &mut FormErrors, fields: I) -> FormValidation
where
    I: IntoIterator<Item = (&'a str, &'a FieldInput)>,
{
    let mut changes = Vec::new();
    let mut may_submit = true;
    for (field_id, field) in fields {
        if !field.required {
            continue;
        }
        let change = errors.validate(field_id, field);
        if matches!(change, FieldErrorChange::Shown(_)) {
            may_submit = false;
        }
        changes.push((field_id.to_string(), change));
    }
    FormValidation {
        changes,
        may_submit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules() {
        assert!(!is_valid_email("not-an-email"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn phone_rules() {
        assert!(is_valid_phone("+1234567"));
        assert!(is_valid_phone("+1 234 567"));
        assert!(!is_valid_phone("abc"));
        assert!(!is_valid_phone("+0123"));
        assert!(!is_valid_phone("12345678901234567"));
        assert!(is_valid_phone("1234567890123456"));
    }

    #[test]
    fn required_check_runs_before_format_checks() {
        let empty_email = FieldInput::new(FieldKind::Email, true, "   ");
        assert_eq!(validate_field(&empty_email), Err(ValidationError::Required));

        let optional_email = FieldInput::new(FieldKind::Email, false, "");
        assert_eq!(validate_field(&optional_email), Ok(()));

        let optional_bad_email = FieldInput::new(FieldKind::Email, false, "nope");
        assert_eq!(
            validate_field(&optional_bad_email),
            Err(ValidationError::InvalidEmail)
        );

        let bad_phone = FieldInput::new(FieldKind::Tel, true, "abc");
        assert_eq!(validate_field(&bad_phone), Err(ValidationError::InvalidPhone));
        assert_eq!(
            ValidationError::InvalidPhone.to_string(),
            "Please enter a valid phone number"
        );
    }

    #[test]
    fn input_type_mapping() {
        assert_eq!(FieldKind::from_input_type("EMAIL"), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type("tel"), FieldKind::Tel);
        assert_eq!(FieldKind::from_input_type(""), FieldKind::Text);
        assert_eq!(FieldKind::from_input_type("number"), FieldKind::Other);
    }

    #[test]
    fn revalidation_replaces_the_previous_error() {
        let mut errors = FormErrors::default();
        let field = FieldInput::new(FieldKind::Email, true, "");
        assert_eq!(
            errors.validate("email", &field),
            FieldErrorChange::Shown(ValidationError::Required)
        );
        let field = FieldInput::new(FieldKind::Email, true, "bad");
        assert_eq!(
            errors.validate("email", &field),
            FieldErrorChange::Shown(ValidationError::InvalidEmail)
        );
        assert_eq!(errors.error_count(), 1);

        let field = FieldInput::new(FieldKind::Email, true, "a@b.co");
        assert_eq!(errors.validate("email", &field), FieldErrorChange::Cleared);
        assert!(errors.is_clean());
    }

    #[test]
    fn empty_required_field_blocks_submit_until_corrected() {
        let mut errors = FormErrors::default();
        let name = FieldInput::new(FieldKind::Text, true, "");
        let note = FieldInput::new(FieldKind::Text, false, "");
        let result = validate_form(&mut errors, [("name", &name), ("note", &note)]);
        assert!(!result.may_submit);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(errors.error_for("name"), Some(ValidationError::Required));

        let name = FieldInput::new(FieldKind::Text, true, "Ada");
        let result = validate_form(&mut errors, [("name", &name), ("note", &note)]);
        assert!(result.may_submit);
        assert_eq!(errors.error_for("name"), None);
    }
}
