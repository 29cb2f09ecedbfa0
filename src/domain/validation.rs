use std::sync::LazyLock;

use regex::Regex;

use super::{ContactEmail, Submission, ValidSubmission};

static SIMPLE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

// Ten digits, leading 6-9.
static MOBILE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid mobile pattern"));

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("Invalid contact number.")]
    InvalidContact,
}

/// Shape rule applied to a field after the presence checks pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeCheck {
    /// `something@domain.tld`, nothing more.
    SimpleEmail(&'static str),
    /// Full syntax check, same as [`ContactEmail::parse`].
    StandardEmail(&'static str),
    /// Indian mobile number, ignoring spaces, dashes and parentheses.
    MobileNumber(&'static str),
}

impl ShapeCheck {
    fn apply(&self, submission: &Submission) -> Result<(), ValidationError> {
        match *self {
            ShapeCheck::SimpleEmail(field) => {
                let value = submission.get(field).unwrap_or_default();
                if !SIMPLE_EMAIL.is_match(value) {
                    return Err(ValidationError::InvalidEmail);
                }
            }
            ShapeCheck::StandardEmail(field) => {
                let value = submission.get(field).unwrap_or_default();
                ContactEmail::parse(value.to_owned()).map_err(|_| ValidationError::InvalidEmail)?;
            }
            ShapeCheck::MobileNumber(field) => {
                let value = submission.get(field).unwrap_or_default();
                if !MOBILE_NUMBER.is_match(&normalize_phone(value)) {
                    return Err(ValidationError::InvalidContact);
                }
            }
        }
        Ok(())
    }
}

fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

/// Checks the required fields of the submission's kind, then its shape rules.
///
/// The first failure wins; nothing past it is looked at.
pub fn validate(submission: Submission) -> Result<ValidSubmission, ValidationError> {
    let kind = submission.kind();

    for &field in kind.required_fields() {
        if submission.get(field).is_none() {
            return Err(ValidationError::MissingField(field));
        }
    }

    for check in kind.shape_checks() {
        check.apply(&submission)?;
    }

    let email = submission
        .get("email")
        .ok_or(ValidationError::MissingField("email"))?
        .to_owned();

    Ok(ValidSubmission::new(submission, email))
}
