use super::{SubmissionKind, sanitize_text};

/// Form data for one request, keyed by the JSON field name.
///
/// Values are stripped of markup on the way in and empty values are dropped,
/// so a field is either absent or holds non-empty plain text. Templates
/// escape it when it goes into HTML.
#[derive(Debug, Clone)]
pub struct Submission {
    kind: SubmissionKind,
    fields: Vec<(&'static str, String)>,
    echoed: Vec<(&'static str, String)>,
}

impl Submission {
    pub fn new<I>(kind: SubmissionKind, raw_fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Option<String>)>,
    {
        let fields = raw_fields
            .into_iter()
            .filter_map(|(name, value)| {
                let value = sanitize_text(value.as_deref().unwrap_or_default());
                (!value.is_empty()).then_some((name, value))
            })
            .collect();

        Self {
            kind,
            fields,
            echoed: Vec::new(),
        }
    }

    /// Attaches a value that is only returned to the caller in the JSON
    /// response. It never reaches an email body and is kept verbatim.
    pub fn with_echo(mut self, name: &'static str, value: Option<String>) -> Self {
        if let Some(value) = value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty()) {
            self.echoed.push((name, value));
        }
        self
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn echoed(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.echoed.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// A [`Submission`] that passed [`validate`](super::validate).
///
/// Only the validator builds one, and notifications are rendered from this
/// type alone.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    submission: Submission,
    email: String,
}

impl ValidSubmission {
    pub(super) fn new(submission: Submission, email: String) -> Self {
        Self { submission, email }
    }

    pub fn kind(&self) -> SubmissionKind {
        self.submission.kind()
    }

    /// The submitter's address, where the acknowledgment goes.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.submission.get(name)
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.submission.fields()
    }

    pub fn echoed(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.submission.echoed()
    }
}
