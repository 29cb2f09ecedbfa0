use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error},
};

use crate::domain::{Submission, SubmissionKind};

/// A typed request body for one [`SubmissionKind`].
pub trait SubmissionForm: DeserializeOwned + Send + 'static {
    const KIND: SubmissionKind;

    fn into_submission(self) -> Submission;
}

/// Phone-like fields arrive as strings or bare numbers depending on the
/// front-end, accept both.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or a number, found {}",
            other
        ))),
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl SubmissionForm for LeadForm {
    const KIND: SubmissionKind = SubmissionKind::Lead;

    fn into_submission(self) -> Submission {
        Submission::new(
            Self::KIND,
            [
                ("firstName", self.first_name),
                ("lastName", self.last_name),
                ("email", self.email),
                ("phone", self.phone),
                ("message", self.message),
            ],
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct NewsletterForm {
    pub email: Option<String>,
}

impl SubmissionForm for NewsletterForm {
    const KIND: SubmissionKind = SubmissionKind::Newsletter;

    fn into_submission(self) -> Submission {
        Submission::new(Self::KIND, [("email", self.email)])
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CourseInquiryForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub brochure_url: Option<String>,
}

impl SubmissionForm for CourseInquiryForm {
    const KIND: SubmissionKind = SubmissionKind::CourseInquiry;

    fn into_submission(self) -> Submission {
        Submission::new(
            Self::KIND,
            [
                ("fullName", self.full_name),
                ("email", self.email),
                ("course", self.course),
            ],
        )
        .with_echo("brochureUrl", self.brochure_url)
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub contact: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub whatsapp_no: Option<String>,
    pub address: Option<String>,
    pub stream: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub passout: Option<String>,
}

impl SubmissionForm for RegistrationForm {
    const KIND: SubmissionKind = SubmissionKind::Registration;

    fn into_submission(self) -> Submission {
        Submission::new(
            Self::KIND,
            [
                ("name", self.name),
                ("contact", self.contact),
                ("email", self.email),
                ("whatsappNo", self.whatsapp_no),
                ("address", self.address),
                ("stream", self.stream),
                ("passout", self.passout),
            ],
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct SupportForm {
    pub fullname: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl SubmissionForm for SupportForm {
    const KIND: SubmissionKind = SubmissionKind::Support;

    fn into_submission(self) -> Submission {
        Submission::new(
            Self::KIND,
            [
                ("fullname", self.fullname),
                ("email", self.email),
                ("phone", self.phone),
                ("subject", self.subject),
                ("message", self.message),
            ],
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct InternationalForm {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl SubmissionForm for InternationalForm {
    const KIND: SubmissionKind = SubmissionKind::International;

    fn into_submission(self) -> Submission {
        Submission::new(
            Self::KIND,
            [
                ("name", self.name),
                ("phone", self.phone),
                ("email", self.email),
            ],
        )
    }
}

#[derive(Deserialize, Debug)]
pub struct EnquiryForm {
    pub username: Option<String>,
    pub last: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    pub coursename: Option<String>,
}

impl SubmissionForm for EnquiryForm {
    const KIND: SubmissionKind = SubmissionKind::Enquiry;

    fn into_submission(self) -> Submission {
        Submission::new(
            Self::KIND,
            [
                ("username", self.username),
                ("last", self.last),
                ("email", self.email),
                ("phone", self.phone),
                ("coursename", self.coursename),
            ],
        )
    }
}
