use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use super::SubmissionForm;
use crate::{
    domain::{SubmissionKind, ValidSubmission, ValidationError, validate},
    notifications::DispatchError,
    startup::AppState,
};

/// Response body layout used by a kind's front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Envelope {
    /// `{ok, emailSent}` / `{ok: false, error}`
    Flag,
    /// `{message}` / `{error}`
    Plain,
    /// `{success, message}`
    Legacy,
}

impl Envelope {
    fn of(kind: SubmissionKind) -> Self {
        match kind {
            SubmissionKind::Lead
            | SubmissionKind::Newsletter
            | SubmissionKind::CourseInquiry
            | SubmissionKind::Registration => Envelope::Flag,
            SubmissionKind::Support | SubmissionKind::International => Envelope::Plain,
            SubmissionKind::Enquiry => Envelope::Legacy,
        }
    }

    fn error(self, reason: &str) -> Value {
        match self {
            Envelope::Flag => json!({ "ok": false, "error": reason }),
            Envelope::Plain => json!({ "error": reason }),
            Envelope::Legacy => json!({ "success": false, "message": reason }),
        }
    }
}

fn success_envelope(submission: &ValidSubmission) -> Value {
    let mut body = match submission.kind() {
        SubmissionKind::Lead | SubmissionKind::Newsletter | SubmissionKind::CourseInquiry => {
            json!({ "ok": true, "emailSent": true })
        }
        SubmissionKind::Registration => {
            json!({ "ok": true, "emailSent": true, "message": "Registration successful" })
        }
        SubmissionKind::Support => {
            json!({ "message": "Form submitted and auto-reply sent successfully." })
        }
        SubmissionKind::International => json!({ "message": "Emails sent successfully." }),
        SubmissionKind::Enquiry => {
            json!({ "success": true, "message": "Inquiry submitted and confirmation sent." })
        }
    };
    for (name, value) in submission.echoed() {
        body[name] = Value::from(value);
    }
    body
}

/// What the caller sees when delivery fails. The cause is only logged.
fn failure_message(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Lead => "Email sending failed",
        SubmissionKind::Newsletter => "Subscription failed",
        SubmissionKind::CourseInquiry => "Inquiry failed",
        SubmissionKind::Registration => "Registration failed",
        SubmissionKind::Support => "Something went wrong. Please try again later.",
        SubmissionKind::International => "Failed to send emails.",
        SubmissionKind::Enquiry => "Internal server error",
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    #[error("malformed request body, {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("invalid submission, {0}")]
    Invalid(#[from] ValidationError),
    #[error("couldn't deliver notifications, {0}")]
    Dispatch(#[from] DispatchError),
}

/// A failed submission, tagged with its kind so the error body matches the
/// front-end's expectations.
#[derive(Debug)]
pub struct Rejection {
    pub kind: SubmissionKind,
    pub error: SubmissionError,
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let envelope = Envelope::of(self.kind);
        match self.error {
            SubmissionError::MalformedBody(e) => {
                tracing::warn!("malformed request body, {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    Json(envelope.error("Invalid request body")),
                )
            }
            SubmissionError::Invalid(e) => {
                tracing::warn!("{}", e);
                (StatusCode::BAD_REQUEST, Json(envelope.error(&e.to_string())))
            }
            SubmissionError::Dispatch(e) => {
                tracing::error!(error.cause_chain = ?e, "{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(envelope.error(failure_message(self.kind))),
                )
            }
        }
        .into_response()
    }
}

/// Handles any form: parse, sanitize, validate, notify, respond.
#[tracing::instrument(name = "Handling a form submission", skip(app_state, payload), fields(kind = %F::KIND))]
pub async fn submit<F: SubmissionForm>(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<F>, JsonRejection>,
) -> Result<Json<Value>, Rejection> {
    process(&app_state, payload)
        .await
        .map(|submission| Json(success_envelope(&submission)))
        .map_err(|error| Rejection {
            kind: F::KIND,
            error,
        })
}

async fn process<F: SubmissionForm>(
    app_state: &AppState,
    payload: Result<Json<F>, JsonRejection>,
) -> Result<ValidSubmission, SubmissionError> {
    let Json(form) = payload?;
    let submission = validate(form.into_submission())?;
    app_state.dispatcher.dispatch(&submission).await?;
    Ok(submission)
}
