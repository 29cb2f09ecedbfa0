use std::sync::Arc;

use super::templates::{self, Branding, RenderError};
use crate::{
    domain::{ContactEmail, SubmissionKind, ValidSubmission},
    email_client::{MailRelay, RelayError},
};

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("couldn't render the {0} emails, {1}")]
    Render(SubmissionKind, #[source] RenderError),
    #[error("couldn't send the admin notification, {0}")]
    AdminNotification(#[source] RelayError),
    #[error("admin was notified but the acknowledgment failed, {0}")]
    Acknowledgment(#[source] RelayError),
}

/// Turns a validated submission into two emails and sends them.
pub struct Dispatcher {
    relay: Arc<dyn MailRelay>,
    operators: Vec<ContactEmail>,
    backup: Option<ContactEmail>,
    branding: Branding,
}

impl Dispatcher {
    pub fn new(
        relay: Arc<dyn MailRelay>,
        operators: Vec<ContactEmail>,
        backup: Option<ContactEmail>,
        branding: Branding,
    ) -> Self {
        Self {
            relay,
            operators,
            backup,
            branding,
        }
    }

    fn admin_recipients(&self, kind: SubmissionKind) -> Vec<String> {
        let backup = self.backup.iter().filter(|_| kind.notifies_backup());
        backup
            .chain(self.operators.iter())
            .map(|address| address.as_ref().to_owned())
            .collect()
    }

    /// Sends the admin notification, then the acknowledgment.
    ///
    /// Both are rendered up front, so a template failure sends nothing. A
    /// failed admin send stops before the acknowledgment. Nothing is retried.
    #[tracing::instrument(
        name = "Dispatching notifications",
        skip(self, submission),
        fields(
            kind = %submission.kind(),
            submitter_email = %submission.email()
        )
    )]
    pub async fn dispatch(&self, submission: &ValidSubmission) -> Result<(), DispatchError> {
        let kind = submission.kind();
        let admin = templates::admin_notification(
            submission,
            self.admin_recipients(kind),
            &self.branding,
        )
        .map_err(|e| DispatchError::Render(kind, e))?;
        let acknowledgment = templates::acknowledgment(submission, &self.branding)
            .map_err(|e| DispatchError::Render(kind, e))?;

        self.relay
            .send(&admin)
            .await
            .map_err(DispatchError::AdminNotification)?;
        tracing::info!("Admin notification sent");

        self.relay
            .send(&acknowledgment)
            .await
            .map_err(DispatchError::Acknowledgment)?;
        tracing::info!("Acknowledgment sent");

        Ok(())
    }
}
