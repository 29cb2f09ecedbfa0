mod contact_email;
mod notification_message;
mod sanitize;
mod submission;
mod submission_kind;
mod validation;

pub use contact_email::ContactEmail;
pub use notification_message::NotificationMessage;
pub use sanitize::{sanitize, sanitize_text};
pub use submission::{Submission, ValidSubmission};
pub use submission_kind::SubmissionKind;
pub use validation::{ValidationError, validate};
