/// A rendered email, ready to be handed to a mail relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    /// Display name shown next to the configured sender address.
    pub sender_name: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}
