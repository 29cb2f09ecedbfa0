use chrono::{Datelike, Utc};
use rinja_axum::Template;

use crate::domain::{NotificationMessage, SubmissionKind, ValidSubmission};

pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Organisation details shown in every email.
#[derive(Debug, Clone)]
pub struct Branding {
    pub organisation: String,
    pub website_url: String,
}

#[derive(Template)]
#[template(path = "emails/admin_notification.html")]
struct AdminNotificationTemplate<'a> {
    heading: &'a str,
    rows: Vec<(&'static str, &'a str)>,
    reply_to: &'a str,
    organisation: &'a str,
    year: i32,
}

#[derive(Template)]
#[template(path = "emails/acknowledgment.html")]
struct AcknowledgmentTemplate<'a> {
    greeting: &'a str,
    paragraphs: &'a [String],
    echoed_message: Option<&'a str>,
    website_url: &'a str,
    organisation: &'a str,
    year: i32,
}

fn label(field: &str) -> &str {
    match field {
        "firstName" => "First name",
        "lastName" | "last" => "Last name",
        "fullName" | "fullname" => "Full name",
        "name" | "username" => "Name",
        "email" => "Email",
        "phone" => "Phone",
        "contact" => "Contact",
        "whatsappNo" => "WhatsApp",
        "course" | "coursename" => "Course",
        "address" => "Address",
        "stream" => "Stream",
        "passout" => "Passout year",
        "subject" => "Subject",
        "message" => "Message",
        other => other,
    }
}

/// How the submitter is addressed, e.g. "Ursula Le Guin".
fn display_name(submission: &ValidSubmission) -> String {
    let parts: &[&str] = match submission.kind() {
        SubmissionKind::Lead => &["firstName", "lastName"],
        SubmissionKind::Newsletter => &["email"],
        SubmissionKind::CourseInquiry => &["fullName"],
        SubmissionKind::Registration | SubmissionKind::International => &["name"],
        SubmissionKind::Support => &["fullname"],
        SubmissionKind::Enquiry => &["username", "last"],
    };
    parts
        .iter()
        .filter_map(|field| submission.get(field))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the operator-facing summary of every submitted field.
pub fn admin_notification(
    submission: &ValidSubmission,
    recipients: Vec<String>,
    branding: &Branding,
) -> Result<NotificationMessage, RenderError> {
    let name = display_name(submission);
    let org = &branding.organisation;
    let (sender_name, subject, heading) = match submission.kind() {
        SubmissionKind::Lead => (
            format!("{} Contact", org),
            format!("📩 New Contact from {}", name),
            "New Lead Received",
        ),
        SubmissionKind::Newsletter => (
            format!("{} Newsletter", org),
            format!("📬 New Newsletter Subscription: {}", name),
            "New Newsletter Subscriber",
        ),
        SubmissionKind::CourseInquiry => (
            format!("{} Courses", org),
            format!(
                "🎓 Course Inquiry: {} from {}",
                submission.get_or("course", ""),
                name
            ),
            "New Course Inquiry",
        ),
        SubmissionKind::Registration => (
            format!("{} Registrations", org),
            format!("📝 New Registration from {}", name),
            "New Registration",
        ),
        SubmissionKind::Support => (
            format!("{} Support", org),
            format!(
                "{} from {}",
                submission.get_or("subject", "New Support Form Submission"),
                name
            ),
            "New Support Form Submission",
        ),
        SubmissionKind::International => (
            "International Certification".to_string(),
            format!("New International Form Submission from {}", name),
            "New International Form Submission",
        ),
        SubmissionKind::Enquiry => (
            format!("{} Enquiries", org),
            format!("📩 New Course Inquiry Received from {}", name),
            "New Inquiry Details",
        ),
    };

    let rows: Vec<_> = submission
        .fields()
        .map(|(field, value)| (label(field), value))
        .collect();
    let text_body = rows
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n");
    let html_body = AdminNotificationTemplate {
        heading,
        rows,
        reply_to: submission.email(),
        organisation: org,
        year: Utc::now().year(),
    }
    .render()?;

    Ok(NotificationMessage {
        sender_name,
        to: recipients,
        reply_to: Some(submission.email().to_owned()),
        subject,
        html_body,
        text_body: format!("{}\n\n{}", heading, text_body),
    })
}

/// Renders the auto-reply sent back to the submitter.
pub fn acknowledgment(
    submission: &ValidSubmission,
    branding: &Branding,
) -> Result<NotificationMessage, RenderError> {
    let name = display_name(submission);
    let org = &branding.organisation;
    let mut sender_name = format!("{} Team", org);
    let mut echoed_message = None;

    let (subject, greeting, paragraphs) = match submission.kind() {
        SubmissionKind::Lead => {
            echoed_message = Some(submission.get_or("message", "No message provided."));
            (
                format!("✅ Thanks for contacting {}", org),
                format!("Hi {},", submission.get_or("firstName", "there")),
                vec![
                    "Thanks for reaching out! We've received your message and our team will respond within 24 hours.".to_string(),
                ],
            )
        }
        SubmissionKind::Newsletter => (
            format!("🎉 Welcome to the {} Newsletter!", org),
            "Welcome aboard! 🎉".to_string(),
            vec![
                "Hi there! You've successfully subscribed to our newsletter. Stay tuned for updates, tips, and exciting offers!".to_string(),
            ],
        ),
        SubmissionKind::CourseInquiry => (
            "📘 Your course inquiry has been received".to_string(),
            format!("Hi {},", name),
            vec![format!(
                "Thanks for showing interest in our {} program. Our team will reach out soon with details.",
                submission.get_or("course", "")
            )],
        ),
        SubmissionKind::Registration => (
            "✅ Registration received".to_string(),
            format!("Hi {},", name),
            vec![
                "Thank you for registering with us. Your details have been received and our team will contact you shortly.".to_string(),
                format!(
                    "We will reach you on WhatsApp at {}.",
                    submission.get_or("whatsappNo", "")
                ),
            ],
        ),
        SubmissionKind::Support => {
            echoed_message = submission.get("message");
            (
                "Thank you for contacting us!".to_string(),
                format!("Dear {},", name),
                vec![
                    "Thank you for reaching out to us. We've received your message and will get back to you as soon as possible.".to_string(),
                ],
            )
        }
        SubmissionKind::International => {
            sender_name = "International Certification".to_string();
            (
                "Thank you for your submission".to_string(),
                format!("Hello {},", name),
                vec![
                    "Thank you for submitting the International Certification form.".to_string(),
                    "We appreciate your interest and will connect with you soon with more information.".to_string(),
                ],
            )
        }
        SubmissionKind::Enquiry => (
            "✅ Inquiry Received – Thank You!".to_string(),
            format!("Hi {}", name),
            vec![
                format!(
                    "Thank you for reaching out about {}. We've received your inquiry and will get back to you shortly.",
                    submission.get_or("coursename", "")
                ),
                "If you have any urgent questions, feel free to reply to this email.".to_string(),
            ],
        ),
    };

    let html_body = AcknowledgmentTemplate {
        greeting: &greeting,
        paragraphs: &paragraphs,
        echoed_message,
        website_url: &branding.website_url,
        organisation: org,
        year: Utc::now().year(),
    }
    .render()?;

    let mut text_body = format!("{}\n\n{}", greeting, paragraphs.join("\n\n"));
    if let Some(message) = echoed_message {
        text_body.push_str(&format!("\n\nYour message:\n{}", message));
    }
    text_body.push_str(&format!("\n\nBest regards,\nThe {} Team", org));

    Ok(NotificationMessage {
        sender_name,
        to: vec![submission.email().to_owned()],
        reply_to: None,
        subject,
        html_body,
        text_body,
    })
}
