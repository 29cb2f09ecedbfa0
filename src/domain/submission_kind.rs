use super::validation::ShapeCheck;

/// Every form the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Lead,
    Newsletter,
    CourseInquiry,
    Registration,
    Support,
    International,
    /// The legacy course "enquri" form.
    Enquiry,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 7] = [
        SubmissionKind::Lead,
        SubmissionKind::Newsletter,
        SubmissionKind::CourseInquiry,
        SubmissionKind::Registration,
        SubmissionKind::Support,
        SubmissionKind::International,
        SubmissionKind::Enquiry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionKind::Lead => "lead",
            SubmissionKind::Newsletter => "newsletter",
            SubmissionKind::CourseInquiry => "course-inquiry",
            SubmissionKind::Registration => "registration",
            SubmissionKind::Support => "support",
            SubmissionKind::International => "international",
            SubmissionKind::Enquiry => "enquiry",
        }
    }

    /// Checked in this order; the first one missing is reported.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SubmissionKind::Lead => &["firstName", "lastName", "email", "phone"],
            SubmissionKind::Newsletter => &["email"],
            SubmissionKind::CourseInquiry => &["fullName", "email", "course"],
            SubmissionKind::Registration => &["name", "contact", "email", "whatsappNo"],
            SubmissionKind::Support => &["fullname", "email", "message"],
            SubmissionKind::International => &["name", "phone", "email"],
            SubmissionKind::Enquiry => &["username", "email", "phone", "coursename"],
        }
    }

    pub(crate) fn shape_checks(&self) -> &'static [ShapeCheck] {
        match self {
            SubmissionKind::Registration => &[
                ShapeCheck::SimpleEmail("email"),
                ShapeCheck::MobileNumber("contact"),
            ],
            SubmissionKind::International => &[ShapeCheck::StandardEmail("email")],
            _ => &[],
        }
    }

    /// Support tickets and legacy enquiries also go to the backup inbox.
    pub fn notifies_backup(&self) -> bool {
        matches!(self, SubmissionKind::Support | SubmissionKind::Enquiry)
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
