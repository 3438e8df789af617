use serde::{Deserialize, Serialize};

/// A moderation flag attached to a user by other members of the platform.
///
/// Tags outside the known set are kept verbatim in `Other` so that removing
/// them still works and they can be shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportReason {
    FakeProfile,
    Harassment,
    InappropriateContent,
    Spam,
    Other(String),
}

impl ReportReason {
    /// The tag as stored in the `reportReason` array.
    pub fn as_str(&self) -> &str {
        match self {
            ReportReason::FakeProfile => "fakeProfile",
            ReportReason::Harassment => "harassment",
            ReportReason::InappropriateContent => "inappropriateContent",
            ReportReason::Spam => "spam",
            ReportReason::Other(tag) => tag,
        }
    }

    pub fn details(&self) -> ReasonDetails {
        let (label, description) = match self {
            ReportReason::FakeProfile => (
                "Fake Profile",
                "Account suspected of impersonation or false identity",
            ),
            ReportReason::Harassment => (
                "Harassment",
                "Reported for harassing behavior or bullying",
            ),
            ReportReason::InappropriateContent => (
                "Inappropriate Content",
                "Posted content that violates community guidelines",
            ),
            ReportReason::Spam => (
                "Spam",
                "Excessive or unwanted promotional content",
            ),
            ReportReason::Other(tag) => (tag.as_str(), "Other reported behavior"),
        };
        ReasonDetails {
            tag: self.clone(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

impl From<String> for ReportReason {
    fn from(tag: String) -> Self {
        match tag.trim() {
            "fakeProfile" => ReportReason::FakeProfile,
            "harassment" => ReportReason::Harassment,
            "inappropriateContent" => ReportReason::InappropriateContent,
            "spam" => ReportReason::Spam,
            other => ReportReason::Other(other.to_string()),
        }
    }
}

impl From<ReportReason> for String {
    fn from(reason: ReportReason) -> Self {
        match reason {
            ReportReason::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ReportReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-facing label and description for a report reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonDetails {
    pub tag: ReportReason,
    pub label: String,
    pub description: String,
}
