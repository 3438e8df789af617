use serde::Deserialize;
use validator::Validate;

use crate::model::report::ReportReason;
use crate::repository::user_repo::SortOrder;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListUsersQuery {
    pub order: Option<SortOrder>,
    /// Case-insensitive match on name or email.
    #[validate(length(max = 100))]
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 100))]
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UnverifyRequest {
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

/// Reasons to clear from a reported user. An empty list is accepted and
/// leaves the reasons untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct RemoveReasonsRequest {
    #[validate(length(max = 32))]
    pub reasons: Vec<ReportReason>,
}
