use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::lenient;
use crate::model::report::ReportReason;

/// A member profile from the platform's `users` collection.
///
/// Profiles are created by the user-facing app; this service only reads
/// them and touches the moderation fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: Option<String>,

    #[serde(deserialize_with = "lenient::date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::allow_listed")]
    pub sex: Option<Sex>,
    #[serde(deserialize_with = "lenient::allow_listed")]
    pub manglic: Option<Manglic>,

    #[serde(deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub district: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub region: Option<String>,

    #[serde(deserialize_with = "lenient::allow_listed")]
    pub highest_qualification: Option<Qualification>,
    #[serde(deserialize_with = "lenient::allow_listed")]
    pub employment_status: Option<EmploymentStatus>,

    /// Stored as `"<feet> ft and <inches> inches"`.
    #[serde(deserialize_with = "lenient::string")]
    pub height: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub complexion: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub blood_group: Option<String>,

    #[serde(deserialize_with = "lenient::flag")]
    pub reported: bool,
    #[serde(deserialize_with = "lenient::reasons")]
    pub report_reason: Vec<ReportReason>,
    #[serde(deserialize_with = "lenient::flag")]
    pub verified_by_admin: bool,
    /// Operator's reason for the last unverification.
    #[serde(deserialize_with = "lenient::string")]
    pub admin_texts: Option<String>,

    /// Reference code of the agent who referred this user.
    #[serde(deserialize_with = "lenient::string")]
    pub agent_ref_code: Option<String>,

    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Where a profile sits in the operator verification flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum VerificationState {
    Unverified,
    Verified,
    UnverifiedWithReason { reason: String },
}

impl User {
    pub fn verification_state(&self) -> VerificationState {
        if self.verified_by_admin {
            return VerificationState::Verified;
        }
        match self.admin_texts.as_deref().map(str::trim) {
            Some(reason) if !reason.is_empty() => VerificationState::UnverifiedWithReason {
                reason: reason.to_string(),
            },
            _ => VerificationState::Unverified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Manglic {
    Yes,
    No,
}

impl Manglic {
    pub const ALL: [Manglic; 2] = [Manglic::Yes, Manglic::No];

    pub fn as_str(&self) -> &'static str {
        match self {
            Manglic::Yes => "Yes",
            Manglic::No => "No",
        }
    }
}

impl FromStr for Manglic {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Manglic::Yes),
            "No" => Ok(Manglic::No),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Qualification {
    TenthPass,
    TwelfthPass,
    Graduate,
    PostGraduate,
}

impl Qualification {
    pub const ALL: [Qualification; 4] = [
        Qualification::TenthPass,
        Qualification::TwelfthPass,
        Qualification::Graduate,
        Qualification::PostGraduate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Qualification::TenthPass => "tenthPass",
            Qualification::TwelfthPass => "twelfthPass",
            Qualification::Graduate => "graduate",
            Qualification::PostGraduate => "postGraduate",
        }
    }
}

impl FromStr for Qualification {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Qualification::ALL.into_iter().find(|q| q.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EmploymentStatus {
    Unemployed,
    Employed,
    Student,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 3] = [
        EmploymentStatus::Unemployed,
        EmploymentStatus::Employed,
        EmploymentStatus::Student,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::Student => "student",
        }
    }
}

impl FromStr for EmploymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmploymentStatus::ALL.into_iter().find(|e| e.as_str() == s).ok_or(())
    }
}
