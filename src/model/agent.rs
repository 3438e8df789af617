use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::lenient;

/// A referral agent. `referred_users` is the count the platform keeps on the
/// agent document; it is shown as stored, never recomputed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub phone_number: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub reference_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub dob: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub age: Option<i64>,
    /// Years of experience.
    #[serde(deserialize_with = "lenient::count")]
    pub experience: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub address_line1: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub address_line2: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub district: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub pincode: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub premium_users: Option<i64>,
    #[serde(rename = "totalNumberofUsers", deserialize_with = "lenient::count")]
    pub referred_users: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub display_picture_url: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub last_login_at: Option<DateTime<Utc>>,
}
