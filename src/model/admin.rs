use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Dashboard operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String, // "admin"
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
