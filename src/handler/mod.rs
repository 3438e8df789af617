pub mod agent_handler;
pub mod analytics_handler;
pub mod auth_handler;
pub mod extract;
pub mod moderation_handler;
pub mod user_handler;

use bson::oid::ObjectId;

use crate::util::error::HandlerError;

/// Parses a path segment as a document id, naming the entity in the error.
pub(crate) fn parse_object_id(raw: &str, entity: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw).map_err(|_| HandlerError::bad_request(format!("Invalid {} id", entity)))
}
