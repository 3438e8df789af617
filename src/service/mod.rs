pub mod admin_service;
pub mod analytics;
pub mod analytics_service;
pub mod directory_service;
pub mod moderation_service;
