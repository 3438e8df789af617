pub mod agent_router;
pub mod analytics_router;
pub mod auth_router;
pub mod moderation_router;
pub mod user_router;
