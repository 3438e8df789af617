pub mod admin_repo;
pub mod agent_repo;
pub mod mongo;
pub mod repository_error;
pub mod user_repo;
