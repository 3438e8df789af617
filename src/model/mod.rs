pub mod admin;
pub mod agent;
pub mod lenient;
pub mod report;
pub mod user;
