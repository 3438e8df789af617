#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{TimeZone, Utc};
use tokio::sync::Mutex;

use matrimony_admin::model::admin::Admin;
use matrimony_admin::model::agent::Agent;
use matrimony_admin::model::report::ReportReason;
use matrimony_admin::model::user::User;
use matrimony_admin::repository::admin_repo::AdminRepository;
use matrimony_admin::repository::agent_repo::AgentRepository;
use matrimony_admin::repository::repository_error::{RepositoryError, RepositoryResult};
use matrimony_admin::repository::user_repo::{SortOrder, UserRepository};

/// Users kept in memory. With `fail_writes` set every update and delete
/// fails the way a dropped connection would.
#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<Vec<User>>,
    pub fail_writes: bool,
    pub writes: Mutex<u32>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        Arc::new(InMemoryUserRepository { users: Mutex::new(users), ..Default::default() })
    }

    pub fn failing(users: Vec<User>) -> Arc<Self> {
        Arc::new(InMemoryUserRepository { users: Mutex::new(users), fail_writes: true, ..Default::default() })
    }

    pub async fn get(&self, id: &ObjectId) -> Option<User> {
        self.users.lock().await.iter().find(|u| u.id.as_ref() == Some(id)).cloned()
    }

    pub async fn write_count(&self) -> u32 {
        *self.writes.lock().await
    }

    async fn update<F: FnOnce(&mut User)>(&self, id: &ObjectId, apply: F) -> RepositoryResult<()> {
        if self.fail_writes {
            return Err(RepositoryError::ConnectionError("connection reset".to_string()));
        }
        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|u| u.id.as_ref() == Some(id))
            .ok_or_else(|| RepositoryError::not_found(format!("No user found to update for ID: {}", id)))?;
        apply(user);
        *self.writes.lock().await += 1;
        Ok(())
    }
}

/// Same rule as the Mongo `$regex` filter: trimmed, case-insensitive,
/// substring of `name` or `email`.
fn matches_search(user: &User, search: Option<&str>) -> bool {
    let term = match search.map(str::trim).filter(|t| !t.is_empty()) {
        Some(term) => term.to_lowercase(),
        None => return true,
    };
    [&user.name, &user.email]
        .iter()
        .any(|field| field.as_deref().is_some_and(|v| v.to_lowercase().contains(&term)))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, order: SortOrder, search: Option<&str>) -> RepositoryResult<Vec<User>> {
        let mut users: Vec<User> = self
            .users
            .lock()
            .await
            .iter()
            .filter(|u| matches_search(u, search))
            .cloned()
            .collect();
        users.sort_by_key(|u| u.created_at);
        if order == SortOrder::Descending {
            users.reverse();
        }
        Ok(users)
    }

    async fn list_reported(&self, search: Option<&str>) -> RepositoryResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|u| u.reported && matches_search(u, search))
            .cloned()
            .collect())
    }

    async fn list_by_agent_ref_code(&self, reference_code: &str) -> RepositoryResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .await
            .iter()
            .filter(|u| u.agent_ref_code.as_deref() == Some(reference_code))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        Ok(self.get(id).await)
    }

    async fn set_verification(&self, id: &ObjectId, verified: bool, admin_texts: &str) -> RepositoryResult<()> {
        let admin_texts = admin_texts.to_string();
        self.update(id, move |u| {
            u.verified_by_admin = verified;
            u.admin_texts = Some(admin_texts).filter(|t| !t.is_empty());
        })
        .await
    }

    async fn set_report_status(&self, id: &ObjectId, reasons: &[ReportReason], reported: bool) -> RepositoryResult<()> {
        let reasons = reasons.to_vec();
        self.update(id, move |u| {
            u.report_reason = reasons;
            u.reported = reported;
        })
        .await
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        if self.fail_writes {
            return Err(RepositoryError::ConnectionError("connection reset".to_string()));
        }
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|u| u.id.as_ref() != Some(id));
        if users.len() == before {
            return Err(RepositoryError::not_found(format!("No user found to delete for ID: {}", id)));
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.users.lock().await.len() as u64)
    }

    async fn count_reported(&self) -> RepositoryResult<u64> {
        Ok(self.users.lock().await.iter().filter(|u| u.reported).count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryAgentRepository {
    pub agents: Vec<Agent>,
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn list(&self) -> RepositoryResult<Vec<Agent>> {
        let mut agents = self.agents.clone();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(agents)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Agent>> {
        Ok(self.agents.iter().find(|a| a.id.as_ref() == Some(id)).cloned())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.agents.len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryAdminRepository {
    pub admins: Mutex<Vec<Admin>>,
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn insert(&self, mut admin: Admin) -> RepositoryResult<Admin> {
        admin.id = Some(ObjectId::new());
        admin.created_at = Some(Utc::now().to_rfc3339());
        self.admins.lock().await.push(admin.clone());
        Ok(admin)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Admin>> {
        Ok(self.admins.lock().await.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Admin>> {
        Ok(self.admins.lock().await.iter().find(|a| a.id.as_ref() == Some(id)).cloned())
    }
}

pub fn user(name: &str) -> User {
    User {
        id: Some(ObjectId::new()),
        name: Some(name.to_string()),
        phone: Some("+91 98765 43210".to_string()),
        ..User::default()
    }
}

pub fn with_email(mut user: User, email: &str) -> User {
    user.email = Some(email.to_string());
    user
}

pub fn reported_user(name: &str, tags: &[&str]) -> User {
    User {
        reported: !tags.is_empty(),
        report_reason: tags.iter().map(|t| ReportReason::from(t.to_string())).collect(),
        ..user(name)
    }
}

pub fn created_on(mut user: User, year: i32, month: u32, day: u32) -> User {
    user.created_at = Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).single();
    user
}

pub fn agent(name: &str, code: &str) -> Agent {
    Agent {
        id: Some(ObjectId::new()),
        name: Some(name.to_string()),
        reference_code: Some(code.to_string()),
        ..Agent::default()
    }
}
