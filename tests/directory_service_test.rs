mod common;

use std::sync::Arc;

use bson::oid::ObjectId;
use common::{agent, created_on, reported_user, user, with_email, InMemoryAgentRepository, InMemoryUserRepository};
use matrimony_admin::repository::user_repo::SortOrder;
use matrimony_admin::service::directory_service::{DashboardSummary, DirectoryService, DirectoryServiceImpl};
use matrimony_admin::util::error::ServiceError;

fn service() -> (DirectoryServiceImpl, ObjectId) {
    let mut referred = created_on(user("Meena"), 2024, 3, 1);
    referred.agent_ref_code = Some("SY2024".to_string());
    let users = vec![
        with_email(created_on(user("Asha"), 2024, 1, 1), "asha.rao@example.com"),
        referred,
        created_on(reported_user("Ravi", &["spam"]), 2024, 2, 1),
    ];
    let sunil = agent("Sunil", "SY2024");
    let sunil_id = sunil.id.unwrap();
    let agents = InMemoryAgentRepository { agents: vec![sunil, agent("Anita", "AN01")] };
    (
        DirectoryServiceImpl::new(InMemoryUserRepository::with_users(users), Arc::new(agents)),
        sunil_id,
    )
}

fn names<T>(items: &[T], name: impl Fn(&T) -> Option<&str>) -> Vec<String> {
    items.iter().filter_map(|i| name(i).map(str::to_string)).collect()
}

#[tokio::test]
async fn test_users_newest_first_by_default() {
    let (service, _) = service();
    let users = service.list_users(SortOrder::default(), None).await.unwrap();
    assert_eq!(names(&users, |u| u.name.as_deref()), vec!["Meena", "Ravi", "Asha"]);

    let users = service.list_users(SortOrder::Ascending, None).await.unwrap();
    assert_eq!(names(&users, |u| u.name.as_deref()), vec!["Asha", "Ravi", "Meena"]);
}

#[tokio::test]
async fn test_users_search_by_name_or_email() {
    let (service, _) = service();
    let users = service.list_users(SortOrder::default(), Some("RAVI".to_string())).await.unwrap();
    assert_eq!(names(&users, |u| u.name.as_deref()), vec!["Ravi"]);

    let users = service.list_users(SortOrder::default(), Some("rao@example".to_string())).await.unwrap();
    assert_eq!(names(&users, |u| u.name.as_deref()), vec!["Asha"]);

    assert!(service.list_users(SortOrder::default(), Some("nobody".to_string())).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_agents_sorted_by_name_and_fetchable() {
    let (service, sunil_id) = service();
    let agents = service.list_agents().await.unwrap();
    assert_eq!(names(&agents, |a| a.name.as_deref()), vec!["Anita", "Sunil"]);

    let sunil = service.get_agent(sunil_id).await.unwrap();
    assert_eq!(sunil.reference_code.as_deref(), Some("SY2024"));
    assert!(matches!(service.get_agent(ObjectId::new()).await, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_agent_referrals() {
    let (service, _) = service();
    let referred = service.list_agent_referrals(" SY2024 ".to_string()).await.unwrap();
    assert_eq!(names(&referred, |u| u.name.as_deref()), vec!["Meena"]);
    assert!(service.list_agent_referrals("NOPE".to_string()).await.unwrap().is_empty());
    assert!(matches!(
        service.list_agent_referrals("  ".to_string()).await,
        Err(ServiceError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_dashboard_summary() {
    let (service, _) = service();
    assert_eq!(
        service.dashboard_summary().await.unwrap(),
        DashboardSummary { user_count: 3, agent_count: 2, reported_user_count: 1 }
    );
}

#[tokio::test]
async fn test_get_missing_user() {
    let (service, _) = service();
    assert!(matches!(service.get_user(ObjectId::new()).await, Err(ServiceError::NotFound(_))));
}
