mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

use common::{
    agent, reported_user, user, with_email, InMemoryAdminRepository, InMemoryAgentRepository, InMemoryUserRepository,
};
use matrimony_admin::app::app::{build_router, Services};
use matrimony_admin::config::{JwtConfig, MessagingConfig};
use matrimony_admin::middlewares::admin_middleware::AdminAuthState;
use matrimony_admin::model::user::User;
use matrimony_admin::service::admin_service::{AdminService, AdminServiceImpl};
use matrimony_admin::service::analytics_service::AnalyticsServiceImpl;
use matrimony_admin::service::directory_service::DirectoryServiceImpl;
use matrimony_admin::service::moderation_service::ModerationServiceImpl;
use matrimony_admin::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, ADMIN_ROLE};
use matrimony_admin::util::messaging::MessageLinkBuilder;

struct TestApp {
    router: Router,
    jwt_utils: Arc<JwtTokenUtilsImpl>,
    users: Arc<InMemoryUserRepository>,
    services: Services,
}

impl TestApp {
    fn new(users: Vec<User>) -> Self {
        let users = InMemoryUserRepository::with_users(users);
        let agents = Arc::new(InMemoryAgentRepository { agents: vec![agent("Sunil", "SY2024")] });
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));
        let services = Services {
            admin: Arc::new(AdminServiceImpl::new(Arc::new(InMemoryAdminRepository::default()), jwt_utils.clone())),
            directory: Arc::new(DirectoryServiceImpl::new(users.clone(), agents)),
            moderation: Arc::new(ModerationServiceImpl::new(
                users.clone(),
                MessageLinkBuilder::new(MessagingConfig::default()),
            )),
            analytics: Arc::new(AnalyticsServiceImpl::new(users.clone())),
        };
        let router = build_router(&services, Arc::new(AdminAuthState { jwt_utils: jwt_utils.clone() }));
        TestApp { router, jwt_utils, users, services }
    }

    fn token(&self, role: &str) -> String {
        self.jwt_utils.generate_access_token("65f1c0ffee00000000000001", "ops@example.com", role).unwrap()
    }

    async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        self.send_raw(method, uri, token, body.map(|json| json.to_string())).await
    }

    async fn send_raw(&self, method: &str, uri: &str, token: Option<&str>, body: Option<String>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(raw) => {
                builder = builder.header("content-type", "application/json");
                Body::from(raw)
            }
            None => Body::empty(),
        };
        let resp = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new(vec![]);
    let (status, _) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let app = TestApp::new(vec![]);
    let (status, _) = app.send("GET", "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("GET", "/analytics/users", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("GET", "/agents", Some(&app.token("agent")), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send("GET", "/agents", Some(&app.token(ADMIN_ROLE)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["referenceCode"], "SY2024");
}

#[tokio::test]
async fn test_login_flow() {
    let app = TestApp::new(vec![]);
    app.services
        .admin
        .register("Ops".to_string(), "ops@example.com".to_string(), "s3cure-passw0rd".to_string())
        .await
        .unwrap();

    let (status, body) = app
        .send("POST", "/auth/login", None, Some(json!({"email": "ops@example.com", "password": "wrong-password"})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = app
        .send("POST", "/auth/login", None, Some(json!({"email": "ops@example.com", "password": "s3cure-passw0rd"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["tokens"]["access_token"].as_str().unwrap().to_string();

    let (status, _) = app.send("GET", "/analytics/summary", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_validates_payload() {
    let app = TestApp::new(vec![]);
    let (status, body) = app
        .send("POST", "/auth/login", None, Some(json!({"email": "not-an-email", "password": "s3cure-passw0rd"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation");
}

#[tokio::test]
async fn test_remove_reasons_endpoint() {
    let flagged = reported_user("Asha", &["spam", "harassment"]);
    let id = flagged.id.unwrap();
    let app = TestApp::new(vec![flagged]);
    let token = app.token(ADMIN_ROLE);

    let (status, body) = app
        .send("GET", &format!("/moderation/users/{}/reasons", id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["label"], "Spam");

    let (status, body) = app
        .send(
            "POST",
            &format!("/moderation/users/{}/reasons/remove", id),
            Some(&token),
            Some(json!({"reasons": ["spam"]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reportReason"], json!(["harassment"]));
    assert_eq!(body["reported"], true);
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let flagged = reported_user("Asha", &["spam"]);
    let id = flagged.id.unwrap();
    let app = TestApp::new(vec![flagged]);
    let token = app.token(ADMIN_ROLE);

    let (status, body) = app
        .send(
            "POST",
            &format!("/moderation/users/{}/reasons/remove", id),
            Some(&token),
            Some(json!({"reasons": "spam"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    assert_eq!(body["message"], "Malformed request body");

    let (status, body) = app
        .send_raw("PUT", &format!("/moderation/users/{}/unverify", id), Some(&token), Some(String::new()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, body) = app
        .send("PUT", &format!("/moderation/users/{}/unverify", id), Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, body) = app.send_raw("POST", "/auth/login", None, Some("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, body) = app.send("GET", "/users?order=sideways", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Malformed query string");

    assert_eq!(app.users.write_count().await, 0);
}

#[tokio::test]
async fn test_padded_tag_is_removed() {
    let flagged = reported_user("Asha", &["spam"]);
    let id = flagged.id.unwrap();
    let app = TestApp::new(vec![flagged]);

    let (status, body) = app
        .send(
            "POST",
            &format!("/moderation/users/{}/reasons/remove", id),
            Some(&app.token(ADMIN_ROLE)),
            Some(json!({"reasons": [" spam"]})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reportReason"], json!([]));
    assert_eq!(body["reported"], false);
}

#[tokio::test]
async fn test_search_users_and_reported_users() {
    let app = TestApp::new(vec![
        with_email(reported_user("Asha Rao", &["spam"]), "asha@example.com"),
        with_email(user("Ravi"), "ravi.k@example.com"),
        with_email(reported_user("Meena", &["harassment"]), "meena@mail.in"),
    ]);
    let token = app.token(ADMIN_ROLE);

    let (status, body) = app.send("GET", "/users?search=EXAMPLE.com", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app.send("GET", "/moderation/reported?search=meena", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Meena");

    let (status, body) = app.send("GET", "/moderation/reported?search=ravi", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let long = "a".repeat(101);
    let (status, body) = app.send("GET", &format!("/users?search={}", long), Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation");
}

#[tokio::test]
async fn test_verification_endpoints() {
    let member = user("Ravi");
    let id = member.id.unwrap();
    let app = TestApp::new(vec![member]);
    let token = app.token(ADMIN_ROLE);

    let (status, _) = app
        .send("PUT", &format!("/moderation/users/{}/unverify", id), Some(&token), Some(json!({"reason": "Fake"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app.send("PUT", &format!("/moderation/users/{}/verify", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["verifiedByAdmin"], true);
    assert!(body["notificationLink"].as_str().unwrap().contains("?text="));

    let (status, _) = app
        .send("PUT", &format!("/moderation/users/{}/unverify", id), Some(&token), Some(json!({"reason": ""})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send("PUT", &format!("/moderation/users/{}/unverify", id), Some(&token), Some(json!({"reason": "Fake photos"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["adminTexts"], "Fake photos");
}

#[tokio::test]
async fn test_delete_and_lookup() {
    let member = user("Ravi");
    let id = member.id.unwrap();
    let app = TestApp::new(vec![member]);
    let token = app.token(ADMIN_ROLE);

    let (status, _) = app.send("GET", "/users/not-an-id", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send("DELETE", &format!("/moderation/users/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.users.get(&id).await.is_none());

    let (status, body) = app.send("GET", &format!("/users/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_analytics_endpoint_shape() {
    let app = TestApp::new(vec![user("Asha"), user("Ravi")]);
    let (status, body) = app.send("GET", "/analytics/users", Some(&app.token(ADMIN_ROLE)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalUsers"], 2);
    assert_eq!(body["demographics"]["ageGroups"].as_array().unwrap().len(), 5);
    assert_eq!(body["physical"]["heights"].as_array().unwrap().len(), 60);
}
