//! Mock backend tests for the casedesk library.
//!
//! These tests use wiremock to stand in for the case-management API and
//! exercise the gateway's token handling, the wrappers and the stores.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use casedesk::auth::{ACCESS_TOKEN_KEY, AccessToken, REFRESH_TOKEN_KEY, RefreshToken};
use casedesk::error::{AuthError, Error, TransportError};
use casedesk::gateway::{ApiRequest, FilePart};
use casedesk::models::{
    CaseStatus, CaseUpdate, DocumentType, DocumentUpload, ListParams, NewCase, CaseType,
};
use casedesk::router::RouteName;
use casedesk::{
    ApiUrl, Client, ClientConfig, CredentialStore, Credentials, Gateway, MemoryStore, Navigation,
    Navigator, Router, SessionContext,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

/// Navigator that records every request it receives.
#[derive(Debug, Default)]
struct RecordingNavigator {
    calls: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    fn calls(&self) -> Vec<Navigation> {
        self.calls.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, to: Navigation) {
        self.calls.lock().unwrap().push(to);
    }
}

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(mock_api_url(server)).with_timeout(Duration::from_secs(5))
}

fn store_with(access: Option<&str>, refresh: Option<&str>) -> Arc<MemoryStore> {
    let mut entries = Vec::new();
    if let Some(access) = access {
        entries.push((ACCESS_TOKEN_KEY, access));
    }
    if let Some(refresh) = refresh {
        entries.push((REFRESH_TOKEN_KEY, refresh));
    }
    Arc::new(MemoryStore::with_entries(entries))
}

struct Harness {
    client: Client,
    store: Arc<MemoryStore>,
    navigator: Arc<RecordingNavigator>,
}

impl Harness {
    fn new(server: &MockServer, access: Option<&str>, refresh: Option<&str>) -> Self {
        Self::with_config(mock_config(server), access, refresh)
    }

    fn with_config(config: ClientConfig, access: Option<&str>, refresh: Option<&str>) -> Self {
        let store = store_with(access, refresh);
        let navigator = Arc::new(RecordingNavigator::default());
        let client = Client::restore(&config, store.clone(), navigator.clone()).unwrap();
        Self {
            client,
            store,
            navigator,
        }
    }

    fn gateway(&self) -> &Gateway {
        self.client.gateway()
    }

    fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap()
    }

    fn login_redirects(&self) -> usize {
        self.navigator
            .calls()
            .iter()
            .filter(|n| **n == Navigation::Login)
            .count()
    }
}

fn case_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "case_number": format!("CIV-2024-{:03}", id),
        "case_prefix": "CIV",
        "case_type": "civil",
        "title": title,
        "case_status": "new",
        "open_date": "2024-02-10",
        "tags": [],
        "created_at": "2024-02-10T08:00:00",
        "updated_at": "2024-02-10T08:00:00"
    })
}

fn page_json(items: Vec<Value>, page: u32, size: u32, total: u64) -> Value {
    let pages = total.div_ceil(u64::from(size));
    json!({
        "items": items,
        "total": total,
        "page": page,
        "size": size,
        "pages": pages
    })
}

fn user_json(role: &str) -> Value {
    json!({
        "id": 1,
        "username": "clerk",
        "email": "clerk@example.org",
        "full_name": "Court Clerk",
        "role": role,
        "is_active": true,
        "created_at": "2024-01-05T09:00:00",
        "last_login": null
    })
}

fn document_json(id: i64) -> Value {
    json!({
        "id": id,
        "case_id": 1,
        "document_type": "lawsuit",
        "tags": [],
        "is_template": false,
        "file_name": "20240301_claim.pdf",
        "original_file_name": "claim.pdf",
        "file_path": "documents/case_1/20240301_claim.pdf",
        "file_size": 1024,
        "file_format": "pdf",
        "upload_date": "2024-03-01T09:00:00",
        "ocr_text": null,
        "version": 1,
        "created_at": "2024-03-01T09:00:00"
    })
}

// ============================================================================
// Outbound Authorization Header
// ============================================================================

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 1, 20, 0)))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, None, None);
    harness
        .gateway()
        .json::<Value>(ApiRequest::get("/api/cases"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_bearer_attached_exactly_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/persons"))
        .and(header("authorization", "Bearer C"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 1, 20, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("C"), Some("R"));
    harness
        .gateway()
        .json::<Value>(ApiRequest::get("/api/persons"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].headers.get_all("authorization").iter().count(), 1);
}

// ============================================================================
// Renewal And Retry
// ============================================================================

#[tokio::test]
async fn test_expired_token_is_renewed_and_request_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Could not validate credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refresh_token": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![case_json(1, "Lease dispute")], 1, 20, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let page = harness
        .client
        .api()
        .cases()
        .list(&ListParams::new())
        .await
        .unwrap();

    assert_eq!(page.items[0].title, "Lease dispute");
    assert_eq!(harness.stored(ACCESS_TOKEN_KEY).as_deref(), Some("A2"));
    assert_eq!(harness.stored(REFRESH_TOKEN_KEY).as_deref(), Some("R1"));
    assert_eq!(
        harness.client.session().access_token(),
        Some(AccessToken::new("A2"))
    );
    assert!(harness.navigator.calls().is_empty());
}

#[tokio::test]
async fn test_retry_that_fails_again_is_not_renewed_twice() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases/5"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let err = harness.client.api().cases().get(5).await.unwrap_err();

    assert!(err.is_unauthorized());
    // the retry's 401 is returned as is, no teardown
    assert!(harness.client.session().is_authenticated());
    assert_eq!(harness.login_redirects(), 0);
}

#[tokio::test]
async fn test_unauthorized_without_refresh_token_tears_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/documents"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), None);
    let err = harness
        .client
        .api()
        .documents()
        .list(&ListParams::new())
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!harness.client.session().is_authenticated());
    assert_eq!(harness.stored(ACCESS_TOKEN_KEY), None);
    assert_eq!(harness.stored(REFRESH_TOKEN_KEY), None);
    assert_eq!(harness.navigator.calls(), vec![Navigation::Login]);
}

#[tokio::test]
async fn test_failed_renewal_tears_down_and_reports_renewal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Refresh token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let err = harness
        .client
        .api()
        .events()
        .list(&ListParams::new())
        .await
        .unwrap_err();

    match &err {
        Error::Auth(AuthError::RenewalFailed { source }) => {
            assert_eq!(
                source.as_api().and_then(|e| e.detail()),
                Some("Refresh token expired")
            );
        }
        other => panic!("expected renewal failure, got {:?}", other),
    }
    assert_eq!(err.user_message("Failed to load events"), "Refresh token expired");

    assert!(!harness.client.session().is_authenticated());
    assert_eq!(harness.stored(ACCESS_TOKEN_KEY), None);
    assert_eq!(harness.stored(REFRESH_TOKEN_KEY), None);
    assert_eq!(harness.login_redirects(), 1);
}

#[tokio::test]
async fn test_refresh_endpoint_unauthorized_is_not_renewed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let err = harness
        .client
        .api()
        .auth()
        .refresh(&RefreshToken::new("R1"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!harness.client.session().is_authenticated());
    assert_eq!(harness.login_redirects(), 1);
}

#[tokio::test]
async fn test_server_errors_pass_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Case 9 not found"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let err = harness.client.api().cases().get(9).await.unwrap_err();

    assert_eq!(err.as_api().map(|e| e.status), Some(404));
    assert!(harness.client.session().is_authenticated());
}

#[tokio::test]
async fn test_timeout_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![], 1, 20, 0))
                .set_delay(Duration::from_millis(800)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(0)
        .mount(&server)
        .await;

    let config = mock_config(&server).with_timeout(Duration::from_millis(100));
    let harness = Harness::with_config(config, Some("A1"), Some("R1"));
    let err = harness
        .client
        .api()
        .cases()
        .list(&ListParams::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Transport(TransportError::Timeout { duration_ms: 100 })
    ));
    assert!(harness.client.session().is_authenticated());
    assert!(harness.navigator.calls().is_empty());
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let server = MockServer::start().await;
    let config = mock_config(&server);
    drop(server);

    let harness = Harness::with_config(config, Some("A1"), Some("R1"));
    let err = harness.client.api().cases().get(1).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(harness.client.session().is_authenticated());
}

#[tokio::test]
async fn test_concurrent_unauthorized_requests_share_one_renewal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "A2"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![], 1, 20, 0)))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let gateway = harness.gateway().clone();

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.json::<Value>(ApiRequest::get("/api/cases")).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(harness.stored(ACCESS_TOKEN_KEY).as_deref(), Some("A2"));
    assert!(harness.navigator.calls().is_empty());
}

#[tokio::test]
async fn test_teardown_moves_router_to_login() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases/3"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = SessionContext::restore(store_with(Some("A1"), None)).unwrap();
    let router = Arc::new(Router::new(session.clone()));
    let client = Client::new(&mock_config(&server), session, router.clone());

    assert_eq!(router.push("/cases/3").name, RouteName::CaseDetail);

    let _ = client.api().cases().get(3).await;

    let current = router.current().unwrap();
    assert_eq!(current.name, RouteName::Login);
}

// ============================================================================
// Auth Store
// ============================================================================

#[tokio::test]
async fn test_login_persists_tokens_and_loads_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("username=clerk"))
        .and(body_string_contains("password=s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R1",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("admin")))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, None, None);
    let mut auth = harness.client.auth_store();
    auth.login(&Credentials::new("clerk", "s3cret")).await.unwrap();

    assert!(auth.is_authenticated());
    assert!(auth.is_admin());
    assert_eq!(auth.user().map(|u| u.username), Some("clerk".to_string()));
    assert_eq!(harness.stored(ACCESS_TOKEN_KEY).as_deref(), Some("A1"));
    assert_eq!(harness.stored(REFRESH_TOKEN_KEY).as_deref(), Some("R1"));
    assert!(auth.error().is_none());
}

#[tokio::test]
async fn test_login_failure_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("username=clerk"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Incorrect username or password"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("username=ghost"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, None, None);
    let mut auth = harness.client.auth_store();

    assert!(auth.login(&Credentials::new("clerk", "bad")).await.is_err());
    assert_eq!(auth.error(), Some("Incorrect username or password"));
    assert!(!auth.is_authenticated());

    assert!(auth.login(&Credentials::new("ghost", "bad")).await.is_err());
    assert_eq!(auth.error(), Some("Login failed"));
}

#[tokio::test]
async fn test_logout_without_session_is_a_no_op() {
    let server = MockServer::start().await;

    let harness = Harness::new(&server, None, None);
    let mut auth = harness.client.auth_store();

    auth.logout().await;
    auth.logout().await;

    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(!auth.is_authenticated());
    assert!(harness.navigator.calls().is_empty());
}

#[tokio::test]
async fn test_logout_ignores_backend_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut auth = harness.client.auth_store();

    auth.logout().await;
    auth.logout().await;

    assert!(!auth.is_authenticated());
    assert_eq!(harness.stored(ACCESS_TOKEN_KEY), None);
    assert_eq!(harness.stored(REFRESH_TOKEN_KEY), None);
    assert!(!auth.state().loading);
}

#[tokio::test]
async fn test_check_auth_without_token_makes_no_request() {
    let server = MockServer::start().await;

    let harness = Harness::new(&server, None, None);
    let mut auth = harness.client.auth_store();

    assert!(!auth.check_auth().await);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_check_auth_failure_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut auth = harness.client.auth_store();

    assert!(!auth.check_auth().await);
    assert!(!auth.is_authenticated());
    assert_eq!(harness.stored(ACCESS_TOKEN_KEY), None);
}

#[tokio::test]
async fn test_refresh_access_token_requires_refresh_token() {
    let server = MockServer::start().await;

    let harness = Harness::new(&server, Some("A1"), None);
    let mut auth = harness.client.auth_store();

    let err = auth.refresh_access_token().await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::NoRefreshToken)));
    // nothing was torn down
    assert!(auth.is_authenticated());
}

#[tokio::test]
async fn test_refresh_access_token_failure_logs_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut auth = harness.client.auth_store();

    assert!(auth.refresh_access_token().await.is_err());
    assert!(!auth.is_authenticated());
    assert_eq!(harness.stored(REFRESH_TOKEN_KEY), None);
}

#[tokio::test]
async fn test_refresh_access_token_rejected_renews_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Token expired"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut auth = harness.client.auth_store();

    assert!(auth.refresh_access_token().await.is_err());
    assert!(!auth.is_authenticated());
    assert_eq!(harness.stored(ACCESS_TOKEN_KEY), None);
    assert_eq!(harness.stored(REFRESH_TOKEN_KEY), None);
    assert_eq!(harness.login_redirects(), 0);
}

// ============================================================================
// Resource Stores
// ============================================================================

#[tokio::test]
async fn test_cases_store_fetch_uses_store_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .and(query_param("page", "3"))
        .and(query_param("size", "20"))
        .and(query_param("case_status", "in_progress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![case_json(41, "Appeal"), case_json(42, "Eviction")],
            3,
            20,
            42,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut cases = harness.client.cases_store();
    cases.set_page(3);

    cases
        .fetch(ListParams::new().filter("case_status", "in_progress"))
        .await
        .unwrap();

    assert_eq!(cases.items().len(), 2);
    let pagination = cases.pagination();
    assert_eq!((pagination.page, pagination.total, pagination.pages), (3, 42, 3));
    assert!(!cases.is_loading());
}

#[tokio::test]
async fn test_cases_store_create_update_delete() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(vec![case_json(1, "Lease dispute")], 1, 20, 1)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cases"))
        .respond_with(ResponseTemplate::new(201).set_body_json(case_json(2, "Debt recovery")))
        .expect(1)
        .mount(&server)
        .await;

    let mut updated = case_json(1, "Lease dispute");
    updated["case_status"] = json!("closed");
    Mock::given(method("PUT"))
        .and(path("/api/cases/1"))
        .and(body_json(json!({"case_status": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/cases/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json(1, "Lease dispute")))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/cases/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut cases = harness.client.cases_store();

    cases.fetch(ListParams::new()).await.unwrap();
    cases.fetch_one(1).await.unwrap();

    let new_case = NewCase::new(
        "CIV",
        CaseType::Civil,
        "Debt recovery",
        chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    );
    cases.create(&new_case).await.unwrap();
    assert_eq!(cases.items()[0].id, 2);

    let update = CaseUpdate {
        case_status: Some(CaseStatus::Closed),
        ..Default::default()
    };
    cases.update(1, &update).await.unwrap();
    assert_eq!(cases.items()[1].case_status, CaseStatus::Closed);
    assert_eq!(cases.current().map(|c| c.case_status), Some(CaseStatus::Closed));

    cases.delete(2).await.unwrap();
    assert_eq!(cases.items().len(), 1);
    assert_eq!(cases.items()[0].id, 1);
}

#[tokio::test]
async fn test_store_records_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/persons/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Person 77 not found"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/persons"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut persons = harness.client.persons_store();

    assert!(persons.fetch_one(77).await.is_err());
    assert_eq!(persons.error(), Some("Person 77 not found"));

    assert!(persons.fetch(ListParams::new()).await.is_err());
    assert_eq!(persons.error(), Some("Failed to load persons"));
}

#[tokio::test]
async fn test_case_timeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/cases/1/timeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "case_id": 1,
            "case_number": "CIV-2024-001",
            "timeline": [{
                "date": "2024-02-10T08:00:00",
                "event_type": "case_created",
                "description": "Case created: Lease dispute",
                "user_id": 1
            }]
        })))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut cases = harness.client.cases_store();
    cases.fetch_timeline(1).await.unwrap();

    assert_eq!(cases.timeline().len(), 1);
    assert_eq!(cases.timeline()[0].event_type, "case_created");
}

#[tokio::test]
async fn test_documents_store_upload_and_ocr() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/documents"))
        .and(body_string_contains("name=\"document_type\""))
        .and(body_string_contains("filename=\"claim.pdf\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(document_json(10)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/documents/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(document_json(10)))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/documents/10/ocr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "document_id": 10,
            "ocr_text": "Statement of claim",
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let mut documents = harness.client.documents_store();

    let upload = DocumentUpload::new(
        FilePart::new("file", "claim.pdf", "application/pdf", b"%PDF-1.4".to_vec()),
        DocumentType::Lawsuit,
    );
    documents.upload(upload).await.unwrap();
    assert_eq!(documents.items().len(), 1);

    documents.fetch_one(10).await.unwrap();
    documents.run_ocr(10).await.unwrap();
    assert_eq!(
        documents.current().and_then(|d| d.ocr_text.as_deref()),
        Some("Statement of claim")
    );
    assert!(
        documents
            .download_url(10)
            .ends_with("/api/documents/10/download")
    );
}

#[tokio::test]
async fn test_multipart_upload_is_retried_after_renewal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/documents"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/documents"))
        .and(header("authorization", "Bearer A2"))
        .and(body_string_contains("%PDF-1.4"))
        .respond_with(ResponseTemplate::new(201).set_body_json(document_json(11)))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let upload = DocumentUpload::new(
        FilePart::new("file", "claim.pdf", "application/pdf", b"%PDF-1.4".to_vec()),
        DocumentType::Lawsuit,
    );
    let document = harness
        .client
        .api()
        .documents()
        .upload(upload)
        .await
        .unwrap();
    assert_eq!(document.id, 11);
}

// ============================================================================
// Wrappers
// ============================================================================

#[tokio::test]
async fn test_semantic_search_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search/semantic"))
        .and(body_json(json!({"query": "unpaid rent", "top_k": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "unpaid rent",
            "message": "Semantic search is under development",
            "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let results = harness
        .client
        .api()
        .search()
        .semantic("unpaid rent")
        .await
        .unwrap();
    assert!(results.results.is_empty());
}

#[tokio::test]
async fn test_global_search_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "lease"))
        .and(query_param("search_type", "cases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "lease",
            "cases": [{
                "id": 1,
                "case_number": "CIV-2024-001",
                "title": "Lease dispute",
                "case_type": "civil",
                "case_status": "new"
            }],
            "persons": [],
            "documents": [],
            "legal_acts": [],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let params = casedesk::models::SearchParams {
        search_type: Some("cases".into()),
        limit: None,
    };
    let results = harness
        .client
        .api()
        .search()
        .global("lease", &params)
        .await
        .unwrap();
    assert_eq!(results.total, 1);
    assert_eq!(results.cases[0].case_number, "CIV-2024-001");
}

#[tokio::test]
async fn test_calendar_and_upcoming() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/events/calendar/2024/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "year": 2024,
            "month": 3,
            "events": [{
                "id": 4,
                "case_id": 1,
                "case_number": "CIV-2024-001",
                "event_type": "court_hearing",
                "event_date": "2024-03-12T10:00:00",
                "description": "Hearing",
                "location": "Room 4",
                "event_status": "scheduled"
            }],
            "total": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/events/upcoming/week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": [], "total": 0})))
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let events = harness.client.api().events();

    let month = events.calendar(2024, 3).await.unwrap();
    assert_eq!(month.events[0].location.as_deref(), Some("Room 4"));

    let upcoming = events.upcoming_week().await.unwrap();
    assert_eq!(upcoming.total, 0);

    assert!(events.calendar(2024, 13).await.is_err());
}

#[tokio::test]
async fn test_report_download() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/reports/case/1/pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .insert_header(
                    "content-disposition",
                    "attachment; filename=\"case_CIV-2024-001.pdf\"",
                )
                .set_body_bytes(b"%PDF-1.4 report".to_vec()),
        )
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let download = harness.client.api().reports().case_pdf(1).await.unwrap();

    assert_eq!(download.file_name.as_deref(), Some("case_CIV-2024-001.pdf"));
    assert_eq!(download.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(download.bytes, b"%PDF-1.4 report");
}

#[tokio::test]
async fn test_update_setting_sends_null_description() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/admin/settings/ocr_language"))
        .and(body_json(json!({"value": "ron+rus", "description": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "key": "ocr_language",
            "value": "ron+rus",
            "description": null,
            "updated_at": "2024-03-01T09:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Some("A1"), Some("R1"));
    let setting = harness
        .client
        .api()
        .admin()
        .update_setting("ocr_language", "ron+rus", None)
        .await
        .unwrap();
    assert_eq!(setting.value, "ron+rus");
}
