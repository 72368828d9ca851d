//! 로컬 인증 API 서버를 띄워 HTTP 클라이언트와 세션 가드를 끝까지 검증합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use storefront_session::config::{SessionConfig, StoreConfig};
use storefront_session::domain::models::auth::GuardRequest;
use storefront_session::domain::models::guard::GuardDecision;
use storefront_session::domain::models::profile::AccountStatus;
use storefront_session::domain::models::token::TokenPair;
use storefront_session::errors::errors::AppError;
use storefront_session::guards::{FixedClock, LogNavigator, SessionGuard};
use storefront_session::services::auth::{AuthApi, HttpAuthApi};
use storefront_session::storage::{FileSessionStore, MemorySessionStore, SessionStore};

const NOW: i64 = 1_700_000_000;

fn token(role: &str, exp: i64) -> String {
    encode(
        &Header::default(),
        &json!({ "sub": "u-1", "role": role, "iat": exp - 3600, "exp": exp }),
        &EncodingKey::from_secret(b"issuer-secret"),
    )
    .unwrap()
}

/// 가짜 인증 API 상태
struct AuthState {
    status: String,
    valid_refresh: String,
    issued_access: String,
    refresh_calls: AtomicUsize,
    bearers: Mutex<Vec<String>>,
    profile_delay: Duration,
    refresh_delay: Duration,
}

impl AuthState {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            valid_refresh: "r-1".to_string(),
            issued_access: token("customer", NOW + 3600),
            refresh_calls: AtomicUsize::new(0),
            bearers: Mutex::new(Vec::new()),
            profile_delay: Duration::ZERO,
            refresh_delay: Duration::ZERO,
        }
    }

    fn slow_profile(mut self, delay: Duration) -> Self {
        self.profile_delay = delay;
        self
    }

    fn slow_refresh(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    fn bearers(&self) -> Vec<String> {
        self.bearers.lock().unwrap().clone()
    }
}

async fn profile(req: HttpRequest, state: web::Data<AuthState>) -> HttpResponse {
    if !state.profile_delay.is_zero() {
        actix_web::rt::time::sleep(state.profile_delay).await;
    }

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    match bearer {
        Some(token) => {
            state.bearers.lock().unwrap().push(token);
            HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "_id": "u-1",
                    "email": "shopper@example.com",
                    "status": state.status,
                    "role": { "_id": "role-1", "name": "customer" }
                }
            }))
        }
        None => HttpResponse::Unauthorized().json(json!({ "success": false, "message": "missing token" })),
    }
}

async fn refresh(body: web::Json<serde_json::Value>, state: web::Data<AuthState>) -> HttpResponse {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if !state.refresh_delay.is_zero() {
        actix_web::rt::time::sleep(state.refresh_delay).await;
    }

    if body.get("refreshToken").and_then(|v| v.as_str()) == Some(state.valid_refresh.as_str()) {
        HttpResponse::Ok().json(json!({
            "success": true,
            "data": { "accessToken": state.issued_access, "refreshToken": "r-2" }
        }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "success": false, "message": "invalid refresh token" }))
    }
}

async fn start_auth_server(state: web::Data<AuthState>) -> (String, ServerHandle) {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/api/users/profile", web::get().to(profile))
            .route("/api/auth/refresh", web::post().to(refresh))
    })
    .workers(1)
    .shutdown_timeout(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{}/api", addr), handle)
}

fn guard(base_url: &str, store: Arc<dyn SessionStore>, navigator: Arc<LogNavigator>) -> SessionGuard {
    guard_with_config(SessionConfig::with_base_url(base_url), store, navigator)
}

/// 짧은 타임아웃으로 느린 인증 API를 실패로 처리하는 설정
fn impatient_config(base_url: &str) -> SessionConfig {
    let mut config = SessionConfig::with_base_url(base_url);
    config.request_timeout = Duration::from_millis(300);
    config
}

fn guard_with_config(
    config: SessionConfig,
    store: Arc<dyn SessionStore>,
    navigator: Arc<LogNavigator>,
) -> SessionGuard {
    let _ = env_logger::builder().is_test(true).try_init();

    let auth_api = Arc::new(HttpAuthApi::new(&config).unwrap());

    SessionGuard::new(config, store, auth_api, navigator)
        .unwrap()
        .with_clock(Arc::new(FixedClock::at_timestamp(NOW)))
}

#[actix_web::test]
async fn test_http_client_refresh_and_profile() {
    let state = web::Data::new(AuthState::new("not_verified"));
    let (base_url, handle) = start_auth_server(state.clone()).await;
    let api = HttpAuthApi::new(&SessionConfig::with_base_url(&base_url)).unwrap();

    let pair = api.refresh("r-1").await.unwrap();
    assert_eq!(pair.refresh_token, "r-2");
    assert_eq!(pair.access_token, state.issued_access);

    let profile = api.fetch_profile(&pair.access_token).await.unwrap();
    assert_eq!(profile.status, AccountStatus::NotVerified);
    assert_eq!(profile.id.as_deref(), Some("u-1"));
    assert_eq!(profile.role_name(), Some("customer"));
    assert_eq!(state.bearers(), vec![pair.access_token]);

    let rejected = api.refresh("stolen").await;
    assert!(matches!(rejected, Err(AppError::AuthenticationError(_))));

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_guard_refreshes_expired_session_over_http() {
    let state = web::Data::new(AuthState::new("active"));
    let (base_url, handle) = start_auth_server(state.clone()).await;

    let store = Arc::new(MemorySessionStore::with_pair(TokenPair::new(
        token("customer", NOW - 60),
        "r-1",
    )));
    let navigator = Arc::new(LogNavigator::new());
    let guard = guard(&base_url, store.clone(), navigator.clone());

    let decision = guard.evaluate(&GuardRequest::new().require("customer")).await;

    assert_eq!(decision, GuardDecision::Allow);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        store.load().unwrap(),
        Some(TokenPair::new(state.issued_access.clone(), "r-2"))
    );
    assert_eq!(state.bearers(), vec![state.issued_access.clone()]);
    assert_eq!(navigator.last_redirect(), None);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_guard_signs_out_suspended_account_over_http() {
    let state = web::Data::new(AuthState::new("suspended"));
    let (base_url, handle) = start_auth_server(state.clone()).await;

    let store = Arc::new(MemorySessionStore::with_pair(TokenPair::new(
        token("customer", NOW + 3600),
        "r-1",
    )));
    let navigator = Arc::new(LogNavigator::new());
    let guard = guard(&base_url, store.clone(), navigator.clone());

    let request = GuardRequest::new().return_to("/account/orders");
    let decision = guard.evaluate(&request).await;

    assert_eq!(decision, GuardDecision::DenySuspended);
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        navigator.last_redirect().as_deref(),
        Some("/login?next=%2Faccount%2Forders")
    );

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_rejected_refresh_clears_file_session() {
    let state = web::Data::new(AuthState::new("active"));
    let (base_url, handle) = start_auth_server(state.clone()).await;

    let dir = std::env::temp_dir().join(format!("storefront-session-{}", uuid::Uuid::new_v4()));
    let store_config = StoreConfig::at(dir.join("session.json"));

    let store = Arc::new(FileSessionStore::new(store_config.clone()));
    store
        .save(&TokenPair::new(token("customer", NOW + 100), "revoked"))
        .unwrap();

    let navigator = Arc::new(LogNavigator::new());
    let guard = guard(&base_url, store, navigator.clone());

    let decision = guard.protect(Some("customer"), None).await;

    assert_eq!(decision, GuardDecision::DenyNoSession);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    assert!(state.bearers().is_empty());
    assert_eq!(navigator.last_redirect().as_deref(), Some("/login"));

    // 다른 인스턴스로 다시 열어도 삭제 상태 유지
    let reopened = FileSessionStore::new(store_config);
    assert_eq!(reopened.load().unwrap(), None);

    let _ = std::fs::remove_dir_all(dir);
    handle.stop(true).await;
}

#[actix_web::test]
async fn test_unreachable_api_denies_without_panicking() {
    let store = Arc::new(MemorySessionStore::with_pair(TokenPair::new(
        token("customer", NOW + 3600),
        "r-1",
    )));
    let navigator = Arc::new(LogNavigator::new());
    let guard = guard("http://127.0.0.1:1/api", store.clone(), navigator.clone());

    assert_eq!(guard.protect(None, None).await, GuardDecision::DenyNoSession);
    assert_eq!(store.load().unwrap(), None);
}

#[actix_web::test]
async fn test_http_client_reports_timeouts() {
    let state = web::Data::new(
        AuthState::new("active")
            .slow_profile(Duration::from_secs(2))
            .slow_refresh(Duration::from_secs(2)),
    );
    let (base_url, handle) = start_auth_server(state.clone()).await;
    let api = HttpAuthApi::new(&impatient_config(&base_url)).unwrap();

    match api.fetch_profile("a-1").await {
        Err(AppError::ExternalServiceError(message)) => assert!(message.contains("시간 초과"), "{}", message),
        other => panic!("expected timeout, got {:?}", other.map(|p| p.status)),
    }
    match api.refresh("r-1").await {
        Err(AppError::ExternalServiceError(message)) => assert!(message.contains("시간 초과"), "{}", message),
        other => panic!("expected timeout, got {:?}", other.map(|_| ())),
    }

    handle.stop(false).await;
}

#[actix_web::test]
async fn test_profile_timeout_clears_session() {
    let state = web::Data::new(AuthState::new("active").slow_profile(Duration::from_secs(2)));
    let (base_url, handle) = start_auth_server(state.clone()).await;

    let store = Arc::new(MemorySessionStore::with_pair(TokenPair::new(
        token("customer", NOW + 3600),
        "r-1",
    )));
    let navigator = Arc::new(LogNavigator::new());
    let guard = guard_with_config(impatient_config(&base_url), store.clone(), navigator.clone());

    let decision = guard.protect(Some("customer"), None).await;

    assert_eq!(decision, GuardDecision::DenyNoSession);
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(navigator.last_redirect().as_deref(), Some("/login"));

    handle.stop(false).await;
}

#[actix_web::test]
async fn test_refresh_timeout_denies_without_storing_new_pair() {
    let state = web::Data::new(AuthState::new("active").slow_refresh(Duration::from_secs(2)));
    let (base_url, handle) = start_auth_server(state.clone()).await;

    let dir = std::env::temp_dir().join(format!("storefront-session-{}", uuid::Uuid::new_v4()));
    let store = Arc::new(FileSessionStore::new(StoreConfig::at(dir.join("session.json"))));
    store
        .save(&TokenPair::new(token("customer", NOW - 60), "r-1"))
        .unwrap();
    store.set("cart", "[]").unwrap();

    let navigator = Arc::new(LogNavigator::new());
    let guard = guard_with_config(impatient_config(&base_url), store.clone(), navigator.clone());

    let decision = guard.protect(Some("customer"), None).await;

    assert_eq!(decision, GuardDecision::DenyNoSession);
    assert_eq!(state.refresh_calls.load(Ordering::SeqCst), 1);
    assert!(state.bearers().is_empty());
    assert_eq!(store.load().unwrap(), None);
    assert_eq!(store.get("accessToken").unwrap(), None);
    assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

    let _ = std::fs::remove_dir_all(dir);
    handle.stop(false).await;
}
