//! # Session Guard
//!
//! 보호된 화면이 마운트되기 전에 실행되어 렌더링 허용, 토큰 갱신,
//! 리다이렉트 중 하나를 결정합니다.
//!
//! ## 평가 흐름
//!
//! ```text
//!  저장소에서 토큰 쌍 읽기
//!          │
//!          ├─ 없음 ─────────────────────────────────► DenyNoSession (네트워크 호출 없음)
//!          ▼
//!  액세스 토큰 디코딩 ─ 실패 ─┐
//!          │                  │
//!  남은 시간 = exp - now      │
//!          │                  │
//!          ├─ <= 갱신 구간 ───┤
//!          │                  ▼
//!          │            토큰 갱신 ─ 실패 ───────────► 세션 삭제, DenyNoSession
//!          │                  │
//!          │◄──── 새 쌍 저장 ─┘
//!          ▼
//!  역할 검사 ─ 불일치 ──────────────────────────────► 알림, DenyRoleMismatch (세션 유지)
//!          ▼
//!  프로필 조회 ─ 실패 ──────────────────────────────► 세션 삭제, DenyNoSession
//!          │
//!          ├─ suspended ────────────────────────────► 세션 삭제, 알림, DenySuspended
//!          ▼
//!        Allow
//! ```
//!
//! 모든 거부는 리다이렉트로 끝나며, 가드는 호출자에게 에러를 전파하지 않습니다.
//! 한 번의 평가 안에서 재시도하지 않으며 다음 화면 마운트가 처음부터 다시 평가합니다.
//!
//! ## 동시 평가
//!
//! 같은 가드 인스턴스에서 겹쳐 실행되는 평가들은 갱신을 한 번만 수행합니다.
//! 갱신 잠금을 얻은 뒤 저장소를 다시 읽어, 다른 평가가 이미 새 쌍을 기록했다면
//! 그 쌍을 그대로 사용합니다.

use std::sync::Arc;
use tokio::sync::Mutex;
use crate::config::{Environment, SessionConfig};
use crate::domain::models::auth::{AuthenticatedUser, GuardRequest};
use crate::domain::models::guard::{GuardDecision, GuardError};
use crate::domain::models::token::{AccessClaims, TokenPair};
use crate::errors::errors::AppResult;
use crate::guards::clock::{Clock, SystemClock};
use crate::guards::navigator::Navigator;
use crate::services::auth::{AuthApi, TokenService};
use crate::storage::SessionStore;

/// 세션 가드
///
/// 저장소, 인증 API, 화면 이동, 시계를 모두 주입받습니다.
///
/// ```rust,ignore
/// let guard = SessionGuard::new(config, store, Arc::new(HttpAuthApi::new(&config)?), navigator)?;
///
/// let request = GuardRequest::new().require("admin").return_to("/admin/orders");
/// if guard.evaluate(&request).await.is_allowed() {
///     render_orders();
/// }
/// ```
pub struct SessionGuard {
    config: SessionConfig,
    store: Arc<dyn SessionStore>,
    auth_api: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    token_service: Arc<TokenService>,
    clock: Arc<dyn Clock>,
    refresh_lock: Mutex<()>,
}

impl SessionGuard {
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 설정값 검증 실패 또는 검증 키 파싱 실패
    pub fn new(
        config: SessionConfig,
        store: Arc<dyn SessionStore>,
        auth_api: Arc<dyn AuthApi>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        config.validate()?;
        let token_service = Arc::new(TokenService::new(&config.verification)?);

        if !token_service.is_verifying() && Environment::current().warns_on_unverified_tokens() {
            log::warn!("액세스 토큰 서명 검증 키가 없습니다. 역할 검사는 화면 흐름 용도로만 동작합니다");
        }

        Ok(Self {
            config,
            store,
            auth_api,
            navigator,
            token_service,
            clock: Arc::new(SystemClock),
            refresh_lock: Mutex::new(()),
        })
    }

    /// 시계를 교체합니다.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 가드가 사용하는 토큰 해석 서비스
    ///
    /// `SessionManager`와 같은 검증 규칙을 공유할 때 사용합니다.
    pub fn token_service(&self) -> Arc<TokenService> {
        Arc::clone(&self.token_service)
    }

    /// 요구 역할과 리다이렉트 대상만으로 평가합니다.
    ///
    /// `redirect_target`이 없으면 설정의 로그인 경로로 이동합니다.
    pub async fn protect(&self, required_role: Option<&str>, redirect_target: Option<&str>) -> GuardDecision {
        let mut request = GuardRequest::new();
        if let Some(role) = required_role {
            request = request.require(role);
        }
        if let Some(target) = redirect_target {
            request = request.redirect_to(target);
        }
        self.evaluate(&request).await
    }

    /// 가드를 평가하고 결정에 따른 부수 효과(세션 삭제, 알림, 리다이렉트)를 수행합니다.
    pub async fn evaluate(&self, request: &GuardRequest) -> GuardDecision {
        match self.authorize(request).await {
            Ok(user) => {
                log::debug!("✅ 가드 통과: 사용자 ID {} ({})", user.user_id, user.role);
                GuardDecision::Allow
            }
            Err(error) => self.deny(request, error),
        }
    }

    /// 부수 효과 없이 접근 가능 여부만 판단합니다.
    ///
    /// 갱신에 성공하면 새 쌍은 저장되지만, 거부 시 세션 삭제와 리다이렉트는
    /// 수행하지 않습니다. 이는 [`evaluate`](Self::evaluate)가 담당합니다.
    pub async fn authorize(&self, request: &GuardRequest) -> Result<AuthenticatedUser, GuardError> {
        let session = self.load_session()?;

        let (session, claims) = match self.usable_claims(&session.access_token) {
            Ok(claims) => (session, claims),
            Err(reason) => {
                log::info!("🔄 세션 갱신 시작: {}", reason);
                self.refresh_session(session).await?
            }
        };

        if let Some(required) = &request.required_role {
            if !required.is_satisfied(&claims.role) {
                return Err(GuardError::RoleMismatch {
                    required: required.clone(),
                    actual: claims.role,
                });
            }
        }

        self.check_account(&session.access_token).await?;

        Ok(AuthenticatedUser::from(claims))
    }

    fn load_session(&self) -> Result<TokenPair, GuardError> {
        match self.store.load() {
            Ok(Some(pair)) => Ok(pair),
            Ok(None) => Err(GuardError::MissingSession),
            Err(e) => {
                log::error!("세션 저장소 읽기 실패: {}", e);
                Err(GuardError::MissingSession)
            }
        }
    }

    /// 갱신 없이 사용할 수 있는 토큰이면 클레임을 반환합니다.
    fn usable_claims(&self, access_token: &str) -> Result<AccessClaims, GuardError> {
        let claims = self
            .token_service
            .decode(access_token)
            .map_err(|e| GuardError::MalformedToken(e.to_string()))?;

        let freshness = claims.freshness(self.clock.now(), self.config.refresh_window_secs);
        if freshness.needs_refresh() {
            return Err(GuardError::ExpiredToken {
                seconds_left: freshness.seconds_left(),
            });
        }

        Ok(claims)
    }

    async fn refresh_session(&self, stale: TokenPair) -> Result<(TokenPair, AccessClaims), GuardError> {
        let _flight = self.refresh_lock.lock().await;

        // 잠금을 기다리는 동안 다른 평가가 갱신했거나 세션을 지웠을 수 있음
        let stale = match self.store.load() {
            Ok(Some(current)) if current.access_token != stale.access_token => {
                match self.usable_claims(&current.access_token) {
                    Ok(claims) => {
                        log::debug!("다른 평가가 갱신한 세션을 사용합니다");
                        return Ok((current, claims));
                    }
                    Err(_) => current,
                }
            }
            Ok(Some(current)) => current,
            Ok(None) => {
                log::info!("갱신 대기 중 세션이 삭제되었습니다");
                return Err(GuardError::MissingSession);
            }
            Err(e) => {
                log::error!("세션 저장소 재확인 실패: {}", e);
                stale
            }
        };

        let pair = self
            .auth_api
            .refresh(&stale.refresh_token)
            .await
            .map_err(|e| {
                if e.is_transport() {
                    log::warn!("인증 API 연결 문제로 갱신 실패: {}", e);
                }
                GuardError::RefreshFailed(e.to_string())
            })?;

        let claims = self.token_service.decode(&pair.access_token).map_err(|e| {
            GuardError::RefreshFailed(format!("갱신된 액세스 토큰을 해석할 수 없습니다: {}", e))
        })?;

        let seconds_left = claims.seconds_left(self.clock.now());
        if seconds_left <= 0 {
            return Err(GuardError::RefreshFailed(
                "갱신된 액세스 토큰이 이미 만료되었습니다".to_string(),
            ));
        }

        self.store
            .save(&pair)
            .map_err(|e| GuardError::RefreshFailed(format!("갱신된 세션 저장 실패: {}", e)))?;

        log::info!("✅ 세션 갱신 완료: 만료까지 {}초", seconds_left);
        Ok((pair, claims))
    }

    async fn check_account(&self, access_token: &str) -> Result<(), GuardError> {
        let profile = self
            .auth_api
            .fetch_profile(access_token)
            .await
            .map_err(|e| GuardError::ProfileFetchFailed(e.to_string()))?;

        if profile.status.is_suspended() {
            return Err(GuardError::AccountSuspended);
        }

        Ok(())
    }

    fn deny(&self, request: &GuardRequest, error: GuardError) -> GuardDecision {
        if error.is_warning() {
            log::warn!("🚫 가드 거부: {}", error);
        } else {
            log::info!("🚫 가드 거부: {}", error);
        }

        if error.clears_session() {
            if let Err(e) = self.store.clear() {
                log::error!("세션 삭제 실패: {}", e);
            }
        }

        if let Some(notice) = error.notice() {
            self.navigator.notify(notice);
        }

        self.navigator.redirect(&request.redirect_location(&self.config));
        error.decision()
    }
}
