//! # 인증 API 클라이언트
//!
//! 세션 가드가 사용하는 원격 인증 API의 두 엔드포인트를 감쌉니다.
//!
//! | 용도 | 메서드 | 인증 | 응답 |
//! |------|--------|------|------|
//! | **프로필 조회** | `GET {base}{profile_path}` | `Authorization: Bearer <access>` | `status`, 역할 참조 |
//! | **토큰 갱신** | `POST {base}{refresh_path}` | 본문 `{"refreshToken": ...}` | 새 액세스/리프레시 토큰 |
//!
//! 네트워크 오류, 타임아웃, 2xx 이외의 응답, 본문 파싱 실패는 모두 에러로 반환되며
//! 가드가 이를 갱신 실패 또는 프로필 조회 실패로 처리합니다.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use crate::config::SessionConfig;
use crate::domain::dto::profile::ProfileResponse;
use crate::domain::dto::tokens::{RefreshRequest, RefreshResponse};
use crate::domain::models::profile::UserProfile;
use crate::domain::models::token::TokenPair;
use crate::errors::errors::{AppError, AppResult};

/// 원격 인증 API
///
/// 가드는 이 trait에만 의존하므로 테스트에서 가짜 구현을 주입할 수 있습니다.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// 액세스 토큰으로 현재 사용자 프로필을 조회합니다.
    async fn fetch_profile(&self, access_token: &str) -> AppResult<UserProfile>;

    /// 리프레시 토큰으로 새 토큰 쌍을 발급받습니다.
    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair>;
}

/// `reqwest` 기반 인증 API 클라이언트
///
/// 모든 요청에 설정된 타임아웃이 적용됩니다.
///
/// ```rust,ignore
/// let config = SessionConfig::from_env()?;
/// let api = HttpAuthApi::new(&config)?;
/// let profile = api.fetch_profile(&pair.access_token).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Client,
    profile_url: String,
    refresh_url: String,
}

impl HttpAuthApi {
    /// # Errors
    ///
    /// * `AppError::ConfigError` - HTTP 클라이언트 생성 실패 (TLS 백엔드 초기화 등)
    pub fn new(config: &SessionConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            profile_url: config.profile_url(),
            refresh_url: config.refresh_url(),
        })
    }

    async fn ensure_success(response: Response, action: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(status_error(status, action, &error_text))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn fetch_profile(&self, access_token: &str) -> AppResult<UserProfile> {
        let response = self
            .client
            .get(&self.profile_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport_error("프로필 조회", e))?;

        let response = Self::ensure_success(response, "프로필 조회").await?;

        response
            .json::<ProfileResponse>()
            .await
            .map(ProfileResponse::into_profile)
            .map_err(|e| AppError::ExternalServiceError(format!("프로필 응답 파싱 실패: {}", e)))
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let response = self
            .client
            .post(&self.refresh_url)
            .json(&RefreshRequest { refresh_token })
            .send()
            .await
            .map_err(|e| transport_error("토큰 갱신", e))?;

        let response = Self::ensure_success(response, "토큰 갱신").await?;

        let pair = response
            .json::<RefreshResponse>()
            .await
            .map(|body| body.into_pair(refresh_token))
            .map_err(|e| AppError::ExternalServiceError(format!("토큰 갱신 응답 파싱 실패: {}", e)))?;

        if pair.access_token.is_empty() {
            return Err(AppError::ExternalServiceError(
                "토큰 갱신 응답에 액세스 토큰이 비어 있습니다".to_string(),
            ));
        }

        Ok(pair)
    }
}

fn transport_error(action: &str, e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::ExternalServiceError(format!("{} 요청 시간 초과: {}", action, e))
    } else {
        AppError::ExternalServiceError(format!("{} 요청 실패: {}", action, e))
    }
}

fn status_error(status: StatusCode, action: &str, body: &str) -> AppError {
    let detail = if body.is_empty() {
        status.to_string()
    } else {
        format!("{} {}", status, body)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::AuthenticationError(format!("{} 거부됨: {}", action, detail))
        }
        _ => AppError::ExternalServiceError(format!("{} 실패: {}", action, detail)),
    }
}
