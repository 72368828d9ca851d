//! # Session Configuration Module
//!
//! 인증 API 엔드포인트, 세션 가드 정책, 액세스 토큰 검증 키 등
//! 세션 가드 동작에 필요한 설정을 관리하는 모듈입니다.
//!
//! ## 환경 변수
//!
//! ### 인증 API
//! ```bash
//! export AUTH_API_BASE_URL="https://shop.example.com/api/v1"
//! export AUTH_PROFILE_PATH="/users/profile"
//! export AUTH_REFRESH_PATH="/auth/refresh"
//! export AUTH_API_TIMEOUT_SECS="5"
//! ```
//!
//! ### 가드 정책
//! ```bash
//! export SESSION_REFRESH_WINDOW_SECS="900"   # 만료 15분 전부터 선제 갱신
//! export SESSION_LOGIN_ROUTE="/login"
//! export SESSION_RETURN_PARAM="next"
//! ```
//!
//! ### 토큰 서명 검증 (선택)
//! ```bash
//! export ACCESS_TOKEN_SECRET="hs256-shared-secret"
//! # 또는
//! export ACCESS_TOKEN_PUBLIC_KEY="$(base64 -w0 jwt_public_key.pem)"
//! ```
//!
//! 검증 키가 없으면 클레임을 서명 검증 없이 디코딩합니다. 클라이언트 측 역할
//! 검사는 화면 흐름을 위한 것이며, 실제 권한 집행은 백엔드가 담당합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::SessionConfig;
//!
//! let config = SessionConfig::from_env()?;
//! println!("Auth API: {}", config.api_base_url);
//! ```

use std::env;
use std::fmt;
use std::time::Duration;
use base64::{Engine as _, engine::general_purpose};
use crate::config::data_config::parse_env;
use crate::errors::errors::{AppError, AppResult};

/// 인증 API 설정
///
/// 프로필 조회와 토큰 갱신 엔드포인트의 위치, 호출 타임아웃을 제공합니다.
pub struct AuthApiConfig;

impl AuthApiConfig {
    /// 인증 API 기본 URL
    ///
    /// # 기본값
    ///
    /// `http://localhost:8080/api/v1`
    pub fn base_url() -> String {
        env::var("AUTH_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string())
    }

    /// 프로필 조회 경로 (GET, Bearer 인증)
    pub fn profile_path() -> String {
        env::var("AUTH_PROFILE_PATH").unwrap_or_else(|_| "/users/profile".to_string())
    }

    /// 토큰 갱신 경로 (POST, 본문에 리프레시 토큰)
    pub fn refresh_path() -> String {
        env::var("AUTH_REFRESH_PATH").unwrap_or_else(|_| "/auth/refresh".to_string())
    }

    /// API 호출 타임아웃 (초)
    pub fn timeout_secs() -> u64 {
        parse_env("AUTH_API_TIMEOUT_SECS", 5)
    }
}

/// 세션 가드 정책 설정
pub struct GuardPolicyConfig;

impl GuardPolicyConfig {
    /// 선제 갱신 구간 (초)
    ///
    /// 액세스 토큰의 남은 시간이 이 값 이하이면 만료 전이라도 갱신합니다.
    pub fn refresh_window_secs() -> i64 {
        parse_env("SESSION_REFRESH_WINDOW_SECS", SessionConfig::DEFAULT_REFRESH_WINDOW_SECS)
    }

    /// 거부 시 기본 리다이렉트 경로
    pub fn login_route() -> String {
        env::var("SESSION_LOGIN_ROUTE").unwrap_or_else(|_| "/login".to_string())
    }

    /// 복귀 경로를 전달하는 쿼리 파라미터 이름
    pub fn return_param() -> String {
        env::var("SESSION_RETURN_PARAM").unwrap_or_else(|_| "next".to_string())
    }
}

/// 액세스 토큰 서명 검증 방식
#[derive(Clone, PartialEq)]
pub enum TokenVerification {
    /// 서명 검증 없이 클레임만 디코딩
    Disabled,
    /// HS256 공유 비밀키
    Hs256(String),
    /// RS256 공개키 (PEM)
    Rs256Pem(String),
}

impl TokenVerification {
    /// 환경 변수에서 검증 방식을 결정합니다.
    ///
    /// `ACCESS_TOKEN_PUBLIC_KEY`가 `ACCESS_TOKEN_SECRET`보다 우선합니다.
    /// 공개키는 PEM 원문 또는 base64로 인코딩된 PEM을 받습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 공개키 base64 디코딩 실패 또는 UTF-8이 아님
    pub fn from_env() -> AppResult<Self> {
        if let Ok(raw) = env::var("ACCESS_TOKEN_PUBLIC_KEY") {
            if !raw.trim().is_empty() {
                return Ok(TokenVerification::Rs256Pem(Self::decode_public_key(&raw)?));
            }
        }

        match env::var("ACCESS_TOKEN_SECRET") {
            Ok(secret) if !secret.is_empty() => Ok(TokenVerification::Hs256(secret)),
            _ => Ok(TokenVerification::Disabled),
        }
    }

    fn decode_public_key(raw: &str) -> AppResult<String> {
        let raw = raw.trim();
        if raw.starts_with("-----BEGIN") {
            return Ok(raw.to_string());
        }

        let bytes = general_purpose::STANDARD
            .decode(raw)
            .map_err(|e| AppError::ConfigError(format!("ACCESS_TOKEN_PUBLIC_KEY base64 디코딩 실패: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| AppError::ConfigError(format!("ACCESS_TOKEN_PUBLIC_KEY가 UTF-8 PEM이 아닙니다: {}", e)))
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, TokenVerification::Disabled)
    }
}

impl fmt::Debug for TokenVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 키 값은 출력하지 않음
        match self {
            TokenVerification::Disabled => write!(f, "Disabled"),
            TokenVerification::Hs256(_) => write!(f, "Hs256(<redacted>)"),
            TokenVerification::Rs256Pem(_) => write!(f, "Rs256Pem(<redacted>)"),
        }
    }
}

/// 세션 가드 전체 설정
///
/// 정적 설정 getter들의 값을 한 번에 모은 값 객체입니다.
/// 가드와 API 클라이언트에 주입되며, 테스트에서는 직접 구성합니다.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 인증 API 기본 URL (끝의 `/` 없이)
    pub api_base_url: String,
    /// 프로필 조회 경로
    pub profile_path: String,
    /// 토큰 갱신 경로
    pub refresh_path: String,
    /// API 호출 타임아웃
    pub request_timeout: Duration,
    /// 선제 갱신 구간 (초)
    pub refresh_window_secs: i64,
    /// 거부 시 기본 리다이렉트 경로
    pub login_route: String,
    /// 복귀 경로 쿼리 파라미터 이름
    pub return_param: String,
    /// 액세스 토큰 서명 검증 방식
    pub verification: TokenVerification,
}

impl SessionConfig {
    /// 만료 15분 전부터 갱신
    pub const DEFAULT_REFRESH_WINDOW_SECS: i64 = 900;

    /// 환경 변수에서 전체 설정을 읽습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - 검증 키 형식 오류 또는 음수 갱신 구간
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            api_base_url: AuthApiConfig::base_url().trim_end_matches('/').to_string(),
            profile_path: AuthApiConfig::profile_path(),
            refresh_path: AuthApiConfig::refresh_path(),
            request_timeout: Duration::from_secs(AuthApiConfig::timeout_secs()),
            refresh_window_secs: GuardPolicyConfig::refresh_window_secs(),
            login_route: GuardPolicyConfig::login_route(),
            return_param: GuardPolicyConfig::return_param(),
            verification: TokenVerification::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// 지정한 API 주소를 사용하고 나머지는 기본값인 설정
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// 설정값 검증
    pub fn validate(&self) -> AppResult<()> {
        if self.refresh_window_secs < 0 {
            return Err(AppError::ConfigError(format!(
                "SESSION_REFRESH_WINDOW_SECS는 0 이상이어야 합니다: {}",
                self.refresh_window_secs
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::ConfigError("AUTH_API_TIMEOUT_SECS는 0보다 커야 합니다".to_string()));
        }
        if !self.login_route.starts_with('/') {
            return Err(AppError::ConfigError(format!(
                "SESSION_LOGIN_ROUTE는 '/'로 시작해야 합니다: {}",
                self.login_route
            )));
        }
        Ok(())
    }

    /// 프로필 조회 전체 URL
    pub fn profile_url(&self) -> String {
        join_url(&self.api_base_url, &self.profile_path)
    }

    /// 토큰 갱신 전체 URL
    pub fn refresh_url(&self) -> String {
        join_url(&self.api_base_url, &self.refresh_path)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api/v1".to_string(),
            profile_path: "/users/profile".to_string(),
            refresh_path: "/auth/refresh".to_string(),
            request_timeout: Duration::from_secs(5),
            refresh_window_secs: Self::DEFAULT_REFRESH_WINDOW_SECS,
            login_route: "/login".to_string(),
            return_param: "next".to_string(),
            verification: TokenVerification::Disabled,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_window_secs, 900);
        assert_eq!(config.login_route, "/login");
        assert!(!config.verification.is_enabled());
    }

    #[test]
    fn test_url_joining() {
        let config = SessionConfig::with_base_url("http://127.0.0.1:9000/api/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.profile_url(), "http://127.0.0.1:9000/api/users/profile");
        assert_eq!(config.refresh_url(), "http://127.0.0.1:9000/api/auth/refresh");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SessionConfig::default();
        config.refresh_window_secs = -1;
        assert!(matches!(config.validate(), Err(AppError::ConfigError(_))));

        let mut config = SessionConfig::default();
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.login_route = "login".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_public_key_accepts_raw_and_base64_pem() {
        let pem = "-----BEGIN PUBLIC KEY-----\nMIIB\n-----END PUBLIC KEY-----";
        assert_eq!(TokenVerification::decode_public_key(pem).unwrap(), pem);

        let encoded = general_purpose::STANDARD.encode(pem);
        assert_eq!(TokenVerification::decode_public_key(&encoded).unwrap(), pem);

        assert!(matches!(
            TokenVerification::decode_public_key("not base64 !!"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_verification_debug_redacts_keys() {
        let debug = format!("{:?}", TokenVerification::Hs256("top-secret".to_string()));
        assert!(!debug.contains("top-secret"));
        assert_eq!(debug, "Hs256(<redacted>)");
    }
}
