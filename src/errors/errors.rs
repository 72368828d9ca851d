//! 크레이트 전역에서 사용하는 에러 시스템
//!
//! 세션 저장소, 인증 API 통신, 토큰 디코딩 등 인프라 계층에서 발생하는
//! 에러를 하나의 타입으로 모읍니다. `thiserror`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! 가드 평가 결과를 표현하는 에러(`GuardError`)는 별도로 정의되며,
//! 가드 경계에서 `AppError`가 `GuardError`로 변환됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::{AppError, AppResult};
//!
//! fn read_pair(raw: &str) -> AppResult<TokenPair> {
//!     serde_json::from_str(raw)
//!         .map_err(|e| AppError::StorageError(format!("세션 파일 파싱 실패: {}", e)))
//! }
//! ```

use thiserror::Error;

/// 크레이트 전역 에러 타입
///
/// 저장소, 외부 인증 API, 토큰 처리, 설정 등에서 발생할 수 있는
/// 모든 종류의 인프라 에러를 포괄하는 열거형입니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 세션 저장소 읽기/쓰기 실패
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 인증 API 통신 실패 (네트워크 오류, 타임아웃, 2xx 이외 응답, 응답 파싱 실패)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 인증 API가 자격 증명을 거부함 (401/403)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 액세스 토큰 디코딩/검증 실패
    #[error("Token error: {0}")]
    TokenError(String),

    /// 설정값 누락 또는 형식 오류
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// 네트워크 계층에서 발생한 에러인지 확인
    ///
    /// 자격 증명 거부(`AuthenticationError`)와 구분하여 로그 레벨을 정할 때 사용합니다.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::ExternalServiceError(_))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;
