//! 가드 평가 결과와 거부 사유
//!
//! 모든 실패는 네 가지 결정 중 하나로 수렴합니다. 부분 허용 상태는 없습니다.
//!
//! | GuardError | GuardDecision | 세션 삭제 | 사용자 알림 |
//! |------------|---------------|-----------|-------------|
//! | `MissingSession` | `DenyNoSession` | - | - |
//! | `MalformedToken` | `DenyNoSession` | O | - |
//! | `ExpiredToken` | `DenyNoSession` | O | - |
//! | `RoleMismatch` | `DenyRoleMismatch` | - | O |
//! | `AccountSuspended` | `DenySuspended` | O | O |
//! | `RefreshFailed` | `DenyNoSession` | O | - |
//! | `ProfileFetchFailed` | `DenyNoSession` | O | - |
//!
//! `MalformedToken`과 `ExpiredToken`은 갱신 흐름에 들어가는 사유이며,
//! 평가는 갱신 결과를 통해서만 종료됩니다.

use std::fmt;
use thiserror::Error;
use crate::domain::models::auth::RequiredRole;

/// 가드 평가 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 화면 렌더링 허용
    Allow,
    /// 역할 불일치
    DenyRoleMismatch,
    /// 계정 정지
    DenySuspended,
    /// 유효한 세션 없음
    DenyNoSession,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GuardDecision::Allow => "allow",
            GuardDecision::DenyRoleMismatch => "deny_role_mismatch",
            GuardDecision::DenySuspended => "deny_suspended",
            GuardDecision::DenyNoSession => "deny_no_session",
        }
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 가드 거부 사유
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuardError {
    /// 저장된 토큰 쌍이 없음
    #[error("Missing session")]
    MissingSession,

    /// 액세스 토큰 디코딩 실패 (만료된 토큰과 동일하게 취급)
    #[error("Malformed access token: {0}")]
    MalformedToken(String),

    /// 액세스 토큰 만료 또는 선제 갱신 구간 진입
    #[error("Access token expired or expiring ({seconds_left}s left)")]
    ExpiredToken { seconds_left: i64 },

    /// 요구 역할과 토큰 역할 불일치
    #[error("Role mismatch: required {required}, token role '{actual}'")]
    RoleMismatch { required: RequiredRole, actual: String },

    /// 계정 정지
    #[error("Account suspended")]
    AccountSuspended,

    /// 토큰 갱신 실패
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// 프로필 조회 실패
    #[error("Profile fetch failed: {0}")]
    ProfileFetchFailed(String),
}

impl GuardError {
    /// 이 거부 사유에 대응하는 가드 결정
    pub fn decision(&self) -> GuardDecision {
        match self {
            GuardError::RoleMismatch { .. } => GuardDecision::DenyRoleMismatch,
            GuardError::AccountSuspended => GuardDecision::DenySuspended,
            _ => GuardDecision::DenyNoSession,
        }
    }

    /// 저장된 토큰 쌍을 삭제해야 하는지 여부
    ///
    /// 역할 불일치는 자격 증명 실패가 아니므로 세션을 유지합니다.
    /// 세션이 없을 때는 지울 것이 없습니다.
    pub fn clears_session(&self) -> bool {
        !matches!(self, GuardError::MissingSession | GuardError::RoleMismatch { .. })
    }

    /// 리다이렉트 전에 사용자에게 보여줄 메시지
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            GuardError::RoleMismatch { .. } => Some("이 페이지에 접근할 권한이 없습니다."),
            GuardError::AccountSuspended => Some("계정이 정지되었습니다. 고객센터에 문의해주세요."),
            _ => None,
        }
    }

    /// 진단 로그를 warn 레벨로 남길지 여부
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            GuardError::RoleMismatch { .. }
                | GuardError::AccountSuspended
                | GuardError::ProfileFetchFailed(_)
        )
    }
}
