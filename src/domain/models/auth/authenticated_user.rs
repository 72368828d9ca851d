use serde::{Deserialize, Serialize};
use crate::domain::models::token::AccessClaims;

/// 액세스 토큰에서 추출된 사용자 정보
///
/// 가드 통과 후 화면에 전달되는 세션 주체입니다. 클레임은 서명 검증 없이
/// 디코딩되었을 수 있으므로 화면 표시 용도로만 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 역할 이름
    pub role: String,

    /// 액세스 토큰 만료 시간 (Unix timestamp)
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

impl From<AccessClaims> for AuthenticatedUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}
