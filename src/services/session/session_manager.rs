//! 클라이언트 세션 수명주기 관리
//!
//! 로그인/OTP 인증 성공 시 토큰 쌍을 저장하고, 로그아웃 시 삭제합니다.
//! 레이아웃 영역(헤더의 로그인 상태 표시 등)은 네트워크 없이 현재 사용자를
//! 조회할 때 이 서비스를 사용합니다.

use std::sync::Arc;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPair;
use crate::errors::errors::{AppError, AppResult};
use crate::services::auth::TokenService;
use crate::storage::SessionStore;

/// 세션 수명주기 서비스
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    token_service: Arc<TokenService>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            store,
            token_service,
        }
    }

    /// 로그인 또는 OTP 인증으로 받은 토큰 쌍을 저장합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::TokenError` - 액세스 토큰을 해석할 수 없음
    /// * `AppError::AuthenticationError` - 둘 중 하나가 빈 토큰
    /// * `AppError::StorageError` - 저장 실패
    pub fn establish(&self, pair: TokenPair) -> AppResult<AuthenticatedUser> {
        if pair.access_token.is_empty() || pair.refresh_token.is_empty() {
            return Err(AppError::AuthenticationError(
                "액세스 토큰과 리프레시 토큰이 모두 필요합니다".to_string(),
            ));
        }

        let claims = self.token_service.decode(&pair.access_token)?;
        self.store.save(&pair)?;

        log::info!("🔐 세션 수립: 사용자 ID {} ({})", claims.sub, claims.role);
        Ok(AuthenticatedUser::from(claims))
    }

    /// 저장된 토큰 쌍을 삭제합니다.
    pub fn sign_out(&self) -> AppResult<()> {
        self.store.clear()?;
        log::info!("👋 세션 종료");
        Ok(())
    }

    /// 저장된 액세스 토큰의 사용자 정보
    ///
    /// 세션이 없거나 토큰을 해석할 수 없으면 `None`입니다. 만료 여부는 따지지 않으며
    /// 실제 접근 허용은 가드가 판단합니다.
    pub fn current_user(&self) -> AppResult<Option<AuthenticatedUser>> {
        let Some(pair) = self.store.load()? else {
            return Ok(None);
        };

        match self.token_service.decode(&pair.access_token) {
            Ok(claims) => Ok(Some(AuthenticatedUser::from(claims))),
            Err(e) => {
                log::debug!("저장된 액세스 토큰 해석 실패: {}", e);
                Ok(None)
            }
        }
    }

    /// 두 토큰이 모두 저장되어 있는지 확인
    pub fn has_session(&self) -> AppResult<bool> {
        Ok(self.store.load()?.is_some())
    }
}
