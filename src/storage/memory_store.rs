use std::sync::RwLock;
use crate::domain::models::token::TokenPair;
use crate::errors::errors::{AppError, AppResult};
use crate::storage::SessionStore;

/// 메모리 기반 세션 저장소
///
/// 토큰 쌍 전체를 하나의 `RwLock` 슬롯에 보관하므로 교체가 원자적입니다.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<TokenPair>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 토큰 쌍이 저장된 상태로 시작합니다.
    pub fn with_pair(pair: TokenPair) -> Self {
        Self {
            slot: RwLock::new(Some(pair)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> AppResult<Option<TokenPair>> {
        let slot = self
            .slot
            .read()
            .map_err(|e| AppError::StorageError(format!("세션 잠금 획득 실패: {}", e)))?;
        Ok(slot.clone())
    }

    fn save(&self, pair: &TokenPair) -> AppResult<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| AppError::StorageError(format!("세션 잠금 획득 실패: {}", e)))?;
        *slot = TokenPair::from_parts(
            Some(pair.access_token.clone()),
            Some(pair.refresh_token.clone()),
        );
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| AppError::StorageError(format!("세션 잠금 획득 실패: {}", e)))?;
        *slot = None;
        Ok(())
    }
}
