//! # Session Storage
//!
//! 액세스/리프레시 토큰 쌍을 보관하는 저장소 추상화입니다.
//!
//! 가드는 전역 저장소에 직접 접근하지 않고 [`SessionStore`] 구현체를 주입받습니다.
//! 모든 구현체는 토큰 쌍을 하나의 논리적 단위로 기록해야 합니다. 동시에 실행되는
//! 가드 평가가 저장소를 읽더라도 이전 액세스 토큰과 새 리프레시 토큰이 섞인
//! 상태를 관찰할 수 없어야 합니다.
//!
//! ## 구현체
//!
//! | 구현체 | 용도 |
//! |--------|------|
//! | [`MemorySessionStore`] | 테스트, 단일 프로세스 내 세션 |
//! | [`FileSessionStore`] | 재시작 후에도 유지되는 키-값 파일 (로컬 스토리지 대체) |

pub mod file_store;
pub mod memory_store;

pub use file_store::*;
pub use memory_store::*;

use crate::domain::models::token::TokenPair;
use crate::errors::errors::AppResult;

/// 토큰 쌍 저장소
pub trait SessionStore: Send + Sync {
    /// 저장된 토큰 쌍을 읽습니다. 하나라도 없으면 `None`입니다.
    fn load(&self) -> AppResult<Option<TokenPair>>;

    /// 두 토큰을 한 번에 교체합니다.
    fn save(&self, pair: &TokenPair) -> AppResult<()>;

    /// 두 토큰을 함께 삭제합니다.
    fn clear(&self) -> AppResult<()>;
}
