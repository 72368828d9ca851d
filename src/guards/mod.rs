//! 가드 모듈
//!
//! 보호된 화면이 마운트되기 전에 실행되는 세션 가드와, 가드가 의존하는
//! 시계/화면 이동 추상화를 제공합니다. 백엔드 미들웨어가 요청마다 토큰을
//! 검증하는 것처럼, 클라이언트 가드는 화면 마운트마다 세션을 검증합니다.
//!
//! # 제공 구성요소
//!
//! ### 1. 세션 가드 (SessionGuard)
//! - 저장된 토큰 쌍 확인
//! - 만료 15분 전부터 선제 갱신 (동시 평가 간 단일 갱신)
//! - 요구 역할 검사
//! - 계정 정지 여부 확인
//!
//! ### 2. 주입 지점
//! - [`Clock`] - 현재 시각 (테스트에서는 고정 시계)
//! - [`Navigator`] - 리다이렉트와 사용자 알림
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use crate::guards::SessionGuard;
//!
//! let guard = SessionGuard::new(config, store, auth_api, navigator)?;
//!
//! // 로그인 여부만 확인
//! guard.protect(None, None).await;
//!
//! // 관리자 화면
//! guard.protect(Some("admin"), Some("/account")).await;
//! ```

pub mod clock;
pub mod navigator;
pub mod session_guard;

pub use clock::{Clock, FixedClock, SystemClock};
pub use navigator::{LogNavigator, Navigator};
pub use session_guard::SessionGuard;
