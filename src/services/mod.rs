//! 서비스 계층 모듈
//!
//! 도메인별로 모듈화되어 인증 API 통신과 클라이언트 세션 관리를 담당합니다.
//!
//! # Features
//!
//! - 액세스 토큰 해석 및 서명 검증
//! - 원격 인증 API (프로필 조회, 토큰 갱신)
//! - 로그인/로그아웃 시 세션 수립 및 삭제
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::HttpAuthApi, session::SessionManager};
//!
//! let manager = SessionManager::new(store, token_service);
//! manager.establish(pair_from_login)?;
//! ```

pub mod auth;
pub mod session;
