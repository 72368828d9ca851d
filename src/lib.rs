//! 스토어프론트 세션 가드
//!
//! 쇼핑몰 클라이언트의 보호된 화면(관리자 화면, 마이페이지 등)을 위한
//! 세션 검증 라이브러리입니다. 저장된 액세스/리프레시 토큰 쌍을 바탕으로
//! 화면 렌더링 허용, 토큰 갱신, 로그인 화면 리다이렉트 중 하나를 결정합니다.
//!
//! # Features
//!
//! - **선제 갱신**: 만료 15분 전부터 리프레시 토큰으로 토큰 쌍 교체
//! - **역할 검사**: 액세스 토큰 클레임의 역할과 요구 역할 비교
//! - **정지 계정 차단**: 인증 API 프로필 조회로 `suspended` 계정 로그아웃
//! - **세션 저장소**: 메모리/파일 기반 토큰 쌍 저장 (쌍 단위 원자적 교체)
//! - **선택적 서명 검증**: HS256 비밀키 또는 RS256 공개키
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │     Guards      │ ← 화면 마운트 시 평가, 리다이렉트/알림
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 토큰 해석, 인증 API, 세션 수립/종료
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     Storage     │ ← 토큰 쌍 보관
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Memory / File  │ ← 저장 매체
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_session::config::{SessionConfig, StoreConfig};
//! use storefront_session::guards::{LogNavigator, SessionGuard};
//! use storefront_session::services::auth::HttpAuthApi;
//! use storefront_session::storage::FileSessionStore;
//!
//! let config = SessionConfig::from_env()?;
//! let guard = SessionGuard::new(
//!     config.clone(),
//!     Arc::new(FileSessionStore::new(StoreConfig::from_env())),
//!     Arc::new(HttpAuthApi::new(&config)?),
//!     Arc::new(LogNavigator::new()),
//! )?;
//!
//! if guard.protect(Some("admin"), None).await.is_allowed() {
//!     // 관리자 화면 렌더링
//! }
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod guards;
pub mod services;
pub mod storage;
