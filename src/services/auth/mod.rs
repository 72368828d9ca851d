//! 인증 관련 서비스 모듈
//!
//! 액세스 토큰 해석과 원격 인증 API 통신을 담당합니다.
//!
//! # Features
//!
//! - 액세스 토큰 클레임 디코딩 (선택적 HS256/RS256 서명 검증)
//! - 프로필 조회 (계정 정지 여부 확인)
//! - 리프레시 토큰을 이용한 토큰 쌍 갱신
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthApi, HttpAuthApi, TokenService};
//!
//! let token_service = TokenService::new(&config.verification)?;
//! let claims = token_service.decode(&pair.access_token)?;
//!
//! let api = HttpAuthApi::new(&config)?;
//! let new_pair = api.refresh(&pair.refresh_token).await?;
//! ```

pub mod auth_api;
pub mod token_service;

pub use auth_api::*;
pub use token_service::*;
