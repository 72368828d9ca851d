//! # Domain Layer
//!
//! 세션 가드의 도메인 계층입니다. 외부 의존성 없이 순수한 데이터 구조와
//! 판단 규칙(만료 분류, 역할 일치, 거부 사유별 부수 효과)만 담습니다.
//!
//! - [`models`] - 토큰, 프로필, 인증 주체, 가드 결정
//! - [`dto`] - 인증 API 요청/응답 본문

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
