//! # Configuration Module
//!
//! 세션 가드와 클라이언트 상태 계층의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 토큰 저장소 관련 설정
//! - [`session_config`] - 인증 API, 가드 정책, 토큰 검증 관련 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리
//!
//! 실행 바이너리는 `PROFILE`에 따라 `.env.dev`, `.env.prod` 파일을 로드합니다.
//!
//! ### 2. 주입 가능한 설정
//!
//! 정적 getter(`AuthApiConfig::base_url()` 등)는 환경 변수를 읽기만 하고,
//! 실제 동작에 쓰이는 값은 [`SessionConfig`]로 모아서 가드에 주입합니다.
//! 테스트는 환경 변수를 건드리지 않고 `SessionConfig`를 직접 구성합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{Environment, SessionConfig, StoreConfig};
//!
//! let env = Environment::current();
//! let session = SessionConfig::from_env()?;
//! let store = StoreConfig::from_env();
//! ```

pub mod data_config;
pub mod session_config;

pub use data_config::*;
pub use session_config::*;
