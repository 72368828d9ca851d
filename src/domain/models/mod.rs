//! # Domain Models Module
//!
//! 세션 가드가 다루는 도메인 모델을 정의하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! - [`token`] - 액세스 토큰 클레임, 저장용 토큰 쌍, 만료 상태
//! - [`profile`] - 원격 사용자 프로필과 계정 상태
//! - [`auth`] - 인증된 사용자, 요구 역할, 가드 요청
//! - [`guard`] - 가드 결정과 거부 사유
//!
//! ## 생명주기
//!
//! ```text
//! 로그인/OTP 성공 ──► TokenPair 저장
//!                        │
//!                        ▼
//!              가드 평가 (화면 마운트마다)
//!                 │              │
//!         갱신 성공: 쌍 교체   복구 불가: 쌍 삭제
//! ```

pub mod auth;
pub mod guard;
pub mod profile;
pub mod token;

pub use auth::*;
pub use guard::*;
pub use profile::*;
pub use token::*;
