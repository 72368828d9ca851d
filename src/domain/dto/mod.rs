//! # Data Transfer Objects (DTO) Module
//!
//! 인증 API 경계에서 주고받는 JSON 본문을 정의하는 모듈입니다.
//! 필드 이름은 외부 계약이므로, 응답 DTO는 snake_case/camelCase 별칭과
//! 응답 래퍼 유무를 모두 받아들이고 도메인 모델로 변환합니다.
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── tokens/     # 토큰 갱신 요청/응답
//! └── profile/    # 프로필 조회 응답
//! ```

pub mod profile;
pub mod tokens;

pub use profile::*;
pub use tokens::*;
