//! 클라이언트 세션 수명주기 서비스

pub mod session_manager;

pub use session_manager::*;
