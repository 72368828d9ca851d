//! 화면 이동과 사용자 알림
//!
//! 가드의 모든 거부 결과는 전체 페이지 리다이렉트로 끝납니다.
//! 역할 불일치와 계정 정지는 리다이렉트 전에 알림을 먼저 띄웁니다.

use std::sync::Mutex;

/// 화면 이동 및 알림 인터페이스
pub trait Navigator: Send + Sync {
    /// 지정한 위치로 전체 페이지 리다이렉트
    fn redirect(&self, location: &str);

    /// 사용자에게 보이는 알림
    fn notify(&self, message: &str);
}

/// 로그로 이동과 알림을 기록하는 Navigator
///
/// CLI처럼 실제 화면이 없는 환경에서 사용하며, 마지막 리다이렉트 위치를 보관합니다.
#[derive(Debug, Default)]
pub struct LogNavigator {
    last_redirect: Mutex<Option<String>>,
}

impl LogNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막으로 요청된 리다이렉트 위치
    pub fn last_redirect(&self) -> Option<String> {
        self.last_redirect.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Navigator for LogNavigator {
    fn redirect(&self, location: &str) {
        log::info!("↪️ 리다이렉트: {}", location);
        if let Ok(mut slot) = self.last_redirect.lock() {
            *slot = Some(location.to_string());
        }
    }

    fn notify(&self, message: &str) {
        log::warn!("📢 {}", message);
    }
}
