//! 스토어프론트 세션 가드 CLI
//!
//! 파일 저장소에 보관된 세션으로 가드를 한 번 평가하고 결과를 출력합니다.
//! 배포 전 점검이나 스크립트에서 현재 세션이 보호된 화면에 들어갈 수 있는지
//! 확인하는 용도입니다.
//!
//! ```bash
//! storefront-session                   # 로그인 여부만 확인
//! storefront-session admin             # 관리자 역할 요구
//! storefront-session admin /admin/orders
//! ```
//!
//! 종료 코드: 허용 `0`, 설정 오류 `1`, 거부 `2`

use std::process::ExitCode;
use std::sync::Arc;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use storefront_session::config::{Environment, SessionConfig, StoreConfig};
use storefront_session::domain::models::auth::GuardRequest;
use storefront_session::errors::errors::AppResult;
use storefront_session::guards::{LogNavigator, SessionGuard};
use storefront_session::services::auth::HttpAuthApi;
use storefront_session::services::session::SessionManager;
use storefront_session::storage::FileSessionStore;

#[tokio::main]
async fn main() -> ExitCode {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 세션 가드 점검 시작 ({:?})", Environment::current());

    let mut args = std::env::args().skip(1);
    let required_role = args.next().filter(|role| !role.is_empty());
    let return_to = args.next();

    let navigator = Arc::new(LogNavigator::new());
    let (guard, manager) = match build_guard(navigator.clone()) {
        Ok(built) => built,
        Err(e) => {
            error!("가드 초기화 실패: {}", e);
            return ExitCode::from(1);
        }
    };

    match manager.current_user() {
        Ok(Some(user)) => info!("👤 저장된 세션: 사용자 ID {} ({})", user.user_id, user.role),
        Ok(None) => info!("저장된 세션이 없습니다"),
        Err(e) => error!("세션 저장소 읽기 실패: {}", e),
    }

    let mut request = GuardRequest::new();
    if let Some(role) = required_role {
        request = request.require(role);
    }
    if let Some(path) = return_to {
        request = request.return_to(path);
    }

    let decision = guard.evaluate(&request).await;
    println!("{}", decision);

    if decision.is_allowed() {
        ExitCode::SUCCESS
    } else {
        if let Some(location) = navigator.last_redirect() {
            println!("redirect: {}", location);
        }
        ExitCode::from(2)
    }
}

/// 환경 변수로 가드와 세션 관리자를 구성합니다
///
/// 세션은 `SESSION_STORE_PATH`의 파일 저장소에서 읽고,
/// 인증 API는 `AUTH_API_BASE_URL`로 호출합니다. 세션 관리자는 가드와
/// 같은 저장소와 토큰 검증 규칙을 사용합니다.
fn build_guard(navigator: Arc<LogNavigator>) -> AppResult<(SessionGuard, SessionManager)> {
    let config = SessionConfig::from_env()?;
    let store_config = StoreConfig::from_env();

    info!("📁 세션 저장소: {}", store_config.path.display());
    info!("📡 인증 API: {}", config.api_base_url);

    let auth_api = Arc::new(HttpAuthApi::new(&config)?);
    let store = Arc::new(FileSessionStore::new(store_config));

    let guard = SessionGuard::new(config, store.clone(), auth_api, navigator)?;
    let manager = SessionManager::new(store, guard.token_service());

    Ok((guard, manager))
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이라 로드 결과는 기록하지 않음
    match profile.as_str() {
        "prod" => {
            dotenv::from_filename(".env.prod").ok();
        }
        "dev" => {
            dotenv::from_filename(".env.dev").ok();
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,storefront_session=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,storefront_session=debug"));
}
