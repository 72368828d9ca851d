//! 실행 환경 및 세션 저장소 설정 관리 모듈
//!
//! 실행 환경 구분과 토큰 저장소(파일 위치, 키 이름) 관련 설정을 관리합니다.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// 애플리케이션 실행 환경
///
/// `ENVIRONMENT` 환경 변수로 결정되며, 지정하지 않으면 운영 환경으로 간주합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 현재 실행 환경을 반환합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열을 실행 환경으로 변환합니다. 알 수 없는 값은 `Production`입니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 서명 검증 키 없이 클레임을 디코딩할 때 경고를 남길지 여부
    pub fn warns_on_unverified_tokens(&self) -> bool {
        matches!(self, Environment::Staging | Environment::Production)
    }
}

/// 토큰 저장소 설정
///
/// 브라우저 로컬 스토리지를 대신하는 파일 기반 저장소의 위치와
/// 액세스/리프레시 토큰을 저장할 키 이름을 정의합니다.
///
/// # 환경 변수
///
/// ```bash
/// export SESSION_STORE_PATH=".storefront/session.json"
/// export SESSION_ACCESS_KEY="accessToken"
/// export SESSION_REFRESH_KEY="refreshToken"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// 세션 파일 경로
    pub path: PathBuf,
    /// 액세스 토큰 키 이름
    pub access_key: String,
    /// 리프레시 토큰 키 이름
    pub refresh_key: String,
}

impl StoreConfig {
    pub const DEFAULT_PATH: &'static str = ".storefront/session.json";
    pub const DEFAULT_ACCESS_KEY: &'static str = "accessToken";
    pub const DEFAULT_REFRESH_KEY: &'static str = "refreshToken";

    /// 환경 변수에서 저장소 설정을 읽습니다.
    pub fn from_env() -> Self {
        Self {
            path: PathBuf::from(
                env::var("SESSION_STORE_PATH").unwrap_or_else(|_| Self::DEFAULT_PATH.to_string()),
            ),
            access_key: env::var("SESSION_ACCESS_KEY")
                .unwrap_or_else(|_| Self::DEFAULT_ACCESS_KEY.to_string()),
            refresh_key: env::var("SESSION_REFRESH_KEY")
                .unwrap_or_else(|_| Self::DEFAULT_REFRESH_KEY.to_string()),
        }
    }

    /// 기본 키 이름으로 지정한 경로를 사용하는 설정을 만듭니다.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            access_key: Self::DEFAULT_ACCESS_KEY.to_string(),
            refresh_key: Self::DEFAULT_REFRESH_KEY.to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::at(Self::DEFAULT_PATH)
    }
}

/// 숫자형 환경 변수를 파싱합니다.
///
/// 값이 없으면 기본값을, 파싱에 실패하면 에러 로그를 남기고 기본값을 사용합니다.
pub(crate) fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            log::error!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
            default
        }),
        Err(_) => default,
    }
}
