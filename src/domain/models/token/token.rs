//! 액세스 토큰 클레임과 저장용 토큰 쌍
//!
//! 클라이언트는 액세스 토큰의 클레임을 읽어 만료 시점과 역할만 판단합니다.
//! 리프레시 토큰은 구조를 해석하지 않는 불투명한 문자열입니다.
use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 액세스 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (사용자 ID)
/// - `role`: 역할 이름 (예: `customer`, `admin`)
/// - `iat`: 토큰 발급 시간 (Unix timestamp)
/// - `exp`: 토큰 만료 시간 (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 토큰의 주체 (사용자 ID)
    #[serde(default, alias = "id", alias = "_id")]
    pub sub: String,
    /// 역할 이름. 없으면 빈 문자열이며 어떤 요구 역할과도 일치하지 않습니다.
    #[serde(default)]
    pub role: String,
    /// 토큰 발급 시간 (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// 만료까지 남은 시간 (초). 이미 만료되었으면 0 이하입니다.
    pub fn seconds_left(&self, now: DateTime<Utc>) -> i64 {
        self.exp - now.timestamp()
    }

    /// 선제 갱신 구간을 기준으로 토큰 상태를 분류합니다.
    ///
    /// 경계값은 갱신 쪽에 포함됩니다: 남은 시간이 정확히 `refresh_window_secs`이면
    /// `NearExpiry`입니다.
    ///
    /// ```text
    /// seconds_left <= 0                         → Expired
    /// 0 < seconds_left <= refresh_window_secs   → NearExpiry
    /// seconds_left > refresh_window_secs        → Fresh
    /// ```
    pub fn freshness(&self, now: DateTime<Utc>, refresh_window_secs: i64) -> TokenFreshness {
        let seconds_left = self.seconds_left(now);
        if seconds_left <= 0 {
            TokenFreshness::Expired { seconds_left }
        } else if seconds_left <= refresh_window_secs {
            TokenFreshness::NearExpiry { seconds_left }
        } else {
            TokenFreshness::Fresh { seconds_left }
        }
    }
}

/// 액세스 토큰의 만료 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFreshness {
    /// 갱신 없이 사용 가능
    Fresh { seconds_left: i64 },
    /// 아직 유효하지만 선제 갱신 구간 안
    NearExpiry { seconds_left: i64 },
    /// 만료됨
    Expired { seconds_left: i64 },
}

impl TokenFreshness {
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, TokenFreshness::Fresh { .. })
    }

    pub fn seconds_left(&self) -> i64 {
        match *self {
            TokenFreshness::Fresh { seconds_left }
            | TokenFreshness::NearExpiry { seconds_left }
            | TokenFreshness::Expired { seconds_left } => seconds_left,
        }
    }
}

/// 저장소에 보관되는 토큰 쌍
///
/// 액세스 토큰과 리프레시 토큰은 항상 함께 기록되고 함께 삭제됩니다.
/// 둘 중 하나라도 비어 있으면 세션이 없는 것으로 취급합니다.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// 저장소에서 읽은 두 값으로 토큰 쌍을 구성합니다.
    ///
    /// 둘 중 하나라도 없거나 빈 문자열이면 `None`입니다.
    pub fn from_parts(access_token: Option<String>, refresh_token: Option<String>) -> Option<Self> {
        match (access_token, refresh_token) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                Some(Self::new(access, refresh))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 토큰 값은 로그에 남기지 않음
        f.debug_struct("TokenPair")
            .field("access_token", &format_args!("<{} bytes>", self.access_token.len()))
            .field("refresh_token", &format_args!("<{} bytes>", self.refresh_token.len()))
            .finish()
    }
}
