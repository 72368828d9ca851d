//! 인증 API에서 조회하는 사용자 프로필
//!
//! 프로필은 로컬에 저장하지 않으며 가드 평가마다 새로 조회합니다.
//! 가드는 `status`만 판단에 사용합니다.

use serde::{Deserialize, Serialize};

/// 계정 상태
///
/// 백엔드 표기(`not_verified`, `notVerified`, `NOT-VERIFIED` 등)를 정규화하여 받습니다.
/// 알 수 없는 값은 `Unknown`이며 정지 상태로 취급하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    Active,
    NotVerified,
    Suspended,
    Unknown(String),
}

impl AccountStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::NotVerified => "not_verified",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, AccountStatus::Suspended)
    }
}

impl From<String> for AccountStatus {
    fn from(raw: String) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "active" => AccountStatus::Active,
            "notverified" => AccountStatus::NotVerified,
            "suspended" => AccountStatus::Suspended,
            _ => AccountStatus::Unknown(raw),
        }
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.as_str().to_string()
    }
}

/// 프로필의 역할 참조
///
/// 백엔드에 따라 역할 이름 문자열이거나 `{ "_id": ..., "name": ... }` 객체입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Name(String),
    Object {
        #[serde(default, alias = "_id")]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl RoleRef {
    /// 역할 이름 (객체에 이름이 없으면 `None`)
    pub fn name(&self) -> Option<&str> {
        match self {
            RoleRef::Name(name) => Some(name),
            RoleRef::Object { name, .. } => name.as_deref(),
        }
    }
}

/// 사용자 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// 사용자 ID
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    /// 이메일
    #[serde(default)]
    pub email: Option<String>,
    /// 계정 상태
    pub status: AccountStatus,
    /// 역할 참조
    #[serde(default)]
    pub role: Option<RoleRef>,
}

impl UserProfile {
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().and_then(RoleRef::name)
    }
}
