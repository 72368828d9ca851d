use serde::Deserialize;
use crate::domain::models::profile::UserProfile;

/// 프로필 조회 응답 DTO
///
/// 백엔드가 프로필을 `data` 또는 `user` 필드로 감싸서 주거나
/// 프로필 객체 자체를 주는 경우를 모두 받습니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    Data { data: UserProfile },
    User { user: UserProfile },
    Bare(UserProfile),
}

impl ProfileResponse {
    pub fn into_profile(self) -> UserProfile {
        match self {
            ProfileResponse::Data { data } => data,
            ProfileResponse::User { user } => user,
            ProfileResponse::Bare(profile) => profile,
        }
    }
}
