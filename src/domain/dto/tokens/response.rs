use serde::Deserialize;
use crate::domain::models::token::TokenPair;

/// 갱신 응답의 토큰 본문
///
/// 필드 이름은 snake_case와 camelCase를 모두 받습니다.
#[derive(Debug, Deserialize)]
pub struct RefreshedTokens {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// 토큰 갱신 응답 DTO
///
/// `{ "success": true, "data": { ... } }` 형태의 API 응답 래퍼와
/// 토큰 본문만 있는 응답을 모두 받습니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RefreshResponse {
    Wrapped { data: RefreshedTokens },
    Bare(RefreshedTokens),
}

impl RefreshResponse {
    /// 새 토큰 쌍으로 변환합니다.
    ///
    /// 응답에 리프레시 토큰이 없으면(회전하지 않는 백엔드) 제출한 리프레시 토큰을
    /// 그대로 사용합니다. 쌍은 항상 두 값을 함께 가집니다.
    pub fn into_pair(self, submitted_refresh_token: &str) -> TokenPair {
        let tokens = match self {
            RefreshResponse::Wrapped { data } => data,
            RefreshResponse::Bare(tokens) => tokens,
        };

        let refresh_token = tokens
            .refresh_token
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| submitted_refresh_token.to_string());

        TokenPair::new(tokens.access_token, refresh_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_camel_case_response() {
        let response: RefreshResponse =
            serde_json::from_str(r#"{"accessToken":"a2","refreshToken":"r2"}"#).unwrap();
        assert_eq!(response.into_pair("r1"), TokenPair::new("a2", "r2"));
    }

    #[test]
    fn test_wrapped_snake_case_response() {
        let response: RefreshResponse = serde_json::from_str(
            r#"{"success":true,"data":{"access_token":"a2","refresh_token":"r2"},"message":null}"#,
        )
        .unwrap();
        assert_eq!(response.into_pair("r1"), TokenPair::new("a2", "r2"));
    }

    #[test]
    fn test_missing_refresh_token_keeps_submitted_one() {
        let response: RefreshResponse = serde_json::from_str(r#"{"accessToken":"a2"}"#).unwrap();
        assert_eq!(response.into_pair("r1"), TokenPair::new("a2", "r1"));
    }

    #[test]
    fn test_missing_access_token_is_rejected() {
        assert!(serde_json::from_str::<RefreshResponse>(r#"{"refreshToken":"r2"}"#).is_err());
    }
}
