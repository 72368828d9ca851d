use serde::Serialize;

/// 토큰 갱신 요청 DTO
///
/// 인증 API의 갱신 엔드포인트에 JSON 본문으로 전송됩니다.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    pub refresh_token: &'a str,
}
