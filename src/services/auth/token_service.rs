//! 액세스 토큰 해석 서비스
//!
//! 저장된 액세스 토큰에서 클레임을 추출합니다. 만료 여부는 가드가 직접
//! 판단하므로 여기서는 `exp`를 검증하지 않고, 만료된 토큰도 디코딩합니다.
//!
//! 검증 키가 설정되지 않으면 서명을 확인하지 않습니다. 이 경우 역할 클레임은
//! 화면 흐름을 위한 참고값일 뿐이며 권한 집행은 백엔드가 담당합니다.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use jsonwebtoken::errors::ErrorKind;
use crate::config::TokenVerification;
use crate::domain::models::token::AccessClaims;
use crate::errors::errors::{AppError, AppResult};

/// 액세스 토큰 해석 서비스
pub struct TokenService {
    decoding_key: DecodingKey,
    validation: Validation,
    verifying: bool,
}

impl TokenService {
    /// 검증 방식에 맞는 디코딩 키와 검증 규칙을 준비합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConfigError` - RS256 공개키 PEM 파싱 실패
    pub fn new(verification: &TokenVerification) -> AppResult<Self> {
        let (decoding_key, validation) = match verification {
            TokenVerification::Disabled => return Ok(Self::unverified()),
            TokenVerification::Hs256(secret) => (
                DecodingKey::from_secret(secret.as_bytes()),
                Validation::new(Algorithm::HS256),
            ),
            TokenVerification::Rs256Pem(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AppError::ConfigError(format!("RS256 공개키 파싱 실패: {}", e)))?,
                Validation::new(Algorithm::RS256),
            ),
        };

        Ok(Self {
            decoding_key,
            validation: relax_expiry(validation),
            verifying: true,
        })
    }

    /// 서명 검증 없이 클레임만 읽는 서비스
    pub fn unverified() -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();

        Self {
            decoding_key: DecodingKey::from_secret(&[]),
            validation: relax_expiry(validation),
            verifying: false,
        }
    }

    /// 서명을 검증하는지 여부
    pub fn is_verifying(&self) -> bool {
        self.verifying
    }

    /// 액세스 토큰의 클레임을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::TokenError` - 형식 오류, 서명 불일치, 필수 클레임 누락
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let claims = token_service.decode(&pair.access_token)?;
    /// println!("role={} exp={}", claims.role, claims.exp);
    /// ```
    pub fn decode(&self, token: &str) -> AppResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => {
                    AppError::TokenError("액세스 토큰 서명이 올바르지 않습니다".to_string())
                }
                ErrorKind::InvalidAlgorithm => {
                    AppError::TokenError("허용되지 않은 서명 알고리즘입니다".to_string())
                }
                ErrorKind::MissingRequiredClaim(claim) => {
                    AppError::TokenError(format!("필수 클레임 누락: {}", claim))
                }
                _ => AppError::TokenError(format!("액세스 토큰 디코딩 실패: {}", e)),
            })
    }
}

// 만료는 가드가 선제 갱신 구간과 함께 판단
fn relax_expiry(mut validation: Validation) -> Validation {
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation
}
