use std::fmt;
use crate::config::SessionConfig;

/// 요구되는 역할 정보
///
/// 역할 비교는 대소문자를 구분하는 정확한 일치입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredRole {
    /// 특정 단일 역할이 필요
    Single(String),
    /// 여러 역할 중 하나라도 있으면 허용 (OR 조건)
    Any(Vec<String>),
}

impl RequiredRole {
    /// 토큰의 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, role: &str) -> bool {
        match self {
            RequiredRole::Single(required_role) => required_role == role,
            RequiredRole::Any(required_roles) => required_roles.iter().any(|r| r == role),
        }
    }
}

impl fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredRole::Single(role) => write!(f, "{}", role),
            RequiredRole::Any(roles) => write!(f, "any of [{}]", roles.join(", ")),
        }
    }
}

/// 가드 평가 요청
///
/// 보호된 화면 하나가 마운트될 때 만들어집니다.
///
/// ```rust,ignore
/// let request = GuardRequest::new()
///     .require("admin")
///     .return_to("/admin/products");
///
/// match guard.evaluate(&request).await {
///     GuardDecision::Allow => render_products(),
///     _ => {} // 이미 리다이렉트됨
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuardRequest {
    /// 요구 역할 (없으면 로그인 여부만 확인)
    pub required_role: Option<RequiredRole>,
    /// 거부 시 이동할 경로 (없으면 설정의 로그인 경로)
    pub redirect_target: Option<String>,
    /// 로그인 후 돌아올 경로
    pub return_to: Option<String>,
}

impl GuardRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, role: impl Into<String>) -> Self {
        self.required_role = Some(RequiredRole::Single(role.into()));
        self
    }

    pub fn require_any<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_role = Some(RequiredRole::Any(roles.into_iter().map(Into::into).collect()));
        self
    }

    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect_target = Some(target.into());
        self
    }

    pub fn return_to(mut self, path: impl Into<String>) -> Self {
        self.return_to = Some(path.into());
        self
    }

    /// 거부 시 실제로 이동할 위치
    ///
    /// 복귀 경로가 있으면 `?{return_param}={인코딩된 경로}`를 붙이며,
    /// 대상에 이미 쿼리가 있으면 `&`로 잇습니다.
    pub fn redirect_location(&self, config: &SessionConfig) -> String {
        let target = self
            .redirect_target
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&config.login_route);

        match self.return_to.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => {
                let separator = if target.contains('?') { '&' } else { '?' };
                format!(
                    "{}{}{}={}",
                    target,
                    separator,
                    config.return_param,
                    urlencoding::encode(path)
                )
            }
            None => target.to_string(),
        }
    }
}
