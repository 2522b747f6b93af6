use std::fmt;

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// Set-Cookie 헤더의 만료 시각 표기 (HTTP 날짜)
const HTTP_DATE: &[FormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// 응답 쿠키
///
/// 직렬화 형태는 `Display` 구현이 결정하며, 응답 기록기는 이 문자열을
/// 그대로 `Set-Cookie` 값으로 내보냅니다.
#[derive(Debug, Clone)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub expires: Option<OffsetDateTime>,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub secure: bool,
    pub http_only: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires: None,
            domain: None,
            path: None,
            secure: false,
            http_only: false,
        }
    }

    pub fn with_expires(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn http_only(mut self) -> Self {
        self.http_only = true;
        self
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(expires) = &self.expires {
            if let Ok(stamp) = expires.format(&HTTP_DATE) {
                write!(f, "; expires={}", stamp)?;
            }
        }
        if let Some(domain) = &self.domain {
            write!(f, "; domain={}", domain)?;
        }
        if let Some(path) = &self.path {
            write!(f, "; path={}", path)?;
        }
        if self.secure {
            write!(f, "; Secure")?;
        }
        if self.http_only {
            write!(f, "; HttpOnly")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_minimal_cookie() {
        let cookie = Cookie::new("theme", "dark");
        assert_eq!(cookie.to_string(), "theme=dark");
    }

    #[test]
    fn test_cookie_with_attributes() {
        let cookie = Cookie::new("session", "abc")
            .with_path("/")
            .http_only();
        assert_eq!(cookie.to_string(), "session=abc; path=/; HttpOnly");
    }

    #[test]
    fn test_expires_uses_http_date() {
        let cookie = Cookie::new("session", "abc")
            .with_expires(datetime!(2026-01-01 00:00:00 UTC));
        assert_eq!(
            cookie.to_string(),
            "session=abc; expires=Thu, 01 Jan 2026 00:00:00 GMT"
        );
    }
}
