use bytes::Bytes;
use hyper::StatusCode;

use super::Cookie;

/// 표준 응답
///
/// 헤더와 쿠키는 추가된 순서를 그대로 유지합니다. 응답 기록기는 이 순서를
/// 바꾸지 않고 호스트로 내보냅니다.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    cookies: Vec<Cookie>,
    body: Bytes,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: Vec::new(),
            cookies: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::new()
        }
    }

    /// 상태 코드와 본문으로 응답을 만듭니다.
    pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::new()
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// 빌더 형태의 헤더 추가
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// 이름에 해당하는 첫 헤더 값 (대소문자 무시)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// 이름에 해당하는 모든 헤더 값 (대소문자 무시)
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header_value(name).is_some()
    }

    pub fn add_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }

    /// 빌더 형태의 쿠키 추가
    pub fn cookie(mut self, cookie: Cookie) -> Self {
        self.add_cookie(cookie);
        self
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_order_is_addition_order() {
        let response = Response::new()
            .header("Content-Type", "text/plain")
            .header("X-First", "1")
            .header("X-Second", "2");

        let names: Vec<&str> = response.headers().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Content-Type", "X-First", "X-Second"]);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = Response::new().header("WWW-Authenticate", "Basic realm=\"r\"");
        assert_eq!(
            response.header_value("www-authenticate"),
            Some("Basic realm=\"r\"")
        );
        assert!(response.has_header("WWW-AUTHENTICATE"));
    }

    #[test]
    fn test_cookie_order_is_addition_order() {
        let response = Response::new()
            .cookie(Cookie::new("first", "1"))
            .cookie(Cookie::new("second", "2"));

        let names: Vec<&str> = response.cookies().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
