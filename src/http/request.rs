use tokio::io::AsyncRead;

use super::{FormFields, Headers, PostedFileCollection};

/// 요청/업로드 본문 스트림. 복사 없이 소유권으로 전달됩니다.
pub type BodyStream = Box<dyn AsyncRead + Send + Unpin>;

/// 빈 본문 스트림을 만듭니다.
pub fn empty_body() -> BodyStream {
    Box::new(tokio::io::empty())
}

/// 표준 요청
///
/// 어댑터가 호스트 요청으로부터 한 번 만들어내며 이후 변경되지 않습니다.
/// 본문 스트림만은 소비 가능한 자원이므로 `take_body`로 꺼낼 수 있습니다.
pub struct Request {
    method: String,
    path: String,
    query: String,
    headers: Headers,
    form: FormFields,
    files: PostedFileCollection,
    body: BodyStream,
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        query: impl Into<String>,
        headers: Headers,
        form: FormFields,
        files: PostedFileCollection,
        body: BodyStream,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: query.into(),
            headers,
            form,
            files,
            body,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn form(&self) -> &FormFields {
        &self.form
    }

    pub fn files(&self) -> &PostedFileCollection {
        &self.files
    }

    /// 업로드 스트림을 읽을 때 쓰는 가변 접근
    pub fn files_mut(&mut self) -> &mut PostedFileCollection {
        &mut self.files
    }

    /// 본문 스트림을 꺼냅니다. 이후의 호출은 빈 스트림을 반환합니다.
    pub fn take_body(&mut self) -> BodyStream {
        std::mem::replace(&mut self.body, empty_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut headers = Headers::new();
        headers.append("Host", "example.com");

        let request = Request::new(
            "GET",
            "/about",
            "page=1",
            headers,
            FormFields::new(),
            PostedFileCollection::empty(),
            empty_body(),
        );

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/about");
        assert_eq!(request.query(), "page=1");
        assert_eq!(request.headers().first("host"), Some("example.com"));
        assert!(request.form().is_empty());
        assert!(request.files().is_empty());
    }
}
