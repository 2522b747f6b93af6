use std::io::Cursor;

use request_pipeline::adapter::{adapt_request, RawRequest, RawUpload};
use request_pipeline::http::{empty_body, BodyStream};
use tokio::io::AsyncReadExt;

/// 테스트용 원시 요청
struct MockRawRequest {
    method: String,
    path: String,
    query: String,
    headers: Vec<(String, Vec<String>)>,
    form: Vec<(String, Vec<String>)>,
    uploads: Vec<RawUpload>,
    body: Option<BodyStream>,
}

impl MockRawRequest {
    fn get(path: &str) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.to_string(),
            query: String::new(),
            headers: Vec::new(),
            form: Vec::new(),
            uploads: Vec::new(),
            body: None,
        }
    }

    fn post(path: &str) -> Self {
        Self {
            method: "POST".to_string(),
            ..Self::get(path)
        }
    }
}

impl RawRequest for MockRawRequest {
    fn http_method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn headers(&self) -> &[(String, Vec<String>)] {
        &self.headers
    }

    fn form(&self) -> &[(String, Vec<String>)] {
        &self.form
    }

    fn take_uploads(&mut self) -> Vec<RawUpload> {
        std::mem::take(&mut self.uploads)
    }

    fn take_body(&mut self) -> BodyStream {
        self.body.take().unwrap_or_else(empty_body)
    }
}

fn upload(name: &str, content_type: &str, content: &'static [u8]) -> RawUpload {
    RawUpload {
        file_name: name.to_string(),
        content_type: content_type.to_string(),
        content_length: content.len() as u64,
        stream: Box::new(Cursor::new(content)),
    }
}

#[test]
fn test_form_method_override() {
    let mut raw = MockRawRequest::post("/items/1");
    raw.form
        .push(("_method".to_string(), vec!["DELETE".to_string()]));

    let request = adapt_request(raw);
    assert_eq!(request.method(), "DELETE");
}

#[test]
fn test_method_is_verbatim_without_override() {
    let raw = MockRawRequest::post("/items");
    let request = adapt_request(raw);
    assert_eq!(request.method(), "POST");
}

#[test]
fn test_override_value_is_not_normalized() {
    let mut raw = MockRawRequest::post("/items/1");
    raw.form
        .push(("_method".to_string(), vec!["patch".to_string()]));

    let request = adapt_request(raw);
    assert_eq!(request.method(), "patch");
}

#[test]
fn test_headers_are_folded_case_insensitively() {
    let mut raw = MockRawRequest::get("/");
    raw.headers
        .push(("ACCEPT".to_string(), vec!["text/html".to_string()]));
    raw.headers
        .push(("accept".to_string(), vec!["application/json".to_string()]));

    let request = adapt_request(raw);
    assert_eq!(
        request.headers().get("Accept"),
        &["text/html", "application/json"]
    );
    // 없는 헤더는 None이 아니라 빈 컬렉션이다
    assert!(request.headers().get("Authorization").is_empty());
}

#[test]
fn test_uploads_are_lifted_in_host_order() {
    let mut raw = MockRawRequest::post("/upload");
    raw.uploads = vec![
        upload("TestFile0", "text/html", b"Some test context text"),
        upload("TestFile1", "text/plain", b"second"),
        upload("TestFile2", "image/png", b"third!!"),
    ];

    let request = adapt_request(raw);

    let files = request.files();
    assert_eq!(files.len(), 3);
    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["TestFile0", "TestFile1", "TestFile2"]);
    let types: Vec<&str> = files.iter().map(|f| f.content_type.as_str()).collect();
    assert_eq!(types, vec!["text/html", "text/plain", "image/png"]);
    let lengths: Vec<u64> = files.iter().map(|f| f.content_length).collect();
    assert_eq!(lengths, vec![22, 6, 7]);
}

#[tokio::test]
async fn test_upload_stream_is_forwarded() {
    let mut raw = MockRawRequest::post("/upload");
    raw.uploads = vec![upload("TestFile0", "text/html", b"Some test context text")];

    let mut request = adapt_request(raw);
    let file = request.files_mut().get_mut("TestFile0").unwrap();

    let mut content = Vec::new();
    file.input_stream.read_to_end(&mut content).await.unwrap();
    assert_eq!(content, b"Some test context text");
}

#[test]
fn test_form_fields_are_lifted() {
    let mut raw = MockRawRequest::post("/");
    raw.form.push(("Name".to_string(), vec!["Chris".to_string()]));
    raw.form.push((
        "tag".to_string(),
        vec!["a".to_string(), "b".to_string()],
    ));

    let request = adapt_request(raw);
    let form = request.form();

    assert_eq!(form.get("Name"), Some("Chris"));
    assert_eq!(&form["Name"], "Chris");
    assert_eq!(form.get_all("tag"), &["a", "b"]);
    assert_eq!(form.get_all("Name"), &["Chris"]);
}

#[tokio::test]
async fn test_body_stream_is_moved() {
    let mut raw = MockRawRequest::post("/");
    raw.body = Some(Box::new(Cursor::new(&b"raw body bytes"[..])));

    let mut request = adapt_request(raw);
    let mut body = request.take_body();

    let mut content = Vec::new();
    body.read_to_end(&mut content).await.unwrap();
    assert_eq!(content, b"raw body bytes");
}
