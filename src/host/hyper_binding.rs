use std::convert::Infallible;
use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::StatusCode;
use tokio::io::AsyncWrite;
use tracing::{error, warn};

use crate::adapter::{AdapterError, RawRequest, RawResponse, RawUpload};
use crate::engine::RequestEngine;
use crate::http::BodyStream;

/// hyper 요청을 감싼 원시 요청
///
/// 폼과 업로드는 생성 시점에 본문에서 미리 해석됩니다. 해석에 실패한
/// 요청은 엔진에 닿기 전에 400 계열로 끝납니다.
pub struct HyperRequest {
    method: String,
    path: String,
    query: String,
    headers: Vec<(String, Vec<String>)>,
    form: Vec<(String, Vec<String>)>,
    uploads: Vec<RawUpload>,
    body: Bytes,
}

impl HyperRequest {
    /// hyper 요청을 수집해 원시 요청으로 만듭니다.
    pub async fn from_hyper<B>(req: hyper::Request<B>) -> Result<Self, AdapterError>
    where
        B: hyper::body::Body,
        B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let (parts, body) = req.into_parts();

        let method = parts.method.as_str().to_string();
        let path = parts.uri.path().to_string();
        let query = parts.uri.query().unwrap_or("").to_string();

        // 호스트 헤더 저장소를 이름별 멀티밸류로 묶는다 (표기는 그대로)
        let mut headers: Vec<(String, Vec<String>)> = Vec::new();
        for name in parts.headers.keys() {
            let values: Vec<String> = parts
                .headers
                .get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok().map(str::to_string))
                .collect();
            headers.push((name.as_str().to_string(), values));
        }

        let content_type = parts
            .headers
            .get(hyper::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let bytes = body
            .collect()
            .await
            .map_err(|e| {
                let e: Box<dyn std::error::Error + Send + Sync> = e.into();
                AdapterError::Body(e.to_string())
            })?
            .to_bytes();

        let (form, uploads) = if content_type.starts_with("application/x-www-form-urlencoded") {
            (parse_urlencoded(&bytes), Vec::new())
        } else if content_type.starts_with("multipart/form-data") {
            let boundary = header_param(&content_type, "boundary").ok_or_else(|| {
                AdapterError::Multipart("boundary 파라미터가 없습니다".to_string())
            })?;
            parse_multipart(&bytes, &boundary)?
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Self {
            method,
            path,
            query,
            headers,
            form,
            uploads,
            body: bytes,
        })
    }
}

impl RawRequest for HyperRequest {
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
        Box::new(Cursor::new(std::mem::take(&mut self.body)))
    }
}

/// hyper 응답으로 변환되는 원시 응답
pub struct HyperResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Cursor<Vec<u8>>,
}

impl Default for HyperResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HyperResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            headers: Vec::new(),
            body: Cursor::new(Vec::new()),
        }
    }

    pub fn into_hyper(self) -> hyper::Response<Full<Bytes>> {
        let mut builder = hyper::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
            .body(Full::new(Bytes::from(self.body.into_inner())))
            .unwrap_or_else(|e| {
                error!(error = %e, "응답 생성 실패");
                let mut fallback =
                    hyper::Response::new(Full::new(Bytes::from("Internal Server Error")));
                *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

impl RawResponse for HyperResponse {
    fn write_status(&mut self, status: u16) {
        self.status = status;
    }

    fn append_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn output(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin) {
        &mut self.body
    }
}

/// hyper 커넥션 서비스 진입점
pub async fn handle_hyper(
    engine: Arc<RequestEngine>,
    req: hyper::Request<Incoming>,
) -> Result<hyper::Response<Full<Bytes>>, Infallible> {
    let raw = match HyperRequest::from_hyper(req).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "요청 변환 실패");
            return Ok(adapter_error_response(&e));
        }
    };

    let mut out = HyperResponse::new();
    match engine.handle(raw, &mut out).await {
        Ok(()) => Ok(out.into_hyper()),
        Err(e) => {
            error!(error = %e, "응답 기록 실패");
            let mut fallback =
                hyper::Response::new(Full::new(Bytes::from("Internal Server Error")));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            Ok(fallback)
        }
    }
}

/// 변환 실패를 400 계열 응답으로 바꿉니다.
fn adapter_error_response(err: &AdapterError) -> hyper::Response<Full<Bytes>> {
    hyper::Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .body(Full::new(Bytes::from(err.to_string())))
        .unwrap_or_else(|_| {
            hyper::Response::new(Full::new(Bytes::from("Bad Request")))
        })
}

/// urlencoded 본문을 멀티밸류 필드 목록으로 해석합니다.
fn parse_urlencoded(body: &[u8]) -> Vec<(String, Vec<String>)> {
    let mut fields: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        let key = key.into_owned();
        let value = value.into_owned();
        match fields.iter_mut().find(|(name, _)| *name == key) {
            Some((_, values)) => values.push(value),
            None => fields.push((key, vec![value])),
        }
    }
    fields
}

/// 헤더 값의 파라미터를 추출합니다 (예: boundary, name, filename).
fn header_param(value: &str, key: &str) -> Option<String> {
    for part in value.split(';') {
        let part = part.trim();
        if let Some((k, v)) = part.split_once('=') {
            if k.trim() == key {
                return Some(v.trim().trim_matches('"').to_string());
            }
        }
    }
    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// multipart/form-data 본문을 폼 필드와 업로드로 분리합니다.
///
/// filename 파라미터가 있는 파트는 업로드가 되고, 없는 파트는 폼 필드가
/// 됩니다. 업로드 스트림은 수집된 본문의 슬라이스를 그대로 쓰므로 추가
/// 복사가 없습니다.
fn parse_multipart(
    body: &Bytes,
    boundary: &str,
) -> Result<(Vec<(String, Vec<String>)>, Vec<RawUpload>), AdapterError> {
    let delimiter = format!("--{}", boundary);
    let delim = delimiter.as_bytes();
    let data: &[u8] = body.as_ref();

    // 구분자 위치 수집
    let mut positions = Vec::new();
    let mut at = 0;
    while let Some(pos) = find(&data[at..], delim) {
        positions.push(at + pos);
        at = at + pos + delim.len();
    }
    if positions.len() < 2 {
        return Err(AdapterError::Multipart("구분자를 찾을 수 없습니다".to_string()));
    }

    let mut form: Vec<(String, Vec<String>)> = Vec::new();
    let mut uploads: Vec<RawUpload> = Vec::new();

    for window in positions.windows(2) {
        let mut part_start = window[0] + delim.len();
        // "--"가 바로 이어지면 종료 구분자다
        if data[part_start..].starts_with(b"--") {
            break;
        }
        if data[part_start..].starts_with(b"\r\n") {
            part_start += 2;
        }
        let mut part_end = window[1];
        // 다음 구분자 직전의 CRLF는 콘텐츠가 아니다
        if part_end >= part_start + 2 && &data[part_end - 2..part_end] == b"\r\n" {
            part_end -= 2;
        }

        let segment = &data[part_start..part_end];
        let split = find(segment, b"\r\n\r\n").ok_or_else(|| {
            AdapterError::Multipart("파트 헤더 구분이 없습니다".to_string())
        })?;
        let header_text = std::str::from_utf8(&segment[..split])
            .map_err(|_| AdapterError::Multipart("파트 헤더가 UTF-8이 아닙니다".to_string()))?;
        let content_start = part_start + split + 4;
        let content = body.slice(content_start..part_end);

        let mut name: Option<String> = None;
        let mut filename: Option<String> = None;
        let mut content_type = String::new();
        for line in header_text.split("\r\n") {
            let Some((header_name, header_value)) = line.split_once(':') else {
                continue;
            };
            match header_name.trim().to_ascii_lowercase().as_str() {
                "content-disposition" => {
                    name = header_param(header_value, "name");
                    filename = header_param(header_value, "filename");
                }
                "content-type" => content_type = header_value.trim().to_string(),
                _ => {}
            }
        }

        let name = name.ok_or_else(|| {
            AdapterError::Multipart("name 파라미터가 없는 파트가 있습니다".to_string())
        })?;

        match filename {
            Some(filename) => uploads.push(RawUpload {
                file_name: filename,
                content_type,
                content_length: content.len() as u64,
                stream: Box::new(Cursor::new(content)),
            }),
            None => {
                let value = String::from_utf8(content.to_vec()).map_err(|_| {
                    AdapterError::Multipart("폼 필드 값이 UTF-8이 아닙니다".to_string())
                })?;
                match form.iter_mut().find(|(k, _)| *k == name) {
                    Some((_, values)) => values.push(value),
                    None => form.push((name, vec![value])),
                }
            }
        }
    }

    Ok((form, uploads))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_param() {
        let value = "multipart/form-data; boundary=XBOUNDARY";
        assert_eq!(header_param(value, "boundary").as_deref(), Some("XBOUNDARY"));

        let disposition = "form-data; name=\"file1\"; filename=\"TestFile0\"";
        assert_eq!(header_param(disposition, "name").as_deref(), Some("file1"));
        assert_eq!(
            header_param(disposition, "filename").as_deref(),
            Some("TestFile0")
        );
        assert_eq!(header_param(disposition, "missing"), None);
    }

    #[test]
    fn test_parse_urlencoded_multi_value() {
        let fields = parse_urlencoded(b"Name=Chris&tag=a&tag=b");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("Name".to_string(), vec!["Chris".to_string()]));
        assert_eq!(
            fields[1],
            ("tag".to_string(), vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_parse_multipart_field_and_file() {
        let body = Bytes::from_static(
            b"--XBOUNDARY\r\n\
              Content-Disposition: form-data; name=\"Name\"\r\n\
              \r\n\
              Chris\r\n\
              --XBOUNDARY\r\n\
              Content-Disposition: form-data; name=\"file1\"; filename=\"TestFile0\"\r\n\
              Content-Type: text/html\r\n\
              \r\n\
              Some test context text\r\n\
              --XBOUNDARY--\r\n",
        );

        let (form, uploads) = parse_multipart(&body, "XBOUNDARY").unwrap();

        assert_eq!(form, vec![("Name".to_string(), vec!["Chris".to_string()])]);
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].file_name, "TestFile0");
        assert_eq!(uploads[0].content_type, "text/html");
        assert_eq!(uploads[0].content_length, 22);
    }

    #[test]
    fn test_parse_multipart_without_delimiter() {
        let body = Bytes::from_static(b"no delimiter at all");
        let result = parse_multipart(&body, "XBOUNDARY");
        assert!(matches!(result, Err(AdapterError::Multipart(_))));
    }

    #[test]
    fn test_parse_multipart_part_without_name() {
        let body = Bytes::from_static(
            b"--XBOUNDARY\r\n\
              Content-Type: text/plain\r\n\
              \r\n\
              orphan\r\n\
              --XBOUNDARY--\r\n",
        );
        let result = parse_multipart(&body, "XBOUNDARY");
        assert!(matches!(result, Err(AdapterError::Multipart(_))));
    }
}
