use super::raw::RawRequest;
use crate::http::{FormFields, Headers, PostedFile, PostedFileCollection, Request};

/// 메서드 오버라이드에 쓰이는 폼 필드 이름
const METHOD_OVERRIDE_FIELD: &str = "_method";

/// 호스트 원시 요청을 표준 요청으로 변환합니다.
pub fn adapt_request<R: RawRequest>(mut raw: R) -> Request {
    // 1. 폼 필드 리프트 (멀티밸류 보존, 입력 순서 유지)
    let mut form = FormFields::new();
    for (key, values) in raw.form() {
        for value in values {
            form.append(key, value.clone());
        }
    }

    // 2. 유효 메서드 결정: _method 폼 필드가 있으면 그 값을 그대로 쓴다
    let method = form
        .get(METHOD_OVERRIDE_FIELD)
        .map(str::to_string)
        .unwrap_or_else(|| raw.http_method().to_string());

    // 3. 헤더 정규화: 표기가 달라도 같은 이름은 하나의 엔트리로 병합된다
    let mut headers = Headers::new();
    for (name, values) in raw.headers() {
        for value in values {
            headers.append(name, value.clone());
        }
    }

    let path = raw.path().to_string();
    let query = raw.query().to_string();

    // 4. 업로드 파일 리프트: 열거 순서 유지, 스트림은 복사 없이 전달
    let files: Vec<PostedFile> = raw
        .take_uploads()
        .into_iter()
        .map(|upload| PostedFile {
            file_name: upload.file_name,
            content_type: upload.content_type,
            content_length: upload.content_length,
            input_stream: upload.stream,
        })
        .collect();
    let files = PostedFileCollection::new(files);

    let body = raw.take_body();

    Request::new(method, path, query, headers, form, files, body)
}
