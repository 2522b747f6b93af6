use tokio::io::AsyncWrite;

use crate::http::BodyStream;

/// 호스트가 파싱해 둔 업로드 파일 하나
pub struct RawUpload {
    pub file_name: String,
    pub content_type: String,
    pub content_length: u64,
    pub stream: BodyStream,
}

/// 호스트별 원시 요청 캡슐화
///
/// 헤더 표기와 메서드는 호스트에서 받은 그대로 노출합니다. 정규화는 전부
/// 어댑터(`adapt_request`)의 몫이며, 바인딩마다 달라지지 않습니다.
pub trait RawRequest: Send {
    /// 원시 HTTP 메서드 (오버라이드 적용 전)
    fn http_method(&self) -> &str;

    fn path(&self) -> &str;

    fn query(&self) -> &str;

    /// 호스트 헤더 저장소 (표기 임의, 멀티밸류)
    fn headers(&self) -> &[(String, Vec<String>)];

    /// 호스트 폼 필드 (멀티밸류)
    fn form(&self) -> &[(String, Vec<String>)];

    /// 업로드 파일들을 열거 순서 그대로 넘깁니다. 스트림 소유권이 이동합니다.
    fn take_uploads(&mut self) -> Vec<RawUpload>;

    /// 본문 스트림을 넘깁니다.
    fn take_body(&mut self) -> BodyStream;
}

/// 호스트별 원시 응답 출력
pub trait RawResponse: Send {
    fn write_status(&mut self, status: u16);

    fn append_header(&mut self, name: &str, value: &str);

    fn output(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin);
}
