/// 요청 변환 실패
///
/// 파이프라인이 시작되기 전에 드러나며, 호스트 바인딩이 400 계열 응답으로
/// 바꿔 내보냅니다.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("본문 읽기 실패: {0}")]
    Body(String),

    #[error("multipart 파싱 실패: {0}")]
    Multipart(String),
}
