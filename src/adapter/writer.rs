use tokio::io::AsyncWriteExt;

use super::raw::RawResponse;
use crate::http::Response;

/// 표준 응답을 호스트 출력 호출로 직렬화합니다.
///
/// 순서는 고정입니다: 상태 줄, 추가된 순서의 헤더, 추가된 순서의 쿠키
/// (쿠키마다 Set-Cookie 하나), 마지막으로 본문. 어떤 경우에도 재정렬하지
/// 않습니다.
pub async fn write_response<W>(response: &Response, out: &mut W) -> Result<(), std::io::Error>
where
    W: RawResponse + ?Sized,
{
    out.write_status(response.status().as_u16());

    for (name, value) in response.headers() {
        out.append_header(name, value);
    }

    for cookie in response.cookies() {
        out.append_header("Set-Cookie", &cookie.to_string());
    }

    out.output().write_all(response.body()).await?;
    out.output().flush().await?;

    Ok(())
}
