use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use hyper::StatusCode;
use tracing::{debug, error};
use uuid::Uuid;

use super::error::DispatchError;
use crate::adapter::{adapt_request, write_response, RawRequest, RawResponse};
use crate::context::RequestContext;
use crate::http::Response;
use crate::logging::{log_request, RequestLog};
use crate::pipeline::HookPipelines;

/// 라우트 디스패치 능력
///
/// 전처리와 후처리 파이프라인 사이에서 호출됩니다. 라우트 그룹 범위의
/// 파이프라인이 있다면 디스패처가 자기 범위 안에서 직접 구동합니다
/// (그룹 전처리 → 핸들러 → 그룹 후처리).
#[async_trait]
pub trait RouteInvoker: Send + Sync {
    async fn dispatch(&self, context: &mut RequestContext) -> Result<Response, DispatchError>;
}

/// 요청 처리 엔진
///
/// 파이프라인 묶음은 배선이 끝난 뒤 Arc로 고정되어 들어오며, 요청 처리
/// 중에는 읽기 전용입니다.
pub struct RequestEngine {
    pipelines: Arc<HookPipelines>,
    invoker: Arc<dyn RouteInvoker>,
}

impl RequestEngine {
    pub fn new(pipelines: Arc<HookPipelines>, invoker: Arc<dyn RouteInvoker>) -> Self {
        Self { pipelines, invoker }
    }

    /// 원시 요청 하나를 처리해 호스트 출력으로 내보냅니다.
    pub async fn handle<R, W>(&self, raw: R, out: &mut W) -> Result<(), std::io::Error>
    where
        R: RawRequest,
        W: RawResponse,
    {
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        // 1. 요청 변환
        let request = adapt_request(raw);
        let mut log = RequestLog::new(request_id.to_string());
        log.with_request(&request);
        let mut context = RequestContext::new(request);

        // 2. 전처리 파이프라인: 응답이 나오면 디스패치와 후처리를 건너뛴다
        if self.pipelines.before.invoke(&mut context).await.is_some() {
            debug!(request_id = %request_id, "전처리 훅이 응답을 반환하여 디스패치를 생략합니다");
        } else {
            // 3. 라우트 디스패치
            match self.invoker.dispatch(&mut context).await {
                Ok(response) => {
                    context.response = Some(response);
                    // 4. 후처리 파이프라인: 모든 훅이 실행된다
                    self.pipelines.after.invoke(&mut context).await;
                }
                Err(e) => {
                    error!(request_id = %request_id, error = %e, "라우트 디스패치 실패");
                    log.with_error(&e);
                    // 5. 에러 파이프라인: 응답이 없으면 500으로 대체한다
                    if self.pipelines.on_error.invoke(&mut context, &e).await.is_none() {
                        context.response =
                            Some(Response::with_status(StatusCode::INTERNAL_SERVER_ERROR));
                    }
                }
            }
        }

        // 6. 응답 기록
        let response = context.response.take().unwrap_or_else(|| {
            error!(request_id = %request_id, "응답이 생성되지 않아 500으로 대체합니다");
            Response::with_status(StatusCode::INTERNAL_SERVER_ERROR)
        });
        log.with_response(response.status());
        log.duration_ms = started.elapsed().as_millis() as u64;

        write_response(&response, out).await?;
        log_request(&log);

        Ok(())
    }
}
