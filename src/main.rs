use std::sync::Arc;

use async_trait::async_trait;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::StatusCode;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};

use request_pipeline::auth::basic::BasicAuthentication;
use request_pipeline::auth::AUTHENTICATED_USERNAME_KEY;
use request_pipeline::context::RequestContext;
use request_pipeline::engine::{DispatchError, RequestEngine, RouteInvoker};
use request_pipeline::host::hyper_binding::handle_hyper;
use request_pipeline::http::Response;
use request_pipeline::logging;
use request_pipeline::pipeline::HookPipelines;
use request_pipeline::settings::Settings;

/// 데모 디스패처
///
/// 실제 라우팅 엔진 자리에 들어가는 최소 구현입니다. /admin 경로는 자체
/// 그룹 파이프라인으로 감싸서, 그룹 전처리 → 핸들러 → 그룹 후처리 순서로
/// 실행합니다.
struct DemoInvoker {
    admin: HookPipelines,
}

impl DemoInvoker {
    fn new(admin: HookPipelines) -> Self {
        Self { admin }
    }

    fn admin_page(context: &RequestContext) -> Response {
        let username = context
            .item_str(AUTHENTICATED_USERNAME_KEY)
            .unwrap_or("unknown");
        Response::text(StatusCode::OK, format!("관리 콘솔: {}", username))
    }
}

#[async_trait]
impl RouteInvoker for DemoInvoker {
    async fn dispatch(&self, context: &mut RequestContext) -> Result<Response, DispatchError> {
        if context.request.path().starts_with("/admin") {
            // 그룹 범위 파이프라인: 전처리가 응답을 내면 핸들러를 건너뛴다
            if self.admin.before.invoke(context).await.is_none() {
                let page = Self::admin_page(context);
                context.response = Some(page);
            }
            self.admin.after.invoke(context).await;
            return context
                .response
                .take()
                .ok_or_else(|| DispatchError::new("그룹 파이프라인이 응답을 남기지 않았습니다"));
        }

        match (context.request.method(), context.request.path()) {
            ("GET", "/") => Ok(Response::text(StatusCode::OK, "request_pipeline demo")),
            _ => Ok(Response::with_status(StatusCode::NOT_FOUND)),
        }
    }
}

#[tokio::main]
async fn main() {
    logging::init_logging();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            return;
        }
    };

    // 파이프라인은 수신을 시작하기 전에 전부 배선하고 고정한다
    let mut pipelines = HookPipelines::new();
    let mut admin = HookPipelines::new();
    if let Some(auth_settings) = &settings.basic_auth {
        let config = match auth_settings.build_config() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("인증 설정 실패: {}", e);
                return;
            }
        };
        BasicAuthentication::enable(&mut pipelines, config.clone());
        BasicAuthentication::enable_for_group(&mut admin, config);
    }

    let invoker = Arc::new(DemoInvoker::new(admin));
    let engine = Arc::new(RequestEngine::new(Arc::new(pipelines), invoker));

    let listener = match TcpListener::bind(&settings.server.listen).await {
        Ok(listener) => {
            info!(addr = %settings.server.listen, "요청 엔진 수신 시작");
            listener
        }
        Err(e) => {
            eprintln!("{} 바인드 실패: {}", settings.server.listen, e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((stream, _addr)) => {
                let engine = engine.clone();

                tokio::task::spawn(async move {
                    let io = TokioIo::new(stream);
                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service_fn(move |req| handle_hyper(engine.clone(), req)))
                        .await
                    {
                        error!(error = %err, "커넥션 처리 실패");
                    }
                });
            }
            Err(e) => {
                error!(error = %e, "커넥션 수락 실패");
            }
        }
    }
}
