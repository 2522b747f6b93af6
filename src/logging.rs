use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use crate::http::Request;

pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive(Level::INFO.into())
            .add_directive("request_pipeline=debug".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// 요청 하나의 처리 기록
#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub host: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl RequestLog {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            method: String::new(),
            path: String::new(),
            host: String::new(),
            status_code: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub fn with_request(&mut self, request: &Request) {
        self.method = request.method().to_string();
        self.path = request.path().to_string();
        self.host = request
            .headers()
            .first("Host")
            .unwrap_or_default()
            .to_string();

        info!(
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
            host = %self.host,
            "Received request"
        );
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }
}

pub fn log_request(log: &RequestLog) {
    if log.error.is_some() {
        error!(
            request_id = %log.request_id,
            method = %log.method,
            path = %log.path,
            status = %log.status_code,
            duration_ms = %log.duration_ms,
            error = ?log.error,
            "Request failed"
        );
    } else if log.status_code >= 400 {
        warn!(
            request_id = %log.request_id,
            method = %log.method,
            path = %log.path,
            status = %log.status_code,
            duration_ms = %log.duration_ms,
            "Request completed with warning"
        );
    } else {
        info!(
            request_id = %log.request_id,
            method = %log.method,
            path = %log.path,
            status = %log.status_code,
            duration_ms = %log.duration_ms,
            "Request completed successfully"
        );
    }
}
