//! request_pipeline은 라우트 디스패치 앞뒤로 실행되는 훅 체인과 Basic
//! 인증, 호스트 요청 정규화를 제공하는 경량 HTTP 요청 처리 엔진입니다.
//!
//! # 주요 기능
//!
//! - 순서 보장 전처리/후처리 훅 파이프라인 (전처리는 단락 평가)
//! - Basic 인증 모듈 (401 챌린지, 신원 주입)
//! - 호스트 요청을 표준 모델로 바꾸는 어댑터 계층
//!
//! # 파이프라인 구성
//!
//! ```
//! use request_pipeline::pipeline::HookPipelines;
//! use request_pipeline::auth::basic::{BasicAuthConfig, BasicAuthentication, StaticUserValidator};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let mut pipelines = HookPipelines::new();
//!
//! let validator = Arc::new(StaticUserValidator::new(HashMap::new()));
//! let config = BasicAuthConfig::new(validator, "Restricted Area").unwrap();
//! BasicAuthentication::enable(&mut pipelines, config);
//!
//! // 전처리 훅 하나(자격증명 파싱)와 후처리 훅 하나(챌린지)가 등록된다
//! assert_eq!(pipelines.before.len(), 1);
//! assert_eq!(pipelines.after.len(), 1);
//! ```
//!
//! # 응답 쿠키
//!
//! ```
//! use request_pipeline::http::{Cookie, Response};
//!
//! let response = Response::new()
//!     .cookie(Cookie::new("session", "abc").with_path("/"))
//!     .cookie(Cookie::new("theme", "dark"));
//!
//! // 쿠키는 추가된 순서 그대로 Set-Cookie로 내보내진다
//! assert_eq!(response.cookies()[0].to_string(), "session=abc; path=/");
//! assert_eq!(response.cookies()[1].to_string(), "theme=dark");
//! ```
//!
//! # 폼 필드 접근
//!
//! ```
//! use request_pipeline::http::FormFields;
//!
//! let mut form = FormFields::new();
//! form.append("Name", "Chris");
//! form.append("tag", "a");
//! form.append("tag", "b");
//!
//! assert_eq!(form.get("Name"), Some("Chris"));
//! assert_eq!(&form["Name"], "Chris");
//! assert_eq!(form.get_all("tag"), &["a", "b"]);
//! ```

pub mod adapter;
pub mod auth;
pub mod context;
pub mod engine;
pub mod host;
pub mod http;
pub mod logging;
pub mod pipeline;
pub mod settings;
