use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hyper::StatusCode;
use tracing::debug;

use super::config::BasicAuthConfig;
use crate::auth::AUTHENTICATED_USERNAME_KEY;
use crate::context::RequestContext;
use crate::http::Response;
use crate::pipeline::HookPipelines;

/// 전처리 훅 이름: Authorization 헤더 파싱
pub const CREDENTIALS_HOOK: &str = "basic-auth";

/// 전처리 훅 이름: 인증 필수 강제
pub const REQUIRES_AUTH_HOOK: &str = "requires-auth";

/// 후처리 훅 이름: 401 챌린지 부착
pub const CHALLENGE_HOOK: &str = "basic-auth-challenge";

/// Basic 인증 모듈
///
/// 파이프라인 묶음에 훅을 등록하는 것으로 동작합니다. 전처리 훅은 신원을
/// 기록할 뿐 응답을 만들지 않고, 거절은 라우트 결과(401)에 후처리 훅이
/// 반응하는 방식으로 이루어집니다.
pub struct BasicAuthentication;

impl BasicAuthentication {
    /// 애플리케이션 파이프라인에 등록합니다.
    ///
    /// 전처리 파이프라인 맨 앞에 자격증명 파싱 훅 하나, 후처리 파이프라인에
    /// 챌린지 훅 하나가 추가됩니다.
    pub fn enable(pipelines: &mut HookPipelines, config: BasicAuthConfig) {
        let credentials = config.clone();
        pipelines.before.add_to_start_named(
            CREDENTIALS_HOOK,
            move |context: &mut RequestContext| try_authenticate(&credentials, context),
        );
        pipelines.after.add_to_end_named(
            CHALLENGE_HOOK,
            move |context: &mut RequestContext| send_authentication_challenge(&config, context),
        );
    }

    /// 라우트 그룹 파이프라인에 등록합니다.
    ///
    /// 자격증명 파싱 훅에 더해, 같은 범위의 모든 요청에 인증을 요구하는
    /// 훅이 파싱 훅 바로 뒤에 들어갑니다.
    pub fn enable_for_group(pipelines: &mut HookPipelines, config: BasicAuthConfig) {
        let credentials = config.clone();
        pipelines.before.add_to_start_named(
            CREDENTIALS_HOOK,
            move |context: &mut RequestContext| try_authenticate(&credentials, context),
        );
        pipelines
            .before
            .insert_after(CREDENTIALS_HOOK, REQUIRES_AUTH_HOOK, require_authentication);
        pipelines.after.add_to_end_named(
            CHALLENGE_HOOK,
            move |context: &mut RequestContext| send_authentication_challenge(&config, context),
        );
    }
}

/// Authorization 헤더를 해석해 신원을 기록합니다.
///
/// 형식이 깨진 자격증명과 검증 거절은 모두 "자격증명 없음"으로 취급되어
/// 요청이 비인증 상태로 계속 진행됩니다. 응답은 절대 만들지 않습니다.
fn try_authenticate(config: &BasicAuthConfig, context: &mut RequestContext) -> Option<Response> {
    // 상위 범위에서 이미 신원이 기록됐으면 다시 검증하지 않는다
    if context.item_str(AUTHENTICATED_USERNAME_KEY).is_some() {
        return None;
    }

    let header = context.request.headers().first("Authorization")?;
    let (scheme, parameter) = header.split_once(' ')?;
    // 스킴은 정확히 "Basic"이어야 한다 (대소문자 일치)
    if scheme != "Basic" {
        return None;
    }

    let decoded = BASE64.decode(parameter).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;

    if config.validator().validate(username, password) {
        debug!(username = %username, "Basic 인증 성공");
        let username = username.to_string();
        context.set_item(AUTHENTICATED_USERNAME_KEY, username);
    } else {
        debug!(username = %username, "Basic 자격증명 검증 실패");
    }

    None
}

/// 신원이 없는 요청을 401로 끊습니다 (그룹 범위 전용).
fn require_authentication(context: &mut RequestContext) -> Option<Response> {
    if context.item_str(AUTHENTICATED_USERNAME_KEY).is_some() {
        None
    } else {
        Some(Response::with_status(StatusCode::UNAUTHORIZED))
    }
}

/// 401 응답에 WWW-Authenticate 챌린지를 붙입니다.
fn send_authentication_challenge(config: &BasicAuthConfig, context: &mut RequestContext) {
    let Some(response) = context.response.as_mut() else {
        return;
    };
    if response.status() != StatusCode::UNAUTHORIZED {
        return;
    }
    // 이미 Basic 챌린지가 붙어 있으면 중복 추가하지 않는다
    let already_challenged = response
        .header_values("WWW-Authenticate")
        .any(|value| value.starts_with("Basic"));
    if already_challenged {
        return;
    }

    response.add_header(
        "WWW-Authenticate",
        format!("Basic realm=\"{}\"", config.realm()),
    );
}
