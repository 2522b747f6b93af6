use async_trait::async_trait;

use crate::context::RequestContext;
use crate::engine::DispatchError;
use crate::http::Response;

/// 에러 훅
///
/// 디스패치가 실패했을 때 호출되며, 응답을 반환하면 그 응답이 채택됩니다.
#[async_trait]
pub trait ErrorHook: Send + Sync {
    async fn call(&self, context: &mut RequestContext, error: &DispatchError) -> Option<Response>;
}

/// 동기 클로저도 에러 훅으로 쓸 수 있습니다.
#[async_trait]
impl<F> ErrorHook for F
where
    F: Fn(&mut RequestContext, &DispatchError) -> Option<Response> + Send + Sync,
{
    async fn call(&self, context: &mut RequestContext, error: &DispatchError) -> Option<Response> {
        (self)(context, error)
    }
}

/// 에러 파이프라인
///
/// 순서대로 실행하다가 처음으로 응답을 만든 훅에서 끝납니다. 아무도 응답을
/// 만들지 않으면 엔진이 500으로 대체합니다.
#[derive(Default)]
pub struct ErrorPipeline {
    hooks: Vec<Box<dyn ErrorHook>>,
}

impl ErrorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hook: impl ErrorHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub async fn invoke(
        &self,
        context: &mut RequestContext,
        error: &DispatchError,
    ) -> Option<Response> {
        for hook in &self.hooks {
            if let Some(response) = hook.call(context, error).await {
                context.response = Some(response.clone());
                return Some(response);
            }
        }
        None
    }
}
