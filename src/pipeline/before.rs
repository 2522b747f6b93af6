use async_trait::async_trait;

use super::named::NamedHooks;
use crate::context::RequestContext;
use crate::http::Response;

/// 전처리 훅
///
/// 응답을 반환하면 파이프라인이 그 자리에서 중단되고 디스패치는 생략됩니다.
/// None을 반환하면 다음 훅으로 진행합니다.
#[async_trait]
pub trait BeforeHook: Send + Sync {
    async fn call(&self, context: &mut RequestContext) -> Option<Response>;
}

/// 동기 클로저도 전처리 훅으로 쓸 수 있습니다.
#[async_trait]
impl<F> BeforeHook for F
where
    F: Fn(&mut RequestContext) -> Option<Response> + Send + Sync,
{
    async fn call(&self, context: &mut RequestContext) -> Option<Response> {
        (self)(context)
    }
}

/// 전처리 파이프라인
///
/// 삽입 순서가 실행 순서입니다. 훅에서 발생한 패닉은 잡지 않고 호출자에게
/// 전파됩니다.
#[derive(Default)]
pub struct BeforePipeline {
    hooks: NamedHooks<dyn BeforeHook>,
}

impl BeforePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_start(&mut self, hook: impl BeforeHook + 'static) {
        self.hooks.add_to_start(None, Box::new(hook));
    }

    pub fn add_to_start_named(&mut self, name: impl Into<String>, hook: impl BeforeHook + 'static) {
        self.hooks.add_to_start(Some(name.into()), Box::new(hook));
    }

    pub fn add_to_end(&mut self, hook: impl BeforeHook + 'static) {
        self.hooks.add_to_end(None, Box::new(hook));
    }

    pub fn add_to_end_named(&mut self, name: impl Into<String>, hook: impl BeforeHook + 'static) {
        self.hooks.add_to_end(Some(name.into()), Box::new(hook));
    }

    pub fn insert_before(
        &mut self,
        target: &str,
        name: impl Into<String>,
        hook: impl BeforeHook + 'static,
    ) {
        self.hooks
            .insert_before(target, Some(name.into()), Box::new(hook));
    }

    pub fn insert_after(
        &mut self,
        target: &str,
        name: impl Into<String>,
        hook: impl BeforeHook + 'static,
    ) {
        self.hooks
            .insert_after(target, Some(name.into()), Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// 훅을 순서대로 실행합니다. 처음으로 응답을 반환한 훅에서 중단하고,
    /// 그 응답을 컨텍스트에 실은 뒤 반환합니다. 모두 None이면 None입니다.
    pub async fn invoke(&self, context: &mut RequestContext) -> Option<Response> {
        for hook in self.hooks.iter() {
            if let Some(response) = hook.call(context).await {
                context.response = Some(response.clone());
                return Some(response);
            }
        }
        None
    }
}
