use async_trait::async_trait;

use super::named::NamedHooks;
use crate::context::RequestContext;

/// 후처리 훅
///
/// 항상 실행되며, 컨텍스트의 응답을 읽거나 교체할 수 있습니다.
#[async_trait]
pub trait AfterHook: Send + Sync {
    async fn call(&self, context: &mut RequestContext);
}

/// 동기 클로저도 후처리 훅으로 쓸 수 있습니다.
#[async_trait]
impl<F> AfterHook for F
where
    F: Fn(&mut RequestContext) + Send + Sync,
{
    async fn call(&self, context: &mut RequestContext) {
        (self)(context)
    }
}

/// 후처리 파이프라인
///
/// 전처리와 달리 중단 없이 모든 훅이 순서대로 실행됩니다.
#[derive(Default)]
pub struct AfterPipeline {
    hooks: NamedHooks<dyn AfterHook>,
}

impl AfterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_start(&mut self, hook: impl AfterHook + 'static) {
        self.hooks.add_to_start(None, Box::new(hook));
    }

    pub fn add_to_start_named(&mut self, name: impl Into<String>, hook: impl AfterHook + 'static) {
        self.hooks.add_to_start(Some(name.into()), Box::new(hook));
    }

    pub fn add_to_end(&mut self, hook: impl AfterHook + 'static) {
        self.hooks.add_to_end(None, Box::new(hook));
    }

    pub fn add_to_end_named(&mut self, name: impl Into<String>, hook: impl AfterHook + 'static) {
        self.hooks.add_to_end(Some(name.into()), Box::new(hook));
    }

    pub fn insert_before(
        &mut self,
        target: &str,
        name: impl Into<String>,
        hook: impl AfterHook + 'static,
    ) {
        self.hooks
            .insert_before(target, Some(name.into()), Box::new(hook));
    }

    pub fn insert_after(
        &mut self,
        target: &str,
        name: impl Into<String>,
        hook: impl AfterHook + 'static,
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

    /// 모든 훅을 순서대로 실행합니다.
    pub async fn invoke(&self, context: &mut RequestContext) {
        for hook in self.hooks.iter() {
            hook.call(context).await;
        }
    }
}
