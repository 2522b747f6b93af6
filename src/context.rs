use std::collections::HashMap;

use serde_json::Value;

use crate::http::{Request, Response};

/// 요청 컨텍스트
///
/// 요청 하나의 수명 동안 파이프라인과 디스패처가 공유하는 상태입니다.
/// 요청마다 새로 만들어지며 요청 간에 공유되지 않습니다.
pub struct RequestContext {
    /// 표준 요청 (생성 이후 변경되지 않음)
    pub request: Request,

    /// 현재 응답. 전처리 파이프라인이 시작될 때는 항상 None입니다.
    pub response: Option<Response>,

    /// 훅과 하위 소비자가 주고받는 요청 범위 항목 저장소
    pub items: HashMap<String, Value>,
}

impl RequestContext {
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: None,
            items: HashMap::new(),
        }
    }

    pub fn set_item(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn item(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// 문자열 항목을 읽습니다.
    pub fn item_str(&self, key: &str) -> Option<&str> {
        self.items.get(key).and_then(Value::as_str)
    }
}
