use std::sync::Arc;

use super::validator::UserValidator;

/// Basic 인증 구성 오류
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("realm 값이 비어 있습니다")]
    EmptyRealm,

    #[error("자격증명 소스를 읽을 수 없습니다: {0}")]
    CredentialSource(String),
}

/// Basic 인증 설정
///
/// 검증기와 realm을 묶은 불변 값입니다. 등록 시점에 눈에 띄게 실패해야
/// 하는 유일한 검사(빈 realm)를 생성자에서 수행합니다.
#[derive(Clone)]
pub struct BasicAuthConfig {
    validator: Arc<dyn UserValidator>,
    realm: String,
}

impl BasicAuthConfig {
    pub fn new(
        validator: Arc<dyn UserValidator>,
        realm: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let realm = realm.into();
        if realm.is_empty() {
            return Err(AuthError::EmptyRealm);
        }
        Ok(Self { validator, realm })
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn validator(&self) -> &dyn UserValidator {
        self.validator.as_ref()
    }
}
