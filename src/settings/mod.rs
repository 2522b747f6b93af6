pub mod error;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::auth::basic::{BasicAuthConfig, HtpasswdValidator, StaticUserValidator, UserValidator};

pub use error::SettingsError;

/// 설정 파일 경로를 가리키는 환경 변수
const CONFIG_PATH_ENV: &str = "REQUEST_PIPELINE_CONFIG";

/// 애플리케이션 설정
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    /// Basic 인증 설정. 없으면 인증 모듈을 등록하지 않습니다.
    #[serde(default)]
    pub basic_auth: Option<BasicAuthSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 수신 주소
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

/// Basic 인증 설정
#[derive(Debug, Clone, Deserialize)]
pub struct BasicAuthSettings {
    /// 사용자 이름과 bcrypt 해시 맵
    #[serde(default)]
    pub users: HashMap<String, String>,

    /// 인증 영역 (realm)
    #[serde(default = "default_realm")]
    pub realm: String,

    /// .htpasswd 파일 경로. 지정되면 users 대신 파일을 씁니다.
    #[serde(default)]
    pub htpasswd_path: Option<String>,
}

fn default_realm() -> String {
    "Restricted Area".to_string()
}

impl BasicAuthSettings {
    /// 설정으로부터 검증기와 인증 구성을 만듭니다.
    pub fn build_config(&self) -> Result<BasicAuthConfig, SettingsError> {
        let validator: Arc<dyn UserValidator> = match &self.htpasswd_path {
            Some(path) => Arc::new(
                HtpasswdValidator::from_file(path)
                    .map_err(|e| SettingsError::Invalid { reason: e.to_string() })?,
            ),
            None => Arc::new(StaticUserValidator::new(self.users.clone())),
        };

        BasicAuthConfig::new(validator, self.realm.clone())
            .map_err(|e| SettingsError::Invalid { reason: e.to_string() })
    }
}

impl Settings {
    /// 환경 변수가 가리키는 TOML 파일에서 설정을 읽습니다. 변수가 없으면
    /// 기본값을 씁니다.
    pub fn load() -> Result<Self, SettingsError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|error| SettingsError::FileError {
            path: path.to_string(),
            error,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::ParseError { source })
    }
}
