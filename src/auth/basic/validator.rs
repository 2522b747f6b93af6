use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::config::AuthError;

/// 사용자 자격증명 검증 능력
///
/// 파이프라인은 요청당 최대 한 번 호출하며 결과를 캐시하지 않습니다.
pub trait UserValidator: Send + Sync {
    fn validate(&self, username: &str, password: &str) -> bool;
}

/// 메모리 사용자 맵 기반 검증기
///
/// 값은 bcrypt 해시여야 합니다 ($2a$, $2b$, $2y$ 접두사).
pub struct StaticUserValidator {
    users: HashMap<String, String>,
}

impl StaticUserValidator {
    pub fn new(users: HashMap<String, String>) -> Self {
        Self { users }
    }
}

impl UserValidator for StaticUserValidator {
    fn validate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map(|hash| verify_password(password, hash))
            .unwrap_or(false)
    }
}

/// .htpasswd 파일 기반 검증기
///
/// # 파일 형식
/// ```text
/// user1:$2y$05$c4WoMPo3SXsafkva.HHa6uXQZWr7oboPiC2bT/r7q1BB8I2s0BRqC
/// user2:$2b$05$LgzK4lXJzxGHVoJ0KhO1E.eQE9L5.H4TD/w0Nz8cP6b/U.ik2M0FW
/// ```
pub struct HtpasswdValidator {
    users: HashMap<String, String>,
}

impl HtpasswdValidator {
    /// 파일을 한 번 읽어 검증기를 만듭니다.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| AuthError::CredentialSource(e.to_string()))?;

        let mut users = HashMap::new();
        for line in content.lines() {
            if let Some((username, hash)) = line.split_once(':') {
                users.insert(username.to_string(), hash.to_string());
            }
        }

        Ok(Self { users })
    }
}

impl UserValidator for HtpasswdValidator {
    fn validate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .map(|hash| verify_password(password, hash))
            .unwrap_or(false)
    }
}

/// 비밀번호 검증 함수
fn verify_password(password: &str, hash: &str) -> bool {
    if hash.starts_with("$2") {
        bcrypt::verify(password, hash).unwrap_or(false)
    } else {
        // bcrypt가 아닌 해시는 지원하지 않음
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::DEFAULT_COST;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_static_validator() {
        let hash = bcrypt::hash("test-password", DEFAULT_COST).unwrap();
        let mut users = HashMap::new();
        users.insert("test".to_string(), hash);

        let validator = StaticUserValidator::new(users);
        assert!(validator.validate("test", "test-password"));
        assert!(!validator.validate("test", "wrong-password"));
        assert!(!validator.validate("unknown", "test-password"));
    }

    #[test]
    fn test_bcrypt_verify() {
        let hash = bcrypt::hash("password", DEFAULT_COST).unwrap();
        assert!(verify_password("password", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_htpasswd_validator() -> Result<(), Box<dyn std::error::Error>> {
        let mut temp_file = NamedTempFile::new()?;

        let hash = bcrypt::hash("test-password", DEFAULT_COST)?;
        writeln!(temp_file, "test-user:{}", hash)?;

        // 지원하지 않는 해시 형식 추가
        writeln!(temp_file, "md5-user:$apr1$fHxP13Ee$Gu9.3RxLfGHvw2NpjQPyX1")?;

        let validator = HtpasswdValidator::from_file(temp_file.path())?;

        assert!(validator.validate("test-user", "test-password"));
        assert!(!validator.validate("test-user", "wrong-password"));

        // 지원하지 않는 해시는 항상 false 반환
        assert!(!validator.validate("md5-user", "any-password"));

        Ok(())
    }

    #[test]
    fn test_htpasswd_missing_file() {
        let result = HtpasswdValidator::from_file("/no/such/file");
        assert!(matches!(result, Err(AuthError::CredentialSource(_))));
    }
}
