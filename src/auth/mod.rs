pub mod basic;

/// 인증된 사용자 이름이 저장되는 컨텍스트 항목 키
pub const AUTHENTICATED_USERNAME_KEY: &str = "auth.username";
