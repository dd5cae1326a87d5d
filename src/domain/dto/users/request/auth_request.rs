//! 인증 관련 요청 DTO
//!
//! 비밀번호 강도나 이메일 형식은 검증하지 않습니다. 필수 필드의 존재만 확인합니다.

use serde::Deserialize;
use validator::Validate;

/// `POST /register` 폼
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// `POST /login` 폼
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// OAuth 콜백 쿼리
///
/// 프로바이더가 거부하면 `code` 대신 `error`가 전달됩니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_requires_both_fields() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            password: "x".to_string(),
        };
        let missing_password = RegisterRequest {
            username: "alice".to_string(),
            password: String::new(),
        };

        assert!(valid.validate().is_ok());
        assert!(missing_password.validate().is_err());
    }

    #[test]
    fn test_login_request_accepts_any_non_empty_password() {
        // 비밀번호 강도 규칙은 의도적으로 없습니다
        let request = LoginRequest {
            username: "a".to_string(),
            password: "1".to_string(),
        };

        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_form_fields_deserialize_as_empty() {
        let request: LoginRequest = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();

        assert_eq!(request.password, "");
        assert!(request.validate().is_err());
    }
}
