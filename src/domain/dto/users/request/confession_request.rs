use serde::Deserialize;
use validator::Validate;

/// `POST /submit` 폼
///
/// 길이나 내용은 제한하지 않습니다. 빈 문자열도 그대로 저장됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitConfessionRequest {
    #[serde(default)]
    #[validate(required(message = "confession 필드가 필요합니다"))]
    pub confession: Option<String>,
}
