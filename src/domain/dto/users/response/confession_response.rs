use crate::domain::entities::users::User;

/// 피드에 표시되는 고백 한 건
#[derive(Debug, Clone, PartialEq)]
pub struct ConfessionEntry {
    pub text: String,
}

impl ConfessionEntry {
    /// 고백이 없는 사용자는 `None`
    pub fn from_user(user: &User) -> Option<Self> {
        user.confession
            .as_ref()
            .map(|text| Self { text: text.clone() })
    }
}
