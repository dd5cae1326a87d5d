//! 세션 쿠키 서명/검증
//!
//! `SESSION_SECRET`에서 SHA-512로 64바이트 키를 유도하고 actix-web 서명 쿠키(HMAC)를 사용합니다.
//! 서명이 맞지 않는 쿠키는 없는 것으로 취급합니다.

use actix_web::cookie::{time::Duration, Cookie, CookieJar, Key, SameSite};
use sha2::{Digest, Sha512};

pub const SESSION_COOKIE_NAME: &str = "confessions.sid";
pub const OAUTH_STATE_COOKIE_NAME: &str = "confessions.oauth_state";

#[derive(Clone)]
pub struct SessionCookies {
    key: Key,
    secure: bool,
    session_ttl_seconds: u64,
    state_ttl_minutes: i64,
}

impl SessionCookies {
    pub fn new(secret: &str, secure: bool, session_ttl_seconds: u64, state_ttl_minutes: i64) -> Self {
        Self {
            key: Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
            secure,
            session_ttl_seconds,
            state_ttl_minutes,
        }
    }

    /// 세션 토큰을 담은 서명 쿠키
    pub fn session_cookie(&self, token: &str) -> Cookie<'static> {
        let max_age = Duration::seconds(i64::try_from(self.session_ttl_seconds).unwrap_or(i64::MAX));
        self.sign(self.base_cookie(SESSION_COOKIE_NAME, token.to_string(), max_age))
    }

    pub fn session_removal(&self) -> Cookie<'static> {
        removal(SESSION_COOKIE_NAME)
    }

    /// OAuth state를 담은 단기 서명 쿠키
    pub fn oauth_state_cookie(&self, state: &str) -> Cookie<'static> {
        let max_age = Duration::minutes(self.state_ttl_minutes);
        self.sign(self.base_cookie(OAUTH_STATE_COOKIE_NAME, state.to_string(), max_age))
    }

    pub fn oauth_state_removal(&self) -> Cookie<'static> {
        removal(OAUTH_STATE_COOKIE_NAME)
    }

    /// 서명을 검증하고 원래 값을 돌려줍니다. 위조/손상된 쿠키는 `None`.
    pub fn verify(&self, cookie: Cookie<'static>) -> Option<String> {
        let name = cookie.name().to_string();
        let mut jar = CookieJar::new();
        jar.add_original(cookie);

        jar.signed(&self.key)
            .get(&name)
            .map(|verified| verified.value().to_string())
    }

    fn base_cookie(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(name, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(max_age)
            .finish()
    }

    fn sign(&self, cookie: Cookie<'static>) -> Cookie<'static> {
        let name = cookie.name().to_string();
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(cookie);

        jar.get(&name)
            .cloned()
            .unwrap_or_else(|| Cookie::new(name, ""))
    }
}

fn removal(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}
