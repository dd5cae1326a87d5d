//! 라우트 전체 흐름 테스트
//!
//! 메모리 저장소와 스텁 OAuth 클라이언트로 실제 앱을 구성합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_governor::GovernorConfigBuilder;
use async_trait::async_trait;
use actix_web::{
    body::MessageBody,
    cookie::Cookie,
    dev::ServiceResponse,
    http::{header, StatusCode},
    test, web, App,
};

use crate::{
    config::{OAuthProvider, OAuthProviderSettings},
    core::AppState,
    domain::{entities::users::User, models::session::SessionRecord},
    errors::AppError,
    middlewares::{SessionMiddleware, OAUTH_STATE_COOKIE_NAME, SESSION_COOKIE_NAME},
    repositories::{
        sessions::{MemorySessionStore, SessionStore},
        users::{InMemoryUserRepository, UserStore},
    },
    routes::configure_all_routes,
    services::auth::oauth_client::StubOAuthClient,
};

const FACEBOOK_ID: &str = "fb-42";

fn facebook_settings() -> OAuthProviderSettings {
    OAuthProviderSettings {
        provider: OAuthProvider::Facebook,
        client_id: "app-id".to_string(),
        client_secret: "app-secret".to_string(),
        redirect_uri: "http://localhost:3000/auth/facebook/confessions".to_string(),
        auth_uri: "https://www.facebook.com/v3.2/dialog/oauth".to_string(),
        token_uri: "https://graph.facebook.com/v3.2/oauth/access_token".to_string(),
        profile_uri: "https://graph.facebook.com/v3.2/me?fields=id".to_string(),
        scope: None,
    }
}

fn test_state(users: Arc<InMemoryUserRepository>) -> AppState {
    AppState::for_tests(
        users,
        Arc::new(MemorySessionStore::new()),
        Arc::new(StubOAuthClient::returning(FACEBOOK_ID)),
        vec![facebook_settings()],
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(SessionMiddleware)
                .configure(configure_all_routes),
        )
        .await
    };
}

fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

fn credentials(username: &str, password: &str) -> [(&'static str, String); 2] {
    [
        ("username", username.to_string()),
        ("password", password.to_string()),
    ]
}

/// 회원가입 후 세션 쿠키를 돌려줍니다.
macro_rules! register {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/register")
            .set_form(credentials($username, $password))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/confessions"));
        response_cookie(&resp, SESSION_COOKIE_NAME).expect("session cookie")
    }};
}

#[actix_web::test]
async fn test_anonymous_protected_pages_redirect_to_login() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));

    for uri in ["/confessions", "/submit"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/login"));
    }

    let req = test::TestRequest::post()
        .uri("/submit")
        .set_form([("confession", "sneaky")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/login"));
}

#[actix_web::test]
async fn test_public_pages_render() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));

    for uri in ["/", "/login", "/register"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/login").to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("/auth/facebook"));
    assert!(!body.contains("/auth/google"));
}

#[actix_web::test]
async fn test_register_logs_in_and_duplicate_is_rejected() {
    let users = Arc::new(InMemoryUserRepository::new());
    let app = test_app!(test_state(users.clone()));

    let cookie = register!(app, "alice", "secret");

    let req = test::TestRequest::get().uri("/confessions").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form(credentials("alice", "other"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/register"));
    assert!(response_cookie(&resp, SESSION_COOKIE_NAME).is_none());
    assert_eq!(users.count(), 1);

    // 첫 계정의 비밀번호는 그대로
    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(credentials("alice", "secret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/confessions"));
    assert!(response_cookie(&resp, SESSION_COOKIE_NAME).is_some());
}

#[actix_web::test]
async fn test_register_with_missing_password_redirects_back() {
    let users = Arc::new(InMemoryUserRepository::new());
    let app = test_app!(test_state(users.clone()));

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([("username", "alice")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp).as_deref(), Some("/register"));
    assert_eq!(users.count(), 0);
}

#[actix_web::test]
async fn test_wrong_password_stays_anonymous() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    register!(app, "alice", "secret");

    for (username, password) in [("alice", "wrong"), ("nobody", "secret"), ("alice", "")] {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form(credentials(username, password))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some("/login"));
        assert!(response_cookie(&resp, SESSION_COOKIE_NAME).is_none());
    }
}

#[actix_web::test]
async fn test_last_submission_wins_in_feed() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    let cookie = register!(app, "alice", "secret");

    for text in ["first-secret", "second-secret"] {
        let req = test::TestRequest::post()
            .uri("/submit")
            .cookie(cookie.clone())
            .set_form([("confession", text)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp).as_deref(), Some("/confessions"));
    }

    let req = test::TestRequest::get().uri("/confessions").cookie(cookie).to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains("second-secret"));
    assert!(!body.contains("first-secret"));
}

#[actix_web::test]
async fn test_feed_lists_only_users_with_confession_escaped() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    let alice = register!(app, "alice", "secret");
    let bob = register!(app, "bob", "secret");

    let req = test::TestRequest::post()
        .uri("/submit")
        .cookie(alice)
        .set_form([("confession", "<img src=x onerror=alert(1)>")])
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/confessions").cookie(bob).to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert_eq!(body.matches(r#"class="confession""#).count(), 1);
    assert!(body.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(!body.contains("<img"));
}

#[actix_web::test]
async fn test_submit_without_confession_field_redirects_to_form() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    let cookie = register!(app, "alice", "secret");

    let req = test::TestRequest::post()
        .uri("/submit")
        .cookie(cookie)
        .set_form([("other", "value")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp).as_deref(), Some("/submit"));
}

#[actix_web::test]
async fn test_long_confession_is_stored() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    let cookie = register!(app, "alice", "secret");
    let long_text = "a".repeat(20_000);

    let req = test::TestRequest::post()
        .uri("/submit")
        .cookie(cookie.clone())
        .set_form([("confession", long_text.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/confessions"));

    let req = test::TestRequest::get().uri("/confessions").cookie(cookie).to_request();
    let body = body_text(test::call_service(&app, req).await).await;

    assert!(body.contains(&long_text));
}

#[actix_web::test]
async fn test_unparsable_form_redirects_back_to_its_page() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));

    for uri in ["/login", "/register"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(header::ContentType::json())
            .set_payload(r#"{"username":"alice"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp).as_deref(), Some(uri));
    }

    let cookie = register!(app, "alice", "secret");
    let oversized = "a".repeat(crate::routes::FORM_LIMIT_BYTES + 1);
    let req = test::TestRequest::post()
        .uri("/submit")
        .cookie(cookie)
        .set_form([("confession", oversized.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp).as_deref(), Some("/submit"));
}

#[actix_web::test]
async fn test_logout_ends_session() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    let cookie = register!(app, "alice", "secret");

    let req = test::TestRequest::get().uri("/logout").cookie(cookie.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/"));
    let removal = response_cookie(&resp, SESSION_COOKIE_NAME).expect("removal cookie");
    assert_eq!(removal.value(), "");

    // 브라우저가 이전 쿠키를 다시 보내도 세션은 없음
    let req = test::TestRequest::get().uri("/submit").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/login"));
}

#[actix_web::test]
async fn test_tampered_session_cookie_is_anonymous() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    let cookie = register!(app, "alice", "secret");

    let tampered = Cookie::new(SESSION_COOKIE_NAME, format!("{}0", cookie.value()));
    let req = test::TestRequest::get().uri("/submit").cookie(tampered).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp).as_deref(), Some("/login"));
}

#[actix_web::test]
async fn test_login_rotates_session_token() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));
    let first = register!(app, "alice", "secret");

    let req = test::TestRequest::post()
        .uri("/login")
        .cookie(first.clone())
        .set_form(credentials("alice", "secret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let second = response_cookie(&resp, SESSION_COOKIE_NAME).expect("new session cookie");
    assert_ne!(first.value(), second.value());

    let req = test::TestRequest::get().uri("/submit").cookie(first).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/login"));

    let req = test::TestRequest::get().uri("/submit").cookie(second).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

fn state_param(url: &str) -> String {
    url.split(['?', '&'])
        .find_map(|pair| pair.strip_prefix("state="))
        .unwrap()
        .to_string()
}

#[actix_web::test]
async fn test_oauth_flow_creates_single_user() {
    let users = Arc::new(InMemoryUserRepository::new());
    let app = test_app!(test_state(users.clone()));

    for attempt in 0..2 {
        let req = test::TestRequest::get().uri("/auth/facebook").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);

        let provider_url = location(&resp).unwrap();
        assert!(provider_url.starts_with("https://www.facebook.com/v3.2/dialog/oauth?"));
        let state_cookie = response_cookie(&resp, OAUTH_STATE_COOKIE_NAME).expect("state cookie");

        let req = test::TestRequest::get()
            .uri(&format!(
                "/auth/facebook/confessions?code=code-{}&state={}",
                attempt,
                state_param(&provider_url)
            ))
            .cookie(state_cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(location(&resp).as_deref(), Some("/confessions"));
        let session = response_cookie(&resp, SESSION_COOKIE_NAME).expect("session cookie");

        let req = test::TestRequest::get().uri("/submit").cookie(session).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    assert_eq!(users.count(), 1);
}

#[actix_web::test]
async fn test_oauth_callback_failures_redirect_to_login() {
    let users = Arc::new(InMemoryUserRepository::new());
    let app = test_app!(test_state(users.clone()));

    let req = test::TestRequest::get().uri("/auth/facebook").to_request();
    let resp = test::call_service(&app, req).await;
    let provider_url = location(&resp).unwrap();
    let state_cookie = response_cookie(&resp, OAUTH_STATE_COOKIE_NAME).unwrap();
    let state = state_param(&provider_url);

    let cases = [
        // state 불일치
        (format!("/auth/facebook/confessions?code=abc&state={}x", state), true),
        // state 쿠키 없음
        (format!("/auth/facebook/confessions?code=abc&state={}", state), false),
        // 사용자가 거부
        (format!("/auth/facebook/confessions?error=access_denied&state={}", state), true),
        // 코드 누락
        (format!("/auth/facebook/confessions?state={}", state), true),
        // 코드 교환 실패
        (
            format!(
                "/auth/facebook/confessions?code={}&state={}",
                StubOAuthClient::REJECTED_CODE,
                state
            ),
            true,
        ),
    ];

    for (uri, with_cookie) in cases {
        let mut req = test::TestRequest::get().uri(&uri);
        if with_cookie {
            req = req.cookie(state_cookie.clone());
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(location(&resp).as_deref(), Some("/login"), "{}", uri);
        assert!(response_cookie(&resp, SESSION_COOKIE_NAME).is_none());
    }

    assert_eq!(users.count(), 0);
}

#[actix_web::test]
async fn test_unconfigured_and_unknown_providers() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));

    let req = test::TestRequest::get().uri("/auth/google").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp).as_deref(), Some("/login"));

    let req = test::TestRequest::get().uri("/auth/twitter").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/auth/twitter/confessions?code=x")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_check() {
    let app = test_app!(test_state(Arc::new(InMemoryUserRepository::new())));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

/// 세션 조회 횟수를 세는 저장소
#[derive(Default)]
struct CountingSessionStore {
    inner: MemorySessionStore,
    loads: AtomicUsize,
}

#[async_trait]
impl SessionStore for CountingSessionStore {
    async fn save(&self, key: &str, record: &SessionRecord, ttl_seconds: u64) -> Result<(), AppError> {
        self.inner.save(key, record, ttl_seconds).await
    }

    async fn load(&self, key: &str) -> Result<Option<SessionRecord>, AppError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(key).await
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.inner.remove(key).await
    }
}

#[actix_web::test]
async fn test_rate_limit_rejects_before_session_lookup() {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(CountingSessionStore::default());
    let state = AppState::for_tests(
        users.clone(),
        sessions.clone(),
        Arc::new(StubOAuthClient::returning(FACEBOOK_ID)),
        vec![facebook_settings()],
    );

    let user = users
        .insert_local(User::new_local("alice".to_string(), "hash".to_string()))
        .await
        .unwrap();
    let token = state.sessions.establish(&user, None).await.unwrap();
    let cookie = state.cookies.session_cookie(&token);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(1)
        .burst_size(1)
        .finish()
        .unwrap();
    let app = test::init_service(crate::confessions_app!(web::Data::new(state), &governor_conf)).await;

    let peer = "203.0.113.7:40000".parse().unwrap();
    let mut statuses = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/confessions")
            .peer_addr(peer)
            .cookie(cookie.clone())
            .to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        };
        statuses.push(status);
    }

    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]);
    // 거부된 요청은 세션 저장소에 닿지 않음
    assert_eq!(sessions.loads.load(Ordering::SeqCst), 1);
}
