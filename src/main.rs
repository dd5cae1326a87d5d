//! 고백 게시판 메인 애플리케이션
//!
//! 저장소를 연결하고 `AppState`를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;
use std::time::Duration;

use actix_governor::GovernorConfigBuilder;
use actix_web::{web, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use confessions_backend::caching::redis::RedisClient;
use confessions_backend::config::{
    DatabaseConfig, Environment, OAuthConfig, ServerConfig, SessionBackend, SessionConfig,
    StorageBackend,
};
use confessions_backend::core::AppState;
use confessions_backend::confessions_app;
use confessions_backend::db::Database;
use confessions_backend::repositories::sessions::{MemorySessionStore, RedisSessionStore, SessionStore};
use confessions_backend::repositories::users::{InMemoryUserRepository, MongoUserRepository, UserStore};
use confessions_backend::services::auth::HttpOAuthClient;

#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 고백 게시판 서비스 시작중... ({:?})", Environment::current());

    let user_store = initialize_user_store().await?;
    let session_store = initialize_session_store().await?;
    let oauth_client = HttpOAuthClient::new().map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = AppState::from_config(user_store, session_store, Arc::new(oauth_client))
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    for provider in state.oauth.enabled_providers() {
        info!("🔐 {} OAuth 활성화", provider.display_name());
    }
    if state.oauth.enabled_providers().is_empty() {
        warn!("OAuth 프로바이더가 설정되지 않았습니다. 로컬 로그인만 사용할 수 있습니다");
    }
    info!("🔗 OAuth 콜백 기본 주소: {}", OAuthConfig::public_base_url());

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state).await
}

async fn start_http_server(state: AppState) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let state = web::Data::new(state);

    // Rate Limiting은 세션 조회보다 바깥에서 적용
    HttpServer::new(move || confessions_app!(state.clone(), &governor_conf))
    .client_request_timeout(Duration::from_secs(ServerConfig::request_timeout_secs()))
    .bind(bind_address)?
    .run()
    .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

async fn initialize_user_store() -> std::io::Result<Arc<dyn UserStore>> {
    let store: Arc<dyn UserStore> = match DatabaseConfig::backend() {
        StorageBackend::MongoDb => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::new()
                .await
                .map_err(|e| std::io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

            Arc::new(MongoUserRepository::new(database))
        }
        StorageBackend::Memory => {
            warn!("⚠️ 메모리 사용자 저장소 사용 중 (재시작 시 데이터가 사라집니다)");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    store
        .init()
        .await
        .map_err(|e| std::io::Error::other(format!("사용자 저장소 초기화 실패: {}", e)))?;

    Ok(store)
}

async fn initialize_session_store() -> std::io::Result<Arc<dyn SessionStore>> {
    match SessionConfig::backend() {
        SessionBackend::Redis => {
            let redis_client = RedisClient::new()
                .await
                .map_err(|e| std::io::Error::other(format!("Redis 연결 실패: {}", e)))?;

            Ok(Arc::new(RedisSessionStore::new(Arc::new(redis_client))))
        }
        SessionBackend::Memory => {
            warn!("⚠️ 메모리 세션 저장소 사용 중 (재시작 시 모든 세션이 사라집니다)");
            Ok(Arc::new(MemorySessionStore::new()))
        }
    }
}

fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
