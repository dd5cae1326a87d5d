//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경변수로 현재 환경을 판단합니다. 기본값은 Production입니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost. `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 3000;

    /// `PORT`가 없거나 비어 있으면 3000
    pub fn port() -> u16 {
        Self::parse_port(env::var("PORT").ok().as_deref())
    }

    pub fn parse_port(raw: Option<&str>) -> u16 {
        match raw.map(str::trim) {
            None | Some("") => Self::DEFAULT_PORT,
            Some(value) => value.parse().unwrap_or_else(|e| {
                log::error!("PORT 파싱 실패: {}. 기본값 {} 사용", e, Self::DEFAULT_PORT);
                Self::DEFAULT_PORT
            }),
        }
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn request_timeout_secs() -> u64 {
        env::var("SERVER_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30)
    }
}

/// 사용자 저장소 백엔드
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    MongoDb,
    Memory,
}

pub struct DatabaseConfig;

impl DatabaseConfig {
    /// `MONGODB_URI`가 있으면 그대로, 없으면 `DB_HOST`로 URI를 구성합니다.
    pub fn uri() -> String {
        if let Ok(uri) = env::var("MONGODB_URI") {
            if !uri.trim().is_empty() {
                return uri;
            }
        }

        Self::uri_for_host(env::var("DB_HOST").ok().as_deref())
    }

    pub fn uri_for_host(host: Option<&str>) -> String {
        let host = host
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or("localhost:27017");
        format!("mongodb://{}", host)
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "confessionsUserDB".to_string())
    }

    pub fn backend() -> StorageBackend {
        match env::var("STORAGE_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            _ => StorageBackend::MongoDb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(
            Environment::from_str("development"),
            Environment::Development
        );
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Development),
            4
        );
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Staging),
            10
        );
        assert_eq!(
            PasswordConfig::bcrypt_cost_for_env(&Environment::Production),
            12
        );
    }

    #[test]
    fn test_port_defaults_when_unset_or_empty() {
        assert_eq!(ServerConfig::parse_port(None), 3000);
        assert_eq!(ServerConfig::parse_port(Some("")), 3000);
        assert_eq!(ServerConfig::parse_port(Some("  ")), 3000);
        assert_eq!(ServerConfig::parse_port(Some("8081")), 8081);
        assert_eq!(ServerConfig::parse_port(Some("not-a-port")), 3000);
    }

    #[test]
    fn test_database_uri_from_host() {
        assert_eq!(
            DatabaseConfig::uri_for_host(Some("db.internal:27017")),
            "mongodb://db.internal:27017"
        );
        assert_eq!(
            DatabaseConfig::uri_for_host(None),
            "mongodb://localhost:27017"
        );
        assert_eq!(
            DatabaseConfig::uri_for_host(Some("")),
            "mongodb://localhost:27017"
        );
    }
}
