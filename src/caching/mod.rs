//! Redis 연결 모듈
//!
//! 세션 레코드를 TTL과 함께 저장하는 데 사용합니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
