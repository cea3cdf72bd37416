use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::cache::{RedisOtpCache, RedisSessionStore};
use crate::infra::db::{DbTokenRepository, DbUserRepository};
use crate::infra::notify::QueueNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub notifier: QueueNotifier,
    pub cookie_domain: Option<String>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_repo(&self) -> DbTokenRepository {
        DbTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_cache(&self) -> RedisOtpCache {
        RedisOtpCache {
            pool: self.redis.clone(),
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
        }
    }

    pub fn notifier(&self) -> QueueNotifier {
        self.notifier.clone()
    }
}
