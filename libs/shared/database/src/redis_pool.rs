use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::{ErrorKind, RedisError};
use tracing::info;

use shared_config::AppConfig;

/// Build a pooled Redis client and make sure the server answers before
/// handing the pool out.
pub async fn create_redis_pool(config: &AppConfig) -> Result<Pool, RedisError> {
    let cfg = Config::from_url(config.redis_url());
    let pool = cfg.create_pool(Some(Runtime::Tokio1)).map_err(|e| {
        RedisError::from((
            ErrorKind::IoError,
            "Failed to create Redis pool",
            format!("Pool creation error: {}", e),
        ))
    })?;

    let mut conn = pool_connection(&pool).await?;
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;
    info!("Redis pool initialized successfully");

    Ok(pool)
}

pub async fn pool_connection(pool: &Pool) -> Result<Connection, RedisError> {
    pool.get().await.map_err(|e| {
        RedisError::from((
            ErrorKind::IoError,
            "Failed to get Redis connection",
            e.to_string(),
        ))
    })
}
