use std::collections::HashMap;

use async_trait::async_trait;
use deadpool_redis::Pool;
use redis::AsyncCommands;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use shared_database::redis_pool::pool_connection;

use crate::error::SequenceError;

/// Durable per-scope counter. `next_value` must be a single atomic
/// increment-and-fetch: concurrent callers never observe the same value.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment the scope's counter and return the new value. The first
    /// call for a scope returns 1.
    async fn next_value(&self, scope: &str) -> Result<u64, SequenceError>;

    /// Last value handed out for the scope, 0 when unused or just reset.
    async fn current_value(&self, scope: &str) -> Result<u64, SequenceError>;

    async fn reset(&self, scope: &str) -> Result<(), SequenceError>;
}

pub struct RedisCounterStore {
    pool: Pool,
    key_prefix: String,
}

impl RedisCounterStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            key_prefix: String::new(),
        }
    }

    /// Namespace every counter key, e.g. to isolate test runs.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key(&self, scope: &str) -> String {
        format!("{}counter:{}", self.key_prefix, scope)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn next_value(&self, scope: &str) -> Result<u64, SequenceError> {
        let mut conn = pool_connection(&self.pool).await?;

        // INCR creates the key at 0 before incrementing.
        let value: u64 = conn.incr(self.key(scope), 1u64).await.map_err(|e| {
            error!("Counter increment failed for scope {}: {}", scope, e);
            SequenceError::RedisError(e)
        })?;

        debug!("Counter {} advanced to {}", scope, value);
        Ok(value)
    }

    async fn current_value(&self, scope: &str) -> Result<u64, SequenceError> {
        let mut conn = pool_connection(&self.pool).await?;
        let value: Option<u64> = conn.get(self.key(scope)).await?;
        Ok(value.unwrap_or(0))
    }

    async fn reset(&self, scope: &str) -> Result<(), SequenceError> {
        let mut conn = pool_connection(&self.pool).await?;
        let _: () = conn.set(self.key(scope), 0u64).await?;
        info!("Counter {} reset to 0", scope);
        Ok(())
    }
}

/// Single-process counter for tests and local development. Values are not
/// shared between server instances.
#[derive(Default)]
pub struct InMemoryCounterStore {
    counters: Mutex<HashMap<String, u64>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn next_value(&self, scope: &str) -> Result<u64, SequenceError> {
        let mut counters = self.counters.lock().await;
        let seq = counters.entry(scope.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }

    async fn current_value(&self, scope: &str) -> Result<u64, SequenceError> {
        let counters = self.counters.lock().await;
        Ok(counters.get(scope).copied().unwrap_or(0))
    }

    async fn reset(&self, scope: &str) -> Result<(), SequenceError> {
        let mut counters = self.counters.lock().await;
        counters.insert(scope.to_string(), 0);
        Ok(())
    }
}
