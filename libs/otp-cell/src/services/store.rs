use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::Pool;
use redis::Script;
use tokio::sync::Mutex;
use tracing::{debug, error};
use uuid::Uuid;

use shared_database::redis_pool::pool_connection;

use crate::error::OtpError;
use crate::models::OneTimeCode;

/// Persistence for one-time codes. `consume` is the single atomic
/// read-modify-write that turns a matching, unused, unexpired record into a
/// verified one; two concurrent calls for the same record never both win.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Returns `false` without writing when a record with the same owner and
    /// code already exists.
    async fn insert(&self, record: &OneTimeCode) -> Result<bool, OtpError>;

    async fn consume(
        &self,
        owner_id: Uuid,
        code: &str,
        contact_value: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, OtpError>;
}

const INSERT_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    return 0
end
redis.call('HSET', KEYS[1],
    'owner_id', ARGV[1],
    'code', ARGV[2],
    'contact_value', ARGV[3],
    'expires_at', ARGV[4],
    'verified', '0',
    'created_at', ARGV[5])
redis.call('PEXPIREAT', KEYS[1], ARGV[4])
return 1
"#;

// Expiry is compared here too: the TTL purge and a late validation can race.
const CONSUME_SCRIPT: &str = r#"
local fields = redis.call('HMGET', KEYS[1], 'contact_value', 'expires_at', 'verified')
if not fields[1] or fields[1] ~= ARGV[1] then
    return 0
end
if fields[3] ~= '0' then
    return 0
end
if tonumber(fields[2]) <= tonumber(ARGV[2]) then
    return 0
end
redis.call('HSET', KEYS[1], 'verified', '1')
return 1
"#;

/// Codes live in Redis hashes keyed by owner and code, with a `PEXPIREAT`
/// at the record's expiry so the server purges them.
pub struct RedisOtpStore {
    pool: Pool,
    key_prefix: String,
    insert_script: Script,
    consume_script: Script,
}

impl RedisOtpStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            key_prefix: String::new(),
            insert_script: Script::new(INSERT_SCRIPT),
            consume_script: Script::new(CONSUME_SCRIPT),
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key(&self, owner_id: Uuid, code: &str) -> String {
        format!("{}otp:{}:{}", self.key_prefix, owner_id, code)
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn insert(&self, record: &OneTimeCode) -> Result<bool, OtpError> {
        let mut conn = pool_connection(&self.pool).await?;

        let inserted: i32 = self.insert_script
            .key(self.key(record.owner_id, &record.code))
            .arg(record.owner_id.to_string())
            .arg(&record.code)
            .arg(&record.contact_value)
            .arg(record.expires_at.timestamp_millis())
            .arg(record.created_at.timestamp_millis())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to store one-time code for {}: {}", record.owner_id, e);
                OtpError::RedisError(e)
            })?;

        debug!("One-time code insert for {} returned {}", record.owner_id, inserted);
        Ok(inserted == 1)
    }

    async fn consume(
        &self,
        owner_id: Uuid,
        code: &str,
        contact_value: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, OtpError> {
        let mut conn = pool_connection(&self.pool).await?;

        let consumed: i32 = self.consume_script
            .key(self.key(owner_id, code))
            .arg(contact_value)
            .arg(now.timestamp_millis())
            .invoke_async(&mut conn)
            .await?;

        Ok(consumed == 1)
    }
}

/// Single-process store for tests and local development. Expired records
/// stay until `sweep_expired` runs, and `consume` re-checks expiry itself.
#[derive(Default)]
pub struct InMemoryOtpStore {
    records: Mutex<HashMap<(Uuid, String), OneTimeCode>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, owner_id: Uuid, code: &str) -> Option<OneTimeCode> {
        let records = self.records.lock().await;
        records.get(&(owner_id, code.to_string())).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Drop every record whose expiry has passed. Returns how many went.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| record.expires_at > now);
        before - records.len()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn insert(&self, record: &OneTimeCode) -> Result<bool, OtpError> {
        let mut records = self.records.lock().await;
        let key = (record.owner_id, record.code.clone());
        if records.contains_key(&key) {
            return Ok(false);
        }
        records.insert(key, record.clone());
        Ok(true)
    }

    async fn consume(
        &self,
        owner_id: Uuid,
        code: &str,
        contact_value: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, OtpError> {
        let mut records = self.records.lock().await;
        match records.get_mut(&(owner_id, code.to_string())) {
            Some(record) if record.accepts(code, contact_value, now) => {
                record.verified = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
