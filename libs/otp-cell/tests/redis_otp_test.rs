//! Runs against a real Redis server when `REDIS_TEST_URL` is set; skipped
//! otherwise.

use chrono::{Duration, Utc};
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use uuid::Uuid;

use otp_cell::{OneTimeCode, OtpStore, RedisOtpStore};

const PHONE: &str = "0771234567";

struct RedisTestContext {
    pool: Pool,
    prefix: String,
}

impl RedisTestContext {
    async fn new() -> Option<Self> {
        let url = std::env::var("REDIS_TEST_URL").ok()?;
        let pool = Config::from_url(url).create_pool(Some(Runtime::Tokio1)).ok()?;
        let prefix = format!("test_{}:", Uuid::new_v4().simple());
        Some(Self { pool, prefix })
    }

    fn store(&self) -> RedisOtpStore {
        RedisOtpStore::new(self.pool.clone()).with_key_prefix(self.prefix.clone())
    }

    async fn cleanup(&self) {
        let mut conn = self.pool.get().await.expect("redis connection");
        let keys: Vec<String> = conn.keys(format!("{}*", self.prefix)).await.unwrap_or_default();
        if !keys.is_empty() {
            let _: () = conn.del(keys).await.expect("cleanup failed");
        }
    }
}

#[tokio::test]
async fn test_redis_consume_is_single_use() {
    let Some(ctx) = RedisTestContext::new().await else {
        eprintln!("REDIS_TEST_URL not set, skipping");
        return;
    };
    let store = ctx.store();
    let owner = Uuid::new_v4();
    let now = Utc::now();

    let record = OneTimeCode::new(owner, "123456".to_string(), PHONE.to_string(), now);
    assert!(store.insert(&record).await.unwrap());
    assert!(!store.insert(&record).await.unwrap(), "duplicate owner/code must not overwrite");

    assert!(!store.consume(owner, "123456", "0770000000", now).await.unwrap());
    assert!(store.consume(owner, "123456", PHONE, now).await.unwrap());
    assert!(!store.consume(owner, "123456", PHONE, now).await.unwrap());

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_redis_consume_rechecks_expiry() {
    let Some(ctx) = RedisTestContext::new().await else {
        eprintln!("REDIS_TEST_URL not set, skipping");
        return;
    };
    let store = ctx.store();
    let owner = Uuid::new_v4();
    let now = Utc::now();

    let record = OneTimeCode::new(owner, "654321".to_string(), PHONE.to_string(), now);
    store.insert(&record).await.unwrap();

    // Pretend the clock moved past expiry before the TTL purge ran.
    let later = now + Duration::minutes(16);
    assert!(!store.consume(owner, "654321", PHONE, later).await.unwrap());

    ctx.cleanup().await;
}
