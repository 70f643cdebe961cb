use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;

/// 值与其 TTL (秒) 一起存放，由 [`EntryTtl`] 决定过期时间
type Entry = (String, u64);

struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Duration::from_secs(value.1))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(Duration::from_secs(value.1))
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: u64,
}

impl MokaCacheWrapper {
    pub fn new(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryTtl)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default ttl: {}s",
            max_capacity, default_ttl
        );
        Self { inner, default_ttl }
    }

    pub fn from_config() -> Self {
        let config = AppConfig::get();
        Self::new(config.cache.memory.max_capacity, config.cache.default_ttl)
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some((value, _)) => {
                debug!("Cache hit: {}", key);
                CacheResult::Found(value)
            }
            None => {
                debug!("Cache miss: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let effective_ttl = if ttl == 0 { self.default_ttl } else { ttl };
        self.inner.insert(key, (value, effective_ttl)).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new(100, 60);
        cache
            .insert_raw("otp:9876543210".into(), "123456".into(), 0)
            .await;
        assert_eq!(
            cache.get_raw("otp:9876543210").await,
            CacheResult::Found("123456".to_string())
        );
        cache.remove("otp:9876543210").await;
        assert_eq!(cache.get_raw("otp:9876543210").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires() {
        let cache = MokaCacheWrapper::new(100, 60);
        cache.insert_raw("short".into(), "v".into(), 1).await;
        cache.insert_raw("long".into(), "v".into(), 60).await;
        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("long").await, CacheResult::Found("v".into()));
    }
}
