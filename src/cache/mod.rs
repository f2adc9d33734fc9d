//! 对象缓存
//!
//! 目前仅用于缓存按令牌解析出的请求主体。

pub mod object_cache;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

pub use object_cache::moka::MokaCacheWrapper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String);
    async fn remove(&self, key: &str);
}

/// 读取 JSON 值，反序列化失败时删除该键
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str::<T>(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Dropping undecodable cache entry {}: {}", key, e);
                cache.remove(key).await;
                None
            }
        },
        CacheResult::NotFound => None,
    }
}

pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => cache.insert_raw(key, json).await,
        Err(e) => tracing::warn!("Failed to serialize cache entry {}: {}", key, e),
    }
}

/// 按配置创建缓存
pub fn create_object_cache() -> Arc<dyn ObjectCache> {
    Arc::new(MokaCacheWrapper::from_config())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, serde::Deserialize)]
    struct Entry {
        id: i64,
    }

    #[actix_web::test]
    async fn test_json_round_trip_and_bad_entry_removed() {
        let cache = MokaCacheWrapper::new(100, 60);
        insert_json(&cache, "entry:1".into(), &Entry { id: 1 }).await;
        assert_eq!(get_json::<Entry>(&cache, "entry:1").await, Some(Entry { id: 1 }));

        cache.insert_raw("entry:2".into(), "{broken".into()).await;
        assert_eq!(get_json::<Entry>(&cache, "entry:2").await, None);
        assert_eq!(cache.get_raw("entry:2").await, CacheResult::NotFound);
    }
}
