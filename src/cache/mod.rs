//! 对象缓存
//!
//! 后端以插件形式注册（见 [`register`]），启动时按配置选择，redis 不可用时回退到 moka。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端出错，调用方应当回源
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 以 JSON 读取缓存对象，反序列化失败的条目会被删除
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Dropping undecodable cache entry '{}': {}", key, e);
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T, ttl: u64) {
    match serde_json::to_string(value) {
        Ok(json) => cache.insert_raw(key, json, ttl).await,
        Err(e) => tracing::warn!("Failed to serialize cache entry '{}': {}", key, e),
    }
}

/// 注册缓存插件，`$ty` 需提供 `fn new() -> Result<Self, String>`
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CourseAppError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::courses::entities::CourseStats;

    #[tokio::test]
    async fn test_json_helpers_round_trip() {
        let cache = MokaCacheWrapper::with_settings(16, 60);
        let stats = CourseStats {
            students_active_count: 3,
            students_total_count: 4,
            mentors_active_count: 1,
            mentors_total_count: 1,
        };
        insert_json(&cache, "course_stats:1".to_string(), &stats, 0).await;

        let cached: Option<CourseStats> = get_json(&cache, "course_stats:1").await;
        assert_eq!(cached, Some(stats));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_removed() {
        let cache = MokaCacheWrapper::with_settings(16, 60);
        cache
            .insert_raw("course_stats:2".to_string(), "not json".to_string(), 0)
            .await;

        let cached: Option<CourseStats> = get_json(&cache, "course_stats:2").await;
        assert!(cached.is_none());
        assert_eq!(cache.get_raw("course_stats:2").await, CacheResult::NotFound);
    }
}
