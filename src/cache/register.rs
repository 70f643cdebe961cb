use crate::cache::ObjectCache;
use crate::cache::object_cache::{moka::MokaCacheWrapper, redis::RedisObjectCache};
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, Once, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static OBJECT_CACHE_REGISTRY: Lazy<RwLock<HashMap<String, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

static BUILTIN_PLUGINS: Once = Once::new();

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    let mut registry = OBJECT_CACHE_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name.into(), constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

/// 注册内置的 moka 与 redis 后端，可重复调用
pub fn register_builtin_plugins() {
    BUILTIN_PLUGINS.call_once(|| {
        register_object_cache_plugin(
            "moka",
            Arc::new(|| {
                Box::pin(async {
                    Ok(Box::new(MokaCacheWrapper::from_config()) as Box<dyn ObjectCache>)
                })
            }),
        );
        register_object_cache_plugin(
            "redis",
            Arc::new(|| {
                Box::pin(async {
                    let cache = RedisObjectCache::connect().await?;
                    Ok(Box::new(cache) as Box<dyn ObjectCache>)
                })
            }),
        );
    });
}

pub fn debug_object_cache_registry() {
    let registry = OBJECT_CACHE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if registry.is_empty() {
        tracing::debug!("No object cache plugins registered.");
    } else {
        tracing::debug!("Registered object cache plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins_registered() {
        register_builtin_plugins();
        register_builtin_plugins();
        assert!(get_object_cache_plugin("moka").is_some());
        assert!(get_object_cache_plugin("redis").is_some());
        assert!(get_object_cache_plugin("memcached").is_none());
    }
}
