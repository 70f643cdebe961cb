use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{CodeAuraError, Result};
use crate::gateway::{PaymentGateway, create_gateway};
use crate::models::admins::{entities::AdminRole, requests::NewAdmin};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@codeaura.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    /// 未配置密钥时为 None
    pub gateway: Option<Arc<dyn PaymentGateway>>,
}

async fn try_cache_backend(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，失败时回退到 moka
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;

    warn!("Attempting to create {} cache backend", cache_type);

    if get_object_cache_plugin(cache_type).is_none() {
        warn!("Cache backend '{}' not found in registry", cache_type);
    }
    if let Some(cache) = try_cache_backend(cache_type).await {
        return Ok(cache);
    }

    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = try_cache_backend("moka").await {
            return Ok(cache);
        }
    }

    Err(CodeAuraError::cache_connection(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 初始化默认管理员账号
/// admins 表为空时创建 admin 账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_admins().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} admin(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No admins found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先从环境变量读取，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| {
            let pwd = generate_random_code(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = NewAdmin {
        username: DEFAULT_ADMIN_USERNAME.to_string(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        role: AdminRole::Admin,
    };

    match storage.create_admin(admin).await {
        Ok(admin) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                admin.id, admin.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存与支付网关
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 重复安装时返回 Err，忽略即可
    let _ = rustls::crypto::ring::default_provider().install_default();

    crate::cache::register::register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    let gateway = create_gateway()?;
    match &gateway {
        Some(_) => warn!("Payment gateway configured"),
        None => warn!("Payment gateway not configured, online payments are disabled"),
    }

    Ok(StartupContext {
        storage,
        cache,
        gateway,
    })
}
