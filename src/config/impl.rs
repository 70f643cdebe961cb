use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // 默认配置文件
            .add_source(File::with_name("config").required(false))
            // 环境特定配置文件
            .add_source(File::with_name(&format!("config.{environment}")).required(false))
            // CODEAURA_SERVER__PORT=8080 形式的环境变量
            .add_source(
                Environment::with_prefix("CODEAURA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        // 常用环境变量直接覆盖
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option("payment.key_id", std::env::var("PAYMENT_KEY_ID").ok())?
            .set_override_option(
                "payment.key_secret",
                std::env::var("PAYMENT_KEY_SECRET").ok(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers).max(1);
        }

        if app_config.jwt.secret.is_empty() {
            if app_config.is_production() {
                return Err(ConfigError::Message(
                    "jwt.secret must be set in production".to_string(),
                ));
            }
            // 开发环境下每次启动生成临时密钥
            app_config.jwt.secret = crate::utils::random_code::generate_random_code(48);
        }

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_usable() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.admin.cookie_name, "admin_session");
        assert_eq!(config.payment.currency, "INR");
        assert!(!config.payment.gateway_enabled());
        assert!(config.is_development());
        assert_eq!(config.server_bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 8080\n[payment]\nkey_id = \"rzp_test\"\nkey_secret = \"s\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.otp_ttl, 300);
        assert!(config.payment.gateway_enabled());
    }
}
