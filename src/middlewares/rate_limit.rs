/*!
 * 速率限制中间件
 *
 * 固定窗口计数，超过限制返回 429。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * 限制键默认使用客户端 IP，已认证的学生使用学生 ID。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 全局速率限制缓存
/// 键: 前缀:身份，值: (窗口内计数, 窗口开始时间)
static RATE_LIMIT_CACHE: Lazy<Cache<String, (u32, Instant)>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
}

impl RateLimit {
    /// 创建新的速率限制器
    ///
    /// # 参数
    /// - `max_requests`: 时间窗口内允许的最大请求数
    /// - `window_secs`: 时间窗口（秒）
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 学生登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 手机验证码发送与校验：5次/5分钟/IP
    pub fn otp() -> Self {
        Self::new(5, 300).with_prefix("otp")
    }

    /// 刷新令牌：10次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 后台登录：5次/分钟/IP
    pub fn admin_login() -> Self {
        Self::new(5, 60).with_prefix("admin_login")
    }
}

/// 客户端 IP：连接信息优先，其次 X-Forwarded-For 首项、X-Real-IP
///
/// 转发头可被伪造，只在可信反向代理之后使用。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
    };

    [
        connection_ip.clone(),
        header("X-Forwarded-For"),
        header("X-Real-IP"),
    ]
    .into_iter()
    .flatten()
    .find(|ip| is_valid_ip(ip))
    .or(connection_ip)
    .unwrap_or_else(|| "unknown".to_string())
}

/// 验证 IP 地址格式是否有效
fn is_valid_ip(ip: &str) -> bool {
    use std::net::IpAddr;
    ip.parse::<IpAddr>().is_ok()
}

/// 已认证学生的 ID
fn extract_student_id(req: &ServiceRequest) -> Option<i64> {
    use crate::models::students::entities::Student;
    req.extensions().get::<Student>().map(|student| student.id)
}

/// 固定窗口计数，返回 (是否放行, 计数, 窗口开始时间)
fn hit(
    entry: Option<(u32, Instant)>,
    now: Instant,
    window: Duration,
    max: u32,
) -> (bool, u32, Instant) {
    let (count, started) = match entry {
        Some((count, started)) if now.duration_since(started) < window => (count, started),
        _ => (0, now),
    };
    if count >= max {
        (false, count, started)
    } else {
        (true, count + 1, started)
    }
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window_secs: self.window_secs,
            key_prefix: self.key_prefix.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let max_requests = self.max_requests;
        let window_secs = self.window_secs;
        let key_prefix = self.key_prefix.clone();

        Box::pin(async move {
            let identifier = extract_student_id(&req)
                .map(|id| format!("student:{id}"))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));

            let cache_key = if key_prefix.is_empty() {
                identifier
            } else {
                format!("{key_prefix}:{identifier}")
            };

            let window = Duration::from_secs(window_secs);
            let now = Instant::now();
            let (allowed, count, started) =
                hit(RATE_LIMIT_CACHE.get(&cache_key).await, now, window, max_requests);

            if !allowed {
                let retry_after = window
                    .saturating_sub(now.duration_since(started))
                    .as_secs()
                    .max(1);
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    cache_key, count, max_requests
                );
                return Ok(req
                    .into_response(create_rate_limit_response(retry_after).map_into_right_body()));
            }

            RATE_LIMIT_CACHE.insert(cache_key, (count, started)).await;

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(max_requests.saturating_sub(count)),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let register = RateLimit::register();
        assert_eq!(register.max_requests, 3);

        let otp = RateLimit::otp();
        assert_eq!(otp.window_secs, 300);
        assert_eq!(RateLimit::admin_login().key_prefix, "admin_login");
    }

    #[test]
    fn test_fixed_window() {
        let window = Duration::from_secs(60);
        let start = Instant::now();

        let (ok, count, started) = hit(None, start, window, 2);
        assert!(ok);
        assert_eq!(count, 1);
        let (ok, count, _) = hit(Some((count, started)), start, window, 2);
        assert!(ok);
        assert_eq!(count, 2);
        let (ok, _, _) = hit(Some((count, started)), start, window, 2);
        assert!(!ok);

        // 窗口结束后重新计数
        let later = start + Duration::from_secs(61);
        let (ok, count, restarted) = hit(Some((2, started)), later, window, 2);
        assert!(ok);
        assert_eq!(count, 1);
        assert_eq!(restarted, later);
    }

    #[test]
    fn test_ip_validation() {
        assert!(is_valid_ip("10.0.0.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("not-an-ip"));
    }
}
