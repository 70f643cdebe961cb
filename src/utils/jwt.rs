use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
pub const STUDENT_ROLE: &str = "student";
pub const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 学生 ID
    pub role: String,       // 固定为 student
    pub token_type: String, // access 或 refresh
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn student_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// access token 有效期（秒）
    pub fn access_token_expires_in() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    pub fn generate_access_token(student_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            student_id,
            ACCESS_TOKEN,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    pub fn generate_refresh_token(student_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            student_id,
            REFRESH_TOKEN,
            chrono::Duration::days(config.jwt.refresh_token_expiry),
        )
    }

    pub fn generate_token_with_expiry(
        student_id: i64,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: student_id.to_string(),
            role: STUDENT_ROLE.to_string(),
            token_type: token_type.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
    }

    pub fn generate_token_pair(student_id: i64) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(student_id)?,
            refresh_token: Self::generate_refresh_token(student_id)?,
        })
    }

    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    // 验证 token 类型与角色
    pub fn verify_token_type(
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = Self::verify_token(token)?;
        if claims.token_type != expected_type || claims.role != STUDENT_ROLE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, ACCESS_TOKEN)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, REFRESH_TOKEN)
    }

    /// 用 refresh token 换新的 access token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let student_id = claims
            .student_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(student_id)
    }

    pub fn create_refresh_token_cookie(refresh_token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(
                config.jwt.refresh_token_expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 空 cookie，用于注销
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 依次从 Authorization 头和 cookie 中取 refresh token
    pub fn extract_refresh_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_string)
            .or_else(|| req.cookie(REFRESH_COOKIE).map(|c| c.value().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_types_are_not_interchangeable() {
        let pair = JwtUtils::generate_token_pair(7).unwrap();

        let claims = JwtUtils::verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.student_id(), Some(7));
        assert_eq!(claims.role, STUDENT_ROLE);

        assert!(JwtUtils::verify_refresh_token(&pair.access_token).is_err());
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
        assert!(JwtUtils::refresh_access_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            JwtUtils::generate_token_with_expiry(1, ACCESS_TOKEN, chrono::Duration::hours(-2))
                .unwrap();
        assert!(JwtUtils::verify_access_token(&token).is_err());
    }

    #[test]
    fn test_refresh_token_from_cookie() {
        let req = actix_web::test::TestRequest::default()
            .cookie(Cookie::new(REFRESH_COOKIE, "abc"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_refresh_token(&req).as_deref(), Some("abc"));

        let req = actix_web::test::TestRequest::default()
            .insert_header(("Authorization", "Bearer xyz"))
            .cookie(Cookie::new(REFRESH_COOKIE, "abc"))
            .to_http_request();
        assert_eq!(JwtUtils::extract_refresh_token(&req).as_deref(), Some("xyz"));
    }
}
