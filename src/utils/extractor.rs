//! 路径参数安全提取器
//!
//! 非数字或非正数的路径 ID 直接返回 400 信封，不会进入业务层。

/// 定义一个从路径参数中提取正整数 ID 的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:expr) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                std::future::ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => {
                        let response = actix_web::HttpResponse::BadRequest().json(
                            $crate::models::ApiResponse::error_empty(
                                $crate::models::ErrorCode::BadRequest,
                                format!("Invalid path parameter: {}", $param),
                            ),
                        );
                        Err(actix_web::error::InternalError::from_response(
                            format!("invalid {}", $param),
                            response,
                        )
                        .into())
                    }
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeBatchIdI64, "batch_id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_i64_extractor!(SafeEnrollmentIdI64, "enrollment_id");
define_safe_i64_extractor!(SafePaymentIdI64, "payment_id");
define_safe_i64_extractor!(SafeNotificationIdI64, "notification_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{FromRequest, test};

    #[actix_web::test]
    async fn test_extracts_positive_id() {
        let req = test::TestRequest::default()
            .param("course_id", "42")
            .to_http_request();
        let id = SafeCourseIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_rejects_bad_ids() {
        for raw in ["abc", "0", "-3", "1.5"] {
            let req = test::TestRequest::default()
                .param("id", raw)
                .to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err(), "{raw} accepted");
        }
    }
}
