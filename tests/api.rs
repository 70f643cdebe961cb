//! HTTP 层集成测试：内存 SQLite + moka 缓存

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use codeaura_server::cache::object_cache::moka::MokaCacheWrapper;
use codeaura_server::cache::{CacheResult, ObjectCache};
use codeaura_server::config::DatabaseConfig;
use codeaura_server::errors::{CodeAuraError, Result as CodeAuraResult};
use codeaura_server::gateway::{GatewayOrder, GatewayPayment, PaymentGateway};
use codeaura_server::models::admins::{entities::AdminRole, requests::NewAdmin};
use codeaura_server::models::batches::entities::Batch;
use codeaura_server::models::batches::requests::CreateBatchRequest;
use codeaura_server::models::courses::requests::CreateCourseRequest;
use codeaura_server::models::payments::{entities::PaymentStatus, requests::NewPayment};
use codeaura_server::models::students::requests::NewStudent;
use codeaura_server::routes;
use codeaura_server::storage::Storage;
use codeaura_server::storage::sea_orm_storage::SeaOrmStorage;
use codeaura_server::utils::password::hash_password;

const PASSWORD: &str = "Coding2024";

async fn backends() -> (Arc<dyn Storage>, Arc<dyn ObjectCache>) {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::connect(&config).await.unwrap());
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(1000, 3600));
    (storage, cache)
}

macro_rules! app {
    ($storage:expr, $cache:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new($cache.clone()))
                .configure(routes::configure_all_routes),
        )
        .await
    };
    ($storage:expr, $cache:expr, $gateway:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new($cache.clone()))
                .app_data(web::Data::new($gateway.clone()))
                .configure(routes::configure_all_routes),
        )
        .await
    };
}

/// 注册并登录，返回 (学生ID, Bearer 头)
macro_rules! student_login {
    ($app:expr, $ip:expr, $email:expr, $phone:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .insert_header(("X-Forwarded-For", $ip))
            .set_json(register_body("Asha", $email, $phone))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        let student_id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header(("X-Forwarded-For", $ip))
            .set_json(json!({"email": $email, "password": PASSWORD}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        let token = body["data"]["access_token"].as_str().unwrap().to_string();
        (student_id, ("Authorization", format!("Bearer {token}")))
    }};
}

/// 内存网关：按支付号返回预置结果
#[derive(Default)]
struct FakeGateway {
    payments: HashMap<String, GatewayPayment>,
    reject_orders: bool,
}

impl FakeGateway {
    fn with_payment(
        mut self,
        id: &str,
        status: &str,
        order_id: Option<&str>,
        amount: i64,
    ) -> Self {
        self.payments.insert(
            id.to_string(),
            GatewayPayment {
                id: id.to_string(),
                status: status.to_string(),
                order_id: order_id.map(str::to_string),
                amount,
            },
        );
        self
    }

    fn into_dyn(self) -> Arc<dyn PaymentGateway> {
        Arc::new(self)
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> CodeAuraResult<GatewayOrder> {
        if self.reject_orders {
            return Err(CodeAuraError::gateway("gateway unavailable"));
        }
        Ok(GatewayOrder {
            id: format!("order_{amount_minor}"),
            amount: amount_minor,
            currency: currency.to_string(),
            receipt: Some(receipt.to_string()),
            status: "created".to_string(),
        })
    }

    async fn fetch_payment(&self, payment_id: &str) -> CodeAuraResult<GatewayPayment> {
        self.payments
            .get(payment_id)
            .cloned()
            .ok_or_else(|| CodeAuraError::gateway(format!("unknown payment {payment_id}")))
    }

    fn key_id(&self) -> &str {
        "rzp_test_key"
    }
}

async fn cached_otp(cache: &Arc<dyn ObjectCache>, phone: &str) -> Option<String> {
    match cache.get_raw(&format!("otp:{phone}")).await {
        CacheResult::Found(otp) => Some(otp),
        _ => None,
    }
}

fn wrong_otp(otp: &str) -> &'static str {
    if otp == "000000" { "111111" } else { "000000" }
}

async fn seed_phone_student(storage: &Arc<dyn Storage>, phone: &str) {
    storage
        .create_student(NewStudent {
            name: "Kiran".to_string(),
            phone: phone.to_string(),
            email: format!("{phone}@example.com"),
            password_hash: "hash".to_string(),
            stream: None,
            age: None,
        })
        .await
        .unwrap();
}

async fn seed_batch(storage: &Arc<dyn Storage>) -> Batch {
    let course = storage
        .create_course(CreateCourseRequest {
            name: "Python Basics".to_string(),
            course_type: "programming".to_string(),
            fee: 4999.0,
            duration: Some("3 months".to_string()),
            image_url: None,
            description: None,
            syllabus: None,
        })
        .await
        .unwrap();
    storage
        .create_batch(CreateBatchRequest {
            batch_name: "Morning".to_string(),
            course_id: course.id,
            timing: Some("07:00-09:00".to_string()),
            faculty: None,
            start_date: Some("2026-01-05".to_string()),
        })
        .await
        .unwrap()
}

async fn seed_admin(storage: &Arc<dyn Storage>, username: &str, role: AdminRole) {
    storage
        .create_admin(NewAdmin {
            username: username.to_string(),
            email: format!("{username}@codeaura.local"),
            password_hash: hash_password(PASSWORD).unwrap(),
            role,
        })
        .await
        .unwrap();
}

fn register_body(name: &str, email: &str, phone: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "phone": phone,
        "password": PASSWORD,
        "stream": "Science",
        "age": 19
    })
}

#[actix_web::test]
async fn test_register_login_and_profile() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    let ip = ("X-Forwarded-For", "10.0.0.1");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(ip)
        .set_json(register_body("Asha Nair", "Asha@Example.com", "9876543210"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "asha@example.com");
    assert!(body["data"].get("password_hash").is_none());

    // 同邮箱再次注册
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(ip)
        .set_json(register_body("Asha Again", "asha@example.com", "9876543211"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(ip)
        .set_json(json!({"email": "asha@example.com", "password": "wrong-pass1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(ip)
        .set_json(json!({"email": "asha@example.com", "password": PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert!(body["data"]["refresh_token"].as_str().is_some());

    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Asha Nair");
    assert_eq!(body["data"]["phone"], "9876543210");

    let req = test::TestRequest::get()
        .uri("/api/auth/profile")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_registration_validation() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);

    let cases = [
        register_body("Ravi", "ravi@example.com", "12345"),
        register_body("Ravi", "not-an-email", "9876500000"),
        json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "phone": "9876500000",
            "password": "short"
        }),
    ];

    for (i, body) in cases.into_iter().enumerate() {
        // 每个用例单独的 IP，避免触发注册限流
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .insert_header(("X-Forwarded-For", format!("10.0.1.{}", i + 1)))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case {i}");
    }
}

#[actix_web::test]
async fn test_enrollment_is_private_to_owner() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    let batch = seed_batch(&storage).await;
    let ip = ("X-Forwarded-For", "10.0.2.1");

    let mut tokens = Vec::new();
    for (name, email, phone) in [
        ("Asha", "asha@example.com", "9000000001"),
        ("Ravi", "ravi@example.com", "9000000002"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .insert_header(ip)
            .set_json(register_body(name, email, phone))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header(ip)
            .set_json(json!({"email": email, "password": PASSWORD}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        tokens.push(body["data"]["access_token"].as_str().unwrap().to_string());
    }
    let bearer = |i: usize| ("Authorization", format!("Bearer {}", tokens[i]));

    let req = test::TestRequest::post()
        .uri("/api/admission/enroll")
        .insert_header(bearer(0))
        .set_json(json!({"batch_id": batch.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let enrollment_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "active");

    let req = test::TestRequest::post()
        .uri("/api/admission/enroll")
        .insert_header(bearer(0))
        .set_json(json!({"batch_id": batch.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/admission/enroll")
        .insert_header(bearer(0))
        .set_json(json!({"batch_id": 9999}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/admission/enrollments/{enrollment_id}");
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(0))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/admission/my-enrollments")
        .insert_header(bearer(1))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_public_catalog_and_staff_guard() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    let batch = seed_batch(&storage).await;

    let req = test::TestRequest::get().uri("/api/courses").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/courses/{}", batch.course_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/courses/9999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 没有后台会话不能改课程
    let req = test::TestRequest::post()
        .uri("/api/courses")
        .set_json(json!({"name": "Rust", "type": "programming", "fee": 9999.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/admission/admin/enrollments")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/admin/dashboard").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_session_and_roles() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    seed_admin(&storage, "owner", AdminRole::Admin).await;
    seed_admin(&storage, "meera", AdminRole::Counsellor).await;
    let ip = ("X-Forwarded-For", "10.0.3.1");

    let req = test::TestRequest::post()
        .uri("/admin/login")
        .insert_header(ip)
        .set_json(json!({"username": "owner", "password": "nope12345"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let mut cookies = Vec::new();
    for username in ["owner", "meera"] {
        let req = test::TestRequest::post()
            .uri("/admin/login")
            .insert_header(ip)
            .set_json(json!({"username": username, "password": PASSWORD}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == "admin_session")
            .unwrap()
            .into_owned();
        cookies.push(cookie);
    }

    let req = test::TestRequest::get()
        .uri("/admin/me")
        .cookie(cookies[1].clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "meera");
    assert_eq!(body["data"]["role"], "counsellor");

    // 后台人员可以建课程
    let req = test::TestRequest::post()
        .uri("/api/courses")
        .cookie(cookies[1].clone())
        .set_json(json!({"name": "Rust Systems", "type": "programming", "fee": 9999.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/courses")
        .cookie(cookies[1].clone())
        .set_json(json!({"name": "", "type": "programming", "fee": 10.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let student = storage
        .create_student(codeaura_server::models::students::requests::NewStudent {
            name: "Asha".to_string(),
            phone: "9000000001".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "hash".to_string(),
            stream: None,
            age: None,
        })
        .await
        .unwrap();
    let uri = format!("/admin/students/{}", student.id);

    // 删除学生仅限 admin 角色
    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(cookies[1].clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&uri)
        .cookie(cookies[1].clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .cookie(cookies[0].clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(storage.get_student_by_id(student.id).await.unwrap().is_none());

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .cookie(cookies[0].clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_students"], 0);
    assert_eq!(body["data"]["total_courses"], 1);

    let req = test::TestRequest::post()
        .uri("/admin/logout")
        .cookie(cookies[0].clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/admin/me")
        .cookie(cookies[0].clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_notifications_visibility() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    let ip = ("X-Forwarded-For", "10.0.4.1");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .insert_header(ip)
        .set_json(register_body("Asha", "asha@example.com", "9000000001"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let student_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(ip)
        .set_json(json!({"email": "asha@example.com", "password": PASSWORD}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let bearer = (
        "Authorization",
        format!("Bearer {}", body["data"]["access_token"].as_str().unwrap()),
    );

    storage
        .create_notification("Fee due", "Pay by Friday", Some(student_id))
        .await
        .unwrap();
    let broadcast = storage
        .create_notification("Holiday", "Closed Monday", None)
        .await
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/notifications/unread-count")
        .insert_header(bearer.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"], 2);

    // 广播不能被学生删除
    let req = test::TestRequest::delete()
        .uri(&format!("/api/notifications/{}", broadcast.id))
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri("/api/notifications/mark-all-read")
        .insert_header(bearer.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/notifications/unread-count")
        .insert_header(bearer)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unread_count"], 0);
}

#[actix_web::test]
async fn test_course_list_page_bounds() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    seed_batch(&storage).await;
    storage
        .create_course(CreateCourseRequest {
            name: "Web Development".to_string(),
            course_type: "programming".to_string(),
            fee: 6999.0,
            duration: None,
            image_url: None,
            description: None,
            syllabus: None,
        })
        .await
        .unwrap();

    // 超大页码返回空列表而不是溢出
    let req = test::TestRequest::get()
        .uri("/api/courses?page=9223372036854775807&size=100")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["data"]["pagination"]["total"], 2);

    // per_page 与 size 等价
    let req = test::TestRequest::get()
        .uri("/api/courses?page=1&per_page=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"]["pagination"]["page_size"], 1);
    assert_eq!(body["data"]["pagination"]["total_pages"], 2);
}

#[actix_web::test]
async fn test_create_payment_flow() {
    let (storage, cache) = backends().await;
    let failing = FakeGateway {
        reject_orders: true,
        ..Default::default()
    }
    .into_dyn();
    let app = app!(storage, cache, failing);
    let (student_id, bearer) =
        student_login!(app, "10.0.5.1", "payer@example.com", "9000000051");

    let req = test::TestRequest::post()
        .uri("/api/payments/create")
        .insert_header(bearer.clone())
        .set_json(json!({"amount": 0, "method": "upi"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 网关下单失败时不落库
    let req = test::TestRequest::post()
        .uri("/api/payments/create")
        .insert_header(bearer.clone())
        .set_json(json!({"amount": 4999.0, "method": "razorpay"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(storage.list_student_payments(student_id).await.unwrap().is_empty());

    let gateway = FakeGateway::default().into_dyn();
    let app = app!(storage, cache, gateway);
    let req = test::TestRequest::post()
        .uri("/api/payments/create")
        .insert_header(bearer)
        .set_json(json!({"amount": 4999.0, "method": "razorpay"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["order_id"], "order_499900");
    assert_eq!(body["data"]["order_amount"], 499_900);
    assert_eq!(body["data"]["key_id"], "rzp_test_key");
    assert_eq!(body["data"]["status"], "pending");

    let stored = storage.list_student_payments(student_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].gateway_order_id.as_deref(), Some("order_499900"));
}

#[actix_web::test]
async fn test_verify_payment_checks_order_and_amount() {
    let (storage, cache) = backends().await;
    let gateway = FakeGateway::default()
        .with_payment("pay_small", "captured", None, 100)
        .with_payment("pay_short", "captured", Some("order_big"), 100)
        .with_payment("pay_declined", "failed", Some("order_fee"), 100)
        .with_payment("pay_big", "captured", Some("order_big"), 499_900)
        .into_dyn();
    let app = app!(storage, cache, gateway);
    let (student_id, bearer) =
        student_login!(app, "10.0.6.1", "verifier@example.com", "9000000061");

    let big = storage
        .create_payment(NewPayment {
            student_id,
            amount: 4999.0,
            method: "razorpay".to_string(),
            gateway_order_id: Some("order_big".to_string()),
        })
        .await
        .unwrap();
    let fee = storage
        .create_payment(NewPayment {
            student_id,
            amount: 1.0,
            method: "razorpay".to_string(),
            gateway_order_id: Some("order_fee".to_string()),
        })
        .await
        .unwrap();

    let verify = |payment_id: &str, order_id: &str| {
        test::TestRequest::post()
            .uri("/api/payments/verify")
            .insert_header(bearer.clone())
            .set_json(json!({"payment_id": payment_id, "order_id": order_id}))
            .to_request()
    };

    let resp = test::call_service(&app, verify("  ", "order_big")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Payment ID and Order ID are required");

    let resp = test::call_service(&app, verify("pay_big", "")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, verify("pay_big", "order_missing")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 未绑定订单的小额支付不能核销大额订单
    let resp = test::call_service(&app, verify("pay_small", "order_big")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    // 订单相同但金额不足
    let resp = test::call_service(&app, verify("pay_short", "order_big")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let stored = storage.get_payment_by_id(big.id).await.unwrap().unwrap();
    assert_eq!(stored.status, PaymentStatus::Pending);

    let resp = test::call_service(&app, verify("pay_declined", "order_fee")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Payment failed");
    let stored = storage.get_payment_by_id(fee.id).await.unwrap().unwrap();
    assert_eq!(stored.status, PaymentStatus::Failed);

    let resp = test::call_service(&app, verify("pay_big", "order_big")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "success");
    assert_eq!(body["data"]["gateway_payment_id"], "pay_big");
}

#[actix_web::test]
async fn test_phone_otp_login_is_single_use() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    let phone = "9000000071";
    seed_phone_student(&storage, phone).await;
    let ip = ("X-Forwarded-For", "10.0.7.1");

    let req = test::TestRequest::post()
        .uri("/api/auth/login-phone")
        .insert_header(ip)
        .set_json(json!({"phone": phone}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let otp = cached_otp(&cache, phone).await.unwrap();

    let verify = |code: &str| {
        test::TestRequest::post()
            .uri("/api/auth/verify-otp")
            .insert_header(ip)
            .set_json(json!({"phone": phone, "otp": code}))
            .to_request()
    };

    let resp = test::call_service(&app, verify(wrong_otp(&otp))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(&app, verify(&otp)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["access_token"].as_str().is_some());

    // 验证码只能用一次
    let resp = test::call_service(&app, verify(&otp)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_otp_revoked_after_repeated_failures() {
    let (storage, cache) = backends().await;
    let app = app!(storage, cache);
    let phone = "9000000081";
    seed_phone_student(&storage, phone).await;

    let send_otp = |ip: &str| {
        test::TestRequest::post()
            .uri("/api/auth/login-phone")
            .insert_header(("X-Forwarded-For", ip.to_string()))
            .set_json(json!({"phone": phone}))
            .to_request()
    };
    let verify = |ip: String, code: &str| {
        test::TestRequest::post()
            .uri("/api/auth/verify-otp")
            .insert_header(("X-Forwarded-For", ip))
            .set_json(json!({"phone": phone, "otp": code}))
            .to_request()
    };

    let resp = test::call_service(&app, send_otp("10.0.8.1")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let otp = cached_otp(&cache, phone).await.unwrap();

    // 每次换一个来源 IP，绕开按 IP 的限流
    for i in 0..5 {
        let req = verify(format!("10.0.8.{}", 10 + i), wrong_otp(&otp));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "attempt {i}");
    }
    assert!(cached_otp(&cache, phone).await.is_none());

    let resp = test::call_service(&app, verify("10.0.8.20".to_string(), &otp)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // 重新获取的验证码可以正常使用
    let resp = test::call_service(&app, send_otp("10.0.8.2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let otp = cached_otp(&cache, phone).await.unwrap();
    let resp = test::call_service(&app, verify("10.0.8.21".to_string(), &otp)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
