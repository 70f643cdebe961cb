use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::collections::BTreeMap;

use super::SystemService;
use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: &'static str,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: i64,
}

pub async fn index(service: &SystemService, _request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let info = ServiceInfo {
        name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        environment: config.app.environment.clone(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(info, "Service is running")))
}

pub async fn api_info(service: &SystemService, _request: &HttpRequest) -> ActixResult<HttpResponse> {
    let endpoints = BTreeMap::from([
        ("auth", "/api/auth"),
        ("courses", "/api/courses"),
        ("admission", "/api/admission"),
        ("payments", "/api/payments"),
        ("notifications", "/api/notifications"),
        ("health", "/api/health"),
        ("admin", "/admin"),
    ]);
    let info = ApiInfo {
        name: format!("{} API", service.get_config().app.system_name),
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(info, "API information")))
}

pub async fn health(_service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthResponse {
            status: "healthy",
            uptime_seconds,
        },
        "Service is healthy",
    )))
}
