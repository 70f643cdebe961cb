use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error;

pub async fn dashboard(service: &AdminService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_dashboard_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to load dashboard",
            e,
        )),
    }
}
