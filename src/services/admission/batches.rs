//! 批次管理（后台）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AdmissionService;
use crate::models::batches::requests::{
    BatchListQuery, BatchQueryParams, CreateBatchRequest, UpdateBatchRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error};
use crate::storage::Storage;
use crate::utils::validate::validate_iso_date;

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_batch_fields(
    batch_name: Option<&str>,
    start_date: Option<&str>,
) -> Result<(), &'static str> {
    if batch_name.is_some_and(|n| n.trim().is_empty()) {
        return Err("Batch name is required");
    }
    if let Some(date) = start_date {
        validate_iso_date(date)?;
    }
    Ok(())
}

async fn ensure_course(storage: &Arc<dyn Storage>, course_id: i64) -> Result<(), HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Err(storage_error(
            ErrorCode::InternalServerError,
            "Failed to get course",
            e,
        )),
    }
}

pub async fn list_batches(
    service: &AdmissionService,
    request: &HttpRequest,
    query: BatchQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_batches_with_pagination(BatchListQuery::from(query))
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Batches retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list batches",
            e,
        )),
    }
}

pub async fn create_batch(
    service: &AdmissionService,
    request: &HttpRequest,
    mut batch: CreateBatchRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    batch.start_date = normalize_optional(batch.start_date);
    if let Err(msg) = validate_batch_fields(Some(&batch.batch_name), batch.start_date.as_deref()) {
        return Ok(bad_request(ErrorCode::BatchInvalid, msg));
    }
    batch.batch_name = batch.batch_name.trim().to_string();
    batch.timing = normalize_optional(batch.timing);
    batch.faculty = normalize_optional(batch.faculty);

    if let Err(response) = ensure_course(&storage, batch.course_id).await {
        return Ok(response);
    }

    match storage.create_batch(batch).await {
        Ok(batch) => {
            tracing::info!("Batch {} created for course {}", batch.id, batch.course_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                batch,
                "Batch created successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::BatchInvalid,
            "Failed to create batch",
            e,
        )),
    }
}

pub async fn update_batch(
    service: &AdmissionService,
    request: &HttpRequest,
    batch_id: i64,
    mut update: UpdateBatchRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    update.start_date = normalize_optional(update.start_date);
    if let Err(msg) =
        validate_batch_fields(update.batch_name.as_deref(), update.start_date.as_deref())
    {
        return Ok(bad_request(ErrorCode::BatchInvalid, msg));
    }
    update.batch_name = update.batch_name.map(|n| n.trim().to_string());

    if let Some(course_id) = update.course_id
        && let Err(response) = ensure_course(&storage, course_id).await
    {
        return Ok(response);
    }

    match storage.update_batch(batch_id, update).await {
        Ok(Some(batch)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            batch,
            "Batch updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::BatchNotFound, "Batch not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::BatchInvalid,
            "Failed to update batch",
            e,
        )),
    }
}

pub async fn delete_batch(
    service: &AdmissionService,
    request: &HttpRequest,
    batch_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_batch(batch_id).await {
        Ok(true) => {
            tracing::info!("Batch {} deleted", batch_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Batch deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::BatchNotFound, "Batch not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to delete batch",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Morning"), Some("2025-07-01"), true)]
    #[case(Some("Morning"), None, true)]
    #[case(Some(" "), None, false)]
    #[case(Some("Morning"), Some("01/07/2025"), false)]
    #[case(Some("Morning"), Some("2025-02-30"), false)]
    #[case(None, None, true)]
    fn test_batch_fields(
        #[case] name: Option<&str>,
        #[case] start_date: Option<&str>,
        #[case] ok: bool,
    ) {
        assert_eq!(validate_batch_fields(name, start_date).is_ok(), ok);
    }

    #[test]
    fn test_blank_optional_cleared() {
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" 6pm ".into())).as_deref(), Some("6pm"));
    }
}
