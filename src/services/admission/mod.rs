pub mod batches;
pub mod enroll;
pub mod enrollments;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::batches::requests::{BatchQueryParams, CreateBatchRequest, UpdateBatchRequest};
use crate::models::enrollments::requests::{
    EnrollRequest, EnrollmentQueryParams, UpdateEnrollmentStatusRequest,
};
use crate::storage::Storage;

pub struct AdmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 学生报名
    pub async fn enroll(
        &self,
        request: &HttpRequest,
        enroll_request: EnrollRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, enroll_request).await
    }

    pub async fn my_enrollments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enrollments::my_enrollments(self, request).await
    }

    pub async fn get_enrollment(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
    ) -> ActixResult<HttpResponse> {
        enrollments::get_enrollment(self, request, enrollment_id).await
    }

    // 学生退出报名
    pub async fn unenroll(&self, request: &HttpRequest, enrollment_id: i64) -> ActixResult<HttpResponse> {
        enrollments::unenroll(self, request, enrollment_id).await
    }

    pub async fn update_enrollment_status(
        &self,
        request: &HttpRequest,
        enrollment_id: i64,
        update: UpdateEnrollmentStatusRequest,
    ) -> ActixResult<HttpResponse> {
        enrollments::update_enrollment_status(self, request, enrollment_id, update).await
    }

    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        query: EnrollmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        enrollments::list_enrollments(self, request, query).await
    }

    pub async fn list_batches(
        &self,
        request: &HttpRequest,
        query: BatchQueryParams,
    ) -> ActixResult<HttpResponse> {
        batches::list_batches(self, request, query).await
    }

    pub async fn create_batch(
        &self,
        request: &HttpRequest,
        batch: CreateBatchRequest,
    ) -> ActixResult<HttpResponse> {
        batches::create_batch(self, request, batch).await
    }

    pub async fn update_batch(
        &self,
        request: &HttpRequest,
        batch_id: i64,
        update: UpdateBatchRequest,
    ) -> ActixResult<HttpResponse> {
        batches::update_batch(self, request, batch_id, update).await
    }

    pub async fn delete_batch(&self, request: &HttpRequest, batch_id: i64) -> ActixResult<HttpResponse> {
        batches::delete_batch(self, request, batch_id).await
    }
}
