pub mod admin;
pub mod create;
pub mod history;
pub mod verify;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::{
    CreatePaymentRequest, PaymentQueryParams, UpdatePaymentStatusRequest, VerifyPaymentRequest,
};
use crate::models::{ErrorCode, PaginationQuery};
use crate::services::unauthorized;
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

pub(crate) fn login_required() -> HttpResponse {
    unauthorized(ErrorCode::Unauthorized, "Unauthorized access, please login")
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 学生发起支付
    pub async fn create_payment(
        &self,
        request: &HttpRequest,
        payment: CreatePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, request, payment).await
    }

    // 网关回调后的支付校验
    pub async fn verify_payment(
        &self,
        request: &HttpRequest,
        verify: VerifyPaymentRequest,
    ) -> ActixResult<HttpResponse> {
        verify::verify_payment(self, request, verify).await
    }

    pub async fn payment_history(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        history::payment_history(self, request, query).await
    }

    pub async fn get_payment(&self, request: &HttpRequest, payment_id: i64) -> ActixResult<HttpResponse> {
        history::get_payment(self, request, payment_id).await
    }

    pub async fn list_payments(
        &self,
        request: &HttpRequest,
        query: PaymentQueryParams,
    ) -> ActixResult<HttpResponse> {
        admin::list_payments(self, request, query).await
    }

    pub async fn payment_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::payment_stats(self, request).await
    }

    pub async fn update_payment_status(
        &self,
        request: &HttpRequest,
        payment_id: i64,
        update: UpdatePaymentStatusRequest,
    ) -> ActixResult<HttpResponse> {
        admin::update_payment_status(self, request, payment_id, update).await
    }

    pub async fn delete_payment(&self, request: &HttpRequest, payment_id: i64) -> ActixResult<HttpResponse> {
        admin::delete_payment(self, request, payment_id).await
    }
}
