pub mod dashboard;
pub mod session;
pub mod students;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::admins::requests::AdminLoginRequest;
use crate::models::students::requests::StudentQueryParams;
use crate::storage::Storage;

pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 后台登录
    pub async fn login(
        &self,
        request: &HttpRequest,
        login_request: AdminLoginRequest,
    ) -> ActixResult<HttpResponse> {
        session::login(self, request, login_request).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        session::logout(self, request).await
    }

    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        session::me(self, request).await
    }

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request).await
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        students::list_students(self, request, query).await
    }

    pub async fn get_student(&self, request: &HttpRequest, student_id: i64) -> ActixResult<HttpResponse> {
        students::get_student(self, request, student_id).await
    }

    pub async fn delete_student(&self, request: &HttpRequest, student_id: i64) -> ActixResult<HttpResponse> {
        students::delete_student(self, request, student_id).await
    }
}
