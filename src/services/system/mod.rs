pub mod info;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 服务信息
    pub async fn index(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::index(self, request).await
    }

    // API 目录
    pub async fn api_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::api_info(self, request).await
    }

    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        info::health(self, request).await
    }
}
