pub mod content;
pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, CreateNoteRequest, CreateTestRequest,
    CreateVideoRequest, UpdateCourseRequest,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn get_course(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        detail::get_course(self, request, course_id).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, update).await
    }

    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    pub async fn list_videos(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        content::list_videos(self, request, course_id).await
    }

    pub async fn create_video(
        &self,
        request: &HttpRequest,
        course_id: i64,
        video: CreateVideoRequest,
    ) -> ActixResult<HttpResponse> {
        content::create_video(self, request, course_id, video).await
    }

    pub async fn list_notes(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        content::list_notes(self, request, course_id).await
    }

    pub async fn create_note(
        &self,
        request: &HttpRequest,
        course_id: i64,
        note: CreateNoteRequest,
    ) -> ActixResult<HttpResponse> {
        content::create_note(self, request, course_id, note).await
    }

    pub async fn list_tests(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        content::list_tests(self, request, course_id).await
    }

    pub async fn create_test(
        &self,
        request: &HttpRequest,
        course_id: i64,
        test: CreateTestRequest,
    ) -> ActixResult<HttpResponse> {
        content::create_test(self, request, course_id, test).await
    }
}
