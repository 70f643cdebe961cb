use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::staff_route;
use crate::models::admins::entities::AdminRole;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, CreateNoteRequest, CreateTestRequest,
    CreateVideoRequest, UpdateCourseRequest,
};
use crate::services::CourseService;
use crate::utils::SafeCourseIdI64;

// 懒加载的全局 CourseService 实例
pub(crate) static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.0, update_data.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req, course_id.0).await
}

pub async fn list_videos(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_videos(&req, course_id.0).await
}

pub async fn create_video(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    video_data: web::Json<CreateVideoRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_video(&req, course_id.0, video_data.into_inner())
        .await
}

pub async fn list_notes(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_notes(&req, course_id.0).await
}

pub async fn create_note(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    note_data: web::Json<CreateNoteRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_note(&req, course_id.0, note_data.into_inner())
        .await
}

pub async fn list_tests(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_tests(&req, course_id.0).await
}

pub async fn create_test(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    test_data: web::Json<CreateTestRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_test(&req, course_id.0, test_data.into_inner())
        .await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    let staff = AdminRole::staff_roles();

    cfg.service(
        web::scope("/api/courses")
            // 浏览公开，增删改仅后台人员
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(staff_route(web::post().to(create_course), staff)),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(staff_route(web::put().to(update_course), staff))
                    .route(staff_route(web::delete().to(delete_course), staff)),
            )
            .service(
                web::resource("/{course_id}/videos")
                    .route(web::get().to(list_videos))
                    .route(staff_route(web::post().to(create_video), staff)),
            )
            .service(
                web::resource("/{course_id}/notes")
                    .route(web::get().to(list_notes))
                    .route(staff_route(web::post().to(create_note), staff)),
            )
            .service(
                web::resource("/{course_id}/tests")
                    .route(web::get().to(list_tests))
                    .route(staff_route(web::post().to(create_test), staff)),
            ),
    );
}
