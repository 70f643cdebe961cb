//! 课程视频、讲义、测验

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::CourseService;
use crate::models::courses::entities::TestSummary;
use crate::models::courses::requests::{CreateNoteRequest, CreateTestRequest, CreateVideoRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error};
use crate::storage::Storage;

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

fn require(value: &str, message: &'static str) -> Result<(), HttpResponse> {
    if value.trim().is_empty() {
        Err(bad_request(ErrorCode::ContentInvalid, message))
    } else {
        Ok(())
    }
}

/// 题目必须是合法 JSON，及格分在 0..=100
pub(crate) fn validate_test(test: &CreateTestRequest) -> Result<(), &'static str> {
    if test.title.trim().is_empty() {
        return Err("Test title is required");
    }
    if serde_json::from_str::<serde_json::Value>(&test.questions_json).is_err() {
        return Err("questions_json must be valid JSON");
    }
    if test.passing_score.is_some_and(|s| !(0..=100).contains(&s)) {
        return Err("passing_score must be between 0 and 100");
    }
    if test.duration.is_some_and(|d| d <= 0) {
        return Err("Duration must be positive");
    }
    Ok(())
}

pub async fn list_videos(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(response) = ensure_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.list_course_videos(course_id).await {
        Ok(videos) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            videos,
            "Videos retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list videos",
            e,
        )),
    }
}

pub async fn create_video(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    video: CreateVideoRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(response) = require(&video.title, "Video title is required")
        .and_then(|_| require(&video.video_url, "video_url is required"))
    {
        return Ok(response);
    }
    if video.duration.is_some_and(|d| d < 0) {
        return Ok(bad_request(
            ErrorCode::ContentInvalid,
            "Duration must not be negative",
        ));
    }
    if let Err(response) = ensure_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.create_video(course_id, video).await {
        Ok(video) => Ok(HttpResponse::Created().json(ApiResponse::success(
            video,
            "Video added successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::ContentInvalid,
            "Failed to add video",
            e,
        )),
    }
}

pub async fn list_notes(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(response) = ensure_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.list_course_notes(course_id).await {
        Ok(notes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notes,
            "Notes retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list notes",
            e,
        )),
    }
}

pub async fn create_note(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    note: CreateNoteRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(response) = require(&note.title, "Note title is required")
        .and_then(|_| require(&note.pdf_url, "pdf_url is required"))
    {
        return Ok(response);
    }
    if let Err(response) = ensure_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.create_note(course_id, note).await {
        Ok(note) => Ok(HttpResponse::Created().json(ApiResponse::success(
            note,
            "Note added successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::ContentInvalid,
            "Failed to add note",
            e,
        )),
    }
}

/// 列表不返回题目
pub async fn list_tests(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(response) = ensure_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.list_course_tests(course_id).await {
        Ok(tests) => {
            let tests: Vec<TestSummary> = tests.into_iter().map(TestSummary::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                tests,
                "Tests retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list tests",
            e,
        )),
    }
}

pub async fn create_test(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    test: CreateTestRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(msg) = validate_test(&test) {
        return Ok(bad_request(ErrorCode::ContentInvalid, msg));
    }
    if let Err(response) = ensure_course(&storage, course_id).await {
        return Ok(response);
    }

    match storage.create_test(course_id, test).await {
        Ok(test) => Ok(HttpResponse::Created().json(ApiResponse::success(
            test,
            "Test added successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::ContentInvalid,
            "Failed to add test",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn test_request(questions_json: &str, passing_score: Option<i32>) -> CreateTestRequest {
        CreateTestRequest {
            title: "Loops quiz".into(),
            questions_json: questions_json.into(),
            duration: Some(30),
            passing_score,
        }
    }

    #[rstest]
    #[case(r#"[{"q":"1+1","a":"2"}]"#, Some(40), true)]
    #[case("[]", None, true)]
    #[case("not json", Some(40), false)]
    #[case("[]", Some(101), false)]
    #[case("[]", Some(-1), false)]
    #[case("[]", Some(100), true)]
    fn test_validate_test(
        #[case] questions: &str,
        #[case] passing_score: Option<i32>,
        #[case] ok: bool,
    ) {
        assert_eq!(validate_test(&test_request(questions, passing_score)).is_ok(), ok);
    }
}
