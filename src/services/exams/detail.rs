use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ExamService;
use crate::access::{ResourceKind, scope_filter};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    exams::{entities::Exam, responses::ExamResponse},
};
use crate::services::common::{RelationLoader, current_principal, internal_error, not_found};

pub(crate) async fn render_exam(loader: &mut RelationLoader<'_>, exam: Exam) -> Result<ExamResponse> {
    Ok(ExamResponse {
        id: exam.id,
        subject: loader.subject(exam.subject_id).await?,
        clazz: loader.class(exam.class_id).await?,
        author: loader.teacher(exam.author_id).await?,
        date: exam.date,
        topic: exam.topic,
        details: exam.details,
    })
}

pub async fn get_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let filter = scope_filter(ResourceKind::Exam, &principal);
    let exam = match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) if filter.admits(&exam) => exam,
        Ok(_) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load exam", e)),
    };

    let mut loader = RelationLoader::new(storage.as_ref());
    match render_exam(&mut loader, exam).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Query successful."))),
        Err(e) => Ok(internal_error("Failed to load exam relations", e)),
    }
}
