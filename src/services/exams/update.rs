use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ExamService, check_exam_text};
use crate::access::{Action, Decision, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    exams::{requests::UpdateExamRequest, responses::ExamWriteResponse},
};
use crate::services::common::{
    check_class_ref, current_principal, internal_error, not_found, validation_failed,
};
use crate::utils::validate::FieldErrors;

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    req: UpdateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let exam = match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => exam,
        Ok(None) => return Ok(not_found()),
        Err(e) => return Ok(internal_error("Failed to load exam", e)),
    };

    if let Decision::Deny(reason) =
        authorize(Action::Update, ResourceKind::Exam, Some(&exam), Some(&principal))
    {
        return Ok(reason.into_response());
    }

    let mut errors = FieldErrors::new();
    check_exam_text(&mut errors, req.topic.as_deref(), req.details.as_deref(), true);
    if let Err(e) = check_class_ref(storage.as_ref(), &mut errors, "clazz", req.clazz).await {
        return Ok(internal_error("Failed to check class", e));
    }
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    match storage.update_exam(exam_id, req).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamWriteResponse::from(&updated),
            "Exam successfully updated.",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error("Failed to update exam", e)),
    }
}
