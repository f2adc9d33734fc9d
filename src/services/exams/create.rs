use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ExamService, check_exam_text};
use crate::access::{Action, Decision, DenyReason, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    exams::{entities::NewExam, requests::CreateExamRequest, responses::ExamWriteResponse},
};
use crate::services::common::{
    check_class_ref, current_principal, internal_error, validation_failed,
};
use crate::utils::validate::{FieldErrors, check_required};

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    req: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    if let Decision::Deny(reason) =
        authorize(Action::Create, ResourceKind::Exam, None, Some(&principal))
    {
        return Ok(reason.into_response());
    }
    let Some(teacher) = principal.as_teacher() else {
        return Ok(DenyReason::WrongRole.into_response());
    };

    let mut errors = FieldErrors::new();
    check_exam_text(&mut errors, req.topic.as_deref(), req.details.as_deref(), false);
    check_required(&mut errors, "clazz", req.clazz.as_ref());
    check_required(&mut errors, "date", req.date.as_ref());
    if let Err(e) = check_class_ref(storage.as_ref(), &mut errors, "clazz", req.clazz).await {
        return Ok(internal_error("Failed to check class", e));
    }
    if !errors.is_empty() {
        return Ok(validation_failed(errors));
    }

    let (Some(topic), Some(class_id), Some(date)) = (req.topic, req.clazz, req.date) else {
        return Ok(validation_failed(errors));
    };

    let new_exam = NewExam {
        subject_id: teacher.subject.id,
        class_id,
        author_id: teacher.id,
        date,
        topic,
        details: req.details.unwrap_or_default(),
    };

    match storage.create_exam(new_exam).await {
        Ok(exam) => {
            info!(
                "Teacher {} scheduled exam {} for class {}",
                teacher.user.username, exam.id, exam.class_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ExamWriteResponse::from(&exam),
                "Exam successfully created.",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create exam", e)),
    }
}
