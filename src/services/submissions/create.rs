use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::access::nested::resolve_homework;
use crate::access::{Action, Decision, DenyReason, FieldSet, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    submissions::{
        entities::NewSubmission, requests::CreateSubmissionRequest,
        responses::SubmissionWriteResponse,
    },
};
use crate::services::common::{current_principal, internal_error, validation_failed};
use crate::utils::validate::{FieldErrors, TextRule, check_optional_url, check_text};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    homework_id: i64,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    let Some(student) = principal.as_student() else {
        return Ok(DenyReason::WrongRole.into_response());
    };

    let homework = match resolve_homework(storage.as_ref(), &principal, homework_id).await {
        Ok(homework) => homework,
        Err(e) => return Ok(e.into_response()),
    };

    // 只能提交本班的作业
    let draft = FieldSet::default()
        .with("student", student.id)
        .with("homework", homework.id)
        .with("clazz", homework.class_id);
    if let Decision::Deny(reason) = authorize(
        Action::Create,
        ResourceKind::Submission,
        Some(&draft),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let mut errors = FieldErrors::new();
    check_text(
        &mut errors,
        "content",
        req.content.as_deref(),
        TextRule::required(2048),
    );
    check_optional_url(&mut errors, "solution_url", req.solution_url.as_deref());
    let Some(content) = req.content.filter(|_| errors.is_empty()) else {
        return Ok(validation_failed(errors));
    };

    let new_submission = NewSubmission {
        homework_id: homework.id,
        student_id: student.id,
        content,
        solution_url: req.solution_url,
    };

    match storage.create_submission(new_submission).await {
        Ok(submission) => {
            info!(
                "Student {} submitted homework {}",
                student.user.username, homework.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubmissionWriteResponse::from(&submission),
                "Submission successfully created.",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create submission", e)),
    }
}
