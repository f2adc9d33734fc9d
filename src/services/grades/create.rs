use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, check_grade_value};
use crate::access::nested::resolve_graded_student;
use crate::access::{Action, Decision, DenyReason, FieldSet, ResourceKind, authorize};
use crate::models::{
    ApiResponse,
    grades::{entities::NewGrade, requests::GradeRequest, responses::GradeWriteResponse},
};
use crate::services::common::{current_principal, internal_error, validation_failed};

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    subject_id: i64,
    user_id: i64,
    req: GradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let principal = match current_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };
    let Some(teacher) = principal.as_teacher() else {
        return Ok(DenyReason::WrongRole.into_response());
    };

    let (subject, student) =
        match resolve_graded_student(storage.as_ref(), subject_id, user_id).await {
            Ok(resolved) => resolved,
            Err(e) => return Ok(e.into_response()),
        };

    // 只能给自己所教科目打分
    let draft = FieldSet::default()
        .with("author", teacher.id)
        .with("subject", subject.id)
        .with("student", student.id);
    if let Decision::Deny(reason) = authorize(
        Action::Create,
        ResourceKind::Grade,
        Some(&draft),
        Some(&principal),
    ) {
        return Ok(reason.into_response());
    }

    let value = match check_grade_value(req.value) {
        Ok(value) => value,
        Err(errors) => return Ok(validation_failed(errors)),
    };

    let new_grade = NewGrade {
        subject_id: subject.id,
        student_id: student.id,
        author_id: teacher.id,
        value,
    };

    match storage.create_grade(new_grade).await {
        Ok(grade) => {
            info!(
                "Teacher {} graded student {} in {} with {}",
                teacher.user.username, student.user.username, subject.title, grade.value
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                GradeWriteResponse::from(&grade),
                "Grade successfully created.",
            )))
        }
        Err(e) => Ok(internal_error("Failed to create grade", e)),
    }
}
